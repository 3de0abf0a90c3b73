//! Tick-level scenarios: scoring, win and loss.

use pacman_pursuit::game::{apply_tick, Game, Setup, Variant, BONUS_SCORE, PELLET_SCORE};
use pacman_pursuit::grid::{Dir, Pos};
use pacman_pursuit::search::Strategy;

fn game(rows: &[&str], player: Pos, pursuers: &[(Strategy, Pos)]) -> Game {
    Game::new(Setup::custom(rows, player, pursuers)).unwrap()
}

#[test]
fn pellet_scores_ten_and_never_respawns() {
    let game = game(&["########", "# ..  .#", "########"], Pos::new(1, 1), &[]);
    let state = game.reset().with_command(Dir::Right);

    let state = game.tick(&state).unwrap();
    assert_eq!(state.player, Pos::new(2, 1));
    assert_eq!(state.score, PELLET_SCORE);
    assert!(!state.pellets.contains(&Pos::new(2, 1)));

    // Walk on, then back over the eaten cell.
    let state = game.tick(&state).unwrap();
    let state = game.tick(&state.with_command(Dir::Left)).unwrap();
    assert_eq!(state.player, Pos::new(2, 1));
    assert_eq!(state.score, 2 * PELLET_SCORE);
    assert!(!state.pellets.contains(&Pos::new(2, 1)));
}

#[test]
fn bonus_scores_fifty() {
    let game = game(&["#######", "# P  .#", "#######"], Pos::new(1, 1), &[]);
    let state = game.tick(&game.reset().with_command(Dir::Right)).unwrap();
    assert_eq!(state.score, BONUS_SCORE);
    assert!(state.bonuses.is_empty());
    assert!(!state.won);
}

#[test]
fn win_ignores_remaining_bonus_items() {
    let game = game(&["#######", "#  . P#", "#######"], Pos::new(1, 1), &[]);
    let mut state = game.reset().with_command(Dir::Right);

    state = game.tick(&state).unwrap();
    assert!(!state.won);
    state = game.tick(&state).unwrap();
    assert!(state.won);
    assert!(!state.lost);
    assert_eq!(state.score, PELLET_SCORE);
    assert_eq!(state.bonuses.len(), 1);

    // Further ticks change nothing.
    assert_eq!(game.tick(&state).unwrap(), state);
}

#[test]
fn capture_after_pursuer_phase() {
    let game = game(
        &["########", "#     .#", "########"],
        Pos::new(1, 1),
        &[(Strategy::UniformCost, Pos::new(3, 1))],
    );
    let state = game.tick(&game.reset()).unwrap();
    assert_eq!(state.pursuers[0].pos, Pos::new(2, 1));
    assert!(!state.lost);

    let state = game.tick(&state).unwrap();
    assert_eq!(state.pursuers[0].pos, Pos::new(1, 1));
    assert!(state.lost);
}

#[test]
fn walking_into_a_pursuer_is_caught() {
    let game = game(
        &["########", "#     .#", "########"],
        Pos::new(1, 1),
        &[(Strategy::AStar, Pos::new(3, 1))],
    );
    // Player steps to (2,1); the pursuer's next step is that same cell.
    let state = game.tick(&game.reset().with_command(Dir::Right)).unwrap();
    assert_eq!(state.player, Pos::new(2, 1));
    assert_eq!(state.pursuers[0].pos, Pos::new(2, 1));
    assert!(state.lost);
}

#[test]
fn any_pursuer_can_catch() {
    let game = game(
        &["#########", "#      .#", "#########"],
        Pos::new(4, 1),
        &[
            (Strategy::UniformCost, Pos::new(1, 1)),
            (Strategy::Dijkstra, Pos::new(5, 1)),
        ],
    );
    let state = game.tick(&game.reset()).unwrap();
    assert_eq!(state.pursuers[0].pos, Pos::new(2, 1));
    assert_eq!(state.pursuers[1].pos, Pos::new(4, 1));
    assert!(state.lost);
}

#[test]
fn classic_opening_tick() {
    let game = Game::new(Variant::Classic.setup()).unwrap();
    let state = apply_tick(game.grid(), &game.reset()).unwrap();
    assert_eq!(state.player, Pos::new(14, 9));
    assert_eq!(state.score, 0);
    for (before, after) in game.reset().pursuers.iter().zip(&state.pursuers) {
        assert_eq!(before.pos.manhattan(after.pos), 1, "{}", after.strategy);
    }
    assert!(!state.is_over());
}

#[test]
fn restart_produces_identical_state() {
    let game = Game::new(Variant::Simplified.setup()).unwrap();
    let mut state = game.reset().with_command(Dir::Right);
    for _ in 0..4 {
        state = game.tick(&state).unwrap();
    }
    assert_ne!(state, game.reset());
    assert_eq!(game.reset(), game.reset());
}
