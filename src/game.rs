//! Game setup, state and the per-tick transition.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, info};

use crate::grid::{Dir, Grid, GridError, Pos};
use crate::maze::{parse_maze, Maze, MazeError, CLASSIC, SIMPLIFIED};
use crate::pursuer::{advance_pursuers, Pursuer};
use crate::search::Strategy;

pub const PELLET_SCORE: u32 = 10;
pub const BONUS_SCORE: u32 = 50;

/// Built-in game layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// All four pursuers, one per corner.
    #[default]
    Classic,
    /// Uniform-cost and depth-first pursuers only.
    Simplified,
}

impl Variant {
    pub fn name(self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Simplified => "simplified",
        }
    }

    pub fn setup(self) -> Setup {
        match self {
            Variant::Classic => Setup::custom(
                CLASSIC,
                Pos::new(14, 9),
                &[
                    (Strategy::UniformCost, Pos::new(1, 1)),
                    (Strategy::DepthFirst, Pos::new(1, 15)),
                    (Strategy::AStar, Pos::new(26, 1)),
                    (Strategy::Dijkstra, Pos::new(26, 15)),
                ],
            ),
            Variant::Simplified => Setup::custom(
                SIMPLIFIED,
                Pos::new(1, 1),
                &[
                    (Strategy::UniformCost, Pos::new(8, 10)),
                    (Strategy::DepthFirst, Pos::new(8, 11)),
                ],
            ),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown variant {0:?} (expected classic or simplified)")]
pub struct ParseVariantError(String);

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Variant::Classic),
            "simplified" | "simple" => Ok(Variant::Simplified),
            _ => Err(ParseVariantError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error("{who} spawn {pos} is outside the {width}x{height} maze")]
    SpawnOutOfBounds {
        who: String,
        pos: Pos,
        width: usize,
        height: usize,
    },
    #[error("{who} spawn {pos} is a wall")]
    SpawnInWall { who: String, pos: Pos },
    #[error("this layout has no spawn for the {0} pursuer")]
    NoSpawn(Strategy),
}

/// Maze text plus spawn points; everything [`Game::reset`] needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setup {
    pub rows: Vec<String>,
    pub player_spawn: Pos,
    pub pursuers: Vec<(Strategy, Pos)>,
}

impl Setup {
    pub fn custom<S: AsRef<str>>(rows: &[S], player_spawn: Pos, pursuers: &[(Strategy, Pos)]) -> Self {
        Self {
            rows: rows.iter().map(|r| r.as_ref().to_string()).collect(),
            player_spawn,
            pursuers: pursuers.to_vec(),
        }
    }

    /// Keeps only the listed pursuers, in [`Strategy::ALL`] order.
    pub fn with_pursuers(mut self, active: &[Strategy]) -> Result<Self, SetupError> {
        if let Some(&missing) = active
            .iter()
            .find(|s| !self.pursuers.iter().any(|(have, _)| have == *s))
        {
            return Err(SetupError::NoSpawn(missing));
        }
        self.pursuers.retain(|(strategy, _)| active.contains(strategy));
        self.pursuers.sort_by_key(|(strategy, _)| {
            Strategy::ALL.iter().position(|s| s == strategy)
        });
        Ok(self)
    }
}

/// The static part of a game: parsed maze and spawn points.
#[derive(Debug, Clone)]
pub struct Game {
    maze: Maze,
    setup: Setup,
}

impl Game {
    pub fn new(setup: Setup) -> Result<Self, SetupError> {
        let maze = parse_maze(&setup.rows)?;
        check_spawn(&maze.grid, "player", setup.player_spawn)?;
        for (strategy, pos) in &setup.pursuers {
            check_spawn(&maze.grid, &format!("{strategy} pursuer"), *pos)?;
        }
        info!(
            width = maze.grid.width(),
            height = maze.grid.height(),
            pellets = maze.pellets.len(),
            bonuses = maze.bonuses.len(),
            pursuers = setup.pursuers.len(),
            "maze loaded"
        );
        Ok(Self { maze, setup })
    }

    pub fn grid(&self) -> &Grid {
        &self.maze.grid
    }

    pub fn setup(&self) -> &Setup {
        &self.setup
    }

    /// A fresh state at the spawn points with every item restored.
    pub fn reset(&self) -> GameState {
        GameState {
            player: self.setup.player_spawn,
            pursuers: self
                .setup
                .pursuers
                .iter()
                .map(|&(strategy, pos)| Pursuer::new(strategy, pos))
                .collect(),
            pellets: self.maze.pellets.clone(),
            bonuses: self.maze.bonuses.clone(),
            score: 0,
            commanded: None,
            last_moved: None,
            won: false,
            lost: false,
        }
    }

    pub fn tick(&self, state: &GameState) -> Result<GameState, GridError> {
        apply_tick(self.grid(), state)
    }
}

fn check_spawn(grid: &Grid, who: &str, pos: Pos) -> Result<(), SetupError> {
    match grid.is_open(pos) {
        Ok(true) => Ok(()),
        Ok(false) => Err(SetupError::SpawnInWall {
            who: who.to_string(),
            pos,
        }),
        Err(_) => Err(SetupError::SpawnOutOfBounds {
            who: who.to_string(),
            pos,
            width: grid.width(),
            height: grid.height(),
        }),
    }
}

/// Everything that changes from tick to tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub player: Pos,
    pub pursuers: Vec<Pursuer>,
    pub pellets: BTreeSet<Pos>,
    pub bonuses: BTreeSet<Pos>,
    pub score: u32,
    /// Direction most recently requested by the player.
    pub commanded: Option<Dir>,
    /// Direction of the last successful player move.
    pub last_moved: Option<Dir>,
    pub won: bool,
    pub lost: bool,
}

impl GameState {
    pub fn with_command(mut self, dir: Dir) -> Self {
        self.commanded = Some(dir);
        self
    }

    pub fn is_over(&self) -> bool {
        self.won || self.lost
    }

    fn try_move(&mut self, grid: &Grid, dir: Dir) -> Result<bool, GridError> {
        match grid.step(self.player, dir) {
            Some(next) if grid.is_open(next)? => {
                self.player = next;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Advances `state` by one tick.
///
/// The phases run in a fixed order: player move (falling back to the last
/// direction that worked), item pickup, win check, pursuer moves, capture
/// check. A finished game is returned unchanged.
pub fn apply_tick(grid: &Grid, state: &GameState) -> Result<GameState, GridError> {
    let mut next = state.clone();
    if next.is_over() {
        return Ok(next);
    }

    if let Some(dir) = next.commanded {
        if next.try_move(grid, dir)? {
            next.last_moved = Some(dir);
        } else if let Some(fallback) = next.last_moved {
            next.try_move(grid, fallback)?;
        }
    }

    if next.pellets.remove(&next.player) {
        next.score += PELLET_SCORE;
        debug!(pos = %next.player, score = next.score, left = next.pellets.len(), "pellet eaten");
    }
    if next.bonuses.remove(&next.player) {
        next.score += BONUS_SCORE;
        debug!(pos = %next.player, score = next.score, "bonus eaten");
    }

    if next.pellets.is_empty() {
        next.won = true;
        info!(score = next.score, "all pellets eaten");
    }

    let target = next.player;
    advance_pursuers(grid, &mut next.pursuers, target)?;

    if let Some(pursuer) = next.pursuers.iter().find(|p| p.pos == next.player) {
        next.lost = true;
        info!(strategy = %pursuer.strategy, pos = %next.player, score = next.score, "player caught");
    }

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor(pursuers: &[(Strategy, Pos)]) -> Game {
        Game::new(Setup::custom(
            &["########", "#     .#", "########"],
            Pos::new(1, 1),
            pursuers,
        ))
        .unwrap()
    }

    #[test]
    fn classic_variant_spawns() {
        let game = Game::new(Variant::Classic.setup()).unwrap();
        let state = game.reset();
        assert_eq!(state.player, Pos::new(14, 9));
        let strategies: Vec<_> = state.pursuers.iter().map(|p| p.strategy).collect();
        assert_eq!(strategies, Strategy::ALL.to_vec());
        assert_eq!(state.score, 0);
        assert!(!state.is_over());
    }

    #[test]
    fn simplified_variant_spawns() {
        let game = Game::new(Variant::Simplified.setup()).unwrap();
        let state = game.reset();
        assert_eq!(state.player, Pos::new(1, 1));
        assert_eq!(
            state.pursuers,
            vec![
                Pursuer::new(Strategy::UniformCost, Pos::new(8, 10)),
                Pursuer::new(Strategy::DepthFirst, Pos::new(8, 11)),
            ]
        );
    }

    #[test]
    fn selective_pursuers() {
        let setup = Variant::Classic
            .setup()
            .with_pursuers(&[Strategy::Dijkstra, Strategy::UniformCost])
            .unwrap();
        let strategies: Vec<_> = setup.pursuers.iter().map(|(s, _)| *s).collect();
        assert_eq!(strategies, vec![Strategy::UniformCost, Strategy::Dijkstra]);

        let err = Variant::Simplified
            .setup()
            .with_pursuers(&[Strategy::AStar])
            .unwrap_err();
        assert_eq!(err, SetupError::NoSpawn(Strategy::AStar));
    }

    #[test]
    fn spawns_are_validated() {
        let rows = ["####", "#  #", "####"];
        let err = Game::new(Setup::custom(&rows, Pos::new(0, 0), &[])).unwrap_err();
        assert!(matches!(err, SetupError::SpawnInWall { .. }));

        let err = Game::new(Setup::custom(
            &rows,
            Pos::new(1, 1),
            &[(Strategy::AStar, Pos::new(9, 9))],
        ))
        .unwrap_err();
        assert!(matches!(err, SetupError::SpawnOutOfBounds { .. }));

        let err = Game::new(Setup::custom(&["#", "##"], Pos::new(0, 0), &[])).unwrap_err();
        assert!(matches!(err, SetupError::Maze(MazeError::Ragged { .. })));
    }

    #[test]
    fn blocked_command_falls_back_to_last_move() {
        let game = corridor(&[]);
        let state = game.reset().with_command(Dir::Right);
        let state = game.tick(&state).unwrap();
        assert_eq!(state.player, Pos::new(2, 1));
        assert_eq!(state.last_moved, Some(Dir::Right));

        let state = game.tick(&state.with_command(Dir::Up)).unwrap();
        assert_eq!(state.player, Pos::new(3, 1));
        assert_eq!(state.commanded, Some(Dir::Up));
        assert_eq!(state.last_moved, Some(Dir::Right));
    }

    #[test]
    fn blocked_without_fallback_stays() {
        let game = corridor(&[]);
        let state = game.tick(&game.reset().with_command(Dir::Left)).unwrap();
        assert_eq!(state.player, Pos::new(1, 1));
        assert_eq!(state.last_moved, None);
    }

    #[test]
    fn no_command_no_move() {
        let game = corridor(&[]);
        let state = game.tick(&game.reset()).unwrap();
        assert_eq!(state.player, Pos::new(1, 1));
    }

    #[test]
    fn finished_state_is_frozen() {
        let game = corridor(&[]);
        let mut state = game.reset().with_command(Dir::Right);
        state.lost = true;
        assert_eq!(game.tick(&state).unwrap(), state);
    }

    #[test]
    fn reset_restores_items() {
        let game = corridor(&[]);
        let mut state = game.reset().with_command(Dir::Right);
        for _ in 0..5 {
            state = game.tick(&state).unwrap();
        }
        assert!(state.won);
        assert!(state.pellets.is_empty());

        let fresh = game.reset();
        assert_eq!(fresh.pellets.len(), 1);
        assert_eq!(fresh.player, Pos::new(1, 1));
        assert!(!fresh.is_over());
    }

    #[test]
    fn variant_names_parse() {
        assert_eq!("classic".parse::<Variant>().unwrap(), Variant::Classic);
        assert_eq!("Simplified".parse::<Variant>().unwrap(), Variant::Simplified);
        assert!("arcade".parse::<Variant>().is_err());
    }
}
