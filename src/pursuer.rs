//! Per-tick pursuer updates.

use tracing::trace;

use crate::grid::{Grid, GridError, Pos};
use crate::search::{find_next_step, find_path, Path, Strategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pursuer {
    pub strategy: Strategy,
    pub pos: Pos,
}

impl Pursuer {
    pub fn new(strategy: Strategy, pos: Pos) -> Self {
        Self { strategy, pos }
    }
}

/// Moves every pursuer one step along a freshly solved route to `target`.
///
/// Pursuers are updated in slice order and never see each other; one with
/// no route, or already on the target, stays put.
pub fn advance_pursuers(
    grid: &Grid,
    pursuers: &mut [Pursuer],
    target: Pos,
) -> Result<(), GridError> {
    for pursuer in pursuers.iter_mut() {
        if let Some(next) = find_next_step(pursuer.strategy, pursuer.pos, target, grid)? {
            trace!(strategy = %pursuer.strategy, from = %pursuer.pos, to = %next, "pursuer step");
            pursuer.pos = next;
        }
    }
    Ok(())
}

/// Full routes each pursuer would follow toward `target` right now.
pub fn planned_paths(
    grid: &Grid,
    pursuers: &[Pursuer],
    target: Pos,
) -> Result<Vec<Option<Path>>, GridError> {
    pursuers
        .iter()
        .map(|p| find_path(p.strategy, grid, p.pos, target))
        .collect()
}
