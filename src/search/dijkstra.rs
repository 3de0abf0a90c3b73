//! Dijkstra's algorithm with an explicit best-distance table.
//!
//! On unit edges this returns the same route as [`super::ucs`]; the table
//! only suppresses pushes that would not improve a recorded distance.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use super::{Frontier, Path};
use crate::grid::{Grid, Pos};

pub(crate) fn search(grid: &Grid, start: Pos, goal: Pos) -> Option<Path> {
    let mut frontier = Frontier::new();
    let mut visited = HashSet::new();
    let mut came_from = HashMap::new();
    let mut best: HashMap<Pos, u32> = HashMap::from([(start, 0)]);
    frontier.push(0, 0, start, None);

    while let Some(entry) = frontier.pop() {
        if !visited.insert(entry.pos) {
            continue;
        }
        if let Some(parent) = entry.parent {
            came_from.insert(entry.pos, parent);
        }

        if entry.pos == goal {
            trace!(%start, %goal, expanded = visited.len(), queued = frontier.len(), "dijkstra reached goal");
            return Some(Path::reconstruct(&came_from, start, goal));
        }

        for next in grid.neighbors(entry.pos) {
            if visited.contains(&next) {
                continue;
            }
            let cost = entry.cost + 1;
            if best.get(&next).map_or(true, |&known| cost < known) {
                best.insert(next, cost);
                frontier.push(cost, cost, next, Some(entry.pos));
            }
        }
    }

    trace!(%start, %goal, expanded = visited.len(), "dijkstra exhausted frontier");
    None
}
