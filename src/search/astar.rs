//! A* with the Manhattan-distance heuristic.
//!
//! Manhattan distance never overestimates on a four-connected grid and is
//! consistent, so closing a cell on its first pop still yields a shortest
//! route.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use super::{Frontier, Path};
use crate::grid::{Grid, Pos};

pub(crate) fn search(grid: &Grid, start: Pos, goal: Pos) -> Option<Path> {
    let mut frontier = Frontier::new();
    let mut visited = HashSet::new();
    let mut came_from = HashMap::new();
    frontier.push(start.manhattan(goal), 0, start, None);

    while let Some(entry) = frontier.pop() {
        if !visited.insert(entry.pos) {
            continue;
        }
        if let Some(parent) = entry.parent {
            came_from.insert(entry.pos, parent);
        }

        if entry.pos == goal {
            trace!(%start, %goal, expanded = visited.len(), queued = frontier.len(), "astar reached goal");
            return Some(Path::reconstruct(&came_from, start, goal));
        }

        for next in grid.neighbors(entry.pos) {
            if !visited.contains(&next) {
                let cost = entry.cost + 1;
                frontier.push(cost + next.manhattan(goal), cost, next, Some(entry.pos));
            }
        }
    }

    trace!(%start, %goal, expanded = visited.len(), "astar exhausted frontier");
    None
}
