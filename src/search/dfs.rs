//! Depth-first search with a distance-sorted push order.
//!
//! Neighbours are enumerated left, right, up, down, stably sorted by
//! ascending Manhattan distance to the goal and pushed in that order. The
//! farthest candidate therefore sits on top of the stack and is explored
//! first, which sends this pursuer on long detours. Routes are not shortest.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use super::Path;
use crate::grid::{Dir, Grid, Pos};

const ORDER: [Dir; 4] = [Dir::Left, Dir::Right, Dir::Up, Dir::Down];

pub(crate) fn search(grid: &Grid, start: Pos, goal: Pos) -> Option<Path> {
    let mut stack: Vec<(Pos, Option<Pos>)> = vec![(start, None)];
    let mut visited = HashSet::new();
    let mut came_from = HashMap::new();
    let mut candidates = Vec::with_capacity(ORDER.len());

    while let Some((pos, parent)) = stack.pop() {
        if !visited.insert(pos) {
            continue;
        }
        if let Some(parent) = parent {
            came_from.insert(pos, parent);
        }

        if pos == goal {
            trace!(%start, %goal, expanded = visited.len(), stacked = stack.len(), "dfs reached goal");
            return Some(Path::reconstruct(&came_from, start, goal));
        }

        candidates.clear();
        candidates.extend(grid.neighbors_in(pos, &ORDER));
        candidates.sort_by_key(|next| next.manhattan(goal));
        for &next in &candidates {
            if !visited.contains(&next) {
                stack.push((next, Some(pos)));
            }
        }
    }

    trace!(%start, %goal, expanded = visited.len(), "dfs exhausted stack");
    None
}
