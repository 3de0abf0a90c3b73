//! Route finding from a pursuer to its target.
//!
//! Every strategy solves from scratch on each call: the frontier, visited
//! set and predecessor map live only for the duration of one search. Edges
//! all cost 1 and a cell is never expanded twice, so each search is bounded
//! by the number of open cells.

pub mod astar;
pub mod dfs;
pub mod dijkstra;
pub mod ucs;

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::grid::{Grid, GridError, Pos};

/// A pursuer personality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Uniform-cost search; degrades to breadth-first on unit edges.
    UniformCost,
    /// Stack walk with a distance-sorted push order. Not optimal.
    DepthFirst,
    /// Cost plus Manhattan distance.
    AStar,
    /// Uniform-cost search with a best-known-distance table.
    Dijkstra,
}

impl Strategy {
    /// Pursuer update order.
    pub const ALL: [Strategy; 4] = [
        Strategy::UniformCost,
        Strategy::DepthFirst,
        Strategy::AStar,
        Strategy::Dijkstra,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::UniformCost => "ucs",
            Strategy::DepthFirst => "dfs",
            Strategy::AStar => "astar",
            Strategy::Dijkstra => "dijkstra",
        }
    }

    pub fn find_path(self, grid: &Grid, start: Pos, goal: Pos) -> Result<Option<Path>, GridError> {
        find_path(self, grid, start, goal)
    }

    pub fn find_next_step(self, grid: &Grid, start: Pos, goal: Pos) -> Result<Option<Pos>, GridError> {
        find_next_step(self, start, goal, grid)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy {0:?} (expected ucs, dfs, astar or dijkstra)")]
pub struct ParseStrategyError(String);

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ucs" | "uniform-cost" => Ok(Strategy::UniformCost),
            "dfs" | "depth-first" => Ok(Strategy::DepthFirst),
            "astar" | "a*" | "heuristic" => Ok(Strategy::AStar),
            "dijkstra" => Ok(Strategy::Dijkstra),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// Cells from the start (exclusive) to the goal (inclusive).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    steps: Vec<Pos>,
}

impl Path {
    /// Walks `came_from` back from `goal` to `start`.
    ///
    /// Every cell on the chain must have been expanded, so each lookup
    /// succeeds; a missing link ends the walk early.
    pub(crate) fn reconstruct(came_from: &HashMap<Pos, Pos>, start: Pos, goal: Pos) -> Self {
        let mut steps = Vec::new();
        let mut current = goal;
        while current != start {
            steps.push(current);
            match came_from.get(&current) {
                Some(&prev) => current = prev,
                None => {
                    debug_assert!(false, "broken predecessor chain at {current}");
                    break;
                }
            }
        }
        steps.reverse();
        Self { steps }
    }

    pub fn first(&self) -> Option<Pos> {
        self.steps.first().copied()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Pos] {
        &self.steps
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pos> {
        self.steps.iter()
    }
}

/// Runs `strategy` and returns the whole discovered path.
///
/// `Ok(None)` means the goal is unreachable; `start == goal` yields an empty
/// path. Coordinates outside the grid are rejected.
pub fn find_path(
    strategy: Strategy,
    grid: &Grid,
    start: Pos,
    goal: Pos,
) -> Result<Option<Path>, GridError> {
    grid.check(start)?;
    grid.check(goal)?;
    let path = match strategy {
        Strategy::UniformCost => ucs::search(grid, start, goal),
        Strategy::DepthFirst => dfs::search(grid, start, goal),
        Strategy::AStar => astar::search(grid, start, goal),
        Strategy::Dijkstra => dijkstra::search(grid, start, goal),
    };
    Ok(path)
}

/// First cell of the route toward `goal`, or `None` when already there or
/// when no route exists.
pub fn find_next_step(
    strategy: Strategy,
    start: Pos,
    goal: Pos,
    grid: &Grid,
) -> Result<Option<Pos>, GridError> {
    Ok(find_path(strategy, grid, start, goal)?.and_then(|path| path.first()))
}

/// A queued cell in a priority frontier.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Entry {
    pub priority: u32,
    pub pos: Pos,
    pub cost: u32,
    pub parent: Option<Pos>,
    seq: u64,
}

impl Entry {
    fn key(&self) -> (u32, Pos, u64) {
        (self.priority, self.pos, self.seq)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    // Reversed so the max-heap pops the smallest key first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue ordered by (priority, position, insertion order).
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, priority: u32, cost: u32, pos: Pos, parent: Option<Pos>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            priority,
            pos,
            cost,
            parent,
            seq,
        });
    }

    pub fn pop(&mut self) -> Option<Entry> {
        self.heap.pop()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
