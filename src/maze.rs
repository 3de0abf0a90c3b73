//! Maze text format and the built-in layouts.
//!
//! `#` is a wall, `.` a pellet, `P` a bonus item and a space an empty open
//! cell. Rows must all have the same length.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::grid::{Cell, Grid, Pos};

/// Four-pursuer layout with three bonus items.
pub const CLASSIC: &[&str] = &[
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.#  #.#   #.##.#   #.#  #.#",
    "#.####.#####.##.#####.####.#",
    "#P.........................#",
    "#.####.##.########.##.####.#",
    "#......##....##....##....P.#",
    "######.##### ## #####.######",
    "     #.#            #.#     ",
    "######.# ########## #.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.#  #.#   #.##.#   #.#  #.#",
    "#.####.#####.##.#####.####.#",
    "#............P.............#",
    "############################",
];

/// Two-pursuer layout; bonus items only on the centre column.
pub const SIMPLIFIED: &[&str] = &[
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.#  #.#   #.##.#   #.#  #.#",
    "#.####.#####.##.#####.####.#",
    "#............P.............#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "     #.#            #.#     ",
    "######.# ########## #.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.#  #.#   #.##.#   #.#  #.#",
    "#.####.#####.##.#####.####.#",
    "#............P.............#",
    "############################",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("maze has no rows")]
    Empty,
    #[error("maze row {row} is {found} cells wide, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown maze character {ch:?} at ({x}, {y})")]
    UnknownChar { ch: char, x: usize, y: usize },
}

/// A parsed maze: the static grid plus the initial item placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    pub grid: Grid,
    pub pellets: BTreeSet<Pos>,
    pub bonuses: BTreeSet<Pos>,
}

pub fn parse_maze<S: AsRef<str>>(rows: &[S]) -> Result<Maze, MazeError> {
    let first = rows.first().ok_or(MazeError::Empty)?;
    let width = first.as_ref().chars().count();
    if width == 0 {
        return Err(MazeError::Empty);
    }

    let mut cells = Vec::with_capacity(width * rows.len());
    let mut pellets = BTreeSet::new();
    let mut bonuses = BTreeSet::new();

    for (y, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        let found = row.chars().count();
        if found != width {
            return Err(MazeError::Ragged {
                row: y,
                expected: width,
                found,
            });
        }
        for (x, ch) in row.chars().enumerate() {
            let cell = match ch {
                '#' => Cell::Wall,
                '.' => {
                    pellets.insert(Pos { x, y });
                    Cell::Open
                }
                'P' => {
                    bonuses.insert(Pos { x, y });
                    Cell::Open
                }
                ' ' => Cell::Open,
                _ => return Err(MazeError::UnknownChar { ch, x, y }),
            };
            cells.push(cell);
        }
    }

    Ok(Maze {
        grid: Grid::from_cells(width, rows.len(), cells),
        pellets,
        bonuses,
    })
}

pub fn build_grid<S: AsRef<str>>(rows: &[S]) -> Result<Grid, MazeError> {
    parse_maze(rows).map(|maze| maze.grid)
}
