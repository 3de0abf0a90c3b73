//! Static occupancy grid shared by every pursuer.

use std::fmt;

use thiserror::Error;

/// A cell coordinate. `x` is the column, `y` the row.
///
/// Ordering is lexicographic on `(x, y)`; priority frontiers rely on it to
/// break ties between entries of equal priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: Pos) -> u32 {
        (self.x.abs_diff(other.x) + self.y.abs_diff(other.y)) as u32
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    /// Declared neighbour order.
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Open,
    Wall,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("position {pos} is outside the {width}x{height} grid")]
    OutOfBounds { pos: Pos, width: usize, height: usize },
}

/// Rectangular wall/open map. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a grid from row-major cells. `cells.len()` must equal
    /// `width * height`; the maze parser is the only producer.
    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn check(&self, pos: Pos) -> Result<(), GridError> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                pos,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn cell(&self, pos: Pos) -> Result<Cell, GridError> {
        self.check(pos)?;
        Ok(self.cells[pos.y * self.width + pos.x])
    }

    pub fn is_open(&self, pos: Pos) -> Result<bool, GridError> {
        Ok(self.cell(pos)? == Cell::Open)
    }

    /// The in-bounds cell one step from `pos`, whether open or not.
    pub fn step(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        let (dx, dy) = dir.delta();
        let x = pos.x.checked_add_signed(dx)?;
        let y = pos.y.checked_add_signed(dy)?;
        let next = Pos { x, y };
        self.contains(next).then_some(next)
    }

    /// Open orthogonal neighbours of `pos` in [`Dir::ALL`] order.
    pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        self.neighbors_in(pos, &Dir::ALL)
    }

    /// Open orthogonal neighbours of `pos`, enumerated in `order`.
    pub fn neighbors_in<'a>(
        &'a self,
        pos: Pos,
        order: &'a [Dir],
    ) -> impl Iterator<Item = Pos> + 'a {
        order
            .iter()
            .filter_map(move |&dir| self.step(pos, dir))
            .filter(move |&next| self.cells[next.y * self.width + next.x] == Cell::Open)
    }

    /// Every open cell in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            (*cell == Cell::Open).then(|| Pos {
                x: idx % self.width,
                y: idx / self.width,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::build_grid;

    fn small() -> Grid {
        build_grid(&["#####", "#   #", "# # #", "#   #", "#####"]).unwrap()
    }

    #[test]
    fn open_and_wall_queries() {
        let grid = small();
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 5);
        assert!(grid.is_open(Pos::new(1, 1)).unwrap());
        assert!(!grid.is_open(Pos::new(2, 2)).unwrap());
        assert!(!grid.is_open(Pos::new(0, 0)).unwrap());
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let grid = small();
        let err = grid.is_open(Pos::new(5, 1)).unwrap_err();
        assert_eq!(
            err,
            GridError::OutOfBounds {
                pos: Pos::new(5, 1),
                width: 5,
                height: 5
            }
        );
        assert!(grid.cell(Pos::new(0, 9)).is_err());
    }

    #[test]
    fn neighbors_follow_declared_order() {
        let grid = small();
        // (2,1): up is wall, down is wall, left and right open.
        let n: Vec<_> = grid.neighbors(Pos::new(2, 1)).collect();
        assert_eq!(n, vec![Pos::new(1, 1), Pos::new(3, 1)]);

        // (1,2): up and down open, left wall, right wall.
        let n: Vec<_> = grid.neighbors(Pos::new(1, 2)).collect();
        assert_eq!(n, vec![Pos::new(1, 1), Pos::new(1, 3)]);
    }

    #[test]
    fn neighbors_in_custom_order() {
        let grid = build_grid(&["   ", "   ", "   "]).unwrap();
        let centre = Pos::new(1, 1);
        let n: Vec<_> = grid
            .neighbors_in(centre, &[Dir::Left, Dir::Right, Dir::Up, Dir::Down])
            .collect();
        assert_eq!(
            n,
            vec![Pos::new(0, 1), Pos::new(2, 1), Pos::new(1, 0), Pos::new(1, 2)]
        );
    }

    #[test]
    fn neighbors_stay_in_bounds() {
        let grid = build_grid(&["  ", "  "]).unwrap();
        let n: Vec<_> = grid.neighbors(Pos::new(0, 0)).collect();
        assert_eq!(n, vec![Pos::new(0, 1), Pos::new(1, 0)]);
        assert_eq!(grid.step(Pos::new(0, 0), Dir::Up), None);
        assert_eq!(grid.step(Pos::new(1, 1), Dir::Right), None);
    }

    #[test]
    fn manhattan_distance() {
        assert_eq!(Pos::new(0, 0).manhattan(Pos::new(3, 4)), 7);
        assert_eq!(Pos::new(5, 1).manhattan(Pos::new(2, 1)), 3);
    }

    #[test]
    fn open_cells_are_row_major() {
        let grid = build_grid(&["# ", " #"]).unwrap();
        let cells: Vec<_> = grid.open_cells().collect();
        assert_eq!(cells, vec![Pos::new(1, 0), Pos::new(0, 1)]);
    }
}
