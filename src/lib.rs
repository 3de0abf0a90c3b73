//! Pac-Man style chase game whose ghosts each run a different graph search.
//!
//! ## Modules
//!
//! - [`grid`] - Static wall/open map and neighbour enumeration
//! - [`maze`] - Maze text parsing and the built-in layouts
//! - [`search`] - Uniform-cost, depth-first, A* and Dijkstra pursuers
//! - [`pursuer`] - One step per pursuer per tick
//! - [`game`] - Game setup, state and the tick transition
//!
//! ## Example
//!
//! ```
//! use pacman_pursuit::game::{Game, Variant};
//! use pacman_pursuit::grid::Dir;
//!
//! let game = Game::new(Variant::Classic.setup()).unwrap();
//! let state = game.reset().with_command(Dir::Right);
//! let state = game.tick(&state).unwrap();
//! assert_eq!(state.player.x, 15);
//! ```

pub mod game;
pub mod grid;
pub mod maze;
pub mod pursuer;
pub mod search;
