//! Command line and environment settings for the terminal front end.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use pacman_pursuit::game::{Setup, Variant};
use pacman_pursuit::search::Strategy;

const DEFAULT_TICK_MS: u64 = 250;
const DEFAULT_RENDER_FPS: u64 = 60;

/// Terminal Pac-Man chased by search-driven ghosts
#[derive(Debug, Parser)]
#[command(name = "pacman", author, version, about, long_about = None)]
pub struct Cli {
    /// Maze and pursuer layout: classic or simplified
    #[arg(long, env = "PACMAN_VARIANT", default_value_t = Variant::Classic)]
    pub variant: Variant,

    /// Comma-separated pursuers to spawn (ucs, dfs, astar, dijkstra)
    #[arg(long, env = "PACMAN_PURSUERS", value_delimiter = ',')]
    pub pursuers: Vec<Strategy>,

    /// Draw each pursuer's planned route
    #[arg(long)]
    pub show_paths: bool,

    /// Milliseconds between simulation ticks
    #[arg(long, env = "PACMAN_TICK_MS", default_value_t = DEFAULT_TICK_MS,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Screen refreshes per second
    #[arg(long, env = "PACMAN_FPS", default_value_t = DEFAULT_RENDER_FPS,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub fps: u64,

    /// Write trace output to this file (filter with RUST_LOG)
    #[arg(long, env = "PACMAN_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn setup(&self) -> Result<Setup> {
        let setup = self.variant.setup();
        if self.pursuers.is_empty() {
            return Ok(setup);
        }
        Ok(setup.with_pursuers(&self.pursuers)?)
    }
}
