mod config;
mod render;

use std::fs::File;
use std::io::{self, Stdout};
use std::path::Path as FsPath;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pacman_pursuit::game::{Game, GameState};
use pacman_pursuit::grid::Dir;
use pacman_pursuit::pursuer::planned_paths;
use pacman_pursuit::search::Path;

use config::Cli;
use render::Renderer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }
    let game = Game::new(cli.setup()?).context("failed to build the game")?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &game, &cli);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn init_logging(path: &FsPath) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("failed to install the tracing subscriber")
}

fn run(stdout: &mut Stdout, game: &Game, cli: &Cli) -> Result<()> {
    let grid = game.grid();
    let mut state = game.reset();
    let mut paths = plan(game, &state, cli.show_paths)?;
    let mut renderer = Renderer::new(grid.width(), grid.height());
    let tick = Duration::from_millis(cli.tick_ms);
    let frame_time = Duration::from_micros(1_000_000 / cli.fps.max(1));
    let mut last_tick = Instant::now();
    info!(variant = %cli.variant, tick_ms = cli.tick_ms, "game started");

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        info!(score = state.score, "quit");
                        return Ok(());
                    }
                    KeyCode::Char(' ') if state.is_over() => {
                        info!(score = state.score, "restart");
                        state = game.reset();
                        paths = plan(game, &state, cli.show_paths)?;
                        renderer.invalidate();
                        last_tick = Instant::now();
                    }
                    code => {
                        if let Some(dir) = dir_for_key(code) {
                            if !state.is_over() {
                                state = state.with_command(dir);
                            }
                        }
                    }
                }
            }
        }

        if !state.is_over() && last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            state = game.tick(&state)?;
            paths = plan(game, &state, cli.show_paths)?;
        }
        render::render(stdout, grid, &state, &paths, &mut renderer)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn plan(game: &Game, state: &GameState, show_paths: bool) -> Result<Vec<Option<Path>>> {
    if !show_paths || state.is_over() {
        return Ok(Vec::new());
    }
    Ok(planned_paths(game.grid(), &state.pursuers, state.player)?)
}

fn dir_for_key(code: KeyCode) -> Option<Dir> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Some(Dir::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Some(Dir::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Some(Dir::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Some(Dir::Right),
        _ => None,
    }
}
