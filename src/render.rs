use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use pacman_pursuit::game::GameState;
use pacman_pursuit::grid::{Cell as Tile, Grid, Pos};
use pacman_pursuit::search::{Path, Strategy};

const CELL_W: usize = 2;
const ORANGE: Color = Color::Rgb { r: 255, g: 165, b: 0 };
const PINK: Color = Color::Rgb { r: 255, g: 105, b: 180 };

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    Ghost,
    Wall,
    Empty,
    Pellet,
    Bonus,
    Trail,
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

pub struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    last_banner: Option<String>,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            last: vec![
                Cell {
                    glyph: Glyph::Empty,
                    color: Color::Reset,
                };
                width * height
            ],
            last_hud: String::new(),
            last_banner: None,
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }
}

pub fn ghost_color(strategy: Strategy) -> Color {
    match strategy {
        Strategy::UniformCost => Color::Red,
        Strategy::DepthFirst => ORANGE,
        Strategy::AStar => PINK,
        Strategy::Dijkstra => Color::Grey,
    }
}

pub fn render(
    stdout: &mut Stdout,
    grid: &Grid,
    state: &GameState,
    paths: &[Option<Path>],
    renderer: &mut Renderer,
) -> io::Result<()> {
    let needed_h = (grid.height() + 4) as u16;
    let needed_w = (grid.width() * CELL_W) as u16;

    stdout.queue(MoveTo(0, 0))?;

    let (term_w, term_h) = terminal::size()?;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            needed_w, needed_h, term_w, term_h
        );
        stdout.queue(Print(msg))?;
        stdout.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + 1;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }
    if renderer.needs_full {
        stdout.queue(Clear(ClearType::All))?;
    }

    let hud = format!(
        "Score: {}  Pellets: {}  Bonus: {}  (q to quit)",
        state.score,
        state.pellets.len(),
        state.bonuses.len()
    );
    if renderer.needs_full || hud != renderer.last_hud {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = hud;
    }

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let pos = Pos { x, y };
            let cell = cell_for(grid, state, paths, pos);
            let idx = y * grid.width() + x;
            if renderer.needs_full || cell != renderer.last[idx] {
                renderer.last[idx] = cell;
                draw_cell(stdout, renderer, x, y, cell)?;
            }
        }
    }

    let banner = end_banner(state);
    if renderer.needs_full || banner != renderer.last_banner {
        let banner_y = renderer.origin_y + grid.height() as u16 + 1;
        stdout.queue(MoveTo(0, banner_y))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(MoveTo(0, banner_y + 1))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        if let Some(text) = &banner {
            stdout.queue(MoveTo(renderer.origin_x, banner_y))?;
            stdout.queue(SetForegroundColor(Color::White))?;
            stdout.queue(Print(text))?;
            stdout.queue(MoveTo(renderer.origin_x, banner_y + 1))?;
            stdout.queue(Print("Press SPACE to restart, q to quit"))?;
            stdout.queue(ResetColor)?;
        }
        renderer.last_banner = banner;
    }
    renderer.needs_full = false;

    stdout.flush()?;
    Ok(())
}

fn end_banner(state: &GameState) -> Option<String> {
    if state.lost {
        Some(format!("GAME OVER - Score: {}", state.score))
    } else if state.won {
        Some(format!("YOU WON! - Score: {}", state.score))
    } else {
        None
    }
}

fn cell_for(grid: &Grid, state: &GameState, paths: &[Option<Path>], pos: Pos) -> Cell {
    if pos == state.player {
        return Cell {
            glyph: Glyph::Player,
            color: Color::Yellow,
        };
    }
    if let Some(pursuer) = state.pursuers.iter().find(|p| p.pos == pos) {
        return Cell {
            glyph: Glyph::Ghost,
            color: ghost_color(pursuer.strategy),
        };
    }
    if state.bonuses.contains(&pos) {
        return Cell {
            glyph: Glyph::Bonus,
            color: Color::Green,
        };
    }
    if state.pellets.contains(&pos) {
        return Cell {
            glyph: Glyph::Pellet,
            color: Color::White,
        };
    }
    let on_path = state
        .pursuers
        .iter()
        .zip(paths)
        .find(|(_, path)| matches!(path, Some(p) if p.steps().contains(&pos)));
    if let Some((pursuer, _)) = on_path {
        return Cell {
            glyph: Glyph::Trail,
            color: ghost_color(pursuer.strategy),
        };
    }
    match grid.cell(pos) {
        Ok(Tile::Wall) => Cell {
            glyph: Glyph::Wall,
            color: Color::Blue,
        },
        _ => Cell {
            glyph: Glyph::Empty,
            color: Color::Reset,
        },
    }
}

fn draw_cell(stdout: &mut Stdout, renderer: &Renderer, x: usize, y: usize, cell: Cell) -> io::Result<()> {
    let text = match cell.glyph {
        Glyph::Player => "😃",
        Glyph::Ghost => "👻",
        Glyph::Wall => "██",
        Glyph::Empty => "  ",
        Glyph::Pellet => "· ",
        Glyph::Bonus => "🍒",
        Glyph::Trail => "∘ ",
    };
    let x_pos = renderer.origin_x + (x * CELL_W) as u16;
    let y_pos = renderer.origin_y + y as u16;
    stdout.queue(MoveTo(x_pos, y_pos))?;
    stdout.queue(SetForegroundColor(cell.color))?;
    stdout.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            stdout.queue(Print(' '))?;
        }
    }
    stdout.queue(ResetColor)?;
    Ok(())
}
