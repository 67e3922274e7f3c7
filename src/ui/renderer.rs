/// Terminal renderer.
///
/// Draws into an off-screen cell buffer, diffs it against the previous
/// frame, and only emits escape sequences for the cells that changed.
/// Commands are queued on a buffered writer and flushed once per frame,
/// which keeps a full-screen game flicker-free even over ssh.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::entity::{Direction, EnemyKind};
use crate::domain::grid::{GRID_HEIGHT, GRID_WIDTH};
use crate::domain::tile::Tile;
use crate::sim::world::WorldState;

// ── Screen cells ──

/// One terminal cell: glyph plus colors. PartialEq drives the frame diff.
#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Background written everywhere a game element isn't. Also used for
    /// Clear, so the gap pixels between rows on VTE terminals match the
    /// cell color instead of showing as stripes.
    const SKY: Color = Color::Rgb { r: 0, g: 0, b: 0 };

    const BLANK: Cell = Cell {
        ch: ' ',
        fg: Color::White,
        bg: Cell::SKY,
    };

    /// Never produced by compose, so filling the previous frame with this
    /// forces every cell through the diff (full repaint).
    const STALE: Cell = Cell {
        ch: '\0',
        fg: Color::Magenta,
        bg: Color::Magenta,
    };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        Cell { ch, fg, bg }
    }
}

// ── Palette (tile RGB values from the arcade original) ──

const DIRT_BG: Color = Color::Rgb { r: 139, g: 69, b: 19 };
const DIRT_FG: Color = Color::Rgb { r: 170, g: 100, b: 40 };
const TUNNEL_BG: Color = Color::Rgb { r: 50, g: 25, b: 10 };
const ROCK_FG: Color = Color::Rgb { r: 128, g: 128, b: 128 };
const HUD_BG: Color = Color::Rgb { r: 40, g: 26, b: 13 };
const MSG_BG: Color = Color::Rgb { r: 200, g: 180, b: 50 };
const GLYPH_YELLOW: Color = Color::Rgb { r: 255, g: 210, b: 60 };
const PLAYER_GLYPH: Color = Color::Rgb { r: 80, g: 220, b: 255 };

const POOKA_BG: Color = Color::Rgb { r: 255, g: 0, b: 0 };
const POOKA_GHOST_BG: Color = Color::Rgb { r: 100, g: 0, b: 0 };
const FYGAR_BG: Color = Color::Rgb { r: 0, g: 255, b: 0 };
const FYGAR_GHOST_BG: Color = Color::Rgb { r: 0, g: 100, b: 0 };

fn facing_glyph(dir: Direction) -> char {
    match dir {
        Direction::Up => '▲',
        Direction::Down => '▼',
        Direction::Left => '◀',
        Direction::Right => '▶',
    }
}

// ── Off-screen frame ──

/// Flat row-major cell grid sized to the terminal.
struct Frame {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Frame {
    fn new(cols: usize, rows: usize) -> Self {
        Frame {
            cols,
            rows,
            cells: vec![Cell::BLANK; cols * rows],
        }
    }

    fn resize(&mut self, cols: usize, rows: usize) {
        if (self.cols, self.rows) != (cols, rows) {
            *self = Frame::new(cols, rows);
        }
    }

    fn wipe(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn mark_stale(&mut self) {
        self.cells.fill(Cell::STALE);
    }

    fn put(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.cols && y < self.rows {
            self.cells[y * self.cols + x] = cell;
        }
    }

    fn at(&self, x: usize, y: usize) -> Cell {
        if x < self.cols && y < self.rows {
            self.cells[y * self.cols + x]
        } else {
            Cell::BLANK
        }
    }

    /// One char per column, clipped at the right edge.
    fn text(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.cols {
                break;
            }
            self.put(x + i, y, Cell::new(ch, fg, bg));
        }
    }
}

// ── Layout ──

/// Terminal columns per game cell; cells are taller than wide, so two
/// columns per cell keeps the playfield roughly square on screen.
const CELL_W: usize = 2;

const HUD_ROW: usize = 0;
const MAP_ROW: usize = 2;

/// Smallest terminal that fits the HUD plus the full map.
const MIN_COLS: usize = GRID_WIDTH * CELL_W;
const MIN_ROWS: usize = MAP_ROW + GRID_HEIGHT;

pub struct Renderer {
    out: BufWriter<io::Stdout>,
    next: Frame,
    prev: Frame,
    term_cols: usize,
    term_rows: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            out: BufWriter::with_capacity(16384, io::stdout()),
            next: Frame::new(0, 0),
            prev: Frame::new(0, 0),
            term_cols: 0,
            term_rows: 0,
        }
    }

    /// Raw mode + alternate screen. Pairs with `cleanup`.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::SKY),
            Clear(ClearType::All)
        )?;
        self.fit_to_terminal();
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.out,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    fn fit_to_terminal(&mut self) {
        let (tc, tr) = terminal::size().unwrap_or((80, 24));
        self.term_cols = tc as usize;
        self.term_rows = tr as usize;
        self.next.resize(self.term_cols, self.term_rows);
        self.prev.resize(self.term_cols, self.term_rows);
        self.prev.mark_stale();
    }

    pub fn render(&mut self, world: &WorldState) -> io::Result<()> {
        let (tc, tr) = terminal::size().unwrap_or((80, 24));
        if (tc as usize, tr as usize) != (self.term_cols, self.term_rows) {
            // Resized: start over with a cleared screen and a full repaint.
            self.fit_to_terminal();
            queue!(self.out, SetBackgroundColor(Cell::SKY), Clear(ClearType::All))?;
        }

        self.next.wipe();
        if self.term_cols < MIN_COLS || self.term_rows < MIN_ROWS {
            let hint = format!("Terminal too small: need {}x{}", MIN_COLS, MIN_ROWS);
            self.next.text(0, 0, &hint, Color::White, Cell::SKY);
        } else {
            self.compose(world);
        }

        self.emit_changes()?;
        std::mem::swap(&mut self.next, &mut self.prev);
        Ok(())
    }

    /// Walk next against prev, emitting cursor moves and color switches
    /// only when forced to. Consecutive changed cells on a row print
    /// without repositioning.
    fn emit_changes(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Cell::SKY),
        )?;
        let mut fg = Color::White;
        let mut bg = Cell::SKY;
        // Cursor position after the last print; None means unknown.
        let mut cursor_at: Option<(usize, usize)> = None;

        for y in 0..self.next.rows {
            for x in 0..self.next.cols {
                let cell = self.next.at(x, y);
                if cell == self.prev.at(x, y) {
                    continue;
                }

                if cursor_at != Some((x, y)) {
                    queue!(self.out, MoveTo(x as u16, y as u16))?;
                }
                if cell.fg != fg {
                    queue!(self.out, SetForegroundColor(cell.fg))?;
                    fg = cell.fg;
                }
                if cell.bg != bg {
                    queue!(self.out, SetBackgroundColor(cell.bg))?;
                    bg = cell.bg;
                }
                queue!(self.out, Print(cell.ch))?;
                cursor_at = Some((x + 1, y));
            }
        }

        self.out.flush()
    }

    // ── Frame composition ──

    fn compose(&mut self, w: &WorldState) {
        self.compose_hud(w);
        for grow in 0..GRID_HEIGHT {
            for gcol in 0..GRID_WIDTH {
                self.compose_cell(w, gcol, grow);
            }
        }
        self.compose_bars(w);
    }

    fn compose_hud(&mut self, w: &WorldState) {
        for x in 0..self.next.cols {
            self.next.put(x, HUD_ROW, Cell::new(' ', Color::White, HUD_BG));
        }

        // One bar glyph per 10 tiles of dirt cleared.
        let bar = "▪".repeat((w.player.dirt_dug / 10) as usize);
        let left = format!(" DUGOUT   Dirt:{:>4}  {}", w.player.dirt_dug, bar);
        self.next.text(0, HUD_ROW, &left, Color::White, HUD_BG);

        let right = format!("Tick:{:>6} ", w.tick);
        let x = self.next.cols.saturating_sub(right.chars().count());
        self.next.text(x, HUD_ROW, &right, Color::DarkGrey, HUD_BG);
    }

    /// Game cell (gcol, grow) → two terminal columns. Within a cell the
    /// player wins over enemies, enemies over terrain.
    fn compose_cell(&mut self, w: &WorldState, gcol: usize, grow: usize) {
        let x = gcol * CELL_W;
        let y = MAP_ROW + grow;

        let tile = w.grid.get(grow as i32, gcol as i32);
        let under = match tile {
            Tile::Empty => Cell::SKY,
            Tile::Tunnel => TUNNEL_BG,
            Tile::Dirt | Tile::Rock => DIRT_BG,
        };

        if (w.player.col, w.player.row) == (gcol as i32, grow as i32) {
            // The corpse stays on screen, just drained of color.
            let (body, glyph) = if w.player.alive {
                (Color::White, PLAYER_GLYPH)
            } else {
                (Color::DarkGrey, Color::DarkGrey)
            };
            self.next.put(x, y, Cell::new('@', body, under));
            self.next
                .put(x + 1, y, Cell::new(facing_glyph(w.player.facing), glyph, under));
            return;
        }

        for e in w.enemies.iter().filter(|e| e.alive) {
            if (e.col, e.row) == (gcol as i32, grow as i32) {
                let bg = match (e.kind, e.ghosting) {
                    (EnemyKind::Pooka, false) => POOKA_BG,
                    (EnemyKind::Pooka, true) => POOKA_GHOST_BG,
                    (EnemyKind::Fygar, false) => FYGAR_BG,
                    (EnemyKind::Fygar, true) => FYGAR_GHOST_BG,
                };
                let body = match e.kind {
                    EnemyKind::Pooka => 'P',
                    EnemyKind::Fygar => 'F',
                };
                self.next.put(x, y, Cell::new(body, GLYPH_YELLOW, bg));
                self.next
                    .put(x + 1, y, Cell::new(facing_glyph(e.facing), GLYPH_YELLOW, bg));
                return;
            }
        }

        let (ch, fg) = match tile {
            Tile::Empty | Tile::Tunnel => (' ', Color::White),
            Tile::Dirt => ('▒', DIRT_FG),
            Tile::Rock => ('█', ROCK_FG),
        };
        self.next.put(x, y, Cell::new(ch, fg, under));
        self.next.put(x + 1, y, Cell::new(ch, fg, under));
    }

    fn compose_bars(&mut self, w: &WorldState) {
        let msg_row = MAP_ROW + GRID_HEIGHT + 1;
        if msg_row < self.next.rows && !w.message.is_empty() {
            for x in 0..self.next.cols {
                self.next.put(x, msg_row, Cell::new(' ', Color::Black, MSG_BG));
            }
            let msg = format!(" {} ", w.message);
            self.next.text(0, msg_row, &msg, Color::Black, MSG_BG);
        }

        let help_row = MAP_ROW + GRID_HEIGHT + 3;
        if help_row < self.next.rows {
            let help = " Arrows/WASD: move + dig   Q/ESC: quit";
            self.next.text(0, help_row, help, Color::DarkGrey, Cell::SKY);
        }
    }
}
