/// Keyboard input tracker.
///
/// Terminal key handling is event-driven: every Press (or terminal
/// auto-repeat) of a direction key buffers one movement intent, and the
/// tick driver consumes at most one intent per simulation tick. Holding
/// a key moves at the terminal's repeat rate, not the frame rate.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, poll};

use crate::domain::entity::Direction;

pub struct InputState {
    /// Latest buffered movement intent; newer events overwrite older ones.
    pending_dir: Option<Direction>,

    /// Set when q, Esc or Ctrl+C arrives during a drain.
    quit: bool,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            pending_dir: None,
            quit: false,
        }
    }

    /// Drain all pending terminal events without blocking.
    /// Call once per frame; intents accumulate until the next tick.
    pub fn drain_events(&mut self) {
        while poll(Duration::ZERO).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                if is_quit_key(key.code, key.modifiers) {
                    self.quit = true;
                }
                if let Some(dir) = key_direction(key.code) {
                    self.pending_dir = Some(dir);
                }
            }
        }
    }

    /// Hand the buffered intent to the simulation, clearing it. At most
    /// one move attempt reaches the core per buffered keypress.
    pub fn take_intent(&mut self) -> Option<Direction> {
        self.pending_dir.take()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

// ── Key Mapping ──

fn key_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

fn is_quit_key(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') | KeyCode::Char('C') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
