/// WorldState: the complete snapshot of a running game.
///
/// One tile layer only — digs are permanent and nothing regenerates.
/// Entities sit on top of the grid. The enemy roster is a dense vector:
/// dead enemies are swap-removed by `sweep_enemies`, so live indices stay
/// packed and the per-tick update order stays deterministic.

use crate::domain::entity::{Enemy, EnemyKind, Player, Tuning};
use crate::domain::grid::Grid;
use crate::domain::tile::Tile;

/// Upper bound on simultaneously live enemies.
pub const MAX_ENEMIES: usize = 10;

pub struct WorldState {
    pub grid: Grid,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub tuning: Tuning,
    pub tick: u64,

    // ── UI ──
    pub message: String,
    pub message_timer: u32,
}

impl WorldState {
    pub fn new() -> Self {
        WorldState {
            grid: Grid::new(),
            player: Player::new(0, 0),
            enemies: Vec::with_capacity(MAX_ENEMIES),
            tuning: Tuning::default(),
            tick: 0,
            message: String::new(),
            message_timer: 0,
        }
    }

    /// Add an enemy to the roster. Refuses past the cap; spawning onto
    /// Rock is a caller bug.
    pub fn spawn_enemy(&mut self, kind: EnemyKind, col: i32, row: i32) -> bool {
        if self.enemies.len() >= MAX_ENEMIES {
            return false;
        }
        debug_assert!(
            self.grid.get(row, col) != Tile::Rock,
            "enemy spawned on rock at ({}, {})",
            col,
            row
        );
        self.enemies.push(Enemy::new(kind, col, row));
        true
    }

    /// Drop dead enemies from the roster. Swap-remove keeps the vector
    /// dense; relative order only changes when something actually died.
    pub fn sweep_enemies(&mut self) {
        let mut i = 0;
        while i < self.enemies.len() {
            if self.enemies[i].alive {
                i += 1;
            } else {
                self.enemies.swap_remove(i);
            }
        }
    }

    pub fn set_message(&mut self, msg: &str, duration: u32) {
        self.message = msg.to_string();
        self.message_timer = duration;
    }
}
