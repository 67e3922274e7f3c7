/// Events emitted during a simulation step.
/// The presentation layer consumes these for HUD messages.

use crate::domain::entity::EnemyKind;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameEvent {
    /// The player converted a Dirt cell at (col, row) to Tunnel.
    DirtDug { col: i32, row: i32 },
    /// An enemy caught the player. Emitted at most once per life.
    PlayerKilled { by: EnemyKind },
}
