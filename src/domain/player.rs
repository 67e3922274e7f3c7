/// Player movement and digging. The guard order is load-bearing: the dig
/// happens before the traversability check, so a Dirt cell converts and is
/// then entered in the same step.
///
/// ### Step guard order
/// ┌────────────────────────────────┬───────────────────────────┐
/// │ Condition                      │ Result                    │
/// ├────────────────────────────────┼───────────────────────────┤
/// │ cooldown not ready             │ DENY                      │
/// │ target outside grid            │ DENY (hard border)        │
/// │ target Dirt AND direction Up   │ DENY (no digging upward)  │
/// │ target Dirt otherwise          │ convert → Tunnel, count   │
/// │ target not open (Rock)         │ DENY                      │
/// │ otherwise                      │ commit pos/facing/cooldown│
/// └────────────────────────────────┴───────────────────────────┘

use super::entity::{Direction, Player, Tuning};
use super::grid::Grid;
use super::tile::Tile;

/// Attempt one step in `dir`. On success the player occupies the target
/// cell (converting Dirt on the way through), faces `dir`, and the move
/// cooldown is re-armed: long after a dig, short through open ground.
pub fn try_move(player: &mut Player, dir: Direction, grid: &mut Grid, tuning: &Tuning) -> bool {
    if !player.move_cooldown.ready() {
        return false;
    }

    let (dc, dr) = dir.delta();
    let col = player.col + dc;
    let row = player.row + dr;
    if !Grid::in_bounds(row, col) {
        return false;
    }

    let mut target = grid.get(row, col);

    // Dirt overhead cannot be dug from below.
    if target.is_diggable() && dir == Direction::Up {
        return false;
    }

    let mut dug = false;
    if target.is_diggable() {
        grid.set(row, col, Tile::Tunnel);
        target = Tile::Tunnel;
        player.dirt_dug += 1;
        dug = true;
    }

    // Rock is impassable. A freshly converted target is already Tunnel here.
    if !target.is_open() {
        return false;
    }

    player.col = col;
    player.row = row;
    player.facing = dir;
    player.move_cooldown.arm(if dug {
        tuning.player_dig_cooldown
    } else {
        tuning.player_tunnel_cooldown
    });
    true
}

/// Per-tick upkeep: run the move cooldown down one notch.
pub fn update(player: &mut Player) {
    player.move_cooldown.tick();
}
