/// The authored level.
///
/// One screen, hand-built: two rows of sky over a dirt mass, a starting
/// tunnel span, one rock, three buried enemies. Kept as row strings so
/// the layout is readable at a glance.
///
/// ## Tile legend:
///   ' ' = Empty (sky)   '#' = Dirt   '.' = Tunnel   'O' = Rock
///   'P' = player spawn (stands in a Tunnel)
///   'p' = Pooka spawn   'F' = Fygar spawn (buried in Dirt)

use crate::domain::entity::{EnemyKind, Player};
use crate::domain::grid::{Grid, GRID_HEIGHT, GRID_WIDTH};
use crate::sim::world::WorldState;

/// Reference playfield: 20 columns x 15 rows.
pub const STANDARD: [&str; GRID_HEIGHT] = [
    "                    ",
    "                    ",
    "#####.....P....#####",
    "####################",
    "####################",
    "##########O#######p#",
    "####################",
    "####################",
    "##########F#########",
    "####################",
    "#####p##############",
    "####################",
    "####################",
    "####################",
    "####################",
];

/// Reset the world to the standard level.
pub fn load_standard(world: &mut WorldState) {
    load_rows(world, &STANDARD);
}

/// Load a row-diagram level: tiles via the grid parser, entities via the
/// spawn markers.
pub fn load_rows(world: &mut WorldState, rows: &[&str]) {
    world.grid = Grid::from_rows(rows);
    world.enemies.clear();
    world.tick = 0;
    world.message.clear();
    world.message_timer = 0;

    for (row, line) in rows.iter().enumerate().take(GRID_HEIGHT) {
        for (col, ch) in line.chars().enumerate().take(GRID_WIDTH) {
            let (col, row) = (col as i32, row as i32);
            match ch {
                'P' => {
                    debug_assert!(
                        world.grid.get(row, col).is_open(),
                        "player spawn must be on open ground"
                    );
                    world.player = Player::new(col, row);
                }
                'p' => {
                    world.spawn_enemy(EnemyKind::Pooka, col, row);
                }
                'F' => {
                    world.spawn_enemy(EnemyKind::Fygar, col, row);
                }
                _ => {}
            }
        }
    }
}
