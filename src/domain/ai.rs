/// Enemy AI — greedy chase with a wandering streak.
///
/// Per ready tick:
///   1. **Deviation** — with a tunable percent chance, try one random
///      direction before anything else.
///   2. **Chase** — step along the dominant axis toward the player.
///   3. **Fallback** — if the chase step is blocked, try exactly one of
///      the three other directions, picked uniformly. A failed fallback
///      ends the tick in place.
///
/// Enemies ghost: Dirt slows them but never stops them, and they leave it
/// undug. Only Rock and the grid border refuse them. The AI reads the
/// grid and the player, mutating neither.

use rand::seq::SliceRandom;
use rand::Rng;

use super::entity::{Direction, Enemy, Player, Tuning};
use super::grid::Grid;
use super::tile::Tile;

/// One AI tick. Runs the cooldown down and, once it hits zero, makes at
/// most one step, trying candidate directions in the order above.
pub fn update(
    enemy: &mut Enemy,
    player: &Player,
    grid: &Grid,
    tuning: &Tuning,
    rng: &mut impl Rng,
) {
    if !enemy.alive {
        return;
    }

    enemy.move_cooldown.tick();
    if !enemy.move_cooldown.ready() {
        return;
    }

    let preferred = chase_direction(enemy.col, enemy.row, player.col, player.row);

    if rng.gen_range(0..100) < tuning.deviation_percent {
        if let Some(&whim) = Direction::ALL.choose(rng) {
            if try_move(enemy, whim, grid, tuning) {
                return;
            }
        }
    }

    if try_move(enemy, preferred, grid, tuning) {
        return;
    }

    let alternatives: Vec<Direction> = Direction::ALL
        .iter()
        .copied()
        .filter(|&d| d != preferred)
        .collect();
    if let Some(&dir) = alternatives.choose(rng) {
        try_move(enemy, dir, grid, tuning);
    }
}

/// Dominant-axis step toward (pcol, prow). Ties go to the vertical axis.
pub fn chase_direction(ecol: i32, erow: i32, pcol: i32, prow: i32) -> Direction {
    let dx = pcol - ecol;
    let dy = prow - erow;
    if dx.abs() > dy.abs() {
        if dx > 0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if dy > 0 {
        Direction::Down
    } else {
        Direction::Up
    }
}

/// Attempt one step. On success position, facing, ghosting and the
/// cooldown all change together; on failure nothing does.
pub fn try_move(enemy: &mut Enemy, dir: Direction, grid: &Grid, tuning: &Tuning) -> bool {
    let (dc, dr) = dir.delta();
    let col = enemy.col + dc;
    let row = enemy.row + dr;
    if !Grid::in_bounds(row, col) {
        return false;
    }

    let tile = grid.get(row, col);
    if tile.is_rock() {
        return false;
    }
    // Unknown terrain never admits an enemy.
    if !tile.is_open() && !tile.is_diggable() {
        return false;
    }

    enemy.col = col;
    enemy.row = row;
    enemy.facing = dir;
    enemy.ghosting = tile == Tile::Dirt;
    enemy.move_cooldown.arm(if tile == Tile::Dirt {
        tuning.enemy_ghost_cooldown
    } else {
        tuning.enemy_tunnel_cooldown
    });
    true
}

/// Both parties alive and on the same cell. What follows from a hit is
/// the tick driver's call, not this predicate's.
pub fn collides_with_player(enemy: &Enemy, player: &Player) -> bool {
    enemy.alive && player.alive && enemy.col == player.col && enemy.row == player.row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::EnemyKind;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn tuning(deviation_percent: u32) -> Tuning {
        Tuning {
            deviation_percent,
            ..Tuning::default()
        }
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    #[test]
    fn chase_prefers_the_dominant_axis() {
        assert_eq!(chase_direction(10, 5, 3, 5), Direction::Left);
        assert_eq!(chase_direction(3, 5, 10, 5), Direction::Right);
        assert_eq!(chase_direction(5, 10, 5, 3), Direction::Up);
        assert_eq!(chase_direction(5, 3, 5, 10), Direction::Down);
        // Mixed offsets: larger axis wins.
        assert_eq!(chase_direction(0, 0, 5, 2), Direction::Right);
        assert_eq!(chase_direction(0, 0, 2, 5), Direction::Down);
    }

    #[test]
    fn chase_ties_go_vertical() {
        assert_eq!(chase_direction(0, 0, 2, 2), Direction::Down);
        assert_eq!(chase_direction(4, 4, 2, 2), Direction::Up);
        assert_eq!(chase_direction(0, 4, 3, 1), Direction::Up);
        // Degenerate same-cell case resolves to Up as well.
        assert_eq!(chase_direction(3, 3, 3, 3), Direction::Up);
    }

    #[test]
    fn closes_in_on_an_adjacent_player() {
        // Open field, wandering off: the enemy must take the chase step
        // straight onto the player's cell.
        let grid = Grid::new();
        let player = Player::new(9, 5);
        let mut enemy = Enemy::new(EnemyKind::Pooka, 10, 5);
        let t = tuning(0);

        update(&mut enemy, &player, &grid, &t, &mut rng());

        assert_eq!((enemy.col, enemy.row), (9, 5));
        assert_eq!(enemy.facing, Direction::Left);
        assert!(collides_with_player(&enemy, &player));
        assert_eq!(enemy.move_cooldown.remaining(), t.enemy_tunnel_cooldown);
    }

    #[test]
    fn ghosts_through_dirt_without_digging() {
        let grid = Grid::from_rows(&[
            "#####",
            "#####",
            "#####",
        ]);
        let before = grid.clone();
        let player = Player::new(0, 1);
        let mut enemy = Enemy::new(EnemyKind::Fygar, 2, 1);
        let t = tuning(0);

        update(&mut enemy, &player, &grid, &t, &mut rng());

        assert_eq!((enemy.col, enemy.row), (1, 1));
        assert!(enemy.ghosting);
        assert_eq!(enemy.move_cooldown.remaining(), t.enemy_ghost_cooldown);
        // The dirt is passed through, never converted.
        assert_eq!(grid.get(1, 1), Tile::Dirt);
        assert_eq!(grid, before);
    }

    #[test]
    fn open_ground_clears_ghosting() {
        let grid = Grid::from_rows(&[
            "#####",
            "#..##",
            "#####",
        ]);
        let player = Player::new(1, 1);
        let mut enemy = Enemy::new(EnemyKind::Pooka, 2, 1);
        enemy.ghosting = true;
        let t = tuning(0);

        update(&mut enemy, &player, &grid, &t, &mut rng());

        assert_eq!((enemy.col, enemy.row), (1, 1));
        assert!(!enemy.ghosting);
        assert_eq!(enemy.move_cooldown.remaining(), t.enemy_tunnel_cooldown);
    }

    #[test]
    fn acts_on_the_tick_the_cooldown_reaches_zero() {
        let grid = Grid::new();
        let player = Player::new(0, 5);
        let mut enemy = Enemy::new(EnemyKind::Pooka, 10, 5);
        enemy.move_cooldown.arm(2);
        let t = tuning(0);

        update(&mut enemy, &player, &grid, &t, &mut rng());
        assert_eq!((enemy.col, enemy.row), (10, 5)); // 2→1, still waiting
        update(&mut enemy, &player, &grid, &t, &mut rng());
        assert_eq!((enemy.col, enemy.row), (9, 5)); // 1→0, acts at zero
        assert_eq!(enemy.move_cooldown.remaining(), t.enemy_tunnel_cooldown);
    }

    #[test]
    fn dead_enemy_is_frozen() {
        let grid = Grid::new();
        let player = Player::new(0, 5);
        let mut enemy = Enemy::new(EnemyKind::Fygar, 10, 5);
        enemy.alive = false;
        enemy.move_cooldown.arm(5);
        enemy.ghosting = true;
        let t = tuning(0);
        let mut r = rng();

        for _ in 0..10 {
            update(&mut enemy, &player, &grid, &t, &mut r);
        }

        assert_eq!((enemy.col, enemy.row), (10, 5));
        assert_eq!(enemy.move_cooldown.remaining(), 5);
        assert!(enemy.ghosting);
    }

    #[test]
    fn blocked_chase_takes_a_side_step() {
        // Rock between enemy and player; every alternative is dirt.
        let grid = Grid::from_rows(&[
            "#####",
            "#.O##",
            "#####",
        ]);
        let player = Player::new(1, 1);
        let mut enemy = Enemy::new(EnemyKind::Pooka, 3, 1);
        let t = tuning(0);

        update(&mut enemy, &player, &grid, &t, &mut rng());

        let moved = (enemy.col - 3).abs() + (enemy.row - 1).abs();
        assert_eq!(moved, 1);
        assert_ne!((enemy.col, enemy.row), (2, 1)); // never into the rock
        assert!(enemy.ghosting);
        assert_eq!(enemy.move_cooldown.remaining(), t.enemy_ghost_cooldown);
    }

    #[test]
    fn walled_in_enemy_stays_put() {
        // Corner pocket: border above/left, rock right/below. No attempt
        // can land, and a failed attempt changes nothing.
        let grid = Grid::from_rows(&[
            "#O###",
            "O####",
        ]);
        let player = Player::new(4, 0);
        let mut enemy = Enemy::new(EnemyKind::Pooka, 0, 0);
        enemy.ghosting = true;
        let t = tuning(50);
        let mut r = rng();

        for _ in 0..50 {
            update(&mut enemy, &player, &grid, &t, &mut r);
        }

        assert_eq!((enemy.col, enemy.row), (0, 0));
        assert!(enemy.ghosting);
        assert_eq!(enemy.facing, Direction::Left);
    }

    #[test]
    fn forced_deviation_still_moves_one_step() {
        let grid = Grid::new();
        let player = Player::new(0, 0);
        let mut enemy = Enemy::new(EnemyKind::Fygar, 10, 7);
        let t = tuning(100);

        update(&mut enemy, &player, &grid, &t, &mut rng());

        let moved = (enemy.col - 10).abs() + (enemy.row - 7).abs();
        assert_eq!(moved, 1);
        assert_eq!(enemy.move_cooldown.remaining(), t.enemy_tunnel_cooldown);
    }

    #[test]
    fn collision_needs_both_alive_and_same_cell() {
        let player = Player::new(4, 4);
        let mut enemy = Enemy::new(EnemyKind::Pooka, 4, 4);
        assert!(collides_with_player(&enemy, &player));

        enemy.col = 5;
        assert!(!collides_with_player(&enemy, &player));

        enemy.col = 4;
        enemy.alive = false;
        assert!(!collides_with_player(&enemy, &player));

        enemy.alive = true;
        let mut dead_player = player.clone();
        dead_player.alive = false;
        assert!(!collides_with_player(&enemy, &dead_player));
    }
}
