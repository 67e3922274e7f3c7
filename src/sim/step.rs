/// The step function: advances the world by one tick.
///
/// Processing order:
///   1. Player move (buffered intent, digging included)
///   2. Player cooldown upkeep
///   3. Enemy AI in roster order, collision checked right after each move
///   4. Dead-enemy sweep
///
/// The player resolves completely before any enemy reads the grid, so an
/// enemy entering a cell dug this very tick sees Tunnel, not Dirt. The
/// collision consequence lives here, not in the predicate: the driver
/// clears the liveness flag and reports the hit exactly once.

use rand::Rng;

use super::event::GameEvent;
use super::world::WorldState;
use crate::domain::ai;
use crate::domain::entity::FrameInput;
use crate::domain::player;

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn step(world: &mut WorldState, input: FrameInput, rng: &mut impl Rng) -> Vec<GameEvent> {
    let mut events: Vec<GameEvent> = Vec::new();
    world.tick += 1;

    if world.message_timer > 0 {
        world.message_timer -= 1;
        if world.message_timer == 0 {
            world.message.clear();
        }
    }

    resolve_player(world, input, &mut events);
    resolve_enemies(world, rng, &mut events);
    world.sweep_enemies();

    events
}

// ══════════════════════════════════════════════════════════════
// Player
// ══════════════════════════════════════════════════════════════

fn resolve_player(world: &mut WorldState, input: FrameInput, events: &mut Vec<GameEvent>) {
    if let Some(dir) = input.dir {
        let dug_before = world.player.dirt_dug;
        let moved = player::try_move(&mut world.player, dir, &mut world.grid, &world.tuning);
        if moved && world.player.dirt_dug > dug_before {
            events.push(GameEvent::DirtDug {
                col: world.player.col,
                row: world.player.row,
            });
        }
    }
    // Upkeep runs whether or not a key came in this tick.
    player::update(&mut world.player);
}

// ══════════════════════════════════════════════════════════════
// Enemies
// ══════════════════════════════════════════════════════════════

fn resolve_enemies(world: &mut WorldState, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    for i in 0..world.enemies.len() {
        ai::update(
            &mut world.enemies[i],
            &world.player,
            &world.grid,
            &world.tuning,
            rng,
        );
        if ai::collides_with_player(&world.enemies[i], &world.player) {
            world.player.alive = false;
            events.push(GameEvent::PlayerKilled {
                by: world.enemies[i].kind,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::{Direction, EnemyKind, Player};
    use crate::domain::grid::Grid;
    use crate::domain::tile::Tile;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn world_from(rows: &[&str], player_at: (i32, i32)) -> WorldState {
        let mut world = WorldState::new();
        world.grid = Grid::from_rows(rows);
        world.player = Player::new(player_at.0, player_at.1);
        world
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(99)
    }

    fn press(d: Direction) -> FrameInput {
        FrameInput { dir: Some(d) }
    }

    #[test]
    fn tick_applies_intent_then_upkeep() {
        let mut world = world_from(&[".P.", "###"], (1, 0));
        let mut r = rng();

        let events = step(&mut world, press(Direction::Down), &mut r);

        assert_eq!(events, vec![GameEvent::DirtDug { col: 1, row: 1 }]);
        assert_eq!((world.player.col, world.player.row), (1, 1));
        assert_eq!(world.grid.get(1, 1), Tile::Tunnel);
        // Armed by the move, then ticked once by the same step.
        assert_eq!(
            world.player.move_cooldown.remaining(),
            world.tuning.player_dig_cooldown - 1
        );
        assert_eq!(world.tick, 1);
    }

    #[test]
    fn dig_cadence_follows_the_cooldown() {
        let mut world = world_from(&[".P.", "###", "###", "###"], (1, 0));
        let mut r = rng();

        let events = step(&mut world, press(Direction::Down), &mut r);
        assert_eq!(events.len(), 1);

        // Holding the key: the cooldown eats the next seven ticks.
        for _ in 0..7 {
            let events = step(&mut world, press(Direction::Down), &mut r);
            assert!(events.is_empty());
            assert_eq!((world.player.col, world.player.row), (1, 1));
        }

        // Eighth tick after the dig: ready again, next cell goes.
        let events = step(&mut world, press(Direction::Down), &mut r);
        assert_eq!(events, vec![GameEvent::DirtDug { col: 1, row: 2 }]);
        assert_eq!(world.player.dirt_dug, 2);
    }

    #[test]
    fn upkeep_runs_without_input() {
        let mut world = world_from(&[".P."], (1, 0));
        world.player.move_cooldown.arm(5);
        let mut r = rng();

        step(&mut world, FrameInput::default(), &mut r);

        assert_eq!(world.player.move_cooldown.remaining(), 4);
        assert_eq!((world.player.col, world.player.row), (1, 0));
    }

    #[test]
    fn fresh_dig_is_open_ground_for_enemies() {
        // Player digs rightward into (2,1); the enemy then walks the same
        // cell at tunnel pace, proving the player resolved first.
        let mut world = world_from(
            &[
                "#####",
                "#P#.#",
                "#####",
            ],
            (1, 1),
        );
        world.tuning.deviation_percent = 0;
        world.spawn_enemy(EnemyKind::Pooka, 3, 1);
        let mut r = rng();

        let events = step(&mut world, press(Direction::Right), &mut r);

        assert_eq!(
            events,
            vec![
                GameEvent::DirtDug { col: 2, row: 1 },
                GameEvent::PlayerKilled {
                    by: EnemyKind::Pooka
                },
            ]
        );
        assert!(!world.player.alive);
        assert_eq!((world.enemies[0].col, world.enemies[0].row), (2, 1));
        assert!(!world.enemies[0].ghosting);
        assert_eq!(
            world.enemies[0].move_cooldown.remaining(),
            world.tuning.enemy_tunnel_cooldown
        );
    }

    #[test]
    fn kill_event_fires_once() {
        let mut world = world_from(&["#####", "#P.##", "#####"], (1, 1));
        world.tuning.deviation_percent = 0;
        world.spawn_enemy(EnemyKind::Fygar, 2, 1);
        let mut r = rng();

        let events = step(&mut world, FrameInput::default(), &mut r);
        assert_eq!(
            events,
            vec![GameEvent::PlayerKilled {
                by: EnemyKind::Fygar
            }]
        );

        // With the player down, the collision predicate stays false for
        // good no matter where the enemy wanders.
        for _ in 0..30 {
            let events = step(&mut world, FrameInput::default(), &mut r);
            assert!(events.is_empty());
        }
    }

    #[test]
    fn dead_player_still_obeys_input() {
        // No liveness gate on movement: after a hit the corpse keeps
        // digging. Later tutorial steps add the real game-over handling.
        let mut world = world_from(&["#####", "#P.##", "#####"], (1, 1));
        world.tuning.deviation_percent = 0;
        world.spawn_enemy(EnemyKind::Pooka, 2, 1);
        let mut r = rng();

        step(&mut world, FrameInput::default(), &mut r);
        assert!(!world.player.alive);

        let events = step(&mut world, press(Direction::Down), &mut r);
        assert_eq!(events, vec![GameEvent::DirtDug { col: 1, row: 2 }]);
        assert_eq!((world.player.col, world.player.row), (1, 2));
    }

    #[test]
    fn sweep_runs_every_tick() {
        let mut world = world_from(&["#####", "#P###", "#####"], (1, 1));
        world.spawn_enemy(EnemyKind::Pooka, 4, 0);
        world.spawn_enemy(EnemyKind::Fygar, 4, 2);
        world.enemies[0].alive = false;
        let mut r = rng();

        step(&mut world, FrameInput::default(), &mut r);

        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.enemies[0].kind, EnemyKind::Fygar);
    }

    #[test]
    fn messages_expire() {
        let mut world = world_from(&[".P."], (1, 0));
        world.set_message("ouch", 2);
        let mut r = rng();

        step(&mut world, FrameInput::default(), &mut r);
        assert_eq!(world.message, "ouch");
        step(&mut world, FrameInput::default(), &mut r);
        assert!(world.message.is_empty());
    }
}
