/// Dugout: dig tunnels, dodge the things living in the dirt.

mod config;
mod domain;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use config::GameConfig;
use domain::entity::{EnemyKind, FrameInput};
use sim::event::GameEvent;
use sim::level;
use sim::step;
use sim::world::WorldState;
use ui::input::InputState;
use ui::renderer::Renderer;

/// Idle sleep between loop iterations; input and rendering run more
/// often than the simulation ticks.
const IDLE_SLEEP: Duration = Duration::from_millis(5);

/// Ticks a one-shot message stays on screen (~2.5 s at the default rate).
const MESSAGE_TICKS: u32 = 150;

fn main() {
    let config = GameConfig::load();

    let mut world = WorldState::new();
    world.tuning = config.tuning;
    level::load_standard(&mut world);

    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("could not set up the terminal: {e}");
        return;
    }

    let result = game_loop(&mut world, &mut renderer, &mut rng, &config);

    // Always restore the terminal, even when the loop errored out.
    if let Err(e) = renderer.cleanup() {
        eprintln!("could not restore the terminal: {e}");
    }
    if let Err(e) = result {
        eprintln!("game error: {e}");
    }

    println!();
    println!("Dirt cleared: {}", world.player.dirt_dug);
}

fn game_loop(
    world: &mut WorldState,
    renderer: &mut Renderer,
    rng: &mut SmallRng,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let tick_rate = Duration::from_millis(config.tick_rate_ms);
    let mut last_tick = Instant::now();

    loop {
        kb.drain_events();
        if kb.quit_requested() {
            return Ok(());
        }

        if last_tick.elapsed() >= tick_rate {
            let input = FrameInput {
                dir: kb.take_intent(),
            };
            for event in step::step(world, input, rng) {
                announce(world, event);
            }
            last_tick = Instant::now();
        }

        renderer.render(world)?;
        std::thread::sleep(IDLE_SLEEP);
    }
}

fn announce(world: &mut WorldState, event: GameEvent) {
    match event {
        GameEvent::PlayerKilled { by } => {
            let name = match by {
                EnemyKind::Pooka => "a Pooka",
                EnemyKind::Fygar => "a Fygar",
            };
            let msg = format!("Caught by {name}! Press Q to quit.");
            world.set_message(&msg, MESSAGE_TICKS);
        }
        GameEvent::DirtDug { .. } => {}
    }
}
