/// Optional `config.toml` support.
///
/// Every key has a default, so the game runs identically with no file at
/// all; a malformed file warns on stderr and falls back wholesale rather
/// than half-applying it.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::entity::Tuning;

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub tick_rate_ms: u64,
    pub tuning: Tuning,
    /// Fixed seed for reproducible runs; None draws from entropy.
    pub seed: Option<u64>,
}

// ── TOML schema ──
//
// Separate from GameConfig so serde defaults can live per field; the
// public struct regroups the values the way the game consumes them.

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    chase: TomlChase,
    #[serde(default)]
    game: TomlGame,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
    #[serde(default = "default_player_dig")]
    player_dig_cooldown: u32,
    #[serde(default = "default_player_tunnel")]
    player_tunnel_cooldown: u32,
    #[serde(default = "default_enemy_ghost")]
    enemy_ghost_cooldown: u32,
    #[serde(default = "default_enemy_tunnel")]
    enemy_tunnel_cooldown: u32,
}

#[derive(Deserialize, Debug)]
struct TomlChase {
    #[serde(default = "default_deviation")]
    deviation_percent: u32,
}

#[derive(Deserialize, Debug, Default)]
struct TomlGame {
    seed: Option<u64>,
}

fn default_tick_rate() -> u64 { 16 } // ~60 Hz
fn default_player_dig() -> u32 { 8 }
fn default_player_tunnel() -> u32 { 3 }
fn default_enemy_ghost() -> u32 { 20 }
fn default_enemy_tunnel() -> u32 { 10 }
fn default_deviation() -> u32 { 30 }

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed {
            tick_rate_ms: default_tick_rate(),
            player_dig_cooldown: default_player_dig(),
            player_tunnel_cooldown: default_player_tunnel(),
            enemy_ghost_cooldown: default_enemy_ghost(),
            enemy_tunnel_cooldown: default_enemy_tunnel(),
        }
    }
}

impl Default for TomlChase {
    fn default() -> Self {
        TomlChase {
            deviation_percent: default_deviation(),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Read `config.toml` from the executable's directory, then the
    /// working directory; the first file found wins. No file means all
    /// defaults.
    pub fn load() -> Self {
        let toml_cfg = search_dirs()
            .iter()
            .map(|dir| dir.join("config.toml"))
            .find(|p| p.exists())
            .map(|p| read_toml(&p))
            .unwrap_or_default();

        GameConfig {
            tick_rate_ms: toml_cfg.speed.tick_rate_ms,
            tuning: Tuning {
                player_dig_cooldown: toml_cfg.speed.player_dig_cooldown,
                player_tunnel_cooldown: toml_cfg.speed.player_tunnel_cooldown,
                enemy_ghost_cooldown: toml_cfg.speed.enemy_ghost_cooldown,
                enemy_tunnel_cooldown: toml_cfg.speed.enemy_tunnel_cooldown,
                deviation_percent: toml_cfg.chase.deviation_percent,
            },
            seed: toml_cfg.game.seed,
        }
    }
}

fn search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    // Symlinks resolved, so an installed binary finds the config sitting
    // next to the real file.
    if let Ok(exe) = std::env::current_exe() {
        let exe = exe.canonicalize().unwrap_or(exe);
        if let Some(dir) = exe.parent() {
            dirs.push(dir.to_path_buf());
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.contains(&cwd) {
            dirs.push(cwd);
        }
    }
    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }
    dirs
}

fn read_toml(path: &Path) -> TomlConfig {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("warning: cannot read {}: {e}; using defaults", path.display());
            return TomlConfig::default();
        }
    };
    match toml::from_str(&text) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("warning: {} is not valid: {e}; using defaults", path.display());
            TomlConfig::default()
        }
    }
}
