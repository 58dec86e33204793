//! World configuration
//!
//! Static settings handed to the simulation when a world is built. Stored as
//! camelCase JSON; every field falls back to its default when omitted.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a [`WorldConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Arena layout, population, and combat tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorldConfig {
    /// RNG seed for spawning, AI decisions, and recoil
    pub seed: u64,

    // === Arena ===
    /// Distance from the arena center to each boundary wall
    pub arena_half_extent: f32,
    /// Height of boundary walls and cover blocks
    pub wall_height: f32,
    /// Thickness of the boundary walls
    pub wall_thickness: f32,
    /// Side length of a (square) cover block
    pub cover_size: f32,
    /// Cover block centers on the ground plane, as (x, z)
    pub cover_layout: Vec<(f32, f32)>,
    /// Player horizontal coordinates are clamped to ±this
    pub player_bound: f32,

    // === Weapon ===
    pub magazine_capacity: u32,
    pub reserve_capacity: u32,
    pub reload_duration_ms: f64,
    /// Damage dealt to an enemy per player hit
    pub shot_damage: i32,

    // === Enemies ===
    /// Population floor maintained by the spawner
    pub target_enemy_count: usize,
    /// Damage dealt to the player per enemy hit
    pub enemy_shot_damage: u32,
    pub enemy_shot_cooldown_ms: f64,
    pub enemy_retarget_interval_sec: f32,
    /// Enemies only shoot when the player is closer than this
    pub enemy_detection_radius: f32,
    pub enemy_speed: f32,
    /// Fixed height enemies are spawned and move at
    pub enemy_height: f32,
    /// Probability that a retarget heads toward the player (vs. wandering)
    pub enemy_chase_chance: f32,
    /// Probability that a shot with clear line of sight hits
    pub enemy_hit_chance: f32,

    // === Spawning ===
    /// Enemies spawn within ±this on both horizontal axes
    pub spawn_extent: f32,
    /// Square half-size around the player start kept free of spawns
    pub spawn_exclusion: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0x5eed,

            arena_half_extent: 100.0,
            wall_height: 20.0,
            wall_thickness: 2.0,
            cover_size: 10.0,
            cover_layout: vec![
                (-40.0, -40.0),
                (40.0, -40.0),
                (-40.0, 40.0),
                (40.0, 40.0),
                (0.0, -60.0),
                (0.0, 60.0),
                (-60.0, 0.0),
                (60.0, 0.0),
            ],
            player_bound: 95.0,

            magazine_capacity: 30,
            reserve_capacity: 90,
            reload_duration_ms: 1500.0,
            shot_damage: 34,

            target_enemy_count: 5,
            enemy_shot_damage: 10,
            enemy_shot_cooldown_ms: 2000.0,
            enemy_retarget_interval_sec: 2.0,
            enemy_detection_radius: 50.0,
            enemy_speed: 15.0,
            enemy_height: 6.0,
            enemy_chase_chance: 0.7,
            enemy_hit_chance: 0.7,

            spawn_extent: 80.0,
            spawn_exclusion: 20.0,
        }
    }
}

impl WorldConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded world config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.arena_half_extent <= 0.0 || self.wall_height <= 0.0 {
            return invalid("arena extent and wall height must be positive");
        }
        if self.player_bound <= 0.0 || self.player_bound > self.arena_half_extent {
            return invalid("player bound must lie inside the arena");
        }
        if self.cover_size <= 0.0 {
            return invalid("cover size must be positive");
        }
        if self.magazine_capacity == 0 {
            return invalid("magazine capacity must be at least 1");
        }
        if self.reload_duration_ms < 0.0 || self.enemy_shot_cooldown_ms < 0.0 {
            return invalid("durations cannot be negative");
        }
        if self.shot_damage < 0 || i32::try_from(self.enemy_shot_damage).is_err() {
            return invalid("shot damage must be a non-negative i32");
        }
        if self.enemy_speed < 0.0 {
            return invalid("enemy speed cannot be negative");
        }
        if self.enemy_detection_radius <= 0.0 {
            return invalid("detection radius must be positive");
        }
        if self.enemy_retarget_interval_sec <= 0.0 {
            return invalid("retarget interval must be positive");
        }
        if self.spawn_extent <= self.spawn_exclusion {
            return invalid("spawn extent must be larger than the exclusion zone");
        }
        if self.spawn_extent > self.arena_half_extent {
            return invalid("spawn extent must lie inside the arena");
        }
        for p in [self.enemy_chase_chance, self.enemy_hit_chance] {
            if !(0.0..=1.0).contains(&p) {
                return invalid("probabilities must be within [0, 1]");
            }
        }
        Ok(())
    }

    /// Magazine + reserve at match start
    pub fn total_ammo(&self) -> u32 {
        self.magazine_capacity + self.reserve_capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = WorldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.total_ammo(), 120);
        assert_eq!(config.target_enemy_count, 5);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            WorldConfig::from_json(r#"{ "targetEnemyCount": 8, "shotDamage": 50 }"#).unwrap();
        assert_eq!(config.target_enemy_count, 8);
        assert_eq!(config.shot_damage, 50);
        assert_eq!(config.magazine_capacity, 30);
    }

    #[test]
    fn test_cover_layout_from_json() {
        let config = WorldConfig::from_json(r#"{ "coverLayout": [[10.0, 30.0]] }"#).unwrap();
        assert_eq!(config.cover_layout, vec![(10.0, 30.0)]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = WorldConfig::from_json(r#"{ "spawnExtent": 10.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = WorldConfig::from_json(r#"{ "enemyHitChance": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        for json in [
            r#"{ "shotDamage": -1 }"#,
            r#"{ "enemySpeed": -5.0 }"#,
            r#"{ "enemyDetectionRadius": 0.0 }"#,
            r#"{ "coverSize": 0.0 }"#,
            r#"{ "enemyShotDamage": 3000000000 }"#,
        ] {
            let err = WorldConfig::from_json(json).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{json}");
        }

        let err = WorldConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let config = WorldConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(WorldConfig::from_json(&json).unwrap(), config);
    }
}
