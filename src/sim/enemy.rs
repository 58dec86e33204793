//! Enemy agents
//!
//! Every tick each agent runs three concerns in order: retarget on a timer,
//! walk toward its current target, and take a shot at the player when in
//! range and off cooldown.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::combat::{ShotEvent, ShotTarget, Shooter};
use super::geometry::Aabb;
use super::random::RandomSource;
use crate::config::WorldConfig;
use crate::consts::*;
use crate::{horizontal, yaw_towards};

/// Stable identity of an enemy agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

/// A hostile agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Facing (radians, 0 looks down -Z)
    pub yaw: f32,
    pub health: i32,
    /// Simulation time of the last shot attempt; `None` until the first one
    pub last_shot_ms: Option<f64>,
    /// Point the agent is walking toward
    pub target: Vec3,
    /// Seconds since the last retarget
    pub retarget_timer: f32,
}

impl Enemy {
    /// A fresh agent standing still at `position`
    pub fn new(id: EnemyId, position: Vec3) -> Self {
        Self {
            id,
            position,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            health: ENEMY_MAX_HEALTH,
            last_shot_ms: None,
            target: position,
            retarget_timer: 0.0,
        }
    }

    /// Hitbox used for the player's shots
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position, Vec3::from(ENEMY_HALF_EXTENTS))
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Apply damage and return the resulting health (may go negative)
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        self.health -= amount;
        self.health
    }

    /// Advance the retarget timer and pick a new target when it expires.
    ///
    /// Returns true if a new target was chosen.
    pub fn update_target(
        &mut self,
        dt: f32,
        player_pos: Vec3,
        config: &WorldConfig,
        rng: &mut impl RandomSource,
    ) -> bool {
        self.retarget_timer += dt;
        if self.retarget_timer <= config.enemy_retarget_interval_sec {
            return false;
        }
        self.retarget_timer = 0.0;

        self.target = if rng.chance(config.enemy_chase_chance) {
            let toward_player = horizontal(player_pos - self.position).normalize_or_zero();
            self.position + toward_player * ENEMY_CHASE_STEP
        } else {
            let extent = config.spawn_extent;
            Vec3::new(
                rng.range(-extent, extent),
                config.enemy_height,
                rng.range(-extent, extent),
            )
        };
        log::debug!("Enemy {:?} retargeted to {:?}", self.id, self.target);
        true
    }

    /// Walk toward the target; agents within arrival distance hold position
    pub fn advance(&mut self, dt: f32, speed: f32) {
        let to_target = horizontal(self.target - self.position);
        let dist = to_target.length();
        if dist <= ENEMY_ARRIVE_DISTANCE {
            return;
        }

        let dir = to_target / dist;
        self.velocity = dir * speed;
        self.position += self.velocity * dt;
        self.yaw = yaw_towards(dir);
    }

    /// Attempt a shot at the player.
    ///
    /// Returns `None` when out of range or cooling down. Otherwise the attempt
    /// consumes the cooldown whether or not the line of sight is clear, and a
    /// clear shot hits with the configured probability. The caller applies
    /// the damage.
    pub fn try_shoot(
        &mut self,
        now_ms: f64,
        player_pos: Vec3,
        arena: &Arena,
        config: &WorldConfig,
        rng: &mut impl RandomSource,
    ) -> Option<ShotEvent> {
        let dist = self.position.distance(player_pos);
        if dist >= config.enemy_detection_radius {
            return None;
        }
        let ready = self
            .last_shot_ms
            .is_none_or(|last| now_ms - last >= config.enemy_shot_cooldown_ms);
        if !ready {
            return None;
        }
        self.last_shot_ms = Some(now_ms);

        let clear = arena.line_of_sight(self.position, player_pos);
        let hit = clear && rng.chance(config.enemy_hit_chance);
        log::debug!(
            "Enemy {:?} fires from {:.1} units: clear={} hit={}",
            self.id,
            dist,
            clear,
            hit
        );

        Some(ShotEvent {
            shooter: Shooter::Enemy(self.id),
            origin: self.position,
            direction: (player_pos - self.position).normalize_or_zero(),
            target: hit.then_some(ShotTarget::Player),
            damage: if hit {
                i32::try_from(config.enemy_shot_damage).unwrap_or(i32::MAX)
            } else {
                0
            },
        })
    }
}
