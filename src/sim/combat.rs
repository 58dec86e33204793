//! Combat resolution: firing, hit detection, damage, and reloading
//!
//! The player's weapon is hitscan: a shot is a ray from the eye along the
//! view direction, resolved against the nearest enemy hitbox it enters.

use glam::Vec3;

use super::enemy::EnemyId;
use super::events::GameEvent;
use super::random::RandomSource;
use super::schedule::Deferred;
use super::state::GameState;
use crate::consts::*;

/// Who fired a shot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shooter {
    Player,
    Enemy(EnemyId),
}

/// What a shot connected with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotTarget {
    Player,
    Enemy(EnemyId),
}

/// A single resolved shot. Lives only as long as the call that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotEvent {
    pub shooter: Shooter,
    pub origin: Vec3,
    /// Unit direction (zero if shooter and target coincide)
    pub direction: Vec3,
    /// `None` on a miss
    pub target: Option<ShotTarget>,
    /// Damage applied to the target (0 on a miss)
    pub damage: i32,
}

impl ShotEvent {
    pub fn is_hit(&self) -> bool {
        self.target.is_some()
    }
}

impl<R: RandomSource> GameState<R> {
    /// Fire the player's weapon.
    ///
    /// Returns `None` without touching any state when the magazine is empty
    /// or a reload is in progress. Otherwise spends a round, resolves the hit,
    /// removes a killed enemy, and kicks the view with a little recoil.
    pub fn fire_weapon(&mut self) -> Option<ShotEvent> {
        if self.player.magazine == 0 || self.player.reloading {
            log::trace!(
                "Cannot fire (magazine {}, reloading {})",
                self.player.magazine,
                self.player.reloading
            );
            return None;
        }

        self.player.magazine -= 1;
        self.stats.shots_fired += 1;
        self.events.push(GameEvent::WeaponFired);
        self.events.push(GameEvent::AmmoChanged(self.player.magazine));

        let ray = self.player.eye_ray();
        let damage = self.config.shot_damage;
        let mut shot = ShotEvent {
            shooter: Shooter::Player,
            origin: ray.origin,
            direction: ray.dir,
            target: None,
            damage: 0,
        };

        if let Some((id, dist)) = self.population.nearest_hit(&ray) {
            shot.target = Some(ShotTarget::Enemy(id));
            shot.damage = damage;
            self.stats.shots_hit += 1;
            self.events.push(GameEvent::Hit);

            let remaining = self
                .population
                .get_mut(id)
                .map(|enemy| enemy.take_damage(damage));
            log::debug!("Hit enemy {:?} at {:.1} units, health now {:?}", id, dist, remaining);

            if remaining.is_some_and(|health| health <= 0) {
                self.population.remove(id);
                self.stats.kills += 1;
                self.events.push(GameEvent::Kill);
                log::info!("Enemy {:?} killed ({} kills)", id, self.stats.kills);
            }
        }

        let kick_pitch = self.rng.range(0.0, RECOIL_PITCH);
        let kick_yaw = self.rng.range(-RECOIL_YAW, RECOIL_YAW);
        self.player.apply_look(kick_yaw, kick_pitch);

        Some(shot)
    }

    /// Start a reload. Returns false (and changes nothing) if already
    /// reloading or the magazine is full.
    ///
    /// The rounds to move are fixed now and land after the reload duration.
    pub fn reload(&mut self) -> bool {
        let player = &mut self.player;
        if player.reloading || player.magazine >= player.magazine_capacity {
            return false;
        }

        player.reloading = true;
        let amount = (player.magazine_capacity - player.magazine).min(player.reserve);
        let due = self.time_ms + self.config.reload_duration_ms;
        self.schedule.schedule(due, Deferred::ReloadComplete { amount });
        log::debug!("Reload started: {} rounds due at {:.0}ms", amount, due);
        true
    }

    /// Finish a reload: move rounds from reserve to magazine and clear the flag
    pub(crate) fn complete_reload(&mut self, amount: u32) {
        let player = &mut self.player;
        let amount = amount.min(player.reserve);
        player.magazine += amount;
        player.reserve -= amount;
        player.reloading = false;
        self.events.push(GameEvent::AmmoChanged(player.magazine));
        log::debug!(
            "Reload complete: magazine {}, reserve {}",
            player.magazine,
            player.reserve
        );
    }
}
