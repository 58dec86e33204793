//! Player state and kinematics
//!
//! Movement is integrated in the camera's frame: horizontal velocity is kept
//! as (right, forward) relative to the current yaw and turned into a world
//! displacement at integration time. Collisions use a full rollback: any
//! overlap after integration restores the previous position.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::geometry::{Aabb, Ray, forward_axis, right_axis, view_direction};
use crate::config::WorldConfig;
use crate::consts::*;
use crate::normalize_angle;

/// Held movement keys and jump trigger for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl MoveIntent {
    /// Normalized (right, forward) input direction; zero when keys cancel out
    pub fn direction(&self) -> Vec2 {
        let x = self.right as i32 - self.left as i32;
        let y = self.forward as i32 - self.backward as i32;
        Vec2::new(x as f32, y as f32).normalize_or_zero()
    }
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Eye position in world space
    pub position: Vec3,
    /// Heading (radians, 0 looks down -Z)
    pub yaw: f32,
    /// Look elevation (radians, clamped to ±90°)
    pub pitch: f32,
    /// x = rightward, z = forward (camera-relative); y = world up
    pub velocity: Vec3,
    pub health: u32,
    /// Rounds in the magazine
    pub magazine: u32,
    /// Rounds held in reserve
    pub reserve: u32,
    pub magazine_capacity: u32,
    pub reloading: bool,
    pub grounded: bool,
}

impl Player {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            position: Self::spawn_point(),
            yaw: 0.0,
            pitch: 0.0,
            velocity: Vec3::ZERO,
            health: PLAYER_MAX_HEALTH,
            magazine: config.magazine_capacity,
            reserve: config.reserve_capacity,
            magazine_capacity: config.magazine_capacity,
            reloading: false,
            grounded: false,
        }
    }

    /// Where every match starts
    pub fn spawn_point() -> Vec3 {
        Vec3::new(0.0, PLAYER_EYE_HEIGHT, 0.0)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Collision box centered on the current position
    pub fn bounds(&self) -> Aabb {
        Aabb::from_size(self.position, Vec3::from(PLAYER_BOX_SIZE))
    }

    /// Unit look direction
    pub fn view_dir(&self) -> Vec3 {
        view_direction(self.yaw, self.pitch)
    }

    /// Ray from the eye along the view direction
    pub fn eye_ray(&self) -> Ray {
        Ray {
            origin: self.position,
            dir: self.view_dir(),
        }
    }

    /// Apply a look delta; pitch is clamped rather than rejected
    pub fn apply_look(&mut self, yaw_delta: f32, pitch_delta: f32) {
        let finite = |d: f32| if d.is_finite() { d } else { 0.0 };
        let (yaw_delta, pitch_delta) = (finite(yaw_delta), finite(pitch_delta));
        self.yaw = normalize_angle(self.yaw + yaw_delta);
        self.pitch = (self.pitch + pitch_delta).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Reduce health, never below zero. Returns the new health.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    /// Integrate one tick of movement and resolve it against the arena.
    ///
    /// Returns true if the move collided and was rolled back.
    pub fn step(&mut self, intent: MoveIntent, dt: f32, arena: &Arena, bound: f32) -> bool {
        if intent.jump && self.grounded {
            self.velocity.y += JUMP_IMPULSE;
            self.grounded = false;
        }

        self.velocity.x -= self.velocity.x * PLAYER_DRAG * dt;
        self.velocity.z -= self.velocity.z * PLAYER_DRAG * dt;
        self.velocity.y -= GRAVITY * dt;

        let dir = intent.direction();
        if intent.forward || intent.backward {
            self.velocity.z += dir.y * MOVE_ACCEL * dt;
        }
        if intent.left || intent.right {
            self.velocity.x += dir.x * MOVE_ACCEL * dt;
        }

        let previous = self.position;
        self.position += right_axis(self.yaw) * (self.velocity.x * dt);
        self.position += forward_axis(self.yaw) * (self.velocity.z * dt);
        self.position.y += self.velocity.y * dt;

        let collided = arena.overlaps(&self.bounds());
        if collided {
            log::trace!("Player move blocked at {:?}, rolling back", self.position);
            self.position = previous;
            self.velocity.x = 0.0;
            self.velocity.z = 0.0;
        }

        if self.position.y < PLAYER_EYE_HEIGHT {
            self.position.y = PLAYER_EYE_HEIGHT;
            self.velocity.y = 0.0;
            self.grounded = true;
        }

        self.position.x = self.position.x.clamp(-bound, bound);
        self.position.z = self.position.z.clamp(-bound, bound);

        collided
    }
}
