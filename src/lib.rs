//! Arena Shooter - simulation core for a first-person arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, enemy AI, combat, spawning)
//! - `config`: World configuration passed in at build time

pub mod config;
pub mod sim;

pub use config::{ConfigError, WorldConfig};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the native driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Horizontal velocity drag factor (per second)
    pub const PLAYER_DRAG: f32 = 10.0;
    /// Gravity, scaled the same way as the drag
    pub const GRAVITY: f32 = 9.8 * 10.0;
    /// Input acceleration along the camera-relative axes
    pub const MOVE_ACCEL: f32 = 100.0;
    /// Upward velocity applied on jump
    pub const JUMP_IMPULSE: f32 = 15.0;
    /// Eye height; the player never sinks below this
    pub const PLAYER_EYE_HEIGHT: f32 = 10.0;
    /// Player collision box (full size, centered on the position)
    pub const PLAYER_BOX_SIZE: [f32; 3] = [2.0, 10.0, 2.0];
    /// Pitch limit (radians)
    pub const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2;

    /// Starting player health
    pub const PLAYER_MAX_HEALTH: u32 = 100;
    /// Starting enemy health
    pub const ENEMY_MAX_HEALTH: i32 = 100;
    /// Enemy hitbox half extents
    pub const ENEMY_HALF_EXTENTS: [f32; 3] = [2.0, 6.0, 2.0];
    /// Enemies stop moving once this close to their target
    pub const ENEMY_ARRIVE_DISTANCE: f32 = 2.0;
    /// Distance an enemy advances toward the player when it retargets
    pub const ENEMY_CHASE_STEP: f32 = 20.0;

    /// Maximum recoil kick applied to pitch per shot (radians)
    pub const RECOIL_PITCH: f32 = 0.02;
    /// Maximum recoil jitter applied to yaw per shot (radians)
    pub const RECOIL_YAW: f32 = 0.01;
}

/// Normalized angle to [-π, π). Non-finite input maps to 0.
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid may round up to TAU
    if wrapped >= PI { wrapped - TAU } else { wrapped }
}

/// Strip the vertical component of a vector
#[inline]
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Heading (yaw) that looks along `dir` on the horizontal plane.
///
/// Yaw 0 looks down -Z; positive yaw turns left (counter-clockwise seen from above).
#[inline]
pub fn yaw_towards(dir: Vec3) -> f32 {
    (-dir.x).atan2(-dir.z)
}
