//! Render surface
//!
//! A read-only copy of what the renderer and HUD need each frame.

use glam::Vec3;
use serde::Serialize;

use super::enemy::{Enemy, EnemyId};
use super::player::Player;
use super::state::{GamePhase, MatchStats};

/// Player transform and HUD values
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerView {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub health: u32,
    pub magazine: u32,
    pub reserve: u32,
    pub reloading: bool,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        Self {
            position: player.position,
            yaw: player.yaw,
            pitch: player.pitch,
            health: player.health,
            magazine: player.magazine,
            reserve: player.reserve,
            reloading: player.reloading,
        }
    }
}

/// One live enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnemyView {
    pub id: EnemyId,
    pub position: Vec3,
    pub yaw: f32,
    pub health: i32,
}

impl From<&Enemy> for EnemyView {
    fn from(enemy: &Enemy) -> Self {
        Self {
            id: enemy.id,
            position: enemy.position,
            yaw: enemy.yaw,
            health: enemy.health,
        }
    }
}

/// Frame snapshot handed to the render layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub tick: u64,
    pub time_ms: f64,
    pub phase: GamePhase,
    pub player: PlayerView,
    /// Live enemies in spawn order
    pub enemies: Vec<EnemyView>,
    pub stats: MatchStats,
}
