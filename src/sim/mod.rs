//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Randomness only through the injected `RandomSource`
//! - Stable iteration order (enemies in spawn order)
//! - No rendering, audio, or input-capture dependencies

pub mod arena;
pub mod combat;
pub mod enemy;
pub mod events;
pub mod geometry;
pub mod player;
pub mod population;
pub mod random;
pub mod schedule;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use arena::{Arena, Obstacle, ObstacleKind};
pub use combat::{ShotEvent, ShotTarget, Shooter};
pub use enemy::{Enemy, EnemyId};
pub use events::{EventBuffer, EventSink, GameEvent};
pub use geometry::{Aabb, Ray};
pub use player::{MoveIntent, Player};
pub use population::Population;
pub use random::{RandomSource, ScriptedRandom};
pub use schedule::{Deferred, Schedule};
pub use snapshot::{EnemyView, PlayerView, RenderSnapshot};
pub use state::{GamePhase, GameState, MatchStats};
pub use tick::{TickInput, tick};
