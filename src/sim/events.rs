//! Gameplay notifications for the UI and audio layers
//!
//! The simulation pushes events while it runs; the host drains them after
//! each tick and forwards them to an [`EventSink`]. Nothing here feeds back
//! into simulation state.

use serde::{Deserialize, Serialize};

/// A notification emitted by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player health changed (new value)
    HealthChanged(u32),
    /// Magazine count changed (new value)
    AmmoChanged(u32),
    /// Player shot hit an enemy
    Hit,
    /// Player shot killed an enemy
    Kill,
    /// Player health reached zero
    Death,
    /// Player weapon fired (audio cue)
    WeaponFired,
}

impl GameEvent {
    fn same_kind(&self, other: &GameEvent) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Per-tick event buffer holding at most one event of each kind.
///
/// Value-carrying events keep the latest value but their first position.
#[derive(Debug, Clone, Default)]
pub struct EventBuffer {
    events: Vec<GameEvent>,
}

impl EventBuffer {
    pub fn push(&mut self, event: GameEvent) {
        match self.events.iter_mut().find(|e| e.same_kind(&event)) {
            Some(existing) => *existing = event,
            None => self.events.push(event),
        }
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn as_slice(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Callbacks consumed by the surrounding UI/audio layer. All default to no-ops.
pub trait EventSink {
    fn health_changed(&mut self, _health: u32) {}
    fn ammo_changed(&mut self, _magazine: u32) {}
    fn hit(&mut self) {}
    fn kill(&mut self) {}
    fn death(&mut self) {}
    fn weapon_fired(&mut self) {}

    /// Route one event to its callback
    fn dispatch(&mut self, event: GameEvent) {
        match event {
            GameEvent::HealthChanged(health) => self.health_changed(health),
            GameEvent::AmmoChanged(magazine) => self.ammo_changed(magazine),
            GameEvent::Hit => self.hit(),
            GameEvent::Kill => self.kill(),
            GameEvent::Death => self.death(),
            GameEvent::WeaponFired => self.weapon_fired(),
        }
    }
}

/// Collects every dispatched event; handy for tests and replays
impl EventSink for Vec<GameEvent> {
    fn dispatch(&mut self, event: GameEvent) {
        self.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coalesces_per_kind() {
        let mut buffer = EventBuffer::default();
        buffer.push(GameEvent::HealthChanged(90));
        buffer.push(GameEvent::Hit);
        buffer.push(GameEvent::HealthChanged(80));
        buffer.push(GameEvent::Hit);

        assert_eq!(
            buffer.drain(),
            vec![GameEvent::HealthChanged(80), GameEvent::Hit]
        );
        assert!(buffer.is_empty());
    }

    #[derive(Default)]
    struct Counter {
        kills: u32,
        last_ammo: Option<u32>,
    }

    impl EventSink for Counter {
        fn kill(&mut self) {
            self.kills += 1;
        }
        fn ammo_changed(&mut self, magazine: u32) {
            self.last_ammo = Some(magazine);
        }
    }

    #[test]
    fn test_dispatch_routes_to_callbacks() {
        let mut sink = Counter::default();
        for event in [GameEvent::Kill, GameEvent::AmmoChanged(7), GameEvent::Death] {
            sink.dispatch(event);
        }
        assert_eq!(sink.kills, 1);
        assert_eq!(sink.last_ammo, Some(7));
    }
}
