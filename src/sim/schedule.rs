//! Deferred state transitions keyed by simulation time
//!
//! Timed effects (reload completion) are queued here and applied by the tick
//! once the clock reaches their due time. Tearing the world down clears the
//! queue, so nothing scheduled in a finished match can touch the next one.

use serde::{Deserialize, Serialize};

/// A pending state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deferred {
    /// Move `amount` rounds from reserve into the magazine
    ReloadComplete { amount: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Scheduled {
    due_ms: f64,
    action: Deferred,
}

/// Time-ordered queue of deferred actions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    entries: Vec<Scheduled>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to fire once the clock reaches `due_ms`
    pub fn schedule(&mut self, due_ms: f64, action: Deferred) {
        // Keep sorted by due time; equal times stay in insertion order
        let pos = self.entries.partition_point(|e| e.due_ms <= due_ms);
        self.entries.insert(pos, Scheduled { due_ms, action });
    }

    /// Remove and return every action due at `now_ms`, oldest first
    pub fn take_due(&mut self, now_ms: f64) -> Vec<Deferred> {
        let split = self.entries.partition_point(|e| e.due_ms <= now_ms);
        self.entries.drain(..split).map(|e| e.action).collect()
    }

    /// Drop everything pending
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            log::debug!("Discarding {} pending deferred actions", self.entries.len());
        }
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_ordering() {
        let mut schedule = Schedule::new();
        schedule.schedule(300.0, Deferred::ReloadComplete { amount: 3 });
        schedule.schedule(100.0, Deferred::ReloadComplete { amount: 1 });
        schedule.schedule(200.0, Deferred::ReloadComplete { amount: 2 });

        assert!(schedule.take_due(50.0).is_empty());
        assert_eq!(
            schedule.take_due(250.0),
            vec![
                Deferred::ReloadComplete { amount: 1 },
                Deferred::ReloadComplete { amount: 2 }
            ]
        );
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn test_due_exactly_at_time() {
        let mut schedule = Schedule::new();
        schedule.schedule(1500.0, Deferred::ReloadComplete { amount: 20 });
        assert_eq!(schedule.take_due(1500.0).len(), 1);
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_clear_discards_pending() {
        let mut schedule = Schedule::new();
        schedule.schedule(100.0, Deferred::ReloadComplete { amount: 5 });
        schedule.clear();
        assert!(schedule.take_due(1e9).is_empty());
    }
}
