//! Game state and core simulation types
//!
//! `GameState` is the single owner of everything the simulation mutates:
//! the player, the enemy population, the clock, deferred actions, pending
//! events, and the random source. The arena is built once and only read.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::events::{EventBuffer, EventSink, GameEvent};
use super::player::Player;
use super::population::Population;
use super::random::RandomSource;
use super::schedule::{Deferred, Schedule};
use super::snapshot::{EnemyView, PlayerView, RenderSnapshot};
use crate::config::WorldConfig;

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player died; ticks are ignored until restart
    GameOver,
}

/// Running totals for the HUD
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    pub kills: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub enemy_shots: u32,
    pub damage_taken: u32,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState<R = Pcg32> {
    pub config: WorldConfig,
    pub arena: Arena,
    pub player: Player,
    pub population: Population,
    pub phase: GamePhase,
    /// Simulation clock (milliseconds since match start)
    pub time_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub stats: MatchStats,
    /// Deferred actions (reload completion)
    pub schedule: Schedule,
    /// Events raised since the last drain
    pub events: EventBuffer,
    pub rng: R,
}

impl GameState<Pcg32> {
    /// Create a new match seeded from the config
    pub fn new(config: WorldConfig) -> Self {
        let rng = Pcg32::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create a new match driven by the given random source
    pub fn with_rng(config: WorldConfig, rng: R) -> Self {
        let arena = Arena::from_config(&config);
        let player = Player::new(&config);
        let population = Population::new(config.target_enemy_count);

        let mut state = Self {
            config,
            arena,
            player,
            population,
            phase: GamePhase::Playing,
            time_ms: 0.0,
            time_ticks: 0,
            stats: MatchStats::default(),
            schedule: Schedule::new(),
            events: EventBuffer::default(),
            rng,
        };
        state.spawn_initial();
        log::info!(
            "Match started: {} enemies, {} obstacles",
            state.population.len(),
            state.arena.obstacles().len()
        );
        state
    }

    fn spawn_initial(&mut self) {
        self.population
            .replenish(&self.config, Player::spawn_point(), &mut self.rng);
    }

    /// Tear down the current match and start a fresh one with the same config.
    ///
    /// Pending deferred actions are dropped so a reload started before the
    /// restart never lands on the new player.
    pub fn restart(&mut self) {
        self.schedule.clear();
        self.events.clear();
        self.player = Player::new(&self.config);
        self.population.clear();
        self.phase = GamePhase::Playing;
        self.time_ms = 0.0;
        self.time_ticks = 0;
        self.stats = MatchStats::default();
        self.spawn_initial();
        log::info!("Match restarted");
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Apply every deferred action due at the current time
    pub(crate) fn run_schedule(&mut self) {
        for action in self.schedule.take_due(self.time_ms) {
            match action {
                Deferred::ReloadComplete { amount } => self.complete_reload(amount),
            }
        }
    }

    /// Restore the population floor after removals
    pub(crate) fn replenish_enemies(&mut self) -> usize {
        self.population.remove_dead();
        self.population
            .replenish(&self.config, Player::spawn_point(), &mut self.rng)
    }

    /// Take the events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Drain pending events into a sink
    pub fn dispatch_events(&mut self, sink: &mut impl EventSink) {
        for event in self.events.drain() {
            sink.dispatch(event);
        }
    }

    /// Everything a renderer needs for the current frame
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            tick: self.time_ticks,
            time_ms: self.time_ms,
            phase: self.phase,
            player: PlayerView::from(&self.player),
            enemies: self.population.iter().map(EnemyView::from).collect(),
            stats: self.stats,
        }
    }
}
