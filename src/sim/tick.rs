//! Simulation tick
//!
//! One call advances the world by `dt` seconds, in a fixed order:
//! deferred actions, look, player movement, player weapon, population
//! upkeep, then every enemy against the player's updated position.

use super::combat::ShotTarget;
use super::events::GameEvent;
use super::player::MoveIntent;
use super::random::RandomSource;
use super::state::{GamePhase, GameState};

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Jump (triggered this tick)
    pub jump: bool,
    /// Fire (triggered this tick)
    pub fire: bool,
    /// Reload (triggered this tick)
    pub reload: bool,
    /// Look delta (radians), positive turns left
    pub look_yaw: f32,
    /// Look delta (radians), positive looks up
    pub look_pitch: f32,
}

impl TickInput {
    pub fn movement(&self) -> MoveIntent {
        MoveIntent {
            forward: self.forward,
            backward: self.backward,
            left: self.left,
            right: self.right,
            jump: self.jump,
        }
    }
}

/// Advance the game state by `dt` seconds
pub fn tick<R: RandomSource>(state: &mut GameState<R>, input: &TickInput, dt: f32) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;
    state.time_ms += dt as f64 * 1000.0;

    state.run_schedule();

    // Player
    state.player.apply_look(input.look_yaw, input.look_pitch);
    let bound = state.config.player_bound;
    state
        .player
        .step(input.movement(), dt, &state.arena, bound);

    if input.fire {
        state.fire_weapon();
    }
    if input.reload {
        state.reload();
    }

    let spawned = state.replenish_enemies();
    if spawned > 0 {
        log::debug!("Spawned {} replacement enemies", spawned);
    }

    update_enemies(state, dt);
}

/// Run retarget, movement, and shooting for every agent in spawn order
fn update_enemies<R: RandomSource>(state: &mut GameState<R>, dt: f32) {
    let player_pos = state.player.position;
    let now = state.time_ms;

    for enemy in state.population.iter_mut() {
        enemy.update_target(dt, player_pos, &state.config, &mut state.rng);
        enemy.advance(dt, state.config.enemy_speed);

        // Later agents must not shoot a player killed earlier this tick
        if !state.player.is_alive() {
            continue;
        }
        let Some(shot) =
            enemy.try_shoot(now, player_pos, &state.arena, &state.config, &mut state.rng)
        else {
            continue;
        };
        state.stats.enemy_shots += 1;
        if shot.target != Some(ShotTarget::Player) {
            continue;
        }

        let damage = shot.damage.max(0) as u32;
        let health = state.player.take_damage(damage);
        state.stats.damage_taken += damage;
        state.events.push(GameEvent::HealthChanged(health));
        if health == 0 {
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::Death);
            log::info!(
                "Player killed by enemy {:?} at {:.1}s ({} kills)",
                enemy.id,
                state.time_ms / 1000.0,
                state.stats.kills
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::consts::SIM_DT;
    use crate::sim::random::ScriptedRandom;
    use glam::Vec3;

    fn quiet_config() -> WorldConfig {
        WorldConfig {
            target_enemy_count: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_tick_advances_clock() {
        let mut state = GameState::new(WorldConfig::default());
        tick(&mut state, &TickInput::default(), 0.5);
        assert_eq!(state.time_ticks, 1);
        assert!((state.time_ms - 500.0).abs() < 1e-6);
    }

    #[test]
    fn test_reload_completes_after_delay() {
        let mut state = GameState::with_rng(quiet_config(), ScriptedRandom::constant(0.5));
        state.player.magazine = 10;
        state.player.reserve = 50;

        let reload = TickInput {
            reload: true,
            ..Default::default()
        };
        tick(&mut state, &reload, 0.1);
        assert!(state.player.reloading);

        // Still reloading just before the delay elapses
        for _ in 0..14 {
            tick(&mut state, &TickInput::default(), 0.1);
        }
        assert!(state.player.reloading);
        assert_eq!(state.player.magazine, 10);

        tick(&mut state, &TickInput::default(), 0.1);
        assert!(!state.player.reloading);
        assert_eq!(state.player.magazine, 30);
        assert_eq!(state.player.reserve, 30);
    }

    #[test]
    fn test_kill_triggers_replacement_same_tick() {
        let mut state = GameState::new(WorldConfig::default());
        state.population.clear();
        let id = state.population.spawn_at(Vec3::new(0.0, 6.0, -30.0));
        state.population.get_mut(id).unwrap().health = 10;
        // The rest stand behind the player, out of the line of fire
        for x in [-30.0, -10.0, 10.0, 30.0] {
            state.population.spawn_at(Vec3::new(x, 6.0, 60.0));
        }
        assert_eq!(state.population.len(), 5);

        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, SIM_DT);
        assert!(state.population.get(id).is_none());
        assert_eq!(state.population.len(), 5);
        assert_eq!(state.stats.kills, 1);
        assert!(state.drain_events().contains(&GameEvent::Kill));
    }

    #[test]
    fn test_enemy_fire_damages_player() {
        let mut state = GameState::with_rng(quiet_config(), ScriptedRandom::constant(0.0));
        state.population.spawn_at(Vec3::new(0.0, 6.0, -20.0));

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.player.health, 90);
        assert_eq!(state.drain_events(), vec![GameEvent::HealthChanged(90)]);
    }

    #[test]
    fn test_death_ends_match() {
        let mut state = GameState::with_rng(quiet_config(), ScriptedRandom::constant(0.0));
        state.population.spawn_at(Vec3::new(0.0, 6.0, -20.0));
        state.player.health = 10;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.player.health, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Death));

        // Frozen until restart
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_only_one_lethal_death_event() {
        let mut state = GameState::with_rng(quiet_config(), ScriptedRandom::constant(0.0));
        state.population.spawn_at(Vec3::new(0.0, 6.0, -20.0));
        state.population.spawn_at(Vec3::new(0.0, 6.0, 20.0));
        state.player.health = 10;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.stats.enemy_shots, 1);
        let deaths = state
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::Death)
            .count();
        assert_eq!(deaths, 1);
    }
}
