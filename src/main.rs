//! Arena Shooter headless driver
//!
//! Runs the simulation with a scripted input stream and logs what happens.
//! Usage: `arena-shooter [config.json] [seconds]`

use arena_shooter::WorldConfig;
use arena_shooter::consts::*;
use arena_shooter::sim::{EventSink, GameState, TickInput, tick};

/// Logs every notification the simulation raises
#[derive(Default)]
struct LogSink {
    kills: u32,
}

impl EventSink for LogSink {
    fn health_changed(&mut self, health: u32) {
        log::info!("Health: {}", health);
    }
    fn ammo_changed(&mut self, magazine: u32) {
        log::debug!("Ammo: {}", magazine);
    }
    fn hit(&mut self) {
        log::debug!("Hit!");
    }
    fn kill(&mut self) {
        self.kills += 1;
        log::info!("Kill #{}", self.kills);
    }
    fn death(&mut self) {
        log::info!("Player died");
    }
    fn weapon_fired(&mut self) {
        log::trace!("Bang");
    }
}

/// Game instance holding all state
struct Game {
    state: GameState,
    accumulator: f32,
    input: TickInput,
    sink: LogSink,
}

impl Game {
    fn new(config: WorldConfig) -> Self {
        Self {
            state: GameState::new(config),
            accumulator: 0.0,
            input: TickInput::default(),
            sink: LogSink::default(),
        }
    }

    /// Demo input: strafe in a slow circle, sweep the view, fire often, reload when dry
    fn script_input(&mut self) {
        let t = self.state.time_ticks;
        let player = &self.state.player;
        self.input = TickInput {
            forward: (t / 90) % 2 == 0,
            left: (t / 240) % 2 == 0,
            right: (t / 240) % 2 == 1,
            jump: t % 300 == 0,
            fire: t % 12 == 0 && !player.reloading,
            reload: player.magazine == 0,
            look_yaw: 0.01,
            look_pitch: 0.0,
            ..Default::default()
        };
    }

    /// Run simulation ticks for one frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.script_input();
            tick(&mut self.state, &self.input, SIM_DT);
            self.state.dispatch_events(&mut self.sink);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match WorldConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("{}", err);
                std::process::exit(1);
            }
        },
        None => WorldConfig::default(),
    };
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60.0);

    log::info!("Arena Shooter (headless) running for {}s", seconds);
    let mut game = Game::new(config);

    // Simulated 60 fps display with an occasional long frame
    let mut elapsed = 0.0;
    let mut frame = 0u32;
    while elapsed < seconds && !game.state.is_game_over() {
        let frame_dt = if frame % 120 == 119 { 0.05 } else { 1.0 / 60.0 };
        game.update(frame_dt);
        elapsed += frame_dt;
        frame += 1;
    }

    let snapshot = game.state.snapshot();
    log::info!(
        "Finished after {:.1}s: phase {:?}, health {}, kills {}, accuracy {}/{}",
        snapshot.time_ms / 1000.0,
        snapshot.phase,
        snapshot.player.health,
        snapshot.stats.kills,
        snapshot.stats.shots_hit,
        snapshot.stats.shots_fired
    );
    match serde_json::to_string(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(err) => log::error!("Failed to serialize snapshot: {}", err),
    }
}
