//! Rocket Loop headless driver
//!
//! Runs a scripted session against the reference kinematic world and logs
//! what happened. Usage: `rocket-loop [settings.json] [level.json]`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Rocket Loop (headless) starting...");

    if let Err(err) = headless::run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless driver on the web; the library is embedded by a frontend
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rocket_loop::sim::{GameInput, GameState, SessionEvent, tick};
    use rocket_loop::{Level, Result, Settings, VehicleClass};

    const DEFAULT_LEVEL: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/levels/demo.json");

    pub fn run() -> Result<()> {
        let mut args = std::env::args().skip(1);
        let settings = match args.next() {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        let level = Level::load(args.next().as_deref().unwrap_or(DEFAULT_LEVEL))?;
        let mut state = GameState::new(settings, level)?;
        let cycle = state.settings.cycle_steps() as usize;

        // 1. Park on the home pad for a whole cycle: comes back as a loop
        step(&mut state, &spawn(VehicleClass::Omni));
        for _ in 0..=cycle {
            step(&mut state, &GameInput::default());
        }

        // 2. Fly off and never return: discarded when the cycle ends
        step(&mut state, &spawn(VehicleClass::Reversible));
        for i in 0..=cycle {
            let input = if i < cycle / 4 {
                GameInput::stick(0.3, 1.0)
            } else {
                GameInput::default()
            };
            step(&mut state, &input);
        }

        // 3. Let the loop play for a while longer
        for _ in 0..cycle / 2 {
            step(&mut state, &GameInput::default());
        }

        let hud = state.hud();
        log::info!(
            "t={:.2}s loops={} goals left={} spawners={} (selected: {})",
            hud.cycle_time,
            hud.loops,
            hud.outstanding_goals,
            hud.spawner_count,
            hud.selected_spawner
        );
        for view in state.vehicle_views() {
            log::info!(
                "  vehicle {:?} at ({:.1}, {:.1}) cue={:?} looping={}",
                view.id,
                view.position.x,
                view.position.y,
                view.cue,
                view.looping
            );
        }
        Ok(())
    }

    fn spawn(class: VehicleClass) -> GameInput {
        GameInput {
            spawn: true,
            class: Some(class),
            ..Default::default()
        }
    }

    fn step(state: &mut GameState, input: &GameInput) {
        let report = tick(state, input);
        for event in &report.events {
            match event {
                SessionEvent::Landed { .. } => log::debug!("tick {}: {:?}", report.tick, event),
                _ => log::info!("tick {}: {:?}", report.tick, event),
            }
        }
    }
}
