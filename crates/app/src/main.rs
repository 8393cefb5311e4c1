//! Headless driver: wires the simulation plugin into a schedule runner and
//! logs a stats line once per game year. Seed comes from `GRIDTOWN_SEED`.

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use simulation::observation::observe;
use simulation::scheduler::CityClock;
use simulation::world_init::NewGameConfig;
use simulation::SimulationPlugin;

/// Target simulation rate: one phase per invocation, ~30 per second.
const FRAME_RATE_HZ: f64 = 30.0;

fn main() {
    let seed = std::env::var("GRIDTOWN_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / FRAME_RATE_HZ,
            ))),
        )
        .add_plugins(LogPlugin::default())
        .insert_resource(Time::<Fixed>::from_hz(FRAME_RATE_HZ))
        .insert_resource(NewGameConfig { seed })
        .add_plugins(SimulationPlugin)
        .add_systems(FixedUpdate, log_yearly_stats.after(simulation::SimulationSet::PostSim))
        .run();
}

fn log_yearly_stats(world: &World) {
    let clock = world.resource::<CityClock>();
    // One report per year, just after the phase-9 bookkeeping.
    if clock.city_time == 0
        || clock.city_time % 48 != 0
        || clock.phase_cycle != 10
    {
        return;
    }
    let obs = observe(world);
    info!(
        "{}: pop {} ({}), score {}, funds {}",
        obs.date, obs.population, obs.city_class, obs.city_score, obs.budget.total_funds
    );
}
