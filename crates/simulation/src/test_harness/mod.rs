//! # TestCity — headless harness
//!
//! A fluent builder wrapping `bevy::app::App` + [`SimulationPlugin`] for
//! driving the simulation without a window or renderer. The fixed timestep
//! is parked at an effectively infinite interval so wall-clock time never
//! advances a phase; tests call [`TestCity::sim_frame`] to step
//! deterministically.

mod setup;

use bevy::app::App;
use bevy::prelude::*;

use crate::game_actions::{self, DisasterKind, Tool, ToolResult};
use crate::observation::{observe, CityObservation};
use crate::scheduler::SimSpeed;
use crate::world_init::{self, NewGameConfig};
use crate::SimulationPlugin;

pub struct TestCity {
    app: App,
}

impl Default for TestCity {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCity {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// A city generated from the default seed (42).
    pub fn new() -> Self {
        Self::with_seed(42)
    }

    /// A city generated from the given seed.
    pub fn with_seed(seed: u64) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        // Park the fixed clock: phases advance only through sim_frame().
        app.insert_resource(Time::<Fixed>::from_seconds(1e9));
        app.insert_resource(NewGameConfig { seed });
        app.add_plugins(SimulationPlugin);
        // One update so Startup systems run (terrain generation included).
        app.update();
        Self { app }
    }

    // -----------------------------------------------------------------------
    // Stepping
    // -----------------------------------------------------------------------

    /// Advance exactly one phase (one `sim_frame` invocation).
    pub fn sim_frame(&mut self) {
        self.app.world_mut().run_schedule(FixedUpdate);
    }

    pub fn sim_frames(&mut self, n: usize) {
        for _ in 0..n {
            self.sim_frame();
        }
    }

    /// Advance whole 16-phase cycles.
    pub fn sim_cycles(&mut self, n: usize) {
        self.sim_frames(n * 16);
    }

    // -----------------------------------------------------------------------
    // Control surface
    // -----------------------------------------------------------------------

    pub fn new_game(&mut self, seed: u64) {
        world_init::new_game(self.app.world_mut(), seed);
    }

    pub fn do_tool(&mut self, tool: Tool, x: i32, y: i32) -> ToolResult {
        game_actions::do_tool(self.app.world_mut(), tool, x, y)
    }

    pub fn trigger_disaster(&mut self, kind: DisasterKind) {
        game_actions::executor::trigger_disaster(self.app.world_mut(), kind);
    }

    pub fn set_speed(&mut self, speed: SimSpeed) {
        self.resource_mut::<crate::scheduler::CityClock>().speed = speed;
    }

    // -----------------------------------------------------------------------
    // Access
    // -----------------------------------------------------------------------

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<R: Resource>(&self) -> &R {
        self.app.world().resource::<R>()
    }

    pub fn resource_mut<R: Resource>(&mut self) -> Mut<'_, R> {
        self.app.world_mut().resource_mut::<R>()
    }

    pub fn observation(&self) -> CityObservation {
        observe(self.app.world())
    }
}
