//! Deterministic tile-based city simulation.
//!
//! All state lives in resources; a 16-phase rotor advances one phase per
//! `FixedUpdate`. External consumers (renderer, UI) read the observation
//! surface between phases and mutate the world only through the action
//! queue or the synchronous `do_tool` entry point.

use bevy::prelude::*;

pub mod budget;
pub mod census;
pub mod config;
pub mod crime;
pub mod density;
pub mod disasters;
pub mod evaluation;
pub mod game_actions;
pub mod land_value;
pub mod map_scan;
pub mod messages;
pub mod observation;
pub mod overlay;
pub mod pollution;
pub mod power;
pub mod rate_of_growth;
pub mod scheduler;
pub mod services;
pub mod sim_rng;
pub mod snapshot;
pub mod sprites;
pub mod state_hash;
pub mod terrain;
pub mod test_harness;
pub mod tile_map;
pub mod tiles;
pub mod traffic;
pub mod world_init;
pub mod zones;


// ---------------------------------------------------------------------------
// System ordering
// ---------------------------------------------------------------------------

/// Ordered phases for systems running in the `FixedUpdate` schedule,
/// configured as a chain: `PreSim` → `Simulation` → `PostSim`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Queued external actions apply here, between phases.
    PreSim,
    /// The phase rotor.
    Simulation,
    /// Read-only aggregation: message pumping, state hashing.
    PostSim,
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<tile_map::TileMap>()
            .init_resource::<sim_rng::SimRng>()
            .init_resource::<scheduler::CityClock>()
            .init_resource::<census::Census>()
            .init_resource::<budget::Budget>()
            .init_resource::<budget::FundEffects>()
            .init_resource::<budget::GameLevel>()
            .init_resource::<zones::Valves>()
            .init_resource::<power::PowerGrid>()
            .init_resource::<traffic::TrafficDensity>()
            .init_resource::<pollution::PollutionDensity>()
            .init_resource::<pollution::TerrainDensity>()
            .init_resource::<land_value::LandValue>()
            .init_resource::<crime::CrimeRate>()
            .init_resource::<density::PopulationDensity>()
            .init_resource::<density::CityCenter>()
            .init_resource::<rate_of_growth::RateOfGrowth>()
            .init_resource::<services::FireStationMap>()
            .init_resource::<services::FireStationEffect>()
            .init_resource::<services::PoliceStationMap>()
            .init_resource::<services::PoliceStationEffect>()
            .init_resource::<services::ComRate>()
            .init_resource::<sprites::SpriteList>()
            .init_resource::<disasters::DisasterState>()
            .init_resource::<messages::MessageLog>()
            .init_resource::<evaluation::CityEvaluation>()
            .init_resource::<state_hash::StateHash>()
            .init_resource::<game_actions::ActionQueue>()
            .init_resource::<game_actions::ActionResultLog>()
            .init_resource::<game_actions::ToolSettings>()
            .init_resource::<world_init::NewGameConfig>();

        app.add_event::<messages::SimMessage>();

        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::PreSim,
                SimulationSet::Simulation,
                SimulationSet::PostSim,
            )
                .chain(),
        );

        app.add_systems(Startup, world_init::init_world);
        app.add_systems(
            FixedUpdate,
            game_actions::execute_queued_actions.in_set(SimulationSet::PreSim),
        );
        app.add_systems(
            FixedUpdate,
            scheduler::sim_frame.in_set(SimulationSet::Simulation),
        );
        app.add_systems(
            FixedUpdate,
            (messages::pump_messages, state_hash::update_state_hash)
                .in_set(SimulationSet::PostSim),
        );
    }
}
