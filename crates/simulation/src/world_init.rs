//! New-game setup: regenerate terrain from a seed and reset every derived
//! resource, preserving only the player's settings (speed, level, toggles).

use bevy::prelude::*;

use crate::budget::{Budget, FundEffects, GameLevel};
use crate::census::Census;
use crate::crime::CrimeRate;
use crate::density::{CityCenter, PopulationDensity};
use crate::disasters::DisasterState;
use crate::evaluation::CityEvaluation;
use crate::game_actions::{ActionQueue, ActionResultLog};
use crate::land_value::LandValue;
use crate::messages::MessageLog;
use crate::pollution::{PollutionDensity, TerrainDensity};
use crate::power::PowerGrid;
use crate::rate_of_growth::RateOfGrowth;
use crate::scheduler::CityClock;
use crate::services::{
    ComRate, FireStationEffect, FireStationMap, PoliceStationEffect, PoliceStationMap,
};
use crate::sim_rng::SimRng;
use crate::sprites::SpriteList;
use crate::terrain;
use crate::tile_map::TileMap;
use crate::traffic::TrafficDensity;
use crate::zones::Valves;

/// Seed the Startup system uses when the embedding app didn't choose one.
#[derive(Resource, Clone, Copy, Debug)]
pub struct NewGameConfig {
    pub seed: u64,
}

impl Default for NewGameConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// Startup: generate the initial city.
pub fn init_world(world: &mut World) {
    let seed = world.resource::<NewGameConfig>().seed;
    new_game(world, seed);
}

/// Clear the world and regenerate from `seed`. Deterministic: the same seed
/// always yields the same map and the same evolution.
pub fn new_game(world: &mut World, seed: u64) {
    info!("Generating a new city from seed {seed}");

    let level = *world.resource::<GameLevel>();

    let mut rng = SimRng::from_seed(seed);
    let mut fresh = TileMap::default();
    terrain::generate(&mut fresh, &mut rng, seed);

    {
        // Keep the serial monotonic across new games so a polling renderer
        // always notices the swap.
        let mut map = world.resource_mut::<TileMap>();
        let serial = map.serial() + 1;
        map.restore(fresh.cells().to_vec(), serial);
    }
    world.insert_resource(rng);

    world.insert_resource(PowerGrid::default());
    world.insert_resource(TrafficDensity::default());
    world.insert_resource(PollutionDensity::default());
    world.insert_resource(TerrainDensity::default());
    world.insert_resource(LandValue::default());
    world.insert_resource(CrimeRate::default());
    world.insert_resource(PopulationDensity::default());
    world.insert_resource(CityCenter::default());
    world.insert_resource(RateOfGrowth::default());
    world.insert_resource(FireStationMap::default());
    world.insert_resource(FireStationEffect::default());
    world.insert_resource(PoliceStationMap::default());
    world.insert_resource(PoliceStationEffect::default());
    world.insert_resource(ComRate::default());
    world.insert_resource(Census::default());
    world.insert_resource(Valves::default());
    world.insert_resource(SpriteList::default());
    world.insert_resource(CityEvaluation::default());
    world.insert_resource(FundEffects::default());

    let enabled = world.resource::<DisasterState>().enabled;
    world.insert_resource(DisasterState {
        enabled,
        flood_count: 0,
    });

    let speed = world.resource::<CityClock>().speed;
    world.insert_resource(CityClock {
        speed,
        ..Default::default()
    });

    world.insert_resource(Budget {
        total_funds: level.starting_funds(),
        ..Default::default()
    });

    world.resource_mut::<MessageLog>().clear();
    world.resource_mut::<ActionResultLog>().clear();
    world.resource_mut::<ActionQueue>().drain();
}
