//! Whole-simulation binary snapshots.
//!
//! `CitySnapshot` captures every simulation resource into one
//! bitcode-encodable struct; restoring one reproduces the run bit for bit
//! (the determinism tests round-trip through it). Message and action logs
//! are UI chrome and are not part of the captured state.

use bevy::prelude::*;
use bitcode::{Decode, Encode};

use crate::budget::{Budget, FundEffects, GameLevel};
use crate::census::Census;
use crate::crime::CrimeRate;
use crate::density::{CityCenter, PopulationDensity};
use crate::disasters::DisasterState;
use crate::evaluation::CityEvaluation;
use crate::land_value::LandValue;
use crate::pollution::{PollutionDensity, TerrainDensity};
use crate::power::PowerGrid;
use crate::rate_of_growth::RateOfGrowth;
use crate::scheduler::CityClock;
use crate::services::{
    ComRate, FireStationEffect, FireStationMap, PoliceStationEffect, PoliceStationMap,
};
use crate::sim_rng::SimRng;
use crate::sprites::{Sprite, SpriteList};
use crate::tile_map::TileMap;
use crate::tiles::Tile;
use crate::traffic::TrafficDensity;
use crate::zones::Valves;

#[derive(Encode, Decode)]
pub struct CitySnapshot {
    cells: Vec<Tile>,
    map_serial: u64,
    rng: SimRng,
    clock: CityClock,
    budget: Budget,
    effects: FundEffects,
    level: GameLevel,
    valves: Valves,
    census: Census,
    disasters: DisasterState,
    evaluation: CityEvaluation,
    sprites: Vec<Sprite>,
    city_center: (i32, i32),

    power: Vec<u8>,
    traffic: Vec<u8>,
    pollution: Vec<u8>,
    pollution_average: u8,
    pollution_max_at: (i32, i32),
    terrain: Vec<u8>,
    land_value: Vec<u8>,
    land_value_average: u8,
    crime: Vec<u8>,
    crime_average: u8,
    crime_max_at: (i32, i32),
    density: Vec<u8>,
    density_average: u8,
    rate_of_growth: Vec<i16>,
    fire_station: Vec<i16>,
    fire_effect: Vec<i16>,
    police_station: Vec<i16>,
    police_effect: Vec<i16>,
    com_rate: Vec<i16>,
}

impl CitySnapshot {
    /// Capture the complete simulation state.
    pub fn capture(world: &World) -> Self {
        let map = world.resource::<TileMap>();
        let pollution = world.resource::<PollutionDensity>();
        let land_value = world.resource::<LandValue>();
        let crime = world.resource::<CrimeRate>();
        let density = world.resource::<PopulationDensity>();
        let center = world.resource::<CityCenter>();

        Self {
            cells: map.cells().to_vec(),
            map_serial: map.serial(),
            rng: world.resource::<SimRng>().clone(),
            clock: *world.resource::<CityClock>(),
            budget: world.resource::<Budget>().clone(),
            effects: *world.resource::<FundEffects>(),
            level: *world.resource::<GameLevel>(),
            valves: *world.resource::<Valves>(),
            census: world.resource::<Census>().clone(),
            disasters: *world.resource::<DisasterState>(),
            evaluation: world.resource::<CityEvaluation>().clone(),
            sprites: world.resource::<SpriteList>().sprites().to_vec(),
            city_center: (center.x, center.y),
            power: world.resource::<PowerGrid>().0.data().to_vec(),
            traffic: world.resource::<TrafficDensity>().0.data().to_vec(),
            pollution: pollution.map.data().to_vec(),
            pollution_average: pollution.average,
            pollution_max_at: pollution.max_at,
            terrain: world.resource::<TerrainDensity>().0.data().to_vec(),
            land_value: land_value.map.data().to_vec(),
            land_value_average: land_value.average,
            crime: crime.map.data().to_vec(),
            crime_average: crime.average,
            crime_max_at: crime.max_at,
            density: density.map.data().to_vec(),
            density_average: density.average,
            rate_of_growth: world.resource::<RateOfGrowth>().0.data().to_vec(),
            fire_station: world.resource::<FireStationMap>().0.data().to_vec(),
            fire_effect: world.resource::<FireStationEffect>().0.data().to_vec(),
            police_station: world.resource::<PoliceStationMap>().0.data().to_vec(),
            police_effect: world.resource::<PoliceStationEffect>().0.data().to_vec(),
            com_rate: world.resource::<ComRate>().0.data().to_vec(),
        }
    }

    /// Put the captured state back, resource by resource.
    pub fn restore(&self, world: &mut World) {
        world
            .resource_mut::<TileMap>()
            .restore(self.cells.clone(), self.map_serial);
        world.insert_resource(self.rng.clone());
        world.insert_resource(self.clock);
        world.insert_resource(self.budget.clone());
        world.insert_resource(self.effects);
        world.insert_resource(self.level);
        world.insert_resource(self.valves);
        world.insert_resource(self.census.clone());
        world.insert_resource(self.disasters);
        world.insert_resource(self.evaluation.clone());
        world
            .resource_mut::<SpriteList>()
            .restore(self.sprites.clone());
        world.insert_resource(CityCenter {
            x: self.city_center.0,
            y: self.city_center.1,
        });

        world
            .resource_mut::<PowerGrid>()
            .0
            .restore(self.power.clone());
        world
            .resource_mut::<TrafficDensity>()
            .0
            .restore(self.traffic.clone());
        {
            let mut pollution = world.resource_mut::<PollutionDensity>();
            pollution.map.restore(self.pollution.clone());
            pollution.average = self.pollution_average;
            pollution.max_at = self.pollution_max_at;
        }
        world
            .resource_mut::<TerrainDensity>()
            .0
            .restore(self.terrain.clone());
        {
            let mut land_value = world.resource_mut::<LandValue>();
            land_value.map.restore(self.land_value.clone());
            land_value.average = self.land_value_average;
        }
        {
            let mut crime = world.resource_mut::<CrimeRate>();
            crime.map.restore(self.crime.clone());
            crime.average = self.crime_average;
            crime.max_at = self.crime_max_at;
        }
        {
            let mut density = world.resource_mut::<PopulationDensity>();
            density.map.restore(self.density.clone());
            density.average = self.density_average;
        }
        world
            .resource_mut::<RateOfGrowth>()
            .0
            .restore(self.rate_of_growth.clone());
        world
            .resource_mut::<FireStationMap>()
            .0
            .restore(self.fire_station.clone());
        world
            .resource_mut::<FireStationEffect>()
            .0
            .restore(self.fire_effect.clone());
        world
            .resource_mut::<PoliceStationMap>()
            .0
            .restore(self.police_station.clone());
        world
            .resource_mut::<PoliceStationEffect>()
            .0
            .restore(self.police_effect.clone());
        world
            .resource_mut::<ComRate>()
            .0
            .restore(self.com_rate.clone());
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        bitcode::encode(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match bitcode::decode(bytes) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("CitySnapshot: failed to decode snapshot: {e}");
                None
            }
        }
    }
}
