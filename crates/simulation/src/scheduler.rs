//! The 16-phase rotor.
//!
//! Each `sim_frame` invocation advances exactly one phase, gated by the
//! selected speed. Phase 0 rolls the clock and census; phases 1..8 scan one
//! vertical eighth of the map each; phases 9..15 run the periodic overlays,
//! budget, and disaster roll. A phase runs to completion — external code
//! only ever observes the simulation between phases.

use bevy::ecs::system::SystemState;
use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::budget::{collect_tax, update_fund_effects, Budget, FundEffects, GameLevel};
use crate::census::Census;
use crate::config::{
    CENSUS_FREQUENCY_10, CENSUS_FREQUENCY_120, CITYTIMES_PER_MONTH, CITYTIMES_PER_YEAR,
    DEFAULT_STARTING_YEAR, TAX_FREQUENCY, WORLD_W,
};
use crate::crime::{crime_scan, CrimeRate};
use crate::density::{population_density_scan, CityCenter, PopulationDensity};
use crate::disasters::{random_disaster, DisasterState};
use crate::evaluation::{city_evaluation, CityEvaluation, EvaluationInputs};
use crate::land_value::{land_value_scan, LandValue};
use crate::map_scan::{map_scan, ScanContext};
use crate::messages::{send_periodic_messages, MessageLog};
use crate::pollution::{pollution_terrain_scan, PollutionDensity, TerrainDensity};
use crate::power::{power_scan, PowerGrid};
use crate::rate_of_growth::{dec_rate_of_growth, RateOfGrowth};
use crate::services::{
    compute_com_rate, fire_analysis, police_analysis, ComRate, FireStationEffect, FireStationMap,
    PoliceStationEffect, PoliceStationMap,
};
use crate::sim_rng::SimRng;
use crate::sprites::{tick_sprites, SpriteList};
use crate::tile_map::TileMap;
use crate::traffic::{dec_traffic, TrafficDensity};
use crate::zones::{set_valves, Valves};

// ---------------------------------------------------------------------------
// Speed and clock
// ---------------------------------------------------------------------------

/// Consumer-side throttle: how many schedule invocations each phase advance
/// waits for.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode,
)]
pub enum SimSpeed {
    Paused,
    Slow,
    Medium,
    #[default]
    Fast,
}

impl SimSpeed {
    fn runs_on(self, tick: u64) -> bool {
        match self {
            SimSpeed::Paused => false,
            SimSpeed::Slow => tick % 5 == 0,
            SimSpeed::Medium => tick % 3 == 0,
            SimSpeed::Fast => true,
        }
    }
}

#[derive(Resource, Clone, Copy, Debug, Encode, Decode)]
pub struct CityClock {
    /// Monotonic city time: 4 per month, 48 per year.
    pub city_time: u64,
    /// Which phase the next `sim_frame` will run.
    pub phase_cycle: u8,
    /// Incremented once per phase-0.
    pub sim_cycle: u64,
    pub starting_year: u64,
    pub speed: SimSpeed,
    /// Raw invocation counter driving the speed gate.
    pub(crate) tick_counter: u64,
}

impl Default for CityClock {
    fn default() -> Self {
        Self {
            city_time: 0,
            phase_cycle: 0,
            sim_cycle: 0,
            starting_year: DEFAULT_STARTING_YEAR,
            speed: SimSpeed::default(),
            tick_counter: 0,
        }
    }
}

impl CityClock {
    pub fn month(&self) -> u64 {
        (self.city_time / CITYTIMES_PER_MONTH) % 12
    }

    pub fn year(&self) -> u64 {
        self.starting_year + self.city_time / CITYTIMES_PER_YEAR
    }

    pub fn date_string(&self) -> String {
        const MONTHS: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        format!("{} {}", MONTHS[self.month() as usize], self.year())
    }
}

// ---------------------------------------------------------------------------
// The sim_frame system
// ---------------------------------------------------------------------------

/// All simulation resources, borrowed together for one phase.
pub type SimResources<'w> = (
    (
        ResMut<'w, TileMap>,
        ResMut<'w, SimRng>,
        ResMut<'w, Census>,
        ResMut<'w, CityClock>,
        ResMut<'w, Budget>,
    ),
    (
        ResMut<'w, TrafficDensity>,
        ResMut<'w, RateOfGrowth>,
        ResMut<'w, FireStationMap>,
        ResMut<'w, PoliceStationMap>,
        ResMut<'w, SpriteList>,
    ),
    (
        ResMut<'w, DisasterState>,
        ResMut<'w, MessageLog>,
        ResMut<'w, Valves>,
        ResMut<'w, FundEffects>,
        ResMut<'w, PowerGrid>,
    ),
    (
        ResMut<'w, PollutionDensity>,
        ResMut<'w, TerrainDensity>,
        ResMut<'w, LandValue>,
        ResMut<'w, CrimeRate>,
        ResMut<'w, PopulationDensity>,
    ),
    (
        ResMut<'w, CityCenter>,
        ResMut<'w, FireStationEffect>,
        ResMut<'w, PoliceStationEffect>,
        ResMut<'w, ComRate>,
        ResMut<'w, CityEvaluation>,
    ),
    Res<'w, GameLevel>,
);

/// Advance the simulation by one phase.
pub fn sim_frame(world: &mut World, state: &mut SystemState<SimResources<'static>>) {
    let (
        (mut map, mut rng, mut census, mut clock, mut budget),
        (mut traffic, mut rate_of_growth, mut fire_station, mut police_station, mut sprites),
        (mut disasters, mut messages, mut valves, mut effects, mut power),
        (mut pollution, mut terrain, mut land_value, mut crime, mut density),
        (mut center, mut fire_effect, mut police_effect, mut com_rate, mut evaluation),
        level,
    ) = state.get_mut(world);

    clock.tick_counter += 1;
    if !clock.speed.runs_on(clock.tick_counter) {
        return;
    }

    let phase = clock.phase_cycle;
    match phase {
        0 => {
            clock.sim_cycle += 1;
            clock.city_time += 1;
            budget.tax_average_acc += budget.city_tax as u64;

            census.roll_over();
            if clock.sim_cycle % 2 == 0 {
                set_valves(&mut valves, &census.totals, budget.city_tax);
            }
            fire_station.0.clear();
            police_station.0.clear();

            if disasters.flood_count > 0 {
                disasters.flood_count -= 1;
            }

            tick_sprites(&mut sprites, &mut map, &mut rng);
            update_fund_effects(&budget, &mut effects);
        }
        1..=8 => {
            let slice = WORLD_W as i32 / 8;
            let x1 = (phase as i32 - 1) * slice;
            let mut ctx = ScanContext {
                map: &mut map,
                rng: &mut rng,
                census: &mut census.working,
                power: &power,
                valves: &valves,
                traffic: &mut traffic,
                land_value: &land_value,
                pollution: &pollution,
                crime: &crime,
                rate_of_growth: &mut rate_of_growth,
                fire_station: &mut fire_station,
                police_station: &mut police_station,
                fire_effect: &fire_effect,
                com_rate: &com_rate,
                effects: &effects,
                sprites: &mut sprites,
                disasters: &mut disasters,
                messages: &mut messages,
                city_time: clock.city_time,
                changed: false,
            };
            map_scan(&mut ctx, x1, x1 + slice);
        }
        9 => {
            if clock.city_time % CENSUS_FREQUENCY_10 == 0 {
                census.take_10(crime.average, pollution.average, budget.cash_flow);
            }
            if clock.city_time % CENSUS_FREQUENCY_120 == 0 {
                census.take_120();
            }
            if clock.city_time % TAX_FREQUENCY == 0 {
                collect_tax(&mut budget, &census.totals, land_value.average, *level);
                city_evaluation(
                    &mut evaluation,
                    &census.totals,
                    &budget,
                    EvaluationInputs {
                        crime_average: crime.average,
                        pollution_average: pollution.average,
                        traffic_average: traffic_average(&traffic),
                    },
                );
                if !budget.auto_budget {
                    messages.push("The budget is ready for review.", clock.city_time);
                }
            }
        }
        10 => {
            if clock.sim_cycle % 5 == 0 {
                dec_rate_of_growth(&mut rate_of_growth);
            }
            dec_traffic(&mut traffic);
            send_periodic_messages(
                &mut messages,
                &census.totals,
                &valves,
                &budget,
                &effects,
                pollution.average,
                crime.average,
                clock.city_time,
            );
        }
        11 => {
            if clock.sim_cycle % 9 == 0 {
                power_scan(&map, &mut power);
            }
        }
        12 => {
            if clock.sim_cycle % 17 == 0 {
                pollution_terrain_scan(&map, &traffic, &mut pollution, &mut terrain);
                land_value_scan(&mut land_value, &center, &pollution, &crime, &terrain);
            }
        }
        13 => {
            if clock.sim_cycle % 19 == 0 {
                crime_scan(&mut crime, &density, &land_value, &police_effect);
            }
        }
        14 => {
            if clock.sim_cycle % 19 == 0 {
                population_density_scan(&map, &mut rng, &mut density, &mut center);
            }
        }
        _ => {
            if clock.sim_cycle % 21 == 0 {
                fire_analysis(&mut fire_station, &mut fire_effect);
                police_analysis(&mut police_station, &mut police_effect);
                compute_com_rate(&mut com_rate, &center);
            }
            random_disaster(
                &mut map,
                &mut rng,
                &mut sprites,
                &mut disasters,
                &pollution,
                &mut messages,
                *level,
                clock.city_time,
            );
        }
    }

    clock.phase_cycle = (phase + 1) & 15;
}

/// Mean traffic density over the overlay, for the evaluation pass.
fn traffic_average(traffic: &TrafficDensity) -> u8 {
    let data = traffic.0.data();
    let total: u32 = data.iter().map(|&v| v as u32).sum();
    (total / data.len() as u32) as u8
}
