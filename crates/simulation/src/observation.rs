//! Compact, typed, serializable snapshot of the public city state.
//!
//! This is the read-only surface the renderer, HUD, and any scripting layer
//! consume between phases; everything here is plain data, serializable to
//! JSON for logging or remote observation.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::budget::{Budget, FundEffects};
use crate::census::Census;
use crate::evaluation::CityEvaluation;
use crate::scheduler::CityClock;
use crate::tile_map::TileMap;
use crate::zones::Valves;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CityObservation {
    // -- Time ---------------------------------------------------------------
    pub city_time: u64,
    pub month: u64,
    pub year: u64,
    pub date: String,

    // -- Map ----------------------------------------------------------------
    pub map_serial: u64,

    // -- Money --------------------------------------------------------------
    pub budget: BudgetSnapshot,

    // -- People -------------------------------------------------------------
    pub population: u32,
    pub res_pop: u32,
    pub com_pop: u32,
    pub ind_pop: u32,

    // -- Mood ---------------------------------------------------------------
    pub city_score: i32,
    pub city_class: String,
    /// Demand gauges in [-1, 1].
    pub demand: (f32, f32, f32),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BudgetSnapshot {
    pub total_funds: i64,
    pub city_tax: u32,
    pub cash_flow: i64,
    pub tax_fund: i64,
    pub road_fund: i64,
    pub road_spend: i64,
    pub fire_fund: i64,
    pub fire_spend: i64,
    pub police_fund: i64,
    pub police_spend: i64,
    pub road_effect: i32,
    pub fire_effect: i32,
    pub police_effect: i32,
}

/// Build one observation from the current resources.
pub fn observe(world: &World) -> CityObservation {
    let clock = world.resource::<CityClock>();
    let map = world.resource::<TileMap>();
    let budget = world.resource::<Budget>();
    let effects = world.resource::<FundEffects>();
    let census = world.resource::<Census>();
    let valves = world.resource::<Valves>();
    let eval = world.resource::<CityEvaluation>();

    CityObservation {
        city_time: clock.city_time,
        month: clock.month(),
        year: clock.year(),
        date: clock.date_string(),
        map_serial: map.serial(),
        budget: BudgetSnapshot {
            total_funds: budget.total_funds,
            city_tax: budget.city_tax,
            cash_flow: budget.cash_flow,
            tax_fund: budget.tax_fund,
            road_fund: budget.road_fund,
            road_spend: budget.road_spend,
            fire_fund: budget.fire_fund,
            fire_spend: budget.fire_spend,
            police_fund: budget.police_fund,
            police_spend: budget.police_spend,
            road_effect: effects.road,
            fire_effect: effects.fire,
            police_effect: effects.police,
        },
        population: census.totals.city_population(),
        res_pop: census.totals.res_pop,
        com_pop: census.totals.com_pop,
        ind_pop: census.totals.ind_pop,
        city_score: eval.score,
        city_class: eval.class.name().to_string(),
        demand: valves.normalized(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_serializes_to_json() {
        let obs = CityObservation {
            city_time: 96,
            year: 1902,
            date: "Jan 1902".into(),
            city_class: "Village".into(),
            ..Default::default()
        };
        let json = serde_json::to_string(&obs).unwrap();
        assert!(json.contains("\"year\":1902"));
        let back: CityObservation = serde_json::from_str(&json).unwrap();
        assert_eq!(back.city_time, 96);
        assert_eq!(back.city_class, "Village");
    }
}
