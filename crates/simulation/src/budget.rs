//! Tax collection and service funding.
//!
//! Once per game year the tax take is computed from population and land
//! value, and the road/police/fire budgets are paid — in full when the
//! treasury covers them, otherwise scaled down proportionally. The resulting
//! spend/fund ratios become the effect factors the scans read.

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::census::CensusCounts;
use crate::config::{
    DEFAULT_CITY_TAX, MAX_CITY_TAX, MAX_FIRE_EFFECT, MAX_POLICE_EFFECT, MAX_ROAD_EFFECT,
    TAX_FREQUENCY,
};

// ---------------------------------------------------------------------------
// Game level
// ---------------------------------------------------------------------------

#[derive(
    Resource, Clone, Copy, Debug, Default, PartialEq, Eq, Encode, Decode, Serialize, Deserialize,
)]
pub enum GameLevel {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl GameLevel {
    pub fn starting_funds(self) -> i64 {
        match self {
            GameLevel::Easy => 20_000,
            GameLevel::Medium => 10_000,
            GameLevel::Hard => 5_000,
        }
    }

    /// Road/rail upkeep scale, in percent.
    pub fn maintenance_percent(self) -> i64 {
        match self {
            GameLevel::Easy => 70,
            GameLevel::Medium => 90,
            GameLevel::Hard => 120,
        }
    }

    /// One random disaster per this many phase-15 rolls, on average.
    pub fn disaster_odds(self) -> u16 {
        match self {
            GameLevel::Easy => 480,
            GameLevel::Medium => 240,
            GameLevel::Hard => 60,
        }
    }
}

// ---------------------------------------------------------------------------
// Budget
// ---------------------------------------------------------------------------

#[derive(Resource, Clone, Debug, Encode, Decode)]
pub struct Budget {
    /// May go negative through shortfalls; tool spending is gated up front.
    pub total_funds: i64,
    pub city_tax: u32,
    /// Sum of the tax rate over the collection window, averaged at collect.
    pub tax_average_acc: u64,
    pub auto_budget: bool,

    // Latest collection results.
    pub tax_fund: i64,
    pub road_fund: i64,
    pub police_fund: i64,
    pub fire_fund: i64,
    pub road_spend: i64,
    pub police_spend: i64,
    pub fire_spend: i64,
    pub cash_flow: i64,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            total_funds: GameLevel::Easy.starting_funds(),
            city_tax: DEFAULT_CITY_TAX,
            tax_average_acc: 0,
            auto_budget: true,
            tax_fund: 0,
            road_fund: 0,
            police_fund: 0,
            fire_fund: 0,
            road_spend: 0,
            police_spend: 0,
            fire_spend: 0,
            cash_flow: 0,
        }
    }
}

impl Budget {
    pub fn set_city_tax(&mut self, tax: u32) {
        self.city_tax = tax.min(MAX_CITY_TAX);
    }

    pub fn can_afford(&self, cost: i64) -> bool {
        cost <= self.total_funds
    }

    pub fn spend(&mut self, cost: i64) {
        self.total_funds -= cost;
    }
}

/// Funding ratios scaled into their effect ranges, refreshed every cycle.
#[derive(Resource, Clone, Copy, Debug, Encode, Decode)]
pub struct FundEffects {
    pub road: i32,
    pub police: i32,
    pub fire: i32,
}

impl Default for FundEffects {
    fn default() -> Self {
        Self {
            road: MAX_ROAD_EFFECT,
            police: MAX_POLICE_EFFECT,
            fire: MAX_FIRE_EFFECT,
        }
    }
}

/// Yearly tax collection.
pub fn collect_tax(
    budget: &mut Budget,
    census: &CensusCounts,
    land_value_average: u8,
    level: GameLevel,
) {
    let population = census.population() as i64;
    let tax_average = budget.tax_average_acc / TAX_FREQUENCY;
    budget.tax_average_acc = 0;

    budget.tax_fund =
        population * land_value_average as i64 / 120 * tax_average as i64 / 100;
    budget.road_fund = (census.road_total as i64 + census.rail_total as i64 * 2)
        * level.maintenance_percent()
        / 100;
    budget.police_fund = census.police_station_pop as i64 * 100;
    budget.fire_fund = census.fire_station_pop as i64 * 100;

    let wanted = budget.road_fund + budget.police_fund + budget.fire_fund;
    let available = budget.total_funds + budget.tax_fund;

    if available >= wanted || wanted == 0 {
        budget.road_spend = budget.road_fund;
        budget.police_spend = budget.police_fund;
        budget.fire_spend = budget.fire_fund;
    } else {
        // Shortfall: each service gets its proportional share of what's left.
        let pot = available.max(0);
        budget.road_spend = budget.road_fund * pot / wanted;
        budget.police_spend = budget.police_fund * pot / wanted;
        budget.fire_spend = budget.fire_fund * pot / wanted;
    }

    budget.cash_flow =
        budget.tax_fund - budget.road_spend - budget.police_spend - budget.fire_spend;
    budget.total_funds += budget.cash_flow;
}

/// Refresh the effect factors from the latest spend/fund ratios. A zero fund
/// means nothing needed funding, which counts as fully funded.
pub fn update_fund_effects(budget: &Budget, effects: &mut FundEffects) {
    effects.road = scaled_effect(budget.road_spend, budget.road_fund, MAX_ROAD_EFFECT);
    effects.police = scaled_effect(budget.police_spend, budget.police_fund, MAX_POLICE_EFFECT);
    effects.fire = scaled_effect(budget.fire_spend, budget.fire_fund, MAX_FIRE_EFFECT);
}

fn scaled_effect(spend: i64, fund: i64, max: i32) -> i32 {
    if fund == 0 {
        max
    } else {
        (spend * max as i64 / fund).clamp(0, max as i64) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn census_with(road: u32, rail: u32, police: u32, fire: u32) -> CensusCounts {
        CensusCounts {
            road_total: road,
            rail_total: rail,
            police_station_pop: police,
            fire_station_pop: fire,
            ..Default::default()
        }
    }

    #[test]
    fn test_tax_fund_formula() {
        let mut budget = Budget {
            tax_average_acc: 10 * TAX_FREQUENCY,
            ..Default::default()
        };
        let census = CensusCounts {
            res_pop: 960, // population 120
            ..Default::default()
        };
        collect_tax(&mut budget, &census, 120, GameLevel::Easy);
        // 120 * 120 / 120 * 10 / 100 = 12
        assert_eq!(budget.tax_fund, 12);
        assert_eq!(budget.cash_flow, 12);
    }

    #[test]
    fn test_full_funding_when_affordable() {
        let mut budget = Budget {
            tax_average_acc: 7 * TAX_FREQUENCY,
            ..Default::default()
        };
        let census = census_with(100, 0, 9, 9);
        collect_tax(&mut budget, &census, 0, GameLevel::Easy);
        assert_eq!(budget.road_spend, budget.road_fund);
        assert_eq!(budget.police_spend, 900);
        assert_eq!(budget.fire_spend, 900);
    }

    #[test]
    fn test_shortfall_scales_proportionally() {
        let mut budget = Budget {
            total_funds: 500,
            tax_average_acc: 0,
            ..Default::default()
        };
        let census = census_with(0, 0, 9, 9); // wants 900 + 900
        collect_tax(&mut budget, &census, 0, GameLevel::Easy);
        assert_eq!(budget.police_spend, 250);
        assert_eq!(budget.fire_spend, 250);
        assert_eq!(budget.total_funds, 0);
    }

    #[test]
    fn test_funds_change_equals_cash_flow() {
        let mut budget = Budget {
            total_funds: 3000,
            tax_average_acc: 12 * TAX_FREQUENCY,
            ..Default::default()
        };
        let census = CensusCounts {
            res_pop: 1600,
            road_total: 40,
            ..Default::default()
        };
        let before = budget.total_funds;
        collect_tax(&mut budget, &census, 100, GameLevel::Medium);
        assert_eq!(budget.total_funds - before, budget.cash_flow);
    }

    #[test]
    fn test_effects_default_to_max_on_zero_fund() {
        let budget = Budget::default();
        let mut effects = FundEffects {
            road: 0,
            police: 0,
            fire: 0,
        };
        update_fund_effects(&budget, &mut effects);
        assert_eq!(effects.road, MAX_ROAD_EFFECT);
        assert_eq!(effects.police, MAX_POLICE_EFFECT);
        assert_eq!(effects.fire, MAX_FIRE_EFFECT);
    }

    #[test]
    fn test_effects_scale_with_spend() {
        let budget = Budget {
            road_fund: 100,
            road_spend: 50,
            police_fund: 1000,
            police_spend: 250,
            fire_fund: 1000,
            fire_spend: 1000,
            ..Default::default()
        };
        let mut effects = FundEffects::default();
        update_fund_effects(&budget, &mut effects);
        assert_eq!(effects.road, MAX_ROAD_EFFECT / 2);
        assert_eq!(effects.police, MAX_POLICE_EFFECT / 4);
        assert_eq!(effects.fire, MAX_FIRE_EFFECT);
    }

    #[test]
    fn test_starting_funds_by_level() {
        assert_eq!(GameLevel::Easy.starting_funds(), 20_000);
        assert_eq!(GameLevel::Medium.starting_funds(), 10_000);
        assert_eq!(GameLevel::Hard.starting_funds(), 5_000);
    }
}
