//! Yearly city evaluation: population class, approval score, and the
//! problem table.

use bevy::prelude::*;
use bitcode::{Decode, Encode};

use crate::budget::Budget;
use crate::census::CensusCounts;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Encode, Decode)]
pub enum CityClass {
    #[default]
    Village,
    Town,
    City,
    Capital,
    Metropolis,
    Megalopolis,
}

impl CityClass {
    pub fn from_population(pop: u32) -> Self {
        match pop {
            0..=1_999 => CityClass::Village,
            2_000..=9_999 => CityClass::Town,
            10_000..=49_999 => CityClass::City,
            50_000..=99_999 => CityClass::Capital,
            100_000..=499_999 => CityClass::Metropolis,
            _ => CityClass::Megalopolis,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CityClass::Village => "Village",
            CityClass::Town => "Town",
            CityClass::City => "City",
            CityClass::Capital => "Capital",
            CityClass::Metropolis => "Metropolis",
            CityClass::Megalopolis => "Megalopolis",
        }
    }
}

/// The civic complaints tabulated alongside the score, worst first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode)]
pub enum Problem {
    Crime,
    Pollution,
    Taxes,
    Traffic,
    Unemployment,
    Fire,
}

#[derive(Resource, Clone, Debug, Default, Encode, Decode)]
pub struct CityEvaluation {
    pub city_pop: u32,
    pub delta_pop: i64,
    pub class: CityClass,
    /// Approval in [0, 1000].
    pub score: i32,
    /// The four worst problems by severity, worst first.
    pub problems: Vec<(Problem, u32)>,
}

/// Inputs gathered from the overlays for one evaluation pass.
#[derive(Clone, Copy, Debug, Default)]
pub struct EvaluationInputs {
    pub crime_average: u8,
    pub pollution_average: u8,
    pub traffic_average: u8,
}

pub fn city_evaluation(
    eval: &mut CityEvaluation,
    census: &CensusCounts,
    budget: &Budget,
    inputs: EvaluationInputs,
) {
    let city_pop = census.city_population();
    eval.delta_pop = city_pop as i64 - eval.city_pop as i64;
    eval.city_pop = city_pop;
    eval.class = CityClass::from_population(city_pop);

    let unemployment = unemployment_ratio(census);
    let unpowered = unpowered_ratio(census);
    let growth = if eval.city_pop > 0 {
        (eval.delta_pop * 100 / eval.city_pop as i64).clamp(-100, 100)
    } else {
        0
    };

    let tax_penalty = if budget.city_tax > 10 {
        (budget.city_tax as i32 - 10) * 5
    } else {
        0
    };

    let mut score = 500 + growth as i32;
    score -= inputs.crime_average as i32 / 5;
    score -= inputs.pollution_average as i32 / 5;
    score -= (unemployment * 100.0) as i32;
    score -= tax_penalty;
    score -= (unpowered * 100.0) as i32;
    score -= inputs.traffic_average as i32 / 4;
    eval.score = score.clamp(0, 1000);

    eval.problems = tabulate_problems(census, budget, inputs, unemployment);
}

fn unemployment_ratio(census: &CensusCounts) -> f32 {
    let households = census.res_pop as f32 / 8.0;
    if households == 0.0 {
        return 0.0;
    }
    let jobs = (census.com_pop + census.ind_pop) as f32 * 8.0;
    (1.0 - (jobs / households).min(1.0)).clamp(0.0, 1.0)
}

fn unpowered_ratio(census: &CensusCounts) -> f32 {
    let total = census.total_zones();
    if total == 0 {
        0.0
    } else {
        census.unpowered_zones as f32 / total as f32
    }
}

fn tabulate_problems(
    census: &CensusCounts,
    budget: &Budget,
    inputs: EvaluationInputs,
    unemployment: f32,
) -> Vec<(Problem, u32)> {
    let mut votes = vec![
        (Problem::Crime, inputs.crime_average as u32),
        (Problem::Pollution, inputs.pollution_average as u32),
        (
            Problem::Taxes,
            if budget.city_tax > 10 {
                (budget.city_tax - 10) * 10
            } else {
                0
            },
        ),
        (Problem::Traffic, inputs.traffic_average as u32),
        (Problem::Unemployment, (unemployment * 255.0) as u32),
        (Problem::Fire, census.fire_pop.min(255) * 8),
    ];
    votes.sort_by(|a, b| b.1.cmp(&a.1));
    votes.truncate(4);
    votes
}
