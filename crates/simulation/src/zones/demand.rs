//! Demand valves.
//!
//! Three signed integrators drive growth pressure per zone type. Every other
//! sim cycle they are nudged by the projected-vs-actual population balance
//! and the tax rate, then clamped to their ranges.

use bevy::prelude::*;
use bitcode::{Decode, Encode};

use crate::census::CensusCounts;
use crate::config::EXTERNAL_MARKET;

pub const RES_VALVE_RANGE: i16 = 2000;
pub const COM_VALVE_RANGE: i16 = 1500;
pub const IND_VALVE_RANGE: i16 = 1500;

/// Demand push/drag per tax point. Index is the tax rate 0..=20.
const TAX_TABLE: [i16; 21] = [
    200, 150, 120, 100, 80, 50, 30, 0, -10, -40, -100, -150, -200, -250, -300, -350, -400, -450,
    -500, -550, -600,
];

#[derive(Resource, Clone, Copy, Debug, Default, Encode, Decode)]
pub struct Valves {
    pub res: i16,
    pub com: i16,
    pub ind: i16,
}

impl Valves {
    /// Demand signals normalized to [-1, 1] for gauges.
    pub fn normalized(&self) -> (f32, f32, f32) {
        (
            (self.res as f32 / RES_VALVE_RANGE as f32).clamp(-1.0, 1.0),
            (self.com as f32 / COM_VALVE_RANGE as f32).clamp(-1.0, 1.0),
            (self.ind as f32 / IND_VALVE_RANGE as f32).clamp(-1.0, 1.0),
        )
    }
}

/// Recompute the valves from the last completed census.
pub fn set_valves(valves: &mut Valves, census: &CensusCounts, city_tax: u32) {
    let norm_res = census.res_pop as f32 / 8.0;
    let com = census.com_pop as f32;
    let ind = census.ind_pop as f32;
    let jobs = com + ind;

    // A brand-new city has nothing to balance against; prime residential
    // demand so settlers arrive, with a mild pull on the job zones.
    if norm_res == 0.0 && jobs == 0.0 {
        bump(&mut valves.res, 300, RES_VALVE_RANGE);
        bump(&mut valves.com, 100, COM_VALVE_RANGE);
        bump(&mut valves.ind, 100, IND_VALVE_RANGE);
        return;
    }

    // Jobs per household, 1.0 when balanced. A hamlet with no job zones yet
    // commutes out of town; a real city without jobs bleeds residents.
    let employment = if jobs > 0.0 {
        (jobs / norm_res.max(1.0)).min(2.0)
    } else if norm_res <= 8.0 {
        1.0
    } else {
        0.3
    };
    let migration = norm_res * (employment - 1.0);
    let births = norm_res * 0.02;
    let projected_res = norm_res + migration + births;

    // Household spending supports commerce; outside demand props industry.
    let labor_base = if jobs > 0.0 {
        (norm_res / jobs).clamp(0.0, 1.3)
    } else {
        1.0
    };
    let internal_market = (norm_res + jobs) / 3.7;
    let projected_com = internal_market * labor_base;
    let projected_ind = (ind + 2.0) * labor_base * (EXTERNAL_MARKET / 4.0);

    let tax_term = TAX_TABLE[(city_tax as usize).min(TAX_TABLE.len() - 1)];

    let res_push = ratio_push(projected_res, norm_res) + tax_term;
    let com_push = ratio_push(projected_com, com) + tax_term;
    let ind_push = ratio_push(projected_ind, ind) + tax_term;

    bump(&mut valves.res, res_push, RES_VALVE_RANGE);
    bump(&mut valves.com, com_push, COM_VALVE_RANGE);
    bump(&mut valves.ind, ind_push, IND_VALVE_RANGE);
}

/// `(projected / actual - 1) * 600`, with the ratio clamped to [0, 2].
fn ratio_push(projected: f32, actual: f32) -> i16 {
    let ratio = (projected / actual.max(1.0)).clamp(0.0, 2.0);
    ((ratio - 1.0) * 600.0) as i16
}

fn bump(valve: &mut i16, delta: i16, range: i16) {
    *valve = (*valve + delta).clamp(-range, range);
}
