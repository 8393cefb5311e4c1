//! Crime overlay.
//!
//! Crime pressure grows with population density, is bought off by land
//! value, and collapses wherever police reach is strong.

use bevy::prelude::*;

use crate::density::PopulationDensity;
use crate::land_value::LandValue;
use crate::overlay::{smooth, OverlayMap};
use crate::services::PoliceStationEffect;

#[derive(Resource, Default, Clone)]
pub struct CrimeRate {
    pub map: OverlayMap<u8, 2>,
    pub average: u8,
    /// World coordinates of the worst block.
    pub max_at: (i32, i32),
}

pub fn crime_scan(
    crime: &mut CrimeRate,
    density: &PopulationDensity,
    land: &LandValue,
    police: &PoliceStationEffect,
) {
    let width = OverlayMap::<u8, 2>::WIDTH as i32;
    let height = OverlayMap::<u8, 2>::HEIGHT as i32;
    let mut temp = OverlayMap::<u8, 2>::default();

    for x in 0..width {
        for y in 0..height {
            let (wx, wy) = (x * 2, y * 2);
            let mut v = density.map.get(x, y) as i32 - land.map.get(x, y) as i32 / 4;
            let reach = police.0.world_get(wx, wy) as i32;
            v = v * (128 - reach.clamp(0, 127)) / 128;
            temp.set(x, y, v.clamp(0, 255) as u8);
        }
    }

    smooth(&temp, &mut crime.map);

    let mut total: u32 = 0;
    let mut best = 0u8;
    let mut best_at = (0i32, 0i32);
    for x in 0..width {
        for y in 0..height {
            let v = crime.map.get(x, y);
            total += v as u32;
            if v > best {
                best = v;
                best_at = (x * 2, y * 2);
            }
        }
    }
    crime.average = (total / (width * height) as u32) as u8;
    crime.max_at = best_at;
}
