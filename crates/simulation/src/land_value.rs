//! Land value overlay.
//!
//! Value radiates from the city center and is paid down by pollution and
//! crime, with a premium for nearby greenery and water.

use bevy::prelude::*;

use crate::crime::CrimeRate;
use crate::density::CityCenter;
use crate::overlay::OverlayMap;
use crate::pollution::{PollutionDensity, TerrainDensity};

#[derive(Resource, Default, Clone)]
pub struct LandValue {
    pub map: OverlayMap<u8, 2>,
    pub average: u8,
}

pub fn land_value_scan(
    land: &mut LandValue,
    center: &CityCenter,
    pollution: &PollutionDensity,
    crime: &CrimeRate,
    terrain: &TerrainDensity,
) {
    let width = OverlayMap::<u8, 2>::WIDTH as i32;
    let height = OverlayMap::<u8, 2>::HEIGHT as i32;

    let mut total: u32 = 0;
    let mut counted: u32 = 0;

    for x in 0..width {
        for y in 0..height {
            // Sample at the block's second world cell so every block reads
            // its own overlay values, not a neighbor's.
            let (wx, wy) = (x * 2 + 1, y * 2 + 1);

            let mut value: i32 = 150;
            value -= center.manhattan_to(wx, wy) / 2;
            value -= pollution.map.world_get(wx, wy) as i32;
            value -= crime.map.world_get(wx, wy) as i32 / 2;
            value += terrain.0.world_get(wx, wy) as i32 * 2;
            let value = value.clamp(0, 255) as u8;

            land.map.set(x, y, value);
            if value > 0 {
                total += value as u32;
                counted += 1;
            }
        }
    }

    land.average = if counted > 0 {
        (total / counted) as u8
    } else {
        0
    };
}
