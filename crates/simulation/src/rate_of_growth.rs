//! Rate-of-growth overlay: a signed record of recent zone growth and
//! decline per 8-block, decaying toward zero.

use bevy::prelude::*;

use crate::overlay::OverlayMap;

pub const ROG_RANGE: i16 = 200;

#[derive(Resource, Default, Clone)]
pub struct RateOfGrowth(pub OverlayMap<i16, 8>);

/// Record one growth (+1) or decline (-1) event at a world position.
pub fn inc_rate_of_growth(rog: &mut RateOfGrowth, x: i32, y: i32, direction: i16) {
    let cur = rog.0.world_get(x, y);
    rog.0
        .world_set(x, y, (cur + direction * 4).clamp(-ROG_RANGE, ROG_RANGE));
}

/// Decay every cell one step toward zero. Runs every fifth cycle.
pub fn dec_rate_of_growth(rog: &mut RateOfGrowth) {
    for v in rog.0.data_mut() {
        *v -= v.signum();
    }
}
