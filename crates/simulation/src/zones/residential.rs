//! Residential zone evaluation.
//!
//! Centers encode density: FREEZ is empty, the house band (HOUSE..RZB)
//! holds the first settlers, and from RZB upward each bank of nine
//! characters is another eight heads of population.

use crate::map_scan::ScanContext;
use crate::rate_of_growth::inc_rate_of_growth;
use crate::sim_rng::SimRng;
use crate::tiles::{FREEZ, HOUSE, RZB};
use crate::traffic::make_traffic;

/// Population encoded by a residential center character. Centers between
/// FREEZ and HOUSE count a fresh random handful of settlers; the plop
/// tables never write those characters, but the band keeps its draw.
pub fn residential_population(rng: &mut SimRng, c: u16) -> u32 {
    if c <= FREEZ {
        0
    } else if c < HOUSE {
        rng.range(7) as u32
    } else if c < RZB {
        (c - HOUSE) as u32 * 2
    } else {
        ((c - RZB) as u32 / 9) * 8 + 16
    }
}

/// A zone stops taking newcomers at this population.
const RES_POP_CAP: u32 = 40;

/// Density level 0..=8 encoded by a center character.
fn level_of(c: u16) -> u16 {
    if c >= RZB {
        4 + (c - RZB) / 9
    } else if c >= HOUSE {
        (c - HOUSE + 1).min(3)
    } else {
        0
    }
}

const MAX_LEVEL: u16 = 8;

pub fn do_residential(ctx: &mut ScanContext, x: i32, y: i32, powered: bool) {
    let c = ctx.map.get(x, y).character();
    let pop = residential_population(ctx.rng, c);
    ctx.census.res_pop += pop;
    ctx.census.res_zones += 1;

    if ctx.city_time & 7 == 0 && crate::zones::repair_zone(ctx.map, x, y, FREEZ, 3) {
        ctx.changed = true;
    }

    let traffic = make_traffic(ctx.map, ctx.traffic, ctx.rng, x, y);
    if traffic < 0 {
        do_res_out(ctx, x, y, c);
        return;
    }

    let mut value = ctx.land_value.map.world_get(x, y) as i32
        - ctx.pollution.map.world_get(x, y) as i32;
    if ctx.crime.map.world_get(x, y) > 190 {
        value -= 50;
    }
    value += (ctx.valves.res / 16) as i32;
    value -= traffic;
    if !powered {
        value = -500;
    }

    if value > 0 {
        do_res_in(ctx, x, y, c, pop);
    } else if value < 0 {
        do_res_out(ctx, x, y, c);
    }
}

fn do_res_in(ctx: &mut ScanContext, x: i32, y: i32, c: u16, pop: u32) {
    if pop < RES_POP_CAP {
        res_plop(ctx, x, y, (level_of(c) + 1).min(MAX_LEVEL));
    }
    inc_rate_of_growth(ctx.rate_of_growth, x, y, 1);
}

fn do_res_out(ctx: &mut ScanContext, x: i32, y: i32, c: u16) {
    let level = level_of(c);
    if level == 0 {
        return;
    }
    // The house band collapses straight back to an empty lot.
    res_plop(ctx, x, y, if level <= 3 { 0 } else { level - 1 });
    inc_rate_of_growth(ctx.rate_of_growth, x, y, -1);
}

/// Rewrite the zone at the given density level.
fn res_plop(ctx: &mut ScanContext, x: i32, y: i32, level: u16) {
    let center = match level {
        0 => FREEZ,
        1..=3 => HOUSE + ctx.rng.range(3),
        _ => RZB + 9 * (level - 4),
    };
    crate::zones::zone_plop(ctx.map, x, y, center);
    ctx.changed = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_bands() {
        let mut rng = SimRng::from_seed(1);
        assert_eq!(residential_population(&mut rng, FREEZ), 0);
        assert_eq!(residential_population(&mut rng, HOUSE), 0);
        assert_eq!(residential_population(&mut rng, HOUSE + 3), 6);
        assert_eq!(residential_population(&mut rng, RZB), 16);
        assert_eq!(residential_population(&mut rng, RZB + 9), 24);
        assert_eq!(residential_population(&mut rng, RZB + 27), 40);
    }

    #[test]
    fn test_sub_house_band_is_a_random_handful() {
        let mut rng = SimRng::from_seed(1);
        for _ in 0..50 {
            assert!(residential_population(&mut rng, FREEZ + 2) <= 7);
        }
    }

    #[test]
    fn test_levels_invert_plop_targets() {
        assert_eq!(level_of(FREEZ), 0);
        assert_eq!(level_of(HOUSE), 1);
        assert_eq!(level_of(HOUSE + 3), 3);
        assert_eq!(level_of(RZB), 4);
        assert_eq!(level_of(RZB + 9), 5);
        assert_eq!(level_of(RZB + 9 * 4), 8);
    }
}
