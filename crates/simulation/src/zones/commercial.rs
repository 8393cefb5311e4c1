//! Commercial zone evaluation. Density runs 0..=5; each level is one bank
//! of nine characters above CZB.

use crate::map_scan::ScanContext;
use crate::rate_of_growth::inc_rate_of_growth;
use crate::tiles::{COMCLR, CZB};
use crate::traffic::make_traffic;

pub fn commercial_population(c: u16) -> u32 {
    if c < CZB {
        0
    } else {
        (c - CZB) as u32 / 9 + 1
    }
}

const COM_POP_CAP: u32 = 5;

pub fn do_commercial(ctx: &mut ScanContext, x: i32, y: i32, powered: bool) {
    let c = ctx.map.get(x, y).character();
    let pop = commercial_population(c);
    ctx.census.com_pop += pop;
    ctx.census.com_zones += 1;

    if ctx.city_time & 15 == 0 && crate::zones::repair_zone(ctx.map, x, y, COMCLR, 3) {
        ctx.changed = true;
    }

    let traffic = make_traffic(ctx.map, ctx.traffic, ctx.rng, x, y);
    if traffic < 0 {
        do_com_out(ctx, x, y, pop);
        return;
    }

    let mut value = ctx.com_rate.0.world_get(x, y) as i32
        + ctx.land_value.map.world_get(x, y) as i32
        - ctx.pollution.map.world_get(x, y) as i32;
    value += (ctx.valves.com / 16) as i32;
    value -= traffic;
    if !powered {
        value = -500;
    }

    if value > 0 {
        do_com_in(ctx, x, y, pop);
    } else if value < 0 {
        do_com_out(ctx, x, y, pop);
    }
}

fn do_com_in(ctx: &mut ScanContext, x: i32, y: i32, pop: u32) {
    if pop < COM_POP_CAP {
        com_plop(ctx, x, y, pop as u16 + 1);
        inc_rate_of_growth(ctx.rate_of_growth, x, y, 1);
    }
}

fn do_com_out(ctx: &mut ScanContext, x: i32, y: i32, pop: u32) {
    if pop == 0 {
        return;
    }
    com_plop(ctx, x, y, pop as u16 - 1);
    inc_rate_of_growth(ctx.rate_of_growth, x, y, -1);
}

fn com_plop(ctx: &mut ScanContext, x: i32, y: i32, level: u16) {
    let center = if level == 0 {
        COMCLR
    } else {
        CZB + 9 * (level - 1)
    };
    crate::zones::zone_plop(ctx.map, x, y, center);
    ctx.changed = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_bands() {
        assert_eq!(commercial_population(COMCLR), 0);
        assert_eq!(commercial_population(CZB), 1);
        assert_eq!(commercial_population(CZB + 8), 1);
        assert_eq!(commercial_population(CZB + 9), 2);
        assert_eq!(commercial_population(CZB + 36), 5);
    }
}
