//! Industrial zone evaluation. Density runs 0..=4; demand is almost purely
//! valve-driven — industry doesn't care about land value or pollution, only
//! about freight access and the external market.

use crate::map_scan::ScanContext;
use crate::rate_of_growth::inc_rate_of_growth;
use crate::tiles::{INDCLR, IZB};
use crate::traffic::make_traffic;

pub fn industrial_population(c: u16) -> u32 {
    if c < IZB {
        0
    } else {
        (c - IZB) as u32 / 9 + 1
    }
}

const IND_POP_CAP: u32 = 4;

pub fn do_industrial(ctx: &mut ScanContext, x: i32, y: i32, powered: bool) {
    let c = ctx.map.get(x, y).character();
    let pop = industrial_population(c);
    ctx.census.ind_pop += pop;
    ctx.census.ind_zones += 1;

    if ctx.city_time & 15 == 0 && crate::zones::repair_zone(ctx.map, x, y, INDCLR, 3) {
        ctx.changed = true;
    }

    let traffic = make_traffic(ctx.map, ctx.traffic, ctx.rng, x, y);
    if traffic < 0 {
        do_ind_out(ctx, x, y, pop);
        return;
    }

    let mut value = (ctx.valves.ind / 16) as i32 - traffic;
    if !powered {
        value = -500;
    }

    if value > 0 {
        do_ind_in(ctx, x, y, pop);
    } else if value < 0 {
        do_ind_out(ctx, x, y, pop);
    }
}

fn do_ind_in(ctx: &mut ScanContext, x: i32, y: i32, pop: u32) {
    if pop < IND_POP_CAP {
        ind_plop(ctx, x, y, pop as u16 + 1);
        inc_rate_of_growth(ctx.rate_of_growth, x, y, 1);
    }
}

fn do_ind_out(ctx: &mut ScanContext, x: i32, y: i32, pop: u32) {
    if pop == 0 {
        return;
    }
    ind_plop(ctx, x, y, pop as u16 - 1);
    inc_rate_of_growth(ctx.rate_of_growth, x, y, -1);
}

fn ind_plop(ctx: &mut ScanContext, x: i32, y: i32, level: u16) {
    let center = if level == 0 {
        INDCLR
    } else {
        IZB + 9 * (level - 1)
    };
    crate::zones::zone_plop(ctx.map, x, y, center);
    ctx.changed = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_bands() {
        assert_eq!(industrial_population(INDCLR), 0);
        assert_eq!(industrial_population(IZB), 1);
        assert_eq!(industrial_population(IZB + 9), 2);
        assert_eq!(industrial_population(IZB + 27), 4);
    }
}
