//! The per-cell map scan.
//!
//! Phases 1..8 each walk one vertical eighth of the map, dispatching every
//! interesting cell: fires spread and burn out, floods creep and recede,
//! roads decay under poor funding, rails spawn the odd train, radioactive
//! soil slowly cools, and zone centers run their processors.

use crate::budget::FundEffects;
use crate::census::CensusCounts;
use crate::config::WORLD_H;
use crate::crime::CrimeRate;
use crate::disasters::DisasterState;
use crate::land_value::LandValue;
use crate::messages::MessageLog;
use crate::pollution::PollutionDensity;
use crate::power::PowerGrid;
use crate::rate_of_growth::RateOfGrowth;
use crate::services::{ComRate, FireStationEffect, FireStationMap, PoliceStationMap};
use crate::sim_rng::SimRng;
use crate::sprites::{Sprite, SpriteKind, SpriteList};
use crate::tile_map::TileMap;
use crate::tiles::{
    Tile, ANIMBIT, BULLBIT, DIRT, FIREBASE, FLOOD, RADTILE, ROADS, RUBBLE,
};
use crate::traffic::TrafficDensity;
use crate::zones::{self, Valves};

pub const DIRS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Everything a scan phase may read or write, borrowed for the duration of
/// the phase.
pub struct ScanContext<'a> {
    pub map: &'a mut TileMap,
    pub rng: &'a mut SimRng,
    pub census: &'a mut CensusCounts,
    pub power: &'a PowerGrid,
    pub valves: &'a Valves,
    pub traffic: &'a mut TrafficDensity,
    pub land_value: &'a LandValue,
    pub pollution: &'a PollutionDensity,
    pub crime: &'a CrimeRate,
    pub rate_of_growth: &'a mut RateOfGrowth,
    pub fire_station: &'a mut FireStationMap,
    pub police_station: &'a mut PoliceStationMap,
    pub fire_effect: &'a FireStationEffect,
    pub com_rate: &'a ComRate,
    pub effects: &'a FundEffects,
    pub sprites: &'a mut SpriteList,
    pub disasters: &'a mut DisasterState,
    pub messages: &'a mut MessageLog,
    pub city_time: u64,
    pub changed: bool,
}

impl ScanContext<'_> {
    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) {
        self.map.set(x, y, tile);
        self.changed = true;
    }
}

/// Scan columns `x1..x2` over the full map height.
pub fn map_scan(ctx: &mut ScanContext, x1: i32, x2: i32) {
    for x in x1..x2 {
        for y in 0..WORLD_H as i32 {
            let tile = ctx.map.get(x, y);
            if tile.zone_center() {
                zones::do_zone(ctx, x, y);
                continue;
            }
            let c = tile.character();
            if c == RADTILE {
                do_radioactive(ctx, x, y);
            } else if tile.is_fire() {
                do_fire(ctx, x, y);
            } else if tile.is_flood() {
                do_flood(ctx, x, y);
            } else if tile.is_road() {
                do_road(ctx, x, y, tile);
            } else if tile.is_rail() {
                do_rail(ctx, x, y);
            }
        }
    }
    if ctx.changed {
        ctx.map.bump_serial();
        ctx.changed = false;
    }
}

/// Radioactive soil cools off, eventually.
fn do_radioactive(ctx: &mut ScanContext, x: i32, y: i32) {
    if ctx.rng.one_in(4095) {
        ctx.set_tile(x, y, Tile::new(DIRT, 0));
    }
}

fn do_fire(ctx: &mut ScanContext, x: i32, y: i32) {
    ctx.census.fire_pop += 1;

    // Spread: one roll in four picks a neighbor; station reach fights it.
    if ctx.rng.one_in(3) {
        let (dx, dy) = DIRS[ctx.rng.range(3) as usize];
        let (nx, ny) = (x + dx, y + dy);
        let neighbor = ctx.map.get(nx, ny);
        if neighbor.burnable() {
            let reach = ctx.fire_effect.0.world_get(nx, ny) as i32;
            if reach < 50 || ctx.rng.range(99) as i32 > reach {
                let flame = FIREBASE + ctx.rng.range(7);
                ctx.set_tile(nx, ny, Tile::new(flame, ANIMBIT));
            }
        }
    }

    // Burn out: one roll in three leaves rubble behind.
    if ctx.rng.one_in(2) {
        let rubble = RUBBLE + ctx.rng.range(3);
        ctx.set_tile(x, y, Tile::new(rubble, BULLBIT));
    }
}

fn do_flood(ctx: &mut ScanContext, x: i32, y: i32) {
    if ctx.disasters.flood_count > 0 {
        // Still rising: creep into adjacent destructible cells.
        for (dx, dy) in DIRS {
            if !ctx.rng.one_in(7) {
                continue;
            }
            let (nx, ny) = (x + dx, y + dy);
            let t = ctx.map.get(nx, ny);
            if (t.bulldozable() || t.burnable()) && !t.zone_center() {
                let flood = FLOOD + ctx.rng.range(2);
                ctx.set_tile(nx, ny, Tile::new(flood, 0));
            }
        }
    } else if ctx.rng.one_in(15) {
        ctx.set_tile(x, y, Tile::new(DIRT, 0));
    }
}

fn do_road(ctx: &mut ScanContext, x: i32, y: i32, tile: Tile) {
    ctx.census.road_total += 1;
    if tile.is_bridge() {
        ctx.census.road_total += 3;
    } else if tile.is_heavy_traffic_road() {
        ctx.census.road_total += 1;
    }

    // Deterioration under starved road funding.
    if ctx.effects.road < 30 && ctx.rng.one_in(511) {
        let c = tile.character();
        if ctx.rng.one_in(15) {
            let rubble = RUBBLE + ctx.rng.range(3);
            ctx.set_tile(x, y, Tile::new(rubble, BULLBIT));
        } else if c > ROADS && !tile.is_bridge() {
            ctx.set_tile(x, y, Tile::new(c - 1, tile.raw() & crate::tiles::ALLBITS));
        }
    }
}

const MAX_TRAINS: usize = 4;

fn do_rail(ctx: &mut ScanContext, x: i32, y: i32) {
    ctx.census.rail_total += 1;
    if ctx.rng.one_in(511) && ctx.sprites.count_of(SpriteKind::Train) < MAX_TRAINS {
        let dest_x = ctx.rng.range(crate::config::WORLD_W as u16 - 1) as i32;
        let dest_y = ctx.rng.range(WORLD_H as u16 - 1) as i32;
        ctx.sprites
            .spawn(Sprite::new(SpriteKind::Train, x, y).with_dest(dest_x, dest_y));
    }
}
