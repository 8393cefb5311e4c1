//! Special zone processors: city services, transport hubs, power plants,
//! and the stadium.

use crate::map_scan::ScanContext;
use crate::sprites::{Sprite, SpriteKind};
use crate::tiles::{
    Tile, AIRPORT, CHURCH, FIRESTATION, FULLSTADIUM, HOSPITAL, LOMASK, NUCLEAR, POLICESTATION,
    PORT, POWERPLANT, STADIUM,
};

fn repair(ctx: &mut ScanContext, x: i32, y: i32, center: u16, size: i32) {
    if ctx.city_time & 15 == 0 && crate::zones::repair_zone(ctx.map, x, y, center, size) {
        ctx.changed = true;
    }
}

pub fn do_hospital_church(ctx: &mut ScanContext, x: i32, y: i32) {
    let c = ctx.map.get(x, y).character();
    if c == HOSPITAL {
        ctx.census.hospital_pop += 1;
        repair(ctx, x, y, HOSPITAL, 3);
    } else if c == CHURCH {
        ctx.census.church_pop += 1;
        repair(ctx, x, y, CHURCH, 3);
    }
}

pub fn do_sea_port(ctx: &mut ScanContext, x: i32, y: i32, powered: bool) {
    ctx.census.port_pop += 1;
    repair(ctx, x, y, PORT, 4);

    if powered && ctx.sprites.count_of(SpriteKind::Ship) == 0 && ctx.rng.one_in(15) {
        let dest_x = ctx.rng.range(crate::config::WORLD_W as u16 - 1) as i32;
        let dest_y = ctx.rng.range(crate::config::WORLD_H as u16 - 1) as i32;
        ctx.sprites
            .spawn(Sprite::new(SpriteKind::Ship, x, y).with_dest(dest_x, dest_y));
    }
}

pub fn do_airport(ctx: &mut ScanContext, x: i32, y: i32, powered: bool) {
    ctx.census.airport_pop += 1;
    repair(ctx, x, y, AIRPORT, 6);
    if !powered {
        return;
    }

    if ctx.sprites.count_of(SpriteKind::Airplane) < 2 && ctx.rng.one_in(5) {
        let dest_x = ctx.rng.range(crate::config::WORLD_W as u16 - 1) as i32;
        let dest_y = ctx.rng.range(crate::config::WORLD_H as u16 - 1) as i32;
        ctx.sprites
            .spawn(Sprite::new(SpriteKind::Airplane, x, y).with_dest(dest_x, dest_y));
    }
    if ctx.sprites.count_of(SpriteKind::Helicopter) == 0 && ctx.rng.one_in(12) {
        let dest_x = ctx.rng.range(crate::config::WORLD_W as u16 - 1) as i32;
        let dest_y = ctx.rng.range(crate::config::WORLD_H as u16 - 1) as i32;
        ctx.sprites
            .spawn(Sprite::new(SpriteKind::Helicopter, x, y).with_dest(dest_x, dest_y));
    }
}

pub fn do_coal_power(ctx: &mut ScanContext, x: i32, y: i32) {
    ctx.census.coal_pop += 1;
    repair(ctx, x, y, POWERPLANT, 4);
}

pub fn do_nuclear_power(ctx: &mut ScanContext, x: i32, y: i32) {
    ctx.census.nuclear_pop += 1;

    if ctx.disasters.enabled && ctx.rng.one_in(9999) {
        crate::disasters::meltdown(
            ctx.map,
            ctx.rng,
            ctx.sprites,
            ctx.messages,
            ctx.city_time,
            x,
            y,
        );
        ctx.changed = true;
        return;
    }

    repair(ctx, x, y, NUCLEAR, 4);
}

pub fn do_fire_station(ctx: &mut ScanContext, x: i32, y: i32, powered: bool) {
    ctx.census.fire_station_pop += 1;
    repair(ctx, x, y, FIRESTATION, 3);

    let mut effect = ctx.effects.fire;
    if !powered {
        effect /= 2;
    }
    let cur = ctx.fire_station.0.world_get(x, y) as i32;
    ctx.fire_station
        .0
        .world_set(x, y, (cur + effect).min(i16::MAX as i32) as i16);
}

pub fn do_police_station(ctx: &mut ScanContext, x: i32, y: i32, powered: bool) {
    ctx.census.police_station_pop += 1;
    repair(ctx, x, y, POLICESTATION, 3);

    let mut effect = ctx.effects.police;
    if !powered {
        effect /= 2;
    }
    let cur = ctx.police_station.0.world_get(x, y) as i32;
    ctx.police_station
        .0
        .world_set(x, y, (cur + effect).min(i16::MAX as i32) as i16);
}

/// The stadium fills with a crowd on a regular schedule when powered, then
/// empties again half a period later.
pub fn do_stadium(ctx: &mut ScanContext, x: i32, y: i32, powered: bool) {
    ctx.census.stadium_pop += 1;
    let tile = ctx.map.get(x, y);
    let c = tile.character();
    repair(ctx, x, y, c, 4);

    let flags = tile.raw() & !LOMASK;
    if c == STADIUM && powered && ctx.city_time & 31 == 0 {
        ctx.set_tile(x, y, Tile(FULLSTADIUM | flags));
    } else if c == FULLSTADIUM && ctx.city_time & 31 == 16 {
        ctx.set_tile(x, y, Tile(STADIUM | flags));
    }
}
