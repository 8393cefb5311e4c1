//! Zone processors.
//!
//! Every cell with the ZONE_CENTER flag is dispatched here during the map
//! scan. A 3×3 zone's eight edge cells are conductive skeleton; the center
//! carries the population-encoding character that the plop tables write and
//! the population formulas read back.

pub mod commercial;
pub mod demand;
pub mod industrial;
pub mod residential;
pub mod special;

#[cfg(test)]
mod tests;

pub use commercial::commercial_population;
pub use demand::{set_valves, Valves};
pub use industrial::industrial_population;
pub use residential::residential_population;

use crate::map_scan::ScanContext;
use crate::tile_map::TileMap;
use crate::tiles::{
    Tile, TileFlag, AIRPORT, BLBNCN, CHURCH, FIRESTATION, FULLSTADIUM, HOSPITAL, LAST_RUBBLE,
    NUCLEAR, POLICESTATION, PORT, POWERPLANT, RUBBLE, STADIUM, ZONEBIT,
};

/// Dispatch one zone-center cell.
pub fn do_zone(ctx: &mut ScanContext, x: i32, y: i32) {
    let powered = set_zone_power(ctx, x, y);
    if powered {
        ctx.census.powered_zones += 1;
    } else {
        ctx.census.unpowered_zones += 1;
    }

    let tile = ctx.map.get(x, y);
    let c = tile.character();

    if tile.is_residential() {
        residential::do_residential(ctx, x, y, powered);
    } else if tile.is_commercial() {
        commercial::do_commercial(ctx, x, y, powered);
    } else if tile.is_industrial() {
        industrial::do_industrial(ctx, x, y, powered);
    } else {
        match c {
            HOSPITAL | CHURCH => special::do_hospital_church(ctx, x, y),
            PORT => special::do_sea_port(ctx, x, y, powered),
            AIRPORT => special::do_airport(ctx, x, y, powered),
            POWERPLANT => special::do_coal_power(ctx, x, y),
            NUCLEAR => special::do_nuclear_power(ctx, x, y),
            FIRESTATION => special::do_fire_station(ctx, x, y, powered),
            POLICESTATION => special::do_police_station(ctx, x, y, powered),
            STADIUM | FULLSTADIUM => special::do_stadium(ctx, x, y, powered),
            _ => {}
        }
    }
}

/// Copy the power grid bit into the center's POWERED flag.
///
/// Returns the new powered state.
pub fn set_zone_power(ctx: &mut ScanContext, x: i32, y: i32) -> bool {
    let powered = ctx.power.0.get(x, y) != 0;
    let mut tile = ctx.map.get(x, y);
    if tile.powered() != powered {
        tile.set_flag(TileFlag::Powered, powered);
        ctx.set_tile(x, y, tile);
    }
    powered
}

/// Write a full 3×3 zone from its center character: the footprint takes the
/// nine consecutive characters around the center, every cell becomes
/// conductive skeleton, and the center gets the ZONE_CENTER flag.
pub fn zone_plop(map: &mut TileMap, x: i32, y: i32, center: u16) {
    let base = center - 4;
    for dy in -1..=1i32 {
        for dx in -1..=1i32 {
            let offset = ((dy + 1) * 3 + (dx + 1)) as u16;
            let flags = if offset == 4 { BLBNCN | ZONEBIT } else { BLBNCN };
            map.set(x + dx, y + dy, Tile::new(base + offset, flags));
        }
    }
}

/// Replace rubble inside an N×N footprint with the zone's skeleton tiles.
/// The footprint's corner sits one cell up-left of the center. Returns true
/// if anything was repaired.
pub fn repair_zone(map: &mut TileMap, x: i32, y: i32, center: u16, size: i32) -> bool {
    let base = center - (size as u16 + 1);
    let mut repaired = false;
    for dy in 0..size {
        for dx in 0..size {
            let index = (dy * size + dx) as u16;
            if index == size as u16 + 1 {
                continue; // never rewrite the center
            }
            let (tx, ty) = (x - 1 + dx, y - 1 + dy);
            let c = map.get(tx, ty).character();
            if (RUBBLE..=LAST_RUBBLE).contains(&c) {
                map.set(tx, ty, Tile::new(base + index, BLBNCN));
                repaired = true;
            }
        }
    }
    repaired
}
