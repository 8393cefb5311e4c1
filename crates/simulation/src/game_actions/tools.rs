//! The tile-level tool engine.
//!
//! Every tool checks bounds, then funds, then attempts its edit; only a
//! successful edit spends money and bumps the map serial. Road, rail, and
//! wire edits re-stitch themselves and their four neighbors to the correct
//! connection variant through a 16-entry lookup per network.

use crate::budget::Budget;
use crate::sim_rng::SimRng;
use crate::tile_map::TileMap;
use crate::tiles::{
    Tile, AIRPORTBASE, ANIMBIT, BLBN, BLBNCN, BULLBIT, BURNBIT, COALBASE, COMCLR, CONDBIT, DIRT,
    FIRESTATION, FOUNTAIN, FREEZ, INDCLR, LHPOWER, LHRAIL, NUCLEARBASE, POLICESTATION, PORTBASE,
    PWRBIT, ROADS, STADIUMBASE, WOODS2, ZONEBIT,
};
use crate::zones::zone_plop;

use super::{Tool, ToolResult};

use bevy::prelude::*;

/// Player-tunable tool behavior.
#[derive(Resource, Clone, Copy, Debug)]
pub struct ToolSettings {
    /// Clear bulldozable obstacles automatically under the build tools.
    pub auto_bulldoze: bool,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self { auto_bulldoze: true }
    }
}

// ---------------------------------------------------------------------------
// Connection tables: index is the 4-bit neighbor pattern N=1, E=2, S=4, W=8.
// ---------------------------------------------------------------------------

const ROAD_TABLE: [u16; 16] = [
    66, 67, 66, 68, 67, 67, 69, 73, 66, 70, 66, 74, 71, 72, 75, 76,
];
const RAIL_TABLE: [u16; 16] = [
    226, 227, 226, 228, 227, 227, 229, 233, 226, 230, 226, 234, 231, 232, 235, 236,
];
const WIRE_TABLE: [u16; 16] = [
    210, 211, 210, 212, 211, 211, 213, 217, 210, 214, 210, 218, 215, 216, 219, 220,
];

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Apply `tool` at `(x, y)`. Spends funds and bumps the map serial only on
/// success.
pub fn apply_tool(
    map: &mut TileMap,
    rng: &mut SimRng,
    budget: &mut Budget,
    settings: &ToolSettings,
    tool: Tool,
    x: i32,
    y: i32,
) -> ToolResult {
    if !TileMap::in_bounds(x, y) {
        return ToolResult::Failed;
    }
    let cost = tool.cost();
    if !budget.can_afford(cost) {
        return ToolResult::NoMoney;
    }

    let attempt = match tool {
        Tool::Query => return ToolResult::Ok,
        Tool::Bulldozer => bulldoze(map, x, y),
        Tool::Road => place_strip(map, settings, x, y, Tile::new(ROADS, BLBN)),
        Tool::Rail => place_strip(map, settings, x, y, Tile::new(LHRAIL, BLBN)),
        Tool::Wire => place_strip(map, settings, x, y, Tile::new(LHPOWER, BLBNCN)),
        Tool::Park => place_park(map, rng, settings, x, y),
        Tool::Residential => place_zone(map, settings, x, y, FREEZ),
        Tool::Commercial => place_zone(map, settings, x, y, COMCLR),
        Tool::Industrial => place_zone(map, settings, x, y, INDCLR),
        Tool::FireStation => place_zone(map, settings, x, y, FIRESTATION),
        Tool::PoliceStation => place_zone(map, settings, x, y, POLICESTATION),
        Tool::Stadium => place_building(map, settings, x, y, STADIUMBASE, 4),
        Tool::SeaPort => place_building(map, settings, x, y, PORTBASE, 4),
        Tool::CoalPower => place_building(map, settings, x, y, COALBASE, 4),
        Tool::NuclearPower => place_building(map, settings, x, y, NUCLEARBASE, 4),
        Tool::Airport => place_building(map, settings, x, y, AIRPORTBASE, 6),
    };

    match attempt {
        Ok(extra) => {
            budget.spend(cost + extra);
            map.bump_serial();
            ToolResult::Ok
        }
        Err(result) => result,
    }
}

type Attempt = Result<i64, ToolResult>;

// ---------------------------------------------------------------------------
// Individual tools
// ---------------------------------------------------------------------------

fn bulldoze(map: &mut TileMap, x: i32, y: i32) -> Attempt {
    let tile = map.get(x, y);
    if tile.is_water() || tile.is_dirt() {
        return Err(ToolResult::Failed);
    }
    if !tile.bulldozable() {
        return Err(ToolResult::NeedBulldoze);
    }
    map.set(x, y, Tile::new(DIRT, 0));
    fix_zone(map, x, y);
    Ok(0)
}

/// Claim one cell for a build tool: dirt is free, bulldozable obstacles cost
/// an extra dollar when auto-bulldoze is on.
fn claim_cell(map: &TileMap, settings: &ToolSettings, x: i32, y: i32) -> Attempt {
    let tile = map.get(x, y);
    if tile.is_dirt() {
        Ok(0)
    } else if tile.bulldozable() && !tile.zone_center() {
        if settings.auto_bulldoze {
            Ok(1)
        } else {
            Err(ToolResult::NeedBulldoze)
        }
    } else {
        Err(ToolResult::NeedBulldoze)
    }
}

fn place_strip(
    map: &mut TileMap,
    settings: &ToolSettings,
    x: i32,
    y: i32,
    skeleton: Tile,
) -> Attempt {
    let extra = claim_cell(map, settings, x, y)?;
    map.set(x, y, skeleton);
    fix_zone(map, x, y);
    Ok(extra)
}

fn place_park(
    map: &mut TileMap,
    rng: &mut SimRng,
    settings: &ToolSettings,
    x: i32,
    y: i32,
) -> Attempt {
    let extra = claim_cell(map, settings, x, y)?;
    let tile = if rng.range(4) == 0 {
        Tile::new(FOUNTAIN, BURNBIT | BULLBIT | ANIMBIT)
    } else {
        Tile::new(WOODS2 + rng.range(3), BURNBIT | BULLBIT)
    };
    map.set(x, y, tile);
    Ok(extra)
}

fn place_zone(
    map: &mut TileMap,
    settings: &ToolSettings,
    x: i32,
    y: i32,
    center: u16,
) -> Attempt {
    if x < 1 || y < 1 || x > crate::config::WORLD_W as i32 - 2 || y > crate::config::WORLD_H as i32 - 2
    {
        return Err(ToolResult::Failed);
    }
    let mut extra = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            extra += claim_cell(map, settings, x + dx, y + dy)?;
        }
    }
    zone_plop(map, x, y, center);
    Ok(extra)
}

/// N×N buildings sit with their corner one cell up-left of the click, so
/// the named center sentinel lands on the clicked cell.
fn place_building(
    map: &mut TileMap,
    settings: &ToolSettings,
    x: i32,
    y: i32,
    base: u16,
    size: i32,
) -> Attempt {
    let (cx, cy) = (x - 1, y - 1);
    if cx < 0
        || cy < 0
        || cx + size > crate::config::WORLD_W as i32
        || cy + size > crate::config::WORLD_H as i32
    {
        return Err(ToolResult::Failed);
    }

    let mut extra = 0;
    for dy in 0..size {
        for dx in 0..size {
            extra += claim_cell(map, settings, cx + dx, cy + dy)?;
        }
    }

    let center_index = (size + 1) as u16;
    for dy in 0..size {
        for dx in 0..size {
            let index = (dy * size + dx) as u16;
            let flags = if index == center_index {
                ZONEBIT | CONDBIT | PWRBIT | BULLBIT
            } else {
                CONDBIT | BURNBIT
            };
            map.set(cx + dx, cy + dy, Tile::new(base + index, flags));
        }
    }
    Ok(extra)
}

// ---------------------------------------------------------------------------
// Connection re-stitching
// ---------------------------------------------------------------------------

const CROSS: [(i32, i32); 5] = [(0, 0), (0, -1), (1, 0), (0, 1), (-1, 0)];

/// Re-stitch a cell and its four neighbors after a network edit.
pub fn fix_zone(map: &mut TileMap, x: i32, y: i32) {
    for (dx, dy) in CROSS {
        fix_single(map, x + dx, y + dy);
    }
}

/// Rewrite one road/rail/wire cell to the variant matching its neighbors.
pub fn fix_single(map: &mut TileMap, x: i32, y: i32) {
    let tile = map.get(x, y);
    let c = tile.character();
    let flags = tile.raw() & crate::tiles::ALLBITS;

    let (table, matching): (&[u16; 16], fn(Tile) -> bool) = if (66..=76).contains(&c) {
        (&ROAD_TABLE, Tile::is_road)
    } else if (226..=236).contains(&c) {
        (&RAIL_TABLE, Tile::is_rail)
    } else if (210..=220).contains(&c) {
        (&WIRE_TABLE, Tile::is_wire)
    } else {
        return;
    };

    let mut mask = 0usize;
    for (bit, (dx, dy)) in [(1, (0, -1)), (2, (1, 0)), (4, (0, 1)), (8, (-1, 0))] {
        if matching(map.get(x + dx, y + dy)) {
            mask |= bit;
        }
    }
    map.set(x, y, Tile(table[mask] | flags));
}
