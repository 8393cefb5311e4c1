//! Power grid flood-fill.
//!
//! The grid is rebuilt wholly on every scan: plants seed a bounded stack and
//! power floods outward through conductive cells over 4-adjacency. Zone
//! processors later copy the grid bit into each center's POWERED flag.

use bevy::prelude::*;

use crate::config::POWER_STACK_SIZE;
use crate::overlay::OverlayMap;
use crate::tile_map::TileMap;
use crate::tiles::{NUCLEAR, POWERPLANT};

/// 1:1 overlay; nonzero means the cell is reachable from a plant.
#[derive(Resource, Default, Clone)]
pub struct PowerGrid(pub OverlayMap<u8, 1>);

const NEIGHBORS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Rebuild the power grid from scratch.
pub fn power_scan(map: &TileMap, power: &mut PowerGrid) {
    power.0.clear();

    let mut stack: Vec<(i32, i32)> = Vec::with_capacity(POWER_STACK_SIZE);
    for x in 0..crate::config::WORLD_W as i32 {
        for y in 0..crate::config::WORLD_H as i32 {
            let c = map.get(x, y).character();
            if c == POWERPLANT || c == NUCLEAR {
                push_bounded(&mut stack, (x, y));
            }
        }
    }

    while let Some((x, y)) = stack.pop() {
        power.0.set(x, y, 1);
        for (dx, dy) in NEIGHBORS {
            let (nx, ny) = (x + dx, y + dy);
            if !TileMap::in_bounds(nx, ny) {
                continue;
            }
            if power.0.get(nx, ny) == 0 && map.get(nx, ny).conductive() {
                push_bounded(&mut stack, (nx, ny));
            }
        }
    }
}

/// Pushes are dropped at capacity; an isolated sub-grid may go underserved
/// but the scan never grows without bound.
fn push_bounded(stack: &mut Vec<(i32, i32)>, pos: (i32, i32)) {
    if stack.len() < POWER_STACK_SIZE {
        stack.push(pos);
    }
}
