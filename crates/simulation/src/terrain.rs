//! Map generation: a river walk, a few lakes, noise-seeded forests, then a
//! smoothing pass that turns river and tree boundaries into edge variants.
//!
//! Everything derives from the game seed: the LCG drives the river course
//! and lake placement, and an fBm field seeded from the same value lays out
//! the forest clumps.

use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};

use crate::config::{WORLD_H, WORLD_W};
use crate::sim_rng::SimRng;
use crate::tile_map::TileMap;
use crate::tiles::{
    Tile, BLBN, RIVER, RIVER_EDGE, TREE_BASE, WOODS,
};

const FOREST_OCTAVES: i32 = 4;
const FOREST_GAIN: f32 = 0.5;
const FOREST_LACUNARITY: f32 = 2.0;
const FOREST_FREQUENCY: f32 = 0.09;
/// fBm output above this becomes woods.
const FOREST_THRESHOLD: f32 = 0.28;

/// Regenerate the whole map from `seed`.
pub fn generate(map: &mut TileMap, rng: &mut SimRng, seed: u64) {
    map.clear();
    carve_river(map, rng);
    carve_lakes(map, rng);
    plant_forests(map, seed);
    smooth_water_edges(map);
    smooth_tree_edges(map);
}

// ---------------------------------------------------------------------------
// Water
// ---------------------------------------------------------------------------

/// Stamp a diamond brush of open river around `(x, y)`.
fn plot_river(map: &mut TileMap, x: i32, y: i32, radius: i32) {
    for dx in -radius..=radius {
        for dy in -radius..=radius {
            if dx.abs() + dy.abs() <= radius {
                map.set(x + dx, y + dy, Tile::new(RIVER, 0));
            }
        }
    }
}

/// Random-walk a river across the map, top to bottom, with a narrower
/// tributary branching sideways from the midpoint.
fn carve_river(map: &mut TileMap, rng: &mut SimRng) {
    let mut x = 10 + rng.range((WORLD_W - 20) as u16) as i32;
    let mut y = 0;
    let mid_y = WORLD_H as i32 / 2;
    let mut branch_x = x;

    while y < WORLD_H as i32 {
        plot_river(map, x, y, 2);
        if y == mid_y {
            branch_x = x;
        }
        // Drift sideways one cell at a time, two-thirds of the steps.
        match rng.range(5) {
            0 | 1 => x -= 1,
            2 | 3 => x += 1,
            _ => {}
        }
        x = x.clamp(2, WORLD_W as i32 - 3);
        y += 1;
    }

    let mut bx = branch_x;
    let mut by = mid_y;
    let step: i32 = if rng.one_in(1) { 1 } else { -1 };
    while bx > 0 && bx < WORLD_W as i32 {
        plot_river(map, bx, by, 1);
        match rng.range(5) {
            0 | 1 => by -= 1,
            2 | 3 => by += 1,
            _ => {}
        }
        by = by.clamp(2, WORLD_H as i32 - 3);
        bx += step;
    }
}

fn carve_lakes(map: &mut TileMap, rng: &mut SimRng) {
    let count = 2 + rng.range(3) as i32;
    for _ in 0..count {
        let cx = 8 + rng.range((WORLD_W - 16) as u16) as i32;
        let cy = 8 + rng.range((WORLD_H - 16) as u16) as i32;
        let blobs = 2 + rng.erand(4) as i32;
        for _ in 0..blobs {
            let ox = rng.range(8) as i32 - 4;
            let oy = rng.range(8) as i32 - 4;
            plot_river(map, cx + ox, cy + oy, 2 + rng.range(1) as i32);
        }
    }
}

// ---------------------------------------------------------------------------
// Forests
// ---------------------------------------------------------------------------

fn plant_forests(map: &mut TileMap, seed: u64) {
    let mut noise = FastNoiseLite::with_seed(seed as i32);
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    noise.set_fractal_type(Some(FractalType::FBm));
    noise.set_fractal_octaves(Some(FOREST_OCTAVES));
    noise.set_fractal_gain(Some(FOREST_GAIN));
    noise.set_fractal_lacunarity(Some(FOREST_LACUNARITY));
    noise.set_frequency(Some(FOREST_FREQUENCY));

    for x in 0..WORLD_W as i32 {
        for y in 0..WORLD_H as i32 {
            if !map.get(x, y).is_dirt() {
                continue;
            }
            if noise.get_noise_2d(x as f32, y as f32) > FOREST_THRESHOLD {
                map.set(x, y, Tile::new(WOODS, BLBN));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Edge smoothing
// ---------------------------------------------------------------------------

/// 4-bit neighbor pattern (N=1, E=2, S=4, W=8) of neighbors matching `pred`.
/// Off-map neighbors count as matching so shorelines stay open at the border.
fn neighbor_mask(map: &TileMap, x: i32, y: i32, pred: impl Fn(Tile) -> bool) -> u16 {
    let mut mask = 0;
    for (bit, (dx, dy)) in [(1, (0, -1)), (2, (1, 0)), (4, (0, 1)), (8, (-1, 0))] {
        let (nx, ny) = (x + dx, y + dy);
        if !TileMap::in_bounds(nx, ny) || pred(map.get(nx, ny)) {
            mask |= bit;
        }
    }
    mask
}

fn smooth_water_edges(map: &mut TileMap) {
    for x in 0..WORLD_W as i32 {
        for y in 0..WORLD_H as i32 {
            if !map.get(x, y).is_water() {
                continue;
            }
            let mask = neighbor_mask(map, x, y, |t| t.is_water());
            let tile = if mask == 15 {
                RIVER
            } else {
                RIVER_EDGE + mask
            };
            map.set(x, y, Tile::new(tile, 0));
        }
    }
}

fn smooth_tree_edges(map: &mut TileMap) {
    for x in 0..WORLD_W as i32 {
        for y in 0..WORLD_H as i32 {
            if !map.get(x, y).is_tree() {
                continue;
            }
            let mask = neighbor_mask(map, x, y, |t| t.is_tree());
            let tile = if mask == 15 { WOODS } else { TREE_BASE + mask };
            map.set(x, y, Tile::new(tile, BLBN));
        }
    }
}
