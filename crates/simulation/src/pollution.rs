//! Pollution and terrain density scans.
//!
//! Pollution accumulates per world cell from traffic and the dirty tile
//! classes, then diffuses through two smoothing passes. The terrain overlay
//! tracks greenery and open water at quarter resolution; land value pays a
//! premium for it.

use bevy::prelude::*;

use crate::config::{WORLD_H, WORLD_W};
use crate::overlay::{smooth, OverlayMap};
use crate::tile_map::TileMap;
use crate::tiles::{Tile, AIRPORTBASE, COALBASE, PORTBASE, RADTILE};
use crate::traffic::TrafficDensity;

#[derive(Resource, Default, Clone)]
pub struct PollutionDensity {
    pub map: OverlayMap<u8, 2>,
    pub average: u8,
    /// World coordinates of the dirtiest block; the monster heads here.
    pub max_at: (i32, i32),
}

#[derive(Resource, Default, Clone)]
pub struct TerrainDensity(pub OverlayMap<u8, 4>);

fn pollution_value(tile: Tile) -> u32 {
    let c = tile.character();
    if tile.is_fire() {
        100
    } else if c == RADTILE {
        255
    } else if tile.is_industrial() {
        50
    } else if (COALBASE..COALBASE + 16).contains(&c) {
        100
    } else if (AIRPORTBASE..AIRPORTBASE + 36).contains(&c) {
        50
    } else if (PORTBASE..PORTBASE + 16).contains(&c) {
        30
    } else {
        0
    }
}

pub fn pollution_terrain_scan(
    map: &TileMap,
    traffic: &TrafficDensity,
    pollution: &mut PollutionDensity,
    terrain: &mut TerrainDensity,
) {
    let mut poll_a = OverlayMap::<u8, 2>::default();
    let mut poll_b = OverlayMap::<u8, 2>::default();
    let mut terr_a = OverlayMap::<u8, 4>::default();
    let mut terr_b = OverlayMap::<u8, 4>::default();

    for x in 0..WORLD_W as i32 {
        for y in 0..WORLD_H as i32 {
            let tile = map.get(x, y);

            let mut value = pollution_value(tile);
            if tile.is_road() {
                value += traffic.0.world_get(x, y) as u32;
            }
            if value > 0 {
                let cur = poll_a.world_get(x, y) as u32;
                poll_a.world_set(x, y, (cur + value).min(255) as u8);
            }

            let green = if tile.is_tree() {
                12u32
            } else if tile.is_water() {
                6
            } else {
                0
            };
            if green > 0 {
                let cur = terr_a.world_get(x, y) as u32;
                terr_a.world_set(x, y, (cur + green).min(255) as u8);
            }
        }
    }

    smooth(&poll_a, &mut poll_b);
    smooth(&poll_b, &mut pollution.map);
    smooth(&terr_a, &mut terr_b);
    terrain.0 = terr_b;

    let mut total: u32 = 0;
    let mut best = 0u8;
    let mut best_at = (0i32, 0i32);
    let width = OverlayMap::<u8, 2>::WIDTH as i32;
    let height = OverlayMap::<u8, 2>::HEIGHT as i32;
    for x in 0..width {
        for y in 0..height {
            let v = pollution.map.get(x, y);
            total += v as u32;
            if v > best {
                best = v;
                best_at = (x * 2, y * 2);
            }
        }
    }
    pollution.average = (total / (width * height) as u32) as u8;
    pollution.max_at = best_at;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::{Tile, INDCLR, POWERPLANT};

    #[test]
    fn test_empty_map_is_clean() {
        let map = TileMap::default();
        let traffic = TrafficDensity::default();
        let mut pollution = PollutionDensity::default();
        let mut terrain = TerrainDensity::default();
        pollution_terrain_scan(&map, &traffic, &mut pollution, &mut terrain);
        assert_eq!(pollution.average, 0);
        assert!(pollution.map.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_coal_plant_pollutes_and_diffuses() {
        let mut map = TileMap::default();
        for dx in 0..4 {
            for dy in 0..4 {
                map.set(
                    40 + dx,
                    40 + dy,
                    Tile::new(COALBASE + (dy * 4 + dx) as u16, 0),
                );
            }
        }
        let traffic = TrafficDensity::default();
        let mut pollution = PollutionDensity::default();
        let mut terrain = TerrainDensity::default();
        pollution_terrain_scan(&map, &traffic, &mut pollution, &mut terrain);
        assert!(pollution.map.world_get(41, 41) > 0);
        // Diffusion reaches past the footprint.
        assert!(pollution.map.world_get(46, 41) > 0);
        assert!(pollution.average > 0);
    }

    #[test]
    fn test_max_at_points_at_the_source() {
        let mut map = TileMap::default();
        map.set(80, 20, Tile::new(POWERPLANT, 0));
        let traffic = TrafficDensity::default();
        let mut pollution = PollutionDensity::default();
        let mut terrain = TerrainDensity::default();
        pollution_terrain_scan(&map, &traffic, &mut pollution, &mut terrain);
        let (mx, my) = pollution.max_at;
        assert!((mx - 80).abs() <= 4, "max at {mx},{my}");
        assert!((my - 20).abs() <= 4);
    }

    #[test]
    fn test_traffic_pollutes_roads() {
        let mut map = TileMap::default();
        map.set(30, 30, Tile::new(crate::tiles::ROADS, crate::tiles::BLBN));
        let mut traffic = TrafficDensity::default();
        traffic.0.world_set(30, 30, 120);
        let mut pollution = PollutionDensity::default();
        let mut terrain = TerrainDensity::default();
        pollution_terrain_scan(&map, &traffic, &mut pollution, &mut terrain);
        assert!(pollution.map.world_get(30, 30) > 0);
    }

    #[test]
    fn test_woods_register_as_terrain() {
        let mut map = TileMap::default();
        for x in 20..28 {
            for y in 20..28 {
                map.set(x, y, Tile::new(crate::tiles::WOODS, crate::tiles::BLBN));
            }
        }
        let traffic = TrafficDensity::default();
        let mut pollution = PollutionDensity::default();
        let mut terrain = TerrainDensity::default();
        pollution_terrain_scan(&map, &traffic, &mut pollution, &mut terrain);
        assert!(terrain.0.world_get(24, 24) > 0);
    }
}
