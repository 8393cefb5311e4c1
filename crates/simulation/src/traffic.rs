//! Traffic demand.
//!
//! Routing is deliberately coarse: a zone probes the ring around its 3×3
//! footprint for a road, and a successful probe deposits demand into the
//! traffic density overlay. The density decays every cycle so stale demand
//! drains away.

use bevy::prelude::*;

use crate::overlay::OverlayMap;
use crate::sim_rng::SimRng;
use crate::tile_map::TileMap;

#[derive(Resource, Default, Clone)]
pub struct TrafficDensity(pub OverlayMap<u8, 2>);

/// How much one successful probe adds at the road it found.
const TRAFFIC_DEPOSIT: u8 = 32;
const TRAFFIC_MAX: u8 = 240;

/// The twelve cells ringing a 3×3 zone footprint, relative to its center.
const PERIMETER: [(i32, i32); 12] = [
    (-1, -2),
    (0, -2),
    (1, -2),
    (2, -1),
    (2, 0),
    (2, 1),
    (1, 2),
    (0, 2),
    (-1, 2),
    (-2, 1),
    (-2, 0),
    (-2, -1),
];

/// Probe for road access from the zone centered at `(x, y)`.
///
/// Returns -1 when no perimeter cell is a road; otherwise a small random
/// congestion cost, after depositing demand at the road found.
pub fn make_traffic(
    map: &TileMap,
    traffic: &mut TrafficDensity,
    rng: &mut SimRng,
    x: i32,
    y: i32,
) -> i32 {
    for (dx, dy) in PERIMETER {
        let (rx, ry) = (x + dx, y + dy);
        if map.get(rx, ry).is_road() {
            let cur = traffic.0.world_get(rx, ry);
            traffic
                .0
                .world_set(rx, ry, cur.saturating_add(TRAFFIC_DEPOSIT).min(TRAFFIC_MAX));
            return rng.range(9) as i32;
        }
    }
    -1
}

/// Decay every overlay cell toward zero. Runs once per cycle in phase 10.
pub fn dec_traffic(traffic: &mut TrafficDensity) {
    for v in traffic.0.data_mut() {
        // Faster decay at the top of the range keeps hotspots transient.
        *v = match *v {
            0 => 0,
            n if n > 200 => n - 34,
            n if n > 24 => n - 24,
            _ => 0,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::{Tile, BLBN, ROADS};

    #[test]
    fn test_no_road_returns_negative() {
        let map = TileMap::default();
        let mut traffic = TrafficDensity::default();
        let mut rng = SimRng::from_seed(1);
        assert_eq!(make_traffic(&map, &mut traffic, &mut rng, 20, 20), -1);
    }

    #[test]
    fn test_perimeter_road_found() {
        let mut map = TileMap::default();
        let mut traffic = TrafficDensity::default();
        let mut rng = SimRng::from_seed(1);
        // Road just north of the 3×3 footprint centered at (20, 20).
        map.set(20, 18, Tile::new(ROADS, BLBN));
        let cost = make_traffic(&map, &mut traffic, &mut rng, 20, 20);
        assert!((0..=9).contains(&cost));
        assert!(traffic.0.world_get(20, 18) > 0);
    }

    #[test]
    fn test_adjacent_but_inside_footprint_does_not_count() {
        let mut map = TileMap::default();
        let mut traffic = TrafficDensity::default();
        let mut rng = SimRng::from_seed(1);
        // A road inside the footprint itself is not access.
        map.set(20, 20, Tile::new(ROADS, BLBN));
        assert_eq!(make_traffic(&map, &mut traffic, &mut rng, 20, 20), -1);
    }

    #[test]
    fn test_dec_traffic_drains() {
        let mut traffic = TrafficDensity::default();
        traffic.0.set(5, 5, 240);
        traffic.0.set(6, 5, 20);
        for _ in 0..12 {
            dec_traffic(&mut traffic);
        }
        assert_eq!(traffic.0.get(5, 5), 0);
        assert_eq!(traffic.0.get(6, 5), 0);
    }
}
