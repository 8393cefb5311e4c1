//! Population density overlay and the city's center of mass.

use bevy::prelude::*;

use crate::overlay::{smooth, OverlayMap};
use crate::sim_rng::SimRng;
use crate::tile_map::TileMap;
use crate::tiles::Tile;
use crate::zones;

#[derive(Resource, Default, Clone)]
pub struct PopulationDensity {
    pub map: OverlayMap<u8, 2>,
    pub average: u8,
}

/// Population-weighted center of mass, in world coordinates. Land value and
/// the commercial-rate map both measure distance from here.
#[derive(Resource, Clone, Copy, Debug)]
pub struct CityCenter {
    pub x: i32,
    pub y: i32,
}

impl Default for CityCenter {
    fn default() -> Self {
        Self {
            x: crate::config::WORLD_W as i32 / 2,
            y: crate::config::WORLD_H as i32 / 2,
        }
    }
}

impl CityCenter {
    pub fn manhattan_to(&self, x: i32, y: i32) -> i32 {
        (self.x - x).abs() + (self.y - y).abs()
    }
}

/// Weight used by the density map: commercial and industrial zone
/// populations count eight-fold so job centers read as dense.
fn density_weight(rng: &mut SimRng, tile: Tile) -> u32 {
    if tile.is_residential() {
        zones::residential_population(rng, tile.character())
    } else if tile.is_commercial() {
        zones::commercial_population(tile.character()) * 8
    } else if tile.is_industrial() {
        zones::industrial_population(tile.character()) * 8
    } else {
        0
    }
}

pub fn population_density_scan(
    map: &TileMap,
    rng: &mut SimRng,
    density: &mut PopulationDensity,
    center: &mut CityCenter,
) {
    let mut temp_a = OverlayMap::<u8, 2>::default();
    let mut temp_b = OverlayMap::<u8, 2>::default();

    let mut weight_sum: u64 = 0;
    let mut x_sum: u64 = 0;
    let mut y_sum: u64 = 0;

    for x in 0..crate::config::WORLD_W as i32 {
        for y in 0..crate::config::WORLD_H as i32 {
            let tile = map.get(x, y);
            if !tile.zone_center() {
                continue;
            }
            let pop = density_weight(rng, tile).min(255) as u8;
            let cur = temp_a.world_get(x, y);
            temp_a.world_set(x, y, cur.saturating_add(pop));

            weight_sum += pop as u64;
            x_sum += x as u64 * pop as u64;
            y_sum += y as u64 * pop as u64;
        }
    }

    smooth(&temp_a, &mut temp_b);
    smooth(&temp_b, &mut temp_a);
    smooth(&temp_a, &mut density.map);

    let total: u32 = density.map.data().iter().map(|&v| v as u32).sum();
    density.average = (total / density.map.data().len() as u32) as u8;

    if weight_sum > 0 {
        center.x = (x_sum / weight_sum) as i32;
        center.y = (y_sum / weight_sum) as i32;
    } else {
        *center = CityCenter::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::{Tile, FREEZ, RZB, ZONEBIT};

    #[test]
    fn test_empty_map_keeps_default_center() {
        let map = TileMap::default();
        let mut rng = SimRng::from_seed(1);
        let mut density = PopulationDensity::default();
        let mut center = CityCenter { x: 3, y: 3 };
        population_density_scan(&map, &mut rng, &mut density, &mut center);
        assert_eq!(center.x, crate::config::WORLD_W as i32 / 2);
        assert!(density.map.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_center_follows_population() {
        let mut map = TileMap::default();
        map.set(100, 80, Tile::new(RZB, ZONEBIT));
        let mut rng = SimRng::from_seed(1);
        let mut density = PopulationDensity::default();
        let mut center = CityCenter::default();
        population_density_scan(&map, &mut rng, &mut density, &mut center);
        assert_eq!((center.x, center.y), (100, 80));
    }

    #[test]
    fn test_density_spreads_around_zone() {
        let mut map = TileMap::default();
        map.set(40, 40, Tile::new(RZB, ZONEBIT));
        let mut rng = SimRng::from_seed(1);
        let mut density = PopulationDensity::default();
        let mut center = CityCenter::default();
        population_density_scan(&map, &mut rng, &mut density, &mut center);
        assert!(density.map.world_get(40, 40) > 0);
        // Neighboring blocks pick up smoothed mass.
        assert!(density.map.world_get(44, 40) > 0);
    }

    #[test]
    fn test_empty_res_zone_adds_nothing() {
        let mut map = TileMap::default();
        map.set(40, 40, Tile::new(FREEZ, ZONEBIT));
        let mut rng = SimRng::from_seed(1);
        let mut density = PopulationDensity::default();
        let mut center = CityCenter::default();
        population_density_scan(&map, &mut rng, &mut density, &mut center);
        assert_eq!(density.map.world_get(40, 40), 0);
    }
}
