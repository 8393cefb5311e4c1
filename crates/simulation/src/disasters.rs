//! Disaster effects on the grid.
//!
//! Triggered either by the player (control surface) or by the phase-15
//! roll. Each effect mutates the map directly and announces itself through
//! the message log; the tornado and monster do their damage over time as
//! sprites.

use bevy::prelude::*;
use bitcode::{Decode, Encode};

use crate::budget::GameLevel;
use crate::config::{WORLD_H, WORLD_W};
use crate::messages::MessageLog;
use crate::pollution::PollutionDensity;
use crate::sim_rng::SimRng;
use crate::sprites::{Sprite, SpriteKind, SpriteList};
use crate::tile_map::TileMap;
use crate::tiles::{Tile, ANIMBIT, BULLBIT, FIREBASE, FLOOD, RADTILE, RUBBLE};

/// How many map-scan cycles a fresh flood keeps rising.
const FLOOD_DURATION: u16 = 30;

#[derive(Resource, Clone, Copy, Debug, Encode, Decode)]
pub struct DisasterState {
    pub enabled: bool,
    /// Cycles of flood spread remaining; flood tiles recede once it hits 0.
    pub flood_count: u16,
}

impl Default for DisasterState {
    fn default() -> Self {
        Self {
            enabled: true,
            flood_count: 0,
        }
    }
}

fn random_cell(rng: &mut SimRng) -> (i32, i32) {
    (
        rng.range(WORLD_W as u16 - 1) as i32,
        rng.range(WORLD_H as u16 - 1) as i32,
    )
}

/// Ignite a random burnable cell.
pub fn set_fire(map: &mut TileMap, rng: &mut SimRng, messages: &mut MessageLog, city_time: u64) {
    for _ in 0..100 {
        let (x, y) = random_cell(rng);
        if !map.get(x, y).burnable() {
            continue;
        }
        let flame = FIREBASE + (rng.rand16() & 7);
        map.set(x, y, Tile::new(flame, ANIMBIT));
        map.bump_serial();
        messages.push_important("Fire reported!", (x, y), city_time);
        return;
    }
}

/// Start a flood from a random shoreline.
pub fn make_flood(
    map: &mut TileMap,
    rng: &mut SimRng,
    disasters: &mut DisasterState,
    messages: &mut MessageLog,
    city_time: u64,
) {
    for _ in 0..300 {
        let (x, y) = random_cell(rng);
        if !map.get(x, y).is_water() {
            continue;
        }
        let mut flooded = false;
        for dx in -1..=1 {
            for dy in -1..=1 {
                let t = map.get(x + dx, y + dy);
                if t.bulldozable() && !t.zone_center() {
                    map.set(x + dx, y + dy, Tile::new(FLOOD + rng.range(2), 0));
                    flooded = true;
                }
            }
        }
        if flooded {
            disasters.flood_count = FLOOD_DURATION;
            map.bump_serial();
            messages.push_important("Flooding reported!", (x, y), city_time);
            return;
        }
    }
}

/// Shake 300..1000 random cells into rubble and fire.
pub fn make_earthquake(
    map: &mut TileMap,
    rng: &mut SimRng,
    messages: &mut MessageLog,
    city_time: u64,
) {
    let epicenter = random_cell(rng);
    let shocks = 300 + rng.range(699) as u32;
    for _ in 0..shocks {
        let (x, y) = random_cell(rng);
        let t = map.get(x, y);
        if t.bulldozable() && !t.zone_center() {
            if rng.range(2) != 0 {
                map.set(x, y, Tile::new(RUBBLE + rng.range(3), BULLBIT));
            } else if t.burnable() {
                map.set(x, y, Tile::new(FIREBASE + rng.range(7), ANIMBIT));
            }
        }
    }
    map.bump_serial();
    messages.push_important("Earthquake!", epicenter, city_time);
}

/// Blow a nuclear plant: fire inside the 5×5, fallout across the 7×7.
pub fn meltdown(
    map: &mut TileMap,
    rng: &mut SimRng,
    sprites: &mut SpriteList,
    messages: &mut MessageLog,
    city_time: u64,
    x: i32,
    y: i32,
) {
    for dx in -3..=3 {
        for dy in -3..=3 {
            if rng.one_in(4) {
                map.set(x + dx, y + dy, Tile::new(RADTILE, 0));
            }
        }
    }
    for dx in -2..=2 {
        for dy in -2..=2 {
            let t = map.get(x + dx, y + dy);
            if t.burnable() || t.is_dirt() {
                map.set(
                    x + dx,
                    y + dy,
                    Tile::new(FIREBASE + rng.range(7), ANIMBIT),
                );
            }
        }
    }
    sprites.spawn(Sprite::new(SpriteKind::Explosion, x, y));
    map.bump_serial();
    messages.push_important("Nuclear meltdown!", (x, y), city_time);
}

/// Find a nuclear plant and melt it down. No-op without one.
pub fn make_meltdown(
    map: &mut TileMap,
    rng: &mut SimRng,
    sprites: &mut SpriteList,
    messages: &mut MessageLog,
    city_time: u64,
) {
    for x in 0..WORLD_W as i32 {
        for y in 0..WORLD_H as i32 {
            if map.get(x, y).character() == crate::tiles::NUCLEAR {
                meltdown(map, rng, sprites, messages, city_time, x, y);
                return;
            }
        }
    }
}

pub fn make_tornado(
    sprites: &mut SpriteList,
    rng: &mut SimRng,
    messages: &mut MessageLog,
    city_time: u64,
) {
    let (x, y) = random_cell(rng);
    let (dx, dy) = random_cell(rng);
    sprites.spawn(Sprite::new(SpriteKind::Tornado, x, y).with_dest(dx, dy));
    messages.push_important("Tornado sighted!", (x, y), city_time);
}

/// The monster rises and heads for the dirtiest part of town.
pub fn make_monster(
    sprites: &mut SpriteList,
    rng: &mut SimRng,
    pollution: &PollutionDensity,
    messages: &mut MessageLog,
    city_time: u64,
) {
    let (x, y) = random_cell(rng);
    let (px, py) = pollution.max_at;
    sprites.spawn(Sprite::new(SpriteKind::Monster, x, y).with_dest(px, py));
    messages.push_important("A monster has been sighted!", (x, y), city_time);
}

/// Blast a 3×3: an explosion sprite plus rubble where the blast can bite.
pub fn make_explosion(
    map: &mut TileMap,
    rng: &mut SimRng,
    sprites: &mut SpriteList,
    messages: &mut MessageLog,
    city_time: u64,
    x: i32,
    y: i32,
) {
    sprites.spawn(Sprite::new(SpriteKind::Explosion, x, y));
    for dx in -1..=1 {
        for dy in -1..=1 {
            if map.get(x + dx, y + dy).bulldozable() {
                map.set(
                    x + dx,
                    y + dy,
                    Tile::new(RUBBLE + rng.range(3), BULLBIT),
                );
            }
        }
    }
    map.bump_serial();
    messages.push_important("Explosion detected!", (x, y), city_time);
}

/// Bring down the first aircraft in the sky.
pub fn make_air_crash(
    map: &mut TileMap,
    rng: &mut SimRng,
    sprites: &mut SpriteList,
    messages: &mut MessageLog,
    city_time: u64,
) {
    let pos = sprites
        .find(SpriteKind::Airplane)
        .or_else(|| sprites.find(SpriteKind::Helicopter))
        .map(Sprite::tile_pos);
    if let Some((x, y)) = pos {
        kill_one_aircraft(sprites);
        make_explosion(map, rng, sprites, messages, city_time, x, y);
        messages.push_important("Plane crashed!", (x, y), city_time);
    }
}

fn kill_one_aircraft(sprites: &mut SpriteList) {
    // Killing marks frame 0; the sprite ticker sweeps it next tick.
    let list = sprites.sprites_mut();
    if let Some(s) = list
        .iter_mut()
        .find(|s| matches!(s.kind, SpriteKind::Airplane | SpriteKind::Helicopter))
    {
        s.frame = 0;
    }
}

/// Phase-15 roll: rare, level-scaled random catastrophe.
#[allow(clippy::too_many_arguments)]
pub fn random_disaster(
    map: &mut TileMap,
    rng: &mut SimRng,
    sprites: &mut SpriteList,
    disasters: &mut DisasterState,
    pollution: &PollutionDensity,
    messages: &mut MessageLog,
    level: GameLevel,
    city_time: u64,
) {
    if !disasters.enabled || !rng.one_in(level.disaster_odds()) {
        return;
    }
    info!("Random disaster roll hit at city time {city_time}");
    match rng.range(7) {
        0 | 1 => set_fire(map, rng, messages, city_time),
        2 | 3 => make_flood(map, rng, disasters, messages, city_time),
        4 => make_air_crash(map, rng, sprites, messages, city_time),
        5 => make_tornado(sprites, rng, messages, city_time),
        6 => make_earthquake(map, rng, messages, city_time),
        _ => make_monster(sprites, rng, pollution, messages, city_time),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::{BLBN, WOODS};

    fn woodland_map() -> TileMap {
        let mut map = TileMap::default();
        for x in 0..WORLD_W as i32 {
            for y in 0..WORLD_H as i32 {
                map.set(x, y, Tile::new(WOODS, BLBN));
            }
        }
        map
    }

    #[test]
    fn test_set_fire_ignites_burnable() {
        let mut map = woodland_map();
        let mut rng = SimRng::from_seed(3);
        let mut messages = MessageLog::default();
        set_fire(&mut map, &mut rng, &mut messages, 0);
        let fires = map.cells().iter().filter(|t| t.is_fire()).count();
        assert_eq!(fires, 1);
        assert!(messages.latest().unwrap().important);
    }

    #[test]
    fn test_earthquake_leaves_rubble_or_fire() {
        let mut map = woodland_map();
        let mut rng = SimRng::from_seed(3);
        let mut messages = MessageLog::default();
        make_earthquake(&mut map, &mut rng, &mut messages, 0);
        let wrecked = map
            .cells()
            .iter()
            .filter(|t| t.is_rubble() || t.is_fire())
            .count();
        assert!(wrecked >= 150, "only {wrecked} cells wrecked");
    }

    #[test]
    fn test_meltdown_effects() {
        let mut found_fallout = false;
        for seed in 0..4 {
            let mut map = woodland_map();
            let mut rng = SimRng::from_seed(seed);
            let mut sprites = SpriteList::default();
            let mut messages = MessageLog::default();
            meltdown(&mut map, &mut rng, &mut sprites, &mut messages, 0, 50, 50);

            // Every core cell either burns or glows; woods leave nothing
            // untouched inside the 5×5.
            let mut core_fires = 0;
            let mut core_fallout = 0;
            for dx in -2..=2 {
                for dy in -2..=2 {
                    let t = map.get(50 + dx, 50 + dy);
                    if t.is_fire() {
                        core_fires += 1;
                    } else if t.character() == RADTILE {
                        core_fallout += 1;
                    }
                }
            }
            assert_eq!(core_fires + core_fallout, 25);
            assert!(core_fires >= 12, "core fires {core_fires}");
            assert_eq!(sprites.count_of(SpriteKind::Explosion), 1);

            for dx in -3..=3 {
                for dy in -3..=3 {
                    if map.get(50 + dx, 50 + dy).character() == RADTILE {
                        found_fallout = true;
                    }
                }
            }
            if found_fallout {
                break;
            }
        }
        assert!(found_fallout);
    }

    #[test]
    fn test_explosion_clears_3x3() {
        let mut map = woodland_map();
        let mut rng = SimRng::from_seed(3);
        let mut sprites = SpriteList::default();
        let mut messages = MessageLog::default();
        make_explosion(&mut map, &mut rng, &mut sprites, &mut messages, 0, 30, 30);
        for dx in -1..=1 {
            for dy in -1..=1 {
                assert!(map.get(30 + dx, 30 + dy).is_rubble());
            }
        }
        assert_eq!(sprites.count_of(SpriteKind::Explosion), 1);
    }

    #[test]
    fn test_flood_needs_water() {
        let mut map = woodland_map();
        let mut rng = SimRng::from_seed(3);
        let mut disasters = DisasterState::default();
        let mut messages = MessageLog::default();
        make_flood(&mut map, &mut rng, &mut disasters, &mut messages, 0);
        assert_eq!(disasters.flood_count, 0);

        // Thread water channels through the woods; now the flood can take
        // hold almost anywhere it looks.
        for x in (20..80).step_by(2) {
            for y in 10..90 {
                map.set(x, y, Tile::new(crate::tiles::RIVER, 0));
            }
        }
        make_flood(&mut map, &mut rng, &mut disasters, &mut messages, 0);
        assert_eq!(disasters.flood_count, FLOOD_DURATION);
        assert!(map.cells().iter().any(|t| t.is_flood()));
    }

    #[test]
    fn test_air_crash_without_aircraft_is_noop() {
        let mut map = woodland_map();
        let mut rng = SimRng::from_seed(3);
        let mut sprites = SpriteList::default();
        let mut messages = MessageLog::default();
        make_air_crash(&mut map, &mut rng, &mut sprites, &mut messages, 0);
        assert!(messages.latest().is_none());
        assert!(sprites.is_empty());
    }
}
