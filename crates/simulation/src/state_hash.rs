//! Deterministic state hashing for reproducibility checks.
//!
//! A 64-bit FNV-1a hash over the load-bearing simulation state, computed in
//! a fixed order: city time, funds, census totals, RNG state, then every
//! map cell column-major. No HashMaps, no pointers, no floats — two runs
//! from the same seed must produce identical hash streams.

use std::hash::{Hash, Hasher};

use bevy::prelude::*;

use crate::budget::Budget;
use crate::census::Census;
use crate::scheduler::CityClock;
use crate::sim_rng::SimRng;
use crate::tile_map::TileMap;

/// The hash computed at the end of the most recent tick.
#[derive(Resource, Default, Clone, Copy, Debug)]
pub struct StateHash {
    pub city_time: u64,
    pub hash: u64,
}

// ---------------------------------------------------------------------------
// FNV-1a hasher (deterministic, no random seed)
// ---------------------------------------------------------------------------

struct Fnv1aHasher {
    state: u64,
}

impl Fnv1aHasher {
    const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    fn new() -> Self {
        Self {
            state: Self::FNV_OFFSET_BASIS,
        }
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= byte as u64;
            self.state = self.state.wrapping_mul(Self::FNV_PRIME);
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Hash the current simulation state.
pub fn compute_state_hash(
    city_time: u64,
    total_funds: i64,
    population: u32,
    rng_state: u32,
    map: &TileMap,
) -> u64 {
    let mut hasher = Fnv1aHasher::new();
    city_time.hash(&mut hasher);
    total_funds.hash(&mut hasher);
    population.hash(&mut hasher);
    rng_state.hash(&mut hasher);
    for tile in map.cells() {
        tile.raw().hash(&mut hasher);
    }
    hasher.finish()
}

/// PostSim: refresh the [`StateHash`] resource.
pub fn update_state_hash(
    clock: Res<CityClock>,
    budget: Res<Budget>,
    census: Res<Census>,
    rng: Res<SimRng>,
    map: Res<TileMap>,
    mut hash: ResMut<StateHash>,
) {
    hash.city_time = clock.city_time;
    hash.hash = compute_state_hash(
        clock.city_time,
        budget.total_funds,
        census.totals.population(),
        rng.state(),
        &map,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::{Tile, ROADS};

    #[test]
    fn test_hash_is_stable() {
        let map = TileMap::default();
        let a = compute_state_hash(10, 500, 7, 99, &map);
        let b = compute_state_hash(10, 500, 7, 99, &map);
        assert_eq!(a, b);
    }

    #[test]
    fn test_hash_sees_every_input() {
        let map = TileMap::default();
        let base = compute_state_hash(10, 500, 7, 99, &map);
        assert_ne!(base, compute_state_hash(11, 500, 7, 99, &map));
        assert_ne!(base, compute_state_hash(10, 501, 7, 99, &map));
        assert_ne!(base, compute_state_hash(10, 500, 8, 99, &map));
        assert_ne!(base, compute_state_hash(10, 500, 7, 98, &map));
    }

    #[test]
    fn test_hash_sees_map_cells() {
        let clean = TileMap::default();
        let mut dirty = TileMap::default();
        dirty.set(55, 44, Tile::new(ROADS, 0));
        assert_ne!(
            compute_state_hash(0, 0, 0, 0, &clean),
            compute_state_hash(0, 0, 0, 0, &dirty)
        );
    }
}
