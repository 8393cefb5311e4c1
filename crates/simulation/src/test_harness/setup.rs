//! Builder methods for arranging city state in tests.

use crate::budget::Budget;
use crate::power::{power_scan, PowerGrid};
use crate::state_hash::compute_state_hash;
use crate::tile_map::TileMap;
use crate::tiles::Tile;

use super::TestCity;

impl TestCity {
    /// Set the treasury to an exact amount.
    pub fn with_funds(mut self, funds: i64) -> Self {
        self.resource_mut::<Budget>().total_funds = funds;
        self
    }

    /// Turn off the random disaster roll. Growth tests use this so a stray
    /// fire can't torch the zone under measurement.
    pub fn without_disasters(mut self) -> Self {
        self.resource_mut::<crate::disasters::DisasterState>().enabled = false;
        self
    }

    /// Level the whole map to bare dirt. Tool and growth tests use this to
    /// sidestep whatever terrain the seed produced.
    pub fn flattened(mut self) -> Self {
        let mut map = self.resource_mut::<TileMap>();
        map.fill(Tile::default());
        map.bump_serial();
        self
    }

    /// Rebuild the power grid immediately instead of waiting for phase 11's
    /// cadence.
    pub fn run_power_scan(&mut self) {
        let world = self.world_mut();
        world.resource_scope(|world, mut power: bevy::prelude::Mut<PowerGrid>| {
            power_scan(world.resource::<TileMap>(), &mut power);
        });
    }

    /// Hash of the current load-bearing state, for determinism comparisons.
    pub fn state_hash(&self) -> u64 {
        let clock = self.resource::<crate::scheduler::CityClock>();
        let budget = self.resource::<Budget>();
        let census = self.resource::<crate::census::Census>();
        let rng = self.resource::<crate::sim_rng::SimRng>();
        compute_state_hash(
            clock.city_time,
            budget.total_funds,
            census.totals.population(),
            rng.state(),
            self.resource::<TileMap>(),
        )
    }

    pub fn total_funds(&self) -> i64 {
        self.resource::<Budget>().total_funds
    }

    pub fn map_serial(&self) -> u64 {
        self.resource::<TileMap>().serial()
    }

    pub fn tile_at(&self, x: i32, y: i32) -> Tile {
        self.resource::<TileMap>().get(x, y)
    }
}
