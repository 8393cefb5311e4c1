//! Census counters and ring histories.
//!
//! The map scan accumulates counts into a working set over phases 1..8; at
//! the top of the next cycle the working set is published and cleared, so
//! consumers (valves, budget, evaluation) always read one complete scan.

use bevy::prelude::*;
use bitcode::{Decode, Encode};

use crate::config::{HISTORY_LENGTH, MISC_HISTORY_LENGTH};

/// One scan cycle's worth of counts.
#[derive(Clone, Copy, Debug, Default, Encode, Decode)]
pub struct CensusCounts {
    /// Population-weighted zone sums.
    pub res_pop: u32,
    pub com_pop: u32,
    pub ind_pop: u32,
    /// Zone-center counts.
    pub res_zones: u32,
    pub com_zones: u32,
    pub ind_zones: u32,
    pub powered_zones: u32,
    pub unpowered_zones: u32,
    /// Infrastructure tallies.
    pub road_total: u32,
    pub rail_total: u32,
    pub fire_pop: u32,
    /// Special-building counts.
    pub fire_station_pop: u32,
    pub police_station_pop: u32,
    pub stadium_pop: u32,
    pub port_pop: u32,
    pub airport_pop: u32,
    pub coal_pop: u32,
    pub nuclear_pop: u32,
    pub hospital_pop: u32,
    pub church_pop: u32,
}

impl CensusCounts {
    /// Tax-base population: residential counts one head per eight zone
    /// population points.
    pub fn population(&self) -> u32 {
        self.res_pop / 8 + self.com_pop + self.ind_pop
    }

    /// Displayed city population.
    pub fn city_population(&self) -> u32 {
        self.population() * 20
    }

    pub fn total_zones(&self) -> u32 {
        self.powered_zones + self.unpowered_zones
    }
}

/// One series of history samples, most recent at index 0.
#[derive(Clone, Debug, Encode, Decode)]
pub struct History {
    samples: Vec<i16>,
}

impl History {
    fn new(len: usize) -> Self {
        Self {
            samples: vec![0; len],
        }
    }

    pub fn push(&mut self, value: i16) {
        let len = self.samples.len();
        self.samples.copy_within(0..len - 1, 1);
        self.samples[0] = value;
    }

    pub fn get(&self, index: usize) -> i16 {
        self.samples.get(index).copied().unwrap_or(0)
    }

    pub fn latest(&self) -> i16 {
        self.samples[0]
    }

    fn max_over(&self, len: usize) -> i16 {
        self.samples[..len.min(self.samples.len())]
            .iter()
            .copied()
            .max()
            .unwrap_or(0)
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn restore(&mut self, samples: Vec<i16>) {
        debug_assert_eq!(samples.len(), self.samples.len());
        self.samples = samples;
    }
}

/// All census state: the working/published counts, the six long ring
/// histories plus the miscellaneous one, and the cached maxima.
#[derive(Resource, Clone, Debug, Encode, Decode)]
pub struct Census {
    pub working: CensusCounts,
    pub totals: CensusCounts,

    pub res_history: History,
    pub com_history: History,
    pub ind_history: History,
    pub crime_history: History,
    pub pollution_history: History,
    pub money_history: History,
    pub misc_history: History,

    /// Maxima over the short (first 120 entries) and long (all 480) scales,
    /// recomputed as samples land.
    pub res_max_10: i16,
    pub res_max_120: i16,
    pub com_max_10: i16,
    pub com_max_120: i16,
    pub ind_max_10: i16,
    pub ind_max_120: i16,
}

impl Default for Census {
    fn default() -> Self {
        Self {
            working: CensusCounts::default(),
            totals: CensusCounts::default(),
            res_history: History::new(HISTORY_LENGTH),
            com_history: History::new(HISTORY_LENGTH),
            ind_history: History::new(HISTORY_LENGTH),
            crime_history: History::new(HISTORY_LENGTH),
            pollution_history: History::new(HISTORY_LENGTH),
            money_history: History::new(HISTORY_LENGTH),
            misc_history: History::new(MISC_HISTORY_LENGTH),
            res_max_10: 0,
            res_max_120: 0,
            com_max_10: 0,
            com_max_120: 0,
            ind_max_10: 0,
            ind_max_120: 0,
        }
    }
}

const SHORT_SCALE: usize = 120;

impl Census {
    /// Publish the completed working counts and reset them for the next scan.
    pub fn roll_over(&mut self) {
        self.totals = self.working;
        self.working = CensusCounts::default();
    }

    /// Short-interval census: push one sample into every history and refresh
    /// the 10-scale maxima.
    pub fn take_10(&mut self, crime_average: u8, pollution_average: u8, cash_flow: i64) {
        let clamp16 = |v: i64| v.clamp(i16::MIN as i64, i16::MAX as i64) as i16;

        self.res_history.push(clamp16(self.totals.res_pop as i64 / 8));
        self.com_history.push(clamp16(self.totals.com_pop as i64));
        self.ind_history.push(clamp16(self.totals.ind_pop as i64));
        self.crime_history.push(crime_average as i16);
        self.pollution_history.push(pollution_average as i16);
        self.money_history.push(clamp16(cash_flow));
        self.misc_history
            .push(clamp16(self.totals.city_population() as i64 / 8));

        self.res_max_10 = self.res_history.max_over(SHORT_SCALE);
        self.com_max_10 = self.com_history.max_over(SHORT_SCALE);
        self.ind_max_10 = self.ind_history.max_over(SHORT_SCALE);
    }

    /// Long-interval census: refresh the 120-scale maxima over the full
    /// rings.
    pub fn take_120(&mut self) {
        self.res_max_120 = self.res_history.max_over(HISTORY_LENGTH);
        self.com_max_120 = self.com_history.max_over(HISTORY_LENGTH);
        self.ind_max_120 = self.ind_history.max_over(HISTORY_LENGTH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_index_zero_is_most_recent() {
        let mut h = History::new(8);
        h.push(5);
        h.push(9);
        assert_eq!(h.latest(), 9);
        assert_eq!(h.get(1), 5);
        assert_eq!(h.get(7), 0);
    }

    #[test]
    fn test_history_drops_oldest() {
        let mut h = History::new(4);
        for v in 1..=6 {
            h.push(v);
        }
        assert_eq!(h.samples(), &[6, 5, 4, 3]);
    }

    #[test]
    fn test_population_formula() {
        let counts = CensusCounts {
            res_pop: 80,
            com_pop: 7,
            ind_pop: 3,
            ..Default::default()
        };
        assert_eq!(counts.population(), 20);
        assert_eq!(counts.city_population(), 400);
    }

    #[test]
    fn test_roll_over_publishes_and_clears() {
        let mut census = Census::default();
        census.working.res_pop = 42;
        census.roll_over();
        assert_eq!(census.totals.res_pop, 42);
        assert_eq!(census.working.res_pop, 0);
    }

    #[test]
    fn test_take_10_tracks_maxima() {
        let mut census = Census::default();
        census.totals.res_pop = 800;
        census.take_10(0, 0, 0);
        census.totals.res_pop = 160;
        census.take_10(0, 0, 0);
        assert_eq!(census.res_history.latest(), 20);
        assert_eq!(census.res_max_10, 100);
    }
}
