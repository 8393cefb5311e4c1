//! Fixed world and timing constants.

pub const WORLD_W: usize = 120;
pub const WORLD_H: usize = 100;

/// City time ticks per calendar month / year.
pub const CITYTIMES_PER_MONTH: u64 = 4;
pub const CITYTIMES_PER_YEAR: u64 = 48;

pub const DEFAULT_STARTING_YEAR: u64 = 1900;

/// Ring-history lengths: six long histories plus one miscellaneous.
pub const HISTORY_LENGTH: usize = 480;
pub const MISC_HISTORY_LENGTH: usize = 240;

/// How often (in city time) the short and long censuses are taken.
pub const CENSUS_FREQUENCY_10: u64 = 4;
pub const CENSUS_FREQUENCY_120: u64 = 48;

/// Tax is collected once per game year.
pub const TAX_FREQUENCY: u64 = 48;

pub const DEFAULT_CITY_TAX: u32 = 7;
pub const MAX_CITY_TAX: u32 = 20;

/// Funding-effect ceilings. Road effect saturates much lower than the
/// station effects because it scales a per-tile decay roll, not a reach map.
pub const MAX_ROAD_EFFECT: i32 = 32;
pub const MAX_POLICE_EFFECT: i32 = 1000;
pub const MAX_FIRE_EFFECT: i32 = 1000;

/// Bounded stack for the power flood-fill. Overflowing pushes are dropped,
/// which can underserve an isolated sub-grid but never panics.
pub const POWER_STACK_SIZE: usize = WORLD_W * WORLD_H / 4;

/// Baseline external demand feeding the industrial valve.
pub const EXTERNAL_MARKET: f32 = 4.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_splits_into_eighths() {
        // The map scan walks one vertical eighth per phase; the world width
        // must divide evenly so no column is skipped or scanned twice.
        assert_eq!(WORLD_W % 8, 0);
    }

    #[test]
    fn test_power_stack_bound() {
        assert_eq!(POWER_STACK_SIZE, 3000);
    }
}
