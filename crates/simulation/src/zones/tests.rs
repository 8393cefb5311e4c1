//! Zone growth integration tests on a small hand-built town.

use crate::census::Census;
use crate::game_actions::{Tool, ToolResult};
use crate::test_harness::TestCity;
use crate::tiles::{Tile, BULLBIT, FREEZ, HOUSE, RUBBLE};

/// A coal plant wired to the residential block at (16,16), with road access
/// along its southern edge.
fn powered_res_city() -> TestCity {
    let mut city = TestCity::new().flattened().with_funds(50_000).without_disasters();
    assert_eq!(city.do_tool(Tool::CoalPower, 11, 10), ToolResult::Ok);
    for (x, y) in [(14, 12), (15, 12), (16, 12), (16, 13), (16, 14)] {
        assert_eq!(city.do_tool(Tool::Wire, x, y), ToolResult::Ok);
    }
    for x in 14..=18 {
        assert_eq!(city.do_tool(Tool::Road, x, 18), ToolResult::Ok);
    }
    assert_eq!(city.do_tool(Tool::Residential, 16, 16), ToolResult::Ok);
    city
}

#[test]
fn test_residential_grows_with_power_and_road() {
    let mut city = powered_res_city();
    city.sim_frames(2000);
    let census = city.resource::<Census>();
    assert!(census.totals.res_pop >= 8, "res_pop {}", census.totals.res_pop);
    assert!(city.tile_at(16, 16).character() >= HOUSE);
    assert!(city.tile_at(16, 16).powered());
}

#[test]
fn test_residential_without_power_stays_empty() {
    let mut city = TestCity::new().flattened().with_funds(50_000).without_disasters();
    for x in 14..=18 {
        city.do_tool(Tool::Road, x, 18);
    }
    assert_eq!(city.do_tool(Tool::Residential, 16, 16), ToolResult::Ok);
    city.sim_frames(2000);
    assert_eq!(city.tile_at(16, 16).character(), FREEZ);
    assert!(!city.tile_at(16, 16).powered());
    assert_eq!(city.resource::<Census>().totals.res_pop, 0);
}

#[test]
fn test_residential_without_road_stays_empty() {
    let mut city = TestCity::new().flattened().with_funds(50_000).without_disasters();
    assert_eq!(city.do_tool(Tool::CoalPower, 11, 10), ToolResult::Ok);
    for (x, y) in [(14, 12), (15, 12), (16, 12), (16, 13), (16, 14)] {
        city.do_tool(Tool::Wire, x, y);
    }
    assert_eq!(city.do_tool(Tool::Residential, 16, 16), ToolResult::Ok);
    city.sim_frames(2000);
    assert_eq!(city.tile_at(16, 16).character(), FREEZ);
    assert_eq!(city.resource::<Census>().totals.res_pop, 0);
}

#[test]
fn test_zone_counts_reach_census() {
    let mut city = powered_res_city();
    city.sim_cycles(2);
    let census = city.resource::<Census>();
    assert_eq!(census.totals.res_zones, 1);
    assert_eq!(census.totals.coal_pop, 1);
    assert!(census.totals.road_total >= 5);
}

#[test]
fn test_rubble_in_footprint_is_repaired() {
    let mut city = powered_res_city();
    city.sim_frames(200);
    city.resource_mut::<crate::tile_map::TileMap>()
        .set(15, 16, Tile::new(RUBBLE, BULLBIT));
    city.sim_cycles(9);
    let t = city.tile_at(15, 16);
    assert!(!t.is_rubble());
    assert!(t.is_residential());
    assert!(t.conductive());
}

#[test]
fn test_commercial_grows_with_market_access() {
    let mut city = TestCity::new().flattened().with_funds(50_000).without_disasters();
    assert_eq!(city.do_tool(Tool::CoalPower, 11, 10), ToolResult::Ok);
    for (x, y) in [(14, 12), (15, 12), (16, 12), (16, 13), (16, 14)] {
        city.do_tool(Tool::Wire, x, y);
    }
    for x in 14..=18 {
        city.do_tool(Tool::Road, x, 18);
    }
    assert_eq!(city.do_tool(Tool::Commercial, 16, 16), ToolResult::Ok);
    city.sim_frames(2000);
    let census = city.resource::<Census>();
    assert!(census.totals.com_pop >= 1, "com_pop {}", census.totals.com_pop);
}

#[test]
fn test_industrial_grows_beside_workers() {
    // Industry needs a labor pool; a lone factory town starves. Pair the
    // factory with housing and let power flow through the zone skeletons.
    let mut city = powered_res_city();
    for x in 19..=20 {
        city.do_tool(Tool::Road, x, 18);
    }
    assert_eq!(city.do_tool(Tool::Industrial, 19, 16), ToolResult::Ok);
    city.sim_frames(2000);
    let census = city.resource::<Census>();
    assert!(census.totals.ind_pop >= 1, "ind_pop {}", census.totals.ind_pop);
    assert!(city.tile_at(19, 16).powered());
}
