//! Tool engine tests, run against a flattened headless city.

use crate::budget::Budget;
use crate::game_actions::{GameAction, Tool, ToolResult, ToolSettings};
use crate::game_actions::{ActionQueue, ActionResultLog};
use crate::test_harness::TestCity;
use crate::tiles::{
    Tile, AIRPORT, BLBN, COALBASE, FREEZ, POWERPLANT, RIVER, ROADS, WOODS,
};

fn city() -> TestCity {
    TestCity::new().flattened().with_funds(20_000)
}

#[test]
fn test_road_costs_ten_and_bumps_serial() {
    let mut city = city();
    let serial = city.map_serial();
    assert_eq!(city.do_tool(Tool::Road, 10, 10), ToolResult::Ok);
    assert!(city.tile_at(10, 10).is_road());
    assert_eq!(city.total_funds(), 19_990);
    assert!(city.map_serial() > serial);
}

#[test]
fn test_out_of_bounds_fails() {
    let mut city = city();
    assert_eq!(city.do_tool(Tool::Road, -1, 5), ToolResult::Failed);
    assert_eq!(city.do_tool(Tool::Road, 120, 5), ToolResult::Failed);
    assert_eq!(city.do_tool(Tool::Road, 5, 100), ToolResult::Failed);
    assert_eq!(city.total_funds(), 20_000);
}

#[test]
fn test_no_money() {
    let mut city = city().with_funds(5);
    assert_eq!(city.do_tool(Tool::Road, 10, 10), ToolResult::NoMoney);
    assert!(city.tile_at(10, 10).is_dirt());
}

#[test]
fn test_bulldoze_water_fails_and_leaves_serial() {
    let mut city = city();
    city.resource_mut::<crate::tile_map::TileMap>()
        .set(40, 40, Tile::new(RIVER, 0));
    let serial = city.map_serial();
    assert_eq!(city.do_tool(Tool::Bulldozer, 40, 40), ToolResult::Failed);
    assert_eq!(city.map_serial(), serial);
    assert!(city.tile_at(40, 40).is_water());
}

#[test]
fn test_bulldoze_dirt_fails() {
    let mut city = city();
    assert_eq!(city.do_tool(Tool::Bulldozer, 10, 10), ToolResult::Failed);
}

#[test]
fn test_bulldozer_requires_the_flag() {
    let mut city = city();
    assert_eq!(city.do_tool(Tool::CoalPower, 20, 20), ToolResult::Ok);
    // Plant body cells are conductive/burnable but not bulldozable.
    assert_eq!(city.do_tool(Tool::Bulldozer, 19, 19), ToolResult::NeedBulldoze);
    // The center carries BULLDOZABLE and clears.
    assert_eq!(city.do_tool(Tool::Bulldozer, 20, 20), ToolResult::Ok);
    assert!(city.tile_at(20, 20).is_dirt());
}

#[test]
fn test_residential_zone_layout() {
    let mut city = city();
    assert_eq!(city.do_tool(Tool::Residential, 30, 30), ToolResult::Ok);
    assert_eq!(city.total_funds(), 19_900);

    let center = city.tile_at(30, 30);
    assert_eq!(center.character(), FREEZ);
    assert!(center.zone_center());
    assert!(center.bulldozable());

    let mut centers = 0;
    for dx in -1..=1 {
        for dy in -1..=1 {
            let t = city.tile_at(30 + dx, 30 + dy);
            assert!(t.is_residential());
            assert!(t.bulldozable());
            assert!(t.conductive());
            if t.zone_center() {
                centers += 1;
            }
        }
    }
    assert_eq!(centers, 1);
}

#[test]
fn test_zone_on_water_needs_bulldoze() {
    let mut city = city();
    city.resource_mut::<crate::tile_map::TileMap>()
        .set(40, 40, Tile::new(RIVER, 0));
    assert_eq!(
        city.do_tool(Tool::Residential, 40, 40),
        ToolResult::NeedBulldoze
    );
}

#[test]
fn test_stadium_footprint_out_of_bounds() {
    let mut city = city();
    assert_eq!(city.do_tool(Tool::Stadium, 0, 1), ToolResult::Failed);
    assert_eq!(city.do_tool(Tool::Stadium, 118, 50), ToolResult::Failed);
    assert_eq!(city.total_funds(), 20_000);
}

#[test]
fn test_coal_plant_layout() {
    let mut city = city();
    assert_eq!(city.do_tool(Tool::CoalPower, 20, 20), ToolResult::Ok);

    let center = city.tile_at(20, 20);
    assert_eq!(center.character(), POWERPLANT);
    assert!(center.zone_center());
    assert!(center.powered());
    assert!(center.conductive());

    // Corner sits one up-left of the click; tiles run row-major from base.
    assert_eq!(city.tile_at(19, 19).character(), COALBASE);
    assert_eq!(city.tile_at(22, 19).character(), COALBASE + 3);
    assert_eq!(city.tile_at(22, 22).character(), COALBASE + 15);
    assert!(city.tile_at(19, 19).conductive());
    assert!(!city.tile_at(19, 19).zone_center());
}

#[test]
fn test_airport_center_sentinel() {
    let mut city = city();
    assert_eq!(city.do_tool(Tool::Airport, 40, 40), ToolResult::Ok);
    assert_eq!(city.tile_at(40, 40).character(), AIRPORT);
    assert!(city.tile_at(40, 40).zone_center());
    assert_eq!(city.total_funds(), 10_000);
}

#[test]
fn test_road_restitch_follows_neighbors() {
    let mut city = city();
    city.do_tool(Tool::Road, 10, 10);
    // Isolated road defaults to the horizontal variant.
    assert_eq!(city.tile_at(10, 10).character(), ROADS);

    // A southern neighbor turns it vertical.
    city.do_tool(Tool::Road, 10, 11);
    assert_eq!(city.tile_at(10, 10).character(), ROADS + 1);

    // An eastern neighbor as well makes it a corner, then a tee.
    city.do_tool(Tool::Road, 11, 10);
    assert_eq!(city.tile_at(10, 10).character(), 69);
    city.do_tool(Tool::Road, 9, 10);
    assert_eq!(city.tile_at(10, 10).character(), 75);
}

#[test]
fn test_wire_is_conductive_and_rail_is_not() {
    let mut city = city();
    city.do_tool(Tool::Wire, 10, 10);
    city.do_tool(Tool::Rail, 12, 10);
    assert!(city.tile_at(10, 10).conductive());
    assert!(city.tile_at(10, 10).is_wire());
    assert!(!city.tile_at(12, 10).conductive());
    assert!(city.tile_at(12, 10).is_rail());
}

#[test]
fn test_auto_bulldoze_clears_and_charges() {
    let mut city = city();
    city.resource_mut::<crate::tile_map::TileMap>()
        .set(50, 50, Tile::new(WOODS, BLBN));
    assert_eq!(city.do_tool(Tool::Road, 50, 50), ToolResult::Ok);
    // Road plus one auto-cleared obstacle.
    assert_eq!(city.total_funds(), 20_000 - 11);

    city.resource_mut::<crate::tile_map::TileMap>()
        .set(52, 50, Tile::new(WOODS, BLBN));
    city.resource_mut::<ToolSettings>().auto_bulldoze = false;
    assert_eq!(city.do_tool(Tool::Road, 52, 50), ToolResult::NeedBulldoze);
}

#[test]
fn test_query_is_free_and_silent() {
    let mut city = city();
    let serial = city.map_serial();
    assert_eq!(city.do_tool(Tool::Query, 10, 10), ToolResult::Ok);
    assert_eq!(city.total_funds(), 20_000);
    assert_eq!(city.map_serial(), serial);
}

#[test]
fn test_queued_actions_execute_in_order() {
    let mut city = city();
    {
        let mut queue = city.resource_mut::<ActionQueue>();
        queue.push(GameAction::SetCityTax { rate: 12 });
        queue.push(GameAction::ApplyTool {
            tool: Tool::Road,
            x: 10,
            y: 10,
        });
    }
    city.sim_frame();
    assert_eq!(city.resource::<Budget>().city_tax, 12);
    assert!(city.tile_at(10, 10).is_road());
    let log = city.resource::<ActionResultLog>();
    assert_eq!(log.entries().count(), 2);
    assert!(matches!(
        log.latest(),
        Some((GameAction::ApplyTool { .. }, ToolResult::Ok))
    ));
}

#[test]
fn test_tax_rate_clamped() {
    let mut city = city();
    city.resource_mut::<ActionQueue>()
        .push(GameAction::SetCityTax { rate: 99 });
    city.sim_frame();
    assert_eq!(city.resource::<Budget>().city_tax, 20);
}

#[test]
fn test_new_game_action_regenerates_from_seed() {
    let mut city = city();
    city.do_tool(Tool::Road, 10, 10);
    city.resource_mut::<ActionQueue>()
        .push(GameAction::NewGame { seed: 7 });
    city.sim_frame();

    let reference = TestCity::with_seed(7);
    assert_eq!(
        city.resource::<crate::tile_map::TileMap>().cells(),
        reference.resource::<crate::tile_map::TileMap>().cells()
    );
}
