//! Action executor — drains the [`ActionQueue`] before the phase rotor runs
//! and applies every queued [`GameAction`], recording outcomes in the
//! [`ActionResultLog`]. `do_tool` and `trigger_disaster` are also callable
//! directly between phases for UIs that want synchronous results.

use bevy::prelude::*;

use crate::budget::Budget;
use crate::disasters::{self, DisasterState};
use crate::messages::MessageLog;
use crate::pollution::PollutionDensity;
use crate::scheduler::CityClock;
use crate::sim_rng::SimRng;
use crate::sprites::SpriteList;
use crate::tile_map::TileMap;
use crate::world_init;

use super::{
    apply_tool, ActionQueue, ActionResultLog, DisasterKind, GameAction, Tool, ToolResult,
    ToolSettings,
};

/// Drains all pending actions and executes them in order.
pub fn execute_queued_actions(world: &mut World) {
    let actions = world.resource_mut::<ActionQueue>().drain();
    for action in actions {
        let result = execute_single(world, action);
        world.resource_mut::<ActionResultLog>().push(action, result);
    }
}

fn execute_single(world: &mut World, action: GameAction) -> ToolResult {
    match action {
        GameAction::NewGame { seed } => {
            world_init::new_game(world, seed);
            ToolResult::Ok
        }
        GameAction::SetSpeed { speed } => {
            world.resource_mut::<CityClock>().speed = speed;
            ToolResult::Ok
        }
        GameAction::SetCityTax { rate } => {
            world.resource_mut::<Budget>().set_city_tax(rate);
            ToolResult::Ok
        }
        GameAction::SetGameLevel { level } => {
            world.insert_resource(level);
            ToolResult::Ok
        }
        GameAction::SetAutoBulldoze { on } => {
            world.resource_mut::<ToolSettings>().auto_bulldoze = on;
            ToolResult::Ok
        }
        GameAction::SetDisastersEnabled { on } => {
            world.resource_mut::<DisasterState>().enabled = on;
            ToolResult::Ok
        }
        GameAction::ApplyTool { tool, x, y } => do_tool(world, tool, x, y),
        GameAction::TriggerDisaster { kind } => {
            trigger_disaster(world, kind);
            ToolResult::Ok
        }
    }
}

/// Apply a tool synchronously. Must only be called between phases.
pub fn do_tool(world: &mut World, tool: Tool, x: i32, y: i32) -> ToolResult {
    world.resource_scope(|world, mut map: Mut<TileMap>| {
        world.resource_scope(|world, mut rng: Mut<SimRng>| {
            world.resource_scope(|world, mut budget: Mut<Budget>| {
                let settings = *world.resource::<ToolSettings>();
                apply_tool(&mut map, &mut rng, &mut budget, &settings, tool, x, y)
            })
        })
    })
}

/// Set off a player-triggered disaster synchronously.
pub fn trigger_disaster(world: &mut World, kind: DisasterKind) {
    let city_time = world.resource::<CityClock>().city_time;
    world.resource_scope(|world, mut map: Mut<TileMap>| {
        world.resource_scope(|world, mut rng: Mut<SimRng>| {
            world.resource_scope(|world, mut sprites: Mut<SpriteList>| {
                world.resource_scope(|world, mut messages: Mut<MessageLog>| {
                    world.resource_scope(|world, mut state: Mut<DisasterState>| {
                        match kind {
                            DisasterKind::Fire => {
                                disasters::set_fire(&mut map, &mut rng, &mut messages, city_time)
                            }
                            DisasterKind::Flood => disasters::make_flood(
                                &mut map,
                                &mut rng,
                                &mut state,
                                &mut messages,
                                city_time,
                            ),
                            DisasterKind::Tornado => disasters::make_tornado(
                                &mut sprites,
                                &mut rng,
                                &mut messages,
                                city_time,
                            ),
                            DisasterKind::Earthquake => disasters::make_earthquake(
                                &mut map,
                                &mut rng,
                                &mut messages,
                                city_time,
                            ),
                            DisasterKind::Monster => {
                                let pollution = world.resource::<PollutionDensity>();
                                disasters::make_monster(
                                    &mut sprites,
                                    &mut rng,
                                    pollution,
                                    &mut messages,
                                    city_time,
                                )
                            }
                            DisasterKind::Meltdown => disasters::make_meltdown(
                                &mut map,
                                &mut rng,
                                &mut sprites,
                                &mut messages,
                                city_time,
                            ),
                            DisasterKind::Explosion { x, y } => disasters::make_explosion(
                                &mut map,
                                &mut rng,
                                &mut sprites,
                                &mut messages,
                                city_time,
                                x,
                                y,
                            ),
                        }
                    })
                })
            })
        })
    });
}
