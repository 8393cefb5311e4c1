//! The canonical action and tool enums.

use serde::{Deserialize, Serialize};

use crate::budget::GameLevel;
use crate::scheduler::SimSpeed;

/// A map-editing tool, dispatched in one place with a fixed price list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tool {
    Bulldozer,
    Road,
    Rail,
    Wire,
    Park,
    Residential,
    Commercial,
    Industrial,
    FireStation,
    PoliceStation,
    Stadium,
    SeaPort,
    CoalPower,
    NuclearPower,
    Airport,
    Query,
}

impl Tool {
    pub fn cost(self) -> i64 {
        match self {
            Tool::Bulldozer => 1,
            Tool::Road => 10,
            Tool::Rail => 20,
            Tool::Wire => 5,
            Tool::Park => 10,
            Tool::Residential | Tool::Commercial | Tool::Industrial => 100,
            Tool::FireStation | Tool::PoliceStation => 500,
            Tool::Stadium => 5_000,
            Tool::SeaPort => 3_000,
            Tool::CoalPower => 3_000,
            Tool::NuclearPower => 5_000,
            Tool::Airport => 10_000,
            Tool::Query => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tool::Bulldozer => "Bulldozer",
            Tool::Road => "Road",
            Tool::Rail => "Rail",
            Tool::Wire => "Wire",
            Tool::Park => "Park",
            Tool::Residential => "Residential",
            Tool::Commercial => "Commercial",
            Tool::Industrial => "Industrial",
            Tool::FireStation => "Fire Station",
            Tool::PoliceStation => "Police Station",
            Tool::Stadium => "Stadium",
            Tool::SeaPort => "Seaport",
            Tool::CoalPower => "Coal Power",
            Tool::NuclearPower => "Nuclear Power",
            Tool::Airport => "Airport",
            Tool::Query => "Query",
        }
    }
}

/// A player-triggered catastrophe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisasterKind {
    Fire,
    Flood,
    Tornado,
    Earthquake,
    Monster,
    Meltdown,
    Explosion { x: i32, y: i32 },
}

/// A single, atomic game action. Everything the UI can do to the simulation
/// flows through this enum so actions can be queued, logged, and replayed
/// uniformly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameAction {
    /// Start a new game with the given random seed.
    NewGame { seed: u64 },
    /// Change the simulation speed.
    SetSpeed { speed: SimSpeed },
    /// Set the property tax rate (clamped to 0..=20).
    SetCityTax { rate: u32 },
    /// Change the difficulty level; takes effect on the next new game.
    SetGameLevel { level: GameLevel },
    /// Toggle automatic clearing under the build tools.
    SetAutoBulldoze { on: bool },
    /// Toggle random disasters.
    SetDisastersEnabled { on: bool },
    /// Apply a map tool at a world position.
    ApplyTool { tool: Tool, x: i32, y: i32 },
    /// Set off a disaster.
    TriggerDisaster { kind: DisasterKind },
}
