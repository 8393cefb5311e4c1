//! Bounded log of executed actions and their outcomes, for UIs and tests
//! that want to know what happened to what they queued.

use std::collections::VecDeque;

use bevy::prelude::*;

use super::{GameAction, ToolResult};

const LOG_CAPACITY: usize = 32;

#[derive(Resource, Default)]
pub struct ActionResultLog {
    entries: VecDeque<(GameAction, ToolResult)>,
}

impl ActionResultLog {
    pub fn push(&mut self, action: GameAction, result: ToolResult) {
        if self.entries.len() == LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back((action, result));
    }

    pub fn latest(&self) -> Option<&(GameAction, ToolResult)> {
        self.entries.back()
    }

    pub fn entries(&self) -> impl Iterator<Item = &(GameAction, ToolResult)> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
