//! Pending actions, drained by the executor before the next phase runs.

use bevy::prelude::*;

use super::GameAction;

#[derive(Resource, Default)]
pub struct ActionQueue {
    pending: Vec<GameAction>,
}

impl ActionQueue {
    pub fn push(&mut self, action: GameAction) {
        self.pending.push(action);
    }

    pub fn drain(&mut self) -> Vec<GameAction> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
