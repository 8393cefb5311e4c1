//! Structured outcomes for executed actions.

use serde::{Deserialize, Serialize};

/// Result of a tool application (and, by extension, of any queued action).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolResult {
    /// Applied and paid for.
    Ok,
    /// Out of bounds, on water, or otherwise impossible here.
    Failed,
    /// Blocked by something the bulldozer would have to clear first.
    NeedBulldoze,
    /// The treasury cannot cover the tool's cost.
    NoMoney,
}

impl ToolResult {
    pub fn succeeded(self) -> bool {
        self == ToolResult::Ok
    }
}
