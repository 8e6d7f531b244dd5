//! Tap action records.
//!
//! A tap on the widget produces a small action record that some external
//! mutation handler applies to the goal store. The engine never processes
//! these; it only sees their effect in the next goal set it is given.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// What a tap asks the store owner to do.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Record one completion/log event against the goal.
    LogProgress,
}

/// Action record emitted by a rendering surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WidgetAction {
    pub action: ActionKind,
    pub goal_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

impl WidgetAction {
    /// A `log_progress` action against `goal_id` at `timestamp`.
    pub fn log_progress(goal_id: Uuid, timestamp: DateTime<Utc>) -> Self {
        Self {
            action: ActionKind::LogProgress,
            goal_id,
            timestamp,
        }
    }

    /// Serialize to the wire format.
    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from the wire format.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }
}
