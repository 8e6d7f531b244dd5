//! Snapshot assembly and the widget wire contract.
//!
//! [`WidgetSnapshot`] is the sole artifact the engine hands to rendering
//! surfaces, and the only thing they persist. It is created fresh on every
//! generation, immutable once constructed, and superseded rather than
//! mutated. Consumers branch on `version`; bump it whenever a field's
//! meaning or the context precedence order changes.
//!
//! Assembly never fails: malformed goals are skipped individually, and when
//! nothing usable remains the snapshot degrades to the empty context. A
//! widget with no data must still render something coherent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::context::ContextSelector;
use crate::error::CoreError;
use crate::goal::{Goal, GoalKind};
use crate::mascot::{MascotResolver, MascotState};
use crate::message::MessageEngine;
use crate::theme::{Status, ThemeResolver, TimeBand};
use crate::urgency::UrgencyScorer;

/// Wire contract version. Bumped when a field's meaning or the selection
/// precedence changes.
pub const SNAPSHOT_VERSION: u32 = 2;

/// Read-only projection of the selected goal for display.
///
/// Never round-trips back into a [`Goal`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopGoalView {
    pub id: Uuid,
    pub name: String,
    pub kind: GoalKind,
    /// Computed urgency at generation time.
    pub urgency: f64,
    /// Human-readable progress line.
    pub progress_label: String,
}

/// The versioned, serializable record every rendering surface consumes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSnapshot {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub top_goal: Option<TopGoalView>,
    pub mascot: MascotState,
    #[serde(default)]
    pub cta: Option<String>,
    #[serde(default)]
    pub background_status: Option<Status>,
    #[serde(default)]
    pub background_time_band: Option<TimeBand>,
    #[serde(default)]
    pub background_variant: Option<u32>,
}

impl WidgetSnapshot {
    /// Serialize to the wire format.
    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from the wire format.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Snapshot assembly engine: runs selection, scoring, mascot resolution,
/// message generation, and theming in order, and composes one snapshot.
/// Stateless; the previously rendered mascot state is an explicit input.
pub struct SnapshotAssembler;

impl SnapshotAssembler {
    /// Assemble a snapshot for the goal set at the given clock.
    ///
    /// Total: any input, including an empty set or malformed records,
    /// yields a coherent snapshot.
    pub fn assemble(
        goals: &[Goal],
        previous_mascot: Option<&MascotState>,
        clock: &Clock,
    ) -> WidgetSnapshot {
        let valid: Vec<Goal> = goals
            .iter()
            .filter(|g| match g.validate() {
                Ok(()) => true,
                Err(err) => {
                    warn!(%err, "skipping malformed goal");
                    false
                }
            })
            .cloned()
            .collect();

        let selection = ContextSelector::select(&valid, clock);
        debug!(context = ?selection.kind, "selected presentation context");

        let urgency = selection.goal.map(|g| UrgencyScorer::score(g, clock));
        let mascot = MascotResolver::resolve(selection.kind, urgency, previous_mascot, clock);

        let progress_label = selection.goal.map(|g| g.progress_label(clock));
        let cta = MessageEngine::generate(
            selection.kind,
            selection.goal.map(|g| g.kind),
            clock.hour(),
            clock.minute(),
            progress_label.as_deref(),
        );

        let status = Status::derive(selection.kind, mascot.emotion);
        let theme = ThemeResolver::resolve(status, clock);

        let top_goal = selection.goal.map(|g| TopGoalView {
            id: g.id,
            name: g.name.clone(),
            kind: g.kind,
            urgency: urgency.unwrap_or(0.0),
            progress_label: progress_label.clone().unwrap_or_default(),
        });

        WidgetSnapshot {
            version: SNAPSHOT_VERSION,
            generated_at: clock.now(),
            top_goal,
            mascot,
            cta: Some(cta),
            background_status: Some(status),
            background_time_band: Some(theme.band),
            background_variant: Some(theme.variant),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::ProgressKind;
    use chrono::TimeZone;

    fn clock_at(h: u32) -> Clock {
        Clock::utc(Utc.with_ymd_and_hms(2025, 6, 10, h, 0, 0).unwrap())
    }

    fn daily(name: &str) -> Goal {
        Goal::new(
            Uuid::new_v4(),
            name,
            GoalKind::Daily,
            ProgressKind::Completion,
            Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_empty_goal_list() {
        let clock = clock_at(14);
        let snapshot = SnapshotAssembler::assemble(&[], None, &clock);
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.generated_at, clock.now());
        assert!(snapshot.top_goal.is_none());
        assert_eq!(snapshot.mascot, MascotState::neutral());
        assert_eq!(snapshot.background_status, Some(Status::Idle));
        assert!(snapshot.cta.is_some());
    }

    #[test]
    fn test_malformed_goal_skipped_not_fatal() {
        let clock = clock_at(14);
        let mut broken = daily("");
        broken.name = String::new();
        let good = daily("Read");

        let snapshot = SnapshotAssembler::assemble(&[broken, good.clone()], None, &clock);
        let top = snapshot.top_goal.unwrap();
        assert_eq!(top.id, good.id);
    }

    #[test]
    fn test_all_goals_malformed_degrades_to_empty() {
        let clock = clock_at(14);
        let mut broken = daily("x");
        broken.percent_complete = -3.0;

        let snapshot = SnapshotAssembler::assemble(&[broken], None, &clock);
        assert!(snapshot.top_goal.is_none());
        assert_eq!(snapshot.background_status, Some(Status::Idle));
    }

    #[test]
    fn test_wire_roundtrip_preserves_snapshot() {
        let clock = clock_at(14);
        let snapshot = SnapshotAssembler::assemble(&[daily("Read")], None, &clock);
        let json = snapshot.to_json().unwrap();
        let decoded = WidgetSnapshot::from_json(&json).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let clock = clock_at(14);
        let snapshot = SnapshotAssembler::assemble(&[daily("Read")], None, &clock);
        let value: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        assert!(value.get("generatedAt").is_some());
        assert!(value.get("topGoal").is_some());
        assert!(value.get("backgroundTimeBand").is_some());
        assert!(value["topGoal"].get("progressLabel").is_some());
        assert!(value["mascot"].get("frameIndex").is_some());
    }
}
