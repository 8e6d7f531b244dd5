//! JSON file-backed goal store.
//!
//! This is the "Goal Store" collaborator the engine reads from: a flat JSON
//! file of goal records plus two sidecar files, the previously rendered
//! mascot state (threaded back into the next snapshot so a celebration hold
//! survives process restarts) and the last published snapshot. Writes go
//! through a temp file and rename so a published file is never partial.

use std::path::{Path, PathBuf};

use chrono::Utc;
use glance_core::{Clock, Goal, GoalKind, MascotState, ProgressKind, WidgetSnapshot};
use tracing::debug;
use uuid::Uuid;

use crate::error::{CliError, StoreError};

const GOALS_FILE: &str = "goals.json";
const MASCOT_FILE: &str = "mascot.json";
const SNAPSHOT_FILE: &str = "snapshot.json";

/// File-backed goal store rooted at a data directory.
pub struct GoalStore {
    dir: PathBuf,
}

impl GoalStore {
    /// Open the store at an explicit directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Open the store at the platform data directory
    /// (`~/.local/share/glance` on Linux).
    pub fn open_default() -> Result<Self, StoreError> {
        let dir = dirs::data_dir()
            .ok_or(StoreError::NoDataDir)?
            .join("glance");
        Ok(Self::at(dir))
    }

    /// The directory this store lives in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load all goals; a missing file is an empty store.
    pub fn load_goals(&self) -> Result<Vec<Goal>, StoreError> {
        self.read_json(GOALS_FILE).map(Option::unwrap_or_default)
    }

    /// Persist the full goal set.
    pub fn save_goals(&self, goals: &[Goal]) -> Result<(), StoreError> {
        self.write_json(GOALS_FILE, goals)
    }

    /// Load the previously rendered mascot state, if any.
    pub fn load_mascot(&self) -> Result<Option<MascotState>, StoreError> {
        self.read_json(MASCOT_FILE)
    }

    /// Persist the mascot state carried into the next snapshot.
    pub fn save_mascot(&self, mascot: &MascotState) -> Result<(), StoreError> {
        self.write_json(MASCOT_FILE, mascot)
    }

    /// Publish a snapshot. All-or-nothing: the previous snapshot stays
    /// intact until the rename lands.
    pub fn publish_snapshot(&self, snapshot: &WidgetSnapshot) -> Result<(), StoreError> {
        self.write_json(SNAPSHOT_FILE, snapshot)
    }

    fn read_json<T: serde::de::DeserializeOwned>(
        &self,
        file: &str,
    ) -> Result<Option<T>, StoreError> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Parse { path, source })
    }

    fn write_json<T: serde::Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.dir.join(file);
        let tmp = self.dir.join(format!("{file}.tmp"));
        let raw = serde_json::to_string_pretty(value).map_err(|source| StoreError::Parse {
            path: path.clone(),
            source,
        })?;
        std::fs::write(&tmp, raw).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &path).map_err(|source| StoreError::Io { path, source })
    }
}

/// Find a goal by exact id, or by unique case-insensitive name.
pub fn resolve_goal<'a>(goals: &'a mut [Goal], needle: &str) -> Result<&'a mut Goal, CliError> {
    if let Ok(id) = Uuid::parse_str(needle) {
        if let Some(idx) = goals.iter().position(|g| g.id == id) {
            return Ok(&mut goals[idx]);
        }
        return Err(CliError::GoalNotFound(needle.to_string()));
    }
    let lowered = needle.to_lowercase();
    let mut matches = goals
        .iter()
        .enumerate()
        .filter(|(_, g)| g.name.to_lowercase() == lowered)
        .map(|(i, _)| i);
    match (matches.next(), matches.next()) {
        (Some(idx), None) => Ok(&mut goals[idx]),
        (Some(_), Some(_)) => Err(CliError::AmbiguousGoal(needle.to_string())),
        (None, _) => Err(CliError::GoalNotFound(needle.to_string())),
    }
}

/// Record one progress event against a goal: the mutation a `log` command
/// or an applied tap action performs.
///
/// `amount` is interpreted per progress kind: units for numeric goals,
/// percentage points for percentage goals (default 1.0 and 10.0), ignored
/// for completion- and milestone-tracked goals.
pub fn record_progress(goal: &mut Goal, amount: Option<f64>, clock: &Clock) {
    let now = clock.now();

    if goal.kind == GoalKind::Daily {
        roll_over_day(goal, clock);
    }
    let first_today = goal.completions_today(clock).next().is_none();

    match goal.progress_kind {
        ProgressKind::Completion => {
            if goal.kind == GoalKind::LongTerm {
                goal.completed = true;
            }
        }
        ProgressKind::Numeric => {
            goal.current_value += amount.unwrap_or(1.0);
        }
        ProgressKind::Percentage => {
            goal.percent_complete = (goal.percent_complete + amount.unwrap_or(10.0)).min(100.0);
        }
        ProgressKind::Milestones => {
            if let Some(next) = goal.milestones.iter_mut().find(|m| !m.completed) {
                next.completed = true;
                next.completed_at = Some(now);
            }
        }
    }

    if goal.kind == GoalKind::Daily && first_today {
        bump_streak(goal, clock);
    }
    if goal.kind == GoalKind::LongTerm && goal.progress_fraction() >= 1.0 {
        goal.completed = true;
    }

    if goal.kind == GoalKind::Daily {
        goal.today_completions.push(now);
    }
    goal.last_completed_at = Some(now);
    debug!(goal = %goal.id, "recorded progress");
}

/// Mark a goal fully done: the progress representation jumps to its
/// complete state, then the usual completion bookkeeping applies.
pub fn mark_done(goal: &mut Goal, clock: &Clock) {
    if goal.kind == GoalKind::Daily {
        // Clear out a previous day first so the jump below is not undone
        // by the day rollover inside record_progress.
        roll_over_day(goal, clock);
    }
    match goal.progress_kind {
        ProgressKind::Completion => {}
        ProgressKind::Numeric => {
            let target = match goal.kind {
                GoalKind::Daily => goal.daily_target,
                GoalKind::LongTerm => goal.target_value,
            };
            goal.current_value = goal.current_value.max(target);
        }
        ProgressKind::Percentage => goal.percent_complete = 100.0,
        ProgressKind::Milestones => {
            for milestone in goal.milestones.iter_mut().filter(|m| !m.completed) {
                milestone.completed = true;
                milestone.completed_at = Some(clock.now());
            }
        }
    }
    record_progress(goal, Some(0.0), clock);
}

/// Drop completion entries from previous days and reset per-day numeric
/// accumulation when the first event of a new day lands.
fn roll_over_day(goal: &mut Goal, clock: &Clock) {
    let had_entries = !goal.today_completions.is_empty();
    goal.today_completions.retain(|ts| clock.is_today(*ts));
    if had_entries
        && goal.today_completions.is_empty()
        && goal.progress_kind == ProgressKind::Numeric
    {
        goal.current_value = 0.0;
    }
}

fn bump_streak(goal: &mut Goal, clock: &Clock) {
    let continued = goal
        .last_completed_at
        .is_some_and(|ts| clock.is_today_or_yesterday(ts));
    goal.current_streak = if continued {
        goal.current_streak + 1
    } else {
        1
    };
    goal.longest_streak = goal.longest_streak.max(goal.current_streak);
}

/// Today's instant captured at the CLI boundary, viewed at the local
/// offset. The engine itself never reads ambient time.
pub fn local_clock() -> Clock {
    let local = chrono::Local::now();
    Clock::new(Utc::now(), *local.offset())
}
