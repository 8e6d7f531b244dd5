//! Goal types: tracked habits and long-term objectives.
//!
//! A [`Goal`] is the engine's sole input record. The kind decides which
//! scoring formula and due-date semantics apply; the progress kind decides
//! which progress representation is meaningful and how labels are formatted.
//! The engine never mutates a goal: stale per-day data (yesterday's
//! completion timestamps) is filtered at read time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::ValidationError;

/// Whether a goal is a recurring daily habit or a long-running objective.
///
/// Immutable after creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    /// Recurs every day; due by the end of the current wall-clock day.
    Daily,
    /// One long-running objective, optionally with a deadline.
    LongTerm,
}

/// How progress toward a goal is represented.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProgressKind {
    /// Done or not done.
    Completion,
    /// Percentage in [0, 100].
    Percentage,
    /// Ordered list of discrete milestones.
    Milestones,
    /// Numeric value against a target (optionally with a per-day target).
    Numeric,
}

/// One step of a milestone-tracked goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Milestone {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// One tracked habit or objective.
///
/// Only the progress fields matching `progress_kind` are meaningful; the
/// rest stay at their defaults. Streak fields are meaningful for `Daily`
/// goals only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    pub kind: GoalKind,
    pub progress_kind: ProgressKind,

    /// Completion flag (`ProgressKind::Completion`, and a terminal marker
    /// the store may set for any kind).
    #[serde(default)]
    pub completed: bool,
    /// Percent progress in [0, 100] (`ProgressKind::Percentage`).
    #[serde(default)]
    pub percent_complete: f64,
    /// Milestone list (`ProgressKind::Milestones`).
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    /// Current numeric value (`ProgressKind::Numeric`). For daily goals the
    /// store maintains this as today's accumulated value.
    #[serde(default)]
    pub current_value: f64,
    /// Overall numeric target (`ProgressKind::Numeric`, long-term).
    #[serde(default)]
    pub target_value: f64,
    /// Per-day numeric target (`ProgressKind::Numeric`, daily).
    #[serde(default)]
    pub daily_target: f64,
    /// Display unit for numeric values ("glasses", "pages", ...).
    #[serde(default)]
    pub unit: Option<String>,

    pub created_at: DateTime<Utc>,
    /// Optional hard deadline. Absent for open-ended long-term goals.
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    /// Most recent completion/log event.
    #[serde(default)]
    pub last_completed_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    /// Completion timestamps recorded for the current day. May contain
    /// stale entries from previous days; readers filter by wall-clock date.
    #[serde(default)]
    pub today_completions: Vec<DateTime<Utc>>,
}

impl Goal {
    /// Create a goal with the given identity and kinds; progress fields at
    /// their defaults.
    pub fn new(id: Uuid, name: impl Into<String>, kind: GoalKind, progress_kind: ProgressKind, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            progress_kind,
            completed: false,
            percent_complete: 0.0,
            milestones: Vec::new(),
            current_value: 0.0,
            target_value: 0.0,
            daily_target: 0.0,
            unit: None,
            created_at,
            deadline: None,
            last_completed_at: None,
            current_streak: 0,
            longest_streak: 0,
            today_completions: Vec::new(),
        }
    }

    /// Validate the record. Malformed goals are skipped per snapshot, never
    /// fatal for the rest of the set.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let id = || self.id.to_string();
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName { id: id() });
        }
        for (field, value) in [
            ("percent_complete", self.percent_complete),
            ("current_value", self.current_value),
            ("target_value", self.target_value),
            ("daily_target", self.daily_target),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::NonFiniteValue { id: id(), field });
            }
        }
        if self.percent_complete < 0.0 || self.percent_complete > 100.0 {
            return Err(ValidationError::PercentOutOfRange {
                id: id(),
                value: self.percent_complete,
            });
        }
        if self.current_streak > self.longest_streak {
            return Err(ValidationError::StreakInvariant {
                id: id(),
                current: self.current_streak,
                longest: self.longest_streak,
            });
        }
        Ok(())
    }

    /// Completion timestamps that actually fall on today's wall-clock date.
    pub fn completions_today<'a>(&'a self, clock: &'a Clock) -> impl Iterator<Item = DateTime<Utc>> + 'a {
        self.today_completions
            .iter()
            .copied()
            .filter(|ts| clock.is_today(*ts))
    }

    /// Fraction of today's work done, in [0, 1]. Daily goals only; for
    /// long-term goals this mirrors [`Goal::progress_fraction`].
    pub fn today_fraction(&self, clock: &Clock) -> f64 {
        match self.progress_kind {
            ProgressKind::Completion => {
                if self.completions_today(clock).next().is_some() {
                    1.0
                } else {
                    0.0
                }
            }
            ProgressKind::Numeric => {
                if self.daily_target > 0.0 {
                    (self.current_value / self.daily_target).clamp(0.0, 1.0)
                } else if self.completions_today(clock).next().is_some() {
                    1.0
                } else {
                    0.0
                }
            }
            ProgressKind::Percentage => (self.percent_complete / 100.0).clamp(0.0, 1.0),
            ProgressKind::Milestones => self.milestone_fraction(),
        }
    }

    /// Overall progress fraction in [0, 1], used for long-term scoring.
    pub fn progress_fraction(&self) -> f64 {
        match self.progress_kind {
            ProgressKind::Completion => {
                if self.completed {
                    1.0
                } else {
                    0.0
                }
            }
            ProgressKind::Percentage => (self.percent_complete / 100.0).clamp(0.0, 1.0),
            ProgressKind::Milestones => self.milestone_fraction(),
            ProgressKind::Numeric => {
                if self.target_value > 0.0 {
                    (self.current_value / self.target_value).clamp(0.0, 1.0)
                } else {
                    0.0
                }
            }
        }
    }

    fn milestone_fraction(&self) -> f64 {
        if self.milestones.is_empty() {
            return 0.0;
        }
        let done = self.milestones.iter().filter(|m| m.completed).count();
        done as f64 / self.milestones.len() as f64
    }

    /// Whether a daily goal is done for today.
    pub fn completed_today(&self, clock: &Clock) -> bool {
        self.completed || self.today_fraction(clock) >= 1.0
    }

    /// Whether the goal needs no further attention right now: dailies are
    /// complete when done for today, long-term goals when fully progressed.
    pub fn is_complete(&self, clock: &Clock) -> bool {
        if self.completed {
            return true;
        }
        match self.kind {
            GoalKind::Daily => self.completed_today(clock),
            GoalKind::LongTerm => self.progress_fraction() >= 1.0,
        }
    }

    /// Next due instant for a daily goal.
    ///
    /// A daily recurs every 24h anchored at its creation wall-clock
    /// time-of-day: today's occurrence if still ahead, tomorrow's otherwise.
    /// `None` for long-term goals.
    pub fn next_due_at(&self, clock: &Clock) -> Option<DateTime<Utc>> {
        if self.kind != GoalKind::Daily {
            return None;
        }
        let anchor = clock.time_of(self.created_at);
        let today = clock.local_date();
        if let Some(candidate) = clock.instant_at(today, anchor) {
            if candidate > clock.now() {
                return Some(candidate);
            }
        }
        clock.instant_at(today.succ_opt()?, anchor)
    }

    /// Human-readable progress label for the widget's top-goal line.
    pub fn progress_label(&self, clock: &Clock) -> String {
        match self.progress_kind {
            ProgressKind::Completion => {
                let done = match self.kind {
                    GoalKind::Daily => self.completed_today(clock),
                    GoalKind::LongTerm => self.completed,
                };
                if done {
                    "Done".to_string()
                } else {
                    "Not done yet".to_string()
                }
            }
            ProgressKind::Percentage => format!("{:.0}% complete", self.percent_complete),
            ProgressKind::Milestones => {
                let done = self.milestones.iter().filter(|m| m.completed).count();
                format!("{}/{} milestones", done, self.milestones.len())
            }
            ProgressKind::Numeric => {
                let target = match self.kind {
                    GoalKind::Daily => self.daily_target,
                    GoalKind::LongTerm => self.target_value,
                };
                match &self.unit {
                    Some(unit) => format!("{:.0}/{:.0} {}", self.current_value, target, unit),
                    None => format!("{:.0}/{:.0}", self.current_value, target),
                }
            }
        }
    }
}
