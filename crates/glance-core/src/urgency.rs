//! Urgency scoring engine.
//!
//! Maps `(goal, clock)` to a normalized urgency score in `[0, 1]`. Daily and
//! long-term goals use different formulas:
//!
//! - Daily goals sum three clamped components: in-day progress (weight 0.5),
//!   time until the next due instant (weight 0.4), and streak risk
//!   (weight 0.1). Habits are forgiving of timing jitter but not of
//!   skipping, so in-day progress carries the most weight.
//! - Long-term goals blend time pressure (weight 0.6) against the progress
//!   deficit relative to a linear expected rate (weight 0.4). Deadlines are
//!   hard constraints, so time pressure dominates. A goal with no deadline
//!   is capped at 0.5 and can never dominate the ranking.
//!
//! A completed goal always scores 0.

use crate::clock::{Clock, SECONDS_PER_DAY};
use crate::goal::{Goal, GoalKind};

/// Weight of the in-day progress component for daily goals.
pub const DAILY_PROGRESS_WEIGHT: f64 = 0.5;
/// Weight of the time-remaining component for daily goals.
pub const DAILY_TIME_WEIGHT: f64 = 0.4;
/// Weight of the streak-risk component for daily goals.
pub const DAILY_STREAK_WEIGHT: f64 = 0.1;

/// Weight of time pressure for deadlined long-term goals.
pub const LONG_TERM_TIME_WEIGHT: f64 = 0.6;
/// Weight of the progress deficit for deadlined long-term goals.
pub const LONG_TERM_DEFICIT_WEIGHT: f64 = 0.4;
/// Score cap for long-term goals without a deadline.
pub const NO_DEADLINE_CAP: f64 = 0.5;

/// Urgency scoring engine. Stateless; all inputs are explicit.
pub struct UrgencyScorer;

impl UrgencyScorer {
    /// Score a goal at the given clock. Always in `[0, 1]`.
    pub fn score(goal: &Goal, clock: &Clock) -> f64 {
        if goal.is_complete(clock) {
            return 0.0;
        }
        match goal.kind {
            GoalKind::Daily => Self::score_daily(goal, clock),
            GoalKind::LongTerm => Self::score_long_term(goal, clock),
        }
    }

    fn score_daily(goal: &Goal, clock: &Clock) -> f64 {
        let score = Self::daily_progress_component(goal, clock)
            + Self::daily_time_component(goal, clock)
            + Self::streak_risk_component(goal, clock);
        score.clamp(0.0, 1.0)
    }

    /// In-day progress component: the further from today's target, the
    /// higher the urgency.
    fn daily_progress_component(goal: &Goal, clock: &Clock) -> f64 {
        (1.0 - goal.today_fraction(clock)) * DAILY_PROGRESS_WEIGHT
    }

    /// Time component: grows as the next due instant approaches. Collapses
    /// to 0 when no due instant exists.
    fn daily_time_component(goal: &Goal, clock: &Clock) -> f64 {
        let Some(due) = goal.next_due_at(clock) else {
            return 0.0;
        };
        let remaining = clock.seconds_until(due).max(0) as f64;
        let time_ratio = (remaining / SECONDS_PER_DAY as f64).clamp(0.0, 1.0);
        (1.0 - time_ratio) * DAILY_TIME_WEIGHT
    }

    /// Streak risk: a live streak whose last completion was neither today
    /// nor yesterday is about to lapse.
    fn streak_risk_component(goal: &Goal, clock: &Clock) -> f64 {
        if goal.current_streak == 0 {
            return 0.0;
        }
        let at_risk = match goal.last_completed_at {
            Some(ts) => !clock.is_today_or_yesterday(ts),
            None => true,
        };
        if at_risk {
            DAILY_STREAK_WEIGHT
        } else {
            0.0
        }
    }

    fn score_long_term(goal: &Goal, clock: &Clock) -> f64 {
        let actual = goal.progress_fraction();

        let Some(deadline) = goal.deadline else {
            return ((1.0 - actual) * NO_DEADLINE_CAP).clamp(0.0, NO_DEADLINE_CAP);
        };

        if clock.now() > deadline {
            return 1.0;
        }

        let total_days = (deadline - goal.created_at).num_days();
        if total_days <= 0 {
            // Degenerate window, treated as overdue.
            return 1.0;
        }

        let days_remaining = clock.days_until(deadline);
        let days_elapsed = total_days - days_remaining;
        let expected = days_elapsed as f64 / total_days as f64;
        let deficit = (expected - actual).clamp(0.0, 1.0);
        let time_pressure = 1.0 - (days_remaining as f64 / total_days as f64).clamp(0.0, 1.0);

        (time_pressure * LONG_TERM_TIME_WEIGHT + deficit * LONG_TERM_DEFICIT_WEIGHT)
            .clamp(0.0, 1.0)
    }
}
