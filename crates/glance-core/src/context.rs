//! Presentation context selection.
//!
//! A strict-precedence decision tree over the goal set and the clock. Rules
//! are evaluated top to bottom and the first match wins:
//!
//! 1. `Empty` -- no goals at all.
//! 2. `DailyCelebration` / `LongTermCelebration` -- a completion landed
//!    within the last five minutes.
//! 3. `EndOfDay` -- the 23:00-05:00 wind-down window.
//! 4. `LongTermFocus` -- a designated focus hour with an incomplete
//!    long-term goal available.
//! 5. `AllDailyComplete` -- every daily habit is done for today.
//! 6. `InProgress` -- ordinary urgency-driven selection; degrades to
//!    `Empty` when nothing is actionable.
//!
//! Celebration and end-of-day are event/time triggered overrides and must
//! win over routine urgency ranking, which is why they sit above the
//! fallback. Ties everywhere break toward the first-encountered goal so the
//! selection is stable for a given input ordering.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::goal::{Goal, GoalKind};
use crate::urgency::UrgencyScorer;

/// How long after a completion the celebration override stays live.
pub const CELEBRATION_WINDOW_SECS: i64 = 300;
/// Start of the end-of-day window (inclusive).
pub const END_OF_DAY_START_HOUR: u32 = 23;
/// End of the end-of-day window (exclusive); wraps past midnight.
pub const END_OF_DAY_END_HOUR: u32 = 5;
/// Wall-clock hours that nudge long-term goals into focus.
pub const LONG_TERM_FOCUS_HOURS: [u32; 2] = [9, 20];

/// The seven mutually exclusive presentation contexts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContextKind {
    /// No goals exist.
    Empty,
    /// A daily habit was completed moments ago.
    DailyCelebration,
    /// A long-term goal was completed moments ago.
    LongTermCelebration,
    /// Late-night wind-down window.
    EndOfDay,
    /// Designated hour for long-term goal focus.
    LongTermFocus,
    /// Every daily habit is done for today.
    AllDailyComplete,
    /// Ordinary urgency-driven selection.
    InProgress,
}

/// The selected context plus the goal it presents, if any.
#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    pub kind: ContextKind,
    pub goal: Option<&'a Goal>,
}

impl<'a> Selection<'a> {
    fn empty() -> Self {
        Self {
            kind: ContextKind::Empty,
            goal: None,
        }
    }
}

/// Context selection engine. Stateless; all inputs are explicit.
pub struct ContextSelector;

impl ContextSelector {
    /// Select the presentation context for the goal set at the given clock.
    ///
    /// Total: always returns exactly one context.
    pub fn select<'a>(goals: &'a [Goal], clock: &Clock) -> Selection<'a> {
        if goals.is_empty() {
            return Selection::empty();
        }

        if let Some(goal) = Self::recent_celebration(goals, clock) {
            let kind = match goal.kind {
                GoalKind::Daily => ContextKind::DailyCelebration,
                GoalKind::LongTerm => ContextKind::LongTermCelebration,
            };
            return Selection {
                kind,
                goal: Some(goal),
            };
        }

        if clock.hour_in_window(END_OF_DAY_START_HOUR, END_OF_DAY_END_HOUR) {
            // Wind-down shows the most pressing goal across the whole set,
            // completed or not.
            return Selection {
                kind: ContextKind::EndOfDay,
                goal: Self::most_urgent(goals.iter(), clock),
            };
        }

        if LONG_TERM_FOCUS_HOURS.contains(&clock.hour()) {
            let candidate = Self::most_urgent(
                goals
                    .iter()
                    .filter(|g| g.kind == GoalKind::LongTerm && !g.is_complete(clock)),
                clock,
            );
            if let Some(goal) = candidate {
                return Selection {
                    kind: ContextKind::LongTermFocus,
                    goal: Some(goal),
                };
            }
        }

        let dailies: Vec<&Goal> = goals.iter().filter(|g| g.kind == GoalKind::Daily).collect();
        if !dailies.is_empty() && dailies.iter().all(|g| g.completed_today(clock)) {
            return Selection {
                kind: ContextKind::AllDailyComplete,
                goal: Self::most_recently_completed(&dailies),
            };
        }

        let daily_candidate =
            Self::most_urgent(dailies.iter().copied().filter(|g| !g.completed_today(clock)), clock);
        let candidate = daily_candidate.or_else(|| {
            Self::most_urgent(
                goals
                    .iter()
                    .filter(|g| g.kind == GoalKind::LongTerm && !g.is_complete(clock)),
                clock,
            )
        });

        match candidate {
            Some(goal) => Selection {
                kind: ContextKind::InProgress,
                goal: Some(goal),
            },
            None => Selection::empty(),
        }
    }

    /// The goal most recently completed inside the celebration window, if
    /// any. Ties break toward the most recent completion instant.
    fn recent_celebration<'a>(goals: &'a [Goal], clock: &Clock) -> Option<&'a Goal> {
        goals
            .iter()
            .filter_map(|g| {
                let ts = g.last_completed_at?;
                let elapsed = clock.seconds_since(ts);
                (elapsed >= 0 && elapsed < CELEBRATION_WINDOW_SECS).then_some((g, ts))
            })
            .max_by_key(|(_, ts)| *ts)
            .map(|(g, _)| g)
    }

    /// Highest-urgency goal in the iterator; first-encountered wins ties.
    fn most_urgent<'a>(
        goals: impl Iterator<Item = &'a Goal>,
        clock: &Clock,
    ) -> Option<&'a Goal> {
        let mut best: Option<(&Goal, f64)> = None;
        for goal in goals {
            let score = UrgencyScorer::score(goal, clock);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((goal, score)),
            }
        }
        best.map(|(g, _)| g)
    }

    /// Most recently completed goal, falling back to creation time for goals
    /// that never recorded a completion.
    fn most_recently_completed<'a>(goals: &[&'a Goal]) -> Option<&'a Goal> {
        goals
            .iter()
            .copied()
            .max_by_key(|g| g.last_completed_at.unwrap_or(g.created_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::ProgressKind;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn clock_at(h: u32) -> Clock {
        Clock::utc(Utc.with_ymd_and_hms(2025, 6, 10, h, 0, 0).unwrap())
    }

    fn goal(name: &str, kind: GoalKind) -> Goal {
        Goal::new(
            Uuid::new_v4(),
            name,
            kind,
            ProgressKind::Completion,
            Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap(),
        )
    }

    fn complete_today(goal: &mut Goal, clock: &Clock, mins_ago: i64) {
        let ts = clock.now() - Duration::minutes(mins_ago);
        goal.today_completions.push(ts);
        goal.last_completed_at = Some(ts);
    }

    #[test]
    fn test_empty_set_selects_empty() {
        let clock = clock_at(14);
        let selection = ContextSelector::select(&[], &clock);
        assert_eq!(selection.kind, ContextKind::Empty);
        assert!(selection.goal.is_none());
    }

    #[test]
    fn test_recent_completion_wins_over_everything() {
        // 02:00 is inside the end-of-day window, but a two-minute-old
        // completion still takes precedence.
        let clock = clock_at(2);
        let mut celebrated = goal("Meditate", GoalKind::Daily);
        complete_today(&mut celebrated, &clock, 2);
        let other = goal("Read", GoalKind::Daily);

        let goals = vec![other, celebrated.clone()];
        let selection = ContextSelector::select(&goals, &clock);
        assert_eq!(selection.kind, ContextKind::DailyCelebration);
        assert_eq!(selection.goal.unwrap().id, celebrated.id);
    }

    #[test]
    fn test_celebration_distinguishes_goal_kind() {
        let clock = clock_at(14);
        let mut finished = goal("Ship app", GoalKind::LongTerm);
        finished.completed = true;
        complete_today(&mut finished, &clock, 1);

        let goals = vec![finished];
        let selection = ContextSelector::select(&goals, &clock);
        assert_eq!(selection.kind, ContextKind::LongTermCelebration);
    }

    #[test]
    fn test_celebration_expires_after_window() {
        let clock = clock_at(14);
        let mut stale = goal("Meditate", GoalKind::Daily);
        complete_today(&mut stale, &clock, 6);

        let goals = vec![stale];
        let selection = ContextSelector::select(&goals, &clock);
        assert_ne!(selection.kind, ContextKind::DailyCelebration);
    }

    #[test]
    fn test_celebration_tie_breaks_most_recent() {
        let clock = clock_at(14);
        let mut first = goal("First", GoalKind::Daily);
        complete_today(&mut first, &clock, 4);
        let mut second = goal("Second", GoalKind::Daily);
        complete_today(&mut second, &clock, 1);

        let goals = vec![first, second.clone()];
        let selection = ContextSelector::select(&goals, &clock);
        assert_eq!(selection.goal.unwrap().id, second.id);
    }

    #[test]
    fn test_end_of_day_window() {
        for hour in [23, 0, 2, 4] {
            let clock = clock_at(hour);
            let goals = vec![goal("Read", GoalKind::Daily)];
            let selection = ContextSelector::select(&goals, &clock);
            assert_eq!(selection.kind, ContextKind::EndOfDay, "hour {hour}");
            assert!(selection.goal.is_some());
        }
        let clock = clock_at(5);
        let goals = vec![goal("Read", GoalKind::Daily)];
        let selection = ContextSelector::select(&goals, &clock);
        assert_ne!(selection.kind, ContextKind::EndOfDay);
    }

    #[test]
    fn test_focus_hour_requires_incomplete_long_term() {
        let clock = clock_at(9);

        let goals = vec![goal("Read", GoalKind::Daily)];
        let selection = ContextSelector::select(&goals, &clock);
        assert_ne!(selection.kind, ContextKind::LongTermFocus);

        let goals = vec![goal("Read", GoalKind::Daily), goal("Novel", GoalKind::LongTerm)];
        let selection = ContextSelector::select(&goals, &clock);
        assert_eq!(selection.kind, ContextKind::LongTermFocus);
        assert_eq!(selection.goal.unwrap().kind, GoalKind::LongTerm);
    }

    #[test]
    fn test_all_daily_complete() {
        let clock = clock_at(14);
        let mut a = goal("Meditate", GoalKind::Daily);
        complete_today(&mut a, &clock, 200);
        let mut b = goal("Read", GoalKind::Daily);
        complete_today(&mut b, &clock, 30);

        let goals = vec![a, b.clone()];
        let selection = ContextSelector::select(&goals, &clock);
        assert_eq!(selection.kind, ContextKind::AllDailyComplete);
        // Most recently completed daily is presented.
        assert_eq!(selection.goal.unwrap().id, b.id);
    }

    #[test]
    fn test_in_progress_prefers_dailies() {
        let clock = clock_at(14);
        let goals = vec![goal("Novel", GoalKind::LongTerm), goal("Read", GoalKind::Daily)];
        let selection = ContextSelector::select(&goals, &clock);
        assert_eq!(selection.kind, ContextKind::InProgress);
        assert_eq!(selection.goal.unwrap().kind, GoalKind::Daily);
    }

    #[test]
    fn test_in_progress_ties_are_stable() {
        let clock = clock_at(14);
        // Identical goals score identically; the first encountered wins.
        let a = goal("A", GoalKind::Daily);
        let b = goal("B", GoalKind::Daily);
        let goals = vec![a.clone(), b];
        let selection = ContextSelector::select(&goals, &clock);
        assert_eq!(selection.goal.unwrap().id, a.id);
    }

    #[test]
    fn test_degrades_to_empty_when_nothing_actionable() {
        let clock = clock_at(14);
        // Only a fully progressed long-term goal, completed long ago.
        let mut done = goal("Ship app", GoalKind::LongTerm);
        done.completed = true;
        done.last_completed_at = Some(clock.now() - Duration::days(3));

        let goals = vec![done];
        let selection = ContextSelector::select(&goals, &clock);
        assert_eq!(selection.kind, ContextKind::Empty);
        assert!(selection.goal.is_none());
    }

    #[test]
    fn test_exactly_one_context_for_any_hour() {
        let goals = vec![goal("Read", GoalKind::Daily), goal("Novel", GoalKind::LongTerm)];
        for hour in 0..24 {
            let clock = clock_at(hour);
            // select() is total; reaching here without panicking is the
            // property, the kind just needs to be one of the seven.
            let _ = ContextSelector::select(&goals, &clock);
        }
    }
}
