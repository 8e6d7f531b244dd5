//! Call-to-action message engine.
//!
//! Each presentation context maps to a fixed pool of candidate strings; the
//! pool for the empty context additionally varies by coarse time of day.
//! Selection is `pool[hour % pool.len()]`: deterministic, changes at most
//! once per hour, and ignores the minute so the message is stable across a
//! widget refresh cycle. If a pool is ever empty the engine returns a fixed
//! fallback instead of failing.

use crate::context::ContextKind;
use crate::goal::GoalKind;

/// Returned whenever a context's pool is empty (configuration error).
pub const FALLBACK_MESSAGE: &str = "Keep going!";

/// Every how many rotation indices the in-progress message splices in the
/// goal's progress label.
pub const PROGRESS_SPLICE_EVERY: u32 = 5;

const EMPTY_MORNING: &[&str] = &[
    "Good morning! Add a goal to get started.",
    "A fresh day, a blank slate. What will you work on?",
    "Nothing tracked yet. Set your first goal!",
];

const EMPTY_AFTERNOON: &[&str] = &[
    "No goals yet. The afternoon is still yours.",
    "Add a goal and make the rest of today count.",
    "A quiet afternoon. Time to set a goal?",
];

const EMPTY_EVENING: &[&str] = &[
    "No goals on the board. Plan one for tomorrow?",
    "Evenings are for reflection. What's next for you?",
    "Set a goal tonight, start fresh tomorrow.",
];

const EMPTY_NIGHT: &[&str] = &[
    "All quiet. Rest up and dream big.",
    "Late night thoughts? Turn one into a goal.",
    "Nothing tracked. Sleep on it and start tomorrow.",
];

const DAILY_CELEBRATION: &[&str] = &[
    "Nailed it! Another day in the books.",
    "That's the habit energy we love to see!",
    "Done and done. Your streak thanks you.",
    "Boom! Daily goal complete.",
];

const LONG_TERM_CELEBRATION: &[&str] = &[
    "You actually did it. Take a bow!",
    "A long road, fully traveled. Incredible!",
    "Goal complete! This one deserves a celebration.",
    "Months of work, and here you are. Amazing!",
];

const END_OF_DAY: &[&str] = &[
    "The day is winding down. One last push?",
    "Almost midnight. Tomorrow is a fresh start.",
    "Wrapping up? A small win still counts tonight.",
    "Late hours. Be kind to yourself and rest soon.",
];

const LONG_TERM_FOCUS: &[&str] = &[
    "Good time to chip away at the big one.",
    "Small steps move big goals. Take one now.",
    "Your long-term goal could use some love.",
    "Future you is counting on this hour.",
];

const ALL_DAILY_COMPLETE: &[&str] = &[
    "Everything's done for today. Enjoy it!",
    "Clean sweep! All daily goals complete.",
    "Nothing left on today's list. Well earned.",
    "All habits checked off. You're on a roll.",
];

const IN_PROGRESS_DAILY: &[&str] = &[
    "Still time to get it done today.",
    "Your habit is waiting for you.",
    "A few minutes now keeps the streak alive.",
    "Today's goal is within reach.",
    "Quick check-in: how about that habit?",
];

const IN_PROGRESS_LONG_TERM: &[&str] = &[
    "Keep the momentum on your big goal.",
    "Progress compounds. Add a little today.",
    "The deadline isn't getting further away.",
    "One step closer every time you show up.",
];

const PROGRESS_PREFIXES: &[&str] = &["You're at", "Currently", "Status check:"];

const PROGRESS_SUFFIXES: &[&str] = &["so far today.", "and counting.", "keep it up!"];

/// Coarse time-of-day band used to pick the empty-context pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageBand {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl MessageBand {
    /// Band for a wall-clock hour: morning [5,12), afternoon [12,17),
    /// evening [17,22), night [22,5).
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => MessageBand::Morning,
            12..=16 => MessageBand::Afternoon,
            17..=21 => MessageBand::Evening,
            _ => MessageBand::Night,
        }
    }
}

/// Message generation engine. Stateless; all inputs are explicit.
pub struct MessageEngine;

impl MessageEngine {
    /// Generate the call-to-action text for a context at the given wall
    /// clock. `minute` is accepted but never read: messages must stay
    /// stable within the hour across refresh cycles.
    pub fn generate(
        context: ContextKind,
        goal_kind: Option<GoalKind>,
        hour: u32,
        _minute: u32,
        progress_label: Option<&str>,
    ) -> String {
        match context {
            ContextKind::Empty => Self::pick(Self::empty_pool(hour), hour),
            ContextKind::DailyCelebration => Self::pick(DAILY_CELEBRATION, hour),
            ContextKind::LongTermCelebration => Self::pick(LONG_TERM_CELEBRATION, hour),
            ContextKind::EndOfDay => Self::pick(END_OF_DAY, hour),
            ContextKind::LongTermFocus => Self::pick(LONG_TERM_FOCUS, hour),
            ContextKind::AllDailyComplete => Self::pick(ALL_DAILY_COMPLETE, hour),
            ContextKind::InProgress => Self::in_progress(goal_kind, hour, progress_label),
        }
    }

    fn empty_pool(hour: u32) -> &'static [&'static str] {
        match MessageBand::from_hour(hour) {
            MessageBand::Morning => EMPTY_MORNING,
            MessageBand::Afternoon => EMPTY_AFTERNOON,
            MessageBand::Evening => EMPTY_EVENING,
            MessageBand::Night => EMPTY_NIGHT,
        }
    }

    fn in_progress(goal_kind: Option<GoalKind>, hour: u32, progress_label: Option<&str>) -> String {
        match goal_kind {
            Some(GoalKind::Daily) => {
                if hour % PROGRESS_SPLICE_EVERY == 0 {
                    if let Some(label) = progress_label {
                        return format!(
                            "{} {} {}",
                            Self::pick(PROGRESS_PREFIXES, hour),
                            label,
                            Self::pick(PROGRESS_SUFFIXES, hour)
                        );
                    }
                }
                Self::pick(IN_PROGRESS_DAILY, hour)
            }
            Some(GoalKind::LongTerm) => Self::pick(IN_PROGRESS_LONG_TERM, hour),
            None => Self::pick(IN_PROGRESS_DAILY, hour),
        }
    }

    fn pick(pool: &'static [&'static str], hour: u32) -> String {
        if pool.is_empty() {
            return FALLBACK_MESSAGE.to_string();
        }
        pool[hour as usize % pool.len()].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_for_same_hour() {
        let a = MessageEngine::generate(ContextKind::EndOfDay, None, 23, 5, None);
        let b = MessageEngine::generate(ContextKind::EndOfDay, None, 23, 48, None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_minute_is_ignored() {
        for minute in 0..60 {
            let msg = MessageEngine::generate(ContextKind::LongTermFocus, None, 9, minute, None);
            assert_eq!(msg, MessageEngine::generate(ContextKind::LongTermFocus, None, 9, 0, None));
        }
    }

    #[test]
    fn test_rotates_across_hours() {
        let mut distinct = std::collections::HashSet::new();
        for hour in 0..24 {
            distinct.insert(MessageEngine::generate(
                ContextKind::AllDailyComplete,
                None,
                hour,
                0,
                None,
            ));
        }
        assert_eq!(distinct.len(), ALL_DAILY_COMPLETE.len());
    }

    #[test]
    fn test_empty_pool_varies_by_band() {
        let morning = MessageEngine::generate(ContextKind::Empty, None, 8, 0, None);
        let night = MessageEngine::generate(ContextKind::Empty, None, 23, 0, None);
        assert!(EMPTY_MORNING.contains(&morning.as_str()));
        assert!(EMPTY_NIGHT.contains(&night.as_str()));
    }

    #[test]
    fn test_progress_label_spliced_every_fifth_rotation() {
        let label = "5/8 glasses";
        // Hour 10 is a splice index (10 % 5 == 0).
        let spliced = MessageEngine::generate(
            ContextKind::InProgress,
            Some(GoalKind::Daily),
            10,
            0,
            Some(label),
        );
        assert!(spliced.contains(label), "got {spliced}");
        assert!(spliced.starts_with(PROGRESS_PREFIXES[10 % PROGRESS_PREFIXES.len()]));

        // Hour 11 is not.
        let plain = MessageEngine::generate(
            ContextKind::InProgress,
            Some(GoalKind::Daily),
            11,
            0,
            Some(label),
        );
        assert!(!plain.contains(label));
    }

    #[test]
    fn test_splice_requires_label() {
        let msg = MessageEngine::generate(ContextKind::InProgress, Some(GoalKind::Daily), 10, 0, None);
        assert!(IN_PROGRESS_DAILY.contains(&msg.as_str()));
    }

    #[test]
    fn test_long_term_in_progress_never_splices() {
        let msg = MessageEngine::generate(
            ContextKind::InProgress,
            Some(GoalKind::LongTerm),
            10,
            0,
            Some("40% complete"),
        );
        assert!(IN_PROGRESS_LONG_TERM.contains(&msg.as_str()));
    }

    #[test]
    fn test_every_context_yields_nonempty_text() {
        let contexts = [
            ContextKind::Empty,
            ContextKind::DailyCelebration,
            ContextKind::LongTermCelebration,
            ContextKind::EndOfDay,
            ContextKind::LongTermFocus,
            ContextKind::AllDailyComplete,
            ContextKind::InProgress,
        ];
        for context in contexts {
            for hour in 0..24 {
                let msg = MessageEngine::generate(context, None, hour, 0, None);
                assert!(!msg.is_empty());
            }
        }
    }
}
