//! Mascot emotion state machine.
//!
//! The mascot has exactly one persistent, time-bounded state: `Celebrate`.
//! Everything else is a stateless projection of the selected goal's urgency,
//! recomputed on every call. The previously rendered state is threaded in
//! explicitly by the caller; there is no hidden memory.
//!
//! Valid transitions:
//! - into `Celebrate`: only from a celebration or all-daily-complete
//!   context; stamps an expiry five minutes out. The all-daily-complete
//!   context arms at most one celebration: once the previous one expired,
//!   only a new completion brings `Celebrate` back
//! - while `Celebrate` and unexpired: held unchanged, whatever a fresh
//!   evaluation would say
//! - on expiry or any other context: urgency thresholds
//!   (`<0.2` Happy, `<0.5` Neutral, `<0.8` Worried, else Sad),
//!   Neutral when no goal is selected

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::context::ContextKind;

/// How long a celebration is held before the mascot returns to urgency
/// projection.
pub const CELEBRATE_HOLD_SECS: i64 = 300;

/// Urgency below which the mascot is happy.
pub const HAPPY_BELOW: f64 = 0.2;
/// Urgency below which the mascot is neutral.
pub const NEUTRAL_BELOW: f64 = 0.5;
/// Urgency below which the mascot is worried; at or above, sad.
pub const WORRIED_BELOW: f64 = 0.8;

/// Mascot emotion shown on the widget.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Happy,
    Neutral,
    Worried,
    Sad,
    Celebrate,
}

impl Emotion {
    /// Project an urgency score onto an emotion.
    pub fn from_urgency(score: f64) -> Self {
        if score < HAPPY_BELOW {
            Emotion::Happy
        } else if score < NEUTRAL_BELOW {
            Emotion::Neutral
        } else if score < WORRIED_BELOW {
            Emotion::Worried
        } else {
            Emotion::Sad
        }
    }
}

/// The mascot's resolved display state.
///
/// `expires_at` is only meaningful for `Celebrate`. `frame_index` is always
/// 0 outside `Celebrate`; it is reserved for multi-frame idle animation and
/// must stay a re-derivable value, never random.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MascotState {
    pub emotion: Emotion,
    pub frame_index: u32,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl MascotState {
    /// The default state when nothing is known: neutral, frame 0.
    pub fn neutral() -> Self {
        Self {
            emotion: Emotion::Neutral,
            frame_index: 0,
            expires_at: None,
        }
    }

    /// Whether this state is a celebration still inside its hold window.
    pub fn celebration_active(&self, clock: &Clock) -> bool {
        self.emotion == Emotion::Celebrate
            && self
                .expires_at
                .is_some_and(|expiry| clock.now() < expiry)
    }
}

/// Mascot resolution engine. Stateless; the previous state is an input.
pub struct MascotResolver;

impl MascotResolver {
    /// Resolve the mascot state for a context and (optional) selected-goal
    /// urgency, honoring an unexpired celebration carried over from the
    /// previous snapshot.
    pub fn resolve(
        context: ContextKind,
        urgency: Option<f64>,
        previous: Option<&MascotState>,
        clock: &Clock,
    ) -> MascotState {
        // An active celebration cannot be interrupted early.
        if let Some(prev) = previous {
            if prev.celebration_active(clock) {
                return prev.clone();
            }
        }

        let enters_celebrate = match context {
            ContextKind::DailyCelebration | ContextKind::LongTermCelebration => true,
            // The all-complete context persists for the rest of the day; it
            // arms a celebration once, and an expired celebration does not
            // re-arm without a new completion.
            ContextKind::AllDailyComplete => {
                !previous.is_some_and(|p| p.emotion == Emotion::Celebrate)
            }
            _ => false,
        };

        if enters_celebrate {
            MascotState {
                emotion: Emotion::Celebrate,
                frame_index: 0,
                expires_at: Some(clock.now() + Duration::seconds(CELEBRATE_HOLD_SECS)),
            }
        } else {
            MascotState {
                emotion: urgency.map_or(Emotion::Neutral, Emotion::from_urgency),
                frame_index: 0,
                expires_at: None,
            }
        }
    }
}
