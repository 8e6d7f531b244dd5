//! # Glance Core Library
//!
//! This library is the canonical decision engine behind the Glance widget:
//! it maps `(goals, current time)` to one coherent "moment" -- which goal
//! matters right now, how urgent it is, what emotion the mascot shows, what
//! call-to-action to display, and how the background is themed.
//!
//! The engine is deliberately a pure function. Given the same goal set, the
//! same instant, and the same previously rendered mascot state, every
//! consumer computes a bit-for-bit identical [`WidgetSnapshot`]. All time
//! dependence flows through an explicit [`Clock`]; no component performs
//! I/O, reads ambient time, or keeps hidden state.
//!
//! ## Architecture
//!
//! Data flows strictly downward through the components:
//!
//! - [`ContextSelector`]: fixed-precedence decision tree over the goal set
//!   and the clock, producing one of seven presentation contexts
//! - [`UrgencyScorer`]: per-goal-kind scoring formulas onto `[0, 1]`
//! - [`MascotResolver`]: emotion state machine with a single time-bounded
//!   persistent state (celebration)
//! - [`MessageEngine`]: deterministic hourly rotation over per-context
//!   message pools
//! - [`ThemeResolver`]: time-band and arithmetic background-variant pick
//! - [`SnapshotAssembler`]: composes the above into one immutable,
//!   versioned snapshot -- the sole contract surface for rendering
//!
//! ## Key Components
//!
//! - [`Goal`]: the input record (daily habits and long-term objectives)
//! - [`WidgetSnapshot`]: the serialized output every surface consumes
//! - [`WidgetAction`]: the tap record surfaces hand back to the store owner

pub mod action;
pub mod clock;
pub mod context;
pub mod error;
pub mod goal;
pub mod mascot;
pub mod message;
pub mod snapshot;
pub mod theme;
pub mod urgency;

pub use action::{ActionKind, WidgetAction};
pub use clock::Clock;
pub use context::{ContextKind, ContextSelector, Selection};
pub use error::{CoreError, ValidationError};
pub use goal::{Goal, GoalKind, Milestone, ProgressKind};
pub use mascot::{Emotion, MascotResolver, MascotState};
pub use message::MessageEngine;
pub use snapshot::{SnapshotAssembler, TopGoalView, WidgetSnapshot, SNAPSHOT_VERSION};
pub use theme::{BackgroundTheme, Status, ThemeResolver, TimeBand};
pub use urgency::UrgencyScorer;
