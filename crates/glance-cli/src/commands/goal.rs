//! Goal management commands.

use chrono::{DateTime, Utc};
use clap::{Subcommand, ValueEnum};
use glance_core::{Clock, Goal, GoalKind, Milestone, ProgressKind, UrgencyScorer};
use uuid::Uuid;

use super::CliContext;
use crate::error::CliError;
use crate::store::{local_clock, mark_done, record_progress, resolve_goal};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Daily,
    LongTerm,
}

impl From<KindArg> for GoalKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Daily => GoalKind::Daily,
            KindArg::LongTerm => GoalKind::LongTerm,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProgressArg {
    Completion,
    Percentage,
    Milestones,
    Numeric,
}

impl From<ProgressArg> for ProgressKind {
    fn from(value: ProgressArg) -> Self {
        match value {
            ProgressArg::Completion => ProgressKind::Completion,
            ProgressArg::Percentage => ProgressKind::Percentage,
            ProgressArg::Milestones => ProgressKind::Milestones,
            ProgressArg::Numeric => ProgressKind::Numeric,
        }
    }
}

#[derive(Subcommand)]
pub enum GoalAction {
    /// Create a goal
    Add {
        /// Display name
        name: String,
        /// Daily habit or long-term objective
        #[arg(long, value_enum, default_value = "daily")]
        kind: KindArg,
        /// Progress representation
        #[arg(long, value_enum, default_value = "completion")]
        progress: ProgressArg,
        /// Per-day numeric target (daily numeric goals)
        #[arg(long)]
        daily_target: Option<f64>,
        /// Overall numeric target (long-term numeric goals)
        #[arg(long)]
        target: Option<f64>,
        /// Display unit for numeric values
        #[arg(long)]
        unit: Option<String>,
        /// Deadline as RFC 3339 (long-term goals)
        #[arg(long)]
        deadline: Option<String>,
        /// Milestone title; repeat for each step (milestone goals)
        #[arg(long = "milestone")]
        milestones: Vec<String>,
    },
    /// List goals with their current urgency
    List {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Record a progress event against a goal
    Log {
        /// Goal id or name
        goal: String,
        /// Amount: units for numeric goals, points for percentage goals
        #[arg(long)]
        amount: Option<f64>,
    },
    /// Mark a goal fully done
    Done {
        /// Goal id or name
        goal: String,
    },
    /// Delete a goal
    Remove {
        /// Goal id or name
        goal: String,
    },
}

pub fn run(action: GoalAction, ctx: &CliContext) -> Result<(), CliError> {
    let store = ctx.open_store()?;
    let clock = local_clock();

    match action {
        GoalAction::Add {
            name,
            kind,
            progress,
            daily_target,
            target,
            unit,
            deadline,
            milestones,
        } => {
            let mut goal = Goal::new(
                Uuid::new_v4(),
                name,
                kind.into(),
                progress.into(),
                clock.now(),
            );
            goal.daily_target = daily_target.unwrap_or(0.0);
            goal.target_value = target.unwrap_or(0.0);
            goal.unit = unit;
            goal.deadline = deadline.map(|raw| parse_deadline(&raw)).transpose()?;
            goal.milestones = milestones
                .into_iter()
                .map(|title| Milestone {
                    title,
                    completed: false,
                    completed_at: None,
                })
                .collect();
            goal.validate().map_err(|e| CliError::InvalidArg(e.to_string()))?;

            let mut goals = store.load_goals()?;
            goals.push(goal.clone());
            store.save_goals(&goals)?;
            println!("Goal created: {} ({})", goal.name, goal.id);
            Ok(())
        }
        GoalAction::List { json } => {
            let goals = store.load_goals()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&goals)?);
            } else {
                print_goal_table(&goals, &clock);
            }
            Ok(())
        }
        GoalAction::Log { goal, amount } => {
            let mut goals = store.load_goals()?;
            let target = resolve_goal(&mut goals, &goal)?;
            record_progress(target, amount, &clock);
            println!("Logged: {} ({})", target.name, target.progress_label(&clock));
            store.save_goals(&goals)?;
            Ok(())
        }
        GoalAction::Done { goal } => {
            let mut goals = store.load_goals()?;
            let target = resolve_goal(&mut goals, &goal)?;
            mark_done(target, &clock);
            println!("Done: {}", target.name);
            store.save_goals(&goals)?;
            Ok(())
        }
        GoalAction::Remove { goal } => {
            let mut goals = store.load_goals()?;
            let id = resolve_goal(&mut goals, &goal)?.id;
            goals.retain(|g| g.id != id);
            store.save_goals(&goals)?;
            println!("Removed: {id}");
            Ok(())
        }
    }
}

fn parse_deadline(raw: &str) -> Result<DateTime<Utc>, CliError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| CliError::InvalidArg(format!("deadline '{raw}': {e}")))
}

fn print_goal_table(goals: &[Goal], clock: &Clock) {
    if goals.is_empty() {
        println!("No goals yet. Try: glance-cli goal add \"Drink water\"");
        return;
    }
    for goal in goals {
        let kind = match goal.kind {
            GoalKind::Daily => "daily",
            GoalKind::LongTerm => "long-term",
        };
        let state = if goal.is_complete(clock) {
            "done".to_string()
        } else {
            format!("urgency {:.2}", UrgencyScorer::score(goal, clock))
        };
        println!(
            "{}  {:<24} [{kind}] {} ({state})",
            goal.id,
            goal.name,
            goal.progress_label(clock),
        );
    }
}
