//! Widget surface commands: snapshot emission and tap handling.

use chrono::{DateTime, Utc};
use clap::Subcommand;
use glance_core::{Clock, SnapshotAssembler, WidgetAction};
use tracing::debug;

use super::CliContext;
use crate::error::CliError;
use crate::store::{local_clock, record_progress, resolve_goal};

#[derive(Subcommand)]
pub enum WidgetCmd {
    /// Evaluate the engine and publish a widget snapshot
    Snapshot {
        /// Evaluate at this RFC 3339 instant instead of now; its UTC
        /// offset becomes the wall clock
        #[arg(long)]
        at: Option<String>,
        /// Print compact JSON regardless of configuration
        #[arg(long)]
        compact: bool,
    },
    /// Simulate a tap on a goal: emit the action record and apply it
    Tap {
        /// Goal id or name
        goal: String,
    },
}

pub fn run(cmd: WidgetCmd, ctx: &CliContext) -> Result<(), CliError> {
    let store = ctx.open_store()?;

    match cmd {
        WidgetCmd::Snapshot { at, compact } => {
            let clock = match at {
                Some(raw) => parse_instant(&raw)?,
                None => local_clock(),
            };
            let goals = store.load_goals()?;
            let previous = store.load_mascot()?;
            debug!(goals = goals.len(), "generating snapshot");

            let snapshot = SnapshotAssembler::assemble(&goals, previous.as_ref(), &clock);
            store.publish_snapshot(&snapshot)?;
            store.save_mascot(&snapshot.mascot)?;

            let json = if compact || !ctx.config.output.pretty_json {
                snapshot.to_json()?
            } else {
                serde_json::to_string_pretty(&snapshot)?
            };
            println!("{json}");
            Ok(())
        }
        WidgetCmd::Tap { goal } => {
            let clock = local_clock();
            let mut goals = store.load_goals()?;
            let target = resolve_goal(&mut goals, &goal)?;

            let action = WidgetAction::log_progress(target.id, clock.now());
            println!("{}", action.to_json()?);

            // The store owner applies the action right away; the engine
            // only sees the updated goal set on the next snapshot.
            record_progress(target, None, &clock);
            store.save_goals(&goals)?;
            Ok(())
        }
    }
}

fn parse_instant(raw: &str) -> Result<Clock, CliError> {
    let parsed: DateTime<chrono::FixedOffset> = DateTime::parse_from_rfc3339(raw)
        .map_err(|e| CliError::InvalidArg(format!("instant '{raw}': {e}")))?;
    Ok(Clock::new(parsed.with_timezone(&Utc), *parsed.offset()))
}
