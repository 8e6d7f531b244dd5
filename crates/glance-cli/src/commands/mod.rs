//! CLI command implementations.

pub mod config;
pub mod goal;
pub mod widget;

use std::path::PathBuf;

use crate::config::Config;
use crate::error::CliError;
use crate::store::GoalStore;

/// Shared command context: loaded configuration plus the global store
/// directory override.
pub struct CliContext {
    pub config: Config,
    pub data_dir: Option<PathBuf>,
}

impl CliContext {
    /// Open the goal store, honoring `--data-dir`, then the configured
    /// directory, then the platform default.
    pub fn open_store(&self) -> Result<GoalStore, CliError> {
        if let Some(dir) = &self.data_dir {
            return Ok(GoalStore::at(dir));
        }
        if let Some(dir) = &self.config.store.data_dir {
            return Ok(GoalStore::at(dir));
        }
        Ok(GoalStore::open_default()?)
    }
}
