//! Configuration commands.

use clap::Subcommand;

use super::CliContext;
use crate::config::Config;
use crate::error::CliError;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the active configuration
    Show {
        /// Emit JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
    /// Set a configuration value (store.data_dir, output.pretty_json)
    Set { key: String, value: String },
    /// Print the configuration file path
    Path,
}

pub fn run(action: ConfigAction, ctx: &CliContext) -> Result<(), CliError> {
    match action {
        ConfigAction::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&ctx.config)?);
            } else {
                let raw = toml::to_string_pretty(&ctx.config).map_err(|e| {
                    CliError::InvalidArg(format!("failed to render configuration: {e}"))
                })?;
                print!("{raw}");
            }
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let mut config = ctx.config.clone();
            config.set(&key, &value)?;
            config.save()?;
            println!("Set {key} = {value}");
            Ok(())
        }
        ConfigAction::Path => {
            match Config::default_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("(no configuration directory on this platform)"),
            }
            Ok(())
        }
    }
}
