use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod store;

use commands::CliContext;
use config::Config;

#[derive(Parser)]
#[command(name = "glance-cli", version, about = "Glance CLI")]
struct Cli {
    /// Override the goal store directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Goal management
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Widget snapshot and tap handling
    Widget {
        #[command(subcommand)]
        action: commands::widget::WidgetCmd,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions { shell: Shell },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    let ctx = CliContext {
        config,
        data_dir: cli.data_dir,
    };

    let result = match cli.command {
        Commands::Goal { action } => commands::goal::run(action, &ctx),
        Commands::Widget { action } => commands::widget::run(action, &ctx),
        Commands::Config { action } => commands::config::run(action, &ctx),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "glance-cli",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
