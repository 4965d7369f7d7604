//! toolmock command-line interface.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// toolmock - mock tools for agent evaluation
#[derive(Parser)]
#[command(name = "toolmock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to config file
    #[arg(short, long, env = "TOOLMOCK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// List registered tools
    List(commands::list::ListArgs),

    /// Show a tool's input schema
    Schema {
        /// Tool name
        tool: String,
    },

    /// Call a tool once and print its output
    Call(commands::call::CallArgs),

    /// List the tasks in a tool's dataset
    Tasks {
        /// Tool name
        tool: String,
    },

    /// Configuration management
    Config(commands::config::ConfigArgs),

    /// Show version information
    Version,
}

/// Run the CLI with the given arguments.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::List(args) => commands::list::run(args, config_path).await,
        Commands::Schema { tool } => commands::list::schema(&tool, config_path).await,
        Commands::Call(args) => commands::call::run(args, config_path).await,
        Commands::Tasks { tool } => commands::tasks::run(&tool, config_path),
        Commands::Config(args) => commands::config::run(args, config_path),
        Commands::Version => {
            println!("toolmock {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
