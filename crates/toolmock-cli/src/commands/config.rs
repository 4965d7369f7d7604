//! Configuration management commands.

use clap::Args;
use std::path::{Path, PathBuf};
use toolmock_core::config::Config;
use toolmock_core::paths;

/// Config command arguments.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(clap::Subcommand)]
pub enum ConfigCommand {
    /// Show configuration
    Show,

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Show configuration file path
    Path,

    /// Validate configuration
    Validate,
}

fn resolve_path(config_path: Option<&Path>) -> anyhow::Result<PathBuf> {
    match config_path {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(paths::config_file()?),
    }
}

/// Run the config command.
pub fn run(args: ConfigArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = Config::load_or_default(config_path)?;
            println!("{}", config.to_json5()?);
        }

        ConfigCommand::Init { force } => {
            let path = resolve_path(config_path)?;

            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists: {:?}. Use --force to overwrite.",
                    path
                );
            }

            Config::default().save(&path)?;
            println!("Created config file: {:?}", path);
        }

        ConfigCommand::Path => {
            println!("{}", resolve_path(config_path)?.display());
        }

        ConfigCommand::Validate => {
            let path = resolve_path(config_path)?;
            match Config::load(&path) {
                Ok(config) => match config.validate() {
                    Ok(_) => println!("Configuration is valid"),
                    Err(e) => anyhow::bail!("Configuration error: {}", e),
                },
                Err(e) => anyhow::bail!("Failed to load config: {}", e),
            }
        }
    }

    Ok(())
}
