//! toolmock CLI entry point.

use clap::Parser;
use toolmock_cli::{run, Cli};
use toolmock_core::config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging. Tool output goes to stdout, so logs go to stderr.
    let level = match cli.verbose {
        0 => Config::load_or_default(cli.config.as_deref())
            .map(|config| config.logging.level.as_str())
            .unwrap_or("info"),
        1 => "debug",
        _ => "trace",
    };
    let default_filter = format!(
        "toolmock={level},toolmock_core={level},toolmock_tools={level},toolmock_cli={level}"
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Run the command
    run(cli).await
}
