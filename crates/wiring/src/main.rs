//! Wiring demo - Entry Point
//!
//! Bootstraps the sample module graph from [`wiring::demo`], serves one
//! request through the controller and prints the container summary.
//!
//! | Flag | Description |
//! |------|-------------|
//! | `--config <path>` | TOML configuration file (`WIRING__*` env vars still apply) |
//! | `--json-logs` | Emit logs as JSON |
//! | `--json` | Print the summary as JSON |
//! | `--connect-delay-ms <ms>` | Simulated database connection latency |

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use wiring::demo::{self, UsersController};
use wiring::infrastructure::logging::init_logging;
use wiring::{Application, ConfigLoader};

/// Command line interface for the Wiring demo
#[derive(Parser, Debug)]
#[command(name = "wiring-demo")]
#[command(about = "Wiring - dependency injection demo application")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Print the container summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Simulated database connection latency in milliseconds
    #[arg(long, default_value_t = 50)]
    pub connect_delay_ms: u64,

    /// Database URL handed to the pool factory
    #[arg(long, default_value = demo::DEFAULT_DATABASE_URL)]
    pub database_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let mut config = loader.load()?;
    if cli.json_logs {
        config.logging.json_format = true;
    }
    init_logging(&config.logging)?;

    let root = demo::app_module(
        &cli.database_url,
        Duration::from_millis(cli.connect_delay_ms),
    );
    let app = Application::bootstrap(root, config.container).await?;

    let controller = app.get::<UsersController>().await?;
    info!(response = %controller.handle(1), "Handled sample request");

    let summary = app.container().summary();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", demo::render_summary(&summary));
    }

    let released = app.shutdown().await;
    info!(released, bootstrap = ?app.bootstrap_duration(), "Demo finished");
    Ok(())
}
