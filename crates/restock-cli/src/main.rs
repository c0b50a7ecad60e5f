use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod pipeline;
mod status;

#[derive(Debug, Parser)]
#[command(name = "restock")]
#[command(about = "Watch a storefront catalog and notify on restocks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the poll → diff → notify → persist pipeline once.
    Run,
    /// Print the persisted snapshot without performing a fetch.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Run => {
            let config = restock_core::load_config()?;
            init_tracing(&config.log_level);
            tracing::debug!(?config, "configuration loaded");
            pipeline::run(&config).await
        }
        // Status only reads the state file; it must work without the
        // messaging credentials the full config requires.
        Commands::Status => {
            init_tracing("info");
            status::print(&restock_core::state_file_from_env())
        }
    };

    // Fatal errors are handled exactly once, here: logged with their
    // context chain, then a non-zero exit so the scheduler can flag the run.
    if let Err(e) = outcome {
        let chain = format!("{e:#}");
        tracing::error!(error = %chain, "run aborted");
        std::process::exit(1);
    }
    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
