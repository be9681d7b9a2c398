//! Depgraph CLI binary.

use anyhow::Result;
use depgraph::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the depgraph CLI.
///
/// Lookups are strictly sequential, so a current_thread runtime is enough.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so rendered output on stdout stays clean.
    // Example: RUST_LOG=depgraph=debug,depgraph_nuget=debug depgraph -p Serilog -v 3.1.1
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("depgraph=info,depgraph_nuget=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting depgraph CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Depgraph CLI completed successfully");
    Ok(())
}
