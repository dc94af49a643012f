//! Syllabus CLI binary.
//!
//! This binary provides command-line access to Syllabus:
//! - Generate course layouts and chapter content
//! - Regenerate single chapters and backfill videos
//! - Show and list stored courses

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // API keys and DATABASE_URL may come from .env
    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = cli::Cli::parse();

    // Initialize tracing; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute the requested command
    cli::run(cli).await?;

    Ok(())
}
