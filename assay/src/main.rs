// assay/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug assay run ... to see every batched query.
    // Logs go to stderr so `list` and `render` output stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            project_dir,
            select,
            individual,
        } => commands::run::execute(project_dir, select, individual).await,
        Commands::List { project_dir } => commands::list::execute(project_dir),
        Commands::Render {
            project_dir,
            select,
            rows,
            individual,
        } => commands::render::execute(project_dir, select, rows, individual),
    }
}
