//! Aleatorio CLI - train, evolve and render generative pieces.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aleatorio")]
#[command(author, version, about = "Generative music by Markov evolution", long_about = None)]
struct Cli {
    /// Log debug events (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the generation-0 models from the seed composition
    Seed(commands::seed::SeedArgs),

    /// Run generations of a song
    Evolve(commands::evolve::EvolveArgs),

    /// Render a built-in piece
    Demo(commands::demo::DemoArgs),

    /// Summarize a model file
    Inspect(commands::inspect::InspectArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Seed(args) => commands::seed::run(args),
        Commands::Evolve(args) => commands::evolve::run(args),
        Commands::Demo(args) => commands::demo::run(args),
        Commands::Inspect(args) => commands::inspect::run(args),
    }
}
