//! Inspect command: summarize a model file.

use aleatorio_markov::{Chain, MarkovError};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct InspectArgs {
    /// Model JSON file
    model: PathBuf,

    /// Print every seed state
    #[arg(long)]
    seeds: bool,
}

pub fn run(args: InspectArgs) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&args.model)
        .map_err(|e| MarkovError::read_file(&args.model, e))?;
    let chain = Chain::from_json(&json)
        .map_err(|e| anyhow::anyhow!("Failed to parse model '{}': {}", args.model.display(), e))?;

    println!("Model: {}", args.model.display());
    println!("  Order:       {}", chain.order());
    println!("  States:      {}", chain.state_count());
    println!("  Transitions: {}", chain.transition_count());

    match chain.seeds() {
        Ok(seeds) => {
            println!("  Seeds:       {}", seeds.len());
            if let (Some(low), Some(high)) = (seeds.first(), seeds.last()) {
                println!("  Range:       {} .. {}", low.state, high.state);
            }
            if args.seeds {
                for seed in &seeds {
                    println!("    {:>4}  {}", seed.rank, seed.state);
                }
            }
        }
        Err(MarkovError::UnparsableToken(_)) => println!("  Seeds:       n/a (non-numeric states)"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
