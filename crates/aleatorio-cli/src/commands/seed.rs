//! Seed command: train the generation-0 models.

use super::common::{parse_table, place};
use aleatorio_core::Renderer;
use aleatorio_io::WavRenderer;
use aleatorio_markov::{POLY_FILE, Parameter, seed_models, seed_poly};
use aleatorio_synth::{StockTable, deconstruct};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct SeedArgs {
    /// Directory to export the seed models to
    #[arg(short, long, default_value = "seed")]
    models: PathBuf,

    /// Also render the seed composition into this directory
    #[arg(short, long)]
    audio: Option<PathBuf>,

    /// Speaker count for the rendered composition
    #[arg(short, long, default_value = "2")]
    speakers: usize,

    /// Partial table for the rendered composition
    #[arg(long, default_value = "weighted-primes", value_parser = parse_table)]
    harmonics: StockTable,

    /// Placement PRNG seed
    #[arg(long, default_value = "1")]
    harmonics_seed: u64,

    /// Also train a whole-tone model from the composition
    #[arg(long)]
    poly_model: bool,
}

pub fn run(args: SeedArgs) -> anyhow::Result<()> {
    let mut models = seed_models();
    if args.poly_model {
        models.add_poly(&seed_poly());
    }
    models.export(&args.models)?;

    println!("Seed models: {}", args.models.display());
    for parameter in Parameter::ALL {
        let chain = models.chain(parameter);
        println!(
            "  {:<10} {} states, {} transitions",
            parameter.file_name(),
            chain.state_count(),
            chain.transition_count()
        );
    }
    if let Some(poly) = &models.poly {
        println!(
            "  {:<10} {} states, {} transitions",
            POLY_FILE,
            poly.state_count(),
            poly.transition_count()
        );
    }

    let Some(audio) = args.audio else {
        return Ok(());
    };

    let mut poly = seed_poly();
    let partials = place(&mut poly, args.harmonics, args.harmonics_seed);
    tracing::debug!(partials, table = %args.harmonics, "placed partials");

    let channels = deconstruct(&poly, args.speakers)?;
    let mut wav = WavRenderer::new(&audio);
    wav.render(&channels, "seed")?;

    let samples = channels.first().map_or(0, Vec::len);
    println!(
        "Rendered seed composition: {} channel(s), {:.2}s -> {}",
        channels.len(),
        samples as f64 / f64::from(aleatorio_core::SAMPLE_RATE),
        audio.display()
    );

    Ok(())
}
