//! Demo command: render one of the built-in pieces.

use super::common::{parse_table, place};
use aleatorio_core::Renderer;
use aleatorio_io::{RenderLayout, WavRenderer};
use aleatorio_markov::{melody_poly, seed_poly, sweep_poly};
use aleatorio_synth::{StockTable, deconstruct};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

#[derive(Clone, Copy, ValueEnum)]
pub enum Piece {
    /// Two short voices
    Melody,
    /// One tone panning across the field
    Sweep,
    /// The seed composition
    Seed,
}

impl Piece {
    fn name(self) -> &'static str {
        match self {
            Piece::Melody => "melody",
            Piece::Sweep => "sweep",
            Piece::Seed => "seed",
        }
    }
}

#[derive(Args)]
pub struct DemoArgs {
    /// Output directory
    output: PathBuf,

    /// Piece to render
    #[arg(short, long, value_enum, default_value = "melody")]
    piece: Piece,

    /// Speaker count
    #[arg(short, long, default_value = "2")]
    speakers: usize,

    /// Partial table
    #[arg(long, default_value = "none", value_parser = parse_table)]
    harmonics: StockTable,

    /// Write one multi-channel file instead of one file per speaker
    #[arg(long)]
    interleaved: bool,

    /// Output bit depth (16, 24, or 32 for float)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: DemoArgs) -> anyhow::Result<()> {
    let mut poly = match args.piece {
        Piece::Melody => melody_poly(),
        Piece::Sweep => sweep_poly(),
        Piece::Seed => seed_poly(),
    };
    let partials = place(&mut poly, args.harmonics, 1);
    tracing::debug!(partials, table = %args.harmonics, "placed partials");

    let channels = deconstruct(&poly, args.speakers)?;

    let layout = if args.interleaved {
        RenderLayout::Interleaved
    } else {
        RenderLayout::MonoFiles
    };
    let mut wav = WavRenderer::new(&args.output)
        .with_bits_per_sample(args.bit_depth)?
        .with_layout(layout);
    wav.render(&channels, args.piece.name())?;

    let samples = channels.first().map_or(0, Vec::len);
    println!("Rendered {}", args.piece.name());
    println!("  Voices:   {}", poly.len());
    println!("  Channels: {}", channels.len());
    println!(
        "  Duration: {:.2}s",
        samples as f64 / f64::from(aleatorio_core::SAMPLE_RATE)
    );
    for path in wav.paths(args.piece.name(), channels.len()) {
        println!("  {}", path.display());
    }

    Ok(())
}
