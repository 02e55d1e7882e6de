//! Evolve command: run the generations of a song.

use super::common::{load_song, parse_table};
use aleatorio_markov::Song;
use aleatorio_synth::StockTable;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Args)]
pub struct EvolveArgs {
    /// Song file (name in the config directory, or a path)
    #[arg(short, long)]
    config: Option<String>,

    /// Number of generations
    #[arg(short, long)]
    generations: Option<usize>,

    /// Generation-0 model directory
    #[arg(long)]
    seed_models: Option<PathBuf>,

    /// Root of the per-generation model directories
    #[arg(short, long)]
    models: Option<PathBuf>,

    /// Output directory for rendered audio
    #[arg(short, long)]
    audio: Option<PathBuf>,

    /// Speaker count
    #[arg(short, long)]
    speakers: Option<usize>,

    /// Partial table
    #[arg(long, value_parser = parse_table)]
    harmonics: Option<StockTable>,
}

pub fn run(args: EvolveArgs) -> anyhow::Result<()> {
    let mut config = load_song(args.config.as_deref())?;

    if let Some(generations) = args.generations {
        config.generations = generations;
    }
    if let Some(speakers) = args.speakers {
        config.speakers = speakers;
    }
    if let Some(seed) = args.seed_models {
        config.paths.seed = seed;
    }
    if let Some(models) = args.models {
        config.paths.models = models;
    }
    if let Some(audio) = args.audio {
        config.paths.audio = audio;
    }
    if let Some(table) = args.harmonics {
        config.harmonics.table = table.name().to_string();
    }

    let options = config.to_song_options()?;
    let mut wav = config.wav_renderer()?;
    let song = Song::new(options);

    println!(
        "Evolving {} generation(s) from {} ({} speaker(s))",
        config.generations,
        config.paths.seed.display(),
        config.speakers
    );

    let pb = ProgressBar::new(config.generations as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let reports = song.run_with(&mut wav, |report| {
        pb.set_message(format!("gen{}: {} tones", report.generation, report.tones));
        pb.inc(1);
    });
    pb.finish_and_clear();
    let reports = reports?;

    for report in &reports {
        println!(
            "gen{:<3} {:>6} tones  {:>3} voice(s)  {:>8.2}s  {:>7} partials",
            report.generation,
            report.tones,
            report.voices,
            report.samples as f64 / f64::from(aleatorio_core::SAMPLE_RATE),
            report.partials
        );
    }

    println!(
        "Models: {}  Audio: {}",
        config.paths.models.display(),
        wav.dir().display()
    );

    Ok(())
}
