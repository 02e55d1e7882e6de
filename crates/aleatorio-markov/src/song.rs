//! The multi-generation driver.
//!
//! Each generation reads the previous generation's models, walks them into
//! new tone sequences, lays those out as a score, attaches partials, mixes
//! the score down to speaker feeds, hands the feeds to a
//! [`Renderer`] and finally trains and exports the models the next
//! generation starts from.
//!
//! ```text
//! seed/ or models/gen<n-1>/  ->  generate (freq | amp | dur)  ->  zip
//!     ->  assemble  ->  place partials  ->  deconstruct
//!     ->  render "gen<n>"  ->  models/gen<n>/
//! ```

use std::path::{Path, PathBuf};

use aleatorio_core::{Renderer, Sine};
use aleatorio_synth::{PartialTable, PlacementPolicy, deconstruct, place_poly};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

use crate::compose::{PanStrategy, ToneDefaults, VoiceLayout, assemble, zip_tones};
use crate::error::{MarkovError, Result};
use crate::generator::{GeneratorConfig, generate};
use crate::models::Models;

/// Everything a [`Song`] needs to run.
#[derive(Debug, Clone, PartialEq)]
pub struct SongOptions {
    /// Number of generations to run.
    pub generations: usize,
    /// Speaker count of the rendered output.
    pub speakers: usize,
    /// Directory holding the generation-0 models.
    pub seed_models: PathBuf,
    /// Root under which `gen<n>` model directories are written.
    pub models: PathBuf,
    /// Random walk settings.
    pub generator: GeneratorConfig,
    /// Fallback amplitude and duration for unmatched frequencies.
    pub defaults: ToneDefaults,
    /// Pan positions of the assembled score.
    pub pan: PanStrategy,
    /// Voice layout of the assembled score.
    pub layout: VoiceLayout,
    /// Partials attached to every fundamental.
    pub harmonics: PartialTable,
    /// How partials are placed.
    pub placement: PlacementPolicy,
    /// Placement PRNG seed; generation `n` uses `harmonics_seed + n`.
    pub harmonics_seed: u64,
    /// Also train and export the combined order-2 poly chain.
    pub poly_model: bool,
    /// Keep training the loaded models instead of starting fresh ones.
    pub accumulate_models: bool,
}

impl Default for SongOptions {
    fn default() -> Self {
        Self {
            generations: 2,
            speakers: 2,
            seed_models: PathBuf::from("seed"),
            models: PathBuf::from("models"),
            generator: GeneratorConfig::default(),
            defaults: ToneDefaults::default(),
            pan: PanStrategy::default(),
            layout: VoiceLayout::default(),
            harmonics: PartialTable::naive(),
            placement: PlacementPolicy::default(),
            harmonics_seed: 1,
            poly_model: false,
            accumulate_models: false,
        }
    }
}

/// Summary of one finished generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Generation number.
    pub generation: usize,
    /// Tones generated, across all sequences.
    pub tones: usize,
    /// Voices in the assembled score.
    pub voices: usize,
    /// Length of the rendered channels, in samples.
    pub samples: usize,
    /// Partials attached by placement.
    pub partials: usize,
    /// Directory the trained models were exported to.
    pub model_dir: PathBuf,
}

/// Runs generations of a piece.
#[derive(Debug, Clone)]
pub struct Song {
    options: SongOptions,
}

impl Song {
    /// Create a song from its options.
    pub fn new(options: SongOptions) -> Self {
        Self { options }
    }

    /// The options this song runs with.
    pub fn options(&self) -> &SongOptions {
        &self.options
    }

    /// Directory generation `n` writes its models to.
    pub fn model_dir(&self, n: usize) -> PathBuf {
        generation_dir(&self.options.models, n)
    }

    /// Directory generation `n` reads its models from.
    pub fn source_dir(&self, n: usize) -> PathBuf {
        match n {
            0 => self.options.seed_models.clone(),
            n => self.model_dir(n - 1),
        }
    }

    /// Run generation `n`, rendering it through `renderer` as `gen<n>`.
    pub fn run_generation<R: Renderer>(&self, n: usize, renderer: &mut R) -> Result<GenerationReport> {
        let opts = &self.options;
        let source = self.source_dir(n);
        tracing::info!(generation = n, source = %source.display(), "generation started");

        let models = Models::load(&source)?;

        let config = &opts.generator;
        let (frequencies, (amplitudes, durations)) = rayon::join(
            || generate(&models.frequency, config),
            || {
                rayon::join(
                    || generate(&models.amplitude, config),
                    || generate(&models.duration, config),
                )
            },
        );
        let (frequencies, amplitudes, durations) = (frequencies?, amplitudes?, durations?);

        let tones = zip_tones(&frequencies, &amplitudes, &durations, opts.defaults);
        let tone_count: usize = tones.iter().map(Vec::len).sum();
        tracing::debug!(
            generation = n,
            sequences = tones.len(),
            tones = tone_count,
            "sequences generated"
        );

        let mut poly = assemble(&tones, opts.layout, opts.pan);
        let mut rng = Pcg64Mcg::seed_from_u64(opts.harmonics_seed.wrapping_add(n as u64));
        let partials = place_poly(&mut poly, &opts.harmonics, &opts.placement, &mut rng);

        let channels = deconstruct(&poly, opts.speakers)?;
        let samples = channels.first().map_or(0, Vec::len);

        let name = format!("gen{n}");
        renderer
            .render(&channels, &name)
            .map_err(MarkovError::render)?;

        let mut next = if opts.accumulate_models {
            models
        } else {
            Models::new()
        };
        let flat: Vec<Sine> = tones.iter().flatten().copied().collect();
        next.add(&flat);
        if opts.poly_model {
            next.add_poly(&poly);
        }

        let model_dir = self.model_dir(n);
        next.export(&model_dir)?;

        tracing::info!(
            generation = n,
            tones = tone_count,
            voices = poly.len(),
            samples,
            partials,
            "generation finished"
        );

        Ok(GenerationReport {
            generation: n,
            tones: tone_count,
            voices: poly.len(),
            samples,
            partials,
            model_dir,
        })
    }

    /// Run every generation in order.
    pub fn run<R: Renderer>(&self, renderer: &mut R) -> Result<Vec<GenerationReport>> {
        self.run_with(renderer, |_| {})
    }

    /// Run every generation, calling `on_generation` after each one.
    pub fn run_with<R, F>(&self, renderer: &mut R, mut on_generation: F) -> Result<Vec<GenerationReport>>
    where
        R: Renderer,
        F: FnMut(&GenerationReport),
    {
        let mut reports = Vec::with_capacity(self.options.generations);
        for n in 0..self.options.generations {
            let report = self.run_generation(n, renderer)?;
            on_generation(&report);
            reports.push(report);
        }
        Ok(reports)
    }
}

/// `<root>/gen<n>`
pub fn generation_dir(root: &Path, n: usize) -> PathBuf {
    root.join(format!("gen{n}"))
}
