//! Song file format and operations.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use aleatorio_io::{RenderLayout, WavRenderer};
use aleatorio_markov::{CycleDetector, GeneratorConfig, SongOptions, ToneDefaults};

use crate::error::ConfigError;
use crate::validation::{ValidationError, parse_name, validate_song};

/// A complete description of a run.
///
/// Every table and key is optional; missing values take the defaults shown
/// below.
///
/// # TOML Format
///
/// ```toml
/// generations = 2
/// speakers = 2
///
/// [paths]
/// seed = "seed"
/// models = "models"
/// audio = "audio"
///
/// [generator]
/// seed = 420
/// reseed_each_step = true
/// max_steps = 10000
///
/// [generator.cycle]
/// min_history = 10
/// density = 1.0
///
/// [score]
/// pan = "center"
/// layout = "single"
/// default_amplitude = 0.0
/// default_duration_ms = 10
/// poly_model = false
/// accumulate_models = false
///
/// [harmonics]
/// table = "naive"
/// placement = "random"
/// seed = 1
///
/// [render]
/// bits_per_sample = 32
/// layout = "mono-files"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SongConfig {
    /// Number of generations to run.
    pub generations: usize,
    /// Speaker count of the rendered output.
    pub speakers: usize,
    /// Model and audio directories.
    pub paths: PathsConfig,
    /// Random walk settings.
    pub generator: GeneratorSection,
    /// Score assembly settings.
    pub score: ScoreSection,
    /// Partial table and placement.
    pub harmonics: HarmonicsSection,
    /// WAV output settings.
    pub render: RenderSection,
}

impl Default for SongConfig {
    fn default() -> Self {
        Self {
            generations: 2,
            speakers: 2,
            paths: PathsConfig::default(),
            generator: GeneratorSection::default(),
            score: ScoreSection::default(),
            harmonics: HarmonicsSection::default(),
            render: RenderSection::default(),
        }
    }
}

/// `[paths]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    /// Generation-0 models.
    pub seed: PathBuf,
    /// Root of the `gen<n>` model directories.
    pub models: PathBuf,
    /// Rendered audio.
    pub audio: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            seed: PathBuf::from("seed"),
            models: PathBuf::from("models"),
            audio: PathBuf::from("audio"),
        }
    }
}

/// `[generator]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorSection {
    /// PRNG seed.
    pub seed: u64,
    /// Re-create the PRNG before every step.
    pub reseed_each_step: bool,
    /// Runaway guard.
    pub max_steps: usize,
    /// `[generator.cycle]`
    pub cycle: CycleSection,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        let generator = GeneratorConfig::default();
        Self {
            seed: generator.seed,
            reseed_each_step: generator.reseed_each_step,
            max_steps: generator.max_steps,
            cycle: CycleSection::default(),
        }
    }
}

/// `[generator.cycle]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CycleSection {
    /// Shortest sequence that can be a loop.
    pub min_history: usize,
    /// Required share of adjacent repeated positions.
    pub density: f64,
    /// Only inspect this many recent values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<usize>,
}

impl Default for CycleSection {
    fn default() -> Self {
        let cycle = CycleDetector::default();
        Self {
            min_history: cycle.min_history,
            density: cycle.density,
            window: cycle.window,
        }
    }
}

/// `[score]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoreSection {
    /// `center`, `sweep` or `alternate`.
    pub pan: String,
    /// `single` or `per-seed`.
    pub layout: String,
    /// Amplitude for frequencies without one.
    pub default_amplitude: f64,
    /// Duration for frequencies without one.
    pub default_duration_ms: i64,
    /// Train the combined poly chain too.
    pub poly_model: bool,
    /// Keep training loaded models instead of fresh ones.
    pub accumulate_models: bool,
}

impl Default for ScoreSection {
    fn default() -> Self {
        let defaults = ToneDefaults::default();
        Self {
            pan: "center".to_string(),
            layout: "single".to_string(),
            default_amplitude: defaults.amplitude,
            default_duration_ms: defaults.duration_ms,
            poly_model: false,
            accumulate_models: false,
        }
    }
}

/// `[harmonics]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HarmonicsSection {
    /// Stock partial table name.
    pub table: String,
    /// `random` or `fixed`.
    pub placement: String,
    /// Placement PRNG seed.
    pub seed: u64,
}

impl Default for HarmonicsSection {
    fn default() -> Self {
        Self {
            table: "naive".to_string(),
            placement: "random".to_string(),
            seed: 1,
        }
    }
}

/// `[render]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderSection {
    /// 16, 24 or 32.
    pub bits_per_sample: u16,
    /// `mono-files` or `interleaved`.
    pub layout: String,
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            bits_per_sample: 32,
            layout: "mono-files".to_string(),
        }
    }
}

impl SongConfig {
    /// Load a song from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let config: SongConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load a song from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the song to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the song to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every value; see [`validate_song`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        Ok(validate_song(self)?)
    }

    /// Validate and build the options a [`Song`](aleatorio_markov::Song)
    /// runs with.
    pub fn to_song_options(&self) -> Result<SongOptions, ConfigError> {
        self.validate()?;

        let table: aleatorio_synth::StockTable = parse_name("harmonics.table", &self.harmonics.table)?;
        let generator = &self.generator;

        Ok(SongOptions {
            generations: self.generations,
            speakers: self.speakers,
            seed_models: self.paths.seed.clone(),
            models: self.paths.models.clone(),
            generator: GeneratorConfig {
                seed: generator.seed,
                reseed_each_step: generator.reseed_each_step,
                max_steps: generator.max_steps,
                cycle: CycleDetector {
                    min_history: generator.cycle.min_history,
                    density: generator.cycle.density,
                    window: generator.cycle.window,
                },
            },
            defaults: ToneDefaults {
                amplitude: self.score.default_amplitude,
                duration_ms: self.score.default_duration_ms,
            },
            pan: parse_name("score.pan", &self.score.pan)?,
            layout: parse_name("score.layout", &self.score.layout)?,
            harmonics: table.table(),
            placement: parse_name("harmonics.placement", &self.harmonics.placement)?,
            harmonics_seed: self.harmonics.seed,
            poly_model: self.score.poly_model,
            accumulate_models: self.score.accumulate_models,
        })
    }

    /// Validate and build the WAV renderer for `[render]` and `paths.audio`.
    pub fn wav_renderer(&self) -> Result<WavRenderer, ConfigError> {
        let layout: RenderLayout = parse_name("render.layout", &self.render.layout)?;
        WavRenderer::new(&self.paths.audio)
            .with_bits_per_sample(self.render.bits_per_sample)
            .map(|wav| wav.with_layout(layout))
            .map_err(|e| ValidationError::invalid("render.bits_per_sample", e.to_string()).into())
    }
}
