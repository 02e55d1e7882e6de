//! Song configuration for aleatorio.
//!
//! A song file is a TOML description of a multi-generation run: how many
//! generations and speakers, where models and audio live, how walks are
//! seeded and stopped, how the score is laid out, which partials are
//! attached and how the result is written.
//!
//! # Features
//!
//! - **Song files**: [`SongConfig`] loads and saves TOML with defaults for
//!   every key
//! - **Validation**: [`validate_song`] collects range and name errors
//! - **Conversion**: [`SongConfig::to_song_options`] and
//!   [`SongConfig::wav_renderer`] build the runtime types
//! - **Paths**: Platform-specific song file lookup (`std`
//!   feature)
//!
//! # Example
//!
//! ```rust,no_run
//! use aleatorio_config::SongConfig;
//! use aleatorio_markov::Song;
//!
//! let config = SongConfig::load("song.toml").unwrap();
//! let song = Song::new(config.to_song_options().unwrap());
//! let mut wav = config.wav_renderer().unwrap();
//! song.run(&mut wav).unwrap();
//! ```

mod error;
mod song_config;

/// Platform-specific paths for song files.
#[cfg(feature = "std")]
pub mod paths;

/// Song file validation.
pub mod validation;

pub use error::ConfigError;
#[cfg(feature = "std")]
pub use paths::{DEFAULT_SONG_FILE, default_song_path, find_song, user_config_dir};
pub use song_config::{
    CycleSection, GeneratorSection, HarmonicsSection, PathsConfig, RenderSection, ScoreSection,
    SongConfig,
};
pub use validation::{ValidationError, ValidationResult, parse_name, validate_song};
