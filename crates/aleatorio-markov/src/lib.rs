//! Aleatorio Markov - evolving a piece generation by generation
//!
//! This crate holds the stochastic half of aleatorio: Markov chains over
//! tone parameters, the random walks that turn them into new material, and
//! the [`Song`] driver that runs generation after generation.
//!
//! # Core Components
//!
//! ## Chains
//!
//! - [`Chain`] - N-gram transition counts over string tokens, with JSON
//!   persistence compatible with existing model files
//! - [`Models`] - The frequency, amplitude and duration chains of one
//!   generation, plus an optional combined poly chain
//!
//! ## Generation
//!
//! - [`generate`] - One random walk per seed state, run in parallel
//! - [`CycleDetector`] - Stops walks that have started to repeat
//! - [`GeneratorConfig`] - PRNG seed, reseeding and the runaway guard
//!
//! ```rust
//! use aleatorio_markov::{Chain, GeneratorConfig, generate};
//!
//! let mut chain = Chain::new(1);
//! chain.add(&["220", "330", "440"]);
//!
//! let sequences = generate(&chain, &GeneratorConfig::default()).unwrap();
//! assert_eq!(sequences[0], vec![330.0, 440.0]);
//! ```
//!
//! ## Scores
//!
//! - [`zip_tones`] - Combine parameter sequences into tones
//! - [`assemble`] - Lay tones out as a [`Poly`](aleatorio_core::Poly)
//!   ([`VoiceLayout`], [`PanStrategy`])
//! - [`seed_segments`], [`melody_poly`], [`sweep_poly`] - Built-in material
//!
//! ## Driver
//!
//! - [`Song`] / [`SongOptions`] - Load, generate, place, mix, render, retrain
//! - [`GenerationReport`] - What one generation produced
//!
//! # Model layout
//!
//! ```text
//! seed/            freq.json amp.json dur.json [poly.json]
//! models/gen0/     freq.json amp.json dur.json [poly.json]
//! models/gen1/     ...
//! ```

pub mod chain;
pub mod compose;
pub mod cycle;
pub mod error;
pub mod generator;
pub mod models;
pub mod seed;
pub mod song;

pub use chain::{Chain, END_TOKEN, NGRAM_SEPARATOR, START_TOKEN, Seed, duration_token, value_token};
pub use compose::{PanStrategy, ToneDefaults, VoiceLayout, assemble, zip_tones};
pub use cycle::CycleDetector;
pub use error::{MarkovError, Result};
pub use generator::{GeneratorConfig, Parameter, generate, walk};
pub use models::{Models, POLY_FILE, POLY_ORDER};
pub use seed::{melody_poly, seed_models, seed_poly, seed_segments, seed_voice, sweep_poly};
pub use song::{GenerationReport, Song, SongOptions, generation_dir};
