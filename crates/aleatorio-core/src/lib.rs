//! Aleatorio Core - score model and shared primitives for generative composition
//!
//! This crate holds the vocabulary every other aleatorio crate speaks: the
//! symbolic score a generation produces, the panning law used when the score
//! is mixed down to speakers, and the numeric constants that tie symbolic
//! durations to sample counts.
//!
//! # Core Abstractions
//!
//! ## Score Model
//!
//! A score is a tree with single ownership at every level:
//!
//! - [`Poly`] - The whole piece, an ordered list of voices
//! - [`Voice`] - One monophonic line, trains keyed by absolute sample index
//! - [`Train`] - A fundamental plus its partials, wagons keyed by sample offset
//! - [`Wagon`] - One synthesizable tone event (a [`Sine`] plus a pan position)
//! - [`Partial`] - A harmonic overtone definition relative to a fundamental
//!
//! ## Panning
//!
//! - [`pan_gain`] - Gain of one speaker for a pan position, for any speaker count
//!
//! ## Output
//!
//! - [`Audio`] - One mono PCM channel of `f64` samples at [`SAMPLE_RATE`]
//! - [`Renderer`] - Sink that receives the per-speaker channels of a render
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (it needs `alloc` for the score maps).
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! aleatorio-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use aleatorio_core::{Sine, Train, Voice, Wagon, Poly};
//!
//! let mut voice = Voice::new();
//! voice.push(Train::new(Wagon::new(Sine::new(440.0, 0.5, 100), 0.5)));
//! voice.push(Train::new(Wagon::new(Sine::new(330.0, 0.4, 200), 0.25)));
//!
//! // The second train starts where the first fundamental ends.
//! assert_eq!(voice.keys().collect::<Vec<_>>(), vec![0, 4400]);
//!
//! let poly = Poly::from(vec![voice]);
//! assert_eq!(poly.len(), 1);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod math;
pub mod pan;
pub mod render;
pub mod score;

pub use math::{duration_in_samples, scale};
pub use pan::{MONO, STEREO, pan_gain};
pub use render::{Audio, Renderer};
pub use score::{Partial, Poly, Sine, Train, Voice, Wagon};

/// Sample rate of every signal produced by aleatorio, in Hz.
pub const SAMPLE_RATE: u32 = 44100;

/// Highest frequency a partial may reach, in Hz.
///
/// Partials whose `number * fundamental` exceeds this are never placed.
pub const MAX_FREQUENCY: f64 = 18000.0;

/// Samples per millisecond of symbolic duration.
///
/// Deliberately 44 rather than 44.1: durations in samples are always
/// `SIGNAL_LENGTH_MULTIPLIER * |duration_ms|`.
pub const SIGNAL_LENGTH_MULTIPLIER: usize = 44;

/// Longest duration a tone is rendered for, in milliseconds (one hour).
///
/// Longer durations, which only arise from corrupt or degenerate models,
/// are clamped to this before conversion to samples.
pub const MAX_DURATION_MS: u64 = 3_600_000;

/// Exclusive upper bound for a randomly placed partial's sample offset.
pub const MAXIMUM_PARTIAL_STARTING_POINT: usize = 1000;

/// Duration given to a partial whose computed duration rounds to zero (ms).
///
/// The mixer also uses this value, as a sample count, for buffer headroom.
pub const MINIMUM_PARTIAL_DURATION: i64 = 10;

/// Highest harmonic number the stock partial tables consider.
pub const MAX_PARTIAL: u32 = 1000;

/// Key of the fundamental wagon inside every [`Train`].
pub const FUNDAMENTAL: usize = 0;
