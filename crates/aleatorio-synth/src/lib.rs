//! Aleatorio Synth - turning a symbolic score into speaker feeds
//!
//! This crate renders the score model of [`aleatorio_core`] into PCM audio.
//!
//! # Core Components
//!
//! ## Tone Synthesis
//!
//! - [`synthesize`] - Phase-continuous sine trimmed to its last zero crossing
//! - [`Tone`] - A synthesized signal plus its ending phase and trimmed tail
//! - [`zero_crossing_end`] - The trimming rule on its own
//!
//! ```rust
//! use aleatorio_synth::synthesize;
//!
//! let tone = synthesize(440.0, 0.5, 4400, 0.0);
//! assert!(tone.len() <= 4400);
//! assert!(tone.samples().iter().all(|s| s.abs() < 1.0));
//! ```
//!
//! ## Partials
//!
//! - [`Harmonics`] - Anything that supplies a partial list
//! - [`PartialTable`] / [`StockTable`] - Built-in tables (naive, primes, ...)
//! - [`Placement`] - Attaches partials to a train
//!   ([`RandomPlacement`], [`FixedTablePlacement`], [`PlacementPolicy`])
//! - [`place_voice`] / [`place_poly`] - Apply a policy to a whole score
//!
//! ## Mixing
//!
//! - [`deconstruct`] - Render a [`Poly`](aleatorio_core::Poly) into one
//!   buffer per speaker
//!
//! # Example
//!
//! ```rust
//! use aleatorio_core::{Poly, Sine, Train, Voice, Wagon};
//! use aleatorio_synth::{PartialTable, PlacementPolicy, deconstruct, place_poly};
//! use rand::SeedableRng;
//! use rand_pcg::Pcg64Mcg;
//!
//! let mut voice = Voice::new();
//! voice.push(Train::new(Wagon::new(Sine::new(220.0, 0.3, 200), 0.25)));
//! voice.push(Train::new(Wagon::new(Sine::new(330.0, 0.3, 200), 0.75)));
//! let mut poly = Poly::from(vec![voice]);
//!
//! let mut rng = Pcg64Mcg::seed_from_u64(1);
//! place_poly(&mut poly, &PartialTable::naive(), &PlacementPolicy::Random, &mut rng);
//!
//! let stereo = deconstruct(&poly, 2).unwrap();
//! assert_eq!(stereo.len(), 2);
//! ```
//!
//! # Features
//!
//! - `tracing` - Emit `debug` events from placement and mixing

pub mod deconstruct;
pub mod error;
pub mod harmonics;
pub mod placement;
pub mod tone;

pub use deconstruct::{RenderedTrain, VOICE_HEADROOM, deconstruct, render_train, render_voice};
pub use error::SynthError;
pub use harmonics::{Harmonics, PartialTable, StockTable, is_prime};
pub use placement::{
    FixedTablePlacement, Placement, PlacementPolicy, RandomPlacement, place_poly, place_voice,
};
pub use tone::{Tone, synthesize, synthesize_sine, zero_crossing_end};
