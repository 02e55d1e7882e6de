//! Sequence generation by random walks over a trained chain.
//!
//! For every [`Seed`] of an order-1 chain one walk is run on its own rayon
//! task. A walk draws the next token, parses it as a number and stops when
//! it reaches the end token or the [`CycleDetector`] reports a loop. The
//! resulting sequences are indexed by the seed's rank.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use rayon::prelude::*;

use crate::chain::{Chain, END_TOKEN, Seed};
use crate::cycle::CycleDetector;
use crate::error::{MarkovError, Result};

/// Knobs of the random walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    /// PRNG seed.
    pub seed: u64,
    /// Re-create the PRNG from `seed` before every step.
    ///
    /// Every state then always moves to the same successor and a walk is a
    /// deterministic path that must end or loop. When false each walk owns
    /// one PRNG seeded from `seed` and the seed's rank.
    pub reseed_each_step: bool,
    /// Steps after which a walk is declared runaway.
    pub max_steps: usize,
    /// Loop detection settings.
    pub cycle: CycleDetector,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 420,
            reseed_each_step: true,
            max_steps: 10_000,
            cycle: CycleDetector::default(),
        }
    }
}

/// The three parameters a tone is generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// Frequency in Hz
    Frequency,
    /// Linear amplitude
    Amplitude,
    /// Duration in milliseconds
    Duration,
}

impl Parameter {
    /// All parameters in file order.
    pub const ALL: [Parameter; 3] = [
        Parameter::Frequency,
        Parameter::Amplitude,
        Parameter::Duration,
    ];

    /// Short name used in logs and model file names.
    pub fn name(self) -> &'static str {
        match self {
            Parameter::Frequency => "freq",
            Parameter::Amplitude => "amp",
            Parameter::Duration => "dur",
        }
    }

    /// Model file name, e.g. `freq.json`.
    pub fn file_name(self) -> String {
        format!("{}.json", self.name())
    }
}

/// Walk `chain` from one seed.
pub fn walk(chain: &Chain, seed: &Seed, config: &GeneratorConfig) -> Result<Vec<f64>> {
    let walk_seed = config.seed ^ seed.rank as u64;
    let mut rng = Pcg64Mcg::seed_from_u64(walk_seed);

    let mut state = seed.state.clone();
    let mut values = Vec::new();

    for _ in 0..config.max_steps {
        if config.reseed_each_step {
            rng = Pcg64Mcg::seed_from_u64(config.seed);
        }

        let next = chain.next(&[state.as_str()], &mut rng)?;
        if next == END_TOKEN {
            return Ok(values);
        }

        let value: f64 = next
            .parse()
            .map_err(|_| MarkovError::UnparsableToken(next.to_string()))?;

        if config.cycle.is_loop(&values, value) {
            tracing::debug!(seed = %seed.state, length = values.len(), "loop found");
            return Ok(values);
        }

        values.push(value);
        state = next.to_string();
    }

    Err(MarkovError::Runaway {
        seed: seed.state.clone(),
        steps: config.max_steps,
    })
}

/// Run one walk per seed of `chain`, in parallel.
///
/// The result holds one sequence per seed, ordered by ascending seed value.
/// Only order-1 chains can be walked.
pub fn generate(chain: &Chain, config: &GeneratorConfig) -> Result<Vec<Vec<f64>>> {
    if chain.order() != 1 {
        return Err(MarkovError::OrderMismatch {
            expected: 1,
            found: chain.order(),
        });
    }

    let seeds = chain.seeds()?;
    seeds
        .par_iter()
        .map(|seed| walk(chain, seed, config))
        .collect()
}
