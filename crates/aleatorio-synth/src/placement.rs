//! Harmonic partial placement.
//!
//! Placement turns a partial list into extra [`Wagon`]s inside a [`Train`].
//! Two policies exist:
//!
//! - [`FixedTablePlacement`] honours each partial's own start and duration,
//!   clipped to the fundamental.
//! - [`RandomPlacement`] draws a distinct offset in `[1, 1000)` per partial
//!   and lets the partial ring until the fundamental ends.
//!
//! Neither policy ever touches key 0, and partials above
//! [`MAX_FREQUENCY`] are dropped. A zero amplitude factor still places a
//! silent wagon, which reserves its duration like any other.

use core::fmt;
use core::str::FromStr;

use aleatorio_core::{
    MAX_FREQUENCY, MAXIMUM_PARTIAL_STARTING_POINT, MINIMUM_PARTIAL_DURATION, Partial, Poly,
    SIGNAL_LENGTH_MULTIPLIER, Sine, Train, Voice, Wagon,
};
use rand::Rng;

use crate::harmonics::Harmonics;

/// A strategy for attaching partials to a train.
pub trait Placement {
    /// Attach `partials` to `train`, returning how many were inserted.
    ///
    /// Trains without a fundamental are left alone.
    fn place_train<R: Rng>(&self, train: &mut Train, partials: &[Partial], rng: &mut R) -> usize;
}

fn under_ceiling(partial: &Partial, fundamental: &Wagon) -> Option<f64> {
    let frequency = partial.frequency_over(fundamental.sine.frequency);
    if frequency.is_nan() || frequency > MAX_FREQUENCY {
        None
    } else {
        Some(frequency)
    }
}

/// Place partials at random, collision-free offsets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomPlacement;

impl Placement for RandomPlacement {
    fn place_train<R: Rng>(&self, train: &mut Train, partials: &[Partial], rng: &mut R) -> usize {
        let Some(fundamental) = train.fundamental().copied() else {
            return 0;
        };
        let fundamental_samples = fundamental.sine.duration_in_samples() as i64;

        // Offsets are drawn without replacement, so the draw always ends.
        let mut free: Vec<usize> = (1..MAXIMUM_PARTIAL_STARTING_POINT)
            .filter(|k| !train.contains(*k))
            .collect();

        let mut placed = 0;
        for partial in partials {
            let Some(frequency) = under_ceiling(partial, &fundamental) else {
                continue;
            };
            if free.is_empty() {
                break;
            }

            let offset = free.swap_remove(rng.random_range(0..free.len()));

            let mut duration_ms =
                (fundamental_samples - offset as i64) / SIGNAL_LENGTH_MULTIPLIER as i64;
            if duration_ms == 0 {
                duration_ms = MINIMUM_PARTIAL_DURATION;
            }

            let sine = Sine::new(
                frequency,
                fundamental.sine.amplitude * partial.amplitude_factor,
                duration_ms,
            );
            if train.insert_partial(offset, Wagon::new(sine, fundamental.panning)) {
                placed += 1;
            }
        }
        placed
    }
}

/// Place partials where their table entry says, clipped to the fundamental.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedTablePlacement;

impl Placement for FixedTablePlacement {
    fn place_train<R: Rng>(&self, train: &mut Train, partials: &[Partial], _rng: &mut R) -> usize {
        let Some(fundamental) = train.fundamental().copied() else {
            return 0;
        };
        let fundamental_ms = fundamental.sine.duration_ms.abs();

        let mut placed = 0;
        for partial in partials {
            let Some(frequency) = under_ceiling(partial, &fundamental) else {
                continue;
            };
            if partial.start_ms > fundamental_ms {
                continue;
            }

            let duration_ms = if partial.start_ms + partial.duration_ms > fundamental_ms {
                fundamental_ms - partial.start_ms
            } else {
                partial.duration_ms
            };

            let mut key = (partial.start_ms.unsigned_abs() as usize * SIGNAL_LENGTH_MULTIPLIER).max(1);
            while train.contains(key) {
                key += 1;
            }

            let sine = Sine::new(
                frequency,
                fundamental.sine.amplitude * partial.amplitude_factor,
                duration_ms,
            );
            if train.insert_partial(key, Wagon::new(sine, fundamental.panning)) {
                placed += 1;
            }
        }
        placed
    }
}

/// Runtime choice between the two placement policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PlacementPolicy {
    /// [`RandomPlacement`]
    #[default]
    Random,
    /// [`FixedTablePlacement`]
    Fixed,
}

impl Placement for PlacementPolicy {
    fn place_train<R: Rng>(&self, train: &mut Train, partials: &[Partial], rng: &mut R) -> usize {
        match self {
            PlacementPolicy::Random => RandomPlacement.place_train(train, partials, rng),
            PlacementPolicy::Fixed => FixedTablePlacement.place_train(train, partials, rng),
        }
    }
}

impl fmt::Display for PlacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlacementPolicy::Random => "random",
            PlacementPolicy::Fixed => "fixed",
        })
    }
}

impl FromStr for PlacementPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(PlacementPolicy::Random),
            "fixed" => Ok(PlacementPolicy::Fixed),
            _ => Err(format!(
                "unknown placement '{s}' (expected 'random' or 'fixed')"
            )),
        }
    }
}

/// Attach partials to every train of a voice, in key order.
pub fn place_voice<H, P, R>(voice: &mut Voice, harmonics: &H, placement: &P, rng: &mut R) -> usize
where
    H: Harmonics + ?Sized,
    P: Placement,
    R: Rng,
{
    let partials = harmonics.partials();
    voice
        .iter_mut()
        .map(|(_, train)| placement.place_train(train, partials, rng))
        .sum()
}

/// Attach partials to every voice of a score, voice by voice.
pub fn place_poly<H, P, R>(poly: &mut Poly, harmonics: &H, placement: &P, rng: &mut R) -> usize
where
    H: Harmonics + ?Sized,
    P: Placement,
    R: Rng,
{
    let mut placed = 0;
    for voice in poly.iter_mut() {
        placed += place_voice(voice, harmonics, placement, rng);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(voices = poly.len(), placed, "partials placed");

    placed
}
