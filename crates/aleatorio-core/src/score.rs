//! Symbolic score model.
//!
//! Everything here is plain data: a generation builds a [`Poly`], placement
//! mutates its [`Train`]s by adding partial [`Wagon`]s, and the mixer
//! consumes it once. All maps are ordered, so iteration always visits keys
//! in ascending sample order.

#[cfg(not(feature = "std"))]
use alloc::{collections::BTreeMap, vec::Vec};
#[cfg(feature = "std")]
use std::collections::BTreeMap;

use crate::FUNDAMENTAL;
use crate::math::duration_in_samples;

/// A sine tone: frequency in Hz, linear amplitude and a signed duration.
///
/// Only the magnitude of `duration_ms` is ever used.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sine {
    /// Frequency in Hz
    pub frequency: f64,
    /// Peak amplitude
    pub amplitude: f64,
    /// Duration in milliseconds (sign ignored)
    pub duration_ms: i64,
}

impl Sine {
    /// Create a new tone.
    pub const fn new(frequency: f64, amplitude: f64, duration_ms: i64) -> Self {
        Self {
            frequency,
            amplitude,
            duration_ms,
        }
    }

    /// Length of this tone in samples, `44 * |duration_ms|`.
    #[inline]
    pub fn duration_in_samples(&self) -> usize {
        duration_in_samples(self.duration_ms)
    }
}

/// A harmonic overtone definition relative to some fundamental.
///
/// The partial's frequency is `number * fundamental.frequency` and its
/// amplitude `amplitude_factor * fundamental.amplitude`. `start_ms` and
/// `duration_ms` are only honoured by fixed-table placement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Partial {
    /// Harmonic number (2 or more)
    pub number: u32,
    /// Amplitude relative to the fundamental
    pub amplitude_factor: f64,
    /// Start offset from the fundamental, in milliseconds
    pub start_ms: i64,
    /// Duration in milliseconds
    pub duration_ms: i64,
}

impl Partial {
    /// Create a partial with explicit timing.
    pub const fn new(number: u32, amplitude_factor: f64, start_ms: i64, duration_ms: i64) -> Self {
        Self {
            number,
            amplitude_factor,
            start_ms,
            duration_ms,
        }
    }

    /// Frequency this partial reaches over a fundamental of `fundamental_hz`.
    #[inline]
    pub fn frequency_over(&self, fundamental_hz: f64) -> f64 {
        f64::from(self.number) * fundamental_hz
    }
}

/// One synthesizable event: a tone and where it sits in the speaker field.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Wagon {
    /// The tone to synthesize
    pub sine: Sine,
    /// Pan position in `[0, 1]`
    pub panning: f64,
}

impl Wagon {
    /// Create a new wagon.
    pub const fn new(sine: Sine, panning: f64) -> Self {
        Self { sine, panning }
    }
}

/// A fundamental and its partials, keyed by sample offset.
///
/// Key [`FUNDAMENTAL`] (0) holds the fundamental; every other key is the
/// offset of a partial relative to the start of the train. A default train
/// is empty and renders nothing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Train {
    wagons: BTreeMap<usize, Wagon>,
}

impl Train {
    /// Create a train holding only `fundamental`.
    pub fn new(fundamental: Wagon) -> Self {
        let mut wagons = BTreeMap::new();
        wagons.insert(FUNDAMENTAL, fundamental);
        Self { wagons }
    }

    /// The fundamental wagon, if this train has one.
    pub fn fundamental(&self) -> Option<&Wagon> {
        self.wagons.get(&FUNDAMENTAL)
    }

    /// Attach a partial at `offset` samples.
    ///
    /// Refuses the fundamental's key and keys already in use; returns
    /// whether the wagon was inserted.
    pub fn insert_partial(&mut self, offset: usize, wagon: Wagon) -> bool {
        if offset == FUNDAMENTAL || self.wagons.contains_key(&offset) {
            return false;
        }
        self.wagons.insert(offset, wagon);
        true
    }

    /// Whether a wagon sits at `offset`.
    pub fn contains(&self, offset: usize) -> bool {
        self.wagons.contains_key(&offset)
    }

    /// Wagons in ascending offset order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Wagon)> {
        self.wagons.iter().map(|(k, w)| (*k, w))
    }

    /// Number of wagons, fundamental included.
    pub fn len(&self) -> usize {
        self.wagons.len()
    }

    /// Returns true if the train holds no wagons.
    pub fn is_empty(&self) -> bool {
        self.wagons.is_empty()
    }

    /// Number of partials attached (wagons other than the fundamental).
    pub fn partial_count(&self) -> usize {
        self.wagons.keys().filter(|k| **k != FUNDAMENTAL).count()
    }

    /// Furthest sample any wagon reaches before trimming.
    pub fn span_in_samples(&self) -> usize {
        self.wagons
            .iter()
            .map(|(offset, w)| offset.saturating_add(w.sine.duration_in_samples()))
            .max()
            .unwrap_or(0)
    }
}

/// One monophonic line: trains keyed by absolute sample index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Voice {
    trains: BTreeMap<usize, Train>,
}

impl Voice {
    /// Create an empty voice.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `train` at sample `key`, returning any train it replaced.
    pub fn insert(&mut self, key: usize, train: Train) -> Option<Train> {
        self.trains.insert(key, train)
    }

    /// Append `train` right after the last train's fundamental.
    ///
    /// A zero-length fundamental still advances the key by one sample, so
    /// pushing never replaces a train. Returns the key the train was placed
    /// at.
    pub fn push(&mut self, train: Train) -> usize {
        let key = self
            .trains
            .last_key_value()
            .map(|(k, t)| k.saturating_add(fundamental_samples(t).max(1)))
            .unwrap_or(0);
        self.trains.insert(key, train);
        key
    }

    /// Train keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = usize> + '_ {
        self.trains.keys().copied()
    }

    /// Trains in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Train)> {
        self.trains.iter().map(|(k, t)| (*k, t))
    }

    /// Mutable trains in ascending key order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut Train)> {
        self.trains.iter_mut().map(|(k, t)| (*k, t))
    }

    /// Number of trains.
    pub fn len(&self) -> usize {
        self.trains.len()
    }

    /// Returns true if the voice holds no trains.
    pub fn is_empty(&self) -> bool {
        self.trains.is_empty()
    }

    /// Nominal length: the last key plus that train's fundamental duration.
    pub fn len_in_samples(&self) -> usize {
        self.trains
            .last_key_value()
            .map(|(k, t)| k.saturating_add(fundamental_samples(t)))
            .unwrap_or(0)
    }
}

fn fundamental_samples(train: &Train) -> usize {
    train
        .fundamental()
        .map(|w| w.sine.duration_in_samples())
        .unwrap_or(0)
}

/// A polyphonic score: an ordered list of voices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Poly {
    voices: Vec<Voice>,
}

impl Poly {
    /// Create an empty score.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a voice.
    pub fn push(&mut self, voice: Voice) {
        self.voices.push(voice);
    }

    /// Voices in order.
    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// Iterate over voices.
    pub fn iter(&self) -> core::slice::Iter<'_, Voice> {
        self.voices.iter()
    }

    /// Iterate mutably over voices.
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, Voice> {
        self.voices.iter_mut()
    }

    /// Number of voices.
    pub fn len(&self) -> usize {
        self.voices.len()
    }

    /// Returns true if the score has no voices.
    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    /// Fundamentals of every train, voice by voice in key order.
    pub fn fundamentals(&self) -> impl Iterator<Item = &Wagon> {
        self.voices
            .iter()
            .flat_map(|v| v.iter().filter_map(|(_, t)| t.fundamental()))
    }
}

impl From<Vec<Voice>> for Poly {
    fn from(voices: Vec<Voice>) -> Self {
        Self { voices }
    }
}

impl FromIterator<Voice> for Poly {
    fn from_iter<I: IntoIterator<Item = Voice>>(iter: I) -> Self {
        Self {
            voices: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Poly {
    type Item = &'a Voice;
    type IntoIter = core::slice::Iter<'a, Voice>;

    fn into_iter(self) -> Self::IntoIter {
        self.voices.iter()
    }
}
