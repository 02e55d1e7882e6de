//! Phase-continuous sine synthesis with zero-crossing trimming.
//!
//! Every wagon of a score is rendered by [`synthesize`]: a plain phase
//! accumulator driving `sin(2π·phase)`. The raw signal is then cut back to
//! its last zero crossing so consecutive tones join without clicks, and any
//! sample that reached full scale is muted.

use core::f64::consts::TAU;

use aleatorio_core::{SAMPLE_RATE, Sine};
use libm::{floor, sin};

/// Wrap a phase into `[0, 1)`.
#[inline]
fn wrap_phase(phase: f64) -> f64 {
    let wrapped = phase - floor(phase);
    // `phase - floor(phase)` rounds up to 1.0 for tiny negative inputs.
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

/// A synthesized, trimmed tone.
#[derive(Debug, Clone, PartialEq)]
pub struct Tone {
    samples: Vec<f64>,
    phase: f64,
    requested: usize,
}

impl Tone {
    /// The trimmed signal.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Consume the tone, returning the trimmed signal.
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    /// Phase the oscillator reached after the full requested length.
    ///
    /// Feed it back as `start_phase` to continue the waveform seamlessly.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Length after trimming, never more than [`requested`](Self::requested).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if trimming removed everything.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of samples asked for.
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Samples cut away by trimming.
    pub fn tail(&self) -> usize {
        self.requested - self.samples.len()
    }
}

/// Synthesize `length` samples of a sine at `frequency` Hz.
///
/// The waveform is `amplitude * sin(2π·phase)` with the phase starting at
/// `start_phase` and advancing by `frequency / 44100` per sample, wrapped to
/// `[0, 1)`. The result is trimmed with [`zero_crossing_end`] and every
/// remaining sample whose magnitude is at least 1 is replaced by 0.
///
/// Non-finite frequency or amplitude yields `length` samples of silence.
///
/// # Example
///
/// ```rust
/// use aleatorio_synth::synthesize;
///
/// // 3 ms at 440 Hz: 132 samples requested, cut back to the last crossing.
/// let tone = synthesize(440.0, 1.0, 132, 0.0);
/// assert_eq!(tone.requested(), 132);
/// assert_eq!(tone.len(), 101);
/// assert_eq!(tone.samples()[0], 0.0);
/// ```
pub fn synthesize(frequency: f64, amplitude: f64, length: usize, start_phase: f64) -> Tone {
    let start_phase = if start_phase.is_finite() {
        wrap_phase(start_phase)
    } else {
        0.0
    };

    if !frequency.is_finite() || !amplitude.is_finite() {
        return Tone {
            samples: vec![0.0; length],
            phase: start_phase,
            requested: length,
        };
    }

    let increment = frequency / f64::from(SAMPLE_RATE);
    let mut phase = start_phase;
    let mut samples = Vec::with_capacity(length);
    for _ in 0..length {
        samples.push(amplitude * sin(TAU * phase));
        phase = wrap_phase(phase + increment);
    }

    let end = zero_crossing_end(&samples);
    samples.truncate(end);

    for s in &mut samples {
        if *s >= 1.0 || *s <= -1.0 {
            *s = 0.0;
        }
    }

    Tone {
        samples,
        phase,
        requested: length,
    }
}

/// Synthesize a score tone from phase 0 for its full duration.
pub fn synthesize_sine(sine: &Sine) -> Tone {
    synthesize(
        sine.frequency,
        sine.amplitude,
        sine.duration_in_samples(),
        0.0,
    )
}

/// Length to keep so a signal ends at its last zero crossing.
///
/// - Ends exactly on 0: keep everything.
/// - Ends positive: keep through the last earlier sample that is `<= 0`.
/// - Ends negative: find the last earlier sample that is `>= 0`, then keep
///   through the last sample at or before it that is `<= 0`.
///
/// Returns 0 when no crossing exists.
pub fn zero_crossing_end(samples: &[f64]) -> usize {
    let Some((&last, head)) = samples.split_last() else {
        return 0;
    };

    if last > 0.0 {
        head.iter().rposition(|&s| s <= 0.0).map_or(0, |i| i + 1)
    } else if last < 0.0 {
        head.iter()
            .rposition(|&s| s >= 0.0)
            .and_then(|j| head[..=j].iter().rposition(|&s| s <= 0.0))
            .map_or(0, |i| i + 1)
    } else {
        samples.len()
    }
}
