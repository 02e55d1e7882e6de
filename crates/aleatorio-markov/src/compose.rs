//! Turning generated sequences into a score.
//!
//! [`zip_tones`] combines the per-seed frequency, amplitude and duration
//! sequences into tones; [`assemble`] lays those tones out as voices and
//! trains, panned by a [`PanStrategy`].

use std::fmt;
use std::str::FromStr;

use aleatorio_core::{Poly, Sine, Train, Voice, Wagon};

/// Values used when a frequency has no matching amplitude or duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneDefaults {
    /// Amplitude of a tone whose amplitude sequence ran out.
    pub amplitude: f64,
    /// Duration of a tone whose duration sequence ran out.
    pub duration_ms: i64,
}

impl Default for ToneDefaults {
    fn default() -> Self {
        Self {
            amplitude: 0.0,
            duration_ms: 10,
        }
    }
}

/// Combine the three parameter sequences position by position.
///
/// The frequency sequences drive the shape of the result: sequence `i`
/// produces one tone per frequency, taking amplitude `amplitudes[i][j]` and
/// duration `durations[i][j]` when they exist and `defaults` otherwise.
/// Durations are truncated to whole milliseconds.
///
/// # Example
///
/// ```rust
/// use aleatorio_markov::{ToneDefaults, zip_tones};
///
/// let tones = zip_tones(&[vec![440.0, 880.0]], &[vec![0.5]], &[], ToneDefaults::default());
/// assert_eq!(tones[0][0].amplitude, 0.5);
/// assert_eq!(tones[0][1].amplitude, 0.0);
/// assert_eq!(tones[0][1].duration_ms, 10);
/// ```
pub fn zip_tones(
    frequencies: &[Vec<f64>],
    amplitudes: &[Vec<f64>],
    durations: &[Vec<f64>],
    defaults: ToneDefaults,
) -> Vec<Vec<Sine>> {
    frequencies
        .iter()
        .enumerate()
        .map(|(i, sequence)| {
            sequence
                .iter()
                .enumerate()
                .map(|(j, &frequency)| {
                    let amplitude = amplitudes
                        .get(i)
                        .and_then(|s| s.get(j))
                        .copied()
                        .unwrap_or(defaults.amplitude);
                    let duration_ms = durations
                        .get(i)
                        .and_then(|s| s.get(j))
                        .map_or(defaults.duration_ms, |&d| d as i64);
                    Sine::new(frequency, amplitude, duration_ms)
                })
                .collect()
        })
        .collect()
}

/// How tones are spread across the speaker ring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PanStrategy {
    /// Everything at 0.5
    #[default]
    Center,
    /// Evenly from 0 to 1 in order
    Sweep,
    /// 0, 1, 0, 1, ...
    Alternate,
}

impl PanStrategy {
    /// Pan position of item `index` out of `count`.
    pub fn position(self, index: usize, count: usize) -> f64 {
        match self {
            PanStrategy::Center => 0.5,
            PanStrategy::Sweep if count > 1 => index as f64 / (count - 1) as f64,
            PanStrategy::Sweep => 0.5,
            PanStrategy::Alternate => (index % 2) as f64,
        }
    }
}

impl fmt::Display for PanStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PanStrategy::Center => "center",
            PanStrategy::Sweep => "sweep",
            PanStrategy::Alternate => "alternate",
        })
    }
}

impl FromStr for PanStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "center" | "centre" => Ok(PanStrategy::Center),
            "sweep" => Ok(PanStrategy::Sweep),
            "alternate" => Ok(PanStrategy::Alternate),
            _ => Err(format!(
                "unknown pan strategy '{s}' (expected one of: center, sweep, alternate)"
            )),
        }
    }
}

/// How tone sequences map onto voices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VoiceLayout {
    /// All sequences back to back in one voice; tones are panned by their
    /// position in that voice.
    #[default]
    Single,
    /// One voice per non-empty sequence, all starting together; each voice
    /// is panned as a whole by its index.
    PerSeed,
}

impl fmt::Display for VoiceLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VoiceLayout::Single => "single",
            VoiceLayout::PerSeed => "per-seed",
        })
    }
}

impl FromStr for VoiceLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "single" => Ok(VoiceLayout::Single),
            "per-seed" | "per_seed" => Ok(VoiceLayout::PerSeed),
            _ => Err(format!(
                "unknown voice layout '{s}' (expected 'single' or 'per-seed')"
            )),
        }
    }
}

/// Lay tone sequences out as a score.
///
/// Every tone becomes one train pushed right after the previous one. No
/// tones at all gives an empty score.
pub fn assemble(sequences: &[Vec<Sine>], layout: VoiceLayout, pan: PanStrategy) -> Poly {
    match layout {
        VoiceLayout::Single => {
            let count: usize = sequences.iter().map(Vec::len).sum();
            if count == 0 {
                return Poly::new();
            }
            let mut voice = Voice::new();
            for (index, sine) in sequences.iter().flatten().enumerate() {
                voice.push(Train::new(Wagon::new(*sine, pan.position(index, count))));
            }
            Poly::from(vec![voice])
        }
        VoiceLayout::PerSeed => {
            let filled: Vec<&Vec<Sine>> = sequences.iter().filter(|s| !s.is_empty()).collect();
            let count = filled.len();
            filled
                .into_iter()
                .enumerate()
                .map(|(index, sequence)| {
                    let panning = pan.position(index, count);
                    let mut voice = Voice::new();
                    for sine in sequence {
                        voice.push(Train::new(Wagon::new(*sine, panning)));
                    }
                    voice
                })
                .collect()
        }
    }
}
