//! Score deconstruction: the mixer that turns a [`Poly`] into speaker feeds.
//!
//! Rendering is a staged fan-out/fan-in:
//!
//! 1. every voice is rendered on its own rayon task;
//! 2. inside a voice, trains are visited in ascending key order and all
//!    wagons of a train are synthesized in parallel;
//! 3. finished voices are summed into the output one at a time.
//!
//! Trains are merged at a running counter, not at their own key; the key
//! order only decides the sequence. After each train the counter advances by
//! the train's rendered length minus the samples trimmed off its
//! fundamental, so a train whose fundamental lost its tail to zero-crossing
//! trimming lets the next train overlap by that much.

use aleatorio_core::{
    Audio, FUNDAMENTAL, MAXIMUM_PARTIAL_STARTING_POINT, MINIMUM_PARTIAL_DURATION, Poly, Train, Voice,
    pan_gain,
};
use rayon::prelude::*;

use crate::error::SynthError;
use crate::tone::synthesize_sine;

/// Extra samples every voice buffer carries beyond its nominal length.
pub const VOICE_HEADROOM: usize =
    MAXIMUM_PARTIAL_STARTING_POINT + MINIMUM_PARTIAL_DURATION as usize;

/// Grow `buffer` with zeros until it holds at least `len` samples.
#[inline]
fn ensure_len(buffer: &mut Audio, len: usize) {
    if buffer.len() < len {
        buffer.resize(len, 0.0);
    }
}

/// A train rendered into per-speaker scratch buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedTrain {
    /// One buffer per speaker, all the same length.
    pub channels: Vec<Audio>,
    /// Samples trimmed off the end of the fundamental.
    pub fundamental_tail: usize,
}

impl RenderedTrain {
    /// Length of the scratch buffers.
    pub fn len(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Returns true if nothing was rendered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Synthesize and pan every wagon of a train.
///
/// Each wagon lands at its own offset; the scratch buffers are as long as
/// the furthest trimmed wagon reaches.
pub fn render_train(train: &Train, speakers: usize) -> RenderedTrain {
    let wagons: Vec<_> = train.iter().collect();
    let tones: Vec<_> = wagons
        .par_iter()
        .map(|(offset, wagon)| (*offset, wagon.panning, synthesize_sine(&wagon.sine)))
        .collect();

    let fundamental_tail = tones
        .iter()
        .find(|(offset, _, _)| *offset == FUNDAMENTAL)
        .map_or(0, |(_, _, tone)| tone.tail());

    let len = tones
        .iter()
        .map(|(offset, _, tone)| offset + tone.len())
        .max()
        .unwrap_or(0);

    let mut channels = vec![vec![0.0; len]; speakers];
    for (offset, panning, tone) in &tones {
        for (speaker, channel) in channels.iter_mut().enumerate() {
            let gain = pan_gain(speakers, speaker, *panning);
            if gain == 0.0 {
                continue;
            }
            for (dst, &s) in channel[*offset..offset + tone.len()].iter_mut().zip(tone.samples()) {
                *dst += s * gain;
            }
        }
    }

    RenderedTrain {
        channels,
        fundamental_tail,
    }
}

/// Render one voice into `speakers` buffers.
///
/// Buffers start at the voice's nominal length plus [`VOICE_HEADROOM`] and
/// grow if the trains reach further.
pub fn render_voice(voice: &Voice, speakers: usize) -> Vec<Audio> {
    let length = voice.len_in_samples() + VOICE_HEADROOM;
    let mut buffers = vec![vec![0.0; length]; speakers];

    let mut previous_end: usize = 0;
    for (_, train) in voice.iter() {
        if train.is_empty() {
            continue;
        }

        let rendered = render_train(train, speakers);
        for (buffer, channel) in buffers.iter_mut().zip(&rendered.channels) {
            ensure_len(buffer, previous_end + channel.len());
            for (dst, &s) in buffer[previous_end..].iter_mut().zip(channel) {
                *dst += s;
            }
        }

        let advanced = previous_end as i64 + rendered.len() as i64 - rendered.fundamental_tail as i64;
        previous_end = advanced.max(0) as usize;
    }

    buffers
}

/// Render a whole score into one buffer per speaker.
///
/// Returns [`SynthError::InvalidSpeakerCount`] when `speakers` is 0. An
/// empty score renders `speakers` empty buffers.
///
/// # Example
///
/// ```rust
/// use aleatorio_core::{Poly, Sine, Train, Voice, Wagon};
/// use aleatorio_synth::deconstruct;
///
/// let mut voice = Voice::new();
/// voice.push(Train::new(Wagon::new(Sine::new(440.0, 0.5, 100), 0.5)));
///
/// let channels = deconstruct(&Poly::from(vec![voice]), 2).unwrap();
/// assert_eq!(channels.len(), 2);
/// assert_eq!(channels[0], channels[1]);
/// ```
pub fn deconstruct(poly: &Poly, speakers: usize) -> Result<Vec<Audio>, SynthError> {
    if speakers < 1 {
        return Err(SynthError::InvalidSpeakerCount(speakers));
    }

    let voices: Vec<Vec<Audio>> = poly
        .voices()
        .par_iter()
        .map(|voice| render_voice(voice, speakers))
        .collect();

    let mut output: Vec<Audio> = vec![Vec::new(); speakers];
    for voice in &voices {
        for (out, channel) in output.iter_mut().zip(voice) {
            ensure_len(out, channel.len());
            for (dst, &s) in out.iter_mut().zip(channel) {
                *dst += s;
            }
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        voices = poly.len(),
        speakers,
        samples = output.first().map_or(0, Vec::len),
        "score deconstructed"
    );

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tone::synthesize;
    use aleatorio_core::{Sine, Wagon};

    fn voice_of(tones: &[(f64, f64, i64, f64)]) -> Voice {
        let mut v = Voice::new();
        for &(f, a, ms, pan) in tones {
            v.push(Train::new(Wagon::new(Sine::new(f, a, ms), pan)));
        }
        v
    }

    #[test]
    fn zero_speakers_is_an_error() {
        assert_eq!(
            deconstruct(&Poly::new(), 0),
            Err(SynthError::InvalidSpeakerCount(0))
        );
    }

    #[test]
    fn empty_score_renders_empty_channels() {
        let out = deconstruct(&Poly::new(), 3).unwrap();
        assert_eq!(out, vec![Vec::<f64>::new(); 3]);
    }

    #[test]
    fn single_tone_matches_synthesizer() {
        let poly = Poly::from(vec![voice_of(&[(440.0, 0.5, 3, 0.5)])]);
        let mono = deconstruct(&poly, 1).unwrap();
        let tone = synthesize(440.0, 0.5, 132, 0.0);

        assert_eq!(mono[0].len(), 132 + VOICE_HEADROOM);
        assert_eq!(&mono[0][..tone.len()], tone.samples());
        assert!(mono[0][tone.len()..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn next_train_overlaps_by_the_trimmed_tail() {
        let poly = Poly::from(vec![voice_of(&[(440.0, 0.5, 3, 0.0), (440.0, 0.5, 3, 0.0)])]);
        let out = deconstruct(&poly, 1).unwrap();
        let tone = synthesize(440.0, 0.5, 132, 0.0);
        let n = tone.len();
        let start = n - tone.tail();
        assert_eq!(start, 70);

        for k in 0..start + n {
            let first = tone.samples().get(k).copied().unwrap_or(0.0);
            let second = k.checked_sub(start).map_or(0.0, |i| tone.samples()[i]);
            assert!((out[0][k] - (first + second)).abs() < 1e-12, "sample {k}");
        }
    }

    #[test]
    fn silent_train_reserves_its_duration() {
        let poly = Poly::from(vec![voice_of(&[(440.0, 0.0, 10, 0.5), (440.0, 0.5, 3, 0.5)])]);
        let out = deconstruct(&poly, 1).unwrap();
        assert!(out[0][..440].iter().all(|&s| s == 0.0));
        let tone = synthesize(440.0, 0.5, 132, 0.0);
        assert_eq!(&out[0][440..440 + tone.len()], tone.samples());
    }

    #[test]
    fn empty_train_contributes_nothing() {
        let mut v = voice_of(&[(440.0, 0.5, 3, 0.5)]);
        v.insert(50_000, Train::default());
        let with_empty = deconstruct(&Poly::from(vec![v]), 1).unwrap();

        let plain = deconstruct(&Poly::from(vec![voice_of(&[(440.0, 0.5, 3, 0.5)])]), 1).unwrap();
        assert_eq!(&with_empty[0][..plain[0].len()], plain[0].as_slice());
        assert!(with_empty[0][plain[0].len()..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn stereo_centre_sums_to_mono() {
        let poly = Poly::from(vec![voice_of(&[(330.0, 0.6, 50, 0.5), (550.0, 0.3, 20, 0.5)])]);
        let mono = deconstruct(&poly, 1).unwrap();
        let stereo = deconstruct(&poly, 2).unwrap();

        assert_eq!(stereo[0].len(), mono[0].len());
        for ((l, r), m) in stereo[0].iter().zip(&stereo[1]).zip(&mono[0]) {
            assert!((l + r - m).abs() < 1e-12);
        }
    }

    #[test]
    fn hard_pan_silences_other_side() {
        let poly = Poly::from(vec![voice_of(&[(440.0, 0.5, 20, 0.0)])]);
        let stereo = deconstruct(&poly, 2).unwrap();
        assert!(stereo[0].iter().any(|&s| s != 0.0));
        assert!(stereo[1].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn voices_are_summed() {
        let a = voice_of(&[(440.0, 0.25, 10, 0.5)]);
        let single = deconstruct(&Poly::from(vec![a.clone()]), 1).unwrap();
        let double = deconstruct(&Poly::from(vec![a.clone(), a]), 1).unwrap();
        for (s, d) in single[0].iter().zip(&double[0]) {
            assert!((2.0 * s - d).abs() < 1e-12);
        }
    }

    #[test]
    fn partials_land_at_their_offset() {
        let mut train = Train::new(Wagon::new(Sine::new(100.0, 0.0, 10), 0.5));
        train.insert_partial(100, Wagon::new(Sine::new(200.0, 0.5, 3), 0.5));
        let rendered = render_train(&train, 1);

        let partial = synthesize(200.0, 0.5, 132, 0.0);
        assert_eq!(rendered.len(), 440);
        assert!(rendered.channels[0][..100].iter().all(|&s| s == 0.0));
        assert_eq!(&rendered.channels[0][100..100 + partial.len()], partial.samples());
        assert_eq!(rendered.fundamental_tail, 0);
    }
}
