//! Panning law for an arbitrary number of speakers.
//!
//! A pan position is a value in `[0, 1]`. How it maps to speaker gains
//! depends on the speaker count:
//!
//! - **Mono**: the single speaker always plays at unity gain.
//! - **Stereo**: linear crossfade, speaker 0 gets `1 - position`, speaker 1
//!   gets `position`.
//! - **Ring (3+ speakers)**: speakers sit on a closed ring. Speaker `k` owns
//!   a slice of width `1/n` centred on `(k + 0.5) / n`. Its gain is 1 at its
//!   own centre and falls linearly to 0 at the centres of its two
//!   neighbours, so any position is shared by at most the two nearest
//!   speakers and their gains sum to 1. Positions near 0 and near 1 are
//!   adjacent on the ring: the first and last speakers crossfade across the
//!   edge. At the edge of its own slice a speaker therefore plays at 0.5,
//!   not 0; its gain only reaches 0 at a neighbour's centre.
//!
//! ```text
//!  gain   spk0    spk1    spk2    spk3    spk0
//!   1 |    /\      /\      /\      /\      /
//!     |   /  \    /  \    /  \    /  \    /
//!   0 |__/____\__/____\__/____\__/____\__/__
//!      0     .25     .5      .75     1
//! ```
//!
//! # Example
//!
//! ```rust
//! use aleatorio_core::pan_gain;
//!
//! assert_eq!(pan_gain(1, 0, 0.3), 1.0);
//! assert_eq!(pan_gain(2, 0, 0.25), 0.75);
//!
//! // Four speakers, position 0 sits between the last and the first.
//! assert!((pan_gain(4, 0, 0.0) - 0.5).abs() < 1e-12);
//! assert!((pan_gain(4, 3, 0.0) - 0.5).abs() < 1e-12);
//! ```

use libm::fabs;

/// Speaker count of a mono render.
pub const MONO: usize = 1;

/// Speaker count of a stereo render.
pub const STEREO: usize = 2;

/// Gain of speaker `speaker` (0-based) for a wagon panned at `position`.
///
/// `position` is clamped to `[0, 1]`. A speaker index outside
/// `0..speakers`, or a speaker count of zero, yields 0.
#[inline]
pub fn pan_gain(speakers: usize, speaker: usize, position: f64) -> f64 {
    if speaker >= speakers {
        return 0.0;
    }

    let position = position.clamp(0.0, 1.0);

    match speakers {
        MONO => 1.0,
        STEREO => {
            if speaker == 0 {
                1.0 - position
            } else {
                position
            }
        }
        _ => ring_gain(speakers, speaker, position),
    }
}

fn ring_gain(speakers: usize, speaker: usize, position: f64) -> f64 {
    let width = 1.0 / speakers as f64;
    let mid = width * speaker as f64 + width / 2.0;

    // Shortest way around the ring.
    let mut distance = fabs(position - mid);
    if distance > 0.5 {
        distance = 1.0 - distance;
    }

    (1.0 - distance / width).max(0.0)
}
