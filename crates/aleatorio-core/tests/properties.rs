//! Property-based tests for aleatorio-core.
//!
//! Panning gains and score bookkeeping under randomized input.

use aleatorio_core::{Sine, Train, Voice, Wagon, pan_gain, scale};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Gains are never negative and never exceed unity.
    #[test]
    fn gain_is_bounded(
        speakers in 1usize..16,
        speaker in 0usize..16,
        position in -0.5f64..1.5f64,
    ) {
        let g = pan_gain(speakers, speaker, position);
        prop_assert!((0.0..=1.0).contains(&g), "gain {} out of range", g);
    }

    /// Across all speakers the gains of one position sum to exactly one.
    #[test]
    fn gains_sum_to_unity(speakers in 1usize..16, position in 0.0f64..=1.0f64) {
        let sum: f64 = (0..speakers).map(|s| pan_gain(speakers, s, position)).sum();
        prop_assert!((sum - 1.0).abs() < 1e-9, "n={} p={} sum={}", speakers, position, sum);
    }

    /// At most two speakers are active at once.
    #[test]
    fn at_most_two_speakers_sound(speakers in 3usize..16, position in 0.0f64..=1.0f64) {
        let active = (0..speakers)
            .filter(|&s| pan_gain(speakers, s, position) > 1e-12)
            .count();
        prop_assert!((1..=2).contains(&active));
    }

    /// Remapping there and back returns the input.
    #[test]
    fn scale_inverts(value in -1000.0f64..1000.0, lo in -10.0f64..0.0, hi in 1.0f64..10.0) {
        let there = scale(value, lo, hi, -1000.0, 1000.0);
        let back = scale(there, -1000.0, 1000.0, lo, hi);
        prop_assert!((back - value).abs() < 1e-6);
    }

    /// Pushing trains lays them end to end and keeps every one of them.
    #[test]
    fn pushed_voice_length_is_sum_of_durations(
        durations in prop::collection::vec(-500i64..500, 1..20),
    ) {
        let mut voice = Voice::new();
        for &ms in &durations {
            voice.push(Train::new(Wagon::new(Sine::new(440.0, 0.5, ms), 0.5)));
        }
        let samples = |d: &i64| 44 * d.unsigned_abs() as usize;
        let (last, head) = durations.split_last().unwrap();
        let expected: usize = head.iter().map(|d| samples(d).max(1)).sum::<usize>() + samples(last);
        prop_assert_eq!(voice.len(), durations.len());
        prop_assert_eq!(voice.len_in_samples(), expected);
    }
}
