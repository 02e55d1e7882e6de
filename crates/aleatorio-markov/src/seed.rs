//! Built-in compositions.
//!
//! [`seed_segments`] is the material generation 0 is trained on.
//! [`melody_poly`] and [`sweep_poly`] are small hand-written scores for
//! demos and listening tests.

use aleatorio_core::{Poly, Sine, Train, Voice, Wagon};

use crate::models::Models;

fn segment<I, F>(range: I, tones: F) -> Vec<Sine>
where
    I: IntoIterator<Item = i64>,
    F: Fn(i64) -> Vec<Sine>,
{
    range.into_iter().flat_map(tones).collect()
}

fn each(range: std::ops::Range<i64>, tone: impl Fn(f64) -> Sine) -> Vec<Sine> {
    range.map(|i| tone(i as f64)).collect()
}

/// The seed composition, one segment per phrase.
///
/// Some phrases divide by their loop index and start on an infinite
/// frequency; those tones render silent and never become walk seeds.
pub fn seed_segments() -> Vec<Vec<Sine>> {
    vec![
        each(0..50, |i| Sine::new((440.0 + 2.0 * i) / i, 0.07, 100 + i as i64)),
        segment(0..69, |i| {
            let f = i as f64;
            vec![
                Sine::new(440.0 / f, 0.003 * f, 205 - i),
                Sine::new(440.0, 0.0, 5 + i),
            ]
        }),
        each(0..69, |i| Sine::new((440.0 + 2.0 * i) / i, 0.01 * i, 100)),
        segment(0..20, |i| {
            let f = i as f64;
            [100.0, 200.0, 300.0, 400.0]
                .iter()
                .map(|m| Sine::new(m * f, 0.2, 10))
                .collect()
        }),
        each(0..10, |i| Sine::new(400.0 * i, 0.1, 100)),
        each(0..10, |i| Sine::new(750.0 * i, 0.1, 100)),
        each(0..15, |i| Sine::new(250.0 * i, 0.1, 100)),
        each(0..10, |i| Sine::new(350.0 * i, 0.1, 70)),
        each(0..5, |i| Sine::new(350.0 * i, 0.0, 70)),
        each(0..10, |i| Sine::new(400.0 * i, 0.1, 90)),
        each(0..10, |i| Sine::new(750.0 * i, 0.1, 110)),
        segment(0..10, |i| {
            let f = i as f64;
            [250.0, 200.0, 150.0, 100.0, 50.0, 0.0, 1.0]
                .iter()
                .map(|m| Sine::new(m * f, 0.1, 120))
                .collect()
        }),
        each(0..10, |i| Sine::new(i, 0.0, 120)),
        segment(1..5, |i| vec![Sine::new(i as f64, 0.1, 5000 * i)]),
        each(0..10, |i| Sine::new(i, 0.0, 120)),
        segment(0..10, |i| {
            let f = i as f64;
            vec![Sine::new(f, 0.1, 108), Sine::new(250.0 * f, 0.1, 12)]
        }),
        segment(0..10, |i| {
            let f = i as f64;
            vec![Sine::new(f, 0.1, 100), Sine::new(50.0 * f, 0.1, 50)]
        }),
    ]
}

/// Generation-0 models: every seed segment added as its own sequence.
pub fn seed_models() -> Models {
    let mut models = Models::new();
    for segment in seed_segments() {
        models.add(&segment);
    }
    models
}

/// The whole seed composition as one centred voice.
pub fn seed_voice() -> Voice {
    let mut voice = Voice::new();
    for sine in seed_segments().into_iter().flatten() {
        voice.push(Train::new(Wagon::new(sine, 0.5)));
    }
    voice
}

/// [`seed_voice`] as a score.
pub fn seed_poly() -> Poly {
    Poly::from(vec![seed_voice()])
}

/// Two voices, two notes each, spread across the field.
pub fn melody_poly() -> Poly {
    let mut upper = Voice::new();
    upper.push(Train::new(Wagon::new(Sine::new(555.0, 0.49, 400), 0.0)));
    upper.push(Train::new(Wagon::new(Sine::new(350.0, 0.4, 400), 0.25)));

    let mut lower = Voice::new();
    lower.push(Train::new(Wagon::new(Sine::new(1000.0, 0.29, 180), 0.5)));
    lower.push(Train::new(Wagon::new(Sine::new(750.0, 0.2, 250), 0.75)));

    Poly::from(vec![upper, lower])
}

/// A 440 Hz tone swelling in amplitude while panning across and back.
pub fn sweep_poly() -> Poly {
    let steps = (0..100).chain((1..=100).rev());
    let mut voice = Voice::new();
    for step in steps {
        let position = f64::from(step) / 100.0;
        voice.push(Train::new(Wagon::new(
            Sine::new(440.0, position / 4.0, 30),
            position,
        )));
    }
    Poly::from(vec![voice])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_shapes() {
        let segments = seed_segments();
        let lengths: Vec<usize> = segments.iter().map(Vec::len).collect();
        assert_eq!(
            lengths,
            vec![50, 138, 69, 80, 10, 10, 15, 10, 5, 10, 10, 70, 10, 4, 10, 20, 20]
        );
    }

    #[test]
    fn first_phrase_values() {
        let first = &seed_segments()[0];
        assert!(first[0].frequency.is_infinite());
        assert_eq!(first[1], Sine::new(442.0, 0.07, 101));
        assert_eq!(first[49].duration_ms, 149);
    }

    #[test]
    fn long_notes() {
        let long = &seed_segments()[13];
        let durations: Vec<i64> = long.iter().map(|s| s.duration_ms).collect();
        assert_eq!(durations, vec![5000, 10000, 15000, 20000]);
    }

    #[test]
    fn seed_models_skip_infinite_seeds() {
        let models = seed_models();
        let seeds = models.frequency.seeds().unwrap();
        assert!(!seeds.is_empty());
        assert!(seeds.iter().all(|s| s.value.is_finite()));
        assert_eq!(seeds[0].value, 0.0);
    }

    #[test]
    fn seed_voice_holds_every_tone() {
        let total: usize = seed_segments().iter().map(Vec::len).sum();
        assert_eq!(seed_voice().len(), total);
    }

    #[test]
    fn melody_layout() {
        let poly = melody_poly();
        assert_eq!(poly.len(), 2);
        assert_eq!(poly.voices()[0].keys().collect::<Vec<_>>(), vec![0, 17_600]);
        assert_eq!(poly.voices()[1].keys().collect::<Vec<_>>(), vec![0, 7920]);
        let pans: Vec<f64> = poly.fundamentals().map(|w| w.panning).collect();
        assert_eq!(pans, vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn sweep_goes_there_and_back() {
        let poly = sweep_poly();
        let pans: Vec<f64> = poly.fundamentals().map(|w| w.panning).collect();
        assert_eq!(pans.len(), 200);
        assert_eq!(pans[0], 0.0);
        assert_eq!(pans[100], 1.0);
        assert_eq!(pans[199], 0.01);
        assert_eq!(poly.voices()[0].len_in_samples(), 200 * 1320);
    }
}
