//! Property-based tests for aleatorio-markov.
//!
//! Loop detection on arbitrary sequences, and termination of walks over
//! self-looping chains.

use aleatorio_markov::{Chain, CycleDetector, GeneratorConfig, generate, value_token};
use proptest::prelude::*;

fn detector(min_history: usize, density: f64) -> CycleDetector {
    CycleDetector {
        min_history,
        density,
        window: None,
    }
}

/// A chain whose single state only ever leads back to itself.
fn self_loop(value: f64) -> Chain {
    let json = format!(
        r#"{{"int":1,"spool_map":{{"^":0,"{}":1}},"freq_mat":{{"0":{{"1":1}},"1":{{"1":1}}}}}}"#,
        value_token(value)
    );
    Chain::from_json(&json).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A constant run as long as the minimum history is always a loop.
    #[test]
    fn constant_runs_loop(
        value in -1.0e6f64..1.0e6,
        min_history in 2usize..32,
        extra in 0usize..32,
        density in 0.01f64..=1.0,
    ) {
        let history = vec![value; min_history - 1 + extra];
        prop_assert!(detector(min_history, density).is_loop(&history, value));
    }

    /// Nothing shorter than the minimum history is a loop.
    #[test]
    fn short_runs_never_loop(
        value in -1.0e6f64..1.0e6,
        min_history in 2usize..32,
        density in 0.01f64..=1.0,
    ) {
        let history = vec![value; min_history - 2];
        prop_assert!(!detector(min_history, density).is_loop(&history, value));
    }

    /// Distinct values never repeat, so they never loop.
    #[test]
    fn distinct_values_never_loop(
        start in -1.0e6f64..1.0e6,
        len in 0usize..64,
        min_history in 2usize..32,
    ) {
        let history: Vec<f64> = (0..len).map(|i| start + i as f64).collect();
        let next = start + len as f64;
        prop_assert!(!detector(min_history, 1.0).is_loop(&history, next));
    }

    /// A walk over a self-loop stops one value short of the minimum history.
    #[test]
    fn self_loop_walks_terminate(value in -1.0e6f64..1.0e6, min_history in 2usize..64) {
        let config = GeneratorConfig {
            cycle: detector(min_history, 1.0),
            ..GeneratorConfig::default()
        };
        let out = generate(&self_loop(value), &config).unwrap();
        prop_assert_eq!(out.len(), 1);
        prop_assert_eq!(out[0].len(), min_history - 1);
    }
}
