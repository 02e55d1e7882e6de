//! Loop detection for random walks.
//!
//! A walk over a chain with a fixed-seed PRNG eventually revisits a state
//! and repeats itself forever. [`CycleDetector`] decides, value by value,
//! whether that has happened: it collects every position whose value occurs
//! more than once and calls it a loop when those positions form one dense
//! run.

use std::collections::HashMap;

/// Decides whether a generated sequence has started to repeat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleDetector {
    /// Shortest sequence (history plus candidate) that can be a loop.
    pub min_history: usize,
    /// Fraction of adjacent repeated positions, in `(0, 1]`, needed to call
    /// a loop. 1.0 means every repeated position must be contiguous.
    pub density: f64,
    /// Only inspect the most recent values when set.
    pub window: Option<usize>,
}

impl Default for CycleDetector {
    fn default() -> Self {
        Self {
            min_history: 10,
            density: 1.0,
            window: None,
        }
    }
}

/// Hashable identity of a value: `-0.0` equals `0.0`, `NaN` equals nothing.
fn identity(value: f64) -> Option<u64> {
    if value.is_nan() {
        None
    } else if value == 0.0 {
        Some(0)
    } else {
        Some(value.to_bits())
    }
}

impl CycleDetector {
    /// Would appending `next` to `history` complete a loop?
    ///
    /// # Example
    ///
    /// ```rust
    /// use aleatorio_markov::CycleDetector;
    ///
    /// let detector = CycleDetector::default();
    /// let history = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
    ///
    /// assert!(detector.is_loop(&history, 9.0));
    /// assert!(!detector.is_loop(&history, 1.0));
    /// assert!(!detector.is_loop(&history, 10.0));
    /// ```
    pub fn is_loop(&self, history: &[f64], next: f64) -> bool {
        let total = history.len() + 1;
        let skip = self.window.map_or(0, |w| total.saturating_sub(w));
        let candidate: Vec<f64> = history
            .iter()
            .copied()
            .chain(std::iter::once(next))
            .skip(skip)
            .collect();

        if candidate.len() < self.min_history {
            return false;
        }

        let mut counts: HashMap<u64, usize> = HashMap::with_capacity(candidate.len());
        for id in candidate.iter().filter_map(|v| identity(*v)) {
            *counts.entry(id).or_insert(0) += 1;
        }

        let repeated: Vec<usize> = candidate
            .iter()
            .enumerate()
            .filter(|(_, v)| identity(**v).is_some_and(|id| counts[&id] > 1))
            .map(|(i, _)| i)
            .collect();

        if repeated.is_empty() {
            return false;
        }

        let adjacent = repeated.windows(2).filter(|w| w[1] - w[0] == 1).count();
        adjacent as f64 >= self.density * (repeated.len() - 1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn short_history_never_loops() {
        let d = CycleDetector::default();
        assert!(!d.is_loop(&[1.0; 8], 1.0));
    }

    #[test]
    fn constant_sequence_loops_at_min_history() {
        let d = CycleDetector::default();
        assert!(d.is_loop(&[5.0; 9], 5.0));
    }

    #[test]
    fn distinct_values_never_loop() {
        let d = CycleDetector::default();
        assert!(!d.is_loop(&ramp(50), 50.0));
    }

    #[test]
    fn trailing_period_loops() {
        // 0..6 then 7 8 7 8: repeated positions 7..=10 are contiguous.
        let d = CycleDetector::default();
        let mut h = ramp(7);
        h.extend([7.0, 8.0, 7.0]);
        assert!(d.is_loop(&h, 8.0));
    }

    #[test]
    fn scattered_repeats_are_not_a_loop() {
        let d = CycleDetector::default();
        let h = vec![1.0, 2.0, 3.0, 1.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        assert!(!d.is_loop(&h, 9.0));
    }

    #[test]
    fn lower_density_accepts_gaps() {
        let strict = CycleDetector::default();
        let loose = CycleDetector {
            density: 0.5,
            ..CycleDetector::default()
        };
        // Repeated positions 0, 3, 4, 5: two adjacent pairs out of three.
        let h = vec![1.0, 2.0, 3.0, 1.0, 4.0, 4.0, 5.0, 6.0, 7.0];
        assert!(!strict.is_loop(&h, 8.0));
        assert!(loose.is_loop(&h, 8.0));
    }

    #[test]
    fn window_forgets_old_repeats() {
        let d = CycleDetector {
            window: Some(10),
            ..CycleDetector::default()
        };
        let mut h = vec![42.0, 42.0, 0.5];
        h.extend(ramp(9));
        // Without the window the early pair plus a late pair is scattered.
        assert!(!CycleDetector::default().is_loop(&h, 8.0));
        assert!(d.is_loop(&h, 8.0));
    }

    #[test]
    fn signed_zero_and_nan() {
        let d = CycleDetector {
            min_history: 2,
            ..CycleDetector::default()
        };
        assert!(d.is_loop(&[0.0], -0.0));
        assert!(!d.is_loop(&[f64::NAN], f64::NAN));
    }
}
