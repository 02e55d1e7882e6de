//! Numeric helpers shared by the score model and the synthesis engine.
//!
//! - [`duration_in_samples`] - Symbolic milliseconds to a sample count
//! - [`scale`] - Linear remapping between two ranges

use crate::{MAX_DURATION_MS, SIGNAL_LENGTH_MULTIPLIER};

/// Convert a signed duration in milliseconds to a sample count.
///
/// The sign is ignored: generated material routinely carries negative
/// durations and only their magnitude matters. Magnitudes above
/// [`MAX_DURATION_MS`] are clamped.
///
/// # Example
/// ```rust
/// use aleatorio_core::duration_in_samples;
///
/// assert_eq!(duration_in_samples(1000), 44000);
/// assert_eq!(duration_in_samples(-10), 440);
/// ```
#[inline]
pub fn duration_in_samples(duration_ms: i64) -> usize {
    let ms = duration_ms.unsigned_abs().min(MAX_DURATION_MS) as usize;
    SIGNAL_LENGTH_MULTIPLIER * ms
}

/// Linearly remap `value` from `[old_min, old_max]` to `[new_min, new_max]`.
///
/// Returns `new_min` when the source range is empty, so degenerate input
/// never divides by zero.
///
/// # Arguments
/// * `value` - Value expressed in the old range
/// * `new_min` / `new_max` - Target range
/// * `old_min` / `old_max` - Source range
///
/// # Example
/// ```rust
/// use aleatorio_core::scale;
///
/// assert_eq!(scale(10.0, 0.0, 1.0, 0.0, 100.0), 0.1);
/// assert_eq!(scale(0.5, 0.0, 100.0, 0.0, 1.0), 50.0);
/// ```
#[inline]
pub fn scale(value: f64, new_min: f64, new_max: f64, old_min: f64, old_max: f64) -> f64 {
    let span = old_max - old_min;
    if span == 0.0 {
        return new_min;
    }
    (value - old_min) / span * (new_max - new_min) + new_min
}
