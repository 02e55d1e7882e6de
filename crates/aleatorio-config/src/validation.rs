//! Song file validation.
//!
//! Checks numeric ranges and that every name (`pan`, `layout`, `table`, ...)
//! is one the rest of the workspace understands. All problems are collected
//! before reporting.
//!
//! # Example
//!
//! ```rust
//! use aleatorio_config::{SongConfig, validate_song};
//!
//! let mut config = SongConfig::default();
//! assert!(validate_song(&config).is_ok());
//!
//! config.speakers = 0;
//! assert!(validate_song(&config).is_err());
//! ```

use std::str::FromStr;

use aleatorio_io::{RenderLayout, SUPPORTED_BIT_DEPTHS};
use aleatorio_markov::{PanStrategy, VoiceLayout};
use aleatorio_synth::{PlacementPolicy, StockTable};
use thiserror::Error;

use crate::song_config::SongConfig;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A value is out of range.
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Dotted key of the value.
        field: String,
        /// Description of the problem.
        reason: String,
    },

    /// A name does not match any known choice.
    #[error("unknown name for '{field}': {reason}")]
    UnknownName {
        /// Dotted key of the value.
        field: String,
        /// Parser message listing the choices.
        reason: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Create an invalid value error.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Parse a named choice, reporting failures against `field`.
pub fn parse_name<T>(field: &str, value: &str) -> ValidationResult<T>
where
    T: FromStr<Err = String>,
{
    value.parse().map_err(|reason| ValidationError::UnknownName {
        field: field.to_string(),
        reason,
    })
}

fn check_name<T: FromStr<Err = String>>(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if let Err(e) = parse_name::<T>(field, value) {
        errors.push(e);
    }
}

/// Check every value of a song file.
///
/// Rejects no speakers, a cycle density outside `(0, 1]`, a minimum
/// history below 2, a window shorter than the minimum history, a zero step
/// limit, a non-finite default amplitude, unsupported bit depths and
/// unknown names.
pub fn validate_song(config: &SongConfig) -> ValidationResult<()> {
    let mut errors = Vec::new();

    if config.speakers < 1 {
        errors.push(ValidationError::invalid("speakers", "must be at least 1"));
    }

    let generator = &config.generator;
    if generator.max_steps == 0 {
        errors.push(ValidationError::invalid(
            "generator.max_steps",
            "must be greater than 0",
        ));
    }

    let cycle = &generator.cycle;
    if !(cycle.density > 0.0 && cycle.density <= 1.0) {
        errors.push(ValidationError::invalid(
            "generator.cycle.density",
            format!("{} is outside (0, 1]", cycle.density),
        ));
    }
    if cycle.min_history < 2 {
        errors.push(ValidationError::invalid(
            "generator.cycle.min_history",
            "must be at least 2",
        ));
    }
    if let Some(window) = cycle.window
        && window < cycle.min_history
    {
        errors.push(ValidationError::invalid(
            "generator.cycle.window",
            format!("{window} is shorter than min_history {}", cycle.min_history),
        ));
    }

    if !config.score.default_amplitude.is_finite() {
        errors.push(ValidationError::invalid(
            "score.default_amplitude",
            "must be finite",
        ));
    }
    check_name::<PanStrategy>(&mut errors, "score.pan", &config.score.pan);
    check_name::<VoiceLayout>(&mut errors, "score.layout", &config.score.layout);

    check_name::<StockTable>(&mut errors, "harmonics.table", &config.harmonics.table);
    check_name::<PlacementPolicy>(&mut errors, "harmonics.placement", &config.harmonics.placement);

    if !SUPPORTED_BIT_DEPTHS.contains(&config.render.bits_per_sample) {
        errors.push(ValidationError::invalid(
            "render.bits_per_sample",
            format!("{} is not one of 16, 24, 32", config.render.bits_per_sample),
        ));
    }
    check_name::<RenderLayout>(&mut errors, "render.layout", &config.render.layout);

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: &ValidationError) -> &str {
        match err {
            ValidationError::InvalidValue { field, .. } | ValidationError::UnknownName { field, .. } => field,
            ValidationError::Multiple(_) => "",
        }
    }

    fn rejected(edit: impl FnOnce(&mut SongConfig)) -> ValidationError {
        let mut config = SongConfig::default();
        edit(&mut config);
        validate_song(&config).unwrap_err()
    }

    #[test]
    fn default_is_valid() {
        assert_eq!(validate_song(&SongConfig::default()), Ok(()));
    }

    #[test]
    fn numeric_ranges() {
        assert_eq!(field_of(&rejected(|c| c.speakers = 0)), "speakers");
        assert_eq!(
            field_of(&rejected(|c| c.generator.max_steps = 0)),
            "generator.max_steps"
        );
        assert_eq!(
            field_of(&rejected(|c| c.generator.cycle.density = 0.0)),
            "generator.cycle.density"
        );
        assert_eq!(
            field_of(&rejected(|c| c.generator.cycle.density = 1.5)),
            "generator.cycle.density"
        );
        assert_eq!(
            field_of(&rejected(|c| c.generator.cycle.density = f64::NAN)),
            "generator.cycle.density"
        );
        assert_eq!(
            field_of(&rejected(|c| c.generator.cycle.min_history = 1)),
            "generator.cycle.min_history"
        );
        assert_eq!(
            field_of(&rejected(|c| c.generator.cycle.window = Some(4))),
            "generator.cycle.window"
        );
        assert_eq!(
            field_of(&rejected(|c| c.render.bits_per_sample = 8)),
            "render.bits_per_sample"
        );
        assert_eq!(
            field_of(&rejected(|c| c.score.default_amplitude = f64::INFINITY)),
            "score.default_amplitude"
        );
    }

    #[test]
    fn unknown_names() {
        let err = rejected(|c| c.harmonics.table = "cubes".to_string());
        assert!(matches!(err, ValidationError::UnknownName { ref field, .. } if field == "harmonics.table"));
        assert!(err.to_string().contains("weighted-primes"));

        assert_eq!(field_of(&rejected(|c| c.score.layout = "x".to_string())), "score.layout");
        assert_eq!(field_of(&rejected(|c| c.render.layout = "x".to_string())), "render.layout");
        assert_eq!(
            field_of(&rejected(|c| c.harmonics.placement = "x".to_string())),
            "harmonics.placement"
        );
    }

    #[test]
    fn collects_every_problem() {
        let err = rejected(|c| {
            c.speakers = 0;
            c.score.pan = "left".to_string();
        });
        match err {
            ValidationError::Multiple(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected Multiple, got {other:?}"),
        }
    }
}
