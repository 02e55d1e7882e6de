//! Error types for sequence generation and the song driver.

use std::path::PathBuf;

use aleatorio_synth::SynthError;
use thiserror::Error;

/// Errors that can occur while generating, persisting or rendering a
/// generation.
#[derive(Debug, Error)]
pub enum MarkovError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A model file is not valid chain JSON
    #[error("failed to parse model '{path}': {source}")]
    ParseModel {
        /// Path of the model file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// JSON (de)serialization failed
    #[error("model JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The chain tables are inconsistent
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// A state token is not a number
    #[error("unparsable token '{0}'")]
    UnparsableToken(String),

    /// The walk reached a state the chain has never seen
    #[error("unknown state '{0}'")]
    UnknownState(String),

    /// The state handed to the chain has the wrong length
    #[error("state has {found} tokens but the chain has order {expected}")]
    OrderMismatch {
        /// Order of the chain.
        expected: usize,
        /// Tokens supplied.
        found: usize,
    },

    /// The state exists but has no outgoing transitions
    #[error("state '{0}' has no transitions")]
    DeadEnd(String),

    /// The walk neither ended nor looped within the step limit
    #[error("walk from seed '{seed}' did not terminate within {steps} steps")]
    Runaway {
        /// Seed state the walk started from.
        seed: String,
        /// Step limit that was hit.
        steps: usize,
    },

    /// Mixing the score failed
    #[error("synthesis failed: {0}")]
    Synth(#[from] SynthError),

    /// The renderer rejected the output
    #[error("render failed: {0}")]
    Render(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl MarkovError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MarkovError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MarkovError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MarkovError::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Wrap a renderer failure.
    pub fn render(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        MarkovError::Render(Box::new(source))
    }
}

/// Convenience alias for results in this crate.
pub type Result<T> = std::result::Result<T, MarkovError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn mock_io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock")
    }

    #[test]
    fn read_file_display() {
        let msg = MarkovError::read_file("/m/gen0/freq.json", mock_io_err()).to_string();
        assert!(msg.contains("failed to read file"), "got: {msg}");
        assert!(msg.contains("/m/gen0/freq.json"), "got: {msg}");
    }

    #[test]
    fn create_dir_display() {
        let msg = MarkovError::create_dir("/m/gen1", mock_io_err()).to_string();
        assert!(msg.contains("failed to create directory"), "got: {msg}");
    }

    #[test]
    fn io_variants_expose_source() {
        assert!(MarkovError::read_file("/x", mock_io_err()).source().is_some());
        assert!(MarkovError::write_file("/x", mock_io_err()).source().is_some());
        assert!(MarkovError::create_dir("/x", mock_io_err()).source().is_some());
    }

    #[test]
    fn runaway_display() {
        let err = MarkovError::Runaway {
            seed: "440.000000".to_string(),
            steps: 10,
        };
        assert_eq!(
            err.to_string(),
            "walk from seed '440.000000' did not terminate within 10 steps"
        );
    }

    #[test]
    fn render_wraps_source() {
        let err = MarkovError::render(mock_io_err());
        assert!(err.to_string().starts_with("render failed"));
        assert!(err.source().is_some());
    }

    #[test]
    fn synth_error_converts() {
        let err: MarkovError = SynthError::InvalidSpeakerCount(0).into();
        assert!(matches!(err, MarkovError::Synth(_)));
    }
}
