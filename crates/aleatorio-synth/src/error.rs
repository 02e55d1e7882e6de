//! Error types for synthesis and mixing.

use thiserror::Error;

/// Errors raised while turning a score into audio.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SynthError {
    /// The mixer needs at least one speaker.
    #[error("invalid speaker count {0}: at least one speaker is required")]
    InvalidSpeakerCount(usize),
}
