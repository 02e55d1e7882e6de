//! WAV output for aleatorio.
//!
//! This crate provides:
//!
//! - **Rendering**: [`WavRenderer`], a [`Renderer`](aleatorio_core::Renderer)
//!   that writes each render as mono files or one interleaved file
//! - **WAV file I/O**: [`write_wav_channels`] and [`read_wav_channels`] for
//!   multi-channel `f64` buffers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use aleatorio_core::Renderer;
//! use aleatorio_io::{RenderLayout, WavRenderer, read_wav_channels};
//!
//! let mut wav = WavRenderer::new("audio")
//!     .with_bits_per_sample(24)?
//!     .with_layout(RenderLayout::Interleaved);
//! wav.render(&channels, "gen0")?;
//!
//! let (back, spec) = read_wav_channels("audio/gen0.wav")?;
//! ```

mod renderer;
mod wav;

use std::path::PathBuf;

pub use renderer::{RenderLayout, WavRenderer};
pub use wav::{
    SUPPORTED_BIT_DEPTHS, WavSpec, read_wav_channels, write_wav_channels, write_wav_mono,
};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The requested bit depth cannot be written.
    #[error("Unsupported bit depth: {0} (expected 16, 24 or 32)")]
    UnsupportedBitDepth(u16),

    /// A WAV file cannot hold this many channels.
    #[error("Unsupported channel count: {0}")]
    UnsupportedChannelCount(usize),

    /// The output directory could not be created.
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::CreateDir {
            path: path.into(),
            source,
        }
    }
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
