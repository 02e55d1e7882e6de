//! Output sink abstraction.
//!
//! The mixer produces one [`Audio`] buffer per speaker and hands the whole
//! set to a [`Renderer`] together with a name (`"gen3"`, `"seed"`, ...).
//! What the renderer does with them, writing WAV files or collecting them
//! for a test, is up to the implementation.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// One mono PCM channel: `f64` samples in `[-1, 1]` at
/// [`SAMPLE_RATE`](crate::SAMPLE_RATE).
pub type Audio = Vec<f64>;

/// Receives the per-speaker channels of a finished render.
///
/// # Example
///
/// ```rust
/// use aleatorio_core::{Audio, Renderer};
///
/// #[derive(Default)]
/// struct Collect(Vec<(String, usize)>);
///
/// impl Renderer for Collect {
///     type Error = core::convert::Infallible;
///
///     fn render(&mut self, channels: &[Audio], name: &str) -> Result<(), Self::Error> {
///         self.0.push((name.to_string(), channels.len()));
///         Ok(())
///     }
/// }
///
/// let mut sink = Collect::default();
/// sink.render(&[vec![0.0; 4], vec![0.0; 4]], "gen0").unwrap();
/// assert_eq!(sink.0, vec![("gen0".to_string(), 2)]);
/// ```
pub trait Renderer {
    /// Failure type of this sink.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Consume one render: `channels[i]` is the signal of speaker `i`.
    fn render(&mut self, channels: &[Audio], name: &str) -> Result<(), Self::Error>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    type Error = R::Error;

    fn render(&mut self, channels: &[Audio], name: &str) -> Result<(), Self::Error> {
        (**self).render(channels, name)
    }
}
