//! [`Renderer`] implementation writing WAV files.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use aleatorio_core::{Audio, Renderer};

use crate::wav::{WavSpec, write_wav_channels, write_wav_mono};
use crate::{Error, Result};

/// How a multi-channel render is laid out on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RenderLayout {
    /// One mono file per speaker: `<name>-<speaker>.wav`.
    #[default]
    MonoFiles,
    /// One file with a channel per speaker: `<name>.wav`.
    Interleaved,
}

impl fmt::Display for RenderLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RenderLayout::MonoFiles => "mono-files",
            RenderLayout::Interleaved => "interleaved",
        })
    }
}

impl FromStr for RenderLayout {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mono-files" | "mono" => Ok(RenderLayout::MonoFiles),
            "interleaved" => Ok(RenderLayout::Interleaved),
            _ => Err(format!(
                "unknown render layout '{s}' (expected 'mono-files' or 'interleaved')"
            )),
        }
    }
}

/// Writes every render into a directory as WAV.
///
/// # Example
///
/// ```rust,no_run
/// use aleatorio_core::Renderer;
/// use aleatorio_io::{RenderLayout, WavRenderer};
///
/// let mut wav = WavRenderer::new("audio").with_layout(RenderLayout::Interleaved);
/// wav.render(&[vec![0.0; 441], vec![0.0; 441]], "gen0")?;
/// # Ok::<(), aleatorio_io::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WavRenderer {
    dir: PathBuf,
    spec: WavSpec,
    layout: RenderLayout,
}

impl WavRenderer {
    /// Render into `dir` as 32-bit float mono files.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            spec: WavSpec::default(),
            layout: RenderLayout::default(),
        }
    }

    /// Use `bits_per_sample` (16, 24 or 32).
    pub fn with_bits_per_sample(mut self, bits_per_sample: u16) -> Result<Self> {
        let spec = WavSpec {
            bits_per_sample,
            ..self.spec
        };
        spec.validate()?;
        self.spec = spec;
        Ok(self)
    }

    /// Use `layout`.
    pub fn with_layout(mut self, layout: RenderLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Spec every file is written with; the channel count is set per file.
    pub fn spec(&self) -> WavSpec {
        self.spec
    }

    /// Output layout.
    pub fn layout(&self) -> RenderLayout {
        self.layout
    }

    /// Files a render named `name` with `channels` speakers produces.
    pub fn paths(&self, name: &str, channels: usize) -> Vec<PathBuf> {
        match self.layout {
            RenderLayout::MonoFiles => (0..channels)
                .map(|i| self.dir.join(format!("{name}-{i}.wav")))
                .collect(),
            RenderLayout::Interleaved => vec![self.dir.join(format!("{name}.wav"))],
        }
    }
}

impl Renderer for WavRenderer {
    type Error = Error;

    fn render(&mut self, channels: &[Audio], name: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| Error::create_dir(&self.dir, e))?;

        let paths = self.paths(name, channels.len());
        match self.layout {
            RenderLayout::MonoFiles => {
                for (path, channel) in paths.iter().zip(channels) {
                    write_wav_mono(path, channel, self.spec)?;
                }
            }
            RenderLayout::Interleaved => {
                write_wav_channels(&paths[0], channels, self.spec)?;
            }
        }

        tracing::info!(
            name,
            files = paths.len(),
            samples = channels.first().map_or(0, Vec::len),
            dir = %self.dir.display(),
            "render written"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_names() {
        assert_eq!("mono-files".parse::<RenderLayout>().unwrap(), RenderLayout::MonoFiles);
        assert_eq!("Interleaved".parse::<RenderLayout>().unwrap(), RenderLayout::Interleaved);
        assert!("surround".parse::<RenderLayout>().is_err());
        assert_eq!(RenderLayout::Interleaved.to_string(), "interleaved");
    }

    #[test]
    fn paths_follow_layout() {
        let mono = WavRenderer::new("out");
        assert_eq!(
            mono.paths("gen2", 2),
            vec![PathBuf::from("out/gen2-0.wav"), PathBuf::from("out/gen2-1.wav")]
        );

        let inter = WavRenderer::new("out").with_layout(RenderLayout::Interleaved);
        assert_eq!(inter.paths("gen2", 4), vec![PathBuf::from("out/gen2.wav")]);
    }

    #[test]
    fn bit_depth_is_checked() {
        assert!(WavRenderer::new("out").with_bits_per_sample(24).is_ok());
        assert!(matches!(
            WavRenderer::new("out").with_bits_per_sample(12),
            Err(Error::UnsupportedBitDepth(12))
        ));
    }
}
