//! WAV file reading and writing for multi-channel renders.

use crate::{Error, Result};
use aleatorio_core::{Audio, SAMPLE_RATE};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// Bit depths the writer supports.
pub const SUPPORTED_BIT_DEPTHS: [u16; 3] = [16, 24, 32];

/// WAV file specification.
///
/// 32 bits means IEEE float samples; 16 and 24 bits mean integer PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample (16, 24 or 32).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: SAMPLE_RATE,
            bits_per_sample: 32,
        }
    }
}

impl WavSpec {
    /// Check the bit depth against [`SUPPORTED_BIT_DEPTHS`].
    pub fn validate(&self) -> Result<()> {
        if SUPPORTED_BIT_DEPTHS.contains(&self.bits_per_sample) {
            Ok(())
        } else {
            Err(Error::UnsupportedBitDepth(self.bits_per_sample))
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Write `channels` as one interleaved file.
///
/// `spec.channels` is replaced by the number of channels given. Shorter
/// channels are padded with silence to the length of the longest.
pub fn write_wav_channels<P: AsRef<Path>>(path: P, channels: &[Audio], spec: WavSpec) -> Result<()> {
    spec.validate()?;
    let count = u16::try_from(channels.len())
        .ok()
        .filter(|&c| c > 0)
        .ok_or(Error::UnsupportedChannelCount(channels.len()))?;

    let spec = WavSpec {
        channels: count,
        ..spec
    };
    let frames = channels.iter().map(Vec::len).max().unwrap_or(0);
    let mut writer = WavWriter::create(path, hound::WavSpec::from(spec))?;

    if spec.bits_per_sample == 32 {
        for i in 0..frames {
            for channel in channels {
                writer.write_sample(channel.get(i).copied().unwrap_or(0.0) as f32)?;
            }
        }
    } else {
        let max_val = f64::from(1i32 << (spec.bits_per_sample - 1));
        for i in 0..frames {
            for channel in channels {
                let sample = channel.get(i).copied().unwrap_or(0.0);
                let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
                writer.write_sample(int_sample)?;
            }
        }
    }

    writer.finalize()?;
    Ok(())
}

/// Write one mono channel.
pub fn write_wav_mono<P: AsRef<Path>>(path: P, samples: &[f64], spec: WavSpec) -> Result<()> {
    write_wav_channels(path, &[samples.to_vec()], spec)
}

/// Read a WAV file back as one buffer per channel.
///
/// Integer samples are scaled into `[-1, 1)`.
///
/// # Example
/// ```ignore
/// let (channels, spec) = read_wav_channels("audio/gen0.wav")?;
/// println!("{} channels at {} Hz", channels.len(), spec.sample_rate);
/// ```
pub fn read_wav_channels<P: AsRef<Path>>(path: P) -> Result<(Vec<Audio>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let count = usize::from(spec.channels.max(1));

    let interleaved: Vec<f64> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = f64::from(1i32 << (spec.bits_per_sample - 1));
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| f64::from(v) / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let mut channels = vec![Vec::with_capacity(interleaved.len() / count); count];
    for frame in interleaved.chunks(count) {
        for (channel, &sample) in channels.iter_mut().zip(frame) {
            channel.push(sample);
        }
    }

    Ok((channels, spec))
}
