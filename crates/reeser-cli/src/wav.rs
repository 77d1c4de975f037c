//! WAV output via hound.

use anyhow::Context;
use clap::ValueEnum;
use hound::{SampleFormat, WavWriter};
use std::path::Path;

/// Sample encoding for written files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum BitDepth {
    /// 16-bit integer PCM.
    #[value(name = "16")]
    Int16,
    /// 24-bit integer PCM.
    #[value(name = "24")]
    Int24,
    /// 32-bit float.
    #[default]
    #[value(name = "32")]
    Float32,
}

impl BitDepth {
    /// Bits per sample.
    pub fn bits(self) -> u16 {
        match self {
            BitDepth::Int16 => 16,
            BitDepth::Int24 => 24,
            BitDepth::Float32 => 32,
        }
    }

    fn spec(self, channels: u16, sample_rate: u32) -> hound::WavSpec {
        hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: self.bits(),
            sample_format: match self {
                BitDepth::Float32 => SampleFormat::Float,
                BitDepth::Int16 | BitDepth::Int24 => SampleFormat::Int,
            },
        }
    }
}

/// Write per-channel buffers as one interleaved WAV file.
///
/// All channels must be the same length. Integer formats clamp to full scale.
pub fn write_wav(
    path: &Path,
    channels: &[Vec<f32>],
    sample_rate: u32,
    depth: BitDepth,
) -> anyhow::Result<()> {
    let frames = channels.first().map_or(0, Vec::len);
    anyhow::ensure!(
        channels.iter().all(|c| c.len() == frames),
        "channel buffers differ in length"
    );
    let channel_count = u16::try_from(channels.len()).context("too many channels")?;

    let spec = depth.spec(channel_count, sample_rate);
    let mut writer = WavWriter::create(path, spec)
        .with_context(|| format!("cannot create {}", path.display()))?;

    match depth {
        BitDepth::Float32 => {
            for i in 0..frames {
                for channel in channels {
                    writer.write_sample(channel[i])?;
                }
            }
        }
        BitDepth::Int16 | BitDepth::Int24 => {
            let max_val = (1i32 << (depth.bits() - 1)) as f32;
            for i in 0..frames {
                for channel in channels {
                    let int_sample = (channel[i] * max_val).clamp(-max_val, max_val - 1.0) as i32;
                    writer.write_sample(int_sample)?;
                }
            }
        }
    }

    writer
        .finalize()
        .with_context(|| format!("cannot finalize {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::WavReader;
    use tempfile::TempDir;

    #[test]
    fn float_round_trip_interleaves() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("f.wav");
        let left = vec![0.1, 0.2, 0.3];
        let right = vec![-0.1, -0.2, -0.3];
        write_wav(&path, &[left, right], 44100, BitDepth::Float32).unwrap();

        let reader = WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().channels, 2);
        assert_eq!(reader.spec().sample_rate, 44100);
        let samples: Vec<f32> = reader.into_samples::<f32>().map(Result::unwrap).collect();
        assert_eq!(samples, vec![0.1, -0.1, 0.2, -0.2, 0.3, -0.3]);
    }

    #[test]
    fn int16_clamps_full_scale() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("i.wav");
        write_wav(&path, &[vec![2.0, -2.0, 0.0]], 48000, BitDepth::Int16).unwrap();

        let reader = WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().bits_per_sample, 16);
        let samples: Vec<i32> = reader.into_samples::<i32>().map(Result::unwrap).collect();
        assert_eq!(samples, vec![32767, -32768, 0]);
    }

    #[test]
    fn ragged_channels_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("r.wav");
        assert!(write_wav(&path, &[vec![0.0; 4], vec![0.0; 3]], 48000, BitDepth::Int24).is_err());
    }
}
