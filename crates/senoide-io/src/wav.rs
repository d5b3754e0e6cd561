//! Mono WAV reading and writing.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels in the file (decoding mixes them down).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Sample frames per channel.
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Output WAV specification.
#[derive(Debug, Clone, Copy)]
pub struct WavSpec {
    /// Sample rate in Hz (e.g. 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample: 32 writes IEEE float, 16 or 24 write PCM.
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            bits_per_sample: 32,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: 1,
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

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = reader.len() as u64; // across all channels
    let num_frames = total_samples / u64::from(spec.channels);

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs: num_frames as f64 / f64::from(spec.sample_rate),
        format: match spec.sample_format {
            SampleFormat::Float => WavFormat::IeeeFloat,
            SampleFormat::Int => WavFormat::Pcm,
        },
    })
}

/// Read a WAV file as mono f32 samples plus the file's sample rate.
///
/// Integer PCM is normalized by its bit depth; multi-channel files are
/// mixed down by averaging the channels of each frame.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, u32)> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channels = spec.channels as usize;

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    if samples.is_empty() {
        return Err(Error::EmptyFile);
    }

    let mono = if channels > 1 {
        samples
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        samples
    };

    tracing::debug!(
        samples = mono.len(),
        sample_rate = spec.sample_rate,
        channels,
        "decoded WAV"
    );
    Ok((mono, spec.sample_rate))
}

/// Write mono samples to a WAV file.
///
/// 32-bit output is IEEE float; 16- and 24-bit output is integer PCM with
/// out-of-range samples clamped.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: WavSpec) -> Result<()> {
    let mut writer = WavWriter::create(path, spec.into())?;

    if spec.bits_per_sample == 32 {
        for &sample in samples {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
        for &sample in samples {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn ramp(len: usize) -> Vec<f32> {
        (0..len).map(|i| (i as f32 / len as f32) - 0.5).collect()
    }

    #[test]
    fn float_round_trip() {
        let samples = ramp(1000);
        let spec = WavSpec {
            sample_rate: 44100,
            bits_per_sample: 32,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &samples, spec).unwrap();

        let (loaded, rate) = read_wav(file.path()).unwrap();
        assert_eq!(rate, 44100);
        assert_eq!(loaded.len(), samples.len());
        for (a, b) in samples.iter().zip(loaded.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn pcm16_round_trip_within_quantization() {
        let samples = ramp(1000);
        let spec = WavSpec {
            sample_rate: 22050,
            bits_per_sample: 16,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &samples, spec).unwrap();

        let (loaded, rate) = read_wav(file.path()).unwrap();
        assert_eq!(rate, 22050);
        for (a, b) in samples.iter().zip(loaded.iter()) {
            assert!((a - b).abs() < 1e-3);
        }
    }

    #[test]
    fn stereo_input_mixes_down_to_mono() {
        // Write an interleaved stereo file directly with hound.
        let file = NamedTempFile::new().unwrap();
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(file.path(), spec).unwrap();
        for (l, r) in [(1.0f32, 0.0f32), (0.5, 0.5), (-1.0, 1.0)] {
            writer.write_sample(l).unwrap();
            writer.write_sample(r).unwrap();
        }
        writer.finalize().unwrap();

        let (mono, _) = read_wav(file.path()).unwrap();
        assert_eq!(mono, vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn info_reports_header_without_decoding() {
        let samples = ramp(44100);
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &samples, WavSpec::default()).unwrap();

        let info = read_wav_info(file.path()).unwrap();
        assert_eq!(info.channels, 1);
        assert_eq!(info.sample_rate, 44100);
        assert_eq!(info.num_frames, 44100);
        assert_eq!(info.format, WavFormat::IeeeFloat);
        assert!((info.duration_secs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_file_is_an_error() {
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &[], WavSpec::default()).unwrap();

        assert!(matches!(read_wav(file.path()), Err(Error::EmptyFile)));
    }

    #[test]
    fn out_of_range_pcm_samples_are_clamped() {
        let spec = WavSpec {
            sample_rate: 8000,
            bits_per_sample: 16,
        };
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &[2.0, -2.0], spec).unwrap();

        let (loaded, _) = read_wav(file.path()).unwrap();
        assert!((loaded[0] - 1.0).abs() < 1e-3);
        assert!((loaded[1] + 1.0).abs() < 1e-3);
    }
}
