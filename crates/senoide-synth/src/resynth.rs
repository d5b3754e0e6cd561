//! Windowed overlap-add resynthesis.
//!
//! Each [`PartialFrame`] is rendered as a sum of cosines over `frame_len`
//! samples, faded, and merged into the running output: the first
//! `frame_len - hop_len` samples of a new frame add into the tail of the
//! accumulated buffer, the remaining `hop_len` samples are appended.

use crate::fader::Fader;
use senoide_core::PartialFrame;
use std::f32::consts::PI;
use thiserror::Error;

/// Numerator of the default transform-domain to time-domain normalization.
///
/// The effective per-peak scale is `MAGNITUDE_SCALE / n_fft`, tunable per
/// instance via [`Resynthesizer::with_scale`].
pub const MAGNITUDE_SCALE: f32 = 16.0;

/// Errors that can occur when setting up resynthesis.
#[derive(Debug, Error)]
pub enum SynthError {
    /// Overlap-add requires each frame to extend past the hop.
    #[error("frame_len ({frame_len}) must exceed hop_len ({hop_len}) for overlap-add")]
    IncompatibleFrameLengths {
        /// Configured synthesis frame length.
        frame_len: usize,
        /// Configured hop length.
        hop_len: usize,
    },
}

/// Overlap-add synthesizer for sequences of partial frames.
#[derive(Debug)]
pub struct Resynthesizer {
    sample_rate: f32,
    hop_len: usize,
    frame_len: usize,
    scale: f32,
    fader_coeffs: Vec<f32>,
}

impl Resynthesizer {
    /// Create a resynthesizer.
    ///
    /// # Arguments
    /// * `sample_rate` - output sample rate in Hz
    /// * `hop_len` - samples advanced per frame
    /// * `frame_len` - samples synthesized per frame (usually `2 * hop_len`);
    ///   must exceed `hop_len`
    /// * `n_fft` - transform size the magnitudes came from, setting the
    ///   default normalization
    pub fn new(
        sample_rate: f32,
        hop_len: usize,
        frame_len: usize,
        n_fft: usize,
    ) -> Result<Self, SynthError> {
        if frame_len <= hop_len {
            return Err(SynthError::IncompatibleFrameLengths { frame_len, hop_len });
        }

        Ok(Self {
            sample_rate,
            hop_len,
            frame_len,
            scale: MAGNITUDE_SCALE / n_fft as f32,
            fader_coeffs: Fader::default().coefficients(frame_len),
        })
    }

    /// Override the magnitude normalization factor.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Use a different fade window.
    pub fn with_fader(mut self, fader: Fader) -> Self {
        self.fader_coeffs = fader.coefficients(self.frame_len);
        self
    }

    /// Output length for a given number of frames:
    /// `(num_frames - 1) * hop_len + frame_len` (the leading
    /// `frame_len - hop_len` zeros are part of the first frame's span).
    pub fn output_len(&self, num_frames: usize) -> usize {
        self.frame_len - self.hop_len + num_frames * self.hop_len
    }

    /// Render one frame: a faded sum of one cosine per audible partial.
    ///
    /// Pure function of the frame; silent partials contribute nothing.
    pub fn synthesize_frame(&self, frame: &PartialFrame) -> Vec<f32> {
        let mut samples = vec![0.0f32; self.frame_len];

        for peak in frame {
            if peak.is_silent() {
                continue;
            }
            let amp = peak.magnitude * self.scale;
            let step = 2.0 * PI * peak.frequency / self.sample_rate;
            for (t, sample) in samples.iter_mut().enumerate() {
                *sample += amp * (step * t as f32 + peak.phase).cos();
            }
        }

        for (sample, w) in samples.iter_mut().zip(&self.fader_coeffs) {
            *sample *= w;
        }

        samples
    }

    /// Render a whole pass by overlap-adding every frame in order.
    pub fn synthesize(&self, frames: &[PartialFrame]) -> Vec<f32> {
        let overlap = self.frame_len - self.hop_len;
        let mut audio = vec![0.0f32; overlap];
        audio.reserve(frames.len() * self.hop_len);

        for frame in frames {
            let samples = self.synthesize_frame(frame);

            let tail = audio.len() - overlap;
            for (i, &s) in samples[..overlap].iter().enumerate() {
                audio[tail + i] += s;
            }
            audio.extend_from_slice(&samples[overlap..]);
        }

        tracing::debug!(
            frames = frames.len(),
            samples = audio.len(),
            "resynthesized pass"
        );
        audio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use senoide_core::Peak;

    fn tone_frame(frequency: f32, magnitude: f32) -> PartialFrame {
        PartialFrame::from_peaks(vec![Peak::new(frequency, magnitude, 0.0)])
    }

    #[test]
    fn rejects_frame_len_not_exceeding_hop() {
        let err = Resynthesizer::new(44100.0, 2048, 2048, 8192).unwrap_err();
        assert!(matches!(
            err,
            SynthError::IncompatibleFrameLengths {
                frame_len: 2048,
                hop_len: 2048,
            }
        ));

        assert!(Resynthesizer::new(44100.0, 2048, 1024, 8192).is_err());
        assert!(Resynthesizer::new(44100.0, 2048, 4096, 8192).is_ok());
    }

    #[test]
    fn silence_in_silence_out() {
        let synth = Resynthesizer::new(44100.0, 256, 512, 1024).unwrap();

        let frames: Vec<PartialFrame> = (0..5)
            .map(|_| PartialFrame::from_peaks(vec![Peak::silent(440.0, 0.0)]))
            .collect();

        let audio = synth.synthesize(&frames);
        assert_eq!(audio.len(), 4 * 256 + 512);
        assert!(audio.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn output_length_covers_all_hops_plus_one_frame() {
        let synth = Resynthesizer::new(44100.0, 100, 250, 1024).unwrap();
        assert_eq!(synth.output_len(1), 250);
        assert_eq!(synth.output_len(4), 3 * 100 + 250);

        let frames = vec![tone_frame(440.0, 1.0); 4];
        assert_eq!(synth.synthesize(&frames).len(), synth.output_len(4));
    }

    #[test]
    fn frame_synthesis_is_a_faded_cosine() {
        let sample_rate = 8000.0;
        let n_fft = 1024;
        let synth = Resynthesizer::new(sample_rate, 128, 256, n_fft).unwrap();

        let frame = tone_frame(500.0, 2.0);
        let samples = synth.synthesize_frame(&frame);
        let fader = Fader::Cosine.coefficients(256);

        let scale = MAGNITUDE_SCALE / n_fft as f32;
        for (t, &s) in samples.iter().enumerate() {
            let expected =
                2.0 * scale * (2.0 * PI * 500.0 * t as f32 / sample_rate).cos() * fader[t];
            assert!((s - expected).abs() < 1e-5, "sample {t}: {s} vs {expected}");
        }
    }

    #[test]
    fn doubling_magnitudes_doubles_the_peak_amplitude() {
        let synth = Resynthesizer::new(44100.0, 512, 1024, 8192).unwrap();

        let quiet: Vec<PartialFrame> = (0..8).map(|_| tone_frame(440.0, 1.0)).collect();
        let loud: Vec<PartialFrame> = (0..8).map(|_| tone_frame(440.0, 2.0)).collect();

        let peak_of = |samples: &[f32]| {
            samples
                .iter()
                .fold(0.0f32, |acc, &s| acc.max(s.abs()))
        };

        let quiet_peak = peak_of(&synth.synthesize(&quiet));
        let loud_peak = peak_of(&synth.synthesize(&loud));

        assert!(quiet_peak > 0.0);
        assert!((loud_peak / quiet_peak - 2.0).abs() < 1e-3);
    }

    #[test]
    fn overlap_region_sums_tail_and_head() {
        let synth = Resynthesizer::new(44100.0, 64, 128, 1024)
            .unwrap()
            .with_fader(Fader::Rectangular);

        let frame = tone_frame(440.0, 1.0);
        let single = synth.synthesize_frame(&frame);
        let audio = synth.synthesize(&[frame.clone(), frame]);

        // Second frame starts one hop in; its head overlaps the first
        // frame's tail.
        for i in 0..64 {
            let expected = single[64 + i] + single[i];
            assert!((audio[64 + i] - expected).abs() < 1e-5);
        }
        // The first hop of output is the first frame alone (after the
        // leading overlap region, which only the initial zeros precede).
        for i in 0..64 {
            assert!((audio[i] - single[i]).abs() < 1e-6);
        }
    }

    #[test]
    fn custom_scale_overrides_default() {
        let synth = Resynthesizer::new(44100.0, 64, 128, 1024)
            .unwrap()
            .with_scale(1.0)
            .with_fader(Fader::Rectangular);

        let samples = synth.synthesize_frame(&tone_frame(0.0, 1.0));
        // Zero-frequency cosine with unit scale renders as all ones.
        assert!(samples.iter().all(|&s| (s - 1.0).abs() < 1e-6));
    }
}
