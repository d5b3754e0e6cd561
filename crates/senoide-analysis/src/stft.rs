//! Centered short-time Fourier transform.
//!
//! Produces one complex spectrum per hop. Framing is centered: the signal is
//! padded by `n_fft / 2` samples on each side by reflection, so frame `t` is
//! centered on input sample `t * hop_len`. The analysis window may be shorter
//! than the transform size, in which case it is zero-padded symmetrically to
//! `n_fft`.

use crate::fft::{Fft, Window};
use rustfft::num_complex::Complex;

/// Short-time Fourier transform analyzer.
pub struct StftAnalyzer {
    n_fft: usize,
    hop_len: usize,
    fft: Fft,
    window_coeffs: Vec<f32>,
}

impl StftAnalyzer {
    /// Create an analyzer.
    ///
    /// # Arguments
    /// * `n_fft` - transform size
    /// * `window_len` - Hann window length (clamped to at most `n_fft`),
    ///   centered within the transform frame
    /// * `hop_len` - samples between successive frames
    pub fn new(n_fft: usize, window_len: usize, hop_len: usize) -> Self {
        let window_len = window_len.min(n_fft);
        let hann = Window::Hann.coefficients(window_len);

        let mut window_coeffs = vec![0.0; n_fft];
        let offset = (n_fft - window_len) / 2;
        window_coeffs[offset..offset + window_len].copy_from_slice(&hann);

        Self {
            n_fft,
            hop_len,
            fft: Fft::new(n_fft),
            window_coeffs,
        }
    }

    /// Number of bins per output frame (`n_fft / 2 + 1`).
    pub fn num_bins(&self) -> usize {
        self.n_fft / 2 + 1
    }

    /// Number of frames produced for a signal of the given length.
    pub fn num_frames(&self, signal_len: usize) -> usize {
        if signal_len == 0 {
            0
        } else {
            signal_len / self.hop_len + 1
        }
    }

    /// Compute the complex spectra of all frames, in time order.
    pub fn analyze(&self, signal: &[f32]) -> Vec<Vec<Complex<f32>>> {
        if signal.is_empty() {
            return Vec::new();
        }

        let pad = self.n_fft / 2;
        let padded = reflect_pad(signal, pad);

        let mut frames = Vec::with_capacity(self.num_frames(signal.len()));
        let mut buffer = vec![0.0f32; self.n_fft];

        for t in 0..self.num_frames(signal.len()) {
            let start = t * self.hop_len;
            buffer.copy_from_slice(&padded[start..start + self.n_fft]);
            for (sample, w) in buffer.iter_mut().zip(&self.window_coeffs) {
                *sample *= w;
            }
            frames.push(self.fft.forward(&buffer));
        }

        frames
    }
}

/// Pad a signal by `pad` samples on each side, reflecting at the edges
/// (the edge sample itself is not repeated).
fn reflect_pad(signal: &[f32], pad: usize) -> Vec<f32> {
    let n = signal.len();
    (0..n + 2 * pad)
        .map(|j| signal[reflect_index(j as isize - pad as isize, n as isize)])
        .collect()
}

fn reflect_index(i: isize, n: isize) -> usize {
    if n == 1 {
        return 0;
    }
    let period = 2 * (n - 1);
    let mut k = i.rem_euclid(period);
    if k >= n {
        k = period - k;
    }
    k as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn frame_count_matches_hop_grid() {
        let stft = StftAnalyzer::new(512, 512, 128);
        assert_eq!(stft.num_frames(1024), 9);
        assert_eq!(stft.num_frames(0), 0);

        let frames = stft.analyze(&vec![0.0; 1024]);
        assert_eq!(frames.len(), 9);
        assert_eq!(frames[0].len(), stft.num_bins());
    }

    #[test]
    fn tone_concentrates_in_expected_bin() {
        let sample_rate = 8192.0;
        let n_fft = 1024;
        // Bin 64 at this rate/size: 64 * 8192 / 1024 = 512 Hz.
        let freq = 512.0;
        let signal: Vec<f32> = (0..4096)
            .map(|i| (2.0 * PI * freq * i as f32 / sample_rate).sin())
            .collect();

        let stft = StftAnalyzer::new(n_fft, n_fft, 256);
        let frames = stft.analyze(&signal);

        // Inspect an interior frame, away from the padded edges.
        let frame = &frames[frames.len() / 2];
        let peak_bin = frame
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.norm().total_cmp(&b.norm()))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak_bin, 64);
    }

    #[test]
    fn short_window_is_centered_in_frame() {
        let stft = StftAnalyzer::new(64, 32, 16);
        assert_eq!(stft.window_coeffs.len(), 64);
        // Zero outside the centered window span.
        assert!(stft.window_coeffs[..16].iter().all(|&w| w == 0.0));
        assert!(stft.window_coeffs[48..].iter().all(|&w| w == 0.0));
        assert!(stft.window_coeffs[32] > 0.9);
    }

    #[test]
    fn reflect_pad_mirrors_without_repeating_edge() {
        let padded = reflect_pad(&[1.0, 2.0, 3.0, 4.0], 2);
        assert_eq!(padded, vec![3.0, 2.0, 1.0, 2.0, 3.0, 4.0, 3.0, 2.0]);
    }

    #[test]
    fn reflect_pad_single_sample() {
        let padded = reflect_pad(&[5.0], 3);
        assert_eq!(padded, vec![5.0; 7]);
    }
}
