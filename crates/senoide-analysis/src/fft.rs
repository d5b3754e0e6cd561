//! FFT wrapper with windowing functions.

use rustfft::{FftPlanner, num_complex::Complex};
use std::f32::consts::PI;
use std::sync::Arc;

/// Analysis window functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Rectangular (no windowing).
    Rectangular,
    /// Hann window (raised cosine), the default analysis window.
    Hann,
}

impl Window {
    /// Apply the window to a buffer in place.
    pub fn apply(&self, buffer: &mut [f32]) {
        let n = buffer.len();
        match self {
            Window::Rectangular => {}
            Window::Hann => {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    let w = 0.5 * (1.0 - (2.0 * PI * i as f32 / n as f32).cos());
                    *sample *= w;
                }
            }
        }
    }

    /// Get window coefficients of the given length.
    pub fn coefficients(&self, size: usize) -> Vec<f32> {
        let mut coeffs = vec![1.0; size];
        self.apply(&mut coeffs);
        coeffs
    }
}

/// Forward FFT processor with a cached plan.
pub struct Fft {
    fft: Arc<dyn rustfft::Fft<f32>>,
    size: usize,
}

impl Fft {
    /// Create a new FFT processor for the given transform size.
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        Self { fft, size }
    }

    /// Get the transform size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Perform a forward FFT on real input.
    ///
    /// Input shorter than the transform size is zero-padded. Returns only the
    /// positive frequencies: `size / 2 + 1` bins, DC through Nyquist.
    pub fn forward(&self, input: &[f32]) -> Vec<Complex<f32>> {
        let mut buffer: Vec<Complex<f32>> =
            input.iter().map(|&x| Complex::new(x, 0.0)).collect();
        buffer.resize(self.size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);

        buffer.truncate(self.size / 2 + 1);
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_lands_in_expected_bin() {
        let size = 1024;
        let fft = Fft::new(size);

        // 16 cycles over the transform length puts the peak in bin 16.
        let input: Vec<f32> = (0..size)
            .map(|i| (2.0 * PI * 16.0 * i as f32 / size as f32).sin())
            .collect();

        let spectrum = fft.forward(&input);
        assert_eq!(spectrum.len(), size / 2 + 1);

        let peak_bin = spectrum
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.norm().total_cmp(&b.norm()))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak_bin, 16);
    }

    #[test]
    fn hann_window_tapers_edges() {
        let mut buffer = vec![1.0; 100];
        Window::Hann.apply(&mut buffer);

        assert!(buffer[0] < 0.01);
        assert!((buffer[50] - 1.0).abs() < 0.01);
    }

    #[test]
    fn rectangular_window_is_identity() {
        let coeffs = Window::Rectangular.coefficients(16);
        assert!(coeffs.iter().all(|&c| c == 1.0));
    }

    #[test]
    fn short_input_is_zero_padded() {
        let fft = Fft::new(256);
        let spectrum = fft.forward(&[1.0; 10]);
        assert_eq!(spectrum.len(), 129);
        assert!(spectrum.iter().all(|c| c.re.is_finite() && c.im.is_finite()));
    }
}
