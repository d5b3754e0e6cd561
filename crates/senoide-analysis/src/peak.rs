//! Sub-bin accurate spectral peak detection.
//!
//! Local maxima of the log-magnitude spectrum are refined by fitting a
//! parabola through the three surrounding bins; the phase is taken by linear
//! interpolation between the two bins straddling the refined location. Both
//! estimators guard their denominators and fall back to the bin-center
//! estimate when the fit is degenerate.

use crate::error::AnalysisError;
use rustfft::num_complex::Complex;
use senoide_core::{Peak, amplitude_to_db, bin_to_freq, db_to_amplitude};

/// Denominator magnitude below which an interpolation is degenerate.
const DEGENERATE_EPS: f32 = 1e-7;

/// Spectral peak detector for frames of a fixed transform size.
pub struct PeakDetector {
    sample_rate: f32,
    n_fft: usize,
    max_peaks: usize,
}

impl PeakDetector {
    /// Create a detector.
    ///
    /// # Arguments
    /// * `sample_rate` - sample rate of the analyzed signal in Hz
    /// * `n_fft` - transform size the frames were computed with
    /// * `max_peaks` - keep at most this many peaks per frame (the loudest)
    pub fn new(sample_rate: f32, n_fft: usize, max_peaks: usize) -> Self {
        Self {
            sample_rate,
            n_fft,
            max_peaks,
        }
    }

    /// Extract peaks from one frame's complex bins.
    ///
    /// Returns peaks ranked by magnitude descending, truncated to the
    /// configured maximum. Frames with fewer than 3 bins or non-finite
    /// values are rejected.
    pub fn detect(&self, frame: &[Complex<f32>]) -> Result<Vec<Peak>, AnalysisError> {
        if frame.len() < 3 {
            return Err(AnalysisError::MalformedFrame { len: frame.len() });
        }
        for (bin, c) in frame.iter().enumerate() {
            if !c.re.is_finite() || !c.im.is_finite() {
                return Err(AnalysisError::NonFiniteFrame { bin });
            }
        }

        let magnitudes: Vec<f32> = frame.iter().map(|c| c.norm()).collect();
        let row = amplitude_to_db(&magnitudes);
        let phases: Vec<f32> = frame.iter().map(|c| c.arg()).collect();

        let mut peaks = Vec::new();

        // Local maxima; boundary bins have no neighbor on one side and the
        // phase estimate needs a bin below, so the scan starts at 2.
        for x in 2..row.len() - 1 {
            if row[x] <= row[x - 1] || row[x] <= row[x + 1] {
                continue;
            }

            let (xv, yv) = match parabolic_interpolate(&row, x) {
                Ok(v) => v,
                Err(err) => {
                    tracing::debug!(bin = x, %err, "falling back to bin-center magnitude");
                    (x as f32, row[x])
                }
            };
            let phase = match interpolate_phase(&phases, x, xv) {
                Ok(p) => p,
                Err(err) => {
                    tracing::debug!(bin = x, %err, "falling back to bin-center phase");
                    phases[x]
                }
            };

            peaks.push(Peak::new(
                bin_to_freq(xv, self.sample_rate, self.n_fft),
                db_to_amplitude(yv),
                phase,
            ));
        }

        peaks.sort_by(|a, b| b.magnitude.total_cmp(&a.magnitude));
        peaks.truncate(self.max_peaks);
        Ok(peaks)
    }
}

/// Fit a parabola through `row[x-1..=x+1]`.
///
/// Returns the fractional peak location and its interpolated log-magnitude.
fn parabolic_interpolate(row: &[f32], x: usize) -> Result<(f32, f32), AnalysisError> {
    let denom = row[x - 1] - 2.0 * row[x] + row[x + 1];
    if denom.abs() < DEGENERATE_EPS {
        return Err(AnalysisError::DegenerateInterpolation {
            context: "parabolic",
            denominator: denom,
        });
    }

    let xv = 0.5 * (row[x - 1] - row[x + 1]) / denom + x as f32;
    let yv = row[x] - 0.25 * (row[x - 1] - row[x + 1]) * (xv - x as f32);
    Ok((xv, yv))
}

/// Estimate the phase at fractional bin `xv` near local maximum `x`.
///
/// Two cases: a peak above the bin center interpolates between bins `x` and
/// `x+1`, one at or below it between `x-1` and `x`. The branch point sits
/// exactly at `xv == x`, and each case divides by its own offset, so both
/// denominators are guarded.
fn interpolate_phase(phases: &[f32], x: usize, xv: f32) -> Result<f32, AnalysisError> {
    let offset = xv - x as f32;
    if offset > 0.0 {
        if offset < DEGENERATE_EPS {
            return Err(AnalysisError::DegenerateInterpolation {
                context: "phase",
                denominator: offset,
            });
        }
        Ok(phases[x] + (phases[x + 1] - phases[x]) / offset)
    } else {
        let denom = offset + 1.0;
        if denom.abs() < DEGENERATE_EPS {
            return Err(AnalysisError::DegenerateInterpolation {
                context: "phase",
                denominator: denom,
            });
        }
        Ok(phases[x - 1] + (phases[x] - phases[x - 1]) / denom)
    }
}
