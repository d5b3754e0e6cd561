//! Frequency and level conversions.
//!
//! The analysis layer interpolates peak positions on a logarithmic magnitude
//! scale and converts the result back to linear amplitude. Both directions
//! live here so the scaling stays consistent between detection and
//! resynthesis.

/// Amplitude floor applied before taking logs (avoids `log10(0)`).
pub const DB_AMPLITUDE_FLOOR: f32 = 1e-5;

/// Dynamic range floor in dB below the frame maximum.
///
/// Bins more than this far below the loudest bin are clamped to the floor,
/// which flattens the noise floor and keeps spurious micro-maxima out of the
/// peak scan.
pub const DB_RANGE: f32 = 80.0;

/// Convert a (possibly fractional) bin index to a frequency in Hz.
pub fn bin_to_freq(bin: f32, sample_rate: f32, n_fft: usize) -> f32 {
    bin * sample_rate / n_fft as f32
}

/// Convert linear magnitudes to dB with floor clamping.
///
/// Each magnitude maps to `20 * log10(max(m, DB_AMPLITUDE_FLOOR))`, then the
/// whole frame is clamped to at most [`DB_RANGE`] dB below its maximum.
pub fn amplitude_to_db(magnitudes: &[f32]) -> Vec<f32> {
    let mut db: Vec<f32> = magnitudes
        .iter()
        .map(|&m| 20.0 * m.max(DB_AMPLITUDE_FLOOR).log10())
        .collect();

    if let Some(max) = db.iter().copied().reduce(f32::max) {
        let floor = max - DB_RANGE;
        for v in &mut db {
            *v = v.max(floor);
        }
    }

    db
}

/// Convert a dB value back to linear amplitude.
pub fn db_to_amplitude(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}
