//! Rational sample-rate conversion.
//!
//! Input audio is analyzed at the configured sample rate regardless of the
//! file's native rate, so loading may need a P/Q rate change (e.g. 48000 →
//! 44100 Hz via P=147, Q=160). Conceptually the signal is upsampled by P,
//! lowpass filtered at `min(1/P, 1/Q)` of the upsampled Nyquist, and
//! downsampled by Q; the filter is a Blackman-windowed sinc, and only the
//! output samples actually kept are ever computed.

use std::f32::consts::PI;

/// Compute Blackman-windowed sinc lowpass FIR coefficients.
///
/// `cutoff` is a normalized frequency in (0.0, 1.0] where 1.0 is Nyquist.
/// The result is normalized to unity DC gain.
pub fn design_lowpass(num_taps: usize, cutoff: f32) -> Vec<f32> {
    if num_taps == 0 {
        return Vec::new();
    }

    let m = num_taps - 1;
    let mut coeffs = Vec::with_capacity(num_taps);

    for n in 0..num_taps {
        let x = n as f32 - m as f32 / 2.0;

        let sinc = if x.abs() < 1e-7 {
            cutoff
        } else {
            (PI * cutoff * x).sin() / (PI * x)
        };

        let window = if m == 0 {
            1.0
        } else {
            let phase = 2.0 * PI * n as f32 / m as f32;
            0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos()
        };

        coeffs.push(sinc * window);
    }

    let sum: f32 = coeffs.iter().sum();
    if sum.abs() > 1e-10 {
        for c in coeffs.iter_mut() {
            *c /= sum;
        }
    }

    coeffs
}

/// Resample by the rational factor `p / q`.
///
/// `num_taps` sizes the anti-aliasing filter; pass 0 for a default
/// proportional to `max(p, q)`. Output length is `ceil(len * p / q)`.
pub fn resample(signal: &[f32], p: usize, q: usize, num_taps: usize) -> Vec<f32> {
    if signal.is_empty() || p == 0 || q == 0 {
        return Vec::new();
    }
    if p == q {
        return signal.to_vec();
    }

    let num_taps = if num_taps == 0 {
        // 24 taps per polyphase branch keeps stopband rejection usable
        // without making 44.1k/48k conversions (p or q in the hundreds)
        // unreasonably slow.
        24 * p.max(q) + 1
    } else {
        num_taps
    };

    let cutoff = 1.0 / p.max(q) as f32;
    let h = design_lowpass(num_taps, cutoff);
    // Upsampling inserts p-1 zeros between samples; the filter sees 1/p of
    // the energy, compensated here.
    let gain = p as f32;

    let half = (num_taps as isize - 1) / 2;
    let out_len = (signal.len() * p).div_ceil(q);
    let p = p as isize;
    let q = q as isize;

    let mut out = Vec::with_capacity(out_len);
    for n in 0..out_len as isize {
        let center = n * q;
        // Input samples whose filter tap `center - k*p + half` is in range.
        let k_lo = ((center + half - num_taps as isize + p).div_euclid(p)).max(0);
        let k_hi = ((center + half).div_euclid(p)).min(signal.len() as isize - 1);

        let mut acc = 0.0f32;
        for k in k_lo..=k_hi {
            let tap = (center - k * p + half) as usize;
            acc += signal[k as usize] * h[tap] * gain;
        }
        out.push(acc);
    }

    out
}

/// Resample from one sample rate to another, reducing the ratio by GCD.
pub fn resample_to(signal: &[f32], from_hz: u32, to_hz: u32) -> Vec<f32> {
    if from_hz == to_hz {
        return signal.to_vec();
    }
    let g = gcd(from_hz, to_hz);
    resample(signal, (to_hz / g) as usize, (from_hz / g) as usize, 0)
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
