//! Error types for spectral analysis.

use thiserror::Error;

/// Errors that can occur while analyzing a spectral frame.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Frame has too few bins for three-point interpolation.
    #[error("frame has {len} bins, need at least 3 for interpolation")]
    MalformedFrame {
        /// Number of bins in the rejected frame.
        len: usize,
    },

    /// Frame contains a NaN or infinite value.
    #[error("frame contains a non-finite value at bin {bin}")]
    NonFiniteFrame {
        /// Index of the first offending bin.
        bin: usize,
    },

    /// An interpolation denominator was too close to zero to be usable.
    #[error("degenerate {context} interpolation: denominator {denominator} is near zero")]
    DegenerateInterpolation {
        /// Which estimator hit the degenerate case ("parabolic" or "phase").
        context: &'static str,
        /// The offending denominator value.
        denominator: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_frame_display_names_bin_count() {
        let msg = AnalysisError::MalformedFrame { len: 2 }.to_string();
        assert!(msg.contains("2 bins"), "got: {msg}");
    }

    #[test]
    fn degenerate_display_names_context() {
        let err = AnalysisError::DegenerateInterpolation {
            context: "phase",
            denominator: 1e-9,
        };
        assert!(err.to_string().contains("phase"), "got: {err}");
    }
}
