//! Senoide Analysis - spectral front end for sinusoidal modeling
//!
//! This crate turns audio into tracked sinusoidal partials:
//!
//! - [`fft`] - FFT wrapper with windowing functions
//! - [`stft`] - centered short-time Fourier transform
//! - [`peak`] - sub-bin accurate spectral peak detection
//! - [`tracker`] - birth/death partial tracking across frames
//! - [`resample`] - rational sample-rate conversion for input loading
//!
//! # Example Workflow
//!
//! ```rust,ignore
//! use senoide_analysis::{PartialTracker, PeakDetector, StftAnalyzer};
//!
//! let stft = StftAnalyzer::new(8192, 8192, 2048);
//! let detector = PeakDetector::new(44100.0, 8192, 10);
//! let mut tracker = PartialTracker::new(0.01);
//!
//! let mut frames = Vec::new();
//! for spectrum in stft.analyze(&samples) {
//!     let peaks = detector.detect(&spectrum)?;
//!     frames.push(tracker.track(peaks));
//! }
//! ```
//!
//! Peak detection is a pure function of one frame's spectrum; tracking is
//! stateful and must consume frames strictly in time order.

pub mod fft;
pub mod peak;
pub mod resample;
pub mod stft;
pub mod tracker;

mod error;

pub use error::AnalysisError;
pub use fft::{Fft, Window};
pub use peak::PeakDetector;
pub use stft::StftAnalyzer;
pub use tracker::{PartialTracker, TrackEvent, match_frames};
