//! Senoide Core - shared value types for sinusoidal analysis-resynthesis
//!
//! This crate holds the data model passed between the analysis and synthesis
//! layers:
//!
//! - [`Peak`] - one sinusoidal component (frequency, amplitude, phase)
//! - [`PartialFrame`] - all tracked partials alive at one time step
//! - [`convert`] - bin/frequency and amplitude/dB conversions
//!
//! # Example
//!
//! ```rust
//! use senoide_core::{Peak, PartialFrame};
//!
//! let frame = PartialFrame::from_peaks(vec![
//!     Peak::new(880.0, 0.2, 0.0),
//!     Peak::new(440.0, 0.5, 0.0),
//! ]);
//!
//! // Frames keep their partials sorted ascending by frequency.
//! assert_eq!(frame.peaks()[0].frequency, 440.0);
//! ```

pub mod convert;
mod partial;

pub use convert::{amplitude_to_db, bin_to_freq, db_to_amplitude};
pub use partial::{Peak, PartialFrame};
