//! Senoide Synth - additive resynthesis from tracked partials
//!
//! Rebuilds audio from a sequence of [`PartialFrame`]s by summing one cosine
//! per partial, windowing each frame with a [`Fader`], and stitching frames
//! together by overlap-add:
//!
//! ```rust
//! use senoide_core::{PartialFrame, Peak};
//! use senoide_synth::Resynthesizer;
//!
//! let synth = Resynthesizer::new(44100.0, 2048, 4096, 8192).unwrap();
//! let frames = vec![PartialFrame::from_peaks(vec![Peak::new(440.0, 1.0, 0.0)])];
//! let samples = synth.synthesize(&frames);
//! assert_eq!(samples.len(), 4096);
//! ```
//!
//! [`PartialFrame`]: senoide_core::PartialFrame

mod fader;
mod resynth;

pub use fader::Fader;
pub use resynth::{MAGNITUDE_SCALE, Resynthesizer, SynthError};
