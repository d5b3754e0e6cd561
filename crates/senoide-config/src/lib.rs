//! Configuration for senoide synthesis passes.
//!
//! A [`SynthesisConfig`] holds every tuning parameter of the
//! analysis-resynthesis pipeline: transform sizes, hop lengths, how many
//! partials to keep, and the tracker's frequency tolerance. Configs load
//! from TOML files; absent keys (except `freq_tolerance`) fall back to
//! defaults derived the same way the hand-tuned defaults are.
//!
//! # TOML Format
//!
//! ```toml
//! sample_rate = 44100
//! cosine_waves = 10
//! n_fft = 8192
//! window_len = 8192
//! hop_len = 2048
//! freq_tolerance = 0.01
//! frame_len = 4096
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use senoide_config::SynthesisConfig;
//!
//! let config = SynthesisConfig::load("senoide.toml").unwrap();
//! config.validate().unwrap();
//! ```

mod error;
mod settings;

/// Platform-specific configuration paths.
pub mod paths;

pub use error::ConfigError;
pub use settings::SynthesisConfig;
