//! Synthesis parameter set, file loading, and validation.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Tuning parameters for one analysis-resynthesis pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesisConfig {
    /// Sample rate the input is analyzed (and the output written) at, Hz.
    pub sample_rate: u32,
    /// How many of the loudest peaks to keep per analysis frame.
    pub cosine_waves: usize,
    /// Transform size of the analysis STFT.
    pub n_fft: usize,
    /// Analysis window length (at most `n_fft`).
    pub window_len: usize,
    /// Samples between successive analysis frames.
    pub hop_len: usize,
    /// Relative frequency tolerance of the partial tracker's match window.
    pub freq_tolerance: f32,
    /// Resynthesis frame length (must exceed `hop_len`; usually twice it).
    pub frame_len: usize,
}

/// File representation: every key optional, resolved against the derived
/// defaults except `freq_tolerance`, which has none.
#[derive(Debug, Deserialize)]
struct RawConfig {
    sample_rate: Option<u32>,
    cosine_waves: Option<usize>,
    n_fft: Option<usize>,
    window_len: Option<usize>,
    hop_len: Option<usize>,
    freq_tolerance: Option<f32>,
    frame_len: Option<usize>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        let n_fft = 8192;
        let window_len = n_fft;
        let hop_len = window_len / 4;
        Self {
            sample_rate: 44100,
            cosine_waves: 10,
            n_fft,
            window_len,
            hop_len,
            freq_tolerance: 0.01,
            frame_len: 2 * hop_len,
        }
    }
}

impl SynthesisConfig {
    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a configuration from a TOML string.
    ///
    /// Missing keys fall back to defaults derived as the hand-tuned defaults
    /// are (`window_len` from `n_fft`, `hop_len` as a quarter window,
    /// `frame_len` as two hops). `freq_tolerance` is the one key with no
    /// default and must be present.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(toml_str)?;

        let freq_tolerance = raw
            .freq_tolerance
            .ok_or(ConfigError::MissingParameter("freq_tolerance"))?;

        let n_fft = raw.n_fft.unwrap_or(8192);
        let window_len = raw.window_len.unwrap_or(n_fft);
        let hop_len = raw.hop_len.unwrap_or(window_len / 4);

        Ok(Self {
            sample_rate: raw.sample_rate.unwrap_or(44100),
            cosine_waves: raw.cosine_waves.unwrap_or(10),
            n_fft,
            window_len,
            hop_len,
            freq_tolerance,
            frame_len: raw.frame_len.unwrap_or(2 * hop_len),
        })
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save to a TOML file, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::write_file(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))
    }

    /// Check every parameter before processing begins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 {
            return Err(ConfigError::invalid("sample_rate", "must be nonzero"));
        }
        if self.cosine_waves == 0 {
            return Err(ConfigError::invalid(
                "cosine_waves",
                "must keep at least one peak per frame",
            ));
        }
        if self.n_fft < 8 {
            return Err(ConfigError::invalid(
                "n_fft",
                format!("{} is too small for sub-bin interpolation", self.n_fft),
            ));
        }
        if self.window_len == 0 || self.window_len > self.n_fft {
            return Err(ConfigError::invalid(
                "window_len",
                format!("must be in 1..={} (n_fft), got {}", self.n_fft, self.window_len),
            ));
        }
        if self.hop_len == 0 {
            return Err(ConfigError::invalid("hop_len", "must be nonzero"));
        }
        if !self.freq_tolerance.is_finite() || self.freq_tolerance <= 0.0 {
            return Err(ConfigError::invalid(
                "freq_tolerance",
                format!("must be a positive finite fraction, got {}", self.freq_tolerance),
            ));
        }
        if self.frame_len <= self.hop_len {
            return Err(ConfigError::invalid(
                "frame_len",
                format!(
                    "must exceed hop_len ({}) for overlap-add, got {}",
                    self.hop_len, self.frame_len
                ),
            ));
        }
        Ok(())
    }
}
