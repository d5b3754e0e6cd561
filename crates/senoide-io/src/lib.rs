//! Audio file I/O for senoide.
//!
//! The synthesis pipeline is mono end to end, so this crate reads WAV files
//! down to a single channel of `f32` samples and writes a single channel
//! back out:
//!
//! - [`read_wav`] - decode to mono samples (multi-channel input is averaged)
//! - [`read_wav_info`] - header-only metadata
//! - [`write_wav`] - encode float samples as PCM or IEEE float
//!
//! Only the uncompressed WAV container is supported.

mod wav;

pub use wav::{WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV container read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The file decoded to zero samples.
    #[error("audio file contains no samples")]
    EmptyFile,

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
