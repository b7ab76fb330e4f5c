//! `mediaconv`: small converters for subtitle text and audio files.
//!
//! This crate provides:
//! - SRT ⇄ WebVTT timing-grammar transcoding
//! - Plain text → SRT cue synthesis
//! - Ogg (or any Symphonia-decodable container) → MP3 transcoding
//! - A dispatcher that runs one of the above by selector and labels the result
//!
//! Every conversion is a pure function over an in-memory buffer that returns either a
//! complete `Artifact` or a typed `Error`, never a diagnostic string in place of output.

// High-level API (most consumers should start here).
pub mod artifact;
pub mod conversion;
pub mod converter;
pub mod opts;

// Subtitle text conversions.
pub mod subtitle;

// Audio decoding and MP3 encoding.
pub mod decode;
pub mod demux;
pub mod mp3_encoder;
pub mod pcm;
pub mod transcode;

pub mod error;

// Logging configuration for the binaries.
#[cfg(feature = "logging")]
pub mod logging;

pub use artifact::Artifact;
pub use conversion::Conversion;
pub use converter::{convert, convert_with};
pub use error::{Error, Result};
pub use opts::Opts;
pub use subtitle::SynthOpts;
pub use transcode::TranscodeOpts;

#[cfg(feature = "logging")]
pub use logging::init as init_logging;
