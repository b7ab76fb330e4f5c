//! Subtitle text conversions.
//!
//! - `srt_to_vtt` / `vtt_to_srt` rewrite timing lines between the SRT and WebVTT grammars
//! - `synth` builds an SRT track out of plain line-delimited text
//!
//! All three work line by line over decoded UTF-8 and never reorder cues.

mod lines;
pub mod srt_to_vtt;
pub mod synth;
pub mod vtt_to_srt;

pub use srt_to_vtt::srt_to_vtt;
pub use synth::{SynthOpts, text_to_srt};
pub use vtt_to_srt::vtt_to_srt;

/// The delimiter between the start and end timestamps of a cue.
pub const TIMING_DELIMITER: &str = "-->";

/// The mandatory first line of a WebVTT file.
pub const VTT_HEADER: &str = "WEBVTT";

fn is_timing_line(line: &str) -> bool {
    line.contains(TIMING_DELIMITER)
}
