use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The supported conversions, one per wire selector.
///
/// Why this exists:
/// - We want a single, strongly-typed representation of the selector
///   across the CLI, the HTTP server and library code.
/// - Each variant knows the media type and file extension of what it produces,
///   so response tagging can't drift from the conversion that ran.
///
/// Integration notes:
/// - With the `cli` feature, `ValueEnum` allows this enum to be used directly as a
///   CLI flag with `clap`, using the same identifiers as the HTTP form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Conversion {
    /// SRT → WebVTT.
    #[cfg_attr(feature = "cli", value(name = "srt_to_vtt"))]
    SrtToVtt,

    /// WebVTT → SRT.
    #[cfg_attr(feature = "cli", value(name = "vtt_to_srt"))]
    VttToSrt,

    /// Ogg audio → MP3.
    #[cfg_attr(feature = "cli", value(name = "ogg_to_mp3"))]
    OggToMp3,

    /// Plain line-delimited text → SRT.
    #[cfg_attr(feature = "cli", value(name = "text_to_srt"))]
    TextToSrt,
}

impl Conversion {
    pub const ALL: [Conversion; 4] = [
        Conversion::SrtToVtt,
        Conversion::VttToSrt,
        Conversion::OggToMp3,
        Conversion::TextToSrt,
    ];

    /// The wire identifier accepted by `FromStr`.
    pub fn as_str(self) -> &'static str {
        match self {
            Conversion::SrtToVtt => "srt_to_vtt",
            Conversion::VttToSrt => "vtt_to_srt",
            Conversion::OggToMp3 => "ogg_to_mp3",
            Conversion::TextToSrt => "text_to_srt",
        }
    }

    /// The media type of the produced artifact.
    pub fn media_type(self) -> &'static str {
        match self {
            Conversion::SrtToVtt => "text/vtt",
            Conversion::VttToSrt | Conversion::TextToSrt => "text/plain",
            Conversion::OggToMp3 => "audio/mpeg",
        }
    }

    /// The file extension of the produced artifact (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            Conversion::SrtToVtt => "vtt",
            Conversion::VttToSrt | Conversion::TextToSrt => "srt",
            Conversion::OggToMp3 => "mp3",
        }
    }

    /// Container hint for the audio source, `None` for text conversions.
    pub(crate) fn source_hint(self) -> Option<&'static str> {
        match self {
            Conversion::OggToMp3 => Some("ogg"),
            _ => None,
        }
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Conversion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Conversion::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::UnknownConversion(s.to_owned()))
    }
}
