use thiserror::Error;

/// The crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// The crate-wide error type.
///
/// Every conversion returns its failure as one of these values instead of
/// handing back a diagnostic string in place of the artifact. Callers branch on
/// `Ok`/`Err` before serving anything.
#[derive(Debug, Error)]
pub enum Error {
    /// The input bytes are not valid UTF-8 text.
    #[error("input is not valid UTF-8 text: {0}")]
    Decode(#[from] std::str::Utf8Error),

    /// The audio container could not be probed, or its packets could not be decoded.
    #[error("failed to decode audio: {0}")]
    AudioDecode(String),

    /// No decoder is available for the audio track's codec.
    #[error("unsupported audio codec: {0}")]
    UnsupportedCodec(String),

    /// The MP3 encoder failed or rejected the decoded stream's parameters.
    #[error("failed to encode audio: {0}")]
    AudioEncode(String),

    /// The dispatcher was handed a selector it does not know.
    #[error("unknown conversion type '{0}'")]
    UnknownConversion(String),
}

impl Error {
    pub(crate) fn audio_decode(message: impl Into<String>) -> Self {
        Self::AudioDecode(message.into())
    }

    pub(crate) fn audio_encode(message: impl Into<String>) -> Self {
        Self::AudioEncode(message.into())
    }

    /// Whether the failure was caused by the caller's input rather than by the converter.
    ///
    /// Undecodable audio is reported as a converter-side failure. A corrupt Ogg upload and
    /// a broken encoder look the same from here.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Decode(_) | Self::UnsupportedCodec(_) | Self::UnknownConversion(_)
        )
    }
}
