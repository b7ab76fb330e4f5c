//! Container side of the Ogg → MP3 transcoder.
//!
//! Symphonia identifies the container and exposes its tracks and packets. This module
//! reduces that to one audio track the MP3 encoder can take and a packet reader whose
//! failures are already crate errors.

use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader, Packet, Track};
use symphonia::core::io::{MediaSource, MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::{Error, Result};

/// Read-ahead for the probe. Uploads sit in memory already, so a large window costs
/// nothing and lets the Ogg reader find its header pages in one fill.
const PROBE_BUFFER_LEN: usize = 256 * 1024;

/// Identify the container in `source` and pick the audio track to transcode.
///
/// The chosen track is the first one with a known codec and sample rate; LAME has to
/// be configured with the rate before the first frame. `hint_extension` is the
/// declared source format ("ogg" for uploads) and only orders the probe, so a
/// mislabelled but recognizable file still opens.
pub fn probe_source_and_pick_default_track(
    source: Box<dyn MediaSource>,
    hint_extension: Option<&str>,
) -> Result<(Box<dyn FormatReader>, Track)> {
    let stream = MediaSourceStream::new(
        source,
        MediaSourceStreamOptions {
            buffer_len: PROBE_BUFFER_LEN,
        },
    );

    let mut hint = Hint::new();
    if let Some(ext) = hint_extension {
        hint.with_extension(ext);
    }

    let format = symphonia::default::get_probe()
        .format(
            &hint,
            stream,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| Error::audio_decode(format!("failed to probe media stream: {e}")))?
        .format;

    let track = format
        .tracks()
        .iter()
        .find(|track| is_transcodable(track))
        .cloned()
        .ok_or_else(|| Error::audio_decode("no audio track found"))?;

    Ok((format, track))
}

fn is_transcodable(track: &Track) -> bool {
    track.codec_params.codec != CODEC_TYPE_NULL && track.codec_params.sample_rate.is_some()
}

/// Next packet from the container, or `None` once the data runs out.
///
/// Symphonia signals the end of an in-memory stream with an IO error, so that is
/// folded into `None`. Anything else is a corrupt container.
pub fn next_packet(format: &mut Box<dyn FormatReader>) -> Result<Option<Packet>> {
    match format.next_packet() {
        Ok(packet) => Ok(Some(packet)),
        Err(SymphoniaError::IoError(_)) => Ok(None),
        Err(e) => Err(Error::audio_decode(format!("failed reading packet: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use symphonia::core::codecs::{CODEC_TYPE_VORBIS, CodecParameters};

    use super::*;

    #[test]
    fn probe_rejects_garbage_as_decode_failure() {
        let source = Cursor::new(b"definitely not an ogg stream".to_vec());
        let err = match probe_source_and_pick_default_track(Box::new(source), Some("ogg")) {
            Ok(_) => panic!("expected probe failure"),
            Err(err) => err,
        };
        assert!(matches!(err, Error::AudioDecode(_)));
        assert!(err.to_string().contains("failed to probe media stream"));
    }

    #[test]
    fn tracks_need_a_codec_and_a_sample_rate() {
        let mut params = CodecParameters::new();
        assert!(!is_transcodable(&Track::new(0, params.clone())));

        params.for_codec(CODEC_TYPE_VORBIS);
        assert!(!is_transcodable(&Track::new(0, params.clone())));

        params.with_sample_rate(44_100);
        assert!(is_transcodable(&Track::new(0, params)));
    }
}
