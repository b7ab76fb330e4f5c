// src/transcode.rs

//! Transcode an in-memory audio file (Ogg Vorbis, WAV, FLAC, … anything Symphonia decodes)
//! into MP3.
//!
//! This module is intentionally small and orchestration-focused:
//! - `demux` handles probing + packet iteration
//! - `decode` handles codec decoding
//! - `pcm` handles sample conversion + channel policy
//! - `mp3_encoder` wraps LAME
//!
//! The whole input is already in memory, so we read it through a seekable `Cursor`.

use std::io::Cursor;

use tracing::debug;

use crate::decode::{decode_packet_and_then, make_decoder_for_track};
use crate::demux::{next_packet, probe_source_and_pick_default_track};
use crate::mp3_encoder::Mp3Encoder;
use crate::pcm::PcmPipeline;
use crate::{Error, Result};

/// Transcode configuration.
#[derive(Debug, Clone, Default)]
pub struct TranscodeOpts {
    /// Container hint for the source (e.g. "ogg", "wav", "flac").
    pub hint_extension: Option<String>,
}

impl TranscodeOpts {
    pub fn with_hint(hint_extension: impl Into<String>) -> Self {
        Self {
            hint_extension: Some(hint_extension.into()),
        }
    }
}

/// Decode `input` and re-encode it as MP3.
///
/// Either the complete MP3 comes back, or an error does:
/// - `Error::AudioDecode` for unrecognized containers, missing audio tracks,
///   fatal decode errors or streams with no decodable frames
/// - `Error::UnsupportedCodec` when the track's codec has no decoder
/// - `Error::AudioEncode` when LAME rejects the stream
pub fn transcode_to_mp3(input: &[u8], opts: &TranscodeOpts) -> Result<Vec<u8>> {
    if input.is_empty() {
        return Err(Error::audio_decode("input audio buffer was empty"));
    }

    let source = Cursor::new(input.to_vec());
    let (mut format, track) =
        probe_source_and_pick_default_track(Box::new(source), opts.hint_extension.as_deref())?;

    debug!(
        track_id = track.id,
        codec = ?track.codec_params.codec,
        sample_rate = ?track.codec_params.sample_rate,
        "selected audio track"
    );

    let mut decoder = make_decoder_for_track(&track)?;
    let mut pipeline = PcmPipeline::new();

    // Created on the first decoded buffer, once the real PCM parameters are known.
    let mut encoder: Option<Mp3Encoder> = None;
    let mut skipped_packets = 0usize;

    while let Some(packet) = next_packet(&mut format)? {
        // Ignore packets from other tracks.
        if packet.track_id() != track.id {
            continue;
        }

        let decoded = decode_packet_and_then(&mut decoder, &packet, |decoded| {
            let (spec, samples) = pipeline.push_decoded(&decoded)?;
            if encoder.is_none() {
                encoder = Some(Mp3Encoder::new(spec)?);
            }
            if let Some(enc) = encoder.as_mut() {
                enc.write_samples(&samples)?;
            }
            Ok(())
        })?;

        if !decoded {
            skipped_packets += 1;
        }
    }

    let Some(encoder) = encoder else {
        return Err(Error::audio_decode("no decodable audio frames in input"));
    };

    let spec = encoder.spec();
    let mp3 = encoder.finish()?;

    debug!(
        sample_rate = spec.sample_rate,
        channels = spec.channels,
        skipped_packets,
        output_bytes = mp3.len(),
        "transcoded audio to mp3"
    );

    Ok(mp3)
}
