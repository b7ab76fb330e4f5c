//! The dispatcher: one entry point that runs a conversion by selector.
//!
//! Each conversion is independent and stateless, so this module only routes the input to
//! the right component and labels the result. Frontends (the CLI and the HTTP server)
//! call `convert` and branch on the `Result` before serving anything.

use tracing::{debug, warn};

use crate::Result;
use crate::artifact::Artifact;
use crate::conversion::Conversion;
use crate::opts::Opts;
use crate::subtitle::{srt_to_vtt, text_to_srt, vtt_to_srt};
use crate::transcode::{TranscodeOpts, transcode_to_mp3};

/// Run `conversion` over `input` with default options.
pub fn convert(conversion: Conversion, input: &[u8]) -> Result<Artifact> {
    convert_with(conversion, input, &Opts::default())
}

/// Run `conversion` over `input`.
pub fn convert_with(conversion: Conversion, input: &[u8], opts: &Opts) -> Result<Artifact> {
    debug!(%conversion, input_bytes = input.len(), "starting conversion");

    let res = match conversion {
        Conversion::SrtToVtt => srt_to_vtt(input).map(String::into_bytes),
        Conversion::VttToSrt => vtt_to_srt(input).map(String::into_bytes),
        Conversion::TextToSrt => text_to_srt(input, &opts.synth).map(String::into_bytes),
        Conversion::OggToMp3 => {
            let transcode_opts = TranscodeOpts {
                hint_extension: conversion.source_hint().map(str::to_owned),
            };
            transcode_to_mp3(input, &transcode_opts)
        }
    };

    match res {
        Ok(bytes) => {
            debug!(%conversion, output_bytes = bytes.len(), "conversion finished");
            Ok(Artifact::new(conversion, bytes))
        }
        Err(err) => {
            warn!(%conversion, error = %err, "conversion failed");
            Err(err)
        }
    }
}
