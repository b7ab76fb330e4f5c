use mp3lame_encoder::{
    Bitrate, Builder, Encoder, FlushNoGap, InterleavedPcm, MonoPcm, Quality,
    max_required_buffer_size,
};

use crate::pcm::PcmSpec;
use crate::{Error, Result};

/// An MP3 encoder that accumulates LAME output in memory.
///
/// Design:
/// - Samples are pushed as interleaved `i16` in whatever chunks the decoder produces.
/// - Output stays in an owned buffer; `finish` flushes LAME and hands back the whole file,
///   so callers only ever see complete output.
/// - Bitrate and quality are fixed; there is no knob for them.
pub struct Mp3Encoder {
    inner: Encoder,
    spec: PcmSpec,
    out: Vec<u8>,
}

impl Mp3Encoder {
    /// Configure LAME for the given PCM parameters.
    ///
    /// Fails if LAME rejects the sample rate or channel count.
    pub fn new(spec: PcmSpec) -> Result<Self> {
        let mut builder =
            Builder::new().ok_or_else(|| Error::audio_encode("failed to allocate LAME encoder"))?;

        let PcmSpec {
            sample_rate,
            channels,
        } = spec;

        builder.set_num_channels(channels).map_err(|e| {
            Error::audio_encode(format!("unsupported channel count {channels}: {e:?}"))
        })?;
        builder.set_sample_rate(sample_rate).map_err(|e| {
            Error::audio_encode(format!("unsupported sample rate {sample_rate} Hz: {e:?}"))
        })?;
        builder
            .set_brate(Bitrate::Kbps128)
            .map_err(|e| Error::audio_encode(format!("failed to set bitrate: {e:?}")))?;
        builder
            .set_quality(Quality::Good)
            .map_err(|e| Error::audio_encode(format!("failed to set quality: {e:?}")))?;

        let inner = builder
            .build()
            .map_err(|e| Error::audio_encode(format!("failed to initialize LAME encoder: {e:?}")))?;

        Ok(Self {
            inner,
            spec,
            out: Vec::new(),
        })
    }

    pub fn spec(&self) -> PcmSpec {
        self.spec
    }

    /// Encode a chunk of interleaved samples laid out according to `spec`.
    pub fn write_samples(&mut self, interleaved: &[i16]) -> Result<()> {
        if interleaved.is_empty() {
            return Ok(());
        }

        let frames = interleaved.len() / usize::from(self.spec.channels);
        self.out.reserve(max_required_buffer_size(frames));

        let encoded = match self.spec.channels {
            1 => self.inner.encode_to_vec(MonoPcm(interleaved), &mut self.out),
            _ => self
                .inner
                .encode_to_vec(InterleavedPcm(interleaved), &mut self.out),
        };

        encoded.map_err(|e| Error::audio_encode(format!("LAME encode failed: {e:?}")))?;
        Ok(())
    }

    /// Flush LAME's internal buffers and return the complete MP3 stream.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        self.out.reserve(max_required_buffer_size(0));
        self.inner
            .flush_to_vec::<FlushNoGap>(&mut self.out)
            .map_err(|e| Error::audio_encode(format!("LAME flush failed: {e:?}")))?;

        Ok(self.out)
    }
}
