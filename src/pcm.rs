//! PCM normalization between the decoder and the MP3 encoder.
//!
//! Responsibilities:
//! - Convert Symphonia-decoded buffers into interleaved `i16`
//! - Keep mono and stereo as-is; downmix anything wider to mono (LAME takes at most two channels)
//! - Pin the stream parameters on the first buffer and reject changes mid-stream
//!
//! There is no resampling here. LAME accepts the common rates directly, and rates it
//! rejects surface as encode failures.

use symphonia::core::audio::{AudioBufferRef, SampleBuffer};

use crate::{Error, Result};

/// Parameters of the PCM handed to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmSpec {
    pub sample_rate: u32,

    /// Output channel count: 1 or 2.
    pub channels: u8,
}

/// Converts decoded buffers into encoder-ready interleaved `i16` samples.
#[derive(Default)]
pub struct PcmPipeline {
    // Scratch buffer used to copy decoded PCM into interleaved `i16`.
    sample_buf: Option<SampleBuffer<i16>>,

    // Frame capacity of `sample_buf`; a larger decoded buffer forces a reallocation.
    sample_buf_frames: u64,

    // Source parameters seen on the first buffer.
    source: Option<(u32, usize)>,
}

impl PcmPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert one decoded buffer, returning the output spec and interleaved samples.
    pub fn push_decoded(&mut self, decoded: &AudioBufferRef<'_>) -> Result<(PcmSpec, Vec<i16>)> {
        let spec = *decoded.spec();
        let src_rate = spec.rate;
        let channels = spec.channels.count();
        if channels == 0 {
            return Err(Error::audio_decode("decoded audio had zero channels"));
        }

        match self.source {
            None => self.source = Some((src_rate, channels)),
            Some(pinned) if pinned != (src_rate, channels) => {
                let (pinned_rate, pinned_channels) = pinned;
                return Err(Error::audio_decode(format!(
                    "audio parameters changed mid-stream: \
                     {pinned_rate} Hz/{pinned_channels} ch → {src_rate} Hz/{channels} ch"
                )));
            }
            Some(_) => {}
        }

        let needed_frames = decoded.capacity() as u64;
        if self.sample_buf.is_none() || self.sample_buf_frames < needed_frames {
            self.sample_buf = Some(SampleBuffer::<i16>::new(needed_frames, spec));
            self.sample_buf_frames = needed_frames;
        }

        let buf = self
            .sample_buf
            .as_mut()
            .ok_or_else(|| Error::audio_decode("sample buffer not initialized"))?;

        // Copy decoded PCM into our interleaved scratch buffer.
        buf.copy_interleaved_ref(decoded.clone());
        let interleaved = buf.samples();

        let out = match channels {
            1 | 2 => PcmSpec {
                sample_rate: src_rate,
                channels: channels as u8,
            },
            _ => PcmSpec {
                sample_rate: src_rate,
                channels: 1,
            },
        };

        let samples = if channels > 2 {
            downmix_to_mono(interleaved, channels)
        } else {
            interleaved.to_vec()
        };

        Ok((out, samples))
    }
}

/// Downmix interleaved samples into mono by averaging channels.
///
/// Policy: equal-weight average across channels (simple, predictable).
fn downmix_to_mono(interleaved: &[i16], channels: usize) -> Vec<i16> {
    if channels == 1 {
        return interleaved.to_vec();
    }

    interleaved
        .chunks_exact(channels)
        .map(|frame| {
            let sum: i32 = frame.iter().map(|&s| i32::from(s)).sum();
            (sum / channels as i32) as i16
        })
        .collect()
}
