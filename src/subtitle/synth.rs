use crate::Result;
use crate::subtitle::TIMING_DELIMITER;
use crate::subtitle::lines::{decode_lines, render_lines};

/// Timing for cues synthesized from plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthOpts {
    /// How long each line stays on screen, in seconds.
    pub cue_duration_secs: u32,

    /// Clock value of the first cue's start, in seconds.
    pub start_secs: u32,
}

impl Default for SynthOpts {
    fn default() -> Self {
        Self {
            cue_duration_secs: 2,
            start_secs: 0,
        }
    }
}

/// Turn plain line-delimited text into an SRT track, one cue per non-blank line.
///
/// Cues are back to back: each starts where the previous one ended. Blank lines are
/// skipped and consume neither an index nor any time.
///
/// Known limitation: the clock is rendered as `00:00:SS,000` and seconds are never carried
/// into minutes, so the 31st cue at the default timing reads `00:00:60,000 --> 00:00:62,000`.
pub fn text_to_srt(input: &[u8], opts: &SynthOpts) -> Result<String> {
    let lines = decode_lines(input)?;

    let mut out = Vec::new();
    let mut index = 0usize;
    let mut cursor = u64::from(opts.start_secs);
    let duration = u64::from(opts.cue_duration_secs);

    for line in lines {
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        index += 1;
        let end = cursor + duration;

        out.push(index.to_string());
        out.push(format!(
            "{} {TIMING_DELIMITER} {}",
            format_clock(cursor),
            format_clock(end)
        ));
        out.push(text.to_owned());
        out.push(String::new());

        cursor = end;
    }

    Ok(render_lines(out))
}

/// Render whole seconds as an SRT clock value with fixed hours, minutes and milliseconds.
fn format_clock(seconds: u64) -> String {
    format!("00:00:{seconds:02},000")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_to_srt_skips_blank_lines() -> anyhow::Result<()> {
        let out = text_to_srt(b"Hello\n\nWorld", &SynthOpts::default())?;
        assert_eq!(
            out,
            "1\n00:00:00,000 --> 00:00:02,000\nHello\n\n\
             2\n00:00:02,000 --> 00:00:04,000\nWorld\n\n"
        );
        Ok(())
    }

    #[test]
    fn text_to_srt_trims_lines_and_ignores_whitespace_only() -> anyhow::Result<()> {
        let out = text_to_srt(b"  padded  \n \t \nnext\r\n", &SynthOpts::default())?;
        assert_eq!(
            out,
            "1\n00:00:00,000 --> 00:00:02,000\npadded\n\n\
             2\n00:00:02,000 --> 00:00:04,000\nnext\n\n"
        );
        Ok(())
    }

    #[test]
    fn text_to_srt_honors_custom_timing() -> anyhow::Result<()> {
        let opts = SynthOpts {
            cue_duration_secs: 5,
            start_secs: 10,
        };
        let out = text_to_srt(b"a\nb\n", &opts)?;
        assert!(out.contains("1\n00:00:10,000 --> 00:00:15,000\na\n"));
        assert!(out.contains("2\n00:00:15,000 --> 00:00:20,000\nb\n"));
        Ok(())
    }

    #[test]
    fn text_to_srt_does_not_carry_seconds_into_minutes() -> anyhow::Result<()> {
        let input = (1..=31).map(|i| format!("line {i}\n")).collect::<String>();
        let out = text_to_srt(input.as_bytes(), &SynthOpts::default())?;
        assert!(out.contains("30\n00:00:58,000 --> 00:00:60,000\nline 30\n"));
        assert!(out.contains("31\n00:00:60,000 --> 00:00:62,000\nline 31\n"));
        Ok(())
    }

    #[test]
    fn text_to_srt_empty_input_is_empty() -> anyhow::Result<()> {
        assert_eq!(text_to_srt(b"", &SynthOpts::default())?, "");
        assert_eq!(text_to_srt(b"\n\n  \n", &SynthOpts::default())?, "");
        Ok(())
    }

    #[test]
    fn format_clock_pads_to_two_digits_and_widens_past_99() {
        assert_eq!(format_clock(0), "00:00:00,000");
        assert_eq!(format_clock(7), "00:00:07,000");
        assert_eq!(format_clock(120), "00:00:120,000");
    }
}
