use crate::Result;
use crate::subtitle::lines::{decode_lines, render_lines};
use crate::subtitle::{VTT_HEADER, is_timing_line};

/// Rewrite an SRT document as WebVTT.
///
/// Design:
/// - We write the `WEBVTT` header followed by a blank line, then every input line in order.
/// - Timing lines get their fractional separator swapped (`,` → `.`); everything else,
///   including the SRT indices and blank separators, passes through verbatim.
///   WebVTT accepts numeric cue identifiers, so there is nothing to drop.
/// - Empty input still yields the header, since a WebVTT file without one is invalid.
pub fn srt_to_vtt(input: &[u8]) -> Result<String> {
    let lines = decode_lines(input)?;

    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(VTT_HEADER.to_owned());
    out.push(String::new());

    for line in lines {
        if is_timing_line(line) {
            // WebVTT timestamps use `HH:MM:SS.mmm`.
            out.push(line.replace(',', "."));
        } else {
            out.push(line.to_owned());
        }
    }

    Ok(render_lines(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines_of(s: &str) -> Vec<&str> {
        s.split_terminator('\n').collect()
    }

    #[test]
    fn srt_to_vtt_adds_header_and_swaps_separators() -> anyhow::Result<()> {
        let input = "1\n00:00:01,000 --> 00:00:02,000\nHi\n\n";
        let out = srt_to_vtt(input.as_bytes())?;

        assert_eq!(
            lines_of(&out),
            vec![
                "WEBVTT",
                "",
                "1",
                "00:00:01.000 --> 00:00:02.000",
                "Hi",
                ""
            ]
        );
        Ok(())
    }

    #[test]
    fn srt_to_vtt_adds_exactly_two_lines() -> anyhow::Result<()> {
        let input = "1\n00:00:01,000 --> 00:00:02,500\nHello, world\n\n\
                     2\n00:00:03,000 --> 00:00:04,000\nBye\n";
        let out = srt_to_vtt(input.as_bytes())?;
        assert_eq!(lines_of(&out).len(), input.lines().count() + 2);
        Ok(())
    }

    #[test]
    fn srt_to_vtt_leaves_commas_in_cue_text() -> anyhow::Result<()> {
        let out = srt_to_vtt(b"1\n00:00:01,000 --> 00:00:02,000\nWell, well, well\n")?;
        assert!(out.contains("\nWell, well, well\n"));
        Ok(())
    }

    #[test]
    fn srt_to_vtt_empty_input_is_header_only() -> anyhow::Result<()> {
        assert_eq!(srt_to_vtt(b"")?, "WEBVTT\n\n");
        Ok(())
    }

    #[test]
    fn srt_to_vtt_passes_malformed_lines_through() -> anyhow::Result<()> {
        let out = srt_to_vtt(b"not a cue\n00:00:01,000 -->\n")?;
        assert_eq!(out, "WEBVTT\n\nnot a cue\n00:00:01.000 -->\n");
        Ok(())
    }

    #[test]
    fn srt_to_vtt_rejects_invalid_utf8() {
        let err = srt_to_vtt(&[b'1', b'\n', 0xff]).unwrap_err();
        assert!(matches!(err, crate::Error::Decode(_)));
    }
}
