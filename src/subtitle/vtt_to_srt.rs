use crate::Result;
use crate::subtitle::lines::{decode_lines, render_lines};
use crate::subtitle::{TIMING_DELIMITER, VTT_HEADER, is_timing_line};

/// Rewrite a WebVTT document as SRT.
///
/// Rules, applied to each whitespace-trimmed line:
/// - the header block (`WEBVTT` line plus any metadata up to the first blank line) is dropped
/// - blank lines are dropped
/// - a cue identifier (first line of a block, followed directly by a timing line) is dropped
/// - every timing line is preceded by a fresh index, counting from 1 in encounter order
/// - timing lines get `.` → `,` on each timestamp; cue text passes through unchanged
///
/// Source numbering is never trusted, so indices come out contiguous whatever the input had.
pub fn vtt_to_srt(input: &[u8]) -> Result<String> {
    let lines: Vec<&str> = decode_lines(input)?.into_iter().map(str::trim).collect();

    let mut out = Vec::new();
    let mut index = 0usize;

    let mut seen_first_line = false;
    let mut in_header_block = false;
    let mut at_block_start = true;

    for (i, &line) in lines.iter().enumerate() {
        if line.is_empty() {
            in_header_block = false;
            at_block_start = true;
            continue;
        }

        let block_start = std::mem::replace(&mut at_block_start, false);

        if !std::mem::replace(&mut seen_first_line, true) && is_header(line) {
            in_header_block = true;
            continue;
        }

        if is_timing_line(line) {
            in_header_block = false;
            index += 1;
            out.push(index.to_string());
            out.push(to_srt_timing(line));
            continue;
        }

        if in_header_block {
            continue;
        }

        let next_is_timing = lines.get(i + 1).is_some_and(|next| is_timing_line(next));
        if block_start && next_is_timing {
            continue;
        }

        out.push(line.to_owned());
    }

    Ok(render_lines(out))
}

fn is_header(line: &str) -> bool {
    line.strip_prefix(VTT_HEADER)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', '\t']))
}

/// Rewrite the fractional separator of both timestamps on a timing line.
///
/// Cue settings after the end timestamp (`align:start`, `position:50.5%`) are kept as-is.
fn to_srt_timing(line: &str) -> String {
    let Some((start, end)) = line.split_once(TIMING_DELIMITER) else {
        return line.to_owned();
    };

    format!(
        "{}{TIMING_DELIMITER}{}",
        comma_in_leading_timestamp(start),
        comma_in_leading_timestamp(end)
    )
}

/// Replace the first `.` of the first whitespace-delimited token with `,`.
fn comma_in_leading_timestamp(side: &str) -> String {
    let lead = side.len() - side.trim_start().len();
    let token_end = side[lead..]
        .find(char::is_whitespace)
        .map_or(side.len(), |offset| lead + offset);

    let (timestamp, rest) = side.split_at(token_end);
    format!("{}{rest}", timestamp.replacen('.', ",", 1))
}
