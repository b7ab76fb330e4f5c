use crate::Result;

/// Decode `input` as UTF-8 and split it into lines.
///
/// A leading byte order mark is dropped, and both `\n` and `\r\n` terminate a line.
pub(crate) fn decode_lines(input: &[u8]) -> Result<Vec<&str>> {
    let text = std::str::from_utf8(input)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    Ok(text.lines().collect())
}

/// Join lines into a document where every line, including the last, ends in `\n`.
pub(crate) fn render_lines<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for line in lines {
        out.push_str(line.as_ref());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_splits_crlf_and_strips_bom() -> anyhow::Result<()> {
        let lines = decode_lines("\u{feff}1\r\nHi\r\n\r\nthere".as_bytes())?;
        assert_eq!(lines, vec!["1", "Hi", "", "there"]);
        Ok(())
    }

    #[test]
    fn decode_empty_input_has_no_lines() -> anyhow::Result<()> {
        assert!(decode_lines(b"")?.is_empty());
        Ok(())
    }

    #[test]
    fn decode_rejects_invalid_utf8() {
        assert!(decode_lines(&[0xc3, 0x28]).is_err());
    }

    #[test]
    fn render_terminates_every_line() {
        assert_eq!(render_lines(["a", "", "b"]), "a\n\nb\n");
        assert_eq!(render_lines(Vec::<String>::new()), "");
    }
}
