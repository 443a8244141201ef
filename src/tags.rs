//! IRCv3 message-tag control-char codec.
//!
//! Tag values are encoded with a small backslash-escape set so that the
//! structural characters `;` and space (and the escape character itself)
//! can appear inside a value. See spec §4.2 / §6.

use std::fmt::{self, Write as _};

/// Escape a raw tag value for inclusion in the wire-format `@key=value`
/// section. Mirrors [`unescape_tag_value`] exactly in reverse.
pub fn escape_tag_value(f: &mut dyn Write, value: &str) -> fmt::Result {
    for c in value.chars() {
        match c {
            ';' => f.write_str("\\:")?,
            ' ' => f.write_str("\\s")?,
            '\\' => f.write_str("\\\\")?,
            '\r' => f.write_str("\\r")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\0' => f.write_str("\\0")?,
            other => f.write_char(other)?,
        }
    }
    Ok(())
}

/// Decode a tag value by reading a single-pass escape automaton:
/// `\\ -> \`, `\: -> ;`, `\s -> SPACE`, `\n -> LF`, `\r -> CR`, `\t -> TAB`,
/// `\0 -> NUL`. Any other escaped character passes through literally. A
/// trailing lone backslash is dropped (produces no output character). The
/// decoder is idempotent on already-clean input.
pub fn unescape_tag_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(':') => out.push(';'),
            Some('s') => out.push(' '),
            Some('\\') => out.push('\\'),
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => break,
        }
    }
    out
}

/// Parse a single `@...` tags section (without the leading `@`) into decoded
/// `(key, value)` pairs. A tag without `=` has an empty value. Client tags
/// (`+`-prefixed keys) and vendor-prefixed keys (`vendor/key`) are returned
/// verbatim in `key` — the caller interprets the prefix if it cares.
pub fn parse_tags(tags: &str) -> Vec<(String, String)> {
    tags.split(';')
        .filter(|t| !t.is_empty())
        .map(|tag| match tag.split_once('=') {
            Some((k, v)) => (k.to_string(), unescape_tag_value(v)),
            None => (tag.to_string(), String::new()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escape(value: &str) -> String {
        let mut s = String::new();
        escape_tag_value(&mut s, value).unwrap();
        s
    }

    #[test]
    fn escape_round_trips_through_unescape() {
        let raw = "a;b c\\d\re\nf\tg\0h";
        assert_eq!(unescape_tag_value(&escape(raw)), raw);
    }

    #[test]
    fn unescape_is_idempotent_on_clean_input() {
        let clean = "no-escapes-here";
        assert_eq!(unescape_tag_value(clean), clean);
        assert_eq!(unescape_tag_value(&unescape_tag_value(clean)), clean);
    }

    #[test]
    fn trailing_lone_backslash_is_dropped() {
        assert_eq!(unescape_tag_value("test\\"), "test");
    }

    #[test]
    fn unknown_escape_passes_through_literally() {
        assert_eq!(unescape_tag_value("\\x"), "x");
    }

    #[test]
    fn parse_tags_splits_and_decodes() {
        let parsed = parse_tags("aaa=bbb;ccc;example.com/ddd=eee\\sfff");
        assert_eq!(
            parsed,
            vec![
                ("aaa".to_string(), "bbb".to_string()),
                ("ccc".to_string(), String::new()),
                ("example.com/ddd".to_string(), "eee fff".to_string()),
            ]
        );
    }
}
