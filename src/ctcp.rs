//! CTCP (Client-To-Client Protocol) framing.
//!
//! CTCP messages are a `PRIVMSG`/`NOTICE` body bracketed by byte `0x01`; the
//! first space-separated word inside the bracket is the verb, the rest (if
//! any) is the verb's argument data. See spec §4.2 / §4.6.

const CTCP_DELIM: u8 = 0x01;

/// The recognised `CTCP_*` verb family. A verb outside this set is not a
/// structural surprise in the framing sense (it still parses as a verb
/// token) but is not one the dispatcher will turn into a `CTCP_X` event —
/// see `ParseError::UnknownCtcp`.
const KNOWN_VERBS: &[&str] = &[
    "ACTION",
    "VERSION",
    "PING",
    "TIME",
    "USERINFO",
    "CLIENTINFO",
    "SOURCE",
    "FINGER",
    "DCC",
    "ERRMSG",
];

/// Case-insensitive membership check against the recognised `CTCP_*` verb
/// family.
pub fn is_known_verb(verb: &str) -> bool {
    KNOWN_VERBS.iter().any(|known| known.eq_ignore_ascii_case(verb))
}

/// A decoded CTCP payload: `verb` plus whatever followed it, unsplit.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Ctcp<'a> {
    pub verb: &'a str,
    pub data: Option<&'a str>,
}

/// If `content` is CTCP-framed (first and last byte `0x01`), strip the
/// wrapper and split into verb + remaining data. Returns `None` for
/// unframed content.
pub fn strip(content: &str) -> Option<Ctcp<'_>> {
    let bytes = content.as_bytes();
    if bytes.len() < 2 || bytes[0] != CTCP_DELIM || bytes[bytes.len() - 1] != CTCP_DELIM {
        return None;
    }
    let inner = &content[1..content.len() - 1];
    match inner.split_once(' ') {
        Some((verb, data)) => Some(Ctcp {
            verb,
            data: Some(data),
        }),
        None => Some(Ctcp {
            verb: inner,
            data: None,
        }),
    }
}

/// Wrap `verb`/`data` back into a CTCP-framed body, the inverse of
/// [`strip`]. Not used by the parser itself (spec §6: "the core does not
/// emit"), but kept as the natural dual of `strip` for embedders that build
/// outgoing CTCP replies.
pub fn frame(verb: &str, data: Option<&str>) -> String {
    let mut s = String::with_capacity(verb.len() + data.map_or(0, |d| d.len() + 1) + 2);
    s.push(CTCP_DELIM as char);
    s.push_str(verb);
    if let Some(d) = data {
        s.push(' ');
        s.push_str(d);
    }
    s.push(CTCP_DELIM as char);
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_action() {
        let c = strip("\x01ACTION 123 test test content\x01").unwrap();
        assert_eq!(c.verb, "ACTION");
        assert_eq!(c.data, Some("123 test test content"));
    }

    #[test]
    fn strips_verb_with_no_data() {
        let c = strip("\x01VERSION\x01").unwrap();
        assert_eq!(c.verb, "VERSION");
        assert_eq!(c.data, None);
    }

    #[test]
    fn unframed_content_is_none() {
        assert!(strip("just a message").is_none());
        assert!(strip("\x01only one delimiter").is_none());
    }

    #[test]
    fn known_verbs_are_recognised_case_insensitively() {
        assert!(is_known_verb("VERSION"));
        assert!(is_known_verb("version"));
        assert!(is_known_verb("DCC"));
    }

    #[test]
    fn unknown_verb_is_not_recognised() {
        assert!(!is_known_verb("FROBNICATE"));
        assert!(!is_known_verb(""));
    }

    #[test]
    fn frame_round_trips() {
        let framed = frame("ACTION", Some("waves"));
        let c = strip(&framed).unwrap();
        assert_eq!(c.verb, "ACTION");
        assert_eq!(c.data, Some("waves"));
    }
}
