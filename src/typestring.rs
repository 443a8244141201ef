//! Typestring Parser: classifies a command token as named or numeric, per
//! spec §4.5.

use crate::error::ParseError;
use crate::event::EventKind;
use crate::numeric::NumericTable;

/// The outcome of resolving a command token: an event kind plus the
/// numeric code if the token was numeric (`0` otherwise, per spec §3's
/// `num` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Typestring {
    pub kind: EventKind,
    pub num: u16,
}

/// Resolve `command` (already isolated by the Tokenizer) to an
/// [`EventKind`]. If it begins with an ASCII digit, it is parsed as an
/// unsigned integer and looked up in `table`; an `Unset` table entry
/// produces the deliberate `Numeric` fallback ("unrecognised numeric, no
/// specialcasing"), not an error. Otherwise it is looked up by exact string
/// match in the named-event enumeration.
pub fn parse_typestring(command: &str, table: &NumericTable) -> Result<Typestring, ParseError> {
    if command
        .as_bytes()
        .first()
        .is_some_and(u8::is_ascii_digit)
    {
        let n: u16 = command
            .parse()
            .map_err(|_| ParseError::BadNumeric(command.to_string()))?;
        let kind = table
            .get(n as usize)
            .copied()
            .unwrap_or(EventKind::Unset);
        let kind = if kind == EventKind::Unset {
            EventKind::Numeric
        } else {
            kind
        };
        return Ok(Typestring { kind, num: n });
    }

    match EventKind::from_command_name(command) {
        Some(kind) => Ok(Typestring { kind, num: 0 }),
        None => Err(ParseError::UnknownNamedCommand(command.to_string())),
    }
}
