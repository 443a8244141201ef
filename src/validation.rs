//! Validation of the protocol elements whose shape the Session State
//! invariants depend on: nicknames and channel names (spec §3's Invariants
//! section), plus the control-character classification the rest of the
//! crate reuses.

/// Control characters that are never valid inside an IRC line body.
pub const PROTOCOL_CONTROL_CHARS: &[char] = &['\x00', '\x0D', '\x0A'];

/// mIRC/IRCv3 formatting control characters — valid in message content, but
/// representing formatting rather than text. See [`crate::format`].
pub const FORMAT_CONTROL_CHARS: &[char] = &[
    '\x02', '\x03', '\x04', '\x0F', '\x11', '\x16', '\x1D', '\x1F',
];

/// Characters a nickname may contain besides `[A-Za-z0-9]`, per spec §3:
/// `[A-Za-z0-9_\-\\\[\]{}^\`|]+`.
const NICK_SPECIAL_CHARS: &[char] = &['_', '-', '\\', '[', ']', '{', '}', '^', '`', '|'];

/// Default nickname length cap used before any `ISUPPORT NICKLEN` has been
/// seen.
pub const DEFAULT_MAX_NICK_LENGTH: usize = 9;

/// Default channel length cap used before any `ISUPPORT CHANNELLEN` has
/// been seen.
pub const DEFAULT_MAX_CHANNEL_LENGTH: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    Empty,
    TooLong { max: usize, actual: usize },
    TooShort { min: usize, actual: usize },
    InvalidChar { ch: char, position: usize },
    MissingChantypesPrefix,
    AllChantypesChars,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Empty => write!(f, "input is empty"),
            ValidationError::TooLong { max, actual } => {
                write!(f, "too long: {actual} (max {max})")
            }
            ValidationError::TooShort { min, actual } => {
                write!(f, "too short: {actual} (min {min})")
            }
            ValidationError::InvalidChar { ch, position } => {
                write!(f, "invalid character {ch:?} at position {position}")
            }
            ValidationError::MissingChantypesPrefix => {
                write!(f, "does not start with a chantypes character")
            }
            ValidationError::AllChantypesChars => {
                write!(f, "is entirely chantypes characters")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

fn is_valid_nick_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || NICK_SPECIAL_CHARS.contains(&c)
}

/// Validate a nickname against spec §3's invariant: matches
/// `[A-Za-z0-9_\-\\\[\]{}^\`|]+` and is shorter than `max_len`.
pub fn validate_nickname(nick: &str, max_len: usize) -> Result<(), ValidationError> {
    if nick.is_empty() {
        return Err(ValidationError::Empty);
    }
    if nick.chars().count() >= max_len {
        return Err(ValidationError::TooLong {
            max: max_len,
            actual: nick.chars().count(),
        });
    }
    for (i, c) in nick.chars().enumerate() {
        if !is_valid_nick_char(c) {
            return Err(ValidationError::InvalidChar { ch: c, position: i });
        }
    }
    Ok(())
}

/// Validate a channel name against spec §3's invariant: starts with a
/// `chantypes` character, length in `[2, max_len]`, no space/comma/0x07,
/// and is not a run of three or more `chantypes` characters.
pub fn validate_channel_name(
    name: &str,
    chantypes: &str,
    max_len: usize,
) -> Result<(), ValidationError> {
    let len = name.chars().count();
    if len < 2 {
        return Err(ValidationError::TooShort { min: 2, actual: len });
    }
    if len > max_len {
        return Err(ValidationError::TooLong {
            max: max_len,
            actual: len,
        });
    }
    let first = name.chars().next().unwrap();
    if !chantypes.contains(first) {
        return Err(ValidationError::MissingChantypesPrefix);
    }
    for (i, c) in name.chars().enumerate() {
        if c == ' ' || c == ',' || c == '\x07' {
            return Err(ValidationError::InvalidChar { ch: c, position: i });
        }
    }
    if name.chars().all(|c| chantypes.contains(c)) && len >= 3 {
        return Err(ValidationError::AllChantypesChars);
    }
    Ok(())
}

/// True if `name` both starts with a `chantypes` character and otherwise
/// passes [`validate_channel_name`]. Convenience used by the dispatcher to
/// classify a `PRIVMSG`/`NOTICE` target as channel vs. user (spec §4.6).
pub fn is_valid_channel(name: &str, chantypes: &str, max_len: usize) -> bool {
    validate_channel_name(name, chantypes, max_len).is_ok()
}
