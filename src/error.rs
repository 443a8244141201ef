//! Error taxonomy for the IRC parser, per spec §7.
//!
//! Fatal errors propagate out of the top-level `to_event` call carrying a
//! reference to the partially-assembled [`crate::event::Event`] (spec §7);
//! `SanityWarning` is deliberately *not* a variant here — the Sanity
//! Postpass records it in `Event::errors` and never throws.

use thiserror::Error;

use crate::event::Event;

/// Convenience alias for `Result<T, ParseError>`.
pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// Fatal parse errors, per spec §7's taxonomy.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Empty input line. Fatal for this line; the caller should drop it.
    #[error("empty line")]
    EmptyLine,

    /// A prefix-less line with an unrecognised command (spec §6: only
    /// `PING`, `ERROR`, `PONG`, `NOTICE`, `NOTICE AUTH`, `AUTHENTICATE` are
    /// recognised without a prefix).
    #[error("unknown basic command: {0}")]
    UnknownBasicCommand(String),

    /// A prefixed line whose command token maps to no known event kind.
    #[error("unknown named command: {0}")]
    UnknownNamedCommand(String),

    /// A numeric command token that failed integer parsing.
    #[error("bad numeric: {0}")]
    BadNumeric(String),

    /// A CTCP verb outside the recognised `CTCP_*` family (see
    /// `crate::ctcp::is_known_verb`), raised by the `PRIVMSG`/`NOTICE`
    /// dispatch case rather than silently degraded to a heuristic fallback.
    #[error("unknown CTCP verb: {0}")]
    UnknownCtcp(String),

    /// The tokenizer consumed past the end of the line (e.g. a missing
    /// expected space). Carries a context string describing what was being
    /// parsed.
    #[error("malformed token while parsing {context}")]
    MalformedToken { context: String },

    /// `ERR_NEEDPONG` (513) payload did not match the expected
    /// `"To connect, type /QUOTE PONG <token>"` shape.
    #[error("unrecognised ERR_NEEDPONG payload: {0}")]
    UnknownConnectHint(String),
}

impl ParseError {
    /// Pair this error with the partially-assembled event that was being
    /// built when it occurred, per spec §7's "carrying a reference to the
    /// partially assembled event record".
    pub fn with_partial(self, event: Event) -> PartialParseError {
        PartialParseError {
            source: self,
            partial: event,
        }
    }
}

/// A fatal [`ParseError`] plus the partially-built [`Event`] in flight when
/// it occurred. This is what `to_event` actually returns on the `Err` path
/// (spec §7).
#[derive(Debug, Error)]
#[error("{source}")]
pub struct PartialParseError {
    #[source]
    pub source: ParseError,
    pub partial: Event,
}

/// Errors encountered while applying a mode string in the Mode Engine
/// (spec §4.8).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModeParseError {
    /// A character in the mode-letter portion of the argument was neither
    /// `+` nor `-` and the string did not start with a sign either (this
    /// only fires for callers that require an explicit sign; spec §4.8
    /// step 1 otherwise defaults an unsigned string to `+`).
    #[error("invalid mode modifier: {modifier}")]
    InvalidModeModifier { modifier: char },

    /// An empty mode string was supplied.
    #[error("missing mode string")]
    MissingModeString,
}
