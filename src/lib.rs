//! # ircparse-core
//!
//! A pure, synchronous IRC wire-protocol parser and client-side session
//! state machine: RFC 1459/2812 plus IRCv3 message tags, CTCP framing,
//! ISUPPORT/MYINFO session bootstrapping, channel mode tracking, and the
//! sender/sanity heuristics needed to turn a raw line into a typed event
//! without guessing at daemon quirks.
//!
//! ## What this crate does not do
//!
//! No sockets, no TLS, no reconnect logic, no outbound line construction,
//! no server-to-server linking. This crate receives; it does not emit. See
//! [`dispatch::to_event`] for the single entry point: one line in, one
//! [`event::Event`] out, with [`state::Session`] threaded through as the
//! only persisted state.
//!
//! ## Quick Start
//!
//! ```rust
//! use ircparse_core::{dispatch, state::Session};
//!
//! let mut session = Session::new("nyxbot^");
//! let event = dispatch::to_event(
//!     ":adams.freenode.net 001 nyxbot^ :Welcome to the freenode Internet Relay Chat Network",
//!     &mut session,
//! ).expect("well-formed line");
//!
//! assert_eq!(event.kind, ircparse_core::event::EventKind::RplWelcome);
//! ```

#![deny(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod caps;
pub mod casemap;
pub mod ctcp;
pub mod daemon;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod format;
pub mod isupport;
pub mod mode;
pub mod numeric;
pub mod prefix;
pub mod sanity;
pub mod sasl;
pub mod sender;
pub mod state;
pub mod tags;
pub mod tokenizer;
pub mod typestring;
pub mod util;
pub mod validation;

pub use self::caps::{Capability, NegotiationVersion};
pub use self::casemap::CaseMapping;
pub use self::ctcp::Ctcp;
pub use self::daemon::Daemon;
pub use self::dispatch::to_event;
pub use self::error::{ModeParseError, ParseError, PartialParseError, Result};
pub use self::event::{Event, EventKind, SenderClass, UserRecord};
pub use self::isupport::{ChanModes, Isupport, IsupportEntry, PrefixSpec};
pub use self::mode::ExtbanKind;
pub use self::prefix::Prefix;
pub use self::sasl::{encode_external, encode_plain, SaslMechanism, SaslState};
pub use self::state::{Channel, ClientState, Mode, ServerState, Session};
pub use self::tokenizer::{tokenize, RawLine};
pub use self::typestring::{parse_typestring, Typestring};
