//! Property-based tests for the tokenizer, typestring resolver, and mode
//! engine.
//!
//! Run with: `cargo test --features proptest`

#![cfg(feature = "proptest")]

use std::collections::HashMap;

use ircparse_core::state::{Channel, ServerState};
use ircparse_core::{mode, tokenizer};
use proptest::prelude::*;

fn nickname_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z\\[\\]\\\\^_`{|}][a-zA-Z0-9\\-\\[\\]\\\\^_`{|}]{0,8}")
        .expect("valid regex")
}

fn channel_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[#&][a-zA-Z0-9_\\-]{1,20}").expect("valid regex")
}

fn message_text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[^\r\n\0]{0,200}").expect("valid regex")
}

fn mode_server() -> ServerState {
    ServerState {
        prefixes: "ov".to_string(),
        prefixchars: HashMap::from([('@', 'o'), ('+', 'v')]),
        a_modes: "eIb".to_string(),
        b_modes: "k".to_string(),
        c_modes: "flj".to_string(),
        ..ServerState::default()
    }
}

proptest! {
    /// The tokenizer must never panic on arbitrary byte-level input, and a
    /// well-formed `PRIVMSG` line always yields exactly two params.
    #[test]
    fn tokenize_never_panics_on_privmsg_shapes(
        nick in nickname_strategy(),
        target in channel_strategy(),
        text in message_text_strategy()
    ) {
        let raw = format!(":{nick}!user@host PRIVMSG {target} :{text}");
        let parsed = tokenizer::tokenize(&raw);
        prop_assert!(parsed.is_ok());
        let raw_line = parsed.unwrap();
        prop_assert_eq!(raw_line.command, "PRIVMSG");
        prop_assert_eq!(raw_line.params.len(), 2);
        prop_assert_eq!(raw_line.params[0], target.as_str());
        prop_assert_eq!(raw_line.params[1], text.as_str());
    }

    /// Tokenizing arbitrary printable text (no CR/LF/NUL) never panics,
    /// whatever it parses to.
    #[test]
    fn tokenize_never_panics_on_arbitrary_text(line in "[^\r\n\0]{0,300}") {
        let _ = tokenizer::tokenize(&line);
    }

    /// Prefix-class modes (ops/voice) are idempotent: granting the same
    /// mode to the same nick twice leaves exactly one holder.
    #[test]
    fn granting_prefix_mode_twice_is_idempotent(nick in nickname_strategy()) {
        let server = mode_server();
        let mut channel = Channel::default();
        mode::apply_mode_string(&mut channel, &server, "+o", &[&nick]);
        mode::apply_mode_string(&mut channel, &server, "+o", &[&nick]);
        prop_assert_eq!(channel.mods[&'o'].len(), 1);
    }

    /// A B-class mode set then unset leaves no trace, regardless of the
    /// argument's content.
    #[test]
    fn b_class_mode_set_then_unset_is_empty(key in "[!-~]{1,20}") {
        let server = mode_server();
        let mut channel = Channel::default();
        mode::apply_mode_string(&mut channel, &server, "+k", &[&key]);
        mode::apply_mode_string(&mut channel, &server, "-k", &[&key]);
        prop_assert!(channel.modes.is_empty());
    }

    /// The number of stored A-class ban/exception/invex records after
    /// adding N distinct masks is exactly N, regardless of argument content.
    #[test]
    fn a_class_mode_count_matches_distinct_masks(masks in prop::collection::hash_set("[!-~]{1,20}", 1..6)) {
        let server = mode_server();
        let mut channel = Channel::default();
        let masks: Vec<String> = masks.into_iter().collect();
        let mode_string = format!("+{}", "b".repeat(masks.len()));
        let refs: Vec<&str> = masks.iter().map(String::as_str).collect();
        mode::apply_mode_string(&mut channel, &server, &mode_string, &refs);
        prop_assert_eq!(channel.modes.len(), masks.len());
    }
}
