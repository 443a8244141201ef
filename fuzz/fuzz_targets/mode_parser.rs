//! Fuzz target for the Mode Engine: split arbitrary input into a mode
//! string and arguments on whitespace, then apply it to a fresh channel.

#![no_main]

use ircparse_core::state::{Channel, ServerState};
use ircparse_core::mode;
use libfuzzer_sys::fuzz_target;
use std::str;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = str::from_utf8(data) {
        if input.is_empty() || input.len() > 512 {
            return;
        }
        let mut parts = input.split_whitespace();
        let Some(mode_string) = parts.next() else {
            return;
        };
        let args: Vec<&str> = parts.collect();
        let server = ServerState {
            a_modes: "eIb".to_string(),
            b_modes: "k".to_string(),
            c_modes: "flj".to_string(),
            ..ServerState::default()
        };
        let mut channel = Channel::default();
        mode::apply_mode_string(&mut channel, &server, mode_string, &args);
    }
});
