//! Fuzz target for the top-level dispatcher.
//!
//! Feeds arbitrary lines into `to_event` against a fresh session and
//! checks only that it never panics — a malformed or hostile line should
//! surface as an `Err`, never a crash.

#![no_main]

use ircparse_core::state::Session;
use ircparse_core::to_event;
use libfuzzer_sys::fuzz_target;
use std::str;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = str::from_utf8(data) {
        if input.is_empty() || input.len() > 512 {
            return;
        }
        let mut session = Session::new("fuzzbot");
        let _ = to_event(input, &mut session);
    }
});
