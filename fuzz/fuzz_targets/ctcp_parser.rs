//! Fuzz target for CTCP framing/stripping.

#![no_main]

use ircparse_core::ctcp;
use libfuzzer_sys::fuzz_target;
use std::str;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = str::from_utf8(data) {
        let _ = ctcp::strip(input);
    }
});
