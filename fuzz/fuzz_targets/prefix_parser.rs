//! Fuzz target for prefix (`nick!user@host` / server-address) parsing.

#![no_main]

use ircparse_core::prefix::Prefix;
use libfuzzer_sys::fuzz_target;
use std::str;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = str::from_utf8(data) {
        let prefix = Prefix::parse(input);
        let _ = prefix.nick();
        let _ = prefix.address();
    }
});
