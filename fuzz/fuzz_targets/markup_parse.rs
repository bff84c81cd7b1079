//! Fuzz target for inline markup parsing.
//!
//! Arbitrary UTF-8 input is parsed and the parsed document is rendered back
//! to markup, checking for panics in offset bookkeeping on both sides.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };

    let document = sita::parse(source);
    let _ = sita::generate(&document);
});
