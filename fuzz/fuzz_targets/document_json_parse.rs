//! Fuzz target for document JSON parsing and generation.
//!
//! This fuzzer feeds arbitrary byte sequences to the document JSON parser
//! and renders every document that parses, checking for panics in span
//! resolution and splicing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sita::document::io_json::from_json_slice;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(document) = from_json_slice(data) {
        let _ = sita::generate(&document);
    }
});
