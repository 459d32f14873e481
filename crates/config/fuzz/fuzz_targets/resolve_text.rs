//! Fuzzing harness for resampler config resolution
//!
//! Arbitrary input must never panic, only produce errors.
//! Run with: cargo fuzz run resolve_text

#![no_main]
use libfuzzer_sys::fuzz_target;
use resampler_config::resolve_str;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = resolve_str(s);
    }
});
