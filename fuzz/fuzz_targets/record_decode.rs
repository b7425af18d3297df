//! Arbitrary bytes through the whole frame decode path must never panic.

#![no_main]

use capstan_codec::decode_record;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Errors and unknown templates are fine; panics and hangs are not.
    let _ = decode_record(data);
});
