//! Fuzz the public-key wire encoding: decode must never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let key = duskwire_proto::EncodedPublicKey::new(text);
        let _ = key.decode();
    }
});
