//! Fuzz envelope deserialization: arbitrary bytes must never panic, only
//! return an error or a valid envelope.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(envelope) = duskwire_proto::Envelope::from_json(text) {
            // Whatever parsed must re-serialize
            let _ = envelope.to_json();
        }
    }
});
