#![no_main]

use codec::{CodecLimits, Decoder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let decoder = Decoder::with_limits(wire::Limits::for_testing(), CodecLimits::for_testing());
    let _ = decoder.decompress(data, None);

    // Limited decodes must agree with the prefix of an unlimited decode.
    if let Ok(full) = decoder.decompress(data, None) {
        let limit = full.len() / 2;
        let partial = decoder.decompress(data, Some(limit)).unwrap();
        assert_eq!(partial, &full[..limit]);
    }
});
