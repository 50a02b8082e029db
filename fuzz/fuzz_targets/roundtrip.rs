#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&threads, source)) = data.split_first() else {
        return;
    };
    let threads = usize::from(threads % 8) + 1;
    let stream = codec::compress(source, threads).unwrap();
    assert_eq!(&stream[3..7], &(stream.len() as u32).to_le_bytes());
    let decoded = codec::decompress(&stream, None).unwrap();
    assert_eq!(decoded, source);
});
