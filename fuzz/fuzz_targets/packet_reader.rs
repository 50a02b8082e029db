#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header-less packet runs, as produced by block workers.
    for packet in wire::PacketReader::for_packets(data).take(4096) {
        let Ok(packet) = packet else { break };
        assert!(packet.offset + packet.len <= data.len());
        let _ = packet.raw(data);
    }

    let mut reader = bytestream::ByteReader::new(data);
    while let Ok(flag) = reader.read_u8() {
        if flag & 0x0F == 0 {
            let _ = reader.skip_to_alignment(0x1000, 0x10);
        }
    }
});
