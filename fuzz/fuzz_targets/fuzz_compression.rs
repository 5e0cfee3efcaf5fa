#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shield_common::compression::{CompressionConfig, Compressor};

/// Fuzz the compression wrapper.
///
/// Tests:
/// - compress / decompress round-trip at every level
/// - decompress of arbitrary bytes never panics
/// - decompress of a truncated blob never succeeds with the wrong payload

#[derive(Arbitrary, Debug)]
struct CompressionInput {
    /// Payload to round-trip
    payload: Vec<u8>,
    /// zlib level selector (clamped by the compressor)
    level: u8,
    /// Arbitrary bytes fed straight to decompress
    random_blob: Vec<u8>,
    /// Truncation point for the compressed payload
    cut: u16,
}

fuzz_target!(|input: CompressionInput| {
    // Limit payload size to prevent OOM
    if input.payload.len() > 65536 {
        return;
    }

    let compressor = Compressor::new(CompressionConfig {
        level: u32::from(input.level % 10),
        max_decompressed_len: 1024 * 1024,
    });

    let blob = compressor.compress(&input.payload);
    match compressor.decompress(&blob) {
        Ok(out) => assert_eq!(out, input.payload),
        Err(e) => panic!("decompress failed on own output: {}", e),
    }

    // Truncated blobs must be rejected or, at worst, never yield other data
    let cut = usize::from(input.cut) % blob.len();
    if let Ok(out) = compressor.decompress(&blob[..cut]) {
        assert_eq!(out, input.payload);
    }

    // Arbitrary input (should not panic)
    let _ = compressor.decompress(&input.random_blob);
});
