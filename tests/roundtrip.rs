//! End-to-end round-trip scenarios and property tests for every wire
//! format, exercised only through the public `compress_*`/`decompress_*`
//! API.

use proptest::prelude::*;
use retrolz::{
    compress_f01, compress_f03, compress_f80, decompress_f01, decompress_f03, decompress_f80,
};

#[test]
fn f80_empty_input_is_three_zero_bytes() {
    let compressed = compress_f80(&[]);
    assert_eq!(compressed, vec![0x00, 0x00, 0x00]);
    assert_eq!(decompress_f80(&compressed).unwrap(), Vec::<u8>::new());
}

#[test]
fn f80_single_byte_round_trips_with_expected_wire_bytes() {
    let compressed = compress_f80(&[0x42]);
    assert_eq!(compressed, vec![0x01, 0x42, 0x00, 0x00, 0x00]);
    assert_eq!(decompress_f80(&compressed).unwrap(), vec![0x42]);
}

#[test]
fn f80_short_repeat_round_trips() {
    let data = b"ABABABABAB";
    let compressed = compress_f80(data);
    assert_eq!(decompress_f80(&compressed).unwrap(), data);
}

#[test]
fn f80_long_run_round_trips_via_overlapping_match() {
    let data = vec![0x55u8; 200];
    assert_eq!(decompress_f80(&compress_f80(&data)).unwrap(), data);
}

#[test]
fn f03_short_rle_run_has_expected_wire_encoding() {
    // 21 bytes of 0xAA: one token, long RLE form (length 19..274).
    // Flag bit 0 (match), ctrl1 = 0x0F (escape), ctrl2 = 0 (long form),
    // nc1 = 21 - 19 = 2, followed by the repeated byte itself.
    let data = vec![0xAAu8; 21];
    let compressed = compress_f03(&data);
    assert_eq!(compressed, vec![0x00, 0x02, 0x0F, 0xAA]);
    assert_eq!(decompress_f03(&compressed).unwrap(), data);
}

#[test]
fn f01_has_no_rle_path_available() {
    // F01 reserves no control nibble as an RLE escape: every value
    // 0x0..=0xF is a valid back-reference length, so a long constant
    // run still round-trips purely through back-references.
    let data = vec![0x33u8; 40];
    assert_eq!(decompress_f01(&compress_f01(&data)).unwrap(), data);
}

#[test]
fn f01_stream_decoded_as_f03_diverges() {
    // F01 allows every control nibble 0x0..=0xF as a real back-reference
    // length (up to 18); F03 reserves 0xF as its RLE escape. A long
    // enough run compressed as F01 will legitimately emit a length-18
    // match (ctrl1 == 0xF), which F03's decoder misreads as an RLE
    // token instead — decoding an F01 stream with the wrong format's
    // reader must not silently produce the right answer.
    let data = vec![b'Z'; 100];
    let compressed = compress_f01(&data);
    assert_eq!(decompress_f01(&compressed).unwrap(), data);
    assert_ne!(decompress_f03(&compressed).ok(), Some(data));
}

fn run_after_prefix_roundtrips(prefix: &[u8], run_byte: u8, run_len: usize) {
    let mut data = prefix.to_vec();
    data.extend(std::iter::repeat_n(run_byte, run_len));

    let f80 = compress_f80(&data);
    assert_eq!(decompress_f80(&f80).unwrap(), data, "f80 overlap round-trip");

    let f01 = compress_f01(&data);
    assert_eq!(decompress_f01(&f01).unwrap(), data, "f01 overlap round-trip");

    let f03 = compress_f03(&data);
    assert_eq!(decompress_f03(&f03).unwrap(), data, "f03 overlap round-trip");
}

#[test]
fn overlap_correctness_for_a_times_b_run() {
    run_after_prefix_roundtrips(b"X", b'y', 50);
    run_after_prefix_roundtrips(b"prefix", b'z', 500);
    run_after_prefix_roundtrips(b"", b'w', 8192);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn f80_round_trips_arbitrary_bytes(data in prop::collection::vec(any::<u8>(), 0..4096)) {
        prop_assert_eq!(decompress_f80(&compress_f80(&data)).unwrap(), data);
    }

    #[test]
    fn f01_round_trips_arbitrary_bytes(data in prop::collection::vec(any::<u8>(), 0..4096)) {
        prop_assert_eq!(decompress_f01(&compress_f01(&data)).unwrap(), data);
    }

    #[test]
    fn f03_round_trips_arbitrary_bytes(data in prop::collection::vec(any::<u8>(), 0..4096)) {
        prop_assert_eq!(decompress_f03(&compress_f03(&data)).unwrap(), data);
    }

    #[test]
    fn f80_round_trips_low_entropy_bytes(data in prop::collection::vec(0u8..4, 0..4096)) {
        // A tiny alphabet pushes the matcher toward long back-references
        // and runs, exercising overlap-heavy paths more than uniform bytes.
        prop_assert_eq!(decompress_f80(&compress_f80(&data)).unwrap(), data);
    }

    #[test]
    fn f03_round_trips_low_entropy_bytes(data in prop::collection::vec(0u8..4, 0..4096)) {
        prop_assert_eq!(decompress_f03(&compress_f03(&data)).unwrap(), data);
    }
}
