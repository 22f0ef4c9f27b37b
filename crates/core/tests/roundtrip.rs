//! Integration tests for the full codec pipeline.
//!
//! These tests verify end-to-end behavior: input -> compress -> container ->
//! decompress -> output, with verification that output matches input.

mod common;

use huffpack_core::{
    bitio::BUFFER_SIZE,
    codes::CodeTable,
    container::{compress, compress_bytes, decompress, decompress_bytes, read_header},
    frequency::FrequencyTable,
    tree::HuffmanTree,
    Error,
};
use std::io::Cursor;

fn round_trip(data: &[u8]) -> Vec<u8> {
    let container = compress_bytes(data).expect("compression failed");
    decompress_bytes(&container).expect("decompression failed")
}

#[test]
fn test_empty_input() {
    let container = compress_bytes(b"").unwrap();

    let header = read_header(&container[..]).unwrap();
    assert_eq!(header.symbol_count(), 0);
    assert_eq!(header.original_length, 0);
    assert_eq!(container.len(), 12);

    let mut out = Vec::new();
    let written = decompress(&container[..], &mut out).unwrap();
    assert_eq!(written, 0);
    assert!(out.is_empty());
}

#[test]
fn test_single_byte() {
    assert_eq!(round_trip(b"A"), b"A");
}

#[test]
fn test_single_symbol_repeated() {
    let input = vec![0x41u8; 1000];
    let container = compress_bytes(&input).unwrap();

    let header = read_header(&container[..]).unwrap();
    assert_eq!(header.symbol_count(), 1);

    let mut out = Vec::new();
    assert_eq!(decompress(&container[..], &mut out).unwrap(), 1000);
    assert_eq!(out, input);
}

#[test]
fn test_all_symbols() {
    let input: Vec<u8> = (0..=255).collect();
    assert_eq!(round_trip(&input), input);

    let container = compress_bytes(&input).unwrap();
    assert_eq!(read_header(&container[..]).unwrap().symbol_count(), 256);
}

#[test]
fn test_all_symbols_uneven() {
    let input: Vec<u8> = (0..=255u8)
        .flat_map(|b| std::iter::repeat(b).take(b as usize % 17 + 1))
        .collect();
    assert_eq!(round_trip(&input), input);
}

#[test]
fn test_buffer_boundary_crossing() {
    let input = common::sample_data(7, BUFFER_SIZE + 1);
    assert_eq!(input.len(), 8193);
    assert_eq!(round_trip(&input), input);
}

#[test]
fn test_payload_spans_many_blocks() {
    // Random bytes keep codes near 8 bits, so the payload crosses several
    // writer and reader blocks.
    let input = common::random_bytes(99, BUFFER_SIZE * 5 + 123);
    let container = compress_bytes(&input).unwrap();
    assert!(container.len() > BUFFER_SIZE * 2);
    assert_eq!(decompress_bytes(&container).unwrap(), input);
}

#[test]
fn test_large_data() {
    let input = common::sample_data(2024, 512 * 1024);
    assert_eq!(round_trip(&input), input);
}

#[test]
fn test_skewed_text_compresses() {
    let input = common::skewed_text(3, 100_000);
    let mut out = Vec::new();
    let stats = compress(Cursor::new(&input), &mut out).unwrap();

    assert!(stats.compression_ratio() < 0.25);
    assert!(stats.bits_per_symbol() < 2.0);
    assert_eq!(decompress_bytes(&out).unwrap(), input);
}

#[test]
fn test_dominant_symbol_shortest_code() {
    let input = common::skewed_text(11, 10_000);
    let table = FrequencyTable::from_bytes(&input);
    assert_eq!(table.distinct(), 4);

    let tree = HuffmanTree::from_frequencies(&table).unwrap();
    let codes = CodeTable::from_tree(&tree).unwrap();
    let dominant = codes.get(b'e').unwrap().len();
    for (symbol, code) in codes.iter() {
        if symbol != b'e' {
            assert!(dominant < code.len());
        }
    }
}

#[test]
fn test_decoder_rebuilds_encoder_tree() {
    let input = common::sample_data(5, 20_000);
    let container = compress_bytes(&input).unwrap();

    let header = read_header(&container[..]).unwrap();
    let encoder_tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(&input)).unwrap();
    let decoder_tree = HuffmanTree::from_frequencies(&header.frequencies).unwrap();
    assert_eq!(encoder_tree, decoder_tree);
}

#[test]
fn test_compression_is_deterministic() {
    let input = common::sample_data(77, 30_000);
    assert_eq!(compress_bytes(&input).unwrap(), compress_bytes(&input).unwrap());
}

#[test]
fn test_payload_length_matches_code_lengths() {
    let input = b"she sells sea shells by the sea shore".to_vec();
    let container = compress_bytes(&input).unwrap();

    let header = read_header(&container[..]).unwrap();
    let tree = HuffmanTree::from_frequencies(&header.frequencies).unwrap();
    let codes = CodeTable::from_tree(&tree).unwrap();
    let bits: usize = input.iter().map(|&b| codes.get(b).unwrap().len()).sum();

    assert_eq!(
        container.len() as u64,
        header.encoded_len() + (bits as u64 + 7) / 8
    );
}

#[test]
fn test_truncated_payload_detected() {
    let input = common::random_bytes(8, 4096);
    let container = compress_bytes(&input).unwrap();

    let result = decompress_bytes(&container[..container.len() - 1]);
    assert!(matches!(result, Err(Error::TruncatedStream { .. })));
}

#[test]
fn test_trailing_bytes_ignored() {
    let input = b"trailing garbage after the payload is never read".to_vec();
    let mut container = compress_bytes(&input).unwrap();
    container.extend_from_slice(&[0xAA; 32]);

    assert_eq!(decompress_bytes(&container).unwrap(), input);
}
