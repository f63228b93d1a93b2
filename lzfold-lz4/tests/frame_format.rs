//! Bit-exact frame format tests and corruption handling.

use lzfold_lz4::xxhash::xxh32;
use lzfold_lz4::{BLOCK_SIZE, compress, decompress};

fn header_checksum() -> u8 {
    (xxh32(&[0x64, 0x70], 0) >> 8) as u8
}

#[test]
fn test_empty_input_frame_is_fifteen_bytes() {
    let frame = compress(b"").unwrap();

    let mut expected = vec![0x04, 0x22, 0x4D, 0x18, 0x64, 0x70, header_checksum()];
    expected.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]); // end mark
    expected.extend_from_slice(&[0x05, 0x5D, 0xCC, 0x02]); // xxh32("") little-endian
    assert_eq!(frame, expected);
    assert_eq!(frame.len(), 15);

    assert_eq!(decompress(&frame).unwrap(), b"");
}

#[test]
fn test_frame_ends_with_end_mark_and_checksum() {
    let data = b"some ordinary frame content";
    let frame = compress(data).unwrap();

    let tail = &frame[frame.len() - 8..];
    assert_eq!(&tail[..4], &[0x00, 0x00, 0x00, 0x00]);
    assert_eq!(&tail[4..], &xxh32(data, 0).to_le_bytes());
}

#[test]
fn test_single_literal_block_layout() {
    // "hello" is below the scan threshold: one literal-only sequence,
    // so the block is exactly `06 00 00 00 50 68 65 6C 6C 6F`.
    let frame = compress(b"hello").unwrap();
    assert_eq!(
        &frame[7..17],
        &[0x06, 0x00, 0x00, 0x00, 0x50, 0x68, 0x65, 0x6C, 0x6C, 0x6F]
    );
}

#[test]
fn test_bad_magic_rejected() {
    let mut frame = compress(b"payload goes here").unwrap();
    frame[3] = 0x17; // 0x184D2204 -> 0x174D2204
    assert!(decompress(&frame).is_err());
}

#[test]
fn test_every_header_bit_is_guarded() {
    let reference = compress(b"guarded header").unwrap();
    for byte in 0..7 {
        for bit in 0..8 {
            let mut frame = reference.clone();
            frame[byte] ^= 1 << bit;
            assert!(
                decompress(&frame).is_err(),
                "flip of header byte {byte} bit {bit} was accepted"
            );
        }
    }
}

#[test]
fn test_content_checksum_is_guarded() {
    let reference = compress(b"check the trailing checksum").unwrap();
    let len = reference.len();
    for byte in len - 4..len {
        for bit in 0..8 {
            let mut frame = reference.clone();
            frame[byte] ^= 1 << bit;
            assert!(
                decompress(&frame).is_err(),
                "flip of trailer byte {byte} bit {bit} was accepted"
            );
        }
    }
}

#[test]
fn test_payload_corruption_detected() {
    // Any payload flip must surface as either a decode failure or a
    // content checksum mismatch; it can never be silently accepted.
    let data = b"corruptible corpus, corruptible corpus, corruptible corpus";
    let reference = compress(data).unwrap();
    for byte in 7..reference.len() - 8 {
        for bit in 0..8 {
            let mut frame = reference.clone();
            frame[byte] ^= 1 << bit;
            if let Ok(restored) = decompress(&frame) {
                assert_ne!(restored, data, "flip of byte {byte} bit {bit} went unnoticed");
            }
        }
    }
}

#[test]
fn test_truncated_trailer_rejected() {
    let frame = compress(b"soon to be truncated").unwrap();
    assert!(decompress(&frame[..frame.len() - 1]).is_err());
}

#[test]
fn test_truncated_after_header_rejected() {
    let frame = compress(b"cut short").unwrap();
    assert!(decompress(&frame[..7]).is_err());
}

#[test]
fn test_truncated_mid_payload_rejected() {
    let frame = compress(b"cut in the middle of a block").unwrap();
    assert!(decompress(&frame[..13]).is_err());
}

#[test]
fn test_compression_is_deterministic() {
    let data: Vec<u8> = b"determinism ".repeat(4096);
    assert_eq!(compress(&data).unwrap(), compress(&data).unwrap());
}

#[test]
fn test_multi_block_roundtrip() {
    // Just over two blocks of compressible text.
    let phrase = b"All work and no play makes Jack a dull boy. ";
    let mut data = Vec::with_capacity(2 * BLOCK_SIZE + 4096);
    while data.len() < 2 * BLOCK_SIZE + 4096 {
        data.extend_from_slice(phrase);
    }

    let frame = compress(&data).unwrap();
    assert!(frame.len() < data.len());
    assert_eq!(decompress(&frame).unwrap(), data);
}

#[test]
fn test_multi_block_incompressible_roundtrip() {
    // A xorshift stream straddling a block boundary; almost nothing to
    // match, so this exercises long literal runs across blocks.
    let mut state = 0x9E3779B9u32;
    let mut data = Vec::with_capacity(BLOCK_SIZE + 1024);
    while data.len() < BLOCK_SIZE + 1024 {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        data.extend_from_slice(&state.to_le_bytes());
    }

    let frame = compress(&data).unwrap();
    assert_eq!(decompress(&frame).unwrap(), data);
}

#[test]
fn test_blocks_are_independent() {
    // Identical content on both sides of the 4 MiB boundary: any match
    // reaching into the previous block would corrupt the round trip.
    let unit = b"boundary-crossing repetition ";
    let mut data = Vec::with_capacity(BLOCK_SIZE + unit.len() * 8);
    while data.len() < BLOCK_SIZE + unit.len() * 4 {
        data.extend_from_slice(unit);
    }

    let frame = compress(&data).unwrap();
    assert_eq!(decompress(&frame).unwrap(), data);
}
