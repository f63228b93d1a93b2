//! LZ4 block compression/decompression.
//!
//! Block wire format:
//! - 4-byte little-endian length prefix (high bit set = uncompressed
//!   passthrough payload), then a run of sequences
//! - Sequence: token, [literal length extension], literals,
//!   [offset, [match length extension]]
//! - Token: 4-bit literal length | 4-bit match length
//! - A length nibble of 15 is extended by bytes that each add their
//!   value, terminated by the first byte below 255
//! - Offset: 2 bytes little-endian, 1-65535
//! - Stored match length is the real length minus 4 (minimum match)
//!
//! The final sequence of every block is literal-only: no offset or
//! match length follows its literals.

use crate::table::PositionTable;
use lzfold_core::bytes::{read_u32_le, write_u16_le, write_u32_le};
use lzfold_core::error::{LzfoldError, Result};

/// Minimum match length the encoder may emit.
pub const MIN_MATCH: usize = 4;

/// Tail bytes of a block that stay literal; the scan stops short of them.
pub const MFLIMIT: usize = 12;

/// Widest back-reference (16-bit offset).
pub const MAX_OFFSET: usize = 65535;

/// Largest source size a single block can represent.
pub const MAX_BLOCK_INPUT_SIZE: usize = 0x7E00_0000;

/// Worst-case encoded payload size for `src_len` input bytes.
#[inline]
pub fn worst_case_block_length(src_len: usize) -> usize {
    src_len + src_len / 255 + 16
}

/// Validated candidate position for a match starting at `src_ptr`.
///
/// The table lookup is only a hint; the fingerprint is re-read from the
/// source to rule out hash collisions, and far-away candidates beyond
/// [`MAX_OFFSET`] are discarded.
fn find_match(table: &PositionTable, value: u32, src: &[u8], src_ptr: usize) -> Option<usize> {
    let pos = table.get(value)? as usize;
    if read_u32_le(src, pos) == value && src_ptr - pos <= MAX_OFFSET {
        Some(pos)
    } else {
        None
    }
}

/// Length of the common run between `src[front..]` and `src[back..]`,
/// never extending the back cursor past `limit`.
fn count_match(src: &[u8], front: usize, back: usize, limit: usize) -> usize {
    let mut count = 0;
    while back + count <= limit && src[front + count] == src[back + count] {
        count += 1;
    }
    count
}

/// Serialize one `(literal, match)` pair at `dst[dst_ptr..]`.
///
/// `m` is `(offset, match_length)`; `None` encodes the literal-only tail
/// sequence. Returns the number of bytes written. The caller guarantees
/// `dst` is sized for the worst case.
fn encode_sequence(
    dst: &mut [u8],
    dst_ptr: usize,
    literal: &[u8],
    m: Option<(usize, usize)>,
) -> usize {
    let mut p = dst_ptr;
    let lit_len = literal.len();

    let l4 = lit_len.min(15) as u8;
    let m4 = match m {
        Some((_, match_len)) => (match_len - MIN_MATCH).min(15) as u8,
        None => 0,
    };
    dst[p] = (l4 << 4) | m4;
    p += 1;

    if l4 == 15 {
        let mut remaining = lit_len - 15;
        while remaining >= 255 {
            dst[p] = 255;
            p += 1;
            remaining -= 255;
        }
        dst[p] = remaining as u8;
        p += 1;
    }

    dst[p..p + lit_len].copy_from_slice(literal);
    p += lit_len;

    if let Some((offset, match_len)) = m {
        write_u16_le(dst, p, offset as u16);
        p += 2;

        if m4 == 15 {
            let mut remaining = match_len - MIN_MATCH - 15;
            while remaining >= 255 {
                dst[p] = 255;
                p += 1;
                remaining -= 255;
            }
            dst[p] = remaining as u8;
            p += 1;
        }
    }

    p - dst_ptr
}

/// Greedy single-hash block encoder.
///
/// Owns the position table so a frame can reuse the allocation across
/// blocks; the table is reset at the start of every block because blocks
/// are independently decodable.
pub struct BlockEncoder {
    table: PositionTable,
}

impl BlockEncoder {
    /// Create an encoder with an empty position table.
    pub fn new() -> Self {
        Self {
            table: PositionTable::new(),
        }
    }

    /// Compress `src` into `dst` as a length-prefixed block.
    ///
    /// `dst` must hold at least `worst_case_block_length(src.len()) + 4`
    /// bytes. Returns the total bytes written (payload plus the 4-byte
    /// prefix).
    pub fn compress(&mut self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        if src.len() > MAX_BLOCK_INPUT_SIZE {
            return Err(LzfoldError::input_too_large(src.len(), MAX_BLOCK_INPUT_SIZE));
        }
        debug_assert!(dst.len() >= worst_case_block_length(src.len()) + 4);

        self.table.reset();
        let payload_len = self.encode_sequences(src, &mut dst[4..]);
        write_u32_le(dst, 0, payload_len as u32);
        Ok(payload_len + 4)
    }

    /// Scan `src`, split it into sequences, and serialize them into
    /// `dst`. Returns the payload length.
    fn encode_sequences(&mut self, src: &[u8], dst: &mut [u8]) -> usize {
        let mut src_ptr = 0;
        let mut literal_head = 0;
        let mut dst_ptr = 0;

        if src.len() >= MFLIMIT {
            let max_index = src.len() - MFLIMIT;
            while src_ptr < max_index {
                let value = read_u32_le(src, src_ptr);
                match find_match(&self.table, value, src, src_ptr) {
                    Some(match_pos) => {
                        let length = count_match(src, match_pos, src_ptr, max_index);
                        if length < MIN_MATCH {
                            // Too close to the block tail to pay for a
                            // match; the rest goes out as literal.
                            break;
                        }
                        dst_ptr += encode_sequence(
                            dst,
                            dst_ptr,
                            &src[literal_head..src_ptr],
                            Some((src_ptr - match_pos, length)),
                        );
                        src_ptr += length;
                        literal_head = src_ptr;
                    }
                    None => {
                        // Positions inside matches are never inserted.
                        self.table.set(value, src_ptr as u32);
                        src_ptr += 1;
                    }
                }
            }
        }

        dst_ptr + encode_sequence(dst, dst_ptr, &src[literal_head..], None)
    }
}

impl Default for BlockEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a length-nibble extension: each 0xFF byte adds 255, the first
/// smaller byte terminates the run and adds its own value.
fn read_length_ext(payload: &[u8], src_ptr: &mut usize) -> Result<usize> {
    let mut extra = 0;
    loop {
        let byte = *payload
            .get(*src_ptr)
            .ok_or_else(|| LzfoldError::unexpected_eof(1))?;
        *src_ptr += 1;
        extra += byte as usize;
        if byte != 255 {
            return Ok(extra);
        }
    }
}

/// Decode a block payload (the bytes after the length prefix), appending
/// the reconstructed bytes to `dst`.
///
/// `dst` must contain exactly the bytes already produced for the current
/// block; match offsets are validated against its length, so blocks stay
/// independently decodable.
pub fn decompress_block(payload: &[u8], dst: &mut Vec<u8>) -> Result<()> {
    let mut src_ptr = 0;

    while src_ptr < payload.len() {
        let token = payload[src_ptr];
        src_ptr += 1;

        let mut lit_len = (token >> 4) as usize;
        if lit_len == 15 {
            lit_len += read_length_ext(payload, &mut src_ptr)?;
        }
        if src_ptr + lit_len > payload.len() {
            return Err(LzfoldError::corrupted(
                src_ptr as u64,
                "literal run past end of block",
            ));
        }
        dst.extend_from_slice(&payload[src_ptr..src_ptr + lit_len]);
        src_ptr += lit_len;

        // The final sequence carries no match.
        if src_ptr >= payload.len() {
            break;
        }

        if src_ptr + 2 > payload.len() {
            return Err(LzfoldError::corrupted(
                src_ptr as u64,
                "truncated match offset",
            ));
        }
        let offset = u16::from_le_bytes([payload[src_ptr], payload[src_ptr + 1]]) as usize;
        src_ptr += 2;
        if offset == 0 {
            return Err(LzfoldError::corrupted(src_ptr as u64, "zero match offset"));
        }
        if offset > dst.len() {
            return Err(LzfoldError::corrupted(
                src_ptr as u64,
                "match offset exceeds produced bytes",
            ));
        }

        let mut match_len = (token & 0x0F) as usize;
        if match_len == 15 {
            match_len += read_length_ext(payload, &mut src_ptr)?;
        }
        match_len += MIN_MATCH;

        // Byte-by-byte so an overlapping copy (offset < match length,
        // down to offset 1) re-reads bytes written by this same match.
        for _ in 0..match_len {
            let byte = dst[dst.len() - offset];
            dst.push(byte);
        }
    }

    Ok(())
}
