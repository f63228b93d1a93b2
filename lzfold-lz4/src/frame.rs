//! LZ4 frame container.
//!
//! A frame is:
//!
//! ```text
//! MAGIC(4 LE) | FLG(1) | BD(1) | HC(1) | blocks... | 0x00000000 | content xxh32(4 LE)
//! ```
//!
//! This is a fixed-profile subset of the LZ4 frame format: version 01,
//! independent blocks, no block checksums, no content size, content
//! checksum present, 4 MiB maximum block size. Readers reject any other
//! FLG/BD combination. The trailing checksum covers the *uncompressed*
//! stream; the one-byte header checksum covers `{FLG, BD}`.

use std::io::{self, Read, Write};

use crate::block::{BlockEncoder, decompress_block, worst_case_block_length};
use crate::xxhash::{Xxh32, xxh32};
use lzfold_core::error::{LzfoldError, Result};

/// Frame magic number, written little-endian.
pub const MAGIC: u32 = 0x184D2204;

/// Fixed frame descriptor FLG byte: version 01, independent blocks, no
/// block checksum, no content size, content checksum present.
pub const FLG: u8 = 0b0110_0100;

/// Fixed frame descriptor BD byte: maximum block size 4 MiB.
pub const BD: u8 = 0b0111_0000;

/// Source bytes per block, matching [`BD`].
pub const BLOCK_SIZE: usize = 4 * (1 << 20);

/// Length-prefix bit marking an uncompressed passthrough payload.
const UNCOMPRESSED_BIT: u32 = 0x8000_0000;

/// One-byte descriptor checksum: byte 2 of the big-endian xxh32 digest
/// of `{FLG, BD}` with seed 0.
fn header_checksum() -> u8 {
    (xxh32(&[FLG, BD], 0) >> 8) as u8
}

/// Fill `buf` from `reader`, stopping early only at end of input.
/// Returns the number of bytes placed in `buf`.
fn fill_buffer<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// `read_exact` that reports a premature end of input as a format error
/// at `offset` instead of a bare I/O failure.
fn read_exact_or_corrupt<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    offset: u64,
    what: &str,
) -> Result<()> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            LzfoldError::corrupted(offset, format!("truncated {what}"))
        } else {
            LzfoldError::Io(e)
        }
    })
}

/// Streaming frame compressor.
///
/// Owns the per-frame resources: the block encoder (and with it the
/// position table), a 4 MiB source buffer, and a worst-case destination
/// buffer. All of them are reused across blocks and across frames.
pub struct FrameCompressor {
    encoder: BlockEncoder,
    src_buf: Vec<u8>,
    dst_buf: Vec<u8>,
}

impl FrameCompressor {
    /// Create a compressor with its block buffers preallocated.
    pub fn new() -> Self {
        Self {
            encoder: BlockEncoder::new(),
            src_buf: vec![0; BLOCK_SIZE],
            dst_buf: vec![0; worst_case_block_length(BLOCK_SIZE) + 4],
        }
    }

    /// Compress everything from `reader` into one frame on `writer`.
    pub fn compress<R: Read, W: Write>(&mut self, mut reader: R, mut writer: W) -> Result<()> {
        writer.write_all(&MAGIC.to_le_bytes())?;
        writer.write_all(&[FLG, BD, header_checksum()])?;

        let mut content_hasher = Xxh32::new(0);
        loop {
            let n = fill_buffer(&mut reader, &mut self.src_buf)?;
            if n == 0 {
                break;
            }
            let block_len = self.encoder.compress(&self.src_buf[..n], &mut self.dst_buf)?;
            writer.write_all(&self.dst_buf[..block_len])?;
            content_hasher.update(&self.src_buf[..n]);
        }

        writer.write_all(&0u32.to_le_bytes())?; // end mark
        writer.write_all(&content_hasher.digest().to_le_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

impl Default for FrameCompressor {
    fn default() -> Self {
        Self::new()
    }
}

/// Streaming frame extractor.
///
/// Owns a reusable payload buffer and a reusable per-block output
/// buffer; the output buffer is cleared between blocks so that match
/// offsets can never reach into a previous block.
pub struct FrameExtractor {
    payload_buf: Vec<u8>,
    block_out: Vec<u8>,
}

impl FrameExtractor {
    /// Create an extractor.
    pub fn new() -> Self {
        Self {
            payload_buf: Vec::new(),
            block_out: Vec::new(),
        }
    }

    /// Read one frame from `reader`, writing the decoded stream to
    /// `writer`. Fails on any header, block, or checksum violation.
    pub fn extract<R: Read, W: Write>(&mut self, mut reader: R, mut writer: W) -> Result<()> {
        read_header(&mut reader)?;
        let mut pos: u64 = 7;
        let mut content_hasher = Xxh32::new(0);

        loop {
            let mut len_bytes = [0u8; 4];
            read_exact_or_corrupt(&mut reader, &mut len_bytes, pos, "block length")?;
            pos += 4;
            let block_len = u32::from_le_bytes(len_bytes);
            if block_len == 0 {
                break; // end mark
            }

            let passthrough = block_len & UNCOMPRESSED_BIT != 0;
            let payload_len = (block_len & !UNCOMPRESSED_BIT) as usize;
            if payload_len > worst_case_block_length(BLOCK_SIZE) {
                return Err(LzfoldError::corrupted(pos, "block length exceeds maximum"));
            }

            self.payload_buf.resize(payload_len, 0);
            read_exact_or_corrupt(&mut reader, &mut self.payload_buf, pos, "block payload")?;
            pos += payload_len as u64;

            self.block_out.clear();
            if passthrough {
                self.block_out.extend_from_slice(&self.payload_buf);
            } else {
                decompress_block(&self.payload_buf, &mut self.block_out)?;
            }
            if self.block_out.len() > BLOCK_SIZE {
                return Err(LzfoldError::corrupted(pos, "block expands beyond maximum"));
            }

            content_hasher.update(&self.block_out);
            writer.write_all(&self.block_out)?;
        }

        let mut checksum_bytes = [0u8; 4];
        read_exact_or_corrupt(&mut reader, &mut checksum_bytes, pos, "content checksum")?;
        let stored = u32::from_le_bytes(checksum_bytes);
        let computed = content_hasher.digest();
        if stored != computed {
            return Err(LzfoldError::crc_mismatch(stored, computed));
        }

        writer.flush()?;
        Ok(())
    }
}

impl Default for FrameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Read and validate the fixed 7-byte frame header.
fn read_header<R: Read>(reader: &mut R) -> Result<()> {
    let mut header = [0u8; 7];
    read_exact_or_corrupt(reader, &mut header, 0, "frame header")?;

    let magic = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
    if magic != MAGIC {
        return Err(LzfoldError::invalid_magic(
            MAGIC.to_le_bytes(),
            &header[..4],
        ));
    }
    if header[4] != FLG {
        return Err(LzfoldError::invalid_header(format!(
            "unsupported FLG byte {:#04x}",
            header[4]
        )));
    }
    if header[5] != BD {
        return Err(LzfoldError::invalid_header(format!(
            "unsupported BD byte {:#04x}",
            header[5]
        )));
    }
    let expected = header_checksum();
    if header[6] != expected {
        return Err(LzfoldError::crc_mismatch(
            u32::from(header[6]),
            u32::from(expected),
        ));
    }
    Ok(())
}

/// Compress `input` into a complete frame.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    FrameCompressor::new().compress(input, &mut output)?;
    Ok(output)
}

/// Decode one complete frame from `input`.
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    FrameExtractor::new().extract(input, &mut output)?;
    Ok(output)
}
