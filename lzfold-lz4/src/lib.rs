//! Simplified LZ4 compression for lzfold.
//!
//! A deliberately small subset of LZ4: a greedy single-hash block codec
//! and a fixed-profile frame container with XXH32 integrity checks.
//!
//! # Features
//!
//! - Block compression/decompression (token + literal + offset wire form)
//! - Frame container: magic, fixed descriptor with header checksum,
//!   length-prefixed blocks, end mark, content checksum
//! - Streaming [`FrameCompressor`]/[`FrameExtractor`] over any
//!   `Read`/`Write` pair with per-frame reusable buffers
//!
//! # Example
//!
//! ```
//! use lzfold_lz4::{compress, decompress};
//!
//! let data = b"Hello, World! Hello, World!";
//! let frame = compress(data).unwrap();
//! let restored = decompress(&frame).unwrap();
//! assert_eq!(restored, data);
//! ```

mod block;
mod frame;
mod table;
pub mod xxhash;

pub use block::{
    BlockEncoder, MAX_BLOCK_INPUT_SIZE, MAX_OFFSET, MFLIMIT, MIN_MATCH, decompress_block,
    worst_case_block_length,
};
pub use frame::{
    BD, BLOCK_SIZE, FLG, FrameCompressor, FrameExtractor, MAGIC, compress, decompress,
};
