//! Error types for lzfold operations.
//!
//! One error type covers every layer: I/O failures at the stream
//! boundaries, format violations found while decoding a frame or an
//! archive record, and checksum mismatches.

use std::io;
use thiserror::Error;

/// The main error type for lzfold operations.
#[derive(Debug, Error)]
pub enum LzfoldError {
    /// I/O error from an underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid magic number in a frame header.
    #[error("Invalid magic number: expected {expected:02x?}, found {found:02x?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: Vec<u8>,
        /// Actual magic bytes found.
        found: Vec<u8>,
    },

    /// Invalid or unsupported header field.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header error.
        message: String,
    },

    /// Checksum mismatch (frame descriptor or content).
    #[error("Checksum mismatch: expected {expected:#x}, computed {computed:#x}")]
    CrcMismatch {
        /// Expected checksum value from the stream.
        expected: u32,
        /// Computed checksum value from the data.
        computed: u32,
    },

    /// Corrupted data in a block or record.
    #[error("Corrupted data at offset {offset}: {message}")]
    CorruptedData {
        /// Byte offset where corruption was detected.
        offset: u64,
        /// Description of the corruption.
        message: String,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of input: expected {expected} more bytes")]
    UnexpectedEof {
        /// Number of bytes that were expected but not available.
        expected: usize,
    },

    /// Input exceeds a format limit.
    #[error("Input too large: {size} bytes exceeds limit of {limit}")]
    InputTooLarge {
        /// The offending input size.
        size: usize,
        /// The format limit.
        limit: usize,
    },

    /// Path traversal attempt detected (e.g. "../" in an entry name).
    #[error("Path traversal detected in entry: {path}")]
    PathTraversal {
        /// The suspicious path.
        path: String,
    },

    /// Encoding error (e.g. a non-UTF-8 file name).
    #[error("Encoding error: {message}")]
    EncodingError {
        /// Description of the encoding error.
        message: String,
    },
}

/// Result type alias for lzfold operations.
pub type Result<T> = std::result::Result<T, LzfoldError>;

impl LzfoldError {
    /// Create an invalid magic error.
    pub fn invalid_magic(expected: impl Into<Vec<u8>>, found: impl Into<Vec<u8>>) -> Self {
        Self::InvalidMagic {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create a checksum mismatch error.
    pub fn crc_mismatch(expected: u32, computed: u32) -> Self {
        Self::CrcMismatch { expected, computed }
    }

    /// Create a corrupted data error.
    pub fn corrupted(offset: u64, message: impl Into<String>) -> Self {
        Self::CorruptedData {
            offset,
            message: message.into(),
        }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(expected: usize) -> Self {
        Self::UnexpectedEof { expected }
    }

    /// Create an input too large error.
    pub fn input_too_large(size: usize, limit: usize) -> Self {
        Self::InputTooLarge { size, limit }
    }

    /// Create a path traversal error.
    pub fn path_traversal(path: impl Into<String>) -> Self {
        Self::PathTraversal { path: path.into() }
    }

    /// Create an encoding error.
    pub fn encoding_error(message: impl Into<String>) -> Self {
        Self::EncodingError {
            message: message.into(),
        }
    }
}
