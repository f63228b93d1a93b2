//! # lzfold Core
//!
//! Core components shared by the lzfold crates:
//!
//! - [`bytes`]: fixed little-endian reads/writes over byte buffers
//! - [`error`]: the common error type
//!
//! ## Architecture
//!
//! lzfold is a layered workspace:
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │ lzfold-cli      -c / -x two-mode tool          │
//! ├────────────────────────────────────────────────┤
//! │ lzfold-archive  record-stream folder packer    │
//! ├────────────────────────────────────────────────┤
//! │ lzfold-lz4      block codec + frame container  │
//! ├────────────────────────────────────────────────┤
//! │ lzfold-core     bytes + errors (this crate)    │
//! └────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bytes;
pub mod error;

// Re-exports for convenience
pub use bytes::{read_u32_le, write_u16_le, write_u32_le};
pub use error::{LzfoldError, Result};
