//! # lzfold Archive
//!
//! The folder packer behind the lzfold container: regular files are
//! concatenated into a single byte stream of records, each record being
//!
//! ```text
//! name_len:4 LE | content_len:4 LE | name (UTF-8) | md5(header so far):16 | content
//! ```
//!
//! The stream carries no global header or index; entries are read
//! sequentially until the input ends on a record boundary. Compression
//! is someone else's job — the packer neither knows nor cares that the
//! stream usually ends up inside an LZ4 frame.
//!
//! # Example
//!
//! ```no_run
//! use lzfold_archive::{ArchiveReader, ArchiveWriter};
//! use std::fs::File;
//! use std::path::Path;
//!
//! let out = File::create("folder.pack").unwrap();
//! let mut writer = ArchiveWriter::new(out);
//! writer.pack_dir(Path::new("folder")).unwrap();
//! writer.finish().unwrap();
//!
//! let input = File::open("folder.pack").unwrap();
//! let mut reader = ArchiveReader::new(input);
//! reader.unpack(Path::new("restored")).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod header;
mod reader;
mod writer;

pub use header::Entry;
pub use reader::ArchiveReader;
pub use writer::ArchiveWriter;
