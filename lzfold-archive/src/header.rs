//! Record headers for the archive stream.

use lzfold_core::error::{LzfoldError, Result};
use md5::{Digest, Md5};
use std::io::{self, Read};

/// Longest accepted entry name, in bytes. A name length above this in an
/// incoming stream is treated as corruption rather than honored with a
/// giant allocation.
const MAX_NAME_LEN: usize = 65535;

/// Metadata for one archived file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Slash-separated path of the file inside the archive.
    pub name: String,
    /// Content length in bytes.
    pub size: u32,
}

/// Serialize a record header: both length fields, the name, and the MD5
/// of everything written so far.
pub(crate) fn encode_header(name: &str, size: u32) -> Vec<u8> {
    let name_bytes = name.as_bytes();
    let mut header = Vec::with_capacity(8 + name_bytes.len() + 16);
    header.extend_from_slice(&(name_bytes.len() as u32).to_le_bytes());
    header.extend_from_slice(&size.to_le_bytes());
    header.extend_from_slice(name_bytes);
    let digest = Md5::digest(&header);
    header.extend_from_slice(digest.as_slice());
    header
}

/// Read the next record header.
///
/// Returns `Ok(None)` when the stream ends exactly on a record boundary;
/// any partial header is an error.
pub(crate) fn read_header<R: Read>(reader: &mut R) -> Result<Option<Entry>> {
    // The first field doubles as the end-of-archive probe.
    let mut name_len_bytes = [0u8; 4];
    match fill(reader, &mut name_len_bytes)? {
        0 => return Ok(None),
        4 => {}
        n => return Err(LzfoldError::unexpected_eof(4 - n)),
    }

    let mut size_bytes = [0u8; 4];
    read_field(reader, &mut size_bytes)?;

    let name_len = u32::from_le_bytes(name_len_bytes) as usize;
    if name_len == 0 || name_len > MAX_NAME_LEN {
        return Err(LzfoldError::invalid_header(format!(
            "implausible entry name length {name_len}"
        )));
    }
    let mut name_bytes = vec![0u8; name_len];
    read_field(reader, &mut name_bytes)?;

    let mut stored = [0u8; 16];
    read_field(reader, &mut stored)?;

    let mut hasher = Md5::new();
    hasher.update(name_len_bytes);
    hasher.update(size_bytes);
    hasher.update(&name_bytes);
    if hasher.finalize().as_slice() != stored.as_slice() {
        return Err(LzfoldError::invalid_header(
            "entry header checksum mismatch",
        ));
    }

    let name = String::from_utf8(name_bytes)
        .map_err(|_| LzfoldError::encoding_error("entry name is not valid UTF-8"))?;

    Ok(Some(Entry {
        name,
        size: u32::from_le_bytes(size_bytes),
    }))
}

/// `read_exact` that reports a premature end of input as a format-level
/// [`LzfoldError::UnexpectedEof`].
fn read_field<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    let len = buf.len();
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            LzfoldError::unexpected_eof(len)
        } else {
            LzfoldError::Io(e)
        }
    })
}

/// Fill `buf` as far as the input allows; returns the byte count.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
