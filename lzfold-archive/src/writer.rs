//! Packing a folder into the record stream.

use crate::header::encode_header;
use lzfold_core::error::{LzfoldError, Result};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Streaming chunk size for file contents.
const COPY_BUF_SIZE: usize = 4 * (1 << 20);

/// Sequential archive writer.
///
/// Appends `(header, content)` records to the underlying stream. Use
/// [`pack_dir`](Self::pack_dir) for whole folders or
/// [`append_path`](Self::append_path) for individual files.
pub struct ArchiveWriter<W: Write> {
    writer: W,
    buf: Vec<u8>,
}

impl<W: Write> ArchiveWriter<W> {
    /// Create a writer over `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buf: vec![0; COPY_BUF_SIZE],
        }
    }

    /// Pack every regular file under `dir`.
    ///
    /// Entry names are rooted at the directory's own name and use
    /// forward slashes; traversal is sorted so identical trees always
    /// produce identical archives. Directories themselves, symlinks and
    /// other non-regular files are skipped.
    pub fn pack_dir(&mut self, dir: &Path) -> Result<()> {
        let prefix = dir.file_name().map(PathBuf::from).unwrap_or_default();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(dir)
                .map_err(|_| walk_escape_error(entry.path()))?;
            let name = entry_name(&prefix.join(rel))?;
            self.append_path(&name, entry.path())?;
        }
        Ok(())
    }

    /// Append one file as a record named `name`.
    pub fn append_path(&mut self, name: &str, path: &Path) -> Result<()> {
        let len = std::fs::metadata(path)?.len();
        let size = u32::try_from(len)
            .map_err(|_| LzfoldError::input_too_large(len as usize, u32::MAX as usize))?;

        let mut file = File::open(path)?;
        self.writer.write_all(&encode_header(name, size))?;

        let mut remaining = u64::from(size);
        while remaining > 0 {
            let want = remaining.min(self.buf.len() as u64) as usize;
            file.read_exact(&mut self.buf[..want])?;
            self.writer.write_all(&self.buf[..want])?;
            remaining -= want as u64;
        }
        Ok(())
    }

    /// Flush and return the underlying stream.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

fn walk_escape_error(path: &Path) -> LzfoldError {
    LzfoldError::Io(io::Error::other(format!(
        "walked path {} escapes the packed directory",
        path.display()
    )))
}

/// Flatten a relative path into a slash-separated UTF-8 entry name.
fn entry_name(path: &Path) -> Result<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str().ok_or_else(|| {
                LzfoldError::encoding_error(format!("path {} is not valid UTF-8", path.display()))
            })?),
            Component::CurDir => {}
            _ => return Err(LzfoldError::path_traversal(path.display().to_string())),
        }
    }
    if parts.is_empty() {
        return Err(LzfoldError::invalid_header("empty entry name"));
    }
    Ok(parts.join("/"))
}
