//! Command implementations for the lzfold CLI.
//!
//! Both commands stage the intermediate record stream in an unnamed
//! temporary file, so the codec always sees a plain byte stream and the
//! packer never learns about compression.

use dialoguer::Confirm;
use lzfold_archive::{ArchiveReader, ArchiveWriter};
use lzfold_lz4::{FrameCompressor, FrameExtractor};
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter, Seek, SeekFrom};
use std::path::Path;

pub fn cmd_compress(archive: &Path, dir: &Path, force: bool) -> Result<(), Box<dyn Error>> {
    if !dir.is_dir() {
        return Err(format!("{} does not exist or is not a directory", dir.display()).into());
    }
    if archive.exists() && !force {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", archive.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            return Ok(());
        }
    }

    println!(
        "Compressing {} to {}, please wait...",
        dir.display(),
        archive.display()
    );

    let mut staged = tempfile::tempfile()?;
    let mut writer = ArchiveWriter::new(BufWriter::new(&mut staged));
    writer.pack_dir(dir)?;
    writer.finish()?;
    staged.seek(SeekFrom::Start(0))?;

    let output = File::create(archive)?;
    FrameCompressor::new().compress(BufReader::new(staged), BufWriter::new(output))?;

    println!(
        "Successfully compressed {} to {}",
        dir.display(),
        archive.display()
    );
    Ok(())
}

pub fn cmd_extract(archive: &Path) -> Result<(), Box<dyn Error>> {
    if !archive.is_file() {
        return Err(format!("{} does not exist or is not a file", archive.display()).into());
    }

    println!("Extracting {}, please wait...", archive.display());

    let input = File::open(archive)?;
    let mut staged = tempfile::tempfile()?;
    FrameExtractor::new().extract(BufReader::new(input), BufWriter::new(&mut staged))?;
    staged.seek(SeekFrom::Start(0))?;

    let mut reader = ArchiveReader::new(BufReader::new(staged));
    reader.unpack(Path::new("."))?;

    println!(
        "Successfully extracted {} to the current directory",
        archive.display()
    );
    Ok(())
}
