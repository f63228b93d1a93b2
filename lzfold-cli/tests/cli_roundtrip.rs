//! End-to-end runs of the built `lzfold` binary.

use std::fs;
use std::process::Command;

fn lzfold() -> Command {
    Command::new(env!("CARGO_BIN_EXE_lzfold"))
}

#[test]
fn test_compress_then_extract_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let work = tempfile::tempdir()?;
    let src_dir = work.path().join("project");
    fs::create_dir_all(src_dir.join("sub"))?;
    fs::write(src_dir.join("a.txt"), b"alpha alpha alpha alpha alpha")?;
    fs::write(src_dir.join("sub").join("b.bin"), vec![0x5Au8; 4096])?;

    let archive = work.path().join("project.lz4r");
    let status = lzfold().arg("-c").arg(&archive).arg(&src_dir).status()?;
    assert!(status.success());
    assert!(archive.is_file());

    let out_dir = work.path().join("out");
    fs::create_dir_all(&out_dir)?;
    let status = lzfold().arg("-x").arg(&archive).current_dir(&out_dir).status()?;
    assert!(status.success());

    assert_eq!(
        fs::read(out_dir.join("project").join("a.txt"))?,
        b"alpha alpha alpha alpha alpha"
    );
    assert_eq!(
        fs::read(out_dir.join("project").join("sub").join("b.bin"))?,
        vec![0x5Au8; 4096]
    );
    Ok(())
}

#[test]
fn test_force_overwrites_existing_archive() -> Result<(), Box<dyn std::error::Error>> {
    let work = tempfile::tempdir()?;
    let src_dir = work.path().join("data");
    fs::create_dir_all(&src_dir)?;
    fs::write(src_dir.join("f"), b"contents")?;

    let archive = work.path().join("data.lz4r");
    fs::write(&archive, b"stale bytes")?;

    let status = lzfold()
        .arg("--force")
        .arg("-c")
        .arg(&archive)
        .arg(&src_dir)
        .status()?;
    assert!(status.success());
    assert_ne!(fs::read(&archive)?, b"stale bytes");
    Ok(())
}

#[test]
fn test_extract_rejects_garbage() -> Result<(), Box<dyn std::error::Error>> {
    let work = tempfile::tempdir()?;
    let bogus = work.path().join("bogus.lz4r");
    fs::write(&bogus, b"this is not a frame at all")?;

    let status = lzfold().arg("-x").arg(&bogus).current_dir(work.path()).status()?;
    assert!(!status.success());
    Ok(())
}

#[test]
fn test_compress_rejects_missing_dir() -> Result<(), Box<dyn std::error::Error>> {
    let work = tempfile::tempdir()?;
    let archive = work.path().join("out.lz4r");

    let status = lzfold()
        .arg("-c")
        .arg(&archive)
        .arg(work.path().join("no-such-dir"))
        .status()?;
    assert!(!status.success());
    assert!(!archive.exists());
    Ok(())
}

#[test]
fn test_mode_is_required() -> Result<(), Box<dyn std::error::Error>> {
    let status = lzfold().status()?;
    assert!(!status.success());
    Ok(())
}
