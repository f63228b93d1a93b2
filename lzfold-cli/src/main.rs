//! lzfold CLI - pack a folder into a single LZ4-framed archive file.

mod commands;

use clap::{ArgGroup, Parser};
use commands::{cmd_compress, cmd_extract};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lzfold")]
#[command(
    author,
    version,
    about = "Compress a folder into a single LZ4-framed archive"
)]
#[command(long_about = "
lzfold packs a directory's regular files into one record stream and
compresses that stream with a simplified LZ4 frame codec.

Examples:
  lzfold -c project.lz4r project
  lzfold -x project.lz4r
")]
#[command(group = ArgGroup::new("mode").required(true).args(["compress", "extract"]))]
struct Cli {
    /// Compress DIR into ARCHIVE
    #[arg(short = 'c', value_name = "ARCHIVE", requires = "dir")]
    compress: Option<PathBuf>,

    /// Extract ARCHIVE into the current directory
    #[arg(short = 'x', value_name = "ARCHIVE", conflicts_with = "dir")]
    extract: Option<PathBuf>,

    /// Directory to compress (with -c)
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Overwrite an existing archive without asking
    #[arg(short, long)]
    force: bool,
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match (cli.compress, cli.dir, cli.extract) {
        (Some(archive), Some(dir), None) => cmd_compress(&archive, &dir, cli.force),
        (None, None, Some(archive)) => cmd_extract(&archive),
        _ => Err("exactly one of `-c <ARCHIVE> <DIR>` or `-x <ARCHIVE>` is required".into()),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
