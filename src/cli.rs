//! CLI argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// NID database extractor for PSP2 import stubs
#[derive(Parser, Debug)]
#[command(name = "nidsparser")]
#[command(about = "Extracts NID declarations from generated import stubs into a JSON database")]
#[command(version)]
pub struct Cli {
    /// Root directory of the generated stub tree
    #[arg(value_name = "STUBS_DIR")]
    pub stubs_dir: PathBuf,

    /// Destination path for the serialized database
    #[arg(short, long, value_name = "PATH", default_value = "db.json")]
    pub output: PathBuf,

    /// Suppress per-discovery progress lines
    #[arg(short, long)]
    pub quiet: bool,
}
