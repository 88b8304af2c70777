//! nidsparser CLI entry point

use std::process::ExitCode;

use clap::Parser;

use nidsparser::{scan_tree, write_json, Cli, NidDatabase};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run() -> nidsparser::Result<()> {
    let cli = Cli::parse();

    let mut db = NidDatabase::new();
    scan_tree(&cli.stubs_dir, &mut db, cli.quiet)?;
    write_json(&db, &cli.output)?;

    Ok(())
}
