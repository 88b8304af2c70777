//! Directory traversal and per-file aggregation
//!
//! Walks the stub tree recursively, hands each `.S`/`.s` file's text to the
//! record extractor, and folds the records into the database. Per-file and
//! per-subdirectory failures are reported to stderr and skipped; only a
//! failure to open the root itself aborts the run.

use std::fs;
use std::path::Path;

use crate::db::NidDatabase;
use crate::error::{NidError, Result};
use crate::stub::{records, ModuleDecl, StubRecord};

/// Recursively scan `root` for stub files and fold every declaration into
/// `db`. Progress lines for each discovered module and import go to stdout
/// unless `quiet` is set.
pub fn scan_tree(root: &Path, db: &mut NidDatabase, quiet: bool) -> Result<()> {
    let entries = fs::read_dir(root).map_err(|source| NidError::RootOpen {
        path: root.to_path_buf(),
        source,
    })?;
    visit_entries(entries, db, quiet);
    Ok(())
}

fn visit_entries(entries: fs::ReadDir, db: &mut NidDatabase, quiet: bool) {
    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            eprintln!("Error reading entry type for {}", path.display());
            continue;
        };

        if file_type.is_dir() {
            match fs::read_dir(&path) {
                Ok(sub) => visit_entries(sub, db, quiet),
                // Unreadable subtree: skip it, keep walking siblings.
                Err(e) => eprintln!("Error opening {}: {}", path.display(), e),
            }
        } else if is_stub_file(&path) {
            if let Err(e) = parse_stub_file(&path, db, quiet) {
                eprintln!("{}", e);
            }
        }
    }
}

/// Stub sources carry a `.S` or `.s` extension; the match is case-sensitive,
/// so `.AS` or `.Sx` never qualify.
fn is_stub_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("S") | Some("s")
    )
}

/// Read one stub file and fold its records into the database.
///
/// The contents are decoded lossily: a stray non-UTF-8 byte in a comment
/// must not cost the file its records.
fn parse_stub_file(path: &Path, db: &mut NidDatabase, quiet: bool) -> Result<()> {
    let bytes = fs::read(path).map_err(|source| NidError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    aggregate(&String::from_utf8_lossy(&bytes), db, quiet);
    Ok(())
}

/// Fold one stub file's text into the database.
///
/// The library is keyed by the module's own name, so each distinct module
/// name yields one top-level library holding a single module of the same
/// name; stub files that share a module name merge into that entry. A file
/// whose text yields no module declaration contributes nothing.
pub fn aggregate(text: &str, db: &mut NidDatabase, quiet: bool) {
    let mut module: Option<ModuleDecl> = None;
    for record in records(text) {
        match record {
            StubRecord::Module(decl) => {
                if !quiet {
                    println!("Module name: {:<32} NID: 0x{:08X}", decl.name, decl.nid);
                }
                db.add_library(decl.nid, &decl.name);
                db.add_module(&decl.name, decl.nid, &decl.name);
                module = Some(decl);
            }
            StubRecord::Import(decl) => {
                let Some(owner) = &module else {
                    continue;
                };
                if !quiet {
                    println!("Import name: {:<32} NID: 0x{:08X}", decl.name, decl.nid);
                }
                db.add_import(&owner.name, &owner.name, decl.nid, &decl.name);
            }
        }
    }
}
