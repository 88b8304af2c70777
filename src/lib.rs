//! nidsparser: NID database extractor for PSP2 import stubs
//!
//! Walks a directory tree of generated assembly stub files, pulls the module
//! and imported-function NID declarations out of each one, and writes the
//! aggregate as a nested JSON database (library -> module -> function) with
//! entries in first-discovery order.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use nidsparser::{scan_tree, write_json, NidDatabase};
//!
//! let mut db = NidDatabase::new();
//! scan_tree(Path::new("stubs"), &mut db, true)?;
//! write_json(&db, Path::new("db.json"))?;
//! # Ok::<(), nidsparser::NidError>(())
//! ```

pub mod cli;
pub mod db;
pub mod error;
pub mod output;
pub mod scan;
pub mod stub;

// Re-export commonly used types
pub use cli::Cli;
pub use db::{Library, Module, NidDatabase};
pub use error::{NidError, Result};
pub use output::{encode_json, write_json};
pub use scan::{aggregate, scan_tree};
pub use stub::{records, ImportDecl, ModuleDecl, Nid, StubRecord, IMPORT_MARKER, MODULE_MARKER};
