//! In-memory NID database
//!
//! Three-level index: library -> module -> imported function. Every level is
//! an insertion-ordered map keyed by name, and that first-insertion order is
//! what drives the order of entries in the serialized output. Inserts are
//! first-write-wins: a name seen again keeps the NID it was created with.

use indexmap::IndexMap;
use serde::Serialize;

use crate::stub::Nid;

/// A module's entry in the database.
///
/// `kernel` is always false: the stub corpus carries no kernel/user
/// distinction, but downstream consumers expect the flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    pub nid: Nid,
    pub kernel: bool,
    pub functions: IndexMap<String, Nid>,
}

impl Module {
    fn new(nid: Nid) -> Self {
        Self {
            nid,
            kernel: false,
            functions: IndexMap::new(),
        }
    }
}

/// A library's entry in the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Library {
    pub nid: Nid,
    pub modules: IndexMap<String, Module>,
}

impl Library {
    fn new(nid: Nid) -> Self {
        Self {
            nid,
            modules: IndexMap::new(),
        }
    }
}

/// The aggregate NID database for one run.
///
/// Built once per invocation, populated incrementally during the scan, and
/// read out whole at serialization time. Only grows; there is no removal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NidDatabase {
    libraries: IndexMap<String, Library>,
}

impl NidDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a library unless one with this name already exists.
    ///
    /// An existing entry keeps its NID even when the new one differs.
    pub fn add_library(&mut self, nid: Nid, name: &str) {
        if !self.libraries.contains_key(name) {
            self.libraries.insert(name.to_string(), Library::new(nid));
        }
    }

    /// Insert a module under the named library unless one with this name
    /// already exists there. No-op if the library is absent: a missing
    /// parent never creates entities as a side effect.
    pub fn add_module(&mut self, lib_name: &str, nid: Nid, mod_name: &str) {
        let Some(lib) = self.libraries.get_mut(lib_name) else {
            return;
        };
        if !lib.modules.contains_key(mod_name) {
            lib.modules.insert(mod_name.to_string(), Module::new(nid));
        }
    }

    /// Insert an imported function under the named library/module unless one
    /// with this name already exists there. No-op if either parent is absent.
    pub fn add_import(&mut self, lib_name: &str, mod_name: &str, nid: Nid, imp_name: &str) {
        let Some(lib) = self.libraries.get_mut(lib_name) else {
            return;
        };
        let Some(module) = lib.modules.get_mut(mod_name) else {
            return;
        };
        if !module.functions.contains_key(imp_name) {
            module.functions.insert(imp_name.to_string(), nid);
        }
    }

    /// Look up a library by name
    pub fn library(&self, name: &str) -> Option<&Library> {
        self.libraries.get(name)
    }

    /// Iterate libraries in first-insertion order
    pub fn libraries(&self) -> impl Iterator<Item = (&str, &Library)> {
        self.libraries.iter().map(|(name, lib)| (name.as_str(), lib))
    }

    /// Number of libraries in the database
    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_library_is_idempotent_and_keeps_first_nid() {
        let mut db = NidDatabase::new();
        db.add_library(0x1111, "SceFoo");
        db.add_library(0x2222, "SceFoo");

        assert_eq!(db.len(), 1);
        assert_eq!(db.library("SceFoo").unwrap().nid, 0x1111);
    }

    #[test]
    fn test_add_module_keeps_first_nid() {
        let mut db = NidDatabase::new();
        db.add_library(0x1, "SceFoo");
        db.add_module("SceFoo", 0xAAAA, "SceFoo");
        db.add_module("SceFoo", 0xBBBB, "SceFoo");

        let lib = db.library("SceFoo").unwrap();
        assert_eq!(lib.modules.len(), 1);
        assert_eq!(lib.modules["SceFoo"].nid, 0xAAAA);
    }

    #[test]
    fn test_duplicate_import_keeps_first_nid() {
        let mut db = NidDatabase::new();
        db.add_library(0x1, "SceFoo");
        db.add_module("SceFoo", 0x1, "SceFoo");
        db.add_import("SceFoo", "SceFoo", 0xAAAA, "fooA");
        db.add_import("SceFoo", "SceFoo", 0xBBBB, "fooA");

        let module = &db.library("SceFoo").unwrap().modules["SceFoo"];
        assert_eq!(module.functions.len(), 1);
        assert_eq!(module.functions["fooA"], 0xAAAA);
    }

    #[test]
    fn test_missing_library_makes_module_insert_a_noop() {
        let mut db = NidDatabase::new();
        db.add_module("Nowhere", 0x1, "SceFoo");

        assert!(db.is_empty());
    }

    #[test]
    fn test_missing_parent_makes_import_insert_a_noop() {
        let mut db = NidDatabase::new();
        db.add_import("Nowhere", "Nowhere", 0x1, "fooA");
        assert!(db.is_empty());

        db.add_library(0x1, "SceFoo");
        db.add_import("SceFoo", "Nowhere", 0x1, "fooA");
        assert!(db.library("SceFoo").unwrap().modules.is_empty());
    }

    #[test]
    fn test_iteration_preserves_insertion_order_not_name_order() {
        let mut db = NidDatabase::new();
        db.add_library(0x3, "SceZebra");
        db.add_library(0x1, "SceApple");
        db.add_library(0x2, "SceMango");

        let names: Vec<&str> = db.libraries().map(|(name, _)| name).collect();
        assert_eq!(names, ["SceZebra", "SceApple", "SceMango"]);
    }

    #[test]
    fn test_import_order_preserved_within_module() {
        let mut db = NidDatabase::new();
        db.add_library(0x1, "SceFoo");
        db.add_module("SceFoo", 0x1, "SceFoo");
        db.add_import("SceFoo", "SceFoo", 0x30, "zzz");
        db.add_import("SceFoo", "SceFoo", 0x10, "aaa");
        db.add_import("SceFoo", "SceFoo", 0x20, "mmm");

        let module = &db.library("SceFoo").unwrap().modules["SceFoo"];
        let names: Vec<&String> = module.functions.keys().collect();
        assert_eq!(names, ["zzz", "aaa", "mmm"]);
    }

    #[test]
    fn test_module_kernel_flag_defaults_false() {
        let mut db = NidDatabase::new();
        db.add_library(0x1, "SceFoo");
        db.add_module("SceFoo", 0x1, "SceFoo");

        assert!(!db.library("SceFoo").unwrap().modules["SceFoo"].kernel);
    }
}
