//! Stub file record extraction
//!
//! Generated PSP2 import stubs declare one module per file through two
//! textual markers: `PSP2_IMPORT_HEAD` carries the module's NID and name,
//! and each `PSP2_IMPORT_FUNC` line after it carries one imported function.
//! This module turns raw stub text into structured records without touching
//! the filesystem.

/// Marker introducing a module declaration.
pub const MODULE_MARKER: &str = "PSP2_IMPORT_HEAD";

/// Marker introducing an import declaration.
pub const IMPORT_MARKER: &str = "PSP2_IMPORT_FUNC";

/// 32-bit numeric identifier used by the firmware's import/export scheme.
/// Opaque: formatted but never computed with.
pub type Nid = u32;

/// Module declaration parsed from a `PSP2_IMPORT_HEAD` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDecl {
    pub nid: Nid,
    pub name: String,
}

/// Import declaration parsed from a `PSP2_IMPORT_FUNC` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    pub nid: Nid,
    pub name: String,
}

/// One extracted record, in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubRecord {
    Module(ModuleDecl),
    Import(ImportDecl),
}

/// Lazily extract the records of one stub file's text.
///
/// Yields at most one [`StubRecord::Module`] (the first module marker in the
/// text), then one [`StubRecord::Import`] per import marker found after it.
/// A file without a module marker yields nothing: import scanning only
/// starts past the module marker's position.
pub fn records(text: &str) -> Records<'_> {
    Records {
        text,
        pos: 0,
        seen_module: false,
        done: false,
    }
}

/// Iterator over the records of one stub file. See [`records`].
pub struct Records<'a> {
    text: &'a str,
    pos: usize,
    seen_module: bool,
    done: bool,
}

impl Iterator for Records<'_> {
    type Item = StubRecord;

    fn next(&mut self) -> Option<StubRecord> {
        if self.done {
            return None;
        }

        if !self.seen_module {
            let Some(off) = self.text[self.pos..].find(MODULE_MARKER) else {
                self.done = true;
                return None;
            };
            let at = self.pos + off;
            self.pos = at + MODULE_MARKER.len();
            self.seen_module = true;
            match parse_module_line(line_at(self.text, at)) {
                Some(decl) => return Some(StubRecord::Module(decl)),
                None => {
                    // Without a usable module declaration the file's imports
                    // have nothing to attach to.
                    self.done = true;
                    return None;
                }
            }
        }

        loop {
            let Some(off) = self.text[self.pos..].find(IMPORT_MARKER) else {
                self.done = true;
                return None;
            };
            let at = self.pos + off;
            self.pos = at + IMPORT_MARKER.len();
            if let Some(decl) = parse_import_line(line_at(self.text, at)) {
                return Some(StubRecord::Import(decl));
            }
            // Malformed import payload: drop the record, keep scanning.
        }
    }
}

/// Slice from `start` to the end of that line (exclusive of the newline).
fn line_at(text: &str, start: usize) -> &str {
    match text[start..].find('\n') {
        Some(off) => &text[start..start + off],
        None => &text[start..],
    }
}

/// Parse a module-declaration line: `PSP2_IMPORT_HEAD <nid>, <name>, ...`
///
/// The name runs from the field after the NID up to the next comma.
fn parse_module_line(line: &str) -> Option<ModuleDecl> {
    let mut parts = line.splitn(3, ',');
    let head = parts.next()?;
    let name = parts.next()?.trim();
    let nid = parse_nid(head.split_whitespace().nth(1)?)?;
    if name.is_empty() {
        return None;
    }
    Some(ModuleDecl {
        nid,
        name: name.to_string(),
    })
}

/// Parse an import-declaration line:
/// `PSP2_IMPORT_FUNC <lib>, <ver>, <flags>, <nid>, <name>`
///
/// Three whitespace-delimited fields sit between the marker and the NID;
/// the name is the whitespace-delimited field after the NID.
fn parse_import_line(line: &str) -> Option<ImportDecl> {
    let mut fields = line.split_whitespace();
    let nid = parse_nid(fields.nth(4)?)?;
    let name = fields.next()?.trim_end_matches(',');
    if name.is_empty() {
        return None;
    }
    Some(ImportDecl {
        nid,
        name: name.to_string(),
    })
}

/// Parse a hex NID field, tolerating an `0x`/`0X` prefix and the trailing
/// comma the stub syntax leaves on every field.
fn parse_nid(field: &str) -> Option<Nid> {
    let tok = field.trim_end_matches(',');
    let hex = tok
        .strip_prefix("0x")
        .or_else(|| tok.strip_prefix("0X"))
        .unwrap_or(tok);
    if hex.is_empty() {
        return None;
    }
    Nid::from_str_radix(hex, 16).ok()
}
