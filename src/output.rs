//! JSON serialization of the NID database
//!
//! Renders library -> module -> function nesting with entries in
//! first-insertion order at every level and NIDs as unsigned decimal.
//! Output is tab-indented valid JSON, rewritten in full on every run.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::db::NidDatabase;
use crate::error::{NidError, Result};

/// Render the database to a JSON string (trailing newline included).
pub fn encode_json(db: &NidDatabase) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    db.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write the database as JSON to `path`, replacing any previous artifact.
pub fn write_json(db: &NidDatabase, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| NidError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    let mut ser =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"\t"));
    db.serialize(&mut ser)?;

    writer
        .write_all(b"\n")
        .and_then(|_| writer.flush())
        .map_err(|source| NidError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_db() -> NidDatabase {
        let mut db = NidDatabase::new();
        db.add_library(0x11111111, "SceFoo");
        db.add_module("SceFoo", 0x11111111, "SceFoo");
        db.add_import("SceFoo", "SceFoo", 0x22222222, "fooA");
        db.add_import("SceFoo", "SceFoo", 0x33333333, "fooB");
        db
    }

    #[test]
    fn test_encode_matches_expected_nesting() {
        let expected = "{
\t\"SceFoo\": {
\t\t\"nid\": 286331153,
\t\t\"modules\": {
\t\t\t\"SceFoo\": {
\t\t\t\t\"nid\": 286331153,
\t\t\t\t\"kernel\": false,
\t\t\t\t\"functions\": {
\t\t\t\t\t\"fooA\": 572662306,
\t\t\t\t\t\"fooB\": 858993459
\t\t\t\t}
\t\t\t}
\t\t}
\t}
}
";
        assert_eq!(encode_json(&sample_db()).unwrap(), expected);
    }

    #[test]
    fn test_encode_is_valid_json_with_no_trailing_separators() {
        let text = encode_json(&sample_db()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).expect("output must parse");
        assert_eq!(value["SceFoo"]["modules"]["SceFoo"]["kernel"], false);
        assert_eq!(
            value["SceFoo"]["modules"]["SceFoo"]["functions"]["fooA"],
            0x22222222u32
        );
    }

    #[test]
    fn test_nids_render_as_unsigned_decimal() {
        let mut db = NidDatabase::new();
        db.add_library(0xFFFFFFFF, "SceMax");
        let text = encode_json(&db).unwrap();
        assert!(text.contains("\"nid\": 4294967295"));
        assert!(!text.contains("-1"));
    }

    #[test]
    fn test_empty_database_encodes_as_empty_object() {
        assert_eq!(encode_json(&NidDatabase::new()).unwrap(), "{}\n");
    }

    #[test]
    fn test_output_key_order_follows_insertion_order() {
        let mut db = NidDatabase::new();
        db.add_library(0x2, "SceZebra");
        db.add_library(0x1, "SceApple");
        let text = encode_json(&db).unwrap();

        // preserve_order keeps object keys in document order when re-parsed.
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["SceZebra", "SceApple"]);
    }

    #[test]
    fn test_write_json_overwrites_previous_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");

        std::fs::write(&path, "stale contents").unwrap();
        write_json(&sample_db(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, encode_json(&sample_db()).unwrap());
    }
}
