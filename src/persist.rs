//! JSON persistence for the person list
//!
//! Saving validates the `.json` extension, registers the target filename in
//! the ignore-list side file, and overwrites the target with a 4-space
//! pretty-printed JSON array. Loading validates extension and existence and
//! returns a fresh list; the caller decides whether to install it.
//!
//! All paths are taken as given and resolve relative to the current working
//! directory.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::person::{Person, PersonStore};

/// Save a snapshot of the store to `path`, overwriting unconditionally.
///
/// The store itself is never mutated. The target filename is appended to
/// `ignore_file` unless already present (see [`register_ignored`]).
pub fn save(path: &str, store: &PersonStore, ignore_file: &str) -> Result<()> {
    ensure_json_extension(path)?;

    register_ignored(ignore_file, path)?;

    let snapshot: Vec<Person> = store.all().to_vec();
    let json = to_pretty_json(&snapshot)?;

    fs::write(path, json).map_err(|e| Error::IoWrite {
        path: path.into(),
        source: e,
    })?;

    debug!(path, entries = snapshot.len(), "Person list saved");
    Ok(())
}

/// Load a person list from `path`.
///
/// Returns the parsed list on success; the caller replaces its store with it.
/// On any failure the caller's current list must stay untouched — this
/// function never observes it.
pub fn load(path: &str) -> Result<Vec<Person>> {
    ensure_json_extension(path)?;

    if !Path::new(path).exists() {
        return Err(Error::file_not_found(path));
    }

    let content = fs::read_to_string(path).map_err(|e| Error::IoRead {
        path: path.into(),
        source: e,
    })?;

    let people: Vec<Person> =
        serde_json::from_str(&content).map_err(|e| Error::parse(path, e.to_string()))?;

    debug!(path, entries = people.len(), "Person list loaded");
    Ok(people)
}

/// Validate that the substring after the first `.` is exactly `json`.
///
/// A path with no dot fails the same way; `archive.json.bak` fails because
/// the whole suffix `json.bak` is checked, not the last segment.
fn ensure_json_extension(path: &str) -> Result<()> {
    match path.split_once('.') {
        Some((_, "json")) => Ok(()),
        _ => Err(Error::invalid_extension(path)),
    }
}

/// Record `file_name` in the ignore-list file, creating the file if absent.
///
/// Membership is a substring check against the whole file content, so a
/// filename contained in an existing line is treated as already present.
fn register_ignored(ignore_file: &str, file_name: &str) -> Result<()> {
    let ignore_path = Path::new(ignore_file);
    if !ignore_path.exists() {
        fs::write(ignore_path, "").map_err(|e| Error::IoWrite {
            path: ignore_path.to_path_buf(),
            source: e,
        })?;
    }

    let content = fs::read_to_string(ignore_path).map_err(|e| Error::IoRead {
        path: ignore_path.to_path_buf(),
        source: e,
    })?;

    if !content.contains(file_name) {
        let mut file = OpenOptions::new()
            .append(true)
            .open(ignore_path)
            .map_err(|e| Error::IoWrite {
                path: ignore_path.to_path_buf(),
                source: e,
            })?;
        writeln!(file, "{file_name}").map_err(|e| Error::IoWrite {
            path: ignore_path.to_path_buf(),
            source: e,
        })?;
        debug!(ignore_file, file_name, "Filename registered in ignore list");
    }

    Ok(())
}

/// Serialize with 4-space indentation, non-ASCII characters literal.
fn to_pretty_json(people: &[Person]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    serde::Serialize::serialize(&people, &mut serializer).map_err(|e| Error::Serialize {
        message: e.to_string(),
    })?;
    String::from_utf8(buf).map_err(|e| Error::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date;
    use crate::error::ErrorCode;

    fn person(name: &str, phone: &str, birth: &str) -> Person {
        Person {
            name: name.to_string(),
            phone: phone.to_string(),
            birth: date::parse_date(birth).unwrap(),
        }
    }

    fn store_with(people: Vec<Person>) -> PersonStore {
        let mut store = PersonStore::new();
        store.replace(people);
        store
    }

    // Dot-free tempdir so absolute paths survive the first-dot extension check
    fn tempdir() -> tempfile::TempDir {
        tempfile::Builder::new()
            .prefix("kartoteka")
            .tempdir()
            .unwrap()
    }

    #[test]
    fn test_extension_check() {
        assert!(ensure_json_extension("people.json").is_ok());
        assert!(ensure_json_extension("foo.txt").is_err());
        assert!(ensure_json_extension("nodot").is_err());
        // Suffix after the first dot is checked whole
        assert!(ensure_json_extension("archive.json.bak").is_err());
    }

    #[test]
    fn test_save_rejects_wrong_extension_without_fs_touch() {
        let dir = tempdir();
        let target = dir.path().join("people.txt");
        let ignore = dir.path().join("ignore");

        let err = save(
            target.to_str().unwrap(),
            &store_with(vec![person("Ivanov Ivan", "111", "15.03.1990")]),
            ignore.to_str().unwrap(),
        )
        .unwrap_err();

        assert_eq!(err.code(), ErrorCode::InvalidExtension);
        assert!(!target.exists());
        assert!(!ignore.exists());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempdir();
        let target = dir.path().join("people.json");
        let ignore = dir.path().join("ignore");

        let people = vec![
            person("Иванов Иван", "111", "15.03.1990"),
            person("Петров Пётр", "222", "20.03.1991"),
        ];
        let store = store_with(people.clone());

        save(target.to_str().unwrap(), &store, ignore.to_str().unwrap()).unwrap();
        let loaded = load(target.to_str().unwrap()).unwrap();

        assert_eq!(loaded, people);
        // The store was not touched by saving
        assert_eq!(store.all(), people.as_slice());
    }

    #[test]
    fn test_save_load_empty_list() {
        let dir = tempdir();
        let target = dir.path().join("people.json");
        let ignore = dir.path().join("ignore");

        save(
            target.to_str().unwrap(),
            &PersonStore::new(),
            ignore.to_str().unwrap(),
        )
        .unwrap();

        assert_eq!(load(target.to_str().unwrap()).unwrap(), Vec::<Person>::new());
    }

    #[test]
    fn test_save_output_format() {
        let dir = tempdir();
        let target = dir.path().join("people.json");
        let ignore = dir.path().join("ignore");

        let store = store_with(vec![person("Иванов Иван", "111", "15.03.1990")]);
        save(target.to_str().unwrap(), &store, ignore.to_str().unwrap()).unwrap();

        let content = fs::read_to_string(&target).unwrap();
        // 4-space indentation, literal non-ASCII, dotted date
        assert!(content.contains("    \"name\": \"Иванов Иван\""));
        assert!(content.contains("\"pnumber\": \"111\""));
        assert!(content.contains("\"birth\": \"15.03.1990\""));
        assert!(!content.contains("\\u"));
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = tempdir();
        let target = dir.path().join("people.json");
        let ignore = dir.path().join("ignore");

        fs::write(&target, "stale").unwrap();
        save(
            target.to_str().unwrap(),
            &PersonStore::new(),
            ignore.to_str().unwrap(),
        )
        .unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "[]");
    }

    #[test]
    fn test_ignore_file_created_and_appended_once() {
        let dir = tempdir();
        let target = dir.path().join("people.json");
        let ignore = dir.path().join("ignore");
        let store = PersonStore::new();

        save(target.to_str().unwrap(), &store, ignore.to_str().unwrap()).unwrap();
        save(target.to_str().unwrap(), &store, ignore.to_str().unwrap()).unwrap();

        let content = fs::read_to_string(&ignore).unwrap();
        assert_eq!(
            content.matches(target.to_str().unwrap()).count(),
            1,
            "filename must be registered exactly once"
        );
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn test_ignore_containment_is_whole_file_substring() {
        let dir = tempdir();
        let ignore = dir.path().join("ignore");
        // A line that merely contains the filename suppresses the append
        fs::write(&ignore, "backup-people.json-old\n").unwrap();

        register_ignored(ignore.to_str().unwrap(), "people.json").unwrap();

        let content = fs::read_to_string(&ignore).unwrap();
        assert_eq!(content, "backup-people.json-old\n");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir();
        let target = dir.path().join("missing.json");

        let err = load(target.to_str().unwrap()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::FileNotFound);
    }

    #[test]
    fn test_load_wrong_extension() {
        let err = load("people.txt").unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidExtension);
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = tempdir();
        let target = dir.path().join("people.json");
        fs::write(&target, "{not json").unwrap();

        let err = load(target.to_str().unwrap()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ParseError);
    }

    #[test]
    fn test_load_missing_keys() {
        let dir = tempdir();
        let target = dir.path().join("people.json");
        fs::write(&target, r#"[{"name": "Ivanov Ivan"}]"#).unwrap();

        let err = load(target.to_str().unwrap()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ParseError);
    }

    #[test]
    fn test_load_bad_date_text() {
        let dir = tempdir();
        let target = dir.path().join("people.json");
        fs::write(
            &target,
            r#"[{"name": "Ivanov Ivan", "pnumber": "111", "birth": "30.02.1990"}]"#,
        )
        .unwrap();

        let err = load(target.to_str().unwrap()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ParseError);
    }
}
