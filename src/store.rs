//! Reading and writing the mirror status list.
//!
//! The list is a JSON array of [`Repo`] objects. It is always read in full and
//! written in full. Output is pretty-printed with a configurable indent
//! (tab by default) and ends with a newline so diffs stay readable.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use thiserror::Error;
use tracing::debug;

use crate::record::Repo;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {source_name}")]
    Read {
        source_name: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode repository list from {source_name}")]
    Decode {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode repository list")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write {path}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Decode a status list. A JSON `null` document is an empty list.
pub fn decode<R: Read>(reader: R, source_name: &str) -> Result<Vec<Repo>, StoreError> {
    let repos: Option<Vec<Repo>> =
        serde_json::from_reader(reader).map_err(|source| StoreError::Decode {
            source_name: source_name.to_string(),
            source,
        })?;
    Ok(repos.unwrap_or_default())
}

/// Encode `repos` as an indented JSON array followed by a newline.
pub fn encode<W: Write>(writer: W, repos: &[Repo], indent: &str) -> Result<(), StoreError> {
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = Serializer::with_formatter(writer, formatter);
    repos.serialize(&mut ser)?;
    let mut writer = ser.into_inner();
    writer
        .write_all(b"\n")
        .and_then(|_| writer.flush())
        .map_err(|source| StoreError::Write {
            path: "output".to_string(),
            source,
        })
}

/// Read the status list from `path`, or from stdin when `path` is `None`.
pub fn load(path: Option<&Path>) -> Result<Vec<Repo>, StoreError> {
    match path {
        Some(path) => {
            let name = path.display().to_string();
            let file = File::open(path).map_err(|source| StoreError::Read {
                source_name: name.clone(),
                source,
            })?;
            let repos = decode(BufReader::new(file), &name)?;
            debug!(path = %name, count = repos.len(), "loaded repository list");
            Ok(repos)
        }
        None => {
            let repos = decode(io::stdin().lock(), "stdin")?;
            debug!(count = repos.len(), "loaded repository list from stdin");
            Ok(repos)
        }
    }
}

/// Write the status list to `path`, or to stdout when `path` is `None`.
///
/// File output goes through a temporary file in the destination directory
/// that is renamed into place, so readers see either the old or the new list.
pub fn save(path: Option<&Path>, repos: &[Repo], indent: &str) -> Result<(), StoreError> {
    let Some(path) = path else {
        return encode(io::stdout().lock(), repos, indent);
    };

    let write_err = |source: io::Error| StoreError::Write {
        path: path.display().to_string(),
        source,
    };

    let dir = parent_dir(path);
    let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(write_err)?;
    encode(BufWriter::new(tmp.as_file_mut()), repos, indent)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    debug!(path = %path.display(), count = repos.len(), "saved repository list");
    Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RecordStatus, Status};

    #[test]
    fn test_decode_null_is_empty() {
        let repos = decode("null".as_bytes(), "test").unwrap();
        assert!(repos.is_empty());
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let json = r#"[{"name": "debian", "status": "success", "mirror_url": "x"}]"#;
        let repos = decode(json.as_bytes(), "test").unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].status, Status::Success);
    }

    #[test]
    fn test_decode_keeps_unrecognised_status() {
        let json = r#"[{"name": "debian", "status": "paused", "upstream": null}]"#;
        let repos = decode(json.as_bytes(), "test").unwrap();
        assert_eq!(repos[0].status, RecordStatus::Other("paused".to_string()));
        assert_eq!(repos[0].upstream, "");
    }

    #[test]
    fn test_decode_error_names_source_once() {
        let err = decode("[{\"name\": ".as_bytes(), "test").unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
        assert_eq!(err.to_string(), "failed to decode repository list from test");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_encode_uses_tabs_and_trailing_newline() {
        let mut buf = Vec::new();
        encode(&mut buf, &[Repo::new_master("arch")], "\t").unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("[\n\t{\n\t\t\"name\": \"arch\",\n\t\t\"is_master\": true,"));
        assert!(text.ends_with("}\n]\n"));
    }

    #[test]
    fn test_encode_empty_list() {
        let mut buf = Vec::new();
        encode(&mut buf, &[], "\t").unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "[]\n");
    }

    #[test]
    fn test_save_then_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.json");
        let mut repo = Repo::new_master("alpine");
        repo.set_size(4096);

        save(Some(&path), &[repo.clone()], "  ").unwrap();
        let loaded = load(Some(&path)).unwrap();

        assert_eq!(loaded, vec![repo]);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  {\n    \"name\": \"alpine\""));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(Some(&dir.path().join("absent.json"))).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }
}
