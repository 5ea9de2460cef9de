//! Reading, writing and removing the JSON configuration file
//!
//! The file holds the API token. Writes go through a sibling temp file that
//! is renamed into place and, on Unix, readable by the owner only.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{UpdaterError, UpdaterResult};

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> UpdaterError {
    UpdaterError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Parse a JSON file, `None` when it does not exist
pub fn read_json<T: DeserializeOwned>(path: &Path) -> UpdaterResult<Option<T>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(storage_error("open", path, e)),
    };

    serde_json::from_reader(BufReader::new(file))
        .map(Some)
        .map_err(|e| storage_error("parse", path, e))
}

/// Replace `path` with `data` as pretty JSON, private to the owner
pub fn write_json_atomic<T: Serialize>(path: &Path, data: &T) -> UpdaterResult<()> {
    let temp_path = path.with_extension("json.tmp");

    let result = write_private(&temp_path, data).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|e| storage_error("replace", path, e))
    });
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_private<T: Serialize>(path: &Path, data: &T) -> UpdaterResult<()> {
    let file = File::create(path).map_err(|e| storage_error("create", path, e))?;
    restrict_permissions(&file).map_err(|e| storage_error("restrict", path, e))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data).map_err(|e| storage_error("write", path, e))?;
    writer.flush().map_err(|e| storage_error("write", path, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_error("sync", path, e))
}

/// Delete a file; returns false when there was nothing to delete
pub fn remove_file(path: &Path) -> UpdaterResult<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(storage_error("remove", path, e)),
    }
}

#[cfg(unix)]
fn restrict_permissions(file: &File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &File) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Stored {
        token: String,
        budgets: Vec<String>,
    }

    fn stored() -> Stored {
        Stored {
            token: "secret".into(),
            budgets: vec!["b-1".into()],
        }
    }

    #[test]
    fn test_missing_file_reads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let loaded: Option<Stored> = read_json(&temp_dir.path().join("config.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_malformed_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let result: UpdaterResult<Option<Stored>> = read_json(&path);
        assert!(matches!(result, Err(UpdaterError::Storage(msg)) if msg.starts_with("Failed to parse")));
    }

    #[test]
    fn test_write_replaces_and_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "old").unwrap();

        write_json_atomic(&path, &stored()).unwrap();

        assert!(!temp_dir.path().join("config.json.tmp").exists());
        assert_eq!(read_json::<Stored>(&path).unwrap(), Some(stored()));
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("config.json");
        assert!(matches!(
            write_json_atomic(&path, &stored()),
            Err(UpdaterError::Storage(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_written_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        write_json_atomic(&path, &stored()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_remove_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        write_json_atomic(&path, &stored()).unwrap();

        assert!(remove_file(&path).unwrap());
        assert!(!path.exists());
        assert!(!remove_file(&path).unwrap());
    }
}
