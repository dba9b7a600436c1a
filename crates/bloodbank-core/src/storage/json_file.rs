//! JSON file storage backend.
//!
//! The document lives in one UTF-8 JSON file. Every write goes through
//! [`crate::fs::write_atomic`], so the file is replaced in one rename.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{BloodBankError, Result};
use crate::storage::traits::StorageBackend;

/// File-backed storage for the blood bank document.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for JsonFileBackend {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(BloodBankError::Storage(format!(
                "Failed to read {}: {}",
                self.path.display(),
                err
            ))),
        }
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        crate::fs::write_atomic(&self.path, bytes).map_err(|e| {
            BloodBankError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "document persisted");
        Ok(())
    }

    fn quarantine(&self, stamp: &str) -> Result<String> {
        let filename = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| BloodBankError::Storage("Invalid data filename".to_string()))?;
        let backup = self
            .path
            .with_file_name(format!("{}.corrupt-{}", filename, stamp));
        // Plain rename: on failure the original must stay where it is.
        fs::rename(&self.path, &backup).map_err(|e| {
            BloodBankError::Storage(format!(
                "Failed to move unreadable {} aside to {}: {}",
                self.path.display(),
                backup.display(),
                e
            ))
        })?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            crate::fs::sync_dir(parent)?;
        }
        Ok(backup.display().to_string())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_reads_as_none() {
        let dir = tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("data.json"));
        assert!(backend.read().unwrap().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("data.json"));
        backend.write(b"{\"logs\":[]}").unwrap();
        assert_eq!(backend.read().unwrap().unwrap(), b"{\"logs\":[]}".to_vec());
    }

    #[test]
    fn test_quarantine_moves_file_aside() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "not json").unwrap();
        let backend = JsonFileBackend::new(&path);

        let backup = backend.quarantine("20250101120000").unwrap();

        assert!(!path.exists());
        assert!(backup.ends_with("data.json.corrupt-20250101120000"));
        assert_eq!(fs::read_to_string(&backup).unwrap(), "not json");
    }

    #[test]
    fn test_failed_quarantine_keeps_original() {
        let dir = tempdir().unwrap();
        // Fits in NAME_MAX, but the ".corrupt-<stamp>" suffix pushes it over.
        let path = dir.path().join(format!("{}.json", "d".repeat(240)));
        fs::write(&path, "{ not json").unwrap();
        let backend = JsonFileBackend::new(&path);

        let result = backend.quarantine("20250101120000");

        assert!(matches!(result, Err(BloodBankError::Storage(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }
}
