//! JsonFileStore - one pretty-printed JSON file per artifact.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{Artifact, Store};
use crate::error::StoreError;

/// File-backed store.
///
/// Saves write a temporary file next to the target and rename it into place,
/// so readers see either the previous document or the new one.
pub struct JsonFileStore<T> {
    path: PathBuf,
    _artifact: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _artifact: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl<T: Artifact> JsonFileStore<T> {
    fn malformed(&self, source: serde_json::Error) -> StoreError {
        StoreError::Malformed {
            path: self.path.clone(),
            source,
        }
    }

    fn invalid(&self, reason: String) -> StoreError {
        StoreError::Invalid(format!("{} ({}): {}", T::NAME, self.path.display(), reason))
    }
}

impl<T: Artifact> Store<T> for JsonFileStore<T> {
    fn load(&self) -> Result<T, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(
                    artifact = T::NAME,
                    path = %self.path.display(),
                    "artifact missing, using default"
                );
                return Ok(T::default());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let mut value: T = serde_json::from_slice(&bytes).map_err(|e| self.malformed(e))?;
        value.validate().map_err(|reason| self.invalid(reason))?;
        Ok(value)
    }

    fn save(&self, value: &T) -> Result<(), StoreError> {
        let parent_dir = self.parent_dir();
        fs::create_dir_all(parent_dir).map_err(|e| StoreError::io(parent_dir, e))?;

        let temp_file =
            NamedTempFile::new_in(parent_dir).map_err(|e| StoreError::io(parent_dir, e))?;
        {
            let mut writer = BufWriter::new(&temp_file);
            serde_json::to_writer_pretty(&mut writer, value).map_err(|e| self.malformed(e))?;
            writer
                .write_all(b"\n")
                .and_then(|_| writer.flush())
                .map_err(|e| StoreError::io(&self.path, e))?;
        }
        temp_file
            .as_file()
            .sync_all()
            .map_err(|e| StoreError::io(&self.path, e))?;

        temp_file
            .persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;
        tracing::debug!(artifact = T::NAME, path = %self.path.display(), "artifact saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::UsageLedger;

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::<UsageLedger>::new(dir.path().join("absent.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("ledger.json");
        let store = JsonFileStore::<UsageLedger>::new(&path);

        let mut ledger = UsageLedger::default();
        ledger.insert("lantern");
        store.save(&ledger).unwrap();

        assert!(path.exists());
        assert_eq!(store.load().unwrap(), ledger);
    }

    #[test]
    fn corrupt_file_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(&path, b"{ not json").unwrap();

        let store = JsonFileStore::<UsageLedger>::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Malformed { .. })));
    }

    #[test]
    fn save_leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::<UsageLedger>::new(dir.path().join("ledger.json"));
        store.save(&UsageLedger::default()).unwrap();
        store.save(&UsageLedger::default()).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
