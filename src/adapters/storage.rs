use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = fs::read(self.resolve(path))?;
        Ok(data)
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        write_atomic(&self.resolve(path), data)
    }
}

/// Writes `data` next to `path` and renames it into place, so readers never
/// see a half-written file.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let staging = path.with_file_name(format!(".{}.partial", file_name));

    if let Err(e) = fs::write(&staging, data).and_then(|()| fs::rename(&staging, path)) {
        let _ = fs::remove_file(&staging);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read_relative_to_base() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage.write_file("out/languages.png", b"png").unwrap();

        assert_eq!(storage.read_file("out/languages.png").unwrap(), b"png");
        assert!(!dir.path().join("out/.languages.png.partial").exists());
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage.write_file("languages.png", b"first").unwrap();
        storage.write_file("languages.png", b"second").unwrap();

        assert_eq!(storage.read_file("languages.png").unwrap(), b"second");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        assert!(storage.read_file("movies.json").is_err());
    }

    #[test]
    fn test_failed_write_leaves_no_staging_file() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        std::fs::create_dir_all(dir.path().join("languages.png/occupied")).unwrap();

        assert!(storage.write_file("languages.png", b"png").is_err());
        assert!(!dir.path().join(".languages.png.partial").exists());
    }
}
