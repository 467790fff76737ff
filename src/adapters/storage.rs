use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem storage rooted at `base_path`. Absolute paths passed to the
/// trait methods replace the base.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        tracing::debug!("Reading {}", full_path.display());
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        tracing::debug!("Writing {} bytes to {}", data.len(), full_path.display());
        fs::write(full_path, data)?;
        Ok(())
    }

    async fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_read_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap());

        storage
            .write_file("nested/profiles.json", b"[]")
            .await
            .unwrap();

        assert!(storage.exists("nested/profiles.json").await);
        assert_eq!(storage.read_file("nested/profiles.json").await.unwrap(), b"[]");
    }

    #[tokio::test]
    async fn test_read_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap());

        let err = storage.read_file("missing.json").await.unwrap_err();
        assert!(matches!(err, crate::utils::error::MatchError::IoError(_)));
    }

    #[tokio::test]
    async fn test_absolute_path_ignores_base() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("doctors.json");
        std::fs::write(&file, b"[{\"name\":\"Dr. A\"}]").unwrap();

        let storage = LocalStorage::new("/definitely/not/here");
        let data = storage.read_file(file.to_str().unwrap()).await.unwrap();
        assert!(!data.is_empty());
    }
}
