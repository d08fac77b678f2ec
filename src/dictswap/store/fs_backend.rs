use super::backend::StorageBackend;
use crate::config::StorePaths;
use crate::error::{DictError, Result};
use std::fs;
use std::path::Path;
use uuid::Uuid;

pub struct FsBackend {
    paths: StorePaths,
}

impl FsBackend {
    pub fn new(paths: StorePaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(DictError::Io)?;
        }
        Ok(())
    }

    fn read_optional(path: &Path) -> Result<Option<String>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(DictError::Io)?;
        Ok(Some(content))
    }
}

impl StorageBackend for FsBackend {
    fn read_store(&self) -> Result<Option<String>> {
        Self::read_optional(&self.paths.store)
    }

    fn write_store(&self, content: &str) -> Result<()> {
        let target = &self.paths.store;
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => std::env::current_dir().map_err(DictError::Io)?,
        };
        self.ensure_dir(&dir)?;

        // Atomic write
        let tmp_path = dir.join(format!(".dictionaries-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, content).map_err(DictError::Io)?;
        if let Err(e) = fs::rename(&tmp_path, target) {
            let _ = fs::remove_file(&tmp_path);
            return Err(DictError::Io(e));
        }

        Ok(())
    }

    fn read_legacy(&self) -> Result<Option<String>> {
        Self::read_optional(&self.paths.legacy)
    }

    fn location(&self) -> String {
        self.paths.store.display().to_string()
    }
}
