use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("settings directory missing or not writable: {0}")]
    Directory(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure `dir` exists and is a directory; create it if missing.
pub fn ensure_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::Directory(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::Directory("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::Directory(e.to_string()))?;
    }
    Ok(())
}

/// Writes a whole file at once: temp file in the same directory, then rename,
/// so a crash never leaves half-written settings behind.
pub struct AtomicFileWriter {
    target: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(target: PathBuf) -> Self {
        Self { target }
    }

    pub fn write(&self, content: &str) -> Result<&Path, PersistError> {
        let dir = match self.target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        ensure_dir(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        tmp.persist(&self.target)
            .map_err(|e| PersistError::Io(e.error))?;
        Ok(&self.target)
    }
}
