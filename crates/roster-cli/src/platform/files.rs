use std::path::{Path, PathBuf};

use roster_core::ExportError;
use roster_runtime::FileSink;

/// Saves files into one directory, overwriting same-named files.
#[derive(Debug, Clone)]
pub struct DirectoryFileSink {
    dir: PathBuf,
}

impl DirectoryFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

impl FileSink for DirectoryFileSink {
    fn save(&self, filename: &str, mime: &str, bytes: &[u8]) -> Result<(), ExportError> {
        let save_err = |e: std::io::Error| ExportError::Save {
            filename: filename.to_string(),
            message: e.to_string(),
        };

        std::fs::create_dir_all(&self.dir).map_err(save_err)?;
        let path = self.path_for(filename);
        std::fs::write(&path, bytes).map_err(save_err)?;
        tracing::debug!("Saved {} ({}, {} bytes)", path.display(), mime, bytes.len());
        Ok(())
    }
}
