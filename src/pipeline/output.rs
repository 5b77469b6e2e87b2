//! Output directory ownership

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, ResizeBenchError};

/// Owns the destination directory shared by all workers.
///
/// Concurrent writes target disjoint destination paths (collisions are
/// rejected at planning time), so no locking happens here.
#[derive(Debug, Clone)]
pub struct OutputArea {
    root: PathBuf,
}

impl OutputArea {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ensure the directory exists and holds no files from a prior run.
    ///
    /// Files beneath the root are deleted recursively; subdirectories are
    /// left in place. Idempotent: a second call is a no-op in effect.
    /// Failure to create the root at all is fatal to the run.
    pub fn clean(&self) -> Result<()> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root)?;
            debug!("Created output directory {:?}", self.root);
            return Ok(());
        }

        let mut removed = 0usize;
        for entry in WalkDir::new(&self.root) {
            let entry =
                entry.map_err(|e| ResizeBenchError::Io(e.into_io_error().unwrap_or_else(|| {
                    std::io::Error::new(std::io::ErrorKind::Other, "walk error")
                })))?;
            if entry.file_type().is_file() {
                std::fs::remove_file(entry.path())?;
                removed += 1;
            }
        }

        debug!("Cleaned output directory {:?} ({} files)", self.root, removed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clean_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("output");
        let area = OutputArea::new(&root);

        area.clean().unwrap();
        assert!(root.is_dir());
        assert_eq!(std::fs::read_dir(&root).unwrap().count(), 0);
    }

    #[test]
    fn test_clean_removes_prior_artifacts() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("output");
        let sub = root.join("nested");
        std::fs::create_dir_all(&sub).unwrap();
        std::fs::write(root.join("stale.jpg"), b"old").unwrap();
        std::fs::write(sub.join("deep.jpg"), b"old").unwrap();

        let area = OutputArea::new(&root);
        area.clean().unwrap();

        assert!(root.is_dir());
        assert!(!root.join("stale.jpg").exists());
        assert!(!sub.join("deep.jpg").exists());
    }

    #[test]
    fn test_clean_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("output");
        let area = OutputArea::new(&root);

        area.clean().unwrap();
        std::fs::write(root.join("result.jpg"), b"new").unwrap();
        area.clean().unwrap();
        area.clean().unwrap();

        assert!(root.is_dir());
        assert_eq!(
            std::fs::read_dir(&root)
                .unwrap()
                .filter(|e| e.as_ref().unwrap().path().is_file())
                .count(),
            0
        );
    }
}
