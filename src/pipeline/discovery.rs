//! Source file discovery

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, ResizeBenchError};

/// Extensions accepted as source images (matched case-insensitively)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Check if a file extension is a supported source format
pub fn is_supported_extension(extension: &str) -> bool {
    SUPPORTED_EXTENSIONS
        .iter()
        .any(|&ext| ext.eq_ignore_ascii_case(extension))
}

/// Enumerate source image files recursively under `root`.
///
/// Paths are deduplicated by identity and returned sorted; callers only rely
/// on the order for stable reporting, never for correctness.
pub fn discover_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(ResizeBenchError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut files = BTreeSet::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|e| {
            ResizeBenchError::config(format!("Failed to walk source directory: {}", e))
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(ext) = entry.path().extension().and_then(|e| e.to_str()) {
            if is_supported_extension(ext) {
                files.insert(entry.path().to_path_buf());
            }
        }
    }

    debug!("Discovered {} source files under {:?}", files.len(), root);
    Ok(files.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        std::fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_discovers_supported_extensions_recursively() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("nested");
        std::fs::create_dir(&sub).unwrap();

        touch(&dir.path().join("a.png"));
        touch(&dir.path().join("b.JPG"));
        touch(&sub.join("c.jpeg"));
        touch(&dir.path().join("skip.gif"));
        touch(&dir.path().join("notes.txt"));

        let files = discover_files(dir.path()).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.iter().any(|p| p.ends_with("a.png")));
        assert!(files.iter().any(|p| p.ends_with("b.JPG")));
        assert!(files.iter().any(|p| p.ends_with("nested/c.jpeg")));
    }

    #[test]
    fn test_missing_root_is_directory_not_found() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let err = discover_files(&missing).unwrap_err();
        assert!(matches!(err, ResizeBenchError::DirectoryNotFound { .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_results_are_sorted_and_deduplicated() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("z.png"));
        touch(&dir.path().join("a.jpg"));

        let files = discover_files(dir.path()).unwrap();
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
    }

    #[test]
    fn test_extension_matching_is_case_insensitive() {
        assert!(is_supported_extension("PNG"));
        assert!(is_supported_extension("Jpeg"));
        assert!(!is_supported_extension("webp"));
    }
}
