//! Workspace snapshot — bounded, deterministic collection of source files.
//!
//! Walks the project root with the `ignore` crate, keeps supported web
//! source extensions, skips dependency/output directories, and caps the
//! result so review prompts stay bounded.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::debug;

use crate::error::ReviewError;

/// Extensions included in a review snapshot.
pub const SNAPSHOT_EXTENSIONS: &[&str] = &["js", "ts", "jsx", "tsx", "html", "css"];

/// Directory names excluded anywhere under the root.
pub const EXCLUDED_DIRS: &[&str] = &["node_modules", "dist", "build"];

/// Hard cap on files per snapshot.
pub const MAX_SNAPSHOT_FILES: usize = 10;

/// One file's point-in-time content. Produced fresh per review, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSnapshot {
    /// Path relative to the workspace root, `/`-separated.
    pub relative_path: String,
    /// UTF-8 file content.
    pub content: String,
}

/// Collect up to [`MAX_SNAPSHOT_FILES`] source files under `root`.
///
/// Matches are sorted by path before the cap is applied so the snapshot is
/// deterministic regardless of directory listing order. A read failure for
/// any single file aborts the whole collection — no partial snapshots.
pub fn collect(root: &Path) -> Result<Vec<FileSnapshot>, ReviewError> {
    let mut paths: Vec<PathBuf> = Vec::new();
    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .filter_entry(|entry| {
            let is_dir = entry.file_type().map_or(false, |t| t.is_dir());
            let excluded = entry
                .file_name()
                .to_str()
                .is_some_and(|name| EXCLUDED_DIRS.contains(&name));
            !(is_dir && excluded)
        })
        .build();

    for entry in walker.flatten() {
        let path = entry.path();
        let supported = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| SNAPSHOT_EXTENSIONS.contains(&ext));
        if path.is_file() && supported {
            paths.push(path.to_path_buf());
        }
    }

    paths.sort();
    paths.truncate(MAX_SNAPSHOT_FILES);
    debug!(files = paths.len(), root = %root.display(), "snapshot paths selected");

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let content = fs::read_to_string(&path).map_err(|source| ReviewError::FileRead {
            path: path.clone(),
            source,
        })?;
        let relative = path
            .strip_prefix(root)
            .unwrap_or(&path)
            .to_string_lossy()
            .replace('\\', "/");
        files.push(FileSnapshot {
            relative_path: relative,
            content,
        });
    }

    Ok(files)
}
