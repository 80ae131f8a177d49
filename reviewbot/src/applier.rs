//! Staged fix application — validate everything, stage everything, then
//! commit by rename.
//!
//! The three phases guarantee that a bad entry never leaves the workspace
//! half-written: validation failures reject the whole set before any I/O,
//! staging failures clean up their temporaries, and a commit failure
//! reports exactly which files were committed versus rolled back.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{info, warn};

use crate::error::ReviewError;
use crate::fixes::{FixSet, ProposedFix};

/// Per-file result lines of a successful application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplySummary {
    lines: Vec<String>,
}

impl ApplySummary {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

/// Apply a validated fix set under `root`, replacing each file's content
/// entirely.
pub fn apply(fix_set: &FixSet, root: &Path) -> Result<ApplySummary, ReviewError> {
    // Phase 1: validate every entry before touching the filesystem.
    for fix in &fix_set.files {
        validate_entry(fix)?;
    }

    // Phase 2: stage every write to a temporary sibling.
    let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(fix_set.len());
    for fix in &fix_set.files {
        let target = root.join(&fix.path);
        if let Some(parent) = target.parent() {
            if let Err(source) = fs::create_dir_all(parent) {
                discard_staged(&staged);
                return Err(ReviewError::ApplyFailed {
                    reason: format!("could not create directory for `{}`: {source}", fix.path),
                    committed: Vec::new(),
                    rolled_back: staged_paths(fix_set, staged.len()),
                });
            }
        }
        let temp = staging_path(&target);
        if let Err(source) = fs::write(&temp, &fix.fixed_code) {
            discard_staged(&staged);
            return Err(ReviewError::ApplyFailed {
                reason: format!("could not stage `{}`: {source}", fix.path),
                committed: Vec::new(),
                rolled_back: staged_paths(fix_set, staged.len()),
            });
        }
        staged.push((temp, target));
    }

    // Phase 3: commit every staged file by rename.
    for (index, (temp, target)) in staged.iter().enumerate() {
        if let Err(source) = fs::rename(temp, target) {
            warn!(path = %target.display(), error = %source, "commit failed; rolling back remainder");
            discard_staged(&staged[index..]);
            return Err(ReviewError::ApplyFailed {
                reason: format!(
                    "could not commit `{}`: {source}",
                    fix_set.files[index].path
                ),
                committed: staged_paths(fix_set, index),
                rolled_back: fix_set.files[index..]
                    .iter()
                    .map(|f| f.path.clone())
                    .collect(),
            });
        }
    }

    info!(files = fix_set.len(), "fixes applied");
    let lines = fix_set
        .files
        .iter()
        .map(|fix| format!("{} – {}", fix.basename(), fix.issue_digest()))
        .collect();
    Ok(ApplySummary { lines })
}

/// Reject empty, absolute, or root-escaping paths before any write happens.
fn validate_entry(fix: &ProposedFix) -> Result<(), ReviewError> {
    if fix.path.trim().is_empty() {
        return Err(ReviewError::InvalidFixPayload {
            path: fix.path.clone(),
            reason: "empty path".to_string(),
        });
    }
    let path = Path::new(&fix.path);
    if path.is_absolute() {
        return Err(ReviewError::InvalidFixPayload {
            path: fix.path.clone(),
            reason: "absolute paths are not allowed".to_string(),
        });
    }
    if path
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(ReviewError::InvalidFixPayload {
            path: fix.path.clone(),
            reason: "path escapes the workspace root".to_string(),
        });
    }
    Ok(())
}

fn staging_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("fix");
    target.with_file_name(format!(".{name}.staged"))
}

fn discard_staged(staged: &[(PathBuf, PathBuf)]) {
    for (temp, _) in staged {
        let _ = fs::remove_file(temp);
    }
}

fn staged_paths(fix_set: &FixSet, count: usize) -> Vec<String> {
    fix_set.files[..count].iter().map(|f| f.path.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(path: &str, issues: &[&str], code: &str) -> ProposedFix {
        ProposedFix {
            path: path.to_string(),
            issues: issues.iter().map(|s| s.to_string()).collect(),
            fixed_code: code.to_string(),
        }
    }

    #[test]
    fn test_round_trip_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let set = FixSet {
            files: vec![fix("a.js", &["x"], "console.log(1)")],
        };

        let summary = apply(&set, dir.path()).unwrap();

        let written = fs::read_to_string(dir.path().join("a.js")).unwrap();
        assert_eq!(written, "console.log(1)");
        assert_eq!(summary.lines(), ["a.js – x"]);
    }

    #[test]
    fn test_replaces_existing_content_entirely() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.js"), "old content").unwrap();

        let set = FixSet {
            files: vec![fix("a.js", &[], "new content")],
        };
        apply(&set, dir.path()).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("a.js")).unwrap(),
            "new content"
        );
    }

    #[test]
    fn test_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let set = FixSet {
            files: vec![fix("src/deep/mod.ts", &[], "export {}")],
        };
        apply(&set, dir.path()).unwrap();

        assert!(dir.path().join("src/deep/mod.ts").is_file());
    }

    #[test]
    fn test_summary_caps_issues_at_two() {
        let dir = tempfile::tempdir().unwrap();
        let set = FixSet {
            files: vec![fix("src/a.js", &["one", "two", "three"], "x")],
        };

        let summary = apply(&set, dir.path()).unwrap();
        assert_eq!(summary.render(), "a.js – one, two");
    }

    #[test]
    fn test_invalid_entry_rejects_whole_set() {
        let dir = tempfile::tempdir().unwrap();
        let set = FixSet {
            files: vec![fix("good.js", &[], "ok"), fix("", &[], "bad")],
        };

        let err = apply(&set, dir.path()).unwrap_err();
        assert!(matches!(err, ReviewError::InvalidFixPayload { .. }));
        // Validation runs before any I/O — nothing was written.
        assert!(!dir.path().join("good.js").exists());
    }

    #[test]
    fn test_traversal_path_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let set = FixSet {
            files: vec![fix("../escape.js", &[], "x")],
        };

        match apply(&set, dir.path()).unwrap_err() {
            ReviewError::InvalidFixPayload { path, reason } => {
                assert_eq!(path, "../escape.js");
                assert!(reason.contains("escapes"));
            }
            other => panic!("expected InvalidFixPayload, got {other:?}"),
        }
    }

    #[test]
    fn test_absolute_path_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let set = FixSet {
            files: vec![fix("/etc/passwd", &[], "x")],
        };
        assert!(matches!(
            apply(&set, dir.path()).unwrap_err(),
            ReviewError::InvalidFixPayload { .. }
        ));
    }

    #[test]
    fn test_multi_file_apply_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let set = FixSet {
            files: vec![
                fix("a.js", &["one"], "1"),
                fix("b.ts", &["two"], "2"),
            ],
        };

        let summary = apply(&set, dir.path()).unwrap();
        assert_eq!(summary.lines(), ["a.js – one", "b.ts – two"]);
        assert_eq!(fs::read_to_string(dir.path().join("a.js")).unwrap(), "1");
        assert_eq!(fs::read_to_string(dir.path().join("b.ts")).unwrap(), "2");
    }

    #[test]
    fn test_no_staging_leftovers_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let set = FixSet {
            files: vec![fix("a.js", &[], "x")],
        };
        apply(&set, dir.path()).unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".staged"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
