//! Fix-proposal data model — the structured output the model is asked for.

use serde::{Deserialize, Serialize};

/// A proposed rewrite of one file: the full replacement content plus the
/// issues that motivated it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedFix {
    /// Path relative to the workspace root.
    pub path: String,
    /// Issues found in the file, in the order the model reported them.
    #[serde(default)]
    pub issues: Vec<String>,
    /// Full corrected file content — replaces the file entirely, no diffing.
    #[serde(rename = "fixedCode")]
    pub fixed_code: String,
}

impl ProposedFix {
    /// Final path component, used in apply summaries.
    pub fn basename(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Up to the first two issues, comma joined.
    pub fn issue_digest(&self) -> String {
        self.issues
            .iter()
            .take(2)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// An ordered set of proposed fixes awaiting confirmation.
///
/// An empty set means "no issues" and is discarded by the gate, never held
/// as pending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixSet {
    #[serde(default)]
    pub files: Vec<ProposedFix>,
}

impl FixSet {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
