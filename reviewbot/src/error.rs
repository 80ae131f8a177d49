//! Error taxonomy for the review session.
//!
//! Every variant's `Display` text doubles as the user-visible reply when the
//! orchestrator surfaces the failure as a chat turn. None of these are fatal:
//! the session stays open and usable after any of them.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the orchestration core.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// No API key is configured for the generation service.
    #[error("No API key is configured. Set GEMINI_API_KEY to enable the assistant.")]
    Configuration,

    /// No project root is bound to the session.
    #[error("No workspace folder is open. Open a project to review or apply fixes.")]
    NoWorkspace,

    /// A single unreadable file aborts the whole snapshot — no partial reviews.
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The generation service rejected the configured credentials.
    #[error("The model service rejected the configured credentials. Check your API key.")]
    Authentication,

    /// Transport or service failure from the generation capability.
    #[error("The model request failed: {0}")]
    Upstream(String),

    /// The model response contained no `{`...`}` span at all.
    #[error("The model response contained no JSON object.")]
    NoJsonFound,

    /// A JSON span was found but did not parse.
    #[error("The model response contained malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// A fix entry failed schema or path validation, named by offending path.
    #[error("Invalid fix payload for `{path}`: {reason}")]
    InvalidFixPayload { path: String, reason: String },

    /// Staged application aborted; the lists say exactly what was and was not
    /// committed to the workspace.
    #[error("Fix application failed: {reason}")]
    ApplyFailed {
        reason: String,
        committed: Vec<String>,
        rolled_back: Vec<String>,
    },
}
