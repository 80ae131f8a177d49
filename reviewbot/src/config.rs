//! Session configuration resolved from the host environment.

use std::path::PathBuf;

use crate::gateway::DEFAULT_MODEL;

/// Everything a session needs from the host: credential, model id, and the
/// single bound project root. A missing API key does not prevent the session
/// from opening — it produces a user-facing "configure a key" reply instead.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Generation-service credential, if configured.
    pub api_key: Option<String>,
    /// Model identifier passed to the generation service.
    pub model: String,
    /// Project root all reads and writes are confined to.
    pub root: Option<PathBuf>,
}

impl SessionConfig {
    /// Resolve from environment variables: `GEMINI_API_KEY` for the
    /// credential, `REVIEWBOT_MODEL` to override the default model.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            model: std::env::var("REVIEWBOT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            root: None,
        }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            root: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_key_and_no_root() {
        let config = SessionConfig::default();
        assert!(config.api_key.is_none());
        assert!(config.root.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_builders() {
        let config = SessionConfig::default()
            .with_root("/tmp/project")
            .with_api_key("k");
        assert_eq!(config.root.unwrap(), PathBuf::from("/tmp/project"));
        assert_eq!(config.api_key.unwrap(), "k");
    }
}
