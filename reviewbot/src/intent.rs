//! Message intent classification — review request vs. general chat.

/// Keywords that mark a message as a code-review request.
const REVIEW_KEYWORDS: &[&str] = &[
    "review", "analyse", "analyze", "check", "bug", "issue", "fix", "correct", "improve",
];

/// What the user is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Inspect the workspace and propose fixes.
    Review,
    /// General conversation.
    Chat,
}

/// Classify a message. Pure and deterministic: case-insensitive substring
/// match against the keyword set, plus the compound rule that a message
/// mentioning both "code" and "file" is a review request.
pub fn classify(text: &str) -> Intent {
    let lower = text.to_lowercase();
    let keyword_hit = REVIEW_KEYWORDS.iter().any(|k| lower.contains(k));
    let compound_hit = lower.contains("code") && lower.contains("file");
    if keyword_hit || compound_hit {
        Intent::Review
    } else {
        Intent::Chat
    }
}
