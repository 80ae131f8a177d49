//! Review prompt rendering — strict JSON output contract for the model.

use crate::snapshot::FileSnapshot;

/// Instructional preamble demanding a single raw JSON object and nothing else.
pub const REVIEW_PREAMBLE: &str = "\
Review the following project files for bugs, errors, and bad practices.

Respond with a SINGLE raw JSON object of exactly this shape:

{ \"files\": [ { \"path\": \"<relative path>\", \"issues\": [\"<issue>\", ...], \"fixedCode\": \"<full corrected file content>\" } ] }

Rules:
- Output ONLY the JSON object. No markdown fences, no language tags, no prose before or after it.
- Include an entry only for files that actually have issues.
- `fixedCode` must be the COMPLETE corrected content of the file, not a diff.
- If no file has issues, respond with { \"files\": [] }.

The files follow, each introduced by a `--- <path> ---` marker.
";

/// Render the review prompt for a snapshot. Pure and deterministic given
/// identical input order.
pub fn build(files: &[FileSnapshot]) -> String {
    let mut prompt = String::from(REVIEW_PREAMBLE);
    for file in files {
        prompt.push_str(&format!("\n--- {} ---\n{}\n", file.relative_path, file.content));
    }
    prompt
}
