//! Fix-proposal extraction — locate a JSON span in raw model text and
//! validate its schema before anything downstream can hold it.
//!
//! Validation happens here, immediately after parse: the gate never stores
//! a `FixSet` whose entries have not been checked for required fields and
//! types.

use serde_json::Value;

use crate::error::ReviewError;
use crate::fixes::{FixSet, ProposedFix};

/// Extract and validate a fix proposal from raw model output.
///
/// The span runs from the first `{` to the last `}`. No span at all is
/// [`ReviewError::NoJsonFound`]; a span that fails to parse is
/// [`ReviewError::MalformedJson`]. A parsed object without a `files` field,
/// or with an empty one, yields the canonical empty `FixSet`.
pub fn parse(raw: &str) -> Result<FixSet, ReviewError> {
    let span = json_span(raw).ok_or(ReviewError::NoJsonFound)?;
    let value: Value = serde_json::from_str(span)?;
    validate(&value)
}

/// The `{`...`}` span of the text, if one exists.
fn json_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

fn validate(value: &Value) -> Result<FixSet, ReviewError> {
    let Some(files) = value.get("files") else {
        return Ok(FixSet::default());
    };
    let Some(entries) = files.as_array() else {
        return Err(ReviewError::InvalidFixPayload {
            path: "<response>".to_string(),
            reason: "`files` is not an array".to_string(),
        });
    };

    let mut fixes = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let path = entry
            .get("path")
            .and_then(Value::as_str)
            .ok_or_else(|| ReviewError::InvalidFixPayload {
                path: format!("files[{index}]"),
                reason: "missing string `path`".to_string(),
            })?
            .to_string();

        let issues = match entry.get("issues") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => {
                let mut issues = Vec::with_capacity(items.len());
                for item in items {
                    let issue =
                        item.as_str()
                            .ok_or_else(|| ReviewError::InvalidFixPayload {
                                path: path.clone(),
                                reason: "`issues` contains a non-string entry".to_string(),
                            })?;
                    issues.push(issue.to_string());
                }
                issues
            }
            Some(_) => {
                return Err(ReviewError::InvalidFixPayload {
                    path,
                    reason: "`issues` is not an array".to_string(),
                })
            }
        };

        let fixed_code = entry
            .get("fixedCode")
            .and_then(Value::as_str)
            .ok_or_else(|| ReviewError::InvalidFixPayload {
                path: path.clone(),
                reason: "missing or non-string `fixedCode`".to_string(),
            })?
            .to_string();

        fixes.push(ProposedFix {
            path,
            issues,
            fixed_code,
        });
    }

    Ok(FixSet { files: fixes })
}
