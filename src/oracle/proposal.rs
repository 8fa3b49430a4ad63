//! Proposal parsing - sanitize the oracle's free-form answer, then validate
//! it as a rule.
//!
//! The model is told to answer with bare JSON, but it may still wrap the
//! object in a fenced code block. Stage one strips that framing; stage two
//! parses the remainder into a [`Rule`] and rejects empty locators. Any
//! failure in either stage is `MalformedProposal` - never a panic, never an
//! internal retry.

use crate::domain::Rule;
use crate::error::{Result, ScraprError};

/// Parse an oracle answer into a rule.
pub fn parse_proposal(raw: &str) -> Result<Rule> {
    let sanitized = strip_fences(raw);
    let trimmed = sanitized.trim();

    if trimmed.is_empty() {
        return Err(ScraprError::MalformedProposal(
            "oracle answer was empty".to_string(),
        ));
    }

    let rule: Rule = serde_json::from_str(trimmed)
        .map_err(|e| ScraprError::MalformedProposal(format!("not a valid rule object: {}", e)))?;

    rule.validate()
        .map_err(|e| ScraprError::MalformedProposal(e.to_string()))?;

    Ok(rule)
}

/// Drop code-fence framing lines (``` or ```json) from the answer.
fn strip_fences(raw: &str) -> String {
    if !raw.contains("```") {
        return raw.to_string();
    }
    raw.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}
