//! Model reply extraction.
//!
//! Models asked for JSON still wrap it in code fences, prefix it with prose,
//! or append explanations. The extractor sanitizes the raw text, locates the
//! first JSON object or array, and deserializes it into the expected shape.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Maximum accepted reply length (100KB).
pub const MAX_REPLY_LENGTH: usize = 100_000;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("reply too long: {actual} bytes exceeds maximum of {max} bytes")]
    TooLong { max: usize, actual: usize },

    #[error("reply contains no JSON")]
    NoJson,

    #[error("JSON parse error: {0}")]
    Parse(String),
}

/// Sanitizes a reply and deserializes the JSON it carries.
pub fn extract_json<T: DeserializeOwned>(reply: &str) -> Result<T, ExtractionError> {
    let sanitized = sanitize(reply)?;
    let json = locate_json(&sanitized).ok_or(ExtractionError::NoJson)?;
    serde_json::from_str(json).map_err(|e| ExtractionError::Parse(e.to_string()))
}

/// Rejects oversized replies and strips control characters other than
/// line breaks and tabs.
pub fn sanitize(reply: &str) -> Result<String, ExtractionError> {
    if reply.len() > MAX_REPLY_LENGTH {
        return Err(ExtractionError::TooLong {
            max: MAX_REPLY_LENGTH,
            actual: reply.len(),
        });
    }
    Ok(reply
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t' | '\r'))
        .collect())
}

fn locate_json(reply: &str) -> Option<&str> {
    let trimmed = reply.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(fenced) = from_code_fence(trimmed) {
        return Some(fenced);
    }

    let (start, open, close) = match (trimmed.find('{'), trimmed.find('[')) {
        (Some(o), Some(a)) if a < o => (a, '[', ']'),
        (Some(o), _) => (o, '{', '}'),
        (None, Some(a)) => (a, '[', ']'),
        (None, None) => return None,
    };

    // Unbalanced input is handed to the parser whole so it reports the error.
    Some(balanced(trimmed, start, open, close).unwrap_or(&trimmed[start..]))
}

fn from_code_fence(s: &str) -> Option<&str> {
    for opener in ["```json", "```JSON", "```"] {
        if let Some(pos) = s.find(opener) {
            let body_start = pos + opener.len();
            let rest = &s[body_start..];
            if let Some(end) = rest.find("```") {
                let body = rest[..end].trim();
                if body.starts_with('{') || body.starts_with('[') {
                    return Some(body);
                }
            }
        }
    }
    None
}

fn balanced(s: &str, start: usize, open: char, close: char) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (offset, c) in s[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            c if c == open => depth += 1,
            c if c == close => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&s[start..start + offset + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}
