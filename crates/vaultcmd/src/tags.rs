//! Tag normalization for task annotations.
//!
//! Tags arrive as a free-form list. Before a command is accepted:
//! - Duplicates are rejected (compared as submitted, before trimming)
//! - Empty or whitespace-only entries are rejected
//! - Each surviving tag is trimmed, order preserved
//! - Tags that differ only by a leading `#` count as duplicates
//!
//! When written to a task line each tag becomes a `#tag` annotation.

use std::collections::HashSet;
use std::fmt;

/// Validates and canonicalizes a tag list.
///
/// # Examples
/// ```
/// use vaultcmd::tags::{normalize_tags, TagError};
///
/// let tags = vec![" work ".to_string(), "alpha".to_string()];
/// assert_eq!(normalize_tags(&tags), Ok(vec!["work".to_string(), "alpha".to_string()]));
///
/// let dup = vec!["a".to_string(), "a".to_string()];
/// assert_eq!(normalize_tags(&dup), Err(TagError::Duplicate("a".to_string())));
/// ```
pub fn normalize_tags(tags: &[String]) -> Result<Vec<String>, TagError> {
    let mut seen = HashSet::new();
    for tag in tags {
        if !seen.insert(tag.as_str()) {
            return Err(TagError::Duplicate(tag.clone()));
        }
    }

    if tags.iter().any(|t| t.trim().is_empty()) {
        return Err(TagError::Blank);
    }

    let trimmed: Vec<String> = tags.iter().map(|t| t.trim().to_string()).collect();

    // " a", "a" and "#a" all render as the same annotation
    let mut canonical = HashSet::new();
    for tag in &trimmed {
        if !canonical.insert(tag.trim_start_matches('#')) {
            return Err(TagError::Duplicate(tag.clone()));
        }
    }

    Ok(trimmed)
}

/// Renders a tag as a Markdown annotation, without doubling an existing `#`.
pub fn format_tag(tag: &str) -> String {
    if tag.starts_with('#') {
        tag.to_string()
    } else {
        format!("#{}", tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    /// The same tag appears more than once
    Duplicate(String),
    /// A tag is empty or whitespace only
    Blank,
}

impl fmt::Display for TagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagError::Duplicate(tag) => write!(f, "tags must be unique, '{}' repeats", tag),
            TagError::Blank => write!(f, "tags cannot contain empty strings"),
        }
    }
}

impl std::error::Error for TagError {}
