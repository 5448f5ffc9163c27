//! Comment text constraints.
//!
//! Comment text is stored trimmed. Whitespace-only text counts as empty.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Maximum length (in characters) of a comment after trimming.
pub const MAX_COMMENT_LENGTH: usize = 10_000;

/// Message returned when a comment has no text.
pub const EMPTY_COMMENT_MESSAGE: &str = "Comment must not be empty!";

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Trim comment text and check it against the field constraints.
///
/// Returns the trimmed text that should be persisted.
pub fn normalize_comment_text(text: &str) -> Result<String, CoreError> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(CoreError::Validation(EMPTY_COMMENT_MESSAGE.to_string()));
    }

    if trimmed.chars().count() > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Comment exceeds maximum length of {MAX_COMMENT_LENGTH} characters"
        )));
    }

    Ok(trimmed.to_string())
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_trimmed() {
        let text = normalize_comment_text("  nice write-up \n").unwrap();
        assert_eq!(text, "nice write-up");
    }

    #[test]
    fn test_empty_text_rejected() {
        let err = normalize_comment_text("").unwrap_err();
        assert!(err.to_string().contains(EMPTY_COMMENT_MESSAGE));
    }

    #[test]
    fn test_whitespace_only_text_rejected() {
        assert!(normalize_comment_text("   \t\n ").is_err());
    }

    #[test]
    fn test_text_at_max_length_accepted() {
        let text = "a".repeat(MAX_COMMENT_LENGTH);
        assert!(normalize_comment_text(&text).is_ok());
    }

    #[test]
    fn test_text_over_max_length_rejected() {
        let text = "a".repeat(MAX_COMMENT_LENGTH + 1);
        let err = normalize_comment_text(&text).unwrap_err();
        assert!(err.to_string().contains("maximum length"));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Each 'é' is two bytes in UTF-8.
        let text = "é".repeat(MAX_COMMENT_LENGTH);
        assert!(normalize_comment_text(&text).is_ok());
    }
}
