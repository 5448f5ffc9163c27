//! Article field constraints and slug generation.
//!
//! These mirror the rules the article editor enforces client-side, so the
//! API rejects the same input even when a client skips the form.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Minimum title length in characters.
pub const MIN_TITLE_LENGTH: usize = 7;

/// Maximum title length in characters.
pub const MAX_TITLE_LENGTH: usize = 250;

/// An article must carry at least this many tags.
pub const MIN_TAGS: usize = 1;

/// An article may carry at most this many tags.
pub const MAX_TAGS: usize = 4;

/// The body must contain strictly more than this many words.
pub const MIN_BODY_WORDS: usize = 10;

/// Length of the random suffix appended to generated slugs.
const SLUG_SUFFIX_LENGTH: usize = 8;

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate an article title.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CoreError::Validation("You must specify a title.".to_string()));
    }

    let len = title.chars().count();
    if len < MIN_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title must have at least {MIN_TITLE_LENGTH} characters."
        )));
    }
    if len > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title must have at most {MAX_TITLE_LENGTH} characters."
        )));
    }

    Ok(())
}

/// Validate that an expertise level was chosen.
pub fn validate_expertise_level(level: &str) -> Result<(), CoreError> {
    if level.trim().is_empty() {
        return Err(CoreError::Validation(
            "Article must have an expertise level.".to_string(),
        ));
    }
    Ok(())
}

/// Validate the tag list: between [`MIN_TAGS`] and [`MAX_TAGS`] non-blank tags.
pub fn validate_tags(tags: &[String]) -> Result<(), CoreError> {
    if tags.len() < MIN_TAGS || tags.len() > MAX_TAGS {
        return Err(CoreError::Validation(format!(
            "You must add at least {MIN_TAGS} tag and at most {MAX_TAGS} tags in a article."
        )));
    }

    if tags.iter().any(|t| t.trim().is_empty()) {
        return Err(CoreError::Validation("Tags must not be blank.".to_string()));
    }

    Ok(())
}

/// Validate the article body: present and longer than [`MIN_BODY_WORDS`] words.
pub fn validate_body(body: &str) -> Result<(), CoreError> {
    if body.trim().is_empty() {
        return Err(CoreError::Validation(
            "Article must have some content.".to_string(),
        ));
    }

    if body.split_whitespace().count() <= MIN_BODY_WORDS {
        return Err(CoreError::Validation(format!(
            "Enter at least {MIN_BODY_WORDS} words in the body."
        )));
    }

    Ok(())
}

/// Validate a cover image URL as returned by the image CDN.
///
/// An empty string means "no cover image" and is accepted.
pub fn validate_image_url(url: &str) -> Result<(), CoreError> {
    if url.is_empty() || url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid image URL '{url}'. Must be an http(s) URL"
        )))
    }
}

/* --------------------------------------------------------------------------
Slugs
-------------------------------------------------------------------------- */

/// Turn a title into a URL-safe slug: lowercase ASCII alphanumerics joined by `-`.
///
/// Falls back to `"article"` when nothing usable remains.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        "article".to_string()
    } else {
        slug
    }
}

/// Build a unique slug for a title by appending a short random suffix.
pub fn generate_slug(title: &str) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", slugify(title), &suffix[..SLUG_SUFFIX_LENGTH])
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
