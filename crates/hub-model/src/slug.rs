//! Identifier shapes checked outside the schemas
//!
//! The schemas enforce the in-document identifier patterns (parameter
//! names, step ids). The two shapes here belong to names that never appear
//! inside a document, only as directory names or tags:
//! - tool ids (`^[a-z][a-z0-9_-]*$`), the `tools/` directory names
//! - URL-friendly slugs (`^[a-z0-9-]+$`), the author/recipe directory names
//!   and tags that end up in routes

use once_cell::sync::Lazy;
use regex::Regex;

static TOOL_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_-]*$").expect("tool id pattern"));

static URL_FRIENDLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9-]+$").expect("url-friendly pattern"));

/// Check a tool id (lowercase slug, `-` and `_` allowed after the first letter)
#[must_use]
pub fn is_tool_id(s: &str) -> bool {
    TOOL_ID.is_match(s)
}

/// Check a URL-friendly directory name or tag
#[must_use]
pub fn is_url_friendly(s: &str) -> bool {
    URL_FRIENDLY.is_match(s)
}
