//! Search and pagination constants and helpers.
//!
//! Lives in `core` (zero internal deps) so both the repository layer and
//! the API handlers share the same clamping rules.

use crate::error::CoreError;

/// Minimum length for a public menu search query.
pub const MIN_SEARCH_QUERY_LENGTH: usize = 2;

/// Maximum number of menu search results.
pub const SEARCH_RESULT_LIMIT: i64 = 20;

/// Default page size for paginated listings.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size for paginated listings.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Validate a public search query string.
pub fn validate_search_query(query: &str) -> Result<(), CoreError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Search query is required".to_string(),
        ));
    }
    if trimmed.chars().count() < MIN_SEARCH_QUERY_LENGTH {
        return Err(CoreError::Validation(format!(
            "Search query must be at least {MIN_SEARCH_QUERY_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Clamp an optional limit into `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, max)
}

/// Clamp an optional offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
