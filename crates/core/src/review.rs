//! Guest review rules.
//!
//! Reviews are submitted publicly, held unapproved, and only counted
//! toward the public average once a staff member approves them.

use crate::error::CoreError;

/// Lowest permitted star rating.
pub const MIN_RATING: i32 = 1;

/// Highest permitted star rating.
pub const MAX_RATING: i32 = 5;

/// Review comment length bounds.
pub const MIN_COMMENT_LENGTH: usize = 10;
pub const MAX_COMMENT_LENGTH: usize = 1000;

/// Default number of reviews returned by the public listing.
pub const DEFAULT_REVIEW_LIMIT: i64 = 10;

/// Maximum number of reviews returnable in one public listing.
pub const MAX_REVIEW_LIMIT: i64 = 50;

/// Validate a star rating.
pub fn validate_rating(rating: i32) -> Result<(), CoreError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING} stars"
        )));
    }
    Ok(())
}

/// Validate a review comment.
pub fn validate_comment(comment: &str) -> Result<(), CoreError> {
    let len = comment.trim().chars().count();
    if !(MIN_COMMENT_LENGTH..=MAX_COMMENT_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Review must be between {MIN_COMMENT_LENGTH} and {MAX_COMMENT_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Round an average rating to two decimal places for display.
pub fn round_rating(average: f64) -> f64 {
    (average * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn comment_bounds() {
        assert!(validate_comment("too short").is_err());
        assert!(validate_comment("plenty long enough to count").is_ok());
        assert!(validate_comment(&"x".repeat(1001)).is_err());
    }

    #[test]
    fn average_rounds_to_two_places() {
        assert_eq!(round_rating(4.666_666), 4.67);
        assert_eq!(round_rating(0.0), 0.0);
    }
}
