//! Restaurant event rules.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Event title length bounds.
pub const MIN_TITLE_LENGTH: usize = 5;
pub const MAX_TITLE_LENGTH: usize = 200;

/// Event description length bounds.
pub const MIN_EVENT_DESCRIPTION_LENGTH: usize = 10;
pub const MAX_EVENT_DESCRIPTION_LENGTH: usize = 2000;

/// Validate an event title.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let len = title.trim().chars().count();
    if !(MIN_TITLE_LENGTH..=MAX_TITLE_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Event title must be between {MIN_TITLE_LENGTH} and {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate an event description.
pub fn validate_event_description(description: &str) -> Result<(), CoreError> {
    let len = description.trim().chars().count();
    if !(MIN_EVENT_DESCRIPTION_LENGTH..=MAX_EVENT_DESCRIPTION_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Event description must be between {MIN_EVENT_DESCRIPTION_LENGTH} and {MAX_EVENT_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate event scheduling: the event must start in the future (at
/// creation time) and, when an end is given, end after it starts.
pub fn validate_event_schedule(
    event_date: Timestamp,
    end_date: Option<Timestamp>,
    now: Timestamp,
) -> Result<(), CoreError> {
    if event_date <= now {
        return Err(CoreError::Validation(
            "Event date must be in the future".to_string(),
        ));
    }
    if let Some(end) = end_date {
        if end < event_date {
            return Err(CoreError::Validation(
                "End date must be after the start date".to_string(),
            ));
        }
    }
    Ok(())
}
