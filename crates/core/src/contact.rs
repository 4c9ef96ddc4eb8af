//! Contact form rules.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Sender name length bounds.
pub const MIN_SENDER_NAME_LENGTH: usize = 2;
pub const MAX_SENDER_NAME_LENGTH: usize = 100;

/// Maximum subject length.
pub const MAX_SUBJECT_LENGTH: usize = 200;

/// Message body length bounds.
pub const MIN_MESSAGE_LENGTH: usize = 10;
pub const MAX_MESSAGE_LENGTH: usize = 1000;

/// Maximum length for the optional phone field.
pub const MAX_CONTACT_PHONE_LENGTH: usize = 20;

/// Maximum length for the sender's email address.
pub const MAX_SENDER_EMAIL_LENGTH: usize = 120;

/// Validate the sender's name.
pub fn validate_sender_name(name: &str) -> Result<(), CoreError> {
    let len = name.trim().chars().count();
    if !(MIN_SENDER_NAME_LENGTH..=MAX_SENDER_NAME_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Name must be between {MIN_SENDER_NAME_LENGTH} and {MAX_SENDER_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate the sender's email address.
pub fn validate_sender_email(email: &str) -> Result<(), CoreError> {
    if email.len() > MAX_SENDER_EMAIL_LENGTH || !email.validate_email() {
        return Err(CoreError::Validation(
            "A valid email address is required".to_string(),
        ));
    }
    Ok(())
}

/// Validate the optional subject line.
pub fn validate_subject(subject: &Option<String>) -> Result<(), CoreError> {
    if let Some(text) = subject {
        if text.chars().count() > MAX_SUBJECT_LENGTH {
            return Err(CoreError::Validation(format!(
                "Subject must not exceed {MAX_SUBJECT_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

/// Validate the optional phone field.
pub fn validate_contact_phone(phone: &Option<String>) -> Result<(), CoreError> {
    if let Some(text) = phone {
        if text.chars().count() > MAX_CONTACT_PHONE_LENGTH {
            return Err(CoreError::Validation(format!(
                "Phone must not exceed {MAX_CONTACT_PHONE_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

/// Validate the message body.
pub fn validate_message(message: &str) -> Result<(), CoreError> {
    let len = message.trim().chars().count();
    if !(MIN_MESSAGE_LENGTH..=MAX_MESSAGE_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Message must be between {MIN_MESSAGE_LENGTH} and {MAX_MESSAGE_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_bounds() {
        assert!(validate_message("hi").is_err());
        assert!(validate_message("a perfectly reasonable enquiry").is_ok());
        assert!(validate_message(&"x".repeat(1001)).is_err());
    }

    #[test]
    fn subject_and_phone_are_optional() {
        assert!(validate_subject(&None).is_ok());
        assert!(validate_contact_phone(&None).is_ok());
        assert!(validate_subject(&Some("x".repeat(201))).is_err());
        assert!(validate_contact_phone(&Some("9".repeat(21))).is_err());
    }

    #[test]
    fn sender_email_syntax() {
        assert!(validate_sender_email("guest@example.com").is_ok());
        assert!(validate_sender_email("nope").is_err());
    }
}
