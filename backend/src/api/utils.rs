//! API utility functions
//!
//! Request validation shared by the handlers.

use crate::error::AppError;

/// Maximum message length in characters
pub const MAX_MESSAGE_LENGTH: usize = 10_000; // 10KB max message length

/// Validate a chat message
///
/// # Arguments
/// * `message` - Message text to validate
///
/// # Returns
/// * `Ok(())` - Message is valid
/// * `Err(AppError)` - Message is empty or too long
pub fn validate_message(message: &str) -> Result<(), AppError> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidMessage(
            "Message cannot be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(AppError::InvalidMessage(format!(
            "Message exceeds maximum length of {} characters",
            MAX_MESSAGE_LENGTH
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_message() {
        assert!(validate_message("hello").is_ok());
        assert!(validate_message("").is_err());
        assert!(validate_message("   \n\t").is_err());
        assert!(validate_message(&"a".repeat(MAX_MESSAGE_LENGTH)).is_ok());
        assert!(validate_message(&"a".repeat(MAX_MESSAGE_LENGTH + 1)).is_err());
    }
}
