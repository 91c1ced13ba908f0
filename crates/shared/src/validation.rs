//! Common validation utilities.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

/// Maximum accepted participant name length.
const MAX_PARTICIPANT_NAME_LENGTH: usize = 120;

lazy_static! {
    /// Ticket codes are 8 characters from a charset without confusable
    /// characters (no 0/O, 1/I/l).
    static ref TICKET_CODE_RE: Regex = Regex::new(r"^[A-HJ-NP-Z2-9]{8}$").unwrap();
}

/// Validates the ticket-code format used for manual roster lookup.
pub fn validate_ticket_code(code: &str) -> Result<(), ValidationError> {
    if TICKET_CODE_RE.is_match(code) {
        Ok(())
    } else {
        let mut err = ValidationError::new("ticket_code_format");
        err.message = Some("Ticket code must be 8 characters (A-Z, 2-9, no 0/O/1/I)".into());
        Err(err)
    }
}

/// Validates that a participant name is non-empty and within length bounds.
pub fn validate_participant_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("participant_name_empty");
        err.message = Some("Participant name must not be empty".into());
        return Err(err);
    }
    if trimmed.len() > MAX_PARTICIPANT_NAME_LENGTH {
        let mut err = ValidationError::new("participant_name_length");
        err.message = Some("Participant name is too long".into());
        return Err(err);
    }
    Ok(())
}
