//! Contact validation: the invariants the store enforces on save.

use crate::contact::Contact;
use crate::error::ValidationError;

/// Whether a string is empty or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.chars().all(char::is_whitespace)
}

/// Validate a contact before it enters the store.
///
/// The title is the display text for the contact, so it must not be blank.
/// Every other field may be empty.
pub fn validate_contact(contact: &Contact) -> Result<(), ValidationError> {
    if is_blank(&contact.title) {
        return Err(ValidationError::BlankTitle);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\n"));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn test_validate_contact() {
        assert!(validate_contact(&Contact::new("T", "", "", "")).is_ok());
        assert_eq!(
            validate_contact(&Contact::new("  ", "N", "e", "1")),
            Err(ValidationError::BlankTitle)
        );
    }
}
