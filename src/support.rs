//! Support contact requests

use once_cell::sync::Lazy;
use regex::Regex;
use strum::{Display, EnumIter};
use thiserror::Error;

/// Local part and domain, no dot required (`user@localhost` is accepted)
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+$").expect("Invalid email regex"));

/// Fields of the support form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SupportField {
    Name,
    Email,
    Message,
}

impl SupportField {
    pub fn next(self) -> SupportField {
        match self {
            SupportField::Name => SupportField::Email,
            SupportField::Email => SupportField::Message,
            SupportField::Message => SupportField::Name,
        }
    }

    pub fn previous(self) -> SupportField {
        match self {
            SupportField::Name => SupportField::Message,
            SupportField::Email => SupportField::Name,
            SupportField::Message => SupportField::Email,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SupportError {
    #[error("support field '{0}' is required")]
    MissingField(SupportField),
}

impl SupportRequest {
    pub fn field(&self, field: SupportField) -> &str {
        match field {
            SupportField::Name => &self.name,
            SupportField::Email => &self.email,
            SupportField::Message => &self.message,
        }
    }

    pub fn field_mut(&mut self, field: SupportField) -> &mut String {
        match field {
            SupportField::Name => &mut self.name,
            SupportField::Email => &mut self.email,
            SupportField::Message => &mut self.message,
        }
    }

    /// First empty field in tab order, if any.
    pub fn validate(&self) -> Result<(), SupportError> {
        use strum::IntoEnumIterator;

        match SupportField::iter().find(|field| self.field(*field).trim().is_empty()) {
            Some(field) => Err(SupportError::MissingField(field)),
            None => Ok(()),
        }
    }
}

/// Address syntax check used by the email input of the support dialog.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> SupportRequest {
        SupportRequest {
            name: "Anna".into(),
            email: "anna@example.com".into(),
            message: "The chat does not answer".into(),
        }
    }

    #[test]
    fn complete_request_validates() {
        assert_eq!(filled().validate(), Ok(()));
    }

    #[test]
    fn first_blank_field_is_reported() {
        let mut req = filled();
        req.email = "   ".into();
        req.message.clear();
        assert_eq!(
            req.validate(),
            Err(SupportError::MissingField(SupportField::Email))
        );
        assert_eq!(
            SupportRequest::default().validate(),
            Err(SupportError::MissingField(SupportField::Name))
        );
    }

    #[test]
    fn error_names_the_field() {
        let err = SupportError::MissingField(SupportField::Message);
        assert_eq!(err.to_string(), "support field 'message' is required");
    }

    #[test]
    fn email_syntax() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email(" user@mail.example.ru "));
        assert!(is_valid_email("user@localhost"));
        assert!(is_valid_email("user@example"));
        assert!(!is_valid_email("user example@x.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("user@exa mple.com"));
    }

    #[test]
    fn tab_order_cycles() {
        assert_eq!(SupportField::Message.next(), SupportField::Name);
        assert_eq!(SupportField::Name.previous(), SupportField::Message);
    }
}
