use nutype::nutype;
use thiserror::Error;

use crate::email_address::EmailAddress;

/// A contact form submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub author: ContactMessageAuthor,
    pub subject: ContactMessageSubject,
    pub content: ContactMessageContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageAuthor {
    pub name: ContactMessageAuthorName,
    pub email: EmailAddress,
}

#[nutype(
    validate(len_char_min = 2),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageAuthorName(String);

#[nutype(
    validate(len_char_min = 5),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageSubject(String);

#[nutype(
    validate(len_char_min = 10),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);

/// Raw contact form data as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFieldViolation {
    pub field: ContactField,
    pub message: &'static str,
}

impl ContactFieldViolation {
    fn new(field: ContactField) -> Self {
        let message = match field {
            ContactField::Name => "Name must be at least 2 characters",
            ContactField::Email => "Invalid email address",
            ContactField::Subject => "Subject must be at least 5 characters",
            ContactField::Message => "Message must be at least 10 characters",
        };
        Self { field, message }
    }
}

/// Every field that failed validation, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid contact form ({} violations)", .0.len())]
pub struct ContactValidationError(pub Vec<ContactFieldViolation>);

impl TryFrom<ContactForm> for ContactMessage {
    type Error = ContactValidationError;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        let name = ContactMessageAuthorName::try_new(form.name).ok();
        let email = form.email.parse::<EmailAddress>().ok();
        let subject = ContactMessageSubject::try_new(form.subject).ok();
        let content = ContactMessageContent::try_new(form.message).ok();

        let violations = [
            (name.is_none(), ContactField::Name),
            (email.is_none(), ContactField::Email),
            (subject.is_none(), ContactField::Subject),
            (content.is_none(), ContactField::Message),
        ]
        .into_iter()
        .filter(|&(failed, _)| failed)
        .map(|(_, field)| ContactFieldViolation::new(field))
        .collect::<Vec<_>>();

        match (name, email, subject, content) {
            (Some(name), Some(email), Some(subject), Some(content)) => Ok(Self {
                author: ContactMessageAuthor { name, email },
                subject,
                content,
            }),
            _ => Err(ContactValidationError(violations)),
        }
    }
}

#[cfg(test)]
mod tests {
    use folio_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    fn form(name: &str, email: &str, subject: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    #[test]
    fn valid() {
        let result =
            ContactMessage::try_from(form("Al", "a@b.com", "Hello there", "This is a test message."))
                .unwrap();

        assert_eq!(*result.author.name, "Al");
        assert_eq!(result.author.email.as_str(), "a@b.com");
        assert_eq!(*result.subject, "Hello there");
        assert_eq!(*result.content, "This is a test message.");
    }

    #[test]
    fn all_fields_invalid() {
        let result = ContactMessage::try_from(form("A", "bad", "x", "short"));

        let ContactValidationError(violations) = result.unwrap_err();
        assert_eq!(
            violations.iter().map(|v| v.field).collect::<Vec<_>>(),
            [
                ContactField::Name,
                ContactField::Email,
                ContactField::Subject,
                ContactField::Message
            ]
        );
    }

    #[test]
    fn single_field_rejects_whole_form() {
        for (input, field) in [
            (form("A", "a@b.com", "Hello", "0123456789"), ContactField::Name),
            (form("Al", "a.b.com", "Hello", "0123456789"), ContactField::Email),
            (form("Al", "a@b.com", "Hell", "0123456789"), ContactField::Subject),
            (form("Al", "a@b.com", "Hello", "012345678"), ContactField::Message),
        ] {
            assert_matches!(
                ContactMessage::try_from(input),
                Err(ContactValidationError(v)) if v.len() == 1 && v[0].field == field
            );
        }
    }

    #[test]
    fn boundaries_are_inclusive() {
        ContactMessage::try_from(form("Al", "a@b.com", "Hello", "0123456789")).unwrap();
    }

    #[test]
    fn lengths_count_characters() {
        // two characters, four bytes
        ContactMessage::try_from(form("Ää", "a@b.com", "Hello", "0123456789")).unwrap();
        assert_matches!(
            ContactMessage::try_from(form("Ä", "a@b.com", "Hello", "0123456789")),
            Err(_)
        );
    }

    #[test]
    fn empty_form() {
        let ContactValidationError(violations) =
            ContactMessage::try_from(ContactForm::default()).unwrap_err();
        assert_eq!(violations.len(), 4);
    }
}
