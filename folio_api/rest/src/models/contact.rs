use folio_models::contact::{ContactField, ContactFieldViolation, ContactForm};
use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};

/// Missing fields and values that are not strings are read as empty strings,
/// so they are reported as violations of the respective field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiContactForm {
    /// Full name of the sender
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    /// Email address of the sender
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    /// Subject of the message
    #[serde(deserialize_with = "lenient_string")]
    pub subject: String,
    /// Content of the message
    #[serde(deserialize_with = "lenient_string")]
    pub message: String,
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Field {
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Field::deserialize(deserializer)? {
        Field::Text(text) => text,
        Field::Other(_) => String::new(),
    })
}

impl From<ApiContactForm> for ContactForm {
    fn from(value: ApiContactForm) -> Self {
        Self {
            name: value.name,
            email: value.email,
            subject: value.subject,
            message: value.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiContactFieldViolation {
    pub field: String,
    pub message: String,
}

impl From<ContactFieldViolation> for ApiContactFieldViolation {
    fn from(value: ContactFieldViolation) -> Self {
        let field = match value.field {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Subject => "subject",
            ContactField::Message => "message",
        };
        Self {
            field: field.into(),
            message: value.message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn wrongly_typed_fields_are_empty() {
        let form = serde_json::from_value::<ApiContactForm>(json!({
            "name": 123,
            "email": null,
            "subject": ["Hello there"],
            "message": {"text": "This is a test message."},
        }))
        .unwrap();

        assert_eq!(ContactForm::from(form), ContactForm::default());
    }

    #[test]
    fn missing_fields_are_empty() {
        let form = serde_json::from_value::<ApiContactForm>(json!({"name": "Al"})).unwrap();

        assert_eq!(form.name, "Al");
        assert_eq!(form.message, "");
    }
}
