use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// A validated submission of the contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invalid {
    MissingFields,
    Email,
}

impl Invalid {
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingFields => "Champs requis manquants",
            Self::Email => "Email invalide",
        }
    }
}

impl ContactSubmission {
    /// Extracts the form fields from a JSON request body.
    ///
    /// Each field is read on its own: a field which is not a string counts as absent and a body which is not a JSON object is treated as if all fields were missing.
    pub fn parse(body: &[u8]) -> Result<Self, Invalid> {
        let form = match serde_json::from_slice::<Map<String, Value>>(body) {
            Ok(form) => form,
            Err(err) => {
                tracing::debug!("Malformed contact form: {}", err);

                Map::new()
            }
        };

        let field = |key: &str| {
            form.get(key)
                .and_then(Value::as_str)
                .filter(|val| !val.is_empty())
                .map(str::to_owned)
        };

        let (name, email, message) = match (field("name"), field("email"), field("message")) {
            (Some(name), Some(email), Some(message)) => (name, email, message),
            _ => return Err(Invalid::MissingFields),
        };

        if !is_valid_email(&email) {
            return Err(Invalid::Email);
        }

        Ok(Self {
            name,
            email,
            subject: field("subject"),
            message,
        })
    }

    pub fn subject_or_default(&self) -> String {
        match &self.subject {
            Some(subject) => subject.clone(),
            None => format!("Nouveau message de {}", self.name),
        }
    }
}

/// Checks for the `local@domain.tld` shape without any whitespace.
///
/// This is a sanity check only and says nothing about deliverability.
pub fn is_valid_email(val: &str) -> bool {
    static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

    EMAIL.is_match(val)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_plausible_addresses() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.co.uk"));
        assert!(is_valid_email("x@y.z"));
    }

    #[test]
    fn reject_malformed_addresses() {
        assert!(!is_valid_email("foo"));
        assert!(!is_valid_email("foo@bar"));
        assert!(!is_valid_email("foo bar@baz.com"));
        assert!(!is_valid_email("foo@@bar.com"));
        assert!(!is_valid_email("@bar.com"));
        assert!(!is_valid_email("foo@bar."));
        assert!(!is_valid_email("foo@bar.com\n"));
    }

    #[test]
    fn parse_complete_submission() {
        let submission = ContactSubmission::parse(
            br#"{"name":"Alice","email":"alice@example.com","subject":"Devis","message":"Bonjour\nMerci"}"#,
        )
        .unwrap();

        assert_eq!(
            submission,
            ContactSubmission {
                name: "Alice".to_owned(),
                email: "alice@example.com".to_owned(),
                subject: Some("Devis".to_owned()),
                message: "Bonjour\nMerci".to_owned(),
            }
        );
    }

    #[test]
    fn empty_subject_falls_back_to_default() {
        let submission = ContactSubmission::parse(
            br#"{"name":"Alice","email":"alice@example.com","subject":"","message":"Hello"}"#,
        )
        .unwrap();

        assert_eq!(submission.subject, None);
        assert_eq!(submission.subject_or_default(), "Nouveau message de Alice");
    }

    #[test]
    fn missing_or_empty_fields_are_rejected() {
        for body in [
            &br#"{"email":"alice@example.com","message":"Hello"}"#[..],
            br#"{"name":"","email":"alice@example.com","message":"Hello"}"#,
            br#"{"name":"Alice","message":"Hello"}"#,
            br#"{"name":"Alice","email":"alice@example.com","message":""}"#,
            br#"{"name":"Alice","email":"alice@example.com","message":null}"#,
            br#"{}"#,
            b"",
            b"not json",
            br#"["Alice","alice@example.com","Hello"]"#,
        ] {
            assert_eq!(
                ContactSubmission::parse(body),
                Err(Invalid::MissingFields),
                "{}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn non_string_subject_falls_back_to_default() {
        let submission = ContactSubmission::parse(
            br#"{"name":"Alice","email":"alice@example.com","subject":5,"message":"Hello"}"#,
        )
        .unwrap();

        assert_eq!(submission.subject, None);
        assert_eq!(submission.subject_or_default(), "Nouveau message de Alice");

        let submission = ContactSubmission::parse(
            br#"{"name":"Alice","email":"alice@example.com","subject":{"text":"Devis"},"message":"Hello"}"#,
        )
        .unwrap();

        assert_eq!(submission.subject, None);
    }

    #[test]
    fn non_string_required_fields_are_missing() {
        for body in [
            &br#"{"name":5,"email":"alice@example.com","message":"Hello"}"#[..],
            br#"{"name":"Alice","email":true,"message":"Hello"}"#,
            br#"{"name":"Alice","email":"alice@example.com","message":["Hello"]}"#,
        ] {
            assert_eq!(
                ContactSubmission::parse(body),
                Err(Invalid::MissingFields),
                "{}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn missing_fields_take_precedence_over_invalid_email() {
        assert_eq!(
            ContactSubmission::parse(br#"{"email":"foo","message":"Hello"}"#),
            Err(Invalid::MissingFields)
        );

        assert_eq!(
            ContactSubmission::parse(br#"{"name":"Alice","email":"foo","message":"Hello"}"#),
            Err(Invalid::Email)
        );
    }
}
