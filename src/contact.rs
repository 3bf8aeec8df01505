//! Contact form messages.

use serde::Deserialize;

use crate::notify::OutboundEmail;

/// Raw contact form submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// A validated inquiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("Please fill out all required fields")]
    MissingFields,

    #[error("Please enter a valid email address")]
    InvalidEmail,
}

impl TryFrom<ContactRequest> for ContactMessage {
    type Error = ContactError;

    fn try_from(req: ContactRequest) -> Result<Self, Self::Error> {
        let name = req.name.trim();
        let email = req.email.trim();
        let message = req.message.trim();

        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(ContactError::MissingFields);
        }
        if !is_plausible_email(email) {
            return Err(ContactError::InvalidEmail);
        }

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
    }
}

impl ContactMessage {
    pub fn email_body(&self) -> String {
        format!(
            "New Contact Form Submission from Wadi Rum Website\n\n\
             Name: {}\n\
             Email: {}\n\n\
             Message:\n\
             {}\n",
            self.name, self.email, self.message
        )
    }

    /// Email to the camp; replies go straight back to the sender
    pub fn to_email(&self, from: &str, to: &str) -> OutboundEmail {
        OutboundEmail {
            from: from.to_string(),
            to: vec![to.to_string()],
            subject: format!("New Contact Form Submission from {}", self.name),
            text: self.email_body(),
            reply_to: Some(self.email.clone()),
        }
    }
}

/// Loose shape check: one `@` with something on both sides and a dot in the domain
pub fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && !email.contains(char::is_whitespace)
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, message: &str) -> ContactRequest {
        ContactRequest {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_valid_message_is_trimmed() {
        let msg = ContactMessage::try_from(request(" Omar ", "omar@example.com ", " Hi ")).unwrap();
        assert_eq!(msg.name, "Omar");
        assert_eq!(msg.email, "omar@example.com");
        assert_eq!(msg.message, "Hi");
    }

    #[test]
    fn test_missing_fields() {
        for req in [
            request("", "a@example.com", "hi"),
            request("Omar", "   ", "hi"),
            request("Omar", "a@example.com", ""),
        ] {
            let err = ContactMessage::try_from(req).unwrap_err();
            assert_eq!(err, ContactError::MissingFields);
            assert_eq!(err.to_string(), "Please fill out all required fields");
        }
    }

    #[test]
    fn test_invalid_email() {
        let err = ContactMessage::try_from(request("Omar", "not-an-email", "hi")).unwrap_err();
        assert_eq!(err, ContactError::InvalidEmail);
    }

    #[test]
    fn test_is_plausible_email() {
        assert!(is_plausible_email("a@example.com"));
        assert!(is_plausible_email("first.last@camp.example.jo"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("a@example"));
        assert!(!is_plausible_email("a@@example.com"));
        assert!(!is_plausible_email("a b@example.com"));
        assert!(!is_plausible_email("a@.com"));
    }

    #[test]
    fn test_to_email() {
        let msg = ContactMessage::try_from(request("Omar", "omar@example.com", "Is March busy?"))
            .unwrap();
        let email = msg.to_email("Wadi Rum Contact <onboarding@resend.dev>", "owner@example.com");
        assert_eq!(email.subject, "New Contact Form Submission from Omar");
        assert_eq!(email.reply_to.as_deref(), Some("omar@example.com"));
        assert_eq!(email.to, vec!["owner@example.com"]);
        assert!(email.text.contains("Name: Omar\nEmail: omar@example.com\n\nMessage:\nIs March busy?"));
    }
}
