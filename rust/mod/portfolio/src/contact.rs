//! Contact form and its forwarder.
//!
//! The form validates locally, then hands the message to a
//! [`ContactForwarder`]. On success the fields are cleared; on failure they
//! are kept so the visitor can resubmit. There is no automatic retry.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

const MAX_FIELD_LEN: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ContactError {
    pub field: &'static str,
    pub reason: String,
}

impl ContactError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Required, length-capped fields and a plausible email address.
    pub fn validate(&self) -> Result<(), ContactError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(ContactError::new(field, "is required"));
            }
            if value.chars().count() > MAX_FIELD_LEN {
                return Err(ContactError::new(
                    field,
                    format!("must be at most {} characters", MAX_FIELD_LEN),
                ));
            }
        }
        if !is_email(self.email.trim()) {
            return Err(ContactError::new("email", "is not a valid email address"));
        }
        Ok(())
    }
}

fn is_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !s.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

/// The row the message store created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: String,
}

#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("transport: {0}")]
    Transport(String),

    #[error("rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Hands a validated message to the message store.
#[async_trait]
pub trait ContactForwarder: Send + Sync {
    async fn forward(&self, message: &ContactMessage) -> Result<StoredMessage, ForwardError>;
}

/// What to tell the visitor after a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Sent,
    Failed,
    Invalid(ContactError),
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Notice::Sent => "Message sent successfully!",
            Notice::Failed => "Failed to send message",
            Notice::Invalid(_) => "Please check the form",
        }
    }

    pub fn description(&self) -> String {
        match self {
            Notice::Sent => "Thank you for reaching out. I'll get back to you soon.".into(),
            Notice::Failed => "Please check your input and try again.".into(),
            Notice::Invalid(e) => e.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Sent)
    }
}

/// Input state of the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub fields: ContactMessage,
}

impl ContactForm {
    pub fn new(fields: ContactMessage) -> Self {
        Self { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields == ContactMessage::default()
    }

    pub async fn submit(&mut self, forwarder: &dyn ContactForwarder) -> Notice {
        if let Err(e) = self.fields.validate() {
            return Notice::Invalid(e);
        }
        match forwarder.forward(&self.fields).await {
            Ok(stored) => {
                info!(id = %stored.id, "contact message delivered");
                self.fields = ContactMessage::default();
                Notice::Sent
            }
            Err(e) => {
                warn!("contact message not delivered: {}", e);
                Notice::Failed
            }
        }
    }
}
