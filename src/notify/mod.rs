//! Outbound notifications.
//!
//! Contact messages and booking requests leave the service as plain-text
//! emails through a [`Notifier`]. Each send is a single attempt; failures are
//! reported to the caller and never retried.

mod log;
mod resend;

use async_trait::async_trait;
use serde::Serialize;

pub use self::log::LogNotifier;
pub use self::resend::{ResendNotifier, DEFAULT_API_URL};

/// A plain-text email ready to hand to a transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

/// Proof of hand-off returned by the transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReceipt {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotifyError {
    #[error("{0}")]
    Transport(String),

    #[error("{message} (status {status})")]
    Api { status: u16, message: String },

    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

/// "Send message" capability used by the form handlers
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, NotifyError>;

    /// Short transport name for logs
    fn name(&self) -> &'static str;
}

/// Mask an API key for logging, keeping the first and last four characters.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
