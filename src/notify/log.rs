use async_trait::async_trait;
use uuid::Uuid;

use super::{DeliveryReceipt, Notifier, NotifyError, OutboundEmail};

/// Writes messages to the log instead of sending them. Used when no email
/// API key is configured.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, NotifyError> {
        let id = format!("log-{}", Uuid::new_v4());
        tracing::info!(
            id = %id,
            from = %email.from,
            to = ?email.to,
            reply_to = ?email.reply_to,
            "{}\n{}",
            email.subject,
            email.text
        );
        Ok(DeliveryReceipt { id })
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
