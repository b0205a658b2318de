use tracing::info;

/// Outbound delivery seam for verification codes.
///
/// The SMTP transport itself lives outside this crate; implementations only
/// promise to hand the code to some channel or fail loudly.
pub trait MailSender: Send + Sync {
    fn deliver(&self, identity: &str, code: &str) -> Result<(), DeliveryError>;
}

/// Delivery failure; never retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("mail transport unavailable: {0}")]
    Transport(String),
}

/// Fallback sender used when no SMTP transport is configured: the code is
/// written to the structured log instead of an outbox.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailSender;

impl MailSender for LogMailSender {
    fn deliver(&self, identity: &str, code: &str) -> Result<(), DeliveryError> {
        info!(identity, code, "verification code issued (log delivery)");
        Ok(())
    }
}
