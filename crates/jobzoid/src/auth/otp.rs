use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::mail::{DeliveryError, MailSender};

/// Seconds a code stays valid unless configured otherwise.
pub const DEFAULT_TTL_SECS: i64 = 600;

/// One active code per identity; issuing again overwrites the prior record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    pub identity: String,
    pub code: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Keyed storage abstraction with explicit TTL support, so a durable or
/// distributed store can replace the in-memory map without touching the
/// verification logic.
pub trait OtpStore: Send + Sync {
    fn put(&self, record: OtpRecord) -> Result<(), StoreError>;
    fn get(&self, identity: &str) -> Result<Option<OtpRecord>, StoreError>;
    fn remove(&self, identity: &str) -> Result<(), StoreError>;
    /// Drop every record whose expiry lies before `now`; returns the count.
    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("otp store unavailable: {0}")]
    Unavailable(String),
}

/// Proof that the caller controls the email identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedIdentity {
    pub identity: String,
    pub verified_at: DateTime<Utc>,
}

/// Error raised while issuing a code. A delivery failure leaves the stored
/// record valid, so the client may simply request a fresh code.
#[derive(Debug, thiserror::Error)]
pub enum IssueError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Distinct verification failures so callers can present differentiated
/// messages; none are retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("code must be exactly six digits")]
    Malformed,
    #[error("no code was requested for this identity")]
    NotFound,
    #[error("code has expired")]
    Expired,
    #[error("code does not match")]
    Mismatch,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Issues and verifies short-lived one-time codes keyed by email identity.
pub struct OtpService<S, M> {
    store: Arc<S>,
    mail: Arc<M>,
    ttl: Duration,
}

impl<S, M> OtpService<S, M>
where
    S: OtpStore,
    M: MailSender,
{
    pub fn new(store: Arc<S>, mail: Arc<M>, ttl_secs: i64) -> Self {
        Self {
            store,
            mail,
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Generate, store, and deliver a fresh code for `identity`.
    pub fn issue(&self, identity: &str) -> Result<String, IssueError> {
        self.issue_at(identity, Utc::now())
    }

    /// Same as [`issue`](Self::issue) with the issuance instant supplied
    /// explicitly; tests drive expiry through this entry point.
    pub fn issue_at(&self, identity: &str, now: DateTime<Utc>) -> Result<String, IssueError> {
        let code = generate_code();
        self.store.put(OtpRecord {
            identity: identity.to_string(),
            code: code.clone(),
            issued_at: now,
            expires_at: now + self.ttl,
        })?;
        self.mail.deliver(identity, &code)?;
        Ok(code)
    }

    /// Check `code` against the active record for `identity`.
    ///
    /// A successful verification consumes the record, so a code cannot be
    /// replayed inside its validity window. Expiry is checked lazily here
    /// rather than by a background sweep.
    pub fn verify(&self, identity: &str, code: &str) -> Result<VerifiedIdentity, VerifyError> {
        self.verify_at(identity, code, Utc::now())
    }

    pub fn verify_at(
        &self,
        identity: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<VerifiedIdentity, VerifyError> {
        if !is_six_digits(code) {
            return Err(VerifyError::Malformed);
        }

        let record = self.store.get(identity)?.ok_or(VerifyError::NotFound)?;

        if now > record.expires_at {
            self.store.remove(identity)?;
            return Err(VerifyError::Expired);
        }

        if code != record.code {
            return Err(VerifyError::Mismatch);
        }

        self.store.remove(identity)?;
        Ok(VerifiedIdentity {
            identity: record.identity,
            verified_at: now,
        })
    }

    /// Memory-bounding sweep; verification never depends on it.
    pub fn purge_expired(&self) -> Result<usize, StoreError> {
        self.store.purge_expired(Utc::now())
    }
}

/// Uniformly random six-digit code, leading-zero-free by construction.
fn generate_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

fn is_six_digits(code: &str) -> bool {
    code.len() == 6 && code.bytes().all(|byte| byte.is_ascii_digit())
}
