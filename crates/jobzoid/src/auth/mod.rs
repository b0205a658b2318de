//! OTP issuance/verification lifecycle and its collaborator seams.

pub mod mail;
pub mod otp;
pub mod router;

pub use mail::{DeliveryError, LogMailSender, MailSender};
pub use otp::{
    IssueError, OtpRecord, OtpService, OtpStore, StoreError, VerifiedIdentity, VerifyError,
    DEFAULT_TTL_SECS,
};
pub use router::auth_router;
