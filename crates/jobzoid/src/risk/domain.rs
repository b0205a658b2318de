use serde::{Deserialize, Serialize};

/// Raw email header triple received from the mail collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailHeader {
    pub subject: String,
    pub from: String,
    #[serde(default)]
    pub date: Option<String>,
}

/// Discrete response categories inferred from inbound email headers.
///
/// Only `Interview`, `Rejection`, and `Ack` carry scoring weight; `Ats` and
/// `Unknown` are informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalKind {
    Interview,
    Rejection,
    Ack,
    Ats,
    Unknown,
}

impl SignalKind {
    /// Contribution of one signal of this kind to the response value.
    pub fn response_weight(self) -> f64 {
        match self {
            SignalKind::Interview => 10.0,
            SignalKind::Rejection => 2.0,
            SignalKind::Ack => 0.5,
            SignalKind::Ats | SignalKind::Unknown => 0.0,
        }
    }
}

/// A classified inference drawn from a single inbound email header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSignal {
    #[serde(rename = "type")]
    pub kind: SignalKind,
    pub confidence: f64,
    #[serde(default)]
    pub timestamp: Option<String>,
    pub company_hint: String,
}

/// Immutable snapshot of the effort an applicant has sunk into one posting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffortMetrics {
    pub time_spent_minutes: f64,
    pub fields_filled: u32,
    pub ats_redirects: u32,
    pub uploads: u32,
}

impl EffortMetrics {
    /// Reject malformed snapshots before any score is computed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.time_spent_minutes.is_finite() {
            return Err(ValidationError::NonFiniteEffort {
                field: "time_spent_minutes",
            });
        }
        if self.time_spent_minutes < 0.0 {
            return Err(ValidationError::NegativeEffort {
                field: "time_spent_minutes",
                value: self.time_spent_minutes,
            });
        }
        Ok(())
    }
}

/// Input rejected before computation; never partially applied.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be non-negative, got {value}")]
    NegativeEffort { field: &'static str, value: f64 },
    #[error("{field} must be a finite number")]
    NonFiniteEffort { field: &'static str },
}

/// Read-only aggregate of how a company has historically treated applicants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompanyHistory {
    pub avg_sink_score: f64,
}

/// Verdict bands for the energy-sink score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SinkRecommendation {
    Apply,
    Caution,
    Avoid,
}

/// Verdict bands for the ghost-listing likelihood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GhostRecommendation {
    Safe,
    Caution,
    Avoid,
}

/// Derived energy-sink verdict; never persisted by this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinkResult {
    pub score: f64,
    pub raw_effort: f64,
    pub response_value: f64,
    pub recommendation: SinkRecommendation,
    pub alert: bool,
}

/// Derived ghost-listing verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GhostResult {
    pub likelihood: f64,
    pub is_ghost: bool,
    pub recommendation: GhostRecommendation,
}

/// Round to one decimal place, matching the wire precision of the scores.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
