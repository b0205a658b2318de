//! Applicant risk scoring: signal classification, energy-sink scoring,
//! ghost-listing heuristics, and the facade composing them.

pub mod domain;
pub mod engine;
pub mod ghost;
pub mod scoring;
pub mod signals;

pub use domain::{
    CompanyHistory, EffortMetrics, EmailHeader, GhostRecommendation, GhostResult, ResponseSignal,
    SignalKind, SinkRecommendation, SinkResult, ValidationError,
};
pub use engine::{
    ApplicationAssessment, AuthenticityPredictor, CompanyHistoryProvider, ConstantAuthenticity,
    HistoryError, JobSnapshot, PredictorError, RiskEngine, RiskEngineError, RiskVerdict,
};
pub use ghost::{ghost_likelihood, EVERGREEN_PHRASES};
pub use scoring::{ScoringWeights, SinkScoreEngine};
pub use signals::{classify, SignalRule, CLASSIFICATION_RULES};
