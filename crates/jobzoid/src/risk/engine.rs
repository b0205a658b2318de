use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::domain::{
    CompanyHistory, EffortMetrics, EmailHeader, GhostResult, ResponseSignal, SinkResult,
    ValidationError,
};
use super::ghost::ghost_likelihood;
use super::scoring::{ScoringWeights, SinkScoreEngine};
use super::signals::classify;

/// Capability seam for the external text-authenticity model.
pub trait AuthenticityPredictor: Send + Sync {
    /// Probability (0-100) that the posting text describes a real opening.
    fn predict(&self, text: &str) -> Result<f64, PredictorError>;
}

/// Default predictor selected at startup when no trained model is wired in.
#[derive(Debug, Clone, Copy)]
pub struct ConstantAuthenticity {
    score: f64,
}

impl ConstantAuthenticity {
    pub fn new(score: f64) -> Self {
        Self {
            score: score.clamp(0.0, 100.0),
        }
    }
}

impl Default for ConstantAuthenticity {
    fn default() -> Self {
        Self::new(85.0)
    }
}

impl AuthenticityPredictor for ConstantAuthenticity {
    fn predict(&self, _text: &str) -> Result<f64, PredictorError> {
        Ok(self.score)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    #[error("authenticity model unavailable: {0}")]
    Unavailable(String),
}

/// Read-only provider of per-company applicant-treatment aggregates.
pub trait CompanyHistoryProvider: Send + Sync {
    fn history(&self, company: &str) -> Result<Option<CompanyHistory>, HistoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("company history source unavailable: {0}")]
    Unavailable(String),
}

/// Failure raised by the facade; dependency errors propagate untouched.
#[derive(Debug, thiserror::Error)]
pub enum RiskEngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Predictor(#[from] PredictorError),
    #[error(transparent)]
    History(#[from] HistoryError),
}

/// Posting under assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub title: String,
    pub description: String,
    pub company: String,
}

/// Classified signals plus the sink score they produce for one application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationAssessment {
    pub signals: Vec<ResponseSignal>,
    pub sink: SinkResult,
}

/// Composite verdict for a job/applicant pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskVerdict {
    pub company: String,
    pub authenticity_score: f64,
    pub signals: Vec<ResponseSignal>,
    pub sink: SinkResult,
    pub ghost: GhostResult,
}

/// Facade composing the classifier, sink scoring, ghost heuristic, and the
/// external authenticity/history collaborators. Composition only; no
/// decision logic of its own.
pub struct RiskEngine<P, H> {
    predictor: Arc<P>,
    history: Arc<H>,
    scoring: SinkScoreEngine,
}

impl<P, H> RiskEngine<P, H>
where
    P: AuthenticityPredictor,
    H: CompanyHistoryProvider,
{
    pub fn new(predictor: Arc<P>, history: Arc<H>, weights: ScoringWeights) -> Self {
        Self {
            predictor,
            history,
            scoring: SinkScoreEngine::new(weights),
        }
    }

    /// Classify raw headers and score the applicant's effort against them.
    pub fn score_application(
        &self,
        effort: &EffortMetrics,
        headers: &[EmailHeader],
    ) -> Result<ApplicationAssessment, RiskEngineError> {
        let signals = classify(headers);
        let sink = self.scoring.score(effort, &signals)?;
        Ok(ApplicationAssessment { signals, sink })
    }

    /// Full verdict for one job/applicant pair.
    pub fn assess(
        &self,
        job: &JobSnapshot,
        effort: &EffortMetrics,
        headers: &[EmailHeader],
    ) -> Result<RiskVerdict, RiskEngineError> {
        let ApplicationAssessment { signals, sink } = self.score_application(effort, headers)?;

        let history = self.history.history(&job.company)?;
        let ghost = ghost_likelihood(&job.description, history.as_ref());

        let posting_text = format!("{} {}", job.title, job.description);
        let authenticity_score = self.predictor.predict(&posting_text)?;

        Ok(RiskVerdict {
            company: job.company.clone(),
            authenticity_score,
            signals,
            sink,
            ghost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::domain::{SignalKind, SinkRecommendation};

    struct NoHistory;

    impl CompanyHistoryProvider for NoHistory {
        fn history(&self, _company: &str) -> Result<Option<CompanyHistory>, HistoryError> {
            Ok(None)
        }
    }

    struct BrokenHistory;

    impl CompanyHistoryProvider for BrokenHistory {
        fn history(&self, _company: &str) -> Result<Option<CompanyHistory>, HistoryError> {
            Err(HistoryError::Unavailable("aggregate store offline".into()))
        }
    }

    fn engine<H: CompanyHistoryProvider>(
        history: H,
    ) -> RiskEngine<ConstantAuthenticity, H> {
        RiskEngine::new(
            Arc::new(ConstantAuthenticity::default()),
            Arc::new(history),
            ScoringWeights::default(),
        )
    }

    fn job() -> JobSnapshot {
        JobSnapshot {
            title: "Staff Engineer".to_string(),
            description: "Build billing infrastructure with a small team".to_string(),
            company: "Initech".to_string(),
        }
    }

    fn effort() -> EffortMetrics {
        EffortMetrics {
            time_spent_minutes: 45.0,
            fields_filled: 20,
            ats_redirects: 2,
            uploads: 2,
        }
    }

    #[test]
    fn assess_combines_all_four_components() {
        let engine = engine(NoHistory);
        let headers = vec![EmailHeader {
            subject: "Application received".to_string(),
            from: "jobs@initech.com".to_string(),
            date: None,
        }];

        let verdict = engine.assess(&job(), &effort(), &headers).expect("verdict");

        assert_eq!(verdict.company, "Initech");
        assert_eq!(verdict.authenticity_score, 85.0);
        assert_eq!(verdict.signals.len(), 1);
        assert_eq!(verdict.signals[0].kind, SignalKind::Ack);
        assert_eq!(verdict.sink.score, 100.0);
        assert_eq!(verdict.sink.recommendation, SinkRecommendation::Avoid);
        assert!(verdict.sink.alert);
        assert_eq!(verdict.ghost.likelihood, 30.0);
    }

    #[test]
    fn history_failures_propagate_to_the_caller() {
        let engine = engine(BrokenHistory);
        let result = engine.assess(&job(), &effort(), &[]);
        assert!(matches!(result, Err(RiskEngineError::History(_))));
    }

    #[test]
    fn validation_failures_propagate_before_any_collaborator_is_hit() {
        let engine = engine(BrokenHistory);
        let bad_effort = EffortMetrics {
            time_spent_minutes: -5.0,
            ..effort()
        };
        let result = engine.assess(&job(), &bad_effort, &[]);
        assert!(matches!(result, Err(RiskEngineError::Validation(_))));
    }
}
