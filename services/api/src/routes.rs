use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use jobzoid::auth::{auth_router, MailSender, OtpService, OtpStore};
use jobzoid::error::AppError;
use jobzoid::risk::{
    classify, ApplicationAssessment, AuthenticityPredictor, CompanyHistoryProvider, EffortMetrics,
    EmailHeader, JobSnapshot, ResponseSignal, RiskEngine, RiskVerdict,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct MailAnalysisRequest {
    pub(crate) headers: Vec<EmailHeader>,
}

#[derive(Debug, Serialize)]
pub(crate) struct MailAnalysisResponse {
    pub(crate) signal_count: usize,
    pub(crate) signals: Vec<ResponseSignal>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobAnalysisRequest {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) company: String,
    /// Effort observed so far; defaults to the initial-application snapshot
    /// when the extension has not reported metrics yet.
    #[serde(default)]
    pub(crate) effort: Option<EffortMetrics>,
    #[serde(default)]
    pub(crate) headers: Vec<EmailHeader>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    pub(crate) effort: EffortMetrics,
    #[serde(default)]
    pub(crate) headers: Vec<EmailHeader>,
}

/// Effort assumed for a posting the applicant has just started on.
pub(crate) fn initial_effort() -> EffortMetrics {
    EffortMetrics {
        time_spent_minutes: 15.0,
        fields_filled: 10,
        ats_redirects: 1,
        uploads: 1,
    }
}

/// Compose the OTP router, the risk endpoints, and the operational routes.
pub(crate) fn app_router<S, M, P, H>(
    otp: Arc<OtpService<S, M>>,
    engine: Arc<RiskEngine<P, H>>,
) -> Router
where
    S: OtpStore + 'static,
    M: MailSender + 'static,
    P: AuthenticityPredictor + 'static,
    H: CompanyHistoryProvider + 'static,
{
    auth_router(otp)
        .merge(risk_router(engine))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

fn risk_router<P, H>(engine: Arc<RiskEngine<P, H>>) -> Router
where
    P: AuthenticityPredictor + 'static,
    H: CompanyHistoryProvider + 'static,
{
    Router::new()
        .route("/api/v1/mail/analyze", post(mail_analyze_endpoint))
        .route("/api/v1/risk/analyze", post(analyze_endpoint::<P, H>))
        .route("/api/v1/risk/score", post(score_endpoint::<P, H>))
        .with_state(engine)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn mail_analyze_endpoint(
    Json(payload): Json<MailAnalysisRequest>,
) -> Json<MailAnalysisResponse> {
    let signals = classify(&payload.headers);
    Json(MailAnalysisResponse {
        signal_count: signals.len(),
        signals,
    })
}

pub(crate) async fn analyze_endpoint<P, H>(
    axum::extract::State(engine): axum::extract::State<Arc<RiskEngine<P, H>>>,
    Json(payload): Json<JobAnalysisRequest>,
) -> Result<Json<RiskVerdict>, AppError>
where
    P: AuthenticityPredictor + 'static,
    H: CompanyHistoryProvider + 'static,
{
    let JobAnalysisRequest {
        title,
        description,
        company,
        effort,
        headers,
    } = payload;

    let job = JobSnapshot {
        title,
        description,
        company,
    };
    let effort = effort.unwrap_or_else(initial_effort);
    let verdict = engine.assess(&job, &effort, &headers)?;
    Ok(Json(verdict))
}

pub(crate) async fn score_endpoint<P, H>(
    axum::extract::State(engine): axum::extract::State<Arc<RiskEngine<P, H>>>,
    Json(payload): Json<ScoreRequest>,
) -> Result<Json<ApplicationAssessment>, AppError>
where
    P: AuthenticityPredictor + 'static,
    H: CompanyHistoryProvider + 'static,
{
    let assessment = engine.score_application(&payload.effort, &payload.headers)?;
    Ok(Json(assessment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryCompanyHistory;
    use axum::extract::State;
    use jobzoid::risk::{
        ConstantAuthenticity, GhostRecommendation, ScoringWeights, SignalKind, SinkRecommendation,
    };

    fn build_engine() -> Arc<RiskEngine<ConstantAuthenticity, InMemoryCompanyHistory>> {
        Arc::new(RiskEngine::new(
            Arc::new(ConstantAuthenticity::default()),
            Arc::new(InMemoryCompanyHistory::seeded()),
            ScoringWeights::default(),
        ))
    }

    fn header(subject: &str, from: &str) -> EmailHeader {
        EmailHeader {
            subject: subject.to_string(),
            from: from.to_string(),
            date: None,
        }
    }

    #[tokio::test]
    async fn mail_analyze_drops_unmatched_headers() {
        let request = MailAnalysisRequest {
            headers: vec![
                header("Interview availability", "talent@stripe.com"),
                header("Lunch on Friday?", "friend@example.com"),
            ],
        };

        let Json(body) = mail_analyze_endpoint(Json(request)).await;

        assert_eq!(body.signal_count, 1);
        assert_eq!(body.signals[0].kind, SignalKind::Interview);
        assert_eq!(body.signals[0].company_hint, "stripe");
    }

    #[tokio::test]
    async fn analyze_endpoint_returns_a_composite_verdict() {
        let engine = build_engine();
        let request = JobAnalysisRequest {
            title: "Senior Frontend Developer".to_string(),
            description: "Join our talent pipeline for future consideration".to_string(),
            company: "ABC Corp".to_string(),
            effort: None,
            headers: Vec::new(),
        };

        let Json(body) = analyze_endpoint(State(engine), Json(request))
            .await
            .expect("verdict builds");

        assert_eq!(body.company, "ABC Corp");
        assert_eq!(body.authenticity_score, 85.0);
        // Seeded aggregate 72.0 plus the evergreen penalty, clamped.
        assert_eq!(body.ghost.likelihood, 100.0);
        assert!(body.ghost.is_ghost);
        assert_eq!(body.ghost.recommendation, GhostRecommendation::Avoid);
        // Initial-snapshot effort: raw = 0.4*15 + 0.3*10 + 0.2 + 0.1 = 9.3
        assert_eq!(body.sink.raw_effort, 9.3);
        assert_eq!(body.sink.score, 93.0);
    }

    #[tokio::test]
    async fn score_endpoint_classifies_and_scores() {
        let engine = build_engine();
        let request = ScoreRequest {
            effort: EffortMetrics {
                time_spent_minutes: 45.0,
                fields_filled: 20,
                ats_redirects: 2,
                uploads: 2,
            },
            headers: vec![header("Application received", "jobs@stripe.com")],
        };

        let Json(body) = score_endpoint(State(engine), Json(request))
            .await
            .expect("assessment builds");

        assert_eq!(body.signals.len(), 1);
        assert_eq!(body.sink.raw_effort, 24.6);
        assert_eq!(body.sink.response_value, 0.5);
        assert_eq!(body.sink.score, 100.0);
        assert_eq!(body.sink.recommendation, SinkRecommendation::Avoid);
        assert!(body.sink.alert);
    }

    #[tokio::test]
    async fn score_endpoint_rejects_negative_effort() {
        let engine = build_engine();
        let request = ScoreRequest {
            effort: EffortMetrics {
                time_spent_minutes: -1.0,
                fields_filled: 0,
                ats_redirects: 0,
                uploads: 0,
            },
            headers: Vec::new(),
        };

        let result = score_endpoint(State(engine), Json(request)).await;
        assert!(matches!(
            result,
            Err(AppError::Risk(
                jobzoid::risk::RiskEngineError::Validation(_)
            ))
        ));
    }
}
