use super::domain::{
    round1, EffortMetrics, ResponseSignal, SinkRecommendation, SinkResult, ValidationError,
};
use serde::{Deserialize, Serialize};

/// Effort weights for the energy-sink formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub time_spent: f64,
    pub fields_filled: f64,
    pub ats_redirects: f64,
    pub uploads: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            time_spent: 0.4,
            fields_filled: 0.3,
            ats_redirects: 0.2,
            uploads: 0.1,
        }
    }
}

const AVOID_THRESHOLD: f64 = 75.0;
const CAUTION_THRESHOLD: f64 = 40.0;
const ALERT_THRESHOLD: f64 = 80.0;

/// Stateless engine computing the energy-sink score.
///
/// `score = min(100, raw_effort / max(1, response_value) * 10)`; high effort
/// with no substantive employer response inflates the score, any response
/// dampens it proportionally.
#[derive(Debug, Clone, Default)]
pub struct SinkScoreEngine {
    weights: ScoringWeights,
}

impl SinkScoreEngine {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn score(
        &self,
        effort: &EffortMetrics,
        signals: &[ResponseSignal],
    ) -> Result<SinkResult, ValidationError> {
        effort.validate()?;

        let raw_effort = self.weights.time_spent * effort.time_spent_minutes
            + self.weights.fields_filled * f64::from(effort.fields_filled)
            + self.weights.ats_redirects * f64::from(effort.ats_redirects)
            + self.weights.uploads * f64::from(effort.uploads);

        let response_value: f64 = signals
            .iter()
            .map(|signal| signal.kind.response_weight())
            .sum();

        // The max(1, ..) guard keeps the formula total when no signal has
        // been observed yet.
        let sink_score = (raw_effort / response_value.max(1.0) * 10.0).min(100.0);

        let recommendation = if sink_score > AVOID_THRESHOLD {
            SinkRecommendation::Avoid
        } else if sink_score > CAUTION_THRESHOLD {
            SinkRecommendation::Caution
        } else {
            SinkRecommendation::Apply
        };

        Ok(SinkResult {
            score: round1(sink_score),
            raw_effort: round1(raw_effort),
            response_value,
            recommendation,
            alert: sink_score > ALERT_THRESHOLD,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::domain::SignalKind;

    fn signal(kind: SignalKind) -> ResponseSignal {
        ResponseSignal {
            kind,
            confidence: 0.9,
            timestamp: None,
            company_hint: "globex".to_string(),
        }
    }

    fn effort(time: f64, fields: u32, redirects: u32, uploads: u32) -> EffortMetrics {
        EffortMetrics {
            time_spent_minutes: time,
            fields_filled: fields,
            ats_redirects: redirects,
            uploads,
        }
    }

    #[test]
    fn empty_signal_list_scores_ten_times_raw_effort() {
        let engine = SinkScoreEngine::default();
        let result = engine.score(&effort(5.0, 4, 1, 1), &[]).expect("scores");

        // raw = 0.4*5 + 0.3*4 + 0.2*1 + 0.1*1 = 3.5
        assert_eq!(result.raw_effort, 3.5);
        assert_eq!(result.response_value, 0.0);
        assert_eq!(result.score, 35.0);
        assert_eq!(result.recommendation, SinkRecommendation::Apply);
        assert!(!result.alert);
    }

    #[test]
    fn score_never_exceeds_one_hundred() {
        let engine = SinkScoreEngine::default();
        let result = engine
            .score(&effort(10_000.0, 500, 40, 12), &[])
            .expect("scores");
        assert_eq!(result.score, 100.0);
        assert!(result.alert);
    }

    #[test]
    fn responses_dampen_the_score_monotonically() {
        let engine = SinkScoreEngine::default();
        let effort = effort(120.0, 30, 4, 3);

        let ladders = [
            vec![],
            vec![signal(SignalKind::Ack)],
            vec![signal(SignalKind::Rejection)],
            vec![signal(SignalKind::Rejection), signal(SignalKind::Ack)],
            vec![signal(SignalKind::Interview)],
            vec![signal(SignalKind::Interview), signal(SignalKind::Interview)],
        ];

        let mut previous = f64::INFINITY;
        for signals in &ladders {
            let result = engine.score(&effort, signals).expect("scores");
            assert!(
                result.score <= previous,
                "score {} rose above {} with more response weight",
                result.score,
                previous
            );
            previous = result.score;
        }
    }

    #[test]
    fn informational_signals_do_not_change_the_score() {
        let engine = SinkScoreEngine::default();
        let effort = effort(45.0, 20, 2, 2);

        let bare = engine.score(&effort, &[]).expect("scores");
        let with_ats = engine
            .score(&effort, &[signal(SignalKind::Ats), signal(SignalKind::Unknown)])
            .expect("scores");

        assert_eq!(bare.score, with_ats.score);
    }

    #[test]
    fn spec_example_single_ack_still_saturates() {
        let engine = SinkScoreEngine::default();
        let result = engine
            .score(&effort(45.0, 20, 2, 2), &[signal(SignalKind::Ack)])
            .expect("scores");

        assert_eq!(result.raw_effort, 24.6);
        assert_eq!(result.response_value, 0.5);
        assert_eq!(result.score, 100.0);
        assert_eq!(result.recommendation, SinkRecommendation::Avoid);
        assert!(result.alert);
    }

    #[test]
    fn alert_tracks_the_eighty_point_threshold() {
        let engine = SinkScoreEngine::default();

        // raw = 0.4*20 = 8.0 -> score 80.0, on the boundary: no alert.
        let boundary = engine.score(&effort(20.0, 0, 0, 0), &[]).expect("scores");
        assert_eq!(boundary.score, 80.0);
        assert!(!boundary.alert);
        assert_eq!(boundary.recommendation, SinkRecommendation::Avoid);

        let above = engine.score(&effort(20.5, 0, 0, 0), &[]).expect("scores");
        assert_eq!(above.score, 82.0);
        assert!(above.alert);
    }

    #[test]
    fn caution_band_sits_between_forty_and_seventy_five() {
        let engine = SinkScoreEngine::default();
        // raw = 0.4*15 = 6.0 -> score 60.0
        let result = engine.score(&effort(15.0, 0, 0, 0), &[]).expect("scores");
        assert_eq!(result.score, 60.0);
        assert_eq!(result.recommendation, SinkRecommendation::Caution);
    }

    #[test]
    fn invalid_effort_is_rejected_before_scoring() {
        let engine = SinkScoreEngine::default();
        let result = engine.score(&effort(-3.0, 1, 0, 0), &[]);
        assert!(matches!(
            result,
            Err(ValidationError::NegativeEffort { .. })
        ));
    }
}
