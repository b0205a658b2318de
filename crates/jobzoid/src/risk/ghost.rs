use super::domain::{round1, CompanyHistory, GhostRecommendation, GhostResult};

/// Phrases that mark an evergreen posting kept open without hiring intent.
pub const EVERGREEN_PHRASES: &[&str] = &[
    "always hiring",
    "talent pipeline",
    "potential future open",
    "future consideration",
];

/// Starting likelihood when no company history aggregate exists.
const DEFAULT_BASE_LIKELIHOOD: f64 = 30.0;
/// Added when the description contains any evergreen phrase.
const EVERGREEN_PENALTY: f64 = 45.0;

const AVOID_THRESHOLD: f64 = 75.0;
const CAUTION_THRESHOLD: f64 = 40.0;

/// Estimate how likely a posting is a ghost listing.
///
/// The company's average sink score seeds the likelihood; evergreen phrasing
/// in the description adds a fixed penalty, clamped to [0, 100].
pub fn ghost_likelihood(description: &str, history: Option<&CompanyHistory>) -> GhostResult {
    let base = history
        .map(|history| history.avg_sink_score)
        .unwrap_or(DEFAULT_BASE_LIKELIHOOD);

    let text = description.to_lowercase();
    let evergreen = EVERGREEN_PHRASES.iter().any(|phrase| text.contains(phrase));

    let mut likelihood = base;
    if evergreen {
        likelihood += EVERGREEN_PENALTY;
    }
    let likelihood = round1(likelihood.clamp(0.0, 100.0));

    let recommendation = if likelihood > AVOID_THRESHOLD {
        GhostRecommendation::Avoid
    } else if likelihood > CAUTION_THRESHOLD {
        GhostRecommendation::Caution
    } else {
        GhostRecommendation::Safe
    };

    GhostResult {
        likelihood,
        is_ghost: likelihood > AVOID_THRESHOLD,
        recommendation,
    }
}
