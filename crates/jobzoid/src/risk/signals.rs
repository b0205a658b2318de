use super::domain::{EmailHeader, ResponseSignal, SignalKind};

/// Confidence assigned to every keyword-matched signal.
const MATCH_CONFIDENCE: f64 = 0.9;

/// One priority-ordered classification rule.
///
/// The rule table is deliberately a plain data structure rather than control
/// flow: the first rule whose keyword set matches the header wins, so the
/// table order IS the tie-break policy.
#[derive(Debug, Clone, Copy)]
pub struct SignalRule {
    pub kind: SignalKind,
    pub keywords: &'static [&'static str],
}

/// Ordered rule table; interview invitations outrank rejection phrasing.
pub const CLASSIFICATION_RULES: &[SignalRule] = &[
    SignalRule {
        kind: SignalKind::Interview,
        keywords: &["interview", "schedule", "availability", "calendly", "meet"],
    },
    SignalRule {
        kind: SignalKind::Rejection,
        keywords: &[
            "regret",
            "moving forward",
            "other candidates",
            "thank you for your interest",
        ],
    },
    SignalRule {
        kind: SignalKind::Ack,
        keywords: &["received", "application", "confirming"],
    },
    SignalRule {
        kind: SignalKind::Ats,
        keywords: &["greenhouse", "workday", "lever", "breezy", "icims"],
    },
];

/// Label raw email headers with response signals.
///
/// Matching is case-insensitive substring membership against either the
/// subject or the sender; headers that match no rule are dropped entirely.
pub fn classify(headers: &[EmailHeader]) -> Vec<ResponseSignal> {
    headers.iter().filter_map(classify_header).collect()
}

fn classify_header(header: &EmailHeader) -> Option<ResponseSignal> {
    let subject = header.subject.to_lowercase();
    let from = header.from.to_lowercase();

    let rule = CLASSIFICATION_RULES.iter().find(|rule| {
        rule.keywords
            .iter()
            .any(|keyword| subject.contains(keyword) || from.contains(keyword))
    })?;

    Some(ResponseSignal {
        kind: rule.kind,
        confidence: MATCH_CONFIDENCE,
        timestamp: header.date.clone(),
        company_hint: company_hint(&from),
    })
}

/// Domain segment of the sender address: the part after `@` and before the
/// first `.` (e.g. `recruiting@stripe.com` -> `stripe`).
fn company_hint(from: &str) -> String {
    let domain = from.rsplit('@').next().unwrap_or(from);
    domain.split('.').next().unwrap_or(domain).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(subject: &str, from: &str) -> EmailHeader {
        EmailHeader {
            subject: subject.to_string(),
            from: from.to_string(),
            date: Some("2026-08-12T09:00:00Z".to_string()),
        }
    }

    #[test]
    fn interview_wins_the_tie_break_over_rejection() {
        let signals = classify(&[header(
            "Interview schedule - thank you for your interest",
            "talent@globex.com",
        )]);

        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].kind, SignalKind::Interview);
    }

    #[test]
    fn unmatched_headers_are_dropped() {
        let signals = classify(&[header("Weekly newsletter", "digest@news.example.org")]);
        assert!(signals.is_empty());
    }

    #[test]
    fn sender_field_alone_can_match() {
        let signals = classify(&[header("Next steps", "no-reply@greenhouse.io")]);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].kind, SignalKind::Ats);
        assert_eq!(signals[0].company_hint, "greenhouse");
    }

    #[test]
    fn matched_signals_carry_fixed_confidence_and_timestamp() {
        let signals = classify(&[header("Application received", "jobs@initech.com")]);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].kind, SignalKind::Ack);
        assert_eq!(signals[0].confidence, 0.9);
        assert_eq!(
            signals[0].timestamp.as_deref(),
            Some("2026-08-12T09:00:00Z")
        );
        assert_eq!(signals[0].company_hint, "initech");
    }

    #[test]
    fn company_hint_tolerates_missing_at_sign() {
        let signals = classify(&[header("Interview loop", "workday")]);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].company_hint, "workday");
    }

    #[test]
    fn rule_table_checks_interview_first() {
        assert_eq!(CLASSIFICATION_RULES[0].kind, SignalKind::Interview);
        assert_eq!(CLASSIFICATION_RULES[1].kind, SignalKind::Rejection);
        assert_eq!(CLASSIFICATION_RULES[2].kind, SignalKind::Ack);
        assert_eq!(CLASSIFICATION_RULES[3].kind, SignalKind::Ats);
    }
}
