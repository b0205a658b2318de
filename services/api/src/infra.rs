use chrono::{DateTime, Utc};
use jobzoid::auth::{OtpRecord, OtpStore, StoreError};
use jobzoid::risk::{CompanyHistory, CompanyHistoryProvider, EmailHeader, HistoryError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-wide OTP storage; a mutex serializes the keyed read-modify-write
/// cycles the issue/verify pair performs.
#[derive(Default)]
pub(crate) struct InMemoryOtpStore {
    records: Mutex<HashMap<String, OtpRecord>>,
}

impl OtpStore for InMemoryOtpStore {
    fn put(&self, record: OtpRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("otp store mutex poisoned");
        guard.insert(record.identity.clone(), record);
        Ok(())
    }

    fn get(&self, identity: &str) -> Result<Option<OtpRecord>, StoreError> {
        let guard = self.records.lock().expect("otp store mutex poisoned");
        Ok(guard.get(identity).cloned())
    }

    fn remove(&self, identity: &str) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("otp store mutex poisoned");
        guard.remove(identity);
        Ok(())
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError> {
        let mut guard = self.records.lock().expect("otp store mutex poisoned");
        let before = guard.len();
        guard.retain(|_, record| record.expires_at >= now);
        Ok(before - guard.len())
    }
}

/// Read-only company aggregates, keyed case-insensitively. Built once at
/// startup; a durable provider can replace it behind the same trait.
pub(crate) struct InMemoryCompanyHistory {
    aggregates: HashMap<String, CompanyHistory>,
}

impl InMemoryCompanyHistory {
    pub(crate) fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let aggregates = entries
            .into_iter()
            .map(|(company, avg_sink_score)| {
                (company.to_lowercase(), CompanyHistory { avg_sink_score })
            })
            .collect();
        Self { aggregates }
    }

    /// Demo aggregates mirroring the seeded dashboard companies.
    pub(crate) fn seeded() -> Self {
        Self::new([
            ("ABC Corp".to_string(), 72.0),
            ("Meta".to_string(), 18.0),
            ("Stripe".to_string(), 42.0),
        ])
    }
}

impl CompanyHistoryProvider for InMemoryCompanyHistory {
    fn history(&self, company: &str) -> Result<Option<CompanyHistory>, HistoryError> {
        Ok(self.aggregates.get(&company.to_lowercase()).copied())
    }
}

/// Parse a `from|subject` pair into an email header for the CLI.
pub(crate) fn parse_header(raw: &str) -> Result<EmailHeader, String> {
    let (from, subject) = raw
        .split_once('|')
        .ok_or_else(|| format!("expected 'from|subject', got '{raw}'"))?;
    Ok(EmailHeader {
        subject: subject.trim().to_string(),
        from: from.trim().to_string(),
        date: None,
    })
}
