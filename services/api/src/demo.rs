use crate::infra::InMemoryCompanyHistory;
use clap::Args;
use jobzoid::error::AppError;
use jobzoid::risk::{
    ConstantAuthenticity, EffortMetrics, EmailHeader, JobSnapshot, RiskEngine, ScoringWeights,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreReportArgs {
    /// Minutes the applicant has spent on this posting
    #[arg(long)]
    pub(crate) time_spent: f64,
    /// Number of form fields filled manually
    #[arg(long, default_value_t = 0)]
    pub(crate) fields_filled: u32,
    /// Number of ATS redirects followed
    #[arg(long, default_value_t = 0)]
    pub(crate) ats_redirects: u32,
    /// Resume/cover-letter uploads
    #[arg(long, default_value_t = 0)]
    pub(crate) uploads: u32,
    /// Observed email header in `from|subject` form (repeatable)
    #[arg(long = "header", value_parser = crate::infra::parse_header)]
    pub(crate) headers: Vec<EmailHeader>,
    /// Posting title, used for the authenticity estimate
    #[arg(long, default_value = "")]
    pub(crate) title: String,
    /// Posting description; enables the ghost-listing section
    #[arg(long)]
    pub(crate) description: Option<String>,
    /// Company name, used to look up the history aggregate
    #[arg(long, default_value = "unknown")]
    pub(crate) company: String,
}

pub(crate) fn run_score_report(args: ScoreReportArgs) -> Result<(), AppError> {
    let effort = EffortMetrics {
        time_spent_minutes: args.time_spent,
        fields_filled: args.fields_filled,
        ats_redirects: args.ats_redirects,
        uploads: args.uploads,
    };

    let engine = RiskEngine::new(
        Arc::new(ConstantAuthenticity::default()),
        Arc::new(InMemoryCompanyHistory::seeded()),
        ScoringWeights::default(),
    );

    println!("Applicant risk report for {}", args.company);

    let assessment = match &args.description {
        Some(description) => {
            let job = JobSnapshot {
                title: args.title.clone(),
                description: description.clone(),
                company: args.company.clone(),
            };
            let verdict = engine.assess(&job, &effort, &args.headers)?;

            println!("\nGhost-listing heuristic");
            println!("- likelihood: {:.1}", verdict.ghost.likelihood);
            println!("- ghost listing: {}", verdict.ghost.is_ghost);
            println!("- recommendation: {:?}", verdict.ghost.recommendation);
            println!("\nAuthenticity estimate: {:.1}", verdict.authenticity_score);

            jobzoid::risk::ApplicationAssessment {
                signals: verdict.signals,
                sink: verdict.sink,
            }
        }
        None => engine.score_application(&effort, &args.headers)?,
    };

    if assessment.signals.is_empty() {
        println!("\nResponse signals: none detected");
    } else {
        println!("\nResponse signals");
        for signal in &assessment.signals {
            println!(
                "- {:?} (confidence {:.1}) from {}",
                signal.kind, signal.confidence, signal.company_hint
            );
        }
    }

    println!("\nEnergy-sink score");
    println!("- raw effort: {:.1}", assessment.sink.raw_effort);
    println!("- response value: {:.1}", assessment.sink.response_value);
    println!("- score: {:.1}", assessment.sink.score);
    println!("- recommendation: {:?}", assessment.sink.recommendation);
    if assessment.sink.alert {
        println!("- ALERT: effort is sinking with no meaningful response");
    }

    Ok(())
}
