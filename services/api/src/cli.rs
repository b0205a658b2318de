use crate::demo::{run_score_report, ScoreReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use jobzoid::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "JobZoid Applicant Protection",
    about = "Run the applicant risk scoring service or evaluate a posting from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Offline risk evaluation helpers
    Risk {
        #[command(subcommand)]
        command: RiskCommand,
    },
}

#[derive(Subcommand, Debug)]
enum RiskCommand {
    /// Score applicant effort against observed email signals
    Score(ScoreReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Risk {
            command: RiskCommand::Score(args),
        } => run_score_report(args),
    }
}
