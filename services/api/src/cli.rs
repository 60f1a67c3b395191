use crate::commands::{run_audit, run_scenarios, run_score, AuditArgs, PolicyArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use incentive_engine::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Incentive Payout Optimizer",
    about = "Score incentive payouts and audit recommendations from the command line",
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
    /// Score a roster CSV and print the payout ledger
    Score(ScoreArgs),
    /// Run a risk audit for one employee in a roster CSV
    Audit(AuditArgs),
    /// List the scenarios defined by the payout policy
    Scenarios(PolicyArgs),
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
        Command::Score(args) => run_score(args),
        Command::Audit(args) => run_audit(args).await,
        Command::Scenarios(args) => run_scenarios(args),
    }
}
