use crate::report::{run_trust_report, run_trust_score, TrustReportArgs, TrustScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use myjanji::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "MyJanji Trust Service",
    about = "Score contract histories and serve trust profiles for the MyJanji platform",
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
    /// Score contract statistics or an exported contract ledger
    Trust {
        #[command(subcommand)]
        command: TrustCommand,
    },
}

#[derive(Subcommand, Debug)]
enum TrustCommand {
    /// Score a set of contract outcome counts
    Score(TrustScoreArgs),
    /// Import a contract export and report one user's trust profile
    Report(TrustReportArgs),
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
        Command::Trust {
            command: TrustCommand::Score(args),
        } => run_trust_score(args),
        Command::Trust {
            command: TrustCommand::Report(args),
        } => run_trust_report(args),
    }
}
