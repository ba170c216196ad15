use clap::Args;
use myjanji::contracts::{
    ContractLedgerImporter, ContractStats, StatsInput, TrustAssessment, TrustModel, UserId,
};
use myjanji::error::AppError;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct TrustScoreArgs {
    /// Number of contracts the user is party to
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub(crate) total: i64,
    /// Contracts completed
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub(crate) completed: i64,
    /// Contracts that lapsed past their due date
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub(crate) expired: i64,
    /// Contracts breached
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub(crate) breached: i64,
    /// Contracts still running (ongoing or active)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub(crate) ongoing: i64,
    /// Contracts awaiting acceptance
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub(crate) pending: i64,
    /// Emit JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct TrustReportArgs {
    /// Contract export (CSV) to score
    #[arg(long)]
    pub(crate) contracts_csv: PathBuf,
    /// User whose contracts should be scored
    #[arg(long)]
    pub(crate) user: String,
    /// Emit JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct ReportOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<&'a UserId>,
    #[serde(flatten)]
    assessment: &'a TrustAssessment,
}

pub(crate) fn run_trust_score(args: TrustScoreArgs) -> Result<(), AppError> {
    let assessment = score_assessment(&args)?;
    print!("{}", render(None, &assessment, args.json));
    Ok(())
}

fn score_assessment(args: &TrustScoreArgs) -> Result<TrustAssessment, AppError> {
    let stats = ContractStats::try_from(StatsInput {
        total: args.total,
        completed: args.completed,
        expired: args.expired,
        breached: args.breached,
        ongoing: args.ongoing,
        pending: args.pending,
    })?;
    Ok(TrustModel::standard().assess(stats))
}

pub(crate) fn run_trust_report(args: TrustReportArgs) -> Result<(), AppError> {
    let TrustReportArgs {
        contracts_csv,
        user,
        json,
    } = args;

    let contracts = ContractLedgerImporter::from_path(&contracts_csv)?;
    let user_id = UserId::new(user);
    let stats = ContractStats::collect(&contracts, Some(&user_id));
    let assessment = TrustModel::standard().assess(stats);

    if !json {
        println!(
            "Ledger: {} ({} contracts)",
            contracts_csv.display(),
            contracts.len()
        );
    }
    print!("{}", render(Some(&user_id), &assessment, json));
    Ok(())
}

fn render(user_id: Option<&UserId>, assessment: &TrustAssessment, json: bool) -> String {
    if json {
        let output = ReportOutput {
            user_id,
            assessment,
        };
        return match serde_json::to_string_pretty(&output) {
            Ok(body) => format!("{body}\n"),
            Err(err) => format!("{{\"error\": \"{err}\"}}\n"),
        };
    }

    let stats = &assessment.stats;
    let badge = &assessment.badge;
    let mut lines = Vec::new();
    if let Some(user_id) = user_id {
        lines.push(format!("Trust profile for {user_id}"));
    }
    lines.push(format!(
        "Contracts: {} total, {} completed, {} ongoing, {} pending, {} expired, {} breached",
        stats.total, stats.completed, stats.ongoing, stats.pending, stats.expired, stats.breached
    ));
    lines.push(format!("Score: {} ({})", badge.display, badge.label));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
