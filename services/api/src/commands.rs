use crate::infra::load_policy;
use clap::Args;
use incentive_engine::config::{AppConfig, NarrativeConfig};
use incentive_engine::error::AppError;
use incentive_engine::payouts::narrative::audit_employee_blocking;
use incentive_engine::payouts::{
    AuditNarrator, AuditReport, EmployeeId, GroqNarrator, LedgerEntry, LedgerSummary,
    NarrativeSource, PayoutLedger, PolicyConfiguration, RosterImporter, ScoringEngine,
    StaticNarrator,
};
use incentive_engine::telemetry;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct PolicyArgs {
    /// Payout policy YAML (defaults to PAYOUT_POLICY_PATH or config/settings.yaml)
    #[arg(long)]
    pub(crate) policy: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Roster CSV export with one row per employee
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Payout scenario to apply
    #[arg(long, default_value = "Balanced")]
    pub(crate) scenario: String,
    #[command(flatten)]
    pub(crate) policy: PolicyArgs,
    /// Print every ledger row, not just the summary
    #[arg(long)]
    pub(crate) list_entries: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AuditArgs {
    /// Roster CSV export with one row per employee
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Employee ID to audit
    #[arg(long)]
    pub(crate) employee: String,
    /// Payout scenario to apply
    #[arg(long, default_value = "Balanced")]
    pub(crate) scenario: String,
    #[command(flatten)]
    pub(crate) policy: PolicyArgs,
    /// Use the offline narrator instead of calling the language model
    #[arg(long)]
    pub(crate) offline: bool,
}

fn prepare(policy: PolicyArgs) -> Result<(AppConfig, Arc<PolicyConfiguration>), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let policy = load_policy(policy.policy, &config.policy)?;
    Ok((config, policy))
}

pub(crate) fn run_scenarios(args: PolicyArgs) -> Result<(), AppError> {
    let (_, policy) = prepare(args)?;
    render_scenarios(&mut io::stdout().lock(), &policy)?;
    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        roster,
        scenario,
        policy,
        list_entries,
    } = args;

    let (_, policy) = prepare(policy)?;
    let records = RosterImporter::from_path(&roster)?;
    let scored = ScoringEngine::new(policy).score(&records, &scenario)?;
    let ledger = PayoutLedger::from_scored(&scored);

    let mut out = io::stdout().lock();
    render_summary(&mut out, &scenario, &ledger.summary())?;
    if list_entries {
        render_entries(&mut out, ledger.entries())?;
    }
    Ok(())
}

pub(crate) async fn run_audit(args: AuditArgs) -> Result<(), AppError> {
    let AuditArgs {
        roster,
        employee,
        scenario,
        policy,
        offline,
    } = args;

    let (config, policy) = prepare(policy)?;
    let narrator = narrator_for(offline, config.narrative);
    let (department, report) =
        audit_roster_employee(&roster, employee, scenario, policy, narrator).await?;

    render_audit(&mut io::stdout().lock(), &department, &report)?;
    Ok(())
}

fn narrator_for(offline: bool, config: NarrativeConfig) -> Arc<dyn AuditNarrator> {
    if offline {
        Arc::new(StaticNarrator)
    } else {
        Arc::new(GroqNarrator::new(config))
    }
}

/// Looks up one employee in a roster export and audits them under `scenario`.
///
/// Returns the employee's department alongside the report.
async fn audit_roster_employee(
    roster: &Path,
    employee: String,
    scenario: String,
    policy: Arc<PolicyConfiguration>,
    narrator: Arc<dyn AuditNarrator>,
) -> Result<(String, AuditReport), AppError> {
    let employee_id = EmployeeId(employee);
    let record = RosterImporter::from_path(roster)?
        .into_iter()
        .find(|record| record.employee_id == employee_id)
        .ok_or_else(|| AppError::EmployeeNotFound(employee_id.0.clone()))?;

    let scored = ScoringEngine::new(policy).score_one(&record, &scenario)?;
    let report = audit_employee_blocking(narrator, scored, scenario).await;
    Ok((record.department, report))
}

fn render_scenarios(out: &mut impl Write, policy: &PolicyConfiguration) -> io::Result<()> {
    writeln!(out, "Payout scenarios")?;
    for (name, scenario) in &policy.scenarios {
        writeln!(out, "- {}: x{:.2}", name, scenario.multiplier)?;
    }
    Ok(())
}

fn render_summary(out: &mut impl Write, scenario: &str, summary: &LedgerSummary) -> io::Result<()> {
    writeln!(out, "Payout ledger ({scenario} scenario)")?;
    writeln!(out, "Employees scored: {}", summary.headcount)?;
    writeln!(out, "Total allocation: ${:.0}", summary.total_allocation)?;
    writeln!(
        out,
        "Strategic optimization: ${:.0}",
        summary.strategic_optimization
    )?;
    writeln!(out, "Quality hold-back: ${:.2}", summary.hold_back_total)?;
    match summary.average_quality {
        Some(quality) => writeln!(out, "Average quality score: {quality:.1}%")?,
        None => writeln!(out, "Average quality score: n/a")?,
    }

    if !summary.departments.is_empty() {
        writeln!(out, "\nDepartment totals")?;
        for department in &summary.departments {
            writeln!(
                out,
                "- {}: {} employees, ${:.2}",
                department.department, department.headcount, department.total_payout
            )?;
        }
    }

    writeln!(out, "\nRisk tiers")?;
    for tier in &summary.risk_tiers {
        writeln!(out, "- {}: {}", tier.tier_label, tier.count)?;
    }
    Ok(())
}

fn render_entries(out: &mut impl Write, entries: &[LedgerEntry]) -> io::Result<()> {
    writeln!(out, "\nLedger")?;
    for entry in entries {
        writeln!(
            out,
            "- {} | {} | CSAT {:.1} | base ${:.0} | score {:.2} | payout ${:.2} | {}",
            entry.employee_id,
            entry.department,
            entry.csat_kpi,
            entry.base_bonus_target,
            entry.score,
            entry.recommended_payout,
            entry.risk_tier.label()
        )?;
    }
    Ok(())
}

fn render_audit(out: &mut impl Write, department: &str, report: &AuditReport) -> io::Result<()> {
    writeln!(out, "Audit for {} ({department})", report.employee_id)?;
    writeln!(out, "Scenario: {}", report.scenario)?;
    writeln!(out, "Recommended payout: ${:.2}", report.recommended_payout)?;
    writeln!(out, "\n{}", report.headline)?;
    writeln!(out, "Analysis: {}", report.analysis)?;
    writeln!(out, "Action: {}", report.action)?;
    if report.narrative_source == NarrativeSource::Fallback {
        writeln!(
            out,
            "(narrative generator unavailable; fallback analysis shown)"
        )?;
    }
    Ok(())
}
