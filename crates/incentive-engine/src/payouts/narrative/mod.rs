//! Boundary to the external text generator that justifies individual payouts.
//!
//! Generated text is advisory. Every failure path degrades to a deterministic
//! fallback so callers never block on, or fail because of, the generator.

mod groq;
mod stub;

pub use groq::GroqNarrator;
pub use stub::{FailingNarrator, StaticNarrator};

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use super::domain::{EmployeeId, ScoredRecord};
use super::risk::{classify, RiskTier};

/// Produces a short justification for one scored employee under a scenario.
pub trait AuditNarrator: Send + Sync {
    fn narrate(&self, record: &ScoredRecord, scenario: &str) -> Result<String, NarrativeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    #[error("narrative generator credentials are not configured")]
    MissingCredentials,
    #[error("narrative generator unreachable: {0}")]
    Transport(String),
    #[error("narrative generator returned status {status}")]
    Upstream { status: u16 },
    #[error("narrative generator returned no text")]
    EmptyResponse,
}

/// Where the analysis text of an audit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeSource {
    Generated,
    Fallback,
}

/// Presentation-ready audit of a single employee's payout.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub employee_id: EmployeeId,
    pub scenario: String,
    pub risk_tier: RiskTier,
    pub headline: &'static str,
    pub analysis: String,
    pub action: &'static str,
    pub narrative_source: NarrativeSource,
    pub score: f64,
    pub recommended_payout: f64,
    pub audited_at: DateTime<Utc>,
}

pub fn fallback_narrative(scenario: &str) -> String {
    format!(
        "Audit complete. Performance metrics for this profile align with the {scenario} strategy thresholds."
    )
}

/// Prompt sent to chat-completion generators.
pub fn build_prompt(record: &ScoredRecord, scenario: &str) -> String {
    format!(
        "You are a Strategic Compensation Auditor.\n\
         Analyze this performance profile under the {scenario} policy:\n\
         {summary}\n\n\
         Provide a concise, 2-sentence executive justification.\n\
         1. Evaluate if the payout is 'At Risk' (High Revenue but Low Quality/CSAT).\n\
         2. Explain the strategic value of the recommendation.",
        summary = record.data_summary()
    )
}

/// Returns the generated narrative, or the fallback text when generation fails.
pub fn get_audit(narrator: &dyn AuditNarrator, record: &ScoredRecord, scenario: &str) -> String {
    resolve_narrative(narrator, record, scenario).0
}

pub fn audit_employee(
    narrator: &dyn AuditNarrator,
    record: &ScoredRecord,
    scenario: &str,
) -> AuditReport {
    let (analysis, source) = resolve_narrative(narrator, record, scenario);
    build_report(record, scenario, analysis, source)
}

/// Runs the audit on the blocking pool so async callers never stall on the generator.
pub async fn audit_employee_blocking(
    narrator: Arc<dyn AuditNarrator>,
    record: ScoredRecord,
    scenario: String,
) -> AuditReport {
    let fallback_record = record.clone();
    let fallback_scenario = scenario.clone();

    match tokio::task::spawn_blocking(move || {
        audit_employee(narrator.as_ref(), &record, &scenario)
    })
    .await
    {
        Ok(report) => report,
        Err(err) => {
            warn!(
                employee_id = %fallback_record.employee_id(),
                error = %err,
                "audit narrative task aborted; using fallback"
            );
            let analysis = fallback_narrative(&fallback_scenario);
            build_report(
                &fallback_record,
                &fallback_scenario,
                analysis,
                NarrativeSource::Fallback,
            )
        }
    }
}

fn resolve_narrative(
    narrator: &dyn AuditNarrator,
    record: &ScoredRecord,
    scenario: &str,
) -> (String, NarrativeSource) {
    match narrator.narrate(record, scenario) {
        Ok(text) if !text.trim().is_empty() => (text.trim().to_string(), NarrativeSource::Generated),
        Ok(_) => {
            warn!(
                employee_id = %record.employee_id(),
                error = %NarrativeError::EmptyResponse,
                "audit narrative unavailable; using fallback"
            );
            (fallback_narrative(scenario), NarrativeSource::Fallback)
        }
        Err(err) => {
            warn!(
                employee_id = %record.employee_id(),
                error = %err,
                "audit narrative unavailable; using fallback"
            );
            (fallback_narrative(scenario), NarrativeSource::Fallback)
        }
    }
}

fn build_report(
    record: &ScoredRecord,
    scenario: &str,
    analysis: String,
    narrative_source: NarrativeSource,
) -> AuditReport {
    let risk_tier = classify(record.record.quality_score);
    AuditReport {
        employee_id: record.employee_id().clone(),
        scenario: scenario.to_string(),
        risk_tier,
        headline: risk_tier.headline(),
        analysis,
        action: risk_tier.action(),
        narrative_source,
        score: record.score,
        recommended_payout: record.recommended_payout,
        audited_at: Utc::now(),
    }
}
