use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::domain::EmployeeRecord;
use super::ledger::{LedgerEntry, LedgerSummary, PayoutLedger};
use super::narrative::{audit_employee_blocking, AuditNarrator, AuditReport};
use super::policy::PolicyConfiguration;
use super::scoring::{ScoringEngine, ScoringError};

/// Service composing the scoring engine and the audit narrator.
pub struct PayoutService<N> {
    engine: Arc<ScoringEngine>,
    narrator: Arc<N>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioView {
    pub name: String,
    pub multiplier: f64,
}

/// Result of scoring a full roster under one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredBatch {
    pub scenario: String,
    pub entries: Vec<LedgerEntry>,
    pub summary: LedgerSummary,
}

impl<N> PayoutService<N>
where
    N: AuditNarrator + 'static,
{
    pub fn new(config: Arc<PolicyConfiguration>, narrator: Arc<N>) -> Self {
        Self {
            engine: Arc::new(ScoringEngine::new(config)),
            narrator,
        }
    }

    pub fn scenarios(&self) -> Vec<ScenarioView> {
        self.engine
            .config()
            .scenarios
            .iter()
            .map(|(name, scenario)| ScenarioView {
                name: name.clone(),
                multiplier: scenario.multiplier,
            })
            .collect()
    }

    /// Score a roster and derive its ledger. Fails for the whole batch on policy errors.
    pub fn score_batch(
        &self,
        records: &[EmployeeRecord],
        scenario: &str,
    ) -> Result<ScoredBatch, ScoringError> {
        let scored = self.engine.score(records, scenario)?;
        let ledger = PayoutLedger::from_scored(&scored);
        let summary = ledger.summary();

        info!(
            scenario,
            headcount = summary.headcount,
            total_allocation = summary.total_allocation,
            "scored payout batch"
        );

        Ok(ScoredBatch {
            scenario: scenario.to_string(),
            entries: ledger.into_entries(),
            summary,
        })
    }

    /// Score one employee and attach the narrative audit.
    ///
    /// Only scoring can fail; narrative problems are absorbed into the fallback text.
    pub async fn audit(
        &self,
        record: EmployeeRecord,
        scenario: String,
    ) -> Result<AuditReport, ScoringError> {
        let scored = self.engine.score_one(&record, &scenario)?;
        let narrator: Arc<dyn AuditNarrator> = self.narrator.clone();
        Ok(audit_employee_blocking(narrator, scored, scenario).await)
    }
}
