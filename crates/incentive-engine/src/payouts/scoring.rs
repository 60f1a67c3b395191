use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::domain::{EmployeeRecord, ScoredRecord};
use super::policy::{PolicyConfiguration, CSAT_WEIGHT, QUALITY_WEIGHT, REVENUE_WEIGHT};

/// Lifts the 5-point CSAT scale onto the 100-point scale shared by the other KPIs.
const CSAT_SCALE: f64 = 20.0;
const SCORE_DIVISOR: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("unknown payout scenario '{name}'")]
    UnknownScenario { name: String },
    #[error("payout policy is missing weight '{key}'")]
    MissingWeight { key: &'static str },
}

/// The three KPI weights resolved from `payout_logic`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayoutWeights {
    pub revenue: f64,
    pub quality: f64,
    pub csat: f64,
}

impl PayoutWeights {
    pub fn resolve(config: &PolicyConfiguration) -> Result<Self, ScoringError> {
        let lookup = |key: &'static str| {
            config
                .weight(key)
                .ok_or(ScoringError::MissingWeight { key })
        };

        Ok(Self {
            revenue: lookup(REVENUE_WEIGHT)?,
            quality: lookup(QUALITY_WEIGHT)?,
            csat: lookup(CSAT_WEIGHT)?,
        })
    }

    pub fn score(&self, record: &EmployeeRecord) -> f64 {
        (record.revenue_kpi * self.revenue
            + record.quality_score * self.quality
            + (record.csat_kpi * CSAT_SCALE) * self.csat)
            / SCORE_DIVISOR
    }
}

/// Pure payout calculator bound to one immutable policy.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: Arc<PolicyConfiguration>,
}

impl ScoringEngine {
    pub fn new(config: Arc<PolicyConfiguration>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PolicyConfiguration {
        &self.config
    }

    /// Scores every record under `scenario`, preserving input order.
    ///
    /// Policy errors are checked before any record is touched, so a failure never
    /// yields a partial batch.
    pub fn score(
        &self,
        records: &[EmployeeRecord],
        scenario: &str,
    ) -> Result<Vec<ScoredRecord>, ScoringError> {
        debug!(scenario, records = records.len(), "scoring payout batch");
        score(records, &self.config, scenario)
    }

    pub fn score_one(
        &self,
        record: &EmployeeRecord,
        scenario: &str,
    ) -> Result<ScoredRecord, ScoringError> {
        let (weights, multiplier) = resolve(&self.config, scenario)?;
        Ok(apply(record, &weights, multiplier))
    }
}

/// Scores `records` against `config` without constructing an engine.
pub fn score(
    records: &[EmployeeRecord],
    config: &PolicyConfiguration,
    scenario: &str,
) -> Result<Vec<ScoredRecord>, ScoringError> {
    let (weights, multiplier) = resolve(config, scenario)?;

    Ok(records
        .iter()
        .map(|record| apply(record, &weights, multiplier))
        .collect())
}

fn resolve(
    config: &PolicyConfiguration,
    scenario: &str,
) -> Result<(PayoutWeights, f64), ScoringError> {
    let multiplier = config
        .scenario(scenario)
        .map(|s| s.multiplier)
        .ok_or_else(|| ScoringError::UnknownScenario {
            name: scenario.to_string(),
        })?;
    let weights = PayoutWeights::resolve(config)?;
    Ok((weights, multiplier))
}

fn apply(record: &EmployeeRecord, weights: &PayoutWeights, multiplier: f64) -> ScoredRecord {
    let score = weights.score(record);
    ScoredRecord {
        record: record.clone(),
        score,
        recommended_payout: record.base_bonus_target * score * multiplier,
    }
}
