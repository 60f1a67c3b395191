use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{EmployeeId, ScoredRecord};
use super::risk::{classify, RiskTier};

/// Portion of the total allocation reported as strategic optimization headroom.
const STRATEGIC_OPTIMIZATION_SHARE: f64 = 0.10;

/// One row of the payout ledger, joined with its risk tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEntry {
    pub employee_id: EmployeeId,
    pub department: String,
    pub revenue_kpi: f64,
    pub quality_score: f64,
    pub csat_kpi: f64,
    pub base_bonus_target: f64,
    pub score: f64,
    pub recommended_payout: f64,
    pub risk_tier: RiskTier,
    pub action: &'static str,
}

impl LedgerEntry {
    pub fn from_scored(scored: &ScoredRecord) -> Self {
        let record = &scored.record;
        let risk_tier = classify(record.quality_score);
        Self {
            employee_id: record.employee_id.clone(),
            department: record.department.clone(),
            revenue_kpi: record.revenue_kpi,
            quality_score: record.quality_score,
            csat_kpi: record.csat_kpi,
            base_bonus_target: record.base_bonus_target,
            score: scored.score,
            recommended_payout: scored.recommended_payout,
            risk_tier,
            action: risk_tier.action(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentTotal {
    pub department: String,
    pub headcount: usize,
    pub total_payout: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierCount {
    pub tier: RiskTier,
    pub tier_label: &'static str,
    pub count: usize,
}

/// Aggregate view over one scored batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub headcount: usize,
    pub total_allocation: f64,
    pub strategic_optimization: f64,
    pub hold_back_total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_quality: Option<f64>,
    pub departments: Vec<DepartmentTotal>,
    pub risk_tiers: Vec<TierCount>,
}

/// Scored batch plus the derived ledger rows.
#[derive(Debug, Clone)]
pub struct PayoutLedger {
    entries: Vec<LedgerEntry>,
}

impl PayoutLedger {
    pub fn from_scored(scored: &[ScoredRecord]) -> Self {
        Self {
            entries: scored.iter().map(LedgerEntry::from_scored).collect(),
        }
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<LedgerEntry> {
        self.entries
    }

    pub fn find(&self, employee_id: &EmployeeId) -> Option<&LedgerEntry> {
        self.entries
            .iter()
            .find(|entry| &entry.employee_id == employee_id)
    }

    pub fn summary(&self) -> LedgerSummary {
        let total_allocation: f64 = self.entries.iter().map(|e| e.recommended_payout).sum();
        let hold_back_total: f64 = self
            .entries
            .iter()
            .map(|e| e.recommended_payout * e.risk_tier.hold_back_fraction())
            .sum();

        let average_quality = if self.entries.is_empty() {
            None
        } else {
            let total: f64 = self.entries.iter().map(|e| e.quality_score).sum();
            Some(total / self.entries.len() as f64)
        };

        let mut by_department: BTreeMap<&str, DepartmentTotal> = BTreeMap::new();
        for entry in &self.entries {
            let slot = by_department
                .entry(entry.department.as_str())
                .or_insert_with(|| DepartmentTotal {
                    department: entry.department.clone(),
                    headcount: 0,
                    total_payout: 0.0,
                });
            slot.headcount += 1;
            slot.total_payout += entry.recommended_payout;
        }

        let risk_tiers = RiskTier::ALL
            .into_iter()
            .map(|tier| TierCount {
                tier,
                tier_label: tier.label(),
                count: self.entries.iter().filter(|e| e.risk_tier == tier).count(),
            })
            .collect();

        LedgerSummary {
            headcount: self.entries.len(),
            total_allocation,
            strategic_optimization: total_allocation * STRATEGIC_OPTIMIZATION_SHARE,
            hold_back_total,
            average_quality,
            departments: by_department.into_values().collect(),
            risk_tiers,
        }
    }
}
