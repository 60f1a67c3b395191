use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque employee identifier as issued by the HR system of record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub String);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Raw performance metrics for one employee in a scoring request.
///
/// Domain ranges are expectations, not constraints: revenue is a percentage of target
/// (roughly 70-130), quality is 0-100 and CSAT sits on a 5-point scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub employee_id: EmployeeId,
    pub department: String,
    pub revenue_kpi: f64,
    pub quality_score: f64,
    pub csat_kpi: f64,
    pub base_bonus_target: f64,
}

/// An employee record with the engine's derived score and payout attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: EmployeeRecord,
    pub score: f64,
    pub recommended_payout: f64,
}

impl ScoredRecord {
    pub fn employee_id(&self) -> &EmployeeId {
        &self.record.employee_id
    }

    /// Single-row tabular rendering handed to the narrative generator.
    pub fn data_summary(&self) -> String {
        let record = &self.record;
        format!(
            "Employee_ID | Dept | Revenue_KPI | Quality_Score | CSAT_KPI | Base_Bonus_Target | Score | Recommended_Payout\n\
             {} | {} | {:.2} | {:.2} | {:.2} | {:.2} | {:.4} | {:.2}",
            record.employee_id,
            record.department,
            record.revenue_kpi,
            record.quality_score,
            record.csat_kpi,
            record.base_bonus_target,
            self.score,
            self.recommended_payout
        )
    }
}
