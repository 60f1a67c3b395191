use serde::{Deserialize, Serialize};

const OPTIMAL_QUALITY_FLOOR: f64 = 85.0;
const HIGH_RISK_QUALITY_CEILING: f64 = 65.0;
const HIGH_RISK_HOLD_BACK: f64 = 0.15;

/// Disbursement risk derived solely from an employee's quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Optimal,
    HighRisk,
    Standard,
}

impl RiskTier {
    pub const ALL: [RiskTier; 3] = [RiskTier::Optimal, RiskTier::HighRisk, RiskTier::Standard];

    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Optimal => "optimal",
            RiskTier::HighRisk => "high_risk",
            RiskTier::Standard => "standard",
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            RiskTier::Optimal => "OPTIMAL PERFORMANCE",
            RiskTier::HighRisk => "HIGH RISK DETECTED",
            RiskTier::Standard => "STANDARD REVIEW",
        }
    }

    pub fn action(self) -> &'static str {
        match self {
            RiskTier::Optimal => "approve for immediate disbursement",
            RiskTier::HighRisk => "apply a 15% hold-back for quality remediation",
            RiskTier::Standard => "standard approval.",
        }
    }

    /// Share of the recommended payout withheld pending remediation.
    pub fn hold_back_fraction(self) -> f64 {
        match self {
            RiskTier::HighRisk => HIGH_RISK_HOLD_BACK,
            RiskTier::Optimal | RiskTier::Standard => 0.0,
        }
    }
}

/// Both thresholds are strict, so 85 and 65 themselves are `Standard`.
pub fn classify(quality_score: f64) -> RiskTier {
    if quality_score > OPTIMAL_QUALITY_FLOOR {
        RiskTier::Optimal
    } else if quality_score < HIGH_RISK_QUALITY_CEILING {
        RiskTier::HighRisk
    } else {
        RiskTier::Standard
    }
}
