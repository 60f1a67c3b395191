//! Incentive payout scoring, risk tiers, ledger aggregation and narrative audits.
//!
//! Scoring and classification are pure functions over an immutable policy. The only
//! I/O at this layer is the optional narrative generator behind [`AuditNarrator`].

pub mod domain;
pub mod ledger;
pub mod narrative;
pub mod policy;
pub mod risk;
pub mod roster;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{EmployeeId, EmployeeRecord, ScoredRecord};
pub use ledger::{DepartmentTotal, LedgerEntry, LedgerSummary, PayoutLedger, TierCount};
pub use narrative::{
    audit_employee, fallback_narrative, get_audit, AuditNarrator, AuditReport, FailingNarrator,
    GroqNarrator, NarrativeError, NarrativeSource, StaticNarrator,
};
pub use policy::{load_config, FallbackPolicy, PolicyConfiguration, PolicyError, Scenario};
pub use risk::{classify, RiskTier};
pub use roster::{RosterImportError, RosterImporter};
pub use router::payout_router;
pub use scoring::{score, PayoutWeights, ScoringEngine, ScoringError};
pub use service::{PayoutService, ScenarioView, ScoredBatch};
