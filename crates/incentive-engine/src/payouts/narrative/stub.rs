use super::{AuditNarrator, NarrativeError};
use crate::payouts::domain::ScoredRecord;

/// Offline narrator that renders a fixed template from the scored record.
#[derive(Debug, Clone, Default)]
pub struct StaticNarrator;

impl AuditNarrator for StaticNarrator {
    fn narrate(&self, record: &ScoredRecord, scenario: &str) -> Result<String, NarrativeError> {
        Ok(format!(
            "{} scored {:.2} under the {} policy for a recommended payout of ${:.2}.",
            record.employee_id(),
            record.score,
            scenario,
            record.recommended_payout
        ))
    }
}

/// Narrator that always fails; exercises the fallback path.
#[derive(Debug, Clone, Default)]
pub struct FailingNarrator;

impl AuditNarrator for FailingNarrator {
    fn narrate(&self, _record: &ScoredRecord, _scenario: &str) -> Result<String, NarrativeError> {
        Err(NarrativeError::Transport("generator offline".to_string()))
    }
}
