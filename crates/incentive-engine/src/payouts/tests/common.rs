use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::payouts::domain::{EmployeeId, EmployeeRecord, ScoredRecord};
use crate::payouts::narrative::{AuditNarrator, NarrativeError};
use crate::payouts::policy::{PolicyConfiguration, Scenario};
use crate::payouts::service::PayoutService;
use crate::payouts::{payout_router, StaticNarrator};

pub(super) fn policy() -> PolicyConfiguration {
    PolicyConfiguration::default()
}

pub(super) fn policy_without(weight: &str) -> PolicyConfiguration {
    let mut policy = policy();
    policy.payout_logic.remove(weight);
    policy
}

pub(super) fn single_scenario_policy(name: &str, multiplier: f64) -> PolicyConfiguration {
    PolicyConfiguration {
        payout_logic: policy().payout_logic,
        scenarios: BTreeMap::from([(name.to_string(), Scenario { multiplier })]),
    }
}

pub(super) fn employee(id: &str, revenue: f64, quality: f64, csat: f64, base: f64) -> EmployeeRecord {
    EmployeeRecord {
        employee_id: EmployeeId::from(id),
        department: "Sales".to_string(),
        revenue_kpi: revenue,
        quality_score: quality,
        csat_kpi: csat,
        base_bonus_target: base,
    }
}

/// The worked example: score 0.90, payout 4500 at multiplier 1.0.
pub(super) fn reference_employee() -> EmployeeRecord {
    employee("EMP-001", 100.0, 80.0, 4.0, 5000.0)
}

pub(super) fn roster() -> Vec<EmployeeRecord> {
    vec![
        employee("EMP-003", 121.0, 91.0, 4.8, 10000.0),
        employee("EMP-001", 100.0, 80.0, 4.0, 5000.0),
        employee("EMP-002", 76.5, 58.0, 2.9, 2000.0),
        employee("EMP-010", 130.0, 65.0, 5.0, 5000.0),
    ]
}

pub(super) fn approx_eq(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-9
}

/// Narrator that records every call and replies with a fixed outcome.
#[derive(Default)]
pub(super) struct RecordingNarrator {
    pub(super) calls: Mutex<Vec<(EmployeeId, String)>>,
    pub(super) reply: Option<String>,
}

impl RecordingNarrator {
    pub(super) fn replying(text: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reply: Some(text.to_string()),
        }
    }

    pub(super) fn calls(&self) -> Vec<(EmployeeId, String)> {
        self.calls.lock().expect("narrator mutex poisoned").clone()
    }
}

impl AuditNarrator for RecordingNarrator {
    fn narrate(&self, record: &ScoredRecord, scenario: &str) -> Result<String, NarrativeError> {
        self.calls
            .lock()
            .expect("narrator mutex poisoned")
            .push((record.employee_id().clone(), scenario.to_string()));
        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => Err(NarrativeError::Upstream { status: 503 }),
        }
    }
}

pub(super) fn static_service() -> Arc<PayoutService<StaticNarrator>> {
    Arc::new(PayoutService::new(
        Arc::new(policy()),
        Arc::new(StaticNarrator),
    ))
}

pub(super) fn router_with_service<N>(service: Arc<PayoutService<N>>) -> axum::Router
where
    N: AuditNarrator + 'static,
{
    payout_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json body")
}
