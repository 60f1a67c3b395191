use super::common::*;
use std::sync::Arc;

use crate::payouts::policy::{CSAT_WEIGHT, QUALITY_WEIGHT};
use crate::payouts::scoring::{score, PayoutWeights, ScoringEngine, ScoringError};

fn engine() -> ScoringEngine {
    ScoringEngine::new(Arc::new(policy()))
}

#[test]
fn reference_employee_scores_point_nine() {
    let scored = engine()
        .score_one(&reference_employee(), "Balanced")
        .expect("scores");

    assert!(approx_eq(scored.score, 0.90), "score was {}", scored.score);
    assert!(
        approx_eq(scored.recommended_payout, 4500.0),
        "payout was {}",
        scored.recommended_payout
    );
    assert_eq!(scored.record, reference_employee());
}

#[test]
fn scenario_multiplier_scales_payout() {
    let engine = engine();
    let records = vec![reference_employee()];

    let aggressive = engine.score(&records, "Aggressive").expect("scores");
    let conservative = engine.score(&records, "Conservative").expect("scores");

    assert!(approx_eq(aggressive[0].recommended_payout, 5400.0));
    assert!(approx_eq(conservative[0].recommended_payout, 3600.0));
    assert!(approx_eq(aggressive[0].score, conservative[0].score));
}

#[test]
fn unknown_scenario_fails_the_batch() {
    let error = engine()
        .score(&roster(), "Nonexistent")
        .expect_err("unknown scenario rejected");

    assert_eq!(
        error,
        ScoringError::UnknownScenario {
            name: "Nonexistent".to_string()
        }
    );
}

#[test]
fn missing_weight_names_the_key() {
    let error = score(&roster(), &policy_without(CSAT_WEIGHT), "Balanced")
        .expect_err("missing weight rejected");

    assert_eq!(error, ScoringError::MissingWeight { key: CSAT_WEIGHT });
    assert!(error.to_string().contains("csat_weight"));
}

#[test]
fn unknown_scenario_is_reported_before_missing_weight() {
    let error = score(&roster(), &policy_without(QUALITY_WEIGHT), "Nonexistent")
        .expect_err("misconfigured policy rejected");

    assert!(matches!(error, ScoringError::UnknownScenario { .. }));
}

#[test]
fn scoring_is_deterministic() {
    let engine = engine();
    let first = engine.score(&roster(), "Aggressive").expect("scores");
    let second = engine.score(&roster(), "Aggressive").expect("scores");

    assert_eq!(first, second);
}

#[test]
fn output_preserves_input_order() {
    let records = roster();
    let scored = engine().score(&records, "Balanced").expect("scores");

    let input_ids: Vec<_> = records.iter().map(|r| r.employee_id.clone()).collect();
    let output_ids: Vec<_> = scored.iter().map(|s| s.employee_id().clone()).collect();
    assert_eq!(input_ids, output_ids);
}

#[test]
fn empty_roster_scores_to_empty_output() {
    let scored = engine().score(&[], "Balanced").expect("scores");
    assert!(scored.is_empty());
}

#[test]
fn out_of_domain_metrics_are_scored_uniformly() {
    let record = employee("EMP-404", -20.0, 150.0, 0.0, 1000.0);
    let scored = engine().score_one(&record, "Balanced").expect("scores");

    // (-20 * 0.5 + 150 * 0.3 + 0) / 100
    assert!(approx_eq(scored.score, 0.35));
    assert!(approx_eq(scored.recommended_payout, 350.0));
}

#[test]
fn free_function_matches_engine() {
    let records = roster();
    let via_engine = engine().score(&records, "Conservative").expect("scores");
    let via_function = score(&records, &policy(), "Conservative").expect("scores");

    assert_eq!(via_engine, via_function);
}

#[test]
fn custom_policy_scenarios_are_honored() {
    let policy = single_scenario_policy("Stretch", 1.5);
    let scored = score(&[reference_employee()], &policy, "Stretch").expect("scores");
    assert!(approx_eq(scored[0].recommended_payout, 6750.0));

    let error = score(&[reference_employee()], &policy, "Balanced").expect_err("not defined");
    assert!(matches!(error, ScoringError::UnknownScenario { .. }));
}

#[test]
fn weights_resolve_from_payout_logic() {
    let weights = PayoutWeights::resolve(&policy()).expect("weights resolve");
    assert_eq!(weights.revenue, 0.5);
    assert_eq!(weights.quality, 0.3);
    assert_eq!(weights.csat, 0.2);
}
