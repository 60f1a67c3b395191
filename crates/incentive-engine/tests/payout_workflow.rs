use std::io::Cursor;

use incentive_engine::payouts::{
    audit_employee, classify, get_audit, FailingNarrator, NarrativeSource, PayoutLedger,
    PolicyConfiguration, RiskTier, RosterImporter, ScoringEngine, StaticNarrator,
};
use std::sync::Arc;

const ROSTER: &str = "Employee_ID,Dept,Revenue_KPI,Quality_Score,CSAT_KPI,Base_Bonus_Target
EMP-001,Sales,100,80,4.0,5000
EMP-002,Eng,72.5,92.0,4.9,10000
EMP-003,Ops,128.0,55.0,2.6,2000
EMP-004,Support,101.0,85.0,3.8,5000
";

fn engine() -> ScoringEngine {
    ScoringEngine::new(Arc::new(PolicyConfiguration::default()))
}

#[test]
fn roster_is_scored_into_a_ledger() {
    let records = RosterImporter::from_reader(Cursor::new(ROSTER)).expect("roster parses");
    let scored = engine().score(&records, "Balanced").expect("scores");
    let ledger = PayoutLedger::from_scored(&scored);
    let summary = ledger.summary();

    let expected_total: f64 = scored.iter().map(|s| s.recommended_payout).sum();
    assert_eq!(summary.headcount, 4);
    assert!((summary.total_allocation - expected_total).abs() < 1e-9);
    assert!((summary.strategic_optimization - expected_total * 0.10).abs() < 1e-9);

    let tiers: Vec<RiskTier> = ledger.entries().iter().map(|e| e.risk_tier).collect();
    assert_eq!(
        tiers,
        vec![
            RiskTier::Standard,
            RiskTier::Optimal,
            RiskTier::HighRisk,
            RiskTier::Standard
        ]
    );

    let tier_total: usize = summary.risk_tiers.iter().map(|t| t.count).sum();
    assert_eq!(tier_total, summary.headcount);

    let high_risk_payout = scored[2].recommended_payout;
    assert!((summary.hold_back_total - high_risk_payout * 0.15).abs() < 1e-9);
}

#[test]
fn changing_scenario_rescales_every_payout() {
    let records = RosterImporter::from_reader(Cursor::new(ROSTER)).expect("roster parses");
    let engine = engine();
    let balanced = engine.score(&records, "Balanced").expect("scores");
    let aggressive = engine.score(&records, "Aggressive").expect("scores");

    for (base, boosted) in balanced.iter().zip(&aggressive) {
        assert_eq!(base.score, boosted.score);
        assert!((boosted.recommended_payout - base.recommended_payout * 1.2).abs() < 1e-9);
    }
}

#[test]
fn audits_are_isolated_per_employee() {
    let records = RosterImporter::from_reader(Cursor::new(ROSTER)).expect("roster parses");
    let scored = engine().score(&records, "Conservative").expect("scores");

    let failed = audit_employee(&FailingNarrator, &scored[0], "Conservative");
    let generated = audit_employee(&StaticNarrator, &scored[1], "Conservative");

    assert_eq!(failed.narrative_source, NarrativeSource::Fallback);
    assert_eq!(generated.narrative_source, NarrativeSource::Generated);
    assert_eq!(generated.risk_tier, classify(records[1].quality_score));
    assert!(get_audit(&FailingNarrator, &scored[2], "Conservative").contains("Conservative"));
}
