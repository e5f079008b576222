//! End-to-end driver scenarios: baseline-year determinism (S1), seed
//! divergence (S2), and branching determinism (S6).

use chrono::NaiveDate;
use future_wallet_core::dag::ComponentDag;
use future_wallet_core::models::config::SimulationConfig;
use future_wallet_core::nodes::{FixedExpenseNode, SalaryNode, VariableExpenseNode};
use future_wallet_core::{BranchModifications, Engine};
use rust_decimal_macros::dec;

fn baseline_dag() -> ComponentDag {
    let mut dag = ComponentDag::new();
    dag.add_node(Box::new(SalaryNode::new("salary", dec!(60000), 1))).unwrap();
    dag.add_node(Box::new(FixedExpenseNode::new("rent", dec!(1500), 1, "rent"))).unwrap();
    dag.add_node(Box::new(VariableExpenseNode::new("daily", 50.0, 20.0, "daily spend"))).unwrap();
    dag
}

fn baseline_config(seed: u64) -> SimulationConfig {
    SimulationConfig::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        dec!(10000),
        seed,
    )
}

#[test]
fn s1_baseline_year_is_deterministic() {
    let mut e1 = Engine::new(baseline_config(42), baseline_dag()).unwrap();
    let r1 = e1.run().unwrap();

    let mut e2 = Engine::new(baseline_config(42), baseline_dag()).unwrap();
    let r2 = e2.run().unwrap();

    assert_eq!(r1.final_balance, r2.final_balance);
    // 2024 is a leap year: Jan 1 through Dec 31 is 366 days.
    assert_eq!(e1.daily_metrics().len(), 366);
    assert_eq!(e1.daily_metrics().len(), e2.daily_metrics().len());
}

#[test]
fn s2_different_seed_diverges_from_s1() {
    let mut baseline = Engine::new(baseline_config(42), baseline_dag()).unwrap();
    let baseline_result = baseline.run().unwrap();

    let mut divergent = Engine::new(baseline_config(99), baseline_dag()).unwrap();
    let divergent_result = divergent.run().unwrap();

    assert_ne!(baseline_result.final_balance, divergent_result.final_balance);
}

#[test]
fn s6_branching_with_identical_modification_is_deterministic() {
    let mid_year = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
    let mut engine = Engine::new(baseline_config(42), baseline_dag()).unwrap();

    while engine.current_date() <= mid_year {
        engine.step().unwrap();
    }
    let snapshot_id = engine.create_snapshot("mid-year checkpoint").unwrap();

    let modification = BranchModifications {
        balance: Some(dec!(25000)),
        ..Default::default()
    };

    let mut branch_one = engine.create_branch(&snapshot_id, modification.clone()).unwrap();
    let mut branch_two = engine.create_branch(&snapshot_id, modification).unwrap();

    let result_one = branch_one.run().unwrap();
    let result_two = branch_two.run().unwrap();

    assert_eq!(result_one.final_balance, result_two.final_balance);
}
