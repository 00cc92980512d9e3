//! Aggregation contract: filtering, grouping, derived metrics, canonical
//! row order, and the best-value tie-break — all deterministic.

use triage_core::aggregate::aggregate;
use triage_core::model::{
    Economics, LengthBin, PromptRef, Run, RunStatus, Scenario, Scores, TokenUsage,
};

fn run(id: &str, bin: &str, status: RunStatus, composite: f64, cost: f64) -> Run {
    Run {
        id: id.to_string(),
        prompt_id: "p1".to_string(),
        model: "sec-7b".to_string(),
        status,
        prompt_length_bin: Some(LengthBin::parse(bin)),
        prompt: None,
        tokens: TokenUsage {
            input: 120,
            output: 480,
            total: 600,
        },
        economics: Economics {
            aud_cost: cost,
            extra: Default::default(),
        },
        scores: Some(Scores {
            composite,
            dimensions: Default::default(),
        }),
        experiment: None,
        scenario: Scenario::IncidentResponse,
        source: None,
        created_at: None,
    }
}

#[test]
fn test_aggregate_is_idempotent() {
    let runs = vec![
        run("r1", "s", RunStatus::Succeeded, 4.0, 0.01),
        run("r2", "m", RunStatus::Succeeded, 4.5, 0.02),
        run("r3", "l", RunStatus::Succeeded, 4.8, 0.05),
    ];
    let a = aggregate(&runs);
    let b = aggregate(&runs);
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn test_filter_excludes_failed_and_unscored() {
    let mut zero = run("r2", "s", RunStatus::Succeeded, 0.0, 0.01);
    zero.scores = Some(Scores {
        composite: 0.0,
        dimensions: Default::default(),
    });
    let runs = vec![
        run("r1", "s", RunStatus::Succeeded, 4.0, 0.01),
        zero,
        run("r3", "m", RunStatus::Failed, 4.5, 0.02),
    ];

    let report = aggregate(&runs);
    assert_eq!(report.rows.len(), 1);
    let s = &report.rows[0];
    assert_eq!(s.bin, LengthBin::Short);
    assert_eq!(s.count, 1);
    assert!((s.avg_quality - 4.0).abs() < 1e-9);
    assert_eq!(report.excluded.unscored, 1);
    assert_eq!(report.excluded.not_succeeded, 1);
}

#[test]
fn test_missing_scores_are_unscored_not_zero_quality() {
    let mut unjudged = run("r2", "s", RunStatus::Succeeded, 0.0, 0.01);
    unjudged.scores = None;
    let runs = vec![run("r1", "s", RunStatus::Succeeded, 4.0, 0.01), unjudged];

    let report = aggregate(&runs);
    assert_eq!(report.rows[0].count, 1);
    // The average must not be dragged toward zero by the unjudged run.
    assert!((report.rows[0].avg_quality - 4.0).abs() < 1e-9);
}

#[test]
fn test_best_value_tie_flags_all_tied_bins() {
    // S: 4.0 / 0.04 = 100, M: 2.0 / 0.02 = 100
    let runs = vec![
        run("r1", "s", RunStatus::Succeeded, 4.0, 0.04),
        run("r2", "m", RunStatus::Succeeded, 2.0, 0.02),
    ];
    let report = aggregate(&runs);
    assert!(report.rows.iter().all(|r| r.is_best_value));
}

#[test]
fn test_best_value_single_winner() {
    // S: 100, M: 150
    let runs = vec![
        run("r1", "s", RunStatus::Succeeded, 4.0, 0.04),
        run("r2", "m", RunStatus::Succeeded, 3.0, 0.02),
    ];
    let report = aggregate(&runs);
    let s = report.rows.iter().find(|r| r.bin == LengthBin::Short).unwrap();
    let m = report.rows.iter().find(|r| r.bin == LengthBin::Medium).unwrap();
    assert!(!s.is_best_value);
    assert!(m.is_best_value);
}

#[test]
fn test_zero_cost_bin_is_flagged_not_computable() {
    let runs = vec![
        run("r1", "s", RunStatus::Succeeded, 4.0, 0.0),
        run("r2", "m", RunStatus::Succeeded, 3.0, 0.02),
    ];
    let report = aggregate(&runs);
    let s = report.rows.iter().find(|r| r.bin == LengthBin::Short).unwrap();
    assert_eq!(s.quality_per_dollar, None);
    assert!(!s.is_best_value);
    // Serialized output carries no Infinity/NaN.
    let json = serde_json::to_string(&report).unwrap();
    assert!(!json.contains("null"));
    assert!(!json.contains("inf"));
}

#[test]
fn test_bin_ordering_is_canonical_not_input_order() {
    let runs = vec![
        run("r1", "l", RunStatus::Succeeded, 4.8, 0.05),
        run("r2", "s", RunStatus::Succeeded, 4.0, 0.01),
        run("r3", "m", RunStatus::Succeeded, 4.5, 0.02),
    ];
    let report = aggregate(&runs);
    let bins: Vec<LengthBin> = report.rows.iter().map(|r| r.bin.clone()).collect();
    assert_eq!(
        bins,
        vec![LengthBin::Short, LengthBin::Medium, LengthBin::Long]
    );
}

#[test]
fn test_legacy_and_unknown_bins_sort_after_long_first_seen() {
    let runs = vec![
        run("r1", "verbose", RunStatus::Succeeded, 3.0, 0.03),
        run("r2", "xl", RunStatus::Succeeded, 3.0, 0.03),
        run("r3", "l", RunStatus::Succeeded, 4.8, 0.05),
        run("r4", "s", RunStatus::Succeeded, 4.0, 0.01),
    ];
    let report = aggregate(&runs);
    let codes: Vec<&str> = report.rows.iter().map(|r| r.bin.code()).collect();
    assert_eq!(codes, vec!["S", "L", "verbose", "XL"]);
}

#[test]
fn test_empty_input_returns_empty_report_not_error() {
    let report = aggregate(&[]);
    assert!(report.is_empty());
    assert_eq!(report.excluded.total(), 0);
}

#[test]
fn test_avg_tokens_prefers_prompt_token_count() {
    let mut with_ref = run("r1", "s", RunStatus::Succeeded, 4.0, 0.01);
    with_ref.prompt = Some(PromptRef {
        id: "p1".to_string(),
        token_count: Some(40),
    });
    let without_ref = run("r2", "s", RunStatus::Succeeded, 4.0, 0.01); // input = 120

    let report = aggregate(&[with_ref, without_ref]);
    assert_eq!(report.rows.len(), 1);
    assert!((report.rows[0].avg_tokens - 80.0).abs() < 1e-9);
}

#[test]
fn test_prompt_ref_without_tokens_falls_back_to_input() {
    let mut r = run("r1", "s", RunStatus::Succeeded, 4.0, 0.01);
    r.prompt = Some(PromptRef {
        id: "p1".to_string(),
        token_count: None,
    });
    let report = aggregate(&[r]);
    assert!((report.rows[0].avg_tokens - 120.0).abs() < 1e-9);
}

#[test]
fn test_input_order_does_not_change_statistics() {
    let mut runs = vec![
        run("r1", "s", RunStatus::Succeeded, 4.0, 0.01),
        run("r2", "s", RunStatus::Succeeded, 3.0, 0.03),
        run("r3", "m", RunStatus::Succeeded, 4.5, 0.02),
    ];
    let a = aggregate(&runs);
    runs.reverse();
    let b = aggregate(&runs);
    assert_eq!(a.rows, b.rows);
}
