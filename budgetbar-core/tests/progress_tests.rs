//! Integration tests for category progress calculation and rendering.

use budgetbar_core::{
    compute, ColorTone, FinancialFormatter, ProgressBarView, ProgressInput, ProgressOutput,
    ProgressPolicy, ProgressState, PROGRESS_BARS_FLAG, SHOW_PROGRESS_BARS_PREF,
};
use std::collections::{BTreeMap, HashMap};

fn from_json(json: &str) -> ProgressOutput {
    let input: ProgressInput = serde_json::from_str(json).unwrap();
    compute(&input)
}

#[test]
fn test_documented_scenarios() {
    let out = from_json(r#"{"assigned":10000,"activity":-3000,"balance":7000}"#);
    assert_eq!(out.state, ProgressState::WithinBudget);
    assert_eq!(out.baseline_amount, 10000);
    assert!((out.progress_ratio - 0.3).abs() < 1e-9);
    assert_eq!(out.overflow_ratio, 0.0);
    assert_eq!(out.remaining, 7000);

    let out = from_json(r#"{"assigned":10000,"activity":-10000,"balance":0}"#);
    assert_eq!(out.state, ProgressState::WithinBudget);
    assert_eq!(out.progress_ratio, 1.0);
    assert_eq!(out.overflow_ratio, 0.0);

    let out = from_json(r#"{"assigned":10000,"activity":-12000,"balance":-2000}"#);
    assert_eq!(out.state, ProgressState::OverBudget);
    assert_eq!(out.progress_ratio, 1.0);
    assert!((out.overflow_ratio - 0.2).abs() < 1e-9);
    assert_eq!(out.remaining, -2000);

    let out = from_json(r#"{"assigned":0,"activity":-500,"balance":-500}"#);
    assert_eq!(out.state, ProgressState::OverBudget);
    assert_eq!(out.baseline_amount, 500);
    assert_eq!(out.progress_ratio, 1.0);
    assert_eq!(out.overflow_ratio, 0.0);

    let out = from_json(r#"{"assigned":0,"activity":0,"balance":0}"#);
    assert_eq!(out.state, ProgressState::WithinBudget);
    assert_eq!(out.baseline_amount, 0);
    assert_eq!(out.progress_ratio, 0.0);
    assert_eq!(out.overflow_ratio, 0.0);

    let out = from_json(r#"{"assigned":-10000,"activity":0,"balance":-10000}"#);
    assert_eq!(out.state, ProgressState::WithinBudget);
    assert_eq!(out.baseline_amount, 0);
}

#[test]
fn test_output_serializes_camel_case() {
    let out = compute(&ProgressInput::new(10000, -12000, -2000));
    let json = serde_json::to_value(out).unwrap();
    assert_eq!(json["state"], "over-budget");
    assert_eq!(json["baselineAmount"], 10000);
    assert_eq!(json["remaining"], -2000);
    assert!(json.get("budgetedRatio").is_none());

    let templated = ProgressPolicy::TemplateAware
        .compute(&ProgressInput::new(5000, -2500, 2500).with_template(10000));
    let json = serde_json::to_value(templated).unwrap();
    assert_eq!(json["state"], "underfunded");
    assert_eq!(json["budgetedRatio"], 0.5);
}

#[test]
fn test_view_end_to_end() {
    let mut flags = BTreeMap::new();
    flags.insert(PROGRESS_BARS_FLAG.to_string(), true);
    let mut prefs = HashMap::new();
    prefs.insert(SHOW_PROGRESS_BARS_PREF.to_string(), true);
    let formatter = FinancialFormatter::default();

    let view = ProgressBarView::new(&flags, &prefs, &formatter);
    let bar = view.render(&ProgressInput::new(0, -500, -500)).unwrap();
    assert_eq!(bar.tone, ColorTone::Negative);
    assert_eq!(bar.percent, 100);
    assert_eq!(bar.tooltip, "100% complete • Spent: $5.00 • Balance: -$5.00");

    flags.insert(PROGRESS_BARS_FLAG.to_string(), false);
    let view = ProgressBarView::new(&flags, &prefs, &formatter);
    assert!(view.render(&ProgressInput::new(0, -500, -500)).is_none());
}
