use super::*;
use shared::domain::{AnalysisMetrics, BestMatch};

fn sample_result() -> AnalysisResult {
    AnalysisResult {
        best_match: BestMatch {
            name: "Alice".to_string(),
            percentage: 97.345,
        },
        analysis: AnalysisMetrics {
            rmp: 1.2,
            cpi: 3.4,
            pi: 5.6,
            kinship_lr: 7.8,
            fsi: 9.0,
        },
    }
}

#[test]
fn idle_renders_nothing() {
    let display = render(&SubmissionOutcome::Idle);
    assert_eq!(display, ResultDisplay::Empty);
    assert!(display.to_lines().is_empty());
    assert!(display.submit_enabled());
}

#[test]
fn pending_renders_busy_and_disables_submit() {
    let display = render(&SubmissionOutcome::Pending);
    assert_eq!(display, ResultDisplay::Busy);
    assert!(!display.submit_enabled());
    assert_eq!(display.to_lines(), vec![BUSY_TEXT.to_string()]);
}

#[test]
fn failure_renders_literal_message() {
    let display = render(&SubmissionOutcome::Failure(
        "request failed with status 500 Internal Server Error".to_string(),
    ));
    assert_eq!(
        display,
        ResultDisplay::Error {
            message: "request failed with status 500 Internal Server Error".to_string()
        }
    );
    assert!(display.submit_enabled());
    assert_eq!(
        display.to_lines(),
        vec!["Error: request failed with status 500 Internal Server Error".to_string()]
    );
}

#[test]
fn success_renders_both_groups_in_fixed_order() {
    let display = render(&SubmissionOutcome::Success(sample_result()));
    let ResultDisplay::Report {
        best_match,
        analysis,
    } = &display
    else {
        panic!("expected report, got {display:?}");
    };

    assert_eq!(best_match.title, MATCHING_GROUP_TITLE);
    assert_eq!(best_match.fields[0].value, "Alice");
    assert_eq!(best_match.fields[1].value, "97.35%");

    assert_eq!(analysis.title, ANALYSIS_GROUP_TITLE);
    let labels: Vec<_> = analysis.fields.iter().map(|field| field.label).collect();
    assert_eq!(labels, vec!["RMP", "CPI", "PI", "Kinship LR", "FSI"]);
    let values: Vec<_> = analysis
        .fields
        .iter()
        .map(|field| field.value.as_str())
        .collect();
    assert_eq!(values, vec!["1.2", "3.4", "5.6", "7.8", "9"]);
}

#[test]
fn success_text_rendering() {
    let lines = render(&SubmissionOutcome::Success(sample_result())).to_lines();
    assert_eq!(
        lines,
        vec![
            "DNA Matching Results:",
            "Best Match Name: Alice",
            "Best Match Percentage: 97.35%",
            "",
            "DNA Analysis:",
            "RMP: 1.2",
            "CPI: 3.4",
            "PI: 5.6",
            "Kinship LR: 7.8",
            "FSI: 9",
        ]
    );
}

#[test]
fn fixed_formatting_rounds_half_away_from_zero_on_decimal_form() {
    assert_eq!(format_fixed(97.345, 2), "97.35");
    assert_eq!(format_fixed(1.005, 2), "1.01");
    assert_eq!(format_fixed(0.005, 2), "0.01");
    assert_eq!(format_fixed(99.995, 2), "100.00");
    assert_eq!(format_fixed(12.3, 2), "12.30");
    assert_eq!(format_fixed(100.0, 2), "100.00");
    assert_eq!(format_fixed(0.0, 2), "0.00");
    assert_eq!(format_fixed(2.5, 0), "3");
}

#[test]
fn fixed_formatting_handles_signs_and_non_finite_values() {
    assert_eq!(format_fixed(-1.234, 2), "-1.23");
    assert_eq!(format_fixed(-0.001, 2), "0.00");
    assert_eq!(format_fixed(f64::NAN, 2), "NaN");
    assert_eq!(format_fixed(f64::INFINITY, 2), "inf");
}

#[test]
fn metrics_use_shortest_round_trip_form() {
    assert_eq!(format_metric(0.1972), "0.1972");
    assert_eq!(format_metric(0.1 + 0.2), "0.30000000000000004");
    assert_eq!(format_metric(31250.5), "31250.5");
    assert_eq!(format_metric(-0.0), "0");
    assert_eq!(format_metric(42.0), "42");
}
