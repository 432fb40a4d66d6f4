//! Console rendering and JSON output of the report.

mod common;

use bankcheck_core::RenderOptions;
use common::*;
use serde_json::{json, Value};

/// `n` customers, each with one missing email and a non-555 phone.
fn sloppy_customers(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            let mut c = customer(&format!("C{i}"));
            c.as_object_mut().unwrap().remove("email");
            c["phone"] = json!("212-0100");
            record(c, vec![], vec![])
        })
        .collect()
}

#[test]
fn render_truncates_but_report_keeps_everything() {
    let report = run(sloppy_customers(25));
    assert_eq!(report.error_count(), 25);

    let text = report.render(&RenderOptions::default());
    assert_eq!(text.matches("Missing required field 'email'").count(), 20);
    assert!(text.contains("... and 5 more errors"));
    assert!(text.contains("Errors: 25"));
    assert!(text.contains("Warnings: 25"));
    assert!(text.contains("(Use --verbose to see warnings)"));
    assert!(text.trim_end().ends_with("Validation failed with 25 errors"));
}

#[test]
fn verbose_render_lists_warnings_up_to_the_limit() {
    let report = run(sloppy_customers(3));
    let text = report.render(&RenderOptions { limit: 2, verbose: true });

    assert_eq!(text.matches("doesn't use the '555-' prefix").count(), 2);
    assert!(text.contains("... and 1 more warnings"));
    assert!(text.contains("... and 1 more errors"));
    assert!(!text.contains("--verbose"));
}

#[test]
fn render_headline_for_clean_and_warning_only_runs() {
    let clean = run(vec![clean_record("C1")]);
    let text = clean.render(&RenderOptions::default());
    assert!(text.contains("Customers:    1"));
    assert!(text.trim_end().ends_with("All validation checks passed!"));

    let mut c = customer("C1");
    c["phone"] = json!("212-0100");
    let warned = run(vec![record(c, vec![], vec![])]);
    let text = warned.render(&RenderOptions::default());
    assert!(text.trim_end().ends_with("No critical errors found (but 1 warnings)"));
}

#[test]
fn json_output_has_summary_and_full_details() {
    let report = run(sloppy_customers(25));
    let doc: Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(doc["passed"], json!(false));
    assert_eq!(doc["errors"], json!(25));
    assert_eq!(doc["warnings"], json!(25));
    assert_eq!(doc["stats"], json!({ "accounts": 0, "customers": 25, "transactions": 0 }));

    let details = doc["error_details"].as_array().unwrap();
    assert_eq!(details.len(), 25);
    assert_eq!(details[24]["severity"], json!("error"));
    assert_eq!(details[24]["kind"], json!("missing_field"));
    assert_eq!(details[24]["location"]["record"], json!(24));
    assert_eq!(details[24]["location"]["cust_id"], json!("C24"));
    assert_eq!(details[24]["location"]["entity"], json!({ "kind": "customer" }));
    assert_eq!(doc["warning_details"].as_array().unwrap().len(), 25);
}
