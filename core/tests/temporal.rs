//! Temporal ordering and date format checks.

mod common;

use bankcheck_core::{
    diagnostic::Entity, Dataset, IssueKind, ValidationEngine, ValidatorConfig,
};
use chrono::NaiveDate;
use common::*;
use serde_json::json;

fn dated(customer_since: &str, open_date: &str) -> serde_json::Value {
    let mut c = customer("C1");
    c["customer_since"] = json!(customer_since);
    let mut a = account("A1", "C1", "Savings");
    a["open_date"] = json!(open_date);
    record(c, vec![a], vec![])
}

#[test]
fn account_opened_before_customer_since_is_one_error() {
    let report = run(vec![dated("2021-01-01", "2020-01-01")]);

    let temporal: Vec<_> = report.errors_of(IssueKind::Temporal).collect();
    assert_eq!(temporal.len(), 1);
    assert_eq!(report.error_count(), 1);
    assert_eq!(
        temporal[0].message,
        "Temporal violation - open_date 2020-01-01 before customer_since 2021-01-01"
    );
}

#[test]
fn swapping_the_dates_clears_the_violation() {
    let report = run(vec![dated("2020-01-01", "2021-01-01")]);
    assert!(report.passed(), "errors: {:?}", messages(report.errors()));
}

#[test]
fn same_day_open_is_allowed() {
    let report = run(vec![dated("2020-01-01", "2020-01-01")]);
    assert!(report.passed());
}

#[test]
fn transaction_before_account_open_is_an_error() {
    let mut t = transaction("T1", "A1", "Credit", 50.0);
    t["transaction_date"] = json!("2019-05-31");

    let report = run(vec![record(
        customer("C1"),
        vec![account("A1", "C1", "Savings")],
        vec![t],
    )]);

    assert_eq!(
        messages(report.errors()),
        vec!["Temporal violation - transaction_date 2019-05-31 before account open_date 2019-06-01"]
    );
    assert_eq!(report.errors()[0].location.entity, Entity::Transaction(0));
}

#[test]
fn unparseable_customer_since_is_reported_at_both_levels() {
    let report = run(vec![dated("01/01/2019", "2019-06-01")]);

    assert_eq!(
        messages(report.errors()),
        vec![
            "Invalid customer_since format '01/01/2019' (expected YYYY-MM-DD)",
            "Date parsing error - '01/01/2019' is not a valid YYYY-MM-DD date",
        ]
    );
    assert!(report.errors().iter().all(|d| d.kind == IssueKind::InvalidDate));
}

#[test]
fn unpadded_dates_are_format_errors() {
    let report = run(vec![dated("2019-01-01", "2019-6-1")]);
    assert_eq!(
        messages(report.errors()),
        vec!["Date parsing error - '2019-6-1' is not a valid YYYY-MM-DD date"]
    );
}

#[test]
fn bad_transaction_date_is_a_parse_error() {
    let mut t = transaction("T1", "A1", "Credit", 50.0);
    t["transaction_date"] = json!("2019-02-30");

    let report = run(vec![record(
        customer("C1"),
        vec![account("A1", "C1", "Savings")],
        vec![t],
    )]);

    assert_eq!(report.errors_of(IssueKind::InvalidDate).count(), 1);
    assert_eq!(report.errors_of(IssueKind::Temporal).count(), 0);
}

#[test]
fn invalid_date_of_birth_is_an_error() {
    let mut c = customer("C1");
    c["date_of_birth"] = json!("March 12, 1985");

    let report = run(vec![record(c, vec![], vec![])]);
    assert_eq!(
        messages(report.errors()),
        vec!["Invalid date_of_birth format 'March 12, 1985' (expected YYYY-MM-DD)"]
    );
}

#[test]
fn implausible_ages_are_warnings_only() {
    for (dob, age) in [("2010-01-01", 15), ("1890-06-30", 134)] {
        let mut c = customer("C1");
        c["date_of_birth"] = json!(dob);

        let report = run(vec![record(c, vec![], vec![])]);
        assert!(report.passed());
        assert_eq!(messages(report.warnings()), vec![format!("Unusual age {age} years")]);
    }
}

#[test]
fn age_boundaries_are_inclusive() {
    // as_of is 2025-01-01 in the shared engine.
    for dob in ["2007-01-01", "1905-01-01"] {
        let mut c = customer("C1");
        c["date_of_birth"] = json!(dob);
        let report = run(vec![record(c, vec![], vec![])]);
        assert_eq!(report.warning_count(), 0, "dob {dob}");
    }
}

#[test]
fn age_depends_on_the_reference_date() {
    let mut c = customer("C1");
    c["date_of_birth"] = json!("2007-06-01");
    let dataset = Dataset::from_value(json!([record(c, vec![], vec![])])).unwrap();

    let early = ValidationEngine::new(
        ValidatorConfig::default().with_as_of(NaiveDate::from_ymd_opt(2025, 5, 31).unwrap()),
    );
    let late = ValidationEngine::new(
        ValidatorConfig::default().with_as_of(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()),
    );

    assert_eq!(early.run(&dataset).warning_count(), 1);
    assert_eq!(late.run(&dataset).warning_count(), 0);
}
