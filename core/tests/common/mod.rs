//! Dataset builders shared by the integration tests.
//!
//! Every builder returns a record that passes validation on its own; tests
//! break exactly the field they are about.

#![allow(dead_code)]

use bankcheck_core::{Dataset, Report, ValidationEngine, ValidatorConfig};
use chrono::NaiveDate;
use serde_json::{json, Value};

pub fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date")
}

pub fn engine() -> ValidationEngine {
    let _ = env_logger::builder().is_test(true).try_init();
    ValidationEngine::new(ValidatorConfig::default().with_as_of(as_of()))
}

pub fn customer(cust_id: &str) -> Value {
    json!({
        "cust_id": cust_id,
        "first_name": "Ada",
        "last_name": "Lovelace",
        "date_of_birth": "1985-03-12",
        "email": "ada@example.com",
        "phone": "555-0100",
        "customer_since": "2019-01-01",
        "customer_segment": "Retail",
        "credit_score": 700
    })
}

pub fn account(account_id: &str, cust_id: &str, account_type: &str) -> Value {
    json!({
        "account_id": account_id,
        "cust_id": cust_id,
        "account_type": account_type,
        "account_status": "Open",
        "open_date": "2019-06-01",
        "current_balance": 100.0,
        "currency": "USD",
        "interest_rate": 0.5
    })
}

pub fn transaction(transaction_id: &str, account_id: &str, kind: &str, amount: f64) -> Value {
    json!({
        "transaction_id": transaction_id,
        "account_id": account_id,
        "transaction_date": "2019-07-01",
        "transaction_type": kind,
        "amount": amount,
        "transaction_category": "Deposit"
    })
}

pub fn record(customer: Value, accounts: Vec<Value>, transactions: Vec<Value>) -> Value {
    json!({
        "customer": customer,
        "accounts": accounts,
        "transactions": transactions
    })
}

/// One customer `cust_id` with Savings account `A-<cust_id>` and one Credit.
pub fn clean_record(cust_id: &str) -> Value {
    let account_id = format!("A-{cust_id}");
    record(
        customer(cust_id),
        vec![account(&account_id, cust_id, "Savings")],
        vec![transaction(&format!("T-{cust_id}"), &account_id, "Credit", 50.0)],
    )
}

pub fn run(records: Vec<Value>) -> Report {
    let dataset = Dataset::from_value(Value::Array(records)).expect("dataset decodes");
    engine().run(&dataset)
}

pub fn messages(diagnostics: &[bankcheck_core::Diagnostic]) -> Vec<String> {
    diagnostics.iter().map(|d| d.message.clone()).collect()
}
