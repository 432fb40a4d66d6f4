//! Decode boundary: loosely-typed JSON into the typed dataset model.
//!
//! RULE: Decoding never produces diagnostics. A field with the wrong JSON
//! type becomes `Field::Malformed` and the validator reports it. Only a
//! document with the wrong overall shape is rejected here.

use crate::{
    dataset::{
        AccountRecord, CustomerBundle, CustomerRecord, Dataset, Field, TransactionRecord,
    },
    error::{ValidateError, ValidateResult},
    types::RecordIndex,
};
use serde_json::{Map, Value};

impl Dataset {
    /// Parse a JSON document and decode it.
    pub fn from_json_str(json: &str) -> ValidateResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Decode an already-parsed JSON document.
    pub fn from_value(value: Value) -> ValidateResult<Self> {
        let items = match value {
            Value::Array(items) => items,
            _ => return Err(ValidateError::NotAnArray),
        };

        let records = items
            .iter()
            .enumerate()
            .map(|(index, item)| decode_bundle(index, item))
            .collect::<ValidateResult<Vec<_>>>()?;

        log::debug!("Decoded {} customer records", records.len());
        Ok(Dataset::new(records))
    }
}

fn decode_bundle(index: RecordIndex, item: &Value) -> ValidateResult<CustomerBundle> {
    let obj = item
        .as_object()
        .ok_or(ValidateError::RecordNotObject { index })?;

    let customer = match obj.get("customer") {
        None | Some(Value::Null) => CustomerRecord::default(),
        Some(Value::Object(map)) => decode_customer(map),
        Some(_) => {
            return Err(ValidateError::FieldNotObject { index, field: "customer" });
        }
    };

    let accounts = nested_objects(obj, index, "accounts")?
        .into_iter()
        .map(decode_account)
        .collect();

    let transactions = nested_objects(obj, index, "transactions")?
        .into_iter()
        .map(decode_transaction)
        .collect();

    Ok(CustomerBundle { customer, accounts, transactions })
}

/// An absent list is empty. Non-object entries decode as empty records so
/// every required field on them is reported.
fn nested_objects<'a>(
    obj: &'a Map<String, Value>,
    index: RecordIndex,
    field: &'static str,
) -> ValidateResult<Vec<Option<&'a Map<String, Value>>>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.iter().map(Value::as_object).collect()),
        Some(_) => Err(ValidateError::FieldNotArray { index, field }),
    }
}

fn decode_customer(map: &Map<String, Value>) -> CustomerRecord {
    CustomerRecord {
        cust_id:          text(map, "cust_id"),
        first_name:       text(map, "first_name"),
        last_name:        text(map, "last_name"),
        date_of_birth:    text(map, "date_of_birth"),
        email:            text(map, "email"),
        phone:            text(map, "phone"),
        customer_since:   text(map, "customer_since"),
        customer_segment: text(map, "customer_segment"),
        credit_score:     integer(map, "credit_score"),
    }
}

fn decode_account(map: Option<&Map<String, Value>>) -> AccountRecord {
    let Some(map) = map else {
        return AccountRecord::default();
    };
    AccountRecord {
        account_id:      text(map, "account_id"),
        cust_id:         text(map, "cust_id"),
        account_type:    label(map, "account_type"),
        account_status:  label(map, "account_status"),
        open_date:       text(map, "open_date"),
        current_balance: number(map, "current_balance"),
        currency:        text(map, "currency"),
        interest_rate:   number(map, "interest_rate"),
        overdraft_limit: number(map, "overdraft_limit"),
    }
}

fn decode_transaction(map: Option<&Map<String, Value>>) -> TransactionRecord {
    let Some(map) = map else {
        return TransactionRecord::default();
    };
    TransactionRecord {
        transaction_id:       text(map, "transaction_id"),
        account_id:           text(map, "account_id"),
        transaction_date:     text(map, "transaction_date"),
        transaction_type:     label(map, "transaction_type"),
        amount:               number(map, "amount"),
        transaction_category: text(map, "transaction_category"),
    }
}

// ── Field extractors ──────────────────────────────────────────────

fn field<T>(map: &Map<String, Value>, key: &str, extract: impl Fn(&Value) -> Option<T>) -> Field<T> {
    match map.get(key) {
        None | Some(Value::Null) => Field::Absent,
        Some(value) => match extract(value) {
            Some(v) => Field::Present(v),
            None => Field::Malformed(value.to_string()),
        },
    }
}

fn text(map: &Map<String, Value>, key: &str) -> Field<String> {
    field(map, key, |v| v.as_str().map(str::to_string))
}

fn label<T: for<'s> From<&'s str>>(map: &Map<String, Value>, key: &str) -> Field<T> {
    field(map, key, |v| v.as_str().map(T::from))
}

fn number(map: &Map<String, Value>, key: &str) -> Field<f64> {
    field(map, key, Value::as_f64)
}

/// Integral JSON numbers only; `700.0` is malformed.
fn integer(map: &Map<String, Value>, key: &str) -> Field<i64> {
    field(map, key, Value::as_i64)
}
