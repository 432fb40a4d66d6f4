//! Typed dataset model.
//!
//! RULE: Every attribute is a `Field<T>`. The decoder decides once whether a
//! value is absent, malformed or present; the validator never inspects raw
//! JSON.

use crate::types::EntityId;
use std::fmt;

/// One attribute of a record after decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    /// Key missing or JSON `null`.
    Absent,
    /// Key present with a value of the wrong JSON type. Holds the compact JSON text.
    Malformed(String),
    Present(T),
}

impl<T> Field<T> {
    pub fn present(&self) -> Option<&T> {
        match self {
            Field::Present(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    pub fn malformed(&self) -> Option<&str> {
        match self {
            Field::Malformed(raw) => Some(raw),
            _ => None,
        }
    }
}

impl Field<String> {
    /// Present and not the empty string.
    pub fn non_empty(&self) -> Option<&str> {
        self.present().map(String::as_str).filter(|s| !s.is_empty())
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Field::Present(v),
            None => Field::Absent,
        }
    }
}

// ── Enumerated attributes ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountType {
    Checking,
    Savings,
    Cd,
    MoneyMarket,
    Other(String),
}

impl AccountType {
    pub fn as_str(&self) -> &str {
        match self {
            AccountType::Checking    => "Checking",
            AccountType::Savings     => "Savings",
            AccountType::Cd          => "CD",
            AccountType::MoneyMarket => "Money Market",
            AccountType::Other(s)    => s,
        }
    }
}

impl From<&str> for AccountType {
    fn from(s: &str) -> Self {
        match s {
            "Checking"     => AccountType::Checking,
            "Savings"      => AccountType::Savings,
            "CD"           => AccountType::Cd,
            "Money Market" => AccountType::MoneyMarket,
            other          => AccountType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountStatus {
    Open,
    Closed,
    Other(String),
}

impl From<&str> for AccountStatus {
    fn from(s: &str) -> Self {
        match s {
            "Open"   => AccountStatus::Open,
            "Closed" => AccountStatus::Closed,
            other    => AccountStatus::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionType {
    Debit,
    Credit,
    Other(String),
}

impl From<&str> for TransactionType {
    fn from(s: &str) -> Self {
        match s {
            "Debit"  => TransactionType::Debit,
            "Credit" => TransactionType::Credit,
            other    => TransactionType::Other(other.to_string()),
        }
    }
}

// ── Records ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerRecord {
    pub cust_id:          Field<EntityId>,
    pub first_name:       Field<String>,
    pub last_name:        Field<String>,
    pub date_of_birth:    Field<String>,
    pub email:            Field<String>,
    pub phone:            Field<String>,
    pub customer_since:   Field<String>,
    pub customer_segment: Field<String>,
    pub credit_score:     Field<i64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountRecord {
    pub account_id:      Field<EntityId>,
    pub cust_id:         Field<EntityId>,
    pub account_type:    Field<AccountType>,
    pub account_status:  Field<AccountStatus>,
    pub open_date:       Field<String>,
    pub current_balance: Field<f64>,
    pub currency:        Field<String>,
    pub interest_rate:   Field<f64>,
    pub overdraft_limit: Field<f64>,
}

impl AccountRecord {
    /// The overdraft allowance; absent means no overdraft.
    pub fn overdraft_limit_or_zero(&self) -> Option<f64> {
        match &self.overdraft_limit {
            Field::Present(limit) => Some(*limit),
            Field::Absent         => Some(0.0),
            Field::Malformed(_)   => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionRecord {
    pub transaction_id:       Field<EntityId>,
    pub account_id:           Field<EntityId>,
    pub transaction_date:     Field<String>,
    pub transaction_type:     Field<TransactionType>,
    pub amount:               Field<f64>,
    pub transaction_category: Field<String>,
}

/// One customer together with the accounts and transactions embedded under it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerBundle {
    pub customer:     CustomerRecord,
    pub accounts:     Vec<AccountRecord>,
    pub transactions: Vec<TransactionRecord>,
}

impl CustomerBundle {
    /// Linear scan of this record's own accounts.
    pub fn find_account(&self, account_id: &str) -> Option<&AccountRecord> {
        self.accounts
            .iter()
            .find(|a| a.account_id.present().map(String::as_str) == Some(account_id))
    }
}

/// The whole input: customer records in their original order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub records: Vec<CustomerBundle>,
}

impl Dataset {
    pub fn new(records: Vec<CustomerBundle>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
