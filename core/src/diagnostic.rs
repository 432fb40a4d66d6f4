//! Diagnostics — one reported error or warning.

use crate::types::{EntityId, EntityIndex, RecordIndex};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// What went wrong, independent of the wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    // ── Structural ────────────────────────────────
    MissingField,
    MalformedField,
    InvalidDate,

    // ── Referential ───────────────────────────────
    /// Identifier not found anywhere in the dataset.
    Referential,
    /// Identifier not found among the parent customer's own accounts.
    Ownership,
    /// Child's back-reference disagrees with its actual parent.
    Consistency,

    // ── Semantic ──────────────────────────────────
    Temporal,
    BusinessRule,
    OutOfRange,

    // ── Non-blocking ──────────────────────────────
    Advisory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum Entity {
    Customer,
    Account(EntityIndex),
    Transaction(EntityIndex),
}

/// Where a diagnostic came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub record:  RecordIndex,
    pub cust_id: Option<EntityId>,
    pub entity:  Entity,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cust_id {
            Some(id) => write!(f, "Record {} (Customer {id})", self.record)?,
            None     => write!(f, "Record {} (Customer ?)", self.record)?,
        }
        match self.entity {
            Entity::Customer       => Ok(()),
            Entity::Account(i)     => write!(f, ", Account {i}"),
            Entity::Transaction(i) => write!(f, ", Transaction {i}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind:     IssueKind,
    pub location: Location,
    pub message:  String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}
