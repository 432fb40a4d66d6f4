//! Shared primitive types used across the validator.

/// Position of a customer record in the input sequence.
pub type RecordIndex = usize;

/// Position of an account or transaction inside its customer record.
pub type EntityIndex = usize;

/// A customer, account or transaction identifier, compared verbatim.
pub type EntityId = String;
