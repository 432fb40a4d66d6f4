//! Referential, temporal and business-rule validation for banking datasets.
//!
//! A dataset is an ordered list of customer records, each embedding its
//! accounts and their transactions. Decode it with [`Dataset::from_json_str`]
//! or [`Dataset::from_value`], then call [`validate`] (default policy) or
//! [`ValidationEngine::run`] (custom policy).

pub mod config;
pub mod dataset;
pub mod date;
pub mod decode;
pub mod diagnostic;
pub mod engine;
pub mod error;
pub mod index;
pub mod report;
pub mod types;
pub mod validator;

pub use config::ValidatorConfig;
pub use dataset::Dataset;
pub use diagnostic::{Diagnostic, IssueKind, Severity};
pub use engine::ValidationEngine;
pub use error::{ValidateError, ValidateResult};
pub use report::{RenderOptions, Report, ReportSummary, Stats};

/// Validate with the default policy.
pub fn validate(dataset: &Dataset) -> Report {
    ValidationEngine::default().run(dataset)
}
