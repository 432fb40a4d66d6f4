//! The validation engine — one call, two passes.
//!
//! EXECUTION ORDER (fixed):
//!   1. IdentifierIndex::build   (every id in the dataset)
//!   2. RecordValidator          (records in input order; inside each:
//!                                customer, accounts, transactions)
//!   3. ReportBuilder::finish    (immutable Report back to the caller)
//!
//! RULES:
//!   - The dataset is never mutated.
//!   - No state survives between runs; the same input and policy give the
//!     same report, diagnostic for diagnostic.

use crate::{
    config::ValidatorConfig,
    dataset::Dataset,
    index::IdentifierIndex,
    report::{Report, ReportBuilder},
    validator::RecordValidator,
};

#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    config: ValidatorConfig,
}

impl ValidationEngine {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn run(&self, dataset: &Dataset) -> Report {
        let index = IdentifierIndex::build(dataset);
        let mut report = ReportBuilder::new(index.stats);
        let validator = RecordValidator::new(&self.config, &index);

        for (record, bundle) in dataset.records.iter().enumerate() {
            validator.validate_record(record, bundle, &mut report);
            log::debug!(
                "Record {record} validated ({} errors so far)",
                report.error_count()
            );
        }

        let report = report.finish();
        log::info!(
            "Validated {} records: {} errors, {} warnings, passed={}",
            dataset.len(),
            report.error_count(),
            report.warning_count(),
            report.passed()
        );
        report
    }
}
