//! Report aggregation.
//!
//! `ReportBuilder` is the one mutable accumulator of a run. The validator
//! borrows it mutably; `finish()` hands the caller an immutable `Report`.
//! The report always keeps every diagnostic. Truncation exists only in
//! `render()`, for console output.

use crate::{
    diagnostic::{Diagnostic, Entity, IssueKind, Location, Severity},
    error::ValidateResult,
    types::{EntityId, RecordIndex},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;

pub const DEFAULT_DISPLAY_LIMIT: usize = 20;

/// Entities carrying a usable identifier, per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub customers:    usize,
    pub accounts:     usize,
    pub transactions: usize,
}

impl Stats {
    /// Kind name → count, in a stable order.
    pub fn as_map(&self) -> BTreeMap<&'static str, usize> {
        BTreeMap::from([
            ("accounts", self.accounts),
            ("customers", self.customers),
            ("transactions", self.transactions),
        ])
    }
}

// ── Builder ───────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct ReportBuilder {
    stats:    Stats,
    errors:   Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl ReportBuilder {
    pub fn new(stats: Stats) -> Self {
        Self { stats, ..Self::default() }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error   => self.errors.push(diagnostic),
            Severity::Warning => self.warnings.push(diagnostic),
        }
    }

    /// A scoped sink that stamps every diagnostic with `entity` inside one record.
    pub fn scope<'a>(
        &'a mut self,
        record: RecordIndex,
        cust_id: Option<&EntityId>,
        entity: Entity,
    ) -> Scope<'a> {
        Scope {
            builder: self,
            location: Location { record, cust_id: cust_id.cloned(), entity },
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn finish(self) -> Report {
        Report {
            stats:    self.stats,
            errors:   self.errors,
            warnings: self.warnings,
        }
    }
}

/// Borrowed view of the builder bound to one entity.
pub struct Scope<'a> {
    builder:  &'a mut ReportBuilder,
    location: Location,
}

impl Scope<'_> {
    pub fn error(&mut self, kind: IssueKind, message: impl Into<String>) {
        self.emit(Severity::Error, kind, message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.emit(Severity::Warning, IssueKind::Advisory, message.into());
    }

    fn emit(&mut self, severity: Severity, kind: IssueKind, message: String) {
        self.builder.push(Diagnostic {
            severity,
            kind,
            location: self.location.clone(),
            message,
        });
    }
}

// ── Report ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    stats:    Stats,
    errors:   Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

/// The machine-facing headline: verdict, counts, stats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub passed:   bool,
    pub errors:   usize,
    pub warnings: usize,
    pub stats:    BTreeMap<&'static str, usize>,
}

#[derive(Serialize)]
struct ReportDocument<'a> {
    #[serde(flatten)]
    summary:         ReportSummary,
    error_details:   &'a [Diagnostic],
    warning_details: &'a [Diagnostic],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// How many errors (and warnings, when shown) to print.
    pub limit:   usize,
    /// Print warnings individually instead of only their count.
    pub verbose: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { limit: DEFAULT_DISPLAY_LIMIT, verbose: false }
    }
}

impl Report {
    /// True iff there are no errors. Warnings never fail a dataset.
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Errors of one kind, in emission order.
    pub fn errors_of(&self, kind: IssueKind) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.errors.iter().filter(move |d| d.kind == kind)
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            passed:   self.passed(),
            errors:   self.error_count(),
            warnings: self.warning_count(),
            stats:    self.stats.as_map(),
        }
    }

    /// Summary plus the full, untruncated diagnostic lists.
    pub fn to_json(&self) -> ValidateResult<String> {
        let doc = ReportDocument {
            summary:         self.summary(),
            error_details:   &self.errors,
            warning_details: &self.warnings,
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Console rendering. Shows at most `opts.limit` entries per list.
    pub fn render(&self, opts: &RenderOptions) -> String {
        let mut out = String::new();
        let rule = "=".repeat(60);

        // Writing into a String cannot fail.
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "Validation Results");
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out);
        let _ = writeln!(out, "Statistics:");
        let _ = writeln!(out, "  Customers:    {}", self.stats.customers);
        let _ = writeln!(out, "  Accounts:     {}", self.stats.accounts);
        let _ = writeln!(out, "  Transactions: {}", self.stats.transactions);

        if !self.errors.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Errors: {}", self.errors.len());
            write_truncated(&mut out, &self.errors, opts.limit, "errors");
        }

        if !self.warnings.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Warnings: {}", self.warnings.len());
            if opts.verbose {
                write_truncated(&mut out, &self.warnings, opts.limit, "warnings");
            } else {
                let _ = writeln!(out, "  (Use --verbose to see warnings)");
            }
        }

        let _ = writeln!(out);
        if self.errors.is_empty() && self.warnings.is_empty() {
            let _ = writeln!(out, "All validation checks passed!");
        } else if self.errors.is_empty() {
            let _ = writeln!(
                out,
                "No critical errors found (but {} warnings)",
                self.warnings.len()
            );
        } else {
            let _ = writeln!(out, "Validation failed with {} errors", self.errors.len());
        }
        out
    }
}

fn write_truncated(out: &mut String, items: &[Diagnostic], limit: usize, noun: &str) {
    for d in items.iter().take(limit) {
        let _ = writeln!(out, "  - {d}");
    }
    if items.len() > limit {
        let _ = writeln!(out, "  ... and {} more {noun}", items.len() - limit);
    }
}
