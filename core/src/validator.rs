//! Record validator — second pass over the dataset.
//!
//! CHECK ORDER (part of the output contract, never reordered):
//!   Customer:    required fields, credit score, date of birth + age,
//!                customer_since format, phone prefix
//!   Account:     required fields, global cust_id, parent cust_id,
//!                open_date vs customer_since, balance rules,
//!                closed balance, interest rate
//!   Transaction: required fields, global account_id, local account
//!                resolution (stops here when unresolved),
//!                transaction_date vs open_date, debit/credit sign
//!
//! Every check runs even when an earlier one on the same entity failed.

use crate::{
    config::ValidatorConfig,
    dataset::{
        AccountRecord, AccountStatus, AccountType, CustomerBundle, CustomerRecord, Field,
        TransactionRecord, TransactionType,
    },
    date::{age_in_years, parse_date},
    diagnostic::{Entity, IssueKind},
    index::IdentifierIndex,
    report::{ReportBuilder, Scope},
    types::{EntityIndex, RecordIndex},
};

/// How a single required field looks after decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence<'f> {
    Present,
    Missing,
    Malformed(&'f str),
}

impl<'f> Presence<'f> {
    fn of<T>(field: &'f Field<T>) -> Self {
        match field {
            Field::Absent        => Presence::Missing,
            Field::Malformed(raw) => Presence::Malformed(raw),
            Field::Present(_)    => Presence::Present,
        }
    }

    /// Customer fields treat the empty string as missing.
    fn of_text(field: &'f Field<String>) -> Self {
        match field {
            Field::Present(s) if s.is_empty() => Presence::Missing,
            other => Presence::of(other),
        }
    }
}

/// One row of a required-field table: name, decoded state, expected JSON type.
type Requirement<'f> = (&'static str, Presence<'f>, &'static str);

fn check_required(scope: &mut Scope<'_>, requirements: &[Requirement<'_>]) {
    for &(name, presence, expected) in requirements {
        match presence {
            Presence::Present => {}
            Presence::Missing => {
                scope.error(IssueKind::MissingField, format!("Missing required field '{name}'"));
            }
            Presence::Malformed(raw) => scope.error(
                IssueKind::MalformedField,
                format!("Field '{name}' has unexpected type (expected {expected}): {raw}"),
            ),
        }
    }
}

/// Identifier as shown inside a message.
fn shown(field: &Field<String>) -> &str {
    match field {
        Field::Present(s)     => s,
        Field::Malformed(raw) => raw,
        Field::Absent         => "?",
    }
}

pub struct RecordValidator<'a> {
    config: &'a ValidatorConfig,
    index:  &'a IdentifierIndex,
}

impl<'a> RecordValidator<'a> {
    pub fn new(config: &'a ValidatorConfig, index: &'a IdentifierIndex) -> Self {
        Self { config, index }
    }

    /// Validate one customer record and everything nested under it.
    pub fn validate_record(
        &self,
        record: RecordIndex,
        bundle: &CustomerBundle,
        report: &mut ReportBuilder,
    ) {
        let cust_id = bundle.customer.cust_id.present();

        let mut scope = report.scope(record, cust_id, Entity::Customer);
        self.validate_customer(&bundle.customer, &mut scope);

        for (i, account) in bundle.accounts.iter().enumerate() {
            let mut scope = report.scope(record, cust_id, Entity::Account(i));
            self.validate_account(account, &bundle.customer, &mut scope);
        }

        for (i, transaction) in bundle.transactions.iter().enumerate() {
            let mut scope = report.scope(record, cust_id, Entity::Transaction(i));
            self.validate_transaction(i, transaction, bundle, &mut scope);
        }
    }

    // ── Customer ──────────────────────────────────────────────────

    fn validate_customer(&self, customer: &CustomerRecord, scope: &mut Scope<'_>) {
        let credit_presence = match customer.credit_score {
            Field::Present(0) => Presence::Missing,
            ref other => Presence::of(other),
        };
        check_required(
            scope,
            &[
                ("cust_id", Presence::of_text(&customer.cust_id), "string"),
                ("first_name", Presence::of_text(&customer.first_name), "string"),
                ("last_name", Presence::of_text(&customer.last_name), "string"),
                ("date_of_birth", Presence::of_text(&customer.date_of_birth), "string"),
                ("email", Presence::of_text(&customer.email), "string"),
                ("phone", Presence::of_text(&customer.phone), "string"),
                ("customer_since", Presence::of_text(&customer.customer_since), "string"),
                ("customer_segment", Presence::of_text(&customer.customer_segment), "string"),
                ("credit_score", credit_presence, "integer"),
            ],
        );

        let range = self.config.credit_score;
        if let Some(&score) = customer.credit_score.present() {
            if score != 0 && !range.contains(score) {
                scope.error(
                    IssueKind::OutOfRange,
                    format!(
                        "Invalid credit_score {score} (must be {}-{})",
                        range.min, range.max
                    ),
                );
            }
        }

        if let Some(dob) = customer.date_of_birth.non_empty() {
            match parse_date(dob) {
                Ok(born) => {
                    let age = age_in_years(born, self.config.as_of);
                    if !self.config.age_years.contains(age) {
                        scope.warning(format!("Unusual age {age} years"));
                    }
                }
                Err(_) => scope.error(
                    IssueKind::InvalidDate,
                    format!("Invalid date_of_birth format '{dob}' (expected YYYY-MM-DD)"),
                ),
            }
        }

        if let Some(since) = customer.customer_since.non_empty() {
            if parse_date(since).is_err() {
                scope.error(
                    IssueKind::InvalidDate,
                    format!("Invalid customer_since format '{since}' (expected YYYY-MM-DD)"),
                );
            }
        }

        if let Some(phone) = customer.phone.non_empty() {
            if !phone.starts_with(self.config.phone_prefix.as_str()) {
                scope.warning(format!(
                    "Phone '{phone}' doesn't use the '{}' prefix (privacy guideline)",
                    self.config.phone_prefix
                ));
            }
        }
    }

    // ── Account ───────────────────────────────────────────────────

    fn validate_account(
        &self,
        account: &AccountRecord,
        customer: &CustomerRecord,
        scope: &mut Scope<'_>,
    ) {
        let mut requirements = vec![
            ("account_id", Presence::of(&account.account_id), "string"),
            ("cust_id", Presence::of(&account.cust_id), "string"),
            ("account_type", Presence::of(&account.account_type), "string"),
            ("account_status", Presence::of(&account.account_status), "string"),
            ("open_date", Presence::of(&account.open_date), "string"),
            ("current_balance", Presence::of(&account.current_balance), "number"),
            ("currency", Presence::of(&account.currency), "string"),
            ("interest_rate", Presence::of(&account.interest_rate), "number"),
        ];
        // Optional, but a value of the wrong type is still reported.
        if let Some(raw) = account.overdraft_limit.malformed() {
            requirements.push(("overdraft_limit", Presence::Malformed(raw), "number"));
        }
        check_required(scope, &requirements);

        let account_id = shown(&account.account_id);

        if let Some(owner) = account.cust_id.non_empty() {
            if !self.index.has_customer(owner) {
                scope.error(
                    IssueKind::Referential,
                    format!(
                        "Foreign key violation - cust_id '{owner}' of account '{account_id}' not found"
                    ),
                );
            }

            if customer.cust_id.present().map(String::as_str) != Some(owner) {
                scope.error(
                    IssueKind::Consistency,
                    format!(
                        "cust_id mismatch - account has '{owner}' but parent customer is '{}'",
                        shown(&customer.cust_id)
                    ),
                );
            }
        }

        if let (Some(since), Some(opened)) =
            (customer.customer_since.non_empty(), account.open_date.non_empty())
        {
            match (parse_date(since), parse_date(opened)) {
                (Ok(since_date), Ok(open_date)) => {
                    if open_date < since_date {
                        scope.error(
                            IssueKind::Temporal,
                            format!(
                                "Temporal violation - open_date {opened} before customer_since {since}"
                            ),
                        );
                    }
                }
                (Err(e), _) | (_, Err(e)) => {
                    scope.error(IssueKind::InvalidDate, format!("Date parsing error - {e}"));
                }
            }
        }

        let balance = account.current_balance.present().copied();

        if let (Some(kind), Some(balance)) = (account.account_type.present(), balance) {
            if self.config.requires_non_negative(kind) && balance < 0.0 {
                scope.error(
                    IssueKind::BusinessRule,
                    format!("Business rule violation - {kind} has negative balance {balance}"),
                );
            }
            if *kind == AccountType::Checking {
                if let Some(limit) = account.overdraft_limit_or_zero() {
                    if balance < -limit {
                        scope.error(
                            IssueKind::BusinessRule,
                            format!(
                                "Business rule violation - balance {balance} exceeds overdraft_limit {limit}"
                            ),
                        );
                    }
                }
            }
        }

        if let (Some(AccountStatus::Closed), Some(balance)) = (account.account_status.present(), balance) {
            if balance != 0.0 {
                scope.warning(format!("Closed account has non-zero balance {balance}"));
            }
        }

        if let (Some(kind), Some(&rate)) = (account.account_type.present(), account.interest_rate.present()) {
            match kind {
                AccountType::Checking if rate > self.config.max_checking_rate => {
                    scope.warning(format!("Unusual interest_rate {rate}% for Checking"));
                }
                AccountType::Savings if rate > self.config.max_savings_rate => {
                    scope.warning(format!("Unusual interest_rate {rate}% for Savings"));
                }
                _ => {}
            }
        }
    }

    // ── Transaction ───────────────────────────────────────────────

    fn validate_transaction(
        &self,
        position: EntityIndex,
        transaction: &TransactionRecord,
        bundle: &CustomerBundle,
        scope: &mut Scope<'_>,
    ) {
        check_required(
            scope,
            &[
                ("transaction_id", Presence::of(&transaction.transaction_id), "string"),
                ("account_id", Presence::of(&transaction.account_id), "string"),
                ("transaction_date", Presence::of(&transaction.transaction_date), "string"),
                ("transaction_type", Presence::of(&transaction.transaction_type), "string"),
                ("amount", Presence::of(&transaction.amount), "number"),
            ],
        );

        if let Some(account_id) = transaction.account_id.non_empty() {
            if !self.index.has_account(account_id) {
                scope.error(
                    IssueKind::Referential,
                    format!("Foreign key violation - account_id '{account_id}' not found"),
                );
            }
        }

        let parent = transaction
            .account_id
            .present()
            .and_then(|id| bundle.find_account(id));

        let Some(parent) = parent else {
            log::debug!("Transaction {position} has no parent account in its customer record");
            scope.error(
                IssueKind::Ownership,
                format!(
                    "Transaction references account_id '{}' not owned by this customer",
                    shown(&transaction.account_id)
                ),
            );
            return;
        };

        if let (Some(posted), Some(opened)) =
            (transaction.transaction_date.non_empty(), parent.open_date.non_empty())
        {
            match (parse_date(posted), parse_date(opened)) {
                (Ok(posted_date), Ok(open_date)) => {
                    if posted_date < open_date {
                        scope.error(
                            IssueKind::Temporal,
                            format!(
                                "Temporal violation - transaction_date {posted} before account open_date {opened}"
                            ),
                        );
                    }
                }
                (Err(e), _) | (_, Err(e)) => {
                    scope.error(IssueKind::InvalidDate, format!("Date parsing error - {e}"));
                }
            }
        }

        if let (Some(kind), Some(&amount)) = (transaction.transaction_type.present(), transaction.amount.present()) {
            match kind {
                TransactionType::Debit if amount > 0.0 => {
                    scope.warning(format!("Debit transaction has positive amount {amount}"));
                }
                TransactionType::Credit if amount < 0.0 => {
                    scope.warning(format!("Credit transaction has negative amount {amount}"));
                }
                _ => {}
            }
        }
    }
}
