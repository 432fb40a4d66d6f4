//! Identifier index — first pass over the dataset.
//!
//! Collects every usable customer, account and transaction id. Missing,
//! empty and malformed identifiers are skipped here; the validator reports
//! them in the second pass.

use crate::{
    dataset::{Dataset, Field},
    report::Stats,
    types::EntityId,
};
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct IdentifierIndex {
    pub customer_ids:    HashSet<EntityId>,
    pub account_ids:     HashSet<EntityId>,
    pub transaction_ids: HashSet<EntityId>,
    pub stats:           Stats,
}

impl IdentifierIndex {
    pub fn build(dataset: &Dataset) -> Self {
        let mut index = Self::default();

        for bundle in &dataset.records {
            if let Some(id) = usable_id(&bundle.customer.cust_id) {
                index.customer_ids.insert(id.to_string());
                index.stats.customers += 1;
            }
            for account in &bundle.accounts {
                if let Some(id) = usable_id(&account.account_id) {
                    index.account_ids.insert(id.to_string());
                    index.stats.accounts += 1;
                }
            }
            for transaction in &bundle.transactions {
                if let Some(id) = usable_id(&transaction.transaction_id) {
                    index.transaction_ids.insert(id.to_string());
                    index.stats.transactions += 1;
                }
            }
        }

        log::debug!(
            "Indexed {} customer ids, {} account ids, {} transaction ids",
            index.customer_ids.len(),
            index.account_ids.len(),
            index.transaction_ids.len()
        );
        index
    }

    pub fn has_customer(&self, id: &str) -> bool {
        self.customer_ids.contains(id)
    }

    pub fn has_account(&self, id: &str) -> bool {
        self.account_ids.contains(id)
    }

    pub fn has_transaction(&self, id: &str) -> bool {
        self.transaction_ids.contains(id)
    }
}

fn usable_id(field: &Field<EntityId>) -> Option<&str> {
    field.non_empty()
}
