use std::sync::Arc;

use bookkeeping_core::{pattern::is_code_pattern, Account, AccountFilter, AccountStore};

use crate::error::BookkeepingError;

/// Read access to the chart of accounts.
pub struct AccountRegistry {
    store: Arc<dyn AccountStore>,
}

impl AccountRegistry {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Accounts matching both filters; an empty filter leaves that side unconstrained.
    ///
    /// `code_filter` may only contain digits and `*`.
    pub fn fetch(&self, code_filter: &str, name_filter: &str) -> Result<Vec<Account>, BookkeepingError> {
        if !code_filter.is_empty() && !is_code_pattern(code_filter) {
            return Err(BookkeepingError::InvalidFilter(code_filter.to_string()));
        }

        let accounts = self.store.fetch_accounts(&AccountFilter::new(code_filter, name_filter))?;
        tracing::debug!(code_filter, name_filter, count = accounts.len(), "Accounts fetched");
        Ok(accounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookkeeping_memory::InMemoryStorage;

    fn registry() -> AccountRegistry {
        let storage = Arc::new(InMemoryStorage::new());
        storage.insert_accounts(&[
            Account::new(1110, "Cash", true, true),
            Account::new(1120, "Accounts Receivable", true, true),
            Account::new(4100, "Sales", false, false),
        ]).unwrap();
        AccountRegistry::new(storage)
    }

    #[test]
    fn rejects_non_numeric_code_filter() {
        let registry = registry();
        for filter in ["11a", "abc1", "11%", "1 1"] {
            assert!(
                matches!(registry.fetch(filter, ""), Err(BookkeepingError::InvalidFilter(f)) if f == filter),
                "'{}' should be rejected", filter
            );
        }
    }

    #[test]
    fn empty_filters_return_everything_in_code_order() {
        let codes: Vec<_> = registry().fetch("", "").unwrap().iter().map(|a| a.code).collect();
        assert_eq!(codes, vec![1110, 1120, 4100]);
    }

    #[test]
    fn filters_combine() {
        let registry = registry();
        assert_eq!(registry.fetch("11*", "").unwrap().len(), 2);
        assert_eq!(registry.fetch("11*", "Rec").unwrap().len(), 1);
        assert_eq!(registry.fetch("4100", "").unwrap()[0].name.as_ref(), "Sales");
        assert!(registry.fetch("", "Payable").unwrap().is_empty());
    }
}
