use std::ops::{Bound, RangeBounds, RangeInclusive};

use time::Date;

use crate::models::{
    read::{JournalId, JournalRecord},
    write::JournalLine,
    Account, AccountCode,
};
use crate::pattern::{wildcard_contains, wildcard_match};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
    #[error("account not found: {0}")]
    AccountNotFound(AccountCode),
    #[error("account already exists: {0}")]
    AccountAlreadyExists(AccountCode),
    #[error("date out of storable range: {0}")]
    DateOutOfRange(Date),
    #[error("storage lock poisoned")]
    LockPoisoned,
}

/// Account lookup. Empty patterns leave that dimension unconstrained.
///
/// `code_pattern` must match the whole code; `name_pattern` matches anywhere
/// in the name. Both accept `*` as a wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountFilter {
    pub code_pattern: String,
    pub name_pattern: String,
}

impl AccountFilter {
    pub fn new(code_pattern: &str, name_pattern: &str) -> Self {
        Self {
            code_pattern: code_pattern.to_string(),
            name_pattern: name_pattern.to_string(),
        }
    }

    pub fn matches(&self, account: &Account) -> bool {
        (self.code_pattern.is_empty() || wildcard_match(&self.code_pattern, &account.code.to_string()))
            && (self.name_pattern.is_empty() || wildcard_contains(&self.name_pattern, &account.name))
    }
}

/// Journal lookup. Date bounds are inclusive when set; a line without a date
/// never satisfies a date bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalFilter {
    pub from: Bound<Date>,
    pub to: Bound<Date>,
    pub codes: Vec<AccountCode>,
    pub code_range: Option<RangeInclusive<AccountCode>>,
}

impl Default for JournalFilter {
    fn default() -> Self {
        Self {
            from: Bound::Unbounded,
            to: Bound::Unbounded,
            codes: Vec::new(),
            code_range: None,
        }
    }
}

impl JournalFilter {
    pub fn after(mut self, date: Option<Date>) -> Self {
        self.from = date.map_or(Bound::Unbounded, Bound::Included);
        self
    }

    pub fn before(mut self, date: Option<Date>) -> Self {
        self.to = date.map_or(Bound::Unbounded, Bound::Included);
        self
    }

    pub fn codes(mut self, codes: &[AccountCode]) -> Self {
        self.codes = codes.to_vec();
        self
    }

    pub fn code_range(mut self, range: RangeInclusive<AccountCode>) -> Self {
        self.code_range = Some(range);
        self
    }

    pub fn is_date_bounded(&self) -> bool {
        !matches!((self.from, self.to), (Bound::Unbounded, Bound::Unbounded))
    }

    pub fn matches(&self, date: Option<Date>, code: AccountCode) -> bool {
        let date_ok = match date {
            Some(d) => (self.from, self.to).contains(&d),
            None => !self.is_date_bounded(),
        };
        let code_ok = self.codes.is_empty() || self.codes.contains(&code);
        let range_ok = self.code_range.as_ref().map_or(true, |r| r.contains(&code));
        date_ok && code_ok && range_ok
    }
}

/// The chart of accounts.
pub trait AccountStore: Send + Sync {
    /// Inserts all accounts or none of them.
    fn insert_accounts(&self, accounts: &[Account]) -> Result<(), StorageError>;
    /// Matching accounts ordered by code.
    fn fetch_accounts(&self, filter: &AccountFilter) -> Result<Vec<Account>, StorageError>;
}

/// Append-only journal facts.
pub trait JournalStore: Send + Sync {
    /// Appends all lines as one atomic unit and returns the ids assigned to them, in order.
    fn insert_journals(&self, lines: &[JournalLine]) -> Result<Vec<JournalId>, StorageError>;
    /// Matching lines joined with their account, ordered by id.
    fn fetch_journals(&self, filter: &JournalFilter) -> Result<Vec<JournalRecord>, StorageError>;
}
