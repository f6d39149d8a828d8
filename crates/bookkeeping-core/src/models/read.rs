use std::sync::Arc;

use serde::Serialize;
use time::Date;

use super::{Account, AccountCode, Amount};

pub type JournalId = i64;

/// A persisted journal line joined with the account it was posted to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalRecord {
    pub id: JournalId,
    pub date: Option<Date>,
    pub code: AccountCode,
    pub description: Arc<str>,
    pub debit: Amount,
    pub credit: Amount,
    pub account: Account,
}

impl JournalRecord {
    pub fn balance(&self) -> i64 {
        self.account.normal_balance(self.debit, self.credit)
    }
}
