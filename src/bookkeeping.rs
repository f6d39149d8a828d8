use std::sync::Arc;

use bookkeeping_core::{Account, AccountCode, AccountStore, JournalId, JournalLine, JournalStore};
use time::Date;

use crate::{
    error::BookkeepingError,
    posting::{PostingEngine, PostingPolicy},
    registry::AccountRegistry,
    report::{BalanceSheet, GeneralLedger, ProfitAndLoss, ReportEngine},
};

/// Entry point tying the chart of accounts, posting and reports to one store.
pub struct Bookkeeping {
    registry: AccountRegistry,
    posting: PostingEngine,
    reports: ReportEngine,
}

impl Bookkeeping {
    pub fn new(accounts: Arc<dyn AccountStore>, journals: Arc<dyn JournalStore>, policy: PostingPolicy) -> Self {
        Self {
            registry: AccountRegistry::new(accounts.clone()),
            posting: PostingEngine::new(accounts, journals.clone(), policy),
            reports: ReportEngine::new(journals),
        }
    }

    /// Builds on a single backend serving both accounts and journals.
    pub fn with_storage<S>(storage: Arc<S>, policy: PostingPolicy) -> Self
    where
        S: AccountStore + JournalStore + 'static,
    {
        Self::new(storage.clone(), storage, policy)
    }

    pub fn post(&self, lines: &[JournalLine]) -> Result<Vec<JournalId>, BookkeepingError> {
        self.posting.post(lines)
    }

    pub fn fetch_accounts(&self, code_filter: &str, name_filter: &str) -> Result<Vec<Account>, BookkeepingError> {
        self.registry.fetch(code_filter, name_filter)
    }

    pub fn fetch_general_ledger(&self, codes: &[AccountCode]) -> Result<GeneralLedger, BookkeepingError> {
        self.reports.fetch_general_ledger(codes)
    }

    pub fn fetch_pl(&self, start: Option<Date>, end: Option<Date>) -> Result<ProfitAndLoss, BookkeepingError> {
        self.reports.fetch_pl(start, end)
    }

    pub fn fetch_bs(&self, as_of: Option<Date>) -> Result<BalanceSheet, BookkeepingError> {
        self.reports.fetch_bs(as_of)
    }
}
