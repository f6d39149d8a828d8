use std::{collections::HashMap, sync::Arc};

use bookkeeping_core::{AccountCode, AccountFilter, AccountStore, JournalId, JournalLine, JournalStore};
use serde::Deserialize;

use crate::{balance::check_balance, error::BookkeepingError};

/// Rules applied to a batch before it is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PostingPolicy {
    /// Refuse batches whose debit or credit side sums to zero.
    #[serde(default = "default_reject_zero_amount")]
    pub reject_zero_amount: bool,
}

fn default_reject_zero_amount() -> bool {
    true
}

impl Default for PostingPolicy {
    fn default() -> Self {
        Self {
            reject_zero_amount: default_reject_zero_amount(),
        }
    }
}

/// Validates journal entries against the chart of accounts and commits them.
pub struct PostingEngine {
    accounts: Arc<dyn AccountStore>,
    journals: Arc<dyn JournalStore>,
    policy: PostingPolicy,
}

impl PostingEngine {
    pub fn new(accounts: Arc<dyn AccountStore>, journals: Arc<dyn JournalStore>, policy: PostingPolicy) -> Self {
        Self {
            accounts,
            journals,
            policy,
        }
    }

    /// Posts `lines` as one journal entry.
    ///
    /// Every check runs before the store is touched; the lines are then
    /// inserted as a single atomic unit.
    pub fn post(&self, lines: &[JournalLine]) -> Result<Vec<JournalId>, BookkeepingError> {
        let amount = check_balance(lines, self.policy.reject_zero_amount).map_err(|e| {
            tracing::warn!(error = %e, "Journal entry rejected");
            e
        })?;

        let chart = self.accounts.fetch_accounts(&AccountFilter::default())?;
        let mut matches: HashMap<AccountCode, usize> = HashMap::new();
        for account in &chart {
            *matches.entry(account.code).or_insert(0) += 1;
        }

        for line in lines {
            let count = matches.get(&line.code).copied().unwrap_or(0);
            if count != 1 {
                tracing::warn!(code = line.code, matches = count, "Journal entry references unknown account");
                return Err(BookkeepingError::UnknownAccount {
                    code: line.code,
                    side: line.side(),
                    amount: line.amount(),
                    description: line.description.to_string(),
                    matches: count,
                });
            }
        }

        let ids = self.journals.insert_journals(lines)?;
        tracing::debug!(lines = lines.len(), amount, "Journal entry posted");
        Ok(ids)
    }
}
