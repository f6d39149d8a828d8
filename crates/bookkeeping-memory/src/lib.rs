//! In-memory storage backend for bookkeeping.

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        RwLock, RwLockReadGuard, RwLockWriteGuard,
    },
};

use bookkeeping_core::{
    Account, AccountCode, AccountFilter, AccountStore, JournalFilter, JournalId, JournalLine,
    JournalRecord, JournalStore, StorageError,
};

#[derive(Default)]
struct LedgerData {
    accounts: BTreeMap<AccountCode, Account>,
    journals: Vec<(JournalId, JournalLine)>,
}

pub struct InMemoryStorage {
    data: RwLock<LedgerData>,
    sequence_counter: AtomicI64,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(LedgerData::default()),
            sequence_counter: AtomicI64::new(1),
        }
    }

    fn next_sequence(&self) -> JournalId {
        self.sequence_counter.fetch_add(1, Ordering::SeqCst)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, LedgerData>, StorageError> {
        self.data.read().map_err(|_| StorageError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, LedgerData>, StorageError> {
        self.data.write().map_err(|_| StorageError::LockPoisoned)
    }
}

impl AccountStore for InMemoryStorage {
    fn insert_accounts(&self, accounts: &[Account]) -> Result<(), StorageError> {
        let mut data = self.write()?;

        let mut batch = BTreeMap::new();
        for account in accounts {
            if data.accounts.contains_key(&account.code) || batch.contains_key(&account.code) {
                return Err(StorageError::AccountAlreadyExists(account.code));
            }
            batch.insert(account.code, account.clone());
        }

        data.accounts.extend(batch);
        tracing::debug!(count = accounts.len(), "Accounts inserted");
        Ok(())
    }

    fn fetch_accounts(&self, filter: &AccountFilter) -> Result<Vec<Account>, StorageError> {
        let data = self.read()?;
        Ok(data.accounts.values()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect())
    }
}

impl JournalStore for InMemoryStorage {
    fn insert_journals(&self, lines: &[JournalLine]) -> Result<Vec<JournalId>, StorageError> {
        let mut data = self.write()?;

        // foreign key check up front so a failing batch leaves nothing behind
        if let Some(line) = lines.iter().find(|l| !data.accounts.contains_key(&l.code)) {
            return Err(StorageError::AccountNotFound(line.code));
        }

        let mut ids = Vec::with_capacity(lines.len());
        for line in lines {
            let id = self.next_sequence();
            data.journals.push((id, line.clone()));
            ids.push(id);
        }

        tracing::debug!(?ids, "Journal lines committed");
        Ok(ids)
    }

    fn fetch_journals(&self, filter: &JournalFilter) -> Result<Vec<JournalRecord>, StorageError> {
        let data = self.read()?;

        let mut result = Vec::new();
        for (id, line) in &data.journals {
            if !filter.matches(line.date, line.code) {
                continue;
            }
            // inner join: lines whose account is missing are not reported
            if let Some(account) = data.accounts.get(&line.code) {
                result.push(JournalRecord {
                    id: *id,
                    date: line.date,
                    code: line.code,
                    description: line.description.clone(),
                    debit: line.debit,
                    credit: line.credit,
                    account: account.clone(),
                });
            }
        }

        Ok(result)
    }
}
