//! General ledger, profit and loss statement and balance sheet derivation.
//!
//! Every figure is a sum of natural balances (see [`Account::normal_balance`])
//! over journal facts read through a [`JournalStore`]; statement lines are
//! selected by the ranges in [`crate::code_map`].

use std::{collections::BTreeMap, sync::Arc};

use bookkeeping_core::{Account, AccountCode, JournalFilter, JournalRecord, JournalStore};
use serde::Serialize;
use time::Date;

use crate::{
    balance::sum_journal,
    code_map::{Category, CategoryTotals, Statement, CODE_MAP_VERSION},
    error::BookkeepingError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    #[serde(flatten)]
    pub record: JournalRecord,
    pub running_balance: i64,
}

/// One account's page of the general ledger, in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerAccount {
    pub account: Account,
    pub entries: Vec<LedgerEntry>,
    pub balance: i64,
}

impl LedgerAccount {
    fn from_records(mut records: Vec<JournalRecord>) -> Option<Self> {
        let account = records.first()?.account.clone();

        // both sorts are stable: same-date lines keep their posting order
        records.sort_by_key(|r| r.id);
        records.sort_by_key(|r| r.date);

        let balance = sum_journal(&records);
        let mut running_balance = 0;
        let entries = records.into_iter()
            .map(|record| {
                running_balance = record.balance().saturating_add(running_balance);
                LedgerEntry { record, running_balance }
            })
            .collect();

        Some(Self { account, entries, balance })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneralLedger {
    pub accounts: BTreeMap<AccountCode, LedgerAccount>,
}

impl GeneralLedger {
    pub fn get(&self, code: AccountCode) -> Option<&LedgerAccount> {
        self.accounts.get(&code)
    }

    /// Balance of `code`, zero when nothing was posted to it.
    pub fn balance(&self, code: AccountCode) -> i64 {
        self.get(code).map_or(0, |a| a.balance)
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LedgerAccount> {
        self.accounts.values()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfitAndLoss {
    /// Version of the code map the figures were classified with.
    pub code_map_version: u32,
    pub start: Option<Date>,
    pub end: Option<Date>,
    pub net_sales: i64,
    pub cost_of_sales: i64,
    pub gross_profit: i64,
    pub operating_expenses: i64,
    pub operating_income: i64,
    pub non_operating_income: i64,
    pub non_operating_expenses: i64,
    pub extraordinary_income: i64,
    pub extraordinary_expenses: i64,
    pub income_before_tax: i64,
    pub income_taxes: i64,
    pub net_income: i64,
}

impl ProfitAndLoss {
    /// Derives the statement from totals that already respect the period.
    pub fn from_totals(start: Option<Date>, end: Option<Date>, totals: &CategoryTotals) -> Self {
        let net_sales = totals.get(Category::NetSales);
        let cost_of_sales = totals.get(Category::CostOfSales);
        let gross_profit = net_sales - cost_of_sales;

        let operating_expenses = totals.get(Category::OperatingExpenses);
        let operating_income = gross_profit - operating_expenses;

        let non_operating_income = totals.get(Category::NonOperatingIncome);
        let non_operating_expenses = totals.get(Category::NonOperatingExpenses);
        let extraordinary_income = totals.get(Category::ExtraordinaryIncome);
        let extraordinary_expenses = totals.get(Category::ExtraordinaryExpenses);

        let income_before_tax = operating_income
            + non_operating_income - non_operating_expenses
            + extraordinary_income - extraordinary_expenses;

        let income_taxes = totals.get(Category::IncomeTaxes);
        let net_income = income_before_tax - income_taxes;

        Self {
            code_map_version: CODE_MAP_VERSION,
            start,
            end,
            net_sales,
            cost_of_sales,
            gross_profit,
            operating_expenses,
            operating_income,
            non_operating_income,
            non_operating_expenses,
            extraordinary_income,
            extraordinary_expenses,
            income_before_tax,
            income_taxes,
            net_income,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSheet {
    pub code_map_version: u32,
    pub date: Date,
    pub total_current_assets: i64,
    pub total_noncurrent_assets: i64,
    pub total_assets: i64,
    pub total_current_liabilities: i64,
    pub total_noncurrent_liabilities: i64,
    pub total_liabilities: i64,
    pub owners_capital: i64,
    pub retained_earnings: i64,
    pub total_equity: i64,
    pub total_liabilities_and_equity: i64,
}

impl BalanceSheet {
    /// Derives the sheet from totals covering everything up to `date`,
    /// folding the period's net income into retained earnings.
    pub fn from_totals(date: Date, totals: &CategoryTotals, net_income: i64) -> Self {
        let total_current_assets = totals.get(Category::CurrentAssets);
        let total_noncurrent_assets = totals.get(Category::NoncurrentAssets);
        let total_current_liabilities = totals.get(Category::CurrentLiabilities);
        let total_noncurrent_liabilities = totals.get(Category::NoncurrentLiabilities);
        let total_liabilities = total_current_liabilities + total_noncurrent_liabilities;

        let owners_capital = totals.get(Category::OwnersCapital);
        let retained_earnings = totals.get(Category::RetainedEarnings) + net_income;
        let total_equity = owners_capital + retained_earnings;

        Self {
            code_map_version: CODE_MAP_VERSION,
            date,
            total_current_assets,
            total_noncurrent_assets,
            total_assets: total_current_assets + total_noncurrent_assets,
            total_current_liabilities,
            total_noncurrent_liabilities,
            total_liabilities,
            owners_capital,
            retained_earnings,
            total_equity,
            total_liabilities_and_equity: total_liabilities + total_equity,
        }
    }

    pub fn is_balanced(&self) -> bool {
        self.total_assets == self.total_liabilities_and_equity
    }
}

/// Read-only derivation of reports from posted journal lines.
pub struct ReportEngine {
    journals: Arc<dyn JournalStore>,
}

impl ReportEngine {
    pub fn new(journals: Arc<dyn JournalStore>) -> Self {
        Self { journals }
    }

    fn fetch(&self, filter: &JournalFilter) -> Result<Vec<JournalRecord>, BookkeepingError> {
        let records = self.journals.fetch_journals(filter)?;
        tracing::debug!(?filter, count = records.len(), "Journal lines fetched");
        Ok(records)
    }

    /// Lines grouped per account; `codes` restricts the accounts, empty means all.
    pub fn fetch_general_ledger(&self, codes: &[AccountCode]) -> Result<GeneralLedger, BookkeepingError> {
        let records = self.fetch(&JournalFilter::default().codes(codes))?;

        let mut grouped: BTreeMap<AccountCode, Vec<JournalRecord>> = BTreeMap::new();
        for record in records {
            grouped.entry(record.code).or_default().push(record);
        }

        let accounts = grouped.into_iter()
            .filter_map(|(code, records)| LedgerAccount::from_records(records).map(|a| (code, a)))
            .collect();

        Ok(GeneralLedger { accounts })
    }

    /// Profit and loss over `[start, end]`, both inclusive, either open when `None`.
    pub fn fetch_pl(&self, start: Option<Date>, end: Option<Date>) -> Result<ProfitAndLoss, BookkeepingError> {
        let filter = JournalFilter::default()
            .after(start)
            .before(end)
            .code_range(Statement::ProfitAndLoss.codes());
        let records = self.fetch(&filter)?;

        Ok(ProfitAndLoss::from_totals(start, end, &CategoryTotals::from_records(&records)))
    }

    /// Balance sheet as of `as_of` (inclusive), or of today over all lines when `None`.
    ///
    /// Retained earnings include net income to date, derived from the same
    /// lines the sheet is built from.
    pub fn fetch_bs(&self, as_of: Option<Date>) -> Result<BalanceSheet, BookkeepingError> {
        let date = as_of.unwrap_or_else(|| time::OffsetDateTime::now_utc().date());

        let records = self.fetch(&JournalFilter::default().before(as_of))?;
        let totals = CategoryTotals::from_records(&records);
        let pl = ProfitAndLoss::from_totals(None, as_of, &totals);

        let bs = BalanceSheet::from_totals(date, &totals, pl.net_income);
        if !bs.is_balanced() {
            tracing::warn!(
                total_assets = bs.total_assets,
                total_liabilities_and_equity = bs.total_liabilities_and_equity,
                "Balance sheet does not balance"
            );
        }
        Ok(bs)
    }
}
