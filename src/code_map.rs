//! Account code ranges and the statement lines they feed.
//!
//! The table is a business rule, not configuration. Changing a range
//! changes every historical report, so any edit bumps `CODE_MAP_VERSION`.

use std::{collections::BTreeMap, ops::RangeInclusive};

use bookkeeping_core::{AccountCode, JournalRecord};
use serde::Serialize;

pub const CODE_MAP_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Statement {
    BalanceSheet,
    ProfitAndLoss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    CurrentAssets,
    NoncurrentAssets,
    CurrentLiabilities,
    NoncurrentLiabilities,
    OwnersCapital,
    RetainedEarnings,
    NetSales,
    CostOfSales,
    OperatingExpenses,
    NonOperatingIncome,
    NonOperatingExpenses,
    ExtraordinaryIncome,
    ExtraordinaryExpenses,
    IncomeTaxes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRange {
    pub category: Category,
    pub statement: Statement,
    pub codes: RangeInclusive<AccountCode>,
}

const fn range(category: Category, statement: Statement, from: AccountCode, to: AccountCode) -> CodeRange {
    CodeRange {
        category,
        statement,
        codes: RangeInclusive::new(from, to),
    }
}

pub static CODE_MAP: [CodeRange; 14] = [
    range(Category::CurrentAssets, Statement::BalanceSheet, 1100, 1199),
    range(Category::NoncurrentAssets, Statement::BalanceSheet, 1200, 1299),
    range(Category::CurrentLiabilities, Statement::BalanceSheet, 2100, 2199),
    range(Category::NoncurrentLiabilities, Statement::BalanceSheet, 2200, 2299),
    range(Category::OwnersCapital, Statement::BalanceSheet, 3100, 3199),
    range(Category::RetainedEarnings, Statement::BalanceSheet, 3200, 3299),
    range(Category::NetSales, Statement::ProfitAndLoss, 4000, 4999),
    range(Category::CostOfSales, Statement::ProfitAndLoss, 5000, 6999),
    range(Category::OperatingExpenses, Statement::ProfitAndLoss, 7000, 7999),
    range(Category::NonOperatingIncome, Statement::ProfitAndLoss, 8100, 8199),
    range(Category::NonOperatingExpenses, Statement::ProfitAndLoss, 8200, 8299),
    range(Category::ExtraordinaryIncome, Statement::ProfitAndLoss, 8300, 8399),
    range(Category::ExtraordinaryExpenses, Statement::ProfitAndLoss, 8400, 8499),
    range(Category::IncomeTaxes, Statement::ProfitAndLoss, 9000, 9999),
];

impl Statement {
    /// Smallest code range covering every category of this statement.
    pub fn codes(self) -> RangeInclusive<AccountCode> {
        let ranges = CODE_MAP.iter().filter(|r| r.statement == self);
        let from = ranges.clone().map(|r| *r.codes.start()).min().unwrap_or(1);
        let to = ranges.map(|r| *r.codes.end()).max().unwrap_or(0);
        from..=to
    }
}

/// Category of an account code, if it feeds any statement line.
pub fn classify(code: AccountCode) -> Option<Category> {
    CODE_MAP.iter()
        .find(|r| r.codes.contains(&code))
        .map(|r| r.category)
}

/// Per-category sums of natural balances.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTotals(BTreeMap<Category, i64>);

impl CategoryTotals {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a JournalRecord>) -> Self {
        let mut totals = BTreeMap::new();
        for record in records {
            if let Some(category) = classify(record.code) {
                let total = totals.entry(category).or_insert(0i64);
                *total = total.saturating_add(record.balance());
            }
        }
        Self(totals)
    }

    pub fn get(&self, category: Category) -> i64 {
        self.0.get(&category).copied().unwrap_or(0)
    }
}
