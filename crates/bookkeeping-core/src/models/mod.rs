use std::{fmt::Display, sync::Arc};

use serde::{Deserialize, Serialize};

pub mod write;
pub mod read;

pub type AccountCode = u32;

/// Non-negative amount in the smallest currency unit.
pub type Amount = u64;

/// Largest amount a line or a batch side may carry, so every balance fits in an `i64`.
pub const MAX_AMOUNT: Amount = i64::MAX as Amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Debit,
    Credit,
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Debit => f.write_str("debit"),
            Side::Credit => f.write_str("credit"),
        }
    }
}

/// An entry in the chart of accounts.
///
/// `is_debit_normal` decides which side increases the natural balance,
/// `is_balance_sheet` decides whether the account is reported on the
/// balance sheet (asset, liability, equity) or on the P&L (revenue, expense).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    pub code: AccountCode,
    pub name: Arc<str>,
    pub is_balance_sheet: bool,
    pub is_debit_normal: bool,
}

impl Account {
    pub fn new(code: AccountCode, name: &str, is_balance_sheet: bool, is_debit_normal: bool) -> Self {
        Self {
            code,
            name: Arc::from(name),
            is_balance_sheet,
            is_debit_normal,
        }
    }

    pub fn normal_side(&self) -> Side {
        if self.is_debit_normal { Side::Debit } else { Side::Credit }
    }

    /// Signed effect of a debit/credit pair on this account's natural balance.
    pub fn normal_balance(&self, debit: Amount, credit: Amount) -> i64 {
        // amounts past MAX_AMOUNT never pass posting; saturate rather than wrap if one is stored anyway
        let debit = i64::try_from(debit).unwrap_or(i64::MAX);
        let credit = i64::try_from(credit).unwrap_or(i64::MAX);
        match self.normal_side() {
            Side::Debit => debit.saturating_sub(credit),
            Side::Credit => credit.saturating_sub(debit),
        }
    }
}
