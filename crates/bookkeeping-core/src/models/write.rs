use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::Date;

use super::{AccountCode, Amount, Side};

/// One debit-or-credit line of a journal entry, as submitted for posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    pub date: Option<Date>,
    pub code: AccountCode,
    pub description: Arc<str>,
    pub debit: Amount,
    pub credit: Amount,
}

impl JournalLine {
    pub fn debit(code: AccountCode, amount: Amount) -> Self {
        Self {
            date: None,
            code,
            description: Arc::from(""),
            debit: amount,
            credit: 0,
        }
    }

    pub fn credit(code: AccountCode, amount: Amount) -> Self {
        Self {
            date: None,
            code,
            description: Arc::from(""),
            debit: 0,
            credit: amount,
        }
    }

    pub fn on(mut self, date: Date) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Arc::from(description);
        self
    }

    /// The side this line is booked on. A line carrying a credit amount counts as a credit.
    pub fn side(&self) -> Side {
        if self.credit > 0 { Side::Credit } else { Side::Debit }
    }

    pub fn amount(&self) -> Amount {
        self.debit.saturating_add(self.credit)
    }
}
