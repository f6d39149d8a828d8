pub mod balance;
pub mod bookkeeping;
pub mod cli;
pub mod code_map;
pub mod config;
pub mod error;
pub mod logging;
pub mod posting;
pub mod registry;
pub mod render;
pub mod report;
pub mod seed;
pub mod storage;

pub use bookkeeping::Bookkeeping;
pub use bookkeeping_core::{Account, AccountCode, Amount, JournalId, JournalLine, JournalRecord, Side};
pub use error::BookkeepingError;
pub use posting::PostingPolicy;
pub use report::{BalanceSheet, GeneralLedger, ProfitAndLoss};
