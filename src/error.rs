use bookkeeping_core::{AccountCode, Amount, Side, StorageError, MAX_AMOUNT};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookkeepingError {
    #[error("credit and debit are not balancing, debit: {debit}, credit: {credit}")]
    UnbalancedEntry { debit: Amount, credit: Amount },
    #[error("credit or debit is zero-amount, debit: {debit}, credit: {credit}")]
    ZeroAmountEntry { debit: Amount, credit: Amount },
    #[error("code '{code}' is not available (in journal {side} record '{code}/{amount}{}'), {matches} accounts matched", describe(.description))]
    UnknownAccount {
        code: AccountCode,
        side: Side,
        amount: Amount,
        description: String,
        matches: usize,
    },
    #[error("amount {amount} in journal {side} record for code '{code}' exceeds the maximum of {}", MAX_AMOUNT)]
    AmountOutOfRange {
        code: AccountCode,
        side: Side,
        amount: Amount,
    },
    #[error("{side} total exceeds the maximum of {}", MAX_AMOUNT)]
    TotalOutOfRange { side: Side },
    #[error("invalid code filter '{0}': may contain numbers or '*' for wildcard")]
    InvalidFilter(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

fn describe(description: &str) -> String {
    if description.is_empty() {
        String::new()
    } else {
        format!("/{}", description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_account_message_carries_the_line() {
        let err = BookkeepingError::UnknownAccount {
            code: 9999,
            side: Side::Debit,
            amount: 100,
            description: "rent".to_string(),
            matches: 0,
        };
        assert_eq!(
            err.to_string(),
            "code '9999' is not available (in journal debit record '9999/100/rent'), 0 accounts matched"
        );
    }

    #[test]
    fn out_of_range_messages_name_the_limit() {
        let err = BookkeepingError::TotalOutOfRange { side: Side::Debit };
        assert_eq!(err.to_string(), format!("debit total exceeds the maximum of {}", i64::MAX));
    }

    #[test]
    fn unbalanced_message_carries_totals() {
        let err = BookkeepingError::UnbalancedEntry { debit: 100, credit: 99 };
        assert_eq!(err.to_string(), "credit and debit are not balancing, debit: 100, credit: 99");
    }
}
