//! Debit/credit arithmetic shared by posting and reporting.

use bookkeeping_core::{Amount, JournalLine, JournalRecord, Side, MAX_AMOUNT};

use crate::error::BookkeepingError;

fn add_bounded(total: Amount, amount: Amount, side: Side) -> Result<Amount, BookkeepingError> {
    total.checked_add(amount)
        .filter(|t| *t <= MAX_AMOUNT)
        .ok_or(BookkeepingError::TotalOutOfRange { side })
}

/// Debit and credit totals of a batch of lines.
///
/// Every line amount and both totals must stay within [`MAX_AMOUNT`].
pub fn side_totals(lines: &[JournalLine]) -> Result<(Amount, Amount), BookkeepingError> {
    let (mut debit, mut credit) = (0, 0);
    for line in lines {
        if line.debit > MAX_AMOUNT || line.credit > MAX_AMOUNT {
            let (side, amount) = if line.debit > MAX_AMOUNT {
                (Side::Debit, line.debit)
            } else {
                (Side::Credit, line.credit)
            };
            return Err(BookkeepingError::AmountOutOfRange { code: line.code, side, amount });
        }
        debit = add_bounded(debit, line.debit, Side::Debit)?;
        credit = add_bounded(credit, line.credit, Side::Credit)?;
    }
    Ok((debit, credit))
}

/// Checks that a batch balances and returns the balanced amount.
///
/// With `reject_zero_amount` a batch whose debit or credit side sums to
/// zero is refused. An empty batch is refused either way.
pub fn check_balance(lines: &[JournalLine], reject_zero_amount: bool) -> Result<Amount, BookkeepingError> {
    let (debit, credit) = side_totals(lines)?;

    if lines.is_empty() || (reject_zero_amount && (debit == 0 || credit == 0)) {
        return Err(BookkeepingError::ZeroAmountEntry { debit, credit });
    }

    if debit != credit {
        return Err(BookkeepingError::UnbalancedEntry { debit, credit });
    }

    Ok(debit)
}

/// Sum of the records' effect on their accounts' natural balances.
pub fn sum_journal<'a>(records: impl IntoIterator<Item = &'a JournalRecord>) -> i64 {
    records.into_iter().fold(0i64, |sum, r| sum.saturating_add(r.balance()))
}
