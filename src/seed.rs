//! Default chart of accounts installed into an empty store.

use bookkeeping_core::{Account, AccountCode, AccountFilter, AccountStore, StorageError};

/// `(code, name, is_balance_sheet, is_debit_normal)`
const DEFAULT_CHART: &[(AccountCode, &str, bool, bool)] = &[
    (1110, "Cash", true, true),
    (1120, "Accounts Receivable", true, true),
    (1130, "Inventory", true, true),
    (1140, "Prepaid Expenses", true, true),
    (1211, "Equipment", true, true),
    (1212, "Buildings", true, true),
    (2100, "Accounts Payable", true, false),
    (2101, "Short-term Borrowings", true, false),
    (2102, "Income Taxes Payable", true, false),
    (2103, "Withholdings", true, false),
    (2200, "Long-term Borrowings", true, false),
    (3100, "Owners Capital", true, false),
    (3200, "Retained Earnings", true, false),
    (4100, "Sales", false, false),
    (5100, "Opening Inventory", false, true),
    (5200, "Purchases", false, true),
    (5300, "Closing Inventory", false, true),
    (7100, "Rent", false, true),
    (7200, "Salaries", false, true),
    (7300, "Office Expenses", false, true),
    (8100, "Interest Income", false, false),
    (8200, "Interest Expense", false, true),
    (8300, "Gain on Sale of Assets", false, false),
    (8400, "Loss on Disposal of Assets", false, true),
    (9000, "Income Taxes", false, true),
];

pub fn default_chart() -> Vec<Account> {
    DEFAULT_CHART.iter()
        .map(|&(code, name, is_balance_sheet, is_debit_normal)| Account::new(code, name, is_balance_sheet, is_debit_normal))
        .collect()
}

/// Installs the default chart when the store holds no accounts.
/// Returns the number of accounts inserted.
pub fn seed_default_chart(store: &dyn AccountStore) -> Result<usize, StorageError> {
    if !store.fetch_accounts(&AccountFilter::default())?.is_empty() {
        return Ok(0);
    }

    let chart = default_chart();
    store.insert_accounts(&chart)?;
    tracing::info!(accounts = chart.len(), "Default chart of accounts installed");
    Ok(chart.len())
}
