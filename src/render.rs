//! Plain-text tables for accounts and reports.

use std::fmt::Display;

use bookkeeping_core::Account;
use prettytable::{format, row, Table};
use time::Date;

use crate::report::{BalanceSheet, GeneralLedger, LedgerAccount, ProfitAndLoss};

fn format_date(date: Option<Date>) -> String {
    match date {
        Some(d) => format!("{:04}/{:02}/{:02}", d.year(), d.month() as u8, d.day()),
        None => String::new(),
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table
}

pub fn accounts_table(accounts: &[Account]) -> Table {
    let mut table = new_table();
    table.set_titles(row!["Code", "Name", "BS/PL", "Debit/Credit"]);

    for account in accounts {
        let statement = if account.is_balance_sheet { "BS" } else { "PL" };
        table.add_row(row![account.code, account.name, statement, account.normal_side()]);
    }
    table
}

fn ledger_table(account: &LedgerAccount) -> Table {
    let mut table = new_table();
    table.set_titles(row!["Date", "Description", r->"Debit", r->"Credit", r->"Balance"]);

    for entry in &account.entries {
        let record = &entry.record;
        table.add_row(row![
            format_date(record.date),
            record.description,
            r->record.debit,
            r->record.credit,
            r->entry.running_balance
        ]);
    }
    table.add_empty_row();
    table.add_row(row!["", "Balance", "", "", r->account.balance]);
    table
}

impl Display for GeneralLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "General Ledger:")?;
        for account in self.iter() {
            writeln!(f)?;
            writeln!(f, "Account code {}: '{}'", account.account.code, account.account.name)?;
            write!(f, "{}", ledger_table(account))?;
        }
        Ok(())
    }
}

fn period(start: Option<Date>, end: Option<Date>) -> String {
    match (start, end) {
        (None, None) => "all periods".to_string(),
        (start, end) => format!("{} - {}", format_date(start), format_date(end)),
    }
}

impl Display for ProfitAndLoss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut table = new_table();
        table.set_titles(row!["Description", r->"Amount"]);
        table.add_row(row!["Net Sales", r->self.net_sales]);
        table.add_row(row!["Cost of Sales", r->self.cost_of_sales]);
        table.add_row(row!["Gross Profit", r->self.gross_profit]);
        table.add_row(row!["Operating Expenses", r->self.operating_expenses]);
        table.add_row(row!["Operating Income", r->self.operating_income]);
        table.add_row(row!["Non-operating Income", r->self.non_operating_income]);
        table.add_row(row!["Non-operating Expenses", r->self.non_operating_expenses]);
        table.add_row(row!["Extraordinary Income", r->self.extraordinary_income]);
        table.add_row(row!["Extraordinary Expenses", r->self.extraordinary_expenses]);
        table.add_row(row!["Income Before Income Taxes", r->self.income_before_tax]);
        table.add_row(row!["Income Taxes", r->self.income_taxes]);
        table.add_empty_row();
        table.add_row(row!["Net Income", r->self.net_income]);

        writeln!(f, "Profit and Loss Statement ({}):", period(self.start, self.end))?;
        writeln!(f)?;
        write!(f, "{}", table)
    }
}

impl Display for BalanceSheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut table = new_table();
        table.set_titles(row!["Description", r->"Amount"]);

        table.add_row(row!["Assets", ""]);
        table.add_row(row!["  Current Assets", r->self.total_current_assets]);
        table.add_row(row!["  Noncurrent Assets", r->self.total_noncurrent_assets]);
        table.add_row(row!["Total Assets", r->self.total_assets]);
        table.add_empty_row();

        table.add_row(row!["Liabilities", ""]);
        table.add_row(row!["  Current Liabilities", r->self.total_current_liabilities]);
        table.add_row(row!["  Noncurrent Liabilities", r->self.total_noncurrent_liabilities]);
        table.add_row(row!["Total Liabilities", r->self.total_liabilities]);
        table.add_empty_row();

        table.add_row(row!["Equity", ""]);
        table.add_row(row!["  Owner's Capital", r->self.owners_capital]);
        table.add_row(row!["  Retained Earnings", r->self.retained_earnings]);
        table.add_row(row!["Total Equity", r->self.total_equity]);
        table.add_empty_row();

        table.add_row(row!["Total Liabilities and Equity", r->self.total_liabilities_and_equity]);

        writeln!(f, "Balance Sheet as of {}:", format_date(Some(self.date)))?;
        writeln!(f)?;
        write!(f, "{}", table)
    }
}
