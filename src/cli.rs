use std::{io::Write, path::PathBuf, str::FromStr};

use anyhow::{bail, Context};
use bookkeeping_core::{AccountCode, Amount, JournalLine};
use clap::{Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;
use time::{Date, Month};

use crate::{bookkeeping::Bookkeeping, render::accounts_table};

#[derive(Parser, Debug)]
#[command(name = "bk", version, about = "Double-entry bookkeeping")]
pub struct CliArgs {
    /// Path to config file (default: ~/.bookkeeping/bk.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the database (overrides config file)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level (overrides config file)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Manage accounts
    Account {
        #[command(subcommand)]
        command: AccountCommand,
    },
    /// Post a journal entry
    Post {
        /// Journal post date, yyyymmdd (default: today)
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,

        /// Debit item, <account code>/<amount>[/<description>]
        #[arg(long, visible_alias = "left")]
        debit: Vec<LineArg>,

        /// Credit item, <account code>/<amount>[/<description>]
        #[arg(long, visible_alias = "right")]
        credit: Vec<LineArg>,
    },
    /// Show general ledger
    Gl {
        /// Account code, repeatable (default: all accounts)
        #[arg(long)]
        code: Vec<AccountCode>,
    },
    /// Show profit and loss statement
    Pl {
        /// First day of the period, yyyymmdd
        #[arg(long, value_parser = parse_date)]
        start: Option<Date>,

        /// Last day of the period, yyyymmdd
        #[arg(long, value_parser = parse_date)]
        end: Option<Date>,
    },
    /// Show balance sheet
    Bs {
        /// Balance sheet date, yyyymmdd (default: today)
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
    },
    /// Delete the database file
    Deletedb,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum AccountCommand {
    /// List accounts
    List {
        /// Code filter ('*' wildcard supported)
        #[arg(long, default_value = "")]
        code: String,

        /// Name filter ('*' wildcard supported)
        #[arg(long, default_value = "")]
        name: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgError {
    #[error("date '{0}' doesn't match the supported format 'yyyymmdd'")]
    Date(String),
    #[error("cannot parse '{0}' as journal item, format: <account code>/<amount>[/<description>]")]
    LineFormat(String),
    #[error("cannot parse '{0}' as account code")]
    Code(String),
    #[error("cannot parse '{0}' as amount")]
    Amount(String),
}

/// Parses a `yyyymmdd` date.
pub fn parse_date(s: &str) -> Result<Date, ArgError> {
    let err = || ArgError::Date(s.to_string());
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }

    let year: i32 = s[0..4].parse().map_err(|_| err())?;
    let month: u8 = s[4..6].parse().map_err(|_| err())?;
    let day: u8 = s[6..8].parse().map_err(|_| err())?;
    let month = Month::try_from(month).map_err(|_| err())?;
    Date::from_calendar_date(year, month, day).map_err(|_| err())
}

/// One `<account code>/<amount>[/<description>]` journal item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineArg {
    pub code: AccountCode,
    pub amount: Amount,
    pub description: String,
}

impl FromStr for LineArg {
    type Err = ArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cols: Vec<&str> = s.split('/').collect();
        if cols.len() < 2 || cols.len() > 3 {
            return Err(ArgError::LineFormat(s.to_string()));
        }

        let code = cols[0].parse().map_err(|_| ArgError::Code(cols[0].to_string()))?;
        let amount = cols[1].parse().map_err(|_| ArgError::Amount(cols[1].to_string()))?;
        let description = cols.get(2).map_or_else(String::new, |d| d.to_string());

        Ok(Self { code, amount, description })
    }
}

impl LineArg {
    fn debit(&self, date: Date) -> JournalLine {
        JournalLine::debit(self.code, self.amount).on(date).with_description(&self.description)
    }

    fn credit(&self, date: Date) -> JournalLine {
        JournalLine::credit(self.code, self.amount).on(date).with_description(&self.description)
    }
}

fn print_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Runs every command that works on an open book; `Deletedb` is handled by the caller.
pub fn execute<W: Write>(book: &Bookkeeping, command: &Command, json: bool, out: &mut W) -> anyhow::Result<()> {
    match command {
        Command::Account { command: AccountCommand::List { code, name } } => {
            let accounts = book.fetch_accounts(code, name)?;
            if json {
                print_json(out, &accounts)?;
            } else if accounts.is_empty() {
                writeln!(out, "no accounts found")?;
            } else {
                writeln!(out, "Accounts List")?;
                write!(out, "{}", accounts_table(&accounts))?;
            }
        }
        Command::Post { date, debit, credit } => {
            let date = date.unwrap_or_else(|| time::OffsetDateTime::now_utc().date());
            let lines: Vec<JournalLine> = debit.iter().map(|l| l.debit(date))
                .chain(credit.iter().map(|l| l.credit(date)))
                .collect();

            let ids = book.post(&lines).context("failed to post journal entry")?;
            if json {
                print_json(out, &ids)?;
            }
        }
        Command::Gl { code } => {
            let gl = book.fetch_general_ledger(code)?;
            if gl.is_empty() {
                bail!("no journal records found");
            }
            if json {
                print_json(out, &gl)?;
            } else {
                write!(out, "{}", gl)?;
            }
        }
        Command::Pl { start, end } => {
            let pl = book.fetch_pl(*start, *end)?;
            if json {
                print_json(out, &pl)?;
            } else {
                write!(out, "{}", pl)?;
            }
        }
        Command::Bs { date } => {
            let bs = book.fetch_bs(*date)?;
            if json {
                print_json(out, &bs)?;
            } else {
                write!(out, "{}", bs)?;
            }
        }
        Command::Deletedb => bail!("deletedb needs the storage configuration, not an open book"),
    }
    Ok(())
}
