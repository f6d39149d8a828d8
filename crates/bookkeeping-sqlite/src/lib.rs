//! SQLite storage backend for bookkeeping.

use std::{
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use bookkeeping_core::{
    Account, AccountFilter, AccountStore, Amount, JournalFilter, JournalId, JournalLine,
    JournalRecord, JournalStore, StorageError,
};
use rusqlite::{params, params_from_iter, types::Value, Connection, ErrorCode};
use time::{Date, Month};

pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Opens (creating if needed) the database at `path`. `":memory:"` opens a private in-memory database.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let conn = if path == Path::new(":memory:") {
            Connection::open_in_memory()
        } else {
            Connection::open(path)
        }
        .map_err(sql_error)?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .map_err(sql_error)?;

        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.init_schema()?;
        tracing::debug!(path = %path.display(), "SQLite storage opened");
        Ok(storage)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }

    fn init_schema(&self) -> Result<(), StorageError> {
        let conn = self.conn()?;
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS accounts (
                code INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                is_balance_sheet INTEGER NOT NULL,
                is_debit_normal INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS journals (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT,
                code INTEGER NOT NULL,
                description TEXT NOT NULL,
                debit INTEGER NOT NULL,
                credit INTEGER NOT NULL,
                FOREIGN KEY (code) REFERENCES accounts(code)
            );

            CREATE INDEX IF NOT EXISTS idx_journals_code_date
                ON journals(code, date);
            ",
        )
        .map_err(sql_error)?;
        Ok(())
    }
}

fn sql_error(e: rusqlite::Error) -> StorageError {
    StorageError::Other(e.to_string())
}

fn is_constraint_violation(e: &rusqlite::Error) -> bool {
    matches!(e, rusqlite::Error::SqliteFailure(f, _) if f.code == ErrorCode::ConstraintViolation)
}

fn date_to_str(d: Date) -> String {
    format!("{:04}-{:02}-{:02}", d.year(), d.month() as u8, d.day())
}

/// Dates are stored as `YYYY-MM-DD` text, which only sorts and parses back for years 0..=9999.
fn date_to_sql(d: Date) -> Result<String, StorageError> {
    if (0..=9999).contains(&d.year()) {
        Ok(date_to_str(d))
    } else {
        Err(StorageError::DateOutOfRange(d))
    }
}

fn str_to_date(s: &str) -> Result<Date, StorageError> {
    let invalid = || StorageError::Other(format!("invalid date in journal: {}", s));

    let mut parts = s.splitn(3, '-');
    let mut next = || parts.next().ok_or_else(invalid);
    let year = next()?.parse::<i32>().map_err(|_| invalid())?;
    let month = next()?.parse::<u8>().map_err(|_| invalid())?;
    let day = next()?.parse::<u8>().map_err(|_| invalid())?;

    let month = Month::try_from(month).map_err(|_| invalid())?;
    Date::from_calendar_date(year, month, day).map_err(|_| invalid())
}

fn amount_to_sql(amount: Amount) -> Result<i64, StorageError> {
    i64::try_from(amount).map_err(|_| StorageError::Other(format!("amount out of range: {}", amount)))
}

fn amount_from_sql(value: i64) -> Result<Amount, StorageError> {
    Amount::try_from(value).map_err(|_| StorageError::Other(format!("negative amount in journal: {}", value)))
}

/// `*` maps onto GLOB's own wildcard; GLOB's other metacharacters are escaped.
fn to_glob(pattern: &str) -> String {
    let mut glob = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        match c {
            '?' => glob.push_str("[?]"),
            '[' => glob.push_str("[[]"),
            _ => glob.push(c),
        }
    }
    glob
}

impl AccountStore for SqliteStorage {
    fn insert_accounts(&self, accounts: &[Account]) -> Result<(), StorageError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(sql_error)?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO accounts (code, name, is_balance_sheet, is_debit_normal) VALUES (?1, ?2, ?3, ?4)",
            ).map_err(sql_error)?;

            for account in accounts {
                stmt.execute(params![
                    account.code,
                    account.name.as_ref(),
                    account.is_balance_sheet,
                    account.is_debit_normal
                ])
                .map_err(|e| if is_constraint_violation(&e) {
                    StorageError::AccountAlreadyExists(account.code)
                } else {
                    sql_error(e)
                })?;
            }
        }
        tx.commit().map_err(sql_error)?;
        tracing::debug!(count = accounts.len(), "Accounts inserted");
        Ok(())
    }

    fn fetch_accounts(&self, filter: &AccountFilter) -> Result<Vec<Account>, StorageError> {
        let conn = self.conn()?;

        let mut conditions = Vec::new();
        let mut args = Vec::new();
        if !filter.code_pattern.is_empty() {
            conditions.push("CAST(code AS TEXT) GLOB ?");
            args.push(Value::Text(to_glob(&filter.code_pattern)));
        }
        if !filter.name_pattern.is_empty() {
            conditions.push("name GLOB ?");
            args.push(Value::Text(format!("*{}*", to_glob(&filter.name_pattern))));
        }

        let mut query = String::from("SELECT code, name, is_balance_sheet, is_debit_normal FROM accounts");
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY code");

        let mut stmt = conn.prepare(&query).map_err(sql_error)?;
        let rows = stmt
            .query_map(params_from_iter(args.iter()), |row| {
                let name: String = row.get(1)?;
                Ok(Account {
                    code: row.get(0)?,
                    name: Arc::from(name.as_str()),
                    is_balance_sheet: row.get(2)?,
                    is_debit_normal: row.get(3)?,
                })
            })
            .map_err(sql_error)?;

        rows.collect::<Result<Vec<_>, _>>().map_err(sql_error)
    }
}

impl JournalStore for SqliteStorage {
    fn insert_journals(&self, lines: &[JournalLine]) -> Result<Vec<JournalId>, StorageError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(sql_error)?;
        let mut ids = Vec::with_capacity(lines.len());
        {
            let mut stmt = tx.prepare(
                "INSERT INTO journals (date, code, description, debit, credit) VALUES (?1, ?2, ?3, ?4, ?5)",
            ).map_err(sql_error)?;

            for line in lines {
                stmt.execute(params![
                    line.date.map(date_to_sql).transpose()?,
                    line.code,
                    line.description.as_ref(),
                    amount_to_sql(line.debit)?,
                    amount_to_sql(line.credit)?
                ])
                .map_err(|e| if is_constraint_violation(&e) {
                    StorageError::AccountNotFound(line.code)
                } else {
                    sql_error(e)
                })?;
                ids.push(tx.last_insert_rowid());
            }
        }
        // dropping an uncommitted transaction rolls it back, so early returns above leave nothing behind
        tx.commit().map_err(sql_error)?;
        tracing::debug!(?ids, "Journal lines committed");
        Ok(ids)
    }

    fn fetch_journals(&self, filter: &JournalFilter) -> Result<Vec<JournalRecord>, StorageError> {
        use std::ops::Bound;

        let conn = self.conn()?;

        let mut conditions: Vec<String> = Vec::new();
        let mut args: Vec<Value> = Vec::new();

        match filter.from {
            Bound::Included(d) => {
                conditions.push("jn.date >= ?".to_string());
                args.push(Value::Text(date_to_sql(d)?));
            }
            Bound::Excluded(d) => {
                conditions.push("jn.date > ?".to_string());
                args.push(Value::Text(date_to_sql(d)?));
            }
            Bound::Unbounded => {}
        }
        match filter.to {
            Bound::Included(d) => {
                conditions.push("jn.date <= ?".to_string());
                args.push(Value::Text(date_to_sql(d)?));
            }
            Bound::Excluded(d) => {
                conditions.push("jn.date < ?".to_string());
                args.push(Value::Text(date_to_sql(d)?));
            }
            Bound::Unbounded => {}
        }
        if !filter.codes.is_empty() {
            let placeholders = vec!["?"; filter.codes.len()].join(", ");
            conditions.push(format!("jn.code IN ({})", placeholders));
            args.extend(filter.codes.iter().map(|c| Value::Integer(i64::from(*c))));
        }
        if let Some(range) = &filter.code_range {
            conditions.push("jn.code BETWEEN ? AND ?".to_string());
            args.push(Value::Integer(i64::from(*range.start())));
            args.push(Value::Integer(i64::from(*range.end())));
        }

        let mut query = String::from(
            "SELECT jn.id, jn.date, jn.code, jn.description, jn.debit, jn.credit,
                    a.name, a.is_balance_sheet, a.is_debit_normal
             FROM journals AS jn
             INNER JOIN accounts AS a ON a.code = jn.code",
        );
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY jn.id");

        let mut stmt = conn.prepare(&query).map_err(sql_error)?;

        type Row = (JournalId, Option<String>, u32, String, i64, i64, String, bool, bool);
        let rows: Vec<Row> = stmt
            .query_map(params_from_iter(args.iter()), |row| {
                Ok((
                    row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?,
                    row.get(5)?, row.get(6)?, row.get(7)?, row.get(8)?,
                ))
            })
            .map_err(sql_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(sql_error)?;

        let mut result = Vec::with_capacity(rows.len());
        for (id, date, code, description, debit, credit, name, is_balance_sheet, is_debit_normal) in rows {
            result.push(JournalRecord {
                id,
                date: date.as_deref().map(str_to_date).transpose()?,
                code,
                description: Arc::from(description.as_str()),
                debit: amount_from_sql(debit)?,
                credit: amount_from_sql(credit)?,
                account: Account {
                    code,
                    name: Arc::from(name.as_str()),
                    is_balance_sheet,
                    is_debit_normal,
                },
            });
        }

        Ok(result)
    }
}
