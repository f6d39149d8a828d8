use std::sync::Arc;

use bookkeeping::{
    seed::seed_default_chart,
    storage::{InMemoryStorage, SqliteStorage},
    Bookkeeping, BookkeepingError, JournalLine, PostingPolicy,
};
use time::{Date, Month};

fn may(day: u8) -> Date {
    Date::from_calendar_date(2020, Month::May, day).unwrap()
}

fn memory_book() -> Bookkeeping {
    let storage = Arc::new(InMemoryStorage::new());
    seed_default_chart(storage.as_ref()).unwrap();
    Bookkeeping::with_storage(storage, PostingPolicy::default())
}

fn sqlite_book() -> Bookkeeping {
    let storage = Arc::new(SqliteStorage::new(":memory:").unwrap());
    seed_default_chart(storage.as_ref()).unwrap();
    Bookkeeping::with_storage(storage, PostingPolicy::default())
}

fn entry(date: Date, debits: &[(u32, u64)], credits: &[(u32, u64)]) -> Vec<JournalLine> {
    debits.iter().map(|&(code, amount)| JournalLine::debit(code, amount).on(date))
        .chain(credits.iter().map(|&(code, amount)| JournalLine::credit(code, amount).on(date)))
        .collect()
}

/// A month of trading for a small shop.
fn post_may_2020(book: &Bookkeeping) {
    let entries = [
        entry(may(1), &[(1110, 500000)], &[(3100, 500000)]),
        entry(may(2), &[(1110, 1000000)], &[(2200, 1000000)]),
        entry(may(3), &[(7300, 50000)], &[(1110, 50000)]),
        entry(may(3), &[(1211, 500000)], &[(1110, 500000)]),
        entry(may(5), &[(5200, 100000)], &[(1110, 100000)]),
        entry(may(7), &[(1110, 200000)], &[(4100, 200000)]),
        entry(may(10), &[(1110, 1000000)], &[(2101, 1000000)]),
        entry(may(11), &[(5200, 2000000)], &[(2100, 2000000)]),
        entry(may(12), &[(1120, 4000000)], &[(4100, 4000000)]),
        entry(may(15), &[(2100, 2000000)], &[(1110, 2000000)]),
        entry(may(16), &[(1110, 3000000)], &[(1120, 3000000)]),
        entry(may(20), &[(7200, 300000)], &[(1110, 290000), (2103, 10000)]),
        entry(may(21), &[(2101, 1000000), (8200, 100000)], &[(1110, 1100000)]),
        entry(may(22), &[(7300, 200000)], &[(1110, 200000)]),
        entry(may(31), &[(1130, 100000)], &[(5300, 100000)]),
        entry(may(31), &[(7300, 100000)], &[(1211, 100000)]),
        entry(may(31), &[(9000, 450000)], &[(2102, 450000)]),
    ];
    for lines in &entries {
        book.post(lines).unwrap();
    }
}

macro_rules! backend_tests {
    ($backend:ident, $book:expr) => {
        paste::paste! {
            #[test]
            fn [<$backend _general_ledger_balances>]() {
                let book = $book;
                post_may_2020(&book);

                let gl = book.fetch_general_ledger(&[]).unwrap();
                assert_eq!(gl.balance(1110), 1460000);
                assert_eq!(gl.balance(3100), 500000);
                assert_eq!(gl.balance(2101), 0);
                assert_eq!(gl.balance(1211), 400000);

                let cash = gl.get(1110).unwrap();
                assert_eq!(cash.entries.len(), 12);
                assert_eq!(cash.entries.last().unwrap().running_balance, 1460000);
                assert!(cash.entries.windows(2).all(|w| w[0].record.date <= w[1].record.date));
            }

            #[test]
            fn [<$backend _single_entry_ledger>]() {
                let book = $book;
                book.post(&entry(may(1), &[(1110, 500000)], &[(3100, 500000)])).unwrap();

                let gl = book.fetch_general_ledger(&[]).unwrap();
                assert_eq!(gl.len(), 2);
                assert_eq!(gl.balance(1110), 500000);
                assert_eq!(gl.balance(3100), 500000);
            }

            #[test]
            fn [<$backend _general_ledger_by_code>]() {
                let book = $book;
                post_may_2020(&book);

                let gl = book.fetch_general_ledger(&[3100, 4100]).unwrap();
                assert_eq!(gl.len(), 2);
                assert_eq!(gl.balance(4100), 4200000);
                assert!(gl.get(1110).is_none());
            }

            #[test]
            fn [<$backend _profit_and_loss>]() {
                let book = $book;
                post_may_2020(&book);

                let pl = book.fetch_pl(Some(may(1)), Some(may(31))).unwrap();
                assert_eq!(pl.net_sales, 4200000);
                assert_eq!(pl.cost_of_sales, 2000000);
                assert_eq!(pl.gross_profit, 2200000);
                assert_eq!(pl.operating_expenses, 650000);
                assert_eq!(pl.operating_income, 1550000);
                assert_eq!(pl.non_operating_expenses, 100000);
                assert_eq!(pl.income_before_tax, 1450000);
                assert_eq!(pl.income_taxes, 450000);
                assert_eq!(pl.net_income, 1000000);

                assert_eq!(book.fetch_pl(None, None).unwrap(), pl_without_period(&pl));
            }

            #[test]
            fn [<$backend _profit_and_loss_period_is_inclusive>]() {
                let book = $book;
                post_may_2020(&book);

                let pl = book.fetch_pl(Some(may(7)), Some(may(7))).unwrap();
                assert_eq!(pl.net_sales, 200000);
                assert_eq!(pl.net_income, 200000);

                let pl = book.fetch_pl(Some(may(8)), Some(may(11))).unwrap();
                assert_eq!(pl.net_sales, 0);
                assert_eq!(pl.cost_of_sales, 2000000);
            }

            #[test]
            fn [<$backend _balance_sheet>]() {
                let book = $book;
                post_may_2020(&book);

                let bs = book.fetch_bs(Some(may(31))).unwrap();
                assert_eq!(bs.total_assets, 2960000);
                assert_eq!(bs.total_liabilities, 1460000);
                assert_eq!(bs.total_equity, 1500000);
                assert_eq!(bs.retained_earnings, 1000000);
                assert_eq!(bs.total_liabilities_and_equity, 2960000);
                assert!(bs.is_balanced());
            }

            #[test]
            fn [<$backend _balance_sheet_ignores_later_lines>]() {
                let book = $book;
                post_may_2020(&book);

                let bs = book.fetch_bs(Some(may(2))).unwrap();
                assert_eq!(bs.total_assets, 1500000);
                assert_eq!(bs.total_noncurrent_liabilities, 1000000);
                assert_eq!(bs.owners_capital, 500000);
                assert_eq!(bs.retained_earnings, 0);

                // every prefix of the month balances
                for day in 1..=31 {
                    assert!(book.fetch_bs(Some(may(day))).unwrap().is_balanced(), "unbalanced on May {}", day);
                }
            }

            #[test]
            fn [<$backend _reports_are_idempotent>]() {
                let book = $book;
                post_may_2020(&book);

                assert_eq!(book.fetch_bs(Some(may(31))).unwrap(), book.fetch_bs(Some(may(31))).unwrap());
                assert_eq!(
                    book.fetch_pl(Some(may(1)), Some(may(31))).unwrap(),
                    book.fetch_pl(Some(may(1)), Some(may(31))).unwrap()
                );
                assert_eq!(book.fetch_general_ledger(&[]).unwrap(), book.fetch_general_ledger(&[]).unwrap());
            }

            #[test]
            fn [<$backend _rejected_entries_leave_no_trace>]() {
                let book = $book;
                post_may_2020(&book);
                let before = book.fetch_general_ledger(&[]).unwrap();

                let unbalanced = entry(may(31), &[(1110, 100)], &[(3100, 99)]);
                assert!(matches!(book.post(&unbalanced), Err(BookkeepingError::UnbalancedEntry { .. })));

                let unknown = entry(may(31), &[(1110, 100)], &[(3999, 100)]);
                assert!(matches!(book.post(&unknown), Err(BookkeepingError::UnknownAccount { code: 3999, .. })));

                let zero = entry(may(31), &[(1110, 0)], &[(3100, 0)]);
                assert!(matches!(book.post(&zero), Err(BookkeepingError::ZeroAmountEntry { .. })));

                assert_eq!(book.fetch_general_ledger(&[]).unwrap(), before);
            }

            #[test]
            fn [<$backend _overflowing_entry_leaves_ledger_unchanged>]() {
                let book = $book;
                post_may_2020(&book);
                let before = book.fetch_general_ledger(&[]).unwrap();
                let max = i64::MAX as u64;

                let wrapping = entry(may(31), &[(1110, max), (1110, max), (1110, 3)], &[(3100, 1)]);
                assert!(matches!(book.post(&wrapping), Err(BookkeepingError::TotalOutOfRange { .. })));

                let oversized = entry(may(31), &[(1110, u64::MAX)], &[(3100, u64::MAX)]);
                assert!(matches!(book.post(&oversized), Err(BookkeepingError::AmountOutOfRange { code: 1110, .. })));

                assert_eq!(book.fetch_general_ledger(&[]).unwrap(), before);
                assert!(book.fetch_bs(Some(may(31))).unwrap().is_balanced());
            }

            #[test]
            fn [<$backend _account_filters>]() {
                let book = $book;

                let codes: Vec<_> = book.fetch_accounts("21*", "").unwrap().iter().map(|a| a.code).collect();
                assert_eq!(codes, vec![2100, 2101, 2102, 2103]);
                assert_eq!(book.fetch_accounts("*0", "Sales").unwrap().len(), 1);
                assert!(book.fetch_accounts("", "No Such Account").unwrap().is_empty());
                assert!(matches!(book.fetch_accounts("2x", ""), Err(BookkeepingError::InvalidFilter(_))));
            }
        }
    };
}

fn pl_without_period(pl: &bookkeeping::ProfitAndLoss) -> bookkeeping::ProfitAndLoss {
    bookkeeping::ProfitAndLoss {
        start: None,
        end: None,
        ..pl.clone()
    }
}

backend_tests!(memory, memory_book());
backend_tests!(sqlite, sqlite_book());
