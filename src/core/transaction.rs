//! Transaction records and the CSV source that produces them
//!
//! Rows are validated when they are read: a [`Transaction`] always has a
//! date, a non-empty category and an amount.

use crate::core::error::{FinanceError, FinanceResult};
use crate::core::period::{DATE_FORMAT, parse_date};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Largest accepted magnitude for a single amount (10^15 units).
///
/// Keeps sums over any realistic number of rows well inside `Decimal`'s range.
pub const MAX_ABS_AMOUNT: Decimal = Decimal::from_parts(2764472320, 232830, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub category: String,
    /// Negative for expenses, positive for income or credits
    pub amount: Decimal,
}

impl Transaction {
    pub fn new(date: NaiveDate, category: &str, amount: Decimal) -> FinanceResult<Self> {
        let category = category.trim();
        if category.is_empty() {
            return Err(FinanceError::DataValidity(format!(
                "missing category for transaction on {}",
                date.format(DATE_FORMAT)
            )));
        }
        if amount.abs() > MAX_ABS_AMOUNT {
            return Err(FinanceError::DataValidity(format!(
                "amount {amount} on {} exceeds the limit of {MAX_ABS_AMOUNT}",
                date.format(DATE_FORMAT)
            )));
        }
        Ok(Self {
            date,
            category: category.to_string(),
            amount,
        })
    }

    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: Option<String>,
    category: Option<String>,
    amount: Option<String>,
}

fn required<'a>(value: &'a Option<String>, field: &str, row: usize) -> FinanceResult<&'a str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| FinanceError::DataValidity(format!("row {row}: missing {field}")))
}

impl CsvRow {
    fn into_transaction(self, row: usize) -> FinanceResult<Transaction> {
        let date = required(&self.date, "date", row)?;
        let date = parse_date(date)
            .map_err(|_| FinanceError::DataValidity(format!("row {row}: invalid date '{date}'")))?;

        let category = required(&self.category, "category", row)?;

        let amount = required(&self.amount, "amount", row)?;
        let amount = Decimal::from_str(amount).map_err(|e| {
            FinanceError::DataValidity(format!("row {row}: invalid amount '{amount}': {e}"))
        })?;

        Transaction::new(date, category, amount).map_err(|e| match e {
            FinanceError::DataValidity(msg) => {
                FinanceError::DataValidity(format!("row {row}: {msg}"))
            }
            other => other,
        })
    }
}

/// Reads transactions from CSV with a `date,category,amount` header.
///
/// Extra columns are ignored. The first malformed row aborts the read with
/// [`FinanceError::DataValidity`]; rows are numbered from 1, header excluded.
pub fn read_transactions<R: Read>(reader: R) -> FinanceResult<Vec<Transaction>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut transactions = Vec::new();
    for (index, record) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let row = index + 1;
        let record = record.map_err(|e| FinanceError::DataValidity(format!("row {row}: {e}")))?;
        transactions.push(record.into_transaction(row)?);
    }

    debug!("Read {} transactions", transactions.len());
    Ok(transactions)
}

pub fn load_transactions<P: AsRef<Path>>(path: P) -> FinanceResult<Vec<Transaction>> {
    debug!("Loading transactions from {}", path.as_ref().display());
    let file = File::open(path.as_ref())?;
    read_transactions(file)
}

/// Keeps transactions dated within `[start, end]`, both ends inclusive.
pub fn filter_by_date(
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| t.date >= start && t.date <= end)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_read_valid_csv() {
        let csv = "\
date,category,amount,description
2024-03-01,Food,-100.50,groceries
2024-03-02, Rent ,-200,
2024-03-03,Salary,1500.00,march
";
        let transactions = read_transactions(csv.as_bytes()).unwrap();
        assert_eq!(transactions.len(), 3);
        assert_eq!(transactions[0].date, date("2024-03-01"));
        assert_eq!(transactions[0].category, "Food");
        assert_eq!(transactions[0].amount, dec!(-100.50));
        assert_eq!(transactions[1].category, "Rent");
        assert!(transactions[1].is_expense());
        assert!(!transactions[2].is_expense());
    }

    #[test]
    fn test_missing_category_is_reported() {
        let csv = "date,category,amount\n2024-03-01,Food,-10\n2024-03-02,,-20\n";
        let err = read_transactions(csv.as_bytes()).unwrap_err();
        match err {
            FinanceError::DataValidity(msg) => {
                assert_eq!(msg, "row 2: missing category");
            }
            other => panic!("Expected DataValidity, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_amount_is_reported() {
        let csv = "date,category,amount\n2024-03-01,Food\n";
        let err = read_transactions(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, FinanceError::DataValidity(ref msg) if msg.contains("missing amount")));
    }

    #[test]
    fn test_oversized_amount_is_reported() {
        let csv = "date,category,amount\n\
                   2024-03-01,A,-1\n\
                   2024-03-02,B,-79228162514264337593543950335\n";
        match read_transactions(csv.as_bytes()).unwrap_err() {
            FinanceError::DataValidity(msg) => {
                assert!(msg.starts_with("row 2: amount"));
                assert!(msg.contains("exceeds the limit"));
            }
            other => panic!("Expected DataValidity, got {other:?}"),
        }

        let at_limit = format!("date,category,amount\n2024-03-01,A,-{MAX_ABS_AMOUNT}\n");
        let transactions = read_transactions(at_limit.as_bytes()).unwrap();
        assert_eq!(transactions[0].amount, -MAX_ABS_AMOUNT);
    }

    #[test]
    fn test_max_amounts_aggregate_without_overflow() {
        let rows: String = (0..1000)
            .map(|i| format!("2024-03-01,C{},-{MAX_ABS_AMOUNT}\n", i % 10))
            .collect();
        let csv = format!("date,category,amount\n{rows}");
        let transactions = read_transactions(csv.as_bytes()).unwrap();
        let summary = crate::core::expenses::aggregate(&transactions);
        assert_eq!(summary.total, MAX_ABS_AMOUNT * Decimal::from(1000));
    }

    #[test]
    fn test_unparsable_fields_are_reported() {
        let csv = "date,category,amount\n2024-03-01,Food,ten\n";
        let err = read_transactions(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, FinanceError::DataValidity(ref msg) if msg.contains("invalid amount")));

        let csv = "date,category,amount\n03/01/2024,Food,-10\n";
        let err = read_transactions(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, FinanceError::DataValidity(ref msg) if msg.contains("invalid date")));
    }

    #[test]
    fn test_new_rejects_blank_category() {
        let result = Transaction::new(date("2024-03-01"), "   ", dec!(-5));
        assert!(matches!(result, Err(FinanceError::DataValidity(_))));
    }

    #[test]
    fn test_filter_by_date_is_inclusive() {
        let transactions = vec![
            Transaction::new(date("2024-02-29"), "Food", dec!(-1)).unwrap(),
            Transaction::new(date("2024-03-01"), "Food", dec!(-2)).unwrap(),
            Transaction::new(date("2024-03-15"), "Food", dec!(-3)).unwrap(),
            Transaction::new(date("2024-03-16"), "Food", dec!(-4)).unwrap(),
        ];
        let filtered = filter_by_date(&transactions, date("2024-03-01"), date("2024-03-15"));
        let amounts: Vec<Decimal> = filtered.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![dec!(-2), dec!(-3)]);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_transactions("/nonexistent/transactions.csv");
        assert!(matches!(result, Err(FinanceError::Io(_))));
    }
}
