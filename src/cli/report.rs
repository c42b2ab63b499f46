use super::ui;
use crate::core::config::AppConfig;
use crate::core::expenses::{self, ExpenseSummary};
use crate::core::period::{self, Period};
use crate::core::transaction;
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::Cell;
use serde::Serialize;
use tracing::{debug, info};

/// Options for the expense report command.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub date: Option<String>,
    pub period: String,
    pub transactions: Option<String>,
    pub json: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            date: None,
            period: Period::MonthToDate.to_string(),
            transactions: None,
            json: false,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExpenseReport {
    pub period: Period,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(flatten)]
    pub summary: ExpenseSummary,
}

/// Loads the transactions, selects the window and aggregates it.
pub fn build_report(config: &AppConfig, options: &ReportOptions) -> Result<ExpenseReport> {
    let reference = match &options.date {
        Some(date) => period::parse_date(date)?,
        None => chrono::Local::now().date_naive(),
    };
    let period: Period = options.period.parse()?;
    let (start, end) = period::window(reference, period)?;
    debug!(%start, %end, %period, "Selected reporting window");

    let path = options
        .transactions
        .as_deref()
        .or(config.transactions.as_deref())
        .ok_or_else(|| anyhow!("No transactions file given on the command line or in config"))?;
    let transactions = transaction::load_transactions(path)
        .with_context(|| format!("Failed to load transactions from {path}"))?;

    let in_window = transaction::filter_by_date(&transactions, start, end);
    info!(
        "{} of {} transactions fall within the window",
        in_window.len(),
        transactions.len()
    );

    Ok(ExpenseReport {
        period,
        start,
        end,
        summary: expenses::aggregate(&in_window),
    })
}

impl ExpenseReport {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![ui::header_cell("Category"), ui::header_cell("Amount")]);

        for entry in &self.summary.main {
            table.add_row(vec![
                Cell::new(&entry.category),
                ui::amount_cell(entry.amount.to_string()),
            ]);
        }
        table.add_row(vec![
            ui::subtle_cell(expenses::CASH_CATEGORY),
            ui::amount_cell(self.summary.fixed.cash.to_string()),
        ]);
        table.add_row(vec![
            ui::subtle_cell(expenses::TRANSFERS_CATEGORY),
            ui::amount_cell(self.summary.fixed.transfers.to_string()),
        ]);

        let start = if self.start == NaiveDate::MIN {
            "beginning".to_string()
        } else {
            self.start.to_string()
        };
        let mut output = format!(
            "Expenses: {}\n\n",
            ui::style_text(&format!("{start} .. {}", self.end), ui::StyleType::Title)
        );
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\n{}: {}",
            ui::style_text("Total", ui::StyleType::TotalLabel),
            ui::style_text(&self.summary.total.to_string(), ui::StyleType::TotalValue)
        ));
        output
    }
}

pub fn run(config: &AppConfig, options: &ReportOptions) -> Result<()> {
    let report = build_report(config, options)?;
    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.display_as_table());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const CSV: &str = "\
date,category,amount
2024-02-28,Food,-999
2024-03-01,Food,-100
2024-03-05,Food,-50
2024-03-10,Rent,-200
2024-03-12,Cash,-30
2024-03-14,Salary,5000
2024-03-16,Food,-999
";

    #[test]
    fn test_build_report_month_to_date() {
        let file = write_csv(CSV);
        let options = ReportOptions {
            date: Some("2024-03-15".to_string()),
            transactions: Some(file.path().to_str().unwrap().to_string()),
            ..ReportOptions::default()
        };

        let report = build_report(&AppConfig::default(), &options).unwrap();
        assert_eq!(report.start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(report.end, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(report.summary.total, dec!(380));
        assert_eq!(report.summary.fixed.cash, dec!(30));

        let table = report.display_as_table();
        assert!(table.contains("Rent"));
        assert!(table.contains("150"));
        assert!(table.contains("Transfers"));
    }

    #[test]
    fn test_transactions_path_from_config() {
        let file = write_csv(CSV);
        let config = AppConfig {
            transactions: Some(file.path().to_str().unwrap().to_string()),
            ..AppConfig::default()
        };
        let options = ReportOptions {
            date: Some("2024-03-20".to_string()),
            period: "ALL".to_string(),
            ..ReportOptions::default()
        };

        let report = build_report(&config, &options).unwrap();
        assert_eq!(report.start, NaiveDate::MIN);
        assert_eq!(report.summary.total, dec!(2378));
        assert!(report.display_as_table().contains("beginning"));
    }

    #[test]
    fn test_report_errors() {
        let options = ReportOptions {
            date: Some("2024-03-15".to_string()),
            ..ReportOptions::default()
        };
        let err = build_report(&AppConfig::default(), &options).unwrap_err();
        assert!(err.to_string().contains("No transactions file"));

        let file = write_csv(CSV);
        let options = ReportOptions {
            date: Some("2024-03-15".to_string()),
            period: "Q".to_string(),
            transactions: Some(file.path().to_str().unwrap().to_string()),
            json: false,
        };
        let err = build_report(&AppConfig::default(), &options).unwrap_err();
        assert!(err.to_string().contains("Invalid period"));
    }

    #[test]
    fn test_report_serializes_flat() {
        let file = write_csv(CSV);
        let options = ReportOptions {
            date: Some("2024-03-15".to_string()),
            transactions: Some(file.path().to_str().unwrap().to_string()),
            ..ReportOptions::default()
        };
        let report = build_report(&AppConfig::default(), &options).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["start"], "2024-03-01");
        assert_eq!(json["period"], "MonthToDate");
        assert_eq!(json["total"].as_f64(), Some(380.0));
        assert_eq!(json["main"].as_array().unwrap().len(), 3);
    }
}
