//! Reporting periods and the date windows they cover

use crate::core::error::{FinanceError, FinanceResult};
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    Week,
    MonthToDate,
    YearToDate,
    AllTime,
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Period::Week => "W",
                Period::MonthToDate => "M",
                Period::YearToDate => "Y",
                Period::AllTime => "ALL",
            }
        )
    }
}

impl FromStr for Period {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "W" | "WEEK" => Ok(Period::Week),
            "M" | "MONTH" => Ok(Period::MonthToDate),
            "Y" | "YEAR" => Ok(Period::YearToDate),
            "ALL" => Ok(Period::AllTime),
            _ => Err(FinanceError::InvalidArgument(format!(
                "Invalid period: {s}. Expected one of W, M, Y, ALL"
            ))),
        }
    }
}

/// Returns the inclusive `(start, end)` window for `period` around `reference`.
///
/// A week always spans Monday to Sunday, so its end can fall after the
/// reference date. The other periods end on the reference date.
pub fn window(reference: NaiveDate, period: Period) -> FinanceResult<(NaiveDate, NaiveDate)> {
    let out_of_range =
        || FinanceError::InvalidArgument(format!("Date out of range for {period}: {reference}"));

    match period {
        Period::Week => {
            let offset = u64::from(reference.weekday().num_days_from_monday());
            let start = reference
                .checked_sub_days(Days::new(offset))
                .ok_or_else(out_of_range)?;
            let end = start
                .checked_add_days(Days::new(6))
                .ok_or_else(out_of_range)?;
            Ok((start, end))
        }
        Period::MonthToDate => {
            let start = reference.with_day(1).ok_or_else(out_of_range)?;
            Ok((start, reference))
        }
        Period::YearToDate => {
            let start = NaiveDate::from_ymd_opt(reference.year(), 1, 1).ok_or_else(out_of_range)?;
            Ok((start, reference))
        }
        Period::AllTime => Ok((NaiveDate::MIN, reference)),
    }
}

/// String form of [`window`]: parses a `YYYY-MM-DD` date and a period code.
pub fn window_from_str(reference: &str, period: &str) -> FinanceResult<(NaiveDate, NaiveDate)> {
    let date = parse_date(reference)?;
    let period = period.parse::<Period>()?;
    window(date, period)
}

pub fn parse_date(value: &str) -> FinanceResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| FinanceError::InvalidArgument(format!("Invalid date '{value}': {e}")))
}
