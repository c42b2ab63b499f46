//! Error types for the expense core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinanceError {
    /// A caller supplied a value outside the accepted set (period code, date)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A transaction record is missing a field or carries an unparsable one
    #[error("Invalid transaction data: {0}")]
    DataValidity(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FinanceResult<T> = Result<T, FinanceError>;
