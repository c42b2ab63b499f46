//! Core business logic abstractions

pub mod config;
pub mod currency;
pub mod error;
pub mod expenses;
pub mod log;
pub mod period;
pub mod price;
pub mod transaction;

// Re-export main types for cleaner imports
pub use currency::{CurrencyRate, CurrencyRateProvider};
pub use error::{FinanceError, FinanceResult};
pub use expenses::{CategoryTotal, ExpenseSummary, FixedCategories, aggregate};
pub use period::{Period, window, window_from_str};
pub use price::{StockPrice, StockPriceProvider};
pub use transaction::Transaction;
