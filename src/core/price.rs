//! Stock quote abstractions

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPrice {
    pub symbol: String,
    pub price: f64,
}

#[async_trait]
pub trait StockPriceProvider: Send + Sync {
    async fn fetch_price(&self, symbol: &str) -> Result<StockPrice>;
}

/// Rounds a quoted value to cents.
pub fn round_quote(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
