//! Currency exchange rate abstractions

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRate {
    pub currency: String,
    pub rate: f64,
}

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    /// Latest rates for `currencies` against the provider's base currency.
    /// Currencies the provider has no rate for are left out.
    async fn latest_rates(&self, currencies: &[String]) -> Result<Vec<CurrencyRate>>;
}
