pub mod exchange_rates;
pub mod stockdata;
pub mod util;

use crate::core::{CurrencyRate, CurrencyRateProvider, StockPrice, StockPriceProvider};
use util::fetch_or_empty;

/// Latest rates for `currencies`, or an empty list when the provider fails.
pub async fn currency_rates(
    provider: &(dyn CurrencyRateProvider + Send + Sync),
    currencies: &[String],
) -> Vec<CurrencyRate> {
    fetch_or_empty("currency rates", provider.latest_rates(currencies)).await
}

/// Prices for every symbol, or an empty list if any single quote fails.
///
/// Symbols are requested one after another.
pub async fn stock_prices(
    provider: &(dyn StockPriceProvider + Send + Sync),
    symbols: &[String],
) -> Vec<StockPrice> {
    fetch_or_empty("stock prices", async {
        let mut prices = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            prices.push(provider.fetch_price(symbol).await?);
        }
        Ok::<_, anyhow::Error>(prices)
    })
    .await
}
