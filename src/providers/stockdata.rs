use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::util::with_retry;
use crate::core::price::{StockPrice, StockPriceProvider, round_quote};

// Quotes from the stockdata.org `v1/data/quote` endpoint
pub struct StockDataProvider {
    base_url: String,
    api_token: String,
}

impl StockDataProvider {
    pub fn new(base_url: &str, api_token: &str) -> Self {
        StockDataProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    data: Vec<QuoteItem>,
}

#[derive(Debug, Deserialize)]
struct QuoteItem {
    price: f64,
}

#[async_trait]
impl StockPriceProvider for StockDataProvider {
    #[instrument(
        name = "StockDataPriceFetch",
        skip(self),
        fields(symbol = %symbol)
    )]
    async fn fetch_price(&self, symbol: &str) -> Result<StockPrice> {
        let url = Url::parse_with_params(
            &format!("{}/v1/data/quote", self.base_url),
            &[("symbols", symbol), ("api_token", self.api_token.as_str())],
        )?;
        debug!("Requesting quote for {}", symbol);

        let client = reqwest::Client::builder()
            .user_agent("fintally/0.1")
            .build()?;
        let response = with_retry(|| client.get(url.clone()).send(), 2, 500)
            .await
            .map_err(|e| anyhow!("Request error: {} for symbol: {}", e, symbol))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for symbol: {}",
                response.status(),
                symbol
            ));
        }

        let text = response.text().await?;
        let data: QuoteResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse quote response for {}: {}", symbol, e))?;

        let item = data
            .data
            .first()
            .ok_or_else(|| anyhow!("No price data found for symbol: {}", symbol))?;

        Ok(StockPrice {
            symbol: symbol.to_string(),
            price: round_quote(item.price),
        })
    }
}
