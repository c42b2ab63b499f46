use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use super::util::with_retry;
use crate::core::currency::{CurrencyRate, CurrencyRateProvider};
use crate::core::price::round_quote;

// Exchange rates from the apilayer `exchangerates_data` API
pub struct ExchangeRatesProvider {
    base_url: String,
    api_key: String,
}

impl ExchangeRatesProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        ExchangeRatesProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    #[serde(default)]
    success: bool,
    base: Option<String>,
    rates: Option<HashMap<String, f64>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    info: Option<String>,
}

fn select_rates(
    base: &str,
    rates: &HashMap<String, f64>,
    currencies: &[String],
) -> Vec<CurrencyRate> {
    currencies
        .iter()
        .filter_map(|currency| {
            let rate = if currency == base {
                1.0
            } else {
                match rates.get(currency) {
                    Some(rate) if *rate != 0.0 => *rate,
                    _ => {
                        debug!("No rate for {currency} against {base}, skipping");
                        return None;
                    }
                }
            };
            Some(CurrencyRate {
                currency: currency.clone(),
                rate: round_quote(rate),
            })
        })
        .collect()
}

#[async_trait]
impl CurrencyRateProvider for ExchangeRatesProvider {
    #[instrument(name = "ExchangeRatesFetch", skip(self))]
    async fn latest_rates(&self, currencies: &[String]) -> Result<Vec<CurrencyRate>> {
        let url = format!("{}/exchangerates_data/latest", self.base_url);
        debug!("Requesting exchange rates from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("fintally/0.1")
            .build()?;
        let response = with_retry(
            || client.get(&url).header("apikey", &self.api_key).send(),
            2,
            500,
        )
        .await
        .map_err(|e| anyhow!("Request error: {} for exchange rates URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for exchange rates",
                response.status()
            ));
        }

        let text = response.text().await?;
        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse exchange rates response: {}", e))?;

        if !data.success {
            let info = data
                .error
                .and_then(|e| e.info)
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(anyhow!("Exchange rates API error: {}", info));
        }

        let base = data
            .base
            .ok_or_else(|| anyhow!("Exchange rates response is missing 'base'"))?;
        let rates = data
            .rates
            .ok_or_else(|| anyhow!("Exchange rates response is missing 'rates'"))?;

        Ok(select_rates(&base, &rates, currencies))
    }
}
