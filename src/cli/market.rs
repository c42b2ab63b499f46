use super::ui;
use crate::core::config::AppConfig;
use crate::core::{CurrencyRate, StockPrice};
use crate::providers::{self, exchange_rates::ExchangeRatesProvider, stockdata::StockDataProvider};
use anyhow::Result;
use comfy_table::Cell;

pub fn rates_table(rates: &[CurrencyRate]) -> String {
    if rates.is_empty() {
        return ui::unavailable("Currency rates");
    }
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Currency"), ui::header_cell("Rate")]);
    for rate in rates {
        table.add_row(vec![
            Cell::new(&rate.currency),
            ui::amount_cell(format!("{:.2}", rate.rate)),
        ]);
    }
    table.to_string()
}

pub fn stocks_table(prices: &[StockPrice]) -> String {
    if prices.is_empty() {
        return ui::unavailable("Stock prices");
    }
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Stock"), ui::header_cell("Price")]);
    for price in prices {
        table.add_row(vec![
            Cell::new(&price.symbol),
            ui::amount_cell(format!("{:.2}", price.price)),
        ]);
    }
    table.to_string()
}

pub async fn run_rates(config: &AppConfig) -> Result<()> {
    let settings = config.exchange_rates();
    let provider = ExchangeRatesProvider::new(&settings.base_url, &settings.api_key);

    let pb = ui::new_spinner("Fetching currency rates...");
    let rates = providers::currency_rates(&provider, &config.currencies).await;
    pb.finish_and_clear();

    println!("{}", rates_table(&rates));
    Ok(())
}

pub async fn run_stocks(config: &AppConfig) -> Result<()> {
    let settings = config.stockdata();
    let provider = StockDataProvider::new(&settings.base_url, &settings.api_token);

    let pb = ui::new_spinner("Fetching stock prices...");
    let prices = providers::stock_prices(&provider, &config.stocks).await;
    pb.finish_and_clear();

    println!("{}", stocks_table(&prices));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_results_render_as_unavailable() {
        assert!(rates_table(&[]).contains("Currency rates unavailable"));
        assert!(stocks_table(&[]).contains("Stock prices unavailable"));
    }

    #[test]
    fn test_tables_list_entries() {
        let rates = vec![CurrencyRate {
            currency: "EUR".to_string(),
            rate: 0.9,
        }];
        let table = rates_table(&rates);
        assert!(table.contains("EUR"));
        assert!(table.contains("0.90"));

        let prices = vec![StockPrice {
            symbol: "TSLA".to_string(),
            price: 201.5,
        }];
        let table = stocks_table(&prices);
        assert!(table.contains("TSLA"));
        assert!(table.contains("201.50"));
    }
}
