mod app;
mod config;
mod errors;
mod external;
mod logging;
mod models;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::external::big_mac_csv::load_prices;
use crate::external::currency_codes::fetch_currency_codes;
use crate::logging::init_logging;
use crate::services::dataset_service::{CurrencyReference, PriceTable};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    // Initialize logging FIRST
    init_logging(&config.logging)?;
    config.validate()?;
    let addr = config.socket_addr()?;

    let client = reqwest::Client::new();

    let prices = PriceTable::new(
        load_prices(&client, &config.csv_url)
            .await
            .with_context(|| format!("Failed to load Big Mac prices from {}", config.csv_url))?,
    );
    if prices.date_labels().is_empty() {
        warn!("Big Mac dataset at {} contains no rows", config.csv_url);
    } else {
        info!(
            "Dataset covers {} survey dates ({} to {})",
            prices.date_labels().len(),
            prices.date_labels()[0],
            prices.latest_label().unwrap_or_default()
        );
    }

    let currencies = match &config.currency_codes_url {
        Some(url) => CurrencyReference::new(
            fetch_currency_codes(&client, url)
                .await
                .with_context(|| format!("Failed to fetch currency codes from {}", url))?,
        ),
        None => {
            info!("CURRENCY_CODES_URL is empty, currency names will not be shown");
            CurrencyReference::default()
        }
    };

    if config.currency_codes_url.is_some() && currencies.is_empty() {
        warn!("Currency code table was empty, currency names will not be shown");
    } else {
        info!("Currency reference holds {} rows", currencies.len());
    }
    info!("Base currencies: {}", config.base_currencies.join(", "));

    let state = AppState {
        config: Arc::new(config),
        prices: Arc::new(prices),
        currencies: Arc::new(currencies),
    };
    let app = app::create_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("🍔 Big Mac Index explorer running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
