use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::MergedRecord;
use crate::services::dataset_service::DateSelector;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/prices", get(get_prices))
        .route("/dates", get(get_dates))
        .route("/currencies", get(get_currencies))
}

#[derive(Debug, Deserialize)]
pub struct PricesQuery {
    date: Option<String>,
}

pub async fn get_prices(
    Query(params): Query<PricesQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<MergedRecord>>, AppError> {
    info!("GET /api/prices - date={:?}", params.date);

    let merged = match params.date.as_deref() {
        Some(date) => {
            let selector = DateSelector::parse(date);
            let slice = state.prices.filter(&selector);
            if slice.is_empty() {
                warn!("No prices for date {}", selector);
                return Err(AppError::DateNotFound(selector.to_string()));
            }
            state.currencies.join(&slice)
        }
        None => state.currencies.join(state.prices.records()),
    };

    Ok(Json(merged))
}

pub async fn get_dates(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.prices.date_labels().to_vec())
}

pub async fn get_currencies(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.config.base_currencies.clone())
}
