use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::models::ValuationResponse;
use crate::services::dataset_service::DateSelector;
use crate::services::valuation_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/valuation", get(get_valuation))
}

#[derive(Debug, Default, Deserialize)]
pub struct ValuationQuery {
    pub base: Option<String>,
    pub date: Option<String>,
}

/// Applies defaults (first configured currency, latest date) and checks the base
/// currency against the configured set.
pub fn resolve_selection(state: &AppState, params: &ValuationQuery) -> Result<(String, DateSelector), AppError> {
    let base = params
        .base
        .as_deref()
        .map(|b| b.trim().to_ascii_uppercase())
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| state.config.default_base_currency().to_string());

    if !state.config.is_base_currency(&base) {
        return Err(format!(
            "Unsupported base currency {}; expected one of {}",
            base,
            state.config.base_currencies.join(", ")
        )
        .into());
    }

    let selector = match params.date.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(date) => DateSelector::parse(date),
        None => {
            let latest = state
                .prices
                .latest_label()
                .ok_or_else(|| AppError::DateNotFound("latest".to_string()))?;
            DateSelector::Label(latest.to_string())
        }
    };

    Ok((base, selector))
}

pub fn run_valuation(state: &AppState, params: &ValuationQuery) -> Result<ValuationResponse, AppError> {
    let (base, selector) = resolve_selection(state, params)?;
    valuation_service::analyze(&state.prices, &state.currencies, &selector, &base).map_err(|e| {
        match &e {
            AppError::Validation(_) | AppError::DateNotFound(_) => warn!("Valuation rejected: {}", e),
            _ => error!("Failed to value {} for {}: {}", base, selector, e),
        }
        e
    })
}

pub async fn get_valuation(
    Query(params): Query<ValuationQuery>,
    State(state): State<AppState>,
) -> Result<Json<ValuationResponse>, AppError> {
    info!("GET /api/valuation - base={:?} date={:?}", params.base, params.date);
    run_valuation(&state, &params).map(Json)
}
