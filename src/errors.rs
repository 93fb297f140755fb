use axum::http::StatusCode;
use axum::response::IntoResponse;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Currency {currency} not found in dataset for {date}")]
    CurrencyNotFound { currency: String, date: String },
    #[error("Currency {currency} has {count} rows for {date}")]
    AmbiguousCurrency { currency: String, date: String, count: usize },
    #[error("No prices found for date {0}")]
    DateNotFound(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::CurrencyNotFound { .. } | AppError::DateNotFound(_) => StatusCode::NOT_FOUND,
            AppError::AmbiguousCurrency { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

impl From<String> for AppError {
    fn from(value: String) -> Self {
        AppError::Validation(value)
    }
}
