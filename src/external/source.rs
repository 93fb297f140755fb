use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("io error reading {path}: {message}")]
    Io { path: String, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("missing column: {0}")]
    MissingColumn(String),

    #[error("no <table> element found")]
    NoTable,
}

/// Reads a data source that is either an http(s) URL or a local file path.
pub async fn fetch_text(client: &reqwest::Client, location: &str) -> Result<String, SourceError> {
    match Url::parse(location) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
            let resp = client
                .get(url)
                .send()
                .await
                .map_err(|e| SourceError::Network(e.to_string()))?;

            if !resp.status().is_success() {
                return Err(SourceError::BadResponse(format!(
                    "{} returned HTTP {}",
                    location,
                    resp.status()
                )));
            }

            resp.text()
                .await
                .map_err(|e| SourceError::Network(e.to_string()))
        }
        _ => tokio::fs::read_to_string(location)
            .await
            .map_err(|e| SourceError::Io {
                path: location.to_string(),
                message: e.to_string(),
            }),
    }
}
