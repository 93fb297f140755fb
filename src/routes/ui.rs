use std::fmt::Write;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tracing::info;

use crate::errors::AppError;
use crate::routes::valuation::{resolve_selection, run_valuation, ValuationQuery};
use crate::services::chart_service::{escape, render_bar_chart};
use crate::state::AppState;

const INTRO: &str = "The Big Mac Index was invented in 1986 by The Economist as a lighthearted guide \
to whether currencies are at their \"correct\" level. It is based on the theory of purchasing-power \
parity (PPP), the notion that in the long run exchange rates should move towards the rate that would \
equalise the prices of an identical basket of goods and services (in this case, a burger) in any two \
countries.";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/chart.svg", get(chart_svg))
}

async fn index(Query(params): Query<ValuationQuery>, State(state): State<AppState>) -> (StatusCode, Html<String>) {
    info!("GET / - base={:?} date={:?}", params.base, params.date);

    let (status, content) = match run_valuation(&state, &params) {
        Ok(valuation) => (StatusCode::OK, render_bar_chart(&valuation)),
        Err(e) => (e.status_code(), format!(r#"<p class="error">{}</p>"#, escape(&e.to_string()))),
    };

    // Keep the controls on whatever the user asked for, falling back to defaults.
    let latest = state.prices.latest_label().unwrap_or_default().to_string();
    let (selected_base, selected_date) = match resolve_selection(&state, &params) {
        Ok((base, selector)) => {
            let label = selector.label();
            if state.prices.date_labels().contains(&label) {
                (base, label)
            } else {
                (base, latest)
            }
        }
        Err(_) => (state.config.default_base_currency().to_string(), latest),
    };

    (status, Html(render_page(&state, &selected_base, &selected_date, &content)))
}

async fn chart_svg(Query(params): Query<ValuationQuery>, State(state): State<AppState>) -> Result<Response, AppError> {
    info!("GET /chart.svg - base={:?} date={:?}", params.base, params.date);
    let valuation = run_valuation(&state, &params)?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], render_bar_chart(&valuation)).into_response())
}

fn render_page(state: &AppState, selected_base: &str, selected_date: &str, content: &str) -> String {
    let mut base_options = String::new();
    for code in &state.config.base_currencies {
        push_option(&mut base_options, code, code == selected_base);
    }

    let mut date_options = String::new();
    for label in state.prices.date_labels() {
        push_option(&mut date_options, label, label == selected_date);
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Visualizing The Big Mac Index</title>
<style>
body {{ font-family: sans-serif; max-width: 1000px; margin: 2rem auto; padding: 0 1rem; color: #222; }}
form {{ display: flex; gap: 2rem; margin: 1.5rem 0; }}
label {{ display: flex; flex-direction: column; font-weight: bold; gap: 0.3rem; }}
.error {{ color: #b2182b; }}
</style>
</head>
<body>
<h1>Visualizing The Big Mac Index</h1>
<p>{intro}</p>
<form method="get" action="/">
<label>Base Currency<select name="base" onchange="this.form.submit()">{base_options}</select></label>
<label>Select Date<select name="date" onchange="this.form.submit()">{date_options}</select></label>
<noscript><button type="submit">Show</button></noscript>
</form>
<div id="chart">{content}</div>
</body>
</html>
"#,
        intro = escape(INTRO),
        base_options = base_options,
        date_options = date_options,
        content = content
    )
}

fn push_option(out: &mut String, value: &str, selected: bool) {
    let value = escape(value);
    let _ = write!(
        out,
        r#"<option value="{v}"{s}>{v}</option>"#,
        v = value,
        s = if selected { " selected" } else { "" }
    );
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::app::create_app;

    async fn get(uri: &str) -> (StatusCode, Option<String>, String) {
        let app = create_app(AppState::fixture());
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_index_defaults_to_latest_date() {
        let (status, _, body) = get("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<option value="USD" selected>USD</option>"#));
        assert!(body.contains(r#"<option value="Jul 2023" selected>Jul 2023</option>"#));
        assert!(body.contains(r#"<option value="Apr 2000">Apr 2000</option>"#));
        assert!(body.contains("<svg"));
        assert_eq!(body.matches(r#"class="bar""#).count(), 4);
    }

    #[tokio::test]
    async fn test_index_keeps_selection() {
        let (status, _, body) = get("/?base=GBP&date=Apr+2000").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<option value="GBP" selected>GBP</option>"#));
        assert!(body.contains(r#"<option value="Apr 2000" selected>Apr 2000</option>"#));
        assert_eq!(body.matches(r#"class="bar""#).count(), 2);
    }

    #[tokio::test]
    async fn test_index_shows_error_instead_of_chart() {
        let (status, _, body) = get("/?base=CAD").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains(r#"class="error""#));
        assert!(!body.contains("<svg"));
    }

    #[tokio::test]
    async fn test_index_unknown_date_selects_latest_label() {
        let (status, _, body) = get("/?base=GBP&date=Jan+1990").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains(r#"<option value="GBP" selected>GBP</option>"#));
        assert!(body.contains(r#"<option value="Jul 2023" selected>Jul 2023</option>"#));
        assert_eq!(body.matches(" selected>").count(), 2);
    }

    #[tokio::test]
    async fn test_chart_svg_endpoint() {
        let (status, content_type, body) = get("/chart.svg?base=USD&date=2023-07-01").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("image/svg+xml"));
        assert!(body.starts_with("<svg"));
    }
}
