use std::fmt::Write;

use crate::models::ValuationResponse;

const WIDTH: f64 = 960.0;
const HEIGHT: f64 = 480.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 80.0;

const OVERVALUED_FILL: &str = "#d6604d";
const UNDERVALUED_FILL: &str = "#4393c3";

/// Escapes text for use inside HTML/SVG content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the valuation as an SVG bar chart: currency code on x, in row order,
/// percentage over/under-valued on y.
pub fn render_bar_chart(valuation: &ValuationResponse) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="100%" role="img" font-family="sans-serif" font-size="11">"#,
        w = WIDTH,
        h = HEIGHT
    );

    if valuation.rows.is_empty() {
        let _ = write!(
            svg,
            r#"<text x="{}" y="{}" text-anchor="middle">No data</text></svg>"#,
            WIDTH / 2.0,
            HEIGHT / 2.0
        );
        return svg;
    }

    let values: Vec<f64> = valuation
        .rows
        .iter()
        .map(|r| r.pct_over_under_valued)
        .filter(|v| v.is_finite())
        .collect();

    let y_min = values.iter().copied().fold(0.0_f64, f64::min);
    let y_max = values.iter().copied().fold(0.0_f64, f64::max);
    let span = if y_max > y_min { y_max - y_min } else { 1.0 };

    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let y_of = |v: f64| MARGIN_TOP + (y_max - v) / span * plot_h;
    let zero_y = y_of(0.0);

    let band = plot_w / valuation.rows.len() as f64;
    let bar_w = band * 0.8;

    for tick in ticks(y_min, y_max) {
        let y = y_of(tick);
        let _ = write!(
            svg,
            r##"<line x1="{x1}" x2="{x2}" y1="{y:.2}" y2="{y:.2}" stroke="#e0e0e0"/><text x="{tx}" y="{ty:.2}" text-anchor="end">{tick}</text>"##,
            x1 = MARGIN_LEFT,
            x2 = WIDTH - MARGIN_RIGHT,
            y = y,
            tx = MARGIN_LEFT - 6.0,
            ty = y + 4.0,
            tick = tick
        );
    }

    for (i, row) in valuation.rows.iter().enumerate() {
        let x = MARGIN_LEFT + band * i as f64 + (band - bar_w) / 2.0;
        let label_x = x + bar_w / 2.0;
        let code = escape(&row.currency_code);

        if row.pct_over_under_valued.is_finite() {
            let top = y_of(row.pct_over_under_valued.max(0.0));
            let bottom = y_of(row.pct_over_under_valued.min(0.0));
            let fill = if row.pct_over_under_valued >= 0.0 { OVERVALUED_FILL } else { UNDERVALUED_FILL };
            let name = row.currency_name.as_deref().map(escape).unwrap_or_default();
            let _ = write!(
                svg,
                r#"<rect class="bar" data-code="{code}" x="{x:.2}" y="{top:.2}" width="{bw:.2}" height="{bh:.2}" fill="{fill}"><title>{code} {name}: {pct:.2}%</title></rect>"#,
                code = code,
                x = x,
                top = top,
                bw = bar_w,
                bh = (bottom - top).max(0.0),
                fill = fill,
                name = name,
                pct = row.pct_over_under_valued
            );
        }

        let _ = write!(
            svg,
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="end" transform="rotate(-90 {x:.2} {y:.2})">{code}</text>"#,
            x = label_x + 4.0,
            y = HEIGHT - MARGIN_BOTTOM + 8.0,
            code = code
        );
    }

    let _ = write!(
        svg,
        r##"<line x1="{x1}" x2="{x2}" y1="{y:.2}" y2="{y:.2}" stroke="#333"/>"##,
        x1 = MARGIN_LEFT,
        x2 = WIDTH - MARGIN_RIGHT,
        y = zero_y
    );
    let _ = write!(
        svg,
        r#"<text x="{cx}" y="{by}" text-anchor="middle" font-size="13">Currency Code</text>"#,
        cx = MARGIN_LEFT + plot_w / 2.0,
        by = HEIGHT - 8.0
    );
    let _ = write!(
        svg,
        r#"<text x="16" y="{cy}" text-anchor="middle" font-size="13" transform="rotate(-90 16 {cy})">Percentage over/under-valued</text>"#,
        cy = MARGIN_TOP + plot_h / 2.0
    );

    svg.push_str("</svg>");
    svg
}

// Multiples of a round step covering [min, max].
fn ticks(min: f64, max: f64) -> Vec<f64> {
    let span = (max - min).max(1.0);
    let raw = span / 6.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude);

    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step + 0.0).collect()
}
