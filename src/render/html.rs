//! Dashboard markup.
//!
//! Screens are rendered to HTML fragments; [`render_page`] wraps a fragment in
//! the page shell together with the chart specs the client script draws.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::fmt::Write;

use crate::render::charts::ChartSpec;
use crate::render::views::{AnalysisView, IndicatorRow, MetricRow, SymbolRow, TimeframeView};
use crate::render::RenderStyle;

const STYLES: &str = r#"
    body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif; margin: 0; background: #f5f6fa; color: #2d3436; }
    .container { max-width: 1200px; margin: 0 auto; padding: 24px; }
    .card { background: #fff; border-radius: 12px; padding: 16px 20px; margin-bottom: 16px; box-shadow: 0 2px 8px rgba(0,0,0,.06); }
    table { width: 100%; border-collapse: collapse; }
    th, td { text-align: left; padding: 8px; border-bottom: 1px solid #eee; }
    .positive, .buy { color: #27ae60; }
    .negative, .sell { color: #e74c3c; }
    .neutral, .hold { color: #f39c12; }
    .badge { font-weight: 700; padding: 2px 8px; border-radius: 6px; border: 1px solid currentColor; }
    .gauge { width: 120px; height: 120px; border-radius: 50%; }
    .error { background: #fdecea; color: #c0392b; padding: 16px; border-radius: 8px; }
    .periods a { margin-right: 8px; }
"#;

/// Characters that cannot appear raw in one path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Href of a symbol's analysis page, ready for a double-quoted attribute.
pub fn analysis_href(symbol: &str) -> String {
    escape_html(&format!(
        "/analysis/{}",
        utf8_percent_encode(symbol, PATH_SEGMENT)
    ))
}

/// Escape text for element content and double-quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Full page around a screen fragment.
pub fn render_page(title: &str, body: &str, charts: &[&ChartSpec]) -> String {
    // `</` cannot appear inside the script element.
    let chart_json = serde_json::to_string(charts)
        .unwrap_or_else(|_| "[]".to_string())
        .replace("</", "<\\/");
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{styles}</style>
</head>
<body>
<div class="container">
    <header><h1><a href="/">CryptoVault Analytics</a></h1></header>
{body}
</div>
<script type="application/json" id="chart-data">{chart_json}</script>
</body>
</html>"#,
        title = escape_html(title),
        styles = STYLES,
        body = body,
        chart_json = chart_json,
    )
}

pub fn render_error(message: &str) -> String {
    format!(
        r#"<div class="error" role="alert">Error: {}</div>"#,
        escape_html(message)
    )
}

pub fn render_symbol_list(rows: &[SymbolRow], style: RenderStyle) -> String {
    if rows.is_empty() {
        return r#"<div class="card">No symbols available</div>"#.to_string();
    }
    let detailed = style != RenderStyle::Compact;
    let mut html = String::from(r#"<div class="card"><table class="symbols"><thead><tr><th>Symbol</th><th>Price</th><th>24h Change</th>"#);
    if detailed {
        html.push_str("<th>Volume</th><th>Trades</th>");
    }
    html.push_str("</tr></thead><tbody>");
    for row in rows {
        let _ = write!(
            html,
            r#"<tr><td><a href="{href}">{symbol}</a></td><td>{price}</td><td class="{class}">{change}</td>"#,
            href = analysis_href(&row.symbol),
            symbol = escape_html(&row.symbol),
            price = escape_html(&row.price),
            class = row.change_class.css_class(),
            change = escape_html(&row.change),
        );
        if detailed {
            let _ = write!(
                html,
                "<td>{}</td><td>{}</td>",
                escape_html(&row.volume),
                escape_html(&row.trades)
            );
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table></div>");
    html
}

pub fn render_analysis(view: &AnalysisView, style: RenderStyle) -> String {
    let mut html = String::new();
    let symbol = escape_html(&view.symbol);

    let _ = write!(
        html,
        r#"<div class="card summary"><h2>{symbol}</h2><div class="price">{price} <span class="{change_class}">{change}</span></div>"#,
        symbol = symbol,
        price = escape_html(&view.price),
        change_class = view.change_class.css_class(),
        change = escape_html(&view.change),
    );
    let _ = write!(
        html,
        r#"<div>Recommendation: <span class="badge {class}">{text}</span> Confidence: {confidence}%</div>"#,
        class = view.recommendation.css_class(),
        text = escape_html(&view.recommendation.text),
        confidence = view.confidence,
    );
    html.push_str(r#"<div class="periods">"#);
    let href = analysis_href(&view.symbol);
    for period in crate::models::Period::ALL {
        let _ = write!(
            html,
            r#"<a href="{href}?period={p}"{active}>{p}</a>"#,
            href = href,
            p = period.as_str(),
            active = if period == view.period { r#" class="active""# } else { "" },
        );
    }
    html.push_str("</div>");
    if style == RenderStyle::Detailed {
        let _ = write!(html, "<div>24h Volume: {}</div>", escape_html(&view.volume));
        if let Some(reported) = &view.reported_confidence {
            let _ = write!(html, "<div>Backend confidence: {}</div>", escape_html(reported));
        }
        if let Some(reasoning) = &view.reasoning {
            let _ = write!(html, r#"<p class="reasoning">{}</p>"#, escape_html(reasoning));
        }
    }
    html.push_str("</div>");

    html.push_str(&render_technical(&view.timeframes, style));

    if let Some(sentiment) = &view.sentiment {
        let _ = write!(
            html,
            r#"<div class="card sentiment"><h3>Sentiment</h3><div class="gauge" style="background: {gauge}"></div><div class="{tone}">{score} ({label})</div><div>Signal: <span class="badge {class}">{text}</span></div>"#,
            gauge = escape_html(&sentiment.gauge_css),
            tone = sentiment.tone.css_class(),
            score = escape_html(&sentiment.score),
            label = escape_html(&sentiment.label),
            class = sentiment.signal.css_class(),
            text = escape_html(&sentiment.signal.text),
        );
        if style != RenderStyle::Compact && !sentiment.onchain.is_empty() {
            html.push_str("<h4>On-chain Metrics</h4>");
            html.push_str(&metric_table(&sentiment.onchain));
        }
        html.push_str("</div>");
    }

    if let Some(prediction) = &view.prediction {
        let _ = write!(
            html,
            r#"<div class="card prediction"><h3>LSTM Prediction</h3><div>Current: {current} Target: {target} <span class="{class}">{change}</span></div>"#,
            current = escape_html(&prediction.current_price),
            target = escape_html(&prediction.target_price),
            class = prediction.expected_change_class.css_class(),
            change = escape_html(&prediction.expected_change),
        );
        if !prediction.trained {
            html.push_str("<div>Model not trained</div>");
        }
        if style != RenderStyle::Compact && !prediction.metrics.is_empty() {
            html.push_str("<h4>Model Performance</h4>");
            html.push_str(&metric_table(&prediction.metrics));
        }
        if style == RenderStyle::Detailed && !prediction.forecast.is_empty() {
            html.push_str("<table><thead><tr><th>Date</th><th>Predicted</th></tr></thead><tbody>");
            for row in &prediction.forecast {
                let _ = write!(
                    html,
                    "<tr><td>{}</td><td>{}</td></tr>",
                    escape_html(&row.date),
                    escape_html(&row.price)
                );
            }
            html.push_str("</tbody></table>");
        }
        html.push_str("</div>");
    }

    html.push_str(r#"<div class="card charts">"#);
    for id in ["price-chart", "technical-chart", "lstm-chart", "signals-chart"] {
        let _ = write!(html, r#"<canvas id="{}"></canvas>"#, id);
    }
    html.push_str("</div>");
    html
}

fn render_technical(timeframes: &[TimeframeView], style: RenderStyle) -> String {
    if timeframes.is_empty() {
        return r#"<div class="card technical"><h3>Technical Analysis</h3><div>N/A</div></div>"#
            .to_string();
    }
    let mut html = String::from(r#"<div class="card technical"><h3>Technical Analysis</h3>"#);
    for (i, tf) in timeframes.iter().enumerate() {
        let _ = write!(
            html,
            r#"<div class="timeframe"><h4>{title}</h4><span class="badge {class}">{text}</span> <span class="tally">Buy {buy} / Sell {sell} / Hold {hold}</span>"#,
            title = tf.timeframe.title(),
            class = tf.signal.css_class(),
            text = escape_html(&tf.signal.text),
            buy = tf.tally.buy,
            sell = tf.tally.sell,
            hold = tf.tally.hold,
        );
        let show_tables = match style {
            RenderStyle::Compact => false,
            RenderStyle::Standard => i == 0,
            RenderStyle::Detailed => true,
        };
        if show_tables {
            html.push_str(&indicator_table("Oscillators", &tf.oscillators));
            html.push_str(&indicator_table("Moving Averages", &tf.moving_averages));
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");
    html
}

fn indicator_table(title: &str, rows: &[IndicatorRow]) -> String {
    if rows.is_empty() {
        return String::new();
    }
    let mut html = format!("<h5>{}</h5><table><tbody>", escape_html(title));
    for row in rows {
        let _ = write!(
            html,
            r#"<tr><td>{name}</td><td class="{class}">{value}</td></tr>"#,
            name = escape_html(&row.name),
            class = row.category.css_class(),
            value = escape_html(&row.value),
        );
    }
    html.push_str("</tbody></table>");
    html
}

fn metric_table(rows: &[MetricRow]) -> String {
    let mut html = String::from("<table><tbody>");
    for row in rows {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape_html(&row.label),
            escape_html(&row.value)
        );
    }
    html.push_str("</tbody></table>");
    html
}
