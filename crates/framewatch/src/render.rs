//! HTML rendering for the dashboard page.
//!
//! Charts are emitted as plotly.js figures (`{ data, layout }`) and drawn client-side.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use framewatch_core::DashboardData;
use serde_json::{json, Value};

const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const PAGE_STYLE: &str = "\
body{margin:0;background:#0b0b0b;color:#f2f5fa;font-family:system-ui,sans-serif}\
header{padding:1.5rem 2rem;border-bottom:1px solid #2a2a2a}\
h1{margin:0;font-size:1.6rem}\
.counters{display:flex;gap:1.5rem;padding:1.5rem 2rem}\
.counter{flex:1;background:#111;border:1px solid #2a2a2a;border-radius:8px;padding:1rem 1.5rem}\
.counter .label{font-size:.9rem;color:#a0a4ab;text-transform:uppercase;letter-spacing:.05em}\
.counter .value{font-size:2.4rem;font-weight:600;margin-top:.4rem}\
.counter.errors .value{color:#ef553b}\
.counter.warnings .value{color:#fecb52}\
.chart{margin:0 2rem 2rem;min-height:450px;background:#111;border-radius:8px}\
.note{padding:0 2rem 2rem;color:#a0a4ab}";

pub const CAMERA_TOTALS_TITLE: &str = "Total Error Frequency for Each Camera (Video Frame Missing)";
pub const DOWNTIME_TITLE: &str = "Camera Downtime Analysis (Video Frame Missing)";
pub const HOURLY_TITLE: &str = "Video Frame Missing Errors by Hour for Different Cameras";

pub fn render_dashboard(data: &DashboardData) -> String {
    let charts = [
        ("camera-totals", camera_totals_figure(data)),
        ("camera-downtime", downtime_figure(data)),
        ("hourly-errors", hourly_figure(data)),
    ];

    let mut body = String::new();
    body.push_str(&format!(
        "<section class=\"counters\">\
<div class=\"counter errors\"><div class=\"label\">Total Errors</div>\
<div class=\"value\" id=\"total-error-count\">{}</div></div>\
<div class=\"counter warnings\"><div class=\"label\">Total Warnings</div>\
<div class=\"value\" id=\"total-warning\">{}</div></div>\
</section>",
        data.total_error_count, data.total_warning
    ));

    if data.total_error.is_empty() {
        body.push_str(&format!(
            "<p class=\"note\">No events matched &quot;{}&quot; for the configured cameras.</p>",
            escape_html(&data.criteria.pattern)
        ));
    }

    for (id, _) in &charts {
        body.push_str(&format!("<div class=\"chart\" id=\"{id}\"></div>"));
    }

    body.push_str(&format!("<script src=\"{PLOTLY_JS}\"></script><script>"));
    for (id, figure) in &charts {
        body.push_str(&format!(
            "Plotly.newPlot(\"{id}\",{data},{layout},{{\"responsive\":true}});",
            data = script_json(&figure["data"]),
            layout = script_json(&figure["layout"]),
        ));
    }
    body.push_str("</script>");

    page("Camera Downtime Dashboard", &body)
}

pub fn render_error(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<section class=\"note\"><h2>{} {}</h2><p>{}</p></section>",
        status.as_u16(),
        escape_html(status.canonical_reason().unwrap_or("Error")),
        escape_html(message)
    );
    page("Dashboard unavailable", &body)
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
<title>{title}</title><style>{PAGE_STYLE}</style></head>\
<body><header><h1>{title}</h1></header>{body}</body></html>",
        title = escape_html(title),
    )
}

/// Bar chart of matched events per camera.
pub fn camera_totals_figure(data: &DashboardData) -> Value {
    let view_ids: Vec<i64> = data.total_error.iter().map(|row| row.view_id).collect();
    let counts: Vec<u64> = data.total_error.iter().map(|row| row.count).collect();

    let mut layout = dark_layout(CAMERA_TOTALS_TITLE, "Camera ID", "Total Number of Errors");
    layout["xaxis"]["tickmode"] = json!("array");
    layout["xaxis"]["tickvals"] = json!(data.criteria.cameras);

    json!({
        "data": [{
            "type": "bar",
            "x": view_ids,
            "y": counts,
            "text": counts,
            "textposition": "auto",
            "marker": { "color": view_ids, "colorscale": "Plasma" },
            "hovertemplate": "Camera ID=%{x}<br>Total Number of Errors=%{y}<extra></extra>",
        }],
        "layout": layout,
    })
}

/// One line per camera of downtime events per day.
pub fn downtime_figure(data: &DashboardData) -> Value {
    let mut series: BTreeMap<i64, (Vec<String>, Vec<u64>)> = BTreeMap::new();
    for row in &data.camera_day_downtime {
        let (dates, counts) = series.entry(row.view_id).or_default();
        dates.push(row.date.format("%Y-%m-%d").to_string());
        counts.push(row.count);
    }

    let traces: Vec<Value> = series
        .into_iter()
        .map(|(view_id, (dates, counts))| {
            json!({
                "type": "scatter",
                "mode": "lines+markers",
                "name": view_id.to_string(),
                "x": dates,
                "y": counts,
            })
        })
        .collect();

    let mut layout = dark_layout(DOWNTIME_TITLE, "Date", "Number of Downtime Events");
    layout["xaxis"]["tickformat"] = json!("%Y-%m-%d");
    layout["legend"] = json!({ "title": { "text": "Camera ID" } });

    json!({ "data": traces, "layout": layout })
}

/// One line per camera of matched events per hour of day.
pub fn hourly_figure(data: &DashboardData) -> Value {
    let mut series: BTreeMap<i64, (Vec<u32>, Vec<u64>)> = BTreeMap::new();
    for row in &data.hourly_errors {
        let (hours, counts) = series.entry(row.view_id).or_default();
        hours.push(row.hour);
        counts.push(row.count);
    }

    let traces: Vec<Value> = series
        .into_iter()
        .map(|(view_id, (hours, counts))| {
            json!({
                "type": "scatter",
                "mode": "lines",
                "name": view_id.to_string(),
                "x": hours,
                "y": counts,
            })
        })
        .collect();

    let mut layout = dark_layout(HOURLY_TITLE, "Hour of the Day", "Number of Errors");
    layout["legend"] = json!({ "title": { "text": "Camera ID" } });

    json!({ "data": traces, "layout": layout })
}

fn dark_layout(title: &str, x_title: &str, y_title: &str) -> Value {
    json!({
        "title": { "text": title, "x": 0.5 },
        "xaxis": { "title": { "text": x_title }, "gridcolor": "#283442" },
        "yaxis": { "title": { "text": y_title }, "gridcolor": "#283442" },
        "paper_bgcolor": "#111111",
        "plot_bgcolor": "#111111",
        "font": { "color": "#f2f5fa" },
    })
}

/// Serializes `value` for inline `<script>` use.
fn script_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
