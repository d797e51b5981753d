//! HTML rendering
//!
//! Turns a `Layout` into a complete HTML document. The trend chart is drawn
//! server-side as an inline SVG polyline; the filtered chart slot is left for
//! the client script to fill from update payloads.

use std::fmt::Write;

use super::assets::{SCRIPT, STYLES};
use super::layout::{
    CategoryControl, ChartContent, ChartPanel, DateRangeControl, Layout, MetricCard,
};
use crate::filter::TrendPoint;

const CHART_WIDTH: f64 = 600.0;
const CHART_HEIGHT: f64 = 320.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 50.0;

/// Where the client script sends updates
#[derive(Debug, Clone)]
pub struct PageUrls {
    /// JSON update route
    pub update: String,
    /// WebSocket update channel
    pub websocket: String,
}

impl Default for PageUrls {
    fn default() -> Self {
        Self {
            update: "/dashboard/_update".to_string(),
            websocket: "/dashboard/_ws".to_string(),
        }
    }
}

/// Render the dashboard page
pub fn render_page(layout: &Layout, urls: &PageUrls) -> String {
    let mut html = String::with_capacity(32 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape(&layout.header.title));
    let _ = writeln!(html, "<style>{}</style>", STYLES);
    html.push_str("</head>\n<body>\n<div class=\"dashboard-container\">\n");

    let _ = writeln!(
        html,
        "<div class=\"header\"><h1 class=\"dashboard-title\">{}</h1><p class=\"dashboard-subtitle\">{}</p></div>",
        escape(&layout.header.title),
        escape(&layout.header.subtitle)
    );

    html.push_str("<div class=\"metrics-container\">\n");
    for card in &layout.metric_cards {
        render_metric_card(&mut html, card);
    }
    html.push_str("</div>\n");

    html.push_str("<div class=\"controls-container\">\n");
    render_date_range(&mut html, &layout.controls.date_range);
    render_category_select(&mut html, &layout.controls.categories);
    html.push_str("</div>\n");

    html.push_str("<div class=\"charts-row\">\n");
    for panel in &layout.charts {
        render_panel(&mut html, panel, &layout.controls.categories);
    }
    html.push_str("</div>\n</div>\n");

    let _ = writeln!(
        html,
        "<script type=\"application/json\" id=\"dashboard-config\">{}</script>",
        client_config(layout, urls)
    );
    let _ = writeln!(html, "<script>{}</script>", SCRIPT);
    html.push_str("</body>\n</html>\n");

    html
}

/// Render the landing page
pub fn render_landing(dashboard_path: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Sales Dashboard</title>\n<style>{}</style>\n</head>\n<body>\n\
         <div class=\"landing\">\n<h1>Sales Dashboard</h1>\n\
         <p>Weekly sales by category, filterable by date range.</p>\n\
         <p><a href=\"{}\">Open the dashboard</a></p>\n</div>\n</body>\n</html>\n",
        STYLES,
        escape(dashboard_path)
    )
}

fn render_metric_card(html: &mut String, card: &MetricCard) {
    let _ = writeln!(
        html,
        "<div class=\"metric-card {}\"><div class=\"metric-content\"><h3 class=\"metric-value\">{}</h3><p class=\"metric-label\">{}</p></div></div>",
        escape(&card.accent),
        escape(&card.value),
        escape(&card.label)
    );
}

fn render_date_range(html: &mut String, control: &DateRangeControl) {
    let _ = writeln!(
        html,
        "<div class=\"control-group\"><label class=\"control-label\" for=\"{id}-start\">{label}</label>\
         <div class=\"date-picker\" id=\"{id}\">\
         <input type=\"date\" id=\"{id}-start\" value=\"{start}\" min=\"{min}\" max=\"{max}\"> \
         <input type=\"date\" id=\"{id}-end\" value=\"{end}\" min=\"{min}\" max=\"{max}\">\
         </div></div>",
        id = escape(&control.id),
        label = escape(&control.label),
        start = control.start_date,
        end = control.end_date,
        min = control.min_date,
        max = control.max_date,
    );
}

fn render_category_select(html: &mut String, control: &CategoryControl) {
    let _ = write!(
        html,
        "<div class=\"control-group\"><label class=\"control-label\" for=\"{id}\">{label}</label>\
         <select id=\"{id}\" class=\"category-dropdown\"{multiple}>",
        id = escape(&control.id),
        label = escape(&control.label),
        multiple = if control.multi { " multiple" } else { "" },
    );
    for option in &control.options {
        let selected = if control.selected.contains(&option.value) {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            escape(&option.value),
            selected,
            escape(&option.label)
        );
    }
    html.push_str("</select></div>\n");
}

fn render_panel(html: &mut String, panel: &ChartPanel, categories: &CategoryControl) {
    let _ = write!(
        html,
        "<div class=\"chart-container chart-half\"><h3 class=\"chart-title\">{}</h3>",
        escape(&panel.title)
    );

    match &panel.content {
        ChartContent::Line {
            x_title,
            y_title,
            color,
            points,
        } => {
            let _ = write!(
                html,
                "<div class=\"chart\" id=\"{}\">{}</div>",
                escape(&panel.id),
                line_svg(points, color, x_title, y_title)
            );
        }
        ChartContent::Pending => {
            html.push_str("<div class=\"legend\">");
            for option in &categories.options {
                let _ = write!(
                    html,
                    "<span><span class=\"legend-swatch\" style=\"background:{}\"></span>{}</span>",
                    escape(&option.color),
                    escape(&option.label)
                );
            }
            html.push_str("</div>");
            let _ = write!(html, "<div class=\"chart\" id=\"{}\"></div>", escape(&panel.id));
        }
    }

    html.push_str("</div>\n");
}

/// Inline SVG line chart
fn line_svg(points: &[TrendPoint], color: &str, x_title: &str, y_title: &str) -> String {
    let plot_w = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline = MARGIN_TOP + plot_h;

    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg viewBox=\"0 0 {} {}\" xmlns=\"http://www.w3.org/2000/svg\">",
        CHART_WIDTH, CHART_HEIGHT
    );
    let _ = write!(
        svg,
        "<line x1=\"{l}\" y1=\"{b}\" x2=\"{r}\" y2=\"{b}\" stroke=\"#2c3e50\"/>\
         <line x1=\"{l}\" y1=\"{t}\" x2=\"{l}\" y2=\"{b}\" stroke=\"#2c3e50\"/>",
        l = MARGIN_LEFT,
        r = MARGIN_LEFT + plot_w,
        t = MARGIN_TOP,
        b = baseline,
    );

    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        let max = points.iter().map(|p| p.total).fold(f64::MIN, f64::max);
        let min = points.iter().map(|p| p.total).fold(f64::MAX, f64::min);
        let span = if max > min { max - min } else { 1.0 };
        let step = if points.len() > 1 {
            plot_w / (points.len() - 1) as f64
        } else {
            0.0
        };

        let coords: Vec<String> = points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let x = MARGIN_LEFT + i as f64 * step;
                let y = baseline - (p.total - min) / span * plot_h;
                format!("{:.1},{:.1}", x, y)
            })
            .collect();

        let _ = write!(
            svg,
            "<polyline fill=\"none\" stroke=\"{}\" stroke-width=\"3\" points=\"{}\"/>",
            escape(color),
            coords.join(" ")
        );
        let _ = write!(
            svg,
            "<text class=\"tick\" x=\"{l}\" y=\"{y}\">{first}</text>\
             <text class=\"tick\" x=\"{r}\" y=\"{y}\" text-anchor=\"end\">{last}</text>\
             <text class=\"tick\" x=\"{lt}\" y=\"{top}\" text-anchor=\"end\">{max:.0}</text>\
             <text class=\"tick\" x=\"{lt}\" y=\"{b}\" text-anchor=\"end\">{min:.0}</text>",
            l = MARGIN_LEFT,
            r = MARGIN_LEFT + plot_w,
            y = baseline + 16.0,
            lt = MARGIN_LEFT - 6.0,
            top = MARGIN_TOP + 4.0,
            b = baseline,
            first = first.date,
            last = last.date,
            max = max,
            min = min,
        );
    }

    let _ = write!(
        svg,
        "<text class=\"axis-title\" x=\"{cx}\" y=\"{bottom}\" text-anchor=\"middle\">{x_title}</text>\
         <text class=\"axis-title\" x=\"14\" y=\"{cy}\" text-anchor=\"middle\" transform=\"rotate(-90 14 {cy})\">{y_title}</text>",
        cx = MARGIN_LEFT + plot_w / 2.0,
        bottom = CHART_HEIGHT - 8.0,
        cy = MARGIN_TOP + plot_h / 2.0,
        x_title = escape(x_title),
        y_title = escape(y_title),
    );
    svg.push_str("</svg>");
    svg
}

/// Settings the client script reads at load
fn client_config(layout: &Layout, urls: &PageUrls) -> String {
    let filtered_id = layout
        .charts
        .iter()
        .find(|c| c.content == ChartContent::Pending)
        .map(|c| c.id.as_str())
        .unwrap_or_default();

    let config = serde_json::json!({
        "dateRangeId": layout.controls.date_range.id,
        "categoryId": layout.controls.categories.id,
        "filteredChartId": filtered_id,
        "updateUrl": urls.update,
        "wsUrl": urls.websocket,
        "categories": layout.controls.categories.options,
    });

    // Keep "</script>" from closing the tag early
    config.to_string().replace("</", "<\\/")
}

/// Escape text for HTML content and attribute values
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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
