//! Dashboard pages - server-rendered HTML for both dashboards
//!
//! Sections are rendered into a [`RenderContext`] first; this module then
//! fills the static templates with slot content and embeds the mounted
//! chart specs for the page bridge to draw.
//!
//! # Architecture
//! - `html.rs`: page bodies with `{{element-id}}` slot markers
//! - `css.rs`: styling with CSS custom properties, light and dark
//! - `js.rs`: Chart.js bridge (mount, tooltips, tick formatting)

mod css;
mod html;
mod js;

use crate::chart::MountedChart;
use crate::error::Result;
use crate::format::escape_html;
use crate::render::RenderContext;
use crate::render::stock::{Section, StockQuery};
use crate::theme::ThemeMode;

/// Chart.js build loaded by every page
pub const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js";

/// Top-level navigation entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nav {
    Sales,
    Stocks,
}

/// Chart specs as JSON safe to embed in a `<script>` element
fn chart_payload(charts: &[MountedChart]) -> Result<String> {
    let json = serde_json::to_string(charts)?;
    Ok(json.replace("</", "<\\/"))
}

fn theme_toggle(theme: ThemeMode, return_to: &str) -> String {
    let (icon, label) = if theme.is_dark() {
        ("☀️", "Light mode")
    } else {
        ("🌙", "Dark mode")
    };
    format!(
        r#"<form method="post" action="/theme/toggle?next={next}" class="theme-form">
                <button type="submit" class="btn btn-secondary" id="theme-toggle">{icon} {label}</button>
            </form>"#,
        next = escape_html(&urlencoding::encode(return_to)),
    )
}

fn layout(title: &str, theme: ThemeMode, nav: Nav, return_to: &str, body: &str, charts: &[MountedChart]) -> Result<String> {
    let active = |item: Nav| if item == nav { " active" } else { "" };
    let html_class = if theme.is_dark() { r#" class="dark""# } else { "" };

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en"{html_class}>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
    <script src="{chart_js}"></script>
</head>
<body>
    <header class="topbar">
        <nav>
            <a href="/sales" class="nav-link{sales_active}">Sales</a>
            <a href="/stocks" class="nav-link{stocks_active}">Stocks</a>
        </nav>
        {toggle}
    </header>
{body}
    <script id="chart-specs" type="application/json">{specs}</script>
    <script>
{js}
    </script>
</body>
</html>"#,
        title = escape_html(title),
        css = css::STYLES,
        chart_js = CHART_JS_URL,
        sales_active = active(Nav::Sales),
        stocks_active = active(Nav::Stocks),
        toggle = theme_toggle(theme, return_to),
        specs = chart_payload(charts)?,
        js = js::SCRIPT,
    ))
}

/// Complete sales overview page
pub fn sales_page(ctx: &RenderContext) -> Result<String> {
    let body = format!(
        r#"    <main class="container">{}</main>"#,
        ctx.view.fill(html::SALES_TEMPLATE)
    );
    layout(
        "Sales Dashboard",
        ctx.theme,
        Nav::Sales,
        "/sales",
        &body,
        ctx.charts.engine().mounted(),
    )
}

/// Path back to the stock page for `query` with `section` selected
fn stock_href(query: &StockQuery, section: Section) -> String {
    let mut href = format!("/stocks?section={}", section.as_str());
    if !query.ticker.is_empty() {
        href.push_str("&ticker=");
        href.push_str(&urlencoding::encode(&query.ticker));
    }
    href
}

fn sidebar(query: &StockQuery) -> String {
    let items: String = Section::ALL
        .into_iter()
        .map(|section| {
            let active = if section == query.section { " active" } else { "" };
            format!(
                r#"<a href="{href}" class="sidebar-item{active}">{title}</a>"#,
                href = escape_html(&stock_href(query, section)),
                title = section.title(),
            )
        })
        .collect();
    format!(r#"<aside class="sidebar">{items}</aside>"#)
}

fn ticker_form(query: &StockQuery) -> String {
    format!(
        r#"<form method="get" action="/stocks" class="ticker-form">
                <input type="hidden" name="section" value="{section}">
                <input type="text" name="ticker" id="ticker-search" placeholder="Search ticker (e.g. BBCA)" value="{ticker}">
                <button type="submit" class="btn btn-primary">Load</button>
            </form>"#,
        section = query.section.as_str(),
        ticker = escape_html(&query.ticker),
    )
}

/// Complete stock analysis page; only `query.section` is visible
pub fn stock_page(ctx: &RenderContext, query: &StockQuery) -> Result<String> {
    let sections: String = Section::ALL
        .into_iter()
        .map(|section| {
            let hidden = if section == query.section { "" } else { " hidden" };
            let content = match section {
                Section::Home => ctx.view.fill(html::STOCK_HOME_TEMPLATE),
                _ => html::STOCK_SECTION_PLACEHOLDER.to_string(),
            };
            format!(
                r#"<section id="{id}-section" class="page-section{hidden}">{content}</section>"#,
                id = section.as_str()
            )
        })
        .collect();

    let body = format!(
        r#"    <div class="layout">
        {sidebar}
        <main class="container">
            {form}
            {status}
            {sections}
        </main>
    </div>"#,
        sidebar = sidebar(query),
        form = ticker_form(query),
        status = ctx.view.fill(html::STOCK_STATUS_TEMPLATE),
    );

    layout(
        "Stock Analysis Dashboard",
        ctx.theme,
        Nav::Stocks,
        &stock_href(query, query.section),
        &body,
        ctx.charts.engine().mounted(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartData, ChartId, ChartKind, ValueFormat, build_chart_spec};
    use crate::render::RenderSettings;
    use crate::view::{Slot, View};

    fn context(theme: ThemeMode) -> RenderContext {
        RenderContext::new(theme, RenderSettings::default())
    }

    fn query(ticker: &str, section: Section) -> StockQuery {
        StockQuery {
            ticker: ticker.to_string(),
            section,
            limit: 30,
            timeframe: "1d".to_string(),
        }
    }

    #[test]
    fn test_sales_page_shows_placeholders_before_data() {
        let page = sales_page(&context(ThemeMode::Light)).expect("page should render");
        assert!(page.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(page.contains(r#"<div class="card-value" id="total-revenue">--</div>"#));
        assert!(page.contains(r#"<canvas id="segmentRevenueChart">"#));
        assert!(page.contains(r#"<script id="chart-specs" type="application/json">[]</script>"#));
        assert!(!page.contains("{{"));
    }

    #[test]
    fn test_dark_page_marks_root_and_offers_light_toggle() {
        let page = sales_page(&context(ThemeMode::Dark)).expect("page should render");
        assert!(page.contains(r#"<html lang="en" class="dark">"#));
        assert!(page.contains("Light mode"));
        assert!(page.contains(r#"action="/theme/toggle?next=%2Fsales""#));
    }

    #[test]
    fn test_chart_specs_cannot_close_script_element() {
        let mut ctx = context(ThemeMode::Light);
        let data = ChartData::new(vec!["</script><b>".into()], vec![1.0], ValueFormat::Idr);
        let spec = build_chart_spec(ChartId::TopProducts, ChartKind::HorizontalBar, &data, &ctx.style());
        ctx.charts.render(&spec);

        let page = sales_page(&ctx).expect("page should render");
        assert!(page.contains(r#"<\/script><b>"#));
        assert_eq!(page.matches("</script>").count(), 3);
        assert!(page.contains(r#""canvasId":"topProductsChart""#));
    }

    #[test]
    fn test_stock_page_shows_only_selected_section() {
        let mut ctx = context(ThemeMode::Light);
        ctx.view.set_text(Slot::PageTitle, Section::Analysis.title());
        let page = stock_page(&ctx, &query("BBCA", Section::Analysis)).expect("page should render");

        assert!(page.contains(r#"<section id="analysis-section" class="page-section">"#));
        assert!(page.contains(r#"<section id="home-section" class="page-section hidden">"#));
        assert!(page.contains(r#"href="/stocks?section=analysis&amp;ticker=BBCA" class="sidebar-item active""#));
        assert!(page.contains(r#"id="page-title">Market Analysis</h1>"#));
        assert!(page.contains(r#"value="BBCA""#));
    }

    #[test]
    fn test_user_ticker_is_escaped_and_not_filled() {
        let ctx = context(ThemeMode::Light);
        let page = stock_page(&ctx, &query("\"><x>{{company-info}}", Section::Home)).expect("page should render");
        assert!(page.contains(r#"value="&quot;&gt;&lt;x&gt;{{company-info}}""#));
        assert!(!page.contains(r#"value=""><x>"#));
    }
}
