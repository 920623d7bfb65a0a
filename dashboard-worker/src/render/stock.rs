//! Stock analysis sections
//!
//! The page loads in two independent parts: a `/health` probe that drives
//! the connection badge, and a fail-fast group of company profile plus
//! price history. Sub-objects missing from the company payload render a
//! placeholder in their own panel only.

use std::cmp::Reverse;
use std::str::FromStr;

use futures::{join, try_join};
use serde_json::json;

use super::{RenderContext, metric_rows, no_data};
use crate::chart::{ChartData, ChartEngine, ChartId, ChartKind, ValueFormat, build_chart_spec};
use crate::client::{JsonSource, paths};
use crate::error::ApiError;
use crate::format::{
    NOT_AVAILABLE, escape_html, format_date, format_percentage, format_price, format_ratio, format_value,
    format_volume, parse_timestamp, truncate_summary,
};
use crate::logging::{log_debug, log_error, log_info, log_warn};
use crate::types::{
    CompanyData, CompanyInfo, FinanceMetrics, GrowthMetrics, LiquidityMetrics, PriceRecord, ProfitabilityMetrics,
    ValuationMetrics,
};
use crate::view::{Slot, View};

const PRICE_TABLE_PLACEHOLDER: &str =
    r#"<tr><td colspan="6" class="table-placeholder">No price data available</td></tr>"#;

/// Sidebar sections of the stock page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    Home,
    Forecasting,
    Clustering,
    Analysis,
    Portfolio,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Home,
        Section::Forecasting,
        Section::Clustering,
        Section::Analysis,
        Section::Portfolio,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Forecasting => "forecasting",
            Section::Clustering => "clustering",
            Section::Analysis => "analysis",
            Section::Portfolio => "portfolio",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Home => "Home Dashboard",
            Section::Forecasting => "Stock Forecasting",
            Section::Clustering => "Stock Clustering",
            Section::Analysis => "Market Analysis",
            Section::Portfolio => "Portfolio Tracker",
        }
    }

    /// Parse a query value; anything unknown shows the home section
    pub fn from_query(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown section: {s}"))
    }
}

/// What the stock page was asked to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockQuery {
    /// Normalized ticker; empty means no data load
    pub ticker: String,
    pub section: Section,
    pub limit: u32,
    pub timeframe: String,
}

/// Trimmed, upper-cased ticker symbol
pub fn normalize_ticker(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Non-empty text field
fn text(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn text_or_na(value: Option<&str>) -> String {
    escape_html(text(value).unwrap_or(NOT_AVAILABLE))
}

pub fn render_section_title(view: &mut impl View, section: Section) {
    view.set_text(Slot::PageTitle, section.title());
}

pub fn render_health(view: &mut impl View, result: &Result<(), ApiError>, api_base: &str) {
    match result {
        Ok(()) => {
            view.set_html(Slot::ApiStatus, "🟢 Connected".to_string());
            view.set_html(
                Slot::ConnectionStatus,
                r#"<div class="success-message">✅ Successfully connected to backend API</div>"#.to_string(),
            );
        }
        Err(_) => {
            view.set_html(Slot::ApiStatus, "🔴 Disconnected".to_string());
            view.set_html(
                Slot::ConnectionStatus,
                format!(
                    r#"<div class="error-message">❌ Cannot connect to backend API. Please ensure the backend server is running on {}</div>"#,
                    escape_html(api_base)
                ),
            );
        }
    }
}

pub fn render_load_error(view: &mut impl View, ticker: &str, err: &ApiError) {
    view.set_html(
        Slot::ConnectionStatus,
        format!(
            r#"<div class="error-message">❌ Error loading data for {}: {}</div>"#,
            escape_html(ticker),
            escape_html(&err.message)
        ),
    );
}

/// Headline tiles. Price and volume come from the same record that heads
/// the price table.
pub fn render_quick_stats(view: &mut impl View, company: &CompanyData, prices: &[PriceRecord]) {
    let market_cap = company.finance.as_ref().and_then(|f| f.marketcap);
    view.set_html(Slot::MarketCap, format_value(market_cap, true));

    let latest = recent_first(prices).first().copied();
    let price = latest.map_or_else(|| format_price(Some(0.0)), |p| format_price(p.close));
    view.set_html(Slot::CurrentPrice, price);

    let pe = company.valuation.as_ref().and_then(|v| v.trailingpe);
    view.set_html(Slot::PeRatio, format_ratio(pe));

    let volume = latest.map_or_else(|| "0".to_string(), |p| format_volume(p.volume));
    view.set_html(Slot::Volume, volume);
}

pub fn render_company_info(view: &mut impl View, info: Option<&CompanyInfo>, summary_chars: usize) {
    let Some(info) = info else {
        view.set_html(Slot::CompanyInfo, no_data("company info"));
        return;
    };

    let name = text(info.longname.as_deref()).or_else(|| text(info.ticker.as_deref())).unwrap_or(NOT_AVAILABLE);
    let summary = text(info.longbusinesssummary.as_deref())
        .and_then(|s| truncate_summary(s, summary_chars))
        .unwrap_or_else(|| "No summary available".to_string());

    view.set_html(
        Slot::CompanyInfo,
        format!(
            r#"<div class="company-card"><h4>{}</h4><p class="muted">{}</p><p class="summary">{}</p><div class="contact"><p><strong>Website:</strong> {}</p><p><strong>Phone:</strong> {}</p></div></div>"#,
            escape_html(name),
            text_or_na(info.sector.as_deref()),
            escape_html(&summary),
            text_or_na(info.website.as_deref()),
            text_or_na(info.phone.as_deref()),
        ),
    );
}

pub fn render_financial_metrics(view: &mut impl View, finance: Option<&FinanceMetrics>) {
    let html = match finance {
        Some(f) => metric_rows(&[
            ("Market Cap", format_value(f.marketcap, true)),
            ("Revenue", format_value(f.totalrevenue, true)),
            ("Net Income", format_value(f.netincometocommon, true)),
            ("EPS (TTM)", format_value(f.trailingeps, false)),
            ("Profit Margin", format_percentage(f.profitmargins)),
            ("Free Cash Flow", format_value(f.freecashflow, true)),
        ]),
        None => no_data("financial data"),
    };
    view.set_html(Slot::FinancialMetrics, html);
}

pub fn render_valuation_metrics(view: &mut impl View, valuation: Option<&ValuationMetrics>) {
    let html = match valuation {
        Some(v) => metric_rows(&[
            ("P/E Ratio", format_value(v.trailingpe, false)),
            ("Forward P/E", format_value(v.forwardpe, false)),
            ("PEG Ratio", format_value(v.pegratio, false)),
            ("Price/Book", format_value(v.pricetobook, false)),
            ("P/S (TTM)", format_value(v.pricetosalestrailing12months, false)),
        ]),
        None => no_data("valuation data"),
    };
    view.set_html(Slot::ValuationMetrics, html);
}

pub fn render_growth_metrics(view: &mut impl View, growth: Option<&GrowthMetrics>) {
    let html = match growth {
        Some(g) => metric_rows(&[
            ("Revenue Growth", format_percentage(g.revenuegrowth)),
            ("Earnings Growth", format_percentage(g.earningsgrowth)),
            ("Earnings Growth (QoQ)", format_percentage(g.earningsquarterlygrowth)),
        ]),
        None => no_data("growth data"),
    };
    view.set_html(Slot::GrowthMetrics, html);
}

/// Profitability and liquidity share one panel; either half may be absent
pub fn render_profitability_liquidity(
    view: &mut impl View,
    profitability: Option<&ProfitabilityMetrics>,
    liquidity: Option<&LiquidityMetrics>,
) {
    let mut rows = Vec::new();
    if let Some(p) = profitability {
        rows.push(("Return on Equity", format_percentage(p.returnonequity)));
        rows.push(("Return on Assets", format_percentage(p.returnonassets)));
    }
    if let Some(l) = liquidity {
        rows.push(("Current Ratio", format_value(l.currentratio, false)));
        rows.push(("Total Cash", format_value(l.totalcash, true)));
        rows.push(("Total Debt", format_value(l.totaldebt, true)));
        rows.push(("Debt to Equity", format_value(l.debttoequity, false)));
    }

    let html = if rows.is_empty() {
        no_data("profitability & liquidity data")
    } else {
        metric_rows(&rows)
    };
    view.set_html(Slot::ProfitabilityLiquidity, html);
}

/// Records ordered oldest first. Unparseable timestamps sort before
/// everything else and ties keep their input order.
pub fn sort_chronologically(records: &[PriceRecord]) -> Vec<&PriceRecord> {
    let mut sorted: Vec<&PriceRecord> = records.iter().collect();
    sorted.sort_by_key(|r| parse_timestamp(&r.datetime));
    sorted
}

/// Records ordered most recent first. Unparseable timestamps sort last
/// and ties keep their input order.
pub fn recent_first(records: &[PriceRecord]) -> Vec<&PriceRecord> {
    let mut recent: Vec<&PriceRecord> = records.iter().collect();
    recent.sort_by_key(|r| Reverse(parse_timestamp(&r.datetime)));
    recent
}

/// Table rows, most recent first, at most `row_cap`
pub fn price_table_rows(records: &[PriceRecord], row_cap: usize) -> String {
    if records.is_empty() || row_cap == 0 {
        return PRICE_TABLE_PLACEHOLDER.to_string();
    }

    recent_first(records)
        .into_iter()
        .take(row_cap)
        .map(|p| {
            format!(
                r#"<tr><td>{}</td><td>{}</td><td class="price-high">{}</td><td class="price-low">{}</td><td class="price-close">{}</td><td>{}</td></tr>"#,
                escape_html(&format_date(&p.datetime)),
                format_price(p.open),
                format_price(p.high),
                format_price(p.low),
                format_price(p.close),
                format_volume(p.volume),
            )
        })
        .collect()
}

pub fn render_price_table(view: &mut impl View, records: &[PriceRecord], row_cap: usize) {
    view.set_html(Slot::PriceTableBody, price_table_rows(records, row_cap));
}

fn series(records: &[&PriceRecord], pick: impl Fn(&PriceRecord) -> Option<f64>) -> Vec<f64> {
    // Missing points serialize as null and show as gaps
    records.iter().map(|r| pick(*r).unwrap_or(f64::NAN)).collect()
}

pub fn price_chart(records: &[PriceRecord]) -> ChartData {
    let sorted = sort_chronologically(records);
    let labels = sorted.iter().map(|r| format_date(&r.datetime)).collect();

    ChartData::new(labels, series(&sorted, |r| r.close), ValueFormat::Usd)
        .with_label("Close Price")
        .with_style(json!({
            "borderColor": "rgb(99, 102, 241)",
            "backgroundColor": "rgba(99, 102, 241, 0.1)",
            "tension": 0.4,
            "fill": true,
            "pointRadius": 2,
            "pointHoverRadius": 6,
        }))
        .with_options(json!({ "interaction": { "intersect": false, "mode": "index" } }))
}

pub fn volume_chart(records: &[PriceRecord]) -> ChartData {
    let sorted = sort_chronologically(records);
    let labels = sorted.iter().map(|r| format_date(&r.datetime)).collect();

    ChartData::new(labels, series(&sorted, |r| r.volume), ValueFormat::Volume)
        .with_label("Volume")
        .with_style(json!({
            "backgroundColor": "rgba(34, 197, 94, 0.6)",
            "borderColor": "rgb(34, 197, 94)",
            "borderWidth": 1,
        }))
}

pub fn render_price_charts<V, E: ChartEngine>(ctx: &mut RenderContext<V, E>, records: &[PriceRecord]) {
    let style = ctx.style();
    let price = build_chart_spec(ChartId::Price, ChartKind::Line, &price_chart(records), &style);
    let volume = build_chart_spec(ChartId::Volume, ChartKind::Bar, &volume_chart(records), &style);
    ctx.charts.render(&price);
    ctx.charts.render(&volume);
}

/// Fill every data section from one company/prices pair
pub fn render_stock_data<V: View, E: ChartEngine>(
    ctx: &mut RenderContext<V, E>,
    company: &CompanyData,
    prices: &[PriceRecord],
) {
    let settings = ctx.settings;
    let view = &mut ctx.view;
    render_quick_stats(view, company, prices);
    render_company_info(view, company.info.as_ref(), settings.summary_chars);
    render_financial_metrics(view, company.finance.as_ref());
    render_valuation_metrics(view, company.valuation.as_ref());
    render_growth_metrics(view, company.growth.as_ref());
    render_profitability_liquidity(view, company.profitabilities.as_ref(), company.liquidity.as_ref());
    render_price_table(view, prices, settings.row_cap);
    render_price_charts(ctx, prices);
}

/// Company profile and price history in parallel; the first failure wins
pub async fn fetch_stock_data<S: JsonSource>(
    source: &S,
    query: &StockQuery,
) -> Result<(CompanyData, Vec<PriceRecord>), ApiError> {
    let company_path = paths::company(&query.ticker);
    let prices_path = paths::stock_prices(&query.ticker, query.limit, &query.timeframe);
    try_join!(
        source.fetch_json::<CompanyData>(&company_path),
        source.fetch_json::<Vec<PriceRecord>>(&prices_path),
    )
}

async fn check_health<S: JsonSource>(source: &S) -> Result<(), ApiError> {
    source.check_ok(paths::HEALTH).await
}

/// Load and render the stock page.
///
/// The health badge is always rendered. With an empty ticker only the
/// health probe runs and data sections keep their placeholders.
pub async fn load_stock_dashboard<S, V, E>(
    source: &S,
    ctx: &mut RenderContext<V, E>,
    query: &StockQuery,
    api_base: &str,
) -> Result<(), ApiError>
where
    S: JsonSource,
    V: View,
    E: ChartEngine,
{
    render_section_title(&mut ctx.view, query.section);

    if query.ticker.is_empty() {
        log_debug!("stocks: no ticker requested, probing health only");
        let health = check_health(source).await;
        render_health(&mut ctx.view, &health, api_base);
        return Ok(());
    }

    let (health, data) = join!(check_health(source), fetch_stock_data(source, query));

    if let Err(e) = &health {
        log_warn!("stocks: health check failed: {e}");
    }
    render_health(&mut ctx.view, &health, api_base);

    match data {
        Ok((company, prices)) => {
            render_stock_data(ctx, &company, &prices);
            ctx.view.clear(Slot::ConnectionStatus);
            log_info!("stocks: loaded {} ({} price records)", query.ticker, prices.len());
            Ok(())
        }
        Err(e) => {
            log_error!("stocks: error loading data for {}: {e}", query.ticker);
            render_load_error(&mut ctx.view, &query.ticker, &e);
            Err(e)
        }
    }
}
