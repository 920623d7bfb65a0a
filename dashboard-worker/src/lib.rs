//! Dashboard Worker - sales and stock metrics dashboards on Cloudflare Workers
//!
//! Server-rendered dashboards over a metrics backend API.
//!
//! # Architecture
//! - Main entry point routes page, theme and health requests
//! - Backend API client with fail-fast parallel fetch groups
//! - Section renderers write into slots and a chart registry held by a
//!   per-request render context
//! - A small page bridge mounts the rendered Chart.js specs in the browser
//!
//! # Features
//! - Sales overview: KPI tiles, monthly revenue, top products, segment share
//! - Stock analysis: company panels, quick stats, price/volume charts,
//!   recent prices table, API connection badge
//! - Light/dark theme persisted in a cookie, OS preference via client hints

// Clippy configuration for display code patterns
#![allow(clippy::cast_precision_loss)] // Float casts OK for display
#![allow(clippy::doc_markdown)] // Doc style flexibility
#![allow(clippy::needless_pass_by_value)] // Worker framework patterns
#![allow(clippy::too_many_lines)] // Page templates and route tables

pub mod logging;

pub mod chart;
pub mod client;
pub mod config;
mod dashboard;
pub mod error;
pub mod format;
pub mod render;
pub mod theme;
pub mod types;
pub mod view;

use worker::{Context, Env, Request, Response, RouteContext, Router, Url, event};

pub use chart::{ChartRegistry, ChartSpec, build_chart_spec, build_theme_options};
pub use client::{ApiClient, JsonSource};
pub use config::Config;
pub use error::{ApiError, DashboardError};
pub use render::{RenderContext, RenderSettings};
pub use theme::{ThemeController, ThemeMode};

use crate::logging::{log_debug, log_info};
use crate::render::stock::{Section, StockQuery, normalize_ticker};
use crate::theme::{COLOR_SCHEME_HINT, CookieStore, prefers_dark_from_hint};

/// Result type alias for worker operations
type WResult<T> = std::result::Result<T, worker::Error>;

/// Main Worker entry point
#[event(fetch)]
async fn fetch(req: Request, env: Env, _ctx: Context) -> WResult<Response> {
    console_error_panic_hook::set_once();

    let router = Router::new();

    router
        // Health check
        .get("/health", |_req, ctx| {
            let config = match Config::from_env(&ctx.env) {
                Ok(c) => c,
                Err(e) => return Response::error(format!("Config error: {e}"), 500),
            };

            Response::from_json(&serde_json::json!({
                "status": "healthy",
                "version": env!("CARGO_PKG_VERSION"),
                "environment": config.environment,
                "timestamp": chrono::Utc::now().to_rfc3339(),
            }))
        })
        // Sales overview
        .get_async("/", |req, ctx| async move { sales_route(req, ctx).await })
        .get_async("/sales", |req, ctx| async move { sales_route(req, ctx).await })
        // Stock analysis
        .get_async("/stocks", |req, ctx| async move { stock_route(req, ctx).await })
        // Flip the theme and go back to the page that asked
        .post("/theme/toggle", |req, _ctx| {
            let mut theme = theme_controller(&req)?;
            let next = redirect_target(query_param(&req.url()?, "next").as_deref());
            let mode = theme.toggle();
            log_debug!("theme: toggled to {mode}, returning to {next}");

            let mut response = Response::empty()?.with_status(303);
            response.headers_mut().set("Location", &next)?;
            if let Some(cookie) = theme.store().set_cookie() {
                response.headers_mut().set("Set-Cookie", cookie)?;
            }
            Ok(response)
        })
        .run(req, env)
        .await
}

async fn sales_route(req: Request, ctx: RouteContext<()>) -> WResult<Response> {
    let config = match Config::from_env(&ctx.env) {
        Ok(c) => c,
        Err(e) => return Response::error(format!("Config error: {e}"), 500),
    };
    logging::set_max_level(config.log_level);
    let theme = theme_controller(&req)?.mode();

    let client = ApiClient::new(&config.api_base_url);
    let mut page = RenderContext::new(theme, RenderSettings::from(&config));
    // Failures are already rendered into the page
    if render::sales::load_sales_dashboard(&client, &mut page).await.is_ok() {
        log_info!("sales: served {} charts", page.charts.len());
    }

    page_response(dashboard::sales_page(&page)?)
}

async fn stock_route(req: Request, ctx: RouteContext<()>) -> WResult<Response> {
    let config = match Config::from_env(&ctx.env) {
        Ok(c) => c,
        Err(e) => return Response::error(format!("Config error: {e}"), 500),
    };
    logging::set_max_level(config.log_level);
    let theme = theme_controller(&req)?.mode();

    let url = req.url()?;
    let query = stock_query(
        query_param(&url, "ticker").as_deref(),
        query_param(&url, "section").as_deref(),
        &config,
    );

    let client = ApiClient::new(&config.stock_api_base_url);
    let mut page = RenderContext::new(theme, RenderSettings::from(&config));
    if render::stock::load_stock_dashboard(&client, &mut page, &query, client.base_url())
        .await
        .is_ok()
    {
        log_info!("stocks: served {} ({} charts)", query.ticker, page.charts.len());
    }

    page_response(dashboard::stock_page(&page, &query)?)
}

/// Theme for this request: `theme` cookie, then the OS client hint, then light
fn theme_controller(req: &Request) -> WResult<ThemeController<CookieStore>> {
    let cookies = req.headers().get("Cookie")?;
    let hint = req.headers().get(COLOR_SCHEME_HINT)?;
    Ok(ThemeController::init(
        CookieStore::from_header(cookies.as_deref()),
        prefers_dark_from_hint(hint.as_deref()),
    ))
}

/// HTML response that asks the browser for its color scheme on later requests
fn page_response(html: String) -> WResult<Response> {
    let mut response = Response::from_html(html)?;
    let headers = response.headers_mut();
    headers.set("Accept-CH", COLOR_SCHEME_HINT)?;
    headers.set("Vary", &format!("Cookie, {COLOR_SCHEME_HINT}"))?;
    Ok(response)
}

fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Same-site path to return to after a theme toggle
fn redirect_target(next: Option<&str>) -> String {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => path.to_string(),
        _ => "/".to_string(),
    }
}

/// Stock page request from query values; an empty ticker uses the configured default
fn stock_query(ticker: Option<&str>, section: Option<&str>, config: &Config) -> StockQuery {
    let ticker = ticker.map(normalize_ticker).filter(|t| !t.is_empty());
    StockQuery {
        ticker: ticker.unwrap_or_else(|| config.default_ticker.clone()),
        section: Section::from_query(section),
        limit: config.price_limit,
        timeframe: config.price_timeframe.clone(),
    }
}
