//! Sales overview sections
//!
//! KPI tiles load independently: a failed `/kpi` marks each tile with an
//! error and leaves the charts alone. The three chart endpoints are one
//! fail-fast group; if any fails, no chart is drawn and a single banner
//! explains why.

use futures::{join, try_join};
use serde_json::json;

use super::RenderContext;
use crate::chart::{ChartData, ChartEngine, ChartId, ChartKind, ValueFormat, build_chart_spec};
use crate::client::{JsonSource, paths};
use crate::error::ApiError;
use crate::format::{NOT_AVAILABLE, NumberLocale, escape_html, format_currency, format_grouped, format_month_label};
use crate::logging::{log_error, log_info, log_warn};
use crate::types::{KpiSummary, MonthlyRevenue, NamedRevenue, SalesChartData};
use crate::view::{Slot, View};

/// Shown in every KPI tile when `/kpi` fails
pub const KPI_ERROR_HTML: &str = r#"<span class="kpi-error">Error loading data</span>"#;

/// Banner text for a failed chart group
pub const DASHBOARD_ERROR: &str =
    "Could not load dashboard data. Please ensure the backend server is running and accessible.";

const KPI_SLOTS: [Slot; 3] = [Slot::TotalRevenue, Slot::TotalCustomers, Slot::NewLeads];

const BAR_COLORS: [&str; 5] = [
    "rgba(239, 68, 68, 0.7)",
    "rgba(59, 130, 246, 0.7)",
    "rgba(234, 179, 8, 0.7)",
    "rgba(16, 185, 129, 0.7)",
    "rgba(139, 92, 246, 0.7)",
];

const SEGMENT_COLORS: [&str; 6] = [
    "rgba(239, 68, 68, 0.7)",
    "rgba(59, 130, 246, 0.7)",
    "rgba(234, 179, 8, 0.7)",
    "rgba(16, 185, 129, 0.7)",
    "rgba(139, 92, 246, 0.7)",
    "rgba(249, 115, 22, 0.7)",
];

fn or_not_available(value: Option<f64>, format: impl FnOnce(f64) -> String) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), format)
}

/// Missing revenue reads as a gap in the charts
fn revenue_point(revenue: Option<f64>) -> f64 {
    revenue.unwrap_or(f64::NAN)
}

pub fn render_kpis(view: &mut impl View, kpi: &KpiSummary) {
    let grouped = |v| format_grouped(v, NumberLocale::ID_ID);
    view.set_html(Slot::TotalRevenue, or_not_available(kpi.total_revenue, format_currency));
    view.set_html(Slot::TotalCustomers, or_not_available(kpi.total_customers, grouped));
    view.set_html(Slot::NewLeads, or_not_available(kpi.new_leads, grouped));
}

pub fn render_kpi_error(view: &mut impl View) {
    for slot in KPI_SLOTS {
        view.set_html(slot, KPI_ERROR_HTML.to_string());
    }
}

pub fn render_dashboard_error(view: &mut impl View) {
    view.set_html(
        Slot::DashboardError,
        format!(r#"<div class="error-message banner">{}</div>"#, escape_html(DASHBOARD_ERROR)),
    );
}

pub fn monthly_revenue_chart(months: &[MonthlyRevenue]) -> ChartData {
    let labels = months.iter().map(|m| format_month_label(&m.date)).collect();
    let values = months.iter().map(|m| revenue_point(m.revenue)).collect();

    ChartData::new(labels, values, ValueFormat::Idr)
        .with_label("Pendapatan Bulanan")
        .with_style(json!({
            "backgroundColor": "rgba(59, 130, 246, 0.2)",
            "borderColor": "rgba(59, 130, 246, 1)",
            "borderWidth": 2,
            "tension": 0.3,
            "pointBackgroundColor": "rgba(59, 130, 246, 1)",
            "pointRadius": 4,
        }))
        .begin_at_zero()
}

pub fn top_products_chart(products: &[NamedRevenue]) -> ChartData {
    let labels = products.iter().map(|p| p.name.clone()).collect();
    let values = products.iter().map(|p| revenue_point(p.revenue)).collect();

    ChartData::new(labels, values, ValueFormat::Idr)
        .with_label("Pendapatan")
        .with_style(json!({ "backgroundColor": BAR_COLORS }))
}

pub fn segment_revenue_chart(segments: &[NamedRevenue]) -> ChartData {
    let labels = segments.iter().map(|s| s.name.clone()).collect();
    let values = segments.iter().map(|s| revenue_point(s.revenue)).collect();

    ChartData::new(labels, values, ValueFormat::Idr).with_style(json!({ "backgroundColor": SEGMENT_COLORS }))
}

/// Rebuild all three charts from scratch in the context's current theme
pub fn render_all_charts<V, E: ChartEngine>(ctx: &mut RenderContext<V, E>, data: &SalesChartData) {
    let style = ctx.style();
    let specs = [
        build_chart_spec(
            ChartId::MonthlyRevenue,
            ChartKind::Line,
            &monthly_revenue_chart(&data.monthly_revenue),
            &style,
        ),
        build_chart_spec(
            ChartId::TopProducts,
            ChartKind::HorizontalBar,
            &top_products_chart(&data.top_products),
            &style,
        ),
        build_chart_spec(
            ChartId::SegmentRevenue,
            ChartKind::Doughnut,
            &segment_revenue_chart(&data.segment_revenue),
            &style,
        ),
    ];
    for spec in &specs {
        ctx.charts.render(spec);
    }
}

/// Fetch the three chart datasets in parallel; the first failure wins
pub async fn fetch_chart_data<S: JsonSource>(source: &S) -> Result<SalesChartData, ApiError> {
    let (monthly_revenue, top_products, segment_revenue) = try_join!(
        source.fetch_json::<Vec<MonthlyRevenue>>(paths::MONTHLY_REVENUE),
        source.fetch_json::<Vec<NamedRevenue>>(paths::TOP_PRODUCTS),
        source.fetch_json::<Vec<NamedRevenue>>(paths::SEGMENT_REVENUE),
    )?;

    Ok(SalesChartData {
        monthly_revenue,
        top_products,
        segment_revenue,
    })
}

/// Load and render the whole sales overview.
///
/// Returns the chart group's error after the banner has been rendered; KPI
/// failures are handled in place and never returned.
pub async fn load_sales_dashboard<S, V, E>(
    source: &S,
    ctx: &mut RenderContext<V, E>,
) -> Result<SalesChartData, ApiError>
where
    S: JsonSource,
    V: View,
    E: ChartEngine,
{
    let (kpi, charts) = join!(
        source.fetch_json::<KpiSummary>(paths::KPI),
        fetch_chart_data(source),
    );

    match kpi {
        Ok(kpi) => render_kpis(&mut ctx.view, &kpi),
        Err(e) => {
            log_warn!("sales: loading KPIs failed: {e}");
            render_kpi_error(&mut ctx.view);
        }
    }

    match charts {
        Ok(data) => {
            render_all_charts(ctx, &data);
            log_info!(
                "sales: dashboard loaded ({} months, {} products, {} segments)",
                data.monthly_revenue.len(),
                data.top_products.len(),
                data.segment_revenue.len()
            );
            Ok(data)
        }
        Err(e) => {
            log_error!("sales: fatal error loading dashboard: {e}");
            render_dashboard_error(&mut ctx.view);
            Err(e)
        }
    }
}
