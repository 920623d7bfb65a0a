//! Section renderers
//!
//! Renderers turn fetched payloads into slot markup and chart specs.
//! Missing sub-objects become explicit "no data" placeholders; they never
//! leave a slot blank or fail the render.
//!
//! - `sales.rs`: KPI tiles and the three revenue charts
//! - `stock.rs`: company panels, price table, price and volume charts

pub mod sales;
pub mod stock;

use crate::chart::{ChartEngine, ChartRegistry, PageCharts, StyleOptions, build_theme_options};
use crate::config::Config;
use crate::theme::ThemeMode;
use crate::view::PageView;

/// Knobs shared by every section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    /// Max rows per table
    pub row_cap: usize,
    /// Company summary length before truncation
    pub summary_chars: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            row_cap: 10,
            summary_chars: 200,
        }
    }
}

impl From<&Config> for RenderSettings {
    fn from(config: &Config) -> Self {
        Self {
            row_cap: config.table_row_cap,
            summary_chars: config.summary_chars,
        }
    }
}

/// Everything one page render mutates: the view, the live charts, and the
/// theme they are drawn in.
pub struct RenderContext<V = PageView, E: ChartEngine = PageCharts> {
    pub theme: ThemeMode,
    pub view: V,
    pub charts: ChartRegistry<E>,
    pub settings: RenderSettings,
}

impl RenderContext {
    pub fn new(theme: ThemeMode, settings: RenderSettings) -> Self {
        Self::with_parts(theme, PageView::new(), PageCharts::default(), settings)
    }
}

impl<V, E: ChartEngine> RenderContext<V, E> {
    pub fn with_parts(theme: ThemeMode, view: V, engine: E, settings: RenderSettings) -> Self {
        Self {
            theme,
            view,
            charts: ChartRegistry::new(engine),
            settings,
        }
    }

    /// Palette for the current theme, derived fresh on every call
    pub fn style(&self) -> StyleOptions {
        build_theme_options(self.theme)
    }
}

/// Placeholder paragraph for a section without data
pub(crate) fn no_data(what: &str) -> String {
    format!(r#"<p class="no-data">No {what} available</p>"#)
}

/// Label/value rows used by every metric panel
pub(crate) fn metric_rows(rows: &[(&str, String)]) -> String {
    let body: String = rows
        .iter()
        .map(|(label, value)| {
            format!(
                r#"<div class="metric-row"><span class="metric-label">{label}:</span><span class="metric-value">{value}</span></div>"#
            )
        })
        .collect();
    format!(r#"<div class="metric-list">{body}</div>"#)
}
