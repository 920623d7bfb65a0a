//! Chart configuration builder
//!
//! Derives Chart.js configurations from data plus the current theme
//! palette. Functions cannot cross the JSON boundary, so tooltip text is
//! precomputed per data point and tick formatting travels as a named
//! [`ValueFormat`] that the page bridge maps to a callback.
//!
//! # Layout
//! - `style.rs`: light/dark palettes and the shared base options
//! - `registry.rs`: live chart instances, destroy-then-recreate

mod registry;
mod style;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};

use crate::format::{format_currency, format_price, format_share, format_volume};

pub use registry::{ChartEngine, ChartHandle, ChartRegistry, MountedChart, PageCharts};
pub use style::{StyleOptions, build_theme_options};

/// Every chart canvas the dashboards draw into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChartId {
    MonthlyRevenue,
    TopProducts,
    SegmentRevenue,
    Price,
    Volume,
}

impl ChartId {
    /// DOM id of the `<canvas>` element
    pub fn canvas_id(self) -> &'static str {
        match self {
            ChartId::MonthlyRevenue => "monthlyRevenueChart",
            ChartId::TopProducts => "topProductsChart",
            ChartId::SegmentRevenue => "segmentRevenueChart",
            ChartId::Price => "price-chart",
            ChartId::Volume => "volume-chart",
        }
    }
}

impl Serialize for ChartId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.canvas_id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
    /// Bar chart with the category axis on y
    HorizontalBar,
    Doughnut,
}

impl ChartKind {
    /// Chart.js `type`
    pub fn chart_type(self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar | ChartKind::HorizontalBar => "bar",
            ChartKind::Doughnut => "doughnut",
        }
    }

    /// Axis carrying values, if the chart has axes
    pub fn value_axis(self) -> Option<&'static str> {
        match self {
            ChartKind::Line | ChartKind::Bar => Some("y"),
            ChartKind::HorizontalBar => Some("x"),
            ChartKind::Doughnut => None,
        }
    }
}

/// Display format for chart values, shared by tooltips and axis ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    /// Rupiah, zero decimals
    Idr,
    /// Dollars with 2 decimals
    Usd,
    /// Share volume with K/M/B suffixes
    Volume,
}

impl ValueFormat {
    pub fn format(self, value: f64) -> String {
        match self {
            ValueFormat::Idr => format_currency(value),
            ValueFormat::Usd => format_price(Some(value)),
            ValueFormat::Volume => format_volume(Some(value)),
        }
    }
}

/// One series plus its labels
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    /// Dataset legend label
    pub series_label: Option<String>,
    /// Extra Chart.js dataset properties (colors, tension, ...)
    pub series_style: Map<String, Value>,
    pub value_format: ValueFormat,
    pub begin_at_zero: bool,
    /// Chart-specific options merged last
    pub options: Value,
}

impl ChartData {
    pub fn new(labels: Vec<String>, values: Vec<f64>, value_format: ValueFormat) -> Self {
        Self {
            labels,
            values,
            series_label: None,
            series_style: Map::new(),
            value_format,
            begin_at_zero: false,
            options: Value::Null,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.series_label = Some(label.into());
        self
    }

    /// Add dataset properties; `style` must be a JSON object
    pub fn with_style(mut self, style: Value) -> Self {
        if let Value::Object(map) = style {
            self.series_style.extend(map);
        }
        self
    }

    pub fn begin_at_zero(mut self) -> Self {
        self.begin_at_zero = true;
        self
    }

    pub fn with_options(mut self, options: Value) -> Self {
        merge_json(&mut self.options, options);
        self
    }

    /// Sum of the values present; missing points count for nothing
    pub fn total(&self) -> f64 {
        self.values.iter().filter(|v| v.is_finite()).sum()
    }
}

/// Everything the page needs to draw one chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    #[serde(rename = "canvasId")]
    pub id: ChartId,
    pub config: Value,
    /// Tooltip text per data index
    pub tooltip_labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_format: Option<ValueFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_axis: Option<&'static str>,
}

/// Recursively merge `overlay` into `base`. Objects merge key by key,
/// anything else in `overlay` replaces what was there.
pub fn merge_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (_, Value::Null) => {}
        (base, overlay) => *base = overlay,
    }
}

/// Per-segment share of the dataset total, 1 decimal
pub fn segment_shares(data: &ChartData) -> Vec<String> {
    let total = data.total();
    data.values.iter().map(|v| format_share(*v, total)).collect()
}

fn kind_overrides(kind: ChartKind, data: &ChartData) -> Value {
    let mut overrides = json!({
        "responsive": true,
        "maintainAspectRatio": false,
    });

    match kind {
        ChartKind::Line | ChartKind::Bar => {
            merge_json(&mut overrides, json!({ "plugins": { "legend": { "display": false } } }));
        }
        ChartKind::HorizontalBar => {
            merge_json(
                &mut overrides,
                json!({
                    "indexAxis": "y",
                    "plugins": { "legend": { "display": false } },
                }),
            );
        }
        ChartKind::Doughnut => {
            merge_json(
                &mut overrides,
                json!({
                    "cutout": "60%",
                    "plugins": { "legend": { "position": "right" } },
                }),
            );
            return overrides;
        }
    }

    if let Some(axis) = kind.value_axis() {
        // Horizontal bars always start at zero
        let begin_at_zero = data.begin_at_zero || kind == ChartKind::HorizontalBar;
        if begin_at_zero {
            merge_json(&mut overrides, json!({ "scales": { axis: { "beginAtZero": true } } }));
        }
    }
    overrides
}

fn tooltip_labels(kind: ChartKind, data: &ChartData) -> Vec<String> {
    match kind {
        ChartKind::Doughnut => {
            let shares = segment_shares(data);
            data.values
                .iter()
                .zip(shares)
                .enumerate()
                .map(|(i, (value, share))| {
                    let label = data.labels.get(i).map_or("", String::as_str);
                    format!("{label}: {} ({share}%)", data.value_format.format(*value))
                })
                .collect()
        }
        _ => data.values.iter().map(|v| data.value_format.format(*v)).collect(),
    }
}

/// Build a complete chart spec: theme base options, then per-kind
/// overrides, then the chart's own options.
pub fn build_chart_spec(id: ChartId, kind: ChartKind, data: &ChartData, style: &StyleOptions) -> ChartSpec {
    let mut options = match kind {
        ChartKind::Doughnut => json!({ "plugins": style.plugin_options() }),
        _ => style.base_options(),
    };
    merge_json(&mut options, kind_overrides(kind, data));
    merge_json(&mut options, data.options.clone());

    let mut dataset = Map::new();
    if let Some(label) = &data.series_label {
        dataset.insert("label".into(), json!(label));
    }
    dataset.insert("data".into(), json!(data.values));
    dataset.extend(data.series_style.clone());
    if kind == ChartKind::Doughnut {
        dataset.insert("borderColor".into(), json!(style.segment_border));
    }

    ChartSpec {
        id,
        config: json!({
            "type": kind.chart_type(),
            "data": {
                "labels": data.labels,
                "datasets": [Value::Object(dataset)],
            },
            "options": options,
        }),
        tooltip_labels: tooltip_labels(kind, data),
        tick_format: kind.value_axis().map(|_| data.value_format),
        tick_axis: kind.value_axis(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeMode;

    fn sample(values: &[f64]) -> ChartData {
        let labels = (0..values.len()).map(|i| format!("S{i}")).collect();
        ChartData::new(labels, values.to_vec(), ValueFormat::Idr)
    }

    #[test]
    fn test_merge_json_is_deep() {
        let mut base = json!({"a": {"b": 1, "c": 2}, "d": [1]});
        merge_json(&mut base, json!({"a": {"c": 3, "e": 4}, "d": [2, 3]}));
        assert_eq!(base, json!({"a": {"b": 1, "c": 3, "e": 4}, "d": [2, 3]}));

        merge_json(&mut base, Value::Null);
        assert_eq!(base["a"]["b"], 1);
    }

    #[test]
    fn test_horizontal_bar_inverts_axis() {
        let style = build_theme_options(ThemeMode::Light);
        let spec = build_chart_spec(ChartId::TopProducts, ChartKind::HorizontalBar, &sample(&[3.0, 2.0]), &style);
        let options = &spec.config["options"];

        assert_eq!(spec.config["type"], "bar");
        assert_eq!(options["indexAxis"], "y");
        assert_eq!(options["scales"]["x"]["beginAtZero"], true);
        // Theme tokens survive the override merge
        assert_eq!(options["scales"]["x"]["ticks"]["color"], "#374151");
        assert_eq!(options["scales"]["y"]["grid"]["color"], "rgba(0, 0, 0, 0.1)");
        assert_eq!(spec.tick_axis, Some("x"));
        assert_eq!(spec.tick_format, Some(ValueFormat::Idr));
    }

    #[test]
    fn test_line_keeps_both_axes_themed() {
        let style = build_theme_options(ThemeMode::Dark);
        let data = sample(&[1.0, 2.0]).begin_at_zero();
        let spec = build_chart_spec(ChartId::MonthlyRevenue, ChartKind::Line, &data, &style);
        let options = &spec.config["options"];

        assert_eq!(options["plugins"]["legend"]["display"], false);
        assert_eq!(options["scales"]["y"]["beginAtZero"], true);
        assert_eq!(options["scales"]["x"]["ticks"]["color"], "#E5E7EB");
        assert_eq!(options["plugins"]["tooltip"]["backgroundColor"], "rgba(31, 41, 55, 0.8)");
    }

    #[test]
    fn test_doughnut_options_and_tooltips() {
        let style = build_theme_options(ThemeMode::Dark);
        let data = ChartData::new(vec!["Retail".into(), "Corporate".into()], vec![750_000.0, 250_000.0], ValueFormat::Idr);
        let spec = build_chart_spec(ChartId::SegmentRevenue, ChartKind::Doughnut, &data, &style);
        let options = &spec.config["options"];

        assert_eq!(options["cutout"], "60%");
        assert_eq!(options["plugins"]["legend"]["position"], "right");
        assert_eq!(options["plugins"]["legend"]["labels"]["color"], "#E5E7EB");
        assert!(options.get("scales").is_none());
        assert_eq!(spec.config["data"]["datasets"][0]["borderColor"], "#1F2937");
        assert_eq!(spec.tooltip_labels[0], "Retail: Rp\u{a0}750.000 (75.0%)");
        assert_eq!(spec.tooltip_labels[1], "Corporate: Rp\u{a0}250.000 (25.0%)");
        assert!(spec.tick_format.is_none());
    }

    #[test]
    fn test_segment_shares_sum_to_hundred() {
        let values = [1.0, 1.0, 1.0, 2.5, 7.25, 0.4];
        let total: f64 = segment_shares(&sample(&values))
            .iter()
            .map(|s| s.parse::<f64>().expect("share should be numeric"))
            .sum();
        assert!((total - 100.0).abs() <= 0.1 * values.len() as f64 / 2.0 + 1e-9);
    }

    #[test]
    fn test_missing_segment_does_not_poison_total() {
        let data = sample(&[600.0, f64::NAN, 400.0]);
        assert_eq!(data.total(), 1000.0);
        assert_eq!(segment_shares(&data), vec!["60.0", "0.0", "40.0"]);
    }

    #[test]
    fn test_shares_reflect_current_dataset_only() {
        let style = build_theme_options(ThemeMode::Light);
        let first = build_chart_spec(ChartId::SegmentRevenue, ChartKind::Doughnut, &sample(&[1.0, 1.0]), &style);
        let second = build_chart_spec(ChartId::SegmentRevenue, ChartKind::Doughnut, &sample(&[1.0, 3.0]), &style);
        assert!(first.tooltip_labels[0].ends_with("(50.0%)"));
        assert!(second.tooltip_labels[0].ends_with("(25.0%)"));
    }

    #[test]
    fn test_spec_serializes_for_page_bridge() {
        let style = build_theme_options(ThemeMode::Light);
        let data = ChartData::new(vec!["d1".into()], vec![1500.0], ValueFormat::Volume).with_label("Volume");
        let spec = build_chart_spec(ChartId::Volume, ChartKind::Bar, &data, &style);
        let json = serde_json::to_value(&spec).expect("spec should serialize");

        assert_eq!(json["canvasId"], "volume-chart");
        assert_eq!(json["tickFormat"], "volume");
        assert_eq!(json["tickAxis"], "y");
        assert_eq!(json["tooltipLabels"][0], "1.5K");
        assert_eq!(json["config"]["data"]["datasets"][0]["label"], "Volume");
    }
}
