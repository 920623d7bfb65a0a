//! Dashboard JavaScript
//!
//! Page bridge to Chart.js. Reads the chart specs embedded by the worker,
//! destroys any instance already on a canvas, attaches the precomputed
//! tooltip labels and the named tick formatter, then draws.

pub const SCRIPT: &str = r#"
// ============================================================================
// Tick formatters, keyed by each chart's tickFormat
// ============================================================================
const idrFormat = new Intl.NumberFormat('id-ID', {
    style: 'currency',
    currency: 'IDR',
    maximumFractionDigits: 0
});

function formatVolume(value) {
    if (value == null || isNaN(value)) return 'N/A';
    if (value >= 1.0e9) return (value / 1.0e9).toFixed(1) + 'B';
    if (value >= 1.0e6) return (value / 1.0e6).toFixed(1) + 'M';
    if (value >= 1.0e3) return (value / 1.0e3).toFixed(1) + 'K';
    return value.toLocaleString('en-US');
}

const TICK_FORMATS = {
    idr: (value) => idrFormat.format(value),
    usd: (value) => '$' + Number(value).toFixed(2),
    volume: (value) => formatVolume(value)
};

// ============================================================================
// Mounting
// ============================================================================
const liveCharts = {};

function mountChart(spec) {
    const canvas = document.getElementById(spec.canvasId);
    if (!canvas) {
        console.warn(`No canvas for chart ${spec.canvasId}`);
        return;
    }

    const existing = liveCharts[spec.canvasId] || Chart.getChart(canvas);
    if (existing) existing.destroy();

    const config = spec.config;
    const options = config.options || (config.options = {});
    const plugins = options.plugins || (options.plugins = {});
    const tooltip = plugins.tooltip || (plugins.tooltip = {});
    tooltip.callbacks = {
        label: (item) => spec.tooltipLabels[item.dataIndex] ?? ''
    };

    const format = TICK_FORMATS[spec.tickFormat];
    if (format && spec.tickAxis) {
        const scales = options.scales || (options.scales = {});
        const axis = scales[spec.tickAxis] || (scales[spec.tickAxis] = {});
        const ticks = axis.ticks || (axis.ticks = {});
        ticks.callback = (value) => format(value);
    }

    liveCharts[spec.canvasId] = new Chart(canvas, config);
}

function mountAll() {
    const source = document.getElementById('chart-specs');
    if (!source || typeof Chart === 'undefined') return;

    let specs = [];
    try {
        specs = JSON.parse(source.textContent || '[]');
    } catch (e) {
        console.error('Invalid chart specs:', e);
        return;
    }
    specs.forEach(mountChart);
}

document.addEventListener('DOMContentLoaded', mountAll);
"#;
