//! Dashboard CSS styles
//!
//! Uses CSS custom properties (variables) for theming; `html.dark`
//! overrides the light palette. Chart colors are not set here, they come
//! from the chart specs.

pub const STYLES: &str = r"
* { box-sizing: border-box; margin: 0; padding: 0; }

:root {
    --bg: #f3f4f6;
    --card: #ffffff;
    --border: #e5e7eb;
    --text: #374151;
    --text-dim: #6b7280;
    --green: #16a34a;
    --red: #dc2626;
    --blue: #3b82f6;
    --indigo: #6366f1;
    --success-bg: #dcfce7;
    --error-bg: #fee2e2;
}

html.dark {
    --bg: #111827;
    --card: #1f2937;
    --border: #374151;
    --text: #e5e7eb;
    --text-dim: #9ca3af;
    --green: #4ade80;
    --red: #f87171;
    --blue: #60a5fa;
    --indigo: #818cf8;
    --success-bg: rgba(22, 163, 74, 0.15);
    --error-bg: rgba(220, 38, 38, 0.15);
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: var(--bg);
    color: var(--text);
    min-height: 100vh;
    transition: background 0.2s, color 0.2s;
}

a { color: inherit; text-decoration: none; }

/* Top bar */
.topbar {
    display: flex;
    justify-content: space-between;
    align-items: center;
    padding: 12px 24px;
    background: var(--card);
    border-bottom: 1px solid var(--border);
}

.topbar nav { display: flex; gap: 16px; }
.nav-link { color: var(--text-dim); font-weight: 500; }
.nav-link.active { color: var(--blue); }

.container { max-width: 1200px; margin: 0 auto; padding: 24px; width: 100%; }

.page-header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 16px;
}

.page-heading { font-size: 24px; font-weight: 600; margin-bottom: 16px; }
.page-header .page-heading { margin-bottom: 0; }

/* Buttons and forms */
.btn {
    padding: 8px 16px;
    border-radius: 6px;
    border: 1px solid var(--border);
    cursor: pointer;
    font-size: 14px;
    font-weight: 500;
}

.btn-primary { background: var(--blue); border-color: var(--blue); color: #fff; }
.btn-secondary { background: var(--card); color: var(--text); }
.btn:hover { opacity: 0.85; }

.ticker-form { display: flex; gap: 8px; margin-bottom: 16px; }
.ticker-form input[type=text] {
    flex: 1;
    max-width: 320px;
    padding: 8px 12px;
    border-radius: 6px;
    border: 1px solid var(--border);
    background: var(--card);
    color: var(--text);
    text-transform: uppercase;
}

/* Layout */
.layout { display: flex; min-height: calc(100vh - 57px); }

.sidebar {
    width: 220px;
    flex-shrink: 0;
    padding: 16px 8px;
    background: var(--card);
    border-right: 1px solid var(--border);
}

.sidebar-item {
    display: block;
    padding: 10px 12px;
    border-radius: 6px;
    color: var(--text-dim);
}

.sidebar-item:hover { background: var(--bg); }
.sidebar-item.active { background: var(--blue); color: #fff; }

.hidden { display: none; }

.grid { display: grid; gap: 16px; margin-bottom: 16px; }
.kpi-grid { grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); }
.panel-grid { grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); }
.chart-grid { grid-template-columns: repeat(auto-fit, minmax(400px, 1fr)); }

/* Cards */
.card {
    background: var(--card);
    border: 1px solid var(--border);
    border-radius: 8px;
    padding: 20px;
    margin-bottom: 16px;
}

.grid .card { margin-bottom: 0; }

.card-title {
    display: block;
    font-size: 14px;
    color: var(--text-dim);
    margin-bottom: 8px;
}

.card-value { font-size: 28px; font-weight: 600; }

.chart-box { position: relative; height: 300px; }

/* Metric panels */
.metric-list { display: flex; flex-direction: column; gap: 10px; }
.metric-row { display: flex; justify-content: space-between; }
.metric-label { font-size: 14px; }
.metric-value { font-weight: 600; }

.company-card h4 { font-size: 16px; margin-bottom: 4px; }
.company-card .summary { font-size: 14px; margin: 8px 0; }
.company-card .contact { font-size: 14px; }

.muted { color: var(--text-dim); font-size: 14px; }
.no-data { color: var(--red); font-size: 14px; }
.kpi-error { color: var(--red); font-size: 14px; font-weight: 400; }

/* Status */
.status-badge { font-size: 14px; font-weight: 500; }

.success-message, .error-message {
    padding: 12px 16px;
    border-radius: 6px;
    margin-bottom: 16px;
    font-size: 14px;
}

.success-message { background: var(--success-bg); color: var(--green); }
.error-message { background: var(--error-bg); color: var(--red); }
.error-message.banner { font-weight: 500; }

/* Price table */
.price-table { width: 100%; border-collapse: collapse; font-size: 14px; }
.price-table th {
    text-align: left;
    padding: 10px 12px;
    color: var(--text-dim);
    font-weight: 500;
    text-transform: uppercase;
    font-size: 12px;
    border-bottom: 1px solid var(--border);
}
.price-table td { padding: 10px 12px; border-bottom: 1px solid var(--border); white-space: nowrap; }
.price-table tr:hover td { background: var(--bg); }
.price-high { color: var(--green); }
.price-low { color: var(--red); }
.price-close { font-weight: 600; }
.table-placeholder { text-align: center; color: var(--text-dim); }

@media (max-width: 768px) {
    .layout { flex-direction: column; }
    .sidebar { width: 100%; border-right: none; border-bottom: 1px solid var(--border); }
    .chart-grid { grid-template-columns: 1fr; }
}
";
