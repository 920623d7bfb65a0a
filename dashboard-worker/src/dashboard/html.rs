//! Dashboard HTML templates
//!
//! Page bodies for both dashboards. `{{element-id}}` markers are replaced
//! with slot content by [`crate::view::PageView::fill`]; every marker sits
//! inside the element carrying the same id.
//!
//! - Sales overview: KPI tiles, error banner, three chart canvases
//! - Stock analysis: quick stats, company panels, price/volume charts,
//!   recent price table

pub const SALES_TEMPLATE: &str = r#"
        <h1 class="page-heading">Sales Overview</h1>
        <div id="dashboard-error">{{dashboard-error}}</div>

        <div class="grid kpi-grid">
            <div class="card">
                <span class="card-title">💰 Total Revenue</span>
                <div class="card-value" id="total-revenue">{{total-revenue}}</div>
            </div>
            <div class="card">
                <span class="card-title">👥 Total Customers</span>
                <div class="card-value" id="total-customers">{{total-customers}}</div>
            </div>
            <div class="card">
                <span class="card-title">✨ New Leads</span>
                <div class="card-value" id="new-leads">{{new-leads}}</div>
            </div>
        </div>

        <div class="card chart-card wide">
            <span class="card-title">📈 Monthly Revenue</span>
            <div class="chart-box"><canvas id="monthlyRevenueChart"></canvas></div>
        </div>

        <div class="grid chart-grid">
            <div class="card chart-card">
                <span class="card-title">🏆 Top Products</span>
                <div class="chart-box"><canvas id="topProductsChart"></canvas></div>
            </div>
            <div class="card chart-card">
                <span class="card-title">🧩 Revenue by Segment</span>
                <div class="chart-box"><canvas id="segmentRevenueChart"></canvas></div>
            </div>
        </div>
"#;

pub const STOCK_HOME_TEMPLATE: &str = r#"
            <div class="grid kpi-grid">
                <div class="card">
                    <span class="card-title">Market Cap</span>
                    <div class="card-value" id="market-cap-display">{{market-cap-display}}</div>
                </div>
                <div class="card">
                    <span class="card-title">Current Price</span>
                    <div class="card-value" id="current-price-display">{{current-price-display}}</div>
                </div>
                <div class="card">
                    <span class="card-title">P/E Ratio</span>
                    <div class="card-value" id="pe-ratio-display">{{pe-ratio-display}}</div>
                </div>
                <div class="card">
                    <span class="card-title">Volume</span>
                    <div class="card-value" id="volume-display">{{volume-display}}</div>
                </div>
            </div>

            <div class="grid panel-grid">
                <div class="card">
                    <span class="card-title">🏢 Company Info</span>
                    <div id="company-info">{{company-info}}</div>
                </div>
                <div class="card">
                    <span class="card-title">💵 Financial Metrics</span>
                    <div id="financial-metrics">{{financial-metrics}}</div>
                </div>
                <div class="card">
                    <span class="card-title">⚖️ Valuation</span>
                    <div id="valuation-metrics">{{valuation-metrics}}</div>
                </div>
                <div class="card">
                    <span class="card-title">🌱 Growth</span>
                    <div id="growth-metrics">{{growth-metrics}}</div>
                </div>
                <div class="card">
                    <span class="card-title">💧 Profitability &amp; Liquidity</span>
                    <div id="profitability-liquidity">{{profitability-liquidity}}</div>
                </div>
            </div>

            <div class="grid chart-grid">
                <div class="card chart-card">
                    <span class="card-title">📈 Price History</span>
                    <div class="chart-box"><canvas id="price-chart"></canvas></div>
                </div>
                <div class="card chart-card">
                    <span class="card-title">📊 Volume</span>
                    <div class="chart-box"><canvas id="volume-chart"></canvas></div>
                </div>
            </div>

            <div class="card">
                <span class="card-title">🗓️ Recent Prices</span>
                <table class="price-table">
                    <thead>
                        <tr><th>Date</th><th>Open</th><th>High</th><th>Low</th><th>Close</th><th>Volume</th></tr>
                    </thead>
                    <tbody id="price-table-body">{{price-table-body}}</tbody>
                </table>
            </div>
"#;

/// Body of every section except home
pub const STOCK_SECTION_PLACEHOLDER: &str = r#"
            <div class="card">
                <p class="muted">Select a ticker on the home dashboard to load company data.</p>
            </div>
"#;

/// Stock page heading, connection badge and status line
pub const STOCK_STATUS_TEMPLATE: &str = r#"
            <div class="page-header">
                <h1 class="page-heading" id="page-title">{{page-title}}</h1>
                <span class="status-badge" id="api-status">{{api-status}}</span>
            </div>
            <div id="connection-status">{{connection-status}}</div>
"#;
