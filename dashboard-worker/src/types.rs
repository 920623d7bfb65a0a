//! Backend payload types
//!
//! Field names match the backend JSON. Every numeric metric is optional:
//! the backend sends `null` or omits fields freely.

use serde::{Deserialize, Serialize};

/// Headline sales KPIs from `/kpi`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KpiSummary {
    pub total_revenue: Option<f64>,
    pub total_customers: Option<f64>,
    pub new_leads: Option<f64>,
}

/// One month of revenue from `/monthly-revenue`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyRevenue {
    /// `YYYY-MM`
    pub date: String,
    pub revenue: Option<f64>,
}

/// A named revenue bucket (`/top-products`, `/segment-revenue`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedRevenue {
    pub name: String,
    pub revenue: Option<f64>,
}

/// Chart data backing the sales overview
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesChartData {
    pub monthly_revenue: Vec<MonthlyRevenue>,
    pub top_products: Vec<NamedRevenue>,
    pub segment_revenue: Vec<NamedRevenue>,
}

/// Company profile block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    pub ticker: Option<String>,
    pub longname: Option<String>,
    pub sector: Option<String>,
    pub longbusinesssummary: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinanceMetrics {
    pub marketcap: Option<f64>,
    pub totalrevenue: Option<f64>,
    pub netincometocommon: Option<f64>,
    pub trailingeps: Option<f64>,
    pub profitmargins: Option<f64>,
    pub freecashflow: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationMetrics {
    pub trailingpe: Option<f64>,
    pub forwardpe: Option<f64>,
    pub pegratio: Option<f64>,
    pub pricetobook: Option<f64>,
    pub pricetosalestrailing12months: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthMetrics {
    pub revenuegrowth: Option<f64>,
    pub earningsgrowth: Option<f64>,
    pub earningsquarterlygrowth: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfitabilityMetrics {
    pub returnonequity: Option<f64>,
    pub returnonassets: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiquidityMetrics {
    pub currentratio: Option<f64>,
    pub totalcash: Option<f64>,
    pub totaldebt: Option<f64>,
    pub debttoequity: Option<f64>,
}

/// Response of `/company/{ticker}`; any block may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyData {
    pub info: Option<CompanyInfo>,
    pub finance: Option<FinanceMetrics>,
    pub valuation: Option<ValuationMetrics>,
    pub growth: Option<GrowthMetrics>,
    pub profitabilities: Option<ProfitabilityMetrics>,
    pub liquidity: Option<LiquidityMetrics>,
}

/// One OHLCV bar from `/stock-prices/{ticker}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceRecord {
    #[serde(alias = "timestamp", alias = "date")]
    pub datetime: String,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}
