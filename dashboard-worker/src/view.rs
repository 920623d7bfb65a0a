//! View bindings
//!
//! Every DOM target a renderer may write is a [`Slot`], resolved once when
//! the page template is built. Renderers write through the [`View`] trait,
//! so sections can be exercised without a browser.

use std::collections::BTreeMap;

use crate::format::escape_html;

/// A fixed DOM target on one of the dashboards
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    // Sales overview
    TotalRevenue,
    TotalCustomers,
    NewLeads,
    DashboardError,

    // Stock analysis
    ApiStatus,
    ConnectionStatus,
    PageTitle,
    MarketCap,
    CurrentPrice,
    PeRatio,
    Volume,
    CompanyInfo,
    FinancialMetrics,
    ValuationMetrics,
    GrowthMetrics,
    ProfitabilityLiquidity,
    PriceTableBody,
}

impl Slot {
    pub const ALL: [Slot; 17] = [
        Slot::TotalRevenue,
        Slot::TotalCustomers,
        Slot::NewLeads,
        Slot::DashboardError,
        Slot::ApiStatus,
        Slot::ConnectionStatus,
        Slot::PageTitle,
        Slot::MarketCap,
        Slot::CurrentPrice,
        Slot::PeRatio,
        Slot::Volume,
        Slot::CompanyInfo,
        Slot::FinancialMetrics,
        Slot::ValuationMetrics,
        Slot::GrowthMetrics,
        Slot::ProfitabilityLiquidity,
        Slot::PriceTableBody,
    ];

    /// DOM id of the target element
    pub fn element_id(self) -> &'static str {
        match self {
            Slot::TotalRevenue => "total-revenue",
            Slot::TotalCustomers => "total-customers",
            Slot::NewLeads => "new-leads",
            Slot::DashboardError => "dashboard-error",
            Slot::ApiStatus => "api-status",
            Slot::ConnectionStatus => "connection-status",
            Slot::PageTitle => "page-title",
            Slot::MarketCap => "market-cap-display",
            Slot::CurrentPrice => "current-price-display",
            Slot::PeRatio => "pe-ratio-display",
            Slot::Volume => "volume-display",
            Slot::CompanyInfo => "company-info",
            Slot::FinancialMetrics => "financial-metrics",
            Slot::ValuationMetrics => "valuation-metrics",
            Slot::GrowthMetrics => "growth-metrics",
            Slot::ProfitabilityLiquidity => "profitability-liquidity",
            Slot::PriceTableBody => "price-table-body",
        }
    }

    /// Content shown before any renderer has written the slot
    pub fn initial_html(self) -> &'static str {
        match self {
            Slot::TotalRevenue
            | Slot::TotalCustomers
            | Slot::NewLeads
            | Slot::MarketCap
            | Slot::CurrentPrice
            | Slot::PeRatio
            | Slot::Volume => "--",
            Slot::ApiStatus => "⚪ Checking...",
            Slot::PageTitle => "Home Dashboard",
            Slot::CompanyInfo
            | Slot::FinancialMetrics
            | Slot::ValuationMetrics
            | Slot::GrowthMetrics
            | Slot::ProfitabilityLiquidity => r#"<p class="muted">Loading...</p>"#,
            Slot::PriceTableBody => r#"<tr><td colspan="6" class="table-placeholder">Loading...</td></tr>"#,
            Slot::DashboardError | Slot::ConnectionStatus => "",
        }
    }

    pub fn from_element_id(id: &str) -> Option<Slot> {
        Slot::ALL.into_iter().find(|slot| slot.element_id() == id)
    }
}

/// Write access to the page's slots
pub trait View {
    /// Replace the slot's markup
    fn set_html(&mut self, slot: Slot, html: String);

    /// Replace the slot's content with escaped text
    fn set_text(&mut self, slot: Slot, text: &str) {
        self.set_html(slot, escape_html(text));
    }

    fn clear(&mut self, slot: Slot) {
        self.set_html(slot, String::new());
    }
}

/// In-memory view later substituted into the page template
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageView {
    slots: BTreeMap<Slot, String>,
}

impl PageView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current markup, `None` if never written
    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }

    /// Markup to serve: written content or the slot's initial content
    pub fn html(&self, slot: Slot) -> &str {
        self.get(slot).unwrap_or_else(|| slot.initial_html())
    }

    /// Replace every `{{element-id}}` marker in `template` in one pass.
    /// Inserted content is never rescanned; unknown markers are kept.
    pub fn fill(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let slot = after
                .find("}}")
                .and_then(|end| Slot::from_element_id(&after[..end]).map(|slot| (slot, end)));
            match slot {
                Some((slot, end)) => {
                    out.push_str(self.html(slot));
                    rest = &after[end + 2..];
                }
                None => {
                    out.push_str("{{");
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

impl View for PageView {
    fn set_html(&mut self, slot: Slot, html: String) {
        self.slots.insert(slot, html);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_ids_are_unique() {
        let mut ids: Vec<_> = Slot::ALL.iter().map(|s| s.element_id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), Slot::ALL.len());
    }

    #[test]
    fn test_set_text_escapes() {
        let mut view = PageView::new();
        view.set_text(Slot::PageTitle, "<script>");
        assert_eq!(view.get(Slot::PageTitle), Some("&lt;script&gt;"));
    }

    #[test]
    fn test_fill_uses_written_or_initial_content() {
        let mut view = PageView::new();
        view.set_html(Slot::TotalRevenue, "Rp\u{a0}10".to_string());
        let page = view.fill(r#"<p id="total-revenue">{{total-revenue}}</p><p>{{new-leads}}</p>"#);
        assert_eq!(page, "<p id=\"total-revenue\">Rp\u{a0}10</p><p>--</p>");
    }

    #[test]
    fn test_fill_does_not_rescan_inserted_content() {
        let mut view = PageView::new();
        view.set_html(Slot::CompanyInfo, "{{new-leads}}".to_string());
        let page = view.fill("{{company-info}}|{{unknown}}");
        assert_eq!(page, "{{new-leads}}|{{unknown}}");
    }

    #[test]
    fn test_clear() {
        let mut view = PageView::new();
        view.set_html(Slot::ConnectionStatus, "x".to_string());
        view.clear(Slot::ConnectionStatus);
        assert_eq!(view.get(Slot::ConnectionStatus), Some(""));
    }
}
