//! Metrics backend API client
//!
//! Single best-effort GET per call: no retries, no timeout, no cancellation.
//! Every failure comes back as an [`ApiError`]; HTTP errors keep their
//! status and the server's `{"error": ...}` message when the body has one.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::logging::{log_debug, log_warn};

/// Backend endpoint paths
pub mod paths {
    pub const KPI: &str = "/kpi";
    pub const MONTHLY_REVENUE: &str = "/monthly-revenue";
    pub const TOP_PRODUCTS: &str = "/top-products";
    pub const SEGMENT_REVENUE: &str = "/segment-revenue";
    pub const HEALTH: &str = "/health";

    pub fn company(ticker: &str) -> String {
        format!("/company/{}", urlencoding::encode(ticker))
    }

    pub fn stock_prices(ticker: &str, limit: u32, timeframe: &str) -> String {
        format!(
            "/stock-prices/{}?limit={limit}&timeframe={}",
            urlencoding::encode(ticker),
            urlencoding::encode(timeframe)
        )
    }
}

/// Anything that can answer a JSON GET by path.
///
/// The worker uses [`ApiClient`]; tests substitute an in-memory source.
#[allow(async_fn_in_trait)]
pub trait JsonSource {
    /// Fetch the raw JSON body at `path`
    async fn get_json(&self, path: &str) -> Result<Value, ApiError>;

    /// GET `path` and check only for a success status; the body is ignored
    async fn check_ok(&self, path: &str) -> Result<(), ApiError>;

    /// Fetch and decode into `T`; a shape mismatch counts as a parse failure
    async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let value = self.get_json(path).await?;
        serde_json::from_value(value).map_err(|e| {
            log_warn!("GET {path}: unexpected response shape: {e}");
            ApiError::transport()
        })
    }
}

/// Error body shape the backend uses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Pull the server-provided message out of an error body, if any
fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
}

/// HTTP client bound to one backend base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    async fn send(&self, path: &str) -> Result<reqwest::Response, ApiError> {
        let url = self.url(path);
        log_debug!("GET {url}");

        self.http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                log_warn!("GET {url}: transport failure: {e}");
                ApiError::transport()
            })
    }

    /// Pass 2xx responses through; anything else becomes an [`ApiError`]
    async fn check_status(path: &str, response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ApiError::from_status(status.as_u16(), server_message(&body).as_deref());
            log_warn!("GET {path}: {err}");
            return Err(err);
        }
        Ok(response)
    }
}

impl JsonSource for ApiClient {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let response = Self::check_status(path, self.send(path).await?).await?;

        response.json::<Value>().await.map_err(|e| {
            log_warn!("GET {path}: body is not JSON: {e}");
            ApiError::transport()
        })
    }

    async fn check_ok(&self, path: &str) -> Result<(), ApiError> {
        Self::check_status(path, self.send(path).await?).await.map(|_| ())
    }
}

/// In-memory [`JsonSource`] for tests
#[cfg(test)]
pub(crate) mod stub {
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};

    use serde_json::Value;

    use super::JsonSource;
    use crate::error::ApiError;

    /// Canned responses keyed by path; unknown paths fail like a dead network
    #[derive(Default)]
    pub(crate) struct StubSource {
        responses: HashMap<String, Result<Value, ApiError>>,
        /// Paths answering 200 with a body that is not JSON
        non_json: HashSet<String>,
        calls: RefCell<Vec<String>>,
    }

    impl StubSource {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn ok(mut self, path: impl Into<String>, body: Value) -> Self {
            self.responses.insert(path.into(), Ok(body));
            self
        }

        pub(crate) fn fail(mut self, path: impl Into<String>, err: ApiError) -> Self {
            self.responses.insert(path.into(), Err(err));
            self
        }

        pub(crate) fn non_json(mut self, path: impl Into<String>) -> Self {
            self.non_json.insert(path.into());
            self
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl JsonSource for StubSource {
        async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
            self.calls.borrow_mut().push(path.to_string());
            if self.non_json.contains(path) {
                return Err(ApiError::transport());
            }
            self.responses
                .get(path)
                .cloned()
                .unwrap_or_else(|| Err(ApiError::transport()))
        }

        async fn check_ok(&self, path: &str) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(path.to_string());
            if self.non_json.contains(path) {
                return Ok(());
            }
            match self.responses.get(path) {
                Some(Ok(_)) => Ok(()),
                Some(Err(e)) => Err(e.clone()),
                None => Err(ApiError::transport()),
            }
        }
    }
}
