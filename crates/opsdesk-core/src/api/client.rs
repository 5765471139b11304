//! HTTP client boundary for the opsdesk backend.
//!
//! Every request leaves through `ApiClient`. It attaches the bearer token
//! found in the token store at request time, and it owns the one global
//! reaction to an expired session: any 401 clears the stored token and
//! sends the router to sign-in, whichever endpoint produced it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::{AuthApi, SessionRevoker, TokenStore};
use crate::models::{
    AuthResponse, Customer, Department, Employee, FinanceRecord, Invoice, Lead, Product,
    Quotation, SignInRequest, SignUpRequest,
};
use crate::router::Navigator;

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of retries for rate-limited (429) list requests.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 1000;

const SIGNIN_PATH: &str = "/api/auth/signin";
const SIGNUP_PATH: &str = "/api/auth/signup";
const REFRESH_PATH: &str = "/api/auth/refresh";

pub const CUSTOMERS_PATH: &str = "/api/customers";
pub const LEADS_PATH: &str = "/api/leads";
pub const PRODUCTS_PATH: &str = "/api/products";
pub const EMPLOYEES_PATH: &str = "/api/employees";
pub const DEPARTMENTS_PATH: &str = "/api/departments";
pub const FINANCE_PATH: &str = "/api/finance";
pub const QUOTATIONS_PATH: &str = "/api/quotations";
pub const INVOICES_PATH: &str = "/api/invoices";

/// API client for the opsdesk backend.
/// Clone is cheap - reqwest::Client and the shared handles are all Arc.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Arc<str>,
    tokens: Arc<dyn TokenStore>,
    navigator: Navigator,
    revoker: Option<Arc<dyn SessionRevoker>>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        tokens: Arc<dyn TokenStore>,
        navigator: Navigator,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            tokens,
            navigator,
            revoker: None,
        })
    }

    /// Also reset the in-memory session when the backend answers 401.
    pub fn with_revoker(mut self, revoker: Arc<dyn SessionRevoker>) -> Self {
        self.revoker = Some(revoker);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Headers carrying the token currently in the store, if any.
    fn auth_headers(&self) -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        let token = match self.tokens.get() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to read stored token, sending request without it");
                None
            }
        };
        if let Some(token) = token {
            match header::HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(header::AUTHORIZATION, value);
                }
                Err(_) => warn!("Stored token is not a valid header value, ignoring it"),
            }
        }
        headers
    }

    /// The session is over: drop the credential and go to sign-in.
    fn handle_unauthorized(&self) {
        warn!("Backend rejected credentials, clearing session");
        if let Err(e) = self.tokens.clear() {
            warn!(error = %e, "Failed to clear stored token");
        }
        if let Some(ref revoker) = self.revoker {
            revoker.revoke();
        }
        self.navigator.redirect_to_login();
    }

    /// Turn a non-success status into an error, applying the 401 policy.
    pub(crate) fn reject(&self, status: StatusCode, body: &str) -> ApiError {
        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
        }
        ApiError::from_status(status, body)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(&self, response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(self.reject(status, &body))
        }
    }

    async fn get_text(&self, path: &str) -> Result<String, ApiError> {
        let url = self.url(path);
        let mut retries = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            let response = self
                .client
                .get(&url)
                .headers(self.auth_headers())
                .send()
                .await?;

            if response.status() == StatusCode::TOO_MANY_REQUESTS {
                retries += 1;
                if retries > MAX_RATE_LIMIT_RETRIES {
                    return Err(ApiError::RateLimited);
                }
                warn!(url = %url, retry = retries, backoff_ms, "Rate limited, backing off");
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                backoff_ms *= 2;
                continue;
            }

            let response = self.check_response(response).await?;
            return Ok(response.text().await?);
        }
    }

    /// One authentication exchange. Never retried.
    async fn exchange<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<AuthResponse, ApiError> {
        let mut request = self.client.post(self.url(path)).headers(self.auth_headers());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let response = self.check_response(response).await?;
        let text = response.text().await?;
        debug!(path, "Authentication response received");

        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse auth response: {}", e)))
    }

    /// Parse a list body: either a bare array or `{"data": [...]}`.
    fn parse_list<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, ApiError> {
        if let Ok(items) = serde_json::from_str::<Vec<T>>(text) {
            return Ok(items);
        }

        #[derive(Deserialize)]
        struct Wrapper<T> {
            #[serde(alias = "items", alias = "results")]
            data: Vec<T>,
        }

        serde_json::from_str::<Wrapper<T>>(text)
            .map(|wrapper| wrapper.data)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse list: {}", e)))
    }

    /// Fetch any list endpoint.
    pub async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let text = self.get_text(path).await?;
        let items = Self::parse_list(&text)?;
        debug!(path, count = items.len(), "List fetched");
        Ok(items)
    }

    // ===== Domain lists =====

    pub async fn fetch_customers(&self) -> Result<Vec<Customer>, ApiError> {
        self.list(CUSTOMERS_PATH).await
    }

    pub async fn fetch_leads(&self) -> Result<Vec<Lead>, ApiError> {
        self.list(LEADS_PATH).await
    }

    pub async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        self.list(PRODUCTS_PATH).await
    }

    pub async fn fetch_employees(&self) -> Result<Vec<Employee>, ApiError> {
        self.list(EMPLOYEES_PATH).await
    }

    pub async fn fetch_departments(&self) -> Result<Vec<Department>, ApiError> {
        self.list(DEPARTMENTS_PATH).await
    }

    pub async fn fetch_finance_records(&self) -> Result<Vec<FinanceRecord>, ApiError> {
        self.list(FINANCE_PATH).await
    }

    pub async fn fetch_quotations(&self) -> Result<Vec<Quotation>, ApiError> {
        self.list(QUOTATIONS_PATH).await
    }

    pub async fn fetch_invoices(&self) -> Result<Vec<Invoice>, ApiError> {
        self.list(INVOICES_PATH).await
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = SignInRequest { email, password };
        self.exchange(SIGNIN_PATH, Some(&body)).await
    }

    async fn sign_up(&self, email: &str, password: &str, name: &str) -> Result<AuthResponse, ApiError> {
        let body = SignUpRequest { email, password, name };
        self.exchange(SIGNUP_PATH, Some(&body)).await
    }

    async fn refresh(&self) -> Result<AuthResponse, ApiError> {
        self.exchange::<()>(REFRESH_PATH, None).await
    }
}
