//! Low-level HTTP client: `OrderApiHttp`.
//!
//! One method per API endpoint. Returns wire types; the limit order sub-modules
//! wrap these and map failures onto the step that issued them.

use crate::error::HttpError;
use crate::http::retry::{RetryConfig, RetryPolicy};
use crate::limit_orders::contracts::ContractAddresses;
use crate::limit_orders::transaction::{BuildLimitOrderTxInput, TransactionParams};
use crate::limit_orders::wire::{OrderResponse, OrdersResponse};
use crate::limit_orders::LimitOrderToSend;
use crate::shared::{Address, OrderKind, UserRole, B256};

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing;

/// Low-level HTTP client for the limit order REST API.
pub struct OrderApiHttp {
    base_url: String,
    client: Client,
    /// Retry policy applied to idempotent reads.
    read_retry: RetryPolicy,
}

impl OrderApiHttp {
    pub fn new(base_url: &str) -> Result<Self, HttpError> {
        let builder = Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10);

        Ok(Self::with_client(base_url, builder.build()?))
    }

    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            read_retry: RetryPolicy::Idempotent,
        }
    }

    pub(crate) fn set_read_retry(&mut self, policy: RetryPolicy) {
        self.read_retry = policy;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Contracts ────────────────────────────────────────────────────────

    pub async fn get_contracts(&self, chain_id: u64) -> Result<ContractAddresses, HttpError> {
        let url = format!("{}/adapters/contracts?network={}", self.base_url, chain_id);
        self.get(&url).await
    }

    // ── Orders ───────────────────────────────────────────────────────────

    /// Submit a signed order. Never retried.
    pub async fn post_order(
        &self,
        chain_id: u64,
        order: &LimitOrderToSend,
    ) -> Result<OrderResponse, HttpError> {
        let url = format!("{}/ft/orders/{}/", self.base_url, chain_id);
        self.post(&url, order, RetryPolicy::None).await
    }

    pub async fn get_orders(
        &self,
        chain_id: u64,
        role: UserRole,
        user: Address,
        kind: OrderKind,
    ) -> Result<OrdersResponse, HttpError> {
        let url = format!(
            "{}/ft/orders/{}/{}/{}?type={}",
            self.base_url,
            chain_id,
            role.as_str(),
            urlencoding::encode(&user.to_string()),
            kind.as_str()
        );
        self.get(&url).await
    }

    pub async fn get_order_by_hash(
        &self,
        chain_id: u64,
        order_hash: B256,
    ) -> Result<OrderResponse, HttpError> {
        let url = format!("{}/ft/order/{}/{}", self.base_url, chain_id, order_hash);
        self.get(&url).await
    }

    // ── Transactions ─────────────────────────────────────────────────────

    pub async fn build_transaction(
        &self,
        chain_id: u64,
        body: &BuildLimitOrderTxInput,
    ) -> Result<TransactionParams, HttpError> {
        let url = format!("{}/transactions/{}", self.base_url, chain_id);
        self.post(&url, body, RetryPolicy::None).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::GET, url, None::<&()>, &self.read_retry)
            .await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::POST, url, Some(body), &retry)
            .await
    }

    async fn request_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
        retry: &RetryPolicy,
    ) -> Result<T, HttpError> {
        let config = match retry {
            RetryPolicy::None => {
                return self.do_request(&method, url, body).await;
            }
            RetryPolicy::Idempotent => RetryConfig::idempotent(),
            RetryPolicy::Custom(c) => c.clone(),
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            let e = match self.do_request::<T, B>(&method, url, body).await {
                Ok(resp) => return Ok(resp),
                Err(e) => e,
            };

            let retryable = match &e {
                HttpError::ServerError { status, .. } => {
                    config.retryable_statuses.contains(status).then_some(None)
                }
                HttpError::RateLimited { retry_after_ms } => Some(*retry_after_ms),
                HttpError::Reqwest(re) => (re.is_connect() || re.is_timeout()).then_some(None),
                _ => None,
            };
            let Some(retry_after) = retryable else {
                return Err(e);
            };

            if attempt < config.max_retries {
                let delay = match retry_after {
                    Some(ms) => Duration::from_millis(ms).min(config.max_delay),
                    None => config.delay_for_attempt(attempt),
                };
                tracing::debug!(
                    attempt = attempt + 1,
                    max = config.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    "Retrying request to {}",
                    url
                );
                futures_timer::Delay::new(delay).await;
            }
            last_error = Some(e);
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, HttpError> {
        let mut req = self.client.request(method.clone(), url);
        if let Some(b) = body {
            req = req.json(b);
        }

        tracing::debug!(%method, url, "Sending request");
        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<T>().await?;
            return Ok(parsed);
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .map(|secs| secs.saturating_mul(1000));
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            401 => Err(HttpError::Unauthorized),
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

impl Clone for OrderApiHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            read_retry: self.read_retry.clone(),
        }
    }
}
