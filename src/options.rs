//! Shared configuration record handed to every sub-module constructor.
//!
//! `ProviderOptions` bundles the REST client, the chain, the cached contract
//! table, and whichever provider capabilities the host supplies. It is built
//! once and only read afterwards; clones share the same capability handles
//! and contract cache.

use std::sync::Arc;

use async_lock::OnceCell;

use crate::capability::{Capability, GetLogsCall, SignTypedData, StaticCall, TransactCall};
use crate::error::{ConstructionError, HttpError, SdkError};
use crate::http::{OrderApiHttp, RetryPolicy};
use crate::limit_orders::contracts::ContractAddresses;

/// REST access shared by the non-contract sub-modules.
#[derive(Clone)]
pub struct ApiContext {
    pub(crate) http: OrderApiHttp,
    pub(crate) chain_id: u64,
    pub(crate) contracts: Arc<OnceCell<ContractAddresses>>,
}

impl ApiContext {
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Contract table for the configured chain, fetched on first use.
    pub async fn contracts(&self) -> Result<ContractAddresses, HttpError> {
        let contracts = self
            .contracts
            .get_or_try_init(|| async {
                tracing::debug!(chain_id = self.chain_id, "Fetching contract addresses");
                self.http.get_contracts(self.chain_id).await
            })
            .await?;
        Ok(*contracts)
    }
}

/// Configuration plus capabilities, generic over the host's transaction
/// response type `T`.
pub struct ProviderOptions<T> {
    pub(crate) api: ApiContext,
    pub(crate) signer: Option<Arc<dyn SignTypedData>>,
    pub(crate) transactor: Option<Arc<dyn TransactCall<T>>>,
    pub(crate) static_caller: Option<Arc<dyn StaticCall>>,
    pub(crate) log_reader: Option<Arc<dyn GetLogsCall>>,
}

impl<T> ProviderOptions<T> {
    pub fn builder() -> ProviderOptionsBuilder<T> {
        ProviderOptionsBuilder::default()
    }

    pub fn api(&self) -> &ApiContext {
        &self.api
    }

    pub fn chain_id(&self) -> u64 {
        self.api.chain_id
    }

    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::SignTypedData => self.signer.is_some(),
            Capability::Transact => self.transactor.is_some(),
            Capability::StaticCall => self.static_caller.is_some(),
            Capability::GetLogs => self.log_reader.is_some(),
        }
    }

    pub(crate) fn require_signer(
        &self,
        module: &'static str,
    ) -> Result<Arc<dyn SignTypedData>, ConstructionError> {
        self.signer.clone().ok_or(ConstructionError {
            module,
            capability: Capability::SignTypedData,
        })
    }

    pub(crate) fn require_transactor(
        &self,
        module: &'static str,
    ) -> Result<Arc<dyn TransactCall<T>>, ConstructionError> {
        self.transactor.clone().ok_or(ConstructionError {
            module,
            capability: Capability::Transact,
        })
    }

    pub(crate) fn require_static_caller(
        &self,
        module: &'static str,
    ) -> Result<Arc<dyn StaticCall>, ConstructionError> {
        self.static_caller.clone().ok_or(ConstructionError {
            module,
            capability: Capability::StaticCall,
        })
    }

    pub(crate) fn require_log_reader(
        &self,
        module: &'static str,
    ) -> Result<Arc<dyn GetLogsCall>, ConstructionError> {
        self.log_reader.clone().ok_or(ConstructionError {
            module,
            capability: Capability::GetLogs,
        })
    }
}

impl<T> Clone for ProviderOptions<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            signer: self.signer.clone(),
            transactor: self.transactor.clone(),
            static_caller: self.static_caller.clone(),
            log_reader: self.log_reader.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct ProviderOptionsBuilder<T> {
    api_url: String,
    chain_id: u64,
    contracts: Option<ContractAddresses>,
    read_retry: RetryPolicy,
    http_client: Option<reqwest::Client>,
    signer: Option<Arc<dyn SignTypedData>>,
    transactor: Option<Arc<dyn TransactCall<T>>>,
    static_caller: Option<Arc<dyn StaticCall>>,
    log_reader: Option<Arc<dyn GetLogsCall>>,
}

impl<T> Default for ProviderOptionsBuilder<T> {
    fn default() -> Self {
        Self {
            api_url: crate::network::DEFAULT_API_URL.to_string(),
            chain_id: crate::network::MAINNET,
            contracts: None,
            read_retry: RetryPolicy::Idempotent,
            http_client: None,
            signer: None,
            transactor: None,
            static_caller: None,
            log_reader: None,
        }
    }
}

impl<T> ProviderOptionsBuilder<T> {
    pub fn api_url(mut self, url: &str) -> Self {
        self.api_url = url.to_string();
        self
    }

    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Skip the contract table fetch by supplying the addresses up front.
    pub fn contracts(mut self, contracts: ContractAddresses) -> Self {
        self.contracts = Some(contracts);
        self
    }

    /// Retry policy for `GET` endpoints. Defaults to [`RetryPolicy::Idempotent`].
    pub fn read_retry(mut self, policy: RetryPolicy) -> Self {
        self.read_retry = policy;
        self
    }

    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn signer(mut self, signer: Arc<dyn SignTypedData>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn transactor(mut self, transactor: Arc<dyn TransactCall<T>>) -> Self {
        self.transactor = Some(transactor);
        self
    }

    pub fn static_caller(mut self, static_caller: Arc<dyn StaticCall>) -> Self {
        self.static_caller = Some(static_caller);
        self
    }

    pub fn log_reader(mut self, log_reader: Arc<dyn GetLogsCall>) -> Self {
        self.log_reader = Some(log_reader);
        self
    }

    pub fn build(self) -> Result<ProviderOptions<T>, SdkError> {
        reqwest::Url::parse(&self.api_url)
            .map_err(|e| SdkError::Validation(format!("invalid api url {}: {}", self.api_url, e)))?;
        if self.chain_id == 0 {
            return Err(SdkError::Validation("chain id must be non-zero".to_string()));
        }

        let mut http = match self.http_client {
            Some(client) => OrderApiHttp::with_client(&self.api_url, client),
            None => OrderApiHttp::new(&self.api_url)?,
        };
        http.set_read_retry(self.read_retry);

        let contracts = match self.contracts {
            Some(c) => OnceCell::from(c),
            None => OnceCell::new(),
        };

        Ok(ProviderOptions {
            api: ApiContext {
                http,
                chain_id: self.chain_id,
                contracts: Arc::new(contracts),
            },
            signer: self.signer,
            transactor: self.transactor,
            static_caller: self.static_caller,
            log_reader: self.log_reader,
        })
    }
}
