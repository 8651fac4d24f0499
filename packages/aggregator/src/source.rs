//! Transaction Source
//!
//! Lists the attestation transactions sent to the feedback contract.
//! `ExplorerClient` talks to an Etherscan-compatible block explorer
//! (`module=account&action=txlist`), most recent first.

use std::time::Duration;

use alloy::primitives::{address, Address};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Default explorer API endpoint (LineaScan, Linea Sepolia)
pub const DEFAULT_API_URL: &str = "https://api-sepolia.lineascan.build/api";

/// Feedback contract the attestations are sent to
pub const DEFAULT_CONTRACT_ADDRESS: Address = address!("f494b93e9661333d0e7ca1b880b9aaf79cb84697");

/// Request timeout in milliseconds
pub const REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Explorer status value for a successful call
const STATUS_OK: &str = "1";

/// Errors that can occur while listing transactions
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("Explorer returned HTTP status {0}")]
    Status(u16),

    #[error("Explorer API error: {0}")]
    Api(String),

    #[error("Malformed explorer response: {0}")]
    Malformed(#[from] serde_json::Error),
}

// The request URL carries the API key; keep it out of the error text
impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Http(e.without_url())
    }
}

/// Transaction as listed by the explorer.
///
/// Only the fields the pipeline reads are kept; the rest of the record is
/// ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    pub hash: String,
    #[serde(deserialize_with = "u64_from_str_or_number")]
    pub block_number: u64,
    pub from: String,
    #[serde(deserialize_with = "u64_from_str_or_number")]
    pub time_stamp: u64,
    #[serde(default)]
    pub input: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StrOrNumber {
    Number(u64),
    Str(String),
}

/// Explorers encode integers as decimal strings; accept both forms
fn u64_from_str_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match StrOrNumber::deserialize(deserializer)? {
        StrOrNumber::Number(n) => Ok(n),
        StrOrNumber::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Explorer response envelope.
///
/// `result` is a transaction list on success and an error string otherwise,
/// so it stays untyped until `status` has been checked.
#[derive(Debug, Deserialize)]
pub struct ExplorerResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
    pub result: serde_json::Value,
}

impl ExplorerResponse {
    /// Turn the envelope into the transaction list
    pub fn into_transactions(self) -> Result<Vec<RawTransaction>, FetchError> {
        if self.status != STATUS_OK {
            let detail = match self.result {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            return Err(FetchError::Api(format!("{} ({})", self.message, detail)));
        }
        Ok(serde_json::from_value(self.result)?)
    }
}

/// Source of raw attestation transactions
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// List transactions, most recent first
    async fn fetch_transactions(&self) -> Result<Vec<RawTransaction>, FetchError>;
}

/// Configuration for the explorer client
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Explorer API endpoint
    pub api_url: String,
    /// Explorer API key
    pub api_key: String,
    /// Feedback contract address
    pub contract_address: Address,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            contract_address: DEFAULT_CONTRACT_ADDRESS,
            timeout_ms: REQUEST_TIMEOUT_MS,
        }
    }
}

impl ExplorerConfig {
    /// Create a new config with the specified API key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Query parameters for the `txlist` call
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("module", "account".to_string()),
            ("action", "txlist".to_string()),
            ("address", format!("{:#x}", self.contract_address)),
            ("startblock", "0".to_string()),
            ("endblock", "99999999".to_string()),
            ("sort", "desc".to_string()),
            ("apikey", self.api_key.clone()),
        ]
    }
}

/// Block explorer client listing the contract's transactions
pub struct ExplorerClient {
    client: Client,
    config: ExplorerConfig,
}

impl ExplorerClient {
    /// Create a new client
    pub fn new(config: ExplorerConfig) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, config })
    }

    /// Create with default configuration and the given API key
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, FetchError> {
        Self::new(ExplorerConfig::with_api_key(api_key))
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }
}

#[async_trait]
impl TransactionSource for ExplorerClient {
    async fn fetch_transactions(&self) -> Result<Vec<RawTransaction>, FetchError> {
        info!(
            "Fetching transactions for {:#x} from {}",
            self.config.contract_address, self.config.api_url
        );

        let response = self
            .client
            .get(&self.config.api_url)
            .query(&self.config.query_params())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let envelope: ExplorerResponse = serde_json::from_str(&body)?;
        let transactions = envelope.into_transactions()?;

        debug!("Explorer returned {} transactions", transactions.len());
        Ok(transactions)
    }
}
