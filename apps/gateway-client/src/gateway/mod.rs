//! HTTP client for the ledger API gateway.
//!
//! Submission runs the memo-required policy scan first, ships the signed
//! envelope as a form POST, and decodes the binary result into offer
//! outcomes when one comes back. Retries are deliberately absent: a failed
//! submission surfaces as-is and retry policy stays with the caller.

mod api_types;

pub use api_types::{
    AsyncSubmitResponse, FeeStatsResponse, SubmitTransactionResponse, Timebounds,
};

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, DATE};
use reqwest::{Client, StatusCode};
use url::Url;

use crate::account::{AccountLookup, AccountRecord, LookupError};
use crate::policy::{self, PolicyError};
use crate::result::{self, DecodeError};
use crate::transaction::TransactionEnvelope;

/// Default timeout for synchronous transaction submission.
pub const SUBMIT_TRANSACTION_TIMEOUT: Duration = Duration::from_secs(60);

/// Base fee assumed when the gateway does not report a usable one.
const FALLBACK_BASE_FEE: u32 = 100;

/// Connection options for [`GatewayClient`].
#[derive(Debug, Clone, Default)]
pub struct GatewayOptions {
    /// Allow plain-HTTP gateways. Must stay off in production deployments.
    pub allow_http: bool,
    /// Value for the `X-App-Name` header.
    pub app_name: Option<String>,
    /// Value for the `X-App-Version` header.
    pub app_version: Option<String>,
    /// Value for the `X-Auth-Token` header.
    pub auth_token: Option<String>,
}

/// Per-submission options.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmitOptions {
    /// Skip the memo-required policy scan.
    pub skip_memo_required_check: bool,
}

/// Failure talking to the gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Refused to connect to a plain-HTTP gateway.
    #[error("cannot connect to insecure gateway over http")]
    InsecureUrl,

    /// The gateway URL did not parse.
    #[error("invalid gateway URL: {0}")]
    InvalidUrl(String),

    /// A client option could not be applied.
    #[error("invalid client option: {0}")]
    InvalidOption(String),

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// The gateway answered with a non-success status.
    #[error("transaction submission failed, gateway responded {status}: {body}")]
    BadResponse {
        /// HTTP status code.
        status: u16,
        /// Response body as received.
        body: String,
    },

    /// The gateway's JSON reply did not parse.
    #[error("invalid JSON from gateway: {0}")]
    JsonParse(String),

    /// The submission was blocked by a pre-submission policy check.
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// The binary result attached to the reply did not decode.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Client for one gateway instance.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    base_url: Url,
    client: Client,
}

impl GatewayClient {
    /// Create a client for the gateway at `server_url`.
    ///
    /// Non-HTTPS URLs are rejected unless [`GatewayOptions::allow_http`] is
    /// set.
    pub fn new(server_url: &str, options: &GatewayOptions) -> Result<Self, GatewayError> {
        let base_url =
            Url::parse(server_url).map_err(|e| GatewayError::InvalidUrl(e.to_string()))?;
        if base_url.scheme() != "https" && !options.allow_http {
            return Err(GatewayError::InsecureUrl);
        }

        let mut headers = HeaderMap::new();
        put_header(&mut headers, "x-app-name", options.app_name.as_deref())?;
        put_header(&mut headers, "x-app-version", options.app_version.as_deref())?;
        put_header(&mut headers, "x-auth-token", options.auth_token.as_deref())?;

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    /// Submit a transaction and wait for it to be recorded.
    ///
    /// Runs the memo-required check first unless
    /// [`SubmitOptions::skip_memo_required_check`] is set. When the reply
    /// carries a binary result, it is decoded and
    /// [`SubmitTransactionResponse::offer_results`] is populated.
    pub async fn submit_transaction(
        &self,
        envelope: &TransactionEnvelope,
        options: SubmitOptions,
    ) -> Result<SubmitTransactionResponse, GatewayError> {
        if !options.skip_memo_required_check {
            policy::check_memo_required(self, envelope).await?;
        }

        let encoded = BASE64.encode(envelope.envelope_xdr());
        let url = self.endpoint(&["transactions"])?;
        tracing::info!(url = %url, "submitting transaction");

        let response = self
            .client
            .post(url)
            .timeout(SUBMIT_TRANSACTION_TIMEOUT)
            .form(&[("tx", encoded.as_str())])
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        if !status.is_success() {
            return Err(GatewayError::BadResponse {
                status: status.as_u16(),
                body,
            });
        }

        let mut parsed: SubmitTransactionResponse =
            serde_json::from_str(&body).map_err(|e| GatewayError::JsonParse(e.to_string()))?;

        if let Some(result_xdr) = parsed.result_xdr.as_deref() {
            let (_, outcomes) = result::decode_result_base64(result_xdr)?;
            tracing::debug!(
                offer_results = outcomes.as_ref().map_or(0, Vec::len),
                "decoded submission result"
            );
            parsed.offer_results = outcomes;
        }
        Ok(parsed)
    }

    /// Submit a transaction without waiting for it to be recorded.
    ///
    /// The gateway relays the network's immediate response, which is passed
    /// through opaquely — the memo-required check still applies.
    pub async fn submit_async_transaction(
        &self,
        envelope: &TransactionEnvelope,
        options: SubmitOptions,
    ) -> Result<AsyncSubmitResponse, GatewayError> {
        if !options.skip_memo_required_check {
            policy::check_memo_required(self, envelope).await?;
        }

        let encoded = BASE64.encode(envelope.envelope_xdr());
        let url = self.endpoint(&["transactions_async"])?;
        tracing::info!(url = %url, "submitting transaction (async relay)");

        let response = self
            .client
            .post(url)
            .form(&[("tx", encoded.as_str())])
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        if !status.is_success() {
            return Err(GatewayError::BadResponse {
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(|e| GatewayError::JsonParse(e.to_string()))
    }

    /// Fetch the current state of an account.
    pub async fn load_account(&self, account_id: &str) -> Result<AccountRecord, LookupError> {
        let url = self
            .endpoint(&["accounts", account_id])
            .map_err(|e| LookupError::Transport {
                message: e.to_string(),
            })?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::Transport {
                message: e.to_string(),
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound);
        }
        if !response.status().is_success() {
            return Err(LookupError::UnexpectedResponse {
                message: format!("gateway responded {}", response.status()),
            });
        }
        response
            .json::<AccountRecord>()
            .await
            .map_err(|e| LookupError::UnexpectedResponse {
                message: e.to_string(),
            })
    }

    /// Fetch the fee-stats resource.
    pub async fn fee_stats(&self) -> Result<FeeStatsResponse, GatewayError> {
        let url = self.endpoint(&["fee_stats"])?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        if !status.is_success() {
            return Err(GatewayError::BadResponse {
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(|e| GatewayError::JsonParse(e.to_string()))
    }

    /// Fetch the network base fee, falling back to the protocol minimum when
    /// the gateway does not report a usable value.
    pub async fn fetch_base_fee(&self) -> Result<u32, GatewayError> {
        let stats = self.fee_stats().await?;
        let base_fee = match stats
            .last_ledger_base_fee
            .as_deref()
            .and_then(|v| v.parse::<u32>().ok())
        {
            Some(fee) if fee > 0 => fee,
            _ => FALLBACK_BASE_FEE,
        };
        Ok(base_fee)
    }

    /// Compute a validity window of `seconds` from now, using the gateway's
    /// clock when possible.
    ///
    /// The local clock can drift from the gateway's, so the window is
    /// derived from the gateway's `Date` response header. On failure the
    /// probe is retried exactly once, then the local clock is used.
    pub async fn fetch_timebounds(&self, seconds: u64) -> Result<Timebounds, GatewayError> {
        for attempt in 0..2 {
            if let Some(server_time) = self.probe_server_time().await {
                return Ok(Timebounds {
                    min_time: 0,
                    max_time: server_time + seconds,
                });
            }
            tracing::debug!(attempt, "gateway clock probe failed");
        }
        let local = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0);
        Ok(Timebounds {
            min_time: 0,
            max_time: local + seconds,
        })
    }

    /// Read the gateway's clock from the `Date` header of the service root.
    async fn probe_server_time(&self) -> Option<u64> {
        let response = self.client.get(self.base_url.clone()).send().await.ok()?;
        let date = response.headers().get(DATE)?.to_str().ok()?;
        let parsed = chrono::DateTime::parse_from_rfc2822(date).ok()?;
        u64::try_from(parsed.timestamp()).ok()
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| GatewayError::InvalidUrl("gateway URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl AccountLookup for GatewayClient {
    async fn load_account(&self, account_id: &str) -> Result<AccountRecord, LookupError> {
        GatewayClient::load_account(self, account_id).await
    }
}

fn put_header(
    headers: &mut HeaderMap,
    name: &'static str,
    value: Option<&str>,
) -> Result<(), GatewayError> {
    if let Some(value) = value {
        let value = HeaderValue::from_str(value)
            .map_err(|e| GatewayError::InvalidOption(format!("{name}: {e}")))?;
        headers.insert(HeaderName::from_static(name), value);
    }
    Ok(())
}
