//! Moralis Web3 Data API gateway.
//!
//! Two calls, both scoped to one chain:
//! - GET  `{base}/{address}/{nft|history}` → paginated envelope,
//! - POST `{base}/nft/getMultipleNFTs?chain=…` → bare array.
//!
//! No retries. A request that is in flight when the cancellation token
//! fires is dropped and reported as `Cancelled`.

use std::future::Future;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lens_common::constants::API_KEY_HEADER;
use lens_common::error::{LensError, LensResult};
use lens_common::raw::{RawEnvelope, RawRecord};
use lens_common::traits::IndexerGateway;
use lens_common::types::{BatchOptions, QueryFilter, TokenLookupKey, WalletResource};
use lens_core::params::{self, ParameterSet};
use lens_types::config::AppConfig;
use reqwest::StatusCode;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const OP_WALLET: &str = "fetch_by_wallet";
const OP_TOKENS: &str = "fetch_by_tokens";

// ── Settings ────────────────────────────────────────────────────────

/// Everything the client needs to talk to the API.
#[derive(Debug, Clone)]
pub struct MoralisSettings {
    pub base_url: String,
    pub api_key: String,
    pub chain: String,
    pub nft_path: String,
    pub history_path: String,
    pub batch_path: String,
    pub timeout: Duration,
}

impl MoralisSettings {
    /// Build settings from the effective config. Fails with
    /// `ApiKeyMissing` when no key is configured.
    pub fn from_config(config: &AppConfig) -> LensResult<Self> {
        Ok(Self {
            base_url: config.api.base_url.clone(),
            api_key: config.require_api_key()?.to_string(),
            chain: config.api.chain.clone(),
            nft_path: config.endpoints.nft.clone(),
            history_path: config.endpoints.history.clone(),
            batch_path: config.endpoints.batch.clone(),
            timeout: Duration::from_secs(config.api.timeout_secs),
        })
    }
}

// ── Request body ────────────────────────────────────────────────────

/// `getMultipleNFTs` body. The API mixes camelCase and snake_case here.
#[derive(Debug, Serialize)]
struct BatchRequest<'a> {
    tokens: &'a [TokenLookupKey],
    #[serde(rename = "normalizeMetadata")]
    normalize_metadata: bool,
    media_items: bool,
}

// ── Decoders ────────────────────────────────────────────────────────

/// Decode a wallet-endpoint body: an object with a `result` array.
pub fn decode_envelope(body: &[u8]) -> Result<RawEnvelope, serde_json::Error> {
    serde_json::from_slice(body)
}

/// Decode a batch-lookup body: a bare array. `null` entries (tokens the
/// API could not resolve) are dropped.
pub fn decode_batch(body: &[u8]) -> Result<Vec<RawRecord>, serde_json::Error> {
    let items: Vec<Option<RawRecord>> = serde_json::from_slice(body)?;
    Ok(items.into_iter().flatten().collect())
}

// ── Client ──────────────────────────────────────────────────────────

pub struct MoralisClient {
    http: reqwest::Client,
    settings: MoralisSettings,
}

impl MoralisClient {
    pub fn new(settings: MoralisSettings) -> LensResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| LensError::Config(format!("failed to build HTTP client: {e}")))?;

        info!(
            base_url = %settings.base_url,
            chain = %settings.chain,
            "moralis client initialized"
        );

        Ok(Self { http, settings })
    }

    pub fn settings(&self) -> &MoralisSettings {
        &self.settings
    }

    /// `{base}/{address}/{resource-path}`. The address must be a single
    /// path segment; anything that could reshape the URL is rejected.
    pub fn wallet_url(&self, address: &str, resource: WalletResource) -> LensResult<url::Url> {
        validate_address(address)?;
        let path = match resource {
            WalletResource::Nfts => &self.settings.nft_path,
            WalletResource::History => &self.settings.history_path,
        };
        self.join(std::iter::once(address).chain(path_segments(path)))
    }

    /// `{base}/{batch-path}`.
    pub fn batch_url(&self) -> LensResult<url::Url> {
        self.join(path_segments(&self.settings.batch_path))
    }

    /// Append segments to the base URL's path. Each segment is escaped on
    /// its own, so none of them can touch the query or fragment.
    fn join<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> LensResult<url::Url> {
        let base = &self.settings.base_url;
        let mut url = url::Url::parse(base)
            .map_err(|e| LensError::Config(format!("invalid API URL '{base}': {e}")))?;
        url.path_segments_mut()
            .map_err(|_| LensError::Config(format!("API URL '{base}' cannot take a path")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a prepared request, racing it against `cancel`. Anything other
    /// than 200 is an `HttpStatus` error and the body is left unread.
    async fn execute(
        &self,
        operation: &str,
        target: &str,
        request: reqwest::RequestBuilder,
        cancel: &CancellationToken,
    ) -> LensResult<Vec<u8>> {
        let exchange = async {
            let resp = request
                .send()
                .await
                .map_err(|e| LensError::transport(operation, target, e))?;

            let status = resp.status();
            debug!(operation, target, %status, "response received");
            if status != StatusCode::OK {
                return Err(LensError::HttpStatus {
                    operation: operation.to_string(),
                    target: target.to_string(),
                    code: status.as_u16(),
                });
            }

            let body = resp
                .bytes()
                .await
                .map_err(|e| LensError::transport(operation, target, e))?;
            Ok::<_, LensError>(body.to_vec())
        };

        with_cancel(operation, cancel, exchange).await
    }
}

fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Wallet addresses are hex (optionally `ronin:`-prefixed). Reject empty
/// input, dot segments and any character outside `[A-Za-z0-9:._-]`.
fn validate_address(address: &str) -> LensResult<()> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(LensError::InvalidArgument(
            "wallet address must not be empty".into(),
        ));
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, ':' | '.' | '_' | '-');
    if trimmed != address || matches!(address, "." | "..") || !address.chars().all(allowed) {
        return Err(LensError::InvalidArgument(format!(
            "invalid wallet address '{address}'"
        )));
    }
    Ok(())
}

/// Run `fut` unless `cancel` fires first.
async fn with_cancel<T, F>(operation: &str, cancel: &CancellationToken, fut: F) -> LensResult<T>
where
    F: Future<Output = LensResult<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(LensError::cancelled(operation)),
        result = fut => result,
    }
}

// ── Trait Implementation ────────────────────────────────────────────

#[async_trait]
impl IndexerGateway for MoralisClient {
    fn provider(&self) -> &str {
        "moralis"
    }

    async fn fetch_by_wallet(
        &self,
        address: &str,
        resource: WalletResource,
        filter: &QueryFilter,
        cancel: &CancellationToken,
    ) -> LensResult<RawEnvelope> {
        validate_address(address)?;
        if cancel.is_cancelled() {
            return Err(LensError::cancelled(OP_WALLET));
        }

        let url = self.wallet_url(address, resource)?;
        let query: ParameterSet = params::build(filter, &self.settings.chain);
        debug!(%url, ?query, "wallet request parameters");
        info!(address, %resource, "fetching wallet resource");

        let start = Instant::now();
        let request = self
            .http
            .get(url)
            .header(API_KEY_HEADER, &self.settings.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&query);

        let body = self.execute(OP_WALLET, address, request, cancel).await?;
        let envelope =
            decode_envelope(&body).map_err(|e| LensError::decode(OP_WALLET, address, e))?;

        info!(
            address,
            %resource,
            records = envelope.result.len(),
            page = envelope.page,
            has_cursor = envelope.cursor.as_deref().is_some_and(|c| !c.is_empty()),
            duration_ms = start.elapsed().as_millis() as u64,
            "wallet resource fetched"
        );
        Ok(envelope)
    }

    async fn fetch_by_tokens(
        &self,
        keys: &[TokenLookupKey],
        options: BatchOptions,
        cancel: &CancellationToken,
    ) -> LensResult<Vec<RawRecord>> {
        if keys.is_empty() {
            return Err(LensError::InvalidArgument(
                "token lookup requires at least one key".into(),
            ));
        }
        if cancel.is_cancelled() {
            return Err(LensError::cancelled(OP_TOKENS));
        }

        let target = format!("{} tokens", keys.len());
        let url = self.batch_url()?;
        let body = BatchRequest {
            tokens: keys,
            normalize_metadata: options.normalize_metadata,
            media_items: options.media_items,
        };
        info!(tokens = keys.len(), "fetching specific NFTs");

        let start = Instant::now();
        let request = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.settings.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&params::chain_only(&self.settings.chain))
            .json(&body);

        let bytes = self.execute(OP_TOKENS, &target, request, cancel).await?;
        let records =
            decode_batch(&bytes).map_err(|e| LensError::decode(OP_TOKENS, &target, e))?;

        info!(
            requested = keys.len(),
            found = records.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "specific NFTs fetched"
        );
        Ok(records)
    }
}
