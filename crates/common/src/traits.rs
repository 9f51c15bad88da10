//! Gateway trait. Every indexing-API provider implements this.
//!
//! This is the contract between the service layer and provider modules.
//! The service never sees HTTP; it asks a gateway for raw records and
//! normalizes whatever comes back.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::LensResult;
use crate::raw::{RawEnvelope, RawRecord};
use crate::types::{BatchOptions, QueryFilter, TokenLookupKey, WalletResource};

#[async_trait]
pub trait IndexerGateway: Send + Sync {
    /// Provider identifier, used in logs.
    fn provider(&self) -> &str;

    /// Fetch one page of a per-wallet resource (NFT holdings or history).
    ///
    /// Fails with `Cancelled` without any I/O when `cancel` already fired.
    async fn fetch_by_wallet(
        &self,
        address: &str,
        resource: WalletResource,
        filter: &QueryFilter,
        cancel: &CancellationToken,
    ) -> LensResult<RawEnvelope>;

    /// Look up a batch of specific NFTs. `keys` must be non-empty.
    async fn fetch_by_tokens(
        &self,
        keys: &[TokenLookupKey],
        options: BatchOptions,
        cancel: &CancellationToken,
    ) -> LensResult<Vec<RawRecord>>;
}
