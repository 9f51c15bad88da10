//! Request-side types shared by the CLI, the service layer and gateways.

use serde::{Deserialize, Serialize};

/// Filters for a wallet query. Built once per invocation and only read
/// afterwards; an unset field is `0`, `None`, `""` or `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilter {
    /// Page size. `0` leaves the API default in place.
    pub limit: u32,
    /// Opaque cursor returned by a previous page.
    pub cursor: Option<String>,
    /// `asc` or `desc` (history only).
    pub order: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    /// Metadata format (`decoded` or `encoded`).
    pub format: Option<String>,
    pub exclude_spam: bool,
    pub include_internal_transactions: bool,
    pub nft_metadata: bool,
    pub normalize_metadata: bool,
    pub media_items: bool,
    pub include_prices: bool,
}

/// One NFT to look up: contract address + token id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLookupKey {
    pub token_address: String,
    pub token_id: String,
}

impl TokenLookupKey {
    pub fn new(token_address: impl Into<String>, token_id: impl Into<String>) -> Self {
        Self {
            token_address: token_address.into(),
            token_id: token_id.into(),
        }
    }
}

impl std::fmt::Display for TokenLookupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.token_address, self.token_id)
    }
}

/// Body flags for the batch token lookup. Always caller-supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOptions {
    pub normalize_metadata: bool,
    pub media_items: bool,
}

/// Which per-wallet resource a GET targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletResource {
    /// NFT holdings: `{base}/{address}/nft`.
    Nfts,
    /// Transaction history: `{base}/{address}/history`.
    History,
}

impl std::fmt::Display for WalletResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalletResource::Nfts => write!(f, "nfts"),
            WalletResource::History => write!(f, "history"),
        }
    }
}
