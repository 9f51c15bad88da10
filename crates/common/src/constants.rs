//! Universal constants for nftlens.

/// Chain every API call is scoped to.
pub const DEFAULT_CHAIN: &str = "ronin";

/// Moralis Web3 Data API base URL.
pub const MORALIS_BASE_URL: &str = "https://deep-index.moralis.io/api/v2.2";

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Default resource paths, relative to the base URL.
pub const NFT_RESOURCE: &str = "nft";
pub const HISTORY_RESOURCE: &str = "history";
pub const BATCH_RESOURCE: &str = "nft/getMultipleNFTs";

/// Request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default page size for wallet queries.
pub const DEFAULT_LIMIT: u32 = 10;

/// Environment variables that override config.toml.
pub const ENV_API_KEY: &str = "MORALIS_API_KEY";
pub const ENV_BASE_URL: &str = "MORALIS_BASE_URL";
pub const ENV_WALLET_ADDRESS: &str = "WALLET_ADDRESS";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
