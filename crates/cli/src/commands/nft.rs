use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use lens_common::types::{BatchOptions, QueryFilter};
use lens_types::config::AppConfig;
use lens_types::output::NftListOutput;
use lens_utils::output::{render, OutputFormat};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::helpers::lookup_keys;
use crate::factory;

#[derive(Debug, Args)]
pub struct WalletNftsArgs {
    /// Wallet address (defaults to WALLET_ADDRESS / defaults.wallet_address).
    pub address: Option<String>,
    /// Page size (defaults to defaults.limit).
    #[arg(long)]
    pub limit: Option<u32>,
    /// Cursor from a previous page.
    #[arg(long)]
    pub cursor: Option<String>,
    /// Ask the API to leave out spam contracts.
    #[arg(long)]
    pub exclude_spam: bool,
    #[arg(long)]
    pub normalize_metadata: bool,
    #[arg(long)]
    pub media_items: bool,
    /// Include last sale prices.
    #[arg(long)]
    pub include_prices: bool,
    /// Token id format: decimal or hex.
    #[arg(long)]
    pub format: Option<String>,
}

impl WalletNftsArgs {
    pub fn filter(&self, default_limit: u32) -> QueryFilter {
        QueryFilter {
            limit: self.limit.unwrap_or(default_limit),
            cursor: self.cursor.clone(),
            format: self.format.clone(),
            exclude_spam: self.exclude_spam,
            normalize_metadata: self.normalize_metadata,
            media_items: self.media_items,
            include_prices: self.include_prices,
            ..Default::default()
        }
    }
}

#[derive(Debug, Args)]
pub struct GetNftsArgs {
    /// NFT contract address.
    #[arg(long, requires = "token_id")]
    pub token_address: Option<String>,
    /// Token id within the contract.
    #[arg(long, requires = "token_address")]
    pub token_id: Option<String>,
    /// JSON array of {"token_address", "token_id"} objects.
    #[arg(long, conflicts_with_all = ["token_address", "token_id"])]
    pub tokens_file: Option<PathBuf>,
    #[arg(long)]
    pub normalize_metadata: bool,
    #[arg(long)]
    pub media_items: bool,
}

/// `lens nft wallet [ADDRESS]`
pub async fn wallet(
    args: WalletNftsArgs,
    config: &AppConfig,
    fmt: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let address = config.resolve_wallet(args.address.as_deref())?;
    let filter = args.filter(config.defaults.limit);
    debug!(%address, ?filter, "nft wallet");

    let service = factory::service(config)?;
    let page = service.wallet_nfts(&address, &filter, cancel).await?;

    render(fmt, &NftListOutput::from_page(&address, page))
}

/// `lens nft get --token-address A --token-id I | --tokens-file PATH`
pub async fn get(
    args: GetNftsArgs,
    config: &AppConfig,
    fmt: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let keys = lookup_keys(
        args.token_address.as_deref(),
        args.token_id.as_deref(),
        args.tokens_file.as_deref(),
    )?;
    let options = BatchOptions {
        normalize_metadata: args.normalize_metadata,
        media_items: args.media_items,
    };
    debug!(tokens = keys.len(), ?options, "nft get");

    let service = factory::service(config)?;
    let records = service.specific_nfts(&keys, options, cancel).await?;

    render(fmt, &NftListOutput::from_lookup(keys.len(), records))
}
