use anyhow::Result;
use clap::Args;
use lens_common::types::QueryFilter;
use lens_types::config::AppConfig;
use lens_types::output::HistoryOutput;
use lens_utils::output::{render, OutputFormat};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::factory;

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Wallet address (defaults to WALLET_ADDRESS / defaults.wallet_address).
    pub address: Option<String>,
    #[arg(long)]
    pub limit: Option<u32>,
    #[arg(long)]
    pub cursor: Option<String>,
    /// Sort by block: asc or desc.
    #[arg(long, value_parser = ["asc", "desc"])]
    pub order: Option<String>,
    /// Earliest block date, passed through to the API.
    #[arg(long)]
    pub from_date: Option<String>,
    /// Latest block date, passed through to the API.
    #[arg(long)]
    pub to_date: Option<String>,
    #[arg(long)]
    pub include_internal_transactions: bool,
    /// Include NFT metadata on transfers.
    #[arg(long)]
    pub nft_metadata: bool,
}

impl HistoryArgs {
    pub fn filter(&self, default_limit: u32) -> QueryFilter {
        QueryFilter {
            limit: self.limit.unwrap_or(default_limit),
            cursor: self.cursor.clone(),
            order: self.order.clone(),
            from_date: self.from_date.clone(),
            to_date: self.to_date.clone(),
            include_internal_transactions: self.include_internal_transactions,
            nft_metadata: self.nft_metadata,
            ..Default::default()
        }
    }
}

/// `lens wallet history [ADDRESS]`
pub async fn history(
    args: HistoryArgs,
    config: &AppConfig,
    fmt: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let address = config.resolve_wallet(args.address.as_deref())?;
    let filter = args.filter(config.defaults.limit);
    debug!(%address, ?filter, "wallet history");

    let service = factory::service(config)?;
    let page = service.wallet_history(&address, &filter, cancel).await?;

    render(fmt, &HistoryOutput::from_page(&address, page))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_filter() {
        let args = HistoryArgs {
            address: Some("0xabc".into()),
            limit: None,
            cursor: None,
            order: Some("asc".into()),
            from_date: Some("2024-01-01".into()),
            to_date: None,
            include_internal_transactions: true,
            nft_metadata: false,
        };
        let filter = args.filter(25);
        assert_eq!(filter.limit, 25);
        assert_eq!(filter.order.as_deref(), Some("asc"));
        assert_eq!(filter.from_date.as_deref(), Some("2024-01-01"));
        assert!(filter.to_date.is_none());
        assert!(filter.include_internal_transactions);
        assert!(!filter.exclude_spam);
    }
}
