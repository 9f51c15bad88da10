//! Structured output types for JSON/table rendering.
//!
//! Every data-producing command returns one of these types.
//! They all derive `Serialize` for JSON output, and implement
//! `TableDisplay` (in `lens-utils`) for human-readable rendering.

use serde::Serialize;

use lens_common::record::{NormalizedRecord, RecordPage};

// ─── NFTs ───────────────────────────────────────────────────────────

/// NFT holdings of a wallet, or the result of a batch token lookup.
///
/// ```json
/// {
///   "source": "wallet 0xabc…",
///   "page": 1,
///   "cursor": null,
///   "nfts": [{ "token_id": "1", "floor_price": "100", … }]
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct NftListOutput {
    /// What was queried: `wallet <address>` or `<n> token(s)`.
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    pub nfts: Vec<NormalizedRecord>,
}

impl NftListOutput {
    pub fn from_page(address: &str, page: RecordPage) -> Self {
        Self {
            source: format!("wallet {address}"),
            page: Some(page.page),
            cursor: page.cursor.filter(|c| !c.is_empty()),
            nfts: page.records,
        }
    }

    pub fn from_lookup(requested: usize, records: Vec<NormalizedRecord>) -> Self {
        let noun = if requested == 1 { "token" } else { "tokens" };
        Self {
            source: format!("{requested} {noun}"),
            page: None,
            cursor: None,
            nfts: records,
        }
    }
}

// ─── Wallet history ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct HistoryOutput {
    pub address: String,
    pub page: u32,
    pub page_size: u32,
    pub cursor: Option<String>,
    pub transactions: Vec<NormalizedRecord>,
}

impl HistoryOutput {
    pub fn from_page(address: &str, page: RecordPage) -> Self {
        Self {
            address: address.to_string(),
            page: page.page,
            page_size: page.page_size,
            cursor: page.cursor.filter(|c| !c.is_empty()),
            transactions: page.records,
        }
    }
}

// ─── Config ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ConfigOutput {
    pub path: String,
    pub entries: Vec<ConfigEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
}

impl ConfigOutput {
    pub fn new(path: String, entries: Vec<(String, String)>) -> Self {
        Self {
            path,
            entries: entries
                .into_iter()
                .map(|(key, value)| ConfigEntry { key, value })
                .collect(),
        }
    }
}
