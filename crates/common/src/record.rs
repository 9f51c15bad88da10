//! Normalized, display-ready records.
//!
//! Renderers and JSON output consume only these, never `RawRecord`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Flat record produced from one non-spam `RawRecord`.
///
/// Text fields are `""` and flags `false` when the source omitted them.
/// `rarity_rank` and `rarity_percentage` stay optional: callers branch on
/// their presence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub token_id: String,
    pub token_address: String,
    pub name: String,
    pub symbol: String,
    pub contract_type: String,
    pub owner: String,
    pub amount: String,

    pub hash: String,
    pub from_address: String,
    pub to_address: String,
    pub value: String,
    pub block_number: String,
    pub block_timestamp: String,
    pub category: String,
    pub summary: String,

    pub floor_price: String,
    pub floor_price_currency: String,
    pub floor_price_usd: String,

    pub image: String,
    pub description: String,
    pub collection_logo: String,
    pub is_verified: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity_rank: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity_percentage: Option<f64>,
    pub rarity_label: String,

    /// Trait name → value (string or number). Unordered.
    pub attributes: HashMap<String, serde_json::Value>,
}

/// One page of normalized wallet results plus the pagination metadata
/// the API returned alongside it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordPage {
    pub page: u32,
    pub page_size: u32,
    /// Cursor for the next page. `None` means no more pages.
    pub cursor: Option<String>,
    pub records: Vec<NormalizedRecord>,
}

impl RecordPage {
    pub fn has_more(&self) -> bool {
        self.cursor.as_deref().is_some_and(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_rank_omitted_when_absent() {
        let record = NormalizedRecord::default();
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("rarity_rank").is_none());
        assert_eq!(json["floor_price"], "");
    }

    #[test]
    fn test_page_has_more() {
        let mut page = RecordPage::default();
        assert!(!page.has_more());
        page.cursor = Some(String::new());
        assert!(!page.has_more());
        page.cursor = Some("eyJhbGciOi".into());
        assert!(page.has_more());
    }
}
