//! Raw API model: the untrusted, as-received shape of indexing API payloads.
//!
//! One `RawRecord` covers a wallet-history transaction, an owned NFT, or a
//! batch token lookup result: the endpoints share most field names, so the
//! struct is the union of them. Every field defaults when the key is absent
//! and text fields also treat JSON `null` as absent. Fields the API
//! documents as nullable stay `Option` here; defaults are applied later,
//! during normalization.

use serde::{Deserialize, Deserializer, Serialize};

/// GET response envelope for per-wallet endpoints.
///
/// ```json
/// { "page": 1, "page_size": 10, "cursor": "eyJ…", "result": [ … ] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEnvelope {
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub status: Option<String>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub cursor: Option<String>,
    pub result: Vec<RawRecord>,
}

/// One transaction / NFT / token lookup result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    // ── NFT identity ────────────────────────────────────────────
    #[serde(deserialize_with = "lenient_string")]
    pub token_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub token_address: String,
    #[serde(deserialize_with = "lenient_string")]
    pub contract_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub owner_of: String,
    #[serde(deserialize_with = "lenient_string")]
    pub amount: String,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub symbol: String,
    #[serde(deserialize_with = "lenient_string")]
    pub token_hash: String,
    #[serde(deserialize_with = "lenient_string")]
    pub token_uri: String,
    #[serde(deserialize_with = "lenient_string")]
    pub last_metadata_sync: String,
    #[serde(deserialize_with = "lenient_string")]
    pub last_token_uri_sync: String,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub block_number_minted: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub minter_address: Option<String>,

    // ── Quality / rarity ────────────────────────────────────────
    #[serde(deserialize_with = "lenient_bool")]
    pub possible_spam: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub verified_collection: bool,
    pub rarity_rank: Option<u64>,
    pub rarity_percentage: Option<f64>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub rarity_label: Option<String>,

    // ── Metadata / media ────────────────────────────────────────
    pub normalized_metadata: Option<NormalizedMetadata>,
    pub media: Option<Media>,

    // ── Collection info ─────────────────────────────────────────
    #[serde(deserialize_with = "lenient_string")]
    pub collection_logo: String,
    #[serde(deserialize_with = "lenient_string")]
    pub collection_banner_image: String,
    #[serde(deserialize_with = "lenient_string")]
    pub collection_category: String,
    #[serde(deserialize_with = "lenient_string")]
    pub project_url: String,
    #[serde(deserialize_with = "lenient_string")]
    pub wiki_url: String,
    #[serde(deserialize_with = "lenient_string")]
    pub discord_url: String,
    #[serde(deserialize_with = "lenient_string")]
    pub telegram_url: String,
    #[serde(deserialize_with = "lenient_string")]
    pub twitter_username: String,
    #[serde(deserialize_with = "lenient_string")]
    pub instagram_username: String,

    // ── Prices ──────────────────────────────────────────────────
    pub list_price: Option<ListPrice>,
    pub last_sale: Option<serde_json::Value>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub floor_price: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub floor_price_usd: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub floor_price_currency: Option<String>,

    // ── Transaction ─────────────────────────────────────────────
    #[serde(deserialize_with = "lenient_string")]
    pub hash: String,
    #[serde(deserialize_with = "lenient_string")]
    pub nonce: String,
    #[serde(deserialize_with = "lenient_string")]
    pub transaction_index: String,
    #[serde(deserialize_with = "lenient_string")]
    pub from_address: String,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub from_address_label: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub from_address_entity: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub to_address: String,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub to_address_label: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub to_address_entity: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub value: String,
    #[serde(deserialize_with = "lenient_string")]
    pub gas: String,
    #[serde(deserialize_with = "lenient_string")]
    pub gas_price: String,
    #[serde(deserialize_with = "lenient_string")]
    pub receipt_gas_used: String,
    #[serde(deserialize_with = "lenient_string")]
    pub receipt_status: String,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub receipt_contract_address: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub transaction_fee: String,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub method_label: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub summary: String,
    #[serde(deserialize_with = "lenient_string")]
    pub category: String,
    pub nft_transfers: Vec<NftTransfer>,
    pub erc20_transfers: Vec<Erc20Transfer>,
    pub native_transfers: Vec<serde_json::Value>,
    pub internal_transactions: Vec<serde_json::Value>,

    // ── Block ───────────────────────────────────────────────────
    #[serde(deserialize_with = "lenient_string")]
    pub block_number: String,
    #[serde(deserialize_with = "lenient_string")]
    pub block_hash: String,
    #[serde(deserialize_with = "lenient_string")]
    pub block_timestamp: String,
}

/// `normalized_metadata` object attached to NFT results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizedMetadata {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub animation_url: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub external_link: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub image: String,
    /// Same keys per entry, different values; may be `null`.
    pub attributes: Option<Vec<Attribute>>,
}

/// One trait entry. `value` is a string or a number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Attribute {
    #[serde(deserialize_with = "lenient_string")]
    pub trait_type: String,
    pub value: serde_json::Value,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub display_type: Option<String>,
    pub max_value: Option<serde_json::Value>,
    pub trait_count: u64,
    pub order: Option<i64>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub rarity_label: Option<String>,
    pub count: Option<u64>,
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Media {
    #[serde(deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(rename = "updatedAt", deserialize_with = "lenient_string")]
    pub updated_at: String,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub mimetype: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub parent_hash: Option<String>,
    pub media_collection: Option<MediaCollection>,
    #[serde(deserialize_with = "lenient_string")]
    pub original_media_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaCollection {
    pub low: MediaSize,
    pub medium: MediaSize,
    pub high: MediaSize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaSize {
    pub height: u32,
    pub width: u32,
    #[serde(deserialize_with = "lenient_string")]
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListPrice {
    pub listed: bool,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub price: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub price_currency: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub price_usd: Option<String>,
    pub marketplace: Option<serde_json::Value>,
}

/// NFT movement inside a history transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NftTransfer {
    #[serde(deserialize_with = "lenient_string")]
    pub token_address: String,
    #[serde(deserialize_with = "lenient_string")]
    pub token_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub from_address: String,
    #[serde(deserialize_with = "lenient_string")]
    pub to_address: String,
    #[serde(deserialize_with = "lenient_string")]
    pub contract_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub amount: String,
    #[serde(deserialize_with = "lenient_string")]
    pub direction: String,
    #[serde(deserialize_with = "lenient_bool")]
    pub possible_spam: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub verified_collection: bool,
}

/// ERC-20 movement inside a history transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Erc20Transfer {
    #[serde(deserialize_with = "lenient_string")]
    pub token_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub token_symbol: String,
    #[serde(deserialize_with = "lenient_string")]
    pub address: String,
    #[serde(deserialize_with = "lenient_string")]
    pub from_address: String,
    #[serde(deserialize_with = "lenient_string")]
    pub to_address: String,
    #[serde(deserialize_with = "lenient_string")]
    pub value: String,
    #[serde(deserialize_with = "lenient_string")]
    pub value_formatted: String,
    #[serde(deserialize_with = "lenient_string")]
    pub direction: String,
    #[serde(deserialize_with = "lenient_bool")]
    pub possible_spam: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub verified_contract: bool,
}

// ── Lenient field decoding ──────────────────────────────────────────

/// Accepts a string, a number, a bool or `null` (→ empty string).
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

/// Like `lenient_string` but keeps `null` as `None`.
fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(serde_json::Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected string or number, found {other}"
        ))),
    }
}

/// `null` flags read as `false`.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_flags_read_as_false() {
        let raw: RawRecord =
            serde_json::from_str(r#"{"possible_spam":null,"verified_collection":null}"#).unwrap();
        assert!(!raw.possible_spam);
        assert!(!raw.verified_collection);
    }

    #[test]
    fn test_null_transfer_flags_read_as_false() {
        let raw: RawRecord = serde_json::from_str(
            r#"{"hash":"0x1",
                "nft_transfers":[{"token_id":"1","possible_spam":null,"verified_collection":null}],
                "erc20_transfers":[{"token_symbol":"WRON","possible_spam":null,"verified_contract":null}]}"#,
        )
        .unwrap();
        assert!(!raw.nft_transfers[0].possible_spam);
        assert!(!raw.erc20_transfers[0].possible_spam);
        assert!(!raw.erc20_transfers[0].verified_contract);
        assert_eq!(raw.erc20_transfers[0].token_symbol, "WRON");
    }

    #[test]
    fn test_sparse_record_defaults() {
        let raw: RawRecord =
            serde_json::from_str(r#"{"token_id":"1","possible_spam":false,"floor_price":"100"}"#)
                .unwrap();
        assert_eq!(raw.token_id, "1");
        assert_eq!(raw.floor_price.as_deref(), Some("100"));
        assert!(raw.token_address.is_empty());
        assert!(raw.normalized_metadata.is_none());
        assert!(raw.rarity_rank.is_none());
    }

    #[test]
    fn test_null_text_fields_decode_as_empty() {
        let raw: RawRecord = serde_json::from_str(
            r#"{"hash":"0x1","to_address":null,"floor_price":null,"rarity_label":null}"#,
        )
        .unwrap();
        assert_eq!(raw.hash, "0x1");
        assert_eq!(raw.to_address, "");
        assert!(raw.floor_price.is_none());
        assert!(raw.rarity_label.is_none());
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let raw: RawRecord =
            serde_json::from_str(r#"{"transaction_index":12,"floor_price":0.25}"#).unwrap();
        assert_eq!(raw.transaction_index, "12");
        assert_eq!(raw.floor_price.as_deref(), Some("0.25"));
    }

    #[test]
    fn test_object_in_text_field_rejected() {
        let res: Result<RawRecord, _> = serde_json::from_str(r#"{"token_id":{"x":1}}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_attribute_value_string_or_number() {
        let meta: NormalizedMetadata = serde_json::from_str(
            r#"{"image":"ipfs://x","attributes":[
                {"trait_type":"Background","value":"Blue"},
                {"trait_type":"Level","value":7}
            ]}"#,
        )
        .unwrap();
        let attrs = meta.attributes.unwrap();
        assert_eq!(attrs[0].value, "Blue");
        assert_eq!(attrs[1].value, 7);
        assert!(meta.description.is_none());
    }

    #[test]
    fn test_envelope_requires_result() {
        let res: Result<RawEnvelope, _> = serde_json::from_str(r#"{"page":1,"page_size":2}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_envelope_cursor_optional() {
        let env: RawEnvelope =
            serde_json::from_str(r#"{"page":0,"page_size":10,"cursor":null,"result":[]}"#).unwrap();
        assert!(env.cursor.is_none());
        assert!(env.result.is_empty());
    }

    #[test]
    fn test_media_updated_at_rename() {
        let media: Media =
            serde_json::from_str(r#"{"status":"success","updatedAt":"2024-01-01T00:00:00Z"}"#)
                .unwrap();
        assert_eq!(media.updated_at, "2024-01-01T00:00:00Z");
    }
}
