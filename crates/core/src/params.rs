//! Query parameter builder.
//!
//! Encodes a `QueryFilter` the way the indexing API expects it: a field is
//! sent only when it is set (non-empty text, positive number, `true`).
//! A missing parameter means "API default", so unset values are omitted
//! instead of being sent as `""` or `false`. Values are not validated here;
//! the API decides what is legal.

use std::collections::BTreeMap;

use lens_common::types::QueryFilter;

/// Parameter name → encoded value. Ordered so the query string is stable.
pub type ParameterSet = BTreeMap<String, String>;

/// Build the parameter set for a wallet query. `chain` is always present.
pub fn build(filter: &QueryFilter, chain: &str) -> ParameterSet {
    let mut params = chain_only(chain);

    if filter.limit > 0 {
        params.insert("limit".into(), filter.limit.to_string());
    }

    let text = [
        ("cursor", &filter.cursor),
        ("order", &filter.order),
        ("from_date", &filter.from_date),
        ("to_date", &filter.to_date),
        ("format", &filter.format),
    ];
    for (name, value) in text {
        if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
            params.insert(name.into(), v.to_string());
        }
    }

    let flags = [
        ("exclude_spam", filter.exclude_spam),
        ("include_internal_transactions", filter.include_internal_transactions),
        ("nft_metadata", filter.nft_metadata),
        ("normalize_metadata", filter.normalize_metadata),
        ("media_items", filter.media_items),
        ("include_prices", filter.include_prices),
    ];
    for (name, on) in flags {
        if on {
            params.insert(name.into(), "true".into());
        }
    }

    params
}

/// Only the fixed chain parameter (batch POST query string).
pub fn chain_only(chain: &str) -> ParameterSet {
    let mut params = ParameterSet::new();
    params.insert("chain".into(), chain.to_string());
    params
}
