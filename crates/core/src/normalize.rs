//! Response normalizer: raw API records → display-ready records.
//!
//! Pure filter + map over the input slice:
//! - records flagged `possible_spam` are dropped (and counted),
//! - nullable fields fall back to `""` / `false`, except rarity rank and
//!   percentage which stay optional,
//! - metadata attributes are flattened into `trait_type → value`, the last
//!   entry winning on duplicate trait names,
//! - surviving records keep their input order.

use std::collections::HashMap;

use lens_common::raw::RawRecord;
use lens_common::record::NormalizedRecord;

/// Normalize a fetch result, dropping spam.
pub fn normalize(raw: &[RawRecord]) -> Vec<NormalizedRecord> {
    normalize_counted(raw).0
}

/// Same as [`normalize`], also returning how many spam records were dropped.
/// `records.len() + spam == raw.len()` always holds.
pub fn normalize_counted(raw: &[RawRecord]) -> (Vec<NormalizedRecord>, usize) {
    let mut records = Vec::with_capacity(raw.len());
    let mut spam = 0usize;

    for item in raw {
        if item.possible_spam {
            spam += 1;
            continue;
        }
        records.push(normalize_one(item));
    }

    (records, spam)
}

fn normalize_one(raw: &RawRecord) -> NormalizedRecord {
    let (image, description, attributes) = match &raw.normalized_metadata {
        Some(meta) => {
            let mut attributes = HashMap::new();
            for attr in meta.attributes.iter().flatten() {
                attributes.insert(attr.trait_type.clone(), attr.value.clone());
            }
            (
                meta.image.clone(),
                meta.description.clone().unwrap_or_default(),
                attributes,
            )
        }
        None => (String::new(), String::new(), HashMap::new()),
    };

    NormalizedRecord {
        token_id: raw.token_id.clone(),
        token_address: raw.token_address.clone(),
        name: raw.name.clone(),
        symbol: raw.symbol.clone(),
        contract_type: raw.contract_type.clone(),
        owner: raw.owner_of.clone(),
        amount: raw.amount.clone(),

        hash: raw.hash.clone(),
        from_address: raw.from_address.clone(),
        to_address: raw.to_address.clone(),
        value: raw.value.clone(),
        block_number: raw.block_number.clone(),
        block_timestamp: raw.block_timestamp.clone(),
        category: raw.category.clone(),
        summary: raw.summary.clone(),

        floor_price: raw.floor_price.clone().unwrap_or_default(),
        floor_price_currency: raw.floor_price_currency.clone().unwrap_or_default(),
        floor_price_usd: raw.floor_price_usd.clone().unwrap_or_default(),

        image,
        description,
        collection_logo: raw.collection_logo.clone(),
        is_verified: raw.verified_collection,

        rarity_rank: raw.rarity_rank,
        rarity_percentage: raw.rarity_percentage,
        rarity_label: raw.rarity_label.clone().unwrap_or_default(),

        attributes,
    }
}
