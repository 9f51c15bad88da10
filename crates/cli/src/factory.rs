//! Service factory: builds the service with the configured gateway.
//!
//! Lives in `cli` because `core` must NOT depend on provider modules.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use lens_core::LensService;
use lens_mod_moralis::{MoralisClient, MoralisSettings};
use lens_types::config::AppConfig;

/// Build a `LensService` backed by Moralis. Fails with `ApiKeyMissing`
/// before any network activity when no key is configured.
pub fn service(config: &AppConfig) -> Result<LensService> {
    let settings = MoralisSettings::from_config(config)?;
    let client = MoralisClient::new(settings)?;
    info!(chain = %config.api.chain, "moralis gateway loaded");
    Ok(LensService::new(Arc::new(client)))
}
