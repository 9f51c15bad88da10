//! Shared helpers for CLI commands.

use std::path::Path;

use lens_common::error::{LensError, LensResult};
use lens_common::types::TokenLookupKey;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Token that fires on Ctrl-C (and SIGTERM on unix). The in-flight request
/// observes it and aborts with `Cancelled`.
pub fn shutdown_token() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();

    tokio::spawn(async move {
        wait_for_signal().await;
        info!("shutdown signal received, cancelling");
        trigger.cancel();
    });

    token
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = term.recv() => {}
            }
        }
        Err(e) => {
            warn!(error = %e, "SIGTERM handler unavailable, listening for Ctrl-C only");
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

/// Build the key list for `nft get`: either one `--token-address/--token-id`
/// pair or a tokens file, not both.
pub fn lookup_keys(
    token_address: Option<&str>,
    token_id: Option<&str>,
    tokens_file: Option<&Path>,
) -> LensResult<Vec<TokenLookupKey>> {
    match (token_address, token_id, tokens_file) {
        (Some(addr), Some(id), None) => {
            if addr.trim().is_empty() || id.trim().is_empty() {
                return Err(LensError::InvalidArgument(
                    "--token-address and --token-id must not be empty".into(),
                ));
            }
            Ok(vec![TokenLookupKey::new(addr.trim(), id.trim())])
        }
        (None, None, Some(path)) => load_tokens_file(path),
        (_, _, Some(_)) => Err(LensError::InvalidArgument(
            "use either --tokens-file or --token-address/--token-id, not both".into(),
        )),
        _ => Err(LensError::InvalidArgument(
            "pass --token-address and --token-id together, or --tokens-file".into(),
        )),
    }
}

/// Read a JSON array of `{"token_address", "token_id"}` objects.
pub fn load_tokens_file(path: &Path) -> LensResult<Vec<TokenLookupKey>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        LensError::InvalidArgument(format!("cannot read tokens file {}: {e}", path.display()))
    })?;
    parse_tokens(&content, &path.display().to_string())
}

fn parse_tokens(content: &str, source: &str) -> LensResult<Vec<TokenLookupKey>> {
    let keys: Vec<TokenLookupKey> = serde_json::from_str(content).map_err(|e| {
        LensError::InvalidArgument(format!("invalid tokens file {source}: {e}"))
    })?;

    if keys.is_empty() {
        return Err(LensError::InvalidArgument(format!(
            "tokens file {source} contains no tokens"
        )));
    }
    if let Some(pos) = keys
        .iter()
        .position(|k| k.token_address.is_empty() || k.token_id.is_empty())
    {
        return Err(LensError::InvalidArgument(format!(
            "tokens file {source}: entry {pos} has an empty token_address or token_id"
        )));
    }
    Ok(keys)
}
