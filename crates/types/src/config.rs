use serde::{Deserialize, Serialize};

use lens_common::constants::*;
use lens_common::error::{LensError, LensResult};

// ═══════════════════════════════════════════════════════════════════════
//  APP CONFIG, stored at ~/.nftlens/config.toml
// ═══════════════════════════════════════════════════════════════════════

/// Top-level configuration stored in `$HOME/.nftlens/config.toml`.
///
/// ```toml
/// [api]
/// base_url = "https://deep-index.moralis.io/api/v2.2"
/// chain = "ronin"
/// timeout_secs = 30
///
/// [endpoints]
/// nft = "nft"
/// history = "history"
/// batch = "nft/getMultipleNFTs"
///
/// [defaults]
/// limit = 10
///
/// [system]
/// log_level = "info"
/// ```
///
/// Environment variables (`MORALIS_API_KEY`, `MORALIS_BASE_URL`,
/// `WALLET_ADDRESS`, `LOG_LEVEL`) override file values at load time.
///
/// Missing sections and missing keys fall back to their defaults, so a
/// partial file still loads with every value it does carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub endpoints: EndpointsConfig,
    pub defaults: DefaultsConfig,
    pub system: SystemConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Moralis API key. Prefer `MORALIS_API_KEY` over storing it here.
    pub api_key: Option<String>,
    /// Chain identifier sent with every request.
    pub chain: String,
    pub timeout_secs: u64,
}

/// Resource paths relative to `api.base_url`.
///
/// Wallet resources are appended after the address:
/// `{base_url}/{address}/{nft|history}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub nft: String,
    pub history: String,
    pub batch: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Wallet used when a command is given no address.
    pub wallet_address: Option<String>,
    /// Page size when `--limit` is not given.
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Fallback tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: MORALIS_BASE_URL.to_string(),
            api_key: None,
            chain: DEFAULT_CHAIN.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            nft: NFT_RESOURCE.to_string(),
            history: HISTORY_RESOURCE.to_string(),
            batch: BATCH_RESOURCE.to_string(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            wallet_address: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            log_level: String::from("info"),
        }
    }
}

/// Keys accepted by `lens configure set`.
pub const SETTABLE_KEYS: &[&str] = &[
    "api.base_url",
    "api.api_key",
    "api.chain",
    "api.timeout_secs",
    "endpoints.nft",
    "endpoints.history",
    "endpoints.batch",
    "defaults.wallet_address",
    "defaults.limit",
    "system.log_level",
];

impl AppConfig {
    /// Serialize to TOML for writing to disk.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserialize from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Apply environment overrides. `lookup` is `std::env::var(..).ok()`
    /// in the binary; empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.api.api_key = Some(key);
        }
        if let Some(url) = get(ENV_BASE_URL) {
            self.api.base_url = url;
        }
        if let Some(addr) = get(ENV_WALLET_ADDRESS) {
            self.defaults.wallet_address = Some(addr);
        }
        if let Some(level) = get(ENV_LOG_LEVEL) {
            self.system.log_level = level;
        }
    }

    /// The API key, or `ApiKeyMissing` when neither file nor env set one.
    pub fn require_api_key(&self) -> LensResult<&str> {
        self.api
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(LensError::ApiKeyMissing)
    }

    /// Pick the wallet address: explicit argument first, then the default.
    pub fn resolve_wallet(&self, explicit: Option<&str>) -> LensResult<String> {
        explicit
            .filter(|a| !a.trim().is_empty())
            .map(str::to_string)
            .or_else(|| self.defaults.wallet_address.clone())
            .filter(|a| !a.trim().is_empty())
            .ok_or_else(|| {
                LensError::InvalidArgument(
                    "wallet address required (pass ADDRESS or set WALLET_ADDRESS)".into(),
                )
            })
    }

    /// Set a single dotted key. Empty values clear optional keys.
    pub fn set_key(&mut self, key: &str, value: &str) -> LensResult<()> {
        let optional = |v: &str| (!v.is_empty()).then(|| v.to_string());
        let non_empty = |v: &str| {
            if v.is_empty() {
                Err(LensError::Config(format!("{key} cannot be empty")))
            } else {
                Ok(v.to_string())
            }
        };

        match key {
            "api.base_url" => self.api.base_url = non_empty(value)?,
            "api.api_key" => self.api.api_key = optional(value),
            "api.chain" => self.api.chain = non_empty(value)?,
            "api.timeout_secs" => {
                self.api.timeout_secs = value
                    .parse()
                    .map_err(|_| LensError::Config(format!("{key} must be a whole number of seconds")))?;
            }
            "endpoints.nft" => self.endpoints.nft = non_empty(value)?,
            "endpoints.history" => self.endpoints.history = non_empty(value)?,
            "endpoints.batch" => self.endpoints.batch = non_empty(value)?,
            "defaults.wallet_address" => self.defaults.wallet_address = optional(value),
            "defaults.limit" => {
                self.defaults.limit = value
                    .parse()
                    .map_err(|_| LensError::Config(format!("{key} must be a non-negative integer")))?;
            }
            "system.log_level" => self.system.log_level = non_empty(value)?,
            _ => {
                return Err(LensError::Config(format!(
                    "unknown key '{key}'. Valid keys: {}",
                    SETTABLE_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// Flat `(key, value)` view for `configure show`. The API key is masked.
    pub fn entries(&self) -> Vec<(String, String)> {
        let unset = || "—".to_string();
        vec![
            ("api.base_url".into(), self.api.base_url.clone()),
            (
                "api.api_key".into(),
                self.api.api_key.as_deref().map(mask_secret).unwrap_or_else(unset),
            ),
            ("api.chain".into(), self.api.chain.clone()),
            ("api.timeout_secs".into(), self.api.timeout_secs.to_string()),
            ("endpoints.nft".into(), self.endpoints.nft.clone()),
            ("endpoints.history".into(), self.endpoints.history.clone()),
            ("endpoints.batch".into(), self.endpoints.batch.clone()),
            (
                "defaults.wallet_address".into(),
                self.defaults.wallet_address.clone().unwrap_or_else(unset),
            ),
            ("defaults.limit".into(), self.defaults.limit.to_string()),
            ("system.log_level".into(), self.system.log_level.clone()),
        ]
    }
}

/// Keep the first and last four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}
