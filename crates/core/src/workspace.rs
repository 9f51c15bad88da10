use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lens_common::constants::ENV_LOG_LEVEL;
use lens_common::error::LensError;
use lens_types::config::{AppConfig, SETTABLE_KEYS};
use tracing::{info, warn};

/// Dotfolder name under `$HOME`.
const DOTFOLDER: &str = ".nftlens";

const CONFIG_FILE: &str = "config.toml";

/// Copy of a config that had to be migrated.
const BACKUP_FILE: &str = "config.toml.bak";

/// Resolve the root path: `$HOME/.nftlens/`.
pub fn root_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(DOTFOLDER))
}

/// Path of the config file inside the dotfolder.
pub fn config_path() -> Result<PathBuf> {
    Ok(root_dir()?.join(CONFIG_FILE))
}

/// Ensure `$HOME/.nftlens/config.toml` exists. Idempotent.
pub fn init_workspace() -> Result<PathBuf> {
    let root = root_dir()?;
    init_workspace_at(&root)?;
    Ok(root)
}

pub fn init_workspace_at(root: &Path) -> Result<()> {
    if !root.exists() {
        fs::create_dir_all(root)
            .with_context(|| format!("Failed to create directory: {}", root.display()))?;
        info!("created directory: {}", root.display());
    }

    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        save_config_to(root, &AppConfig::default())?;
        info!("created default config: {}", config_path.display());
    }
    Ok(())
}

/// Load the config from disk, without environment overrides.
pub fn load_config() -> Result<AppConfig> {
    load_config_from(&root_dir()?)
}

/// Load the config from `root`. Missing keys take their defaults. If the
/// file no longer parses at all (wrong value types, broken TOML), the old
/// file is kept as `config.toml.bak` and a fresh one is written carrying
/// every value that can still be read.
pub fn load_config_from(root: &Path) -> Result<AppConfig> {
    let config_path = root.join(CONFIG_FILE);
    let raw = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;

    match AppConfig::from_toml_str(&raw) {
        Ok(config) => Ok(config),
        Err(e) => {
            warn!(error = %e, "config.toml does not match the current schema, migrating");
            let backup = root.join(BACKUP_FILE);
            fs::write(&backup, &raw)
                .with_context(|| format!("Failed to write {}", backup.display()))?;

            let (migrated, dropped) = migrate(&raw);
            save_config_to(root, &migrated)?;
            warn!(
                backup = %backup.display(),
                reset = ?dropped,
                "config migrated, unreadable keys reset to defaults"
            );
            Ok(migrated)
        }
    }
}

/// Salvage what we can from an unparseable config. Returns the config and
/// the keys that had to fall back to defaults.
fn migrate(raw: &str) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let Ok(old) = raw.parse::<toml::Table>() else {
        return (config, vec!["*".to_string()]);
    };

    let mut dropped = Vec::new();
    for key in SETTABLE_KEYS {
        let Some((section, field)) = key.split_once('.') else {
            continue;
        };
        let value = old
            .get(section)
            .and_then(|v| v.as_table())
            .and_then(|t| t.get(field));
        let text = match value {
            None => continue,
            Some(toml::Value::String(s)) => s.clone(),
            Some(toml::Value::Integer(n)) => n.to_string(),
            Some(_) => {
                dropped.push(key.to_string());
                continue;
            }
        };
        if config.set_key(key, &text).is_err() {
            dropped.push(key.to_string());
        }
    }
    (config, dropped)
}

/// Load the config and layer environment variables on top. This is what
/// commands run with.
pub fn load_effective_config() -> Result<AppConfig> {
    let mut config = load_config()?;
    config.apply_env(|key| std::env::var(key).ok());
    Ok(config)
}

/// Log level to start tracing with, resolved before the config is loaded
/// so that migration messages are visible: `LOG_LEVEL`, then the file's
/// `system.log_level`, then `info`. Never modifies the file.
pub fn startup_log_level() -> String {
    let from_file = root_dir()
        .ok()
        .and_then(|root| file_log_level(&root));
    std::env::var(ENV_LOG_LEVEL)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or(from_file)
        .unwrap_or_else(|| "info".to_string())
}

fn file_log_level(root: &Path) -> Option<String> {
    let raw = fs::read_to_string(root.join(CONFIG_FILE)).ok()?;
    let table = raw.parse::<toml::Table>().ok()?;
    table
        .get("system")?
        .as_table()?
        .get("log_level")?
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// Write the config back to disk.
pub fn save_config(config: &AppConfig) -> Result<()> {
    save_config_to(&root_dir()?, config)
}

pub fn save_config_to(root: &Path, config: &AppConfig) -> Result<()> {
    let config_path = root.join(CONFIG_FILE);
    let toml_str = config
        .to_toml_string()
        .context("Failed to serialize config")?;
    fs::write(&config_path, &toml_str)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(())
}

/// Update one key in the on-disk config (env overrides are not persisted).
pub fn set_config_value(key: &str, value: &str) -> Result<AppConfig> {
    set_config_value_at(&root_dir()?, key, value)
}

pub fn set_config_value_at(root: &Path, key: &str, value: &str) -> Result<AppConfig> {
    init_workspace_at(root)?;
    let mut config = load_config_from(root)?;

    if key == "api.base_url" {
        url::Url::parse(value)
            .map_err(|e| LensError::Config(format!("api.base_url is not a valid URL: {e}")))?;
    }
    config.set_key(key, value)?;

    save_config_to(root, &config)?;
    info!(key, "config updated");
    Ok(config)
}
