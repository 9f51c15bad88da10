use anyhow::Result;
use lens_types::config::{mask_secret, AppConfig};
use lens_types::output::ConfigOutput;
use lens_utils::output::{render, render_json_or, OutputFormat};

/// `lens configure show`: effective config (file + environment).
pub fn show(config: &AppConfig, fmt: OutputFormat) -> Result<()> {
    let path = lens_core::workspace::config_path()?;
    let output = ConfigOutput::new(path.display().to_string(), config.entries());

    render(fmt, &output)?;

    if fmt == OutputFormat::Table {
        println!();
        println!("Tip: Change settings with `lens configure set <key> <value>`.");
    }
    Ok(())
}

/// `lens configure set <key> <value>`: persists to config.toml only.
pub fn set(key: &str, value: &str, fmt: OutputFormat) -> Result<()> {
    lens_core::workspace::set_config_value(key, value)?;

    let shown = if key == "api.api_key" && !value.is_empty() {
        mask_secret(value)
    } else {
        value.to_string()
    };

    let json = serde_json::json!({ "ok": true, "key": key, "value": shown });
    if !render_json_or(fmt, &json)? {
        println!("✓ {key} = {shown}");
    }
    Ok(())
}
