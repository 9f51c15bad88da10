//! Unified output rendering: JSON or human-readable table.
//!
//! Usage:
//! ```ignore
//! use lens_utils::output::{OutputFormat, render};
//!
//! let data = NftListOutput::from_page(&address, page);
//! render(format, &data)?;
//! ```

use anyhow::Result;
use serde::Serialize;

use lens_common::record::NormalizedRecord;
use lens_types::output::*;

use crate::format::{format_attribute_value, format_block_timestamp, or_dash, short_hex};

/// Attributes shown per NFT in table mode.
pub const MAX_ATTRIBUTES_SHOWN: usize = 4;

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table (default).
    Table,
    /// Compact JSON (for piping to jq, scripts).
    Json,
    /// Pretty-printed JSON (for reading).
    JsonPretty,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        !matches!(self, OutputFormat::Table)
    }
}

/// Trait for types that can render as a human-readable table.
///
/// Implementors build their lines; printing is shared so the layout can be
/// asserted in tests.
pub trait TableDisplay {
    fn table_lines(&self) -> Vec<String>;

    fn print_table(&self) {
        for line in self.table_lines() {
            println!("{line}");
        }
    }
}

/// Render structured output as JSON or table depending on format.
pub fn render<T: Serialize + TableDisplay>(format: OutputFormat, data: &T) -> Result<()> {
    if !render_json_or(format, data)? {
        data.print_table();
    }
    Ok(())
}

/// Render just the JSON formats (for types that handle their own table display).
/// Returns true if JSON was rendered, false if table mode was requested.
pub fn render_json_or<T: Serialize>(format: OutputFormat, data: &T) -> Result<bool> {
    match format {
        OutputFormat::Table => Ok(false),
        OutputFormat::Json => {
            let json = serde_json::to_string(data)?;
            println!("{json}");
            Ok(true)
        }
        OutputFormat::JsonPretty => {
            let json = serde_json::to_string_pretty(data)?;
            println!("{json}");
            Ok(true)
        }
    }
}

// ─── TableDisplay implementations for output types ──────────────────

impl TableDisplay for NftListOutput {
    fn table_lines(&self) -> Vec<String> {
        if self.nfts.is_empty() {
            return vec![format!("No NFTs found ({}).", self.source)];
        }

        let mut lines = vec![
            "╔══════════════════════════════════════════════════════════╗".to_string(),
            format!("║  NFTS: {:<50}║", self.source),
            format!("║  Found {:<50}║", format!("{} NFT(s)", self.nfts.len())),
            "╚══════════════════════════════════════════════════════════╝".to_string(),
        ];

        for (i, nft) in self.nfts.iter().enumerate() {
            lines.push(format!("NFT #{}", i + 1));
            lines.extend(nft_lines(nft));
            lines.push(String::new());
        }

        if let Some(cursor) = &self.cursor {
            lines.push(format!("Next page: --cursor {cursor}"));
        }
        lines
    }
}

/// Detail block for one NFT.
pub fn nft_lines(nft: &NormalizedRecord) -> Vec<String> {
    let floor = match (nft.floor_price.as_str(), nft.floor_price_currency.as_str()) {
        ("", _) => "—".to_string(),
        (price, "") => price.to_string(),
        (price, currency) => format!("{price} {}", currency.to_uppercase()),
    };

    let mut lines = vec![
        format!("  Token ID    : {}", or_dash(&nft.token_id)),
        format!("  Name        : {}", or_dash(&nft.name)),
        format!("  Contract    : {}", or_dash(&nft.token_address)),
        format!("  Floor Price : {floor}"),
    ];
    if let Some(rank) = nft.rarity_rank {
        lines.push(format!("  Rarity Rank : {rank}"));
    }
    lines.push(format!(
        "  Verified    : {}",
        if nft.is_verified { "✓" } else { "✗" }
    ));
    lines.extend(attribute_lines(nft));
    lines
}

/// Up to [`MAX_ATTRIBUTES_SHOWN`] attributes sorted by trait name, then a
/// "... and N more" line for the rest.
pub fn attribute_lines(nft: &NormalizedRecord) -> Vec<String> {
    if nft.attributes.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<_> = nft.attributes.iter().collect();
    sorted.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut lines = vec!["  Attributes  :".to_string()];
    for (trait_type, value) in sorted.iter().take(MAX_ATTRIBUTES_SHOWN) {
        lines.push(format!("    {trait_type}: {}", format_attribute_value(value)));
    }
    if sorted.len() > MAX_ATTRIBUTES_SHOWN {
        lines.push(format!(
            "    ... and {} more",
            sorted.len() - MAX_ATTRIBUTES_SHOWN
        ));
    }
    lines
}

impl TableDisplay for HistoryOutput {
    fn table_lines(&self) -> Vec<String> {
        if self.transactions.is_empty() {
            return vec!["No transactions found".to_string()];
        }

        let mut lines = vec![
            "┌──────────────┬──────────────┬──────────────┬──────────────────────┬─────────────────────────┐".to_string(),
            "│ Hash         │ From         │ To           │ Value (wei)          │ Block Time              │".to_string(),
            "├──────────────┼──────────────┼──────────────┼──────────────────────┼─────────────────────────┤".to_string(),
        ];
        for tx in &self.transactions {
            lines.push(format!(
                "│ {:<12} │ {:<12} │ {:<12} │ {:>20} │ {:<23} │",
                short_hex(or_dash(&tx.hash)),
                short_hex(or_dash(&tx.from_address)),
                short_hex(or_dash(&tx.to_address)),
                or_dash(&tx.value),
                format_block_timestamp(or_dash(&tx.block_timestamp)),
            ));
        }
        lines.push(
            "└──────────────┴──────────────┴──────────────┴──────────────────────┴─────────────────────────┘".to_string(),
        );
        lines.push(format!(
            "{} transaction(s) for {} (page {})",
            self.transactions.len(),
            self.address,
            self.page
        ));
        if let Some(cursor) = &self.cursor {
            lines.push(format!("Next page: --cursor {cursor}"));
        }
        lines
    }
}

impl TableDisplay for ConfigOutput {
    fn table_lines(&self) -> Vec<String> {
        let mut lines = vec![
            "╔══════════════════════════════════════════════════════════╗".to_string(),
            "║  NFTLENS CONFIGURATION                                   ║".to_string(),
            "╠══════════════════════════════════════════════════════════╣".to_string(),
        ];
        for entry in &self.entries {
            lines.push(format!("║  {:<24}: {:<31}║", entry.key, entry.value));
        }
        lines.push("╚══════════════════════════════════════════════════════════╝".to_string());
        lines.push(format!("File: {}", self.path));
        lines
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn nft_with_attrs(n: usize) -> NormalizedRecord {
        let attributes: HashMap<String, serde_json::Value> = (0..n)
            .map(|i| (format!("Trait{i}"), serde_json::json!(format!("v{i}"))))
            .collect();
        NormalizedRecord {
            token_id: "1".into(),
            attributes,
            ..Default::default()
        }
    }

    #[test]
    fn test_attribute_lines_truncated_after_four() {
        let lines = attribute_lines(&nft_with_attrs(6));
        // header + 4 shown + "... and N more"
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "    Trait0: v0");
        assert_eq!(lines[4], "    Trait3: v3");
        assert_eq!(lines[5], "    ... and 2 more");
    }

    #[test]
    fn test_attribute_lines_exactly_four_has_no_more_line() {
        let lines = attribute_lines(&nft_with_attrs(4));
        assert_eq!(lines.len(), 5);
        assert!(!lines.iter().any(|l| l.contains("more")));
    }

    #[test]
    fn test_attribute_lines_empty() {
        assert!(attribute_lines(&nft_with_attrs(0)).is_empty());
    }

    #[test]
    fn test_nft_lines_rarity_only_when_present() {
        let mut nft = nft_with_attrs(0);
        assert!(!nft_lines(&nft).iter().any(|l| l.contains("Rarity")));
        nft.rarity_rank = Some(7);
        assert!(nft_lines(&nft).iter().any(|l| l.contains("Rarity Rank : 7")));
    }

    #[test]
    fn test_nft_lines_floor_price() {
        let mut nft = nft_with_attrs(0);
        assert!(nft_lines(&nft).contains(&"  Floor Price : —".to_string()));
        nft.floor_price = "12.5".into();
        nft.floor_price_currency = "ron".into();
        assert!(nft_lines(&nft).contains(&"  Floor Price : 12.5 RON".to_string()));
    }

    #[test]
    fn test_empty_nft_list() {
        let out = NftListOutput::from_lookup(2, vec![]);
        assert_eq!(out.table_lines(), vec!["No NFTs found (2 tokens)."]);
    }

    #[test]
    fn test_nft_list_shows_cursor() {
        let out = NftListOutput {
            source: "wallet 0xabc".into(),
            page: Some(1),
            cursor: Some("c1".into()),
            nfts: vec![nft_with_attrs(1)],
        };
        let lines = out.table_lines();
        assert!(lines.iter().any(|l| l == "NFT #1"));
        assert_eq!(lines.last().unwrap(), "Next page: --cursor c1");
    }

    #[test]
    fn test_empty_history() {
        let out = HistoryOutput {
            address: "0xabc".into(),
            page: 0,
            page_size: 10,
            cursor: None,
            transactions: vec![],
        };
        assert_eq!(out.table_lines(), vec!["No transactions found"]);
    }

    #[test]
    fn test_history_rows() {
        let tx = NormalizedRecord {
            hash: "0x1234567890abcdef1234567890abcdef".into(),
            from_address: "0xfrom".into(),
            to_address: "0xto".into(),
            value: "1000".into(),
            block_timestamp: "2024-05-01T10:20:30.000Z".into(),
            ..Default::default()
        };
        let out = HistoryOutput {
            address: "0xabc".into(),
            page: 0,
            page_size: 10,
            cursor: None,
            transactions: vec![tx],
        };
        let lines = out.table_lines();
        let row = &lines[3];
        assert!(row.contains("0x1234…cdef"));
        assert!(row.contains("2024-05-01 10:20:30 UTC"));
        assert!(row.contains("1000"));
        assert!(lines.iter().any(|l| l.starts_with("1 transaction(s) for 0xabc")));
    }

    #[test]
    fn test_config_lines() {
        let out = ConfigOutput::new(
            "/home/u/.nftlens/config.toml".into(),
            vec![("api.chain".into(), "ronin".into())],
        );
        let lines = out.table_lines();
        assert!(lines.iter().any(|l| l.contains("api.chain") && l.contains("ronin")));
        assert_eq!(lines.last().unwrap(), "File: /home/u/.nftlens/config.toml");
    }

    #[test]
    fn test_output_format_is_json() {
        assert!(!OutputFormat::Table.is_json());
        assert!(OutputFormat::Json.is_json());
        assert!(OutputFormat::JsonPretty.is_json());
    }

    #[test]
    fn test_render_json_or_table_returns_false() {
        let out = ConfigOutput::new(String::new(), vec![]);
        assert!(!render_json_or(OutputFormat::Table, &out).unwrap());
    }
}
