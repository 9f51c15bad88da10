//! Formatting helpers for table output.

use chrono::{DateTime, Utc};

/// Render an RFC3339 block timestamp as `YYYY-MM-DD HH:MM:SS UTC`.
/// Anything that doesn't parse is returned unchanged.
pub fn format_block_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts
            .with_timezone(&Utc)
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Attribute values are arbitrary JSON; strings print without quotes.
pub fn format_attribute_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "—".to_string(),
        other => other.to_string(),
    }
}

/// Fall back to a dash for empty fields.
pub fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "—"
    } else {
        s
    }
}

/// Shorten a hex hash/address to `0x1234…abcd` for table cells.
pub fn short_hex(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 14 {
        return s.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_block_timestamp() {
        assert_eq!(
            format_block_timestamp("2024-05-01T10:20:30.000Z"),
            "2024-05-01 10:20:30 UTC"
        );
        assert_eq!(
            format_block_timestamp("2024-05-01T12:20:30+02:00"),
            "2024-05-01 10:20:30 UTC"
        );
    }

    #[test]
    fn test_format_block_timestamp_passthrough() {
        assert_eq!(format_block_timestamp(""), "");
        assert_eq!(format_block_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_format_attribute_value() {
        assert_eq!(format_attribute_value(&serde_json::json!("Red")), "Red");
        assert_eq!(format_attribute_value(&serde_json::json!(42)), "42");
        assert_eq!(format_attribute_value(&serde_json::json!(true)), "true");
        assert_eq!(format_attribute_value(&serde_json::Value::Null), "—");
    }

    #[test]
    fn test_short_hex() {
        assert_eq!(short_hex("0xabc"), "0xabc");
        assert_eq!(
            short_hex("0x1234567890abcdef1234567890abcdef12345678"),
            "0x1234…5678"
        );
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(""), "—");
        assert_eq!(or_dash("x"), "x");
    }
}
