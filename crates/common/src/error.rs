//! Universal error types for nftlens.
//!
//! Every error carries:
//! - **code**: machine-readable error code (e.g. `HTTP_STATUS`)
//! - **category**: error class (`auth`, `config`, `validation`, `network`, `upstream`, `cancelled`, `system`)
//! - **recoverable**: whether the caller can retry or fix
//! - **hints**: actionable suggestions for recovery
//!
//! JSON output format:
//! ```json
//! {
//!   "ok": false,
//!   "error": {
//!     "code": "HTTP_STATUS",
//!     "message": "fetch_by_wallet (0xabc…): API returned status 401",
//!     "category": "auth",
//!     "recoverable": true,
//!     "hints": ["Check MORALIS_API_KEY or run: lens configure set api.api_key <key>"]
//!   }
//! }
//! ```

use serde::Serialize;
use thiserror::Error;

/// Error category: determines exit code and recovery strategy.
///
/// Exit codes:
/// - `0`: success
/// - `1`: user error (auth, config, validation)
/// - `2`: network or upstream API error
/// - `3`: system error
/// - `130`: cancelled (Ctrl-C)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Auth,
    Config,
    Validation,
    Network,
    Upstream,
    Cancelled,
    System,
}

impl ErrorCategory {
    /// Process exit code for this category.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorCategory::Auth => 1,
            ErrorCategory::Config => 1,
            ErrorCategory::Validation => 1,
            ErrorCategory::Network => 2,
            ErrorCategory::Upstream => 2,
            ErrorCategory::System => 3,
            ErrorCategory::Cancelled => 130,
        }
    }
}

/// Structured error detail for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub category: ErrorCategory,
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
}

/// Top-level error type for all nftlens operations.
///
/// `operation` names the gateway call (`fetch_by_wallet`, `fetch_by_tokens`)
/// and `target` the wallet address or token batch it was issued for.
#[derive(Debug, Error)]
pub enum LensError {
    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ── Auth / Config ────────────────────────────────────────────────
    #[error("API key missing")]
    ApiKeyMissing,

    #[error("Configuration error: {0}")]
    Config(String),

    // ── Network ─────────────────────────────────────────────────────
    #[error("{operation} ({target}): transport error: {message}")]
    Transport {
        operation: String,
        target: String,
        message: String,
    },

    #[error("{operation} ({target}): API returned status {code}")]
    HttpStatus {
        operation: String,
        target: String,
        code: u16,
    },

    // ── Upstream shape ──────────────────────────────────────────────
    #[error("{operation} ({target}): failed to decode response: {message}")]
    Decode {
        operation: String,
        target: String,
        message: String,
    },

    // ── Lifecycle ───────────────────────────────────────────────────
    #[error("{operation}: cancelled")]
    Cancelled { operation: String },

    // ── System ───────────────────────────────────────────────────────
    #[error("I/O error: {0}")]
    Io(String),
}

impl LensError {
    pub fn transport(operation: &str, target: &str, err: impl std::fmt::Display) -> Self {
        LensError::Transport {
            operation: operation.to_string(),
            target: target.to_string(),
            message: err.to_string(),
        }
    }

    pub fn decode(operation: &str, target: &str, err: impl std::fmt::Display) -> Self {
        LensError::Decode {
            operation: operation.to_string(),
            target: target.to_string(),
            message: err.to_string(),
        }
    }

    pub fn cancelled(operation: &str) -> Self {
        LensError::Cancelled {
            operation: operation.to_string(),
        }
    }

    /// Get the structured error detail for JSON output.
    pub fn detail(&self) -> ErrorDetail {
        match self {
            LensError::InvalidArgument(msg) => ErrorDetail {
                code: "INVALID_ARGUMENT".into(),
                message: msg.clone(),
                category: ErrorCategory::Validation,
                recoverable: true,
                hints: vec!["Run: lens --help".into()],
            },
            LensError::ApiKeyMissing => ErrorDetail {
                code: "API_KEY_MISSING".into(),
                message: self.to_string(),
                category: ErrorCategory::Auth,
                recoverable: true,
                hints: vec![
                    "Set MORALIS_API_KEY in the environment or a .env file".into(),
                    "Or run: lens configure set api.api_key <key>".into(),
                ],
            },
            LensError::Config(msg) => ErrorDetail {
                code: "CONFIG_ERROR".into(),
                message: msg.clone(),
                category: ErrorCategory::Config,
                recoverable: true,
                hints: vec!["Check ~/.nftlens/config.toml or run: lens configure show".into()],
            },
            LensError::Transport { .. } => ErrorDetail {
                code: "TRANSPORT_ERROR".into(),
                message: self.to_string(),
                category: ErrorCategory::Network,
                recoverable: true,
                hints: vec![
                    "Check network connectivity".into(),
                    "Retry in a few seconds".into(),
                ],
            },
            LensError::HttpStatus { code, .. } => {
                let (category, hints) = match code {
                    401 | 403 => (
                        ErrorCategory::Auth,
                        vec!["Check MORALIS_API_KEY or run: lens configure set api.api_key <key>".into()],
                    ),
                    429 => (
                        ErrorCategory::Network,
                        vec!["Rate limited — retry later or lower --limit".into()],
                    ),
                    400..=499 => (
                        ErrorCategory::Validation,
                        vec!["Check the address, token id and filter values".into()],
                    ),
                    _ => (
                        ErrorCategory::Upstream,
                        vec!["Retry — the API may be temporarily unavailable".into()],
                    ),
                };
                ErrorDetail {
                    code: "HTTP_STATUS".into(),
                    message: self.to_string(),
                    category,
                    recoverable: true,
                    hints,
                }
            }
            LensError::Decode { .. } => ErrorDetail {
                code: "DECODE_ERROR".into(),
                message: self.to_string(),
                category: ErrorCategory::Upstream,
                recoverable: false,
                hints: vec!["Run with RUST_LOG=debug to inspect the request".into()],
            },
            LensError::Cancelled { .. } => ErrorDetail {
                code: "CANCELLED".into(),
                message: self.to_string(),
                category: ErrorCategory::Cancelled,
                recoverable: true,
                hints: vec![],
            },
            LensError::Io(msg) => ErrorDetail {
                code: "IO_ERROR".into(),
                message: msg.clone(),
                category: ErrorCategory::System,
                recoverable: false,
                hints: vec![],
            },
        }
    }

    /// Exit code: 0 success, 1 user error, 2 network, 3 system, 130 cancelled.
    pub fn exit_code(&self) -> i32 {
        self.detail().category.exit_code()
    }

    /// Serialize this error as the JSON error envelope.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "ok": false,
            "error": self.detail(),
        })
    }
}

pub type LensResult<T> = Result<T, LensError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_invalid_argument() {
        let err = LensError::InvalidArgument("token list is empty".into());
        let detail = err.detail();
        assert_eq!(detail.code, "INVALID_ARGUMENT");
        assert_eq!(detail.category, ErrorCategory::Validation);
        assert!(detail.recoverable);
    }

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(LensError::ApiKeyMissing.exit_code(), 1);
        assert_eq!(LensError::transport("fetch_by_wallet", "0xabc", "refused").exit_code(), 2);
        assert_eq!(LensError::decode("fetch_by_tokens", "2 tokens", "bad json").exit_code(), 2);
        assert_eq!(LensError::Io("disk full".into()).exit_code(), 3);
        assert_eq!(LensError::cancelled("fetch_by_wallet").exit_code(), 130);
    }

    #[test]
    fn test_http_status_category_by_code() {
        let status = |code| LensError::HttpStatus {
            operation: "fetch_by_wallet".into(),
            target: "0xabc".into(),
            code,
        };
        assert_eq!(status(401).detail().category, ErrorCategory::Auth);
        assert_eq!(status(404).detail().category, ErrorCategory::Validation);
        assert_eq!(status(429).detail().category, ErrorCategory::Network);
        assert_eq!(status(502).detail().category, ErrorCategory::Upstream);
    }

    #[test]
    fn test_error_message_carries_context() {
        let err = LensError::HttpStatus {
            operation: "fetch_by_wallet".into(),
            target: "0xabc".into(),
            code: 500,
        };
        let msg = err.to_string();
        assert!(msg.contains("fetch_by_wallet"));
        assert!(msg.contains("0xabc"));
        assert!(msg.contains("500"));
    }

    #[test]
    fn test_error_json_format() {
        let err = LensError::ApiKeyMissing;
        let json = err.to_json();
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"]["code"], "API_KEY_MISSING");
        assert_eq!(json["error"]["category"], "auth");
        assert_eq!(json["error"]["recoverable"], true);
        assert!(json["error"]["hints"].is_array());
    }

    #[test]
    fn test_error_json_no_empty_hints() {
        let err = LensError::Io("disk full".into());
        let serialized = serde_json::to_string(&err.detail()).unwrap();
        assert!(!serialized.contains("\"hints\""));
    }

    #[test]
    fn test_cancelled_distinct_from_transport() {
        let cancelled = LensError::cancelled("fetch_by_tokens").detail();
        let transport = LensError::transport("fetch_by_tokens", "1 token", "reset").detail();
        assert_ne!(cancelled.code, transport.code);
        assert_eq!(cancelled.category, ErrorCategory::Cancelled);
    }
}
