mod commands;
mod factory;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use lens_common::error::LensError;
use lens_utils::output::OutputFormat;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use commands::nft::{GetNftsArgs, WalletNftsArgs};
use commands::wallet::HistoryArgs;

#[derive(Parser)]
#[command(
    name = "lens",
    about = "nftlens: NFT holdings, token lookups and wallet history on Ronin.\nEach command does one thing, outputs JSON with --output json.",
    version,
    propagate_version = true
)]
struct Cli {
    #[arg(long, short = 'o', global = true, default_value = "table")]
    output: CliOutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat { Table, Json, JsonPretty }

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> OutputFormat {
        match f {
            CliOutputFormat::Table => OutputFormat::Table,
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  TOP-LEVEL
// ═══════════════════════════════════════════════════════════════════════

#[derive(Subcommand)]
enum Commands {
    /// NFTs: wallet holdings and specific token lookups.
    Nft {
        #[command(subcommand)]
        action: NftAction,
    },

    /// Wallet activity.
    Wallet {
        #[command(subcommand)]
        action: WalletAction,
    },

    /// Show or change ~/.nftlens/config.toml.
    Configure {
        #[command(subcommand)]
        action: ConfigureAction,
    },
}

#[derive(Subcommand)]
enum NftAction {
    /// List NFTs held by a wallet (spam filtered out).
    Wallet(WalletNftsArgs),
    /// Look up specific NFTs by contract and token id.
    Get(GetNftsArgs),
}

#[derive(Subcommand)]
enum WalletAction {
    /// Transaction history of a wallet.
    History(HistoryArgs),
}

#[derive(Subcommand)]
enum ConfigureAction {
    /// Show the effective configuration.
    Show,
    /// Set a config key (e.g. api.api_key, defaults.wallet_address).
    Set { key: String, value: String },
}

// ═══════════════════════════════════════════════════════════════════════
//  ENTRY
// ═══════════════════════════════════════════════════════════════════════

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let fmt: OutputFormat = cli.output.into();

    if let Err(err) = run(cli, fmt).await {
        std::process::exit(report(&err, fmt));
    }
}

async fn run(cli: Cli, fmt: OutputFormat) -> Result<()> {
    // Environment from .env first, so it can feed both config and logging.
    let dotenv = dotenvy::dotenv();

    lens_core::init_workspace()?;
    // Tracing goes up before the config load so a migration is reported.
    init_tracing(&lens_core::workspace::startup_log_level());
    let config = lens_core::workspace::load_effective_config()?;

    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => warn!("no .env file found, using system environment"),
        Err(e) => warn!(error = %e, "failed to load .env"),
    }

    let cancel = commands::helpers::shutdown_token();

    match cli.command {
        Commands::Nft { action } => match action {
            NftAction::Wallet(args) => commands::nft::wallet(args, &config, fmt, &cancel).await,
            NftAction::Get(args) => commands::nft::get(args, &config, fmt, &cancel).await,
        },
        Commands::Wallet { action } => match action {
            WalletAction::History(args) => commands::wallet::history(args, &config, fmt, &cancel).await,
        },
        Commands::Configure { action } => match action {
            ConfigureAction::Show => commands::configure::show(&config, fmt),
            ConfigureAction::Set { key, value } => commands::configure::set(&key, &value, fmt),
        },
    }
}

/// `RUST_LOG` wins; otherwise the configured level (or `LOG_LEVEL`).
/// Logs go to stderr so stdout stays parseable.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Print the error in the requested format and pick the exit code.
fn report(err: &anyhow::Error, fmt: OutputFormat) -> i32 {
    match err.downcast_ref::<LensError>() {
        Some(lens) => {
            if fmt.is_json() {
                println!("{}", lens.to_json());
            } else {
                eprintln!("Error: {lens}");
                for hint in lens.detail().hints {
                    eprintln!("  → {hint}");
                }
            }
            lens.exit_code()
        }
        None => {
            if fmt.is_json() {
                let json = serde_json::json!({
                    "ok": false,
                    "error": {
                        "code": "INTERNAL",
                        "message": format!("{err:#}"),
                        "category": "system",
                        "recoverable": false,
                    }
                });
                println!("{json}");
            } else {
                eprintln!("Error: {err:#}");
            }
            3
        }
    }
}
