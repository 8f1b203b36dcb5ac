use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cashport_client::auth::{Credentials, fetch_access_token};
use cashport_client::transport::HttpTransport;
use cashport_core::aggregate::aggregate;
use cashport_export::{write_ledger_csv, write_workbook};

mod cache;
mod config;
mod fetch;

use fetch::AccountSnapshot;

#[derive(Parser, Debug)]
#[command(name = "cashport", version, about = "Cash account transaction export tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch all transaction data and write the CSV and workbook exports
    Export {
        /// Replay the raw-response cache instead of fetching live
        #[arg(long)]
        use_cache: bool,

        /// Ledger CSV path (default: from config)
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Workbook path (default: from config)
        #[arg(long)]
        workbook: Option<PathBuf>,

        /// Skip the ledger CSV
        #[arg(long)]
        skip_csv: bool,

        /// Skip the workbook
        #[arg(long)]
        skip_workbook: bool,
    },

    /// Fetch and cache raw responses without writing exports
    Fetch,

    /// Config management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default ~/.cashport/config.toml
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Export { use_cache, csv, workbook, skip_csv, skip_workbook } => {
            let cfg = config::load_config()?;
            let snapshot = if use_cache {
                println!("Using cache!");
                AccountSnapshot::new(cache::load_cache(&cfg.export.cache_file)?)
            } else {
                live_snapshot(&cfg).await?
            };

            let rules = cfg.rules.inclusion_rules()?;
            let kept = rules.resolve(snapshot.transactions()?);
            let agg = aggregate(kept);
            let balance = snapshot.balance()?;

            if !skip_workbook {
                let path = workbook.unwrap_or_else(|| PathBuf::from(&cfg.export.workbook_file));
                write_workbook(&agg, balance, &path)?;
                println!("Wrote {}", path.display());
            }
            if !skip_csv {
                let path = csv.unwrap_or_else(|| PathBuf::from(&cfg.export.csv_file));
                write_ledger_csv(&agg, &path)?;
                println!("Wrote {}", path.display());
            }
            println!("Export complete!");
        }

        Command::Fetch => {
            let cfg = config::load_config()?;
            live_snapshot(&cfg).await?;
            println!("Cached raw responses to {}", cfg.export.cache_file);
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
        },
    }

    Ok(())
}

/// Fetch everything live and refresh the raw-response cache.
async fn live_snapshot(cfg: &config::Config) -> Result<AccountSnapshot> {
    let token = access_token(cfg).await?;
    let transport = HttpTransport::new(&cfg.api.graphql_url, &token)?;
    let snapshot = fetch::fetch_snapshot(&transport, &cfg.account.id).await?;
    cache::save_cache(&cfg.export.cache_file, &snapshot.queries)?;
    Ok(snapshot)
}

/// A pre-acquired token wins; otherwise run the password+OTP flow.
async fn access_token(cfg: &config::Config) -> Result<String> {
    if let Ok(token) = std::env::var("CASHPORT_ACCESS_TOKEN") {
        if !token.is_empty() {
            return Ok(token);
        }
    }

    let username = env_credential("CASHPORT_USERNAME")?;
    let password = env_credential("CASHPORT_PASSWORD")?;
    let otp = env_credential("CASHPORT_OTP")?;
    let credentials = Credentials { username, password, otp };

    let token = fetch_access_token(&cfg.api.token_url, &cfg.api.client_id, &cfg.api.scope, &credentials)
        .await
        .context("acquiring access token")?;
    Ok(token)
}

fn env_credential(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.is_empty() => Ok(v),
        _ => bail!(
            "{name} is not set. Either export CASHPORT_ACCESS_TOKEN, or set \
             CASHPORT_USERNAME, CASHPORT_PASSWORD and CASHPORT_OTP"
        ),
    }
}
