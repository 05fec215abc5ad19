//! token-sentry - Token Safety Gate
//!
//! Fetches a token snapshot, checks reputation and bundled supply, then
//! stores or blacklists the token.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use token_sentry::adapters::cli::{BlacklistCmd, CheckCmd, CliApp, Command, ShowCmd};
use token_sentry::adapters::{DexScreenerClient, RugCheckClient, SqliteTokenStore};
use token_sentry::application::{ConfigBlacklist, Outcome, TokenPipeline};
use token_sentry::config::load_config;
use token_sentry::ports::TokenStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if it exists (endpoint/database overrides)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    init_logging(app.verbose, app.debug)?;

    match app.command {
        Command::Check(cmd) => check_command(cmd).await,
        Command::Show(cmd) => show_command(cmd),
        Command::Blacklist(cmd) => blacklist_command(cmd),
    }
}

fn init_logging(verbose: bool, debug: bool) -> Result<()> {
    let default_level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {}", e))
}

async fn check_command(cmd: CheckCmd) -> Result<()> {
    let config = load_config(&cmd.config)
        .with_context(|| format!("Failed to load configuration from {}", cmd.config.display()))?;

    let market_data = DexScreenerClient::new(config.get_dex_api_url())
        .context("Failed to create market data client")?;
    let reputation = RugCheckClient::new(config.get_rugcheck_api_url())
        .context("Failed to create RugCheck client")?;

    let db_path = config.database_path();
    let store = SqliteTokenStore::open(&db_path)
        .with_context(|| format!("Failed to open token database {}", db_path.display()))?;

    let bundling = config.bundling_detector();
    let blacklist = ConfigBlacklist::new(config, &cmd.config);

    let mut pipeline = TokenPipeline::new(market_data, reputation, store, blacklist)
        .with_bundling_detector(bundling);

    let outcomes = pipeline
        .evaluate_all(&cmd.addresses)
        .await
        .context("Failed to evaluate tokens")?;
    for (address, outcome) in &outcomes {
        report(address, outcome);
    }

    Ok(())
}

fn report(address: &str, outcome: &Outcome) {
    match outcome {
        Outcome::Persisted(record) => println!(
            "Token {} saved to database (price {}, liquidity {}, market cap {}, age {} days)",
            address, record.price, record.liquidity, record.market_cap, record.token_age_days
        ),
        Outcome::RejectedNoData => println!("Failed to process token data for {}", address),
        other => println!("Token {} rejected: {}", address, other),
    }
}

fn show_command(cmd: ShowCmd) -> Result<()> {
    let config = load_config(&cmd.config).context("Failed to load configuration")?;
    let store = SqliteTokenStore::open(config.database_path())
        .context("Failed to open token database")?;

    match store.get(&cmd.address)? {
        Some(token) => {
            println!("Token:      {}", token.token_address);
            println!("Price:      {}", token.price);
            println!("Volume:     {}", token.volume);
            println!("Liquidity:  {}", token.liquidity);
            println!("Market cap: {}", token.market_cap);
            println!("Created:    {}", token.pair_created_at);
            println!("Developer:  {}", token.developer_address);
        }
        None => println!("Token {} not found ({} tokens stored)", cmd.address, store.count()?),
    }

    Ok(())
}

fn blacklist_command(cmd: BlacklistCmd) -> Result<()> {
    let config = load_config(&cmd.config).context("Failed to load configuration")?;

    println!("Blacklisted tokens ({}):", config.blacklist.tokens.len());
    for token in &config.blacklist.tokens {
        println!("  {}", token);
    }
    println!("Blacklisted developers ({}):", config.blacklist.developers.len());
    for developer in &config.blacklist.developers {
        println!("  {}", developer);
    }

    Ok(())
}
