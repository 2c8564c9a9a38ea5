//! CLI entrypoint: balance report, transfers, and best-route swaps into
//! the configured stable asset.

use alloy::primitives::{utils::format_units, Address};
use alloy::providers::ProviderBuilder;
use alloy::signers::local::PrivateKeySigner;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use stableswap_bot::balances;
use stableswap_bot::chain::{BalanceReader, EvmChainClient};
use stableswap_bot::config::load_config;
use stableswap_bot::price::PriceFeed;
use stableswap_bot::swap::SwapExecutor;
use stableswap_bot::transfer::{transfer, TransferRequest};
use stableswap_bot::types::SwapRequest;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stableswap-bot", about = "Best-route token swaps into a stable asset")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report wallet balances over the configured watchlist, with USD values
    Balances,
    /// Send native currency or an ERC-20 out of the wallet
    Transfer {
        /// Token address, or 0x0000000000000000000000000000000000000000 for native
        token: Address,
        /// Recipient address
        to: Address,
        /// Amount in human units, e.g. "0.25"
        amount: String,
    },
    /// Sell a token into the configured stable asset at the best route
    Swap {
        /// Token address to sell
        token: Address,
        /// Amount in human units, e.g. "100"
        amount: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config()?;

    let signer: PrivateKeySigner = config
        .private_key
        .parse()
        .context("PRIVATE_KEY is not a valid private key")?;
    let wallet = signer.address();
    let provider = Arc::new(
        ProviderBuilder::new()
            .wallet(signer)
            .connect_http(config.rpc_url.parse().context("RPC_URL is not a valid URL")?),
    );
    let chain = EvmChainClient::new(provider, wallet, config.swap_router);

    let native = chain.native_balance().await?;
    info!(
        "🔑 wallet {wallet} | {} native",
        format_units(native, 18).unwrap_or_else(|_| native.to_string())
    );

    match args.command {
        Command::Balances => {
            let prices = PriceFeed::new(config.dexscreener_chain.clone(), config.stablecoins.clone());
            let rows = balances::report(&chain, &config.watchlist, &prices).await?;
            if rows.is_empty() {
                info!("no non-zero watchlist balances");
            }
            for row in rows {
                match row.usd {
                    Some(usd) => info!("{}  {}  (${usd:.2})", row.token, row.balance),
                    None => info!("{}  {}", row.token, row.balance),
                }
            }
        }
        Command::Transfer { token, to, amount } => {
            let request = TransferRequest { token, to, amount };
            let tx = transfer(&chain, config.gas_reserve_wei, &request).await?;
            info!("✅ transfer confirmed: {}/tx/{tx}", config.explorer_url.trim_end_matches('/'));
        }
        Command::Swap { token, amount } => {
            let request = SwapRequest {
                token_in: token,
                amount,
                recipient: wallet,
                deadline_secs: config.deadline_secs,
            };
            let executor = SwapExecutor::new(chain, config.engine());
            match executor.execute(&request).await {
                Ok(outcome) => {
                    info!("✅ swapped via {}", outcome.route);
                    if let Some(balance) = &outcome.stable_balance {
                        info!("stable balance now {}", balance.to_human());
                    }
                    info!("{}", outcome.explorer_link(&config.explorer_url));
                }
                Err(e) => {
                    error!("swap failed at stage {}: {e}", e.stage());
                    return Err(e.into());
                }
            }
        }
    }

    Ok(())
}
