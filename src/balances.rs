//! Wallet balance report over a configured token watchlist.

use crate::chain::BalanceReader;
use crate::price::PriceFeed;
use alloy::primitives::{utils::format_units, Address, U256};
use anyhow::Result;
use tracing::warn;

/// One row of the balance report. `usd` is best-effort.
#[derive(Debug, Clone)]
pub struct TokenBalanceRow {
    pub token: Address,
    pub balance: String,
    pub raw: U256,
    pub usd: Option<f64>,
}

/// Read the wallet's balance of every watchlist token and decorate with
/// USD prices. Zero and unreadable balances are skipped.
pub async fn report<C: BalanceReader>(
    chain: &C,
    watchlist: &[Address],
    prices: &PriceFeed,
) -> Result<Vec<TokenBalanceRow>> {
    let wallet = chain.wallet_address();
    let mut rows = Vec::new();

    for &token in watchlist {
        let raw = match chain.token_balance(token, wallet).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping {token}: balance read failed: {e:#}");
                continue;
            }
        };
        if raw.is_zero() {
            continue;
        }

        let decimals = match chain.token_decimals(token).await {
            Ok(d) => d,
            Err(e) => {
                warn!("{token}: decimals read failed, assuming 18: {e:#}");
                18
            }
        };
        let balance = format_units(raw, decimals).unwrap_or_else(|_| raw.to_string());
        let usd = match prices.price_usd(token).await {
            Some(price) => balance.parse::<f64>().ok().map(|b| b * price),
            None => None,
        };
        rows.push(TokenBalanceRow {
            token,
            balance,
            raw,
            usd,
        });
    }

    Ok(rows)
}
