//! Environment-driven configuration.
//!
//! Everything comes from the process environment (a local `.env` is loaded
//! first). Only the connection and deployment addresses are required; all
//! engine tuning has conservative defaults.

use crate::swap::EngineConfig;
use crate::types::FeeTier;
use alloy::primitives::{Address, U256};
use anyhow::{bail, Context, Result};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub rpc_url: String,
    pub private_key: String,
    /// Uniswap V3 SwapRouter.
    pub swap_router: Address,
    /// Stable asset every swap lands in.
    pub stable_token: Address,
    /// Bridge asset for two-hop routes (WETH on mainnet).
    pub bridge_token: Address,
    pub fee_tiers: Vec<FeeTier>,
    pub slippage_bps: u32,
    pub gas_reserve_wei: U256,
    /// Default transaction validity window in seconds.
    pub deadline_secs: u64,
    pub gas_limit_single: u64,
    pub gas_limit_two_hop: u64,
    pub explorer_url: String,
    /// DexScreener chain slug for price lookups.
    pub dexscreener_chain: String,
    /// Tokens shown in the balance report.
    pub watchlist: Vec<Address>,
    /// Tokens pinned to $1 in price lookups.
    pub stablecoins: Vec<Address>,
}

impl BotConfig {
    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            router: self.swap_router,
            stable_token: self.stable_token,
            bridge_token: self.bridge_token,
            fee_tiers: self.fee_tiers.clone(),
            slippage_bps: self.slippage_bps,
            gas_reserve_wei: self.gas_reserve_wei,
            gas_limit_single: self.gas_limit_single,
            gas_limit_two_hop: self.gas_limit_two_hop,
        }
    }
}

pub fn load_config() -> Result<BotConfig> {
    dotenv::dotenv().ok();

    let stable_token = env_address("STABLE_TOKEN")?;
    let slippage_bps = env_parse("SLIPPAGE_BPS", 50u32)?;
    if slippage_bps >= 10_000 {
        bail!("SLIPPAGE_BPS must be below 10000 (100%), got {slippage_bps}");
    }

    let mut stablecoins = match env::var("STABLECOINS") {
        Ok(raw) => parse_address_list(&raw)?,
        Err(_) => Vec::new(),
    };
    if !stablecoins.contains(&stable_token) {
        stablecoins.push(stable_token);
    }

    Ok(BotConfig {
        rpc_url: env::var("RPC_URL").context("RPC_URL must be set")?,
        private_key: env::var("PRIVATE_KEY").context("PRIVATE_KEY must be set")?,
        swap_router: env_address("SWAP_ROUTER")?,
        stable_token,
        bridge_token: env_address("BRIDGE_TOKEN")?,
        fee_tiers: match env::var("FEE_TIERS") {
            Ok(raw) => parse_fee_tiers(&raw)?,
            Err(_) => FeeTier::ALL.to_vec(),
        },
        slippage_bps,
        gas_reserve_wei: env_parse("GAS_RESERVE_WEI", U256::from(1_000_000_000_000_000u64))?,
        deadline_secs: env_parse("DEADLINE_SECS", 1200u64)?,
        gas_limit_single: env_parse("GAS_LIMIT_SINGLE", 300_000u64)?,
        gas_limit_two_hop: env_parse("GAS_LIMIT_TWO_HOP", 500_000u64)?,
        explorer_url: env::var("EXPLORER_URL")
            .unwrap_or_else(|_| "https://etherscan.io".to_string()),
        dexscreener_chain: env::var("DEXSCREENER_CHAIN")
            .unwrap_or_else(|_| "ethereum".to_string()),
        watchlist: match env::var("WATCHLIST") {
            Ok(raw) => parse_address_list(&raw)?,
            Err(_) => Vec::new(),
        },
        stablecoins,
    })
}

fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} is not a valid value: {raw}")),
        Err(_) => Ok(default),
    }
}

fn env_address(key: &str) -> Result<Address> {
    env::var(key)
        .with_context(|| format!("{key} must be set"))?
        .trim()
        .parse()
        .with_context(|| format!("{key} is not a valid address"))
}

/// Comma-separated address list, e.g. "0xabc...,0xdef...".
pub fn parse_address_list(raw: &str) -> Result<Vec<Address>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse()
                .with_context(|| format!("invalid address in list: {s}"))
        })
        .collect()
}

/// Comma-separated fee tiers in hundredths of a bip, e.g. "500,3000".
pub fn parse_fee_tiers(raw: &str) -> Result<Vec<FeeTier>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let ppm: u32 = s
                .parse()
                .with_context(|| format!("invalid fee tier: {s}"))?;
            FeeTier::from_ppm(ppm)
                .with_context(|| format!("unsupported fee tier: {ppm} (want 100/500/3000/10000)"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fee_tiers() {
        assert_eq!(
            parse_fee_tiers("500, 3000").unwrap(),
            vec![FeeTier::Low, FeeTier::Medium]
        );
        assert_eq!(parse_fee_tiers("100,500,3000,10000").unwrap().len(), 4);
        assert!(parse_fee_tiers("2500").is_err());
        assert!(parse_fee_tiers("abc").is_err());
    }

    #[test]
    fn test_parse_address_list() {
        let raw = "0xdAC17F958D2ee523a2206206994597C13D831ec7, \
                   0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";
        let list = parse_address_list(raw).unwrap();
        assert_eq!(list.len(), 2);
        assert!(parse_address_list("").unwrap().is_empty());
        assert!(parse_address_list("0x123").is_err());
    }
}
