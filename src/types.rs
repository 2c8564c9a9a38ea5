//! Core data model for the swap engine.
//!
//! All amounts are integers in the token's smallest unit (`U256`) — human
//! unit conversion goes through alloy's `parse_units`/`format_units`, never
//! floating point. Every entity here is short-lived: created and consumed
//! within a single swap attempt, never persisted across attempts.

use alloy::primitives::{
    utils::{format_units, parse_units},
    Address, TxHash, U256,
};
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Uniswap V3 fee tiers, expressed in parts-per-million
/// (hundredths of a basis point). Ordering follows the fee rate, so sorting
/// candidates yields the prober's lowest-fee-first preference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FeeTier {
    /// 0.01% — stablecoin pairs
    Lowest,
    /// 0.05% — stable/correlated pairs
    Low,
    /// 0.30% — standard tier
    Medium,
    /// 1.00% — exotic pairs
    High,
}

impl FeeTier {
    /// All tiers, ascending by fee. The default probe candidate set.
    pub const ALL: [FeeTier; 4] = [FeeTier::Lowest, FeeTier::Low, FeeTier::Medium, FeeTier::High];

    /// Fee in parts-per-million, as used by the router ABI.
    pub fn ppm(self) -> u32 {
        match self {
            FeeTier::Lowest => 100,
            FeeTier::Low => 500,
            FeeTier::Medium => 3000,
            FeeTier::High => 10000,
        }
    }

    /// Parse a ppm value from configuration.
    pub fn from_ppm(ppm: u32) -> Option<Self> {
        match ppm {
            100 => Some(FeeTier::Lowest),
            500 => Some(FeeTier::Low),
            3000 => Some(FeeTier::Medium),
            10000 => Some(FeeTier::High),
            _ => None,
        }
    }

    /// Fee as a percentage (e.g. 0.05 for the 500 ppm tier).
    pub fn percent(self) -> f64 {
        self.ppm() as f64 / 10000.0
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// A token identity plus an integer amount in its smallest unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenAmount {
    pub token: Address,
    pub raw: U256,
    pub decimals: u8,
}

impl TokenAmount {
    /// Decimal-normalize a human-units amount string (e.g. "1.5").
    pub fn from_human(token: Address, amount: &str, decimals: u8) -> Result<Self> {
        let parsed = parse_units(amount, decimals)?;
        ensure!(!parsed.is_negative(), "amount must not be negative: {amount}");
        Ok(Self {
            token,
            raw: parsed.get_absolute(),
            decimals,
        })
    }

    /// Render back to human units.
    pub fn to_human(&self) -> String {
        format_units(self.raw, self.decimals).unwrap_or_else(|_| self.raw.to_string())
    }
}

/// The liquidity path selected for a swap attempt. Valid only if every leg
/// independently probed successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Single pool, token_in → token_out.
    Direct { fee: FeeTier },
    /// Two pools via an intermediate bridge asset, in one transaction.
    TwoHop {
        bridge: Address,
        first: FeeTier,
        second: FeeTier,
    },
}

impl Route {
    pub fn is_direct(&self) -> bool {
        matches!(self, Route::Direct { .. })
    }

    /// Gas-limit ceiling for this route shape. Two-hop performs two pool
    /// interactions in one transaction and gets the higher ceiling.
    pub fn gas_limit(&self, single: u64, two_hop: u64) -> u64 {
        match self {
            Route::Direct { .. } => single,
            Route::TwoHop { .. } => two_hop,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Route::Direct { fee } => write!(f, "direct pool @ {fee} fee"),
            Route::TwoHop {
                bridge,
                first,
                second,
            } => write!(f, "via bridge {bridge} @ {first} + {second} fees"),
        }
    }
}

/// Expected output plus the slippage-discounted minimum acceptable output.
/// Ephemeral: computed immediately before use, never cached across
/// transactions (price may move between probe and execution).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub expected_out: U256,
    pub min_out: U256,
}

/// One user invocation of the swap engine. Discarded after the attempt
/// completes, success or failure.
#[derive(Debug, Clone)]
pub struct SwapRequest {
    /// Token to sell.
    pub token_in: Address,
    /// Amount in human units (e.g. "1.5"); decimal-normalized by the executor.
    pub amount: String,
    /// Recipient of the stable proceeds — normally the wallet itself.
    pub recipient: Address,
    /// Relative window after which the transaction must not execute.
    pub deadline_secs: u64,
}

/// Result of a confirmed swap.
#[derive(Debug, Clone)]
pub struct SwapOutcome {
    pub tx_hash: TxHash,
    pub route: Route,
    pub amount_in: TokenAmount,
    pub quote: Quote,
    /// Post-swap destination-asset balance, best-effort (None if the
    /// read-back failed; the swap itself already succeeded).
    pub stable_balance: Option<TokenAmount>,
}

impl SwapOutcome {
    /// Block-explorer link for the swap transaction.
    pub fn explorer_link(&self, explorer_base: &str) -> String {
        format!("{}/tx/{}", explorer_base.trim_end_matches('/'), self.tx_hash)
    }
}
