//! Swap engine error taxonomy.
//!
//! Every variant is terminal for the current attempt — nothing here is
//! retried automatically. The only retry-like behavior in the engine is the
//! fee-tier prober's candidate iteration, which is a search, not an error
//! path. `SwapError::stage()` maps each error back to the last executor
//! state the attempt had reached, so a failure log always reconstructs the
//! failing step.

use crate::types::FeeTier;
use alloy::primitives::{Address, U256};
use std::fmt;
use thiserror::Error;

/// Executor state machine stages. Linear, no loops back; failure is
/// terminal at every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Start,
    PreconditionsChecked,
    RoutePlanned,
    Approved,
    Quoted,
    Submitted,
    Confirmed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::PreconditionsChecked => "preconditions-checked",
            Stage::RoutePlanned => "route-planned",
            Stage::Approved => "approved",
            Stage::Quoted => "quoted",
            Stage::Submitted => "submitted",
            Stage::Confirmed => "confirmed",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Error)]
pub enum SwapError {
    #[error("insufficient gas: native balance {balance} wei is below the {reserve} wei reserve")]
    InsufficientGas { balance: U256, reserve: U256 },

    #[error("insufficient token balance: you have {available}, requested {requested}")]
    InsufficientTokenBalance { available: String, requested: String },

    #[error("could not read metadata for token {token}: {reason}")]
    MetadataUnavailable { token: Address, reason: String },

    #[error("no liquidity route found for {token_in} -> {token_out}")]
    NoLiquidity { token_in: Address, token_out: Address },

    #[error("quote failed for {token_in} -> {token_out} at {fee} fee tier: {reason}")]
    QuoteFailed {
        token_in: Address,
        token_out: Address,
        fee: FeeTier,
        reason: String,
    },

    #[error("approval of {token} for router {router} failed: {reason}")]
    ApprovalFailed {
        token: Address,
        router: Address,
        reason: String,
    },

    #[error("swap reverted ({route}): {reason}")]
    SwapReverted { route: String, reason: String },

    /// Transport-level Chain Client failure (RPC unreachable, decode error).
    #[error(transparent)]
    Chain(#[from] anyhow::Error),
}

impl SwapError {
    /// The last executor stage the attempt had completed when this error
    /// arose. `Chain` errors can surface anywhere and report `Start`.
    pub fn stage(&self) -> Stage {
        match self {
            SwapError::InsufficientGas { .. }
            | SwapError::InsufficientTokenBalance { .. }
            | SwapError::MetadataUnavailable { .. } => Stage::Start,
            SwapError::NoLiquidity { .. } => Stage::PreconditionsChecked,
            SwapError::ApprovalFailed { .. } => Stage::RoutePlanned,
            SwapError::QuoteFailed { .. } => Stage::Approved,
            SwapError::SwapReverted { .. } => Stage::Submitted,
            SwapError::Chain(_) => Stage::Start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_balance_message_carries_human_units() {
        let err = SwapError::InsufficientTokenBalance {
            available: "0.500000".to_string(),
            requested: "100".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("0.500000"));
        assert!(msg.contains("100"));
    }

    #[test]
    fn test_stage_mapping_is_monotonic_along_the_state_machine() {
        let gas = SwapError::InsufficientGas {
            balance: U256::ZERO,
            reserve: U256::from(1u64),
        };
        let no_liq = SwapError::NoLiquidity {
            token_in: Address::ZERO,
            token_out: Address::ZERO,
        };
        let approval = SwapError::ApprovalFailed {
            token: Address::ZERO,
            router: Address::ZERO,
            reason: "reverted".into(),
        };
        let quote = SwapError::QuoteFailed {
            token_in: Address::ZERO,
            token_out: Address::ZERO,
            fee: FeeTier::Low,
            reason: "reverted".into(),
        };
        let swap = SwapError::SwapReverted {
            route: "direct pool @ 0.05% fee".into(),
            reason: "STF".into(),
        };

        assert!(gas.stage() < no_liq.stage());
        assert!(no_liq.stage() < approval.stage());
        assert!(approval.stage() < quote.stage());
        assert!(quote.stage() < swap.stage());
    }
}
