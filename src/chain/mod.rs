//! Chain Client capability traits.
//!
//! The swap engine talks to the chain through narrow, strongly-typed
//! capabilities instead of loose contract call objects. Each engine
//! component is generic over exactly the capabilities it needs — the prober
//! and quote engine only simulate, the executor also approves and submits —
//! and the live [`EvmChainClient`] implements all of them once over an
//! alloy provider.
//!
//! Mutating capabilities (`Approvable`, `SwapSubmitter`, `Transferable`)
//! block until on-chain confirmation is observed: an unconfirmed
//! transaction is never followed by another submission against the same
//! wallet.

mod evm;

pub use evm::EvmChainClient;

#[cfg(test)]
pub(crate) mod mock;

use crate::types::FeeTier;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use anyhow::Result;
use async_trait::async_trait;

/// Result of a read-only swap simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Simulation {
    /// The call succeeded; expected output in the out-token's smallest unit.
    Output(U256),
    /// The call reverted; carries the provider's reason text.
    Reverted(String),
}

/// Parameters for a single-pool exact-input swap submission.
#[derive(Debug, Clone)]
pub struct SingleSwap {
    pub token_in: Address,
    pub token_out: Address,
    pub fee: FeeTier,
    pub recipient: Address,
    /// Unix timestamp after which the network must reject execution.
    pub deadline: u64,
    pub amount_in: U256,
    pub min_out: U256,
}

/// Parameters for a path-encoded multi-pool exact-input swap submission.
#[derive(Debug, Clone)]
pub struct PathSwap {
    /// Packed `token | fee | token | fee | token` route description.
    pub path: Bytes,
    pub recipient: Address,
    pub deadline: u64,
    pub amount_in: U256,
    pub min_out: U256,
}

/// Read-only exact-input swap simulation against the router. No state
/// change, no gas cost.
#[async_trait]
pub trait FeeQuotable: Send + Sync {
    async fn simulate_exact_input(
        &self,
        token_in: Address,
        token_out: Address,
        fee: FeeTier,
        amount_in: U256,
    ) -> Result<Simulation>;
}

/// Wallet identity plus on-chain balance and metadata reads.
#[async_trait]
pub trait BalanceReader: Send + Sync {
    fn wallet_address(&self) -> Address;
    async fn native_balance(&self) -> Result<U256>;
    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256>;
    async fn token_decimals(&self, token: Address) -> Result<u8>;
}

/// ERC-20 allowance mutation, confirmed before returning.
#[async_trait]
pub trait Approvable: Send + Sync {
    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxHash>;
}

/// Swap transaction submission. Returns the confirmed transaction hash, or
/// an error carrying the provider's text if the transaction reverted.
#[async_trait]
pub trait SwapSubmitter: Send + Sync {
    async fn swap_single(&self, swap: SingleSwap, gas_limit: u64) -> Result<TxHash>;
    async fn swap_path(&self, swap: PathSwap, gas_limit: u64) -> Result<TxHash>;
}

/// Native and ERC-20 value transfers, confirmed before returning.
#[async_trait]
pub trait Transferable: Send + Sync {
    async fn transfer_native(&self, to: Address, amount: U256) -> Result<TxHash>;
    async fn transfer_token(&self, token: Address, to: Address, amount: U256) -> Result<TxHash>;
}

/// Full Chain Client surface required by the swap executor.
pub trait ChainClient: FeeQuotable + BalanceReader + Approvable + SwapSubmitter {}

impl<T: FeeQuotable + BalanceReader + Approvable + SwapSubmitter> ChainClient for T {}
