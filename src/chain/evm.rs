//! Live Chain Client over an alloy provider.
//!
//! One concrete implementation of every capability trait, backed by the
//! generated `sol!` contract interfaces. Simulations go through `eth_call`
//! against the router; mutations are sent, then blocked on `get_receipt`
//! so confirmation is observed before control returns to the engine.

use super::{
    Approvable, BalanceReader, FeeQuotable, PathSwap, Simulation, SingleSwap, SwapSubmitter,
    Transferable,
};
use crate::contracts::{IERC20, ISwapRouter};
use crate::types::FeeTier;
use alloy::network::TransactionBuilder;
use alloy::primitives::aliases::U160;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

/// Deadline attached to read-only simulations. The call is evaluated
/// immediately, so any non-expired value works; matches the swap horizon.
const SIMULATION_DEADLINE_SECS: u64 = 60 * 20;

/// Helper: convert a fee tier to the alloy uint24 type for contract calls.
/// Uses from_limbs() because Uint<24, 1> doesn't impl From<u32>.
fn fee_to_u24(fee: FeeTier) -> alloy::primitives::Uint<24, 1> {
    alloy::primitives::Uint::from_limbs([fee.ppm() as u64])
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Chain Client backed by an alloy provider with a local signer.
pub struct EvmChainClient<P> {
    provider: Arc<P>,
    wallet: Address,
    router: Address,
}

impl<P: Provider + 'static> EvmChainClient<P> {
    pub fn new(provider: Arc<P>, wallet: Address, router: Address) -> Self {
        Self {
            provider,
            wallet,
            router,
        }
    }
}

#[async_trait]
impl<P: Provider + 'static> FeeQuotable for EvmChainClient<P> {
    async fn simulate_exact_input(
        &self,
        token_in: Address,
        token_out: Address,
        fee: FeeTier,
        amount_in: U256,
    ) -> Result<Simulation> {
        let router = ISwapRouter::new(self.router, self.provider.clone());
        let params = ISwapRouter::ExactInputSingleParams {
            tokenIn: token_in,
            tokenOut: token_out,
            fee: fee_to_u24(fee),
            recipient: Address::ZERO,
            deadline: U256::from(unix_now() + SIMULATION_DEADLINE_SECS),
            amountIn: amount_in,
            amountOutMinimum: U256::ZERO,
            sqrtPriceLimitX96: U160::ZERO,
        };

        match router.exactInputSingle(params).call().await {
            Ok(amount_out) => Ok(Simulation::Output(amount_out)),
            Err(e) => {
                // Revert text varies by node; anything that isn't an
                // execution revert is a transport failure and propagates.
                let text = e.to_string();
                if text.to_lowercase().contains("revert") {
                    debug!("simulation reverted: {token_in} -> {token_out} @ {fee}: {text}");
                    Ok(Simulation::Reverted(text))
                } else {
                    Err(anyhow::Error::new(e).context("exactInputSingle simulation failed"))
                }
            }
        }
    }
}

#[async_trait]
impl<P: Provider + 'static> BalanceReader for EvmChainClient<P> {
    fn wallet_address(&self) -> Address {
        self.wallet
    }

    async fn native_balance(&self) -> Result<U256> {
        self.provider
            .get_balance(self.wallet)
            .await
            .context("failed to read native balance")
    }

    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256> {
        IERC20::new(token, self.provider.clone())
            .balanceOf(owner)
            .call()
            .await
            .with_context(|| format!("failed to read balance of {token}"))
    }

    async fn token_decimals(&self, token: Address) -> Result<u8> {
        IERC20::new(token, self.provider.clone())
            .decimals()
            .call()
            .await
            .with_context(|| format!("failed to read decimals of {token}"))
    }
}

#[async_trait]
impl<P: Provider + 'static> Approvable for EvmChainClient<P> {
    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxHash> {
        let erc20 = IERC20::new(token, self.provider.clone());

        let pending = erc20
            .approve(spender, amount)
            .send()
            .await
            .context("approval send failed")?;
        let tx_hash = *pending.tx_hash();
        info!("Approval tx submitted: {tx_hash}");

        let receipt = pending
            .get_receipt()
            .await
            .context("approval confirmation failed")?;
        if !receipt.status() {
            return Err(anyhow!("approval transaction {tx_hash} reverted"));
        }

        info!("Approval confirmed: {tx_hash}");
        Ok(receipt.transaction_hash)
    }
}

#[async_trait]
impl<P: Provider + 'static> SwapSubmitter for EvmChainClient<P> {
    async fn swap_single(&self, swap: SingleSwap, gas_limit: u64) -> Result<TxHash> {
        let router = ISwapRouter::new(self.router, self.provider.clone());
        // sqrtPriceLimitX96 = 0 means no price limit (accept any price
        // within the minimum-out bound)
        let params = ISwapRouter::ExactInputSingleParams {
            tokenIn: swap.token_in,
            tokenOut: swap.token_out,
            fee: fee_to_u24(swap.fee),
            recipient: swap.recipient,
            deadline: U256::from(swap.deadline),
            amountIn: swap.amount_in,
            amountOutMinimum: swap.min_out,
            sqrtPriceLimitX96: U160::ZERO,
        };

        let pending = router
            .exactInputSingle(params)
            .gas(gas_limit)
            .send()
            .await
            .context("exactInputSingle send failed")?;
        let tx_hash = *pending.tx_hash();
        info!("Swap tx submitted: {tx_hash}");

        let receipt = pending
            .get_receipt()
            .await
            .context("swap confirmation failed")?;
        if !receipt.status() {
            return Err(anyhow!("swap transaction {tx_hash} reverted"));
        }
        Ok(receipt.transaction_hash)
    }

    async fn swap_path(&self, swap: PathSwap, gas_limit: u64) -> Result<TxHash> {
        let router = ISwapRouter::new(self.router, self.provider.clone());
        let params = ISwapRouter::ExactInputParams {
            path: swap.path,
            recipient: swap.recipient,
            deadline: U256::from(swap.deadline),
            amountIn: swap.amount_in,
            amountOutMinimum: swap.min_out,
        };

        let pending = router
            .exactInput(params)
            .gas(gas_limit)
            .send()
            .await
            .context("exactInput send failed")?;
        let tx_hash = *pending.tx_hash();
        info!("Swap tx submitted: {tx_hash}");

        let receipt = pending
            .get_receipt()
            .await
            .context("swap confirmation failed")?;
        if !receipt.status() {
            return Err(anyhow!("swap transaction {tx_hash} reverted"));
        }
        Ok(receipt.transaction_hash)
    }
}

#[async_trait]
impl<P: Provider + 'static> Transferable for EvmChainClient<P> {
    async fn transfer_native(&self, to: Address, amount: U256) -> Result<TxHash> {
        let tx = TransactionRequest::default()
            .with_to(to)
            .with_value(amount);

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .context("native transfer send failed")?;
        let tx_hash = *pending.tx_hash();

        let receipt = pending
            .get_receipt()
            .await
            .context("native transfer confirmation failed")?;
        if !receipt.status() {
            return Err(anyhow!("native transfer {tx_hash} reverted"));
        }
        Ok(receipt.transaction_hash)
    }

    async fn transfer_token(&self, token: Address, to: Address, amount: U256) -> Result<TxHash> {
        let erc20 = IERC20::new(token, self.provider.clone());

        let pending = erc20
            .transfer(to, amount)
            .send()
            .await
            .context("token transfer send failed")?;
        let tx_hash = *pending.tx_hash();

        let receipt = pending
            .get_receipt()
            .await
            .context("token transfer confirmation failed")?;
        if !receipt.status() {
            return Err(anyhow!("token transfer {tx_hash} reverted"));
        }
        Ok(receipt.transaction_hash)
    }
}
