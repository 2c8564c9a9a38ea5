//! Wallet transfer helper.
//!
//! Sends native currency or an ERC-20 out of the bot wallet, with the same
//! gas-reserve guard the swap engine applies before it spends anything.

use crate::chain::{BalanceReader, Transferable};
use crate::types::TokenAmount;
use alloy::primitives::{
    utils::{format_units, parse_units},
    Address, TxHash, U256,
};
use anyhow::{bail, ensure, Context, Result};
use tracing::info;

const NATIVE_DECIMALS: u8 = 18;

/// One outbound transfer. `token == Address::ZERO` means native currency.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub token: Address,
    pub to: Address,
    /// Amount in human units (e.g. "0.25").
    pub amount: String,
}

pub async fn transfer<C: BalanceReader + Transferable>(
    chain: &C,
    gas_reserve_wei: U256,
    request: &TransferRequest,
) -> Result<TxHash> {
    let native = chain.native_balance().await?;
    if native < gas_reserve_wei {
        bail!("native balance {native} wei is below the {gas_reserve_wei} wei gas reserve");
    }

    if request.token == Address::ZERO {
        let parsed = parse_units(&request.amount, NATIVE_DECIMALS)
            .context("invalid native transfer amount")?;
        ensure!(!parsed.is_negative(), "amount must not be negative");
        let wei = parsed.get_absolute();
        ensure!(
            native >= wei + gas_reserve_wei,
            "sending {} would dip into the gas reserve",
            request.amount
        );
        let tx = chain.transfer_native(request.to, wei).await?;
        info!("sent {} native to {} in {tx}", request.amount, request.to);
        return Ok(tx);
    }

    let decimals = chain
        .token_decimals(request.token)
        .await
        .with_context(|| format!("could not read decimals for {}", request.token))?;
    let amount = TokenAmount::from_human(request.token, &request.amount, decimals)?;
    let held = chain
        .token_balance(request.token, chain.wallet_address())
        .await?;
    ensure!(
        held >= amount.raw,
        "insufficient balance: you have {}, requested {}",
        format_units(held, decimals).unwrap_or_else(|_| held.to_string()),
        request.amount
    );
    let tx = chain
        .transfer_token(request.token, request.to, amount.raw)
        .await?;
    info!(
        "sent {} of {} to {} in {tx}",
        request.amount, request.token, request.to
    );
    Ok(tx)
}
