//! Swap Executor
//!
//! Drives one swap attempt front to back: preconditions, route planning,
//! approval, quoting, submission, confirmation. Linear state machine —
//! any failure is terminal for the attempt and reports the stage it died
//! at. Nothing is retried; the caller re-invokes if it wants another go.

use crate::chain::{ChainClient, PathSwap, SingleSwap};
use crate::error::{Stage, SwapError};
use crate::swap::quote::QuoteEngine;
use crate::swap::RoutePlanner;
use crate::types::{FeeTier, Route, SwapOutcome, SwapRequest, TokenAmount};
use alloy::primitives::{Address, Bytes, U256};
use anyhow::Context;
use tracing::{info, warn};

/// Everything the executor needs to know about the deployment it targets.
/// Built once from configuration; requests vary per invocation.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Uniswap V3 SwapRouter address.
    pub router: Address,
    /// Destination stable asset of every swap.
    pub stable_token: Address,
    /// Intermediate asset for two-hop routes (WETH on mainnet).
    pub bridge_token: Address,
    /// Fee tiers to probe, cheapest first.
    pub fee_tiers: Vec<FeeTier>,
    /// Slippage tolerance in basis points (50 = 0.5%).
    pub slippage_bps: u32,
    /// Native balance below this refuses to start a swap.
    pub gas_reserve_wei: U256,
    /// Gas ceiling for single-pool swaps.
    pub gas_limit_single: u64,
    /// Gas ceiling for two-hop swaps.
    pub gas_limit_two_hop: u64,
}

pub struct SwapExecutor<C: ChainClient> {
    chain: C,
    config: EngineConfig,
}

impl<C: ChainClient> SwapExecutor<C> {
    pub fn new(chain: C, config: EngineConfig) -> Self {
        Self { chain, config }
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }

    /// Run one swap attempt to completion.
    pub async fn execute(&self, request: &SwapRequest) -> Result<SwapOutcome, SwapError> {
        let cfg = &self.config;
        let wallet = self.chain.wallet_address();

        // ── Preconditions ──
        let native = self.chain.native_balance().await?;
        if native < cfg.gas_reserve_wei {
            return Err(SwapError::InsufficientGas {
                balance: native,
                reserve: cfg.gas_reserve_wei,
            });
        }

        let decimals = self
            .chain
            .token_decimals(request.token_in)
            .await
            .map_err(|e| SwapError::MetadataUnavailable {
                token: request.token_in,
                reason: format!("{e:#}"),
            })?;
        let amount_in = TokenAmount::from_human(request.token_in, &request.amount, decimals)
            .context("invalid swap amount")?;

        let held = self.chain.token_balance(request.token_in, wallet).await?;
        if held < amount_in.raw {
            let available = TokenAmount {
                token: request.token_in,
                raw: held,
                decimals,
            };
            return Err(SwapError::InsufficientTokenBalance {
                available: available.to_human(),
                requested: request.amount.clone(),
            });
        }
        info!(stage = %Stage::PreconditionsChecked, "selling {} of {}", request.amount, request.token_in);

        // ── Route planning ──
        let planner = RoutePlanner::new(&self.chain, cfg.bridge_token, cfg.fee_tiers.clone());
        let route = planner.plan(request.token_in, cfg.stable_token).await?;
        info!(stage = %Stage::RoutePlanned, "selected {route}");

        // ── Approval ──
        // Exact-amount allowance, granted only once a route exists.
        let approval_tx = self
            .chain
            .approve(request.token_in, cfg.router, amount_in.raw)
            .await
            .map_err(|e| SwapError::ApprovalFailed {
                token: request.token_in,
                router: cfg.router,
                reason: format!("{e:#}"),
            })?;
        info!(stage = %Stage::Approved, "router allowance confirmed in {approval_tx}");

        // ── Quote ──
        let quoter = QuoteEngine::new(&self.chain, cfg.slippage_bps);
        let quote = quoter
            .quote_route(&route, request.token_in, cfg.stable_token, amount_in.raw)
            .await?;
        info!(
            stage = %Stage::Quoted,
            "expecting {} out, floor {}", quote.expected_out, quote.min_out
        );

        // ── Submission ──
        let deadline = unix_now() + request.deadline_secs;
        let gas_limit = route.gas_limit(cfg.gas_limit_single, cfg.gas_limit_two_hop);
        let submitted = match route {
            Route::Direct { fee } => {
                self.chain
                    .swap_single(
                        SingleSwap {
                            token_in: request.token_in,
                            token_out: cfg.stable_token,
                            fee,
                            recipient: request.recipient,
                            deadline,
                            amount_in: amount_in.raw,
                            min_out: quote.min_out,
                        },
                        gas_limit,
                    )
                    .await
            }
            Route::TwoHop {
                bridge,
                first,
                second,
            } => {
                let path = encode_path(request.token_in, first, bridge, second, cfg.stable_token);
                self.chain
                    .swap_path(
                        PathSwap {
                            path,
                            recipient: request.recipient,
                            deadline,
                            amount_in: amount_in.raw,
                            min_out: quote.min_out,
                        },
                        gas_limit,
                    )
                    .await
            }
        };
        let tx_hash = submitted.map_err(|e| SwapError::SwapReverted {
            route: route.to_string(),
            reason: format!("{e:#}"),
        })?;
        info!(stage = %Stage::Confirmed, "swap confirmed in {tx_hash}");

        // Post-swap balance read is best-effort; the swap already landed.
        let stable_balance = self.read_stable_balance(wallet).await;

        Ok(SwapOutcome {
            tx_hash,
            route,
            amount_in,
            quote,
            stable_balance,
        })
    }

    async fn read_stable_balance(&self, wallet: Address) -> Option<TokenAmount> {
        let stable = self.config.stable_token;
        let (raw, decimals) = tokio::join!(
            self.chain.token_balance(stable, wallet),
            self.chain.token_decimals(stable),
        );
        match (raw, decimals) {
            (Ok(raw), Ok(decimals)) => Some(TokenAmount {
                token: stable,
                raw,
                decimals,
            }),
            (Err(e), _) | (_, Err(e)) => {
                warn!("post-swap balance read failed: {e:#}");
                None
            }
        }
    }
}

/// Pack a two-hop route the way the router's `exactInput` expects:
/// `token(20) | fee(3) | bridge(20) | fee(3) | token(20)`, fees big-endian.
pub fn encode_path(
    token_in: Address,
    first: FeeTier,
    bridge: Address,
    second: FeeTier,
    token_out: Address,
) -> Bytes {
    let mut path = Vec::with_capacity(66);
    path.extend_from_slice(token_in.as_slice());
    path.extend_from_slice(&first.ppm().to_be_bytes()[1..]);
    path.extend_from_slice(bridge.as_slice());
    path.extend_from_slice(&second.ppm().to_be_bytes()[1..]);
    path.extend_from_slice(token_out.as_slice());
    Bytes::from(path)
}

fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
