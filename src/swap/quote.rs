//! Quote Engine
//!
//! Real-amount simulation against a proven fee tier, plus the slippage
//! discount that turns an expected output into a minimum acceptable output.
//! A revert here is a hard `QuoteFailed` — the tier already probed
//! successfully, so the pool is supposed to exist.

use crate::chain::{FeeQuotable, Simulation};
use crate::error::SwapError;
use crate::types::{FeeTier, Quote, Route};
use alloy::primitives::{Address, U256};
use tracing::debug;

/// Apply the slippage tolerance: `expected_out * (10_000 - bps) / 10_000`,
/// integer arithmetic, rounding down.
pub fn minimum_out(expected_out: U256, slippage_bps: u32) -> U256 {
    debug_assert!(slippage_bps < 10_000, "slippage must be below 100%");
    let keep = U256::from(10_000u32.saturating_sub(slippage_bps));
    expected_out * keep / U256::from(10_000u32)
}

pub struct QuoteEngine<'a, C: FeeQuotable> {
    chain: &'a C,
    slippage_bps: u32,
}

impl<'a, C: FeeQuotable> QuoteEngine<'a, C> {
    pub fn new(chain: &'a C, slippage_bps: u32) -> Self {
        Self {
            chain,
            slippage_bps,
        }
    }

    /// Quote the real amount at a proven fee tier.
    pub async fn quote(
        &self,
        token_in: Address,
        token_out: Address,
        fee: FeeTier,
        amount_in: U256,
    ) -> Result<Quote, SwapError> {
        match self
            .chain
            .simulate_exact_input(token_in, token_out, fee, amount_in)
            .await?
        {
            Simulation::Output(expected_out) => {
                let min_out = minimum_out(expected_out, self.slippage_bps);
                debug!(
                    "quote: {amount_in} {token_in} -> {expected_out} {token_out} @ {fee} (min {min_out})"
                );
                Ok(Quote {
                    expected_out,
                    min_out,
                })
            }
            Simulation::Reverted(reason) => Err(SwapError::QuoteFailed {
                token_in,
                token_out,
                fee,
                reason,
            }),
        }
    }

    /// Quote a planned route end to end.
    ///
    /// For two-hop routes the minimum-out of leg 1 is fed into leg 2's
    /// quote, so the tolerance compounds across hops. This mirrors the
    /// original engine's deliberate risk-aversion; do not collapse it into
    /// a single end-to-end tolerance.
    pub async fn quote_route(
        &self,
        route: &Route,
        token_in: Address,
        token_out: Address,
        amount_in: U256,
    ) -> Result<Quote, SwapError> {
        match route {
            Route::Direct { fee } => self.quote(token_in, token_out, *fee, amount_in).await,
            Route::TwoHop {
                bridge,
                first,
                second,
            } => {
                let leg1 = self.quote(token_in, *bridge, *first, amount_in).await?;
                self.quote(*bridge, token_out, *second, leg1.min_out).await
            }
        }
    }
}
