//! Route Planner
//!
//! Decides between a direct pool and a bridged two-hop route. A direct
//! pool always wins when one exists, even if the bridged path would price
//! better; less surface, less gas.

use crate::chain::FeeQuotable;
use crate::error::SwapError;
use crate::swap::prober::FeeTierProber;
use crate::types::{FeeTier, Route};
use alloy::primitives::Address;
use tracing::{debug, info};

pub struct RoutePlanner<'a, C: FeeQuotable> {
    prober: FeeTierProber<'a, C>,
    bridge: Address,
}

impl<'a, C: FeeQuotable> RoutePlanner<'a, C> {
    pub fn new(chain: &'a C, bridge: Address, candidates: Vec<FeeTier>) -> Self {
        Self {
            prober: FeeTierProber::new(chain, candidates),
            bridge,
        }
    }

    /// Find a viable route from `token_in` to `token_out`.
    ///
    /// The direct pair is probed first; only when no direct pool responds
    /// are the two bridge legs probed (in parallel). No viable route at
    /// all is `NoLiquidity`.
    pub async fn plan(&self, token_in: Address, token_out: Address) -> Result<Route, SwapError> {
        if let Some(fee) = self.prober.probe(token_in, token_out).await? {
            info!("route: direct pool at {fee}");
            return Ok(Route::Direct { fee });
        }
        debug!("no direct pool for {token_in} -> {token_out}, trying bridge {}", self.bridge);

        let (first, second) = tokio::join!(
            self.prober.probe(token_in, self.bridge),
            self.prober.probe(self.bridge, token_out),
        );
        match (first?, second?) {
            (Some(first), Some(second)) => {
                info!("route: two-hop via {} ({first} / {second})", self.bridge);
                Ok(Route::TwoHop {
                    bridge: self.bridge,
                    first,
                    second,
                })
            }
            _ => Err(SwapError::NoLiquidity {
                token_in,
                token_out,
            }),
        }
    }
}
