//! Fee-Tier Prober
//!
//! Pool existence cannot be queried without a routing oracle, so it is
//! inferred from simulation success: a one-unit exact-input swap that
//! reverts means "no pool / no liquidity at this tier". A revert is an
//! expected probe miss, not an error — only transport failures propagate.

use crate::chain::{FeeQuotable, Simulation};
use crate::error::SwapError;
use crate::types::FeeTier;
use alloy::primitives::{Address, U256};
use tracing::debug;

/// Minimal amount used for existence probes.
const PROBE_AMOUNT: u64 = 1;

pub struct FeeTierProber<'a, C: FeeQuotable> {
    chain: &'a C,
    candidates: Vec<FeeTier>,
}

impl<'a, C: FeeQuotable> FeeTierProber<'a, C> {
    /// Candidates are sorted ascending and deduplicated at construction, so
    /// the lowest fee deterministically wins regardless of configuration
    /// order.
    pub fn new(chain: &'a C, mut candidates: Vec<FeeTier>) -> Self {
        candidates.sort_unstable();
        candidates.dedup();
        Self { chain, candidates }
    }

    /// Returns the cheapest fee tier with a working pool for the pair, or
    /// `None` if no candidate simulates successfully.
    pub async fn probe(
        &self,
        token_in: Address,
        token_out: Address,
    ) -> Result<Option<FeeTier>, SwapError> {
        for &fee in &self.candidates {
            match self
                .chain
                .simulate_exact_input(token_in, token_out, fee, U256::from(PROBE_AMOUNT))
                .await?
            {
                Simulation::Output(_) => {
                    debug!("probe hit: {token_in} -> {token_out} @ {fee}");
                    return Ok(Some(fee));
                }
                Simulation::Reverted(reason) => {
                    debug!("probe miss: {token_in} -> {token_out} @ {fee}: {reason}");
                }
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::mock::MockChain;

    fn addr(b: u8) -> Address {
        Address::repeat_byte(b)
    }

    #[tokio::test]
    async fn test_probe_returns_lowest_successful_tier() {
        let token = addr(0x01);
        let stable = addr(0x02);
        let chain = MockChain::new(addr(0xff))
            .with_pool(token, stable, FeeTier::Low, 2, 1)
            .with_pool(token, stable, FeeTier::Medium, 2, 1);

        let prober = FeeTierProber::new(&chain, FeeTier::ALL.to_vec());
        let found = prober.probe(token, stable).await.unwrap();
        assert_eq!(found, Some(FeeTier::Low));
    }

    #[tokio::test]
    async fn test_probe_honors_fee_order_not_candidate_order() {
        let token = addr(0x01);
        let stable = addr(0x02);
        let chain = MockChain::new(addr(0xff))
            .with_pool(token, stable, FeeTier::Lowest, 1, 1)
            .with_pool(token, stable, FeeTier::High, 1, 1);

        // Candidates deliberately given highest-first
        let prober = FeeTierProber::new(
            &chain,
            vec![FeeTier::High, FeeTier::Medium, FeeTier::Low, FeeTier::Lowest],
        );
        let found = prober.probe(token, stable).await.unwrap();
        assert_eq!(found, Some(FeeTier::Lowest));
    }

    #[tokio::test]
    async fn test_probe_not_found_when_all_tiers_revert() {
        let token = addr(0x01);
        let stable = addr(0x02);
        let chain = MockChain::new(addr(0xff));

        let prober = FeeTierProber::new(&chain, FeeTier::ALL.to_vec());
        let found = prober.probe(token, stable).await.unwrap();
        assert_eq!(found, None);

        // All four candidates were tried before giving up
        assert_eq!(chain.simulated_pairs().len(), 4);
    }

    #[tokio::test]
    async fn test_probe_short_circuits_on_first_hit() {
        let token = addr(0x01);
        let stable = addr(0x02);
        let chain = MockChain::new(addr(0xff)).with_pool(token, stable, FeeTier::Lowest, 1, 1);

        let prober = FeeTierProber::new(&chain, FeeTier::ALL.to_vec());
        prober.probe(token, stable).await.unwrap();
        assert_eq!(chain.simulated_pairs().len(), 1);
    }

    #[tokio::test]
    async fn test_probe_scenario_fee_500_only() {
        // Token with a direct pool at the 0.05% tier only — the other
        // tiers revert and are skipped silently.
        let token = addr(0x0a);
        let stable = addr(0x0b);
        let chain = MockChain::new(addr(0xff)).with_pool(token, stable, FeeTier::Low, 3, 1);

        let prober = FeeTierProber::new(&chain, FeeTier::ALL.to_vec());
        let found = prober.probe(token, stable).await.unwrap();
        assert_eq!(found.map(FeeTier::ppm), Some(500));
    }
}
