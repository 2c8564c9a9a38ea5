//! USD price lookups via the DexScreener public API.
//!
//! Strictly best-effort: pricing decorates balance reports and never gates
//! a swap, so every failure path degrades to `None` instead of erroring.

use alloy::primitives::Address;
use serde::Deserialize;
use tracing::debug;

const DEXSCREENER_TOKENS_URL: &str = "https://api.dexscreener.com/latest/dex/tokens";

#[derive(Debug, Deserialize)]
struct TokensResponse {
    pairs: Option<Vec<PairInfo>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PairInfo {
    chain_id: String,
    price_usd: Option<String>,
}

pub struct PriceFeed {
    client: reqwest::Client,
    /// DexScreener chain slug (e.g. "ethereum").
    chain: String,
    /// Tokens pinned to $1.00 without a network round trip.
    stables: Vec<Address>,
}

impl PriceFeed {
    pub fn new(chain: String, stables: Vec<Address>) -> Self {
        Self {
            client: reqwest::Client::new(),
            chain,
            stables,
        }
    }

    /// USD price of a token, or `None` if no pair on our chain reports one.
    pub async fn price_usd(&self, token: Address) -> Option<f64> {
        if self.stables.contains(&token) {
            return Some(1.0);
        }

        let url = format!("{DEXSCREENER_TOKENS_URL}/{token}");
        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                debug!("price fetch failed for {token}: {e}");
                return None;
            }
        };
        let body: TokensResponse = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                debug!("price response malformed for {token}: {e}");
                return None;
            }
        };

        body.pairs?
            .into_iter()
            .filter(|p| p.chain_id == self.chain)
            .find_map(|p| p.price_usd?.parse::<f64>().ok())
    }
}
