//! Best-route token liquidation engine over Uniswap V3.
//!
//! Sells an arbitrary ERC-20 into a configured stable asset, picking
//! between a direct pool and a bridged two-hop route by probing the
//! router's fee tiers, then executing with a slippage floor.

pub mod balances;
pub mod chain;
pub mod config;
pub mod contracts;
pub mod error;
pub mod price;
pub mod swap;
pub mod transfer;
pub mod types;

pub use chain::EvmChainClient;
pub use config::{load_config, BotConfig};
pub use error::{Stage, SwapError};
pub use swap::{EngineConfig, SwapExecutor};
pub use types::{FeeTier, Route, SwapOutcome, SwapRequest};
