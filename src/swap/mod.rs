//! Best-route token-swap engine.
//!
//! Control flow: [`SwapExecutor`] → [`RoutePlanner`] → [`FeeTierProber`] →
//! [`QuoteEngine`], with the executor performing precondition checks and
//! approval/submission directly against the Chain Client.

mod executor;
mod planner;
mod prober;
mod quote;

pub use executor::{encode_path, EngineConfig, SwapExecutor};
pub use planner::RoutePlanner;
pub use prober::FeeTierProber;
pub use quote::{minimum_out, QuoteEngine};
