//! Recording mock Chain Client for engine tests.
//!
//! Pools are keyed by (token_in, token_out, fee); a simulation against a
//! missing key reverts, matching the live router behavior. Every call is
//! recorded so tests can assert ordering and absence of side effects.

use super::{
    Approvable, BalanceReader, FeeQuotable, PathSwap, Simulation, SingleSwap, SwapSubmitter,
    Transferable,
};
use crate::types::FeeTier;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    NativeBalance,
    TokenDecimals(Address),
    TokenBalance(Address),
    Simulate {
        token_in: Address,
        token_out: Address,
        fee: FeeTier,
        amount_in: U256,
    },
    Approve {
        token: Address,
        spender: Address,
        amount: U256,
    },
    SwapSingle {
        fee: FeeTier,
        amount_in: U256,
        min_out: U256,
        gas_limit: u64,
    },
    SwapPath {
        path: Bytes,
        amount_in: U256,
        min_out: U256,
        gas_limit: u64,
    },
    TransferNative {
        to: Address,
        amount: U256,
    },
    TransferToken {
        token: Address,
        to: Address,
        amount: U256,
    },
}

impl MockCall {
    fn is_mutating(&self) -> bool {
        matches!(
            self,
            MockCall::Approve { .. }
                | MockCall::SwapSingle { .. }
                | MockCall::SwapPath { .. }
                | MockCall::TransferNative { .. }
                | MockCall::TransferToken { .. }
        )
    }
}

/// Pool behavior: simulated output = amount_in * num / den.
#[derive(Debug, Clone, Copy)]
pub struct Rate {
    pub num: u64,
    pub den: u64,
}

pub struct MockChain {
    pub wallet: Address,
    pub native: U256,
    pub balances: HashMap<Address, U256>,
    pub decimals: HashMap<Address, u8>,
    pub pools: HashMap<(Address, Address, FeeTier), Rate>,
    pub fail_approval: Option<String>,
    pub fail_swap: Option<String>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockChain {
    pub fn new(wallet: Address) -> Self {
        Self {
            wallet,
            // 1 native unit by default — comfortably above any reserve
            native: U256::from(10u64).pow(U256::from(18u64)),
            balances: HashMap::new(),
            decimals: HashMap::new(),
            pools: HashMap::new(),
            fail_approval: None,
            fail_swap: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_native(mut self, wei: U256) -> Self {
        self.native = wei;
        self
    }

    pub fn with_balance(mut self, token: Address, raw: U256) -> Self {
        self.balances.insert(token, raw);
        self
    }

    pub fn with_decimals(mut self, token: Address, decimals: u8) -> Self {
        self.decimals.insert(token, decimals);
        self
    }

    pub fn with_pool(
        mut self,
        token_in: Address,
        token_out: Address,
        fee: FeeTier,
        num: u64,
        den: u64,
    ) -> Self {
        self.pools.insert((token_in, token_out, fee), Rate { num, den });
        self
    }

    pub fn with_failing_approval(mut self, reason: &str) -> Self {
        self.fail_approval = Some(reason.to_string());
        self
    }

    pub fn with_failing_swap(mut self, reason: &str) -> Self {
        self.fail_swap = Some(reason.to_string());
        self
    }

    fn record(&self, call: MockCall) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutating_calls(&self) -> Vec<MockCall> {
        self.calls()
            .into_iter()
            .filter(MockCall::is_mutating)
            .collect()
    }

    pub fn simulated_pairs(&self) -> Vec<(Address, Address)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                MockCall::Simulate {
                    token_in,
                    token_out,
                    ..
                } => Some((token_in, token_out)),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl FeeQuotable for MockChain {
    async fn simulate_exact_input(
        &self,
        token_in: Address,
        token_out: Address,
        fee: FeeTier,
        amount_in: U256,
    ) -> Result<Simulation> {
        self.record(MockCall::Simulate {
            token_in,
            token_out,
            fee,
            amount_in,
        });
        match self.pools.get(&(token_in, token_out, fee)) {
            Some(rate) => Ok(Simulation::Output(
                amount_in * U256::from(rate.num) / U256::from(rate.den),
            )),
            None => Ok(Simulation::Reverted("execution reverted".to_string())),
        }
    }
}

#[async_trait]
impl BalanceReader for MockChain {
    fn wallet_address(&self) -> Address {
        self.wallet
    }

    async fn native_balance(&self) -> Result<U256> {
        self.record(MockCall::NativeBalance);
        Ok(self.native)
    }

    async fn token_balance(&self, token: Address, _owner: Address) -> Result<U256> {
        self.record(MockCall::TokenBalance(token));
        Ok(self.balances.get(&token).copied().unwrap_or(U256::ZERO))
    }

    async fn token_decimals(&self, token: Address) -> Result<u8> {
        self.record(MockCall::TokenDecimals(token));
        self.decimals
            .get(&token)
            .copied()
            .ok_or_else(|| anyhow!("decimals() reverted for {token}"))
    }
}

#[async_trait]
impl Approvable for MockChain {
    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxHash> {
        self.record(MockCall::Approve {
            token,
            spender,
            amount,
        });
        match &self.fail_approval {
            Some(reason) => Err(anyhow!("{reason}")),
            None => Ok(TxHash::repeat_byte(0xaa)),
        }
    }
}

#[async_trait]
impl SwapSubmitter for MockChain {
    async fn swap_single(&self, swap: SingleSwap, gas_limit: u64) -> Result<TxHash> {
        self.record(MockCall::SwapSingle {
            fee: swap.fee,
            amount_in: swap.amount_in,
            min_out: swap.min_out,
            gas_limit,
        });
        match &self.fail_swap {
            Some(reason) => Err(anyhow!("{reason}")),
            None => Ok(TxHash::repeat_byte(0xbb)),
        }
    }

    async fn swap_path(&self, swap: PathSwap, gas_limit: u64) -> Result<TxHash> {
        self.record(MockCall::SwapPath {
            path: swap.path,
            amount_in: swap.amount_in,
            min_out: swap.min_out,
            gas_limit,
        });
        match &self.fail_swap {
            Some(reason) => Err(anyhow!("{reason}")),
            None => Ok(TxHash::repeat_byte(0xcc)),
        }
    }
}

#[async_trait]
impl Transferable for MockChain {
    async fn transfer_native(&self, to: Address, amount: U256) -> Result<TxHash> {
        self.record(MockCall::TransferNative { to, amount });
        Ok(TxHash::repeat_byte(0xdd))
    }

    async fn transfer_token(&self, token: Address, to: Address, amount: U256) -> Result<TxHash> {
        self.record(MockCall::TransferToken { token, to, amount });
        Ok(TxHash::repeat_byte(0xee))
    }
}
