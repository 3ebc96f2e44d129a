//! On-chain pair types.

use alloy::primitives::{Address, U256};
use serde::Serialize;

/// Reserve snapshot of a Uniswap V2 pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairReserves {
    pub pair: Address,
    pub token0: Address,
    pub token1: Address,
    pub reserve0: U256,
    pub reserve1: U256,
    /// Total LP token supply.
    pub total_supply: U256,
}

impl PairReserves {
    /// Reserves ordered as `(reserve of token_a, reserve of the other token)`.
    pub fn oriented(&self, token_a: Address) -> (U256, U256) {
        if token_a == self.token0 {
            (self.reserve0, self.reserve1)
        } else {
            (self.reserve1, self.reserve0)
        }
    }

    /// Whether either side of the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.reserve0.is_zero() || self.reserve1.is_zero()
    }
}

/// Pool state reported by `get_pool_info`.
#[derive(Debug, Clone, Serialize)]
pub struct PoolSnapshot {
    /// Pair contract address.
    pub pair: String,
    pub token_a: String,
    pub token_b: String,
    /// Reserve of token A (human-readable).
    pub reserve_a: String,
    /// Reserve of token B (human-readable).
    pub reserve_b: String,
    /// Total LP supply (human-readable, 18 decimals).
    pub total_supply: String,
    /// Caller's LP balance (human-readable, 18 decimals).
    pub lp_balance: String,
    /// Caller's share of the pool as a percentage.
    pub pool_share: String,
}
