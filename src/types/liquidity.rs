//! Liquidity provision types.

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

use super::{Slippage, Token};

/// Add-liquidity request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidityIntent {
    pub token_a: Token,
    pub token_b: Token,
    /// Desired amount of token A in smallest units.
    pub amount_a: U256,
    /// Desired amount of token B in smallest units.
    pub amount_b: U256,
    pub slippage: Slippage,
}

/// Result of `create_pair`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairCreation {
    /// Pair contract address.
    pub pair: String,
    /// `false` when the pair already existed.
    pub created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
}

/// Result of a submitted add-liquidity transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquidityReceipt {
    pub tx_hash: String,
    /// Approval hashes in submission order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub approval_tx_hashes: Vec<String>,
    /// Set when the pair had to be created first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair_creation_tx_hash: Option<String>,
    pub pair: String,
    pub amount_a: String,
    pub amount_b: String,
    pub amount_a_min: String,
    pub amount_b_min: String,
    pub deadline: u64,
}
