//! Token transfer types.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use super::Token;

/// Plain ERC-20 transfer request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendIntent {
    pub token: Token,
    pub recipient: Address,
    /// Amount in smallest units.
    pub amount: U256,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub tx_hash: String,
    pub token: String,
    pub recipient: String,
    pub amount: String,
}
