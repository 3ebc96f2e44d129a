//! Limit order types.

use alloy::primitives::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Token;

/// Sell `amount_in` of `token_in` once it buys at least `limit_price`
/// `token_out` per unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitOrderIntent {
    pub token_in: Token,
    pub token_out: Token,
    /// Amount to sell in smallest units.
    pub amount_in: U256,
    /// Output tokens per input token.
    pub limit_price: Decimal,
}

/// Lifecycle of a locally held limit order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OrderStatus {
    Open,
    /// Swap submitted by the keeper, awaiting the outcome.
    Executing,
    Filled { tx_hash: String },
    Cancelled,
    Failed { reason: String },
}

impl OrderStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, OrderStatus::Open)
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Open => "open",
            OrderStatus::Executing => "executing",
            OrderStatus::Filled { .. } => "filled",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Failed { .. } => "failed",
        }
    }
}

/// An order held by the keeper.
#[derive(Debug, Clone)]
pub struct LimitOrder {
    pub id: u64,
    pub intent: LimitOrderIntent,
    /// `amount_in × limit_price` in the output token's smallest units.
    pub target_amount_out: U256,
    pub status: OrderStatus,
    /// Unix timestamp of placement.
    pub created_at: u64,
}

/// Limit order as reported to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitOrderView {
    pub id: u64,
    pub token_in: String,
    pub token_out: String,
    pub amount_in: String,
    pub limit_price: String,
    pub target_amount_out: String,
    pub status: OrderStatus,
    pub created_at: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&OrderStatus::Filled { tx_hash: "0xabc".into() }).unwrap();
        assert_eq!(json, r#"{"state":"filled","tx_hash":"0xabc"}"#);
        assert_eq!(serde_json::to_string(&OrderStatus::Open).unwrap(), r#"{"state":"open"}"#);
    }

    #[test]
    fn test_status_label() {
        assert!(OrderStatus::Open.is_open());
        assert!(!OrderStatus::Executing.is_open());
        assert_eq!(OrderStatus::Failed { reason: "x".into() }.label(), "failed");
    }
}
