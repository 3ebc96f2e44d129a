//! Swap-related types.

use alloy::primitives::U256;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::Token;
use crate::error::ValidationError;

/// Slippage tolerance as a percentage, `0..=50`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Slippage(Decimal);

impl Slippage {
    /// Upper bound accepted from user input.
    pub const MAX_PERCENT: u32 = 50;

    pub fn new(percent: Decimal) -> Result<Self, ValidationError> {
        if percent < Decimal::ZERO || percent > Decimal::from(Self::MAX_PERCENT) {
            return Err(ValidationError::SlippageOutOfRange);
        }
        Ok(Self(percent))
    }

    pub fn percent(&self) -> Decimal {
        self.0
    }

    /// Basis points, truncated (`0.55%` is 55, `0.555%` is 55).
    pub fn bps(&self) -> u32 {
        (self.0 * Decimal::from(100)).trunc().to_u32().unwrap_or(0)
    }

    /// Lowest acceptable amount when `amount` is expected.
    pub fn min_amount(&self, amount: U256) -> U256 {
        let bps = U256::from(self.bps());
        let denom = U256::from(10_000u64);
        amount.saturating_mul(denom - bps) / denom
    }
}

impl Default for Slippage {
    /// 0.5%.
    fn default() -> Self {
        Self(Decimal::new(5, 1))
    }
}

impl TryFrom<Decimal> for Slippage {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Slippage> for Decimal {
    fn from(value: Slippage) -> Self {
        value.0
    }
}

impl FromStr for Slippage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim()).map_err(|_| ValidationError::SlippageOutOfRange)?;
        Self::new(value)
    }
}

impl std::fmt::Display for Slippage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Exact-input swap request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapIntent {
    pub token_in: Token,
    pub token_out: Token,
    /// Amount to swap in smallest units.
    pub amount_in: U256,
    pub slippage: Slippage,
}

/// Router quote for a swap, with derived prices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    /// Input amount (human-readable).
    pub amount_in: String,
    /// Expected output amount (human-readable).
    pub amount_out_expected: String,
    /// Minimum output after slippage (human-readable).
    pub amount_out_minimum: String,
    /// Output per unit of input at the quoted amount.
    pub execution_price: String,
    /// Output per unit of input at the pool's current reserves.
    pub mid_price: String,
    /// Price impact as a percentage.
    pub price_impact: String,
    /// Slippage tolerance applied.
    pub slippage_tolerance: String,
    /// Token path for the swap.
    pub path: Vec<String>,
}

/// Result of a submitted swap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapReceipt {
    /// Swap transaction hash.
    pub tx_hash: String,
    /// Approval transaction hash, when one was needed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_tx_hash: Option<String>,
    pub token_in: String,
    pub token_out: String,
    pub amount_in: String,
    pub amount_out_expected: String,
    pub amount_out_minimum: String,
    /// Unix timestamp after which the router rejects the swap.
    pub deadline: u64,
}
