//! Subgraph entity types.
//!
//! Monetary fields stay strings: the subgraph returns arbitrary-precision
//! decimals and the client only displays them.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Accepts `"18"` or `18`.
fn string_or_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + TryFrom<u64>,
    <T as FromStr>::Err: std::fmt::Display,
    <T as TryFrom<u64>>::Error: std::fmt::Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        String(String),
        Number(u64),
    }

    match Raw::deserialize(deserializer)? {
        Raw::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
        Raw::Number(n) => T::try_from(n).map_err(serde::de::Error::custom),
    }
}

/// Token reference embedded in pair rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRef {
    /// Lower-cased token address.
    pub id: String,
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub decimals: u8,
}

/// Pair row as listed on the pools page and the pool detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    /// Pair address.
    pub id: String,
    pub token0: TokenRef,
    pub token1: TokenRef,
    pub reserve0: String,
    pub reserve1: String,
    #[serde(rename = "reserveUSD")]
    pub reserve_usd: String,
    #[serde(rename = "volumeUSD", default, skip_serializing_if = "Option::is_none")]
    pub volume_usd: Option<String>,
    pub token0_price: String,
    pub token1_price: String,
}

/// Token row with trading statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenStats {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub decimals: u8,
    pub total_supply: String,
    pub trade_volume: String,
    #[serde(rename = "tradeVolumeUSD")]
    pub trade_volume_usd: String,
    #[serde(rename = "untrackedVolumeUSD")]
    pub untracked_volume_usd: String,
    pub tx_count: String,
    pub total_liquidity: String,
    #[serde(rename = "derivedETH")]
    pub derived_eth: String,
}

impl TokenStats {
    /// USD price derived from the token's ETH price and the bundle ETH price.
    pub fn price_usd(&self, eth_price: &str) -> Option<Decimal> {
        let derived = Decimal::from_str(&self.derived_eth).ok()?;
        let eth = Decimal::from_str(eth_price).ok()?;
        derived.checked_mul(eth)
    }
}

/// Result of the token listing query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenListing {
    pub tokens: Vec<TokenStats>,
    /// USD price of ETH from the subgraph bundle.
    pub eth_price: Option<String>,
}

/// Pair reference embedded in swap rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapPair {
    pub id: String,
    pub token0: TokenRef,
    pub token1: TokenRef,
}

/// Which pair token the trader received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapDirection {
    /// token0 bought with token1.
    BuyToken0,
    /// token0 sold for token1.
    SellToken0,
}

/// A swap executed on some pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapEvent {
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub timestamp: u64,
    /// Absent when queried per pair.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pair: Option<SwapPair>,
    pub amount0_in: String,
    pub amount1_in: String,
    pub amount0_out: String,
    pub amount1_out: String,
    #[serde(rename = "amountUSD")]
    pub amount_usd: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    pub to: String,
}

impl SwapEvent {
    /// A swap with no token0 input bought token0.
    pub fn direction(&self) -> SwapDirection {
        let zero_in = Decimal::from_str(&self.amount0_in).map(|d| d.is_zero()).unwrap_or(false);
        if zero_in {
            SwapDirection::BuyToken0
        } else {
            SwapDirection::SellToken0
        }
    }

    /// `(token0 amount, token1 amount)` moved by the trade.
    pub fn amounts(&self) -> (&str, &str) {
        match self.direction() {
            SwapDirection::BuyToken0 => (&self.amount0_out, &self.amount1_in),
            SwapDirection::SellToken0 => (&self.amount0_in, &self.amount1_out),
        }
    }
}

/// Pair reference embedded in position rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionPair {
    pub id: String,
    pub token0: TokenRef,
    pub token1: TokenRef,
    pub token0_price: String,
    pub token1_price: String,
}

/// Liquidity held by one address in one pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: String,
    pub pair: PositionPair,
    pub liquidity_token_balance: String,
    #[serde(deserialize_with = "string_or_number")]
    pub created_at_timestamp: u64,
}
