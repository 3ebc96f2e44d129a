//! Token-related types.

use alloy::primitives::{Address, U256};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// An ERC-20 token known on the configured network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token contract address.
    pub address: Address,
    /// Token symbol (e.g., "USDC").
    pub symbol: String,
    /// Token name (e.g., "USD Coin").
    pub name: String,
    /// Number of decimals.
    pub decimals: u8,
    /// Chain the token lives on.
    pub chain_id: u64,
}

impl Token {
    pub fn new(address: Address, symbol: &str, name: &str, decimals: u8, chain_id: u64) -> Self {
        Self { address, symbol: symbol.to_string(), name: name.to_string(), decimals, chain_id }
    }

    /// Human-readable amount of this token.
    pub fn format(&self, amount: U256) -> String {
        format_units(amount, self.decimals)
    }
}

/// Token description embedded in responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Token contract address (None for native ETH).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Token symbol (e.g., "ETH", "USDC").
    pub symbol: String,
    /// Number of decimals.
    pub decimals: u8,
}

impl TokenInfo {
    /// TokenInfo for the native currency.
    pub fn native() -> Self {
        Self { address: None, symbol: "ETH".to_string(), decimals: 18 }
    }
}

impl From<&Token> for TokenInfo {
    fn from(token: &Token) -> Self {
        Self {
            address: Some(format!("{:?}", token.address)),
            symbol: token.symbol.clone(),
            decimals: token.decimals,
        }
    }
}

/// Balance information response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceInfo {
    /// Wallet address.
    pub address: String,
    /// Token information.
    pub token: TokenInfo,
    /// Human-readable balance with proper decimals.
    pub balance: String,
    /// Raw balance in smallest unit.
    pub balance_raw: String,
}

/// Parse and validate an Ethereum address (0x + 40 hex characters).
pub fn parse_address(s: &str) -> Result<Address, String> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err("Address cannot be empty".to_string());
    }

    if !trimmed.starts_with("0x") && !trimmed.starts_with("0X") {
        return Err(format!("Address must start with '0x': {}", s));
    }

    if trimmed.len() != 42 {
        return Err(format!(
            "Address must be 42 characters (0x + 40 hex chars), got {}: {}",
            trimmed.len(),
            s
        ));
    }

    trimmed.parse::<Address>().map_err(|e| format!("Invalid address format '{}': {}", s, e))
}

/// Parse a user-typed amount into smallest units, rejecting empty and zero
/// input.
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256, ValidationError> {
    if amount.trim().is_empty() {
        return Err(ValidationError::AmountMissing);
    }
    let value = parse_units(amount, decimals).map_err(ValidationError::InvalidAmount)?;
    if value.is_zero() {
        return Err(ValidationError::ZeroAmount);
    }
    Ok(value)
}

/// Format a U256 value with decimals to a human-readable string.
pub fn format_units(value: U256, decimals: u8) -> String {
    if value == U256::ZERO {
        return "0".to_string();
    }

    let value_str = value.to_string();
    let decimals = decimals as usize;

    if decimals == 0 {
        return value_str;
    }

    let len = value_str.len();
    if len <= decimals {
        // Value is less than 1, pad with zeros
        let zeros = decimals - len;
        let decimal_part = value_str.trim_end_matches('0');
        format!("0.{}{}", "0".repeat(zeros), decimal_part)
    } else {
        let (integer, decimal) = value_str.split_at(len - decimals);
        let decimal = decimal.trim_end_matches('0');
        if decimal.is_empty() {
            integer.to_string()
        } else {
            format!("{}.{}", integer, decimal)
        }
    }
}

/// Parse a human-readable amount string to U256 with decimals.
///
/// Fractional digits beyond `decimals` are truncated.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256, String> {
    let amount = amount.trim();

    if amount.is_empty() {
        return Err("Amount cannot be empty".to_string());
    }

    if amount.starts_with('-') {
        return Err("Amount cannot be negative".to_string());
    }

    let (integer, fraction) = match amount.split_once('.') {
        Some((_, f)) if f.contains('.') => return Err("Invalid amount format".to_string()),
        Some((i, f)) => (i, f),
        None => (amount, ""),
    };

    if integer.is_empty() && fraction.is_empty() {
        return Err("Invalid amount format".to_string());
    }
    if !integer.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(format!("Invalid amount: {}", amount));
    }

    let decimals = decimals as usize;
    let mut fraction = fraction.to_string();
    if fraction.len() > decimals {
        fraction.truncate(decimals);
    } else {
        fraction.push_str(&"0".repeat(decimals - fraction.len()));
    }

    let digits = format!("{}{}", integer, fraction);
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    digits.parse::<U256>().map_err(|e| format!("Invalid amount: {}", e))
}

/// Convert U256 to Decimal with proper scaling. Values Decimal cannot hold
/// become zero.
pub fn u256_to_decimal(value: U256, decimals: u8) -> Decimal {
    let formatted = format_units(value, decimals);
    formatted.parse::<Decimal>().unwrap_or(Decimal::ZERO)
}
