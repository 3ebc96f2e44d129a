//! Configuration management module.
//!
//! Handles loading configuration from environment variables.

use std::env;
use std::time::Duration;

use alloy::primitives::Address;

use crate::error::AppError;
use crate::ethereum::constants::SEPOLIA_CHAIN_ID;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Ethereum JSON-RPC endpoint URL.
    pub rpc_url: String,
    /// Private key for wallet (hex string with 0x prefix).
    pub private_key: String,
    /// Chain the router/factory pair is deployed on.
    pub chain_id: u64,
    /// Subgraph GraphQL endpoint; falls back to the network preset.
    pub subgraph_url: Option<String>,
    /// Router address override.
    pub router: Option<Address>,
    /// Factory address override.
    pub factory: Option<Address>,
    /// Approve `U256::MAX` instead of the exact amount.
    pub approve_unlimited: bool,
    /// How long to wait for an approval or pair-creation receipt.
    pub confirmation_timeout: Duration,
    /// Offset added to the current time for router deadlines.
    pub deadline: Duration,
    /// Limit-order keeper polling interval.
    pub limit_order_poll: Duration,
    /// Logging level (default: info).
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `ETHEREUM_RPC_URL`: Ethereum JSON-RPC endpoint
    /// - `ETHEREUM_PRIVATE_KEY`: Private key for wallet (hex)
    ///
    /// Optional environment variables:
    /// - `CHAIN_ID`: target chain (default: 11155111, Sepolia)
    /// - `SUBGRAPH_URL`: subgraph endpoint (default: network preset)
    /// - `UNISWAP_V2_ROUTER` / `UNISWAP_V2_FACTORY`: address overrides
    /// - `APPROVE_UNLIMITED`: approve max allowance (default: false)
    /// - `TX_CONFIRMATION_TIMEOUT_SECS`: receipt wait (default: 60)
    /// - `TX_DEADLINE_SECS`: router deadline offset (default: 1200)
    /// - `LIMIT_ORDER_POLL_SECS`: keeper interval (default: 15)
    /// - `LOG_LEVEL`: Logging level (default: info)
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rpc_url = lookup("ETHEREUM_RPC_URL").ok_or_else(|| {
            AppError::Config("ETHEREUM_RPC_URL environment variable not set".into())
        })?;

        let private_key = lookup("ETHEREUM_PRIVATE_KEY").ok_or_else(|| {
            AppError::Config("ETHEREUM_PRIVATE_KEY environment variable not set".into())
        })?;

        let chain_id = match lookup("CHAIN_ID") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .map_err(|e| AppError::Config(format!("Invalid CHAIN_ID '{}': {}", v, e)))?,
            None => SEPOLIA_CHAIN_ID,
        };

        let router = parse_address_var(&lookup, "UNISWAP_V2_ROUTER")?;
        let factory = parse_address_var(&lookup, "UNISWAP_V2_FACTORY")?;

        let approve_unlimited = parse_bool(lookup("APPROVE_UNLIMITED").as_deref(), false);
        let confirmation_timeout =
            Duration::from_secs(parse_or(lookup("TX_CONFIRMATION_TIMEOUT_SECS"), 60));
        let deadline = Duration::from_secs(parse_or(lookup("TX_DEADLINE_SECS"), 1200));
        let limit_order_poll = Duration::from_secs(parse_or(lookup("LIMIT_ORDER_POLL_SECS"), 15));

        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            rpc_url,
            private_key,
            chain_id,
            subgraph_url: lookup("SUBGRAPH_URL").filter(|s| !s.trim().is_empty()),
            router,
            factory,
            approve_unlimited,
            confirmation_timeout,
            deadline,
            limit_order_poll,
            log_level,
        })
    }
}

/// Settings every write flow reads.
#[derive(Debug, Clone)]
pub struct TxSettings {
    /// Chain id the signer must be connected to.
    pub chain_id: u64,
    pub approve_unlimited: bool,
    pub confirmation_timeout: Duration,
    pub deadline: Duration,
}

impl From<&Config> for TxSettings {
    fn from(config: &Config) -> Self {
        Self {
            chain_id: config.chain_id,
            approve_unlimited: config.approve_unlimited,
            confirmation_timeout: config.confirmation_timeout,
            deadline: config.deadline,
        }
    }
}

fn parse_address_var<F>(lookup: &F, key: &str) -> Result<Option<Address>, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| {
            v.trim()
                .parse::<Address>()
                .map_err(|e| AppError::Config(format!("Invalid {} '{}': {}", key, v, e)))
        })
        .transpose()
}

/// Parses `value` as `T`, returning `default` on missing or invalid values.
fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

/// Accepts `"true"`, `"1"`, `"false"`, `"0"` (case-insensitive).
fn parse_bool(value: Option<&str>, default: bool) -> bool {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("true") | Some("1") => true,
        Some("false") | Some("0") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("ETHEREUM_RPC_URL", "http://localhost:8545"),
        (
            "ETHEREUM_PRIVATE_KEY",
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        ),
    ];

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&REQUIRED)).unwrap();
        assert_eq!(config.chain_id, SEPOLIA_CHAIN_ID);
        assert!(!config.approve_unlimited);
        assert_eq!(config.confirmation_timeout, Duration::from_secs(60));
        assert_eq!(config.deadline, Duration::from_secs(1200));
        assert_eq!(config.limit_order_poll, Duration::from_secs(15));
        assert_eq!(config.log_level, "info");
        assert!(config.subgraph_url.is_none());
        assert!(config.router.is_none());
    }

    #[test]
    fn test_missing_rpc_url() {
        let result = Config::from_lookup(lookup_from(&REQUIRED[1..]));
        match result {
            Err(AppError::Config(msg)) => assert!(msg.contains("ETHEREUM_RPC_URL")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("CHAIN_ID", "1"),
            ("APPROVE_UNLIMITED", "TRUE"),
            ("TX_DEADLINE_SECS", "600"),
            ("UNISWAP_V2_ROUTER", "0x3361623A4E323e0d3f170b8f39124A5CAccdC725"),
            ("SUBGRAPH_URL", "http://graph.local/subgraphs/name/v2"),
        ]);
        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.chain_id, 1);
        assert!(config.approve_unlimited);
        assert_eq!(config.deadline, Duration::from_secs(600));
        assert!(config.router.is_some());
        assert_eq!(config.subgraph_url.as_deref(), Some("http://graph.local/subgraphs/name/v2"));
    }

    #[test]
    fn test_invalid_router_address() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("UNISWAP_V2_ROUTER", "0x1234"));
        assert!(matches!(Config::from_lookup(lookup_from(&pairs)), Err(AppError::Config(_))));
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("TX_CONFIRMATION_TIMEOUT_SECS", "soon"));
        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.confirmation_timeout, Duration::from_secs(60));
    }
}
