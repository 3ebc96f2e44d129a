//! Ethereum network constants.
//!
//! Contains chain IDs plus the token and Uniswap V2 addresses of the
//! supported deployments.

use alloy::primitives::{address, Address};

// ============================================================================
// Chain IDs
// ============================================================================

/// Ethereum Mainnet chain ID.
pub const ETHEREUM_MAINNET_CHAIN_ID: u64 = 1;

/// Sepolia testnet chain ID.
pub const SEPOLIA_CHAIN_ID: u64 = 11155111;

// ============================================================================
// Sepolia deployment
// ============================================================================

/// Uniswap V2 Router deployed on Sepolia.
pub const SEPOLIA_V2_ROUTER: Address = address!("3361623A4E323e0d3f170b8f39124A5CAccdC725");

/// Uniswap V2 Factory deployed on Sepolia.
pub const SEPOLIA_V2_FACTORY: Address = address!("4603870b4e0825956842a823cDdDa35426b9Ca01");

pub const SEPOLIA_WETH: Address = address!("86268F605DA130ea51E51cbD90215cE4f6e2A4C4");
pub const SEPOLIA_USDC: Address = address!("9Bd1AF68Abbc63195aeEA1260d1F294e7e03E511");
pub const SEPOLIA_DAI: Address = address!("6607b0CE0Ef51520b50B37FC1B732534CE8d24a4");
pub const SEPOLIA_USDT: Address = address!("9d6C5b366BF6ea47523b34dc0A98056893f29876");

/// Local graph-node endpoint serving the Sepolia deployment's subgraph.
pub const SEPOLIA_SUBGRAPH_URL: &str = "http://localhost:8000/subgraphs/name/uniswap-v2-sepolia";

// ============================================================================
// Ethereum Mainnet deployment
// ============================================================================

/// Uniswap V2 Router address on Ethereum Mainnet.
pub const MAINNET_V2_ROUTER: Address = address!("7a250d5630B4cF539739dF2C5dAcb4c659F2488D");

/// Uniswap V2 Factory address on Ethereum Mainnet.
pub const MAINNET_V2_FACTORY: Address = address!("5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f");

/// Wrapped Ether (WETH) address on Ethereum Mainnet.
pub const MAINNET_WETH: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");

/// USDC address on Ethereum Mainnet.
pub const MAINNET_USDC: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");

/// DAI address on Ethereum Mainnet.
pub const MAINNET_DAI: Address = address!("6B175474E89094C44Da98b954EedeAC495271d0F");

/// USDT address on Ethereum Mainnet.
pub const MAINNET_USDT: Address = address!("dAC17F958D2ee523a2206206994597C13D831ec7");

/// Uniswap V2 subgraph on The Graph's decentralized network gateway.
pub const MAINNET_SUBGRAPH_URL: &str =
    "https://gateway.thegraph.com/api/subgraphs/id/A3Np3RQbaBA6oKJgiwDJeo5T3zrYfGHPWFYayMwtNDum";
