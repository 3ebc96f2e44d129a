//! Network presets.
//!
//! A [`NetworkConfig`] bundles everything that differs between
//! deployments: router and factory addresses, the statically registered
//! tokens and the subgraph endpoint.

use alloy::primitives::Address;

use crate::{
    config::Config,
    error::{AppError, Result},
    ethereum::constants::*,
    types::Token,
};

/// Deployment the client talks to.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Expected chain id of the signer's RPC.
    pub chain_id: u64,
    /// Display name.
    pub name: String,
    /// Uniswap V2 router.
    pub router: Address,
    /// Uniswap V2 factory.
    pub factory: Address,
    /// Tokens offered in the selectors.
    pub tokens: Vec<Token>,
    /// Subgraph GraphQL endpoint.
    pub subgraph_url: String,
}

impl NetworkConfig {
    /// Sepolia testnet deployment.
    pub fn sepolia() -> Self {
        let id = SEPOLIA_CHAIN_ID;
        Self {
            chain_id: id,
            name: "Sepolia".to_string(),
            router: SEPOLIA_V2_ROUTER,
            factory: SEPOLIA_V2_FACTORY,
            tokens: vec![
                Token::new(SEPOLIA_WETH, "WETH", "Wrapped Ether", 18, id),
                Token::new(SEPOLIA_USDC, "USDC", "USD Coin", 18, id),
                Token::new(SEPOLIA_DAI, "DAI", "Dai Stablecoin", 18, id),
                Token::new(SEPOLIA_USDT, "USDT", "Tether USD", 18, id),
            ],
            subgraph_url: SEPOLIA_SUBGRAPH_URL.to_string(),
        }
    }

    /// Ethereum mainnet deployment.
    pub fn mainnet() -> Self {
        let id = ETHEREUM_MAINNET_CHAIN_ID;
        Self {
            chain_id: id,
            name: "Ethereum Mainnet".to_string(),
            router: MAINNET_V2_ROUTER,
            factory: MAINNET_V2_FACTORY,
            tokens: vec![
                Token::new(MAINNET_WETH, "WETH", "Wrapped Ether", 18, id),
                Token::new(MAINNET_USDC, "USDC", "USD Coin", 6, id),
                Token::new(MAINNET_DAI, "DAI", "Dai Stablecoin", 18, id),
                Token::new(MAINNET_USDT, "USDT", "Tether USD", 6, id),
            ],
            subgraph_url: MAINNET_SUBGRAPH_URL.to_string(),
        }
    }

    /// Preset for a chain id.
    pub fn for_chain(chain_id: u64) -> Result<Self> {
        match chain_id {
            SEPOLIA_CHAIN_ID => Ok(Self::sepolia()),
            ETHEREUM_MAINNET_CHAIN_ID => Ok(Self::mainnet()),
            other => Err(AppError::Config(format!(
                "Unsupported chain id {} (supported: {}, {})",
                other, SEPOLIA_CHAIN_ID, ETHEREUM_MAINNET_CHAIN_ID
            ))),
        }
    }

    /// Preset for `config.chain_id` with the configured overrides applied.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut network = Self::for_chain(config.chain_id)?;
        if let Some(router) = config.router {
            network.router = router;
        }
        if let Some(factory) = config.factory {
            network.factory = factory;
        }
        if let Some(url) = &config.subgraph_url {
            network.subgraph_url = url.clone();
        }
        Ok(network)
    }
}
