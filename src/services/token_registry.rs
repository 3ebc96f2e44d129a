//! Token registry.
//!
//! Tokens are configured statically per network. Addresses outside that
//! list are resolved from the ERC-20 contract on demand and kept in memory
//! for the life of the process.

use std::collections::HashMap;

use alloy::primitives::Address;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    error::{AppError, Result},
    ethereum::{DexChain, NetworkConfig},
    types::{parse_address, Token},
};

/// Token lookups by symbol or address.
pub struct TokenRegistry {
    /// Configured tokens, in display order.
    tokens: Vec<Token>,
    /// Upper-cased symbol to index in `tokens`.
    by_symbol: HashMap<String, usize>,
    by_address: HashMap<Address, usize>,
    /// Tokens read from chain on first use.
    discovered: RwLock<HashMap<Address, Token>>,
}

impl TokenRegistry {
    /// Registry holding the network's configured tokens.
    pub fn from_network(network: &NetworkConfig) -> Self {
        let tokens = network.tokens.clone();
        let by_symbol =
            tokens.iter().enumerate().map(|(i, t)| (t.symbol.to_uppercase(), i)).collect();
        let by_address = tokens.iter().enumerate().map(|(i, t)| (t.address, i)).collect();

        info!(chain_id = network.chain_id, count = tokens.len(), "Token registry loaded");

        Self {
            tokens,
            by_symbol,
            by_address,
            discovered: RwLock::new(HashMap::new()),
        }
    }

    /// Configured tokens in display order.
    pub fn list(&self) -> &[Token] {
        &self.tokens
    }

    /// Case-insensitive symbol lookup among configured tokens.
    pub fn resolve_symbol(&self, symbol: &str) -> Option<&Token> {
        self.by_symbol.get(&symbol.trim().to_uppercase()).map(|&i| &self.tokens[i])
    }

    /// Address lookup among configured and discovered tokens.
    pub async fn lookup_address(&self, address: Address) -> Option<Token> {
        if let Some(&i) = self.by_address.get(&address) {
            return Some(self.tokens[i].clone());
        }
        self.discovered.read().await.get(&address).cloned()
    }

    /// Resolve a symbol or `0x` address, reading unknown addresses from
    /// the token contract.
    pub async fn resolve(&self, chain: &dyn DexChain, input: &str) -> Result<Token> {
        let input = input.trim();

        if !input.starts_with("0x") && !input.starts_with("0X") {
            return self
                .resolve_symbol(input)
                .cloned()
                .ok_or_else(|| AppError::TokenNotFound(input.to_string()));
        }

        let address = parse_address(input).map_err(AppError::InvalidAddress)?;
        if let Some(token) = self.lookup_address(address).await {
            return Ok(token);
        }

        let token = chain.token_metadata(address).await?;
        info!(
            address = %address,
            symbol = %token.symbol,
            decimals = token.decimals,
            "Discovered token"
        );

        self.discovered.write().await.insert(address, token.clone());
        Ok(token)
    }
}
