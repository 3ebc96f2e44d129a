//! Balance query service.

use alloy::primitives::{Address, U256};
use std::sync::Arc;

use crate::{
    error::{AppError, Result},
    ethereum::DexChain,
    types::{format_units, BalanceInfo, Token, TokenInfo},
};

/// Service for querying token balances.
#[derive(Clone)]
pub struct BalanceService {
    chain: Arc<dyn DexChain>,
}

impl BalanceService {
    /// Create a new balance service.
    pub fn new(chain: Arc<dyn DexChain>) -> Self {
        Self { chain }
    }

    /// Get balance for an address.
    ///
    /// If `token` is None, returns native ETH balance.
    /// Otherwise, returns ERC20 token balance.
    pub async fn get_balance(
        &self,
        address: Address,
        token: Option<&Token>,
    ) -> Result<BalanceInfo> {
        match token {
            None => {
                tracing::debug!(address = %address, "Querying ETH balance");

                let balance = self.chain.native_balance(address).await?;
                Ok(BalanceInfo {
                    address: format!("{address:?}"),
                    token: TokenInfo::native(),
                    balance: format_units(balance, 18),
                    balance_raw: balance.to_string(),
                })
            }
            Some(token) => {
                tracing::debug!(
                    address = %address,
                    token = %token.address,
                    "Querying ERC20 balance"
                );

                let balance = self.chain.balance_of(token.address, address).await?;
                Ok(BalanceInfo {
                    address: format!("{address:?}"),
                    token: TokenInfo::from(token),
                    balance: token.format(balance),
                    balance_raw: balance.to_string(),
                })
            }
        }
    }

    /// Raw balance of the signing account.
    pub async fn own_balance(&self, token: &Token) -> Result<U256> {
        self.chain.balance_of(token.address, self.chain.account()).await
    }

    /// Fail with [`AppError::InsufficientBalance`] when the signing account
    /// holds less than `required` of `token`. Returns the balance read.
    pub async fn ensure_sufficient(&self, token: &Token, required: U256) -> Result<U256> {
        let available = self.own_balance(token).await?;
        if available < required {
            tracing::warn!(
                token = %token.symbol,
                required = %required,
                available = %available,
                "Balance pre-check failed"
            );
            return Err(AppError::InsufficientBalance {
                symbol: token.symbol.clone(),
                required: token.format(required),
                available: token.format(available),
            });
        }
        Ok(available)
    }
}
