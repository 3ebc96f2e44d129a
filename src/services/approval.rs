//! Router allowance management shared by every approve-then-act flow.

use alloy::primitives::{TxHash, U256};
use std::sync::Arc;

use crate::{
    config::TxSettings,
    error::{AppError, Result},
    ethereum::{DexChain, TxStatus},
    types::Token,
};

#[derive(Clone)]
pub struct ApprovalService {
    chain: Arc<dyn DexChain>,
    settings: TxSettings,
}

impl ApprovalService {
    pub fn new(chain: Arc<dyn DexChain>, settings: TxSettings) -> Self {
        Self { chain, settings }
    }

    /// Make sure the router may spend `amount` of `token`.
    ///
    /// Sends `approve` only when the current allowance is below `amount`,
    /// then waits for its receipt. A reverted or unconfirmed approval is
    /// [`AppError::ApprovalFailed`]. Returns the approval hash when one was
    /// sent.
    pub async fn ensure_allowance(&self, token: &Token, amount: U256) -> Result<Option<TxHash>> {
        let owner = self.chain.account();
        let spender = self.chain.router();

        let allowance = self.chain.allowance(token.address, owner, spender).await?;
        if allowance >= amount {
            tracing::debug!(token = %token.symbol, allowance = %allowance, "Allowance sufficient");
            return Ok(None);
        }

        let approve_amount = if self.settings.approve_unlimited { U256::MAX } else { amount };
        tracing::info!(
            token = %token.symbol,
            allowance = %allowance,
            amount = %approve_amount,
            "Approving router"
        );

        let hash = self.chain.approve(token.address, spender, approve_amount).await?;
        match self.chain.wait_for_receipt(hash, self.settings.confirmation_timeout).await {
            Ok(TxStatus::Success) => {
                tracing::info!(token = %token.symbol, tx_hash = %hash, "Approval confirmed");
                Ok(Some(hash))
            }
            Ok(TxStatus::Reverted) => {
                tracing::warn!(token = %token.symbol, tx_hash = %hash, "Approval reverted");
                Err(AppError::ApprovalFailed(token.symbol.clone()))
            }
            // Timed out or dropped before confirmation.
            Err(AppError::PendingTransaction(message)) => {
                tracing::warn!(
                    token = %token.symbol,
                    tx_hash = %hash,
                    error = %message,
                    "Approval not confirmed"
                );
                Err(AppError::ApprovalFailed(token.symbol.clone()))
            }
            Err(e) => Err(e),
        }
    }
}
