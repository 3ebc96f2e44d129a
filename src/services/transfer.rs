//! Plain ERC-20 transfers.

use alloy::primitives::Address;
use std::sync::Arc;

use crate::{
    config::TxSettings,
    error::{AppError, Result, RevertReason, ValidationError},
    ethereum::{DexChain, TxStatus},
    services::{ensure_network, BalanceService},
    types::{SendIntent, TransferReceipt},
};

#[derive(Clone)]
pub struct TransferService {
    chain: Arc<dyn DexChain>,
    balances: BalanceService,
    settings: TxSettings,
}

impl TransferService {
    pub fn new(chain: Arc<dyn DexChain>, balances: BalanceService, settings: TxSettings) -> Self {
        Self { chain, balances, settings }
    }

    /// Send tokens to another address. No approval is involved.
    pub async fn send(&self, intent: &SendIntent) -> Result<TransferReceipt> {
        self.send_inner(intent).await.map_err(|e| e.into_user_facing("Send"))
    }

    async fn send_inner(&self, intent: &SendIntent) -> Result<TransferReceipt> {
        let SendIntent { token, recipient, amount } = intent;
        tracing::info!(
            token = %token.symbol,
            recipient = %recipient,
            amount = %amount,
            "Sending tokens"
        );

        if *recipient == Address::ZERO {
            return Err(ValidationError::InvalidRecipient.into());
        }
        if amount.is_zero() {
            return Err(ValidationError::ZeroAmount.into());
        }
        ensure_network(self.chain.as_ref(), self.settings.chain_id).await?;
        self.balances.ensure_sufficient(token, *amount).await?;

        let hash = self.chain.transfer(token.address, *recipient, *amount).await?;
        if self.chain.wait_for_receipt(hash, self.settings.confirmation_timeout).await?
            == TxStatus::Reverted
        {
            return Err(AppError::Reverted(RevertReason::Rejected));
        }

        tracing::info!(tx_hash = %hash, "Transfer confirmed");

        Ok(TransferReceipt {
            tx_hash: format!("{:?}", hash),
            token: token.symbol.clone(),
            recipient: format!("{:?}", recipient),
            amount: token.format(*amount),
        })
    }
}
