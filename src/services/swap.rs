//! Swap quoting and execution.

use alloy::primitives::U256;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::{
    config::TxSettings,
    error::{AppError, Result, RevertReason, ValidationError},
    ethereum::{DexChain, SwapCall, TxStatus},
    services::{deadline_from_now, ensure_network, ApprovalService, BalanceService},
    types::{u256_to_decimal, PairReserves, Quote, SwapIntent, SwapReceipt, Token},
};

/// Service for quoting and executing exact-input swaps.
#[derive(Clone)]
pub struct SwapService {
    chain: Arc<dyn DexChain>,
    balances: BalanceService,
    approvals: ApprovalService,
    settings: TxSettings,
}

impl SwapService {
    /// Create a new swap service.
    pub fn new(
        chain: Arc<dyn DexChain>,
        balances: BalanceService,
        approvals: ApprovalService,
        settings: TxSettings,
    ) -> Self {
        Self { chain, balances, approvals, settings }
    }

    /// Router output for `amount_in` along the direct pair.
    ///
    /// Fails with [`AppError::PoolNotFound`] when the factory has no pair
    /// and [`AppError::InsufficientLiquidity`] when the pair is empty or
    /// the router quotes zero.
    pub async fn amount_out(
        &self,
        token_in: &Token,
        token_out: &Token,
        amount_in: U256,
    ) -> Result<U256> {
        self.funded_reserves(token_in, token_out).await?;
        self.router_amount_out(token_in, token_out, amount_in).await
    }

    /// Reserves of the direct pair, which must hold liquidity on both sides.
    async fn funded_reserves(&self, token_in: &Token, token_out: &Token) -> Result<PairReserves> {
        let pair = self
            .chain
            .get_pair(token_in.address, token_out.address)
            .await?
            .ok_or(AppError::PoolNotFound)?;
        let reserves = self.chain.pair_reserves(pair).await?;
        if reserves.is_empty() {
            return Err(AppError::InsufficientLiquidity);
        }
        Ok(reserves)
    }

    async fn router_amount_out(
        &self,
        token_in: &Token,
        token_out: &Token,
        amount_in: U256,
    ) -> Result<U256> {
        let amounts = self
            .chain
            .get_amounts_out(amount_in, vec![token_in.address, token_out.address])
            .await?;
        let amount_out = amounts.last().copied().unwrap_or(U256::ZERO);

        if amount_out.is_zero() {
            return Err(AppError::InsufficientLiquidity);
        }
        Ok(amount_out)
    }

    /// Quote a swap with execution price, mid price and price impact.
    pub async fn quote(&self, intent: &SwapIntent) -> Result<Quote> {
        let SwapIntent { token_in, token_out, amount_in, slippage } = intent;
        tracing::info!(
            from = %token_in.symbol,
            to = %token_out.symbol,
            amount = %amount_in,
            slippage = %slippage,
            "Quoting swap"
        );

        ensure_distinct(token_in, token_out)?;

        let reserves = self.funded_reserves(token_in, token_out).await?;
        let amount_out = self.router_amount_out(token_in, token_out, *amount_in).await?;
        let amount_out_min = slippage.min_amount(amount_out);

        let in_dec = u256_to_decimal(*amount_in, token_in.decimals);
        let out_dec = u256_to_decimal(amount_out, token_out.decimals);
        let (reserve_in, reserve_out) = reserves.oriented(token_in.address);
        let reserve_in_dec = u256_to_decimal(reserve_in, token_in.decimals);
        let reserve_out_dec = u256_to_decimal(reserve_out, token_out.decimals);

        let execution_price = out_dec.checked_div(in_dec).unwrap_or(Decimal::ZERO);
        let mid_price = reserve_out_dec.checked_div(reserve_in_dec).unwrap_or(Decimal::ZERO);

        Ok(Quote {
            amount_in: token_in.format(*amount_in),
            amount_out_expected: token_out.format(amount_out),
            amount_out_minimum: token_out.format(amount_out_min),
            execution_price: display_price(execution_price),
            mid_price: display_price(mid_price),
            price_impact: price_impact(execution_price, mid_price).normalize().to_string(),
            slippage_tolerance: slippage.to_string(),
            path: vec![format!("{:?}", token_in.address), format!("{:?}", token_out.address)],
        })
    }

    /// Execute a swap with the slippage-derived minimum output.
    pub async fn swap(&self, intent: &SwapIntent) -> Result<SwapReceipt> {
        self.execute(intent, None).await
    }

    /// Execute a swap. `min_out` overrides the slippage-derived minimum.
    ///
    /// Chain failures are rewritten into user-facing messages.
    pub async fn execute(
        &self,
        intent: &SwapIntent,
        min_out: Option<U256>,
    ) -> Result<SwapReceipt> {
        self.execute_inner(intent, min_out).await.map_err(|e| e.into_user_facing("Swap"))
    }

    async fn execute_inner(
        &self,
        intent: &SwapIntent,
        min_out: Option<U256>,
    ) -> Result<SwapReceipt> {
        let SwapIntent { token_in, token_out, amount_in, slippage } = intent;
        tracing::info!(
            from = %token_in.symbol,
            to = %token_out.symbol,
            amount = %amount_in,
            slippage = %slippage,
            "Executing swap"
        );

        ensure_distinct(token_in, token_out)?;
        if amount_in.is_zero() {
            return Err(ValidationError::ZeroAmount.into());
        }
        ensure_network(self.chain.as_ref(), self.settings.chain_id).await?;

        let amount_out = self.amount_out(token_in, token_out, *amount_in).await?;
        self.balances.ensure_sufficient(token_in, *amount_in).await?;

        let approval = self.approvals.ensure_allowance(token_in, *amount_in).await?;

        let amount_out_min = min_out.unwrap_or_else(|| slippage.min_amount(amount_out));
        let deadline = deadline_from_now(self.settings.deadline);

        let hash = self
            .chain
            .swap_exact_tokens_for_tokens(SwapCall {
                amount_in: *amount_in,
                amount_out_min,
                path: vec![token_in.address, token_out.address],
                to: self.chain.account(),
                deadline,
            })
            .await?;

        if self.chain.wait_for_receipt(hash, self.settings.confirmation_timeout).await?
            == TxStatus::Reverted
        {
            return Err(AppError::Reverted(RevertReason::Rejected));
        }

        tracing::info!(tx_hash = %hash, "Swap confirmed");

        Ok(SwapReceipt {
            tx_hash: format!("{:?}", hash),
            approval_tx_hash: approval.map(|h| format!("{:?}", h)),
            token_in: token_in.symbol.clone(),
            token_out: token_out.symbol.clone(),
            amount_in: token_in.format(*amount_in),
            amount_out_expected: token_out.format(amount_out),
            amount_out_minimum: token_out.format(amount_out_min),
            deadline,
        })
    }
}

fn ensure_distinct(a: &Token, b: &Token) -> Result<()> {
    if a.address == b.address {
        return Err(ValidationError::SameToken.into());
    }
    Ok(())
}

fn display_price(price: Decimal) -> String {
    price.round_dp(8).normalize().to_string()
}

/// `(1 - execution / mid) * 100`, floored at zero, four decimals.
fn price_impact(execution: Decimal, mid: Decimal) -> Decimal {
    match execution.checked_div(mid) {
        Some(ratio) => ((Decimal::ONE - ratio) * Decimal::from(100)).max(Decimal::ZERO).round_dp(4),
        None => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_impact() {
        assert_eq!(price_impact(Decimal::from(99), Decimal::from(100)), Decimal::ONE);
        assert_eq!(price_impact(Decimal::from(2), Decimal::from(3)), Decimal::new(333333, 4));
        // Execution better than mid is not negative impact.
        assert_eq!(price_impact(Decimal::from(101), Decimal::from(100)), Decimal::ZERO);
        assert_eq!(price_impact(Decimal::ONE, Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_display_price() {
        assert_eq!(display_price(Decimal::new(2_500_000_000_000, 12)), "2.5");
        assert_eq!(display_price(Decimal::new(123_456_789_123, 11)), "1.23456789");
    }
}
