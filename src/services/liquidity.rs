//! Pair creation, liquidity provision and pool snapshots.

use alloy::primitives::{Address, TxHash};
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::{
    config::TxSettings,
    error::{AppError, Result, RevertReason, ValidationError},
    ethereum::{AddLiquidityCall, DexChain, TxStatus},
    services::{deadline_from_now, ensure_network, ApprovalService, BalanceService},
    types::{
        format_units, u256_to_decimal, LiquidityIntent, LiquidityReceipt, PairCreation,
        PoolSnapshot, Token,
    },
};

/// LP tokens of a Uniswap V2 pair always have 18 decimals.
const LP_DECIMALS: u8 = 18;

#[derive(Clone)]
pub struct LiquidityService {
    chain: Arc<dyn DexChain>,
    balances: BalanceService,
    approvals: ApprovalService,
    settings: TxSettings,
}

impl LiquidityService {
    pub fn new(
        chain: Arc<dyn DexChain>,
        balances: BalanceService,
        approvals: ApprovalService,
        settings: TxSettings,
    ) -> Self {
        Self { chain, balances, approvals, settings }
    }

    /// Return the existing pair for `a`/`b` or create it.
    pub async fn create_pair(&self, a: &Token, b: &Token) -> Result<PairCreation> {
        self.create_pair_inner(a, b).await.map_err(|e| e.into_user_facing("Create pair"))
    }

    async fn create_pair_inner(&self, a: &Token, b: &Token) -> Result<PairCreation> {
        if a.address == b.address {
            return Err(ValidationError::SameToken.into());
        }
        ensure_network(self.chain.as_ref(), self.settings.chain_id).await?;

        if let Some(pair) = self.chain.get_pair(a.address, b.address).await? {
            return Ok(PairCreation { pair: format!("{:?}", pair), created: false, tx_hash: None });
        }

        let (pair, hash) = self.deploy_pair(a, b).await?;
        Ok(PairCreation {
            pair: format!("{:?}", pair),
            created: true,
            tx_hash: Some(format!("{:?}", hash)),
        })
    }

    /// Send `createPair` with address-sorted tokens, wait, and re-read the
    /// pair address.
    async fn deploy_pair(&self, a: &Token, b: &Token) -> Result<(Address, TxHash)> {
        let (token0, token1) =
            if a.address < b.address { (a.address, b.address) } else { (b.address, a.address) };
        tracing::info!(token_a = %a.symbol, token_b = %b.symbol, "Creating pair");

        let hash = self.chain.create_pair(token0, token1).await?;
        if self.chain.wait_for_receipt(hash, self.settings.confirmation_timeout).await?
            == TxStatus::Reverted
        {
            return Err(AppError::TransactionFailed {
                action: "Create pair".to_string(),
                message: format!("transaction {:?} reverted", hash),
            });
        }

        let pair = self.chain.get_pair(a.address, b.address).await?.ok_or(AppError::PoolNotFound)?;
        tracing::info!(pair = %pair, tx_hash = %hash, "Pair created");
        Ok((pair, hash))
    }

    /// Add liquidity, creating the pair first when it does not exist.
    pub async fn add_liquidity(&self, intent: &LiquidityIntent) -> Result<LiquidityReceipt> {
        self.add_liquidity_inner(intent).await.map_err(|e| e.into_user_facing("Add liquidity"))
    }

    async fn add_liquidity_inner(&self, intent: &LiquidityIntent) -> Result<LiquidityReceipt> {
        let LiquidityIntent { token_a, token_b, amount_a, amount_b, slippage } = intent;
        tracing::info!(
            token_a = %token_a.symbol,
            token_b = %token_b.symbol,
            amount_a = %amount_a,
            amount_b = %amount_b,
            slippage = %slippage,
            "Adding liquidity"
        );

        if token_a.address == token_b.address {
            return Err(ValidationError::SameToken.into());
        }
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(ValidationError::ZeroAmount.into());
        }
        ensure_network(self.chain.as_ref(), self.settings.chain_id).await?;

        let (pair, pair_creation_tx_hash) =
            match self.chain.get_pair(token_a.address, token_b.address).await? {
                Some(pair) => (pair, None),
                None => {
                    let (pair, hash) = self.deploy_pair(token_a, token_b).await?;
                    (pair, Some(hash))
                }
            };

        self.balances.ensure_sufficient(token_a, *amount_a).await?;
        self.balances.ensure_sufficient(token_b, *amount_b).await?;

        let mut approval_tx_hashes = Vec::new();
        for (token, amount) in [(token_a, amount_a), (token_b, amount_b)] {
            if let Some(hash) = self.approvals.ensure_allowance(token, *amount).await? {
                approval_tx_hashes.push(format!("{:?}", hash));
            }
        }

        let amount_a_min = slippage.min_amount(*amount_a);
        let amount_b_min = slippage.min_amount(*amount_b);
        let deadline = deadline_from_now(self.settings.deadline);

        let hash = self
            .chain
            .add_liquidity(AddLiquidityCall {
                token_a: token_a.address,
                token_b: token_b.address,
                amount_a_desired: *amount_a,
                amount_b_desired: *amount_b,
                amount_a_min,
                amount_b_min,
                to: self.chain.account(),
                deadline,
            })
            .await?;

        if self.chain.wait_for_receipt(hash, self.settings.confirmation_timeout).await?
            == TxStatus::Reverted
        {
            return Err(AppError::Reverted(RevertReason::Rejected));
        }

        tracing::info!(tx_hash = %hash, pair = %pair, "Liquidity added");

        Ok(LiquidityReceipt {
            tx_hash: format!("{:?}", hash),
            approval_tx_hashes,
            pair_creation_tx_hash: pair_creation_tx_hash.map(|h| format!("{:?}", h)),
            pair: format!("{:?}", pair),
            amount_a: token_a.format(*amount_a),
            amount_b: token_b.format(*amount_b),
            amount_a_min: token_a.format(amount_a_min),
            amount_b_min: token_b.format(amount_b_min),
            deadline,
        })
    }

    /// Reserves, LP supply and the signing account's share of a pool.
    pub async fn pool_snapshot(&self, a: &Token, b: &Token) -> Result<PoolSnapshot> {
        let pair = self.chain.get_pair(a.address, b.address).await?.ok_or(AppError::PoolNotFound)?;
        let reserves = self.chain.pair_reserves(pair).await?;
        let lp_balance = self.chain.balance_of(pair, self.chain.account()).await?;

        let (reserve_a, reserve_b) = reserves.oriented(a.address);
        let share = u256_to_decimal(lp_balance, LP_DECIMALS)
            .checked_div(u256_to_decimal(reserves.total_supply, LP_DECIMALS))
            .map(|ratio| (ratio * Decimal::from(100)).round_dp(4))
            .unwrap_or(Decimal::ZERO);

        Ok(PoolSnapshot {
            pair: format!("{:?}", pair),
            token_a: a.symbol.clone(),
            token_b: b.symbol.clone(),
            reserve_a: a.format(reserve_a),
            reserve_b: b.format(reserve_b),
            total_supply: format_units(reserves.total_supply, LP_DECIMALS),
            lp_balance: format_units(lp_balance, LP_DECIMALS),
            pool_share: share.normalize().to_string(),
        })
    }
}
