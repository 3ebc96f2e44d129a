//! Chain access seam.
//!
//! [`DexChain`] lists every RPC read and write the services perform.
//! [`RpcDexChain`] implements it against a live node; tests substitute a
//! recording implementation.

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    error::{AppError, Result},
    ethereum::{
        contracts::{
            erc20::IERC20,
            uniswap_v2::{IUniswapV2Factory, IUniswapV2Pair, IUniswapV2Router02},
        },
        EthereumClient,
    },
    types::{PairReserves, Token},
};

/// Arguments of a router `addLiquidity` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddLiquidityCall {
    pub token_a: Address,
    pub token_b: Address,
    pub amount_a_desired: U256,
    pub amount_b_desired: U256,
    pub amount_a_min: U256,
    pub amount_b_min: U256,
    pub to: Address,
    pub deadline: u64,
}

/// Arguments of a router `swapExactTokensForTokens` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapCall {
    pub amount_in: U256,
    pub amount_out_min: U256,
    pub path: Vec<Address>,
    pub to: Address,
    pub deadline: u64,
}

/// Receipt status of a mined transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    Success,
    Reverted,
}

/// Everything the client needs from the chain.
#[async_trait]
pub trait DexChain: Send + Sync {
    /// Account writes are sent from.
    fn account(&self) -> Address;

    /// Router the approvals are granted to.
    fn router(&self) -> Address;

    /// Chain id the signer is connected to.
    async fn chain_id(&self) -> Result<u64>;

    /// Native currency balance.
    async fn native_balance(&self, owner: Address) -> Result<U256>;

    /// ERC-20 `name`, `symbol` and `decimals`.
    async fn token_metadata(&self, token: Address) -> Result<Token>;

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256>;

    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256>;

    /// Pair address for two tokens, `None` when the factory has none.
    async fn get_pair(&self, token_a: Address, token_b: Address) -> Result<Option<Address>>;

    async fn pair_reserves(&self, pair: Address) -> Result<PairReserves>;

    /// Router quote along `path`.
    async fn get_amounts_out(&self, amount_in: U256, path: Vec<Address>) -> Result<Vec<U256>>;

    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxHash>;

    async fn create_pair(&self, token_a: Address, token_b: Address) -> Result<TxHash>;

    async fn add_liquidity(&self, call: AddLiquidityCall) -> Result<TxHash>;

    async fn swap_exact_tokens_for_tokens(&self, call: SwapCall) -> Result<TxHash>;

    async fn transfer(&self, token: Address, to: Address, amount: U256) -> Result<TxHash>;

    /// Wait for one confirmation of `hash`, giving up after `timeout`.
    async fn wait_for_receipt(&self, hash: TxHash, timeout: Duration) -> Result<TxStatus>;
}

/// [`DexChain`] backed by a signing JSON-RPC provider.
#[derive(Clone)]
pub struct RpcDexChain {
    client: Arc<EthereumClient>,
    account: Address,
    router: Address,
    factory: Address,
}

impl RpcDexChain {
    pub fn new(
        client: Arc<EthereumClient>,
        account: Address,
        router: Address,
        factory: Address,
    ) -> Self {
        Self { client, account, router, factory }
    }
}

#[async_trait]
impl DexChain for RpcDexChain {
    fn account(&self) -> Address {
        self.account
    }

    fn router(&self) -> Address {
        self.router
    }

    async fn chain_id(&self) -> Result<u64> {
        self.client.chain_id().await
    }

    async fn native_balance(&self, owner: Address) -> Result<U256> {
        self.client.get_eth_balance(owner).await
    }

    async fn token_metadata(&self, token: Address) -> Result<Token> {
        let contract = IERC20::new(token, self.client.provider().clone());

        let decimals = contract
            .decimals()
            .call()
            .await
            .map_err(|e| AppError::TokenNotFound(format!("{:?}: {}", token, e)))?;
        let symbol = contract.symbol().call().await.unwrap_or_else(|_| "UNKNOWN".to_string());
        let name = contract.name().call().await.unwrap_or_else(|_| "Unknown Token".to_string());

        let chain_id = self.client.chain_id().await?;
        Ok(Token::new(token, &symbol, &name, decimals, chain_id))
    }

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256> {
        let contract = IERC20::new(token, self.client.provider().clone());
        Ok(contract.balanceOf(owner).call().await?)
    }

    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256> {
        let contract = IERC20::new(token, self.client.provider().clone());
        Ok(contract.allowance(owner, spender).call().await?)
    }

    async fn get_pair(&self, token_a: Address, token_b: Address) -> Result<Option<Address>> {
        let factory = IUniswapV2Factory::new(self.factory, self.client.provider().clone());
        let pair = factory.getPair(token_a, token_b).call().await?;
        Ok((pair != Address::ZERO).then_some(pair))
    }

    async fn pair_reserves(&self, pair: Address) -> Result<PairReserves> {
        let contract = IUniswapV2Pair::new(pair, self.client.provider().clone());

        let token0 = contract.token0().call().await?;
        let token1 = contract.token1().call().await?;
        let reserves = contract.getReserves().call().await?;
        let total_supply = contract.totalSupply().call().await?;

        Ok(PairReserves {
            pair,
            token0,
            token1,
            reserve0: U256::from(reserves.reserve0),
            reserve1: U256::from(reserves.reserve1),
            total_supply,
        })
    }

    async fn get_amounts_out(&self, amount_in: U256, path: Vec<Address>) -> Result<Vec<U256>> {
        let router = IUniswapV2Router02::new(self.router, self.client.provider().clone());
        Ok(router.getAmountsOut(amount_in, path).call().await?)
    }

    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxHash> {
        tracing::info!(token = %token, spender = %spender, amount = %amount, "Sending approve");

        let contract = IERC20::new(token, self.client.provider().clone());
        let pending = contract.approve(spender, amount).send().await?;
        Ok(*pending.tx_hash())
    }

    async fn create_pair(&self, token_a: Address, token_b: Address) -> Result<TxHash> {
        tracing::info!(token_a = %token_a, token_b = %token_b, "Sending createPair");

        let factory = IUniswapV2Factory::new(self.factory, self.client.provider().clone());
        let pending = factory.createPair(token_a, token_b).send().await?;
        Ok(*pending.tx_hash())
    }

    async fn add_liquidity(&self, call: AddLiquidityCall) -> Result<TxHash> {
        tracing::info!(
            token_a = %call.token_a,
            token_b = %call.token_b,
            amount_a = %call.amount_a_desired,
            amount_b = %call.amount_b_desired,
            "Sending addLiquidity"
        );

        let router = IUniswapV2Router02::new(self.router, self.client.provider().clone());
        let pending = router
            .addLiquidity(
                call.token_a,
                call.token_b,
                call.amount_a_desired,
                call.amount_b_desired,
                call.amount_a_min,
                call.amount_b_min,
                call.to,
                U256::from(call.deadline),
            )
            .send()
            .await?;
        Ok(*pending.tx_hash())
    }

    async fn swap_exact_tokens_for_tokens(&self, call: SwapCall) -> Result<TxHash> {
        tracing::info!(
            amount_in = %call.amount_in,
            amount_out_min = %call.amount_out_min,
            hops = call.path.len().saturating_sub(1),
            "Sending swapExactTokensForTokens"
        );

        let router = IUniswapV2Router02::new(self.router, self.client.provider().clone());
        let pending = router
            .swapExactTokensForTokens(
                call.amount_in,
                call.amount_out_min,
                call.path,
                call.to,
                U256::from(call.deadline),
            )
            .send()
            .await?;
        Ok(*pending.tx_hash())
    }

    async fn transfer(&self, token: Address, to: Address, amount: U256) -> Result<TxHash> {
        tracing::info!(token = %token, to = %to, amount = %amount, "Sending transfer");

        let contract = IERC20::new(token, self.client.provider().clone());
        let pending = contract.transfer(to, amount).send().await?;
        Ok(*pending.tx_hash())
    }

    async fn wait_for_receipt(&self, hash: TxHash, timeout: Duration) -> Result<TxStatus> {
        let success = self.client.wait_for_receipt(hash, 1, timeout).await?;
        Ok(if success { TxStatus::Success } else { TxStatus::Reverted })
    }
}
