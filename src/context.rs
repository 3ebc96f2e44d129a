//! Application context.
//!
//! One explicit object carries the network, chain handle, subgraph client,
//! token registry and the services built on them.

use std::sync::Arc;

use crate::{
    config::{Config, TxSettings},
    error::Result,
    ethereum::{DexChain, EthereumClient, NetworkConfig, RpcDexChain, WalletManager},
    services::{
        ApprovalService, BalanceService, LimitOrderBook, LiquidityService, SwapService,
        TokenRegistry, TransferService,
    },
    subgraph::SubgraphClient,
    types::Token,
};

#[derive(Clone)]
pub struct AppContext {
    pub network: NetworkConfig,
    pub settings: TxSettings,
    pub chain: Arc<dyn DexChain>,
    pub subgraph: SubgraphClient,
    pub tokens: Arc<TokenRegistry>,
    pub balances: BalanceService,
    pub swaps: SwapService,
    pub liquidity: LiquidityService,
    pub transfers: TransferService,
    pub limit_orders: Arc<LimitOrderBook>,
}

impl AppContext {
    /// Build the context for a live node.
    ///
    /// No network calls are made here; the chain id is fetched on first use.
    pub fn new(config: &Config) -> Result<Self> {
        let network = NetworkConfig::from_config(config)?;
        let wallet = WalletManager::from_private_key(&config.private_key)?;
        let client = Arc::new(EthereumClient::new(&config.rpc_url, &wallet)?);
        let chain: Arc<dyn DexChain> =
            Arc::new(RpcDexChain::new(client, wallet.address(), network.router, network.factory));

        Self::with_chain(network, chain, TxSettings::from(config))
    }

    /// Build the context around any [`DexChain`].
    pub fn with_chain(
        network: NetworkConfig,
        chain: Arc<dyn DexChain>,
        settings: TxSettings,
    ) -> Result<Self> {
        let subgraph = SubgraphClient::new(&network.subgraph_url)?;
        let tokens = Arc::new(TokenRegistry::from_network(&network));

        let balances = BalanceService::new(chain.clone());
        let approvals = ApprovalService::new(chain.clone(), settings.clone());
        let swaps =
            SwapService::new(chain.clone(), balances.clone(), approvals.clone(), settings.clone());
        let liquidity =
            LiquidityService::new(chain.clone(), balances.clone(), approvals, settings.clone());
        let transfers = TransferService::new(chain.clone(), balances.clone(), settings.clone());
        let limit_orders = Arc::new(LimitOrderBook::new(swaps.clone()));

        tracing::info!(
            network = %network.name,
            chain_id = network.chain_id,
            router = %network.router,
            subgraph = %network.subgraph_url,
            "Application context ready"
        );

        Ok(Self {
            network,
            settings,
            chain,
            subgraph,
            tokens,
            balances,
            swaps,
            liquidity,
            transfers,
            limit_orders,
        })
    }

    /// Resolve a symbol or address to a token.
    pub async fn resolve_token(&self, input: &str) -> Result<Token> {
        self.tokens.resolve(self.chain.as_ref(), input).await
    }
}
