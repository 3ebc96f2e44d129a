//! Ethereum RPC client.

use alloy::{
    network::ReceiptResponse,
    primitives::{Address, TxHash, U256},
    providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::{
    error::{AppError, Result},
    ethereum::WalletManager,
};

/// Signing RPC client with lazy chain id discovery.
#[derive(Clone)]
pub struct EthereumClient {
    /// Provider with the wallet filler attached.
    provider: DynProvider,
    /// RPC URL for logging.
    rpc_url: String,
    /// Lazily initialized chain ID.
    chain_id: Arc<OnceCell<u64>>,
}

impl EthereumClient {
    /// Create a new Ethereum client that signs with `wallet`.
    ///
    /// Note: This does NOT make any network calls. The connection is
    /// established lazily when the first operation is performed.
    pub fn new(rpc_url: &str, wallet: &WalletManager) -> Result<Self> {
        let url = rpc_url
            .parse()
            .map_err(|_| AppError::Config(format!("Invalid RPC URL: {}", rpc_url)))?;

        let provider =
            ProviderBuilder::new().wallet(wallet.ethereum_wallet()).connect_http(url).erased();

        tracing::info!(
            rpc_url = %rpc_url,
            account = %wallet.address(),
            "Ethereum client created (lazy initialization)"
        );

        Ok(Self { provider, rpc_url: rpc_url.to_string(), chain_id: Arc::new(OnceCell::new()) })
    }

    /// Get the chain ID (fetches from network on first call).
    pub async fn chain_id(&self) -> Result<u64> {
        self.chain_id
            .get_or_try_init(|| async {
                let chain_id = self.provider.get_chain_id().await?;
                tracing::info!(
                    chain_id = chain_id,
                    rpc_url = %self.rpc_url,
                    "Connected to Ethereum node"
                );
                Ok(chain_id)
            })
            .await
            .copied()
    }

    /// Get the underlying provider.
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    /// Get native ETH balance for an address.
    pub async fn get_eth_balance(&self, address: Address) -> Result<U256> {
        let balance = self.provider.get_balance(address).await?;
        Ok(balance)
    }

    /// Wait until `hash` is mined with `confirmations` blocks on top.
    ///
    /// Returns the receipt status: `true` when the transaction succeeded.
    pub async fn wait_for_receipt(
        &self,
        hash: TxHash,
        confirmations: u64,
        timeout: Duration,
    ) -> Result<bool> {
        tracing::debug!(
            tx_hash = %hash,
            confirmations,
            timeout_secs = timeout.as_secs(),
            "Waiting for receipt"
        );

        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), hash)
            .with_required_confirmations(confirmations)
            .with_timeout(Some(timeout))
            .get_receipt()
            .await?;

        Ok(receipt.status())
    }
}
