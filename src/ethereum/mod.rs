//! Ethereum interaction module.
//!
//! Contains the signing client, the [`DexChain`] seam, network presets,
//! wallet management, and contract bindings.

pub mod chain;
pub mod client;
pub mod constants;
pub mod contracts;
pub mod network;
pub mod wallet;

pub use chain::{AddLiquidityCall, DexChain, RpcDexChain, SwapCall, TxStatus};
pub use client::EthereumClient;
pub use network::NetworkConfig;
pub use wallet::WalletManager;
