//! Web3 DEX Library
//!
//! A Uniswap V2 style DEX client exposed as a Model Context Protocol server.
//!
//! # Features
//!
//! - **Market Data**: Pools, tokens, recent swaps and liquidity positions from the subgraph
//! - **Swaps**: Quote and execute exact-input swaps, approving the router first when needed
//! - **Liquidity**: Create pairs and add liquidity, reading reserves and pool share from chain
//! - **Transfers**: Send ERC20 tokens with balance pre-checks
//! - **Limit Orders**: In-process orders filled by a polling keeper at the target price
//!
//! # Example
//!
//! ```rust,ignore
//! use web3_dex::{Config, DexServer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let server = DexServer::new(config)?;
//!     // Run server...
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod ethereum;
pub mod forms;
pub mod mcp;
pub mod services;
pub mod subgraph;
pub mod types;

pub use config::{Config, TxSettings};
pub use context::AppContext;
pub use error::{AppError, Result};
pub use ethereum::constants::*;
pub use mcp::DexServer;
