//! MCP server module.
//!
//! Contains the MCP server implementation with tool handlers.

pub mod server;

pub use server::DexServer;
pub use server::{
    AddLiquidityInput, CancelLimitOrderInput, GetBalanceInput, GetPoolInput, GetPositionsInput,
    PlaceLimitOrderInput, SendTokensInput, SwapTokensInput, TokenPairInput,
};
