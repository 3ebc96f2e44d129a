//! Subgraph read path.
//!
//! Pools, tokens, swaps and liquidity positions come from a Uniswap V2
//! subgraph over GraphQL. No retries and no caching: each call is one POST.

pub mod client;
pub mod queries;
pub mod types;

pub use client::SubgraphClient;
pub use types::{
    Pool, Position, PositionPair, SwapDirection, SwapEvent, SwapPair, TokenListing, TokenRef,
    TokenStats,
};
