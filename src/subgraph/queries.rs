//! GraphQL documents sent to the Uniswap V2 subgraph.

/// Rows per page for pool and token listings.
pub const LIST_PAGE_SIZE: u32 = 100;
/// Rows in the recent transactions list.
pub const RECENT_SWAPS_PAGE_SIZE: u32 = 50;
/// Rows per page of a pool's swap history.
pub const POOL_SWAPS_PAGE_SIZE: u32 = 100;

pub const TOP_POOLS: &str = r#"
query getPairs($first: Int!) {
  pairs(first: $first, orderBy: reserveUSD, orderDirection: desc) {
    id
    token0 { id symbol decimals }
    token1 { id symbol decimals }
    reserve0
    reserve1
    reserveUSD
    volumeUSD
    token0Price
    token1Price
  }
}
"#;

pub const TOP_TOKENS: &str = r#"
query getTokens($first: Int!) {
  tokens(
    first: $first
    orderBy: tradeVolumeUSD
    orderDirection: desc
    where: { totalLiquidity_gt: "0" }
  ) {
    id
    symbol
    name
    decimals
    totalSupply
    tradeVolume
    tradeVolumeUSD
    untrackedVolumeUSD
    txCount
    totalLiquidity
    derivedETH
  }
  bundle(id: "1") {
    ethPrice
  }
}
"#;

pub const RECENT_SWAPS: &str = r#"
query getTransactions($first: Int!) {
  swaps(first: $first, orderBy: timestamp, orderDirection: desc) {
    id
    timestamp
    pair {
      id
      token0 { id symbol decimals }
      token1 { id symbol decimals }
    }
    amount0In
    amount1In
    amount0Out
    amount1Out
    amountUSD
    to
  }
}
"#;

pub const POOL: &str = r#"
query getPair($pairId: ID!) {
  pair(id: $pairId) {
    id
    token0 { id symbol name decimals }
    token1 { id symbol name decimals }
    reserve0
    reserve1
    reserveUSD
    token0Price
    token1Price
  }
}
"#;

pub const POOL_SWAPS: &str = r#"
query getSwaps($pairId: ID!, $skip: Int!, $first: Int!) {
  swaps(
    where: { pair: $pairId }
    skip: $skip
    first: $first
    orderBy: timestamp
    orderDirection: desc
  ) {
    id
    timestamp
    amount0In
    amount1In
    amount0Out
    amount1Out
    amountUSD
    sender
    to
  }
}
"#;

pub const POSITIONS: &str = r#"
query getPositions($user: String!) {
  liquidityPositions(
    where: { user: $user, liquidityTokenBalance_gt: "0" }
    orderBy: createdAtTimestamp
    orderDirection: desc
  ) {
    id
    pair {
      id
      token0 { id symbol decimals }
      token1 { id symbol decimals }
      token0Price
      token1Price
    }
    liquidityTokenBalance
    createdAtTimestamp
  }
}
"#;
