//! GraphQL client for the Uniswap V2 subgraph.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

use super::{
    queries,
    types::{Pool, Position, SwapEvent, TokenListing, TokenStats},
};
use crate::error::{AppError, Result};

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct PairsData {
    pairs: Vec<Pool>,
}

#[derive(Debug, Deserialize)]
struct PairData {
    pair: Option<Pool>,
}

#[derive(Debug, Deserialize)]
struct Bundle {
    #[serde(rename = "ethPrice")]
    eth_price: String,
}

#[derive(Debug, Deserialize)]
struct TokensData {
    tokens: Vec<TokenStats>,
    bundle: Option<Bundle>,
}

#[derive(Debug, Deserialize)]
struct SwapsData {
    swaps: Vec<SwapEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PositionsData {
    liquidity_positions: Vec<Position>,
}

/// Read-only subgraph client. Every failure becomes [`AppError::Subgraph`].
#[derive(Clone)]
pub struct SubgraphClient {
    client: reqwest::Client,
    url: String,
}

impl SubgraphClient {
    pub fn new(url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, url: url.to_string() })
    }

    /// Pools ordered by USD reserve, highest first.
    pub async fn top_pools(&self) -> Result<Vec<Pool>> {
        let data: PairsData = self
            .query("getPairs", queries::TOP_POOLS, json!({ "first": queries::LIST_PAGE_SIZE }))
            .await?;
        Ok(data.pairs)
    }

    /// Tokens with liquidity, by USD trade volume, plus the ETH price.
    pub async fn top_tokens(&self) -> Result<TokenListing> {
        let data: TokensData = self
            .query("getTokens", queries::TOP_TOKENS, json!({ "first": queries::LIST_PAGE_SIZE }))
            .await?;
        Ok(TokenListing { tokens: data.tokens, eth_price: data.bundle.map(|b| b.eth_price) })
    }

    /// Most recent swaps across all pairs.
    pub async fn recent_swaps(&self) -> Result<Vec<SwapEvent>> {
        let data: SwapsData = self
            .query(
                "getTransactions",
                queries::RECENT_SWAPS,
                json!({ "first": queries::RECENT_SWAPS_PAGE_SIZE }),
            )
            .await?;
        Ok(data.swaps)
    }

    /// A single pair, `None` if the subgraph does not index it.
    pub async fn pool(&self, id: &str) -> Result<Option<Pool>> {
        let data: PairData =
            self.query("getPair", queries::POOL, json!({ "pairId": id.to_lowercase() })).await?;
        Ok(data.pair)
    }

    /// One page of a pair's swap history, newest first.
    pub async fn pool_swaps(&self, id: &str, skip: u32) -> Result<Vec<SwapEvent>> {
        let variables = json!({
            "pairId": id.to_lowercase(),
            "skip": skip,
            "first": queries::POOL_SWAPS_PAGE_SIZE,
        });
        let data: SwapsData = self.query("getSwaps", queries::POOL_SWAPS, variables).await?;
        Ok(data.swaps)
    }

    /// Non-empty liquidity positions of `address`, newest first.
    pub async fn positions(&self, address: &str) -> Result<Vec<Position>> {
        let data: PositionsData = self
            .query("getPositions", queries::POSITIONS, json!({ "user": address.to_lowercase() }))
            .await?;
        Ok(data.liquidity_positions)
    }

    async fn query<T: DeserializeOwned>(
        &self,
        name: &str,
        query: &str,
        variables: Value,
    ) -> Result<T> {
        debug!(query = name, url = %self.url, "Querying subgraph");

        let response = self
            .client
            .post(&self.url)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .map_err(|e| {
                warn!(query = name, error = %e, "Subgraph request failed");
                AppError::Subgraph(format!("{}: {}", name, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(query = name, status = %status, "Subgraph returned error status");
            return Err(AppError::Subgraph(format!(
                "{} returned status {}: {}",
                name, status, body
            )));
        }

        let body: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| AppError::Subgraph(format!("{}: invalid response: {}", name, e)))?;

        if !body.errors.is_empty() {
            let messages: Vec<String> = body.errors.into_iter().map(|e| e.message).collect();
            warn!(query = name, errors = ?messages, "Subgraph returned GraphQL errors");
            return Err(AppError::Subgraph(format!("{}: {}", name, messages.join("; "))));
        }

        body.data.ok_or_else(|| AppError::Subgraph(format!("{}: response has no data", name)))
    }
}
