//! MCP server implementation.
//!
//! Each write tool drives the matching form model the way a page would:
//! fill the inputs and validate them, then record the fetched balance,
//! submit through the service and settle the form status.

use rmcp::{
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{Implementation, ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use serde::Serialize;

use crate::{
    config::Config,
    context::AppContext,
    error::{AppError, ValidationError},
    forms::{LimitOrderForm, LiquidityForm, SendForm, SwapForm},
    subgraph::{Pool, SwapDirection, SwapEvent, TokenListing, TokenStats},
    types::{parse_address, parse_amount, Slippage, SwapIntent, Token, TokenInfo},
};

/// Uniswap V2 DEX MCP Server.
///
/// Provides tools for reading pools, tokens and positions from the subgraph
/// and for swapping, providing liquidity, sending tokens and placing limit
/// orders through the router.
#[derive(Clone)]
pub struct DexServer {
    ctx: AppContext,
    tool_router: ToolRouter<Self>,
}

impl DexServer {
    /// Create a server for a live node.
    ///
    /// Note: This uses lazy initialization - no network calls are made during
    /// server startup.
    pub fn new(config: Config) -> Result<Self, AppError> {
        tracing::info!("Initializing DEX MCP Server");
        let ctx = AppContext::new(&config)?;
        Ok(Self::from_context(ctx))
    }

    pub fn from_context(ctx: AppContext) -> Self {
        Self { ctx, tool_router: Self::tool_router() }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }
}

// ============================================================================
// Tool inputs
// ============================================================================

/// Input parameters for the get_balance tool.
#[derive(Debug, Clone, serde::Deserialize, schemars::JsonSchema)]
pub struct GetBalanceInput {
    /// Wallet address to query (0x...).
    pub address: String,
    /// Optional token symbol or contract address. If not provided, returns native ETH balance.
    #[serde(default)]
    pub token: Option<String>,
}

/// Input parameters for the get_quote and swap_tokens tools.
#[derive(Debug, Clone, serde::Deserialize, schemars::JsonSchema)]
pub struct SwapTokensInput {
    /// Input token symbol or address (e.g., "DAI").
    pub from_token: String,
    /// Output token symbol or address (e.g., "USDC").
    pub to_token: String,
    /// Amount to swap (human-readable, e.g., "1.5").
    pub amount: String,
    /// Slippage tolerance percentage as string (e.g., "0.5" for 0.5%). Default: "0.5".
    #[serde(default)]
    pub slippage_tolerance: Option<String>,
}

/// Input parameters for the create_pair and get_pool_info tools.
#[derive(Debug, Clone, serde::Deserialize, schemars::JsonSchema)]
pub struct TokenPairInput {
    /// First token symbol or address.
    pub token_a: String,
    /// Second token symbol or address.
    pub token_b: String,
}

/// Input parameters for the add_liquidity tool.
#[derive(Debug, Clone, serde::Deserialize, schemars::JsonSchema)]
pub struct AddLiquidityInput {
    /// First token symbol or address.
    pub token_a: String,
    /// Second token symbol or address.
    pub token_b: String,
    /// Amount of the first token (human-readable).
    pub amount_a: String,
    /// Amount of the second token (human-readable).
    pub amount_b: String,
    /// Slippage tolerance percentage. Default: "0.5".
    #[serde(default)]
    pub slippage_tolerance: Option<String>,
}

/// Input parameters for the send_tokens tool.
#[derive(Debug, Clone, serde::Deserialize, schemars::JsonSchema)]
pub struct SendTokensInput {
    /// Token symbol or address.
    pub token: String,
    /// Recipient address (0x...).
    pub recipient: String,
    /// Amount to send (human-readable).
    pub amount: String,
}

/// Input parameters for the place_limit_order tool.
#[derive(Debug, Clone, serde::Deserialize, schemars::JsonSchema)]
pub struct PlaceLimitOrderInput {
    /// Token to sell.
    pub from_token: String,
    /// Token to buy.
    pub to_token: String,
    /// Amount to sell (human-readable).
    pub amount: String,
    /// Minimum `to_token` received per `from_token` sold.
    pub limit_price: String,
}

/// Input parameters for the cancel_limit_order tool.
#[derive(Debug, Clone, serde::Deserialize, schemars::JsonSchema)]
pub struct CancelLimitOrderInput {
    /// Order id returned by place_limit_order.
    pub order_id: u64,
}

/// Input parameters for the get_pool tool.
#[derive(Debug, Clone, serde::Deserialize, schemars::JsonSchema)]
pub struct GetPoolInput {
    /// Pair address.
    pub pool_id: String,
    /// Swaps to skip for paging through history. Default: 0.
    #[serde(default)]
    pub skip: Option<u32>,
}

/// Input parameters for the get_positions tool.
#[derive(Debug, Clone, serde::Deserialize, schemars::JsonSchema)]
pub struct GetPositionsInput {
    /// Address to list positions for. Defaults to the server's wallet.
    #[serde(default)]
    pub address: Option<String>,
}

// ============================================================================
// Tool outputs
// ============================================================================

/// Swap row with the traded token0/token1 amounts resolved from the
/// in/out legs.
#[derive(Debug, Serialize)]
struct SwapRow {
    #[serde(flatten)]
    swap: SwapEvent,
    direction: SwapDirection,
    amount_token0: String,
    amount_token1: String,
}

impl From<SwapEvent> for SwapRow {
    fn from(swap: SwapEvent) -> Self {
        let direction = swap.direction();
        let (amount0, amount1) = swap.amounts();
        let (amount_token0, amount_token1) = (amount0.to_string(), amount1.to_string());
        Self { swap, direction, amount_token0, amount_token1 }
    }
}

/// Token row with its USD price, `derivedETH × ethPrice`.
#[derive(Debug, Serialize)]
struct TokenRow {
    #[serde(flatten)]
    token: TokenStats,
    price_usd: Option<String>,
}

#[derive(Debug, Serialize)]
struct TokenList {
    eth_price: Option<String>,
    tokens: Vec<TokenRow>,
}

impl From<TokenListing> for TokenList {
    fn from(listing: TokenListing) -> Self {
        let TokenListing { tokens, eth_price } = listing;
        let tokens = tokens
            .into_iter()
            .map(|token| {
                let price_usd = eth_price
                    .as_deref()
                    .and_then(|eth| token.price_usd(eth))
                    .map(|p| p.round_dp(8).normalize().to_string());
                TokenRow { token, price_usd }
            })
            .collect();
        Self { eth_price, tokens }
    }
}

#[derive(Debug, Serialize)]
struct PoolDetail {
    pool: Pool,
    swaps: Vec<SwapRow>,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value).map_err(|e| McpError::internal_error(e.to_string(), None))
}

fn validation(err: ValidationError) -> McpError {
    AppError::from(err).into()
}

fn ensure_distinct(a: &Token, b: &Token) -> Result<(), McpError> {
    if a.address == b.address {
        return Err(validation(ValidationError::SameToken));
    }
    Ok(())
}

#[tool_router]
impl DexServer {
    // ------------------------------------------------------------------------
    // Wallet and quotes
    // ------------------------------------------------------------------------

    /// Query ETH and ERC20 token balances for a wallet address.
    #[tool(description = "Query ETH or ERC20 token balance for a wallet address")]
    pub async fn get_balance(
        &self,
        Parameters(input): Parameters<GetBalanceInput>,
    ) -> Result<String, McpError> {
        tracing::info!(address = %input.address, token = ?input.token, "get_balance called");

        let address = parse_address(&input.address).map_err(AppError::InvalidAddress)?;
        let token = match &input.token {
            Some(t) => Some(self.ctx.resolve_token(t).await?),
            None => None,
        };

        let result = self.ctx.balances.get_balance(address, token.as_ref()).await?;
        to_json(&result)
    }

    #[tool(description = "List the tokens configured for the connected network")]
    pub async fn list_supported_tokens(&self) -> Result<String, McpError> {
        let tokens: Vec<TokenInfo> = self.ctx.tokens.list().iter().map(TokenInfo::from).collect();
        to_json(&tokens)
    }

    /// Quote a swap without sending anything.
    #[tool(
        description = "Quote a Uniswap V2 swap: expected and minimum output, execution price, mid price and price impact"
    )]
    pub async fn get_quote(
        &self,
        Parameters(input): Parameters<SwapTokensInput>,
    ) -> Result<String, McpError> {
        tracing::info!(
            from = %input.from_token,
            to = %input.to_token,
            amount = %input.amount,
            "get_quote called"
        );

        let token_in = self.ctx.resolve_token(&input.from_token).await?;
        let token_out = self.ctx.resolve_token(&input.to_token).await?;
        ensure_distinct(&token_in, &token_out)?;

        let amount_in = parse_amount(&input.amount, token_in.decimals).map_err(validation)?;
        let slippage = match &input.slippage_tolerance {
            Some(s) => s.parse::<Slippage>().map_err(validation)?,
            None => Slippage::default(),
        };

        let quote = self
            .ctx
            .swaps
            .quote(&SwapIntent { token_in, token_out, amount_in, slippage })
            .await?;
        to_json(&quote)
    }

    // ------------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------------

    /// Swap tokens through the router, approving it first when needed.
    #[tool(
        description = "Swap an exact amount of one token for another on Uniswap V2. Approves the router first when the allowance is too low."
    )]
    pub async fn swap_tokens(
        &self,
        Parameters(input): Parameters<SwapTokensInput>,
    ) -> Result<String, McpError> {
        tracing::info!(
            from = %input.from_token,
            to = %input.to_token,
            amount = %input.amount,
            slippage = ?input.slippage_tolerance,
            "swap_tokens called"
        );

        let token_in = self.ctx.resolve_token(&input.from_token).await?;
        let token_out = self.ctx.resolve_token(&input.to_token).await?;
        ensure_distinct(&token_in, &token_out)?;

        let mut form = SwapForm::default();
        form.select_input(token_in.clone());
        form.select_output(token_out);
        form.set_amount(&input.amount);
        if let Some(s) = &input.slippage_tolerance {
            form.set_slippage(s).map_err(validation)?;
        }
        form.validate().map_err(validation)?;
        form.set_balance(self.ctx.balances.own_balance(&token_in).await?);

        let intent = form.begin_submit().map_err(validation)?;
        let outcome = self.ctx.swaps.swap(&intent).await;
        form.finish_submit(&outcome);

        to_json(&outcome?)
    }

    #[tool(description = "Create the Uniswap V2 pair for two tokens, or return it if it already exists")]
    pub async fn create_pair(
        &self,
        Parameters(input): Parameters<TokenPairInput>,
    ) -> Result<String, McpError> {
        tracing::info!(token_a = %input.token_a, token_b = %input.token_b, "create_pair called");

        let a = self.ctx.resolve_token(&input.token_a).await?;
        let b = self.ctx.resolve_token(&input.token_b).await?;
        ensure_distinct(&a, &b)?;

        let result = self.ctx.liquidity.create_pair(&a, &b).await?;
        to_json(&result)
    }

    #[tool(
        description = "Add liquidity to a Uniswap V2 pool, creating the pair when missing and approving both tokens as needed"
    )]
    pub async fn add_liquidity(
        &self,
        Parameters(input): Parameters<AddLiquidityInput>,
    ) -> Result<String, McpError> {
        tracing::info!(
            token_a = %input.token_a,
            token_b = %input.token_b,
            amount_a = %input.amount_a,
            amount_b = %input.amount_b,
            "add_liquidity called"
        );

        let a = self.ctx.resolve_token(&input.token_a).await?;
        let b = self.ctx.resolve_token(&input.token_b).await?;
        ensure_distinct(&a, &b)?;

        let mut form = LiquidityForm::new(Some(a.clone()), Some(b.clone()));
        form.set_amount_a(&input.amount_a);
        form.set_amount_b(&input.amount_b);
        if let Some(s) = &input.slippage_tolerance {
            form.set_slippage(s).map_err(validation)?;
        }
        form.validate().map_err(validation)?;
        form.set_balances(
            self.ctx.balances.own_balance(&a).await?,
            self.ctx.balances.own_balance(&b).await?,
        );

        let intent = form.begin_submit().map_err(validation)?;
        let outcome = self.ctx.liquidity.add_liquidity(&intent).await;
        form.finish_submit(&outcome);

        to_json(&outcome?)
    }

    #[tool(description = "Read a pool's reserves, LP supply and the wallet's pool share from chain")]
    pub async fn get_pool_info(
        &self,
        Parameters(input): Parameters<TokenPairInput>,
    ) -> Result<String, McpError> {
        let a = self.ctx.resolve_token(&input.token_a).await?;
        let b = self.ctx.resolve_token(&input.token_b).await?;
        ensure_distinct(&a, &b)?;

        let snapshot = self.ctx.liquidity.pool_snapshot(&a, &b).await?;
        to_json(&snapshot)
    }

    #[tool(description = "Send ERC20 tokens to another address")]
    pub async fn send_tokens(
        &self,
        Parameters(input): Parameters<SendTokensInput>,
    ) -> Result<String, McpError> {
        tracing::info!(
            token = %input.token,
            recipient = %input.recipient,
            amount = %input.amount,
            "send_tokens called"
        );

        let token = self.ctx.resolve_token(&input.token).await?;

        let mut form = SendForm::new(Some(token.clone()));
        form.set_recipient(&input.recipient);
        form.set_amount(&input.amount);
        form.validate().map_err(validation)?;
        form.set_balance(self.ctx.balances.own_balance(&token).await?);

        let intent = form.begin_submit().map_err(validation)?;
        let outcome = self.ctx.transfers.send(&intent).await;
        form.finish_submit(&outcome);

        to_json(&outcome?)
    }

    // ------------------------------------------------------------------------
    // Limit orders
    // ------------------------------------------------------------------------

    #[tool(
        description = "Place a limit order: sell an amount once the router quotes at least limit_price output tokens per input token"
    )]
    pub async fn place_limit_order(
        &self,
        Parameters(input): Parameters<PlaceLimitOrderInput>,
    ) -> Result<String, McpError> {
        tracing::info!(
            from = %input.from_token,
            to = %input.to_token,
            amount = %input.amount,
            limit_price = %input.limit_price,
            "place_limit_order called"
        );

        let token_in = self.ctx.resolve_token(&input.from_token).await?;
        let token_out = self.ctx.resolve_token(&input.to_token).await?;
        ensure_distinct(&token_in, &token_out)?;

        let mut form = LimitOrderForm::new(Some(token_in.clone()), Some(token_out));
        form.set_amount(&input.amount);
        form.set_limit_price(&input.limit_price);
        form.validate().map_err(validation)?;
        form.set_balance(self.ctx.balances.own_balance(&token_in).await?);

        let intent = form.begin_submit().map_err(validation)?;
        let outcome = self.ctx.limit_orders.place(intent).await;
        form.finish_submit(&outcome);

        to_json(&outcome?)
    }

    #[tool(description = "Cancel an open limit order")]
    pub async fn cancel_limit_order(
        &self,
        Parameters(input): Parameters<CancelLimitOrderInput>,
    ) -> Result<String, McpError> {
        let order = self.ctx.limit_orders.cancel(input.order_id).await?;
        to_json(&order)
    }

    #[tool(description = "List limit orders and their status")]
    pub async fn list_limit_orders(&self) -> Result<String, McpError> {
        to_json(&self.ctx.limit_orders.list().await)
    }

    // ------------------------------------------------------------------------
    // Subgraph reads
    // ------------------------------------------------------------------------

    #[tool(description = "List the top 100 pools by USD liquidity")]
    pub async fn list_pools(&self) -> Result<String, McpError> {
        to_json(&self.ctx.subgraph.top_pools().await?)
    }

    #[tool(description = "List the top 100 tokens with liquidity by USD trade volume, with the ETH price")]
    pub async fn list_tokens(&self) -> Result<String, McpError> {
        to_json(&TokenList::from(self.ctx.subgraph.top_tokens().await?))
    }

    #[tool(description = "List the 50 most recent swaps across all pools")]
    pub async fn list_transactions(&self) -> Result<String, McpError> {
        let rows: Vec<SwapRow> =
            self.ctx.subgraph.recent_swaps().await?.into_iter().map(SwapRow::from).collect();
        to_json(&rows)
    }

    #[tool(description = "Get a pool by pair address together with a page of its swap history")]
    pub async fn get_pool(
        &self,
        Parameters(input): Parameters<GetPoolInput>,
    ) -> Result<String, McpError> {
        let pool = self
            .ctx
            .subgraph
            .pool(&input.pool_id)
            .await?
            .ok_or(AppError::PoolNotFound)?;
        let swaps = self.ctx.subgraph.pool_swaps(&input.pool_id, input.skip.unwrap_or(0)).await?;

        to_json(&PoolDetail { pool, swaps: swaps.into_iter().map(SwapRow::from).collect() })
    }

    #[tool(description = "List liquidity positions held by an address (defaults to the server's wallet)")]
    pub async fn get_positions(
        &self,
        Parameters(input): Parameters<GetPositionsInput>,
    ) -> Result<String, McpError> {
        let address = match &input.address {
            Some(a) => parse_address(a).map_err(AppError::InvalidAddress)?,
            None => self.ctx.chain.account(),
        };
        to_json(&self.ctx.subgraph.positions(&format!("{:?}", address)).await?)
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for DexServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "web3-dex".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(format!(
                "Uniswap V2 DEX client on {}. Provides tools for pool, token and position \
                 queries, swaps, liquidity provision, transfers and limit orders.",
                self.ctx.network.name
            )),
        }
    }
}
