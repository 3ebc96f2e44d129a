//! Common utilities for integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::{address, Address, TxHash, B256, U256};
use async_trait::async_trait;

use web3_dex::{
    error::{AppError, Result},
    ethereum::{AddLiquidityCall, DexChain, NetworkConfig, SwapCall, TxStatus},
    types::{PairReserves, Token},
    AppContext, Config, DexServer, TxSettings, SEPOLIA_CHAIN_ID,
};

/// First Hardhat account.
pub const ACCOUNT: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

/// Address the mock factory assigns to every new pair.
pub const NEW_PAIR: Address = address!("00000000000000000000000000000000000000aa");

/// `amount` whole tokens with 18 decimals.
pub fn units(amount: u64) -> U256 {
    U256::from(amount) * U256::from(10u64).pow(U256::from(18u64))
}

/// Write call recorded by [`MockChain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Approve { token: Address, spender: Address, amount: U256 },
    CreatePair { token0: Address, token1: Address },
    AddLiquidity(AddLiquidityCall),
    Swap(SwapCall),
    Transfer { token: Address, to: Address, amount: U256 },
    /// Receipt wait for a previously sent transaction.
    Wait(TxHash),
}

#[derive(Default)]
struct State {
    chain_id: u64,
    balances: HashMap<(Address, Address), U256>,
    allowances: HashMap<Address, U256>,
    pairs: HashMap<(Address, Address), Address>,
    reserves: HashMap<Address, PairReserves>,
    /// Router quote as `amount_in * rate.0 / rate.1`.
    rate: (U256, U256),
    metadata: HashMap<Address, Token>,
    calls: Vec<Call>,
    approval_hashes: HashSet<TxHash>,
    revert_approvals: bool,
    time_out_approvals: bool,
    revert_acts: bool,
    act_error: Option<String>,
    nonce: u64,
    balance_reads: usize,
}

/// In-memory [`DexChain`] that records every write it receives.
pub struct MockChain {
    router: Address,
    state: Mutex<State>,
}

impl MockChain {
    pub fn new(router: Address) -> Self {
        let state = State {
            chain_id: SEPOLIA_CHAIN_ID,
            rate: (U256::from(1u64), U256::from(1u64)),
            ..State::default()
        };
        Self { router, state: Mutex::new(state) }
    }

    pub fn set_chain_id(&self, chain_id: u64) {
        self.state.lock().unwrap().chain_id = chain_id;
    }

    pub fn set_balance(&self, token: Address, owner: Address, amount: U256) {
        self.state.lock().unwrap().balances.insert((token, owner), amount);
    }

    pub fn set_allowance(&self, token: Address, amount: U256) {
        self.state.lock().unwrap().allowances.insert(token, amount);
    }

    /// Register a pair with reserves `(reserve_a, reserve_b)` for `(a, b)`.
    pub fn add_pair(
        &self,
        pair: Address,
        a: Address,
        b: Address,
        reserve_a: U256,
        reserve_b: U256,
    ) {
        let (token0, token1, reserve0, reserve1) =
            if a < b { (a, b, reserve_a, reserve_b) } else { (b, a, reserve_b, reserve_a) };
        let mut state = self.state.lock().unwrap();
        state.pairs.insert((token0, token1), pair);
        state.reserves.insert(
            pair,
            PairReserves { pair, token0, token1, reserve0, reserve1, total_supply: units(1000) },
        );
    }

    pub fn set_rate(&self, numerator: u64, denominator: u64) {
        self.state.lock().unwrap().rate = (U256::from(numerator), U256::from(denominator));
    }

    pub fn set_metadata(&self, token: Token) {
        self.state.lock().unwrap().metadata.insert(token.address, token);
    }

    pub fn revert_approvals(&self) {
        self.state.lock().unwrap().revert_approvals = true;
    }

    /// Approvals are sent but never confirm within the timeout.
    pub fn time_out_approvals(&self) {
        self.state.lock().unwrap().time_out_approvals = true;
    }

    pub fn revert_acts(&self) {
        self.state.lock().unwrap().revert_acts = true;
    }

    /// Make the next act transaction fail at submission with `message`.
    pub fn fail_acts_with(&self, message: &str) {
        self.state.lock().unwrap().act_error = Some(message.to_string());
    }

    /// Write calls in submission order, without receipt waits.
    pub fn calls(&self) -> Vec<Call> {
        self.timeline().into_iter().filter(|c| !matches!(c, Call::Wait(_))).collect()
    }

    /// Write calls and receipt waits in the order they happened.
    pub fn timeline(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of token balance reads served so far.
    pub fn balance_reads(&self) -> usize {
        self.state.lock().unwrap().balance_reads
    }

    fn record(&self, call: Call) -> Result<TxHash> {
        let mut state = self.state.lock().unwrap();
        let is_approval = matches!(call, Call::Approve { .. });
        if !is_approval {
            if let Some(message) = state.act_error.clone() {
                return Err(AppError::Rpc(message));
            }
        }

        state.nonce += 1;
        let hash = B256::from(U256::from(state.nonce).to_be_bytes::<32>());
        if is_approval {
            state.approval_hashes.insert(hash);
        }
        state.calls.push(call);
        Ok(hash)
    }
}

fn sorted(a: Address, b: Address) -> (Address, Address) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

#[async_trait]
impl DexChain for MockChain {
    fn account(&self) -> Address {
        ACCOUNT
    }

    fn router(&self) -> Address {
        self.router
    }

    async fn chain_id(&self) -> Result<u64> {
        Ok(self.state.lock().unwrap().chain_id)
    }

    async fn native_balance(&self, _owner: Address) -> Result<U256> {
        Ok(units(1))
    }

    async fn token_metadata(&self, token: Address) -> Result<Token> {
        self.state
            .lock()
            .unwrap()
            .metadata
            .get(&token)
            .cloned()
            .ok_or_else(|| AppError::Rpc(format!("execution reverted: no code at {:?}", token)))
    }

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256> {
        let mut state = self.state.lock().unwrap();
        state.balance_reads += 1;
        Ok(state.balances.get(&(token, owner)).copied().unwrap_or_default())
    }

    async fn allowance(&self, token: Address, _owner: Address, _spender: Address) -> Result<U256> {
        Ok(self.state.lock().unwrap().allowances.get(&token).copied().unwrap_or_default())
    }

    async fn get_pair(&self, token_a: Address, token_b: Address) -> Result<Option<Address>> {
        Ok(self.state.lock().unwrap().pairs.get(&sorted(token_a, token_b)).copied())
    }

    async fn pair_reserves(&self, pair: Address) -> Result<PairReserves> {
        self.state
            .lock()
            .unwrap()
            .reserves
            .get(&pair)
            .cloned()
            .ok_or_else(|| AppError::Rpc(format!("no pair at {:?}", pair)))
    }

    async fn get_amounts_out(&self, amount_in: U256, path: Vec<Address>) -> Result<Vec<U256>> {
        let state = self.state.lock().unwrap();
        // The router library reverts on a pair without reserves.
        for hop in path.windows(2) {
            let empty = state
                .pairs
                .get(&sorted(hop[0], hop[1]))
                .and_then(|pair| state.reserves.get(pair))
                .is_some_and(|reserves| reserves.is_empty());
            if empty {
                return Err(AppError::Rpc(
                    "execution reverted: UniswapV2Library: INSUFFICIENT_LIQUIDITY".to_string(),
                ));
            }
        }

        let (numerator, denominator) = state.rate;
        let mut amounts = vec![amount_in];
        for _ in 1..path.len() {
            amounts.push(amount_in * numerator / denominator);
        }
        Ok(amounts)
    }

    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxHash> {
        let hash = self.record(Call::Approve { token, spender, amount })?;
        let mut state = self.state.lock().unwrap();
        if !state.revert_approvals {
            state.allowances.insert(token, amount);
        }
        Ok(hash)
    }

    async fn create_pair(&self, token_a: Address, token_b: Address) -> Result<TxHash> {
        let hash = self.record(Call::CreatePair { token0: token_a, token1: token_b })?;
        let (token0, token1) = sorted(token_a, token_b);
        let mut state = self.state.lock().unwrap();
        state.pairs.insert((token0, token1), NEW_PAIR);
        state.reserves.insert(
            NEW_PAIR,
            PairReserves {
                pair: NEW_PAIR,
                token0,
                token1,
                reserve0: U256::ZERO,
                reserve1: U256::ZERO,
                total_supply: U256::ZERO,
            },
        );
        Ok(hash)
    }

    async fn add_liquidity(&self, call: AddLiquidityCall) -> Result<TxHash> {
        self.record(Call::AddLiquidity(call))
    }

    async fn swap_exact_tokens_for_tokens(&self, call: SwapCall) -> Result<TxHash> {
        self.record(Call::Swap(call))
    }

    async fn transfer(&self, token: Address, to: Address, amount: U256) -> Result<TxHash> {
        self.record(Call::Transfer { token, to, amount })
    }

    async fn wait_for_receipt(&self, hash: TxHash, _timeout: Duration) -> Result<TxStatus> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Wait(hash));
        let is_approval = state.approval_hashes.contains(&hash);
        if is_approval && state.time_out_approvals {
            return Err(AppError::PendingTransaction(
                "Transaction watcher error: transaction was not confirmed within the timeout"
                    .to_string(),
            ));
        }
        let reverted = if is_approval { state.revert_approvals } else { state.revert_acts };
        Ok(if reverted { TxStatus::Reverted } else { TxStatus::Success })
    }
}

pub fn settings() -> TxSettings {
    TxSettings {
        chain_id: SEPOLIA_CHAIN_ID,
        approve_unlimited: false,
        confirmation_timeout: Duration::from_secs(5),
        deadline: Duration::from_secs(1200),
    }
}

/// Sepolia context over a fresh [`MockChain`].
pub fn mock_context() -> (AppContext, Arc<MockChain>) {
    mock_context_with(NetworkConfig::sepolia())
}

pub fn mock_context_with(network: NetworkConfig) -> (AppContext, Arc<MockChain>) {
    let chain = Arc::new(MockChain::new(network.router));
    let ctx = AppContext::with_chain(network, chain.clone(), settings()).unwrap();
    (ctx, chain)
}

pub fn token(ctx: &AppContext, symbol: &str) -> Token {
    ctx.tokens.resolve_symbol(symbol).cloned().unwrap()
}

/// Helper to create a test server from environment variables.
pub fn create_test_server() -> Option<DexServer> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env().ok()?;
    if config.rpc_url.is_empty() || config.private_key.is_empty() {
        return None;
    }

    DexServer::new(config).ok()
}

/// Skip test if server cannot be created (missing env vars).
#[macro_export]
macro_rules! skip_if_no_server {
    () => {
        match common::create_test_server() {
            Some(server) => server,
            None => {
                eprintln!("Skipping test: ETHEREUM_RPC_URL or ETHEREUM_PRIVATE_KEY not set");
                return;
            }
        }
    };
}
