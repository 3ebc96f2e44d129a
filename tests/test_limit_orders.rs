//! Integration tests for the limit order book and keeper.
//!
//! Run with: `cargo test --test test_limit_orders`

mod common;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{address, Address, U256};
use rmcp::handler::server::wrapper::Parameters;
use rust_decimal::Decimal;

use common::{mock_context, token, units, Call, MockChain, ACCOUNT};
use web3_dex::{
    error::AppError,
    mcp::{CancelLimitOrderInput, PlaceLimitOrderInput},
    services::LimitOrderBook,
    types::{LimitOrderIntent, OrderStatus},
    AppContext, DexServer,
};

const PAIR: Address = address!("00000000000000000000000000000000000000f3");

fn setup() -> (AppContext, Arc<MockChain>) {
    let (ctx, chain) = mock_context();
    let (dai, usdc) = (token(&ctx, "DAI"), token(&ctx, "USDC"));
    chain.add_pair(PAIR, dai.address, usdc.address, units(1000), units(1000));
    chain.set_balance(dai.address, ACCOUNT, units(100));
    chain.set_allowance(dai.address, U256::MAX);
    (ctx, chain)
}

fn order(ctx: &AppContext, amount: u64, price: &str) -> LimitOrderIntent {
    LimitOrderIntent {
        token_in: token(ctx, "DAI"),
        token_out: token(ctx, "USDC"),
        amount_in: units(amount),
        limit_price: Decimal::from_str(price).unwrap(),
    }
}

async fn status_of(book: &LimitOrderBook, id: u64) -> OrderStatus {
    book.list().await.into_iter().find(|o| o.id == id).unwrap().status
}

#[tokio::test]
async fn test_order_fills_once_quote_reaches_target() {
    let (ctx, chain) = setup();
    let book = ctx.limit_orders.clone();

    let placed = book.place(order(&ctx, 10, "1.01")).await.unwrap();
    assert_eq!(placed.id, 1);
    assert_eq!(placed.target_amount_out, "10.1");
    assert_eq!(placed.status, OrderStatus::Open);

    // Quote of 0.99 per DAI stays below the limit.
    chain.set_rate(99, 100);
    assert!(book.check_open_orders().await.is_empty());
    assert!(chain.calls().is_empty());

    // 1.02 per DAI crosses it.
    chain.set_rate(102, 100);
    assert_eq!(book.check_open_orders().await, vec![1]);

    let calls = chain.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        Call::Swap(call) => {
            assert_eq!(call.amount_in, units(10));
            // The target is the swap's minimum output.
            assert_eq!(call.amount_out_min, units(101) / U256::from(10u64));
        }
        other => panic!("expected swap, got {:?}", other),
    }

    let filled = status_of(&book, 1).await;
    assert!(matches!(filled, OrderStatus::Filled { ref tx_hash } if tx_hash.starts_with("0x")));

    // A filled order is never executed again.
    assert!(book.check_open_orders().await.is_empty());
    assert_eq!(chain.calls().len(), 1);
}

#[tokio::test]
async fn test_failed_execution_marks_order_failed() {
    let (ctx, chain) = setup();
    let book = ctx.limit_orders.clone();
    book.place(order(&ctx, 500, "0.5")).await.unwrap();

    // Quote reaches the target but the wallet only holds 100 DAI.
    let executed = book.check_open_orders().await;
    assert_eq!(executed, vec![1]);

    match status_of(&book, 1).await {
        OrderStatus::Failed { reason } => assert!(reason.contains("Insufficient DAI balance")),
        other => panic!("expected Failed, got {:?}", other),
    }
    assert!(chain.calls().is_empty());
    assert!(book.check_open_orders().await.is_empty());
}

#[tokio::test]
async fn test_order_on_empty_pool_stays_open() {
    let (ctx, chain) = mock_context();
    let (dai, usdc) = (token(&ctx, "DAI"), token(&ctx, "USDC"));
    chain.add_pair(PAIR, dai.address, usdc.address, U256::ZERO, U256::ZERO);
    chain.set_balance(dai.address, ACCOUNT, units(100));
    let book = ctx.limit_orders.clone();
    book.place(order(&ctx, 1, "0.5")).await.unwrap();

    assert!(book.check_open_orders().await.is_empty());
    assert_eq!(status_of(&book, 1).await, OrderStatus::Open);
    assert!(chain.calls().is_empty());
}

#[tokio::test]
async fn test_cancel() {
    let (ctx, chain) = setup();
    let book = ctx.limit_orders.clone();
    book.place(order(&ctx, 1, "1")).await.unwrap();

    let cancelled = book.cancel(1).await.unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);

    let err = book.cancel(1).await.unwrap_err();
    assert!(matches!(err, AppError::OrderNotOpen { id: 1, ref status } if status == "cancelled"));

    let err = book.cancel(42).await.unwrap_err();
    assert!(matches!(err, AppError::OrderNotFound(42)));

    // Cancelled orders are skipped by the keeper.
    chain.set_rate(2, 1);
    assert!(book.check_open_orders().await.is_empty());
    assert!(chain.calls().is_empty());
}

#[tokio::test]
async fn test_orders_listed_in_placement_order() {
    let (ctx, _chain) = setup();
    let book = ctx.limit_orders.clone();
    book.place(order(&ctx, 1, "1")).await.unwrap();
    book.place(order(&ctx, 2, "1.5")).await.unwrap();

    let orders = book.list().await;
    let ids: Vec<u64> = orders.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(orders[1].target_amount_out, "3");
}

#[tokio::test]
async fn test_watcher_executes_on_tick() {
    let (ctx, chain) = setup();
    let book = ctx.limit_orders.clone();
    book.place(order(&ctx, 1, "1")).await.unwrap();

    let handle = book.clone().spawn_watcher(Duration::from_secs(15));
    // The first tick fires immediately.
    tokio::time::sleep(Duration::from_millis(200)).await;
    handle.abort();

    assert!(matches!(status_of(&book, 1).await, OrderStatus::Filled { .. }));
    assert_eq!(chain.calls().len(), 1);
}

#[tokio::test]
async fn test_limit_order_tools() {
    let (ctx, _chain) = setup();
    let server = DexServer::from_context(ctx);

    let input = PlaceLimitOrderInput {
        from_token: "DAI".to_string(),
        to_token: "USDC".to_string(),
        amount: "4".to_string(),
        limit_price: String::new(),
    };
    let err = server.place_limit_order(Parameters(input)).await.unwrap_err();
    assert_eq!(err.message, "enter a limit price");

    let input = PlaceLimitOrderInput {
        from_token: "DAI".to_string(),
        to_token: "USDC".to_string(),
        amount: "4".to_string(),
        limit_price: "1.25".to_string(),
    };
    let json_str = server.place_limit_order(Parameters(input)).await.unwrap();
    let placed: serde_json::Value = serde_json::from_str(&json_str).unwrap();
    assert_eq!(placed["target_amount_out"], "5");
    assert_eq!(placed["status"]["state"], "open");

    let id = placed["id"].as_u64().unwrap();
    let input = CancelLimitOrderInput { order_id: id };
    let json_str = server.cancel_limit_order(Parameters(input)).await.unwrap();
    let cancelled: serde_json::Value = serde_json::from_str(&json_str).unwrap();
    assert_eq!(cancelled["status"]["state"], "cancelled");

    let listed: serde_json::Value =
        serde_json::from_str(&server.list_limit_orders().await.unwrap()).unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);
}
