//! Integration tests for ERC-20 transfers.
//!
//! Run with: `cargo test --test test_send_tokens`

mod common;

use alloy::primitives::{address, Address};
use rmcp::handler::server::wrapper::Parameters;

use common::{mock_context, token, units, Call, ACCOUNT};
use web3_dex::{
    error::{AppError, ValidationError},
    mcp::SendTokensInput,
    types::SendIntent,
    DexServer,
};

const RECIPIENT: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");

#[tokio::test]
async fn test_send_transfers_without_approval() {
    let (ctx, chain) = mock_context();
    let dai = token(&ctx, "DAI");
    chain.set_balance(dai.address, ACCOUNT, units(10));

    let intent = SendIntent { token: dai.clone(), recipient: RECIPIENT, amount: units(10) };
    let receipt = ctx.transfers.send(&intent).await.unwrap();

    assert_eq!(
        chain.calls(),
        vec![Call::Transfer { token: dai.address, to: RECIPIENT, amount: units(10) }]
    );
    assert_eq!(receipt.token, "DAI");
    assert_eq!(receipt.amount, "10");
    assert_eq!(receipt.recipient.to_lowercase(), format!("{:?}", RECIPIENT).to_lowercase());
}

#[tokio::test]
async fn test_send_rejects_zero_recipient() {
    let (ctx, chain) = mock_context();
    let dai = token(&ctx, "DAI");
    chain.set_balance(dai.address, ACCOUNT, units(10));

    let intent = SendIntent { token: dai, recipient: Address::ZERO, amount: units(1) };
    let err = ctx.transfers.send(&intent).await.unwrap_err();

    assert!(matches!(err, AppError::Validation(ValidationError::InvalidRecipient)));
    assert!(chain.calls().is_empty());
}

#[tokio::test]
async fn test_send_insufficient_balance() {
    let (ctx, chain) = mock_context();
    let dai = token(&ctx, "DAI");
    chain.set_balance(dai.address, ACCOUNT, units(1));

    let intent = SendIntent { token: dai, recipient: RECIPIENT, amount: units(2) };
    let err = ctx.transfers.send(&intent).await.unwrap_err();

    assert!(matches!(err, AppError::InsufficientBalance { .. }));
    assert!(chain.calls().is_empty());
}

#[tokio::test]
async fn test_send_reverted_transfer() {
    let (ctx, chain) = mock_context();
    let dai = token(&ctx, "DAI");
    chain.set_balance(dai.address, ACCOUNT, units(5));
    chain.fail_acts_with("execution reverted: ERC20: transfer amount exceeds balance");

    let intent = SendIntent { token: dai, recipient: RECIPIENT, amount: units(5) };
    let err = ctx.transfers.send(&intent).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Transaction rejected, check token balances, allowances and slippage settings"
    );
}

#[tokio::test]
async fn test_send_tool_validation_messages() {
    let (ctx, chain) = mock_context();
    chain.set_balance(token(&ctx, "DAI").address, ACCOUNT, units(5));
    let server = DexServer::from_context(ctx);

    let cases = [
        ("", "1", "enter a recipient address"),
        ("0x1234", "1", "invalid recipient address"),
        ("0x0000000000000000000000000000000000000000", "1", "invalid recipient address"),
        ("0x70997970C51812dc3A010C7d01b50e0d17dc79C8", "", "enter an amount"),
        ("0x70997970C51812dc3A010C7d01b50e0d17dc79C8", "6", "insufficient balance"),
    ];

    for (recipient, amount, expected) in cases {
        let input = SendTokensInput {
            token: "DAI".to_string(),
            recipient: recipient.to_string(),
            amount: amount.to_string(),
        };
        let err = server.send_tokens(Parameters(input)).await.unwrap_err();
        assert_eq!(err.message, expected, "recipient={:?} amount={:?}", recipient, amount);
    }
    assert!(chain.calls().is_empty());
    // Only the over-balance case got as far as reading the balance.
    assert_eq!(chain.balance_reads(), 1);
}

#[tokio::test]
async fn test_send_tool_end_to_end() {
    let (ctx, chain) = mock_context();
    chain.set_balance(token(&ctx, "USDT").address, ACCOUNT, units(5));
    let server = DexServer::from_context(ctx);

    let input = SendTokensInput {
        token: "usdt".to_string(),
        recipient: "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".to_string(),
        amount: "2.5".to_string(),
    };
    let json_str = server.send_tokens(Parameters(input)).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json_str).unwrap();

    assert_eq!(parsed["token"], "USDT");
    assert_eq!(parsed["amount"], "2.5");
    assert_eq!(chain.calls().len(), 1);
}
