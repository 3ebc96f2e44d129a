//! Locally matched limit orders.
//!
//! Orders live in memory. A keeper task quotes every open order on a fixed
//! interval and, once the router quote reaches the order's target, executes
//! it through the regular swap flow with the target as the minimum output.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::U256;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{
    error::{AppError, Result, ValidationError},
    services::{current_timestamp, SwapService},
    types::{
        parse_units, u256_to_decimal, LimitOrder, LimitOrderIntent, LimitOrderView, OrderStatus,
        Slippage, SwapIntent,
    },
};

pub struct LimitOrderBook {
    swaps: SwapService,
    orders: RwLock<BTreeMap<u64, LimitOrder>>,
    next_id: AtomicU64,
}

impl LimitOrderBook {
    pub fn new(swaps: SwapService) -> Self {
        Self { swaps, orders: RwLock::new(BTreeMap::new()), next_id: AtomicU64::new(1) }
    }

    /// Register an open order.
    pub async fn place(&self, intent: LimitOrderIntent) -> Result<LimitOrderView> {
        if intent.token_in.address == intent.token_out.address {
            return Err(ValidationError::SameToken.into());
        }
        if intent.amount_in.is_zero() {
            return Err(ValidationError::ZeroAmount.into());
        }
        if intent.limit_price <= Decimal::ZERO {
            return Err(ValidationError::InvalidLimitPrice(intent.limit_price.to_string()).into());
        }

        let target_amount_out = target_amount_out(&intent)?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let order = LimitOrder {
            id,
            intent,
            target_amount_out,
            status: OrderStatus::Open,
            created_at: current_timestamp(),
        };

        info!(
            id,
            token_in = %order.intent.token_in.symbol,
            token_out = %order.intent.token_out.symbol,
            limit_price = %order.intent.limit_price,
            target = %target_amount_out,
            "Limit order placed"
        );

        let view = view(&order);
        self.orders.write().await.insert(id, order);
        Ok(view)
    }

    /// Cancel an order that has not started executing.
    pub async fn cancel(&self, id: u64) -> Result<LimitOrderView> {
        let mut orders = self.orders.write().await;
        let order = orders.get_mut(&id).ok_or(AppError::OrderNotFound(id))?;
        if !order.status.is_open() {
            return Err(AppError::OrderNotOpen { id, status: order.status.label().to_string() });
        }
        order.status = OrderStatus::Cancelled;
        info!(id, "Limit order cancelled");
        Ok(view(order))
    }

    /// All orders, oldest first.
    pub async fn list(&self) -> Vec<LimitOrderView> {
        self.orders.read().await.values().map(view).collect()
    }

    /// Quote every open order and execute those whose target is reached.
    ///
    /// Returns the ids that were submitted for execution.
    pub async fn check_open_orders(&self) -> Vec<u64> {
        let open: Vec<LimitOrder> =
            self.orders.read().await.values().filter(|o| o.status.is_open()).cloned().collect();

        let mut executed = Vec::new();
        for order in open {
            let intent = &order.intent;
            let quoted = match self
                .swaps
                .amount_out(&intent.token_in, &intent.token_out, intent.amount_in)
                .await
            {
                Ok(amount) => amount,
                Err(e) => {
                    warn!(id = order.id, error = %e, "Limit order quote failed");
                    continue;
                }
            };

            if quoted < order.target_amount_out {
                debug!(
                    id = order.id,
                    quoted = %quoted,
                    target = %order.target_amount_out,
                    "Limit not reached"
                );
                continue;
            }

            if !self.claim(order.id).await {
                continue;
            }

            info!(
                id = order.id,
                quoted = %quoted,
                target = %order.target_amount_out,
                "Limit reached, executing"
            );
            let swap = SwapIntent {
                token_in: intent.token_in.clone(),
                token_out: intent.token_out.clone(),
                amount_in: intent.amount_in,
                slippage: Slippage::default(),
            };
            let status = match self.swaps.execute(&swap, Some(order.target_amount_out)).await {
                Ok(receipt) => OrderStatus::Filled { tx_hash: receipt.tx_hash },
                Err(e) => {
                    warn!(id = order.id, error = %e, "Limit order execution failed");
                    OrderStatus::Failed { reason: e.to_string() }
                }
            };
            self.set_status(order.id, status).await;
            executed.push(order.id);
        }
        executed
    }

    /// Run [`Self::check_open_orders`] every `interval` until the task is
    /// aborted.
    pub fn spawn_watcher(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        info!(interval_secs = interval.as_secs(), "Starting limit order watcher");
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let executed = self.check_open_orders().await;
                if !executed.is_empty() {
                    info!(orders = ?executed, "Limit orders executed");
                }
            }
        })
    }

    /// Move an order from `Open` to `Executing`. False if it was not open.
    async fn claim(&self, id: u64) -> bool {
        let mut orders = self.orders.write().await;
        match orders.get_mut(&id) {
            Some(order) if order.status.is_open() => {
                order.status = OrderStatus::Executing;
                true
            }
            _ => false,
        }
    }

    async fn set_status(&self, id: u64, status: OrderStatus) {
        if let Some(order) = self.orders.write().await.get_mut(&id) {
            order.status = status;
        }
    }
}

/// `amount_in × limit_price` in the output token's smallest units,
/// truncated.
fn target_amount_out(intent: &LimitOrderIntent) -> Result<U256> {
    let amount_in = u256_to_decimal(intent.amount_in, intent.token_in.decimals);
    let target = amount_in
        .checked_mul(intent.limit_price)
        .ok_or_else(|| {
            AppError::NumericOverflow(format!("{} × {}", amount_in, intent.limit_price))
        })?;

    let raw = parse_units(&target.normalize().to_string(), intent.token_out.decimals)
        .map_err(AppError::Parse)?;
    if raw.is_zero() {
        return Err(ValidationError::InvalidLimitPrice(intent.limit_price.to_string()).into());
    }
    Ok(raw)
}

fn view(order: &LimitOrder) -> LimitOrderView {
    let intent = &order.intent;
    LimitOrderView {
        id: order.id,
        token_in: intent.token_in.symbol.clone(),
        token_out: intent.token_out.symbol.clone(),
        amount_in: intent.token_in.format(intent.amount_in),
        limit_price: intent.limit_price.normalize().to_string(),
        target_amount_out: intent.token_out.format(order.target_amount_out),
        status: order.status.clone(),
        created_at: order.created_at,
    }
}
