//! Business logic services module.
//!
//! Every write flow follows the same order: network check, balance
//! pre-check, approval (only when the allowance is short), then the act
//! transaction.

pub mod approval;
pub mod balance;
pub mod limit_order;
pub mod liquidity;
pub mod swap;
pub mod token_registry;
pub mod transfer;

pub use approval::ApprovalService;
pub use balance::BalanceService;
pub use limit_order::LimitOrderBook;
pub use liquidity::LiquidityService;
pub use swap::SwapService;
pub use token_registry::TokenRegistry;
pub use transfer::TransferService;

use std::time::{Duration, SystemTime};

use crate::{
    error::{AppError, Result},
    ethereum::DexChain,
};

/// Get current Unix timestamp in seconds.
/// Returns 0 if system time is before Unix epoch.
pub(crate) fn current_timestamp() -> u64 {
    SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}

/// Router deadline `offset` from now.
pub(crate) fn deadline_from_now(offset: Duration) -> u64 {
    current_timestamp() + offset.as_secs()
}

/// Fail with [`AppError::WrongNetwork`] unless the signer is on `expected`.
pub async fn ensure_network(chain: &dyn DexChain, expected: u64) -> Result<()> {
    let actual = chain.chain_id().await?;
    if actual != expected {
        tracing::warn!(expected, actual, "Signer connected to the wrong network");
        return Err(AppError::WrongNetwork { expected, actual });
    }
    Ok(())
}
