//! Error types and handling module.
//!
//! Defines all application-specific error types, the revert-reason
//! classifier used by the write flows, and the MCP error mapping.

use rmcp::ErrorData as McpError;
use thiserror::Error;

/// Input problems caught before any write call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("select a token")]
    TokenNotSelected,

    #[error("enter an amount")]
    AmountMissing,

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("amount must be greater than zero")]
    ZeroAmount,

    #[error("insufficient balance")]
    InsufficientBalance,

    #[error("enter a recipient address")]
    RecipientMissing,

    #[error("invalid recipient address")]
    InvalidRecipient,

    #[error("enter a limit price")]
    LimitPriceMissing,

    #[error("invalid limit price: {0}")]
    InvalidLimitPrice(String),

    #[error("slippage tolerance must be between 0 and 50 (percentage)")]
    SlippageOutOfRange,

    #[error("both legs must use different tokens")]
    SameToken,

    #[error("a submission is already in progress")]
    SubmissionPending,
}

/// Known on-chain revert reasons, each with a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevertReason {
    /// Router minimum-amount check failed.
    SlippageExceeded,
    /// Router deadline passed before inclusion.
    Expired,
    /// `transferFrom` inside the router failed.
    TransferFromFailed,
    /// Token contract reported an insufficient balance.
    InsufficientBalance,
    /// Unspecified `execution reverted`.
    Rejected,
}

impl RevertReason {
    /// Match a raw RPC error message against the known revert substrings.
    ///
    /// Router-specific reasons are checked before the generic
    /// `insufficient` match so `INSUFFICIENT_OUTPUT_AMOUNT` is not read as
    /// a balance problem.
    pub fn classify(message: &str) -> Option<Self> {
        if message.contains("INSUFFICIENT_OUTPUT_AMOUNT")
            || message.contains("INSUFFICIENT_A_AMOUNT")
            || message.contains("INSUFFICIENT_B_AMOUNT")
        {
            Some(Self::SlippageExceeded)
        } else if message.contains("EXPIRED") {
            Some(Self::Expired)
        } else if message.contains("TRANSFER_FROM_FAILED") {
            Some(Self::TransferFromFailed)
        } else if message.to_lowercase().contains("insufficient") {
            Some(Self::InsufficientBalance)
        } else if message.contains("execution reverted") {
            Some(Self::Rejected)
        } else {
            None
        }
    }

    /// Message shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            Self::SlippageExceeded => "Price moved beyond your slippage tolerance",
            Self::Expired => "Transaction deadline expired",
            Self::TransferFromFailed => {
                "Token transfer failed, check your token balances and approvals"
            }
            Self::InsufficientBalance => "Insufficient token balance",
            Self::Rejected => {
                "Transaction rejected, check token balances, allowances and slippage settings"
            }
        }
    }
}

impl std::fmt::Display for RevertReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Which of the three failure tiers an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorTier {
    /// Caught before any network write, shown inline.
    Validation,
    /// On-chain failure, mapped to a friendlier message.
    Revert,
    /// RPC, subgraph or configuration failure.
    Transport,
}

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Ethereum RPC errors.
    #[error("Ethereum RPC error: {0}")]
    Rpc(String),

    /// Transport errors.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Subgraph query failed.
    #[error("Load failed: {0}")]
    Subgraph(String),

    /// Form or request input rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Invalid Ethereum address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Token symbol or address not known on this network.
    #[error("Token not found: {0}")]
    TokenNotFound(String),

    /// Balance pre-check failed.
    #[error("Insufficient {symbol} balance: need {required}, have {available}")]
    InsufficientBalance { symbol: String, required: String, available: String },

    /// Signer is connected to a different chain than configured.
    #[error("Wrong network: expected chain {expected}, connected to {actual}")]
    WrongNetwork { expected: u64, actual: u64 },

    /// Insufficient liquidity for swap.
    #[error("Insufficient liquidity for swap")]
    InsufficientLiquidity,

    /// Pool not found.
    #[error("Pool not found for token pair")]
    PoolNotFound,

    /// Approval transaction was mined but failed.
    #[error("{0} approval transaction failed")]
    ApprovalFailed(String),

    /// A transaction failed with a known revert reason.
    #[error("{0}")]
    Reverted(RevertReason),

    /// A transaction failed for an unrecognised reason.
    #[error("{action} failed: {message}")]
    TransactionFailed { action: String, message: String },

    /// Limit order id unknown.
    #[error("Limit order {0} not found")]
    OrderNotFound(u64),

    /// Limit order is not in a state that allows the operation.
    #[error("Limit order {id} is {status}")]
    OrderNotOpen { id: u64, status: String },

    /// Wallet-related errors.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Numeric overflow during conversion.
    #[error("Numeric overflow: {0}")]
    NumericOverflow(String),

    /// Pending transaction error.
    #[error("Pending transaction error: {0}")]
    PendingTransaction(String),
}

impl AppError {
    /// The failure tier this error belongs to.
    pub fn tier(&self) -> ErrorTier {
        match self {
            AppError::Validation(_)
            | AppError::InvalidAddress(_)
            | AppError::TokenNotFound(_)
            | AppError::InsufficientBalance { .. }
            | AppError::WrongNetwork { .. }
            | AppError::InsufficientLiquidity
            | AppError::PoolNotFound
            | AppError::OrderNotFound(_)
            | AppError::OrderNotOpen { .. }
            | AppError::Parse(_)
            | AppError::NumericOverflow(_) => ErrorTier::Validation,
            AppError::ApprovalFailed(_)
            | AppError::Reverted(_)
            | AppError::TransactionFailed { .. } => ErrorTier::Revert,
            AppError::Config(_)
            | AppError::Rpc(_)
            | AppError::Transport(_)
            | AppError::Subgraph(_)
            | AppError::Wallet(_)
            | AppError::PendingTransaction(_) => ErrorTier::Transport,
        }
    }

    /// Rewrite a raw chain failure raised inside a write flow into the
    /// message the user sees. Validation errors pass through untouched.
    pub fn into_user_facing(self, action: &str) -> AppError {
        match self {
            AppError::Rpc(message)
            | AppError::Transport(message)
            | AppError::PendingTransaction(message) => {
                // Library reverts on an empty pair before any router check.
                if message.contains("INSUFFICIENT_LIQUIDITY") {
                    return AppError::InsufficientLiquidity;
                }
                match RevertReason::classify(&message) {
                    Some(reason) => AppError::Reverted(reason),
                    None => AppError::TransactionFailed { action: action.to_string(), message },
                }
            }
            other => other,
        }
    }
}

impl From<alloy::transports::TransportError> for AppError {
    fn from(err: alloy::transports::TransportError) -> Self {
        AppError::Transport(err.to_string())
    }
}

impl From<alloy::contract::Error> for AppError {
    fn from(err: alloy::contract::Error) -> Self {
        AppError::Rpc(err.to_string())
    }
}

impl From<alloy::providers::PendingTransactionError> for AppError {
    fn from(err: alloy::providers::PendingTransactionError) -> Self {
        AppError::PendingTransaction(err.to_string())
    }
}

impl From<alloy::signers::local::LocalSignerError> for AppError {
    fn from(err: alloy::signers::local::LocalSignerError) -> Self {
        AppError::Wallet(err.to_string())
    }
}

impl From<alloy::hex::FromHexError> for AppError {
    fn from(err: alloy::hex::FromHexError) -> Self {
        AppError::Parse(err.to_string())
    }
}

impl From<AppError> for McpError {
    fn from(err: AppError) -> Self {
        match (&err, err.tier()) {
            (AppError::Config(_), _) => McpError::invalid_request(err.to_string(), None),
            (_, ErrorTier::Validation) => McpError::invalid_params(err.to_string(), None),
            _ => McpError::internal_error(err.to_string(), None),
        }
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
