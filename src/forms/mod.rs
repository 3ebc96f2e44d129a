//! Form models.
//!
//! UI-agnostic input state for the swap, liquidity, send and limit-order
//! pages. A form holds only ephemeral input plus a status; validation is
//! advisory and gates the submit control, the services re-check on chain.

pub mod limit;
pub mod liquidity;
pub mod pair;
pub mod send;
pub mod swap;

pub use limit::LimitOrderForm;
pub use liquidity::LiquidityForm;
pub use pair::TokenPairSelection;
pub use send::SendForm;
pub use swap::SwapForm;

use alloy::primitives::U256;

use crate::error::{AppError, ValidationError};

/// Submission state shared by every form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    /// Last submission failed with this message.
    Error(String),
}

impl FormStatus {
    pub fn is_submitting(&self) -> bool {
        matches!(self, FormStatus::Submitting)
    }

    /// Enter `Submitting`, refusing a second concurrent submission.
    pub fn begin(&mut self) -> Result<(), ValidationError> {
        if self.is_submitting() {
            return Err(ValidationError::SubmissionPending);
        }
        *self = FormStatus::Submitting;
        Ok(())
    }

    /// Leave `Submitting` with the outcome of the submission.
    pub fn settle<T>(&mut self, outcome: &Result<T, AppError>) {
        *self = match outcome {
            Ok(_) => FormStatus::Idle,
            Err(e) => FormStatus::Error(e.to_string()),
        };
    }

    /// Clear a stale error after the user edits the form.
    fn touch(&mut self) {
        if matches!(self, FormStatus::Error(_)) {
            *self = FormStatus::Idle;
        }
    }
}

/// `amount <= balance`, skipped while the balance is not fetched yet.
fn check_balance(amount: U256, balance: Option<U256>) -> Result<(), ValidationError> {
    match balance {
        Some(balance) if amount > balance => Err(ValidationError::InsufficientBalance),
        _ => Ok(()),
    }
}

/// Message to show next to the submit control.
fn status_message(status: &FormStatus, validation: Result<(), ValidationError>) -> Option<String> {
    match status {
        FormStatus::Error(message) => Some(message.clone()),
        _ => validation.err().map(|e| e.to_string()),
    }
}
