//! Send page form.

use alloy::primitives::{Address, U256};

use super::{check_balance, status_message, FormStatus};
use crate::{
    error::{AppError, ValidationError},
    types::{parse_address, parse_amount, SendIntent, Token},
};

#[derive(Debug, Clone, Default)]
pub struct SendForm {
    token: Option<Token>,
    recipient: String,
    amount: String,
    balance: Option<U256>,
    status: FormStatus,
}

impl SendForm {
    pub fn new(token: Option<Token>) -> Self {
        Self { token, ..Self::default() }
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn select_token(&mut self, token: Token) {
        if self.token.as_ref() != Some(&token) {
            self.balance = None;
        }
        self.token = Some(token);
        self.status.touch();
    }

    pub fn set_recipient(&mut self, recipient: &str) {
        self.recipient = recipient.to_string();
        self.status.touch();
    }

    pub fn set_amount(&mut self, amount: &str) {
        self.amount = amount.to_string();
        self.status.touch();
    }

    pub fn set_balance(&mut self, balance: U256) {
        self.balance = Some(balance);
    }

    /// Checks, in order: recipient present, recipient a valid non-zero
    /// address, amount entered, token selected, amount valid and within
    /// balance.
    pub fn validate(&self) -> Result<SendIntent, ValidationError> {
        if self.recipient.trim().is_empty() {
            return Err(ValidationError::RecipientMissing);
        }
        let recipient =
            parse_address(&self.recipient).map_err(|_| ValidationError::InvalidRecipient)?;
        if recipient == Address::ZERO {
            return Err(ValidationError::InvalidRecipient);
        }
        if self.amount.trim().is_empty() {
            return Err(ValidationError::AmountMissing);
        }
        let token = self.token.as_ref().ok_or(ValidationError::TokenNotSelected)?;
        let amount = parse_amount(&self.amount, token.decimals)?;
        check_balance(amount, self.balance)?;

        Ok(SendIntent { token: token.clone(), recipient, amount })
    }

    pub fn can_submit(&self) -> bool {
        !self.status.is_submitting() && self.validate().is_ok()
    }

    pub fn message(&self) -> Option<String> {
        status_message(&self.status, self.validate().map(|_| ()))
    }

    pub fn begin_submit(&mut self) -> Result<SendIntent, ValidationError> {
        let intent = self.validate()?;
        self.status.begin()?;
        Ok(intent)
    }

    pub fn finish_submit<T>(&mut self, outcome: &Result<T, AppError>) {
        self.status.settle(outcome);
        if outcome.is_ok() {
            self.amount.clear();
            self.recipient.clear();
            self.balance = None;
        }
    }
}
