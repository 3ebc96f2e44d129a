//! Add-liquidity form.

use alloy::primitives::U256;

use super::{check_balance, status_message, FormStatus, TokenPairSelection};
use crate::{
    error::{AppError, ValidationError},
    types::{parse_amount, LiquidityIntent, Slippage, Token},
};

#[derive(Debug, Clone, Default)]
pub struct LiquidityForm {
    tokens: TokenPairSelection,
    amount_a: String,
    amount_b: String,
    slippage: Slippage,
    balance_a: Option<U256>,
    balance_b: Option<U256>,
    status: FormStatus,
}

impl LiquidityForm {
    pub fn new(token_a: Option<Token>, token_b: Option<Token>) -> Self {
        Self { tokens: TokenPairSelection::new(token_a, token_b), ..Self::default() }
    }

    pub fn tokens(&self) -> &TokenPairSelection {
        &self.tokens
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn amounts(&self) -> (&str, &str) {
        (&self.amount_a, &self.amount_b)
    }

    pub fn select_token_a(&mut self, token: Token) {
        let swapped = self.tokens.second() == Some(&token);
        self.tokens.select_first(token);
        if swapped {
            self.swap_values();
        } else {
            self.balance_a = None;
        }
        self.status.touch();
    }

    pub fn select_token_b(&mut self, token: Token) {
        let swapped = self.tokens.first() == Some(&token);
        self.tokens.select_second(token);
        if swapped {
            self.swap_values();
        } else {
            self.balance_b = None;
        }
        self.status.touch();
    }

    /// Swap the legs together with their amounts.
    pub fn switch_tokens(&mut self) {
        self.tokens.switch();
        self.swap_values();
        self.status.touch();
    }

    fn swap_values(&mut self) {
        std::mem::swap(&mut self.amount_a, &mut self.amount_b);
        std::mem::swap(&mut self.balance_a, &mut self.balance_b);
    }

    pub fn set_amount_a(&mut self, amount: &str) {
        self.amount_a = amount.to_string();
        self.status.touch();
    }

    pub fn set_amount_b(&mut self, amount: &str) {
        self.amount_b = amount.to_string();
        self.status.touch();
    }

    pub fn set_slippage(&mut self, slippage: &str) -> Result<(), ValidationError> {
        self.slippage = slippage.parse()?;
        Ok(())
    }

    pub fn set_balances(&mut self, balance_a: U256, balance_b: U256) {
        self.balance_a = Some(balance_a);
        self.balance_b = Some(balance_b);
    }

    pub fn validate(&self) -> Result<LiquidityIntent, ValidationError> {
        let (token_a, token_b) = self.tokens.both()?;
        let amount_a = parse_amount(&self.amount_a, token_a.decimals)?;
        let amount_b = parse_amount(&self.amount_b, token_b.decimals)?;
        check_balance(amount_a, self.balance_a)?;
        check_balance(amount_b, self.balance_b)?;

        Ok(LiquidityIntent {
            token_a: token_a.clone(),
            token_b: token_b.clone(),
            amount_a,
            amount_b,
            slippage: self.slippage,
        })
    }

    pub fn can_submit(&self) -> bool {
        !self.status.is_submitting() && self.validate().is_ok()
    }

    pub fn message(&self) -> Option<String> {
        status_message(&self.status, self.validate().map(|_| ()))
    }

    pub fn begin_submit(&mut self) -> Result<LiquidityIntent, ValidationError> {
        let intent = self.validate()?;
        self.status.begin()?;
        Ok(intent)
    }

    pub fn finish_submit<T>(&mut self, outcome: &Result<T, AppError>) {
        self.status.settle(outcome);
        if outcome.is_ok() {
            self.amount_a.clear();
            self.amount_b.clear();
            self.balance_a = None;
            self.balance_b = None;
        }
    }
}
