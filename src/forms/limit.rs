//! Limit order form.

use alloy::primitives::U256;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::{check_balance, status_message, FormStatus, TokenPairSelection};
use crate::{
    error::{AppError, ValidationError},
    types::{parse_amount, LimitOrderIntent, Token},
};

#[derive(Debug, Clone, Default)]
pub struct LimitOrderForm {
    tokens: TokenPairSelection,
    amount: String,
    limit_price: String,
    balance: Option<U256>,
    status: FormStatus,
}

impl LimitOrderForm {
    pub fn new(token_in: Option<Token>, token_out: Option<Token>) -> Self {
        Self { tokens: TokenPairSelection::new(token_in, token_out), ..Self::default() }
    }

    pub fn tokens(&self) -> &TokenPairSelection {
        &self.tokens
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn select_input(&mut self, token: Token) {
        self.tokens.select_first(token);
        self.balance = None;
        self.status.touch();
    }

    pub fn select_output(&mut self, token: Token) {
        self.tokens.select_second(token);
        self.status.touch();
    }

    pub fn switch_tokens(&mut self) {
        self.tokens.switch();
        self.amount.clear();
        self.limit_price.clear();
        self.balance = None;
        self.status.touch();
    }

    pub fn set_amount(&mut self, amount: &str) {
        self.amount = amount.to_string();
        self.status.touch();
    }

    pub fn set_limit_price(&mut self, price: &str) {
        self.limit_price = price.to_string();
        self.status.touch();
    }

    pub fn set_balance(&mut self, balance: U256) {
        self.balance = Some(balance);
    }

    /// `amount × limit price` once both parse.
    pub fn preview(&self) -> Option<Decimal> {
        let amount = Decimal::from_str(self.amount.trim()).ok()?;
        let price = Decimal::from_str(self.limit_price.trim()).ok()?;
        amount.checked_mul(price).map(|d| d.normalize())
    }

    pub fn validate(&self) -> Result<LimitOrderIntent, ValidationError> {
        let (token_in, token_out) = self.tokens.both()?;
        let amount_in = parse_amount(&self.amount, token_in.decimals)?;
        check_balance(amount_in, self.balance)?;

        let price = self.limit_price.trim();
        if price.is_empty() {
            return Err(ValidationError::LimitPriceMissing);
        }
        let limit_price = Decimal::from_str(price)
            .map_err(|_| ValidationError::InvalidLimitPrice(price.to_string()))?;
        if limit_price <= Decimal::ZERO {
            return Err(ValidationError::InvalidLimitPrice(price.to_string()));
        }

        Ok(LimitOrderIntent {
            token_in: token_in.clone(),
            token_out: token_out.clone(),
            amount_in,
            limit_price,
        })
    }

    pub fn can_submit(&self) -> bool {
        !self.status.is_submitting() && self.validate().is_ok()
    }

    pub fn message(&self) -> Option<String> {
        status_message(&self.status, self.validate().map(|_| ()))
    }

    pub fn begin_submit(&mut self) -> Result<LimitOrderIntent, ValidationError> {
        let intent = self.validate()?;
        self.status.begin()?;
        Ok(intent)
    }

    pub fn finish_submit<T>(&mut self, outcome: &Result<T, AppError>) {
        self.status.settle(outcome);
        if outcome.is_ok() {
            self.amount.clear();
            self.limit_price.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;

    fn form() -> LimitOrderForm {
        LimitOrderForm::new(
            Some(Token::new(Address::repeat_byte(1), "DAI", "Dai", 18, 1)),
            Some(Token::new(Address::repeat_byte(2), "USDC", "USD Coin", 6, 1)),
        )
    }

    #[test]
    fn test_preview() {
        let mut form = form();
        assert_eq!(form.preview(), None);
        form.set_amount("10");
        form.set_limit_price("1.05");
        assert_eq!(form.preview(), Some(Decimal::new(105, 1)));
    }

    #[test]
    fn test_limit_price_validation() {
        let mut form = form();
        form.set_amount("10");
        assert_eq!(form.validate(), Err(ValidationError::LimitPriceMissing));

        form.set_limit_price("abc");
        assert_eq!(form.validate(), Err(ValidationError::InvalidLimitPrice("abc".into())));

        form.set_limit_price("0");
        assert!(matches!(form.validate(), Err(ValidationError::InvalidLimitPrice(_))));

        form.set_limit_price("0.99");
        let intent = form.validate().unwrap();
        assert_eq!(intent.limit_price, Decimal::new(99, 2));
        assert!(form.can_submit());
    }
}
