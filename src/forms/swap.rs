//! Swap page form.

use alloy::primitives::U256;

use super::{check_balance, status_message, FormStatus, TokenPairSelection};
use crate::{
    error::{AppError, ValidationError},
    services::TokenRegistry,
    types::{parse_amount, Slippage, SwapIntent, Token},
};

#[derive(Debug, Clone, Default)]
pub struct SwapForm {
    tokens: TokenPairSelection,
    amount_in: String,
    slippage: Slippage,
    /// Fetched balance of the input token.
    balance: Option<U256>,
    status: FormStatus,
}

impl SwapForm {
    /// DAI → USDC when both are registered.
    pub fn with_defaults(registry: &TokenRegistry) -> Self {
        Self {
            tokens: TokenPairSelection::new(
                registry.resolve_symbol("DAI").cloned(),
                registry.resolve_symbol("USDC").cloned(),
            ),
            ..Self::default()
        }
    }

    pub fn tokens(&self) -> &TokenPairSelection {
        &self.tokens
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn amount_in(&self) -> &str {
        &self.amount_in
    }

    pub fn slippage(&self) -> Slippage {
        self.slippage
    }

    pub fn select_input(&mut self, token: Token) {
        let previous = self.tokens.first().map(|t| t.address);
        self.tokens.select_first(token);
        if self.tokens.first().map(|t| t.address) != previous {
            self.balance = None;
        }
        self.status.touch();
    }

    pub fn select_output(&mut self, token: Token) {
        let previous = self.tokens.first().map(|t| t.address);
        self.tokens.select_second(token);
        if self.tokens.first().map(|t| t.address) != previous {
            self.balance = None;
        }
        self.status.touch();
    }

    /// Swap the legs and clear the amount.
    pub fn switch_tokens(&mut self) {
        self.tokens.switch();
        self.amount_in.clear();
        self.balance = None;
        self.status.touch();
    }

    pub fn set_amount(&mut self, amount: &str) {
        self.amount_in = amount.to_string();
        self.status.touch();
    }

    pub fn set_slippage(&mut self, slippage: &str) -> Result<(), ValidationError> {
        self.slippage = slippage.parse()?;
        self.status.touch();
        Ok(())
    }

    /// Record the input token balance read from chain.
    pub fn set_balance(&mut self, balance: U256) {
        self.balance = Some(balance);
    }

    /// Build the intent, checking in order: tokens selected, amount
    /// entered and well-formed, amount positive, amount within balance.
    pub fn validate(&self) -> Result<SwapIntent, ValidationError> {
        let (token_in, token_out) = self.tokens.both()?;
        let amount_in = parse_amount(&self.amount_in, token_in.decimals)?;
        check_balance(amount_in, self.balance)?;

        Ok(SwapIntent {
            token_in: token_in.clone(),
            token_out: token_out.clone(),
            amount_in,
            slippage: self.slippage,
        })
    }

    pub fn can_submit(&self) -> bool {
        !self.status.is_submitting() && self.validate().is_ok()
    }

    pub fn message(&self) -> Option<String> {
        status_message(&self.status, self.validate().map(|_| ()))
    }

    /// Validate and enter `Submitting`.
    pub fn begin_submit(&mut self) -> Result<SwapIntent, ValidationError> {
        let intent = self.validate()?;
        self.status.begin()?;
        Ok(intent)
    }

    /// Record the outcome. A successful swap clears the amount.
    pub fn finish_submit<T>(&mut self, outcome: &Result<T, AppError>) {
        self.status.settle(outcome);
        if outcome.is_ok() {
            self.amount_in.clear();
            self.balance = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ethereum::NetworkConfig;

    fn form() -> SwapForm {
        SwapForm::with_defaults(&TokenRegistry::from_network(&NetworkConfig::sepolia()))
    }

    fn wei(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
    }

    #[test]
    fn test_defaults_dai_to_usdc() {
        let form = form();
        let (a, b) = form.tokens().both().unwrap();
        assert_eq!((a.symbol.as_str(), b.symbol.as_str()), ("DAI", "USDC"));
        assert_eq!(form.slippage(), Slippage::default());
    }

    #[test]
    fn test_amount_above_balance_blocks_submit() {
        let mut form = form();
        form.set_amount("100");
        form.set_balance(wei(50));

        assert!(!form.can_submit());
        assert_eq!(form.message().as_deref(), Some("insufficient balance"));
    }

    #[test]
    fn test_validation_order() {
        let mut form = SwapForm::default();
        form.set_amount("abc");
        assert_eq!(form.validate(), Err(ValidationError::TokenNotSelected));

        let mut form = self::form();
        assert_eq!(form.validate(), Err(ValidationError::AmountMissing));
        form.set_amount("abc");
        assert!(matches!(form.validate(), Err(ValidationError::InvalidAmount(_))));
        form.set_amount("0");
        assert_eq!(form.validate(), Err(ValidationError::ZeroAmount));
        form.set_amount("10");
        form.set_balance(wei(10));
        assert_eq!(form.validate().unwrap().amount_in, wei(10));
        assert!(form.can_submit());
    }

    #[test]
    fn test_switch_clears_amount() {
        let mut form = form();
        form.set_amount("5");
        form.switch_tokens();
        assert_eq!(form.amount_in(), "");
        assert_eq!(form.tokens().first().unwrap().symbol, "USDC");
    }

    #[test]
    fn test_submitting_disables_submit() {
        let mut form = form();
        form.set_amount("1");
        let intent = form.begin_submit().unwrap();
        assert_eq!(intent.token_in.symbol, "DAI");
        assert!(!form.can_submit());
        assert_eq!(form.begin_submit(), Err(ValidationError::SubmissionPending));

        form.finish_submit::<()>(&Err(AppError::InsufficientLiquidity));
        assert_eq!(form.message().as_deref(), Some("Insufficient liquidity for swap"));
        assert!(form.can_submit());
    }

    #[test]
    fn test_slippage_out_of_range() {
        let mut form = form();
        assert_eq!(form.set_slippage("60"), Err(ValidationError::SlippageOutOfRange));
        form.set_slippage("1").unwrap();
        assert_eq!(form.slippage().bps(), 100);
    }
}
