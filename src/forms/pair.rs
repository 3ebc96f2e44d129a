//! Two-leg token selection.

use crate::{error::ValidationError, types::Token};

/// Token pair picked for a swap, liquidity or limit form.
///
/// Picking for one leg the token the other leg holds swaps the legs, so
/// both legs never hold the same token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenPairSelection {
    first: Option<Token>,
    second: Option<Token>,
}

impl TokenPairSelection {
    pub fn new(first: Option<Token>, second: Option<Token>) -> Self {
        let mut selection = Self::default();
        if let Some(token) = first {
            selection.select_first(token);
        }
        if let Some(token) = second {
            selection.select_second(token);
        }
        selection
    }

    pub fn first(&self) -> Option<&Token> {
        self.first.as_ref()
    }

    pub fn second(&self) -> Option<&Token> {
        self.second.as_ref()
    }

    pub fn select_first(&mut self, token: Token) {
        if self.second.as_ref() == Some(&token) {
            self.second = self.first.take();
        }
        self.first = Some(token);
    }

    pub fn select_second(&mut self, token: Token) {
        if self.first.as_ref() == Some(&token) {
            self.first = self.second.take();
        }
        self.second = Some(token);
    }

    /// Swap the legs.
    pub fn switch(&mut self) {
        std::mem::swap(&mut self.first, &mut self.second);
    }

    /// Both tokens, or [`ValidationError::TokenNotSelected`].
    pub fn both(&self) -> Result<(&Token, &Token), ValidationError> {
        match (&self.first, &self.second) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(ValidationError::TokenNotSelected),
        }
    }
}
