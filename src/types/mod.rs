//! Type definitions module.
//!
//! Contains shared types used across the application.

pub mod liquidity;
pub mod order;
pub mod pool;
pub mod swap;
pub mod token;
pub mod transfer;

pub use liquidity::*;
pub use order::*;
pub use pool::*;
pub use swap::*;
pub use token::*;
pub use transfer::*;
