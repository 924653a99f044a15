// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

/// Errors from ledger and order-sizing operations. Every failure leaves the
/// account untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum TradeError {
    #[error("deposit amount cannot be negative")]
    InvalidAmount,

    #[error("order price and quantity must be positive")]
    InvalidQuantity,

    #[error("amount is below the minimum tradable quantity")]
    AmountTooSmall,

    #[error("not enough cash for the order")]
    InsufficientFunds,

    #[error("not enough holdings for the order")]
    InsufficientHoldings,
}

/// Errors from quote resolution. Transport problems surface as
/// [QuoteError::Unavailable] rather than being swallowed, so a failed lookup
/// stays distinguishable from a missing instrument.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("no instrument matched the query")]
    NotFound,

    #[error("quote lookup failed: {0}")]
    Unavailable(anyhow::Error),
}

impl From<anyhow::Error> for QuoteError {
    fn from(err: anyhow::Error) -> Self {
        QuoteError::Unavailable(err)
    }
}
