// SPDX-License-Identifier: GPL-3.0-or-later

use crate::api::TradeError;
use crate::api::common::{Amount, InstrumentClass};
use bigdecimal::{BigDecimal, RoundingMode, Zero};

/// Sizing rules applied when a notional amount is converted to a quantity.
#[derive(Clone, Debug, PartialEq)]
pub struct SizingPolicy {
    pub min_quantity: BigDecimal,
    pub allow_fractional: bool,
}

impl InstrumentClass {
    /// Sizing rules for this class: whole shares with a minimum of one for
    /// equities, fractional quantities with a class minimum for crypto.
    pub fn sizing(&self) -> SizingPolicy {
        match self {
            InstrumentClass::Equity => SizingPolicy {
                min_quantity: BigDecimal::from(1),
                allow_fractional: false,
            },
            InstrumentClass::CryptoSpot => SizingPolicy {
                min_quantity: BigDecimal::from(1) / BigDecimal::from(10_000),
                allow_fractional: true,
            },
            InstrumentClass::CryptoFutures => SizingPolicy {
                min_quantity: BigDecimal::from(1) / BigDecimal::from(1_000),
                allow_fractional: true,
            },
        }
    }
}

/// Converts an [Amount] into the quantity passed to the ledger.
///
/// Notional amounts divide by the quoted price; when the policy forbids
/// fractional units the quotient is floored to whole units. A derived
/// quantity below the policy minimum is rejected before the ledger is ever
/// touched. Explicit quantities pass through untouched and are validated by
/// the ledger itself.
pub fn resolve_quantity(
    amount: &Amount,
    price: &BigDecimal,
    policy: &SizingPolicy,
) -> Result<BigDecimal, TradeError> {
    if *price <= BigDecimal::zero() {
        return Err(TradeError::InvalidQuantity);
    }
    match amount {
        Amount::Quantity { quantity } => Ok(quantity.clone()),
        Amount::Notional { notional } => {
            let mut quantity = notional / price;
            if !policy.allow_fractional {
                quantity = quantity.with_scale_round(0, RoundingMode::Floor);
            }
            if quantity < policy.min_quantity {
                return Err(TradeError::AmountTooSmall);
            }
            Ok(quantity)
        }
    }
}
