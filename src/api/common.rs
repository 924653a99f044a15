// SPDX-License-Identifier: GPL-3.0-or-later

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use std::fmt::{Display, Formatter};

/// A resolved price lookup, produced by a [QuoteProvider](crate::api::QuoteProvider)
/// and consumed by the ledger.
///
/// `instrument_id` is the stable key holdings accumulate under; repeated
/// lookups of the same instrument must yield the same id. `display_name` is
/// for logs only and never used for equality.
#[derive(Clone, Debug, PartialEq)]
pub struct Quote {
    pub instrument_id: String,
    pub display_name: String,
    pub price: BigDecimal,
    pub class: InstrumentClass,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InstrumentClass {
    Equity,
    CryptoSpot,
    CryptoFutures,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

/// How an order is sized: an explicit quantity, or a notional amount in the
/// instrument's quote currency converted at the quoted price.
#[derive(Clone, Debug, PartialEq)]
pub enum Amount {
    Quantity { quantity: BigDecimal },
    Notional { notional: BigDecimal },
}

/// Record of an executed trade, kept in the session log.
#[derive(Clone, Debug, PartialEq)]
pub struct Fill {
    pub order_id: String,
    pub instrument_id: String,
    pub display_name: String,
    pub side: OrderSide,
    pub price: BigDecimal,
    pub quantity: BigDecimal,
    pub executed_at: DateTime<Utc>,
}

impl Display for OrderSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderSide::Buy => f.write_str("buy"),
            OrderSide::Sell => f.write_str("sell"),
        }
    }
}
