// SPDX-License-Identifier: GPL-3.0-or-later

use crate::account::Account;
use crate::api::TradeError;
use crate::api::common::{Amount, Fill, OrderSide, Quote};
use crate::sizing::resolve_quantity;
use bigdecimal::BigDecimal;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

/// One user's trading session: an [Account] plus the log of executed fills.
///
/// The session owns its account explicitly instead of living in ambient
/// global state, and it never resolves quotes itself; callers look the price
/// up first and pass the resolved [Quote] in.
#[derive(Debug, Default)]
pub struct Session {
    account: Account,
    fills: Vec<Fill>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cash(initial_cash: BigDecimal) -> Self {
        Session {
            account: Account::with_cash(initial_cash),
            fills: Vec::new(),
        }
    }

    pub fn deposit(&mut self, amount: BigDecimal) -> Result<(), TradeError> {
        self.account.deposit(amount.clone())?;
        info!(%amount, cash = %self.account.cash(), "deposit accepted");
        Ok(())
    }

    /// Sizes the order with the quote's class policy, then executes it
    /// against the ledger. Returns the recorded [Fill] on success; on any
    /// rejection the account and the fill log are unchanged.
    pub fn execute(
        &mut self,
        quote: &Quote,
        side: OrderSide,
        amount: Amount,
    ) -> Result<Fill, TradeError> {
        let quantity = resolve_quantity(&amount, &quote.price, &quote.class.sizing())
            .inspect_err(|err| {
                warn!(instrument = %quote.instrument_id, %err, "order sizing rejected");
            })?;

        let result = match side {
            OrderSide::Buy => self.account.buy(&quote.instrument_id, &quote.price, &quantity),
            OrderSide::Sell => self.account.sell(&quote.instrument_id, &quote.price, &quantity),
        };
        if let Err(err) = result {
            warn!(instrument = %quote.instrument_id, %side, %err, "order rejected");
            return Err(err);
        }

        let fill = Fill {
            order_id: Uuid::new_v4().to_string(),
            instrument_id: quote.instrument_id.clone(),
            display_name: quote.display_name.clone(),
            side,
            price: quote.price.clone(),
            quantity,
            executed_at: Utc::now(),
        };
        info!(
            instrument = %fill.instrument_id,
            name = %fill.display_name,
            %side,
            price = %fill.price,
            quantity = %fill.quantity,
            cash = %self.account.cash(),
            "order filled"
        );
        self.fills.push(fill.clone());
        Ok(fill)
    }

    pub fn cash(&self) -> &BigDecimal {
        self.account.cash()
    }

    pub fn holding(&self, instrument_id: &str) -> BigDecimal {
        self.account.holding(instrument_id)
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }
}
