// SPDX-License-Identifier: GPL-3.0-or-later

use crate::api::TradeError;
use bigdecimal::{BigDecimal, Zero};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Virtual cash-and-holdings ledger.
///
/// All mutation goes through [deposit](Account::deposit), [buy](Account::buy)
/// and [sell](Account::sell). Each operation either fully succeeds or returns
/// a [TradeError] with the account untouched, so `cash >= 0` and every
/// holding `>= 0` hold after every call.
#[derive(Clone, Debug, Default)]
pub struct Account {
    cash: BigDecimal,
    holdings: HashMap<String, BigDecimal>,
}

impl Account {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cash(initial_cash: BigDecimal) -> Self {
        Account {
            cash: initial_cash,
            holdings: HashMap::new(),
        }
    }

    pub fn cash(&self) -> &BigDecimal {
        &self.cash
    }

    /// Held quantity for the instrument, zero when absent. A fully sold
    /// position may keep a zero entry; both read back the same here.
    pub fn holding(&self, instrument_id: &str) -> BigDecimal {
        self.holdings
            .get(instrument_id)
            .cloned()
            .unwrap_or_else(BigDecimal::zero)
    }

    pub fn holdings(&self) -> &HashMap<String, BigDecimal> {
        &self.holdings
    }

    pub fn deposit(&mut self, amount: BigDecimal) -> Result<(), TradeError> {
        if amount < BigDecimal::zero() {
            return Err(TradeError::InvalidAmount);
        }
        self.cash += amount;
        Ok(())
    }

    pub fn buy(
        &mut self,
        instrument_id: &str,
        price: &BigDecimal,
        quantity: &BigDecimal,
    ) -> Result<(), TradeError> {
        check_order(price, quantity)?;
        let cost = price * quantity;
        if self.cash < cost {
            return Err(TradeError::InsufficientFunds);
        }
        self.cash -= cost;
        let held = self.holding(instrument_id);
        self.holdings.insert(instrument_id.to_string(), held + quantity);
        Ok(())
    }

    pub fn sell(
        &mut self,
        instrument_id: &str,
        price: &BigDecimal,
        quantity: &BigDecimal,
    ) -> Result<(), TradeError> {
        check_order(price, quantity)?;
        let held = self.holding(instrument_id);
        if held < *quantity {
            return Err(TradeError::InsufficientHoldings);
        }
        self.holdings.insert(instrument_id.to_string(), held - quantity);
        self.cash += price * quantity;
        Ok(())
    }
}

fn check_order(price: &BigDecimal, quantity: &BigDecimal) -> Result<(), TradeError> {
    if *price <= BigDecimal::zero() || *quantity <= BigDecimal::zero() {
        return Err(TradeError::InvalidQuantity);
    }
    Ok(())
}

/// Clone-to-share handle over an [Account] that serializes every operation
/// behind one lock, so no interleaving of concurrent buys can overdraw cash
/// and no interleaving of concurrent sells can oversell a holding.
#[derive(Clone, Debug, Default)]
pub struct SharedAccount {
    inner: Arc<Mutex<Account>>,
}

impl SharedAccount {
    pub fn new(account: Account) -> Self {
        SharedAccount {
            inner: Arc::new(Mutex::new(account)),
        }
    }

    pub fn deposit(&self, amount: BigDecimal) -> Result<(), TradeError> {
        self.lock().deposit(amount)
    }

    pub fn buy(
        &self,
        instrument_id: &str,
        price: &BigDecimal,
        quantity: &BigDecimal,
    ) -> Result<(), TradeError> {
        self.lock().buy(instrument_id, price, quantity)
    }

    pub fn sell(
        &self,
        instrument_id: &str,
        price: &BigDecimal,
        quantity: &BigDecimal,
    ) -> Result<(), TradeError> {
        self.lock().sell(instrument_id, price, quantity)
    }

    pub fn cash(&self) -> BigDecimal {
        self.lock().cash().clone()
    }

    pub fn holding(&self, instrument_id: &str) -> BigDecimal {
        self.lock().holding(instrument_id)
    }

    fn lock(&self) -> MutexGuard<'_, Account> {
        // Ledger operations never panic mid-mutation, so a poisoned lock
        // still guards a consistent account.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::str::FromStr;
    use std::thread;

    #[test]
    fn deposit_increases_cash() -> Result<()> {
        let mut account = Account::new();
        account.deposit(BigDecimal::from(100_000))?;
        assert_eq!(account.cash(), &BigDecimal::from(100_000));
        Ok(())
    }

    #[test]
    fn deposit_zero_is_accepted() -> Result<()> {
        let mut account = Account::with_cash(BigDecimal::from(500));
        account.deposit(BigDecimal::zero())?;
        assert_eq!(account.cash(), &BigDecimal::from(500));
        Ok(())
    }

    #[test]
    fn deposit_negative_amount() {
        let mut account = Account::with_cash(BigDecimal::from(500));
        let err = account.deposit(BigDecimal::from(-1)).unwrap_err();
        assert_eq!(err, TradeError::InvalidAmount);
        assert_eq!(err.to_string(), "deposit amount cannot be negative");
        assert_eq!(account.cash(), &BigDecimal::from(500));
    }

    #[test]
    fn buy_debits_cash_and_credits_holdings() -> Result<()> {
        let mut account = Account::with_cash(BigDecimal::from(100_000));
        account.buy("005930", &BigDecimal::from(70_000), &BigDecimal::from(1))?;
        assert_eq!(account.cash(), &BigDecimal::from(30_000));
        assert_eq!(account.holding("005930"), BigDecimal::from(1));
        Ok(())
    }

    #[test]
    fn buy_with_insufficient_funds_leaves_account_unchanged() -> Result<()> {
        let mut account = Account::with_cash(BigDecimal::from(30_000));
        let err = account
            .buy("005930", &BigDecimal::from(70_000), &BigDecimal::from(1))
            .unwrap_err();
        assert_eq!(err, TradeError::InsufficientFunds);
        assert_eq!(account.cash(), &BigDecimal::from(30_000));
        assert!(account.holdings().is_empty());
        Ok(())
    }

    #[test]
    fn buy_spending_exactly_all_cash() -> Result<()> {
        let mut account = Account::with_cash(BigDecimal::from(70_000));
        account.buy("005930", &BigDecimal::from(70_000), &BigDecimal::from(1))?;
        assert_eq!(account.cash(), &BigDecimal::zero());
        Ok(())
    }

    #[test]
    fn buy_rejects_non_positive_quantity() {
        let mut account = Account::with_cash(BigDecimal::from(100_000));
        let err = account
            .buy("005930", &BigDecimal::from(70_000), &BigDecimal::zero())
            .unwrap_err();
        assert_eq!(err, TradeError::InvalidQuantity);

        let err = account
            .buy("005930", &BigDecimal::from(70_000), &BigDecimal::from(-2))
            .unwrap_err();
        assert_eq!(err, TradeError::InvalidQuantity);
        assert_eq!(account.cash(), &BigDecimal::from(100_000));
    }

    #[test]
    fn buy_rejects_non_positive_price() {
        let mut account = Account::with_cash(BigDecimal::from(100_000));
        let err = account
            .buy("005930", &BigDecimal::zero(), &BigDecimal::from(1))
            .unwrap_err();
        assert_eq!(err, TradeError::InvalidQuantity);
        assert_eq!(account.cash(), &BigDecimal::from(100_000));
    }

    #[test]
    fn buy_accumulates_under_one_key() -> Result<()> {
        let mut account = Account::with_cash(BigDecimal::from(200_000));
        account.buy("005930", &BigDecimal::from(70_000), &BigDecimal::from(1))?;
        account.buy("005930", &BigDecimal::from(60_000), &BigDecimal::from(2))?;
        assert_eq!(account.holding("005930"), BigDecimal::from(3));
        assert_eq!(account.holdings().len(), 1);
        Ok(())
    }

    #[test]
    fn sell_credits_cash_and_debits_holdings() -> Result<()> {
        let mut account = Account::with_cash(BigDecimal::from(100_000));
        account.buy("005930", &BigDecimal::from(70_000), &BigDecimal::from(1))?;
        account.sell("005930", &BigDecimal::from(80_000), &BigDecimal::from(1))?;
        assert_eq!(account.cash(), &BigDecimal::from(110_000));
        assert_eq!(account.holding("005930"), BigDecimal::zero());
        Ok(())
    }

    #[test]
    fn sell_more_than_held_leaves_account_unchanged() -> Result<()> {
        let mut account = Account::with_cash(BigDecimal::from(100_000));
        account.buy(
            "KRW-BTC",
            &BigDecimal::from(50_000_000),
            &BigDecimal::from_str("0.0005")?,
        )?;
        let cash_before = account.cash().clone();

        let err = account
            .sell(
                "KRW-BTC",
                &BigDecimal::from(50_000_000),
                &BigDecimal::from_str("0.001")?,
            )
            .unwrap_err();
        assert_eq!(err, TradeError::InsufficientHoldings);
        assert_eq!(account.cash(), &cash_before);
        assert_eq!(account.holding("KRW-BTC"), BigDecimal::from_str("0.0005")?);
        Ok(())
    }

    #[test]
    fn sell_without_position() {
        let mut account = Account::with_cash(BigDecimal::from(100_000));
        let err = account
            .sell("005930", &BigDecimal::from(70_000), &BigDecimal::from(1))
            .unwrap_err();
        assert_eq!(err, TradeError::InsufficientHoldings);
        assert_eq!(account.cash(), &BigDecimal::from(100_000));
    }

    #[test]
    fn buy_then_sell_at_same_price_restores_balances() -> Result<()> {
        let mut account = Account::with_cash(BigDecimal::from(100_000));
        let price = BigDecimal::from_str("63125500.25")?;
        let quantity = BigDecimal::from_str("0.0013")?;

        account.buy("KRW-BTC", &price, &quantity)?;
        account.sell("KRW-BTC", &price, &quantity)?;

        assert_eq!(account.cash(), &BigDecimal::from(100_000));
        assert_eq!(account.holding("KRW-BTC"), BigDecimal::zero());
        Ok(())
    }

    #[test]
    fn fractional_quantities_accumulate_exactly() -> Result<()> {
        let mut account = Account::with_cash(BigDecimal::from(1_000_000));
        let price = BigDecimal::from(50_000_000);
        account.buy("KRW-BTC", &price, &BigDecimal::from_str("0.0001")?)?;
        account.buy("KRW-BTC", &price, &BigDecimal::from_str("0.0002")?)?;
        assert_eq!(account.holding("KRW-BTC"), BigDecimal::from_str("0.0003")?);
        assert_eq!(account.cash(), &BigDecimal::from(985_000));
        Ok(())
    }

    #[test]
    fn concurrent_buys_cannot_overdraw() {
        let shared = SharedAccount::new(Account::with_cash(BigDecimal::from(100_000)));

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    shared.buy("005930", &BigDecimal::from(60_000), &BigDecimal::from(1))
                })
            })
            .collect();

        let results: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        let successes = results.iter().filter(|result| result.is_ok()).count();
        assert_eq!(successes, 1);
        assert_eq!(
            results.iter().find(|result| result.is_err()),
            Some(&Err(TradeError::InsufficientFunds))
        );
        assert_eq!(shared.cash(), BigDecimal::from(40_000));
        assert_eq!(shared.holding("005930"), BigDecimal::from(1));
    }

    #[test]
    fn concurrent_sells_cannot_oversell() -> Result<()> {
        let shared = SharedAccount::new(Account::with_cash(BigDecimal::from(100_000)));
        shared.buy("005930", &BigDecimal::from(50_000), &BigDecimal::from(1))?;

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    shared.sell("005930", &BigDecimal::from(50_000), &BigDecimal::from(1))
                })
            })
            .collect();

        let results: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        let successes = results.iter().filter(|result| result.is_ok()).count();
        assert_eq!(successes, 1);
        assert_eq!(shared.cash(), BigDecimal::from(100_000));
        assert_eq!(shared.holding("005930"), BigDecimal::zero());
        Ok(())
    }
}
