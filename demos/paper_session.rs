// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::Result;
use bigdecimal::BigDecimal;
use papertrade::Session;
use papertrade::api::common::{Amount, InstrumentClass, OrderSide, Quote};

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let mut session = Session::new();
    session.deposit(BigDecimal::from(1_000_000))?;
    println!("cash after deposit: {}", session.cash());

    // Quotes normally come from a QuoteProvider; fixed prices keep the demo offline.
    let samsung = Quote {
        instrument_id: "005930".into(),
        display_name: "삼성전자".into(),
        price: BigDecimal::from(70_000),
        class: InstrumentClass::Equity,
    };
    let bitcoin = Quote {
        instrument_id: "KRW-BTC".into(),
        display_name: "비트코인".into(),
        price: BigDecimal::from(50_000_000),
        class: InstrumentClass::CryptoSpot,
    };

    // Notional equity buy: 500,000 KRW floors to 7 whole shares.
    let fill = session.execute(
        &samsung,
        OrderSide::Buy,
        Amount::Notional {
            notional: BigDecimal::from(500_000),
        },
    )?;
    println!(
        "bought {} share(s) of {} at {}",
        fill.quantity, fill.display_name, fill.price
    );

    // Notional spot buy keeps the fractional quantity.
    let fill = session.execute(
        &bitcoin,
        OrderSide::Buy,
        Amount::Notional {
            notional: BigDecimal::from(100_000),
        },
    )?;
    println!("bought {} BTC", fill.quantity);

    // Too large for the remaining cash; the account is left untouched.
    let err = session
        .execute(
            &samsung,
            OrderSide::Buy,
            Amount::Notional {
                notional: BigDecimal::from(10_000_000),
            },
        )
        .unwrap_err();
    println!("rejected: {err}");

    session.execute(
        &samsung,
        OrderSide::Sell,
        Amount::Quantity {
            quantity: BigDecimal::from(7),
        },
    )?;
    println!("cash after selling the shares back: {}", session.cash());

    println!("trade log:");
    for fill in session.fills() {
        println!(
            "  {} {} {} {} @ {}",
            fill.executed_at, fill.side, fill.quantity, fill.display_name, fill.price
        );
    }

    Ok(())
}
