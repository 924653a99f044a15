// SPDX-License-Identifier: GPL-3.0-or-later

use crate::api::common::{InstrumentClass, Quote};
use crate::api::{QuoteError, QuoteProvider};
use crate::providers::http::get_json;
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use serde::Deserialize;
use serde_this_or_that::as_string;
use std::str::FromStr;
use tracing::debug;

/// KRW spot crypto quotes from Upbit's public REST API.
///
/// A query matches a market by code ("KRW-BTC"), bare ticker ("BTC"), Korean
/// name ("비트코인") or English name ("Bitcoin"). The instrument id is the
/// market code.
pub struct UpbitSpot;

#[async_trait]
impl QuoteProvider for UpbitSpot {
    fn class(&self) -> InstrumentClass {
        InstrumentClass::CryptoSpot
    }

    async fn resolve(&self, query: &str) -> Result<Quote, QuoteError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(QuoteError::NotFound);
        }

        let markets: Vec<MarketResponse> =
            get_json("https://api.upbit.com/v1/market/all", &[]).await?;
        let with_prefix = format!("KRW-{query}");
        let market = markets
            .into_iter()
            .filter(|market| market.market.starts_with("KRW-"))
            .find(|market| {
                market.market.eq_ignore_ascii_case(query)
                    || market.market.eq_ignore_ascii_case(&with_prefix)
                    || market.korean_name == query
                    || market.english_name.eq_ignore_ascii_case(query)
            })
            .ok_or(QuoteError::NotFound)?;

        let tickers: Vec<TickerResponse> = get_json(
            "https://api.upbit.com/v1/ticker",
            &[("markets", market.market.as_str())],
        )
        .await?;
        let ticker = tickers.into_iter().next().ok_or(QuoteError::NotFound)?;
        let price = BigDecimal::from_str(&ticker.trade_price)
            .map_err(|err| QuoteError::Unavailable(err.into()))?;
        debug!(market = %market.market, name = %market.korean_name, %price, "resolved spot quote");

        Ok(Quote {
            instrument_id: market.market,
            display_name: market.korean_name,
            price,
            class: InstrumentClass::CryptoSpot,
        })
    }
}

#[derive(Deserialize, Debug)]
struct MarketResponse {
    market: String,
    korean_name: String,
    english_name: String,
}

#[derive(Deserialize, Debug)]
struct TickerResponse {
    #[serde(deserialize_with = "as_string")]
    trade_price: String,
}
