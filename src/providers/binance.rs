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

const TICKER_URL: &str = "https://fapi.binance.com/fapi/v1/ticker/price";

// Common Korean coin names the futures UI accepted alongside raw symbols.
const KOREAN_ALIASES: [(&str, &str); 5] = [
    ("비트코인", "BTCUSDT"),
    ("이더리움", "ETHUSDT"),
    ("리플", "XRPUSDT"),
    ("도지코인", "DOGEUSDT"),
    ("비트코인캐시", "BCHUSDT"),
];

/// USDT-margined futures quotes from Binance's public futures REST API.
///
/// The query is matched against the full ticker list: alias table first, then
/// exact symbol, then the symbol with a "USDT" suffix, then the first symbol
/// containing the query. The instrument id is the contract symbol.
pub struct BinanceFutures;

#[async_trait]
impl QuoteProvider for BinanceFutures {
    fn class(&self) -> InstrumentClass {
        InstrumentClass::CryptoFutures
    }

    async fn resolve(&self, query: &str) -> Result<Quote, QuoteError> {
        let query = query.trim().to_uppercase();
        if query.is_empty() {
            return Err(QuoteError::NotFound);
        }

        let tickers: Vec<PriceResponse> = get_json(TICKER_URL, &[]).await?;
        let ticker = match_symbol(&query, &tickers).ok_or(QuoteError::NotFound)?;
        let price = BigDecimal::from_str(&ticker.price)
            .map_err(|err| QuoteError::Unavailable(err.into()))?;
        debug!(symbol = %ticker.symbol, %price, "resolved futures quote");

        Ok(Quote {
            instrument_id: ticker.symbol.clone(),
            display_name: ticker.symbol.clone(),
            price,
            class: InstrumentClass::CryptoFutures,
        })
    }
}

fn match_symbol<'a>(query: &str, tickers: &'a [PriceResponse]) -> Option<&'a PriceResponse> {
    let target = KOREAN_ALIASES
        .iter()
        .find(|(name, _)| *name == query)
        .map(|(_, symbol)| (*symbol).to_string())
        .unwrap_or_else(|| query.to_string());
    let with_suffix = format!("{target}USDT");

    tickers
        .iter()
        .find(|ticker| ticker.symbol == target)
        .or_else(|| tickers.iter().find(|ticker| ticker.symbol == with_suffix))
        .or_else(|| tickers.iter().find(|ticker| ticker.symbol.contains(&target)))
}

#[derive(Deserialize, Debug)]
struct PriceResponse {
    symbol: String,

    #[serde(deserialize_with = "as_string")]
    price: String,
}
