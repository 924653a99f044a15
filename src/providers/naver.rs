// SPDX-License-Identifier: GPL-3.0-or-later

use crate::api::common::{InstrumentClass, Quote};
use crate::api::{QuoteError, QuoteProvider};
use crate::providers::http::get_json;
use async_trait::async_trait;
use bigdecimal::{BigDecimal, Zero};
use serde::Deserialize;
use std::str::FromStr;
use tracing::debug;

/// Korean equity quotes from Naver's mobile stock API.
///
/// A query that looks like a six-digit item code skips the search step;
/// anything else goes through the autocomplete endpoint first. The instrument
/// id is always the item code, never the company name, so repeated lookups of
/// the same stock accumulate under one holdings key.
pub struct NaverEquity;

#[async_trait]
impl QuoteProvider for NaverEquity {
    fn class(&self) -> InstrumentClass {
        InstrumentClass::Equity
    }

    async fn resolve(&self, query: &str) -> Result<Quote, QuoteError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(QuoteError::NotFound);
        }
        let code = if is_item_code(query) {
            query.to_string()
        } else {
            search_item_code(query).await?
        };

        let basic: BasicResponse =
            get_json(&format!("https://m.stock.naver.com/api/stock/{code}/basic"), &[]).await?;
        let price = parse_grouped_price(&basic.close_price)?;
        debug!(code = %basic.item_code, name = %basic.stock_name, %price, "resolved equity quote");

        Ok(Quote {
            instrument_id: basic.item_code,
            display_name: basic.stock_name,
            price,
            class: InstrumentClass::Equity,
        })
    }
}

fn is_item_code(query: &str) -> bool {
    query.len() == 6 && query.chars().all(|c| c.is_ascii_digit())
}

async fn search_item_code(query: &str) -> Result<String, QuoteError> {
    let response: AutoCompleteResponse = get_json(
        "https://m.stock.naver.com/front-api/search/autoComplete",
        &[("query", query), ("target", "stock")],
    )
    .await?;
    response
        .result
        .items
        .into_iter()
        .map(|item| item.code)
        .next()
        .ok_or(QuoteError::NotFound)
}

/// Naver formats prices with thousands separators, e.g. "70,000".
fn parse_grouped_price(text: &str) -> Result<BigDecimal, QuoteError> {
    let price = BigDecimal::from_str(&text.replace(',', ""))
        .map_err(|err| QuoteError::Unavailable(err.into()))?;
    if price <= BigDecimal::zero() {
        return Err(QuoteError::Unavailable(anyhow::anyhow!(
            "non-positive price {text:?}"
        )));
    }
    Ok(price)
}

#[derive(Deserialize, Debug)]
struct AutoCompleteResponse {
    result: AutoCompleteResult,
}

#[derive(Deserialize, Debug)]
struct AutoCompleteResult {
    items: Vec<AutoCompleteItem>,
}

#[derive(Deserialize, Debug)]
struct AutoCompleteItem {
    code: String,
}

#[derive(Deserialize, Debug)]
struct BasicResponse {
    #[serde(rename = "itemCode")]
    item_code: String,

    #[serde(rename = "stockName")]
    stock_name: String,

    #[serde(rename = "closePrice")]
    close_price: String,
}
