// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

pub(crate) async fn get_json<T>(url: &str, query: &[(&str, &str)]) -> Result<T>
where
    T: DeserializeOwned,
{
    let mut header_map = HeaderMap::new();
    header_map.insert("accept", HeaderValue::from_str("application/json")?);
    // Some quote endpoints reject requests without a browser user agent.
    header_map.insert("user-agent", HeaderValue::from_str("Mozilla/5.0")?);
    let client = reqwest::ClientBuilder::new()
        .default_headers(header_map)
        .build()?;
    let result = client.get(url).query(query).send().await;
    match result {
        Ok(response) => Ok(response.json().await?),
        Err(err) => anyhow::bail!(err),
    }
}
