// SPDX-License-Identifier: GPL-3.0-or-later

use crate::api::common::{InstrumentClass, Quote};
use crate::api::error::QuoteError;
use async_trait::async_trait;

/// A price lookup collaborator. Implementations resolve a human-entered query
/// to a stable instrument id and its current price. The ledger never performs
/// lookups itself; callers resolve the quote fully before trading so that
/// network latency stays outside the ledger's critical section.
#[async_trait]
pub trait QuoteProvider {
    /// The instrument class every quote from this provider belongs to.
    fn class(&self) -> InstrumentClass;

    /// Resolves a free-text query to a quote, or [QuoteError::NotFound] when
    /// nothing matches.
    async fn resolve(&self, query: &str) -> Result<Quote, QuoteError>;
}
