// SPDX-License-Identifier: GPL-3.0-or-later

pub mod common;

pub use error::QuoteError;
pub use error::TradeError;
mod error;

pub use provider::QuoteProvider;
mod provider;
