// SPDX-License-Identifier: GPL-3.0-or-later

pub mod api;

pub use account::Account;
pub use account::SharedAccount;
mod account;

pub use sizing::SizingPolicy;
pub use sizing::resolve_quantity;
mod sizing;

pub use session::Session;
mod session;

#[cfg(feature = "live_quotes")]
pub mod providers;
