// SPDX-License-Identifier: GPL-3.0-or-later

pub use binance::BinanceFutures;
mod binance;

pub use naver::NaverEquity;
mod naver;

pub use upbit::UpbitSpot;
mod upbit;

mod http;
