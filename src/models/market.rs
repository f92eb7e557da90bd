// SPDX-License-Identifier: MIT
// Copyright 2026 Trenvus Contributors

//! Market data payloads (proxied by the backend from an exchange feed).

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketTicker {
    pub inst_id: String,
    pub base_currency: Option<String>,
    pub quote_currency: Option<String>,
    pub last: f64,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub change24h_percent: Option<f64>,
    pub high24h: Option<f64>,
    pub low24h: Option<f64>,
    pub vol24h_base: Option<f64>,
    pub vol24h_quote: Option<f64>,
    pub ts: Option<String>,
}

impl MarketTicker {
    /// Ask minus bid, when both sides are quoted.
    pub fn spread(&self) -> Option<f64> {
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderBookLevel {
    pub price: f64,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBook {
    pub inst_id: String,
    pub base_currency: Option<String>,
    pub quote_currency: Option<String>,
    #[serde(default)]
    pub asks: Vec<OrderBookLevel>,
    #[serde(default)]
    pub bids: Vec<OrderBookLevel>,
    pub ts: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CandlePoint {
    pub ts: String,
    pub close: f64,
}
