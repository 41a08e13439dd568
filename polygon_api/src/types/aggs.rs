//! Aggregate (bar) types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::meta::millis_to_utc;
use crate::pagination::{non_empty, Paginated};

/// One OHLCV bar. The API uses single-letter keys for these.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Agg {
    /// Ticker, only set on grouped daily and previous close bars.
    #[serde(rename = "T", skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,

    #[serde(rename = "o")]
    pub open: f64,

    #[serde(rename = "h")]
    pub high: f64,

    #[serde(rename = "l")]
    pub low: f64,

    #[serde(rename = "c")]
    pub close: f64,

    #[serde(rename = "v")]
    pub volume: f64,

    /// Volume weighted average price.
    #[serde(rename = "vw")]
    pub vwap: f64,

    /// Bar start, Unix milliseconds.
    #[serde(rename = "t")]
    pub timestamp: i64,

    /// Number of transactions in the bar.
    #[serde(rename = "n")]
    pub transactions: i64,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub otc: bool,
}

impl Agg {
    /// Bar start time, if the millisecond timestamp is in range.
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.timestamp)
    }
}

/// Bars for one ticker, or one bar per ticker for grouped requests.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AggsResponse {
    pub ticker: String,
    pub adjusted: bool,
    pub query_count: i64,
    pub results_count: i64,
    pub status: String,
    #[serde(rename = "request_id")]
    pub request_id: String,
    pub count: i64,
    #[serde(rename = "next_url")]
    pub next_url: Option<String>,
    pub results: Vec<Agg>,
}

impl Paginated for AggsResponse {
    fn next_url(&self) -> Option<&str> {
        non_empty(&self.next_url)
    }
}

/// Open, close and extended-hours prices for one ticker on one day.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DailyOpenCloseResponse {
    pub status: String,
    pub symbol: String,
    /// Trading date, `YYYY-MM-DD`.
    pub from: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub after_hours: Option<f64>,
    pub pre_market: Option<f64>,
    pub otc: bool,
}
