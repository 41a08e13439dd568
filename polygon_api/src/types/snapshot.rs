//! Snapshot types: current-day state per ticker, options chains and indices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::meta::nanos_to_utc;

/// Current day, previous day and last tick state for one ticker.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TickerSnapshot {
    pub ticker: String,
    pub todays_change: f64,
    pub todays_change_perc: f64,
    /// Unix nanoseconds.
    pub updated: i64,
    pub day: DaySnapshot,
    pub prev_day: DaySnapshot,
    pub min: MinuteSnapshot,
    pub last_quote: LastQuoteSnapshot,
    pub last_trade: LastTradeSnapshot,
    /// Fair market value, business plans only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fmv: Option<f64>,
}

impl TickerSnapshot {
    pub fn updated_at(&self) -> DateTime<Utc> {
        nanos_to_utc(self.updated)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DaySnapshot {
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
    #[serde(rename = "vw")]
    pub vwap: f64,
    pub otc: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct MinuteSnapshot {
    /// Accumulated volume for the day.
    #[serde(rename = "av")]
    pub accumulated_volume: f64,
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
    #[serde(rename = "vw")]
    pub vwap: f64,
    #[serde(rename = "t")]
    pub timestamp: i64,
    #[serde(rename = "n")]
    pub transactions: i64,
    pub otc: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct LastQuoteSnapshot {
    #[serde(rename = "P")]
    pub ask_price: f64,
    #[serde(rename = "S")]
    pub ask_size: f64,
    #[serde(rename = "p")]
    pub bid_price: f64,
    #[serde(rename = "s")]
    pub bid_size: f64,
    #[serde(rename = "t")]
    pub timestamp: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct LastTradeSnapshot {
    #[serde(rename = "c")]
    pub conditions: Vec<i32>,
    #[serde(rename = "i")]
    pub id: String,
    #[serde(rename = "p")]
    pub price: f64,
    #[serde(rename = "s")]
    pub size: f64,
    #[serde(rename = "t")]
    pub timestamp: i64,
    #[serde(rename = "x")]
    pub exchange: i32,
}

/// Single-ticker snapshot; the payload sits under `ticker`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TickerSnapshotResponse {
    pub status: String,
    pub request_id: String,
    pub ticker: TickerSnapshot,
}

/// Multi-ticker snapshot (full market, gainers, losers); payload under `tickers`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SnapshotsResponse {
    pub status: String,
    pub request_id: String,
    pub count: i64,
    pub tickers: Vec<TickerSnapshot>,
}

/// Session statistics used by the universal, options and index snapshots.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SessionSnapshot {
    pub change: f64,
    pub change_percent: f64,
    pub early_trading_change: Option<f64>,
    pub early_trading_change_percent: Option<f64>,
    pub late_trading_change: Option<f64>,
    pub late_trading_change_percent: Option<f64>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub previous_close: f64,
    pub volume: Option<f64>,
    pub vwap: Option<f64>,
    pub price: Option<f64>,
    pub last_updated: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct UniversalLastTrade {
    pub conditions: Vec<i32>,
    pub exchange: i32,
    pub id: String,
    pub price: f64,
    pub size: f64,
    pub sip_timestamp: i64,
    pub participant_timestamp: Option<i64>,
    pub timeframe: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct UniversalLastQuote {
    pub ask: f64,
    pub ask_size: f64,
    pub ask_exchange: Option<i32>,
    pub bid: f64,
    pub bid_size: f64,
    pub bid_exchange: Option<i32>,
    pub midpoint: Option<f64>,
    pub last_updated: i64,
    pub timeframe: String,
}

/// Entry of the cross-asset snapshot. Tickers that could not be resolved
/// come back with `error`/`message` set instead of data.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct UniversalSnapshot {
    pub ticker: String,
    #[serde(rename = "type")]
    pub snapshot_type: String,
    pub name: String,
    pub market_status: String,
    pub value: Option<f64>,
    pub session: Option<SessionSnapshot>,
    pub last_trade: Option<UniversalLastTrade>,
    pub last_quote: Option<UniversalLastQuote>,
    pub error: Option<String>,
    pub message: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct OptionDetails {
    pub contract_type: String,
    pub exercise_style: String,
    pub expiration_date: String,
    pub shares_per_contract: f64,
    pub strike_price: f64,
    pub ticker: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct GreeksSnapshot {
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct UnderlyingAsset {
    pub ticker: String,
    pub price: Option<f64>,
    pub value: Option<f64>,
    pub change_to_break_even: f64,
    pub last_updated: i64,
    pub timeframe: String,
}

/// Snapshot of one options contract.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct OptionContractSnapshot {
    pub break_even_price: f64,
    pub day: SessionSnapshot,
    pub details: OptionDetails,
    pub greeks: Option<GreeksSnapshot>,
    pub implied_volatility: Option<f64>,
    pub open_interest: f64,
    pub last_quote: Option<UniversalLastQuote>,
    pub last_trade: Option<UniversalLastTrade>,
    pub underlying_asset: UnderlyingAsset,
    pub fmv: Option<f64>,
}

/// Value snapshot for one index (`I:SPX`, `I:NDX`, ...).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct IndexSnapshot {
    pub ticker: String,
    pub name: String,
    #[serde(rename = "type")]
    pub snapshot_type: String,
    pub value: f64,
    pub market_status: String,
    pub timeframe: String,
    pub last_updated: i64,
    pub session: SessionSnapshot,
    pub error: Option<String>,
    pub message: Option<String>,
}
