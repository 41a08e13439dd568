use serde::{Deserialize, Serialize};

/// Bar for a futures contract. Unlike stock bars these use full key names.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FuturesAgg {
    pub ticker: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub dollar_volume: Option<f64>,
    pub transaction_count: Option<i64>,
    pub settlement_price: Option<f64>,
    pub session_end_date: Option<String>,
    /// Unix nanoseconds.
    pub window_start: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FuturesContract {
    pub ticker: String,
    pub product_code: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub contract_type: Option<String>,
    pub trading_venue: Option<String>,
    pub first_trade_date: Option<String>,
    pub last_trade_date: Option<String>,
    pub settlement_date: Option<String>,
    pub days_to_maturity: Option<i64>,
    pub active: bool,
}
