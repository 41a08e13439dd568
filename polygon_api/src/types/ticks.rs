//! Tick-level trades and quotes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::meta::{millis_to_utc, nanos_to_utc};

/// A trade from the `/v3/trades` listing.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Trade {
    pub conditions: Vec<i32>,
    pub correction: Option<i32>,
    pub exchange: i32,
    pub id: String,
    /// Unix nanoseconds.
    pub participant_timestamp: i64,
    pub price: f64,
    pub sequence_number: i64,
    /// Unix nanoseconds.
    pub sip_timestamp: i64,
    pub size: f64,
    pub tape: Option<i32>,
    pub trf_id: Option<i32>,
    pub trf_timestamp: Option<i64>,
}

impl Trade {
    pub fn sip_time(&self) -> DateTime<Utc> {
        nanos_to_utc(self.sip_timestamp)
    }
}

/// An NBBO quote from the `/v3/quotes` listing.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Quote {
    pub ask_exchange: i32,
    pub ask_price: f64,
    pub ask_size: f64,
    pub bid_exchange: i32,
    pub bid_price: f64,
    pub bid_size: f64,
    pub conditions: Vec<i32>,
    pub indicators: Vec<i32>,
    pub participant_timestamp: i64,
    pub sequence_number: i64,
    pub sip_timestamp: i64,
    pub tape: Option<i32>,
    pub trf_timestamp: Option<i64>,
}

impl Quote {
    pub fn sip_time(&self) -> DateTime<Utc> {
        nanos_to_utc(self.sip_timestamp)
    }

    pub fn spread(&self) -> f64 {
        self.ask_price - self.bid_price
    }
}

/// Most recent trade for a stock ticker, abbreviated keys.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct LastTrade {
    #[serde(rename = "T")]
    pub ticker: String,
    #[serde(rename = "c")]
    pub conditions: Vec<i32>,
    #[serde(rename = "e")]
    pub correction: Option<i32>,
    #[serde(rename = "f")]
    pub trf_timestamp: Option<i64>,
    #[serde(rename = "i")]
    pub id: String,
    #[serde(rename = "p")]
    pub price: f64,
    #[serde(rename = "q")]
    pub sequence_number: i64,
    #[serde(rename = "r")]
    pub trf_id: Option<i32>,
    #[serde(rename = "s")]
    pub size: f64,
    #[serde(rename = "t")]
    pub sip_timestamp: i64,
    #[serde(rename = "x")]
    pub exchange: i32,
    #[serde(rename = "y")]
    pub participant_timestamp: Option<i64>,
    #[serde(rename = "z")]
    pub tape: Option<i32>,
}

impl LastTrade {
    pub fn sip_time(&self) -> DateTime<Utc> {
        nanos_to_utc(self.sip_timestamp)
    }
}

impl From<LastTrade> for Trade {
    fn from(last: LastTrade) -> Self {
        Trade {
            conditions: last.conditions,
            correction: last.correction,
            exchange: last.exchange,
            id: last.id,
            participant_timestamp: last.participant_timestamp.unwrap_or_default(),
            price: last.price,
            sequence_number: last.sequence_number,
            sip_timestamp: last.sip_timestamp,
            size: last.size,
            tape: last.tape,
            trf_id: last.trf_id,
            trf_timestamp: last.trf_timestamp,
        }
    }
}

/// Most recent NBBO for a stock ticker. Upper-case keys are the ask side,
/// lower-case the bid side.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct LastQuote {
    #[serde(rename = "T")]
    pub ticker: String,
    #[serde(rename = "P")]
    pub ask_price: f64,
    #[serde(rename = "S")]
    pub ask_size: f64,
    #[serde(rename = "X")]
    pub ask_exchange: i32,
    #[serde(rename = "p")]
    pub bid_price: f64,
    #[serde(rename = "s")]
    pub bid_size: f64,
    #[serde(rename = "x")]
    pub bid_exchange: i32,
    #[serde(rename = "c")]
    pub conditions: Vec<i32>,
    #[serde(rename = "i")]
    pub indicators: Vec<i32>,
    #[serde(rename = "q")]
    pub sequence_number: i64,
    #[serde(rename = "t")]
    pub sip_timestamp: i64,
    #[serde(rename = "y")]
    pub participant_timestamp: Option<i64>,
    #[serde(rename = "z")]
    pub tape: Option<i32>,
}

impl From<LastQuote> for Quote {
    fn from(last: LastQuote) -> Self {
        Quote {
            ask_exchange: last.ask_exchange,
            ask_price: last.ask_price,
            ask_size: last.ask_size,
            bid_exchange: last.bid_exchange,
            bid_price: last.bid_price,
            bid_size: last.bid_size,
            conditions: last.conditions,
            indicators: last.indicators,
            participant_timestamp: last.participant_timestamp.unwrap_or_default(),
            sequence_number: last.sequence_number,
            sip_timestamp: last.sip_timestamp,
            tape: last.tape,
            trf_timestamp: None,
        }
    }
}

/// Last trade for a crypto pair.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CryptoTrade {
    pub conditions: Vec<i32>,
    pub exchange: i32,
    pub price: f64,
    pub size: f64,
    /// Unix milliseconds.
    pub timestamp: i64,
}

impl CryptoTrade {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.timestamp)
    }
}

/// This endpoint nests its payload under `last` instead of `results`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct LastCryptoTradeResponse {
    pub status: String,
    pub request_id: String,
    pub symbol: String,
    pub last: CryptoTrade,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_trade_abbreviated_keys() {
        let last: LastTrade = serde_json::from_str(
            r#"{"T":"AAPL","c":[37],"i":"52983525029461","p":129.8473,"q":3135876,"s":25,"t":1617901342969834000,"x":4,"y":1617901342968000000,"z":3}"#,
        )
        .unwrap();
        assert_eq!(last.ticker, "AAPL");
        assert_eq!(last.price, 129.8473);

        let trade = Trade::from(last);
        assert_eq!(trade.exchange, 4);
        assert_eq!(trade.participant_timestamp, 1617901342968000000);
        assert_eq!(trade.sip_time().timestamp(), 1617901342);
    }

    #[test]
    fn last_quote_sides() {
        let last: LastQuote = serde_json::from_str(
            r#"{"T":"AAPL","P":127.98,"S":7,"X":19,"p":127.96,"s":1,"x":11,"t":1617827221349730300}"#,
        )
        .unwrap();
        let quote = Quote::from(last);
        assert_eq!(quote.ask_price, 127.98);
        assert_eq!(quote.bid_exchange, 11);
        assert!((quote.spread() - 0.02).abs() < 1e-9);
        assert_eq!(quote.participant_timestamp, 0);
    }
}
