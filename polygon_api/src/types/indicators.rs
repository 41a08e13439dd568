//! Technical indicator responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{aggs::Agg, meta::millis_to_utc};
use crate::pagination::{non_empty, Paginated};

/// Value of a single-line indicator (SMA, EMA, RSI).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct IndicatorValue {
    /// Unix milliseconds.
    pub timestamp: i64,
    pub value: f64,
}

impl IndicatorValue {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.timestamp)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct MacdValue {
    pub timestamp: i64,
    pub value: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Aggregates the values were computed from, returned when
/// `expand_underlying` is set.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct IndicatorUnderlying {
    pub url: String,
    pub aggregates: Vec<Agg>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct IndicatorResults<V> {
    pub underlying: IndicatorUnderlying,
    pub values: Vec<V>,
}

/// Indicator envelope: `results` is an object holding the value list.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, bound(deserialize = "V: Deserialize<'de> + Default"))]
pub struct IndicatorResponse<V> {
    pub status: String,
    pub request_id: String,
    pub next_url: Option<String>,
    pub results: IndicatorResults<V>,
}

impl<V> Paginated for IndicatorResponse<V> {
    fn next_url(&self) -> Option<&str> {
        non_empty(&self.next_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::resolve;
    use crate::transport::RawResponse;

    #[test]
    fn macd_values_decode() {
        let body = r#"{"status":"OK","results":{"values":[
            {"timestamp":1736139600000,"value":1.25,"signal":0.75,"histogram":0.5}]}}"#;
        let resp: IndicatorResponse<MacdValue> = resolve(RawResponse::new(200, body)).unwrap();
        assert_eq!(resp.results.values.len(), 1);
        assert_eq!(resp.results.values[0].histogram, 0.5);
        assert!(!resp.has_next_page());
    }
}
