use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pagination::{non_empty, Paginated};

/// Envelope of the list endpoints: a page of `results` plus the cursor URL
/// of the next page, if any.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ListResponse<T> {
    pub status: String,
    pub request_id: String,
    pub count: i64,
    pub next_url: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated for ListResponse<T> {
    fn next_url(&self) -> Option<&str> {
        non_empty(&self.next_url)
    }
}

/// Envelope of the single-object endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Response<T> {
    pub status: String,
    pub request_id: String,
    pub results: T,
}

pub(crate) fn millis_to_utc(ms: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
}

pub(crate) fn nanos_to_utc(ns: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_nanos(ns)
}
