//! Turns a completed HTTP call into a decoded value or a classified error.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{decode::Lenient, errors::ErrorEnvelope, transport::RawResponse, Error};

const MAX_BODY_SNIPPET: usize = 2000;

/// Decodes a success response into `T`, or classifies a failure.
///
/// * 2xx with an empty body yields `T::default()`.
/// * 2xx with JSON decodes into `T`; fields missing from the body keep their
///   default, unknown fields are ignored, and `null` or mismatched members
///   take the zero value of their type.
/// * 2xx with a body that is not JSON is an [`Error::Decode`].
/// * Anything else is an [`Error::HttpStatus`]; `T` is never decoded.
pub fn resolve<T>(response: RawResponse) -> Result<T, Error>
where
    T: DeserializeOwned + Default,
{
    if !response.is_success() {
        return Err(classify(response.status, &response.body));
    }

    if response.body.iter().all(u8::is_ascii_whitespace) {
        tracing::debug!("Empty body with status {}", response.status);
        return Ok(T::default());
    }

    serde_json::from_slice::<serde_json::Value>(&response.body)
        .and_then(|value| T::deserialize(Lenient(value)))
        .map_err(|e| {
            let snippet = truncate_body(&response.body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::Decode {
                source: e,
                body: snippet,
            }
        })
}

/// Builds the error for a non-success status from whatever the body holds.
pub fn classify(status: u16, body: &[u8]) -> Error {
    let snippet = truncate_body(body);
    tracing::error!("Request failed with status {}: {}", status, snippet);
    Error::HttpStatus {
        status,
        envelope: ErrorEnvelope::parse(body),
        body: snippet,
    }
}

fn truncate_body(body: &[u8]) -> String {
    let body = String::from_utf8_lossy(body);
    if body.len() <= MAX_BODY_SNIPPET {
        body.into_owned()
    } else {
        let mut end = MAX_BODY_SNIPPET;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use serde::de::IgnoredAny;

    use super::*;
    use crate::types::{Agg, AggsResponse, ListResponse, Response, Ticker, TickerDetails};

    #[test]
    fn decodes_success_body() {
        let body = r#"{"ticker":"X:BTCUSD","resultsCount":1,"status":"OK",
            "results":[{"o":43000.0,"c":43500.5,"h":44000,"l":42800,"v":120.5,"t":1736121600000}]}"#;
        let resp: AggsResponse = resolve(RawResponse::new(200, body)).unwrap();
        assert_eq!(resp.ticker, "X:BTCUSD");
        assert_eq!(resp.results.len(), 1);
        assert_eq!(resp.results[0].open, 43000.0);
        assert_eq!(resp.results[0].transactions, 0);
        assert_eq!(resp.results[0].vwap, 0.0);
        assert_eq!(resp.next_url, None);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let body = r#"{"status":"OK","results":{"ticker":"AAPL","name":"Apple Inc.","brand_new_field":{"x":1}}}"#;
        let resp: Response<TickerDetails> = resolve(RawResponse::new(200, body)).unwrap();
        assert_eq!(resp.results.ticker, "AAPL");
        assert_eq!(resp.results.market_cap, None);
        assert_eq!(resp.request_id, "");
    }

    #[test]
    fn null_members_take_zero_values() {
        let body = r#"{"status":"OK","request_id":null,"count":null,
            "results":[{"ticker":"AAPL","name":null,"active":null}]}"#;
        let resp: ListResponse<Ticker> = resolve(RawResponse::new(200, body)).unwrap();
        assert_eq!(resp.status, "OK");
        assert_eq!(resp.request_id, "");
        assert_eq!(resp.count, 0);
        assert_eq!(resp.results[0].ticker, "AAPL");
        assert_eq!(resp.results[0].name, "");
        assert!(!resp.results[0].active);
    }

    #[test]
    fn shape_mismatch_is_not_an_error() {
        let body = r#"{"status":"OK","request_id":"r2","results":[{"ticker":"AAPL"}]}"#;
        let resp: Response<TickerDetails> = resolve(RawResponse::new(200, body)).unwrap();
        assert_eq!(resp.request_id, "r2");
        assert_eq!(resp.results, TickerDetails::default());

        let body = r#"{"status":"OK","results":{"ticker":"AAPL"}}"#;
        let resp: ListResponse<Ticker> = resolve(RawResponse::new(200, body)).unwrap();
        assert_eq!(resp.status, "OK");
        assert!(resp.results.is_empty());
    }

    #[test]
    fn empty_success_body_is_default() {
        let resp: ListResponse<Agg> = resolve(RawResponse::new(200, "")).unwrap();
        assert_eq!(resp, ListResponse::default());

        let resp: ListResponse<Agg> = resolve(RawResponse::new(204, " \n")).unwrap();
        assert!(resp.results.is_empty());
    }

    #[test]
    fn empty_results_list() {
        let resp: ListResponse<Agg> =
            resolve(RawResponse::new(200, r#"{"results":[],"status":"OK","count":0}"#)).unwrap();
        assert!(resp.results.is_empty());
        assert_eq!(resp.count, 0);
        assert_eq!(resp.status, "OK");
    }

    #[test]
    fn ignored_destination_accepts_any_body() {
        let _: IgnoredAny = resolve(RawResponse::new(200, r#"[{"a":1},2,"x"]"#)).unwrap();
        let _: IgnoredAny = resolve(RawResponse::new(200, "")).unwrap();
    }

    #[test]
    fn bare_array_destination() {
        let resp: Vec<Agg> = resolve(RawResponse::new(200, r#"[{"o":1.5},{"o":2.5}]"#)).unwrap();
        assert_eq!(resp.len(), 2);
        assert_eq!(resp[1].open, 2.5);
    }

    #[test]
    fn non_json_success_is_decode_error() {
        let err = resolve::<ListResponse<Agg>>(RawResponse::new(200, "{not valid json}"))
            .unwrap_err();
        match err {
            Error::Decode { body, .. } => assert_eq!(body, "{not valid json}"),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn error_envelope_is_classified() {
        let err = resolve::<Response<TickerDetails>>(RawResponse::new(
            404,
            r#"{"status":"NOT_FOUND","request_id":"f1","message":"Ticker not found."}"#,
        ))
        .unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.message(), Some("Ticker not found."));
        assert_eq!(err.provider_status(), Some("NOT_FOUND"));
        assert_eq!(err.request_id(), Some("f1"));
    }

    #[test]
    fn non_envelope_error_keeps_raw_body() {
        let err =
            resolve::<IgnoredAny>(RawResponse::new(500, "Internal Server Error")).unwrap_err();
        match err {
            Error::HttpStatus {
                status,
                envelope,
                body,
            } => {
                assert_eq!(status, 500);
                assert!(envelope.is_none());
                assert_eq!(body, "Internal Server Error");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[test]
    fn error_status_never_decodes_matching_body() {
        // A body that would decode fine into the destination is still an error.
        let err = resolve::<ListResponse<Agg>>(RawResponse::new(
            429,
            r#"{"results":[{"o":1}],"status":"ERROR","message":"exceeded the maximum requests"}"#,
        ))
        .unwrap_err();
        assert_eq!(err.status(), Some(429));
        assert_eq!(err.message(), Some("exceeded the maximum requests"));
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(MAX_BODY_SNIPPET + 10);
        let snippet = truncate_body(body.as_bytes());
        assert!(snippet.ends_with("...[truncated]"));
        assert_eq!(snippet.len(), MAX_BODY_SNIPPET + "...[truncated]".len());
    }
}
