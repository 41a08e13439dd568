use polygon_api::response::resolve;
use polygon_api::types::{
    AggsResponse, Dividend, IndicatorResponse, IndicatorValue, ListResponse, MarketHoliday,
    MarketStatus, Response, Split, Ticker, TickerDetails, TickerSnapshotResponse, Trade,
};
use polygon_api::{Paginated, RawResponse};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_aggs_full() {
    let json = load_fixture("aggs_btc.json");
    let resp: AggsResponse = serde_json::from_str(&json).unwrap();

    assert_eq!(resp.ticker, "X:BTCUSD");
    assert!(resp.adjusted);
    assert_eq!(resp.results_count, 2);
    assert_eq!(resp.results.len(), 2);
    assert!(!resp.has_next_page());

    let bar = &resp.results[0];
    assert_eq!(bar.open, 43000.00);
    assert_eq!(bar.close, 44150.25);
    assert_eq!(bar.transactions, 412553);
    assert_eq!(bar.ticker, None);
    assert_eq!(
        bar.start_time().unwrap().to_rfc3339(),
        "2025-01-06T00:00:00+00:00"
    );
}

#[test]
fn deserialize_tickers_page() {
    let json = load_fixture("tickers.json");
    let resp: ListResponse<Ticker> = serde_json::from_str(&json).unwrap();

    assert_eq!(resp.count, 2);
    assert_eq!(resp.results[0].ticker, "A");
    assert_eq!(resp.results[0].ticker_type.as_deref(), Some("CS"));
    assert_eq!(resp.results[1].composite_figi, None);
    assert_eq!(
        resp.next_url(),
        Some("https://api.polygon.io/v3/reference/tickers?cursor=YWN0aXZlPXRydWUmZGF0ZT0yMDI1LTAxLTA2")
    );
}

#[test]
fn deserialize_ticker_details() {
    let json = load_fixture("ticker_details.json");
    let resp: Response<TickerDetails> = serde_json::from_str(&json).unwrap();

    let details = resp.results;
    assert_eq!(details.ticker, "AAPL");
    assert_eq!(details.total_employees, Some(164000));
    assert_eq!(details.market_cap, Some(3547000000000.5));
    let address = details.address.unwrap();
    assert_eq!(address.city.as_deref(), Some("CUPERTINO"));
    assert_eq!(address.address2, None);
    assert!(details.branding.unwrap().logo_url.is_some());
}

#[test]
fn deserialize_trades_with_optional_fields() {
    let json = load_fixture("trades.json");
    let resp: ListResponse<Trade> = serde_json::from_str(&json).unwrap();

    assert_eq!(resp.results.len(), 2);
    assert_eq!(resp.results[0].conditions, vec![12, 41]);
    assert_eq!(resp.results[0].trf_id, None);
    assert!(resp.results[1].conditions.is_empty());
    assert_eq!(resp.results[1].trf_id, Some(201));
    assert_eq!(
        resp.results[0].sip_time().timestamp_nanos_opt(),
        Some(1736173800017834496)
    );
    assert!(resp.has_next_page());
}

#[test]
fn deserialize_ticker_snapshot() {
    let json = load_fixture("snapshot_ticker.json");
    let resp: TickerSnapshotResponse = serde_json::from_str(&json).unwrap();

    let snap = resp.ticker;
    assert_eq!(snap.ticker, "AAPL");
    assert_eq!(snap.todays_change, -0.49);
    assert_eq!(snap.day.close, 243.36);
    assert_eq!(snap.prev_day.close, 243.85);
    assert_eq!(snap.min.accumulated_volume, 40858780.0);
    assert_eq!(snap.last_quote.ask_price, 243.4);
    assert_eq!(snap.last_trade.conditions, vec![14, 41]);
    assert_eq!(snap.fmv, None);
}

#[test]
fn deserialize_market_holidays_bare_array() {
    let json = load_fixture("market_holidays.json");
    let holidays: Vec<MarketHoliday> = serde_json::from_str(&json).unwrap();

    assert_eq!(holidays.len(), 3);
    assert_eq!(holidays[0].status, "closed");
    assert_eq!(holidays[0].open, None);
    assert_eq!(holidays[2].status, "early-close");
    assert_eq!(holidays[2].close.as_deref(), Some("2025-07-03T17:00:00.000Z"));
}

#[test]
fn deserialize_market_status() {
    let json = load_fixture("market_status.json");
    let status: MarketStatus = serde_json::from_str(&json).unwrap();

    assert_eq!(status.market, "open");
    assert!(!status.after_hours);
    assert_eq!(status.exchanges.get("nyse").map(String::as_str), Some("open"));
    assert_eq!(status.indices_groups.len(), 2);
}

#[test]
fn deserialize_dividends() {
    let json = load_fixture("dividends.json");
    let resp: ListResponse<Dividend> = serde_json::from_str(&json).unwrap();

    let div = &resp.results[0];
    assert_eq!(div.ticker, "KO");
    assert_eq!(div.cash_amount, 0.485);
    assert_eq!(div.frequency, 4);
    assert_eq!(div.pay_date.as_deref(), Some("2024-12-16"));
    assert_eq!(resp.count, 0);
    assert!(!resp.has_next_page());
}

#[test]
fn deserialize_splits_ratio() {
    let json = load_fixture("splits.json");
    let resp: ListResponse<Split> = serde_json::from_str(&json).unwrap();

    assert_eq!(resp.results[0].ratio(), 10.0);
    assert_eq!(resp.results[1].ratio(), 0.05);
}

#[test]
fn deserialize_indicator_values() {
    let json = load_fixture("sma.json");
    let resp: IndicatorResponse<IndicatorValue> = serde_json::from_str(&json).unwrap();

    assert_eq!(resp.results.values.len(), 2);
    assert_eq!(resp.results.values[0].value, 240.1234);
    assert!(resp.results.underlying.aggregates.is_empty());
    assert!(resp.results.underlying.url.contains("/v2/aggs/ticker/AAPL"));
    assert!(resp.has_next_page());
}

#[test]
fn deserialize_empty_list() {
    let json = load_fixture("empty_list.json");
    let resp: ListResponse<Ticker> = resolve(RawResponse::new(200, json)).unwrap();
    assert!(resp.results.is_empty());
    assert_eq!(resp.next_url(), None);
}

#[test]
fn deserialize_malformed_json_returns_error() {
    let result = resolve::<ListResponse<Ticker>>(RawResponse::new(200, "{not valid json}"));
    assert!(result.is_err());
}

#[test]
fn deserialize_malformed_json_is_decode_error() {
    let result = resolve::<ListResponse<Ticker>>(RawResponse::new(200, "[1, 2"));
    assert!(matches!(result, Err(polygon_api::Error::Decode { .. })));
}

#[test]
fn deserialize_type_mismatch_keeps_zero_values() {
    // `results` should be a list; the envelope still decodes.
    let resp = resolve::<ListResponse<Ticker>>(RawResponse::new(
        200,
        r#"{"status":"OK","request_id":"r9","results":{"ticker":"AAPL"}}"#,
    ))
    .unwrap();
    assert_eq!(resp.status, "OK");
    assert_eq!(resp.request_id, "r9");
    assert!(resp.results.is_empty());
}

#[test]
fn deserialize_null_fields_as_zero_values() {
    let resp = resolve::<ListResponse<Ticker>>(RawResponse::new(
        200,
        r#"{"status":"OK","request_id":null,"results":[{"ticker":"AAPL","name":null,"cik":null}]}"#,
    ))
    .unwrap();
    assert_eq!(resp.request_id, "");
    assert_eq!(resp.results[0].ticker, "AAPL");
    assert_eq!(resp.results[0].name, "");
    assert_eq!(resp.results[0].cik, None);

    let resp = resolve::<AggsResponse>(RawResponse::new(
        200,
        r#"{"ticker":"X:BTCUSD","queryCount":null,"results":[{"o":null,"c":43500.5,"n":null}]}"#,
    ))
    .unwrap();
    assert_eq!(resp.results[0].open, 0.0);
    assert_eq!(resp.results[0].close, 43500.5);
    assert_eq!(resp.results[0].transactions, 0);
}
