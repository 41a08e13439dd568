use anyhow::Result;
use chrono::{DateTime, Utc};
use polygon_api::types::{
    Agg, Dividend, IndicatorValue, MacdValue, MarketHoliday, MarketStatus, Quote, Split, Ticker,
    TickerDetails, TickerSnapshot, Trade,
};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(format!(
                "unknown output format '{}', expected table, json, csv or markdown",
                other
            )),
        }
    }
}

#[derive(Tabled, Serialize)]
pub struct BarRow {
    #[tabled(rename = "Time")]
    #[serde(rename = "Time")]
    time: String,
    #[tabled(rename = "Open")]
    #[serde(rename = "Open")]
    open: String,
    #[tabled(rename = "High")]
    #[serde(rename = "High")]
    high: String,
    #[tabled(rename = "Low")]
    #[serde(rename = "Low")]
    low: String,
    #[tabled(rename = "Close")]
    #[serde(rename = "Close")]
    close: String,
    #[tabled(rename = "Volume")]
    #[serde(rename = "Volume")]
    volume: String,
    #[tabled(rename = "VWAP")]
    #[serde(rename = "VWAP")]
    vwap: String,
    #[tabled(rename = "Trades")]
    #[serde(rename = "Trades")]
    transactions: i64,
}

#[derive(Tabled, Serialize)]
pub struct TradeRow {
    #[tabled(rename = "Time")]
    #[serde(rename = "Time")]
    time: String,
    #[tabled(rename = "Price")]
    #[serde(rename = "Price")]
    price: String,
    #[tabled(rename = "Size")]
    #[serde(rename = "Size")]
    size: f64,
    #[tabled(rename = "Exchange")]
    #[serde(rename = "Exchange")]
    exchange: i32,
    #[tabled(rename = "Conditions")]
    #[serde(rename = "Conditions")]
    conditions: String,
}

#[derive(Tabled, Serialize)]
pub struct QuoteRow {
    #[tabled(rename = "Time")]
    #[serde(rename = "Time")]
    time: String,
    #[tabled(rename = "Bid")]
    #[serde(rename = "Bid")]
    bid: String,
    #[tabled(rename = "Bid Size")]
    #[serde(rename = "Bid Size")]
    bid_size: f64,
    #[tabled(rename = "Ask")]
    #[serde(rename = "Ask")]
    ask: String,
    #[tabled(rename = "Ask Size")]
    #[serde(rename = "Ask Size")]
    ask_size: f64,
    #[tabled(rename = "Spread")]
    #[serde(rename = "Spread")]
    spread: String,
}

#[derive(Tabled, Serialize)]
pub struct TickerRow {
    #[tabled(rename = "Ticker")]
    #[serde(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Market")]
    #[serde(rename = "Market")]
    market: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    ticker_type: String,
    #[tabled(rename = "Exchange")]
    #[serde(rename = "Exchange")]
    exchange: String,
    #[tabled(rename = "Active")]
    #[serde(rename = "Active")]
    active: bool,
}

#[derive(Tabled, Serialize)]
pub struct FieldRow {
    #[tabled(rename = "Field")]
    #[serde(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Tabled, Serialize)]
pub struct SnapshotRow {
    #[tabled(rename = "Ticker")]
    #[serde(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Last")]
    #[serde(rename = "Last")]
    last: String,
    #[tabled(rename = "Change")]
    #[serde(rename = "Change")]
    change: String,
    #[tabled(rename = "Change %")]
    #[serde(rename = "Change %")]
    change_perc: String,
    #[tabled(rename = "Volume")]
    #[serde(rename = "Volume")]
    volume: String,
    #[tabled(rename = "Updated")]
    #[serde(rename = "Updated")]
    updated: String,
}

#[derive(Tabled, Serialize)]
pub struct DividendRow {
    #[tabled(rename = "Ticker")]
    #[serde(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Ex-Date")]
    #[serde(rename = "Ex-Date")]
    ex_dividend_date: String,
    #[tabled(rename = "Pay Date")]
    #[serde(rename = "Pay Date")]
    pay_date: String,
    #[tabled(rename = "Amount")]
    #[serde(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Frequency")]
    #[serde(rename = "Frequency")]
    frequency: i64,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    dividend_type: String,
}

#[derive(Tabled, Serialize)]
pub struct SplitRow {
    #[tabled(rename = "Ticker")]
    #[serde(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    execution_date: String,
    #[tabled(rename = "Split")]
    #[serde(rename = "Split")]
    split: String,
}

#[derive(Tabled, Serialize)]
pub struct HolidayRow {
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Exchange")]
    #[serde(rename = "Exchange")]
    exchange: String,
    #[tabled(rename = "Holiday")]
    #[serde(rename = "Holiday")]
    name: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Hours")]
    #[serde(rename = "Hours")]
    hours: String,
}

#[derive(Tabled, Serialize)]
pub struct IndicatorRow {
    #[tabled(rename = "Time")]
    #[serde(rename = "Time")]
    time: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Tabled, Serialize)]
pub struct MacdRow {
    #[tabled(rename = "Time")]
    #[serde(rename = "Time")]
    time: String,
    #[tabled(rename = "MACD")]
    #[serde(rename = "MACD")]
    value: String,
    #[tabled(rename = "Signal")]
    #[serde(rename = "Signal")]
    signal: String,
    #[tabled(rename = "Histogram")]
    #[serde(rename = "Histogram")]
    histogram: String,
}

// -- Row builders --

pub fn build_bar_rows(bars: &[Agg]) -> Vec<BarRow> {
    bars.iter()
        .map(|b| BarRow {
            time: format_time(b.start_time()),
            open: format_price(b.open),
            high: format_price(b.high),
            low: format_price(b.low),
            close: format_price(b.close),
            volume: format_volume(b.volume),
            vwap: format_price(b.vwap),
            transactions: b.transactions,
        })
        .collect()
}

pub fn build_trade_rows(trades: &[Trade]) -> Vec<TradeRow> {
    trades
        .iter()
        .map(|t| TradeRow {
            time: format_time(Some(t.sip_time())),
            price: format_price(t.price),
            size: t.size,
            exchange: t.exchange,
            conditions: join_codes(&t.conditions),
        })
        .collect()
}

pub fn build_quote_rows(quotes: &[Quote]) -> Vec<QuoteRow> {
    quotes
        .iter()
        .map(|q| QuoteRow {
            time: format_time(Some(q.sip_time())),
            bid: format_price(q.bid_price),
            bid_size: q.bid_size,
            ask: format_price(q.ask_price),
            ask_size: q.ask_size,
            spread: format_price(q.spread()),
        })
        .collect()
}

pub fn build_ticker_rows(tickers: &[Ticker]) -> Vec<TickerRow> {
    tickers
        .iter()
        .map(|t| TickerRow {
            ticker: t.ticker.clone(),
            name: t.name.clone(),
            market: t.market.clone(),
            ticker_type: t.ticker_type.clone().unwrap_or_default(),
            exchange: t.primary_exchange.clone().unwrap_or_default(),
            active: t.active,
        })
        .collect()
}

pub fn build_ticker_detail_rows(details: &TickerDetails) -> Vec<FieldRow> {
    let mut rows = vec![
        field("Ticker", &details.ticker),
        field("Name", &details.name),
        field("Market", &details.market),
        field("Locale", &details.locale),
        field("Active", details.active),
    ];
    let optional = [
        ("Type", details.ticker_type.clone()),
        ("Exchange", details.primary_exchange.clone()),
        ("Currency", details.currency_name.clone()),
        ("CIK", details.cik.clone()),
        ("FIGI", details.composite_figi.clone()),
        ("Market Cap", details.market_cap.map(format_volume)),
        (
            "Shares Outstanding",
            details.share_class_shares_outstanding.map(|n| format_volume(n as f64)),
        ),
        ("Employees", details.total_employees.map(|n| n.to_string())),
        ("Listed", details.list_date.clone()),
        ("SIC", details.sic_description.clone()),
        ("Homepage", details.homepage_url.clone()),
        ("Phone", details.phone_number.clone()),
    ];
    rows.extend(
        optional
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| field(name, v))),
    );
    rows
}

pub fn build_snapshot_rows(snapshots: &[TickerSnapshot]) -> Vec<SnapshotRow> {
    snapshots
        .iter()
        .map(|s| SnapshotRow {
            ticker: s.ticker.clone(),
            last: format_price(last_price(s)),
            change: format!("{:+.2}", s.todays_change),
            change_perc: format!("{:+.2}%", s.todays_change_perc),
            volume: format_volume(s.day.volume),
            updated: if s.updated == 0 {
                String::new()
            } else {
                format_time(Some(s.updated_at()))
            },
        })
        .collect()
}

pub fn build_dividend_rows(dividends: &[Dividend]) -> Vec<DividendRow> {
    dividends
        .iter()
        .map(|d| DividendRow {
            ticker: d.ticker.clone(),
            ex_dividend_date: d.ex_dividend_date.clone(),
            pay_date: d.pay_date.clone().unwrap_or_default(),
            amount: format!(
                "{:.4} {}",
                d.cash_amount,
                d.currency.as_deref().unwrap_or("")
            )
            .trim_end()
            .to_string(),
            frequency: d.frequency,
            dividend_type: d.dividend_type.clone(),
        })
        .collect()
}

pub fn build_split_rows(splits: &[Split]) -> Vec<SplitRow> {
    splits
        .iter()
        .map(|s| SplitRow {
            ticker: s.ticker.clone(),
            execution_date: s.execution_date.clone(),
            split: format!("{}-for-{}", s.split_to, s.split_from),
        })
        .collect()
}

pub fn build_holiday_rows(holidays: &[MarketHoliday]) -> Vec<HolidayRow> {
    holidays
        .iter()
        .map(|h| HolidayRow {
            date: h.date.clone(),
            exchange: h.exchange.clone(),
            name: h.name.clone(),
            status: h.status.clone(),
            hours: match (&h.open, &h.close) {
                (Some(open), Some(close)) => format!("{} - {}", open, close),
                _ => String::new(),
            },
        })
        .collect()
}

pub fn build_market_status_rows(status: &MarketStatus) -> Vec<FieldRow> {
    let mut rows = vec![
        field("Market", &status.market),
        field("Server Time", &status.server_time),
        field("Early Hours", status.early_hours),
        field("After Hours", status.after_hours),
    ];
    for (name, state) in status
        .exchanges
        .iter()
        .chain(status.currencies.iter())
        .chain(status.indices_groups.iter())
    {
        rows.push(field(name, state));
    }
    rows
}

pub fn build_indicator_rows(values: &[IndicatorValue]) -> Vec<IndicatorRow> {
    values
        .iter()
        .map(|v| IndicatorRow {
            time: format_time(v.time()),
            value: format!("{:.4}", v.value),
        })
        .collect()
}

pub fn build_macd_rows(values: &[MacdValue]) -> Vec<MacdRow> {
    values
        .iter()
        .map(|v| MacdRow {
            time: format_time(DateTime::from_timestamp_millis(v.timestamp)),
            value: format!("{:.4}", v.value),
            signal: format!("{:.4}", v.signal),
            histogram: format!("{:.4}", v.histogram),
        })
        .collect()
}

// -- Output --

/// Prints `rows` as a table, markdown table or CSV. JSON callers print the
/// API values themselves with [`print_json`]; rows reaching here as JSON are
/// printed as-is.
pub fn print_rows<R: Tabled + Serialize>(rows: &[R], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => print_json(&rows),
    }
    Ok(())
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn field(name: &str, value: impl ToString) -> FieldRow {
    FieldRow {
        field: name.to_string(),
        value: value.to_string(),
    }
}

fn last_price(snapshot: &TickerSnapshot) -> f64 {
    if snapshot.last_trade.price != 0.0 {
        snapshot.last_trade.price
    } else if snapshot.day.close != 0.0 {
        snapshot.day.close
    } else {
        snapshot.prev_day.close
    }
}

fn join_codes(codes: &[i32]) -> String {
    codes
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

fn format_price(price: f64) -> String {
    if price != 0.0 && price.abs() < 1.0 {
        format!("{:.6}", price)
    } else {
        format!("{:.2}", price)
    }
}

fn format_volume(volume: f64) -> String {
    if volume >= 1_000_000_000_000.0 {
        format!("{:.2}T", volume / 1_000_000_000_000.0)
    } else if volume >= 1_000_000_000.0 {
        format!("{:.2}B", volume / 1_000_000_000.0)
    } else if volume >= 1_000_000.0 {
        format!("{:.1}M", volume / 1_000_000.0)
    } else if volume >= 1_000.0 {
        format!("{:.1}K", volume / 1_000.0)
    } else {
        format!("{}", volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polygon_api::types::{
        AggsResponse, IndicatorResponse, ListResponse, Response, TickerSnapshotResponse,
    };

    fn load_aggs_fixture() -> Vec<Agg> {
        let json_str = include_str!("../../polygon_api/tests/fixtures/aggs_btc.json");
        let resp: AggsResponse = serde_json::from_str(json_str).unwrap();
        resp.results
    }

    fn load_trades_fixture() -> Vec<Trade> {
        let json_str = include_str!("../../polygon_api/tests/fixtures/trades.json");
        let resp: ListResponse<Trade> = serde_json::from_str(json_str).unwrap();
        resp.results
    }

    fn load_tickers_fixture() -> Vec<Ticker> {
        let json_str = include_str!("../../polygon_api/tests/fixtures/tickers.json");
        let resp: ListResponse<Ticker> = serde_json::from_str(json_str).unwrap();
        resp.results
    }

    fn load_details_fixture() -> TickerDetails {
        let json_str = include_str!("../../polygon_api/tests/fixtures/ticker_details.json");
        let resp: Response<TickerDetails> = serde_json::from_str(json_str).unwrap();
        resp.results
    }

    // -- format helpers --

    #[test]
    fn test_format_volume_units() {
        assert_eq!(format_volume(2_500_000_000_000.0), "2.50T");
        assert_eq!(format_volume(15_000_000.0), "15.0M");
        assert_eq!(format_volume(50_000.0), "50.0K");
        assert_eq!(format_volume(500.0), "500");
        assert_eq!(format_volume(0.0), "0");
    }

    #[test]
    fn test_format_price_precision() {
        assert_eq!(format_price(43000.0), "43000.00");
        assert_eq!(format_price(0.000123), "0.000123");
        assert_eq!(format_price(0.0), "0.00");
    }

    // -- Row builder tests --

    #[test]
    fn test_build_bar_rows_mapping() {
        let rows = build_bar_rows(&load_aggs_fixture());
        assert_eq!(rows.len(), 2);

        let row = &rows[0];
        assert_eq!(row.time, "2025-01-06 00:00:00");
        assert_eq!(row.open, "43000.00");
        assert_eq!(row.close, "44150.25");
        assert_eq!(row.volume, "15.4K");
        assert_eq!(row.transactions, 412553);
    }

    #[test]
    fn test_build_trade_rows_mapping() {
        let rows = build_trade_rows(&load_trades_fixture());
        assert_eq!(rows[0].price, "243.36");
        assert_eq!(rows[0].conditions, "12,41");
        assert_eq!(rows[1].conditions, "");
        assert_eq!(rows[1].exchange, 4);
    }

    #[test]
    fn test_build_ticker_rows_missing_fields() {
        let rows = build_ticker_rows(&load_tickers_fixture());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].ticker_type, "CS");
        assert_eq!(rows[1].exchange, "XNYS");

        let rows = build_ticker_rows(&[Ticker::default()]);
        assert_eq!(rows[0].ticker_type, "");
        assert!(!rows[0].active);
    }

    #[test]
    fn test_build_ticker_detail_rows_skips_missing() {
        let rows = build_ticker_detail_rows(&load_details_fixture());
        let fields: Vec<&str> = rows.iter().map(|r| r.field.as_str()).collect();
        assert!(fields.contains(&"Market Cap"));
        assert!(fields.contains(&"Employees"));

        let rows = build_ticker_detail_rows(&TickerDetails::default());
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn test_build_snapshot_rows_mapping() {
        let json_str = include_str!("../../polygon_api/tests/fixtures/snapshot_ticker.json");
        let resp: TickerSnapshotResponse = serde_json::from_str(json_str).unwrap();
        let rows = build_snapshot_rows(&[resp.ticker]);

        assert_eq!(rows[0].last, "243.36");
        assert_eq!(rows[0].change, "-0.49");
        assert_eq!(rows[0].change_perc, "-0.20%");
        assert_eq!(rows[0].volume, "40.9M");
    }

    #[test]
    fn test_build_split_rows_ratio_text() {
        let json_str = include_str!("../../polygon_api/tests/fixtures/splits.json");
        let resp: ListResponse<Split> = serde_json::from_str(json_str).unwrap();
        let rows = build_split_rows(&resp.results);
        assert_eq!(rows[0].split, "10-for-1");
        assert_eq!(rows[1].split, "1-for-20");
    }

    #[test]
    fn test_build_holiday_rows_hours() {
        let json_str = include_str!("../../polygon_api/tests/fixtures/market_holidays.json");
        let holidays: Vec<MarketHoliday> = serde_json::from_str(json_str).unwrap();
        let rows = build_holiday_rows(&holidays);
        assert_eq!(rows[0].hours, "");
        assert!(rows[2].hours.starts_with("2025-07-03T13:30"));
    }

    #[test]
    fn test_build_indicator_rows_mapping() {
        let json_str = include_str!("../../polygon_api/tests/fixtures/sma.json");
        let resp: IndicatorResponse<IndicatorValue> = serde_json::from_str(json_str).unwrap();
        let rows = build_indicator_rows(&resp.results.values);
        assert_eq!(rows[0].value, "240.1234");
        assert_eq!(rows[0].time, "2025-01-06 05:00:00");
    }

    // -- CSV output tests --

    fn csv_from_rows<T: Serialize>(rows: &[T]) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        for row in rows {
            wtr.serialize(row).unwrap();
        }
        wtr.flush().unwrap();
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_csv_bar_headers() {
        let csv = csv_from_rows(&build_bar_rows(&load_aggs_fixture()));
        let header = csv.lines().next().unwrap();
        assert_eq!(header, "Time,Open,High,Low,Close,Volume,VWAP,Trades");
    }

    #[test]
    fn test_csv_ticker_headers() {
        let csv = csv_from_rows(&build_ticker_rows(&load_tickers_fixture()));
        let header = csv.lines().next().unwrap();
        assert_eq!(header, "Ticker,Name,Market,Type,Exchange,Active");
    }

    // -- Markdown output tests --

    #[test]
    fn test_markdown_bars_structure() {
        let rows = build_bar_rows(&load_aggs_fixture());
        let mut table = Table::new(&rows);
        table.with(Style::markdown());
        let md = table.to_string();

        assert!(md.contains('|'));
        assert!(md.contains("---"));
        assert!(md.contains("VWAP"));
        assert!(md.contains("43000.00"));
    }

    #[test]
    fn test_output_format_parse() {
        assert!(matches!("md".parse::<OutputFormat>(), Ok(OutputFormat::Markdown)));
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
