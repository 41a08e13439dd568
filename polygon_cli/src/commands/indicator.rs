use anyhow::Result;
use clap::{Args, ValueEnum};
use polygon_api::query::{IndicatorQuery, MacdQuery, SeriesType};
use polygon_api::{Client, Comparison, Order, Timespan};

use crate::commands::collect_pages;
use crate::output::{build_indicator_rows, build_macd_rows, print_json, print_rows, OutputFormat};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Kind {
    Sma,
    Ema,
    Rsi,
    Macd,
}

#[derive(Args)]
pub struct IndicatorArgs {
    /// Indicator to compute
    #[arg(value_enum)]
    pub kind: Kind,

    /// Ticker symbol
    pub ticker: String,

    /// Aggregate width: minute, hour, day, week, month, quarter, year
    #[arg(long, default_value = "day")]
    pub timespan: String,

    /// Window size for SMA, EMA and RSI
    #[arg(long)]
    pub window: Option<u32>,

    /// MACD short window
    #[arg(long)]
    pub short_window: Option<u32>,

    /// MACD long window
    #[arg(long)]
    pub long_window: Option<u32>,

    /// MACD signal window
    #[arg(long)]
    pub signal_window: Option<u32>,

    /// Price series: open, high, low, close
    #[arg(long, default_value = "close")]
    pub series: String,

    /// Values on or after this date (YYYY-MM-DD) or Unix milliseconds
    #[arg(long)]
    pub since: Option<String>,

    /// Oldest values first
    #[arg(long)]
    pub asc: bool,

    /// Results per page (max 5000)
    #[arg(long, default_value = "10")]
    pub limit: u32,

    /// Number of pages to fetch
    #[arg(long, default_value = "1")]
    pub pages: u32,
}

fn parse_series(series: &str) -> Result<SeriesType> {
    match series {
        "open" => Ok(SeriesType::Open),
        "high" => Ok(SeriesType::High),
        "low" => Ok(SeriesType::Low),
        "close" => Ok(SeriesType::Close),
        other => anyhow::bail!("unknown series type '{}'", other),
    }
}

pub async fn run(args: &IndicatorArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let timespan: Timespan = args.timespan.parse().map_err(anyhow::Error::msg)?;
    let series = parse_series(&args.series)?;
    let order = if args.asc { Order::Asc } else { Order::Desc };

    let mut query = IndicatorQuery::default()
        .with_timespan(timespan)
        .with_series_type(series)
        .with_order(order)
        .with_limit(args.limit);
    if let Some(since) = &args.since {
        query = query.with_timestamp(Comparison::Gte, since);
    }
    query.window = args.window;

    let first = match args.kind {
        Kind::Sma => client.get_sma(&args.ticker, &query).await?,
        Kind::Ema => client.get_ema(&args.ticker, &query).await?,
        Kind::Rsi => client.get_rsi(&args.ticker, &query).await?,
        Kind::Macd => return run_macd(args, client, format, timespan, series, order).await,
    };
    let values = collect_pages(client, first, args.pages, |page| page.results.values).await?;

    match format {
        OutputFormat::Json => print_json(&values),
        _ => print_rows(&build_indicator_rows(&values), format)?,
    }

    Ok(())
}

async fn run_macd(
    args: &IndicatorArgs,
    client: &Client,
    format: &OutputFormat,
    timespan: Timespan,
    series: SeriesType,
    order: Order,
) -> Result<()> {
    let mut query = MacdQuery::default()
        .with_timespan(timespan)
        .with_series_type(series)
        .with_order(order)
        .with_limit(args.limit);
    if let Some(since) = &args.since {
        query = query.with_timestamp(Comparison::Gte, since);
    }
    query.short_window = args.short_window;
    query.long_window = args.long_window;
    query.signal_window = args.signal_window;

    let first = client.get_macd(&args.ticker, &query).await?;
    let values = collect_pages(client, first, args.pages, |page| page.results.values).await?;

    match format {
        OutputFormat::Json => print_json(&values),
        _ => print_rows(&build_macd_rows(&values), format)?,
    }

    Ok(())
}
