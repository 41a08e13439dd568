use anyhow::Result;
use clap::Args;
use polygon_api::query::{DividendsQuery, ListQuery, SplitsQuery};
use polygon_api::{Client, Comparison, Order};

use crate::commands::collect_pages;
use crate::output::{build_dividend_rows, build_split_rows, print_json, print_rows, OutputFormat};

#[derive(Args)]
pub struct DividendsArgs {
    /// Ticker symbol
    #[arg(long)]
    pub ticker: Option<String>,

    /// Ex-dividend date on or after (YYYY-MM-DD)
    #[arg(long)]
    pub since: Option<String>,

    /// Ex-dividend date on or before (YYYY-MM-DD)
    #[arg(long)]
    pub until: Option<String>,

    /// Payments per year: 0, 1, 2, 4, 12, 24, 52
    #[arg(long)]
    pub frequency: Option<u32>,

    /// Dividend type: CD, SC, LT, ST
    #[arg(long = "type")]
    pub dividend_type: Option<String>,

    /// Results per page (max 1000)
    #[arg(long, default_value = "50")]
    pub limit: u32,

    /// Number of pages to fetch
    #[arg(long, default_value = "1")]
    pub pages: u32,
}

#[derive(Args)]
pub struct SplitsArgs {
    /// Ticker symbol
    #[arg(long)]
    pub ticker: Option<String>,

    /// Execution date on or after (YYYY-MM-DD)
    #[arg(long)]
    pub since: Option<String>,

    /// Execution date on or before (YYYY-MM-DD)
    #[arg(long)]
    pub until: Option<String>,

    /// Only reverse splits
    #[arg(long)]
    pub reverse: bool,

    /// Results per page (max 1000)
    #[arg(long, default_value = "50")]
    pub limit: u32,

    /// Number of pages to fetch
    #[arg(long, default_value = "1")]
    pub pages: u32,
}

pub async fn run_dividends(
    args: &DividendsArgs,
    client: &Client,
    format: &OutputFormat,
) -> Result<()> {
    let mut query = DividendsQuery::default()
        .with_limit(args.limit)
        .with_sort("ex_dividend_date")
        .with_order(Order::Desc);

    if let Some(ticker) = &args.ticker {
        query = query.with_ticker(Comparison::Eq, ticker);
    }
    if let Some(since) = &args.since {
        query = query.with_ex_dividend_date(Comparison::Gte, since);
    }
    if let Some(until) = &args.until {
        query = query.with_ex_dividend_date(Comparison::Lte, until);
    }
    if let Some(frequency) = args.frequency {
        query = query.with_frequency(frequency);
    }
    if let Some(dividend_type) = &args.dividend_type {
        query = query.with_dividend_type(dividend_type);
    }

    let first = client.list_dividends(&query).await?;
    let dividends = collect_pages(client, first, args.pages, |page| page.results).await?;

    match format {
        OutputFormat::Json => print_json(&dividends),
        _ => print_rows(&build_dividend_rows(&dividends), format)?,
    }

    Ok(())
}

pub async fn run_splits(args: &SplitsArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let mut query = SplitsQuery::default()
        .with_limit(args.limit)
        .with_sort("execution_date")
        .with_order(Order::Desc);

    if let Some(ticker) = &args.ticker {
        query = query.with_ticker(Comparison::Eq, ticker);
    }
    if let Some(since) = &args.since {
        query = query.with_execution_date(Comparison::Gte, since);
    }
    if let Some(until) = &args.until {
        query = query.with_execution_date(Comparison::Lte, until);
    }
    if args.reverse {
        query = query.with_reverse_split(true);
    }

    let first = client.list_splits(&query).await?;
    let splits = collect_pages(client, first, args.pages, |page| page.results).await?;

    match format {
        OutputFormat::Json => print_json(&splits),
        _ => print_rows(&build_split_rows(&splits), format)?,
    }

    Ok(())
}
