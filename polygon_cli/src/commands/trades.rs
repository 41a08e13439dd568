use anyhow::Result;
use clap::Args;
use polygon_api::query::{ListQuery, TickQuery};
use polygon_api::types::{Quote, Trade};
use polygon_api::{Client, Comparison, Order};

use crate::commands::collect_pages;
use crate::output::{build_quote_rows, build_trade_rows, print_json, print_rows, OutputFormat};

#[derive(Args)]
pub struct TicksArgs {
    /// Ticker symbol (e.g. AAPL, O:AAPL250321C00150000, X:BTC-USD)
    pub ticker: String,

    /// Only this date (YYYY-MM-DD) or nanosecond timestamp
    #[arg(long)]
    pub date: Option<String>,

    /// On or after this date or nanosecond timestamp
    #[arg(long)]
    pub since: Option<String>,

    /// Before this date or nanosecond timestamp
    #[arg(long)]
    pub until: Option<String>,

    /// Sort ascending instead of descending
    #[arg(long)]
    pub asc: bool,

    /// Results per page (max 50000)
    #[arg(long, default_value = "100")]
    pub limit: u32,

    /// Number of pages to fetch
    #[arg(long, default_value = "1")]
    pub pages: u32,

    /// Show only the most recent one
    #[arg(long, conflicts_with_all = ["date", "since", "until", "pages"])]
    pub last: bool,
}

fn build_query(args: &TicksArgs) -> TickQuery {
    let mut query = TickQuery::default().with_limit(args.limit);
    if let Some(date) = &args.date {
        query = query.with_timestamp(Comparison::Eq, date);
    }
    if let Some(since) = &args.since {
        query = query.with_timestamp(Comparison::Gte, since);
    }
    if let Some(until) = &args.until {
        query = query.with_timestamp(Comparison::Lt, until);
    }
    if args.asc {
        query = query.with_order(Order::Asc);
    }
    query
}

pub async fn run_trades(args: &TicksArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    if args.last {
        let last = client.get_last_trade(&args.ticker).await?.results;
        match format {
            OutputFormat::Json => print_json(&last),
            _ => print_rows(&build_trade_rows(&[Trade::from(last)]), format)?,
        }
        return Ok(());
    }

    let first = client.list_trades(&args.ticker, &build_query(args)).await?;
    let trades = collect_pages(client, first, args.pages, |page| page.results).await?;

    match format {
        OutputFormat::Json => print_json(&trades),
        _ => print_rows(&build_trade_rows(&trades), format)?,
    }

    Ok(())
}

pub async fn run_quotes(args: &TicksArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    if args.last {
        let last = client.get_last_quote(&args.ticker).await?.results;
        match format {
            OutputFormat::Json => print_json(&last),
            _ => print_rows(&build_quote_rows(&[Quote::from(last)]), format)?,
        }
        return Ok(());
    }

    let first = client.list_quotes(&args.ticker, &build_query(args)).await?;
    let quotes = collect_pages(client, first, args.pages, |page| page.results).await?;

    match format {
        OutputFormat::Json => print_json(&quotes),
        _ => print_rows(&build_quote_rows(&quotes), format)?,
    }

    Ok(())
}
