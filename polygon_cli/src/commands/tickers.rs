use anyhow::Result;
use clap::Args;
use polygon_api::query::{ListQuery, TickersQuery};
use polygon_api::{Client, Market, Order};

use crate::commands::collect_pages;
use crate::output::{
    build_ticker_detail_rows, build_ticker_rows, print_json, print_rows, OutputFormat,
};

#[derive(Args)]
pub struct TickersArgs {
    /// Search tickers and company names
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by market: stocks, crypto, fx, otc, indices
    #[arg(long)]
    pub market: Option<String>,

    /// Filter by ticker type code (e.g. CS, ETF, ADRC)
    #[arg(long = "type")]
    pub ticker_type: Option<String>,

    /// Filter by primary exchange MIC (e.g. XNAS, XNYS)
    #[arg(long)]
    pub exchange: Option<String>,

    /// Include delisted tickers
    #[arg(long)]
    pub inactive: bool,

    /// Sort field (e.g. ticker, name, last_updated_utc)
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Results per page (max 1000)
    #[arg(long, default_value = "100")]
    pub limit: u32,

    /// Number of pages to fetch
    #[arg(long, default_value = "1")]
    pub pages: u32,
}

#[derive(Args)]
pub struct TickerArgs {
    /// Ticker symbol
    pub ticker: String,

    /// Details as of this date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
}

pub async fn run_list(args: &TickersArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let mut query = TickersQuery::default()
        .with_active(!args.inactive)
        .with_limit(args.limit);

    if let Some(search) = &args.search {
        query = query.with_search(search);
    }
    if let Some(market) = &args.market {
        query = query.with_market(market.parse::<Market>().map_err(anyhow::Error::msg)?);
    }
    if let Some(ticker_type) = &args.ticker_type {
        query = query.with_type(ticker_type);
    }
    if let Some(exchange) = &args.exchange {
        query = query.with_exchange(exchange);
    }
    if let Some(sort) = &args.sort {
        query = query.with_sort(sort);
    }
    if args.desc {
        query = query.with_order(Order::Desc);
    }

    let first = client.list_tickers(&query).await?;
    let tickers = collect_pages(client, first, args.pages, |page| page.results).await?;

    match format {
        OutputFormat::Json => print_json(&tickers),
        _ => print_rows(&build_ticker_rows(&tickers), format)?,
    }

    Ok(())
}

pub async fn run_details(args: &TickerArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let resp = client
        .get_ticker_details(&args.ticker, args.date.as_deref())
        .await?;

    match format {
        OutputFormat::Json => print_json(&resp.results),
        _ => print_rows(&build_ticker_detail_rows(&resp.results), format)?,
    }

    Ok(())
}
