use anyhow::Result;
use clap::Args;
use polygon_api::query::{AggsQuery, GroupedDailyQuery};
use polygon_api::{Client, Locale, Market, Order, Timespan};

use crate::commands::collect_pages;
use crate::output::{build_bar_rows, print_json, print_rows, OutputFormat};

#[derive(Args)]
pub struct AggsArgs {
    /// Ticker symbol (e.g. AAPL, X:BTCUSD, C:EURUSD, I:SPX)
    pub ticker: Option<String>,

    /// Start of the range: YYYY-MM-DD or Unix milliseconds
    #[arg(long)]
    pub from: Option<String>,

    /// End of the range: YYYY-MM-DD or Unix milliseconds
    #[arg(long)]
    pub to: Option<String>,

    /// Bar width multiplier
    #[arg(long, default_value = "1")]
    pub multiplier: u32,

    /// Bar width unit: second, minute, hour, day, week, month, quarter, year
    #[arg(long, default_value = "day")]
    pub timespan: String,

    /// Do not adjust for splits
    #[arg(long)]
    pub unadjusted: bool,

    /// Sort by timestamp: asc or desc
    #[arg(long)]
    pub sort: Option<String>,

    /// Maximum number of base aggregates
    #[arg(long)]
    pub limit: Option<u32>,

    /// Previous trading day's bar instead of a range
    #[arg(long, conflicts_with_all = ["from", "to", "grouped"])]
    pub prev: bool,

    /// Every ticker's daily bar for this date (YYYY-MM-DD)
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub grouped: Option<String>,

    /// Market for --grouped: stocks, crypto, fx, otc
    #[arg(long, default_value = "stocks")]
    pub market: String,

    /// Number of pages to fetch
    #[arg(long, default_value = "1")]
    pub pages: u32,
}

pub async fn run(args: &AggsArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let adjusted = if args.unadjusted { Some(false) } else { None };

    let bars = if let Some(date) = &args.grouped {
        let market: Market = args.market.parse().map_err(anyhow::Error::msg)?;
        let mut query = GroupedDailyQuery::default();
        query.adjusted = adjusted;
        client
            .get_grouped_daily(Locale::Us, market, date, &query)
            .await?
            .results
    } else {
        let ticker = args
            .ticker
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("a ticker is required unless --grouped is given"))?;

        if args.prev {
            client.get_previous_close(ticker, adjusted).await?.results
        } else {
            let (from, to) = match (&args.from, &args.to) {
                (Some(from), Some(to)) => (from, to),
                _ => anyhow::bail!("--from and --to are required for a range of bars"),
            };
            let timespan: Timespan = args.timespan.parse().map_err(anyhow::Error::msg)?;

            let mut query = AggsQuery::default();
            query.adjusted = adjusted;
            if let Some(sort) = &args.sort {
                query = query.with_sort(sort.parse::<Order>().map_err(anyhow::Error::msg)?);
            }
            if let Some(limit) = args.limit {
                query = query.with_limit(limit);
            }

            let first = client
                .get_aggs(ticker, args.multiplier, timespan, from, to, &query)
                .await?;
            collect_pages(client, first, args.pages, |page| page.results).await?
        }
    };

    match format {
        OutputFormat::Json => print_json(&bars),
        _ => print_rows(&build_bar_rows(&bars), format)?,
    }

    Ok(())
}
