use anyhow::Result;
use clap::Args;
use polygon_api::query::SnapshotAllQuery;
use polygon_api::{Client, Direction, Locale, Market};

use crate::output::{build_snapshot_rows, print_json, print_rows, OutputFormat};

#[derive(Args)]
pub struct SnapshotArgs {
    /// Tickers to snapshot; all tickers in the market when omitted
    pub tickers: Vec<String>,

    /// Market: stocks, crypto, fx, otc
    #[arg(long, default_value = "stocks")]
    pub market: String,

    /// Top movers instead: gainers or losers
    #[arg(long, conflicts_with = "tickers")]
    pub movers: Option<String>,

    /// Include OTC securities
    #[arg(long)]
    pub include_otc: bool,
}

pub async fn run(args: &SnapshotArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let market: Market = args.market.parse().map_err(anyhow::Error::msg)?;
    let include_otc = if args.include_otc { Some(true) } else { None };

    let snapshots = if let Some(movers) = &args.movers {
        let direction: Direction = movers.parse().map_err(anyhow::Error::msg)?;
        client
            .get_snapshot_direction(Locale::Us, market, direction, include_otc)
            .await?
            .tickers
    } else if let [ticker] = args.tickers.as_slice() {
        vec![client
            .get_snapshot_ticker(Locale::Us, market, ticker)
            .await?
            .ticker]
    } else {
        let mut query = SnapshotAllQuery::default().with_tickers(&args.tickers);
        query.include_otc = include_otc;
        client
            .get_snapshot_all(Locale::Us, market, &query)
            .await?
            .tickers
    };

    match format {
        OutputFormat::Json => print_json(&snapshots),
        _ => print_rows(&build_snapshot_rows(&snapshots), format)?,
    }

    Ok(())
}
