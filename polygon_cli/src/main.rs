mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use polygon_api::Client;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "polygon")]
#[command(about = "Query market data from the Polygon REST API")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// API key; defaults to POLYGON_API_KEY
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// API base URL; defaults to POLYGON_BASE_URL or https://api.polygon.io
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate bars for a ticker, the previous close, or a whole market's day
    Aggs(commands::aggs::AggsArgs),
    /// Tick-level trades
    Trades(commands::trades::TicksArgs),
    /// Tick-level NBBO quotes
    Quotes(commands::trades::TicksArgs),
    /// Search and list tickers
    Tickers(commands::tickers::TickersArgs),
    /// Details for one ticker
    Ticker(commands::tickers::TickerArgs),
    /// Current snapshot of one or more tickers, or the top movers
    Snapshot(commands::snapshot::SnapshotArgs),
    /// Cash dividends
    Dividends(commands::corporate::DividendsArgs),
    /// Stock splits
    Splits(commands::corporate::SplitsArgs),
    /// Whether markets are open right now
    MarketStatus,
    /// Upcoming market holidays and early closes
    Holidays,
    /// Technical indicator values (SMA, EMA, RSI, MACD)
    Indicator(commands::indicator::IndicatorArgs),
}

fn build_client(cli: &Cli) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(api_key) = &cli.api_key {
        builder = builder.api_key(api_key);
    }
    if let Some(base_url) = &cli.base_url {
        builder = builder.base_url(base_url);
    }
    Ok(builder.from_env()?.build()?)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("polygon=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format: OutputFormat = cli.output.parse().map_err(anyhow::Error::msg)?;
    let client = build_client(&cli)?;

    match &cli.command {
        Commands::Aggs(args) => commands::aggs::run(args, &client, &format).await?,
        Commands::Trades(args) => commands::trades::run_trades(args, &client, &format).await?,
        Commands::Quotes(args) => commands::trades::run_quotes(args, &client, &format).await?,
        Commands::Tickers(args) => commands::tickers::run_list(args, &client, &format).await?,
        Commands::Ticker(args) => commands::tickers::run_details(args, &client, &format).await?,
        Commands::Snapshot(args) => commands::snapshot::run(args, &client, &format).await?,
        Commands::Dividends(args) => {
            commands::corporate::run_dividends(args, &client, &format).await?
        }
        Commands::Splits(args) => commands::corporate::run_splits(args, &client, &format).await?,
        Commands::MarketStatus => commands::market::run_status(&client, &format).await?,
        Commands::Holidays => commands::market::run_holidays(&client, &format).await?,
        Commands::Indicator(args) => commands::indicator::run(args, &client, &format).await?,
    }

    Ok(())
}
