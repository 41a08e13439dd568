use anyhow::Result;
use polygon_api::Client;

use crate::output::{
    build_holiday_rows, build_market_status_rows, print_json, print_rows, OutputFormat,
};

pub async fn run_status(client: &Client, format: &OutputFormat) -> Result<()> {
    let status = client.get_market_status().await?;

    match format {
        OutputFormat::Json => print_json(&status),
        _ => print_rows(&build_market_status_rows(&status), format)?,
    }

    Ok(())
}

pub async fn run_holidays(client: &Client, format: &OutputFormat) -> Result<()> {
    let holidays = client.get_market_holidays().await?;

    match format {
        OutputFormat::Json => print_json(&holidays),
        _ => print_rows(&build_holiday_rows(&holidays), format)?,
    }

    Ok(())
}
