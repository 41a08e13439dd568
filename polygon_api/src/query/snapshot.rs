use std::str::FromStr;

use super::common::{Comparison, ListOptions, ListQuery, Params, Query, RangeFilter};

/// Locale segment of the snapshot paths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Us,
    Global,
}
impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Locale::Us => "us",
                Locale::Global => "global",
            }
        )
    }
}

/// Which movers list to fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Gainers,
    Losers,
}
impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Direction::Gainers => "gainers",
                Direction::Losers => "losers",
            }
        )
    }
}
impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gainers" => Ok(Direction::Gainers),
            "losers" => Ok(Direction::Losers),
            other => Err(format!("unknown direction '{}'", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContractType {
    Call,
    Put,
}
impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ContractType::Call => "call",
                ContractType::Put => "put",
            }
        )
    }
}

/// Filters for the full-market snapshot.
#[derive(Clone, Debug, Default)]
pub struct SnapshotAllQuery {
    /// Restricts the snapshot to these tickers. Empty means all.
    pub tickers: Vec<String>,
    pub include_otc: Option<bool>,
}

impl Query for SnapshotAllQuery {
    fn params(&self) -> Params {
        let mut params = Params::new();
        params
            .set_list("tickers", &self.tickers)
            .set_opt("include_otc", self.include_otc);
        params
    }
}

impl SnapshotAllQuery {
    pub fn with_ticker(mut self, ticker: &str) -> Self {
        self.tickers.push(ticker.to_string());
        self
    }
    pub fn with_tickers(mut self, tickers: &[String]) -> Self {
        self.tickers.extend_from_slice(tickers);
        self
    }
    pub fn with_include_otc(mut self, include_otc: bool) -> Self {
        self.include_otc = Some(include_otc);
        self
    }
}

/// Filters for the cross-asset snapshot endpoint.
#[derive(Clone, Debug, Default)]
pub struct UniversalSnapshotQuery {
    pub ticker: RangeFilter,
    pub ticker_any_of: Vec<String>,
    /// `stocks`, `options`, `fx`, `crypto` or `indices`.
    pub snapshot_type: Option<String>,
    pub list: ListOptions,
}

impl Query for UniversalSnapshotQuery {
    fn params(&self) -> Params {
        let mut params = Params::new();
        self.ticker.write("ticker", &mut params);
        params
            .set_list("ticker.any_of", &self.ticker_any_of)
            .set_opt("type", self.snapshot_type.as_deref());
        self.list.write(&mut params);
        params
    }
}

impl ListQuery for UniversalSnapshotQuery {
    fn list_options(&mut self) -> &mut ListOptions {
        &mut self.list
    }
}

impl UniversalSnapshotQuery {
    pub fn with_ticker(mut self, comparison: Comparison, ticker: &str) -> Self {
        self.ticker.set(comparison, ticker);
        self
    }
    pub fn with_ticker_any_of(mut self, tickers: &[&str]) -> Self {
        self.ticker_any_of
            .extend(tickers.iter().map(|t| t.to_string()));
        self
    }
    pub fn with_type(mut self, snapshot_type: &str) -> Self {
        self.snapshot_type = Some(snapshot_type.to_string());
        self
    }
}

/// Filters for an underlying's options chain.
#[derive(Clone, Debug, Default)]
pub struct OptionsChainQuery {
    pub strike_price: RangeFilter,
    pub expiration_date: RangeFilter,
    pub contract_type: Option<ContractType>,
    pub list: ListOptions,
}

impl Query for OptionsChainQuery {
    fn params(&self) -> Params {
        let mut params = Params::new();
        self.strike_price.write("strike_price", &mut params);
        self.expiration_date.write("expiration_date", &mut params);
        params.set_opt("contract_type", self.contract_type);
        self.list.write(&mut params);
        params
    }
}

impl ListQuery for OptionsChainQuery {
    fn list_options(&mut self) -> &mut ListOptions {
        &mut self.list
    }
}

impl OptionsChainQuery {
    pub fn with_strike_price(mut self, comparison: Comparison, strike: f64) -> Self {
        self.strike_price.set(comparison, strike);
        self
    }
    pub fn with_expiration_date(mut self, comparison: Comparison, date: impl ToString) -> Self {
        self.expiration_date.set(comparison, date);
        self
    }
    pub fn with_contract_type(mut self, contract_type: ContractType) -> Self {
        self.contract_type = Some(contract_type);
        self
    }
}

/// Filters for index value snapshots.
#[derive(Clone, Debug, Default)]
pub struct IndicesSnapshotQuery {
    pub ticker: RangeFilter,
    pub ticker_any_of: Vec<String>,
    pub list: ListOptions,
}

impl Query for IndicesSnapshotQuery {
    fn params(&self) -> Params {
        let mut params = Params::new();
        self.ticker.write("ticker", &mut params);
        params.set_list("ticker.any_of", &self.ticker_any_of);
        self.list.write(&mut params);
        params
    }
}

impl ListQuery for IndicesSnapshotQuery {
    fn list_options(&mut self) -> &mut ListOptions {
        &mut self.list
    }
}

impl IndicesSnapshotQuery {
    pub fn with_ticker(mut self, comparison: Comparison, ticker: &str) -> Self {
        self.ticker.set(comparison, ticker);
        self
    }
    pub fn with_ticker_any_of(mut self, tickers: &[&str]) -> Self {
        self.ticker_any_of
            .extend(tickers.iter().map(|t| t.to_string()));
        self
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::query::{
        Comparison, ContractType, ListQuery, OptionsChainQuery, Query, SnapshotAllQuery,
        UniversalSnapshotQuery,
    };

    #[test]
    fn test_snapshot_queries() {
        let url = Url::parse("https://example.com").unwrap();

        insta::assert_snapshot!(SnapshotAllQuery::default()
            .with_ticker("AAPL")
            .with_ticker("MSFT")
            .with_include_otc(false)
            .add_to_url(&url)
            .to_string(), @"https://example.com/?include_otc=false&tickers=AAPL%2CMSFT");

        insta::assert_snapshot!(UniversalSnapshotQuery::default()
            .with_ticker_any_of(&["NCLH", "O:SPY250117C00500000"])
            .with_type("stocks")
            .add_to_url(&url)
            .to_string(), @"https://example.com/?ticker.any_of=NCLH%2CO%3ASPY250117C00500000&type=stocks");

        insta::assert_snapshot!(OptionsChainQuery::default()
            .with_strike_price(Comparison::Gte, 150.0)
            .with_strike_price(Comparison::Lte, 160.5)
            .with_contract_type(ContractType::Call)
            .with_limit(250)
            .add_to_url(&url)
            .to_string(), @"https://example.com/?contract_type=call&limit=250&strike_price.gte=150&strike_price.lte=160.5");
    }
}
