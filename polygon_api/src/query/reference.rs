use std::str::FromStr;

use super::common::{Comparison, ListOptions, ListQuery, Params, Query, RangeFilter};

/// Market (asset class) a ticker trades in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Market {
    Stocks,
    Crypto,
    Fx,
    Otc,
    Indices,
    Options,
}
impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Market::Stocks => "stocks",
                Market::Crypto => "crypto",
                Market::Fx => "fx",
                Market::Otc => "otc",
                Market::Indices => "indices",
                Market::Options => "options",
            }
        )
    }
}
impl FromStr for Market {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stocks" => Ok(Market::Stocks),
            "crypto" => Ok(Market::Crypto),
            "fx" => Ok(Market::Fx),
            "otc" => Ok(Market::Otc),
            "indices" => Ok(Market::Indices),
            "options" => Ok(Market::Options),
            other => Err(format!("unknown market '{}'", other)),
        }
    }
}

/// Filters for the ticker reference listing.
#[derive(Clone, Debug, Default)]
pub struct TickersQuery {
    pub ticker: RangeFilter,
    pub ticker_type: Option<String>,
    pub market: Option<Market>,
    pub exchange: Option<String>,
    pub cusip: Option<String>,
    pub cik: Option<String>,
    pub date: Option<String>,
    pub search: Option<String>,
    pub active: Option<bool>,
    pub list: ListOptions,
}

impl Query for TickersQuery {
    fn params(&self) -> Params {
        let mut params = Params::new();
        self.ticker.write("ticker", &mut params);
        params
            .set_opt("type", self.ticker_type.as_deref())
            .set_opt("market", self.market)
            .set_opt("exchange", self.exchange.as_deref())
            .set_opt("cusip", self.cusip.as_deref())
            .set_opt("cik", self.cik.as_deref())
            .set_opt("date", self.date.as_deref())
            .set_opt("search", self.search.as_deref())
            .set_opt("active", self.active);
        self.list.write(&mut params);
        params
    }
}

impl ListQuery for TickersQuery {
    fn list_options(&mut self) -> &mut ListOptions {
        &mut self.list
    }
}

impl TickersQuery {
    pub fn with_ticker(mut self, comparison: Comparison, ticker: &str) -> Self {
        self.ticker.set(comparison, ticker);
        self
    }
    /// Ticker type code, see `list_ticker_types` (e.g. `CS`, `ETF`).
    pub fn with_type(mut self, ticker_type: &str) -> Self {
        self.ticker_type = Some(ticker_type.to_string());
        self
    }
    pub fn with_market(mut self, market: Market) -> Self {
        self.market = Some(market);
        self
    }
    /// Primary exchange MIC (e.g. `XNAS`).
    pub fn with_exchange(mut self, exchange: &str) -> Self {
        self.exchange = Some(exchange.to_string());
        self
    }
    pub fn with_cusip(mut self, cusip: &str) -> Self {
        self.cusip = Some(cusip.to_string());
        self
    }
    pub fn with_cik(mut self, cik: &str) -> Self {
        self.cik = Some(cik.to_string());
        self
    }
    /// Point-in-time date for the listing.
    pub fn with_date(mut self, date: impl ToString) -> Self {
        self.date = Some(date.to_string());
        self
    }
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }
}

/// Filters for ticker news.
#[derive(Clone, Debug, Default)]
pub struct NewsQuery {
    pub ticker: RangeFilter,
    pub published_utc: RangeFilter,
    pub list: ListOptions,
}

impl Query for NewsQuery {
    fn params(&self) -> Params {
        let mut params = Params::new();
        self.ticker.write("ticker", &mut params);
        self.published_utc.write("published_utc", &mut params);
        self.list.write(&mut params);
        params
    }
}

impl ListQuery for NewsQuery {
    fn list_options(&mut self) -> &mut ListOptions {
        &mut self.list
    }
}

impl NewsQuery {
    pub fn with_ticker(mut self, comparison: Comparison, ticker: &str) -> Self {
        self.ticker.set(comparison, ticker);
        self
    }
    pub fn with_published_utc(mut self, comparison: Comparison, published: impl ToString) -> Self {
        self.published_utc.set(comparison, published);
        self
    }
}

/// Filters for the trade/quote condition code listing.
#[derive(Clone, Debug, Default)]
pub struct ConditionsQuery {
    pub asset_class: Option<String>,
    pub data_type: Option<String>,
    pub id: Option<i64>,
    pub sip: Option<String>,
    pub list: ListOptions,
}

impl Query for ConditionsQuery {
    fn params(&self) -> Params {
        let mut params = Params::new();
        params
            .set_opt("asset_class", self.asset_class.as_deref())
            .set_opt("data_type", self.data_type.as_deref())
            .set_opt("id", self.id)
            .set_opt("sip", self.sip.as_deref());
        self.list.write(&mut params);
        params
    }
}

impl ListQuery for ConditionsQuery {
    fn list_options(&mut self) -> &mut ListOptions {
        &mut self.list
    }
}

impl ConditionsQuery {
    pub fn with_asset_class(mut self, asset_class: &str) -> Self {
        self.asset_class = Some(asset_class.to_string());
        self
    }
    /// `trade`, `bbo` or `nbbo`.
    pub fn with_data_type(mut self, data_type: &str) -> Self {
        self.data_type = Some(data_type.to_string());
        self
    }
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
    pub fn with_sip(mut self, sip: &str) -> Self {
        self.sip = Some(sip.to_string());
        self
    }
}

/// Filters for cash dividends.
#[derive(Clone, Debug, Default)]
pub struct DividendsQuery {
    pub ticker: RangeFilter,
    pub ex_dividend_date: RangeFilter,
    pub record_date: RangeFilter,
    pub declaration_date: RangeFilter,
    pub pay_date: RangeFilter,
    pub cash_amount: RangeFilter,
    /// Payments per year (0, 1, 2, 4, 12, 24, 52).
    pub frequency: Option<u32>,
    pub dividend_type: Option<String>,
    pub list: ListOptions,
}

impl Query for DividendsQuery {
    fn params(&self) -> Params {
        let mut params = Params::new();
        self.ticker.write("ticker", &mut params);
        self.ex_dividend_date.write("ex_dividend_date", &mut params);
        self.record_date.write("record_date", &mut params);
        self.declaration_date.write("declaration_date", &mut params);
        self.pay_date.write("pay_date", &mut params);
        self.cash_amount.write("cash_amount", &mut params);
        params
            .set_opt("frequency", self.frequency)
            .set_opt("dividend_type", self.dividend_type.as_deref());
        self.list.write(&mut params);
        params
    }
}

impl ListQuery for DividendsQuery {
    fn list_options(&mut self) -> &mut ListOptions {
        &mut self.list
    }
}

impl DividendsQuery {
    pub fn with_ticker(mut self, comparison: Comparison, ticker: &str) -> Self {
        self.ticker.set(comparison, ticker);
        self
    }
    pub fn with_ex_dividend_date(mut self, comparison: Comparison, date: impl ToString) -> Self {
        self.ex_dividend_date.set(comparison, date);
        self
    }
    pub fn with_record_date(mut self, comparison: Comparison, date: impl ToString) -> Self {
        self.record_date.set(comparison, date);
        self
    }
    pub fn with_declaration_date(mut self, comparison: Comparison, date: impl ToString) -> Self {
        self.declaration_date.set(comparison, date);
        self
    }
    pub fn with_pay_date(mut self, comparison: Comparison, date: impl ToString) -> Self {
        self.pay_date.set(comparison, date);
        self
    }
    pub fn with_cash_amount(mut self, comparison: Comparison, amount: f64) -> Self {
        self.cash_amount.set(comparison, amount);
        self
    }
    pub fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = Some(frequency);
        self
    }
    /// `CD` (regular), `SC` (special), `LT` or `ST` (capital gains).
    pub fn with_dividend_type(mut self, dividend_type: &str) -> Self {
        self.dividend_type = Some(dividend_type.to_string());
        self
    }
}

/// Filters for stock splits.
#[derive(Clone, Debug, Default)]
pub struct SplitsQuery {
    pub ticker: RangeFilter,
    pub execution_date: RangeFilter,
    pub reverse_split: Option<bool>,
    pub list: ListOptions,
}

impl Query for SplitsQuery {
    fn params(&self) -> Params {
        let mut params = Params::new();
        self.ticker.write("ticker", &mut params);
        self.execution_date.write("execution_date", &mut params);
        params.set_opt("reverse_split", self.reverse_split);
        self.list.write(&mut params);
        params
    }
}

impl ListQuery for SplitsQuery {
    fn list_options(&mut self) -> &mut ListOptions {
        &mut self.list
    }
}

impl SplitsQuery {
    pub fn with_ticker(mut self, comparison: Comparison, ticker: &str) -> Self {
        self.ticker.set(comparison, ticker);
        self
    }
    pub fn with_execution_date(mut self, comparison: Comparison, date: impl ToString) -> Self {
        self.execution_date.set(comparison, date);
        self
    }
    pub fn with_reverse_split(mut self, reverse_split: bool) -> Self {
        self.reverse_split = Some(reverse_split);
        self
    }
}

/// Filters for financial statements parsed from SEC filings.
#[derive(Clone, Debug, Default)]
pub struct FinancialsQuery {
    pub ticker: Option<String>,
    pub cik: Option<String>,
    pub company_name: Option<String>,
    pub sic: Option<String>,
    pub filing_date: RangeFilter,
    pub period_of_report_date: RangeFilter,
    /// `annual`, `quarterly` or `ttm`.
    pub timeframe: Option<String>,
    pub include_sources: Option<bool>,
    pub list: ListOptions,
}

impl Query for FinancialsQuery {
    fn params(&self) -> Params {
        let mut params = Params::new();
        params
            .set_opt("ticker", self.ticker.as_deref())
            .set_opt("cik", self.cik.as_deref())
            .set_opt("company_name", self.company_name.as_deref())
            .set_opt("sic", self.sic.as_deref());
        self.filing_date.write("filing_date", &mut params);
        self.period_of_report_date
            .write("period_of_report_date", &mut params);
        params
            .set_opt("timeframe", self.timeframe.as_deref())
            .set_opt("include_sources", self.include_sources);
        self.list.write(&mut params);
        params
    }
}

impl ListQuery for FinancialsQuery {
    fn list_options(&mut self) -> &mut ListOptions {
        &mut self.list
    }
}

impl FinancialsQuery {
    pub fn with_ticker(mut self, ticker: &str) -> Self {
        self.ticker = Some(ticker.to_string());
        self
    }
    pub fn with_cik(mut self, cik: &str) -> Self {
        self.cik = Some(cik.to_string());
        self
    }
    pub fn with_company_name(mut self, company_name: &str) -> Self {
        self.company_name = Some(company_name.to_string());
        self
    }
    pub fn with_sic(mut self, sic: &str) -> Self {
        self.sic = Some(sic.to_string());
        self
    }
    pub fn with_filing_date(mut self, comparison: Comparison, date: impl ToString) -> Self {
        self.filing_date.set(comparison, date);
        self
    }
    pub fn with_period_of_report_date(mut self, comparison: Comparison, date: impl ToString) -> Self {
        self.period_of_report_date.set(comparison, date);
        self
    }
    pub fn with_timeframe(mut self, timeframe: &str) -> Self {
        self.timeframe = Some(timeframe.to_string());
        self
    }
    pub fn with_include_sources(mut self, include_sources: bool) -> Self {
        self.include_sources = Some(include_sources);
        self
    }
}

/// Filters for the options contract reference listing.
#[derive(Clone, Debug, Default)]
pub struct OptionsContractsQuery {
    pub underlying_ticker: RangeFilter,
    pub contract_type: Option<String>,
    pub expiration_date: RangeFilter,
    pub as_of: Option<String>,
    pub strike_price: RangeFilter,
    pub expired: Option<bool>,
    pub list: ListOptions,
}

impl Query for OptionsContractsQuery {
    fn params(&self) -> Params {
        let mut params = Params::new();
        self.underlying_ticker.write("underlying_ticker", &mut params);
        params.set_opt("contract_type", self.contract_type.as_deref());
        self.expiration_date.write("expiration_date", &mut params);
        params.set_opt("as_of", self.as_of.as_deref());
        self.strike_price.write("strike_price", &mut params);
        params.set_opt("expired", self.expired);
        self.list.write(&mut params);
        params
    }
}

impl ListQuery for OptionsContractsQuery {
    fn list_options(&mut self) -> &mut ListOptions {
        &mut self.list
    }
}

impl OptionsContractsQuery {
    pub fn with_underlying_ticker(mut self, comparison: Comparison, ticker: &str) -> Self {
        self.underlying_ticker.set(comparison, ticker);
        self
    }
    /// `call` or `put`.
    pub fn with_contract_type(mut self, contract_type: &str) -> Self {
        self.contract_type = Some(contract_type.to_string());
        self
    }
    pub fn with_expiration_date(mut self, comparison: Comparison, date: impl ToString) -> Self {
        self.expiration_date.set(comparison, date);
        self
    }
    pub fn with_as_of(mut self, date: impl ToString) -> Self {
        self.as_of = Some(date.to_string());
        self
    }
    pub fn with_strike_price(mut self, comparison: Comparison, strike: f64) -> Self {
        self.strike_price.set(comparison, strike);
        self
    }
    pub fn with_expired(mut self, expired: bool) -> Self {
        self.expired = Some(expired);
        self
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::query::{
        Comparison, DividendsQuery, ListQuery, Market, Order, Query, SplitsQuery, TickersQuery,
    };

    #[test]
    fn test_tickers_query() {
        let url = Url::parse("https://example.com/v3/reference/tickers").unwrap();

        insta::assert_snapshot!(TickersQuery::default()
            .with_market(Market::Crypto)
            .with_search("bitcoin")
            .with_active(true)
            .with_ticker(Comparison::Gte, "X:A")
            .with_limit(100)
            .add_to_url(&url)
            .to_string(), @"https://example.com/v3/reference/tickers?active=true&limit=100&market=crypto&search=bitcoin&ticker.gte=X%3AA");
    }

    #[test]
    fn test_corporate_action_queries() {
        let url = Url::parse("https://example.com").unwrap();

        insta::assert_snapshot!(DividendsQuery::default()
            .with_ticker(Comparison::Eq, "AAPL")
            .with_ex_dividend_date(Comparison::Gte, "2024-01-01")
            .with_frequency(4)
            .with_order(Order::Desc)
            .add_to_url(&url)
            .to_string(), @"https://example.com/?ex_dividend_date.gte=2024-01-01&frequency=4&order=desc&ticker=AAPL");

        insta::assert_snapshot!(SplitsQuery::default()
            .with_reverse_split(false)
            .with_execution_date(Comparison::Lte, "2020-12-31")
            .add_to_url(&url)
            .to_string(), @"https://example.com/?execution_date.lte=2020-12-31&reverse_split=false");
    }
}
