//! Endpoint methods. Each one fills in its path, forwards its query and
//! names its response type; [`Client::perform`] does the rest.

use std::fmt::Display;

use crate::{
    query::{
        AggsQuery, ConditionsQuery, Direction, DividendsQuery, FinancialsQuery, FuturesAggsQuery,
        FuturesContractsQuery, GroupedDailyQuery, IndicatorQuery, IndicesSnapshotQuery, Locale,
        MacdQuery, Market, NewsQuery, OptionsChainQuery, OptionsContractsQuery, Params,
        QuotesQuery, SnapshotAllQuery, SplitsQuery, TickersQuery, Timespan, TradesQuery,
        UniversalSnapshotQuery,
    },
    types::{
        AggsResponse, Condition, DailyOpenCloseResponse, Dividend, Exchange, Financial,
        FuturesAgg, FuturesContract, IndexSnapshot, IndicatorResponse, IndicatorValue,
        LastCryptoTradeResponse, LastQuote, LastTrade, ListResponse, MacdValue, MarketHoliday,
        MarketStatus, NewsArticle, OptionContractSnapshot, OptionsContract, Quote, Response,
        SnapshotsResponse, Split, Ticker, TickerDetails, TickerSnapshotResponse, TickerType,
        Trade, UniversalSnapshot,
    },
    Client, Error,
};

fn adjusted_param(adjusted: Option<bool>) -> Params {
    let mut params = Params::new();
    params.set_opt("adjusted", adjusted);
    params
}

// -- Aggregates --

impl Client {
    /// Fetches bars for `ticker` between `from` and `to` (dates or Unix
    /// milliseconds), `multiplier` × `timespan` wide.
    pub async fn get_aggs(
        &self,
        ticker: &str,
        multiplier: u32,
        timespan: Timespan,
        from: impl Display,
        to: impl Display,
        query: &AggsQuery,
    ) -> Result<AggsResponse, Error> {
        self.perform(
            &format!(
                "/v2/aggs/ticker/{}/range/{}/{}/{}/{}",
                ticker, multiplier, timespan, from, to
            ),
            Some(query),
        )
        .await
    }

    /// Fetches the daily bar of every ticker in a market for one date.
    pub async fn get_grouped_daily(
        &self,
        locale: Locale,
        market: Market,
        date: impl Display,
        query: &GroupedDailyQuery,
    ) -> Result<AggsResponse, Error> {
        self.perform(
            &format!("/v2/aggs/grouped/locale/{}/market/{}/{}", locale, market, date),
            Some(query),
        )
        .await
    }

    /// Fetches open, close and extended-hours prices for one day.
    pub async fn get_daily_open_close(
        &self,
        ticker: &str,
        date: impl Display,
        adjusted: Option<bool>,
    ) -> Result<DailyOpenCloseResponse, Error> {
        self.perform(
            &format!("/v1/open-close/{}/{}", ticker, date),
            Some(&adjusted_param(adjusted)),
        )
        .await
    }

    /// Fetches the previous trading day's bar.
    pub async fn get_previous_close(
        &self,
        ticker: &str,
        adjusted: Option<bool>,
    ) -> Result<AggsResponse, Error> {
        self.perform(
            &format!("/v2/aggs/ticker/{}/prev", ticker),
            Some(&adjusted_param(adjusted)),
        )
        .await
    }
}

// -- Trades and quotes --

impl Client {
    /// Fetches one page of trades for a stock, option or crypto ticker.
    pub async fn list_trades(
        &self,
        ticker: &str,
        query: &TradesQuery,
    ) -> Result<ListResponse<Trade>, Error> {
        self.perform(&format!("/v3/trades/{}", ticker), Some(query))
            .await
    }

    pub async fn get_last_trade(&self, ticker: &str) -> Result<Response<LastTrade>, Error> {
        self.perform::<_, Params>(&format!("/v2/last/trade/{}", ticker), None)
            .await
    }

    /// Last trade of a crypto pair, e.g. `("BTC", "USD")`.
    pub async fn get_last_crypto_trade(
        &self,
        from: &str,
        to: &str,
    ) -> Result<LastCryptoTradeResponse, Error> {
        self.perform::<_, Params>(&format!("/v1/last/crypto/{}/{}", from, to), None)
            .await
    }

    /// Fetches one page of NBBO quotes.
    pub async fn list_quotes(
        &self,
        ticker: &str,
        query: &QuotesQuery,
    ) -> Result<ListResponse<Quote>, Error> {
        self.perform(&format!("/v3/quotes/{}", ticker), Some(query))
            .await
    }

    pub async fn get_last_quote(&self, ticker: &str) -> Result<Response<LastQuote>, Error> {
        self.perform::<_, Params>(&format!("/v2/last/nbbo/{}", ticker), None)
            .await
    }
}

// -- Snapshots --

impl Client {
    pub async fn get_snapshot_ticker(
        &self,
        locale: Locale,
        market: Market,
        ticker: &str,
    ) -> Result<TickerSnapshotResponse, Error> {
        self.perform::<_, Params>(
            &format!(
                "/v2/snapshot/locale/{}/markets/{}/tickers/{}",
                locale, market, ticker
            ),
            None,
        )
        .await
    }

    /// Snapshot of every ticker in a market, or of `query.tickers` only.
    pub async fn get_snapshot_all(
        &self,
        locale: Locale,
        market: Market,
        query: &SnapshotAllQuery,
    ) -> Result<SnapshotsResponse, Error> {
        self.perform(
            &format!("/v2/snapshot/locale/{}/markets/{}/tickers", locale, market),
            Some(query),
        )
        .await
    }

    /// Top 20 gainers or losers of the day.
    pub async fn get_snapshot_direction(
        &self,
        locale: Locale,
        market: Market,
        direction: Direction,
        include_otc: Option<bool>,
    ) -> Result<SnapshotsResponse, Error> {
        let mut params = Params::new();
        params.set_opt("include_otc", include_otc);
        self.perform(
            &format!("/v2/snapshot/locale/{}/markets/{}/{}", locale, market, direction),
            Some(&params),
        )
        .await
    }

    /// Snapshots across asset classes in one call.
    pub async fn list_universal_snapshots(
        &self,
        query: &UniversalSnapshotQuery,
    ) -> Result<ListResponse<UniversalSnapshot>, Error> {
        self.perform("/v3/snapshot", Some(query)).await
    }

    /// Snapshot of every contract on `underlying`.
    pub async fn list_options_chain(
        &self,
        underlying: &str,
        query: &OptionsChainQuery,
    ) -> Result<ListResponse<OptionContractSnapshot>, Error> {
        self.perform(&format!("/v3/snapshot/options/{}", underlying), Some(query))
            .await
    }

    pub async fn get_option_contract_snapshot(
        &self,
        underlying: &str,
        contract: &str,
    ) -> Result<Response<OptionContractSnapshot>, Error> {
        self.perform::<_, Params>(
            &format!("/v3/snapshot/options/{}/{}", underlying, contract),
            None,
        )
        .await
    }

    pub async fn list_indices_snapshot(
        &self,
        query: &IndicesSnapshotQuery,
    ) -> Result<ListResponse<IndexSnapshot>, Error> {
        self.perform("/v3/snapshot/indices", Some(query)).await
    }
}

// -- Reference data --

impl Client {
    pub async fn list_tickers(&self, query: &TickersQuery) -> Result<ListResponse<Ticker>, Error> {
        self.perform("/v3/reference/tickers", Some(query)).await
    }

    /// Fetches the full record for one ticker, optionally as of `date`.
    pub async fn get_ticker_details(
        &self,
        ticker: &str,
        date: Option<&str>,
    ) -> Result<Response<TickerDetails>, Error> {
        let mut params = Params::new();
        params.set_opt("date", date);
        self.perform(&format!("/v3/reference/tickers/{}", ticker), Some(&params))
            .await
    }

    pub async fn list_ticker_types(
        &self,
        asset_class: Option<&str>,
        locale: Option<Locale>,
    ) -> Result<ListResponse<TickerType>, Error> {
        let mut params = Params::new();
        params
            .set_opt("asset_class", asset_class)
            .set_opt("locale", locale);
        self.perform("/v3/reference/tickers/types", Some(&params))
            .await
    }

    pub async fn list_ticker_news(
        &self,
        query: &NewsQuery,
    ) -> Result<ListResponse<NewsArticle>, Error> {
        self.perform("/v2/reference/news", Some(query)).await
    }

    pub async fn list_exchanges(
        &self,
        asset_class: Option<&str>,
        locale: Option<Locale>,
    ) -> Result<ListResponse<Exchange>, Error> {
        let mut params = Params::new();
        params
            .set_opt("asset_class", asset_class)
            .set_opt("locale", locale);
        self.perform("/v3/reference/exchanges", Some(&params))
            .await
    }

    pub async fn list_conditions(
        &self,
        query: &ConditionsQuery,
    ) -> Result<ListResponse<Condition>, Error> {
        self.perform("/v3/reference/conditions", Some(query))
            .await
    }

    pub async fn get_market_status(&self) -> Result<MarketStatus, Error> {
        self.perform::<_, Params>("/v1/marketstatus/now", None)
            .await
    }

    /// Upcoming holidays and early closes. The body is a bare JSON array.
    pub async fn get_market_holidays(&self) -> Result<Vec<MarketHoliday>, Error> {
        self.perform::<_, Params>("/v1/marketstatus/upcoming", None)
            .await
    }

    pub async fn list_dividends(
        &self,
        query: &DividendsQuery,
    ) -> Result<ListResponse<Dividend>, Error> {
        self.perform("/v3/reference/dividends", Some(query)).await
    }

    pub async fn list_splits(&self, query: &SplitsQuery) -> Result<ListResponse<Split>, Error> {
        self.perform("/v3/reference/splits", Some(query)).await
    }

    /// Financial statements parsed from SEC filings.
    pub async fn list_financials(
        &self,
        query: &FinancialsQuery,
    ) -> Result<ListResponse<Financial>, Error> {
        self.perform("/vX/reference/financials", Some(query))
            .await
    }

    pub async fn list_options_contracts(
        &self,
        query: &OptionsContractsQuery,
    ) -> Result<ListResponse<OptionsContract>, Error> {
        self.perform("/v3/reference/options/contracts", Some(query))
            .await
    }

    pub async fn get_options_contract(
        &self,
        options_ticker: &str,
        as_of: Option<&str>,
    ) -> Result<Response<OptionsContract>, Error> {
        let mut params = Params::new();
        params.set_opt("as_of", as_of);
        self.perform(
            &format!("/v3/reference/options/contracts/{}", options_ticker),
            Some(&params),
        )
        .await
    }
}

// -- Technical indicators --

impl Client {
    pub async fn get_sma(
        &self,
        ticker: &str,
        query: &IndicatorQuery,
    ) -> Result<IndicatorResponse<IndicatorValue>, Error> {
        self.perform(&format!("/v1/indicators/sma/{}", ticker), Some(query))
            .await
    }

    pub async fn get_ema(
        &self,
        ticker: &str,
        query: &IndicatorQuery,
    ) -> Result<IndicatorResponse<IndicatorValue>, Error> {
        self.perform(&format!("/v1/indicators/ema/{}", ticker), Some(query))
            .await
    }

    pub async fn get_rsi(
        &self,
        ticker: &str,
        query: &IndicatorQuery,
    ) -> Result<IndicatorResponse<IndicatorValue>, Error> {
        self.perform(&format!("/v1/indicators/rsi/{}", ticker), Some(query))
            .await
    }

    pub async fn get_macd(
        &self,
        ticker: &str,
        query: &MacdQuery,
    ) -> Result<IndicatorResponse<MacdValue>, Error> {
        self.perform(&format!("/v1/indicators/macd/{}", ticker), Some(query))
            .await
    }
}

// -- Futures --

impl Client {
    pub async fn list_futures_aggs(
        &self,
        ticker: &str,
        query: &FuturesAggsQuery,
    ) -> Result<ListResponse<FuturesAgg>, Error> {
        self.perform(&format!("/futures/vX/aggs/{}", ticker), Some(query))
            .await
    }

    pub async fn list_futures_contracts(
        &self,
        query: &FuturesContractsQuery,
    ) -> Result<ListResponse<FuturesContract>, Error> {
        self.perform("/futures/vX/contracts", Some(query)).await
    }
}
