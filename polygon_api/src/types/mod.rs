mod meta;
pub use self::meta::{ListResponse, Response};

mod aggs;
pub use self::aggs::{Agg, AggsResponse, DailyOpenCloseResponse};

mod ticks;
pub use self::ticks::{
    CryptoTrade, LastCryptoTradeResponse, LastQuote, LastTrade, Quote, Trade,
};

mod snapshot;
pub use self::snapshot::{
    DaySnapshot, GreeksSnapshot, IndexSnapshot, LastQuoteSnapshot, LastTradeSnapshot,
    MinuteSnapshot, OptionContractSnapshot, OptionDetails, SessionSnapshot, SnapshotsResponse,
    TickerSnapshot, TickerSnapshotResponse, UnderlyingAsset, UniversalLastQuote,
    UniversalLastTrade, UniversalSnapshot,
};

mod reference;
pub use self::reference::{
    Address, Branding, Condition, Dividend, Exchange, Financial, FinancialDataPoint,
    MarketHoliday, MarketStatus, NewsArticle, OptionsContract, Publisher, Split, Ticker,
    TickerDetails, TickerType,
};

mod indicators;
pub use self::indicators::{
    IndicatorResponse, IndicatorResults, IndicatorUnderlying, IndicatorValue, MacdValue,
};

mod futures;
pub use self::futures::{FuturesAgg, FuturesContract};
