mod common;
pub use self::common::{
    compose_url, Comparison, ListOptions, ListQuery, Order, Params, Query, RangeFilter,
};

mod aggs;
pub use self::aggs::{AggsQuery, GroupedDailyQuery, Timespan};

mod ticks;
pub use self::ticks::{QuotesQuery, TickQuery, TradesQuery};

mod reference;
pub use self::reference::{
    ConditionsQuery, DividendsQuery, FinancialsQuery, Market, NewsQuery, OptionsContractsQuery,
    SplitsQuery, TickersQuery,
};

mod snapshot;
pub use self::snapshot::{
    ContractType, Direction, IndicesSnapshotQuery, Locale, OptionsChainQuery, SnapshotAllQuery,
    UniversalSnapshotQuery,
};

mod indicators;
pub use self::indicators::{IndicatorQuery, MacdQuery, SeriesType};

mod futures;
pub use self::futures::{FuturesAggsQuery, FuturesContractsQuery};
