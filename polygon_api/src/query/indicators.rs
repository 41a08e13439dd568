use super::{
    aggs::Timespan,
    common::{Comparison, Order, Params, Query, RangeFilter},
};

/// Price series an indicator is computed over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesType {
    Open,
    High,
    Low,
    Close,
}
impl std::fmt::Display for SeriesType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SeriesType::Open => "open",
                SeriesType::High => "high",
                SeriesType::Low => "low",
                SeriesType::Close => "close",
            }
        )
    }
}

/// Parameters shared by every indicator endpoint.
#[derive(Clone, Debug, Default)]
struct IndicatorCommon {
    timestamp: RangeFilter,
    timespan: Option<Timespan>,
    adjusted: Option<bool>,
    series_type: Option<SeriesType>,
    expand_underlying: Option<bool>,
    order: Option<Order>,
    limit: Option<u32>,
}

impl IndicatorCommon {
    fn write(&self, params: &mut Params) {
        self.timestamp.write("timestamp", params);
        params
            .set_opt("timespan", self.timespan)
            .set_opt("adjusted", self.adjusted)
            .set_opt("series_type", self.series_type)
            .set_opt("expand_underlying", self.expand_underlying)
            .set_opt("order", self.order)
            .set_opt("limit", self.limit);
    }
}

macro_rules! indicator_common_builders {
    ($ty:ty) => {
        impl $ty {
            pub fn with_timestamp(mut self, comparison: Comparison, timestamp: impl ToString) -> Self {
                self.common.timestamp.set(comparison, timestamp);
                self
            }
            /// Size of the aggregate bars the indicator is computed over.
            pub fn with_timespan(mut self, timespan: Timespan) -> Self {
                self.common.timespan = Some(timespan);
                self
            }
            pub fn with_adjusted(mut self, adjusted: bool) -> Self {
                self.common.adjusted = Some(adjusted);
                self
            }
            pub fn with_series_type(mut self, series_type: SeriesType) -> Self {
                self.common.series_type = Some(series_type);
                self
            }
            /// Also return the aggregates the values were computed from.
            pub fn with_expand_underlying(mut self, expand: bool) -> Self {
                self.common.expand_underlying = Some(expand);
                self
            }
            pub fn with_order(mut self, order: Order) -> Self {
                self.common.order = Some(order);
                self
            }
            pub fn with_limit(mut self, limit: u32) -> Self {
                self.common.limit = Some(limit);
                self
            }
        }
    };
}

/// Parameters for the single-window indicators (SMA, EMA, RSI).
#[derive(Clone, Debug, Default)]
pub struct IndicatorQuery {
    common: IndicatorCommon,
    pub window: Option<u32>,
}

impl Query for IndicatorQuery {
    fn params(&self) -> Params {
        let mut params = Params::new();
        self.common.write(&mut params);
        params.set_opt("window", self.window);
        params
    }
}

indicator_common_builders!(IndicatorQuery);

impl IndicatorQuery {
    pub fn with_window(mut self, window: u32) -> Self {
        self.window = Some(window);
        self
    }
}

/// Parameters for MACD.
#[derive(Clone, Debug, Default)]
pub struct MacdQuery {
    common: IndicatorCommon,
    pub short_window: Option<u32>,
    pub long_window: Option<u32>,
    pub signal_window: Option<u32>,
}

impl Query for MacdQuery {
    fn params(&self) -> Params {
        let mut params = Params::new();
        self.common.write(&mut params);
        params
            .set_opt("short_window", self.short_window)
            .set_opt("long_window", self.long_window)
            .set_opt("signal_window", self.signal_window);
        params
    }
}

indicator_common_builders!(MacdQuery);

impl MacdQuery {
    pub fn with_short_window(mut self, window: u32) -> Self {
        self.short_window = Some(window);
        self
    }
    pub fn with_long_window(mut self, window: u32) -> Self {
        self.long_window = Some(window);
        self
    }
    pub fn with_signal_window(mut self, window: u32) -> Self {
        self.signal_window = Some(window);
        self
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::query::{Comparison, IndicatorQuery, MacdQuery, Query, SeriesType, Timespan};

    #[test]
    fn test_indicator_queries() {
        let url = Url::parse("https://example.com/v1/indicators/sma/AAPL").unwrap();

        insta::assert_snapshot!(IndicatorQuery::default()
            .with_timespan(Timespan::Day)
            .with_window(50)
            .with_series_type(SeriesType::Close)
            .with_timestamp(Comparison::Gte, "2025-01-01")
            .add_to_url(&url)
            .to_string(), @"https://example.com/v1/indicators/sma/AAPL?series_type=close&timespan=day&timestamp.gte=2025-01-01&window=50");

        insta::assert_snapshot!(MacdQuery::default()
            .with_short_window(12)
            .with_long_window(26)
            .with_signal_window(9)
            .with_expand_underlying(true)
            .add_to_url(&url)
            .to_string(), @"https://example.com/v1/indicators/sma/AAPL?expand_underlying=true&long_window=26&short_window=12&signal_window=9");
    }
}
