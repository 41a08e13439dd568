use super::common::{Comparison, ListOptions, ListQuery, Params, Query, RangeFilter};

/// Optional parameters for tick-level trade and quote listings.
///
/// `timestamp` accepts a date (`2025-01-06`) or a nanosecond timestamp.
#[derive(Clone, Debug, Default)]
pub struct TickQuery {
    pub timestamp: RangeFilter,
    pub list: ListOptions,
}

pub type TradesQuery = TickQuery;
pub type QuotesQuery = TickQuery;

impl Query for TickQuery {
    fn params(&self) -> Params {
        let mut params = Params::new();
        self.timestamp.write("timestamp", &mut params);
        self.list.write(&mut params);
        params
    }
}

impl ListQuery for TickQuery {
    fn list_options(&mut self) -> &mut ListOptions {
        &mut self.list
    }
}

impl TickQuery {
    pub fn with_timestamp(mut self, comparison: Comparison, timestamp: impl ToString) -> Self {
        self.timestamp.set(comparison, timestamp);
        self
    }
}
