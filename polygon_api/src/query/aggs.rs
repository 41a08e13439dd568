use std::str::FromStr;

use super::common::{Order, Params, Query};

/// Bar width unit for aggregate requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timespan {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}
impl std::fmt::Display for Timespan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Timespan::Second => "second",
                Timespan::Minute => "minute",
                Timespan::Hour => "hour",
                Timespan::Day => "day",
                Timespan::Week => "week",
                Timespan::Month => "month",
                Timespan::Quarter => "quarter",
                Timespan::Year => "year",
            }
        )
    }
}
impl FromStr for Timespan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "second" => Ok(Timespan::Second),
            "minute" => Ok(Timespan::Minute),
            "hour" => Ok(Timespan::Hour),
            "day" => Ok(Timespan::Day),
            "week" => Ok(Timespan::Week),
            "month" => Ok(Timespan::Month),
            "quarter" => Ok(Timespan::Quarter),
            "year" => Ok(Timespan::Year),
            other => Err(format!("unknown timespan '{}'", other)),
        }
    }
}

/// Optional parameters for custom-range bars.
#[derive(Clone, Debug, Default)]
pub struct AggsQuery {
    pub adjusted: Option<bool>,
    pub sort: Option<Order>,
    pub limit: Option<u32>,
}

impl Query for AggsQuery {
    fn params(&self) -> Params {
        let mut params = Params::new();
        params
            .set_opt("adjusted", self.adjusted)
            .set_opt("sort", self.sort)
            .set_opt("limit", self.limit);
        params
    }
}

impl AggsQuery {
    /// Whether results are adjusted for splits. The API default is `true`.
    pub fn with_adjusted(mut self, adjusted: bool) -> Self {
        self.adjusted = Some(adjusted);
        self
    }
    /// Sorts bars by timestamp.
    pub fn with_sort(mut self, sort: Order) -> Self {
        self.sort = Some(sort);
        self
    }
    /// Caps the number of base aggregates queried (max 50000).
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Optional parameters for the grouped daily bars of a whole market.
#[derive(Clone, Debug, Default)]
pub struct GroupedDailyQuery {
    pub adjusted: Option<bool>,
    pub include_otc: Option<bool>,
}

impl Query for GroupedDailyQuery {
    fn params(&self) -> Params {
        let mut params = Params::new();
        params
            .set_opt("adjusted", self.adjusted)
            .set_opt("include_otc", self.include_otc);
        params
    }
}

impl GroupedDailyQuery {
    pub fn with_adjusted(mut self, adjusted: bool) -> Self {
        self.adjusted = Some(adjusted);
        self
    }
    pub fn with_include_otc(mut self, include_otc: bool) -> Self {
        self.include_otc = Some(include_otc);
        self
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::query::{AggsQuery, GroupedDailyQuery, Order, Query, Timespan};

    #[test]
    fn test_aggs_query() {
        let url = Url::parse("https://example.com/v2/aggs").unwrap();

        insta::assert_snapshot!(AggsQuery::default().add_to_url(&url).to_string(), @"https://example.com/v2/aggs");

        insta::assert_snapshot!(AggsQuery::default()
            .with_adjusted(true)
            .with_sort(Order::Asc)
            .with_limit(2)
            .add_to_url(&url)
            .to_string(), @"https://example.com/v2/aggs?adjusted=true&limit=2&sort=asc");

        insta::assert_snapshot!(GroupedDailyQuery::default()
            .with_adjusted(false)
            .with_include_otc(true)
            .add_to_url(&url)
            .to_string(), @"https://example.com/v2/aggs?adjusted=false&include_otc=true");
    }

    #[test]
    fn test_timespan_round_trip_names() {
        for name in ["second", "minute", "hour", "day", "week", "month", "quarter", "year"] {
            let ts: Timespan = name.parse().unwrap();
            assert_eq!(ts.to_string(), name);
        }
        assert!("fortnight".parse::<Timespan>().is_err());
    }
}
