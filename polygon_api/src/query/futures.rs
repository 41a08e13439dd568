use super::common::{Comparison, ListOptions, ListQuery, Params, Query, RangeFilter};

/// Parameters for futures contract bars.
#[derive(Clone, Debug, Default)]
pub struct FuturesAggsQuery {
    /// Bar size such as `1min`, `1hour` or `1session`.
    pub resolution: Option<String>,
    pub window_start: RangeFilter,
    pub list: ListOptions,
}

impl Query for FuturesAggsQuery {
    fn params(&self) -> Params {
        let mut params = Params::new();
        params.set_opt("resolution", self.resolution.as_deref());
        self.window_start.write("window_start", &mut params);
        self.list.write(&mut params);
        params
    }
}

impl ListQuery for FuturesAggsQuery {
    fn list_options(&mut self) -> &mut ListOptions {
        &mut self.list
    }
}

impl FuturesAggsQuery {
    pub fn with_resolution(mut self, resolution: &str) -> Self {
        self.resolution = Some(resolution.to_string());
        self
    }
    pub fn with_window_start(mut self, comparison: Comparison, start: impl ToString) -> Self {
        self.window_start.set(comparison, start);
        self
    }
}

/// Filters for the futures contract listing.
#[derive(Clone, Debug, Default)]
pub struct FuturesContractsQuery {
    pub product_code: Option<String>,
    pub first_trade_date: RangeFilter,
    pub last_trade_date: RangeFilter,
    pub as_of: Option<String>,
    pub active: Option<bool>,
    /// `single` or `combo`.
    pub contract_type: Option<String>,
    pub list: ListOptions,
}

impl Query for FuturesContractsQuery {
    fn params(&self) -> Params {
        let mut params = Params::new();
        params.set_opt("product_code", self.product_code.as_deref());
        self.first_trade_date.write("first_trade_date", &mut params);
        self.last_trade_date.write("last_trade_date", &mut params);
        params
            .set_opt("as_of", self.as_of.as_deref())
            .set_opt("active", self.active)
            .set_opt("type", self.contract_type.as_deref());
        self.list.write(&mut params);
        params
    }
}

impl ListQuery for FuturesContractsQuery {
    fn list_options(&mut self) -> &mut ListOptions {
        &mut self.list
    }
}

impl FuturesContractsQuery {
    pub fn with_product_code(mut self, product_code: &str) -> Self {
        self.product_code = Some(product_code.to_string());
        self
    }
    pub fn with_first_trade_date(mut self, comparison: Comparison, date: impl ToString) -> Self {
        self.first_trade_date.set(comparison, date);
        self
    }
    pub fn with_last_trade_date(mut self, comparison: Comparison, date: impl ToString) -> Self {
        self.last_trade_date.set(comparison, date);
        self
    }
    pub fn with_as_of(mut self, date: impl ToString) -> Self {
        self.as_of = Some(date.to_string());
        self
    }
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }
    pub fn with_type(mut self, contract_type: &str) -> Self {
        self.contract_type = Some(contract_type.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::query::{Comparison, FuturesAggsQuery, FuturesContractsQuery, ListQuery, Query};

    #[test]
    fn test_futures_queries() {
        let url = Url::parse("https://example.com/futures").unwrap();

        insta::assert_snapshot!(FuturesAggsQuery::default()
            .with_resolution("1min")
            .with_window_start(Comparison::Gte, "2025-01-06")
            .with_limit(50)
            .add_to_url(&url)
            .to_string(), @"https://example.com/futures?limit=50&resolution=1min&window_start.gte=2025-01-06");

        insta::assert_snapshot!(FuturesContractsQuery::default()
            .with_product_code("ES")
            .with_active(true)
            .with_type("single")
            .add_to_url(&url)
            .to_string(), @"https://example.com/futures?active=true&product_code=ES&type=single");
    }
}
