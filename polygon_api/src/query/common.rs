//! Shared query infrastructure: the flat [`Params`] set, the [`Query`] trait,
//! range filters and the list options every paginated endpoint accepts.

use std::collections::BTreeMap;
use std::fmt;

use url::Url;

/// Flat set of query parameters, keyed by the literal wire name.
///
/// Keys are used exactly as given, so suffixed keys such as `timestamp.gte`
/// or `ticker.any_of` reach the wire unchanged. Entries whose value is the
/// empty string are never sent; there is no way to send an explicit empty
/// filter. Iteration (and therefore wire) order is sorted by key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params {
    entries: BTreeMap<String, String>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.entries.insert(key.into(), value.to_string());
        self
    }

    /// Sets `key` only when `value` is present.
    pub fn set_opt<V: ToString>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.set(key, value);
        }
        self
    }

    /// Sets `key` to a comma-joined list, skipping empty lists.
    pub fn set_list<V: ToString>(&mut self, key: impl Into<String>, values: &[V]) -> &mut Self {
        if !values.is_empty() {
            let joined = values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(",");
            self.set(key, joined);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Merges every entry of `other` into `self`.
    pub fn extend(&mut self, other: Params) -> &mut Self {
        self.entries.extend(other.entries);
        self
    }

    /// Entries that will actually be sent: those with a non-empty value.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether nothing would be sent.
    pub fn is_empty(&self) -> bool {
        self.pairs().next().is_none()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.set(k, v);
        }
        params
    }
}

impl<K: Into<String>, V: ToString, const N: usize> From<[(K, V); N]> for Params {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// Trait implemented by all query builders.
pub trait Query {
    /// The flat parameter set this query sends.
    fn params(&self) -> Params;

    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url {
        append_params(url, &self.params())
    }
}

impl Query for Params {
    fn params(&self) -> Params {
        self.clone()
    }
}

/// Builds the request target for `path` under `base_url`.
///
/// `path` must already have its identifiers substituted; it is joined to the
/// base as-is. With no query, or a query whose values are all empty, the URL
/// carries no query string at all.
pub fn compose_url<Q: Query + ?Sized>(
    base_url: &str,
    path: &str,
    query: Option<&Q>,
) -> Result<Url, url::ParseError> {
    let url = Url::parse(&format!("{}{}", base_url.trim_end_matches('/'), path))?;
    Ok(match query {
        Some(query) => query.add_to_url(&url),
        None => url,
    })
}

fn append_params(url: &Url, params: &Params) -> Url {
    let mut url = url.clone();
    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params.pairs() {
            pairs.append_pair(key, value);
        }
    }
    url
}

/// Comparison applied to a range-filterable parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Comparison {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Comparison {
    /// The wire key for `base` under this comparison, e.g. `timestamp.gte`.
    pub fn key(self, base: &str) -> String {
        match self {
            Comparison::Eq => base.to_string(),
            Comparison::Gt => format!("{}.gt", base),
            Comparison::Gte => format!("{}.gte", base),
            Comparison::Lt => format!("{}.lt", base),
            Comparison::Lte => format!("{}.lte", base),
        }
    }
}

/// A parameter filtered by up to one value per [`Comparison`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RangeFilter {
    bounds: BTreeMap<Comparison, String>,
}

impl RangeFilter {
    pub fn set(&mut self, comparison: Comparison, value: impl ToString) {
        self.bounds.insert(comparison, value.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Writes one entry per bound under `base`.
    pub fn write(&self, base: &str, params: &mut Params) {
        for (comparison, value) in self.bounds.iter() {
            params.set(comparison.key(base), value);
        }
    }
}

/// Sort order for list results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        })
    }
}

impl std::str::FromStr for Order {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Order::Asc),
            "desc" => Ok(Order::Desc),
            other => Err(format!("unknown order '{}', expected asc or desc", other)),
        }
    }
}

/// Options shared by the paginated list endpoints: `sort`, `order`, `limit`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Field to sort by. Valid values differ per endpoint.
    pub sort: Option<String>,
    pub order: Option<Order>,
    /// Page size. `None` uses the API default.
    pub limit: Option<u32>,
}

impl ListOptions {
    pub fn write(&self, params: &mut Params) {
        params
            .set_opt("sort", self.sort.as_deref())
            .set_opt("order", self.order)
            .set_opt("limit", self.limit);
    }
}

/// Builder methods for queries that carry [`ListOptions`].
pub trait ListQuery: Query {
    /// Returns a mutable reference to the list options.
    fn list_options(&mut self) -> &mut ListOptions;

    fn with_sort(mut self, sort: &str) -> Self
    where
        Self: Sized,
    {
        self.list_options().sort = Some(sort.to_string());
        self
    }

    fn with_order(mut self, order: Order) -> Self
    where
        Self: Sized,
    {
        self.list_options().order = Some(order);
        self
    }

    fn with_limit(mut self, limit: u32) -> Self
    where
        Self: Sized,
    {
        self.list_options().limit = Some(limit);
        self
    }
}
