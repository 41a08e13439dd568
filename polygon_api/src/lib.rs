mod client;
mod decode;
mod endpoints;
mod errors;
pub mod pagination;
pub mod query;
pub mod response;
pub mod transport;
pub mod types;
pub use self::client::{
    Client, ClientBuilder, API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, TIMEOUT_ENV,
};
pub use self::errors::{Error, ErrorEnvelope};
pub use self::pagination::Paginated;
pub use self::query::{
    AggsQuery, Comparison, ContractType, Direction, DividendsQuery, Locale, Market, Order,
    Params, Query, SplitsQuery, TickersQuery, Timespan,
};
pub use self::transport::{RawResponse, ReqwestTransport, Transport, TransportError};
