//! Reference data: tickers, exchanges, market calendar, corporate actions,
//! fundamentals and options contracts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Entry of the ticker listing.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Ticker {
    pub ticker: String,
    pub name: String,
    pub market: String,
    pub locale: String,
    pub primary_exchange: Option<String>,
    #[serde(rename = "type")]
    pub ticker_type: Option<String>,
    pub active: bool,
    pub currency_name: Option<String>,
    pub currency_symbol: Option<String>,
    pub base_currency_symbol: Option<String>,
    pub base_currency_name: Option<String>,
    pub cik: Option<String>,
    pub composite_figi: Option<String>,
    pub share_class_figi: Option<String>,
    pub last_updated_utc: Option<String>,
    pub delisted_utc: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Address {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Branding {
    pub logo_url: Option<String>,
    pub icon_url: Option<String>,
}

/// Full company/instrument record for one ticker.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TickerDetails {
    pub ticker: String,
    pub name: String,
    pub market: String,
    pub locale: String,
    pub primary_exchange: Option<String>,
    #[serde(rename = "type")]
    pub ticker_type: Option<String>,
    pub active: bool,
    pub currency_name: Option<String>,
    pub cik: Option<String>,
    pub composite_figi: Option<String>,
    pub share_class_figi: Option<String>,
    pub market_cap: Option<f64>,
    pub phone_number: Option<String>,
    pub address: Option<Address>,
    pub description: Option<String>,
    pub sic_code: Option<String>,
    pub sic_description: Option<String>,
    pub ticker_root: Option<String>,
    pub ticker_suffix: Option<String>,
    pub homepage_url: Option<String>,
    pub total_employees: Option<i64>,
    pub list_date: Option<String>,
    pub delisted_utc: Option<String>,
    pub branding: Option<Branding>,
    pub share_class_shares_outstanding: Option<i64>,
    pub weighted_shares_outstanding: Option<i64>,
    pub round_lot: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TickerType {
    pub asset_class: String,
    pub code: String,
    pub description: String,
    pub locale: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Publisher {
    pub name: String,
    pub homepage_url: Option<String>,
    pub logo_url: Option<String>,
    pub favicon_url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct NewsArticle {
    pub id: String,
    pub publisher: Publisher,
    pub title: String,
    pub author: Option<String>,
    pub published_utc: String,
    pub article_url: String,
    pub tickers: Vec<String>,
    pub amp_url: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Exchange {
    pub id: i64,
    #[serde(rename = "type")]
    pub exchange_type: String,
    pub asset_class: String,
    pub locale: String,
    pub name: String,
    pub acronym: Option<String>,
    pub mic: Option<String>,
    pub operating_mic: Option<String>,
    pub participant_id: Option<String>,
    pub url: Option<String>,
}

/// Trade or quote condition code definition.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Condition {
    pub id: i64,
    #[serde(rename = "type")]
    pub condition_type: String,
    pub name: String,
    pub abbreviation: Option<String>,
    pub description: Option<String>,
    pub asset_class: String,
    pub data_types: Vec<String>,
    pub legacy: bool,
    /// Code per SIP, e.g. `{"CTA": "B", "UTP": "W"}`.
    pub sip_mapping: BTreeMap<String, String>,
}

/// Current trading status of markets and exchanges. Top-level keys are
/// camelCase on this endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct MarketStatus {
    pub market: String,
    pub server_time: String,
    pub early_hours: bool,
    pub after_hours: bool,
    pub exchanges: BTreeMap<String, String>,
    pub currencies: BTreeMap<String, String>,
    pub indices_groups: BTreeMap<String, String>,
}

/// Upcoming holiday or early close.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct MarketHoliday {
    pub exchange: String,
    pub name: String,
    pub date: String,
    /// `closed` or `early-close`.
    pub status: String,
    pub open: Option<String>,
    pub close: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Dividend {
    pub id: String,
    pub ticker: String,
    pub cash_amount: f64,
    pub currency: Option<String>,
    pub declaration_date: Option<String>,
    pub dividend_type: String,
    pub ex_dividend_date: String,
    pub frequency: i64,
    pub pay_date: Option<String>,
    pub record_date: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Split {
    pub id: String,
    pub ticker: String,
    pub execution_date: String,
    pub split_from: f64,
    pub split_to: f64,
}

impl Split {
    /// Shares after the split per share before it. Zero if `split_from` is unset.
    pub fn ratio(&self) -> f64 {
        if self.split_from == 0.0 {
            0.0
        } else {
            self.split_to / self.split_from
        }
    }
}

/// One line item of a financial statement.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FinancialDataPoint {
    pub label: String,
    pub order: i64,
    pub unit: String,
    pub value: f64,
    pub source: Option<serde_json::Value>,
}

/// Financial statements from one filing.
///
/// `financials` maps statement name (`income_statement`, `balance_sheet`,
/// ...) to line-item key to data point.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Financial {
    pub cik: String,
    pub company_name: String,
    pub tickers: Vec<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub filing_date: Option<String>,
    pub acceptance_datetime: Option<String>,
    pub fiscal_period: String,
    pub fiscal_year: String,
    pub timeframe: String,
    pub source_filing_url: Option<String>,
    pub source_filing_file_url: Option<String>,
    pub financials: BTreeMap<String, BTreeMap<String, FinancialDataPoint>>,
}

impl Financial {
    /// Looks up one line item, e.g. `("income_statement", "revenues")`.
    pub fn value(&self, statement: &str, item: &str) -> Option<f64> {
        self.financials
            .get(statement)
            .and_then(|s| s.get(item))
            .map(|p| p.value)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct OptionsContract {
    pub ticker: String,
    pub underlying_ticker: String,
    pub cfi: Option<String>,
    pub contract_type: String,
    pub exercise_style: String,
    pub expiration_date: String,
    pub primary_exchange: Option<String>,
    pub shares_per_contract: f64,
    pub strike_price: f64,
}
