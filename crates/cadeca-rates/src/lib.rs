//! cadeca-rates — scrape the CADECA exchange-rate table and print it.

pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod rates;
pub mod report;

pub use catalog::{Currency, CURRENCIES, MLC_CODE};
pub use config::Config;
pub use error::{Container, ScrapeError, ScrapeResult};
pub use extract::{extract, ExchangeRow, Extraction};
pub use fetch::{Page, PageFetcher};
pub use pipeline::{run, Outcome, ReportMode};
pub use rates::{derive, DerivedRates, RowRates};
pub use report::render;
