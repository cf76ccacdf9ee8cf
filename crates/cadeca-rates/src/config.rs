//! Configuration loading and resolution.
//!
//! Every setting comes from the environment with a hardcoded fallback. The
//! resulting [`Config`] is built once at startup and passed by reference.

use rust_decimal::Decimal;
use std::str::FromStr;

pub const DEFAULT_MAIN_BLOCK_ID: &str = "block-quicktabs-m-dulo-tasa-de-cambio";
pub const DEFAULT_WIDGET_BLOCK_ID: &str = "block-views-m-dulo-tasa-de-cambio-block";
pub const DEFAULT_BASE_URL: &str = "https://www.cadeca.cu/";
pub const DEFAULT_MLC_RATE: Decimal = Decimal::from_parts(120, 0, 0, false, 0);
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Settings for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Id of the block that wraps the exchange-rate widget.
    pub main_block_id: String,
    /// Id of the widget, searched inside the main block.
    pub widget_block_id: String,
    /// Page to fetch.
    pub base_url: String,
    /// CUP per MLC used for the derived columns.
    pub mlc_rate: Decimal,
    /// HTTP request timeout.
    pub timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            main_block_id: DEFAULT_MAIN_BLOCK_ID.to_string(),
            widget_block_id: DEFAULT_WIDGET_BLOCK_ID.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            mlc_rate: DEFAULT_MLC_RATE,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Load settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup. Missing keys take
    /// their default; so do numeric values that fail to parse.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            main_block_id: lookup("MAIN_BLOCK_ID").unwrap_or(defaults.main_block_id),
            widget_block_id: lookup("WIDGET_BLOCK_ID").unwrap_or(defaults.widget_block_id),
            base_url: lookup("BASE_URL").unwrap_or(defaults.base_url),
            mlc_rate: parse_or_default("MLC_RATE", lookup("MLC_RATE"), defaults.mlc_rate),
            timeout_ms: parse_or_default(
                "HTTP_TIMEOUT_MS",
                lookup("HTTP_TIMEOUT_MS"),
                defaults.timeout_ms,
            ),
        }
    }
}

fn parse_or_default<T: FromStr + Copy>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(value) => match value.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                tracing::warn!(key, %value, "unparseable setting, using default");
                default
            }
        },
    }
}
