//! End-to-end run: fetch, extract, derive, print.
//!
//! Every failure ends as a printed diagnostic on `out`; [`run`] only returns
//! an error when writing to `out` itself fails.

use crate::catalog::CURRENCIES;
use crate::config::Config;
use crate::error::ScrapeError;
use crate::extract::extract;
use crate::fetch::PageFetcher;
use crate::rates::derive_all;
use crate::report::render;
use std::io::{self, Write};

pub const START_BANNER: &str = "======= Start parsing wait a few seconds =======";
pub const FETCH_FAILED: &str = "Some problem has occur, you need to reload.";
pub const FETCH_SEPARATOR: &str = "------------------------";
pub const UNREADABLE_PAGE: &str = "ERROR: No podemos leer el contenido de la página";
pub const EMPTY_PAGE: &str = "ERROR: contenido vacío";

/// Which columns the report shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportMode {
    /// Name, code, buy and sale prices.
    #[default]
    Plain,
    /// Plain columns plus MLC-equivalent figures.
    Mlc,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Report printed with this many currency rows.
    Reported { rows: usize },
    /// Run stopped at this error after printing a diagnostic.
    Failed(ScrapeError),
}

/// Run the whole pipeline once against `config.base_url`.
pub async fn run<W: Write>(
    config: &Config,
    mode: ReportMode,
    out: &mut W,
) -> io::Result<Outcome> {
    writeln!(out, "{START_BANNER}")?;

    let fetcher = PageFetcher::new(config.timeout_ms);
    let page = match fetcher.fetch(&config.base_url).await {
        Ok(page) => page,
        Err(e) => {
            tracing::debug!(url = %config.base_url, error = %e, "fetch failed");
            writeln!(out, "{FETCH_FAILED}")?;
            writeln!(out, "{FETCH_SEPARATOR}")?;
            if let ScrapeError::Fetch(cause) = &e {
                writeln!(out, "{cause}")?;
            }
            return Ok(Outcome::Failed(e));
        }
    };

    report_page(&page.body, config, mode, out)
}

/// Extract and print the report for an already fetched page body.
pub fn report_page<W: Write>(
    body: &[u8],
    config: &Config,
    mode: ReportMode,
    out: &mut W,
) -> io::Result<Outcome> {
    let extraction = match extract(body, config, CURRENCIES) {
        Ok(extraction) => extraction,
        Err(e) => {
            tracing::debug!(error = %e, "page not readable");
            let message = match e {
                ScrapeError::EmptyContent => EMPTY_PAGE,
                _ => UNREADABLE_PAGE,
            };
            writeln!(out, "{message}")?;
            return Ok(Outcome::Failed(e));
        }
    };

    for skipped in &extraction.skipped {
        tracing::debug!(error = %skipped, "row skipped");
    }

    if extraction.rows.is_empty() {
        tracing::debug!(skipped = extraction.skipped.len(), "no usable rows");
        writeln!(out, "{UNREADABLE_PAGE}")?;
        return Ok(Outcome::Failed(ScrapeError::NoRows));
    }

    let rows = &extraction.rows;
    match mode {
        ReportMode::Plain => render(out, rows, None)?,
        ReportMode::Mlc => {
            let derived = derive_all(rows, config.mlc_rate);
            render(out, rows, Some(&derived))?;
        }
    }

    Ok(Outcome::Reported { rows: rows.len() })
}
