//! Error taxonomy for the scrape-and-report pipeline.

use std::fmt;

/// Which of the two nested anchor elements could not be located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// The block identified by `MAIN_BLOCK_ID`.
    Outer,
    /// The widget identified by `WIDGET_BLOCK_ID`, nested inside the outer block.
    Inner,
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Container::Outer => f.write_str("outer"),
            Container::Inner => f.write_str("inner"),
        }
    }
}

/// All errors that can occur while scraping and deriving rates.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScrapeError {
    /// Network or transport failure; carries the underlying cause.
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Empty page content")]
    EmptyContent,

    #[error("Container not found: {0}")]
    ContainerNotFound(Container),

    /// Both anchors were found but no catalog currency yielded a usable row.
    #[error("No exchange-rate rows found")]
    NoRows,

    /// A currency row whose shape is not the expected four cells.
    #[error("Malformed row for {code}: expected 4 cells, found {cells}")]
    MalformedRow { code: String, cells: usize },

    #[error("Division by zero while deriving rates for {code}")]
    DivisionByZero { code: String },

    #[error("Invalid price for {code}: {value:?}")]
    InvalidPrice { code: String, value: String },
}

pub type ScrapeResult<T> = Result<T, ScrapeError>;
