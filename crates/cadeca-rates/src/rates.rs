//! MLC-equivalent figures derived from a row's buy and sale prices.

use crate::catalog::MLC_CODE;
use crate::error::{ScrapeError, ScrapeResult};
use crate::extract::ExchangeRow;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Figures shown in the MLC columns of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedRates {
    /// MLC bought by one unit of the currency: `buy / mlc_rate`.
    pub mlc_equivalent: Decimal,
    /// Units of the currency needed for 100 MLC: `100 / mlc_equivalent`.
    pub currency_per_100_mlc: Decimal,
    /// CUP cost of those units at the sale price.
    pub total_cup: Decimal,
}

/// Outcome of deriving the MLC columns for one report row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowRates {
    /// The row is MLC itself; the derived columns do not apply.
    NotApplicable,
    Derived(DerivedRates),
    /// Derivation failed; the row is left out of the report.
    Failed(ScrapeError),
}

/// Derive rates for every row, keeping one outcome per row.
pub fn derive_all(rows: &[ExchangeRow], mlc_rate: Decimal) -> Vec<RowRates> {
    rows.iter()
        .map(|row| {
            if row.code == MLC_CODE {
                return RowRates::NotApplicable;
            }
            match derive(row, mlc_rate) {
                Ok(rates) => RowRates::Derived(rates),
                Err(e) => {
                    tracing::debug!(code = row.code, error = %e, "skipping row");
                    RowRates::Failed(e)
                }
            }
        })
        .collect()
}

/// Derive the MLC figures for `row` at the given MLC rate.
///
/// A zero rate or a zero buy price yields [`ScrapeError::DivisionByZero`]
/// rather than a non-finite value.
pub fn derive(row: &ExchangeRow, mlc_rate: Decimal) -> ScrapeResult<DerivedRates> {
    let buy = parse_price(row.code, &row.buy_price)?;
    let sale = parse_price(row.code, &row.sale_price)?;

    let division_by_zero = || ScrapeError::DivisionByZero {
        code: row.code.to_string(),
    };

    let mlc_equivalent = buy.checked_div(mlc_rate).ok_or_else(division_by_zero)?;
    let currency_per_100_mlc = Decimal::ONE_HUNDRED
        .checked_div(mlc_equivalent)
        .ok_or_else(division_by_zero)?;
    let total_cup = currency_per_100_mlc
        .checked_mul(sale)
        .ok_or_else(|| ScrapeError::InvalidPrice {
            code: row.code.to_string(),
            value: row.sale_price.clone(),
        })?;

    Ok(DerivedRates {
        mlc_equivalent,
        currency_per_100_mlc,
        total_cup,
    })
}

/// Parse the literal cell text; the site uses `.` as decimal point.
fn parse_price(code: &str, text: &str) -> ScrapeResult<Decimal> {
    Decimal::from_str(text.trim()).map_err(|_| ScrapeError::InvalidPrice {
        code: code.to_string(),
        value: text.to_string(),
    })
}
