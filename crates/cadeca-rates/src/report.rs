//! Fixed-width console report.

use crate::extract::ExchangeRow;
use crate::rates::{DerivedRates, RowRates};
use rust_decimal::Decimal;
use std::fmt::Write as _;
use std::io::{self, Write};

const NAME_WIDTH: usize = 20;
const CODE_WIDTH: usize = 5;
const PRICE_WIDTH: usize = 10;
const TOTAL_WIDTH: usize = 12;

/// Placeholder for derived columns that do not apply to a row.
const NOT_APPLICABLE: &str = "-";

/// Render the report header and one line per row.
///
/// With `derived`, three MLC columns are appended; it must hold one entry
/// per row. Rows whose derivation failed are replaced by a diagnostic line.
/// The whole report is written in one call.
pub fn render<W: Write>(
    out: &mut W,
    rows: &[ExchangeRow],
    derived: Option<&[RowRates]>,
) -> io::Result<()> {
    let mut buf = String::new();

    buf.push_str(&header(derived.is_some()));
    buf.push('\n');

    for (i, row) in rows.iter().enumerate() {
        let line = match derived.and_then(|d| d.get(i)) {
            None => price_columns(row),
            Some(RowRates::NotApplicable) => format!(
                "{} {:>w$} {:>w$} {:>t$}",
                price_columns(row),
                NOT_APPLICABLE,
                NOT_APPLICABLE,
                NOT_APPLICABLE,
                w = PRICE_WIDTH,
                t = TOTAL_WIDTH,
            ),
            Some(RowRates::Derived(rates)) => {
                format!("{} {}", price_columns(row), derived_columns(rates))
            }
            Some(RowRates::Failed(e)) => format!("ERROR: {} omitido ({e})", row.code),
        };
        let _ = writeln!(buf, "{line}");
    }

    out.write_all(buf.as_bytes())?;
    out.flush()
}

fn header(with_mlc: bool) -> String {
    let mut line = format!(
        "{:>NAME_WIDTH$} {:>CODE_WIDTH$} {:>PRICE_WIDTH$} {:>PRICE_WIDTH$}",
        "Moneda", "Signo", "Compra", "Venta"
    );
    if with_mlc {
        let _ = write!(
            line,
            " {:>PRICE_WIDTH$} {:>PRICE_WIDTH$} {:>TOTAL_WIDTH$}",
            "MLC", "x100 MLC", "Total CUP"
        );
    }
    line
}

fn price_columns(row: &ExchangeRow) -> String {
    format!(
        "{:>NAME_WIDTH$} {:>CODE_WIDTH$} {:>PRICE_WIDTH$} {:>PRICE_WIDTH$}",
        row.name, row.code, row.buy_price, row.sale_price
    )
}

fn derived_columns(rates: &DerivedRates) -> String {
    format!(
        "{:>PRICE_WIDTH$} {:>PRICE_WIDTH$} {:>TOTAL_WIDTH$}",
        money(rates.mlc_equivalent),
        money(rates.currency_per_100_mlc),
        money(rates.total_cup)
    )
}

fn money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}
