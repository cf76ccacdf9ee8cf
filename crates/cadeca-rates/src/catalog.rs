//! Fixed table of currencies the report looks for.

/// A currency the report knows how to look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    /// Code as used in the row's `class` attribute on the site.
    pub code: &'static str,
    /// Display name printed in the report.
    pub name: &'static str,
}

/// Code of the freely convertible currency the derived columns are expressed in.
pub const MLC_CODE: &str = "MLC";

/// Catalog order is report order. `JYP` and `MXM` are spelled the way the
/// site spells its row classes.
pub const CURRENCIES: &[Currency] = &[
    Currency { code: "CAD", name: "Dólar Canadiense" },
    Currency { code: "CHF", name: "Franco Suizo" },
    Currency { code: "EUR", name: "Euro" },
    Currency { code: "GBP", name: "Libra Esterlina" },
    Currency { code: "JYP", name: "Yuan Japonés" },
    Currency { code: "MXM", name: "Pesos Mexicanos" },
    Currency { code: "USD", name: "Dólar Americano" },
    Currency { code: MLC_CODE, name: "MLC :(" },
];
