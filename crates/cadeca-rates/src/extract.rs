//! Locate the exchange-rate table in raw HTML and pull one row per currency.
//!
//! The page is anchored by two nested elements found by `id`. Rows are the
//! `<tr>` elements after the inner anchor whose `class` carries a currency
//! code. A single document-order pass records the first row for each class,
//! after which every catalog code is a map lookup.

use crate::catalog::Currency;
use crate::config::Config;
use crate::error::{Container, ScrapeError, ScrapeResult};
use scraper::{ElementRef, Html};
use std::collections::HashMap;

/// Number of `<td>` cells in a well-formed currency row.
const EXPECTED_CELLS: usize = 4;
const BUY_CELL: usize = 2;
const SALE_CELL: usize = 3;

/// Buy and sale prices for one catalog currency, as printed on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRow {
    pub code: &'static str,
    pub name: &'static str,
    /// Trimmed literal text of the buy cell.
    pub buy_price: String,
    /// Trimmed literal text of the sale cell.
    pub sale_price: String,
}

/// Rows found on a page, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub rows: Vec<ExchangeRow>,
    /// Rows that were present but dropped because of their shape.
    pub skipped: Vec<ScrapeError>,
}

/// Extract one row per catalog currency from `html`.
///
/// Fails only when the page is empty or either anchor is missing. Codes with
/// no matching row are skipped silently; rows without exactly four cells are
/// skipped and recorded in [`Extraction::skipped`].
pub fn extract(html: &[u8], config: &Config, catalog: &[Currency]) -> ScrapeResult<Extraction> {
    let text = String::from_utf8_lossy(html);
    if text.trim().is_empty() {
        return Err(ScrapeError::EmptyContent);
    }

    let document = Html::parse_document(&text);

    let main = elements(document.root_element())
        .find(|el| el.value().id() == Some(config.main_block_id.as_str()))
        .ok_or(ScrapeError::ContainerNotFound(Container::Outer))?;

    let widget = elements(main)
        .skip(1)
        .find(|el| el.value().id() == Some(config.widget_block_id.as_str()))
        .ok_or(ScrapeError::ContainerNotFound(Container::Inner))?;

    let rows_by_class = index_rows_after(&document, widget);
    tracing::debug!(classes = rows_by_class.len(), "indexed candidate rows");

    let mut extraction = Extraction::default();
    for currency in catalog {
        let Some(tr) = rows_by_class.get(currency.code) else {
            tracing::debug!(code = currency.code, "no row on page");
            continue;
        };

        let cells: Vec<String> = elements(*tr)
            .filter(|el| el.value().name() == "td")
            .map(|td| td.text().collect::<String>().trim().to_string())
            .collect();

        if cells.len() != EXPECTED_CELLS {
            tracing::debug!(code = currency.code, cells = cells.len(), "skipping malformed row");
            extraction.skipped.push(ScrapeError::MalformedRow {
                code: currency.code.to_string(),
                cells: cells.len(),
            });
            continue;
        }

        extraction.rows.push(ExchangeRow {
            code: currency.code,
            name: currency.name,
            buy_price: cells[BUY_CELL].clone(),
            sale_price: cells[SALE_CELL].clone(),
        });
    }

    Ok(extraction)
}

/// All elements under `root` in document order, `root` included.
fn elements(root: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    root.descendants().filter_map(ElementRef::wrap)
}

/// Map each class name to the first `<tr>` carrying it that follows `anchor`
/// in document order (its own descendants first, then the rest of the page).
fn index_rows_after<'a>(
    document: &'a Html,
    anchor: ElementRef<'a>,
) -> HashMap<&'a str, ElementRef<'a>> {
    let mut rows = HashMap::new();

    let following = elements(document.root_element())
        .skip_while(|el| *el != anchor)
        .skip(1);

    for el in following.filter(|el| el.value().name() == "tr") {
        for class in el.value().classes() {
            rows.entry(class).or_insert(el);
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CURRENCIES;

    fn page(widget_body: &str) -> String {
        format!(
            r#"<html><body>
            <div id="block-quicktabs-m-dulo-tasa-de-cambio">
              <div id="block-views-m-dulo-tasa-de-cambio-block">
                <table>{widget_body}</table>
              </div>
            </div>
            </body></html>"#
        )
    }

    fn row(code: &str, buy: &str, sale: &str) -> String {
        format!(
            r#"<tr class="{code}"><td><img/></td><td>{code}</td><td> {buy} </td><td>
                {sale}
            </td></tr>"#
        )
    }

    fn run(html: &str) -> ScrapeResult<Extraction> {
        extract(html.as_bytes(), &Config::default(), CURRENCIES)
    }

    #[test]
    fn test_extract_rows_in_catalog_order() {
        let html = page(&format!(
            "{}{}",
            row("USD", "24.00", "25.00"),
            row("EUR", "26.00", "27.00")
        ));
        let extraction = run(&html).unwrap();
        let codes: Vec<_> = extraction.rows.iter().map(|r| r.code).collect();
        assert_eq!(codes, vec!["EUR", "USD"]);
        assert!(extraction.skipped.is_empty());
    }

    #[test]
    fn test_extract_trims_cell_text() {
        let html = page(&row("USD", "24.00", "25.00"));
        let extraction = run(&html).unwrap();
        assert_eq!(extraction.rows.len(), 1);
        let usd = &extraction.rows[0];
        assert_eq!(usd.name, "Dólar Americano");
        assert_eq!(usd.buy_price, "24.00");
        assert_eq!(usd.sale_price, "25.00");
    }

    #[test]
    fn test_absent_codes_are_skipped_silently() {
        let html = page(&row("GBP", "30", "31"));
        let extraction = run(&html).unwrap();
        assert_eq!(extraction.rows.len(), 1);
        assert_eq!(extraction.rows[0].code, "GBP");
        assert!(extraction.skipped.is_empty());
    }

    #[test]
    fn test_wrong_cell_count_skips_row() {
        let html = page(&format!(
            r#"<tr class="CAD"><td>CAD</td><td>1</td><td>2</td></tr>{}"#,
            row("CHF", "3", "4")
        ));
        let extraction = run(&html).unwrap();
        assert_eq!(extraction.rows.len(), 1);
        assert_eq!(extraction.rows[0].code, "CHF");
        assert_eq!(
            extraction.skipped,
            vec![ScrapeError::MalformedRow {
                code: "CAD".into(),
                cells: 3
            }]
        );
    }

    #[test]
    fn test_first_matching_row_wins() {
        let html = page(&format!(
            "{}{}",
            row("USD", "24", "25"),
            row("USD", "99", "99")
        ));
        let extraction = run(&html).unwrap();
        assert_eq!(extraction.rows.len(), 1);
        assert_eq!(extraction.rows[0].buy_price, "24");
    }

    #[test]
    fn test_multi_class_rows_match() {
        let html = page(r#"<tr class="odd USD"><td></td><td></td><td>24</td><td>25</td></tr>"#);
        let extraction = run(&html).unwrap();
        assert_eq!(extraction.rows[0].code, "USD");
    }

    #[test]
    fn test_rows_before_widget_are_ignored() {
        let html = format!(
            r#"<html><body>
            <table>{}</table>
            <div id="block-quicktabs-m-dulo-tasa-de-cambio">
              <div id="block-views-m-dulo-tasa-de-cambio-block"></div>
            </div>
            <table>{}</table>
            </body></html>"#,
            row("USD", "1", "1"),
            row("USD", "24", "25"),
        );
        let extraction = run(&html).unwrap();
        assert_eq!(extraction.rows.len(), 1);
        assert_eq!(extraction.rows[0].buy_price, "24");
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(run("").unwrap_err(), ScrapeError::EmptyContent);
        assert_eq!(run("  \n ").unwrap_err(), ScrapeError::EmptyContent);
    }

    #[test]
    fn test_missing_outer_container() {
        let html = r#"<html><body><div id="other"></div></body></html>"#;
        assert_eq!(
            run(html).unwrap_err(),
            ScrapeError::ContainerNotFound(Container::Outer)
        );
    }

    #[test]
    fn test_missing_inner_container() {
        let html = r#"<html><body>
            <div id="block-quicktabs-m-dulo-tasa-de-cambio"><table></table></div>
            <div id="block-views-m-dulo-tasa-de-cambio-block"></div>
            </body></html>"#;
        assert_eq!(
            run(html).unwrap_err(),
            ScrapeError::ContainerNotFound(Container::Inner)
        );
    }

    #[test]
    fn test_custom_block_ids() {
        let config = Config {
            main_block_id: "rates".into(),
            widget_block_id: "table".into(),
            ..Config::default()
        };
        let html = format!(
            r#"<div id="rates"><div id="table"><table>{}</table></div></div>"#,
            row("MLC", "120", "125")
        );
        let extraction = extract(html.as_bytes(), &config, CURRENCIES).unwrap();
        assert_eq!(extraction.rows[0].code, "MLC");
    }
}
