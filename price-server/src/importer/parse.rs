//! Snapshot row parsing
//!
//! Rows are semicolon-delimited, fields trimmed. Schemas:
//!
//! | Kind | Fields |
//! |------|--------|
//! | product | `product_id;name;category;brand;package_quantity;package_unit;price;currency` |
//! | discount | `product_id;name;brand;package_quantity;package_unit;category;from_date;to_date;percentage` |
//!
//! Extra trailing fields are tolerated; too few is a malformed row.

use chrono::NaiveDate;
use thiserror::Error;

use shared::models::{DiscountSnapshot, PackageUnit, ProductSnapshot};

pub const PRODUCT_MIN_FIELDS: usize = 8;
pub const DISCOUNT_MIN_FIELDS: usize = 9;

/// Why a single row could not be turned into a record
#[derive(Debug, Error)]
pub enum RowError {
    #[error("expected at least {expected} fields, got {got}")]
    TooFewFields { expected: usize, got: usize },

    #[error("invalid number in '{field}': '{value}'")]
    BadNumber { field: &'static str, value: String },

    #[error("invalid date in '{field}': '{value}'")]
    BadDate { field: &'static str, value: String },
}

pub fn split_row(line: &str) -> Vec<&str> {
    line.split(';').map(str::trim).collect()
}

fn parse_f64(field: &'static str, value: &str) -> Result<f64, RowError> {
    value.parse().map_err(|_| RowError::BadNumber {
        field,
        value: value.to_string(),
    })
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, RowError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| RowError::BadDate {
        field,
        value: value.to_string(),
    })
}

/// Build a product snapshot from one row; store and date come from the
/// filename, never from the row.
pub fn parse_product_row(
    fields: &[&str],
    store: &str,
    price_date: NaiveDate,
) -> Result<ProductSnapshot, RowError> {
    if fields.len() < PRODUCT_MIN_FIELDS {
        return Err(RowError::TooFewFields {
            expected: PRODUCT_MIN_FIELDS,
            got: fields.len(),
        });
    }
    Ok(ProductSnapshot {
        id: None,
        product_id: fields[0].to_string(),
        name: fields[1].to_string(),
        category: fields[2].to_string(),
        brand: fields[3].to_string(),
        package_quantity: parse_f64("package_quantity", fields[4])?,
        package_unit: PackageUnit::parse(fields[5]),
        price: parse_f64("price", fields[6])?,
        currency: fields[7].to_string(),
        store: store.to_string(),
        price_date,
    })
}

pub fn parse_discount_row(
    fields: &[&str],
    store: &str,
    discount_date: NaiveDate,
) -> Result<DiscountSnapshot, RowError> {
    if fields.len() < DISCOUNT_MIN_FIELDS {
        return Err(RowError::TooFewFields {
            expected: DISCOUNT_MIN_FIELDS,
            got: fields.len(),
        });
    }
    Ok(DiscountSnapshot {
        id: None,
        product_id: fields[0].to_string(),
        product_name: fields[1].to_string(),
        brand: fields[2].to_string(),
        package_quantity: parse_f64("package_quantity", fields[3])?,
        package_unit: PackageUnit::parse(fields[4]),
        product_category: fields[5].to_string(),
        from_date: parse_date("from_date", fields[6])?,
        to_date: parse_date("to_date", fields[7])?,
        percentage: parse_f64("percentage", fields[8])?,
        store: store.to_string(),
        discount_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn product_row_parses_with_trimming() {
        let line = "P001; lapte zuzu ;lactate;Zuzu; 1 ; role ;9.80;RON";
        let fields = split_row(line);
        let product = parse_product_row(&fields, "lidl", date("2025-05-08")).unwrap();
        assert_eq!(product.name, "lapte zuzu");
        assert_eq!(product.package_unit, PackageUnit::Piece);
        assert_eq!(product.price, 9.80);
        assert_eq!(product.store, "lidl");
        assert_eq!(product.price_date, date("2025-05-08"));
    }

    #[test]
    fn short_product_row_is_rejected() {
        let fields = split_row("P001;lapte zuzu;lactate");
        assert!(matches!(
            parse_product_row(&fields, "lidl", date("2025-05-08")),
            Err(RowError::TooFewFields { expected: 8, got: 3 })
        ));
    }

    #[test]
    fn discount_row_parses() {
        let line = "P001;lapte zuzu;Zuzu;1;l;lactate;2025-05-05;2025-05-12;12";
        let fields = split_row(line);
        let discount = parse_discount_row(&fields, "lidl", date("2025-05-08")).unwrap();
        assert_eq!(discount.percentage, 12.0);
        assert_eq!(discount.from_date, date("2025-05-05"));
        assert_eq!(discount.discount_date, date("2025-05-08"));
    }

    #[test]
    fn bad_number_names_the_field() {
        let line = "P001;lapte zuzu;lactate;Zuzu;1;l;nu-e-pret;RON";
        let fields = split_row(line);
        let err = parse_product_row(&fields, "lidl", date("2025-05-08")).unwrap_err();
        assert!(err.to_string().contains("price"));
    }

    #[test]
    fn bad_date_names_the_field() {
        let line = "P001;lapte zuzu;Zuzu;1;l;lactate;2025-05-05;maine;12";
        let fields = split_row(line);
        let err = parse_discount_row(&fields, "lidl", date("2025-05-08")).unwrap_err();
        assert!(err.to_string().contains("to_date"));
    }
}
