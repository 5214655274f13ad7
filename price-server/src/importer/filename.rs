//! Snapshot filename classification
//!
//! The importer derives store and snapshot date from the filename, not
//! from the rows:
//!
//! | Pattern | Kind |
//! |---------|------|
//! | `<store>_<YYYY-MM-DD>.csv` | product snapshot |
//! | `<store>_discounts_<YYYY-MM-DD>.csv` | discount snapshot |
//!
//! `<store>` is one or more ASCII alphanumerics. Anything else is
//! unrecognized and skipped.

use chrono::NaiveDate;

/// What a directory entry turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotFile {
    Product { store: String, date: NaiveDate },
    Discount { store: String, date: NaiveDate },
    Unrecognized,
}

pub fn classify(filename: &str) -> SnapshotFile {
    let Some(stem) = filename.strip_suffix(".csv") else {
        return SnapshotFile::Unrecognized;
    };

    // the discount infix is checked first so "lidl_discounts_…" never
    // parses as a product file for store "lidl" with a bad date
    if let Some((store, date)) = stem.split_once("_discounts_") {
        return match parse_parts(store, date) {
            Some((store, date)) => SnapshotFile::Discount { store, date },
            None => SnapshotFile::Unrecognized,
        };
    }
    if let Some((store, date)) = stem.split_once('_') {
        return match parse_parts(store, date) {
            Some((store, date)) => SnapshotFile::Product { store, date },
            None => SnapshotFile::Unrecognized,
        };
    }
    SnapshotFile::Unrecognized
}

fn parse_parts(store: &str, date: &str) -> Option<(String, NaiveDate)> {
    if store.is_empty() || !store.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some((store.to_string(), date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn product_filename() {
        assert_eq!(
            classify("lidl_2025-05-08.csv"),
            SnapshotFile::Product {
                store: "lidl".into(),
                date: date("2025-05-08"),
            }
        );
    }

    #[test]
    fn discount_filename() {
        assert_eq!(
            classify("kaufland_discounts_2025-05-08.csv"),
            SnapshotFile::Discount {
                store: "kaufland".into(),
                date: date("2025-05-08"),
            }
        );
    }

    #[test]
    fn rejects_bad_shapes() {
        // store with non-alphanumerics, bad date, wrong extension, no date
        assert_eq!(classify("mega_image_2025-05-08.csv"), SnapshotFile::Unrecognized);
        assert_eq!(classify("lidl_2025-13-40.csv"), SnapshotFile::Unrecognized);
        assert_eq!(classify("lidl_2025-05-08.txt"), SnapshotFile::Unrecognized);
        assert_eq!(classify("lidl.csv"), SnapshotFile::Unrecognized);
        assert_eq!(classify("lidl_discounts_notadate.csv"), SnapshotFile::Unrecognized);
        assert_eq!(classify("_2025-05-08.csv"), SnapshotFile::Unrecognized);
    }
}
