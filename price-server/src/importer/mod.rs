//! Snapshot directory importer
//!
//! Scans a directory (non-recursive) for `*.csv` snapshot files, loads
//! product and discount rows into the record store, and reports
//! per-kind counters. One call, one directory, no cross-file
//! transaction: a broken file only costs that file.

pub mod filename;
pub mod parse;

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use shared::dto::{ImportCounters, ImportReport};

use crate::store::{DiscountQuery, ProductQuery, RecordStore};
use crate::utils::{AppError, AppResult};

use filename::SnapshotFile;

#[derive(Clone)]
pub struct ImportService {
    store: Arc<dyn RecordStore>,
}

impl ImportService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Import every recognizable snapshot file under `directory_path`.
    ///
    /// A missing or non-directory path aborts the whole call. A file
    /// that cannot be read or persisted is logged and skipped; the scan
    /// continues with the next file.
    pub async fn import_from(&self, directory_path: &str) -> AppResult<ImportReport> {
        let dir = Path::new(directory_path);
        if !dir.is_dir() {
            tracing::error!(path = %directory_path, "Import path is not a directory");
            return Err(AppError::validation(format!(
                "Not a directory: {directory_path}"
            )));
        }

        let mut entries: Vec<_> = std::fs::read_dir(dir)
            .map_err(|e| AppError::internal(format!("Cannot read directory {directory_path}: {e}")))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".csv"))
            .collect();
        // directory order is OS-dependent, sort for a stable import order
        entries.sort_by_key(|entry| entry.file_name());

        let mut report = ImportReport::default();
        for entry in entries {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();

            let outcome = match filename::classify(&name) {
                SnapshotFile::Product { store, date } => {
                    self.import_product_file(&path, &store, date).await.map(|c| {
                        report.products += c;
                    })
                }
                SnapshotFile::Discount { store, date } => {
                    self.import_discount_file(&path, &store, date).await.map(|c| {
                        report.discounts += c;
                    })
                }
                SnapshotFile::Unrecognized => {
                    tracing::warn!(file = %name, "Unrecognized snapshot filename, skipping");
                    report.files_skipped += 1;
                    continue;
                }
            };

            match outcome {
                Ok(()) => report.files_processed += 1,
                Err(e) => {
                    tracing::error!(file = %name, error = %e, "Failed to import file");
                    report.files_skipped += 1;
                }
            }
        }

        tracing::info!(
            files_processed = report.files_processed,
            files_skipped = report.files_skipped,
            products_saved = report.products.total_saved(),
            discounts_saved = report.discounts.total_saved(),
            "Import finished"
        );
        Ok(report)
    }

    async fn import_product_file(
        &self,
        path: &Path,
        store_name: &str,
        date: NaiveDate,
    ) -> AppResult<ImportCounters> {
        let content = read_file(path)?;

        // records already present for this (store, date), so re-imports
        // update in place instead of duplicating
        let query = ProductQuery {
            store: Some(store_name.to_string()),
            price_date: Some(date),
            ..ProductQuery::default()
        };
        let existing: HashMap<String, i64> = self
            .store
            .find_products(&query)
            .await?
            .into_iter()
            .filter_map(|p| p.id.map(|id| (p.product_id, id)))
            .collect();

        let mut counters = ImportCounters::default();
        let mut processed: HashSet<String> = HashSet::new();
        let mut batch = Vec::new();

        for line in data_rows(&content) {
            let fields = parse::split_row(line);
            // shape first, then duplicates: a short row is malformed
            // even when its first field repeats a processed id
            if fields.len() < parse::PRODUCT_MIN_FIELDS {
                tracing::warn!(
                    row = %line,
                    got = fields.len(),
                    expected = parse::PRODUCT_MIN_FIELDS,
                    "Skipping malformed product row"
                );
                continue;
            }
            // the id is claimed before the parse attempt, so a repeat
            // of an unparseable row is a duplicate, not a new record
            if !processed.insert(fields[0].to_string()) {
                counters.duplicates_skipped += 1;
                continue;
            }
            match parse::parse_product_row(&fields, store_name, date) {
                Ok(mut product) => {
                    match existing.get(&product.product_id) {
                        Some(&id) => {
                            product.id = Some(id);
                            counters.updated_count += 1;
                        }
                        None => counters.new_count += 1,
                    }
                    batch.push(product);
                }
                Err(e) => {
                    tracing::warn!(row = %line, error = %e, "Skipping product row");
                }
            }
        }

        if !batch.is_empty() {
            self.store.upsert_products(batch).await?;
        }
        tracing::info!(
            file = %path.display(),
            new = counters.new_count,
            updated = counters.updated_count,
            duplicates = counters.duplicates_skipped,
            "Imported product snapshot"
        );
        Ok(counters)
    }

    async fn import_discount_file(
        &self,
        path: &Path,
        store_name: &str,
        date: NaiveDate,
    ) -> AppResult<ImportCounters> {
        let content = read_file(path)?;

        let query = DiscountQuery {
            store: Some(store_name.to_string()),
            discount_date: Some(date),
            ..DiscountQuery::default()
        };
        let existing: HashMap<String, i64> = self
            .store
            .find_discounts(&query)
            .await?
            .into_iter()
            .filter_map(|d| d.id.map(|id| (d.product_id, id)))
            .collect();

        let mut counters = ImportCounters::default();
        let mut processed: HashSet<String> = HashSet::new();
        let mut batch = Vec::new();

        for line in data_rows(&content) {
            let fields = parse::split_row(line);
            if fields.len() < parse::DISCOUNT_MIN_FIELDS {
                tracing::warn!(
                    row = %line,
                    got = fields.len(),
                    expected = parse::DISCOUNT_MIN_FIELDS,
                    "Skipping malformed discount row"
                );
                continue;
            }
            if !processed.insert(fields[0].to_string()) {
                counters.duplicates_skipped += 1;
                continue;
            }
            match parse::parse_discount_row(&fields, store_name, date) {
                Ok(mut discount) => {
                    match existing.get(&discount.product_id) {
                        Some(&id) => {
                            discount.id = Some(id);
                            counters.updated_count += 1;
                        }
                        None => counters.new_count += 1,
                    }
                    batch.push(discount);
                }
                Err(e) => {
                    tracing::warn!(row = %line, error = %e, "Skipping discount row");
                }
            }
        }

        if !batch.is_empty() {
            self.store.upsert_discounts(batch).await?;
        }
        tracing::info!(
            file = %path.display(),
            new = counters.new_count,
            updated = counters.updated_count,
            duplicates = counters.duplicates_skipped,
            "Imported discount snapshot"
        );
        Ok(counters)
    }
}

fn read_file(path: &Path) -> AppResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| AppError::internal(format!("Cannot read {}: {e}", path.display())))
}

/// All non-blank lines after the header row
fn data_rows(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .skip(1)
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    const PRODUCT_HEADER: &str =
        "product_id;product_name;product_category;brand;package_quantity;package_unit;price;currency";

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let svc = ImportService::new(Arc::new(MemoryStore::new()));
        assert!(svc.import_from("/nonexistent/snapshots").await.is_err());
    }

    #[tokio::test]
    async fn malformed_and_duplicate_rows_do_not_abort_the_file() {
        let store = Arc::new(MemoryStore::new());
        let svc = ImportService::new(store.clone());
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "lidl_2025-05-08.csv",
            &format!(
                "{PRODUCT_HEADER}\n\
                 P001;lapte zuzu;lactate;Zuzu;1;l;9.80;RON\n\
                 P002;too;short\n\
                 P001;lapte zuzu;lactate;Zuzu;1;l;7.77;RON\n\
                 P003;iaurt grecesc;lactate;Olympus;0.4;kg;nu-e-pret;RON\n\
                 P004;unt 82%;lactate;President;0.2;kg;12.40;RON\n"
            ),
        );

        let report = svc.import_from(dir.path().to_str().unwrap()).await.unwrap();
        assert_eq!(report.files_processed, 1);
        assert_eq!(report.products.new_count, 2);
        assert_eq!(report.products.duplicates_skipped, 1);

        // first occurrence won
        let all = store.find_products(&ProductQuery::default()).await.unwrap();
        let p001 = all.iter().find(|p| p.product_id == "P001").unwrap();
        assert_eq!(p001.price, 9.80);
    }

    #[tokio::test]
    async fn repeated_id_after_unparseable_first_row_is_a_duplicate() {
        let store = Arc::new(MemoryStore::new());
        let svc = ImportService::new(store.clone());
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "lidl_2025-05-08.csv",
            &format!(
                "{PRODUCT_HEADER}\n\
                 P003;iaurt grecesc;lactate;Olympus;0.4;kg;nu-e-pret;RON\n\
                 P003;iaurt grecesc;lactate;Olympus;0.4;kg;8.20;RON\n"
            ),
        );

        // the first P003 row claims the id even though it fails to
        // parse, so the valid repeat is skipped and nothing is saved
        let report = svc.import_from(dir.path().to_str().unwrap()).await.unwrap();
        assert_eq!(report.products.new_count, 0);
        assert_eq!(report.products.duplicates_skipped, 1);
        assert!(store
            .find_products(&ProductQuery::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn short_row_repeating_an_id_is_malformed_not_duplicate() {
        let store = Arc::new(MemoryStore::new());
        let svc = ImportService::new(store.clone());
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "lidl_2025-05-08.csv",
            &format!(
                "{PRODUCT_HEADER}\n\
                 P001;lapte zuzu;lactate;Zuzu;1;l;9.80;RON\n\
                 P001;too;short\n"
            ),
        );

        let report = svc.import_from(dir.path().to_str().unwrap()).await.unwrap();
        assert_eq!(report.products.new_count, 1);
        assert_eq!(report.products.duplicates_skipped, 0);
    }

    #[tokio::test]
    async fn discount_repeat_after_unparseable_first_row_is_a_duplicate() {
        let store = Arc::new(MemoryStore::new());
        let svc = ImportService::new(store.clone());
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "lidl_discounts_2025-05-08.csv",
            "product_id;product_name;brand;package_quantity;package_unit;product_category;from_date;to_date;percentage_of_discount\n\
             P010;lapte zuzu;Zuzu;1;l;lactate;2025-05-05;2025-05-12;nu-e-procent\n\
             P010;lapte zuzu;Zuzu;1;l;lactate;2025-05-05;2025-05-12;12\n",
        );

        let report = svc.import_from(dir.path().to_str().unwrap()).await.unwrap();
        assert_eq!(report.discounts.new_count, 0);
        assert_eq!(report.discounts.duplicates_skipped, 1);
        assert!(store
            .find_discounts(&DiscountQuery::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn reimport_updates_in_place() {
        let store = Arc::new(MemoryStore::new());
        let svc = ImportService::new(store.clone());
        let dir = tempfile::tempdir().unwrap();
        let name = "lidl_2025-05-08.csv";
        write(
            dir.path(),
            name,
            &format!("{PRODUCT_HEADER}\nP001;lapte zuzu;lactate;Zuzu;1;l;9.80;RON\n"),
        );
        let first = svc.import_from(dir.path().to_str().unwrap()).await.unwrap();
        assert_eq!(first.products.new_count, 1);

        write(
            dir.path(),
            name,
            &format!("{PRODUCT_HEADER}\nP001;lapte zuzu;lactate;Zuzu;1;l;8.90;RON\n"),
        );
        let second = svc.import_from(dir.path().to_str().unwrap()).await.unwrap();
        assert_eq!(second.products.new_count, 0);
        assert_eq!(second.products.updated_count, 1);

        let all = store.find_products(&ProductQuery::default()).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].price, 8.90);
    }

    #[tokio::test]
    async fn unrecognized_files_are_counted_skipped() {
        let svc = ImportService::new(Arc::new(MemoryStore::new()));
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "notes.csv", "whatever\n");
        let report = svc.import_from(dir.path().to_str().unwrap()).await.unwrap();
        assert_eq!(report.files_processed, 0);
        assert_eq!(report.files_skipped, 1);
    }
}
