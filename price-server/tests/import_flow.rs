//! End-to-end import flow: CSV directory -> record store -> queries
//!
//! Drives ServerState the way the HTTP handlers do, against snapshot
//! files written into a temp directory.

use std::path::Path;

use price_server::{Config, ServerState};
use shared::dto::BasketItem;
use shared::models::{AlertCreate, PackageUnit};

const PRODUCT_HEADER: &str =
    "product_id;product_name;product_category;brand;package_quantity;package_unit;price;currency";
const DISCOUNT_HEADER: &str =
    "product_id;product_name;brand;package_quantity;package_unit;product_category;from_date;to_date;percentage_of_discount";

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

fn today() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Snapshot directory dated today: two stores selling the same milk,
/// lidl with a 12% discount running all week
fn seed_snapshots(dir: &Path) {
    let date = today();
    write(
        dir,
        &format!("lidl_{date}.csv"),
        &format!(
            "{PRODUCT_HEADER}\n\
             P001;lapte zuzu;lactate;Zuzu;1;l;9.80;RON\n\
             P002;iaurt grecesc;lactate;Olympus;0.4;kg;11.50;RON\n"
        ),
    );
    write(
        dir,
        &format!("kaufland_{date}.csv"),
        &format!("{PRODUCT_HEADER}\nP101;lapte zuzu;lactate;Zuzu;1;role;9.50;RON\n"),
    );
    let from = chrono::Utc::now().date_naive() - chrono::Duration::days(3);
    let to = chrono::Utc::now().date_naive() + chrono::Duration::days(3);
    write(
        dir,
        &format!("lidl_discounts_{date}.csv"),
        &format!(
            "{DISCOUNT_HEADER}\nP001;lapte zuzu;Zuzu;1;l;lactate;{from};{to};12\n"
        ),
    );
}

#[tokio::test]
async fn import_populates_store_and_reimport_is_idempotent() {
    let state = ServerState::new(Config::default());
    let dir = tempfile::tempdir().unwrap();
    seed_snapshots(dir.path());

    let first = state
        .importer
        .import_from(dir.path().to_str().unwrap())
        .await
        .unwrap();
    assert_eq!(first.files_processed, 3);
    assert_eq!(first.products.new_count, 3);
    assert_eq!(first.discounts.new_count, 1);

    // same directory again: everything updates, nothing duplicates
    let second = state
        .importer
        .import_from(dir.path().to_str().unwrap())
        .await
        .unwrap();
    assert_eq!(second.products.new_count, 0);
    assert_eq!(second.products.updated_count, 3);
    assert_eq!(second.discounts.updated_count, 1);

    let all = state.products.all().await.unwrap();
    assert_eq!(all.len(), 3);
    // "role" normalized to piece at parse time
    let kaufland = all.iter().find(|p| p.store == "kaufland").unwrap();
    assert_eq!(kaufland.package_unit, PackageUnit::Piece);
}

#[tokio::test]
async fn basket_picks_the_discounted_store() {
    let state = ServerState::new(Config::default());
    let dir = tempfile::tempdir().unwrap();
    seed_snapshots(dir.path());
    state
        .importer
        .import_from(dir.path().to_str().unwrap())
        .await
        .unwrap();

    let items = vec![BasketItem {
        product_name: "lapte zuzu".into(),
        quantity: 2,
    }];
    let basket = state
        .basket
        .optimize(&items, chrono::Utc::now().date_naive())
        .await
        .unwrap();

    // lidl 9.80 at 12% -> 8.62 beats kaufland's 9.50 shelf price
    assert_eq!(basket.store_shopping_lists.len(), 1);
    assert_eq!(basket.store_shopping_lists[0].store_name, "lidl");
    assert_eq!(basket.total_original_cost, 19.60);
    assert_eq!(basket.total_cost_after_discounts, 17.24);
    assert_eq!(basket.total_savings, 2.36);
}

#[tokio::test]
async fn alert_fires_on_import_then_stays_quiet() {
    let state = ServerState::new(Config::default());
    let dir = tempfile::tempdir().unwrap();
    seed_snapshots(dir.path());

    state
        .alerts
        .create(vec![AlertCreate {
            product_name: "lapte zuzu".into(),
            store: "lidl".into(),
            target_price: 8.62,
        }])
        .await
        .unwrap();

    state
        .importer
        .import_from(dir.path().to_str().unwrap())
        .await
        .unwrap();
    let triggered = state.alerts.evaluate_all().await.unwrap();
    assert_eq!(triggered.len(), 1);
    assert_eq!(triggered[0].current_price, 8.62);
    assert!(triggered[0].message.contains("Discount: 12%"));

    // one-shot: the alert deactivated itself
    assert!(state.alerts.evaluate_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn misnamed_files_are_skipped_without_aborting() {
    let state = ServerState::new(Config::default());
    let dir = tempfile::tempdir().unwrap();
    seed_snapshots(dir.path());
    write(dir.path(), "mega_image_2025-05-08.csv", "store name has an underscore\n");
    write(dir.path(), "readme.txt", "not a snapshot at all\n");

    let report = state
        .importer
        .import_from(dir.path().to_str().unwrap())
        .await
        .unwrap();
    assert_eq!(report.files_processed, 3);
    assert_eq!(report.files_skipped, 1);
}
