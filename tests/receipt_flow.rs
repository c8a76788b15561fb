use time::macros::date;

use receiptify_rs::{
    AppState, Error, RecordId,
    auth::{log_in, log_out, require_user, sign_up},
    category::{add_category, delete_category, get_category_usage, rename_category},
    dashboard::{DashboardSummary, Report, ReportFilter},
    export::transactions_to_csv,
    notification::get_notifications,
    pagination::PaginationConfig,
    receipt::{
        NewReceipt, ReceiptFilter, delete_receipts_with_transactions, filter_receipt_rows,
        get_all_receipts, receipt_rows, upload_receipt,
    },
    store::SqliteStore,
    tag::{add_tag, get_tag_usage, rename_tag},
    transaction::{TransactionStatus, get_all_transactions},
};

fn form(vendor: &str, amount: f64, category: &str, date: &str, tags: &[&str]) -> NewReceipt {
    NewReceipt {
        vendor: vendor.to_owned(),
        amount,
        category: category.to_owned(),
        date: date.to_owned(),
        status: TransactionStatus::Approved,
        file: format!("{vendor}.pdf"),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        ..Default::default()
    }
}

fn open_temp_state(dir: &tempfile::TempDir) -> AppState<SqliteStore> {
    let path = dir.path().join("receiptify.db");
    let path = path.to_str().expect("temp path should be valid UTF-8");

    AppState::open(path, "Etc/UTC", PaginationConfig::default()).expect("could not open state")
}

#[test]
fn records_survive_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut state = open_temp_state(&dir);
        sign_up("Ada", "ada@example.com", "pw", "pw", &mut state.store).unwrap();
        upload_receipt(
            &form("Cafe", 4.5, "Dining", "2024-01-05", &[]),
            &mut state.store,
        )
        .unwrap();
    }

    let state = open_temp_state(&dir);

    assert_eq!(require_user(&state.store).unwrap().name, "Ada");
    let rows = receipt_rows(&state.store).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].vendor, "Cafe");
}

#[test]
fn log_out_then_log_in_again() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    sign_up("Ada", "ada@example.com", "pw", "pw", &mut store).unwrap();

    log_out(&mut store).unwrap();
    assert_eq!(require_user(&store), Err(Error::NotAuthenticated));

    assert_eq!(
        log_in("ada@example.com", "wrong", &mut store),
        Err(Error::InvalidCredentials)
    );
    log_in("ada@example.com", "pw", &mut store).unwrap();
    assert_eq!(require_user(&store).unwrap().email, "ada@example.com");
}

#[test]
fn category_changes_cascade_to_receipts_and_dashboard() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let dining = add_category("Dining", &mut store).unwrap();
    add_category("Travel", &mut store).unwrap();

    upload_receipt(&form("Cafe", 5.0, "Dining", "2024-01-05", &[]), &mut store).unwrap();
    upload_receipt(&form("Bistro", 15.0, "Dining", "2024-01-12", &[]), &mut store).unwrap();
    upload_receipt(&form("Airline", 300.0, "Travel", "2024-01-20", &[]), &mut store).unwrap();

    rename_category(&dining.id, "Eating Out", &mut store).unwrap();

    let rows = filter_receipt_rows(
        receipt_rows(&store).unwrap(),
        &ReceiptFilter {
            category: Some("Eating Out".to_owned()),
            ..Default::default()
        },
    );
    assert_eq!(rows.len(), 2);

    let summary = DashboardSummary::compute(
        &get_all_transactions(&store).unwrap(),
        &get_all_receipts(&store).unwrap(),
        date!(2024 - 01 - 25),
    );
    assert_eq!(summary.total_spending, 320.0);
    assert_eq!(summary.receipt_count, 3);
    assert_eq!(summary.top_category, Some(("Travel".to_owned(), 300.0)));

    delete_category(&dining.id, &mut store).unwrap();

    let usage = get_category_usage(&store).unwrap();
    assert_eq!(usage.len(), 1);
    assert_eq!(usage[0].category.name.as_ref(), "Travel");
    assert_eq!(usage[0].transaction_count, 1);

    let uncategorized = get_all_transactions(&store)
        .unwrap()
        .into_iter()
        .filter(|transaction| transaction.category.is_empty())
        .count();
    assert_eq!(uncategorized, 2);
}

#[test]
fn tag_rename_rewrites_receipts() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let work = add_tag("work", &mut store).unwrap();
    upload_receipt(
        &form("Cafe", 5.0, "Dining", "2024-01-05", &["work", "lunch"]),
        &mut store,
    )
    .unwrap();

    rename_tag(&work.id, "business", &mut store).unwrap();

    let receipts = get_all_receipts(&store).unwrap();
    assert_eq!(receipts[0].tag_names(), ["business", "lunch"]);
    let usage = get_tag_usage(&store).unwrap();
    assert_eq!(usage[0].receipt_count, 1);
}

#[test]
fn deleting_receipts_removes_transactions_and_notifies() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let (_, cafe) =
        upload_receipt(&form("Cafe", 5.0, "Dining", "2024-01-05", &[]), &mut store).unwrap();
    upload_receipt(&form("Bistro", 15.0, "Dining", "2024-01-12", &[]), &mut store).unwrap();

    let deleted = delete_receipts_with_transactions(
        &[cafe.id.clone(), RecordId::from("missing")],
        &mut store,
    )
    .unwrap();

    assert_eq!(deleted, 1);
    assert_eq!(get_all_receipts(&store).unwrap().len(), 1);
    let vendors: Vec<String> = get_all_transactions(&store)
        .unwrap()
        .into_iter()
        .map(|transaction| transaction.vendor)
        .collect();
    assert_eq!(vendors, ["Bistro"]);
    assert_eq!(get_notifications(&store).unwrap()[0].title, "Receipt deleted");
}

#[test]
fn report_exports_filtered_transactions() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    upload_receipt(&form("Cafe", 5.0, "Dining", "2024-01-05", &[]), &mut store).unwrap();
    upload_receipt(&form("Airline", 300.0, "Travel", "2024-02-20", &[]), &mut store).unwrap();

    let report = Report::compute(
        &get_all_transactions(&store).unwrap(),
        &get_all_receipts(&store).unwrap(),
        &ReportFilter {
            from: Some(date!(2024 - 01 - 01)),
            to: Some(date!(2024 - 01 - 31)),
            category: None,
        },
    );

    assert_eq!(report.total_spending, 5.0);
    assert_eq!(report.receipt_count, 1);
    assert_eq!(
        transactions_to_csv(&report.transactions).unwrap(),
        "date,vendor,category,amount,status\n2024-01-05,Cafe,Dining,5.00,Approved\n"
    );
}
