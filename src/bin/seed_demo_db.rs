use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;

use receiptify_rs::{
    auth::sign_up,
    category::add_category,
    receipt::{NewReceipt, upload_receipt},
    store::SqliteStore,
    tag::add_tag,
    transaction::TransactionStatus,
};

/// A utility for creating a demo database for receiptify.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

const DEMO_CATEGORIES: [&str; 6] = [
    "Dining",
    "Shopping",
    "Groceries",
    "Travel",
    "Utilities",
    "Office Supplies",
];

const DEMO_TAGS: [&str; 3] = ["work", "tax-deductible", "personal"];

/// Create and populate a database for trying out the CLI.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    if output_path
        .extension()
        .is_none_or(|extension| extension.is_empty())
    {
        eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
        exit(1);
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let mut store = SqliteStore::open(output_path)?;

    println!("Creating demo user...");
    sign_up("Demo User", "demo@example.com", "demo", "demo", &mut store)?;

    println!("Creating categories and tags...");
    for name in DEMO_CATEGORIES.iter().rev() {
        add_category(name, &mut store)?;
    }
    for name in DEMO_TAGS.iter().rev() {
        add_tag(name, &mut store)?;
    }

    println!("Creating receipts...");
    let receipts = [
        ("Starbucks", 5.75, "Dining", "Oct 26, 2023", TransactionStatus::Approved, vec!["work"]),
        ("Amazon", 42.99, "Shopping", "Oct 25, 2023", TransactionStatus::Pending, vec!["personal"]),
        ("Trader Joe's", 88.14, "Groceries", "Oct 24, 2023", TransactionStatus::Approved, vec![]),
        (
            "United Airlines",
            345.00,
            "Travel",
            "Oct 22, 2023",
            TransactionStatus::Reimbursed,
            vec!["work", "tax-deductible"],
        ),
        ("PG&E", 112.30, "Utilities", "Oct 20, 2023", TransactionStatus::Approved, vec![]),
    ];

    // Oldest first, the order they were made in. Receipts are appended.
    for (vendor, amount, category, date, status, tags) in receipts.into_iter().rev() {
        let form = NewReceipt {
            vendor: vendor.to_owned(),
            amount,
            category: category.to_owned(),
            date: date.to_owned(),
            status,
            file: format!("{}.pdf", vendor.to_lowercase().replace(' ', "-")),
            notes: None,
            tags: tags.into_iter().map(str::to_owned).collect(),
            image_preview: None,
        };
        upload_receipt(&form, &mut store)?;
    }

    println!("Success! Log in with demo@example.com and the password \"demo\".");

    Ok(())
}
