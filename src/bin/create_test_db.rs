use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use serde_json::json;

use expense_tracker::{Database, NewRecord, create_record};

/// A utility for creating a test database for the REST API server of expense_tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let database = Database::open(output_path)?;

    println!("Creating test records...");

    let records = [
        ("2024-01-15", json!(-42.5), Some(1), "lunch"),
        ("2024-01-16", json!(-3.2), Some(2), "bus fare"),
        ("2024-01-31", json!(2500), Some(8), "January pay"),
        ("2024-02-02", json!(-19.99), None, "uncategorised"),
    ];

    for (date, amount, category_id, remarks) in records {
        create_record(
            &database,
            NewRecord {
                date: date.to_owned(),
                amount,
                category_id,
                remarks: Some(remarks.to_owned()),
            },
        )?;
    }

    println!("Success!");

    Ok(())
}
