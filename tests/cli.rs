use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

const SALES_CSV: &str = "\
,date,time,ticket_number,article,Quantity,unit_price
0,2021-01-01,08:38,150040.0,BAGUETTE,2.0,\"1,00 €\"
1,2021-01-01,08:38,150040.0,PAIN AU CHOCOLAT,0.0,\"1,20 €\"
2,2021-01-01,09:14,150041.0,TRADITIONAL BAGUETTE,3.0,\"1,20 €\"
3,2021-01-02,09:14,150041.0,BAGUETTE,1.0,\"1,00 €\"
4,2021-01-02,09:25,150042.0,CROISSANT,4.0,\"1,10 €\"
";

fn write_csv(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("bakerysales.csv");
    std::fs::write(&path, content).unwrap();
    path
}

fn bakery(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bakery").unwrap();
    cmd.env("HOME", home).env_remove("RUST_LOG");
    cmd
}

#[test]
fn summary_json_uses_default_selection() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(dir.path(), SALES_CSV);

    let output = bakery(dir.path())
        .args(["summary", "--json", "--file"])
        .arg(&csv)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    // Products in file order: BAGUETTE, TRADITIONAL BAGUETTE, CROISSANT
    let products: Vec<&str> = json["filtered_rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["product"].as_str().unwrap())
        .collect();
    assert_eq!(products, vec!["BAGUETTE", "BAGUETTE", "CROISSANT"]);
    assert_eq!(json["fell_back"], false);
    assert_eq!(json["transaction_count"], 3);
    assert_eq!(json["top_ticket"]["ticket_number"], "150041.0");
    assert_eq!(json["top_avg_price_product"]["product"], "TRADITIONAL BAGUETTE");
    assert_eq!(json["daily_sales"][0]["date"], "2021-01-01");
}

#[test]
fn summary_none_falls_back_to_all_rows() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(dir.path(), SALES_CSV);

    let output = bakery(dir.path())
        .args(["summary", "--none", "--json", "--file"])
        .arg(&csv)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["fell_back"], true);
    assert_eq!(json["filtered_rows"].as_array().unwrap().len(), 0);
    assert_eq!(json["transaction_count"], 4);
    assert_eq!(json["total_quantity"], 10.0);
}

#[test]
fn summary_text_for_explicit_product() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(dir.path(), SALES_CSV);

    bakery(dir.path())
        .args(["summary", "--product", "CROISSANT", "--file"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected products: CROISSANT"))
        .stdout(predicate::str::contains("Selected rows (1)"))
        .stdout(predicate::str::contains("4.40 €"));
}

#[test]
fn summary_rejects_conflicting_selection_flags() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(dir.path(), SALES_CSV);

    bakery(dir.path())
        .args(["summary", "--all", "--none", "--file"])
        .arg(&csv)
        .assert()
        .failure();
}

#[test]
fn preview_reports_dropped_rows() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(dir.path(), SALES_CSV);

    bakery(dir.path())
        .args(["preview", "--rows", "2", "--file"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 of 4 rows, 1 dropped with zero sales"))
        .stdout(predicate::str::contains("PAIN AU CHOCOLAT").not());
}

#[test]
fn products_marks_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(dir.path(), SALES_CSV);

    bakery(dir.path())
        .env("NO_COLOR", "1")
        .args(["products", "--file"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("TRADITIONAL BAGUETTE"))
        .stdout(predicate::str::contains("yes"));
}

#[test]
fn missing_file_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();

    bakery(dir.path())
        .args(["summary", "--file"])
        .arg(dir.path().join("nope.csv"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn bad_price_aborts_load() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(
        dir.path(),
        ",date,ticket_number,article,Quantity,unit_price\n0,2021-01-01,1,BAGUETTE,1,gratis\n",
    );

    bakery(dir.path())
        .args(["summary", "--file"])
        .arg(&csv)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unit_price"));
}

#[test]
fn missing_columns_abort_load() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(dir.path(), ",date,article\n0,2021-01-01,BAGUETTE\n");

    bakery(dir.path())
        .args(["preview", "--file"])
        .arg(&csv)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing required column(s)"))
        .stderr(predicate::str::contains("unit_price"));
}

#[test]
fn use_remembers_data_file() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(dir.path(), SALES_CSV);

    bakery(dir.path())
        .arg("use")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("4 rows"));

    assert!(dir.path().join(".config/bakery/settings.json").exists());

    bakery(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows:          4"))
        .stdout(predicate::str::contains("Products:      3"))
        .stdout(predicate::str::contains("Total sales:   11.00 €"));

    bakery(dir.path())
        .args(["summary", "--all", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"fell_back\": false"));
}
