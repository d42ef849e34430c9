use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::aggregator::{AggregateResult, DailyTotal};
use crate::cli::preview::rows_table;
use crate::cli::SelectionArgs;
use crate::error::Result;
use crate::fmt::{money, quantity, ratio};
use crate::models::ProductSelection;
use crate::session::Session;
use crate::settings::{load_settings, resolve_data_file};

pub fn run(file: Option<&str>, selection: &SelectionArgs, json: bool) -> Result<()> {
    let settings = load_settings();
    let session = Session::open(&resolve_data_file(file))?;
    let selection = selection.resolve(&session, &settings);
    let result = session.on_selection_changed(&selection);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", render(&selection, &result));
    }
    Ok(())
}

pub(crate) fn render(selection: &ProductSelection, result: &AggregateResult) -> String {
    let mut out = String::new();

    let label = if selection.is_empty() {
        "(none)".to_string()
    } else {
        selection.iter().collect::<Vec<_>>().join(", ")
    };
    out.push_str(&format!("Selected products: {label}\n"));
    if result.fell_back {
        out.push_str(&format!(
            "{}\n",
            "No rows match the selection; metrics cover all products.".yellow()
        ));
    }

    let mut metrics = Table::new();
    metrics.set_header(vec!["Transactions", "Total Quantity", "Total Sales"]);
    metrics.add_row(vec![
        Cell::new(result.transaction_count),
        Cell::new(quantity(result.total_quantity)),
        Cell::new(money(result.total_sales)),
    ]);
    out.push_str(&format!("\nCalculations\n{metrics}\n"));

    let mut stats = Table::new();
    stats.set_header(vec!["Unit Price & Sales Correlation", "Top Value", "Top Ticket"]);
    let top_value = result
        .top_avg_price_product
        .as_ref()
        .map(|p| format!("{} ({})", p.product, money(p.avg_unit_price)))
        .unwrap_or_else(|| "n/a".to_string());
    let top_ticket = result
        .top_ticket
        .as_ref()
        .map(|t| format!("{} ({} items)", t.ticket_number, t.line_items))
        .unwrap_or_else(|| "n/a".to_string());
    stats.add_row(vec![
        Cell::new(ratio(result.price_sales_correlation)),
        Cell::new(top_value),
        Cell::new(top_ticket),
    ]);
    out.push_str(&format!("\nWhole-table statistics\n{stats}\n"));

    out.push_str(&format!(
        "\nSelected rows ({})\n{}\n",
        result.filtered_rows.len(),
        rows_table(&result.filtered_rows)
    ));

    let mut ranking = Table::new();
    ranking.set_header(vec!["Product", "Sales"]);
    for item in &result.sales_by_product {
        ranking.add_row(vec![Cell::new(&item.product), Cell::new(money(item.total))]);
    }
    out.push_str(&format!("\n{}\n{ranking}\n", "Total sales by product".bold()));

    out.push_str(&format!(
        "\n{}\n{}\n",
        "Total daily sales".bold(),
        daily_table("Total Sales", &result.daily_sales, money)
    ));
    out.push_str(&format!(
        "\n{}\n{}",
        "Total daily quantity".bold(),
        daily_table("Total Qty", &result.daily_quantity, quantity)
    ));
    out
}

fn daily_table(label: &str, series: &[DailyTotal], fmt: fn(f64) -> String) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Date", label]);
    for day in series {
        table.add_row(vec![Cell::new(day.date), Cell::new(fmt(day.total))]);
    }
    table
}
