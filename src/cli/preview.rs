use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::fmt::{money, quantity};
use crate::models::SalesRecord;
use crate::session::Session;
use crate::settings::{load_settings, resolve_data_file};

pub fn run(file: Option<&str>, rows: Option<usize>) -> Result<()> {
    let settings = load_settings();
    let session = Session::open(&resolve_data_file(file))?;
    let table = session.table();
    let n = rows.unwrap_or(settings.preview_rows);

    let mut header = vec!["Id", "Date", "Ticket", "Product", "Qty", "Unit Price", "Sales"];
    header.extend(table.extra_columns.iter().map(String::as_str));
    let mut out = Table::new();
    out.set_header(header);
    for row in table.head(n) {
        let mut cells = vec![
            Cell::new(row.id.map(|i| i.to_string()).unwrap_or_default()),
            Cell::new(row.date),
            Cell::new(&row.ticket_number),
            Cell::new(&row.product),
            Cell::new(quantity(row.quantity)),
            Cell::new(money(row.unit_price)),
            Cell::new(money(row.sales)),
        ];
        cells.extend(row.extra.iter().map(Cell::new));
        out.add_row(cells);
    }

    println!(
        "Sales ({} of {} rows, {} dropped with zero sales)\n{out}",
        n.min(table.len()),
        table.len(),
        table.dropped_zero_sales
    );
    Ok(())
}

/// Detail listing of a row subset: date, product, quantity, unit price, sales.
pub(crate) fn rows_table(rows: &[SalesRecord]) -> Table {
    let mut out = Table::new();
    out.set_header(vec!["Date", "Product", "Qty", "Unit Price", "Sales"]);
    for row in rows {
        out.add_row(vec![
            Cell::new(row.date),
            Cell::new(&row.product),
            Cell::new(quantity(row.quantity)),
            Cell::new(money(row.unit_price)),
            Cell::new(money(row.sales)),
        ]);
    }
    out
}
