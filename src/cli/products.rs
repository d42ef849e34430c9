use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::session::Session;
use crate::settings::resolve_data_file;

pub fn run(file: Option<&str>) -> Result<()> {
    let session = Session::open(&resolve_data_file(file))?;
    let defaults = session.default_selection();

    let mut table = Table::new();
    table.set_header(vec!["#", "Product", "Default"]);
    for (i, product) in session.table().products().into_iter().enumerate() {
        let marker = if defaults.contains(product) {
            "yes".green().to_string()
        } else {
            String::new()
        };
        table.add_row(vec![Cell::new(i + 1), Cell::new(product), Cell::new(marker)]);
    }
    println!("Products\n{table}");
    Ok(())
}
