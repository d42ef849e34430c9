use crate::error::Result;
use crate::fmt::money;
use crate::models::ProductSelection;
use crate::session::Session;
use crate::settings::{load_settings, settings_path};

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_file = std::path::PathBuf::from(&settings.data_file);

    println!("Settings:     {}", settings_path().display());
    println!("Data file:    {}", data_file.display());
    println!("Preview rows: {}", settings.preview_rows);
    match &settings.default_products {
        Some(products) => println!("Default:      {}", products.join(", ")),
        None => println!("Default:      first and third product"),
    }

    if data_file.is_file() {
        let session = Session::open(&data_file)?;
        let table = session.table();
        let totals = session.on_selection_changed(&ProductSelection::new());
        println!();
        println!("Rows:          {}", table.len());
        println!("Dropped (0):   {}", table.dropped_zero_sales);
        println!("Products:      {}", table.products().len());
        println!("Total sales:   {}", money(totals.total_sales));
    } else {
        println!();
        println!("Data file not found. Run `bakery use <path>` to choose one.");
    }

    Ok(())
}
