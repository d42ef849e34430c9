use std::path::PathBuf;

use crate::error::{BakeryError, Result};
use crate::loader::load_sales;
use crate::settings::{load_settings, save_settings, shellexpand_path};

pub fn run(path: &str) -> Result<()> {
    let resolved = PathBuf::from(shellexpand_path(path));
    if !resolved.is_file() {
        return Err(BakeryError::Settings(format!(
            "No sales export found at {}",
            resolved.display()
        )));
    }

    // Refuse to remember a file that would fail on every later command.
    let table = load_sales(&resolved)?;

    let mut settings = load_settings();
    settings.data_file = resolved.to_string_lossy().to_string();
    save_settings(&settings)?;

    println!("Using {} ({} rows)", resolved.display(), table.len());
    Ok(())
}
