pub mod load;
pub mod preview;
pub mod products;
pub mod status;
pub mod summary;

use clap::{Args, Parser, Subcommand};

use crate::models::ProductSelection;
use crate::session::Session;
use crate::settings::Settings;

#[derive(Parser)]
#[command(name = "bakery", about = "Sales dashboard for bakery point-of-sale exports.")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Clone, Default)]
pub struct SourceArgs {
    /// Sales CSV export (default: the file saved with `bakery use`)
    #[arg(long)]
    pub file: Option<String>,
}

#[derive(Args, Clone, Default)]
pub struct SelectionArgs {
    /// Product to include; repeat for several
    #[arg(long = "product", conflicts_with_all = ["all", "none"])]
    pub products: Vec<String>,
    /// Select every product in the table
    #[arg(long, conflicts_with = "none")]
    pub all: bool,
    /// Select nothing; metrics then cover the whole table
    #[arg(long)]
    pub none: bool,
}

impl SelectionArgs {
    pub(crate) fn resolve(&self, session: &Session, settings: &Settings) -> ProductSelection {
        if self.none {
            ProductSelection::new()
        } else if self.all {
            session.table().products().into_iter().collect()
        } else if !self.products.is_empty() {
            self.products.iter().cloned().collect()
        } else if let Some(defaults) = &settings.default_products {
            defaults.iter().cloned().collect()
        } else {
            session.default_selection()
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the first rows of the cleaned sales table.
    Preview {
        #[command(flatten)]
        source: SourceArgs,
        /// Number of rows (default: preview_rows setting)
        #[arg(long)]
        rows: Option<usize>,
    },
    /// List products in file order.
    Products {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Metrics, rankings and daily totals for a product selection.
    Summary {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        selection: SelectionArgs,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remember a sales export as the default data file.
    Use {
        /// Path to the CSV export
        path: String,
    },
    /// Show settings and data file statistics.
    Status,
}
