use std::path::Path;

use crate::aggregator::{aggregate, AggregateResult};
use crate::error::Result;
use crate::loader::load_sales;
use crate::models::{ProductSelection, SalesTable};

/// A sales table loaded once and queried for each selection change.
pub struct Session {
    table: SalesTable,
}

impl Session {
    pub fn open(file_path: &Path) -> Result<Self> {
        Ok(Self::from_table(load_sales(file_path)?))
    }

    pub fn from_table(table: SalesTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &SalesTable {
        &self.table
    }

    pub fn default_selection(&self) -> ProductSelection {
        self.table.default_selection()
    }

    pub fn on_selection_changed(&self, selection: &ProductSelection) -> AggregateResult {
        let unknown: Vec<&str> = selection
            .iter()
            .filter(|p| !self.table.rows.iter().any(|r| r.product == *p))
            .collect();
        if !unknown.is_empty() {
            tracing::warn!("Unknown product(s) in selection: {}", unknown.join(", "));
        }
        aggregate(&self.table, selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::record;

    #[test]
    fn test_session_default_selection_drives_metrics() {
        let session = Session::from_table(SalesTable::new(vec![
            record("Baguette", 2.0, 1.0, "2021-01-01"),
            record("Croissant", 1.0, 1.5, "2021-01-01"),
            record("Tartelette", 1.0, 3.0, "2021-01-02"),
        ]));
        let selection = session.default_selection();
        let result = session.on_selection_changed(&selection);
        assert_eq!(result.filtered_rows.len(), 2);
        assert_eq!(result.total_sales, 5.0);
    }

    #[test]
    fn test_session_repeated_queries_leave_table_untouched() {
        let session = Session::from_table(SalesTable::new(vec![
            record("Baguette", 2.0, 1.0, "2021-01-01"),
            record("Croissant", 1.0, 1.5, "2021-01-01"),
        ]));
        let before = session.table().rows.clone();
        let a = session.on_selection_changed(&["Baguette"].into_iter().collect());
        let b = session.on_selection_changed(&ProductSelection::new());
        assert_eq!(a.total_sales, 2.0);
        assert_eq!(b.total_sales, 3.5);
        assert_eq!(session.table().rows, before);
    }

    #[test]
    fn test_session_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Session::open(&dir.path().join("nope.csv")).is_err());
    }
}
