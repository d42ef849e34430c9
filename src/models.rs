use chrono::NaiveDate;
use serde::Serialize;

/// One line-item of the cleaned sales table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRecord {
    pub id: Option<i64>,
    pub product: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub sales: f64,
    pub date: NaiveDate,
    pub ticket_number: String,
    /// Pass-through columns, aligned with `SalesTable::extra_columns`.
    #[serde(skip)]
    pub extra: Vec<String>,
}

/// The cleaned table. Built once by the loader and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct SalesTable {
    pub rows: Vec<SalesRecord>,
    pub extra_columns: Vec<String>,
    pub dropped_zero_sales: usize,
}

impl SalesTable {
    #[allow(dead_code)]
    pub fn new(rows: Vec<SalesRecord>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn head(&self, n: usize) -> &[SalesRecord] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Unique product names in file order.
    pub fn products(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.rows
            .iter()
            .filter(|r| seen.insert(r.product.as_str()))
            .map(|r| r.product.as_str())
            .collect()
    }

    /// First and third product in file order, skipping whichever is absent.
    pub fn default_selection(&self) -> ProductSelection {
        let products = self.products();
        [0, 2]
            .iter()
            .filter_map(|&i| products.get(i).copied())
            .collect()
    }
}

/// Ordered set of product names chosen by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductSelection(Vec<String>);

impl ProductSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, product: impl Into<String>) {
        let product = product.into();
        if !self.contains(&product) {
            self.0.push(product);
        }
    }

    pub fn contains(&self, product: &str) -> bool {
        self.0.iter().any(|p| p == product)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ProductSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Self::new();
        for product in iter {
            selection.insert(product);
        }
        selection
    }
}
