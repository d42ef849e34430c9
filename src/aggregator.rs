use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{ProductSelection, SalesRecord, SalesTable};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductTotal {
    pub product: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketCount {
    pub ticket_number: String,
    pub line_items: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductAverage {
    pub product: String,
    pub avg_unit_price: f64,
}

/// Everything the presentation layer needs for one selection.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateResult {
    /// Rows matching the selection. May be empty even when the metrics are not.
    pub filtered_rows: Vec<SalesRecord>,
    /// Set when nothing matched and the metrics below cover the whole table.
    pub fell_back: bool,
    pub transaction_count: usize,
    pub total_quantity: f64,
    pub total_sales: f64,
    pub price_sales_correlation: Option<f64>,
    pub top_ticket: Option<TicketCount>,
    pub top_avg_price_product: Option<ProductAverage>,
    pub daily_sales: Vec<DailyTotal>,
    pub daily_quantity: Vec<DailyTotal>,
    pub sales_by_product: Vec<ProductTotal>,
}

// ---------------------------------------------------------------------------
// aggregate
// ---------------------------------------------------------------------------

pub fn filter_rows(table: &SalesTable, selection: &ProductSelection) -> Vec<SalesRecord> {
    table
        .rows
        .iter()
        .filter(|r| selection.contains(&r.product))
        .cloned()
        .collect()
}

pub fn aggregate(table: &SalesTable, selection: &ProductSelection) -> AggregateResult {
    let filtered_rows = filter_rows(table, selection);
    let fell_back = filtered_rows.is_empty();
    let active: &[SalesRecord] = if fell_back { &table.rows } else { &filtered_rows };
    if fell_back {
        tracing::debug!("Selection matched no rows; using whole table for metrics");
    }

    let transaction_count = active.iter().filter(|r| r.id.is_some()).count();
    let total_quantity: f64 = active.iter().map(|r| r.quantity).sum();
    let total_sales: f64 = active.iter().map(|r| r.sales).sum();
    let daily_sales = daily_totals(active, |r| r.sales);
    let daily_quantity = daily_totals(active, |r| r.quantity);
    let sales_by_product = sales_by_product(active);

    AggregateResult {
        transaction_count,
        total_quantity,
        total_sales,
        price_sales_correlation: price_sales_correlation(&table.rows),
        top_ticket: top_ticket(&table.rows),
        top_avg_price_product: top_avg_price_product(&table.rows),
        daily_sales,
        daily_quantity,
        sales_by_product,
        filtered_rows,
        fell_back,
    }
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

fn daily_totals(rows: &[SalesRecord], value: impl Fn(&SalesRecord) -> f64) -> Vec<DailyTotal> {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for row in rows {
        *by_date.entry(row.date).or_default() += value(row);
    }
    by_date
        .into_iter()
        .map(|(date, total)| DailyTotal { date, total })
        .collect()
}

/// Sales per product, smallest first. Equal totals stay in name order.
fn sales_by_product(rows: &[SalesRecord]) -> Vec<ProductTotal> {
    let mut by_product: BTreeMap<&str, f64> = BTreeMap::new();
    for row in rows {
        *by_product.entry(row.product.as_str()).or_default() += row.sales;
    }
    let mut totals: Vec<ProductTotal> = by_product
        .into_iter()
        .map(|(product, total)| ProductTotal {
            product: product.to_string(),
            total,
        })
        .collect();
    totals.sort_by(|a, b| a.total.total_cmp(&b.total));
    totals
}

// ---------------------------------------------------------------------------
// Whole-table statistics
// ---------------------------------------------------------------------------

/// Pearson correlation between unit price and sales.
pub fn price_sales_correlation(rows: &[SalesRecord]) -> Option<f64> {
    pearson(rows.iter().map(|r| (r.unit_price, r.sales)))
}

fn pearson(pairs: impl Iterator<Item = (f64, f64)> + Clone) -> Option<f64> {
    let n = pairs.clone().count();
    if n < 2 {
        return None;
    }
    let nf = n as f64;
    let (sum_x, sum_y) = pairs
        .clone()
        .fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x, sy + y));
    let (mean_x, mean_y) = (sum_x / nf, sum_y / nf);

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in pairs {
        let (dx, dy) = (x - mean_x, y - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

/// Ticket with the most line-items; the first one seen wins a tie.
pub fn top_ticket(rows: &[SalesRecord]) -> Option<TicketCount> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        let count = counts.entry(row.ticket_number.as_str()).or_insert_with(|| {
            order.push(row.ticket_number.as_str());
            0
        });
        *count += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for ticket in order {
        let count = counts[ticket];
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((ticket, count));
        }
    }
    best.map(|(ticket, line_items)| TicketCount {
        ticket_number: ticket.to_string(),
        line_items,
    })
}

/// Product with the highest mean unit price; ties go to the first name in sorted order.
pub fn top_avg_price_product(rows: &[SalesRecord]) -> Option<ProductAverage> {
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for row in rows {
        let entry = sums.entry(row.product.as_str()).or_default();
        entry.0 += row.unit_price;
        entry.1 += 1;
    }

    let mut best: Option<ProductAverage> = None;
    for (product, (sum, count)) in sums {
        let avg = sum / count as f64;
        if best.as_ref().map_or(true, |b| avg > b.avg_unit_price) {
            best = Some(ProductAverage {
                product: product.to_string(),
                avg_unit_price: avg,
            });
        }
    }
    best
}
