use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::error::{BakeryError, Result};
use crate::models::{SalesRecord, SalesTable};

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

/// Header names the export may use for its unnamed index column.
const INDEX_HEADERS: &[&str] = &["", "Unnamed: 0"];
const COL_PRODUCT: &str = "article";
const COL_QUANTITY: &str = "Quantity";
const COL_UNIT_PRICE: &str = "unit_price";
const COL_DATE: &str = "date";
const COL_TICKET: &str = "ticket_number";

struct Columns {
    id: usize,
    product: usize,
    quantity: usize,
    unit_price: usize,
    date: usize,
    ticket: usize,
    extra: Vec<usize>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let id = headers.iter().position(|h| INDEX_HEADERS.contains(&h));

        let mut missing = Vec::new();
        if id.is_none() {
            missing.push("<index>".to_string());
        }
        let mut required = |name: &str| {
            let idx = find(name);
            if idx.is_none() {
                missing.push(name.to_string());
            }
            idx
        };
        let product = required(COL_PRODUCT);
        let quantity = required(COL_QUANTITY);
        let unit_price = required(COL_UNIT_PRICE);
        let date = required(COL_DATE);
        let ticket = required(COL_TICKET);

        match (id, product, quantity, unit_price, date, ticket) {
            (Some(id), Some(product), Some(quantity), Some(unit_price), Some(date), Some(ticket)) => {
                let known = [id, product, quantity, unit_price, date, ticket];
                let extra = (0..headers.len()).filter(|i| !known.contains(i)).collect();
                Ok(Self {
                    id,
                    product,
                    quantity,
                    unit_price,
                    date,
                    ticket,
                    extra,
                })
            }
            _ => Err(BakeryError::Schema { missing }),
        }
    }
}

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

fn currency_symbols() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\p{Sc}").expect("static currency pattern"))
}

/// Parse a locale-formatted price such as `"1,50 €"` into `1.5`.
pub fn parse_unit_price(raw: &str) -> std::result::Result<f64, std::num::ParseFloatError> {
    let s = raw.replace(',', ".");
    let s = currency_symbols().replace_all(&s, "");
    s.trim().parse()
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a calendar date, discarding any time component.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

fn parse_id(raw: &str) -> std::result::Result<Option<i64>, std::num::ParseIntError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some)
}

fn parse_error(line: u64, column: &str, value: &str, reason: impl ToString) -> BakeryError {
    BakeryError::Parse {
        line,
        column: column.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

// ---------------------------------------------------------------------------
// load
// ---------------------------------------------------------------------------

pub fn load_sales(file_path: &Path) -> Result<SalesTable> {
    tracing::debug!("Reading sales export {}", file_path.display());
    let file = std::fs::File::open(file_path)?;
    load_sales_from_reader(std::io::BufReader::new(file))
}

/// Clean a sales export. The first unparseable row aborts the whole load.
pub fn load_sales_from_reader<R: Read>(reader: R) -> Result<SalesTable> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let cols = Columns::resolve(&headers)?;

    let mut rows = Vec::new();
    let mut dropped_zero_sales = 0usize;

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());

        let raw_price = &record[cols.unit_price];
        let unit_price = parse_unit_price(raw_price)
            .map_err(|e| parse_error(line, COL_UNIT_PRICE, raw_price, e))?;
        let raw_qty = &record[cols.quantity];
        let quantity: f64 = raw_qty
            .trim()
            .parse()
            .map_err(|e| parse_error(line, COL_QUANTITY, raw_qty, e))?;

        let sales = quantity * unit_price;
        if sales == 0.0 {
            dropped_zero_sales += 1;
            continue;
        }

        let raw_id = &record[cols.id];
        let id = parse_id(raw_id).map_err(|e| parse_error(line, "id", raw_id, e))?;
        let raw_date = &record[cols.date];
        let date = parse_date(raw_date)
            .ok_or_else(|| parse_error(line, COL_DATE, raw_date, "unrecognized date format"))?;

        rows.push(SalesRecord {
            id,
            product: record[cols.product].to_string(),
            quantity,
            unit_price,
            sales,
            date,
            ticket_number: record[cols.ticket].trim().to_string(),
            extra: cols.extra.iter().map(|&i| record[i].to_string()).collect(),
        });
    }

    tracing::info!(
        "Loaded {} sales rows ({} dropped with zero sales)",
        rows.len(),
        dropped_zero_sales
    );

    Ok(SalesTable {
        rows,
        extra_columns: cols.extra.iter().map(|&i| headers[i].to_string()).collect(),
        dropped_zero_sales,
    })
}
