use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use sha2::{Digest, Sha256};
use thiserror::Error;

use super::model::{CellValue, Column, Table};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures surfaced by the loader. Anything past a successful parse is not
/// an error: dirty cells become nulls, not failures.
#[derive(Debug, Error)]
pub enum LoadError {
    /// CSV failed to parse under both the UTF-8 and Latin-1 attempts, or the
    /// required header row is missing.
    #[error("could not parse input as CSV: {0}")]
    Unparseable(String),
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a table from a CSV file on disk.
pub fn load_path(path: &Path) -> Result<Table, LoadError> {
    let bytes = std::fs::read(path)?;
    load_bytes(&bytes)
}

/// Load a table from raw CSV bytes.
///
/// Parsing is attempted as UTF-8 first; on any failure the whole input is
/// decoded again as Latin-1 and re-parsed. Repeated calls with the same bytes
/// return identical tables.
pub fn load_bytes(bytes: &[u8]) -> Result<Table, LoadError> {
    let first = std::str::from_utf8(bytes)
        .map_err(|e| e.to_string())
        .and_then(|text| parse_csv(text).map_err(|e| e.to_string()));

    match first {
        Ok(table) => Ok(table),
        Err(utf8_err) => {
            log::debug!("UTF-8 parse failed ({utf8_err}), retrying as Latin-1");
            let text = encoding_rs::mem::decode_latin1(bytes);
            parse_csv(&text).map_err(LoadError::Unparseable)
        }
    }
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Field spellings treated as missing values.
const NA_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "NULL", "null"];

fn parse_cell(field: &str) -> CellValue {
    if NA_MARKERS.contains(&field) {
        return CellValue::Null;
    }
    if let Ok(v) = field.trim().parse::<f64>() {
        return CellValue::Number(v);
    }
    CellValue::Text(field.to_string())
}

fn parse_csv(text: &str) -> Result<Table, String> {
    // A leading BOM would otherwise glue itself onto the first header.
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| e.to_string())?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err("missing header row".to_string());
    }
    let headers = dedup_headers(headers);

    let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.map_err(|e| e.to_string())?;
        for (i, column) in cells.iter_mut().enumerate() {
            column.push(parse_cell(record.get(i).unwrap_or("")));
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, cells)| Column::new(name, cells))
        .collect();
    Ok(Table::new(columns))
}

/// Make header names unique while preserving order. The first occurrence
/// keeps its name; later duplicates get `.1`, `.2`, ... suffixes, counting
/// further when a candidate itself collides with an existing header.
fn dedup_headers(headers: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(headers.len());
    for name in headers {
        if !out.contains(&name) {
            out.push(name);
            continue;
        }
        let mut counter = 1usize;
        let renamed = loop {
            let candidate = format!("{name}.{counter}");
            if !out.contains(&candidate) {
                break candidate;
            }
            counter += 1;
        };
        out.push(renamed);
    }
    out
}

// ---------------------------------------------------------------------------
// LoadCache – injectable memoization of the load step
// ---------------------------------------------------------------------------

/// Caller-owned cache mapping content hashes to parsed tables. A pure
/// optimization: recomputing is always safe, the cache just makes re-opening
/// the same upload free.
#[derive(Default)]
pub struct LoadCache {
    entries: HashMap<[u8; 32], Arc<Table>>,
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load bytes through the cache, parsing only on a miss.
    pub fn load(&mut self, bytes: &[u8]) -> Result<Arc<Table>, LoadError> {
        let digest: [u8; 32] = Sha256::digest(bytes).into();
        if let Some(table) = self.entries.get(&digest) {
            log::debug!("load cache hit");
            return Ok(Arc::clone(table));
        }
        let table = Arc::new(load_bytes(bytes)?);
        self.entries.insert(digest, Arc::clone(&table));
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ColumnKind;
    use std::io::Write;

    #[test]
    fn loads_basic_csv() {
        let table = load_bytes(b"name,likes\nalice,10\nbob,3\n").unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.column_names(), vec!["name", "likes"]);
        assert_eq!(table.kind_of("likes"), Some(ColumnKind::Numeric));
        assert_eq!(
            table.column("likes").unwrap().cells[0],
            CellValue::Number(10.0)
        );
    }

    #[test]
    fn duplicate_headers_are_renamed() {
        let table = load_bytes(b"a,a,b,a\n1,2,3,4\n").unwrap();
        assert_eq!(table.column_names(), vec!["a", "a.1", "b", "a.2"]);
    }

    #[test]
    fn dedup_steps_over_existing_names() {
        let headers = vec!["a".to_string(), "a.1".to_string(), "a".to_string()];
        assert_eq!(dedup_headers(headers), vec!["a", "a.1", "a.2"]);
    }

    #[test]
    fn loading_is_idempotent() {
        let bytes = b"x,y\n1,foo\n2,bar\n";
        let a = load_bytes(bytes).unwrap();
        let b = load_bytes(bytes).unwrap();
        assert_eq!(a.column_names(), b.column_names());
        assert_eq!(a.row_count(), b.row_count());
        for (ca, cb) in a.columns.iter().zip(&b.columns) {
            assert_eq!(ca.cells, cb.cells);
        }
    }

    #[test]
    fn empty_and_na_fields_become_null() {
        let table = load_bytes(b"v,w\n1,\n,NA\nNaN,x\n").unwrap();
        assert_eq!(table.column("v").unwrap().null_count(), 2);
        assert_eq!(table.column("w").unwrap().null_count(), 2);
    }

    #[test]
    fn latin1_fallback() {
        // "café,1" with 0xE9 is invalid UTF-8 but valid Latin-1.
        let bytes = b"name,n\ncaf\xe9,1\n";
        let table = load_bytes(bytes).unwrap();
        assert_eq!(
            table.column("name").unwrap().cells[0],
            CellValue::Text("café".to_string())
        );
    }

    #[test]
    fn ragged_rows_are_unparseable() {
        let err = load_bytes(b"a,b\n1,2,3\n").unwrap_err();
        assert!(matches!(err, LoadError::Unparseable(_)));
    }

    #[test]
    fn empty_input_is_unparseable() {
        assert!(matches!(load_bytes(b""), Err(LoadError::Unparseable(_))));
    }

    #[test]
    fn bom_is_stripped_from_first_header() {
        let table = load_bytes("\u{feff}a,b\n1,2\n".as_bytes()).unwrap();
        assert_eq!(table.column_names(), vec!["a", "b"]);
    }

    #[test]
    fn load_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a,b\n1,hi\n").unwrap();
        let table = load_path(file.path()).unwrap();
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn cache_returns_shared_table_for_same_bytes() {
        let mut cache = LoadCache::new();
        let a = cache.load(b"a\n1\n").unwrap();
        let b = cache.load(b"a\n1\n").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);

        let c = cache.load(b"a\n2\n").unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(cache.len(), 2);
    }
}
