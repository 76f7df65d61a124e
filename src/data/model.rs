use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the loose typing of CSV data.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Null => write!(f, ""),
        }
    }
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Numeric value of the cell, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Text rendering of a non-null cell (numbers go through `Display`).
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(v) => Some(v.to_string()),
            CellValue::Null => None,
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnKind – one-shot column classification
// ---------------------------------------------------------------------------

/// Nominal kind of a column, computed once at load time and reused by every
/// explorer instead of re-inspecting cells per component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Every non-null cell is numeric.
    Numeric,
    /// String-valued, low cardinality (distinct values at most half the
    /// non-null count).
    Categorical,
    /// String-valued and the first [`DATETIME_SAMPLE`] non-null values all
    /// parse as timestamps.
    DatetimeCandidate,
    /// String-valued, high cardinality.
    Text,
    /// Empty or all-null column.
    Unresolved,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Categorical => write!(f, "categorical"),
            ColumnKind::DatetimeCandidate => write!(f, "datetime"),
            ColumnKind::Text => write!(f, "text"),
            ColumnKind::Unresolved => write!(f, "unresolved"),
        }
    }
}

impl ColumnKind {
    /// Kinds whose cells are strings. These all show up in the categorical
    /// and text explorers, the kind split only refines defaults and labels.
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            ColumnKind::Categorical | ColumnKind::Text | ColumnKind::DatetimeCandidate
        )
    }
}

/// How many leading non-null values the datetime heuristic samples.
pub const DATETIME_SAMPLE: usize = 20;

// ---------------------------------------------------------------------------
// Timestamp parsing
// ---------------------------------------------------------------------------

/// Calendar layouts accepted by the strict timestamp parse, tried in order
/// after RFC 3339.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Strictly parse one cell's text as a timestamp. Date-only forms resolve to
/// midnight.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// A named column of cells. Cell order is row order from the source file.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub cells: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        Column {
            name: name.into(),
            cells,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn null_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_null()).count()
    }

    pub fn non_null_count(&self) -> usize {
        self.len() - self.null_count()
    }

    /// Row-aligned numeric view of the cells (non-numeric cells become None).
    pub fn numeric_values(&self) -> Vec<Option<f64>> {
        self.cells.iter().map(CellValue::as_f64).collect()
    }

    /// Non-null cells rendered to text, in row order.
    pub fn text_values(&self) -> impl Iterator<Item = String> + '_ {
        self.cells.iter().filter_map(CellValue::as_text)
    }

    /// Classify the column from its cells. Runs once, at table construction.
    pub fn classify(&self) -> ColumnKind {
        let non_null = self.non_null_count();
        if non_null == 0 {
            return ColumnKind::Unresolved;
        }
        if self
            .cells
            .iter()
            .all(|c| c.is_null() || c.as_f64().is_some())
        {
            return ColumnKind::Numeric;
        }

        // Datetime heuristic: first DATETIME_SAMPLE non-null values, coerced
        // to text, must all strict-parse.
        let sample: Vec<String> = self.text_values().take(DATETIME_SAMPLE).collect();
        if !sample.is_empty() && sample.iter().all(|s| parse_timestamp(s).is_some()) {
            return ColumnKind::DatetimeCandidate;
        }

        let mut distinct: Vec<&str> = self
            .cells
            .iter()
            .filter_map(|c| match c {
                CellValue::Text(s) => Some(s.as_str()),
                _ => None,
            })
            .collect();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.len() * 2 <= non_null {
            ColumnKind::Categorical
        } else {
            ColumnKind::Text
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The immutable tabular dataset derived from one uploaded CSV, with the
/// per-column kinds precomputed at construction.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<Column>,
    pub kinds: Vec<ColumnKind>,
}

impl Table {
    /// Build a table and classify its columns. Callers must hand in columns
    /// with unique names (the loader's dedup step guarantees this).
    pub fn new(columns: Vec<Column>) -> Self {
        let kinds = columns.iter().map(Column::classify).collect();
        Table { columns, kinds }
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn kind_of(&self, name: &str) -> Option<ColumnKind> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .map(|i| self.kinds[i])
    }

    /// Order-preserving projection onto a subset of column names.
    pub fn select(&self, names: &[String]) -> Table {
        let columns: Vec<Column> = self
            .columns
            .iter()
            .filter(|c| names.iter().any(|n| *n == c.name))
            .cloned()
            .collect();
        Table::new(columns)
    }

    /// Numeric-kind columns, later duplicate names skipped.
    pub fn numeric_columns(&self) -> Vec<&Column> {
        let mut seen: Vec<&str> = Vec::new();
        self.columns
            .iter()
            .zip(&self.kinds)
            .filter(|(_, k)| **k == ColumnKind::Numeric)
            .filter_map(|(c, _)| {
                if seen.contains(&c.name.as_str()) {
                    None
                } else {
                    seen.push(&c.name);
                    Some(c)
                }
            })
            .collect()
    }

    /// String-valued columns (categorical, text, and datetime candidates).
    pub fn textual_columns(&self) -> Vec<&Column> {
        self.columns
            .iter()
            .zip(&self.kinds)
            .filter(|(_, k)| k.is_textual())
            .map(|(c, _)| c)
            .collect()
    }

    /// Names of columns flagged datetime-like by the classification step.
    pub fn datetime_candidates(&self) -> Vec<&str> {
        self.columns
            .iter()
            .zip(&self.kinds)
            .filter(|(_, k)| **k == ColumnKind::DatetimeCandidate)
            .map(|(c, _)| c.name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn num(v: f64) -> CellValue {
        CellValue::Number(v)
    }

    #[test]
    fn classify_numeric() {
        let col = Column::new("n", vec![num(1.0), CellValue::Null, num(2.5)]);
        assert_eq!(col.classify(), ColumnKind::Numeric);
    }

    #[test]
    fn classify_all_null_is_unresolved() {
        let col = Column::new("n", vec![CellValue::Null, CellValue::Null]);
        assert_eq!(col.classify(), ColumnKind::Unresolved);
        let empty = Column::new("e", Vec::new());
        assert_eq!(empty.classify(), ColumnKind::Unresolved);
    }

    #[test]
    fn classify_categorical_vs_text() {
        let cells: Vec<CellValue> = ["a", "a", "b", "a", "b", "b"]
            .iter()
            .map(|s| text(s))
            .collect();
        assert_eq!(Column::new("c", cells).classify(), ColumnKind::Categorical);

        let cells: Vec<CellValue> = ["one post", "another post", "third post"]
            .iter()
            .map(|s| text(s))
            .collect();
        assert_eq!(Column::new("t", cells).classify(), ColumnKind::Text);
    }

    #[test]
    fn classify_datetime_candidate() {
        let cells: Vec<CellValue> = (1..=25)
            .map(|d| text(&format!("2024-01-{d:02}")))
            .collect();
        let col = Column::new("ts", cells);
        assert_eq!(col.classify(), ColumnKind::DatetimeCandidate);
    }

    #[test]
    fn datetime_heuristic_only_samples_leading_values() {
        // First 20 parse, the 21st does not: still a candidate.
        let mut cells: Vec<CellValue> = (1..=20)
            .map(|d| text(&format!("2024-01-{d:02}")))
            .collect();
        cells.push(text("not a date"));
        assert_eq!(
            Column::new("ts", cells).classify(),
            ColumnKind::DatetimeCandidate
        );
    }

    #[test]
    fn mixed_cells_are_textual() {
        let col = Column::new("m", vec![num(1.0), text("oops"), num(2.0)]);
        assert!(col.classify().is_textual());
    }

    #[test]
    fn parse_timestamp_formats() {
        assert!(parse_timestamp("2024-01-02").is_some());
        assert!(parse_timestamp("2024/01/02").is_some());
        assert!(parse_timestamp("01/02/2024").is_some());
        assert!(parse_timestamp("2024-01-02 13:45:00").is_some());
        assert!(parse_timestamp("2024-01-02T13:45:00Z").is_some());
        assert!(parse_timestamp("42").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn select_preserves_table_order() {
        let table = Table::new(vec![
            Column::new("a", vec![num(1.0)]),
            Column::new("b", vec![text("x")]),
            Column::new("c", vec![num(2.0)]),
        ]);
        let sel = table.select(&["c".to_string(), "a".to_string()]);
        assert_eq!(sel.column_names(), vec!["a", "c"]);
    }

    #[test]
    fn views_split_by_kind() {
        let table = Table::new(vec![
            Column::new("likes", vec![num(1.0), num(2.0)]),
            Column::new("platform", vec![text("x"), text("x")]),
            Column::new("when", vec![text("2024-01-01"), text("2024-01-02")]),
        ]);
        assert_eq!(table.numeric_columns().len(), 1);
        assert_eq!(table.textual_columns().len(), 2);
        assert_eq!(table.datetime_candidates(), vec!["when"]);
    }
}
