//! Report output model
//!
//! A `ReportTable` is what the dashboard layer consumes: a stable report
//! name, typed columns, and rows whose cells line up with those columns.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single output value
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Cell {
    /// Text value (dimension labels)
    Text(String),
    /// Integer value (counts, ids, ordinal ratings)
    Int(i64),
    /// Decimal value, already rounded for display
    Float(f64),
}

impl Cell {
    /// The kind of this cell
    #[must_use]
    pub const fn kind(&self) -> CellKind {
        match self {
            Self::Text(_) => CellKind::Text,
            Self::Int(_) => CellKind::Int,
            Self::Float(_) => CellKind::Float,
        }
    }

    /// Text content, if this is a text cell
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Integer content, if this is an integer cell
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric content of integer or decimal cells
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Text(_) => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<usize> for Cell {
    fn from(value: usize) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Column value type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// UTF-8 text
    Text,
    /// 64-bit integer
    Int,
    /// 64-bit float
    Float,
}

/// A named, typed report column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Stable column name
    pub name: String,
    /// Value type of every cell in the column
    pub kind: CellKind,
}

impl Column {
    /// Create a new column
    pub fn new(name: impl Into<String>, kind: CellKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// One output row, aligned with the table's columns
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow(pub Vec<Cell>);

impl ReportRow {
    /// The cells of the row
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.0
    }
}

/// A named report result
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    /// Stable report name
    pub name: String,
    /// Column definitions
    pub columns: Vec<Column>,
    /// Rows in report order
    pub rows: Vec<ReportRow>,
    /// Number of input records skipped while loading the dataset
    pub skipped_records: usize,
}

impl ReportTable {
    /// Create an empty table with the given columns
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
            skipped_records: 0,
        }
    }

    /// Append a row; the number of cells must match the columns
    pub fn push_row(&mut self, cells: Vec<Cell>) {
        debug_assert_eq!(cells.len(), self.columns.len(), "row width mismatch");
        self.rows.push(ReportRow(cells));
    }

    /// Index of a column by name
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Look up a cell by row index and column name
    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.0.get(idx))
    }

    /// All cells of one column, in row order
    #[must_use]
    pub fn column_values(&self, column: &str) -> Vec<&Cell> {
        self.column_index(column)
            .map(|idx| self.rows.iter().filter_map(|r| r.0.get(idx)).collect())
            .unwrap_or_default()
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

struct RowView<'a> {
    columns: &'a [Column],
    row: &'a ReportRow,
}

impl Serialize for RowView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, cell) in self.columns.iter().zip(&self.row.0) {
            map.serialize_entry(&column.name, cell)?;
        }
        map.end()
    }
}

struct RowsView<'a>(&'a ReportTable);

impl Serialize for RowsView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.rows.iter().map(|row| RowView {
            columns: &self.0.columns,
            row,
        }))
    }
}

impl Serialize for ReportTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let column_names: Vec<&str> = self.columns.iter().map(|c| c.name.as_str()).collect();
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("report", &self.name)?;
        map.serialize_entry("columns", &column_names)?;
        map.serialize_entry("rows", &RowsView(self))?;
        map.serialize_entry("skipped_records", &self.skipped_records)?;
        map.end()
    }
}
