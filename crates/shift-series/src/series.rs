//! Ordered, column-typed series with a movable cursor
//!
//! [`DataSeries`] holds the rows a detector scans. Rows are fixed in order
//! at construction, short rows are padded with nulls to the widest observed
//! row, and the numeric / non-numeric column snapshots are computed once up
//! front so later view switches cannot change them.
//!
//! The cursor marks the row currently under analysis. It moves through
//! [`DataSeries::iter_rows`]; the bounded window reads
//! [`DataSeries::next_n`] and [`DataSeries::previous_n`] are relative to it
//! and exclusive of it.

use std::fmt;
use std::str::FromStr;

use shift_core::{Error, Result};

use crate::value::{Column, ColumnKind, Value};

/// Which columns the series exposes during iteration and reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    /// Every column, in original order
    All,
    /// Only the columns that were numeric at construction
    Numeric,
    /// Only the columns that were non-numeric at construction
    NonNumeric,
    /// Columns whose kind is in the given list
    Kinds(Vec<ColumnKind>),
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::All
    }
}

impl FromStr for ViewMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(ViewMode::All),
            "numeric" => Ok(ViewMode::Numeric),
            "non-numeric" => Ok(ViewMode::NonNumeric),
            other => Err(Error::UnknownDataType(other.to_string())),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::All => write!(f, "all"),
            ViewMode::Numeric => write!(f, "numeric"),
            ViewMode::NonNumeric => write!(f, "non-numeric"),
            ViewMode::Kinds(kinds) => {
                write!(f, "kinds[")?;
                for (i, k) in kinds.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// One materialized row: its original index plus the cells of the active view
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    index: usize,
    values: Vec<Value>,
}

impl Row {
    /// Position of this row in the original series
    pub fn index(&self) -> usize {
        self.index
    }

    /// The cells of this row, in active-view column order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Number of cells in the row
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the active view projected away every column
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The cell at view position `i`
    pub fn value(&self, i: usize) -> Option<&Value> {
        self.values.get(i)
    }

    /// The numeric content of the cell at view position `i`, if any
    pub fn number(&self, i: usize) -> Option<f64> {
        self.values.get(i).and_then(Value::as_number)
    }

    /// The textual content of the cell at view position `i`, if any
    pub fn text(&self, i: usize) -> Option<&str> {
        self.values.get(i).and_then(Value::as_text)
    }

    /// True if the cell at view position `i` is null or absent
    pub fn is_null(&self, i: usize) -> bool {
        self.values.get(i).map(Value::is_null).unwrap_or(true)
    }

    /// The first textual cell of the row, used as a location label
    /// (revision, build id) when one is present.
    pub fn label(&self) -> Option<&str> {
        self.values.iter().find_map(Value::as_text)
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {} [", self.index)?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

/// An ordered, indexable, column-typed series of telemetry rows
#[derive(Debug, Clone)]
pub struct DataSeries {
    columns: Vec<Column>,
    n_rows: usize,
    /// Columns that were numeric at construction; stable across view changes
    numeric_cols: Vec<usize>,
    /// Columns that were non-numeric at construction; stable across view changes
    nonnumeric_cols: Vec<usize>,
    active: Vec<usize>,
    mode: ViewMode,
    cursor: usize,
    current: Option<Row>,
}

impl DataSeries {
    /// Build a series from raw rows, inferring every column kind.
    ///
    /// Rows may be jagged; short rows are padded with nulls up to the widest
    /// observed row.
    pub fn from_rows(rows: Vec<Vec<Value>>) -> Result<Self> {
        Self::build(rows, None)
    }

    /// Build a series with declared per-column kinds.
    ///
    /// `kinds` must name one kind per (padded) column; a declared kind that
    /// contradicts the observed cells fails with a format error.
    pub fn with_kinds(rows: Vec<Vec<Value>>, kinds: Vec<ColumnKind>) -> Result<Self> {
        Self::build(rows, Some(kinds))
    }

    fn build(rows: Vec<Vec<Value>>, kinds: Option<Vec<ColumnKind>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.iter().map(Vec::len).max().unwrap_or(0);

        if let Some(hints) = &kinds {
            if hints.len() != n_cols {
                return Err(Error::DataFormat(format!(
                    "{} column kinds declared for {} columns",
                    hints.len(),
                    n_cols
                )));
            }
        }

        let mut columns = Vec::with_capacity(n_cols);
        let mut cells = Vec::with_capacity(n_rows);
        for col in 0..n_cols {
            cells.clear();
            for row in &rows {
                cells.push(row.get(col).cloned().unwrap_or(Value::Null));
            }
            let hint = kinds.as_ref().map(|hints| hints[col]);
            columns.push(Column::from_cells(col, &cells, hint)?);
        }

        let numeric_cols: Vec<usize> = (0..n_cols)
            .filter(|&c| columns[c].kind() == ColumnKind::Numeric)
            .collect();
        let nonnumeric_cols: Vec<usize> = (0..n_cols)
            .filter(|&c| columns[c].kind() != ColumnKind::Numeric)
            .collect();

        Ok(Self {
            active: (0..n_cols).collect(),
            columns,
            n_rows,
            numeric_cols,
            nonnumeric_cols,
            mode: ViewMode::All,
            cursor: 0,
            current: None,
        })
    }

    /// Switch the active view.
    ///
    /// Only the active column set is recomputed; the numeric / non-numeric
    /// snapshots taken at construction are untouched. An empty kind list is
    /// rejected and leaves the series unchanged.
    pub fn set_view(&mut self, mode: ViewMode) -> Result<()> {
        let active = match &mode {
            ViewMode::All => (0..self.columns.len()).collect(),
            ViewMode::Numeric => self.numeric_cols.clone(),
            ViewMode::NonNumeric => self.nonnumeric_cols.clone(),
            ViewMode::Kinds(kinds) => {
                if kinds.is_empty() {
                    return Err(Error::UnknownDataType(
                        "empty column kind list".to_string(),
                    ));
                }
                (0..self.columns.len())
                    .filter(|&c| kinds.contains(&self.columns[c].kind()))
                    .collect()
            }
        };
        self.active = active;
        self.mode = mode;
        self.current = None;
        Ok(())
    }

    /// The active view mode
    pub fn view(&self) -> &ViewMode {
        &self.mode
    }

    /// Original indices of the columns in the active view
    pub fn active_columns(&self) -> &[usize] {
        &self.active
    }

    /// Number of rows in the series
    pub fn len(&self) -> usize {
        self.n_rows
    }

    /// True if the series has no rows
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// Number of columns after padding
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// The kind of column `col`, if it exists
    pub fn column_kind(&self, col: usize) -> Option<ColumnKind> {
        self.columns.get(col).map(Column::kind)
    }

    /// The non-null numeric values of column `col`, in row order
    pub fn numeric_column(&self, col: usize) -> Result<Vec<f64>> {
        let column = self
            .columns
            .get(col)
            .ok_or_else(|| Error::IndexOutOfRange(format!("no column {col}")))?;
        if column.kind() != ColumnKind::Numeric {
            return Err(Error::DataFormat(format!(
                "column {col} is {}, not numeric",
                column.kind()
            )));
        }
        Ok((0..self.n_rows)
            .filter_map(|row| column.value(row).as_number())
            .collect())
    }

    /// The row under the cursor.
    ///
    /// During iteration this is the most recently yielded row. Repeated
    /// calls return the same row until the cursor moves.
    pub fn current(&self) -> Result<Row> {
        if let Some(row) = &self.current {
            return Ok(row.clone());
        }
        if self.n_rows == 0 {
            return Err(Error::empty_view("current"));
        }
        Ok(self.materialize(self.cursor.min(self.n_rows - 1)))
    }

    /// Up to `n` rows strictly after the cursor, exclusive of the cursor row.
    ///
    /// Returns fewer rows (possibly none) when the series runs out before
    /// `n` rows are available; running past the end is not an error.
    pub fn next_n(&self, n: usize) -> Result<Vec<Row>> {
        if n == 0 {
            return Err(Error::zero_points("next_n"));
        }
        let start = (self.cursor + 1).min(self.n_rows);
        let end = self.cursor.saturating_add(n).saturating_add(1).min(self.n_rows);
        Ok((start..end).map(|i| self.materialize(i)).collect())
    }

    /// Up to `n` rows strictly before the cursor, clamped at the first row.
    pub fn previous_n(&self, n: usize) -> Result<Vec<Row>> {
        if n == 0 {
            return Err(Error::zero_points("previous_n"));
        }
        let start = self.cursor.saturating_sub(n);
        let end = self.cursor.min(self.n_rows);
        Ok((start..end).map(|i| self.materialize(i)).collect())
    }

    /// Iterate the series from the beginning of the active view.
    ///
    /// Each yielded row advances the cursor, so [`DataSeries::current`]
    /// tracks the traversal. A fresh call restarts from the first row
    /// without touching the underlying data.
    pub fn iter_rows(&mut self) -> RowCursor<'_> {
        self.cursor = 0;
        self.current = None;
        RowCursor {
            series: self,
            next_index: 0,
        }
    }

    fn materialize(&self, index: usize) -> Row {
        Row {
            index,
            values: self
                .active
                .iter()
                .map(|&c| self.columns[c].value(index))
                .collect(),
        }
    }
}

/// Cursor over a [`DataSeries`], produced by [`DataSeries::iter_rows`]
pub struct RowCursor<'a> {
    series: &'a mut DataSeries,
    next_index: usize,
}

impl Iterator for RowCursor<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        if self.next_index >= self.series.n_rows {
            return None;
        }
        let row = self.series.materialize(self.next_index);
        self.series.cursor = self.next_index;
        self.series.current = Some(row.clone());
        self.next_index += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.series.n_rows - self.next_index;
        (remaining, Some(remaining))
    }
}
