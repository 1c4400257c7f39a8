//! Tagged cell values and typed column storage
//!
//! Cells in a series are dynamically typed at the input boundary (a telemetry
//! row can carry a measurement next to a revision string), but columns are
//! stored as parallel typed vectors with an explicit null bitmap. The kind of
//! each column is either declared up front or inferred from its cells.

use std::fmt;

use shift_core::{Error, Result};

/// A single cell value in a series row
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A numeric measurement
    Number(f64),
    /// A textual identifier (revision, build id, platform, ...)
    Text(String),
    /// A missing cell, including padding for short rows
    Null,
}

impl Value {
    /// True if this cell is missing
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The numeric content of this cell, if any
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(x) => Some(*x),
            _ => None,
        }
    }

    /// The textual content of this cell, if any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Number(x)
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Value::Number(x as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Null => write!(f, "null"),
        }
    }
}

/// The declared or inferred kind of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// All non-null cells are numbers
    Numeric,
    /// Cells are textual (a mixed number/text column is stored as text)
    Text,
    /// Every cell in the column is null
    Null,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Text => write!(f, "text"),
            ColumnKind::Null => write!(f, "null"),
        }
    }
}

#[derive(Debug, Clone)]
enum ColumnValues {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

/// One column of a series: typed storage plus a null bitmap
///
/// Null cells occupy a placeholder slot in the typed vector and are flagged
/// in `nulls`; reads go through [`Column::value`] which checks the bitmap
/// first.
#[derive(Debug, Clone)]
pub struct Column {
    kind: ColumnKind,
    values: ColumnValues,
    nulls: Vec<bool>,
}

impl Column {
    /// Build a column from already-padded cells, inferring the kind or
    /// checking it against a declared hint.
    ///
    /// Inference: numbers only gives `Numeric`, text only gives `Text`,
    /// a number/text mix is stored as `Text`, all-null gives `Null`. A hint
    /// that contradicts the observed cells fails with a format error.
    pub(crate) fn from_cells(
        index: usize,
        cells: &[Value],
        hint: Option<ColumnKind>,
    ) -> Result<Self> {
        let has_number = cells.iter().any(|v| matches!(v, Value::Number(_)));
        let has_text = cells.iter().any(|v| matches!(v, Value::Text(_)));

        let kind = match hint {
            Some(ColumnKind::Numeric) => {
                if has_text {
                    return Err(Error::kind_conflict(index, "numeric", "text"));
                }
                ColumnKind::Numeric
            }
            Some(ColumnKind::Text) => {
                if has_number {
                    return Err(Error::kind_conflict(index, "text", "numeric"));
                }
                ColumnKind::Text
            }
            Some(ColumnKind::Null) => {
                if has_number || has_text {
                    return Err(Error::kind_conflict(index, "null", "non-null"));
                }
                ColumnKind::Null
            }
            None => match (has_number, has_text) {
                (true, false) => ColumnKind::Numeric,
                (false, true) => ColumnKind::Text,
                (true, true) => ColumnKind::Text,
                (false, false) => ColumnKind::Null,
            },
        };

        let nulls: Vec<bool> = cells.iter().map(Value::is_null).collect();
        let values = match kind {
            ColumnKind::Numeric | ColumnKind::Null => ColumnValues::Numeric(
                cells
                    .iter()
                    .map(|v| v.as_number().unwrap_or(f64::NAN))
                    .collect(),
            ),
            ColumnKind::Text => ColumnValues::Text(
                cells
                    .iter()
                    .map(|v| match v {
                        Value::Null => String::new(),
                        other => other.to_string(),
                    })
                    .collect(),
            ),
        };

        Ok(Self { kind, values, nulls })
    }

    /// The kind of this column
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// Number of cells in the column
    pub fn len(&self) -> usize {
        self.nulls.len()
    }

    /// True if the column has no cells
    pub fn is_empty(&self) -> bool {
        self.nulls.is_empty()
    }

    /// True if the cell at `row` is null
    pub fn is_null(&self, row: usize) -> bool {
        self.nulls.get(row).copied().unwrap_or(true)
    }

    /// Materialize the cell at `row` as a tagged value
    pub fn value(&self, row: usize) -> Value {
        if self.is_null(row) {
            return Value::Null;
        }
        match &self.values {
            ColumnValues::Numeric(xs) => Value::Number(xs[row]),
            ColumnValues::Text(ss) => Value::Text(ss[row].clone()),
        }
    }
}
