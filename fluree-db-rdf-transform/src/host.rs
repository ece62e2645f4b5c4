//! Host seams
//!
//! The interpreter never reads table data directly. It asks an
//! [`ExpressionEvaluator`] for cell values and a [`RowSource`] for the rows
//! and records to visit. [`MemoryTable`] implements both over an in-memory
//! grid of JSON cells.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::EvalError;
use crate::mapping::Expression;
use crate::record::Record;

/// Evaluates cell expressions on behalf of the node model
pub trait ExpressionEvaluator {
    /// Evaluate `expression` against one cell
    ///
    /// A `None` column selects the row-index pseudo-cell. Arrays are fanned
    /// out by the caller; `null` and `""` mean "no value".
    fn evaluate(
        &self,
        expression: &Expression,
        column: Option<&str>,
        row: usize,
    ) -> Result<Value, EvalError>;
}

/// The rows and records a visitor walks
pub trait RowSource {
    fn row_count(&self) -> usize;

    /// Record boundaries, in row order
    fn records(&self) -> Vec<Record>;
}

/// A registered expression: `(cell, row) -> value`
pub type CustomExpression = Arc<dyn Fn(&Value, usize) -> Result<Value, EvalError> + Send + Sync>;

const ROW_INDEX_CODE: &str = "row.index";

/// An in-memory table of JSON cells
///
/// Understands the identity expression, `row.index`, and any expression
/// registered with [`register`](Self::register).
#[derive(Clone, Default)]
pub struct MemoryTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    records: Option<Vec<Record>>,
    expressions: HashMap<String, CustomExpression>,
}

impl MemoryTable {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Append a row; missing trailing cells read as `null`
    pub fn push_row(&mut self, cells: Vec<Value>) {
        self.rows.push(cells);
    }

    pub fn with_row(mut self, cells: Vec<Value>) -> Self {
        self.push_row(cells);
        self
    }

    /// Use explicit record boundaries instead of deriving them
    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        self.records = Some(records);
        self
    }

    /// Register an expression under its code
    pub fn register<F>(&mut self, code: impl Into<String>, f: F)
    where
        F: Fn(&Value, usize) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        self.expressions.insert(code.into(), Arc::new(f));
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `(row, column)`; `None` outside the grid
    pub fn cell(&self, row: usize, column: usize) -> Option<&Value> {
        self.rows.get(row)?.get(column)
    }

    fn derive_records(&self) -> Vec<Record> {
        let mut records = Vec::new();
        let mut start: Option<usize> = None;
        for row in 0..self.rows.len() {
            let key_present = self.cell(row, 0).is_some_and(|v| !is_blank(v));
            if row == 0 || key_present {
                if let Some(from) = start {
                    records.push(Record::new(from, row));
                }
                start = Some(row);
            }
        }
        if let Some(from) = start {
            records.push(Record::new(from, self.rows.len()));
        }
        records
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

impl ExpressionEvaluator for MemoryTable {
    fn evaluate(
        &self,
        expression: &Expression,
        column: Option<&str>,
        row: usize,
    ) -> Result<Value, EvalError> {
        if row >= self.rows.len() {
            return Err(EvalError::new(format!("row {} out of range", row)));
        }
        let cell = match column {
            Some(name) => {
                let idx = self
                    .column_index(name)
                    .ok_or_else(|| EvalError::new(format!("unknown column '{}'", name)))?;
                self.cell(row, idx).cloned().unwrap_or(Value::Null)
            }
            None => Value::from(row),
        };

        if expression.is_identity() {
            return Ok(cell);
        }
        if expression.code == ROW_INDEX_CODE {
            return Ok(Value::from(row));
        }
        match self.expressions.get(&expression.code) {
            Some(f) => f(&cell, row),
            None => Err(EvalError::new(format!(
                "unsupported expression '{}'",
                expression
            ))),
        }
    }
}

impl RowSource for MemoryTable {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn records(&self) -> Vec<Record> {
        match &self.records {
            Some(records) => records.clone(),
            None => self.derive_records(),
        }
    }
}

impl fmt::Debug for MemoryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryTable")
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("records", &self.records)
            .field("expressions", &self.expressions.keys().collect::<Vec<_>>())
            .finish()
    }
}
