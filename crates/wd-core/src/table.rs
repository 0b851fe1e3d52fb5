//! Column-named tabular data.

use crate::error::{CoreError, CoreResult};
use crate::value::CellValue;
use serde::Serialize;
use std::collections::HashSet;

/// Rows of typed cells under an ordered list of column names.
///
/// Every row holds exactly one cell per column; `push_row` rejects anything else.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut seen = HashSet::new();
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(CoreError::DuplicateColumn { name: name.clone() });
            }
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    pub fn with_rows<I, S>(columns: I, rows: Vec<Vec<CellValue>>) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new(columns)?;
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) -> CoreResult<()> {
        if row.len() != self.columns.len() {
            return Err(CoreError::RowWidth {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn require_column(&self, name: &str) -> CoreResult<usize> {
        self.column_index(name)
            .ok_or_else(|| CoreError::MissingColumn {
                name: name.to_string(),
            })
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Distinct non-empty labels of a column, in first-seen order.
    pub fn unique_text(&self, column: &str) -> CoreResult<Vec<String>> {
        let col = self.require_column(column)?;
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for row in &self.rows {
            let cell = &row[col];
            if cell.is_empty() {
                continue;
            }
            let label = cell.label();
            if seen.insert(label.clone()) {
                out.push(label);
            }
        }
        Ok(out)
    }

    /// Indices of rows whose cell in `column` satisfies `pred`.
    pub fn matching_rows(
        &self,
        column: &str,
        mut pred: impl FnMut(&CellValue) -> bool,
    ) -> CoreResult<Vec<usize>> {
        let col = self.require_column(column)?;
        Ok(self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| pred(&row[col]))
            .map(|(i, _)| i)
            .collect())
    }

    /// New table holding the given rows, in the given order. Out-of-range indices are skipped.
    pub fn take_rows(&self, indices: &[usize]) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: indices
                .iter()
                .filter_map(|&i| self.rows.get(i).cloned())
                .collect(),
        }
    }

    /// Rows whose `column` label equals `label`.
    pub fn filter_eq(&self, column: &str, label: &str) -> CoreResult<Table> {
        let rows = self.matching_rows(column, |cell| cell.label() == label)?;
        Ok(self.take_rows(&rows))
    }

    /// Stable ascending sort on several columns, first key most significant.
    pub fn sort_by_columns(&mut self, keys: &[&str]) -> CoreResult<()> {
        let indices = keys
            .iter()
            .map(|k| self.require_column(k))
            .collect::<CoreResult<Vec<_>>>()?;
        self.rows.sort_by(|a, b| {
            indices
                .iter()
                .map(|&i| a[i].sort_cmp(&b[i]))
                .find(|ord| ord.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(())
    }

    pub fn select_columns(&self, names: &[&str]) -> CoreResult<Table> {
        let indices = names
            .iter()
            .map(|n| self.require_column(n))
            .collect::<CoreResult<Vec<_>>>()?;
        let columns = names.iter().map(|n| n.to_string()).collect::<Vec<_>>();
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Table::with_rows(columns, rows)
    }

    /// Copy of the table without the named columns. Unknown names are ignored.
    pub fn drop_columns(&self, names: &[&str]) -> Table {
        let keep: Vec<usize> = (0..self.columns.len())
            .filter(|&i| !names.contains(&self.columns[i].as_str()))
            .collect();
        Table {
            columns: keep.iter().map(|&i| self.columns[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        }
    }

    pub fn numeric_column(&self, column: &str) -> CoreResult<Vec<Option<f64>>> {
        let col = self.require_column(column)?;
        Ok(self.rows.iter().map(|row| row[col].as_f64()).collect())
    }
}
