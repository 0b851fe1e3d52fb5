//! `calamine` spreadsheet backend.

use crate::error::{FormatError, FormatResult};
use crate::model::WorkbookParser;
use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::io::Cursor;
use wd_core::{CellValue, Table};

/// Reads `.xls` and `.xlsx` workbooks from memory.
#[derive(Debug, Default, Clone, Copy)]
pub struct CalamineWorkbookParser;

impl CalamineWorkbookParser {
    pub fn new() -> Self {
        Self
    }
}

impl WorkbookParser for CalamineWorkbookParser {
    fn read_sheets(&self, bytes: &[u8], sheets: &[&str]) -> FormatResult<Vec<Table>> {
        let mut workbook =
            open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| FormatError::Backend {
                message: format!("workbook: {}", e),
            })?;
        let available = workbook.sheet_names();

        let mut tables = Vec::with_capacity(sheets.len());
        for &sheet in sheets {
            if !available.iter().any(|name| name == sheet) {
                return Err(FormatError::MissingSheet {
                    sheet: sheet.to_string(),
                });
            }
            let range = workbook
                .worksheet_range(sheet)
                .map_err(|e| FormatError::Backend {
                    message: format!("sheet {}: {}", sheet, e),
                })?;
            tables.push(range_to_table(sheet, &range)?);
        }
        Ok(tables)
    }
}

fn range_to_table(sheet: &str, range: &Range<Data>) -> FormatResult<Table> {
    let mut rows = range.rows();
    let header = rows.next().ok_or_else(|| FormatError::EmptySheet {
        sheet: sheet.to_string(),
    })?;
    let mut table = Table::new(header_names(header))?;

    for row in rows {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        table.push_row(row.iter().map(data_to_cell).collect())?;
    }
    Ok(table)
}

/// Header labels with blanks named `Unnamed: <i>` and repeats suffixed `.1`, `.2`, ...
pub(crate) fn header_names(header: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    header
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let base = match data_to_cell(cell) {
                CellValue::Empty => format!("Unnamed: {}", i),
                other => other.label(),
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{}.{}", base, count)
            };
            *count += 1;
            name
        })
        .collect()
}

fn data_to_cell(cell: &Data) -> CellValue {
    #[allow(unreachable_patterns)]
    match cell {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) if s.trim().is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::text(s.trim()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map_or(CellValue::Float(dt.as_f64()), CellValue::DateTime),
        Data::DateTimeIso(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
            .map_or_else(|_| CellValue::text(s.as_str()), CellValue::DateTime),
        Data::DurationIso(s) => CellValue::text(s.as_str()),
        Data::Error(e) => CellValue::Text(e.to_string()),
        _ => CellValue::Empty,
    }
}
