//! Parser traits.

use crate::error::FormatResult;
use crate::shapefile_set::ShapefileSet;
use wd_core::{SpatialDataset, Table, WellLog};

/// Reads a complete shapefile set into attributes plus one geometry per row.
pub trait ShapefileParser {
    fn parse(&self, set: &ShapefileSet<'_>) -> FormatResult<SpatialDataset>;
}

/// Reads named sheets of a spreadsheet workbook.
///
/// The first row of every sheet is the header. Tables are returned in the
/// order the sheets were requested; a missing sheet fails the whole call.
pub trait WorkbookParser {
    fn read_sheets(&self, bytes: &[u8], sheets: &[&str]) -> FormatResult<Vec<Table>>;
}

/// Reads a LAS well-log file.
///
/// Implementations must isolate failures of the four metadata sections:
/// a bad section degrades to an empty table and a recorded issue.
pub trait LasParser {
    fn parse(&self, bytes: &[u8]) -> FormatResult<WellLog>;
}
