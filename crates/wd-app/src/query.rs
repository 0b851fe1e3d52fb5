//! Query helpers over loaded datasets.

use serde::Serialize;
use wd_config::{ShapefileColumns, WorkbookConfig};
use wd_core::{CellValue, SpatialDataset, Table};

use crate::error::AppResult;

/// Names of the wells whose block column equals `block`, in file order.
pub fn wells_in_block(
    wells: &SpatialDataset,
    columns: &ShapefileColumns,
    block: &str,
) -> AppResult<Vec<String>> {
    Ok(wells
        .table()
        .filter_eq(&columns.well_block, block)?
        .unique_text(&columns.well_name)?)
}

/// Tops of one well, shallowest first.
pub fn tops_for_well(tops: &Table, config: &WorkbookConfig, well: &str) -> AppResult<Table> {
    let mut rows = tops.filter_eq(&config.well_column, well)?;
    rows.sort_by_columns(&[&config.top_depth_column])?;
    Ok(rows)
}

/// DSTs of one well in test order.
pub fn dsts_for_well(dsts: &Table, config: &WorkbookConfig, well: &str) -> AppResult<Table> {
    let mut rows = dsts.filter_eq(&config.well_column, well)?;
    rows.sort_by_columns(&[&config.dst_number_column])?;
    Ok(rows)
}

/// One `name: value` line of a marker popup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupField {
    pub name: String,
    pub value: CellValue,
}

/// Popup fields of a well. Fields the shapefile does not carry are left out.
pub fn well_popup(
    wells: &SpatialDataset,
    columns: &ShapefileColumns,
    fields: &[String],
    well: &str,
) -> AppResult<Vec<PopupField>> {
    let table = wells.table();
    let rows = table.matching_rows(&columns.well_name, |cell| cell.label() == well)?;
    let Some(&row) = rows.first() else {
        return Ok(Vec::new());
    };
    Ok(fields
        .iter()
        .filter_map(|name| {
            table.cell(row, name).map(|value| PopupField {
                name: name.clone(),
                value: value.clone(),
            })
        })
        .collect())
}

/// Attribute rows of the selected wells, in file order. An empty selection
/// gives an empty table with the full column list.
pub fn selected_wells_table(
    wells: &SpatialDataset,
    columns: &ShapefileColumns,
    selected: &[String],
) -> AppResult<Table> {
    let table = wells.table();
    let rows = table.matching_rows(&columns.well_name, |cell| {
        selected.iter().any(|s| *s == cell.label())
    })?;
    Ok(table.take_rows(&rows))
}
