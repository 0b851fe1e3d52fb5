//! Cross-plot of LAS curves and the four header tables.

use serde::Serialize;
use wd_config::DashboardConfig;
use wd_core::{CellValue, HeaderRecord, LasHeaders, SectionIssue, Table};
use wd_session::SessionStore;

use crate::error::{AppError, AppResult};
use crate::keys;
use crate::selection::{self, AxisScale, CrossPlotInput};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CrossPlotPoint {
    pub x: f64,
    pub y: f64,
    pub color: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossPlotView {
    pub well_name: String,
    pub x_column: String,
    pub y_column: String,
    pub color_column: String,
    pub x_scale: AxisScale,
    pub y_scale: AxisScale,
    /// Continuous color scale, low to high.
    pub palette: Vec<String>,
    pub points: Vec<CrossPlotPoint>,
    /// Samples left out: missing, non-finite, or not positive on a log axis.
    pub dropped: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderTables {
    pub well: Table,
    pub curves: Table,
    pub parameters: Table,
    pub other: Table,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellLogsView {
    pub source: String,
    pub columns: Vec<String>,
    pub plot: CrossPlotView,
    pub headers: HeaderTables,
    /// Header sections that could not be read and are shown empty.
    pub issues: Vec<SectionIssue>,
}

pub fn render(
    store: &SessionStore,
    config: &DashboardConfig,
    input: &CrossPlotInput,
) -> AppResult<WellLogsView> {
    let selection = selection::resolve_crossplot(store, input)?;
    let not_loaded = || AppError::NotLoaded { what: "a LAS file" };
    let curves = store.get(&keys::LAS_CURVES).ok_or_else(not_loaded)?;
    let headers = store.get(&keys::LAS_HEADERS).ok_or_else(not_loaded)?;

    let xs = curves.numeric_column(&selection.x)?;
    let ys = curves.numeric_column(&selection.y)?;
    let colors = curves.numeric_column(&selection.color)?;

    let mut points = Vec::with_capacity(xs.len());
    let mut dropped = 0;
    for ((x, y), color) in xs.into_iter().zip(ys).zip(colors) {
        match (x, y) {
            (Some(x), Some(y))
                if plottable(x, input.x_scale) && plottable(y, input.y_scale) =>
            {
                points.push(CrossPlotPoint {
                    x,
                    y,
                    color: color.filter(|c| c.is_finite()),
                });
            }
            _ => dropped += 1,
        }
    }

    Ok(WellLogsView {
        source: store
            .get(&keys::LAS_SOURCE)
            .map(|s| s.as_ref().clone())
            .unwrap_or_default(),
        plot: CrossPlotView {
            well_name: store
                .get(&keys::LAS_WELL_NAME)
                .map(|s| s.as_ref().clone())
                .unwrap_or_default(),
            x_column: selection.x,
            y_column: selection.y,
            color_column: selection.color,
            x_scale: input.x_scale,
            y_scale: input.y_scale,
            palette: config.crossplot.palette.clone(),
            points,
            dropped,
        },
        headers: header_tables(&headers, &curves)?,
        issues: store
            .get(&keys::LAS_ISSUES)
            .map(|i| i.as_ref().clone())
            .unwrap_or_default(),
        columns: selection.columns,
    })
}

fn plottable(value: f64, scale: AxisScale) -> bool {
    match scale {
        AxisScale::Linear => value.is_finite(),
        AxisScale::Log => value.is_finite() && value > 0.0,
    }
}

fn header_tables(headers: &LasHeaders, curves: &Table) -> AppResult<HeaderTables> {
    Ok(HeaderTables {
        well: record_table(&headers.well)?,
        curves: curve_table(&headers.curves, curves)?,
        parameters: record_table(&headers.parameters)?,
        other: record_table(&headers.other)?,
    })
}

fn record_table(records: &[HeaderRecord]) -> AppResult<Table> {
    let rows = records
        .iter()
        .map(|r| {
            vec![
                CellValue::text(r.name.as_str()),
                CellValue::text(r.unit.as_str()),
                CellValue::text(r.value.as_str()),
                CellValue::text(r.description.as_str()),
            ]
        })
        .collect();
    Ok(Table::with_rows(["Name", "Unit", "Value", "Description"], rows)?)
}

/// Curve records next to the data column each one labels and its sample count.
fn curve_table(records: &[HeaderRecord], curves: &Table) -> AppResult<Table> {
    let mut rows = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        let column = curves
            .columns()
            .get(i)
            .cloned()
            .unwrap_or_else(|| record.name.clone());
        let points = curves
            .column_index(&column)
            .map(|c| curves.rows().iter().filter(|row| !row[c].is_empty()).count())
            .unwrap_or(0);
        rows.push(vec![
            CellValue::text(column),
            CellValue::text(record.unit.as_str()),
            CellValue::text(record.description.as_str()),
            CellValue::text(record.name.as_str()),
            CellValue::Int(points as i64),
        ]);
    }
    Ok(Table::with_rows(
        ["Name", "Unit", "Description", "Original name", "Number of points"],
        rows,
    )?)
}
