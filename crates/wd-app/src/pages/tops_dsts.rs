//! Well tops and DST strip plots.

use serde::Serialize;
use wd_config::DashboardConfig;
use wd_core::{CellValue, Table};
use wd_session::SessionStore;

use crate::error::{AppError, AppResult};
use crate::keys;
use crate::pages::DepthRange;
use crate::query;
use crate::selection::{self, TopsDstsInput};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopMarker {
    pub name: String,
    pub depth_md_m: f64,
}

/// Wellbore column over the depth window with one line per top.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopsStrip {
    pub well: String,
    pub range: DepthRange,
    /// Tops inside the window, shallowest first.
    pub markers: Vec<TopMarker>,
    /// All tops of the well, without the well column.
    pub table: Table,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DstInterval {
    pub label: String,
    pub top_md_m: f64,
    pub base_md_m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DstStrip {
    pub well: String,
    pub range: DepthRange,
    /// Intervals overlapping the window, in test order.
    pub intervals: Vec<DstInterval>,
    /// All DSTs of the well, without the well and number columns.
    pub table: Table,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopsDstsView {
    pub source: String,
    pub top_wells: Vec<String>,
    pub dst_wells: Vec<String>,
    pub tops: Option<TopsStrip>,
    pub dsts: Option<DstStrip>,
}

pub fn render(
    store: &SessionStore,
    config: &DashboardConfig,
    input: &TopsDstsInput,
) -> AppResult<TopsDstsView> {
    let selection = selection::resolve_tops_dsts(store, input)?;
    let not_loaded = || AppError::NotLoaded {
        what: "a well_top/well_dst workbook",
    };
    let tops = store.get(&keys::WELL_TOPS).ok_or_else(not_loaded)?;
    let dsts = store.get(&keys::WELL_DSTS).ok_or_else(not_loaded)?;
    let default = (config.depth_plot.start_md_m, config.depth_plot.stop_md_m);
    let wb = &config.workbook;

    let tops_strip = match &selection.top_well {
        Some(well) => {
            let rows = query::tops_for_well(&tops, wb, well)?;
            let range = DepthRange::normalized(input.top_range, default);
            let mut markers = Vec::new();
            for i in 0..rows.len() {
                let depth = rows.cell(i, &wb.top_depth_column).and_then(CellValue::as_f64);
                let name = rows.cell(i, &wb.top_name_column).map(CellValue::label);
                if let (Some(depth_md_m), Some(name)) = (depth, name)
                    && range.contains(depth_md_m)
                {
                    markers.push(TopMarker { name, depth_md_m });
                }
            }
            Some(TopsStrip {
                well: well.clone(),
                range,
                markers,
                table: rows.drop_columns(&[&wb.well_column]),
            })
        }
        None => None,
    };

    let dsts_strip = match &selection.dst_well {
        Some(well) => {
            let rows = query::dsts_for_well(&dsts, wb, well)?;
            rows.require_column(&wb.dst_top_column)?;
            rows.require_column(&wb.dst_base_column)?;
            let range = DepthRange::normalized(input.dst_range, default);
            let mut intervals = Vec::new();
            for i in 0..rows.len() {
                let top = rows.cell(i, &wb.dst_top_column).and_then(CellValue::as_f64);
                let base = rows.cell(i, &wb.dst_base_column).and_then(CellValue::as_f64);
                let number = rows
                    .cell(i, &wb.dst_number_column)
                    .map(CellValue::label)
                    .unwrap_or_default();
                if let (Some(top_md_m), Some(base_md_m)) = (top, base)
                    && range.overlaps(top_md_m, base_md_m)
                {
                    intervals.push(DstInterval {
                        label: format!("Dst{}", number),
                        top_md_m,
                        base_md_m,
                    });
                }
            }
            Some(DstStrip {
                well: well.clone(),
                range,
                intervals,
                table: rows.drop_columns(&[&wb.well_column, &wb.dst_number_column]),
            })
        }
        None => None,
    };

    Ok(TopsDstsView {
        source: store
            .get(&keys::WORKBOOK_SOURCE)
            .map(|s| s.as_ref().clone())
            .unwrap_or_default(),
        top_wells: selection.top_wells,
        dst_wells: selection.dst_wells,
        tops: tops_strip,
        dsts: dsts_strip,
    })
}
