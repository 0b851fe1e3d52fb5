//! Selection resolver.
//!
//! Selections are recomputed from the store and the widget input on every
//! call and never stored. A previous choice that no longer exists falls
//! back to the first available item; an empty multi-selection is valid.

use tracing::debug;
use wd_config::DashboardConfig;
use wd_session::SessionStore;

use crate::error::{AppError, AppResult};
use crate::keys;
use crate::query;

/// Picks `previous` if it is still available, else the first item.
pub fn resolve_single<'a>(available: &'a [String], previous: Option<&str>) -> Option<&'a str> {
    if let Some(wanted) = previous {
        if let Some(found) = available.iter().find(|item| *item == wanted) {
            return Some(found.as_str());
        }
        debug!(previous = wanted, "Selection no longer available, using first item");
    }
    available.first().map(String::as_str)
}

/// Keeps the requested items that are still available, in request order and
/// without repeats.
pub fn resolve_multi(available: &[String], requested: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in requested {
        if available.contains(item) && !out.contains(item) {
            out.push(item.clone());
        }
    }
    out
}

/// Widget state of the general page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapInput {
    pub block: Option<String>,
    pub wells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapSelection {
    pub blocks: Vec<String>,
    pub block: Option<String>,
    /// Wells located in the selected block; the choices for `wells`.
    pub wells_in_block: Vec<String>,
    pub wells: Vec<String>,
}

pub fn resolve_map(
    store: &SessionStore,
    config: &DashboardConfig,
    input: &MapInput,
) -> AppResult<MapSelection> {
    let blocks = store.get(&keys::BLOCK_NAMES).ok_or(AppError::NotLoaded {
        what: "block shapefiles",
    })?;
    let wells = store.get(&keys::WELLS).ok_or(AppError::NotLoaded {
        what: "well shapefiles",
    })?;

    let block = resolve_single(&blocks, input.block.as_deref()).map(str::to_string);
    let wells_in_block = match &block {
        Some(name) => query::wells_in_block(&wells, &config.shapefiles, name)?,
        None => Vec::new(),
    };
    let selected = resolve_multi(&wells_in_block, &input.wells);

    Ok(MapSelection {
        blocks: blocks.as_ref().clone(),
        block,
        wells_in_block,
        wells: selected,
    })
}

/// Widget state of the tops and DSTs page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopsDstsInput {
    pub top_well: Option<String>,
    pub dst_well: Option<String>,
    /// Depth window of the tops strip; the configured default when unset.
    pub top_range: Option<(f64, f64)>,
    pub dst_range: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopsDstsSelection {
    pub top_wells: Vec<String>,
    pub dst_wells: Vec<String>,
    pub top_well: Option<String>,
    pub dst_well: Option<String>,
}

pub fn resolve_tops_dsts(store: &SessionStore, input: &TopsDstsInput) -> AppResult<TopsDstsSelection> {
    let not_loaded = || AppError::NotLoaded {
        what: "a well_top/well_dst workbook",
    };
    let top_wells = store.get(&keys::TOP_WELLS).ok_or_else(not_loaded)?;
    let dst_wells = store.get(&keys::DST_WELLS).ok_or_else(not_loaded)?;

    Ok(TopsDstsSelection {
        top_well: resolve_single(&top_wells, input.top_well.as_deref()).map(str::to_string),
        dst_well: resolve_single(&dst_wells, input.dst_well.as_deref()).map(str::to_string),
        top_wells: top_wells.as_ref().clone(),
        dst_wells: dst_wells.as_ref().clone(),
    })
}

/// Axis scale of the cross-plot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisScale {
    #[default]
    Linear,
    Log,
}

/// Widget state of the well-log page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrossPlotInput {
    pub x: Option<String>,
    pub y: Option<String>,
    pub color: Option<String>,
    pub x_scale: AxisScale,
    pub y_scale: AxisScale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrossPlotSelection {
    pub columns: Vec<String>,
    pub x: String,
    pub y: String,
    pub color: String,
}

pub fn resolve_crossplot(store: &SessionStore, input: &CrossPlotInput) -> AppResult<CrossPlotSelection> {
    let curves = store.get(&keys::LAS_CURVES).ok_or(AppError::NotLoaded { what: "a LAS file" })?;
    let columns = curves.columns().to_vec();
    let pick = |wanted: &Option<String>| {
        resolve_single(&columns, wanted.as_deref())
            .map(str::to_string)
            .ok_or(AppError::InvalidUpload("LAS file has no curves".to_string()))
    };

    Ok(CrossPlotSelection {
        x: pick(&input.x)?,
        y: pick(&input.y)?,
        color: pick(&input.color)?,
        columns: columns.clone(),
    })
}
