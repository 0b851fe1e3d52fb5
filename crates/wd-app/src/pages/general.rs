//! Basemap of blocks and wells, plus the well information table.

use serde::Serialize;
use tracing::debug;
use wd_config::DashboardConfig;
use wd_core::{Geometry, Point, Table};
use wd_session::SessionStore;

use crate::error::{AppError, AppResult};
use crate::keys;
use crate::query::{self, PopupField};
use crate::selection::{self, MapInput, MapSelection};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl From<Point> for LatLon {
    fn from(p: Point) -> Self {
        LatLon { lat: p.y, lon: p.x }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockShape {
    pub name: String,
    pub geometry: Option<Geometry>,
}

/// The selected block, drawn filled with its name at the centroid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightedBlock {
    pub name: String,
    pub geometry: Geometry,
    pub label_at: LatLon,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellMarker {
    pub name: String,
    pub position: LatLon,
    pub popup: Vec<PopupField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: LatLon,
    pub zoom: u8,
    /// Every block, outline only.
    pub blocks: Vec<BlockShape>,
    pub highlighted: Option<HighlightedBlock>,
    pub markers: Vec<WellMarker>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneralView {
    pub block_source: String,
    pub well_source: String,
    pub blocks: Vec<String>,
    pub block: Option<String>,
    pub wells_in_block: Vec<String>,
    pub wells: Vec<String>,
    pub map: MapView,
    /// Attributes of the selected wells.
    pub well_table: Table,
}

pub fn render(
    store: &SessionStore,
    config: &DashboardConfig,
    input: &MapInput,
) -> AppResult<GeneralView> {
    let MapSelection {
        blocks: block_names,
        block,
        wells_in_block,
        wells: selected,
    } = selection::resolve_map(store, config, input)?;

    let not_loaded = |what| AppError::NotLoaded { what };
    let blocks = store
        .get(&keys::BLOCKS)
        .ok_or_else(|| not_loaded("block shapefiles"))?;
    let wells = store
        .get(&keys::WELLS)
        .ok_or_else(|| not_loaded("well shapefiles"))?;
    let columns = &config.shapefiles;

    let block_col = blocks.table().require_column(&columns.block_name)?;
    let shapes: Vec<BlockShape> = blocks
        .table()
        .rows()
        .iter()
        .zip(blocks.geometries())
        .map(|(row, geometry)| BlockShape {
            name: row[block_col].label(),
            geometry: geometry.clone(),
        })
        .collect();

    let highlighted = block.as_deref().and_then(|name| {
        let shape = shapes.iter().find(|s| s.name == name)?;
        let geometry = shape.geometry.clone()?;
        let centroid = geometry.centroid()?;
        Some(HighlightedBlock {
            name: name.to_string(),
            geometry,
            label_at: centroid.into(),
        })
    });

    let (center, zoom) = match &highlighted {
        Some(h) => (h.label_at, config.map.focus_zoom),
        None => (
            LatLon {
                lat: config.map.center_lat,
                lon: config.map.center_lon,
            },
            config.map.initial_zoom,
        ),
    };

    let well_col = wells.table().require_column(&columns.well_name)?;
    let mut markers = Vec::with_capacity(selected.len());
    for (row, geometry) in wells.table().rows().iter().zip(wells.geometries()) {
        let name = row[well_col].label();
        if !selected.contains(&name) || markers.iter().any(|m: &WellMarker| m.name == name) {
            continue;
        }
        let Some(point) = geometry.as_ref().and_then(Geometry::as_point) else {
            debug!(well = %name, "Selected well has no point geometry");
            continue;
        };
        markers.push(WellMarker {
            popup: query::well_popup(&wells, columns, &config.map.popup_fields, &name)?,
            position: point.into(),
            name,
        });
    }

    let well_table = query::selected_wells_table(&wells, columns, &selected)?;

    Ok(GeneralView {
        block_source: store
            .get(&keys::BLOCKS_SOURCE)
            .map(|s| s.as_ref().clone())
            .unwrap_or_default(),
        well_source: store
            .get(&keys::WELLS_SOURCE)
            .map(|s| s.as_ref().clone())
            .unwrap_or_default(),
        blocks: block_names,
        block,
        wells_in_block,
        wells: selected,
        map: MapView {
            center,
            zoom,
            blocks: shapes,
            highlighted,
            markers,
        },
        well_table,
    })
}
