//! Configuration schema definitions.
//!
//! Every section has defaults, so `version: 1` on its own is a
//! complete configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub shapefiles: ShapefileColumns,
    #[serde(default)]
    pub workbook: WorkbookConfig,
    #[serde(default)]
    pub depth_plot: DepthPlotConfig,
    #[serde(default)]
    pub crossplot: CrossPlotConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            version: crate::LATEST_VERSION,
            map: MapConfig::default(),
            shapefiles: ShapefileColumns::default(),
            workbook: WorkbookConfig::default(),
            depth_plot: DepthPlotConfig::default(),
            crossplot: CrossPlotConfig::default(),
        }
    }
}

fn default_version() -> u32 {
    crate::LATEST_VERSION
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    /// Basemap center before a block is selected.
    pub center_lat: f64,
    pub center_lon: f64,
    pub initial_zoom: u8,
    /// Zoom used when the map centers on the selected block.
    pub focus_zoom: u8,
    /// Well attributes shown in the marker popup.
    pub popup_fields: Vec<String>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: 10.278,
            center_lon: 108.197,
            initial_zoom: 3,
            focus_zoom: 10,
            popup_fields: ["TD_M", "STATUS", "RESULT", "NOTES", "COMPLETED"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Attribute names expected in the block and well shapefiles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShapefileColumns {
    pub block_name: String,
    pub well_name: String,
    /// Column of the well shapefile naming the block a well sits in.
    pub well_block: String,
}

impl Default for ShapefileColumns {
    fn default() -> Self {
        Self {
            block_name: "BLOCK_NAME".to_string(),
            well_name: "WELL_NAME".to_string(),
            well_block: "BLOCK_NAME".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkbookConfig {
    pub top_sheet: String,
    pub dst_sheet: String,
    pub well_column: String,
    pub top_name_column: String,
    pub top_depth_column: String,
    pub dst_number_column: String,
    pub dst_top_column: String,
    pub dst_base_column: String,
}

impl Default for WorkbookConfig {
    fn default() -> Self {
        Self {
            top_sheet: "well_top".to_string(),
            dst_sheet: "well_dst".to_string(),
            well_column: "well_name".to_string(),
            top_name_column: "top".to_string(),
            top_depth_column: "surface_md_m".to_string(),
            dst_number_column: "dst_number".to_string(),
            dst_top_column: "top_md_m".to_string(),
            dst_base_column: "base_md_m".to_string(),
        }
    }
}

/// Defaults for the tops/DST strip plots, in measured depth metres.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DepthPlotConfig {
    pub start_md_m: f64,
    pub stop_md_m: f64,
}

impl Default for DepthPlotConfig {
    fn default() -> Self {
        Self {
            start_md_m: 500.0,
            stop_md_m: 5500.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CrossPlotConfig {
    pub palette: Vec<String>,
}

impl Default for CrossPlotConfig {
    fn default() -> Self {
        Self {
            palette: ["orange", "red", "green", "blue", "purple"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
