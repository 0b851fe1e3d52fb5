//! Configuration validation logic.

use crate::schema::{DashboardConfig, MapConfig, WorkbookConfig};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Empty value: {field}")]
    Empty { field: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Duplicate entry: {value} in {context}")]
    Duplicate { value: String, context: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_config(config: &DashboardConfig) -> Result<(), ValidationError> {
    if config.version == 0 || config.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    validate_map(&config.map)?;

    require_name("shapefiles.block_name", &config.shapefiles.block_name)?;
    require_name("shapefiles.well_name", &config.shapefiles.well_name)?;
    require_name("shapefiles.well_block", &config.shapefiles.well_block)?;

    validate_workbook(&config.workbook)?;

    let depth = &config.depth_plot;
    for (field, value) in [
        ("depth_plot.start_md_m", depth.start_md_m),
        ("depth_plot.stop_md_m", depth.stop_md_m),
    ] {
        if !value.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: field.to_string(),
                value: value.to_string(),
                reason: "must be finite".to_string(),
            });
        }
    }
    if depth.start_md_m >= depth.stop_md_m {
        return Err(ValidationError::InvalidValue {
            field: "depth_plot".to_string(),
            value: format!("{}..{}", depth.start_md_m, depth.stop_md_m),
            reason: "start must be shallower than stop".to_string(),
        });
    }

    if config.crossplot.palette.is_empty() {
        return Err(ValidationError::Empty {
            field: "crossplot.palette".to_string(),
        });
    }
    for (i, color) in config.crossplot.palette.iter().enumerate() {
        require_name(&format!("crossplot.palette[{}]", i), color)?;
    }

    Ok(())
}

fn validate_map(map: &MapConfig) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&map.center_lat) {
        return Err(ValidationError::InvalidValue {
            field: "map.center_lat".to_string(),
            value: map.center_lat.to_string(),
            reason: "latitude must be within [-90, 90]".to_string(),
        });
    }
    if !(-180.0..=180.0).contains(&map.center_lon) {
        return Err(ValidationError::InvalidValue {
            field: "map.center_lon".to_string(),
            value: map.center_lon.to_string(),
            reason: "longitude must be within [-180, 180]".to_string(),
        });
    }
    for (field, zoom) in [
        ("map.initial_zoom", map.initial_zoom),
        ("map.focus_zoom", map.focus_zoom),
    ] {
        if zoom > 20 {
            return Err(ValidationError::InvalidValue {
                field: field.to_string(),
                value: zoom.to_string(),
                reason: "zoom must be at most 20".to_string(),
            });
        }
    }

    let mut seen = HashSet::new();
    for field in &map.popup_fields {
        require_name("map.popup_fields", field)?;
        if !seen.insert(field.as_str()) {
            return Err(ValidationError::Duplicate {
                value: field.clone(),
                context: "map.popup_fields".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_workbook(workbook: &WorkbookConfig) -> Result<(), ValidationError> {
    require_name("workbook.top_sheet", &workbook.top_sheet)?;
    require_name("workbook.dst_sheet", &workbook.dst_sheet)?;
    require_name("workbook.well_column", &workbook.well_column)?;
    require_name("workbook.top_name_column", &workbook.top_name_column)?;
    require_name("workbook.top_depth_column", &workbook.top_depth_column)?;
    require_name("workbook.dst_number_column", &workbook.dst_number_column)?;
    require_name("workbook.dst_top_column", &workbook.dst_top_column)?;
    require_name("workbook.dst_base_column", &workbook.dst_base_column)?;

    if workbook.top_sheet == workbook.dst_sheet {
        return Err(ValidationError::Duplicate {
            value: workbook.top_sheet.clone(),
            context: "workbook sheet names".to_string(),
        });
    }
    Ok(())
}

fn require_name(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty {
            field: field.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        validate_config(&DashboardConfig::default()).unwrap();
    }

    #[test]
    fn rejects_future_version() {
        let config = DashboardConfig {
            version: crate::LATEST_VERSION + 1,
            ..Default::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn rejects_inverted_depth_range() {
        let mut config = DashboardConfig::default();
        config.depth_plot.start_md_m = 3000.0;
        config.depth_plot.stop_md_m = 1000.0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("depth_plot"));
    }

    #[test]
    fn rejects_nan_depth() {
        let mut config = DashboardConfig::default();
        config.depth_plot.stop_md_m = f64::NAN;
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_center() {
        let mut config = DashboardConfig::default();
        config.map.center_lat = 95.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_duplicate_popup_field() {
        let mut config = DashboardConfig::default();
        config.map.popup_fields.push("STATUS".to_string());
        assert_eq!(
            validate_config(&config),
            Err(ValidationError::Duplicate {
                value: "STATUS".to_string(),
                context: "map.popup_fields".to_string()
            })
        );
    }

    #[test]
    fn rejects_blank_sheet_and_shared_sheet_names() {
        let mut config = DashboardConfig::default();
        config.workbook.dst_sheet = " ".to_string();
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::Empty { .. })
        ));

        let mut config = DashboardConfig::default();
        config.workbook.dst_sheet = config.workbook.top_sheet.clone();
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn rejects_empty_palette() {
        let mut config = DashboardConfig::default();
        config.crossplot.palette.clear();
        assert!(validate_config(&config).is_err());
    }
}
