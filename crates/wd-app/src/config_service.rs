//! Dashboard configuration loading.

use std::path::Path;
use tracing::info;
use wd_config::DashboardConfig;

use crate::error::{AppError, AppResult};

/// Loads a configuration file, or the defaults when no path is given.
///
/// `.json` files are read as JSON, everything else as YAML. The result is
/// validated either way.
pub fn load_config(path: Option<&Path>) -> AppResult<DashboardConfig> {
    let Some(path) = path else {
        return Ok(DashboardConfig::default());
    };
    if !path.exists() {
        return Err(AppError::Config(format!(
            "configuration file not found: {}",
            path.display()
        )));
    }

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        wd_config::load_json(path)?
    } else {
        wd_config::load_yaml(path)?
    };
    info!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

/// Checks a configuration without loading anything else.
pub fn validate(config: &DashboardConfig) -> AppResult<()> {
    wd_config::validate_config(config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_gives_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config, DashboardConfig::default());
        validate(&config).unwrap();
    }

    #[test]
    fn missing_file_is_a_configuration_error() {
        let path = std::env::temp_dir().join("wd_app_missing_config.yaml");
        let _ = std::fs::remove_file(&path);
        let err = load_config(Some(&path)).unwrap_err();
        assert_eq!(err.category(), crate::ErrorCategory::Configuration);
    }

    #[test]
    fn json_and_yaml_files_load() {
        let dir = std::env::temp_dir().join("wd_app_config_service");
        std::fs::create_dir_all(&dir).unwrap();

        let yaml = dir.join("dashboard.yaml");
        std::fs::write(&yaml, "version: 1\ndepth_plot:\n  start_md_m: 1000.0\n").unwrap();
        assert_eq!(load_config(Some(&yaml)).unwrap().depth_plot.start_md_m, 1000.0);

        let json = dir.join("dashboard.JSON");
        std::fs::write(&json, r#"{"version": 1, "map": {"focus_zoom": 12}}"#).unwrap();
        assert_eq!(load_config(Some(&json)).unwrap().map.focus_zoom, 12);
    }
}
