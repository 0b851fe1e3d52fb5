use wd_config::*;

#[test]
fn roundtrip_yaml_default_config() {
    let config = DashboardConfig::default();

    validate_config(&config).unwrap();

    let temp_dir = std::env::temp_dir();
    let path = temp_dir.join("wd_config_roundtrip_default.yaml");

    save_yaml(&path, &config).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(config, loaded);
}

#[test]
fn roundtrip_json_customized_config() {
    let mut config = DashboardConfig::default();
    config.map.popup_fields = vec!["TD_M".to_string(), "OPERATOR".to_string()];
    config.workbook.top_name_column = "formation".to_string();
    config.depth_plot.start_md_m = 0.0;
    config.depth_plot.stop_md_m = 4200.0;

    let path = std::env::temp_dir().join("wd_config_roundtrip_custom.json");
    save_json(&path, &config).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(config, loaded);
}

#[test]
fn partial_yaml_fills_defaults() {
    let path = std::env::temp_dir().join("wd_config_partial.yaml");
    std::fs::write(
        &path,
        "version: 1\nmap:\n  focus_zoom: 12\nworkbook:\n  top_sheet: tops\n",
    )
    .unwrap();

    let loaded = load_yaml(&path).unwrap();
    assert_eq!(loaded.map.focus_zoom, 12);
    assert_eq!(loaded.map.initial_zoom, 3);
    assert_eq!(loaded.workbook.top_sheet, "tops");
    assert_eq!(loaded.workbook.dst_sheet, "well_dst");
    assert_eq!(loaded.shapefiles.block_name, "BLOCK_NAME");
}

#[test]
fn invalid_yaml_is_rejected_on_load() {
    let path = std::env::temp_dir().join("wd_config_invalid.yaml");
    std::fs::write(&path, "version: 1\ndepth_plot:\n  start_md_m: 900\n  stop_md_m: 100\n")
        .unwrap();

    assert!(matches!(load_yaml(&path), Err(ConfigError::Validation(_))));
}
