//! Page render models built from loaded datasets.

mod common;

use common::*;
use wd_app::pages::tops_dsts::TopMarker;
use wd_app::{
    AxisScale, CrossPlotInput, Interaction, MapInput, PageInput, PageOutcome, PageView,
    TopsDstsInput, keys,
};
use wd_core::{CellValue, DatasetKind, LasSection};
use wd_session::SessionStore;

fn loaded_maps() -> (wd_app::Dashboard, SessionStore) {
    let dash = dashboard(&Calls::default());
    let mut store = SessionStore::new();
    dash.load(&mut store, DatasetKind::Blocks, &full_set("blocks")).unwrap();
    dash.load(&mut store, DatasetKind::Wells, &full_set("wells")).unwrap();
    (dash, store)
}

fn general_view(outcome: PageOutcome<PageView>) -> wd_app::pages::GeneralView {
    match outcome {
        PageOutcome::Ready(PageView::General(view)) => view,
        other => panic!("expected the general page, got {:?}", other),
    }
}

fn tops_view(outcome: PageOutcome<PageView>) -> wd_app::pages::TopsDstsView {
    match outcome {
        PageOutcome::Ready(PageView::TopsDsts(view)) => view,
        other => panic!("expected the tops page, got {:?}", other),
    }
}

fn logs_view(outcome: PageOutcome<PageView>) -> wd_app::pages::WellLogsView {
    match outcome {
        PageOutcome::Ready(PageView::WellLogs(view)) => view,
        other => panic!("expected the well logs page, got {:?}", other),
    }
}

#[test]
fn vanished_block_falls_back_to_first() {
    let (dash, store) = loaded_maps();
    let input = PageInput::General(MapInput {
        block: Some("C".into()),
        wells: vec!["B-1X".into()],
    });
    let view = general_view(dash.render(&store, &input));

    assert_eq!(view.blocks, ["A", "B"]);
    assert_eq!(view.block.as_deref(), Some("A"));
    assert_eq!(view.wells_in_block, ["A-1X", "A-2X"]);
    // B-1X is not in block A
    assert!(view.wells.is_empty());
}

#[test]
fn empty_well_selection_renders_blocks_without_markers() {
    let (dash, store) = loaded_maps();
    let input = PageInput::General(MapInput {
        block: Some("B".into()),
        wells: Vec::new(),
    });
    let view = general_view(dash.render(&store, &input));

    assert_eq!(view.map.blocks.len(), 2);
    assert!(view.map.markers.is_empty());
    assert!(view.well_table.is_empty());
    let highlighted = view.map.highlighted.expect("block B is highlighted");
    assert_eq!(highlighted.name, "B");
    assert!((highlighted.label_at.lon - 110.5).abs() < 1e-9);
    assert!((highlighted.label_at.lat - 12.5).abs() < 1e-9);
    assert_eq!(view.map.center, highlighted.label_at);
    assert_eq!(view.map.zoom, 10);
    assert_eq!(view.block_source, "blocks.shp");
    assert_eq!(view.well_source, "wells.shp");
}

#[test]
fn selected_wells_get_markers_and_popups() {
    let (dash, store) = loaded_maps();
    let input = PageInput::General(MapInput {
        block: Some("A".into()),
        wells: vec!["A-2X".into(), "A-1X".into()],
    });
    let view = general_view(dash.render(&store, &input));

    let names: Vec<_> = view.map.markers.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["A-1X", "A-2X"]);
    let popup = &view.map.markers[0].popup;
    let fields: Vec<_> = popup.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(fields, ["TD_M", "STATUS", "RESULT"]);
    assert_eq!(popup[0].value, CellValue::Int(3150));
    assert_eq!(view.well_table.len(), 2);
}

#[test]
fn tops_are_sorted_by_depth_per_well() {
    let dash = dashboard(&Calls::default());
    let mut store = SessionStore::new();
    dash.load(&mut store, DatasetKind::WellData, &workbook_upload())
        .unwrap();

    let stored = store.get(&keys::WELL_TOPS).unwrap();
    assert_eq!(stored.unique_text("top").unwrap(), ["Sand0", "Sand1", "Basement"]);

    let input = PageInput::TopsDsts(TopsDstsInput {
        top_well: Some("W1".into()),
        ..Default::default()
    });
    let view = tops_view(dash.render(&store, &input));
    let tops = view.tops.expect("tops strip");
    assert_eq!(
        tops.markers,
        [
            TopMarker { name: "Sand0".into(), depth_md_m: 800.0 },
            TopMarker { name: "Sand1".into(), depth_md_m: 1200.0 },
        ]
    );
    assert_eq!((tops.range.start, tops.range.stop), (500.0, 5500.0));
    assert_eq!(tops.table.columns(), ["top", "age", "surface_md_m"]);
    assert_eq!(view.top_wells, ["W1", "W2"]);
}

#[test]
fn dsts_are_sorted_by_number() {
    let dash = dashboard(&Calls::default());
    let mut store = SessionStore::new();
    let input = PageInput::TopsDsts(TopsDstsInput {
        dst_well: Some("W1".into()),
        dst_range: Some((3000.0, 2000.0)),
        ..Default::default()
    });
    let rendered = dash.handle(
        &mut store,
        Interaction::Upload {
            dataset: DatasetKind::WellData,
            files: workbook_upload(),
        },
        &input,
    );
    let view = tops_view(rendered.page);
    let dsts = view.dsts.expect("dst strip");

    let labels: Vec<_> = dsts.intervals.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, ["Dst1", "Dst2"]);
    assert_eq!(dsts.intervals[0].top_md_m, 2400.0);
    assert_eq!((dsts.range.start, dsts.range.stop), (2000.0, 3000.0));
    assert_eq!(dsts.table.columns(), ["top_md_m", "base_md_m", "result"]);
}

#[test]
fn narrow_depth_window_hides_tops_outside_it() {
    let dash = dashboard(&Calls::default());
    let mut store = SessionStore::new();
    dash.load(&mut store, DatasetKind::WellData, &workbook_upload())
        .unwrap();

    let input = PageInput::TopsDsts(TopsDstsInput {
        top_well: Some("W1".into()),
        top_range: Some((1000.0, 1500.0)),
        ..Default::default()
    });
    let tops = tops_view(dash.render(&store, &input)).tops.unwrap();
    assert_eq!(tops.markers.len(), 1);
    assert_eq!(tops.markers[0].name, "Sand1");
    assert_eq!(tops.table.len(), 2);
}

#[test]
fn well_log_page_survives_a_bad_other_section() {
    let calls = Calls::default();
    let dash = dashboard(&calls);
    let mut store = SessionStore::new();
    let input = PageInput::WellLogs(CrossPlotInput {
        x: Some("GR".into()),
        y: Some("RT".into()),
        color: Some("DEPT".into()),
        x_scale: AxisScale::Linear,
        y_scale: AxisScale::Log,
    });

    let rendered = dash.handle(
        &mut store,
        Interaction::Upload {
            dataset: DatasetKind::WellLog,
            files: las_upload("sd1x.las", SAMPLE_LAS),
        },
        &input,
    );
    let view = logs_view(rendered.page);

    assert_eq!(view.plot.well_name, "15-1-SD-1X");
    assert_eq!(view.columns, ["DEPT", "GR", "RT"]);
    // rows: RT 0.0 and RT -3.0 fail the log axis, GR null drops the third
    assert_eq!(view.plot.points.len(), 1);
    assert_eq!(view.plot.dropped, 3);
    assert_eq!(view.plot.points[0].color, Some(1500.0));
    assert_eq!(view.plot.palette.len(), 5);

    assert_eq!(view.headers.well.len(), 2);
    assert_eq!(view.headers.curves.len(), 3);
    assert_eq!(view.headers.parameters.len(), 1);
    assert!(view.headers.other.is_empty());
    assert_eq!(view.issues.len(), 1);
    assert_eq!(view.issues[0].section, LasSection::Other);
    assert_eq!(calls.las.get(), 1);
}

#[test]
fn well_name_falls_back_to_file_stem() {
    let dash = dashboard(&Calls::default());
    let mut store = SessionStore::new();
    let text = SAMPLE_LAS.replace(" WELL.  15-1-SD-1X : WELL\n", "");
    dash.load(&mut store, DatasetKind::WellLog, &las_upload("logs/BV-2X.las", &text))
        .unwrap();
    assert_eq!(store.get(&keys::LAS_WELL_NAME).unwrap().as_str(), "BV-2X");
}

#[test]
fn stale_crossplot_columns_fall_back_to_first() {
    let dash = dashboard(&Calls::default());
    let mut store = SessionStore::new();
    dash.load(&mut store, DatasetKind::WellLog, &las_upload("w.las", SAMPLE_LAS))
        .unwrap();

    let input = PageInput::WellLogs(CrossPlotInput {
        x: Some("NPHI".into()),
        ..Default::default()
    });
    let view = logs_view(dash.render(&store, &input));
    assert_eq!(view.plot.x_column, "DEPT");
    assert_eq!(view.plot.y_column, "DEPT");
    assert_eq!(view.plot.points.len(), 4);
}

#[test]
fn pages_prompt_before_upload() {
    let dash = dashboard(&Calls::default());
    let store = SessionStore::new();
    for input in [
        PageInput::General(MapInput::default()),
        PageInput::TopsDsts(TopsDstsInput::default()),
        PageInput::WellLogs(CrossPlotInput::default()),
    ] {
        match dash.render(&store, &input) {
            PageOutcome::Prompt(msg) => assert!(msg.starts_with("Please load")),
            other => panic!("expected a prompt, got {:?}", other),
        }
    }
}

#[test]
fn views_serialize_to_json() {
    let (dash, store) = loaded_maps();
    let page = dash.render(
        &store,
        &PageInput::General(MapInput {
            block: None,
            wells: vec!["A-1X".into()],
        }),
    );
    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json["status"], "ready");
    assert_eq!(json["body"]["page"], "general");
    assert_eq!(json["body"]["map"]["markers"][0]["name"], "A-1X");
}
