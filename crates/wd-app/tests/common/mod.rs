//! Counting fake parsers and sample datasets shared by the integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use wd_app::{Dashboard, Parsers};
use wd_config::DashboardConfig;
use wd_core::{
    CellValue, Geometry, Point, Polygon, Ring, SpatialDataset, Table, UploadKind, UploadRequest,
    WellLog,
};
use wd_formats::{
    FormatError, FormatResult, Las2Reader, LasParser, ShapefileParser, ShapefileSet,
    WorkbookParser,
};

#[derive(Clone, Default)]
pub struct Calls {
    pub shapefile: Rc<Cell<usize>>,
    pub workbook: Rc<Cell<usize>>,
    pub las: Rc<Cell<usize>>,
}

fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

/// Returns the blocks dataset for `.shp` files whose name contains "block",
/// the wells dataset otherwise.
pub struct FakeShapefiles {
    pub calls: Rc<Cell<usize>>,
    pub blocks: SpatialDataset,
    pub wells: SpatialDataset,
}

impl ShapefileParser for FakeShapefiles {
    fn parse(&self, set: &ShapefileSet<'_>) -> FormatResult<SpatialDataset> {
        bump(&self.calls);
        if set.primary_name.contains("block") {
            Ok(self.blocks.clone())
        } else {
            Ok(self.wells.clone())
        }
    }
}

pub struct FakeWorkbook {
    pub calls: Rc<Cell<usize>>,
    pub sheets: HashMap<String, Table>,
}

impl WorkbookParser for FakeWorkbook {
    fn read_sheets(&self, _bytes: &[u8], sheets: &[&str]) -> FormatResult<Vec<Table>> {
        bump(&self.calls);
        sheets
            .iter()
            .map(|name| {
                self.sheets
                    .get(*name)
                    .cloned()
                    .ok_or_else(|| FormatError::MissingSheet {
                        sheet: name.to_string(),
                    })
            })
            .collect()
    }
}

/// Counts calls and delegates to the real LAS reader.
pub struct CountingLas {
    pub calls: Rc<Cell<usize>>,
}

impl LasParser for CountingLas {
    fn parse(&self, bytes: &[u8]) -> FormatResult<WellLog> {
        bump(&self.calls);
        Las2Reader::new().parse(bytes)
    }
}

fn square(x: f64, y: f64) -> Geometry {
    Geometry::Polygon(Polygon::new(vec![Ring::outer(vec![
        Point::new(x, y),
        Point::new(x + 1.0, y),
        Point::new(x + 1.0, y + 1.0),
        Point::new(x, y + 1.0),
        Point::new(x, y),
    ])]))
}

pub fn blocks_dataset() -> SpatialDataset {
    let table = Table::with_rows(
        ["BLOCK_NAME", "OPERATOR"],
        vec![
            vec!["A".into(), "PVEP".into()],
            vec!["B".into(), "JVPC".into()],
        ],
    )
    .unwrap();
    SpatialDataset::new(table, vec![Some(square(108.0, 10.0)), Some(square(110.0, 12.0))])
        .unwrap()
}

pub fn wells_dataset() -> SpatialDataset {
    let table = Table::with_rows(
        ["WELL_NAME", "BLOCK_NAME", "TD_M", "STATUS", "RESULT"],
        vec![
            vec!["A-1X".into(), "A".into(), CellValue::Int(3150), "P&A".into(), "Oil".into()],
            vec!["A-2X".into(), "A".into(), CellValue::Int(2900), "P&A".into(), "Dry".into()],
            vec!["B-1X".into(), "B".into(), CellValue::Int(4020), "Suspended".into(), "Gas".into()],
        ],
    )
    .unwrap();
    let points = vec![
        Some(Geometry::Point(Point::new(108.2, 10.3))),
        Some(Geometry::Point(Point::new(108.6, 10.7))),
        Some(Geometry::Point(Point::new(110.5, 12.5))),
    ];
    SpatialDataset::new(table, points).unwrap()
}

pub fn tops_sheet() -> Table {
    Table::with_rows(
        ["well_name", "top", "age", "surface_md_m"],
        vec![
            vec!["W1".into(), "Sand1".into(), "Miocene".into(), CellValue::Int(1200)],
            vec!["W2".into(), "Basement".into(), "Pre-Tertiary".into(), CellValue::Float(3400.0)],
            vec!["W1".into(), "Sand0".into(), "Pliocene".into(), CellValue::Int(800)],
        ],
    )
    .unwrap()
}

pub fn dsts_sheet() -> Table {
    Table::with_rows(
        ["well_name", "dst_number", "top_md_m", "base_md_m", "result"],
        vec![
            vec!["W1".into(), CellValue::Int(2), CellValue::Float(2100.0), CellValue::Float(2150.0), "Gas".into()],
            vec!["W1".into(), CellValue::Int(1), CellValue::Float(2400.0), CellValue::Float(2420.0), "Water".into()],
        ],
    )
    .unwrap()
}

pub fn dashboard(calls: &Calls) -> Dashboard {
    dashboard_with_sheets(calls, tops_sheet(), dsts_sheet())
}

/// Dashboard whose workbook parser returns the given tops and DST sheets.
pub fn dashboard_with_sheets(calls: &Calls, tops: Table, dsts: Table) -> Dashboard {
    let sheets = HashMap::from([
        ("well_top".to_string(), tops),
        ("well_dst".to_string(), dsts),
    ]);
    let parsers = Parsers {
        shapefile: Box::new(FakeShapefiles {
            calls: calls.shapefile.clone(),
            blocks: blocks_dataset(),
            wells: wells_dataset(),
        }),
        workbook: Box::new(FakeWorkbook {
            calls: calls.workbook.clone(),
            sheets,
        }),
        las: Box::new(CountingLas {
            calls: calls.las.clone(),
        }),
    };
    Dashboard::new(DashboardConfig::default(), parsers)
}

pub fn shapefile_uploads(stem: &str, extensions: &[&str]) -> Vec<UploadRequest> {
    extensions
        .iter()
        .map(|ext| {
            UploadRequest::new(
                format!("{}.{}", stem, ext),
                UploadKind::ShapefileComponent,
                format!("{} {}", stem, ext).into_bytes(),
            )
        })
        .collect()
}

pub fn full_set(stem: &str) -> Vec<UploadRequest> {
    shapefile_uploads(stem, &["shp", "shx", "dbf", "prj"])
}

pub fn workbook_upload() -> Vec<UploadRequest> {
    vec![UploadRequest::new(
        "wells_data.xlsx",
        UploadKind::Spreadsheet,
        b"workbook bytes".to_vec(),
    )]
}

pub const SAMPLE_LAS: &str = "\
~Version
 VERS. 2.0 : CWLS LOG ASCII STANDARD
 WRAP. NO  : ONE LINE PER DEPTH STEP
~Well
 NULL.  -999.25 : NULL VALUE
 WELL.  15-1-SD-1X : WELL
~Curve
 DEPT.M    : DEPTH
 GR  .GAPI : GAMMA RAY
 RT  .OHMM : DEEP RESISTIVITY
~Parameter
 BHT.DEGC 102.0 : BOTTOM HOLE TEMPERATURE
~Other
 Logged after a short trip, tool sticking noted
~A
1500.0  45.0   2.0
1500.5  60.0   0.0
1501.0  -999.25  8.5
1501.5  72.0   -3.0
";

pub fn las_upload(name: &str, text: &str) -> Vec<UploadRequest> {
    vec![UploadRequest::new(name, UploadKind::WellLog, text.as_bytes().to_vec())]
}
