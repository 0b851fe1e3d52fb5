//! `shapefile`-crate backend.

use crate::error::{FormatError, FormatResult};
use crate::model::ShapefileParser;
use crate::shapefile_set::ShapefileSet;
use chrono::NaiveDate;
use shapefile::dbase::{self, FieldValue};
use shapefile::{PolygonRing, Shape, ShapeReader};
use std::io::Cursor;
use wd_core::{CellValue, Geometry, Point, Polygon, Ring, SpatialDataset, Table};

/// Shapefile backend for block polygons and well points.
///
/// Attribute columns keep the dBASE field order. Point, polygon and their
/// M/Z variants are supported; null shapes become explicit null geometries.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShapefileCrateParser;

impl ShapefileCrateParser {
    pub fn new() -> Self {
        Self
    }
}

fn backend(context: &str, err: impl std::fmt::Display) -> FormatError {
    FormatError::Backend {
        message: format!("{}: {}", context, err),
    }
}

impl ShapefileParser for ShapefileCrateParser {
    fn parse(&self, set: &ShapefileSet<'_>) -> FormatResult<SpatialDataset> {
        let dbase_reader = dbase::Reader::new(Cursor::new(set.dbf))
            .map_err(|e| backend("dBASE table", e))?;
        let fields: Vec<String> = dbase_reader
            .fields()
            .iter()
            .map(|f| f.name().to_string())
            .filter(|name| name != "DeletionFlag")
            .collect();

        let shape_reader = match set.shx {
            Some(shx) => ShapeReader::with_shx(Cursor::new(set.shp), Cursor::new(shx)),
            None => ShapeReader::new(Cursor::new(set.shp)),
        }
        .map_err(|e| backend(set.primary_name, e))?;

        let mut reader = shapefile::Reader::new(shape_reader, dbase_reader);
        let mut table = Table::new(fields.iter().cloned())?;
        let mut geometries = Vec::new();

        for item in reader.iter_shapes_and_records() {
            let (shape, record) = item.map_err(|e| backend(set.primary_name, e))?;
            let row = fields
                .iter()
                .map(|name| record.get(name).map(field_to_cell).unwrap_or_default())
                .collect();
            table.push_row(row)?;
            geometries.push(shape_to_geometry(shape)?);
        }

        let crs = set
            .prj
            .map(|bytes| String::from_utf8_lossy(bytes).trim().to_string())
            .filter(|wkt| !wkt.is_empty());

        Ok(SpatialDataset::new(table, geometries)?.with_crs(crs))
    }
}

fn field_to_cell(value: &FieldValue) -> CellValue {
    #[allow(unreachable_patterns)]
    match value {
        FieldValue::Character(Some(s)) | FieldValue::Memo(s) => {
            let s = s.trim();
            if s.is_empty() {
                CellValue::Empty
            } else {
                CellValue::text(s)
            }
        }
        FieldValue::Numeric(Some(n)) => CellValue::Float(*n),
        FieldValue::Float(Some(f)) => CellValue::Float(f64::from(*f)),
        FieldValue::Integer(i) => CellValue::Int(i64::from(*i)),
        FieldValue::Double(d) | FieldValue::Currency(d) => CellValue::Float(*d),
        FieldValue::Logical(Some(b)) => CellValue::Bool(*b),
        FieldValue::Date(Some(d)) => {
            NaiveDate::from_ymd_opt(d.year() as i32, d.month(), d.day())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map_or(CellValue::Empty, CellValue::DateTime)
        }
        FieldValue::Character(None)
        | FieldValue::Numeric(None)
        | FieldValue::Float(None)
        | FieldValue::Logical(None)
        | FieldValue::Date(None) => CellValue::Empty,
        other => CellValue::Text(format!("{:?}", other)),
    }
}

fn shape_to_geometry(shape: Shape) -> FormatResult<Option<Geometry>> {
    let geometry = match shape {
        Shape::NullShape => None,
        Shape::Point(p) => Some(Geometry::Point(Point::new(p.x, p.y))),
        Shape::PointM(p) => Some(Geometry::Point(Point::new(p.x, p.y))),
        Shape::PointZ(p) => Some(Geometry::Point(Point::new(p.x, p.y))),
        Shape::Polygon(poly) => Some(Geometry::Polygon(convert_rings(poly.rings(), |p| {
            Point::new(p.x, p.y)
        }))),
        Shape::PolygonM(poly) => Some(Geometry::Polygon(convert_rings(poly.rings(), |p| {
            Point::new(p.x, p.y)
        }))),
        Shape::PolygonZ(poly) => Some(Geometry::Polygon(convert_rings(poly.rings(), |p| {
            Point::new(p.x, p.y)
        }))),
        other => {
            return Err(FormatError::UnsupportedGeometry {
                what: format!("{:?}", other.shapetype()),
            });
        }
    };
    Ok(geometry)
}

fn convert_rings<P>(rings: &[PolygonRing<P>], xy: impl Fn(&P) -> Point) -> Polygon {
    Polygon::new(
        rings
            .iter()
            .map(|ring| match ring {
                PolygonRing::Outer(pts) => Ring::outer(pts.iter().map(&xy).collect()),
                PolygonRing::Inner(pts) => Ring::inner(pts.iter().map(&xy).collect()),
            })
            .collect(),
    )
}
