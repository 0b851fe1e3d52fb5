//! Parser outputs: spatial datasets and well logs.

use crate::error::{CoreError, CoreResult};
use crate::geometry::{BoundingBox, Geometry};
use crate::table::Table;
use serde::Serialize;

/// Attribute table with exactly one geometry slot (possibly null) per row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpatialDataset {
    table: Table,
    geometries: Vec<Option<Geometry>>,
    crs: Option<String>,
}

impl SpatialDataset {
    pub fn new(table: Table, geometries: Vec<Option<Geometry>>) -> CoreResult<Self> {
        if table.len() != geometries.len() {
            return Err(CoreError::GeometryCount {
                rows: table.len(),
                geometries: geometries.len(),
            });
        }
        Ok(Self {
            table,
            geometries,
            crs: None,
        })
    }

    pub fn with_crs(mut self, crs: Option<String>) -> Self {
        self.crs = crs;
        self
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn geometries(&self) -> &[Option<Geometry>] {
        &self.geometries
    }

    pub fn crs(&self) -> Option<&str> {
        self.crs.as_deref()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn geometry(&self, row: usize) -> Option<&Geometry> {
        self.geometries.get(row).and_then(Option::as_ref)
    }

    /// Rows (with their geometries) at the given indices.
    pub fn subset(&self, rows: &[usize]) -> SpatialDataset {
        SpatialDataset {
            table: self.table.take_rows(rows),
            geometries: rows
                .iter()
                .filter(|&&i| i < self.geometries.len())
                .map(|&i| self.geometries[i].clone())
                .collect(),
            crs: self.crs.clone(),
        }
    }

    pub fn bbox(&self) -> Option<BoundingBox> {
        self.geometries
            .iter()
            .flatten()
            .filter_map(Geometry::bbox)
            .reduce(BoundingBox::union)
    }
}

/// One `MNEM.UNIT VALUE : DESCRIPTION` record of a LAS header section.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeaderRecord {
    pub name: String,
    pub unit: String,
    pub value: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LasSection {
    Version,
    Well,
    Curve,
    Parameter,
    Other,
    Data,
}

impl LasSection {
    pub fn label(self) -> &'static str {
        match self {
            Self::Version => "version",
            Self::Well => "well",
            Self::Curve => "curve",
            Self::Parameter => "parameter",
            Self::Other => "other",
            Self::Data => "data",
        }
    }
}

/// The four metadata sections of a LAS file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LasHeaders {
    pub well: Vec<HeaderRecord>,
    pub curves: Vec<HeaderRecord>,
    pub parameters: Vec<HeaderRecord>,
    pub other: Vec<HeaderRecord>,
}

impl LasHeaders {
    pub fn section(&self, section: LasSection) -> &[HeaderRecord] {
        match section {
            LasSection::Well => &self.well,
            LasSection::Curve => &self.curves,
            LasSection::Parameter => &self.parameters,
            LasSection::Other => &self.other,
            LasSection::Version | LasSection::Data => &[],
        }
    }

    /// Value of a well-section mnemonic, case-insensitive.
    pub fn well_value(&self, mnemonic: &str) -> Option<&str> {
        self.well
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(mnemonic))
            .map(|r| r.value.as_str())
    }
}

/// A section that could not be read; its table degrades to empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionIssue {
    pub section: LasSection,
    pub message: String,
}

/// Parsed LAS file: depth-indexed curve table plus header sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellLog {
    pub well_name: Option<String>,
    /// First column is the depth index, then one column per curve.
    pub curves: Table,
    pub headers: LasHeaders,
    pub issues: Vec<SectionIssue>,
}

impl WellLog {
    pub fn curve_names(&self) -> &[String] {
        self.curves.columns()
    }

    pub fn depth_column(&self) -> Option<&str> {
        self.curves.columns().first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::value::CellValue;

    fn wells() -> Table {
        Table::with_rows(
            ["WELL_NAME"],
            vec![vec!["A-1X".into()], vec!["B-2X".into()], vec!["C-3X".into()]],
        )
        .unwrap()
    }

    #[test]
    fn geometry_count_must_match_rows() {
        let err = SpatialDataset::new(wells(), vec![None]).unwrap_err();
        assert_eq!(
            err,
            CoreError::GeometryCount {
                rows: 3,
                geometries: 1
            }
        );
    }

    #[test]
    fn subset_keeps_geometry_alignment() {
        let ds = SpatialDataset::new(
            wells(),
            vec![
                Some(Geometry::Point(Point::new(1.0, 1.0))),
                None,
                Some(Geometry::Point(Point::new(3.0, 3.0))),
            ],
        )
        .unwrap();
        let sub = ds.subset(&[2, 1]);
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.table().rows()[0][0], CellValue::text("C-3X"));
        assert_eq!(sub.geometry(0), Some(&Geometry::Point(Point::new(3.0, 3.0))));
        assert_eq!(sub.geometry(1), None);
        let bbox = ds.bbox().unwrap();
        assert_eq!((bbox.min_x, bbox.max_x), (1.0, 3.0));
    }

    #[test]
    fn well_value_is_case_insensitive() {
        let headers = LasHeaders {
            well: vec![HeaderRecord {
                name: "WELL".into(),
                value: "15-1-SD-1X".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(headers.well_value("well"), Some("15-1-SD-1X"));
        assert!(headers.section(LasSection::Other).is_empty());
    }
}
