//! wd-core: stable data model for welldash.
//!
//! Contains:
//! - value (typed table cells with a total sort order)
//! - table (column-named rows produced by every parser)
//! - geometry (points and polygons for map overlays)
//! - dataset (tables with one geometry slot per row, well logs)
//! - upload (raw upload requests and dataset kinds)
//! - error (shared error types)

pub mod dataset;
pub mod error;
pub mod geometry;
pub mod table;
pub mod upload;
pub mod value;

// Re-exports: nice ergonomics for downstream crates
pub use dataset::{HeaderRecord, LasHeaders, LasSection, SectionIssue, SpatialDataset, WellLog};
pub use error::{CoreError, CoreResult};
pub use geometry::{BoundingBox, Geometry, Point, Polygon, Ring, RingRole};
pub use table::Table;
pub use upload::{DatasetKind, UploadKind, UploadRequest};
pub use value::CellValue;
