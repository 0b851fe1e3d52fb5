//! wd-formats: file parsers for welldash uploads.
//!
//! Provides:
//! - `ShapefileParser`, `WorkbookParser` and `LasParser` traits
//! - `ShapefileSet` (grouping of `.shp`/`.shx`/`.dbf`/`.prj` uploads)
//! - default backends built on the `shapefile` and `calamine` crates
//! - `Las2Reader`, a LAS 1.2/2.0 text reader with per-section failure isolation
//!
//! # Architecture
//!
//! The traits are the only thing the service layer depends on, which keeps the
//! parser crates out of the rest of welldash and lets tests count or fake parses.
//!
//! # Example
//!
//! ```no_run
//! use wd_formats::{LasParser, Las2Reader};
//!
//! let bytes = std::fs::read("well.las").unwrap();
//! let log = Las2Reader::new().parse(&bytes).unwrap();
//! println!("{} curves", log.curve_names().len());
//! ```

pub mod error;
pub mod las;
pub mod model;
pub mod shapefile_set;
pub mod shp;
pub mod workbook;

// Re-exports for ergonomics
pub use error::{FormatError, FormatResult};
pub use las::Las2Reader;
pub use model::{LasParser, ShapefileParser, WorkbookParser};
pub use shapefile_set::ShapefileSet;
pub use shp::ShapefileCrateParser;
pub use workbook::CalamineWorkbookParser;
