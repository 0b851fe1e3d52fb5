//! Store key catalogue.
//!
//! Keys are namespaced by dataset. A dataset key and its `source_name`
//! companion are always published together.

use wd_core::{LasHeaders, SectionIssue, SpatialDataset, Table};
use wd_session::Key;

pub const BLOCKS: Key<SpatialDataset> = Key::new("blocks");
pub const BLOCKS_SOURCE: Key<String> = Key::new("blocks.source_name");
pub const BLOCK_NAMES: Key<Vec<String>> = Key::new("blocks.names");

pub const WELLS: Key<SpatialDataset> = Key::new("wells");
pub const WELLS_SOURCE: Key<String> = Key::new("wells.source_name");

/// Sorted by well name, then depth.
pub const WELL_TOPS: Key<Table> = Key::new("well_top");
/// Sorted by well name, then DST number.
pub const WELL_DSTS: Key<Table> = Key::new("well_dst");
pub const TOP_WELLS: Key<Vec<String>> = Key::new("well_top.wells");
pub const DST_WELLS: Key<Vec<String>> = Key::new("well_dst.wells");
pub const WORKBOOK_SOURCE: Key<String> = Key::new("workbook.source_name");

pub const LAS_CURVES: Key<Table> = Key::new("las_curves");
pub const LAS_HEADERS: Key<LasHeaders> = Key::new("las_headers");
pub const LAS_ISSUES: Key<Vec<SectionIssue>> = Key::new("las.issues");
pub const LAS_WELL_NAME: Key<String> = Key::new("las.well_name");
pub const LAS_SOURCE: Key<String> = Key::new("las.source_name");
