//! Shared application service layer for welldash.
//!
//! This crate sits between the front ends and the lower crates. It owns the
//! store key catalogue, the upload loaders, the selection resolver and the
//! page render models, and dispatches user interactions through `Dashboard`.

pub mod config_service;
pub mod dashboard;
pub mod error;
pub mod keys;
pub mod loader;
pub mod pages;
pub mod query;
pub mod selection;

// Re-export key types for convenience
pub use config_service::{load_config, validate};
pub use dashboard::{Dashboard, Interaction, Parsers, Rendered};
pub use error::{AppError, AppResult, ErrorCategory};
pub use loader::{
    LoadOutcome, LoadReport, load_blocks, load_well_log, load_well_workbook, load_wells,
};
pub use pages::{Page, PageInput, PageOutcome, PageView, inline_message, page_boundary};
pub use query::{
    PopupField, dsts_for_well, selected_wells_table, tops_for_well, well_popup, wells_in_block,
};
pub use selection::{
    AxisScale, CrossPlotInput, MapInput, TopsDstsInput, resolve_multi, resolve_single,
};
