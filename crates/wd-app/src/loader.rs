//! Upload-driven loaders.
//!
//! Each loader validates its uploads, parses them through the session memo
//! and publishes the result with one staged commit. Every fallible step
//! happens before staging, so a failed load leaves the store untouched.
//! An empty upload list is a no-op.

use std::any::Any;
use std::rc::Rc;
use tracing::{debug, info, warn};
use wd_config::{ShapefileColumns, WorkbookConfig};
use wd_core::{DatasetKind, SpatialDataset, Table, UploadRequest};
use wd_formats::{FormatResult, LasParser, ShapefileParser, ShapefileSet, WorkbookParser};
use wd_session::{InputIdentity, SessionStore};

use crate::error::{AppError, AppResult};
use crate::keys;

/// What a loader did with its uploads.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Nothing was uploaded; the store was not touched.
    Skipped,
    Loaded(LoadReport),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub dataset: DatasetKind,
    /// File name shown next to the loaded data.
    pub display_name: String,
    pub rows: usize,
    /// The parse result came from the session memo.
    pub from_cache: bool,
}

pub fn load_blocks(
    store: &mut SessionStore,
    uploads: &[UploadRequest],
    parser: &dyn ShapefileParser,
    columns: &ShapefileColumns,
) -> AppResult<LoadOutcome> {
    let kind = DatasetKind::Blocks;
    if uploads.is_empty() {
        debug!(dataset = %kind, "No uploads, skipping load");
        return Ok(LoadOutcome::Skipped);
    }
    check_uploads(kind, uploads)?;

    let (dataset, display_name, from_cache) = parse_shapefile(store, kind, uploads, parser)?;
    require_columns(kind, dataset.table(), &[&columns.block_name])?;
    let names = dataset.table().unique_text(&columns.block_name)?;

    let report = LoadReport {
        dataset: kind,
        display_name: display_name.clone(),
        rows: dataset.len(),
        from_cache,
    };
    store
        .stage()
        .put(&keys::BLOCKS, dataset)
        .put(&keys::BLOCKS_SOURCE, display_name)
        .put(&keys::BLOCK_NAMES, names)
        .commit()?;
    published(&report);
    Ok(LoadOutcome::Loaded(report))
}

pub fn load_wells(
    store: &mut SessionStore,
    uploads: &[UploadRequest],
    parser: &dyn ShapefileParser,
    columns: &ShapefileColumns,
) -> AppResult<LoadOutcome> {
    let kind = DatasetKind::Wells;
    if uploads.is_empty() {
        debug!(dataset = %kind, "No uploads, skipping load");
        return Ok(LoadOutcome::Skipped);
    }
    check_uploads(kind, uploads)?;

    let (dataset, display_name, from_cache) = parse_shapefile(store, kind, uploads, parser)?;
    require_columns(
        kind,
        dataset.table(),
        &[&columns.well_name, &columns.well_block],
    )?;

    let report = LoadReport {
        dataset: kind,
        display_name: display_name.clone(),
        rows: dataset.len(),
        from_cache,
    };
    store
        .stage()
        .put(&keys::WELLS, dataset)
        .put(&keys::WELLS_SOURCE, display_name)
        .commit()?;
    published(&report);
    Ok(LoadOutcome::Loaded(report))
}

/// Loads the tops and DST sheets of one workbook.
pub fn load_well_workbook(
    store: &mut SessionStore,
    uploads: &[UploadRequest],
    parser: &dyn WorkbookParser,
    config: &WorkbookConfig,
) -> AppResult<LoadOutcome> {
    let kind = DatasetKind::WellData;
    let Some(upload) = single_upload(kind, uploads)? else {
        return Ok(LoadOutcome::Skipped);
    };

    let sheets = [config.top_sheet.as_str(), config.dst_sheet.as_str()];
    let (parsed, from_cache) = memoized(store, kind, uploads, || {
        parser.read_sheets(&upload.bytes, &sheets)
    })
    .map_err(|e| AppError::parse(&upload.file_name, e))?;

    let [tops, dsts] = parsed.as_slice() else {
        return Err(AppError::InvalidUpload(format!(
            "{} returned {} sheets, expected 2",
            upload.file_name,
            parsed.len()
        )));
    };

    let well = config.well_column.as_str();
    require_columns(
        kind,
        tops,
        &[well, &config.top_name_column, &config.top_depth_column],
    )?;
    require_columns(
        kind,
        dsts,
        &[
            well,
            &config.dst_number_column,
            &config.dst_top_column,
            &config.dst_base_column,
        ],
    )?;

    let mut tops = tops.clone();
    tops.sort_by_columns(&[well, &config.top_depth_column])?;
    let mut dsts = dsts.clone();
    dsts.sort_by_columns(&[well, &config.dst_number_column])?;
    let top_wells = tops.unique_text(well)?;
    let dst_wells = dsts.unique_text(well)?;

    let report = LoadReport {
        dataset: kind,
        display_name: upload.file_name.clone(),
        rows: tops.len() + dsts.len(),
        from_cache,
    };
    store
        .stage()
        .put(&keys::WELL_TOPS, tops)
        .put(&keys::WELL_DSTS, dsts)
        .put(&keys::TOP_WELLS, top_wells)
        .put(&keys::DST_WELLS, dst_wells)
        .put(&keys::WORKBOOK_SOURCE, upload.file_name.clone())
        .commit()?;
    published(&report);
    Ok(LoadOutcome::Loaded(report))
}

/// Loads one LAS file. The well name falls back to the file stem when the
/// well section has no usable `WELL` record.
pub fn load_well_log(
    store: &mut SessionStore,
    uploads: &[UploadRequest],
    parser: &dyn LasParser,
) -> AppResult<LoadOutcome> {
    let kind = DatasetKind::WellLog;
    let Some(upload) = single_upload(kind, uploads)? else {
        return Ok(LoadOutcome::Skipped);
    };

    let (log, from_cache) = memoized(store, kind, uploads, || parser.parse(&upload.bytes))
        .map_err(|e| AppError::parse(&upload.file_name, e))?;

    let well_name = log
        .well_name
        .clone()
        .unwrap_or_else(|| upload.stem().to_string());
    for issue in &log.issues {
        debug!(section = issue.section.label(), message = %issue.message, "LAS section left empty");
    }

    let report = LoadReport {
        dataset: kind,
        display_name: upload.file_name.clone(),
        rows: log.curves.len(),
        from_cache,
    };
    store
        .stage()
        .put(&keys::LAS_CURVES, log.curves.clone())
        .put(&keys::LAS_HEADERS, log.headers.clone())
        .put(&keys::LAS_ISSUES, log.issues.clone())
        .put(&keys::LAS_WELL_NAME, well_name)
        .put(&keys::LAS_SOURCE, upload.file_name.clone())
        .commit()?;
    published(&report);
    Ok(LoadOutcome::Loaded(report))
}

fn published(report: &LoadReport) {
    info!(
        dataset = %report.dataset,
        source = %report.display_name,
        rows = report.rows,
        from_cache = report.from_cache,
        "Dataset published"
    );
}

/// Every upload must carry the kind and an extension the dataset accepts.
fn check_uploads(kind: DatasetKind, uploads: &[UploadRequest]) -> AppResult<()> {
    let expected = kind.upload_kind();
    for upload in uploads {
        if upload.kind != expected || !upload.has_accepted_extension() {
            warn!(dataset = %kind, file = %upload.file_name, "Rejected upload");
            return Err(AppError::InvalidUpload(format!(
                "{} is not a {} file (expected .{})",
                upload.file_name,
                expected.label(),
                expected.accepted_extensions().join(", .")
            )));
        }
    }
    Ok(())
}

fn single_upload(kind: DatasetKind, uploads: &[UploadRequest]) -> AppResult<Option<&UploadRequest>> {
    match uploads {
        [] => {
            debug!(dataset = %kind, "No uploads, skipping load");
            Ok(None)
        }
        [upload] => {
            check_uploads(kind, uploads)?;
            Ok(Some(upload))
        }
        _ => {
            warn!(dataset = %kind, count = uploads.len(), "Rejected upload");
            Err(AppError::InvalidUpload(format!(
                "expected a single {} file, got {}",
                kind.upload_kind().label(),
                uploads.len()
            )))
        }
    }
}

fn require_columns(kind: DatasetKind, table: &Table, columns: &[&str]) -> AppResult<()> {
    match columns.iter().find(|c| table.column_index(c).is_none()) {
        Some(missing) => Err(AppError::MissingColumn {
            dataset: kind,
            column: missing.to_string(),
        }),
        None => Ok(()),
    }
}

fn parse_shapefile(
    store: &mut SessionStore,
    kind: DatasetKind,
    uploads: &[UploadRequest],
    parser: &dyn ShapefileParser,
) -> AppResult<(Rc<SpatialDataset>, String, bool)> {
    let set = ShapefileSet::from_uploads(uploads).map_err(|e| AppError::parse(kind.label(), e))?;
    let (dataset, from_cache) = memoized(store, kind, uploads, || parser.parse(&set))
        .map_err(|e| AppError::parse(set.primary_name, e))?;
    Ok((dataset, set.primary_name.to_string(), from_cache))
}

/// Runs `compute` through the session memo and reports whether it was a hit.
fn memoized<T: Any>(
    store: &mut SessionStore,
    kind: DatasetKind,
    uploads: &[UploadRequest],
    compute: impl FnOnce() -> FormatResult<T>,
) -> FormatResult<(Rc<T>, bool)> {
    let identity = InputIdentity::of_uploads(kind, uploads);
    let hits = store.memo_stats().hits;
    let value = store.memoize(kind, &identity, compute)?;
    Ok((value, store.memo_stats().hits > hits))
}
