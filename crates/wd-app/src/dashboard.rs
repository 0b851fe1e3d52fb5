//! Interaction dispatch.

use tracing::{debug, info_span, warn};
use wd_config::DashboardConfig;
use wd_core::{DatasetKind, UploadRequest};
use wd_formats::{
    CalamineWorkbookParser, Las2Reader, LasParser, ShapefileCrateParser, ShapefileParser,
    WorkbookParser,
};
use wd_session::SessionStore;

use crate::error::AppResult;
use crate::loader::{self, LoadOutcome};
use crate::pages::{self, PageInput, PageOutcome, PageView};

/// Parser backends used by the loaders.
pub struct Parsers {
    pub shapefile: Box<dyn ShapefileParser>,
    pub workbook: Box<dyn WorkbookParser>,
    pub las: Box<dyn LasParser>,
}

impl Default for Parsers {
    fn default() -> Self {
        Self {
            shapefile: Box::new(ShapefileCrateParser::new()),
            workbook: Box::new(CalamineWorkbookParser::new()),
            las: Box::new(Las2Reader::new()),
        }
    }
}

/// One user action.
#[derive(Debug, Clone)]
pub enum Interaction {
    /// Files picked for a dataset. An empty list means the picker was cancelled.
    Upload {
        dataset: DatasetKind,
        files: Vec<UploadRequest>,
    },
    /// A widget changed; only the selection is recomputed.
    Refresh,
}

/// Result of one interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    /// Set when the interaction was an upload that loaded or was skipped.
    pub load: Option<LoadOutcome>,
    /// One-line message for an upload that failed. The page below it still
    /// renders from whatever the store held before.
    pub load_error: Option<String>,
    pub page: PageOutcome<PageView>,
}

pub struct Dashboard {
    config: DashboardConfig,
    parsers: Parsers,
}

impl Dashboard {
    pub fn new(config: DashboardConfig, parsers: Parsers) -> Self {
        Self { config, parsers }
    }

    pub fn with_default_parsers(config: DashboardConfig) -> Self {
        Self::new(config, Parsers::default())
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Applies an interaction to the session and renders the page.
    ///
    /// A failed upload is reported in `load_error`; the store keeps whatever
    /// it held before and the page is rendered from it.
    pub fn handle(
        &self,
        store: &mut SessionStore,
        interaction: Interaction,
        input: &PageInput,
    ) -> Rendered {
        let _span = info_span!("interaction", page = ?input.page()).entered();

        let (load, load_error) = match interaction {
            Interaction::Upload { dataset, files } => match self.load(store, dataset, &files) {
                Ok(outcome) => (Some(outcome), None),
                Err(err) => {
                    warn!(%dataset, error = %err, "Upload failed");
                    (None, Some(pages::inline_message(&err)))
                }
            },
            Interaction::Refresh => (None, None),
        };

        Rendered {
            load,
            load_error,
            page: self.render(store, input),
        }
    }

    /// Runs the loader for `dataset`.
    pub fn load(
        &self,
        store: &mut SessionStore,
        dataset: DatasetKind,
        files: &[UploadRequest],
    ) -> AppResult<LoadOutcome> {
        debug!(%dataset, files = files.len(), "Upload");
        match dataset {
            DatasetKind::Blocks => loader::load_blocks(
                store,
                files,
                self.parsers.shapefile.as_ref(),
                &self.config.shapefiles,
            ),
            DatasetKind::Wells => loader::load_wells(
                store,
                files,
                self.parsers.shapefile.as_ref(),
                &self.config.shapefiles,
            ),
            DatasetKind::WellData => loader::load_well_workbook(
                store,
                files,
                self.parsers.workbook.as_ref(),
                &self.config.workbook,
            ),
            DatasetKind::WellLog => loader::load_well_log(store, files, self.parsers.las.as_ref()),
        }
    }

    /// Recomputes the page's selection and view from the store.
    pub fn render(&self, store: &SessionStore, input: &PageInput) -> PageOutcome<PageView> {
        match input {
            PageInput::General(input) => {
                pages::page_boundary(pages::general::render(store, &self.config, input))
                    .map(PageView::General)
            }
            PageInput::TopsDsts(input) => {
                pages::page_boundary(pages::tops_dsts::render(store, &self.config, input))
                    .map(PageView::TopsDsts)
            }
            PageInput::WellLogs(input) => {
                pages::page_boundary(pages::well_logs::render(store, &self.config, input))
                    .map(PageView::WellLogs)
            }
        }
    }
}
