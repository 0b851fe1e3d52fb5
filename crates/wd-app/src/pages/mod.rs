//! Page render models.
//!
//! A page reads the store, recomputes its selection and returns a view
//! model. Drawing the view is left to the front end.

pub mod general;
pub mod tops_dsts;
pub mod well_logs;

use serde::Serialize;
use tracing::warn;

use crate::error::{AppError, AppResult, ErrorCategory};
use crate::selection::{CrossPlotInput, MapInput, TopsDstsInput};

pub use general::GeneralView;
pub use tops_dsts::TopsDstsView;
pub use well_logs::WellLogsView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    General,
    TopsDsts,
    WellLogs,
}

/// Widget input of one page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageInput {
    General(MapInput),
    TopsDsts(TopsDstsInput),
    WellLogs(CrossPlotInput),
}

impl PageInput {
    pub fn page(&self) -> Page {
        match self {
            PageInput::General(_) => Page::General,
            PageInput::TopsDsts(_) => Page::TopsDsts,
            PageInput::WellLogs(_) => Page::WellLogs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageView {
    General(GeneralView),
    TopsDsts(TopsDstsView),
    WellLogs(WellLogsView),
}

/// What the page shows after an interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "body", rename_all = "snake_case")]
pub enum PageOutcome<V> {
    /// Data not loaded yet; the uploader stays visible.
    Prompt(String),
    Ready(V),
    /// One-line message; the rest of the dashboard stays usable.
    Failed(String),
}

impl<V> PageOutcome<V> {
    pub fn ready(&self) -> Option<&V> {
        match self {
            PageOutcome::Ready(view) => Some(view),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(V) -> U) -> PageOutcome<U> {
        match self {
            PageOutcome::Prompt(msg) => PageOutcome::Prompt(msg),
            PageOutcome::Ready(view) => PageOutcome::Ready(f(view)),
            PageOutcome::Failed(msg) => PageOutcome::Failed(msg),
        }
    }
}

/// Converts a page result into what the user sees.
pub fn page_boundary<V>(result: AppResult<V>) -> PageOutcome<V> {
    match result {
        Ok(view) => PageOutcome::Ready(view),
        Err(err) if err.category() == ErrorCategory::NotYetLoaded => {
            PageOutcome::Prompt(err.to_string())
        }
        Err(err) => {
            warn!(error = %err, "Page failed");
            PageOutcome::Failed(inline_message(&err))
        }
    }
}

/// First line of an error, as shown inline on a page.
pub fn inline_message(err: &AppError) -> String {
    let message = err.to_string();
    message.lines().next().unwrap_or_default().to_string()
}

/// Inclusive depth window in measured depth metres, `start <= stop`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DepthRange {
    pub start: f64,
    pub stop: f64,
}

impl DepthRange {
    /// Orders the bounds; non-finite input falls back to `default`.
    pub fn normalized(requested: Option<(f64, f64)>, default: (f64, f64)) -> Self {
        let (a, b) = match requested {
            Some((a, b)) if a.is_finite() && b.is_finite() => (a, b),
            _ => default,
        };
        Self {
            start: a.min(b),
            stop: a.max(b),
        }
    }

    pub fn contains(&self, depth: f64) -> bool {
        depth >= self.start && depth <= self.stop
    }

    pub fn overlaps(&self, top: f64, base: f64) -> bool {
        top.min(base) <= self.stop && top.max(base) >= self.start
    }
}
